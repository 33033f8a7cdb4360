//! Command implementations.
//!
//! Each module owns its clap arguments and an `execute` that applies the
//! operation through the session and prints the result.

mod ability;
mod corpse;
mod generate;
mod prefs;
mod reset;
mod shadow;
mod summary;
mod target;

pub use ability::AbilityCommand;
pub use corpse::CorpseCommand;
pub use generate::Generate;
pub use prefs::PrefsCommand;
pub use reset::Reset;
pub use shadow::{Score, ShadowCommand};
pub use summary::{Pool, Summary};
pub use target::{BuffCommand, Dc, Stack, TargetCommand};

use std::io::{self, Write};

use anyhow::Result;
use console::style;

pub(crate) fn done(message: impl std::fmt::Display) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub(crate) fn missing(kind: &str, id: &str) -> anyhow::Error {
    anyhow::anyhow!("{} not found: {}", kind, id)
}

/// Prompt on stdout; only `y`/`yes` confirms.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    print!("{} ", style(format!("{} [y/N]", prompt)).yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
