//! Wipe the saved document.

use anyhow::Result;
use clap::Args;
use console::style;

use super::{confirm, done};
use crate::app::App;

/// Delete all saved data and start over (irreversible)
#[derive(Args, Debug)]
pub struct Reset {
    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Reset {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let path = app.session.repository().path().display().to_string();
        println!("{}", style("This deletes every shadow, buff, corpse and card.").yellow());
        println!("  {}", style(&path).dim());

        if !self.yes && !confirm("Proceed?")? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        app.session.reset()?;
        tracing::info!("Reset document {}", path);
        done("All data cleared");
        Ok(())
    }
}
