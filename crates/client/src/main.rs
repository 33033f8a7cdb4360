//! Shadow Fruit calculator command line.
//!
//! Composition root: reads `.env` and the environment, sets up logging, opens
//! the saved document, then runs one command against it. Every mutating
//! command rewrites the document before returning.
//!
//! ```bash
//! shadow-fruit shadow add "Oars" --raw 20 --prof 6 --template 8
//! shadow-fruit stack temp20 +2 --target corpse-1
//! shadow-fruit summary
//! ```

mod app;
mod commands;
mod dirs;
mod logging;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use shadow_core::{ErrorSeverity, LedgerError, ShadowError};
use shadow_runtime::RuntimeError;

use app::{App, GlobalOpts};
use commands::{
    AbilityCommand, BuffCommand, CorpseCommand, Dc, Generate, Pool, PrefsCommand, Reset, Score,
    ShadowCommand, Stack, Summary, TargetCommand,
};

/// Shadow Fruit power calculator
#[derive(Parser)]
#[command(name = "shadow-fruit")]
#[command(about = "Score shadows, price buffs, and build reanimated corpses", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Preview a shadow's level and power
    Score(Score),

    /// Manage stored shadows
    #[command(subcommand)]
    Shadow(ShadowCommand),

    /// Show the shadow power pool
    Pool(Pool),

    /// Manage buff targets
    #[command(subcommand)]
    Target(TargetCommand),

    /// Add or remove buff copies on a target
    Stack(Stack),

    /// Browse the catalog or add custom buffs
    #[command(subcommand)]
    Buff(BuffCommand),

    /// Suggest a shadow save DC
    Dc(Dc),

    /// Generate and inspect reanimated corpses
    #[command(subcommand)]
    Corpse(CorpseCommand),

    /// Manage ability cards
    #[command(subcommand)]
    Ability(AbilityCommand),

    /// Draft abilities with the external text generator
    Generate(Generate),

    /// Print summary cards for every target
    Summary(Summary),

    /// Interface preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Write the document to disk now
    Save,

    /// Delete all saved data
    Reset(Reset),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let Cli { global, command } = Cli::parse();

    match command {
        // Scoring touches no document.
        Command::Score(cmd) => cmd.execute(),
        command => run(&global, command).await,
    }
}

async fn run(global: &GlobalOpts, command: Command) -> Result<()> {
    let _guard = logging::setup_logging(global.session.as_deref(), global.verbose)?;

    let mut app = App::open(global)?;

    let result = match command {
        Command::Score(cmd) => cmd.execute(),
        Command::Shadow(cmd) => cmd.execute(&mut app),
        Command::Pool(cmd) => cmd.execute(&mut app),
        Command::Target(cmd) => cmd.execute(&mut app),
        Command::Stack(cmd) => cmd.execute(&mut app),
        Command::Buff(cmd) => cmd.execute(&mut app),
        Command::Dc(cmd) => cmd.execute(&mut app),
        Command::Corpse(cmd) => cmd.execute(&mut app),
        Command::Ability(cmd) => cmd.execute(&mut app),
        Command::Generate(cmd) => cmd.execute(&mut app).await,
        Command::Summary(cmd) => cmd.execute(&mut app),
        Command::Prefs(cmd) => cmd.execute(&mut app),
        Command::Save => save(&app),
        Command::Reset(cmd) => cmd.execute(&mut app),
    };

    if let Err(err) = &result {
        report(err);
    }
    result
}

/// The refusal behind `err`, when a ledger rule rejected the request.
fn refusal(err: &anyhow::Error) -> Option<&LedgerError> {
    match err.downcast_ref::<RuntimeError>() {
        Some(RuntimeError::Ledger(refusal)) => Some(refusal),
        _ => err.downcast_ref::<LedgerError>(),
    }
}

fn report(err: &anyhow::Error) {
    let Some(refusal) = refusal(err) else {
        tracing::error!("Command failed: {:#}", err);
        return;
    };
    let severity = refusal.severity();
    match severity {
        ErrorSeverity::Internal => tracing::error!(
            code = refusal.error_code(),
            severity = severity.as_str(),
            "Request refused: {}",
            refusal
        ),
        _ => tracing::warn!(
            code = refusal.error_code(),
            severity = severity.as_str(),
            "Request refused: {}",
            refusal
        ),
    }
    if severity.is_recoverable() {
        eprintln!(
            "{} Activate more shadows or remove stacks elsewhere, then retry.",
            style("hint:").yellow().bold()
        );
    }
}

fn save(app: &App) -> Result<()> {
    app.session.save()?;
    println!(
        "{} Saved {}",
        style("✓").green().bold(),
        app.session.repository().path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shadow-fruit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_stack_delta() {
        let cli = parse(&["stack", "temp20", "-1", "--target", "ally-1"]);
        let Command::Stack(stack) = cli.command else {
            panic!("expected stack");
        };
        assert_eq!(stack.delta, -1);
        assert_eq!(stack.target.as_deref(), Some("ally-1"));
    }

    #[test]
    fn global_options_follow_subcommands() {
        let cli = parse(&["summary", "--catalog", "extra.ron", "-v"]);
        assert!(cli.global.verbose);
        assert_eq!(
            cli.global.catalog.as_deref(),
            Some(std::path::Path::new("extra.ron"))
        );
    }

    #[test]
    fn ledger_refusals_are_recognized_through_the_runtime_error() {
        let err = anyhow::Error::from(RuntimeError::Ledger(LedgerError::SpendCapExceeded {
            cost: 15,
            available: 3,
        }));
        let found = refusal(&err).unwrap();
        assert_eq!(found.error_code(), "LEDGER_SPEND_CAP_EXCEEDED");
        assert!(found.severity().is_recoverable());

        let other = anyhow::anyhow!("disk full");
        assert!(refusal(&other).is_none());
    }

    #[test]
    fn unknown_card_field_is_rejected() {
        let args = ["shadow-fruit", "ability", "edit", "ability-1", "targetId", "x"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["shadow-fruit", "ability", "edit", "ability-1", "Damage", "2d6"];
        assert!(Cli::try_parse_from(args).is_ok());
    }
}
