//! Buff targets, stacks, the catalog, and the DC helper.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::style;

use super::{done, missing};
use crate::app::App;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum TargetCommand {
    /// List buff targets (* marks the current one)
    List,

    /// Add an ally as a buff target
    AddAlly { name: String },

    /// Make a target the current buff target
    Select { id: String },

    /// Replace a target's notes / rulings
    Notes {
        id: String,
        #[arg(default_value = "")]
        text: String,
    },
}

impl TargetCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::List => render::targets(session.state()),
            Self::AddAlly { name } => {
                let id = session.try_apply(|fruit| fruit.add_ally(&name))?;
                done(format!("Added ally {} ({})", name.trim(), id));
            }
            Self::Select { id } => {
                if !session.apply(|fruit| fruit.select_target(&id))? {
                    return Err(missing("Target", &id));
                }
                render::targets(session.state());
            }
            Self::Notes { id, text } => {
                if !session.apply(|fruit| fruit.set_target_notes(&id, &text))? {
                    return Err(missing("Target", &id));
                }
                done(format!("Notes updated for {}", id));
            }
        }
        Ok(())
    }
}

/// Add or remove copies of a buff on a target
#[derive(Args, Debug)]
pub struct Stack {
    /// Buff id from `buff list`
    pub buff: String,

    /// Copies to add (negative removes)
    #[arg(default_value_t = 1, allow_hyphen_values = true)]
    pub delta: i64,

    /// Target id (default: current target)
    #[arg(long)]
    pub target: Option<String>,
}

impl Stack {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        let target = self
            .target
            .unwrap_or_else(|| session.state().ui.current_target.to_string());

        let count = session
            .try_apply(|fruit| fruit.adjust_stack_on(&target, &self.buff, self.delta))?;
        let Some(count) = count else {
            if session.state().targets.contains(&target) {
                bail!("Unknown buff: {}", self.buff);
            }
            return Err(missing("Target", &target));
        };

        tracing::info!("{} on {} now ×{}", self.buff, target, count);
        let lines = session.view(|fruit| fruit.stack_lines(&target));
        render::stack_lines(&lines);
        render::pool(&session.view(|fruit| fruit.power_pool()));
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum BuffCommand {
    /// Show the catalog with prices for the current target
    List,

    /// Add a custom buff to the catalog
    AddCustom {
        name: String,
        /// Price of the first copy (must be positive)
        #[arg(allow_hyphen_values = true)]
        cost: i64,
        #[arg(default_value = "")]
        description: String,
    },
}

impl BuffCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::List => {
                render::catalog(session.state());
                render::buff_tools(session.state());
            }
            Self::AddCustom {
                name,
                cost,
                description,
            } => {
                let id =
                    session.try_apply(|fruit| fruit.add_custom_buff(&name, cost, &description))?;
                done(format!("Added custom buff {} ({})", name.trim(), id));
            }
        }
        Ok(())
    }
}

/// Suggest a save DC: 8 + proficiency + ability + half shadow level
#[derive(Args, Debug)]
pub struct Dc {
    /// Shadow level to use
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub sl: i32,

    /// Proficiency modifier
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub prof_mod: i32,

    /// Ability modifier
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub ability_mod: i32,
}

impl Dc {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let dc = app
            .session
            .apply(|fruit| fruit.compute_dc(self.sl, self.prof_mod, self.ability_mod))?;
        println!("Suggested Shadow DC: {}", style(dc).bold());
        Ok(())
    }
}
