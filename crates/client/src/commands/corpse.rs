//! Corpse generation and display.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use shadow_core::{ShadowId, ShadowSelection};

use super::{done, missing};
use crate::app::App;
use crate::render;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ShadowMode {
    /// Every stored shadow
    #[default]
    All,
    /// Active shadows only
    Active,
    /// Shadows named with --shadow
    Selected,
}

#[derive(Subcommand, Debug)]
pub enum CorpseCommand {
    /// Generate a corpse, or rebuild the one with the same name
    Generate {
        /// Corpse name (blank: "Unnamed Corpse")
        #[arg(default_value = "")]
        name: String,

        /// Durability tier; negative values count as 0
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        durability: i64,

        /// Which shadows power the corpse
        #[arg(long, value_enum, default_value_t = ShadowMode::All)]
        shadows: ShadowMode,

        /// Shadow id for `--shadows selected` (repeatable)
        #[arg(long = "shadow")]
        shadow_ids: Vec<String>,
    },

    /// Rebuild a corpse from its stored durability and surviving shadows
    Regenerate { name: String },

    /// Make a corpse the current buff target
    Select { name: String },

    /// Show corpse stat blocks
    Show { name: Option<String> },
}

impl CorpseCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::Generate {
                name,
                durability,
                shadows,
                shadow_ids,
            } => {
                let selection = match shadows {
                    ShadowMode::All => ShadowSelection::All,
                    ShadowMode::Active => ShadowSelection::Active,
                    ShadowMode::Selected => ShadowSelection::Selected(
                        shadow_ids.into_iter().map(ShadowId::from).collect(),
                    ),
                };
                let id = session
                    .apply(|fruit| fruit.generate_corpse(&name, durability, &selection))?;
                tracing::info!("Generated corpse {} with {:?}", id, selection);
                if let Some(corpse) = session.state().corpse(id.as_str()) {
                    render::corpse(corpse, session.state());
                }
            }
            Self::Regenerate { name } => {
                let id = session.try_apply(|fruit| fruit.regenerate_corpse(&name))?;
                if let Some(corpse) = session.state().corpse(id.as_str()) {
                    render::corpse(corpse, session.state());
                }
            }
            Self::Select { name } => {
                let id = session.try_apply(|fruit| fruit.select_corpse_for_buffs(&name))?;
                done(format!("Buffing {} ({})", name.trim(), id));
            }
            Self::Show { name: Some(name) } => {
                let state = session.state();
                let corpse = state
                    .corpse_by_name(name.trim())
                    .ok_or_else(|| missing("Corpse", &name))?;
                render::corpse(corpse, state);
            }
            Self::Show { name: None } => {
                let state = session.state();
                if state.corpses.is_empty() {
                    println!("No corpses generated yet.");
                }
                for corpse in &state.corpses {
                    render::corpse(corpse, state);
                    println!();
                }
            }
        }
        Ok(())
    }
}
