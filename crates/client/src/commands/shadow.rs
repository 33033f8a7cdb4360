//! Shadow scoring and roster commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use shadow_core::{ScoreInput, Shadow, ShadowFruit};

use super::{done, missing};
use crate::app::App;
use crate::render;

/// Raw form inputs; out-of-range values are clamped.
#[derive(Args, Debug, Clone, Copy)]
pub struct ScoreArgs {
    /// Raw might, 0-20
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub raw: i64,

    /// Proficiency tier, 0-9
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub prof: i64,

    /// Template tier, 0-9
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub template: i64,
}

impl ScoreArgs {
    fn input(self) -> ScoreInput {
        ScoreInput::clamped(self.raw, self.prof, self.template)
    }
}

/// Preview a shadow's level and power without storing it
#[derive(Args, Debug)]
pub struct Score {
    #[command(flatten)]
    pub inputs: ScoreArgs,
}

impl Score {
    pub fn execute(self) -> Result<()> {
        let input = self.inputs.input();
        render::score_preview(input, &ShadowFruit::preview_score(input));
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum ShadowCommand {
    /// Store a new shadow
    Add {
        /// Display name (blank: "Unnamed Shadow")
        #[arg(default_value = "")]
        name: String,
        #[command(flatten)]
        inputs: ScoreArgs,
    },

    /// List stored shadows
    List,

    /// Activate or deactivate a shadow (flips when no state is given)
    Toggle {
        id: String,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Replace a shadow's technique list, one technique per argument
    Techniques { id: String, lines: Vec<String> },

    /// Re-enter a shadow's inputs and recompute its level and power
    Update {
        id: String,
        #[command(flatten)]
        inputs: ScoreArgs,
    },

    /// Remove a shadow; corpses it powered keep their stats until regenerated
    Remove { id: String },
}

fn stored_message(shadow: &Shadow) -> String {
    format!(
        "Stored {} ({}): SL {}, {} SPU",
        shadow.name, shadow.id, shadow.shadow_level, shadow.power_units
    )
}

impl ShadowCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::Add { name, inputs } => {
                let id = session.apply(|fruit| fruit.commit_shadow(&name, inputs.input()))?;
                if let Some(shadow) = session.state().shadow(id.as_str()) {
                    done(stored_message(shadow));
                }
                render::pool(&session.view(|fruit| fruit.power_pool()));
            }
            Self::List => {
                render::shadows(session.state());
                render::pool(&session.view(|fruit| fruit.power_pool()));
            }
            Self::Toggle { id, active } => {
                let Some(shadow) = session.state().shadow(&id) else {
                    return Err(missing("Shadow", &id));
                };
                let active = active.unwrap_or(!shadow.active);
                session.apply(|fruit| fruit.set_shadow_active(&id, active))?;
                done(format!(
                    "{} is now {}",
                    id,
                    if active { "active" } else { "inactive" }
                ));
                render::pool(&session.view(|fruit| fruit.power_pool()));
            }
            Self::Techniques { id, lines } => {
                let text = lines.join("\n");
                if !session.apply(|fruit| fruit.set_shadow_techniques(&id, &text))? {
                    return Err(missing("Shadow", &id));
                }
                let count = session
                    .state()
                    .shadow(&id)
                    .map_or(0, |s| s.technique_lines.len());
                done(format!("{} technique(s) recorded for {}", count, id));
            }
            Self::Update { id, inputs } => {
                if !session.apply(|fruit| fruit.update_shadow_inputs(&id, inputs.input()))? {
                    return Err(missing("Shadow", &id));
                }
                render::shadows(session.state());
            }
            Self::Remove { id } => {
                if session.state().shadow(&id).is_none() {
                    return Err(missing("Shadow", &id));
                }
                session.apply(|fruit| fruit.remove_shadow(&id))?;
                done(format!("Removed {}", id));
                tracing::info!("Removed shadow {}", id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_core::ShadowId;

    #[test]
    fn stored_message_uses_plain_punctuation() {
        let shadow = Shadow::new(
            ShadowId::from("shadow-1"),
            "Oars",
            ScoreInput::clamped(20, 9, 9),
        );
        assert_eq!(stored_message(&shadow), "Stored Oars (shadow-1): SL 10, 1000 SPU");
    }
}
