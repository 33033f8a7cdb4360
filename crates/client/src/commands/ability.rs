//! Ability card commands.

use anyhow::Result;
use clap::Subcommand;
use shadow_core::CardField;

use super::{done, missing};
use crate::app::App;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum AbilityCommand {
    /// List ability cards
    List,

    /// Add an empty card bound to the current target
    Add,

    /// Replace all cards with the three starter cards
    Stub {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Set one field of a card
    Edit {
        id: String,
        /// name, role, description, action, range, target, save, dc, damage, mechanical, combo
        #[arg(value_parser = parse_field)]
        field: CardField,
        #[arg(default_value = "")]
        value: String,
    },

    /// Bind a card to another buff target
    Retarget { id: String, target: String },

    /// Delete a card
    Delete { id: String },

    /// Print a card as plain text
    Copy { id: String },

    /// Give a card without a description a fresh one
    Reroll { id: String },
}

fn parse_field(value: &str) -> Result<CardField, String> {
    value
        .parse()
        .map_err(|_| format!("unknown card field '{}'", value))
}

impl AbilityCommand {
    pub fn execute(self, app: &mut App) -> Result<()> {
        let session = &mut app.session;
        match self {
            Self::List => {
                session.apply(|fruit| fruit.rebind_orphan_cards())?;
                let state = session.state();
                if state.abilities.is_empty() {
                    println!("No ability cards yet.");
                }
                for card in &state.abilities {
                    render::card(card, state);
                }
            }
            Self::Add => {
                let id = session.apply(|fruit| fruit.add_empty_card())?;
                done(format!("Added {}", id));
            }
            Self::Stub { yes } => {
                if !session.state().abilities.is_empty()
                    && !yes
                    && !super::confirm("Replace all existing ability cards?")?
                {
                    println!("Cancelled");
                    return Ok(());
                }
                let ids = session.apply(|fruit| fruit.stub_generate())?;
                let state = session.state();
                for id in &ids {
                    if let Some(card) = state.card(id.as_str()) {
                        render::card(card, state);
                    }
                }
            }
            Self::Edit { id, field, value } => {
                if !session.apply(|fruit| fruit.update_card(&id, field, &value))? {
                    return Err(missing("Ability card", &id));
                }
                done(format!("{} {} updated", id, field));
            }
            Self::Retarget { id, target } => {
                if session.state().card(&id).is_none() {
                    return Err(missing("Ability card", &id));
                }
                if !session.apply(|fruit| fruit.retarget_card(&id, &target))? {
                    return Err(missing("Target", &target));
                }
                done(format!("{} now belongs to {}", id, target));
            }
            Self::Delete { id } => {
                if !session.apply(|fruit| fruit.delete_card(&id))? {
                    return Err(missing("Ability card", &id));
                }
                done(format!("Deleted {}", id));
            }
            Self::Copy { id } => {
                let text = session
                    .view(|fruit| fruit.copy_card_text(&id))
                    .ok_or_else(|| missing("Ability card", &id))?;
                println!("{}", text);
            }
            Self::Reroll { id } => {
                if !session.apply(|fruit| fruit.reroll_card(&id))? {
                    return Err(missing("Ability card", &id));
                }
                if let Some(card) = session.state().card(&id) {
                    render::card(card, session.state());
                }
            }
        }
        Ok(())
    }
}
