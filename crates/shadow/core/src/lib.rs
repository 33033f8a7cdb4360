//! Deterministic rules for the Shadow Fruit calculator.
//!
//! `shadow-core` defines scoring, buff pricing, per-target aggregation, corpse
//! stat blocks, ability cards, and the summary projection as pure APIs over a
//! single [`SystemState`] document. All state mutation flows through
//! [`engine::ShadowFruit`]; persistence and outbound calls live in the runtime.
pub mod ability;
pub mod aggregate;
pub mod buffs;
pub mod cards;
pub mod config;
pub mod corpse;
pub mod engine;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod scoring;
pub mod shadow;
pub mod state;
pub mod summary;
pub mod tiers;

pub use ability::{Ability, AbilitySet};
pub use aggregate::{BuffTotals, TagBucket, aggregate};
pub use buffs::{
    BuffCatalog, BuffCategory, BuffDefinition, Effect, TagCategory, TagMeta, cumulative_cost,
    incremental_cost, next_cost,
};
pub use cards::{AbilityCard, CardField};
pub use config::CalculatorConfig;
pub use corpse::{Corpse, CorpseStats, ShadowSelection};
pub use engine::{CatalogMerge, ShadowFruit};
pub use error::{ErrorSeverity, LedgerError, ShadowError};
pub use ids::{BuffId, CardId, IdCounters, IdKind, ShadowId, TargetId};
pub use ledger::{BuffTarget, StackMap, TargetKind, TargetLedger};
pub use scoring::{ScoreComponents, ScoreInput, ShadowScore, difficulty_class, score};
pub use shadow::{PowerPool, Shadow};
pub use state::{BuffToolsView, SystemState, UiPrefs};
pub use summary::{AtAGlance, BuffLine, TargetSummary, summarize};
pub use tiers::{PROFICIENCY_TIERS, TEMPLATE_TIERS, TierTable};
