//! Buff system.
//!
//! ```text
//! [ Catalog ]  static definitions (id, base cost, effect)
//!      ↓
//! [ Cost ]     per-stack pricing, quadratic markup
//!      ↓
//! [ Ledger ]   sparse buffId → count per target      (crate::ledger)
//!      ↓
//! [ Totals ]   typed aggregation per target          (crate::aggregate)
//! ```
//!
//! Tags group narrative powers for display only; they never feed into cost.

pub mod catalog;
pub mod cost;
pub mod tags;

pub use catalog::{
    BuffCatalog, BuffCategory, BuffDefinition, DEFAULT_CUSTOM_DESCRIPTION, Effect,
    SHADOW_ARMOR_OF_NIGHT,
};
pub use cost::{cumulative_cost, incremental_cost, next_cost};
pub use tags::{TagCategory, TagMeta};
