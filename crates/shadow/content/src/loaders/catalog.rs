//! Buff catalog extension loader.
//!
//! Effects are written as plain RON enum variants (`TempHp(20)`,
//! `SaveBonus(DEX, 2)`, `Tagged("shadow_dash")`) and converted into
//! [`Effect`] on load.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shadow_core::{Ability, BuffCategory, BuffDefinition, Effect};

use crate::loaders::{LoadResult, read_file};

/// File-side spelling of an [`Effect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSpec {
    TempHp(i32),
    Speed(i32),
    ArmorClass(i32),
    ArmorClassInDarkness(i32),
    SaveBonus(Ability, i32),
    AdvantageOnSave(Ability),
    AdvantageOnCheck(Ability),
    Tagged(String),
}

impl From<EffectSpec> for Effect {
    fn from(spec: EffectSpec) -> Self {
        match spec {
            EffectSpec::TempHp(amount) => Effect::TempHp { amount },
            EffectSpec::Speed(amount) => Effect::Speed { amount },
            EffectSpec::ArmorClass(amount) => Effect::ArmorClass { amount },
            EffectSpec::ArmorClassInDarkness(amount) => Effect::ArmorClassInDarkness { amount },
            EffectSpec::SaveBonus(ability, amount_per_stack) => Effect::SaveBonus {
                ability,
                amount_per_stack,
            },
            EffectSpec::AdvantageOnSave(ability) => Effect::AdvantageOnSave { ability },
            EffectSpec::AdvantageOnCheck(ability) => Effect::AdvantageOnCheck { ability },
            EffectSpec::Tagged(tag) => Effect::Tagged { tag },
        }
    }
}

/// One buff entry in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub id: String,
    pub name: String,
    pub category: BuffCategory,
    pub base_cost: u32,
    #[serde(default)]
    pub description: String,
    pub effect: EffectSpec,
}

/// Catalog extension structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub buffs: Vec<BuffSpec>,
}

/// Loader for buff catalog extensions from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load buff definitions from a RON file.
    ///
    /// Entries with a zero base cost or a blank id are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<BuffDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<BuffDefinition>> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse buff catalog RON: {}", e))?;

        file.buffs
            .into_iter()
            .map(|spec| {
                if spec.id.trim().is_empty() {
                    anyhow::bail!("Buff '{}' has a blank id", spec.name);
                }
                if spec.base_cost == 0 {
                    anyhow::bail!("Buff '{}' must have a positive base cost", spec.id);
                }
                Ok(BuffDefinition::new(
                    spec.id,
                    spec.name,
                    spec.category,
                    spec.base_cost,
                    spec.description,
                    spec.effect.into(),
                ))
            })
            .collect()
    }
}
