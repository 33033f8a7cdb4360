//! Corpse stat builder.
//!
//! A reanimated corpse is a durability tier plus the shadows powering it. Its
//! stat block is a pure function of those two inputs and is rebuilt from
//! scratch on every (re)generation.
//!
//! ```text
//! AC    = 10 + ⌊dt/2⌋ + ⌊slSum/3⌋
//! HP    = dt×10 + round(spuSum/8)
//! Speed = 30 + ⌊slSum/2⌋
//! STR   = 10 + dt + ⌊slSum/4⌋     DEX = 8 + ⌊slSum/3⌋
//! CON   = 10 + dt + ⌊slSum/5⌋     INT = 6 + ⌊slSum/5⌋
//! WIS   = 8 + ⌊slSum/5⌋           CHA = 6 + ⌊slSum/6⌋
//! ```

use crate::ability::Ability;
use crate::ids::{ShadowId, TargetId};
use crate::shadow::Shadow;

/// Name given to a corpse generated without one.
pub const UNNAMED_CORPSE: &str = "Unnamed Corpse";

/// Derived stat block of a corpse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CorpseStats {
    pub durability_tier: u32,
    pub sl_sum: u64,
    pub spu_sum: u64,
    pub armor_class: u64,
    pub hit_points: u64,
    pub speed: u64,
    /// Indexed by [`Ability::index`].
    pub abilities: [u64; 6],
    pub melee_attack_bonus: i64,
    pub shadow_lash_attack_bonus: u64,
    pub shadow_lash_save_dc: i32,
}

impl CorpseStats {
    /// Builds the stat block. `lash_dc` is the last DC the helper produced,
    /// or the configured fallback.
    pub fn build(durability_tier: u32, shadows: &[&Shadow], lash_dc: i32) -> Self {
        let dt = durability_tier as u64;
        let sl_sum: u64 = shadows.iter().map(|s| s.shadow_level as u64).sum();
        let spu_sum: u64 = shadows.iter().map(|s| s.power_units as u64).sum();

        let strength = 10 + dt + sl_sum / 4;
        let abilities = [
            strength,
            8 + sl_sum / 3,
            10 + dt + sl_sum / 5,
            6 + sl_sum / 5,
            8 + sl_sum / 5,
            6 + sl_sum / 6,
        ];

        Self {
            durability_tier,
            sl_sum,
            spu_sum,
            armor_class: 10 + dt / 2 + sl_sum / 3,
            // round(spu/8), half up
            hit_points: dt * 10 + (spu_sum + 4) / 8,
            speed: 30 + sl_sum / 2,
            abilities,
            melee_attack_bonus: ability_modifier(strength) + 5,
            shadow_lash_attack_bonus: 5 + sl_sum / 4,
            shadow_lash_save_dc: lash_dc,
        }
    }

    pub fn ability(&self, ability: Ability) -> u64 {
        self.abilities[ability.index()]
    }
}

/// `⌊(score − 10) / 2⌋`
pub fn ability_modifier(score: u64) -> i64 {
    (score as i64 - 10).div_euclid(2)
}

/// Union of the powering shadows' technique lines, first appearance wins.
pub fn inherited_techniques(shadows: &[&Shadow]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in shadows.iter().flat_map(|s| s.technique_lines.iter()) {
        let line = line.trim();
        if !line.is_empty() && !lines.iter().any(|seen| seen == line) {
            lines.push(line.to_string());
        }
    }
    lines
}

/// Which shadows power a corpse being generated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ShadowSelection {
    #[default]
    All,
    Active,
    /// Listed ids; unknown ids are skipped.
    Selected(Vec<ShadowId>),
}

impl ShadowSelection {
    /// Resolves the selection against the roster, in roster order.
    pub fn resolve<'a>(&self, shadows: &'a [Shadow]) -> Vec<&'a Shadow> {
        shadows
            .iter()
            .filter(|s| match self {
                Self::All => true,
                Self::Active => s.active,
                Self::Selected(ids) => ids.contains(&s.id),
            })
            .collect()
    }
}

/// A generated corpse. Shares its id with its buff target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Corpse {
    pub id: TargetId,
    pub name: String,
    pub durability_tier: u32,
    pub shadow_ids: Vec<ShadowId>,
    pub stats: CorpseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inherited_techniques: Vec<String>,
}

impl Corpse {
    /// Overwrites durability, powering shadows, stats, and techniques.
    pub fn regenerate(&mut self, durability_tier: u32, shadows: &[&Shadow], lash_dc: i32) {
        self.durability_tier = durability_tier;
        self.shadow_ids = shadows.iter().map(|s| s.id.clone()).collect();
        self.stats = CorpseStats::build(durability_tier, shadows, lash_dc);
        self.inherited_techniques = inherited_techniques(shadows);
    }

    /// Powering shadows that still exist, in roster order.
    pub fn powering<'a>(&self, roster: &'a [Shadow]) -> Vec<&'a Shadow> {
        ShadowSelection::Selected(self.shadow_ids.clone()).resolve(roster)
    }

    /// Fixed trait lines of the corpse card.
    pub fn traits(&self, powering_count: usize) -> Vec<String> {
        let s = &self.stats;
        vec![
            format!(
                "Corpse Durability: Tier {} body; very hard to destroy for its size.",
                s.durability_tier
            ),
            format!(
                "Infused Shadows: Powered by {powering_count} shadow(s); total SL {}, total {} SPU. Personality and aggression are shaped by those shadows.",
                s.sl_sum, s.spu_sum
            ),
            "Shadow Instincts: Gains advantage on one type of save (STR, DEX, or CON) chosen when created.".to_string(),
            "Shadow Resilience (DM option): Once per long rest, when reduced to 0 HP, it instead drops to 1 HP.".to_string(),
            "Damage Resistances (DM option): Necrotic; bludgeoning, piercing, and slashing from non-magical attacks.".to_string(),
            "Condition Immunities (DM option): Charmed, frightened, poisoned.".to_string(),
            "Senses: Darkvision 60 ft., passive Perception ??. Languages: understands any languages it knew in life (if any).".to_string(),
            "Loyalty: Obeys the shadow fruit user's commands to the best of its ability.".to_string(),
        ]
    }

    /// Action lines of the corpse card.
    pub fn actions(&self) -> Vec<String> {
        let s = &self.stats;
        vec![
            "Multiattack: The reanimated corpse makes two attacks: one Slam and one Shadow Lash (or two Slams, DM's choice).".to_string(),
            format!(
                "Slam: Melee Weapon Attack: {:+} to hit, reach 5 ft., one target. Hit: 1d10 + {} bludgeoning damage.",
                s.melee_attack_bonus, s.melee_attack_bonus
            ),
            format!(
                "Shadow Lash: Melee spell-like attack: +{} to hit, reach 10 ft., one target. Hit: 2d8 necrotic damage, and the target must succeed on a STR or DEX save (DC {}) or be grappled and restrained by writhing shadow chains.",
                s.shadow_lash_attack_bonus, s.shadow_lash_save_dc
            ),
        ]
    }
}
