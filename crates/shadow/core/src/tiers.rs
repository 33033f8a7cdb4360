//! Proficiency and template power tiers.
//!
//! Both tables are ordered from weakest (index 0) to strongest (index 9); the
//! index is what the scoring formula consumes, the label is display text.

use crate::config::CalculatorConfig;

pub const PROFICIENCY_TIERS: [&str; 10] = [
    "0 – Untrained (civilian, fodder)",
    "1 – Basic training (rookie fighter)",
    "2 – Seasoned fighter",
    "3 – Veteran specialist",
    "4 – Elite commander",
    "5 – Master combatant",
    "6 – Legendary master",
    "7 – Mythic prodigy",
    "8 – World-class monster",
    "9 – Beyond mortal limits",
];

pub const TEMPLATE_TIERS: [&str; 10] = [
    "0 – Ordinary human (no training)",
    "1 – Trained fighter (martial)",
    "2 – Trained fighter (elite)",
    "3 – Advanced fighter with basic Haki",
    "4 – Advanced fighter with strong Haki / unique style",
    "5 – Devil Fruit user (standard)",
    "6 – Advanced fighter + Devil Fruit user",
    "7 – Mythical Devil Fruit user",
    "8 – Big Boss (Emperor-tier threat)",
    "9 – Final world boss / divine monster",
];

/// Which tier table a lookup goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TierTable {
    Proficiency,
    Template,
}

impl TierTable {
    pub const fn labels(self) -> &'static [&'static str; 10] {
        match self {
            Self::Proficiency => &PROFICIENCY_TIERS,
            Self::Template => &TEMPLATE_TIERS,
        }
    }

    /// Label for `tier`, or `None` when the index is past the table.
    pub fn label(self, tier: u8) -> Option<&'static str> {
        self.labels().get(tier as usize).copied()
    }

    /// Label for `tier` after clamping it into the table.
    pub fn label_clamped(self, tier: u8) -> &'static str {
        self.labels()[clamp_tier(tier) as usize]
    }
}

/// Clamps any tier index into `0..=9`.
pub fn clamp_tier(tier: u8) -> u8 {
    tier.min(CalculatorConfig::MAX_TIER)
}
