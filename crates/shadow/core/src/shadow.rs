//! Stored shadows and the global power pool.

use crate::buffs::BuffCatalog;
use crate::ids::ShadowId;
use crate::ledger::TargetLedger;
use crate::scoring::{ScoreInput, score};
use crate::tiers::TierTable;

/// Name given to a shadow committed without one.
pub const UNNAMED_SHADOW: &str = "Unnamed Shadow";

/// A captured shadow. Level and power are always derived from the inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Shadow {
    pub id: ShadowId,
    pub name: String,
    pub raw_might: u8,
    pub proficiency_tier: u8,
    pub template_tier: u8,
    pub shadow_level: u8,
    pub power_units: u32,
    #[cfg_attr(feature = "serde", serde(default = "active_by_default"))]
    pub active: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub technique_lines: Vec<String>,
}

#[cfg(feature = "serde")]
fn active_by_default() -> bool {
    true
}

impl Shadow {
    /// Scores `input` and builds an active shadow with no techniques.
    pub fn new(id: ShadowId, name: &str, input: ScoreInput) -> Self {
        let name = name.trim();
        let mut shadow = Self {
            id,
            name: if name.is_empty() {
                UNNAMED_SHADOW.to_string()
            } else {
                name.to_string()
            },
            raw_might: 0,
            proficiency_tier: 0,
            template_tier: 0,
            shadow_level: 1,
            power_units: 1,
            active: true,
            technique_lines: Vec::new(),
        };
        shadow.rescore(input);
        shadow
    }

    pub fn input(&self) -> ScoreInput {
        ScoreInput {
            raw_might: self.raw_might,
            proficiency_tier: self.proficiency_tier,
            template_tier: self.template_tier,
        }
    }

    /// Replaces the raw inputs and recomputes level and power.
    pub fn rescore(&mut self, input: ScoreInput) {
        let input = ScoreInput::clamped(
            input.raw_might as i64,
            input.proficiency_tier as i64,
            input.template_tier as i64,
        );
        let scored = score(input);
        self.raw_might = input.raw_might;
        self.proficiency_tier = input.proficiency_tier;
        self.template_tier = input.template_tier;
        self.shadow_level = scored.shadow_level;
        self.power_units = scored.power_units;
    }

    pub fn set_techniques(&mut self, text: &str) {
        self.technique_lines = technique_lines(text);
    }

    pub fn template_label(&self) -> &'static str {
        TierTable::Template.label_clamped(self.template_tier)
    }

    pub fn proficiency_label(&self) -> &'static str {
        TierTable::Proficiency.label_clamped(self.proficiency_tier)
    }
}

/// Splits free text into technique lines: trimmed, blanks dropped.
pub fn technique_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shadow power available for buffs, shared by every target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPool {
    /// Power of active shadows only.
    pub total: u64,
    /// Spent across all targets.
    pub spent: u64,
    /// `total - spent`, floored at zero for display.
    pub available: u64,
}

impl PowerPool {
    pub fn compute(shadows: &[Shadow], targets: &TargetLedger, catalog: &BuffCatalog) -> Self {
        let total = active_power(shadows);
        let spent = targets.total_spent(catalog);
        Self {
            total,
            spent,
            available: total.saturating_sub(spent),
        }
    }

    /// True when more has been spent than active shadows provide.
    pub fn is_overdrawn(&self) -> bool {
        self.spent > self.total
    }
}

/// Sum of power units over active shadows.
pub fn active_power(shadows: &[Shadow]) -> u64 {
    shadows
        .iter()
        .filter(|s| s.active)
        .map(|s| s.power_units as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TargetId;

    fn shadow(id: &str, raw: i64, prof: i64, templ: i64) -> Shadow {
        Shadow::new(ShadowId::from(id), id, ScoreInput::clamped(raw, prof, templ))
    }

    #[test]
    fn blank_name_and_scoring_on_create() {
        let s = Shadow::new(ShadowId::from("shadow-1"), "   ", ScoreInput::clamped(20, 9, 9));
        assert_eq!(s.name, UNNAMED_SHADOW);
        assert_eq!((s.shadow_level, s.power_units), (10, 1000));
        assert!(s.active);
    }

    #[test]
    fn technique_text_is_trimmed_and_blank_lines_dropped() {
        let mut s = shadow("shadow-1", 10, 5, 5);
        s.set_techniques("  Gum Pistol \n\n\tShadow Lash\n   \n");
        assert_eq!(s.technique_lines, vec!["Gum Pistol", "Shadow Lash"]);
    }

    #[test]
    fn rescore_tracks_inputs() {
        let mut s = shadow("shadow-1", 0, 0, 0);
        assert_eq!(s.power_units, 4);
        s.rescore(ScoreInput::clamped(20, 9, 9));
        assert_eq!(s.power_units, 1000);
        assert_eq!(s.input(), ScoreInput::clamped(20, 9, 9));
    }

    #[test]
    fn deactivating_removes_power_but_keeps_spending() {
        let catalog = BuffCatalog::defaults();
        let mut targets = TargetLedger::new();
        targets.ensure_self("Elren");
        let mut shadows = vec![shadow("a", 20, 9, 9), shadow("b", 0, 0, 0)];
        targets.adjust_stack(TargetId::SELF, "move10", 2, &catalog);

        let before = PowerPool::compute(&shadows, &targets, &catalog);
        assert_eq!(before.total, 1004);
        assert_eq!(before.spent, 25);

        shadows[0].active = false;
        let after = PowerPool::compute(&shadows, &targets, &catalog);
        assert_eq!(after.total, 4);
        assert_eq!(after.spent, 25);
        assert_eq!(after.available, 0);
        assert!(after.is_overdrawn());
    }
}
