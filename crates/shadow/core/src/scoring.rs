//! Shadow scoring: raw inputs → Shadow Level (SL) and Shadow Power Units (SPU).
//!
//! Formulas:
//! - each axis normalized to [0, 1] and lifted with `f(x) = 0.4 + 0.6x`
//! - `overall = f(raw) × f(prof) × f(template)` ∈ [0.064, 1.0]
//! - `SL = max(1, round(overall × 10))`
//! - `SPU = max(1, round(overall² × 1000))`
//!
//! Because the axes multiply, only a shadow maxed on all three reaches 1000 SPU.

use crate::config::CalculatorConfig;
use crate::tiers::clamp_tier;

const AXIS_FLOOR: f64 = 0.4;
const AXIS_WEIGHT: f64 = 0.6;

/// Raw form input, clamped on the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreInput {
    /// Raw might, 0..=20.
    pub raw_might: u8,
    /// Index into the proficiency tier table, 0..=9.
    pub proficiency_tier: u8,
    /// Index into the template tier table, 0..=9.
    pub template_tier: u8,
}

impl ScoreInput {
    /// Builds an input from untrusted integers; out-of-range values are clamped.
    pub fn clamped(raw_might: i64, proficiency_tier: i64, template_tier: i64) -> Self {
        let clamp_u8 = |v: i64, max: u8| v.clamp(0, max as i64) as u8;
        Self {
            raw_might: clamp_u8(raw_might, CalculatorConfig::MAX_RAW_MIGHT),
            proficiency_tier: clamp_u8(proficiency_tier, CalculatorConfig::MAX_TIER),
            template_tier: clamp_u8(template_tier, CalculatorConfig::MAX_TIER),
        }
    }
}

/// Normalized per-axis contributions behind a score, for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreComponents {
    pub raw: f64,
    pub proficiency: f64,
    pub template: f64,
    pub overall: f64,
}

/// Result of scoring one shadow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowScore {
    pub shadow_level: u8,
    pub power_units: u32,
    pub components: ScoreComponents,
}

fn lift(normalized: f64) -> f64 {
    AXIS_FLOOR + AXIS_WEIGHT * normalized
}

/// Scores a shadow. Never fails; inputs beyond their maxima are clamped.
pub fn score(input: ScoreInput) -> ShadowScore {
    let raw_norm =
        input.raw_might.min(CalculatorConfig::MAX_RAW_MIGHT) as f64 / CalculatorConfig::MAX_RAW_MIGHT as f64;
    let prof_norm = clamp_tier(input.proficiency_tier) as f64 / CalculatorConfig::MAX_TIER as f64;
    let templ_norm = clamp_tier(input.template_tier) as f64 / CalculatorConfig::MAX_TIER as f64;

    let raw = lift(raw_norm);
    let proficiency = lift(prof_norm);
    let template = lift(templ_norm);
    let overall = raw * proficiency * template;

    let shadow_level =
        (overall * CalculatorConfig::MAX_SHADOW_LEVEL as f64).round().max(1.0) as u8;
    let power_units =
        (overall * overall * CalculatorConfig::MAX_POWER_UNITS as f64).round().max(1.0) as u32;

    ShadowScore {
        shadow_level,
        power_units,
        components: ScoreComponents {
            raw,
            proficiency,
            template,
            overall,
        },
    }
}

/// Suggested save DC for shadow techniques.
///
/// Formula: `8 + proficiency_mod + ability_mod + floor(SL / 2)`
pub fn difficulty_class(shadow_level: i32, proficiency_mod: i32, ability_mod: i32) -> i32 {
    8 + proficiency_mod + ability_mod + shadow_level.div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_inputs_maxed_reach_the_ceiling() {
        let s = score(ScoreInput::clamped(20, 9, 9));
        assert_eq!(s.shadow_level, CalculatorConfig::MAX_SHADOW_LEVEL);
        assert_eq!(s.power_units, CalculatorConfig::MAX_POWER_UNITS);
        assert_eq!(s.components.overall, 1.0);
    }

    #[test]
    fn all_inputs_zero_stay_above_the_floor() {
        let s = score(ScoreInput::clamped(0, 0, 0));
        // overall = 0.4³ = 0.064
        assert_eq!(s.shadow_level, 1);
        assert_eq!(s.power_units, 4);
    }

    #[test]
    fn single_maxed_axis_does_not_dominate() {
        let s = score(ScoreInput::clamped(20, 0, 0));
        // overall = 1.0 × 0.4 × 0.4 = 0.16
        assert_eq!(s.shadow_level, 2);
        assert_eq!(s.power_units, 26);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(
            ScoreInput::clamped(99, -3, 12),
            ScoreInput {
                raw_might: 20,
                proficiency_tier: 0,
                template_tier: 9
            }
        );
    }

    #[test]
    fn every_valid_input_is_within_bounds() {
        for raw in 0..=20 {
            for prof in 0..=9 {
                for templ in 0..=9 {
                    let s = score(ScoreInput::clamped(raw, prof, templ));
                    assert!((1..=10).contains(&s.shadow_level));
                    assert!((1..=1000).contains(&s.power_units));
                    let maxed = raw == 20 && prof == 9 && templ == 9;
                    assert_eq!(s.power_units == 1000, maxed, "{raw}/{prof}/{templ}");
                }
            }
        }
    }

    #[test]
    fn dc_helper_floors_half_level() {
        assert_eq!(difficulty_class(7, 3, 4), 8 + 3 + 4 + 3);
        assert_eq!(difficulty_class(0, 0, 0), 8);
    }
}
