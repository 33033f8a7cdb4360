//! Summary projector.
//!
//! Pure composition over the document: for each target, base stats (corpse
//! stat block, or the character sheet for self and allies) plus aggregated
//! buff deltas, grouped the way a player reads them at the table. Nothing here
//! is stored; every call recomputes from scratch.

use crate::ability::AbilitySet;
use crate::aggregate::{BuffTotals, aggregate};
use crate::buffs::tags::{self, TagCategory};
use crate::buffs::{BuffCatalog, SHADOW_ARMOR_OF_NIGHT, cumulative_cost, next_cost};
use crate::cards::AbilityCard;
use crate::ids::BuffId;
use crate::ledger::{BuffTarget, StackMap};
use crate::shadow::PowerPool;
use crate::state::SystemState;

pub const NO_BUFFS_YET: &str = "No buffs yet.";
pub const NO_SPECIAL_POWERS: &str = "No special powers from buffs beyond numeric bonuses.";
pub const NO_ABILITY_CARDS: &str = "No AI or custom ability cards assigned yet.";
pub const NO_INHERITED_TECHNIQUES: &str = "None recorded.";
pub const NOTES_HINT: &str = "Use this for quick rulings, edge cases, or reminders (editable).";

const ARMOR_OF_NIGHT_POWER: &str = "Shadow Armor of Night: While in dim light or darkness, your AC increases by the amount shown above.";

/// One held buff with its spend and next price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuffLine {
    pub buff_id: BuffId,
    pub name: String,
    pub count: u32,
    /// SPU spent on these copies.
    pub spent: u64,
    /// Price of one more copy.
    pub next_cost: u64,
    pub effect: Option<String>,
}

impl std::fmt::Display for BuffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ×{} — SPU spent: {}.",
            self.name, self.count, self.spent
        )?;
        if let Some(effect) = &self.effect {
            write!(f, " {effect}")?;
        }
        Ok(())
    }
}

/// Held buffs in catalog order; ids missing from the catalog are skipped.
pub fn buff_lines(stacks: &StackMap, catalog: &BuffCatalog) -> Vec<BuffLine> {
    catalog
        .iter()
        .filter_map(|def| {
            let count = stacks.get(def.id.as_str());
            (count > 0).then(|| BuffLine {
                buff_id: def.id.clone(),
                name: def.name.clone(),
                count,
                spent: cumulative_cost(def.base_cost, count),
                next_cost: next_cost(def.base_cost, count),
                effect: def.effect.total_line(count),
            })
        })
        .collect()
}

/// At-a-glance groups. Empty groups are not rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AtAGlance {
    pub defenses: Vec<String>,
    pub mobility: Vec<String>,
    pub saves_and_checks: Vec<String>,
    pub other: Vec<String>,
}

impl AtAGlance {
    pub fn is_empty(&self) -> bool {
        self.defenses.is_empty()
            && self.mobility.is_empty()
            && self.saves_and_checks.is_empty()
            && self.other.is_empty()
    }

    /// `(label, pieces)` for each non-empty group, in display order.
    pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("Defenses", self.defenses.as_slice()),
            ("Mobility", self.mobility.as_slice()),
            ("Saves & Checks", self.saves_and_checks.as_slice()),
            ("Other", self.other.as_slice()),
        ]
        .into_iter()
        .filter(|(_, pieces)| !pieces.is_empty())
    }

    fn build(totals: &BuffTotals, has_armor_of_night: bool) -> Self {
        let mut glance = Self::default();

        if totals.temp_hp != 0 {
            glance.defenses.push(format!("+{} temp HP", totals.temp_hp));
        }
        if totals.armor_class != 0 {
            glance.defenses.push(format!("+{} AC", totals.armor_class));
        }
        if totals.armor_class_in_darkness != 0 {
            glance.defenses.push(format!(
                "+{} AC in dim light/darkness",
                totals.armor_class_in_darkness
            ));
        }
        if totals.speed != 0 {
            glance.mobility.push(format!("+{} ft speed", totals.speed));
        }
        for (ability, bonus) in totals.save_bonuses() {
            glance
                .saves_and_checks
                .push(format!("+{bonus} {ability} saves"));
        }

        for bucket in &totals.tags {
            let Some(meta) = tags::lookup(&bucket.tag) else {
                continue;
            };
            let group = match meta.category {
                TagCategory::Mobility => &mut glance.mobility,
                TagCategory::Defense => &mut glance.defenses,
                TagCategory::Other => &mut glance.other,
            };
            group.push(meta.short.to_string());
        }

        if has_armor_of_night {
            glance.other.push("Shadow Armor of Night".to_string());
        }
        if let Some(list) = ability_list(totals.save_advantage) {
            glance
                .saves_and_checks
                .push(format!("Advantage on {list} saves"));
        }
        if let Some(list) = ability_list(totals.check_advantage) {
            glance
                .saves_and_checks
                .push(format!("Advantage on {list} checks"));
        }
        glance
    }
}

fn ability_list(set: AbilitySet) -> Option<String> {
    let names: Vec<String> = set.abilities().map(|a| a.to_string()).collect();
    (!names.is_empty()).then(|| names.join(", "))
}

/// Display model for one buff target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSummary {
    pub name: String,
    /// PRIMARY USER, ALLY, or CORPSE.
    pub label: &'static str,
    pub armor_class: String,
    pub hit_points: String,
    pub speed: String,
    pub shadow_power: String,
    pub shadow_dc: String,
    pub glance: AtAGlance,
    pub powers: Vec<String>,
    pub abilities: Vec<String>,
    /// `Some` only for corpses.
    pub inherited_techniques: Option<Vec<String>>,
    pub breakdown: Vec<BuffLine>,
    /// Stored notes, or [`NOTES_HINT`] when none.
    pub notes: String,
}

impl TargetSummary {
    /// Projects one target against the whole document.
    pub fn project(state: &SystemState, target: &BuffTarget) -> Self {
        let pool = PowerPool::compute(&state.shadows, &state.targets, &state.catalog);
        Self::project_with_pool(state, target, &pool)
    }

    fn project_with_pool(state: &SystemState, target: &BuffTarget, pool: &PowerPool) -> Self {
        let totals = aggregate(&target.stacks, &state.catalog);
        let corpse = state.corpse(target.id.as_str()).map(|c| &c.stats);
        let ac_bonus = totals.armor_class + totals.armor_class_in_darkness;

        let armor_class = match corpse {
            Some(stats) if ac_bonus != 0 => format!(
                "AC {} (base {} +{} from buffs)",
                stats.armor_class as i64 + ac_bonus,
                stats.armor_class,
                ac_bonus
            ),
            Some(stats) => format!("AC {}", stats.armor_class),
            None if ac_bonus != 0 => format!("Your AC +{ac_bonus} from buffs"),
            None => "AC: use character sheet".to_string(),
        };
        let hit_points = match corpse {
            Some(stats) if totals.temp_hp != 0 => {
                format!("HP ~{} +{} temp HP", stats.hit_points, totals.temp_hp)
            }
            Some(stats) => format!("HP ~{}", stats.hit_points),
            None if totals.temp_hp != 0 => format!("Your HP +{} temp HP", totals.temp_hp),
            None => "HP: use character sheet".to_string(),
        };
        let speed = match corpse {
            Some(stats) if totals.speed != 0 => format!(
                "Speed {} ft (base {} +{})",
                stats.speed as i64 + totals.speed,
                stats.speed,
                totals.speed
            ),
            Some(stats) => format!("Speed {} ft", stats.speed),
            None if totals.speed != 0 => format!("Your speed +{} ft", totals.speed),
            None => "Speed: use character sheet".to_string(),
        };
        let shadow_power = format!(
            "Shadow Power: {} SPU",
            corpse.map_or(pool.total, |stats| stats.spu_sum)
        );
        let shadow_dc = match state.ui.shadow_dc() {
            Some(dc) => format!("Shadow DC: {dc}"),
            None => "Shadow DC: use spell save DC or DC helper".to_string(),
        };

        let has_armor_of_night =
            target.stacks.get(SHADOW_ARMOR_OF_NIGHT) > 0 && totals.armor_class_in_darkness != 0;
        let mut powers: Vec<String> = totals
            .tags
            .iter()
            .filter_map(|bucket| tags::lookup(&bucket.tag))
            .map(|meta| meta.power.to_string())
            .collect();
        if has_armor_of_night {
            powers.push(ARMOR_OF_NIGHT_POWER.to_string());
        }

        Self {
            name: target.name.clone(),
            label: target.kind.label(),
            armor_class,
            hit_points,
            speed,
            shadow_power,
            shadow_dc,
            glance: AtAGlance::build(&totals, has_armor_of_night),
            powers,
            abilities: state
                .cards_for(target.id.as_str())
                .map(ability_line)
                .collect(),
            inherited_techniques: state
                .corpse(target.id.as_str())
                .map(|c| c.inherited_techniques.clone()),
            breakdown: buff_lines(&target.stacks, &state.catalog),
            notes: if target.notes.is_empty() {
                NOTES_HINT.to_string()
            } else {
                target.notes.clone()
            },
        }
    }
}

/// Summaries for every target, in ledger order.
pub fn summarize(state: &SystemState) -> Vec<TargetSummary> {
    let pool = PowerPool::compute(&state.shadows, &state.targets, &state.catalog);
    state
        .targets
        .iter()
        .map(|target| TargetSummary::project_with_pool(state, target, &pool))
        .collect()
}

/// One-line digest of a card for the summary.
pub fn ability_line(card: &AbilityCard) -> String {
    let or_dash = |s: &str| if s.is_empty() { "—".to_string() } else { s.to_string() };
    let dc = if card.dc.is_empty() {
        String::new()
    } else {
        format!(" (DC {})", card.dc)
    };
    format!(
        "{} — {}; Range {}; Target {}; Save {}{}; Damage {}.",
        card.name,
        if card.action.is_empty() {
            "Action"
        } else {
            card.action.as_str()
        },
        or_dash(&card.range),
        or_dash(&card.target),
        or_dash(&card.save),
        dc,
        or_dash(&card.damage)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorConfig;
    use crate::corpse::{Corpse, CorpseStats};
    use crate::ids::{CardId, ShadowId, TargetId};
    use crate::ledger::TargetKind;
    use crate::scoring::ScoreInput;
    use crate::shadow::Shadow;

    fn state() -> SystemState {
        SystemState::new(&CalculatorConfig::default())
    }

    fn add(state: &mut SystemState, target: &str, buff: &str, n: i64) {
        let catalog = state.catalog.clone();
        state.targets.adjust_stack(target, buff, n, &catalog);
    }

    #[test]
    fn bare_self_defers_to_character_sheet() {
        let state = state();
        let summary = &summarize(&state)[0];
        assert_eq!(summary.label, "PRIMARY USER");
        assert_eq!(summary.armor_class, "AC: use character sheet");
        assert_eq!(summary.hit_points, "HP: use character sheet");
        assert_eq!(summary.speed, "Speed: use character sheet");
        assert_eq!(summary.shadow_dc, "Shadow DC: use spell save DC or DC helper");
        assert!(summary.glance.is_empty());
        assert!(summary.powers.is_empty());
        assert_eq!(summary.notes, NOTES_HINT);
        assert_eq!(summary.inherited_techniques, None);
    }

    #[test]
    fn self_shows_deltas_and_pool_total() {
        let mut state = state();
        state.shadows.push(Shadow::new(
            ShadowId::from("shadow-1"),
            "Absalom",
            ScoreInput::clamped(20, 9, 9),
        ));
        add(&mut state, "self", "temp20", 2);
        add(&mut state, "self", "shadowArmorNight", 1);
        add(&mut state, "self", "shadowDash", 1);
        add(&mut state, "self", "adv_dex_save", 1);
        add(&mut state, "self", "adv_str_save", 3);
        state.ui.last_dc = Some(16);

        let summary = TargetSummary::project(&state, state.targets.get("self").unwrap());
        assert_eq!(summary.armor_class, "Your AC +1 from buffs");
        assert_eq!(summary.hit_points, "Your HP +40 temp HP");
        assert_eq!(summary.shadow_power, "Shadow Power: 1000 SPU");
        assert_eq!(summary.shadow_dc, "Shadow DC: 16");
        assert_eq!(
            summary.glance.defenses,
            vec!["+40 temp HP", "+1 AC in dim light/darkness"]
        );
        assert_eq!(summary.glance.mobility, vec!["Shadow Dash"]);
        assert_eq!(summary.glance.other, vec!["Shadow Armor of Night"]);
        assert_eq!(
            summary.glance.saves_and_checks,
            vec!["Advantage on STR, DEX saves"]
        );
        assert_eq!(summary.powers.len(), 2);
        assert!(summary.powers[1].starts_with("Shadow Armor of Night:"));
        assert_eq!(
            summary.breakdown[0].to_string(),
            "+20 Temp HP ×2 — SPU spent: 20. Total +40 temp HP."
        );
    }

    #[test]
    fn corpse_adds_buffs_to_base_stats() {
        let mut state = state();
        let shadow = Shadow::new(ShadowId::from("shadow-1"), "A", ScoreInput::default());
        let mut corpse = Corpse {
            id: TargetId::from("corpse-1"),
            name: "Oars".to_string(),
            durability_tier: 0,
            shadow_ids: Vec::new(),
            stats: CorpseStats::default(),
            inherited_techniques: Vec::new(),
        };
        let mut strong = shadow.clone();
        strong.shadow_level = 6;
        strong.power_units = 300;
        corpse.regenerate(3, &[&strong], 15);
        state.corpses.push(corpse);
        state
            .targets
            .create(TargetId::from("corpse-1"), TargetKind::Corpse, "Oars");
        add(&mut state, "corpse-1", "shadowCarapace", 2);
        add(&mut state, "corpse-1", "move10", 1);

        let summary = TargetSummary::project(&state, state.targets.get("corpse-1").unwrap());
        assert_eq!(summary.label, "CORPSE");
        assert_eq!(summary.armor_class, "AC 15 (base 13 +2 from buffs)");
        assert_eq!(summary.hit_points, "HP ~68");
        assert_eq!(summary.speed, "Speed 43 ft (base 33 +10)");
        assert_eq!(summary.shadow_power, "Shadow Power: 300 SPU");
        assert_eq!(summary.inherited_techniques, Some(Vec::new()));
    }

    #[test]
    fn ability_line_fills_blanks() {
        let mut card = AbilityCard::empty(CardId::from("ability-1"), TargetId::self_target());
        card.name = "Night Fang".to_string();
        assert_eq!(
            ability_line(&card),
            "Night Fang — Action; Range —; Target —; Save —; Damage —."
        );
        card.save = "DEX save".to_string();
        card.dc = "15".to_string();
        card.damage = "3d6".to_string();
        assert_eq!(
            ability_line(&card),
            "Night Fang — Action; Range —; Target —; Save DEX save (DC 15); Damage 3d6."
        );
    }
}
