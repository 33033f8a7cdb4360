//! Aggregation engine: one target's stacks + the catalog → typed totals.
//!
//! Numeric effects scale with stack count. Advantage is a flag: one stack or
//! five give the same result. Tagged buffs are bucketed by tag so that two
//! distinct "Shadow Step" purchases read as one power; cost is unaffected.

use crate::ability::{Ability, AbilitySet};
use crate::buffs::{BuffCatalog, BuffDefinition, Effect};
use crate::ledger::StackMap;

/// Stacks of every buff sharing one narrative tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagBucket {
    pub tag: String,
    /// Sum of counts over all buffs carrying this tag.
    pub count: u32,
    /// First catalog entry seen with this tag.
    pub representative: BuffDefinition,
}

/// Buff-derived modifiers for one target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuffTotals {
    pub temp_hp: i64,
    pub speed: i64,
    pub armor_class: i64,
    pub armor_class_in_darkness: i64,
    /// Indexed by [`Ability::index`].
    pub save_bonus: [i64; 6],
    pub save_advantage: AbilitySet,
    pub check_advantage: AbilitySet,
    /// In catalog order of each tag's first buff.
    pub tags: Vec<TagBucket>,
}

impl BuffTotals {
    pub fn save_bonus(&self, ability: Ability) -> i64 {
        self.save_bonus[ability.index()]
    }

    /// Abilities with a non-zero save bonus, STR..CHA.
    pub fn save_bonuses(&self) -> impl Iterator<Item = (Ability, i64)> + '_ {
        Ability::ALL
            .into_iter()
            .map(|ability| (ability, self.save_bonus(ability)))
            .filter(|(_, bonus)| *bonus != 0)
    }

    pub fn tag(&self, tag: &str) -> Option<&TagBucket> {
        self.tags.iter().find(|bucket| bucket.tag == tag)
    }

    /// True when no buff contributes anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&mut self, def: &BuffDefinition, count: u32) {
        let n = count as i64;
        match &def.effect {
            Effect::TempHp { amount } => self.temp_hp += *amount as i64 * n,
            Effect::Speed { amount } => self.speed += *amount as i64 * n,
            Effect::ArmorClass { amount } => self.armor_class += *amount as i64 * n,
            Effect::ArmorClassInDarkness { amount } => {
                self.armor_class_in_darkness += *amount as i64 * n
            }
            Effect::SaveBonus {
                ability,
                amount_per_stack,
            } => self.save_bonus[ability.index()] += *amount_per_stack as i64 * n,
            Effect::AdvantageOnSave { ability } => self.save_advantage |= ability.flag(),
            Effect::AdvantageOnCheck { ability } => self.check_advantage |= ability.flag(),
            Effect::Tagged { tag } => match self.tags.iter_mut().find(|b| &b.tag == tag) {
                Some(bucket) => bucket.count += count,
                None => self.tags.push(TagBucket {
                    tag: tag.clone(),
                    count,
                    representative: def.clone(),
                }),
            },
        }
    }
}

/// Folds `stacks` against `catalog`.
///
/// Walks the catalog rather than the map, so stack entries whose buff has
/// left the catalog are skipped.
pub fn aggregate(stacks: &StackMap, catalog: &BuffCatalog) -> BuffTotals {
    let mut totals = BuffTotals::default();
    for def in catalog.iter() {
        let count = stacks.get(def.id.as_str());
        if count > 0 {
            totals.apply(def, count);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::tags;
    use crate::buffs::{BuffCategory, cumulative_cost};
    use crate::ids::BuffId;

    fn stacks(entries: &[(&str, u32)]) -> StackMap {
        let mut map = StackMap::new();
        for (id, count) in entries {
            map.set(BuffId::from(*id), *count);
        }
        map
    }

    #[test]
    fn empty_target_has_zero_totals() {
        let totals = aggregate(&StackMap::new(), &BuffCatalog::defaults());
        assert!(totals.is_empty());
        assert_eq!(totals.temp_hp, 0);
        assert!(totals.save_advantage.is_empty());
        assert!(totals.tags.is_empty());
    }

    #[test]
    fn numeric_effects_scale_with_stacks() {
        let catalog = BuffCatalog::defaults();
        let totals = aggregate(
            &stacks(&[
                ("temp20", 2),
                ("temp50", 1),
                ("move10", 3),
                ("shadowCarapace", 1),
                ("shadowArmorNight", 2),
                ("plus2_dex_save", 2),
            ]),
            &catalog,
        );
        assert_eq!(totals.temp_hp, 90);
        assert_eq!(totals.speed, 30);
        assert_eq!(totals.armor_class, 1);
        assert_eq!(totals.armor_class_in_darkness, 2);
        assert_eq!(totals.save_bonus(Ability::Dex), 4);
        assert_eq!(
            totals.save_bonuses().collect::<Vec<_>>(),
            vec![(Ability::Dex, 4)]
        );
    }

    #[test]
    fn advantage_is_flat_while_cost_grows() {
        let catalog = BuffCatalog::defaults();
        let outcomes: Vec<_> = [1, 2, 5]
            .into_iter()
            .map(|n| aggregate(&stacks(&[("adv_dex_save", n)]), &catalog).save_advantage)
            .collect();
        assert!(outcomes.iter().all(|set| *set == AbilitySet::DEX));

        // 25, then 25 + 38 = 63
        assert_eq!(cumulative_cost(25, 1), 25);
        assert_eq!(cumulative_cost(25, 2), 63);
        assert!(cumulative_cost(25, 5) > cumulative_cost(25, 2));
    }

    #[test]
    fn shared_tags_merge_counts() {
        let mut catalog = BuffCatalog::defaults();
        catalog.insert(BuffDefinition::new(
            "shadowStep30b",
            "Shadow Step (30 ft, bonus)",
            BuffCategory::Mobility,
            20,
            "Second source of the same step.",
            Effect::Tagged {
                tag: tags::SHADOW_STEP_30.to_string(),
            },
        ));
        let totals = aggregate(
            &stacks(&[("shadowStep30", 1), ("shadowStep30b", 2)]),
            &catalog,
        );
        let bucket = totals.tag(tags::SHADOW_STEP_30).unwrap();
        assert_eq!(bucket.count, 3);
        assert_eq!(bucket.representative.id, "shadowStep30");
        assert_eq!(totals.tags.len(), 1);
    }

    #[test]
    fn unknown_buff_ids_are_skipped() {
        let totals = aggregate(
            &stacks(&[("retiredBuff", 4), ("adv_wis_check", 1)]),
            &BuffCatalog::defaults(),
        );
        assert_eq!(totals.check_advantage, AbilitySet::WIS);
        assert_eq!(totals.temp_hp, 0);
    }
}
