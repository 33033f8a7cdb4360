//! Narrative power tags.
//!
//! Several distinct buffs can share a tag ("Shadow Step" variants, custom
//! buffs). The summary groups by tag; cost never does.

/// Display grouping for a tag in the at-a-glance view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Mobility,
    Defense,
    Other,
}

/// Static description of one tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagMeta {
    pub id: &'static str,
    pub category: TagCategory,
    pub short: &'static str,
    pub power: &'static str,
}

pub const SHADOW_STEP_30: &str = "shadow_step_30";
pub const SHADOW_STEP_60: &str = "shadow_step_60";
pub const SHADOW_DASH: &str = "shadow_dash";
pub const SHADOW_WEAPON: &str = "shadow_weapon";
pub const SHADOW_REDIRECT: &str = "shadow_redirect";
pub const SHADOW_SHACKLES: &str = "shadow_shackles";
pub const RESISTANCE_MUNDANE: &str = "resistance_mundane";
pub const CUSTOM: &str = "custom";

pub const TAG_TABLE: [TagMeta; 8] = [
    TagMeta {
        id: SHADOW_STEP_30,
        category: TagCategory::Mobility,
        short: "Shadow Step 30 ft",
        power: "Shadow Step 30 ft: As a bonus action, teleport up to 30 ft between areas of dim light or darkness (uses/round determined by DM).",
    },
    TagMeta {
        id: SHADOW_STEP_60,
        category: TagCategory::Mobility,
        short: "Shadow Step 60 ft",
        power: "Shadow Step 60 ft: As a bonus action, teleport up to 60 ft between shadows (uses/round determined by DM).",
    },
    TagMeta {
        id: SHADOW_DASH,
        category: TagCategory::Mobility,
        short: "Shadow Dash",
        power: "Shadow Dash: Once per turn, move extra distance without provoking opportunity attacks (exact distance/uses by DM).",
    },
    TagMeta {
        id: SHADOW_WEAPON,
        category: TagCategory::Other,
        short: "Shadow Weapon",
        power: "Shadow Weapon: Conjured shadow-forged weapon counts as magical for overcoming resistance and can take any form you choose.",
    },
    TagMeta {
        id: SHADOW_REDIRECT,
        category: TagCategory::Other,
        short: "Shadow Redirect",
        power: "Shadow Redirect: Use a reaction to reduce damage you or a nearby creature takes and redirect some of it to another target (DM adjudicates exact values).",
    },
    TagMeta {
        id: SHADOW_SHACKLES,
        category: TagCategory::Other,
        short: "Shadow Shackles",
        power: "Shadow Shackles: You can restrain foes with shadow chains that use your Shadow DC to escape or avoid.",
    },
    TagMeta {
        id: RESISTANCE_MUNDANE,
        category: TagCategory::Defense,
        short: "Resist non-magical weapons",
        power: "Resistance to Non-magical Weapons: You resist bludgeoning, piercing, and slashing damage from non-magical weapon attacks.",
    },
    TagMeta {
        id: CUSTOM,
        category: TagCategory::Other,
        short: "Custom shadow effect",
        power: "Custom shadow effect: A unique shadow-based ability defined by you on the buff card.",
    },
];

/// Looks up a tag; unknown tags return `None` and are skipped by callers.
pub fn lookup(tag: &str) -> Option<&'static TagMeta> {
    TAG_TABLE.iter().find(|meta| meta.id == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_tags() {
        assert_eq!(lookup(SHADOW_DASH).map(|m| m.category), Some(TagCategory::Mobility));
        assert_eq!(
            lookup(RESISTANCE_MUNDANE).map(|m| m.short),
            Some("Resist non-magical weapons")
        );
        assert!(lookup("shadow_step_90").is_none());
    }
}
