//! Buff definitions and the default catalog.

use crate::ability::Ability;
use crate::buffs::tags;
use crate::ids::BuffId;

/// What one stack of a buff does.
///
/// Matched exhaustively by the aggregation engine and by every display helper,
/// so a new effect kind cannot be silently ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Effect {
    /// Temporary hit points per stack.
    TempHp { amount: i32 },
    /// Feet of walking speed per stack.
    Speed { amount: i32 },
    /// Armor class per stack.
    ArmorClass { amount: i32 },
    /// Armor class per stack while in dim light or darkness.
    ArmorClassInDarkness { amount: i32 },
    /// Saving throw bonus per stack.
    SaveBonus {
        ability: Ability,
        #[cfg_attr(feature = "serde", serde(rename = "amountPerStack"))]
        amount_per_stack: i32,
    },
    /// Advantage on saves; flat, extra stacks add nothing.
    AdvantageOnSave { ability: Ability },
    /// Advantage on ability checks; flat, extra stacks add nothing.
    AdvantageOnCheck { ability: Ability },
    /// Narrative power described by the tag table.
    Tagged { tag: String },
}

impl Effect {
    /// One-line description of `count` stacks, or `None` for tagged powers.
    pub fn total_line(&self, count: u32) -> Option<String> {
        let n = count as i64;
        match self {
            Effect::TempHp { amount } => Some(format!("Total +{} temp HP.", *amount as i64 * n)),
            Effect::Speed { amount } => Some(format!("Total +{} ft speed.", *amount as i64 * n)),
            Effect::ArmorClass { amount } => Some(format!("Total +{} AC.", *amount as i64 * n)),
            Effect::ArmorClassInDarkness { amount } => {
                Some(format!("Total +{} AC in darkness.", *amount as i64 * n))
            }
            Effect::SaveBonus {
                ability,
                amount_per_stack,
            } => Some(format!(
                "Total +{} to {} saves.",
                *amount_per_stack as i64 * n,
                ability
            )),
            Effect::AdvantageOnSave { ability } => Some(format!("Advantage on {ability} saves.")),
            Effect::AdvantageOnCheck { ability } => {
                Some(format!("Advantage on {ability} checks."))
            }
            Effect::Tagged { .. } => None,
        }
    }
}

/// Grouping shown next to a buff's price.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BuffCategory {
    Defense,
    Mobility,
    Saves,
    Checks,
    Offense,
    Control,
    Custom,
}

/// A purchasable, stackable buff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuffDefinition {
    pub id: BuffId,
    pub name: String,
    pub category: BuffCategory,
    /// Price of the first copy; always > 0.
    pub base_cost: u32,
    pub description: String,
    pub effect: Effect,
}

impl BuffDefinition {
    pub fn new(
        id: impl Into<BuffId>,
        name: impl Into<String>,
        category: BuffCategory,
        base_cost: u32,
        description: impl Into<String>,
        effect: Effect,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            base_cost,
            description: description.into(),
            effect,
        }
    }

    /// Tag of a tagged buff.
    pub fn tag(&self) -> Option<&str> {
        match &self.effect {
            Effect::Tagged { tag } => Some(tag),
            _ => None,
        }
    }
}

/// Ordered registry of buff definitions.
///
/// Built-in entries are immutable after seeding; custom entries are appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BuffCatalog {
    buffs: Vec<BuffDefinition>,
}

impl BuffCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&BuffDefinition> {
        self.buffs.iter().find(|def| def.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuffDefinition> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    /// Adds a definition, replacing any existing entry with the same id in place.
    pub fn insert(&mut self, definition: BuffDefinition) {
        match self.buffs.iter_mut().find(|def| def.id == definition.id) {
            Some(slot) => *slot = definition,
            None => self.buffs.push(definition),
        }
    }

    /// The built-in catalog seeded into every new document.
    pub fn defaults() -> Self {
        use BuffCategory::*;
        let mut catalog = Self::new();
        let mut add = |id: &str, name: &str, category, cost, desc: &str, effect| {
            catalog.insert(BuffDefinition::new(id, name, category, cost, desc, effect));
        };

        // Defensive / HP
        add(
            "temp20",
            "+20 Temp HP",
            Defense,
            8,
            "Gain 20 temporary hit points. Stacks add more temp HP.",
            Effect::TempHp { amount: 20 },
        );
        add(
            "temp50",
            "+50 Temp HP",
            Defense,
            16,
            "Gain 50 temporary hit points. Stacks add more temp HP.",
            Effect::TempHp { amount: 50 },
        );
        add(
            "shadowCarapace",
            "Shadow Carapace",
            Defense,
            18,
            "Your shadow plates harden, granting +1 AC per stack.",
            Effect::ArmorClass { amount: 1 },
        );
        add(
            SHADOW_ARMOR_OF_NIGHT,
            "Shadow Armor of Night",
            Defense,
            14,
            "In dim light or darkness, gain +1 AC per stack.",
            Effect::ArmorClassInDarkness { amount: 1 },
        );
        add(
            "mundaneResist",
            "Resistance to Non-magical Weapons",
            Defense,
            20,
            "Gain resistance to bludgeoning, piercing, and slashing from non-magical attacks. Stacks grant extra uses per day or extra targets (DM adjudicates).",
            tagged(tags::RESISTANCE_MUNDANE),
        );

        // Mobility
        add(
            "move10",
            "+10 ft Movement",
            Mobility,
            10,
            "Shadow-slick footing. Gain +10 ft walking speed per stack.",
            Effect::Speed { amount: 10 },
        );
        add(
            "shadowStep30",
            "Shadow Step (30 ft)",
            Mobility,
            18,
            "As a bonus action, teleport up to 30 ft between areas of dim light or darkness. Stacks grant more uses per round or more targets.",
            tagged(tags::SHADOW_STEP_30),
        );
        add(
            "shadowStep60",
            "Shadow Step (60 ft)",
            Mobility,
            28,
            "As a bonus action, teleport up to 60 ft. Stacks increase uses or distance (DM adjudicates).",
            tagged(tags::SHADOW_STEP_60),
        );
        add(
            "shadowDash",
            "Shadow Dash",
            Mobility,
            15,
            "Once per turn, move an additional distance without provoking opportunity attacks. Stacks improve distance or uses.",
            tagged(tags::SHADOW_DASH),
        );

        // Save bonuses
        add(
            "plus2_str_save",
            "+2 STR Save Bonus",
            Saves,
            25,
            "Your muscles remember the shadows' strength. Gain +2 to Strength saving throws per stack.",
            save_bonus(Ability::Str),
        );
        add(
            "plus2_dex_save",
            "+2 DEX Save Bonus",
            Saves,
            30,
            "Shadow reflexes. Gain +2 to Dexterity saving throws per stack.",
            save_bonus(Ability::Dex),
        );
        add(
            "plus2_con_save",
            "+2 CON Save Bonus",
            Saves,
            35,
            "Shadow-fortified body. Gain +2 to Constitution saving throws per stack.",
            save_bonus(Ability::Con),
        );

        // Advantage on saves, then on checks; same price
        for ability in Ability::ALL {
            add(
                &format!("adv_{}_save", ability.id_fragment()),
                &format!("Advantage on {ability} saves"),
                Saves,
                25,
                &format!(
                    "Your shadow anticipates threats. You have advantage on {ability} saving throws."
                ),
                Effect::AdvantageOnSave { ability },
            );
        }
        for ability in Ability::ALL {
            add(
                &format!("adv_{}_check", ability.id_fragment()),
                &format!("Advantage on {ability} checks"),
                Checks,
                25,
                &format!("Your shadow guides your {ability} ability checks, granting advantage."),
                Effect::AdvantageOnCheck { ability },
            );
        }

        // Offensive / utility
        add(
            "shadowWeapon",
            "Shadow Weapon",
            Offense,
            14,
            "Conjure a shadow-forged weapon that counts as magical for overcoming resistance. Stacks can add riders (extra damage, reach, etc.).",
            tagged(tags::SHADOW_WEAPON),
        );
        add(
            "shadowRedirect",
            "Shadow Redirect",
            Offense,
            20,
            "When you or a creature within 5 ft would take damage, you can use your reaction to reduce it and redirect some to another target (DM adjudicates exact values). Stacks add more uses.",
            tagged(tags::SHADOW_REDIRECT),
        );
        add(
            "shadowShackles",
            "Shadow Shackles",
            Control,
            22,
            "Gain an at-will restraining effect: shadow chains attempt to grapple and restrain foes. Stacks can boost the save DC or number of targets.",
            tagged(tags::SHADOW_SHACKLES),
        );

        catalog
    }
}

/// Id of the darkness-AC buff, which the summary names explicitly.
pub const SHADOW_ARMOR_OF_NIGHT: &str = "shadowArmorNight";

/// Description given to custom buffs created without one.
pub const DEFAULT_CUSTOM_DESCRIPTION: &str = "Custom shadow buff.";

fn tagged(tag: &str) -> Effect {
    Effect::Tagged {
        tag: tag.to_string(),
    }
}

fn save_bonus(ability: Ability) -> Effect {
    Effect::SaveBonus {
        ability,
        amount_per_stack: 2,
    }
}
