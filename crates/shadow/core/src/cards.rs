//! Ability cards: free-text records bound to a buff target.

use crate::ids::{CardId, TargetId};

/// Description written by [`AbilityCard::reroll`] into a card that has none.
pub const REROLL_DESCRIPTION: &str = "Shadow power surges, causing a fresh variation of the attack. Describe how the shadows change form.";

/// An editable ability card. Nothing on it is derived.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct AbilityCard {
    pub id: CardId,
    pub name: String,
    pub role: String,
    pub description: String,
    pub action: String,
    pub range: String,
    pub target: String,
    pub save: String,
    pub dc: String,
    pub damage: String,
    pub mechanical: String,
    pub combo: String,
    pub target_id: TargetId,
}

impl Default for AbilityCard {
    fn default() -> Self {
        Self::empty(CardId::new(""), TargetId::self_target())
    }
}

/// Editable text fields of a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CardField {
    Name,
    Role,
    Description,
    Action,
    Range,
    Target,
    Save,
    Dc,
    Damage,
    Mechanical,
    Combo,
}

impl AbilityCard {
    pub fn empty(id: CardId, target_id: TargetId) -> Self {
        Self {
            id,
            name: String::new(),
            role: String::new(),
            description: String::new(),
            action: String::new(),
            range: String::new(),
            target: String::new(),
            save: String::new(),
            dc: String::new(),
            damage: String::new(),
            mechanical: String::new(),
            combo: String::new(),
            target_id,
        }
    }

    fn field_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::Name => &mut self.name,
            CardField::Role => &mut self.role,
            CardField::Description => &mut self.description,
            CardField::Action => &mut self.action,
            CardField::Range => &mut self.range,
            CardField::Target => &mut self.target,
            CardField::Save => &mut self.save,
            CardField::Dc => &mut self.dc,
            CardField::Damage => &mut self.damage,
            CardField::Mechanical => &mut self.mechanical,
            CardField::Combo => &mut self.combo,
        }
    }

    pub fn set(&mut self, field: CardField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Plain-text export, one block per card.
    pub fn copy_text(&self) -> String {
        format!(
            "{}\n{}\nAction: {} | Range: {} | Target: {} | Save: {} DC {}\nDamage: {}\n{}\n{}",
            self.name,
            self.description,
            self.action,
            self.range,
            self.target,
            self.save,
            self.dc,
            self.damage,
            self.mechanical,
            self.combo
        )
    }

    /// Fills an empty description; a written one is kept.
    pub fn reroll(&mut self) {
        if self.description.is_empty() {
            self.description = REROLL_DESCRIPTION.to_string();
        }
    }
}

/// The three fixed starter cards, all bound to `target_id`.
///
/// `next_id` is called once per card, in order.
pub fn stub_cards(
    dc: i32,
    target_id: &TargetId,
    mut next_id: impl FnMut() -> CardId,
) -> Vec<AbilityCard> {
    let dc = dc.to_string();
    let card = |id: CardId, fields: [&str; 10]| {
        let [name, description, action, range, target, save, dc, damage, mechanical, combo] =
            fields;
        AbilityCard {
            name: name.to_string(),
            description: description.to_string(),
            action: action.to_string(),
            range: range.to_string(),
            target: target.to_string(),
            save: save.to_string(),
            dc: dc.to_string(),
            damage: damage.to_string(),
            mechanical: mechanical.to_string(),
            combo: combo.to_string(),
            ..AbilityCard::empty(id, target_id.clone())
        }
    };

    vec![
        card(
            next_id(),
            [
                "Shadow Gale Barrage",
                "Conjure a flurry of razor-sharp shadow blades that slice through enemies in a 15-foot cone.",
                "Action",
                "15-ft cone",
                "All creatures in cone",
                "DEX save",
                dc.as_str(),
                "6d8 necrotic",
                "On a failed save, full damage and targets are briefly outlined in violet shadow (no benefit from invisibility for 1 round). On a success, half damage and no outline.",
                "Pairs well with restraining effects or fear-based control.",
            ],
        ),
        card(
            next_id(),
            [
                "Shadow Asgard Ascendant",
                "The user swells with stolen shadows, taking on a towering Night Emperor form wreathed in black-and-violet flames.",
                "Action",
                "Self",
                "Self",
                "—",
                "",
                "Melee attacks +3d8 necrotic",
                "For 1 minute, your size increases by one category, your reach increases by 5 ft, and your melee weapon attacks deal an extra 3d8 necrotic damage.",
                "Use when many buffs are active to maximize impact; stacks well with movement and defense buffs.",
            ],
        ),
        card(
            next_id(),
            [
                "Grasping Coffin",
                "Shadows surge up from the ground to form a coffin of chains and blades around a single target.",
                "Action",
                "60 ft",
                "One creature",
                "STR or DEX save",
                dc.as_str(),
                "4d10 necrotic on fail, 2d10 on success",
                "On a failed save, target is restrained inside a cage of shadow chains until it escapes (action to repeat save at end of each turn). On a success, the coffin partially forms but the target slips free.",
                "Perfect setup for multi-attack corpses or allies; can pin down bosses.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn copy_text_layout() {
        let mut card = AbilityCard::empty(CardId::from("ability-1"), TargetId::self_target());
        card.set(CardField::Name, "Night Fang");
        card.set(CardField::Save, "DEX save");
        card.set(CardField::Dc, "16");
        assert_eq!(
            card.copy_text(),
            "Night Fang\n\nAction:  | Range:  | Target:  | Save: DEX save DC 16\nDamage: \n\n"
        );
    }

    #[test]
    fn reroll_only_fills_empty_description() {
        let mut card = AbilityCard::default();
        card.reroll();
        assert_eq!(card.description, REROLL_DESCRIPTION);

        card.set(CardField::Description, "Mine.");
        card.reroll();
        assert_eq!(card.description, "Mine.");
    }

    #[test]
    fn stubs_use_dc_except_on_self_buff() {
        let mut n = 0;
        let cards = stub_cards(14, &TargetId::from("ally-1"), || {
            n += 1;
            CardId::new(format!("ability-{n}"))
        });
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Shadow Gale Barrage", "Shadow Asgard Ascendant", "Grasping Coffin"]
        );
        let dcs: Vec<_> = cards.iter().map(|c| c.dc.as_str()).collect();
        assert_eq!(dcs, vec!["14", "", "14"]);
        assert_eq!(cards[2].id, "ability-3");
        assert!(cards.iter().all(|c| c.target_id == "ally-1"));
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!(CardField::from_str("Mechanical").unwrap(), CardField::Mechanical);
        assert_eq!(CardField::from_str("dc").unwrap(), CardField::Dc);
        assert!(CardField::from_str("targetId").is_err());
    }
}
