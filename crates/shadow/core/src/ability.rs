//! The six ability scores used by saves, checks, and buff effects.

use bitflags::bitflags;

/// One of the six ability scores.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Position in [`Ability::ALL`], used to index per-ability arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn flag(self) -> AbilitySet {
        match self {
            Self::Str => AbilitySet::STR,
            Self::Dex => AbilitySet::DEX,
            Self::Con => AbilitySet::CON,
            Self::Int => AbilitySet::INT,
            Self::Wis => AbilitySet::WIS,
            Self::Cha => AbilitySet::CHA,
        }
    }

    /// Lower-case id fragment used by catalog ids (`adv_dex_save`).
    pub fn id_fragment(self) -> String {
        self.as_ref().to_ascii_lowercase()
    }
}

bitflags! {
    /// Set of abilities, used for advantage flags.
    ///
    /// Advantage is present/absent, never counted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AbilitySet: u8 {
        const STR = 1 << 0;
        const DEX = 1 << 1;
        const CON = 1 << 2;
        const INT = 1 << 3;
        const WIS = 1 << 4;
        const CHA = 1 << 5;
    }
}

impl AbilitySet {
    /// Abilities in the set, in canonical STR..CHA order.
    pub fn abilities(self) -> impl Iterator<Item = Ability> {
        Ability::ALL
            .into_iter()
            .filter(move |ability| self.contains(ability.flag()))
    }

    pub fn has(self, ability: Ability) -> bool {
        self.contains(ability.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn parses_and_displays_upper_case() {
        assert_eq!(Ability::from_str("dex").unwrap(), Ability::Dex);
        assert_eq!(Ability::Wis.to_string(), "WIS");
        assert_eq!(Ability::Cha.id_fragment(), "cha");
    }

    #[test]
    fn set_iterates_in_canonical_order() {
        let set = Ability::Cha.flag() | Ability::Str.flag();
        let listed: Vec<_> = set.abilities().collect();
        assert_eq!(listed, vec![Ability::Str, Ability::Cha]);
        assert!(set.has(Ability::Cha));
        assert!(!set.has(Ability::Dex));
    }
}
