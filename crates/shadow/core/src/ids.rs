//! String-backed identifiers.
//!
//! Ids are generated per document from monotonically increasing counters
//! (`shadow-3`, `ally-2`, `corpse-1`) and are never reused. `self` is the one
//! reserved target id.

use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifies a stored shadow.
    ShadowId
);
string_id!(
    /// Identifies a buff definition in the catalog.
    BuffId
);
string_id!(
    /// Identifies a buff target. Corpses share their target's id.
    TargetId
);
string_id!(
    /// Identifies an ability card.
    CardId
);

impl TargetId {
    pub const SELF: &'static str = "self";

    /// The reserved id of the primary user.
    pub fn self_target() -> Self {
        Self::new(Self::SELF)
    }

    pub fn is_self(&self) -> bool {
        self.0 == Self::SELF
    }
}

/// Kinds of generated ids, each with its own counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IdKind {
    Shadow,
    Corpse,
    Ally,
    Ability,
    Custom,
}

/// Per-document id counters. Each counter holds the next number to hand out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IdCounters {
    pub shadow: u64,
    pub corpse: u64,
    pub ally: u64,
    pub ability: u64,
    pub custom: u64,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            shadow: 1,
            corpse: 1,
            ally: 1,
            ability: 1,
            custom: 1,
        }
    }
}

impl IdCounters {
    fn slot(&mut self, kind: IdKind) -> &mut u64 {
        match kind {
            IdKind::Shadow => &mut self.shadow,
            IdKind::Corpse => &mut self.corpse,
            IdKind::Ally => &mut self.ally,
            IdKind::Ability => &mut self.ability,
            IdKind::Custom => &mut self.custom,
        }
    }

    /// Hands out the next id of `kind` (`ally-1`, `custom_3`, ...).
    pub fn next(&mut self, kind: IdKind) -> String {
        let slot = self.slot(kind);
        // A counter loaded as 0 from an old document still yields 1.
        let n = (*slot).max(1);
        *slot = n + 1;
        match kind {
            IdKind::Custom => format!("custom_{n}"),
            _ => format!("{}-{n}", kind.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_monotonic_per_kind() {
        let mut ids = IdCounters::default();
        assert_eq!(ids.next(IdKind::Ally), "ally-1");
        assert_eq!(ids.next(IdKind::Ally), "ally-2");
        assert_eq!(ids.next(IdKind::Corpse), "corpse-1");
        assert_eq!(ids.next(IdKind::Custom), "custom_1");
    }

    #[test]
    fn zeroed_counter_starts_at_one() {
        let mut ids = IdCounters {
            shadow: 0,
            ..IdCounters::default()
        };
        assert_eq!(ids.next(IdKind::Shadow), "shadow-1");
        assert_eq!(ids.next(IdKind::Shadow), "shadow-2");
    }

    #[test]
    fn reserved_self_target() {
        assert!(TargetId::self_target().is_self());
        assert_eq!(TargetId::from("ally-1"), "ally-1");
    }
}
