//! Buff target ledger.
//!
//! Each target owns a sparse map of buff id → stack count. A count of zero is
//! never stored: [`StackMap::set`] removes the key instead. Spending is global
//! (one pool for every target) and unvalidated unless the caller opts into
//! [`TargetLedger::adjust_stack_within`].

use std::collections::BTreeMap;

use crate::buffs::{BuffCatalog, cumulative_cost};
use crate::error::LedgerError;
use crate::ids::{BuffId, TargetId};

/// Sparse buff id → count map; absent means zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<BuffId, u32>", into = "BTreeMap<BuffId, u32>")
)]
pub struct StackMap {
    counts: BTreeMap<BuffId, u32>,
}

impl StackMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, buff: &str) -> u32 {
        self.counts.get(buff).copied().unwrap_or(0)
    }

    /// Stores `count`, deleting the key when it is zero.
    pub fn set(&mut self, buff: BuffId, count: u32) {
        if count == 0 {
            self.counts.remove(&buff);
        } else {
            self.counts.insert(buff, count);
        }
    }

    /// Adds `delta`, clamping at zero. Returns the new count.
    pub fn adjust(&mut self, buff: BuffId, delta: i64) -> u32 {
        let next = (self.get(buff.as_str()) as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        self.set(buff, next);
        next
    }

    /// Non-zero entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&BuffId, u32)> {
        self.counts.iter().map(|(id, count)| (id, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// SPU spent on this map; buffs missing from the catalog are skipped.
    pub fn spent(&self, catalog: &BuffCatalog) -> u64 {
        self.iter()
            .filter_map(|(id, count)| {
                catalog
                    .get(id.as_str())
                    .map(|def| cumulative_cost(def.base_cost, count))
            })
            .sum()
    }
}

impl From<BTreeMap<BuffId, u32>> for StackMap {
    fn from(mut counts: BTreeMap<BuffId, u32>) -> Self {
        counts.retain(|_, count| *count > 0);
        Self { counts }
    }
}

impl From<StackMap> for BTreeMap<BuffId, u32> {
    fn from(map: StackMap) -> Self {
        map.counts
    }
}

/// What kind of entity a target is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetKind {
    /// The primary user; exactly one exists, with id `self`.
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    Primary,
    Ally,
    Corpse,
}

impl TargetKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY USER",
            Self::Ally => "ALLY",
            Self::Corpse => "CORPSE",
        }
    }
}

/// An entity that can hold buff stacks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffTarget {
    pub id: TargetId,
    pub name: String,
    pub kind: TargetKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: StackMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
}

impl BuffTarget {
    pub fn new(id: TargetId, name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            stacks: StackMap::new(),
            notes: String::new(),
        }
    }
}

/// Ordered collection of buff targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TargetLedger {
    targets: Vec<BuffTarget>,
}

impl TargetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&BuffTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BuffTarget> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuffTarget> {
        self.targets.iter()
    }

    pub fn first(&self) -> Option<&BuffTarget> {
        self.targets.first()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Makes sure the `self` target exists, creating it with `name` if not.
    pub fn ensure_self(&mut self, name: &str) {
        if !self.contains(TargetId::SELF) {
            self.targets.insert(
                0,
                BuffTarget::new(TargetId::self_target(), name, TargetKind::Primary),
            );
        }
    }

    /// Appends a target. The id must come from the document's counters.
    pub fn create(&mut self, id: TargetId, kind: TargetKind, name: impl Into<String>) -> TargetId {
        self.targets.push(BuffTarget::new(id.clone(), name, kind));
        id
    }

    /// Adds `delta` stacks of `buff` on `target`.
    ///
    /// Returns the new count, or `None` (and changes nothing) when either the
    /// target or the buff is unknown.
    pub fn adjust_stack(
        &mut self,
        target: &str,
        buff: &str,
        delta: i64,
        catalog: &BuffCatalog,
    ) -> Option<u32> {
        if !catalog.contains(buff) {
            return None;
        }
        let target = self.get_mut(target)?;
        Some(target.stacks.adjust(BuffId::from(buff), delta))
    }

    /// Like [`Self::adjust_stack`], but refuses an increase whose incremental
    /// cost exceeds `available`.
    pub fn adjust_stack_within(
        &mut self,
        target: &str,
        buff: &str,
        delta: i64,
        catalog: &BuffCatalog,
        available: u64,
    ) -> Result<Option<u32>, LedgerError> {
        if delta > 0 {
            if let (Some(def), Some(holder)) = (catalog.get(buff), self.get(target)) {
                let current = holder.stacks.get(buff);
                let wanted = (current as i64 + delta).min(u32::MAX as i64) as u32;
                let cost = cumulative_cost(def.base_cost, wanted)
                    - cumulative_cost(def.base_cost, current);
                if cost > available {
                    return Err(LedgerError::SpendCapExceeded { cost, available });
                }
            }
        }
        Ok(self.adjust_stack(target, buff, delta, catalog))
    }

    /// SPU spent across every target.
    pub fn total_spent(&self, catalog: &BuffCatalog) -> u64 {
        self.targets.iter().map(|t| t.stacks.spent(catalog)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> TargetLedger {
        let mut ledger = TargetLedger::new();
        ledger.ensure_self("Elren");
        ledger
    }

    #[test]
    fn zero_is_absence() {
        let mut map = StackMap::new();
        map.set(BuffId::from("temp20"), 2);
        assert_eq!(map.adjust(BuffId::from("temp20"), -5), 0);
        assert!(map.is_empty());
        assert_eq!(map.get("temp20"), 0);
    }

    #[test]
    fn unknown_target_or_buff_is_a_no_op() {
        let catalog = BuffCatalog::defaults();
        let mut ledger = ledger();
        assert_eq!(ledger.adjust_stack("ally-9", "temp20", 1, &catalog), None);
        assert_eq!(ledger.adjust_stack("self", "nope", 1, &catalog), None);
        assert!(ledger.get("self").unwrap().stacks.is_empty());
    }

    #[test]
    fn spend_is_global_across_targets() {
        let catalog = BuffCatalog::defaults();
        let mut ledger = ledger();
        let ally = ledger.create(TargetId::from("ally-1"), TargetKind::Ally, "Robin");
        ledger.adjust_stack("self", "move10", 2, &catalog);
        ledger.adjust_stack(ally.as_str(), "move10", 1, &catalog);
        // self: 10 + 15, ally: 10
        assert_eq!(ledger.total_spent(&catalog), 35);
    }

    #[test]
    fn ensure_self_is_idempotent() {
        let mut ledger = ledger();
        ledger.ensure_self("Someone Else");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.first().map(|t| t.name.as_str()), Some("Elren"));
    }

    #[test]
    fn spend_cap_refuses_overdraw_without_mutating() {
        let catalog = BuffCatalog::defaults();
        let mut ledger = ledger();
        let err = ledger
            .adjust_stack_within("self", "temp50", 1, &catalog, 10)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::SpendCapExceeded {
                cost: 16,
                available: 10
            }
        );
        assert_eq!(ledger.get("self").unwrap().stacks.get("temp50"), 0);

        // Decreases are always allowed.
        ledger.adjust_stack("self", "temp50", 1, &catalog);
        assert_eq!(
            ledger.adjust_stack_within("self", "temp50", -1, &catalog, 0),
            Ok(Some(0))
        );
    }
}
