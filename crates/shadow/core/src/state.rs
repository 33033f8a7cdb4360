//! The application-state document.
//!
//! One value holds everything the calculator knows. It is owned by the caller
//! and mutated only through [`crate::ShadowFruit`]; persistence writes it out
//! wholesale after each operation.

use std::collections::BTreeMap;

use crate::buffs::BuffCatalog;
use crate::cards::AbilityCard;
use crate::config::CalculatorConfig;
use crate::corpse::Corpse;
use crate::ids::{IdCounters, TargetId};
use crate::ledger::{BuffTarget, TargetLedger};
use crate::shadow::Shadow;

/// Which helper panels are shown under the buff list.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BuffToolsView {
    #[default]
    Hide,
    Custom,
    Dc,
    Both,
}

impl BuffToolsView {
    pub fn shows_custom(self) -> bool {
        matches!(self, Self::Custom | Self::Both)
    }

    pub fn shows_dc(self) -> bool {
        matches!(self, Self::Dc | Self::Both)
    }
}

/// Number of collapsible panels.
pub const PANEL_COUNT: u8 = 6;

/// Interface preferences persisted alongside the data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct UiPrefs {
    pub current_target: TargetId,
    /// Result of the most recent DC helper run.
    pub last_dc: Option<i32>,
    pub next_ids: IdCounters,
    pub collapsed_panels: BTreeMap<u8, bool>,
    pub buff_tools_view: BuffToolsView,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            current_target: TargetId::self_target(),
            last_dc: None,
            next_ids: IdCounters::default(),
            collapsed_panels: (1..=PANEL_COUNT).map(|panel| (panel, false)).collect(),
            buff_tools_view: BuffToolsView::default(),
        }
    }
}

impl UiPrefs {
    /// Last computed DC; a stored zero counts as never computed.
    pub fn shadow_dc(&self) -> Option<i32> {
        self.last_dc.filter(|dc| *dc != 0)
    }

    pub fn is_collapsed(&self, panel: u8) -> bool {
        self.collapsed_panels.get(&panel).copied().unwrap_or(false)
    }
}

/// Everything the calculator persists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SystemState {
    pub shadows: Vec<Shadow>,
    pub catalog: BuffCatalog,
    pub targets: TargetLedger,
    pub corpses: Vec<Corpse>,
    pub abilities: Vec<AbilityCard>,
    pub ui: UiPrefs,
}

impl SystemState {
    /// A fresh document: default catalog, `self` target selected.
    pub fn new(config: &CalculatorConfig) -> Self {
        let mut state = Self::default();
        state.ensure_base_state(config);
        state
    }

    /// Repairs a loaded document so every operation has something to act on.
    ///
    /// - an empty catalog is reseeded with the defaults
    /// - a document without targets gets the `self` target, selected
    /// - a dangling current target falls back to the first target
    pub fn ensure_base_state(&mut self, config: &CalculatorConfig) {
        if self.catalog.is_empty() {
            self.catalog = BuffCatalog::defaults();
        }
        if self.targets.is_empty() {
            self.targets.ensure_self(&config.self_name);
            self.ui.current_target = TargetId::self_target();
        } else if !self.targets.contains(self.ui.current_target.as_str()) {
            if let Some(first) = self.targets.first() {
                self.ui.current_target = first.id.clone();
            }
        }
    }

    pub fn current_target(&self) -> Option<&BuffTarget> {
        self.targets.get(self.ui.current_target.as_str())
    }

    pub fn shadow(&self, id: &str) -> Option<&Shadow> {
        self.shadows.iter().find(|s| s.id == id)
    }

    pub fn corpse(&self, id: &str) -> Option<&Corpse> {
        self.corpses.iter().find(|c| c.id == id)
    }

    pub fn corpse_by_name(&self, name: &str) -> Option<&Corpse> {
        self.corpses.iter().find(|c| c.name == name)
    }

    pub fn card(&self, id: &str) -> Option<&AbilityCard> {
        self.abilities.iter().find(|c| c.id == id)
    }

    /// Cards bound to `target`, in list order.
    pub fn cards_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a AbilityCard> {
        self.abilities.iter().filter(move |c| c.target_id == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TargetKind;

    #[test]
    fn fresh_document_has_catalog_and_self() {
        let state = SystemState::new(&CalculatorConfig::default());
        assert!(!state.catalog.is_empty());
        let current = state.current_target().unwrap();
        assert_eq!(current.kind, TargetKind::Primary);
        assert_eq!(current.name, CalculatorConfig::DEFAULT_SELF_NAME);
        assert_eq!(state.ui.collapsed_panels.len(), PANEL_COUNT as usize);
    }

    #[test]
    fn dangling_current_target_is_repaired() {
        let config = CalculatorConfig::default();
        let mut state = SystemState::new(&config);
        state.targets.create(TargetId::from("ally-1"), TargetKind::Ally, "Robin");
        state.ui.current_target = TargetId::from("corpse-9");
        state.ensure_base_state(&config);
        assert_eq!(state.ui.current_target, "self");
    }

    #[test]
    fn zero_dc_reads_as_unset() {
        let mut ui = UiPrefs::default();
        ui.last_dc = Some(0);
        assert_eq!(ui.shadow_dc(), None);
        ui.last_dc = Some(14);
        assert_eq!(ui.shadow_dc(), Some(14));
    }

    #[test]
    fn tools_view_flags() {
        assert!(BuffToolsView::Both.shows_custom() && BuffToolsView::Both.shows_dc());
        assert!(!BuffToolsView::Hide.shows_custom());
        assert!(BuffToolsView::Dc.shows_dc());
    }
}
