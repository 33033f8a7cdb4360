//! The calculator controller.
//!
//! [`ShadowFruit`] borrows the document mutably for the duration of one user
//! action and is the only place that writes to it. Each operation either
//! applies completely or returns without touching the document.

use crate::buffs::{BuffCategory, BuffDefinition, DEFAULT_CUSTOM_DESCRIPTION, Effect, tags};
use crate::cards::{AbilityCard, CardField, stub_cards};
use crate::config::CalculatorConfig;
use crate::corpse::{Corpse, CorpseStats, ShadowSelection, UNNAMED_CORPSE};
use crate::error::LedgerError;
use crate::ids::{BuffId, CardId, IdKind, ShadowId, TargetId};
use crate::ledger::TargetKind;
use crate::scoring::{ScoreInput, ShadowScore, difficulty_class, score};
use crate::shadow::{PowerPool, Shadow};
use crate::state::{BuffToolsView, SystemState};
use crate::summary::{BuffLine, TargetSummary, buff_lines, summarize};

/// Outcome of [`ShadowFruit::merge_catalog`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogMerge {
    pub added: usize,
    pub replaced: usize,
    /// Ids that collided with an immutable entry.
    pub skipped: Vec<BuffId>,
}

impl CatalogMerge {
    pub fn changed(&self) -> bool {
        self.added + self.replaced > 0
    }
}

/// Applies user operations to a [`SystemState`].
pub struct ShadowFruit<'a> {
    state: &'a mut SystemState,
    config: &'a CalculatorConfig,
}

impl<'a> ShadowFruit<'a> {
    pub fn new(state: &'a mut SystemState, config: &'a CalculatorConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &SystemState {
        self.state
    }

    fn next_id(&mut self, kind: IdKind) -> String {
        self.state.ui.next_ids.next(kind)
    }

    // ===== shadows =====

    /// Scores inputs without storing anything.
    pub fn preview_score(input: ScoreInput) -> ShadowScore {
        score(input)
    }

    /// Stores a new, active shadow.
    pub fn commit_shadow(&mut self, name: &str, input: ScoreInput) -> ShadowId {
        let id = ShadowId::new(self.next_id(IdKind::Shadow));
        self.state.shadows.push(Shadow::new(id.clone(), name, input));
        id
    }

    fn shadow_mut(&mut self, id: &str) -> Option<&mut Shadow> {
        self.state.shadows.iter_mut().find(|s| s.id == id)
    }

    pub fn set_shadow_active(&mut self, id: &str, active: bool) -> bool {
        self.shadow_mut(id).map(|s| s.active = active).is_some()
    }

    pub fn set_shadow_techniques(&mut self, id: &str, text: &str) -> bool {
        self.shadow_mut(id).map(|s| s.set_techniques(text)).is_some()
    }

    pub fn update_shadow_inputs(&mut self, id: &str, input: ScoreInput) -> bool {
        self.shadow_mut(id).map(|s| s.rescore(input)).is_some()
    }

    /// Removes a shadow and drops it from every corpse's powering set.
    ///
    /// Corpse stat blocks keep their old numbers until regenerated.
    pub fn remove_shadow(&mut self, id: &str) -> bool {
        let before = self.state.shadows.len();
        self.state.shadows.retain(|s| s.id != id);
        if self.state.shadows.len() == before {
            return false;
        }
        for corpse in &mut self.state.corpses {
            corpse.shadow_ids.retain(|sid| sid != id);
        }
        true
    }

    pub fn power_pool(&self) -> PowerPool {
        PowerPool::compute(&self.state.shadows, &self.state.targets, &self.state.catalog)
    }

    // ===== targets & stacks =====

    pub fn add_ally(&mut self, name: &str) -> Result<TargetId, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::BlankAllyName);
        }
        let id = TargetId::new(self.next_id(IdKind::Ally));
        Ok(self.state.targets.create(id, TargetKind::Ally, name))
    }

    /// Makes `id` the current buff target. Unknown ids are ignored.
    pub fn select_target(&mut self, id: &str) -> bool {
        if !self.state.targets.contains(id) {
            return false;
        }
        self.state.ui.current_target = TargetId::from(id);
        true
    }

    /// Adjusts a stack on the current target.
    pub fn adjust_stack(&mut self, buff: &str, delta: i64) -> Result<Option<u32>, LedgerError> {
        let target = self.state.ui.current_target.clone();
        self.adjust_stack_on(target.as_str(), buff, delta)
    }

    /// Adjusts a stack on `target`.
    ///
    /// `Ok(None)` means the target or buff is unknown and nothing changed.
    /// With the spend cap enabled, increases beyond the available pool are
    /// refused.
    pub fn adjust_stack_on(
        &mut self,
        target: &str,
        buff: &str,
        delta: i64,
    ) -> Result<Option<u32>, LedgerError> {
        if self.config.enforce_spend_cap {
            let available = self.power_pool().available;
            let state = &mut *self.state;
            state
                .targets
                .adjust_stack_within(target, buff, delta, &state.catalog, available)
        } else {
            let state = &mut *self.state;
            Ok(state.targets.adjust_stack(target, buff, delta, &state.catalog))
        }
    }

    /// Held buffs on `target` with spend and next-copy price.
    pub fn stack_lines(&self, target: &str) -> Vec<BuffLine> {
        self.state
            .targets
            .get(target)
            .map(|t| buff_lines(&t.stacks, &self.state.catalog))
            .unwrap_or_default()
    }

    pub fn add_custom_buff(
        &mut self,
        name: &str,
        base_cost: i64,
        description: &str,
    ) -> Result<BuffId, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::BlankBuffName);
        }
        if base_cost <= 0 {
            return Err(LedgerError::NonPositiveCost(base_cost));
        }
        let description = description.trim();
        let id = BuffId::new(self.next_id(IdKind::Custom));
        self.state.catalog.insert(BuffDefinition::new(
            id.clone(),
            name,
            BuffCategory::Custom,
            base_cost.min(u32::MAX as i64) as u32,
            if description.is_empty() {
                DEFAULT_CUSTOM_DESCRIPTION
            } else {
                description
            },
            Effect::Tagged {
                tag: tags::CUSTOM.to_string(),
            },
        ));
        Ok(id)
    }

    /// Merges externally loaded definitions.
    ///
    /// New ids are appended. An existing custom entry is replaced; any other
    /// existing entry is immutable, so a differing definition for it is skipped.
    pub fn merge_catalog(
        &mut self,
        definitions: impl IntoIterator<Item = BuffDefinition>,
    ) -> CatalogMerge {
        let mut report = CatalogMerge::default();
        for definition in definitions {
            match self.state.catalog.get(definition.id.as_str()) {
                None => report.added += 1,
                Some(existing) if *existing == definition => continue,
                Some(existing) if existing.category == BuffCategory::Custom => report.replaced += 1,
                Some(_) => {
                    report.skipped.push(definition.id);
                    continue;
                }
            }
            self.state.catalog.insert(definition);
        }
        report
    }

    pub fn set_target_notes(&mut self, target: &str, notes: &str) -> bool {
        self.state
            .targets
            .get_mut(target)
            .map(|t| t.notes = notes.to_string())
            .is_some()
    }

    // ===== DC helper =====

    /// Computes the suggested DC and remembers it.
    pub fn compute_dc(&mut self, shadow_level: i32, proficiency_mod: i32, ability_mod: i32) -> i32 {
        let dc = difficulty_class(shadow_level, proficiency_mod, ability_mod);
        self.state.ui.last_dc = Some(dc);
        dc
    }

    fn lash_dc(&self) -> i32 {
        self.state
            .ui
            .shadow_dc()
            .unwrap_or(self.config.fallback_lash_dc)
    }

    // ===== corpses =====

    /// Generates or regenerates the corpse called `name`.
    ///
    /// An existing corpse keeps its id and allocated buffs; everything derived
    /// is rebuilt. A new name creates a corpse and its buff target.
    pub fn generate_corpse(
        &mut self,
        name: &str,
        durability_tier: i64,
        selection: &ShadowSelection,
    ) -> TargetId {
        let name = match name.trim() {
            "" => UNNAMED_CORPSE,
            trimmed => trimmed,
        };
        let durability = durability_tier.clamp(0, u32::MAX as i64) as u32;
        let lash_dc = self.lash_dc();

        let existing = self.state.corpses.iter().position(|c| c.name == name);
        let id = match existing {
            Some(index) => self.state.corpses[index].id.clone(),
            None => TargetId::new(self.next_id(IdKind::Corpse)),
        };

        let state = &mut *self.state;
        let powering = selection.resolve(&state.shadows);
        match existing {
            Some(index) => state.corpses[index].regenerate(durability, &powering, lash_dc),
            None => {
                let mut corpse = Corpse {
                    id: id.clone(),
                    name: name.to_string(),
                    durability_tier: durability,
                    shadow_ids: Vec::new(),
                    stats: CorpseStats::default(),
                    inherited_techniques: Vec::new(),
                };
                corpse.regenerate(durability, &powering, lash_dc);
                state.corpses.push(corpse);
            }
        }
        if !state.targets.contains(id.as_str()) {
            state.targets.create(id.clone(), TargetKind::Corpse, name);
        }
        id
    }

    /// Rebuilds a corpse from its stored durability and surviving shadows.
    pub fn regenerate_corpse(&mut self, name: &str) -> Result<TargetId, LedgerError> {
        let corpse = self
            .state
            .corpse_by_name(name)
            .ok_or_else(|| LedgerError::CorpseNotFound(name.to_string()))?;
        let selection = ShadowSelection::Selected(corpse.shadow_ids.clone());
        let durability = corpse.durability_tier as i64;
        let name = corpse.name.clone();
        Ok(self.generate_corpse(&name, durability, &selection))
    }

    /// Switches the current buff target to the named corpse.
    pub fn select_corpse_for_buffs(&mut self, name: &str) -> Result<TargetId, LedgerError> {
        let id = self
            .state
            .corpse_by_name(name.trim())
            .map(|c| c.id.clone())
            .ok_or_else(|| LedgerError::CorpseNotFound(name.to_string()))?;
        if !self.state.targets.contains(id.as_str()) {
            self.state
                .targets
                .create(id.clone(), TargetKind::Corpse, name.trim());
        }
        self.state.ui.current_target = id.clone();
        Ok(id)
    }

    // ===== ability cards =====

    /// Appends an empty card bound to the current target.
    pub fn add_empty_card(&mut self) -> CardId {
        let id = CardId::new(self.next_id(IdKind::Ability));
        let target = self.state.ui.current_target.clone();
        self.state.abilities.push(AbilityCard::empty(id.clone(), target));
        id
    }

    /// Replaces every card with the three starter cards.
    pub fn stub_generate(&mut self) -> Vec<CardId> {
        let dc = self
            .state
            .ui
            .shadow_dc()
            .unwrap_or(self.config.fallback_stub_dc);
        let target = self.state.ui.current_target.clone();
        let ids = &mut self.state.ui.next_ids;
        let cards = stub_cards(dc, &target, || CardId::new(ids.next(IdKind::Ability)));
        self.state.abilities = cards;
        self.state.abilities.iter().map(|c| c.id.clone()).collect()
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut AbilityCard> {
        self.state.abilities.iter_mut().find(|c| c.id == id)
    }

    pub fn update_card(&mut self, id: &str, field: CardField, value: &str) -> bool {
        self.card_mut(id).map(|c| c.set(field, value)).is_some()
    }

    /// Binds a card to another target. Unknown targets are ignored.
    pub fn retarget_card(&mut self, id: &str, target: &str) -> bool {
        if !self.state.targets.contains(target) {
            return false;
        }
        self.card_mut(id)
            .map(|c| c.target_id = TargetId::from(target))
            .is_some()
    }

    pub fn delete_card(&mut self, id: &str) -> bool {
        let before = self.state.abilities.len();
        self.state.abilities.retain(|c| c.id != id);
        self.state.abilities.len() != before
    }

    pub fn reroll_card(&mut self, id: &str) -> bool {
        self.card_mut(id).map(AbilityCard::reroll).is_some()
    }

    pub fn copy_card_text(&self, id: &str) -> Option<String> {
        self.state.card(id).map(AbilityCard::copy_text)
    }

    /// Rebinds cards whose target has disappeared to the current target.
    pub fn rebind_orphan_cards(&mut self) -> usize {
        let state = &mut *self.state;
        let current = state.ui.current_target.clone();
        let mut rebound = 0;
        for card in &mut state.abilities {
            if !state.targets.contains(card.target_id.as_str()) {
                card.target_id = current.clone();
                rebound += 1;
            }
        }
        rebound
    }

    // ===== ui prefs & projections =====

    pub fn set_buff_tools_view(&mut self, view: BuffToolsView) {
        self.state.ui.buff_tools_view = view;
    }

    /// Flips a panel's collapsed flag and returns the new value.
    pub fn toggle_panel(&mut self, panel: u8) -> bool {
        let slot = self.state.ui.collapsed_panels.entry(panel).or_insert(false);
        *slot = !*slot;
        *slot
    }

    pub fn summaries(&self) -> Vec<TargetSummary> {
        summarize(self.state)
    }

    /// Back to a fresh document.
    pub fn reset(&mut self) {
        *self.state = SystemState::new(self.config);
    }
}
