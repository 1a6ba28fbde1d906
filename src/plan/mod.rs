pub mod slot;

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::catalog::{Catalog, RecipeId};
use crate::error::PlanError;
use crate::sampler;

pub use slot::{Day, Moment, Slot, SlotState};

pub const SLOT_COUNT: usize = Day::ALL.len() * Moment::ALL.len();

fn slot_index(day: Day, moment: Moment) -> usize {
    day.index() * Moment::ALL.len() + moment.index()
}

/// The week grid: one slot per (day, moment), stored in day-then-moment order.
///
/// All randomness comes from the caller's RNG and all recipe data from the
/// caller's catalog; the plan only holds activation flags and assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    slots: [Slot; SLOT_COUNT],
}

impl Default for Plan {
    fn default() -> Self {
        Self::create_default()
    }
}

impl Plan {
    /// Default activation, no assignments.
    pub fn create_default() -> Self {
        Plan {
            slots: std::array::from_fn(|i| {
                let day = Day::ALL[i / Moment::ALL.len()];
                let moment = Moment::ALL[i % Moment::ALL.len()];
                Slot::with_default_activation(day, moment)
            }),
        }
    }

    pub fn get_slot(&self, day: Day, moment: Moment) -> &Slot {
        &self.slots[slot_index(day, moment)]
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn list_active_assigned(&self) -> Vec<(Day, Moment, RecipeId)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.active_recipe().map(|id| (slot.day, slot.moment, id)))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn empty_active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state() == SlotState::ActiveEmpty)
            .count()
    }

    // Ids held by active slots, optionally ignoring one slot.
    fn assigned_ids(&self, skip: Option<usize>) -> HashSet<RecipeId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .filter_map(|(_, slot)| slot.active_recipe())
            .collect()
    }

    /// Assigns a recipe to every active slot that has none, never reusing an
    /// id already held by an active slot (including ones picked earlier in the
    /// same pass). Slots stay empty once the catalog runs out of candidates.
    /// Returns how many slots were filled.
    pub fn fill_empty_slots<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> usize {
        let mut excluded = self.assigned_ids(None);
        let mut filled = 0;

        for slot in self.slots.iter_mut() {
            if slot.state() != SlotState::ActiveEmpty {
                continue;
            }
            match sampler::pick(catalog, &excluded, rng) {
                Some(id) => {
                    slot.recipe_id = Some(id);
                    excluded.insert(id);
                    filled += 1;
                }
                None => {
                    debug!(day = %slot.day, moment = %slot.moment, "Left slot empty, catalog exhausted");
                }
            }
        }

        debug!(filled, "Filled empty slots");
        filled
    }

    /// Switches a slot on or off. Switching off keeps the assignment;
    /// switching an empty slot on fills it.
    pub fn toggle_active<R: Rng + ?Sized>(
        &mut self,
        day: Day,
        moment: Moment,
        active: bool,
        catalog: &Catalog,
        rng: &mut R,
    ) {
        let slot = &mut self.slots[slot_index(day, moment)];
        let was_active = slot.active;
        slot.active = active;

        if active && !was_active && slot.recipe_id.is_none() {
            self.fill_empty_slots(catalog, rng);
        }
    }

    /// Replaces the slot's recipe with a fresh draw that differs from its
    /// current one and from every other active assignment. When no such
    /// recipe exists the slot is left untouched and `NoCandidateAvailable`
    /// is returned. Inactive slots are refused with `SlotInactive`.
    pub fn reroll<R: Rng + ?Sized>(
        &mut self,
        day: Day,
        moment: Moment,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<RecipeId, PlanError> {
        let index = slot_index(day, moment);
        if !self.slots[index].active {
            return Err(PlanError::SlotInactive { day, moment });
        }
        let mut excluded = self.assigned_ids(Some(index));
        if let Some(current) = self.slots[index].recipe_id {
            excluded.insert(current);
        }

        let id = sampler::pick(catalog, &excluded, rng)
            .ok_or(PlanError::NoCandidateAvailable { day, moment })?;
        self.slots[index].recipe_id = Some(id);
        debug!(day = %day, moment = %moment, recipe_id = id, "Rerolled slot");
        Ok(id)
    }

    /// Puts a user-chosen recipe in a slot and activates it. Duplicates are allowed.
    pub fn set_manual(&mut self, day: Day, moment: Moment, recipe_id: RecipeId) {
        let slot = &mut self.slots[slot_index(day, moment)];
        slot.active = true;
        slot.recipe_id = Some(recipe_id);
    }

    /// Back to default activation, every assignment dropped, then refilled.
    pub fn reset_full<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        *self = Self::create_default();
        self.fill_empty_slots(catalog, rng);
    }

    /// Keeps activation flags, drops every assignment, then refills.
    pub fn reset_assignments_only<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        for slot in self.slots.iter_mut() {
            slot.recipe_id = None;
        }
        self.fill_empty_slots(catalog, rng);
    }

    /// Clears assignments pointing past the end of `catalog`, e.g. after a
    /// refreshed sheet lost rows. Returns how many were cleared.
    pub fn forget_missing(&mut self, catalog: &Catalog) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if let Some(id) = slot.recipe_id {
                if !catalog.contains(id) {
                    slot.recipe_id = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }
}
