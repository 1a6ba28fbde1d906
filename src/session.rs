use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogCache, RecipeId};
use crate::error::{CatalogError, PlanError};
use crate::plan::{Day, Moment, Plan, Slot};
use crate::shopping::{self, ShoppingEntry};

/// Everything one user works with: the shared catalog, their own plan and the
/// RNG that drives every draw. Created once per session, dropped with it.
pub struct MenuSession {
    catalog: Arc<Catalog>,
    plan: Plan,
    rng: StdRng,
}

impl MenuSession {
    /// Builds the default plan and fills it.
    pub fn new(catalog: Arc<Catalog>, mut rng: StdRng) -> Self {
        let mut plan = Plan::create_default();
        plan.fill_empty_slots(&catalog, &mut rng);
        MenuSession { catalog, plan, rng }
    }

    /// Seeded sessions replay the same draws; `None` seeds from the OS.
    pub fn with_seed(catalog: Arc<Catalog>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(catalog, rng)
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn slot(&self, day: Day, moment: Moment) -> &Slot {
        self.plan.get_slot(day, moment)
    }

    /// Flips the slot's activation.
    pub fn toggle(&mut self, day: Day, moment: Moment) {
        let active = !self.plan.get_slot(day, moment).active;
        self.plan
            .toggle_active(day, moment, active, &self.catalog, &mut self.rng);
    }

    /// Returns the new recipe id. On error the slot is unchanged: either the
    /// catalog had nothing left to offer or the slot is switched off.
    pub fn reroll(&mut self, day: Day, moment: Moment) -> Result<RecipeId, PlanError> {
        self.plan
            .reroll(day, moment, &self.catalog, &mut self.rng)
            .map_err(|e| {
                debug!(error = %e, "Reroll left slot unchanged");
                e
            })
    }

    /// Returns `false`, changing nothing, if `recipe_id` is not in the catalog.
    pub fn manual_select(&mut self, day: Day, moment: Moment, recipe_id: RecipeId) -> bool {
        if !self.catalog.contains(recipe_id) {
            return false;
        }
        self.plan.set_manual(day, moment, recipe_id);
        true
    }

    pub fn reset(&mut self) {
        self.plan.reset_full(&self.catalog, &mut self.rng);
    }

    pub fn reset_assignments(&mut self) {
        self.plan
            .reset_assignments_only(&self.catalog, &mut self.rng);
    }

    pub fn shopping_list(&self) -> Vec<ShoppingEntry> {
        shopping::aggregate(&self.plan, &self.catalog)
    }

    /// Picks up a newer catalog if the cache's copy has gone stale. A fresh
    /// cache hands back the same `Arc` and nothing changes.
    pub async fn sync_catalog(&mut self, cache: &mut CatalogCache) -> Result<(), CatalogError> {
        let catalog = cache.get().await?;
        self.replace_catalog(catalog);
        Ok(())
    }

    /// Swaps in a refreshed catalog. Assignments whose row disappeared are
    /// dropped and the freed slots refilled; everything else stays put.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        if Arc::ptr_eq(&self.catalog, &catalog) {
            return;
        }
        self.catalog = catalog;
        let cleared = self.plan.forget_missing(&self.catalog);
        let filled = self.plan.fill_empty_slots(&self.catalog, &mut self.rng);
        info!(
            recipes = self.catalog.len(),
            cleared, filled, "Switched to refreshed catalog"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::SlotState;

    fn catalog(names: &[&str]) -> Arc<Catalog> {
        let mut text = String::from("Nom,Ingredients,Instructions,Favori,Temps\n");
        for name in names {
            text.push_str(&format!("{name},{name} stuff,cook,non,Moyen\n"));
        }
        Arc::new(Catalog::from_csv_str(&text).unwrap())
    }

    fn many(count: usize) -> Arc<Catalog> {
        let names: Vec<String> = (0..count).map(|i| format!("R{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        catalog(&refs)
    }

    #[test]
    fn test_new_session_is_filled() {
        let session = MenuSession::with_seed(many(20), Some(1));
        assert_eq!(session.plan().list_active_assigned().len(), 9);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let first = MenuSession::with_seed(many(30), Some(42));
        let second = MenuSession::with_seed(many(30), Some(42));
        assert_eq!(first.plan(), second.plan());
    }

    #[test]
    fn test_toggle_flips_activation() {
        let mut session = MenuSession::with_seed(many(20), Some(1));
        assert!(!session.slot(Day::Monday, Moment::Midday).active);
        session.toggle(Day::Monday, Moment::Midday);
        assert!(session.slot(Day::Monday, Moment::Midday).active);
        assert!(session.slot(Day::Monday, Moment::Midday).recipe_id.is_some());
        session.toggle(Day::Monday, Moment::Midday);
        assert!(!session.slot(Day::Monday, Moment::Midday).active);
    }

    #[test]
    fn test_manual_select_rejects_unknown_id() {
        let mut session = MenuSession::with_seed(many(20), Some(1));
        let before = session.plan().clone();
        assert!(!session.manual_select(Day::Monday, Moment::Evening, 20));
        assert_eq!(session.plan(), &before);
        assert!(session.manual_select(Day::Monday, Moment::Evening, 19));
        assert_eq!(
            session.slot(Day::Monday, Moment::Evening).recipe_id,
            Some(19)
        );
    }

    #[test]
    fn test_reroll_reports_exhaustion() {
        let mut session = MenuSession::with_seed(many(9), Some(3));
        let before = session.slot(Day::Friday, Moment::Evening).recipe_id;
        assert_eq!(
            session.reroll(Day::Friday, Moment::Evening),
            Err(PlanError::NoCandidateAvailable {
                day: Day::Friday,
                moment: Moment::Evening
            })
        );
        assert_eq!(session.slot(Day::Friday, Moment::Evening).recipe_id, before);
    }

    #[test]
    fn test_reroll_of_switched_off_meal_changes_nothing() {
        let mut session = MenuSession::with_seed(many(20), Some(1));
        let plan_before = session.plan().clone();
        let shopping_before = session.shopping_list();

        assert_eq!(
            session.reroll(Day::Monday, Moment::Midday),
            Err(PlanError::SlotInactive {
                day: Day::Monday,
                moment: Moment::Midday
            })
        );
        assert_eq!(session.plan(), &plan_before);
        assert_eq!(session.shopping_list(), shopping_before);

        session.toggle(Day::Monday, Moment::Midday);
        let id = session.reroll(Day::Monday, Moment::Midday).unwrap();
        assert_eq!(
            session.slot(Day::Monday, Moment::Midday).state(),
            SlotState::ActiveAssigned(id)
        );
    }

    #[test]
    fn test_replace_catalog_drops_vanished_rows() {
        let mut session = MenuSession::with_seed(many(9), Some(5));
        session.manual_select(Day::Monday, Moment::Evening, 8);

        session.replace_catalog(many(4));
        let plan = session.plan();
        assert!(plan
            .list_active_assigned()
            .iter()
            .all(|(_, _, id)| *id < 4));
        assert_eq!(plan.list_active_assigned().len(), 4);
        assert_eq!(plan.empty_active_count(), 5);
    }
}
