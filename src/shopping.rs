use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::plan::Plan;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShoppingEntry {
    pub recipe_name: String,
    /// Ingredient text exactly as written in the catalog.
    pub ingredients: String,
}

/// One entry per active, assigned slot, in day-then-moment order. Ingredient
/// text is passed through untouched: no parsing, merging or deduplication.
pub fn aggregate(plan: &Plan, catalog: &Catalog) -> Vec<ShoppingEntry> {
    plan.list_active_assigned()
        .into_iter()
        .filter_map(|(day, moment, id)| match catalog.get(id) {
            Some(recipe) => Some(ShoppingEntry {
                recipe_name: recipe.name.clone(),
                ingredients: recipe.ingredients.clone(),
            }),
            None => {
                warn!(day = %day, moment = %moment, recipe_id = id, "Assigned recipe missing from catalog");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Day, Moment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn soup_catalog() -> Catalog {
        Catalog::from_csv_str(
            "Nom,Ingredients,Instructions,Favori,Temps\n\
             Soup,\"leek, potato\",Simmer,non,Rapide\n\
             Stew,\"beef, carrot\",Braise,oui,Long\n",
        )
        .unwrap()
    }

    fn all_inactive(catalog: &Catalog) -> Plan {
        let mut rng = StdRng::seed_from_u64(0);
        let mut plan = Plan::create_default();
        for slot in plan.slots().to_vec() {
            plan.toggle_active(slot.day, slot.moment, false, catalog, &mut rng);
        }
        plan
    }

    #[test]
    fn test_single_assigned_slot() {
        let catalog = soup_catalog();
        let mut plan = all_inactive(&catalog);
        plan.set_manual(Day::Monday, Moment::Evening, 0);

        assert_eq!(
            aggregate(&plan, &catalog),
            vec![ShoppingEntry {
                recipe_name: "Soup".to_string(),
                ingredients: "leek, potato".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_active_slots_gives_empty_list() {
        let catalog = soup_catalog();
        let plan = all_inactive(&catalog);
        assert!(aggregate(&plan, &catalog).is_empty());
    }

    #[test]
    fn test_duplicates_are_listed_twice_in_slot_order() {
        let catalog = soup_catalog();
        let mut plan = all_inactive(&catalog);
        plan.set_manual(Day::Sunday, Moment::Evening, 0);
        plan.set_manual(Day::Monday, Moment::Evening, 1);
        plan.set_manual(Day::Sunday, Moment::Midday, 0);

        let names: Vec<String> = aggregate(&plan, &catalog)
            .into_iter()
            .map(|entry| entry.recipe_name)
            .collect();
        assert_eq!(names, vec!["Stew", "Soup", "Soup"]);
    }
}
