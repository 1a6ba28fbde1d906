use std::fmt::Write;

use serde::Serialize;

use crate::catalog::{Catalog, DurationClass, Recipe, RecipeId};
use crate::plan::{Day, Moment, Plan, SlotState};
use crate::shopping::ShoppingEntry;

/// What a slot shows, ready for JSON output.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SlotView {
    pub day: Day,
    pub moment: Moment,
    pub recipe_id: RecipeId,
    pub name: String,
    pub favorite: bool,
    pub duration: DurationClass,
    pub duration_label: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlanSnapshot {
    pub meals: Vec<SlotView>,
    /// Active slots the catalog could not fill.
    pub empty: Vec<(Day, Moment)>,
    pub shopping_list: Vec<ShoppingEntry>,
}

impl PlanSnapshot {
    pub fn build(plan: &Plan, catalog: &Catalog, shopping_list: Vec<ShoppingEntry>) -> Self {
        let mut meals = Vec::new();
        let mut empty = Vec::new();
        for slot in plan.slots() {
            match slot.state() {
                SlotState::ActiveAssigned(id) => {
                    if let Some(recipe) = catalog.get(id) {
                        meals.push(SlotView {
                            day: slot.day,
                            moment: slot.moment,
                            recipe_id: id,
                            name: recipe.name.clone(),
                            favorite: recipe.is_favorite,
                            duration: recipe.duration_class,
                            duration_label: recipe.duration_label.clone(),
                        });
                    }
                }
                SlotState::ActiveEmpty => empty.push((slot.day, slot.moment)),
                SlotState::Inactive => {}
            }
        }
        PlanSnapshot {
            meals,
            empty,
            shopping_list,
        }
    }
}

fn recipe_line(recipe: &Recipe) -> String {
    let star = if recipe.is_favorite { "★ " } else { "" };
    let label = if recipe.duration_label.is_empty() {
        "?"
    } else {
        recipe.duration_label.as_str()
    };
    format!(
        "{}{} [{}: {}] (#{})",
        star,
        recipe.name,
        recipe.duration_class.badge(),
        label,
        recipe.id
    )
}

/// The week, one day header followed by its active meals.
pub fn render_plan(plan: &Plan, catalog: &Catalog) -> String {
    let mut out = String::new();
    for day in Day::ALL {
        let _ = writeln!(out, "{}", day);
        let mut any = false;
        for moment in Moment::ALL {
            let slot = plan.get_slot(day, moment);
            match slot.state() {
                SlotState::Inactive => continue,
                SlotState::ActiveEmpty => {
                    let _ = writeln!(out, "  {:<8} (no recipe left)", moment.name());
                }
                SlotState::ActiveAssigned(id) => match catalog.get(id) {
                    Some(recipe) => {
                        let _ = writeln!(out, "  {:<8} {}", moment.name(), recipe_line(recipe));
                    }
                    None => {
                        let _ = writeln!(out, "  {:<8} (unknown recipe #{})", moment.name(), id);
                    }
                },
            }
            any = true;
        }
        if !any {
            let _ = writeln!(out, "  -");
        }
    }
    out
}

pub fn render_shopping_list(entries: &[ShoppingEntry]) -> String {
    if entries.is_empty() {
        return "Shopping list: nothing planned.\n".to_string();
    }
    let mut out = String::from("Shopping list:\n");
    for entry in entries {
        let _ = writeln!(out, "- {}: {}", entry.recipe_name, entry.ingredients);
    }
    out
}

pub fn render_recipe(recipe: &Recipe, extra_headers: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe_line(recipe));
    let _ = writeln!(out, "  Ingredients:  {}", recipe.ingredients);
    let _ = writeln!(out, "  Instructions: {}", recipe.instructions);
    for (header, value) in extra_headers.iter().zip(&recipe.extra) {
        if !value.trim().is_empty() {
            let _ = writeln!(out, "  {}: {}", header, value);
        }
    }
    out
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for recipe in catalog.recipes() {
        let _ = writeln!(out, "{}", recipe_line(recipe));
    }
    out
}
