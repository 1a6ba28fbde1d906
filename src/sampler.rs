use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use crate::catalog::{Catalog, RecipeId};

/// Draws one recipe id among those not in `excluded`, with probability
/// proportional to each candidate's weight. Returns `None` when every recipe
/// is excluded. Each call is an independent draw.
pub fn pick<R: Rng + ?Sized>(
    catalog: &Catalog,
    excluded: &HashSet<RecipeId>,
    rng: &mut R,
) -> Option<RecipeId> {
    let candidates: Vec<(RecipeId, u32)> = catalog
        .recipes()
        .iter()
        .filter(|recipe| !excluded.contains(&recipe.id))
        .map(|recipe| (recipe.id, recipe.weight()))
        .collect();

    if candidates.is_empty() {
        debug!(excluded = excluded.len(), "No candidate recipe left to draw");
        return None;
    }

    // Weights are always >= 1, so the distribution cannot be rejected.
    let dist = WeightedIndex::new(candidates.iter().map(|(_, weight)| *weight)).ok()?;
    let (id, _) = candidates[dist.sample(rng)];
    Some(id)
}
