use thiserror::Error;

use crate::plan::{Day, Moment};

/// Failures that prevent a recipe catalog from being built. Both are fatal to
/// a session: no plan is constructed without a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Recipe source '{location}' is unreachable: {reason}")]
    Unreachable { location: String, reason: String },

    #[error("Recipe table is malformed: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Every recipe is already used by another active slot. The slot was left as it was.
    #[error("No candidate recipe left for {day} {moment}")]
    NoCandidateAvailable { day: Day, moment: Moment },

    /// Rerolling only applies to meals that are switched on.
    #[error("{day} {moment} is switched off")]
    SlotInactive { day: Day, moment: Moment },
}
