use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::RecipeId;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Saturday | Day::Sunday)
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts English or French day names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" | "lundi" => Ok(Day::Monday),
            "tuesday" | "tue" | "mardi" => Ok(Day::Tuesday),
            "wednesday" | "wed" | "mercredi" => Ok(Day::Wednesday),
            "thursday" | "thu" | "jeudi" => Ok(Day::Thursday),
            "friday" | "fri" | "vendredi" => Ok(Day::Friday),
            "saturday" | "sat" | "samedi" => Ok(Day::Saturday),
            "sunday" | "sun" | "dimanche" => Ok(Day::Sunday),
            other => Err(format!("Unknown day '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Moment {
    Midday,
    Evening,
}

impl Moment {
    pub const ALL: [Moment; 2] = [Moment::Midday, Moment::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Moment::Midday => "midday",
            Moment::Evening => "evening",
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Moment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "midday" | "lunch" | "noon" | "midi" => Ok(Moment::Midday),
            "evening" | "dinner" | "soir" => Ok(Moment::Evening),
            other => Err(format!("Unknown meal moment '{}'", other)),
        }
    }
}

/// Observable state of a slot, derived from its activation flag and assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Inactive,
    ActiveEmpty,
    ActiveAssigned(RecipeId),
}

/// One (day, moment) cell of the week. An inactive slot may still hold the
/// recipe it had before being switched off.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub day: Day,
    pub moment: Moment,
    pub active: bool,
    pub recipe_id: Option<RecipeId>,
}

impl Slot {
    /// Evenings are always on; middays only on weekends.
    pub fn with_default_activation(day: Day, moment: Moment) -> Self {
        Slot {
            day,
            moment,
            active: moment == Moment::Evening || day.is_weekend(),
            recipe_id: None,
        }
    }

    pub fn state(&self) -> SlotState {
        match (self.active, self.recipe_id) {
            (false, _) => SlotState::Inactive,
            (true, None) => SlotState::ActiveEmpty,
            (true, Some(id)) => SlotState::ActiveAssigned(id),
        }
    }

    /// The recipe id, if this slot is active and assigned.
    pub fn active_recipe(&self) -> Option<RecipeId> {
        match self.state() {
            SlotState::ActiveAssigned(id) => Some(id),
            _ => None,
        }
    }
}
