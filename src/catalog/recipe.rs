use serde::{Deserialize, Serialize};

/// Row index of a recipe in its catalog.
pub type RecipeId = usize;

/// Selection weight of a favorite recipe; everything else weighs 1.
pub const FAVORITE_WEIGHT: u32 = 3;
pub const DEFAULT_WEIGHT: u32 = 1;

// Spreadsheet values accepted as "yes" in the favorite column.
const TRUTHY_TOKENS: [&str; 4] = ["true", "vrai", "1", "oui"];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    Quick,
    Medium,
    Long,
    Unknown,
}

impl DurationClass {
    /// Maps a free-text duration label ("Rapide", "Moyen", "Long", or their
    /// English counterparts) onto a class. Anything else is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "rapide" | "quick" | "fast" => DurationClass::Quick,
            "moyen" | "medium" => DurationClass::Medium,
            "long" => DurationClass::Long,
            _ => DurationClass::Unknown,
        }
    }

    /// Badge used when displaying the class. Unknown labels fall back to the medium badge.
    pub fn badge(&self) -> &'static str {
        match self {
            DurationClass::Quick => "quick",
            DurationClass::Medium | DurationClass::Unknown => "medium",
            DurationClass::Long => "long",
        }
    }
}

pub fn is_truthy(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    TRUTHY_TOKENS.contains(&normalized.as_str())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    pub is_favorite: bool,
    pub duration_class: DurationClass,
    /// The duration cell exactly as it appeared in the sheet, trimmed.
    pub duration_label: String,
    /// Cells past the fifth column, kept for display only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Recipe {
    /// Builds a recipe from the five positional cells of a catalog row.
    pub fn from_cells(
        id: RecipeId,
        name: &str,
        ingredients: &str,
        instructions: &str,
        favorite: &str,
        duration: &str,
        extra: Vec<String>,
    ) -> Self {
        Recipe {
            id,
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            instructions: instructions.to_string(),
            is_favorite: is_truthy(favorite),
            duration_class: DurationClass::from_label(duration),
            duration_label: duration.trim().to_string(),
            extra,
        }
    }

    pub fn weight(&self) -> u32 {
        if self.is_favorite {
            FAVORITE_WEIGHT
        } else {
            DEFAULT_WEIGHT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_tokens_are_case_insensitive() {
        for value in ["true", "TRUE", "Vrai", "1", "oui", " Oui "] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "false", "non", "0", "yes", "nan"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn test_weight_follows_favorite_flag() {
        let favorite = Recipe::from_cells(0, "Soup", "leek", "boil", "VRAI", "Rapide", vec![]);
        let plain = Recipe::from_cells(1, "Stew", "beef", "simmer", "", "Long", vec![]);
        assert_eq!(favorite.weight(), 3);
        assert_eq!(plain.weight(), 1);
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(DurationClass::from_label(" Rapide "), DurationClass::Quick);
        assert_eq!(DurationClass::from_label("moyen"), DurationClass::Medium);
        assert_eq!(DurationClass::from_label("LONG"), DurationClass::Long);
        assert_eq!(DurationClass::from_label("20 min"), DurationClass::Unknown);
        assert_eq!(DurationClass::Unknown.badge(), "medium");
    }
}
