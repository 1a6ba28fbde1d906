pub mod cache;
pub mod loader;
pub mod recipe;

use std::io::Read;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::CatalogError;

pub use cache::CatalogCache;
pub use loader::{load_catalog, CatalogSource};
pub use recipe::{DurationClass, Recipe, RecipeId};

/// Positional columns every catalog must provide: name, ingredients,
/// instructions, favorite flag, duration label.
pub const REQUIRED_COLUMNS: usize = 5;

/// Immutable table of recipes. A recipe's id is its row position.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    extra_headers: Vec<String>,
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Parses CSV text. The first line is a header whose first five titles are
    /// ignored; rows the reader rejects, or that have more cells than the
    /// header, are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| CatalogError::Malformed(format!("unreadable header row: {}", e)))?
            .clone();
        let column_count = headers.len();
        if column_count < REQUIRED_COLUMNS {
            return Err(CatalogError::Malformed(format!(
                "expected at least {} columns, found {}",
                REQUIRED_COLUMNS, column_count
            )));
        }
        let extra_headers: Vec<String> = headers
            .iter()
            .skip(REQUIRED_COLUMNS)
            .map(str::to_string)
            .collect();

        let mut recipes = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(row = row_index, error = %e, "Skipping unreadable catalog row");
                    continue;
                }
            };
            if record.len() > column_count {
                warn!(
                    row = row_index,
                    cells = record.len(),
                    expected = column_count,
                    "Skipping catalog row with too many cells"
                );
                continue;
            }

            let cell = |i: usize| record.get(i).unwrap_or("");
            let extra = (REQUIRED_COLUMNS..column_count)
                .map(|i| cell(i).to_string())
                .collect();
            let id = recipes.len();
            recipes.push(Recipe::from_cells(
                id,
                cell(0),
                cell(1),
                cell(2),
                cell(3),
                cell(4),
                extra,
            ));
        }

        debug!(recipes = recipes.len(), "Parsed recipe catalog");
        Ok(Catalog {
            extra_headers,
            recipes,
        })
    }

    pub fn from_csv_str(text: &str) -> Result<Self, CatalogError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        id < self.recipes.len()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Header titles of the columns past the fifth.
    pub fn extra_headers(&self) -> &[String] {
        &self.extra_headers
    }
}
