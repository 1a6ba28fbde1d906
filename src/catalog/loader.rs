use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio::fs;
use tracing::info;

use super::Catalog;
use crate::error::CatalogError;

/// Where the recipe table comes from: a published CSV link or a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn fetch_text(source: &CatalogSource, timeout: Duration) -> Result<String, CatalogError> {
    let unreachable_because = |reason: String| CatalogError::Unreachable {
        location: source.to_string(),
        reason,
    };

    match source {
        CatalogSource::Url(url) => {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| unreachable_because(e.to_string()))?;
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| unreachable_because(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(unreachable_because(format!("HTTP status {}", status)));
            }
            response.text().await.map_err(|e| unreachable_because(e.to_string()))
        }
        CatalogSource::File(path) => fs::read_to_string(path)
            .await
            .map_err(|e| unreachable_because(e.to_string())),
    }
}

/// Fetches and parses the whole catalog. Nothing is returned unless every
/// step succeeded.
pub async fn load_catalog(
    source: &CatalogSource,
    timeout: Duration,
) -> Result<Catalog, CatalogError> {
    let text = fetch_text(source, timeout).await?;
    let catalog = Catalog::from_csv_str(&text)?;
    info!(source = %source, recipes = catalog.len(), "Loaded recipe catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            CatalogSource::parse(" https://example.com/sheet.csv "),
            CatalogSource::Url("https://example.com/sheet.csv".to_string())
        );
        assert_eq!(
            CatalogSource::parse("recipes.csv"),
            CatalogSource::File(PathBuf::from("recipes.csv"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_unreachable() {
        let source = CatalogSource::parse("this_catalog_does_not_exist.csv");
        let result = load_catalog(&source, Duration::from_secs(1)).await;
        match result {
            Err(CatalogError::Unreachable { location, .. }) => {
                assert_eq!(location, "this_catalog_does_not_exist.csv")
            }
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }
}
