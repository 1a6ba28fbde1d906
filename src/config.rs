use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::CatalogSource;
use crate::cli::Cli;

pub const SOURCE_ENV_VAR: &str = "MENU_CSV_SOURCE";
pub const CACHE_TTL_ENV_VAR: &str = "MENU_CACHE_TTL_SECS";
pub const FETCH_TIMEOUT_ENV_VAR: &str = "MENU_FETCH_TIMEOUT_SECS";
pub const SEED_ENV_VAR: &str = "MENU_SEED";

/// Published "CSV" export of the shared recipe sheet.
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRS_LmTrrujM8a8RnMG4O0__lGPpl459PWmAulQLCCgoS01IZdgOQqGQblLmTqgrzumNCSfCI4zIetw/pub?gid=2493091&single=true&output=csv";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub source: CatalogSource,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub seed: Option<u64>,
}

impl MenuConfig {
    /// Command-line flags win over environment variables, which win over defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::resolve_with(cli, |key| env::var(key).ok())
    }

    pub fn resolve_with(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = cli
            .source
            .clone()
            .or_else(|| lookup(SOURCE_ENV_VAR))
            .unwrap_or_else(|| DEFAULT_CSV_URL.to_string());

        let cache_ttl = match cli.cache_ttl_secs {
            Some(secs) => Duration::from_secs(secs),
            None => parse_env_u64(&lookup, CACHE_TTL_ENV_VAR)?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CACHE_TTL),
        };
        let fetch_timeout = match cli.fetch_timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => parse_env_u64(&lookup, FETCH_TIMEOUT_ENV_VAR)?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
        };
        let seed = match cli.seed {
            Some(seed) => Some(seed),
            None => parse_env_u64(&lookup, SEED_ENV_VAR)?,
        };

        Ok(MenuConfig {
            source: CatalogSource::parse(&source),
            cache_ttl,
            fetch_timeout,
            seed,
        })
    }
}

fn parse_env_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("Environment variable {} must be a whole number, got '{}'", key, raw)),
        None => Ok(None),
    }
}
