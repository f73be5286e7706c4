// Runtime configuration.
// Resolves the caching flag, cache directory, and optional API token.

use std::env;
use std::path::PathBuf;

use crate::cache::paths;
use crate::error::{CardsError, Result};

/// Overrides the cache directory.
pub const CACHE_DIR_ENV: &str = "REPOCARDS_CACHE_DIR";
/// Optional bearer token; requests are anonymous without it.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub caching: bool,
    pub cache_dir: PathBuf,
    pub token: Option<String>,
}

impl Config {
    /// Build from the environment.
    pub fn from_env(caching: bool) -> Result<Self> {
        Self::resolve(
            caching,
            env::var_os(CACHE_DIR_ENV).map(PathBuf::from),
            env::var(TOKEN_ENV).ok(),
        )
    }

    pub fn resolve(
        caching: bool,
        cache_dir: Option<PathBuf>,
        token: Option<String>,
    ) -> Result<Self> {
        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => paths::cache_dir().ok_or(CardsError::NoCacheDir)?,
        };

        Ok(Self {
            caching,
            cache_dir,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn entries_dir(&self) -> PathBuf {
        paths::entries_dir(&self.cache_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        paths::log_path(&self.cache_dir)
    }
}

/// Parse the start-up caching flag. Only the literals `true` and `false` are
/// accepted; anything else, including no value, is an error.
pub fn parse_caching_flag(raw: Option<&str>) -> Result<bool> {
    match raw {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        other => Err(CardsError::InvalidCachingFlag(other.map(String::from))),
    }
}
