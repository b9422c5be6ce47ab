//! Runtime configuration

use crate::cache::{CachePolicy, ResultCache, DEFAULT_CAPACITY};
use crate::error::LoadError;
use crate::search::SearchEngine;
use crate::store::PoliticianStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_DATA_PATH: &str = "data/politicians.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
/// Results returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on any caller-supplied limit
pub const MAX_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub cache_capacity: usize,
    pub cache_policy: CachePolicy,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cache_capacity: DEFAULT_CAPACITY,
            cache_policy: CachePolicy::default(),
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Apply the default and clamp into `[1, max_limit]`.
    ///
    /// Zero and negative limits become 1.
    pub fn clamp_limit(&self, requested: Option<i64>) -> usize {
        let max = self.max_limit.max(1);
        match requested {
            None => self.default_limit.clamp(1, max),
            Some(n) if n < 1 => 1,
            Some(n) => usize::try_from(n).map_or(max, |n| n.min(max)),
        }
    }

    /// Load the dataset and assemble a search engine with a fresh cache
    pub fn build_engine(&self) -> Result<SearchEngine, LoadError> {
        let store = PoliticianStore::load(&self.data_path)?;
        Ok(SearchEngine::new(
            Arc::new(store),
            ResultCache::new(self.cache_capacity, self.cache_policy),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::SAMPLE_DATA;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.cache_capacity, 256);
        assert_eq!(config.cache_policy, CachePolicy::RejectWhenFull);
    }

    #[test]
    fn test_clamp_limit() {
        let config = ServerConfig::default();
        assert_eq!(config.clamp_limit(None), 10);
        assert_eq!(config.clamp_limit(Some(0)), 1);
        assert_eq!(config.clamp_limit(Some(25)), 25);
        assert_eq!(config.clamp_limit(Some(500)), 50);
        assert_eq!(config.clamp_limit(Some(-1)), 1);
        assert_eq!(config.clamp_limit(Some(i64::MIN)), 1);
        assert_eq!(config.clamp_limit(Some(i64::MAX)), 50);
    }

    #[test]
    fn test_build_engine() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DATA.as_bytes()).unwrap();

        let config = ServerConfig {
            data_path: file.path().to_path_buf(),
            cache_capacity: 4,
            cache_policy: CachePolicy::EvictOldest,
            ..ServerConfig::default()
        };
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.store().len(), 9);
        assert_eq!(engine.cache().capacity(), 4);
    }

    #[test]
    fn test_build_engine_missing_file() {
        let config = ServerConfig {
            data_path: PathBuf::from("/nonexistent/politicians.json"),
            ..ServerConfig::default()
        };
        assert!(matches!(config.build_engine(), Err(LoadError::Io { .. })));
    }
}
