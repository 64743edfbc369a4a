//! Configuration - String parameters for persistence components.
//!
//! Components receive a flat [`ConfigParams`] map with dotted keys
//! (`path`, `options.max_page_size`) and pick out the values they recognize.
//! [`PersistenceConfig`] is the typed, validated view of those keys.
//!
//! ## Example
//!
//! ```ignore
//! use record_store::{ConfigParams, Configurable};
//!
//! let config = ConfigParams::from_tuples(&[
//!     ("path", "./data/dummies.json"),
//!     ("options.max_page_size", "50"),
//! ]);
//! store.configure(&config)?;
//! ```

mod params;

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{PersistenceError, Result};

pub use params::ConfigParams;

pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// A component that accepts configuration parameters.
///
/// Takes `&self` so stores already shared between threads can be
/// configured before they are opened.
pub trait Configurable {
    fn configure(&self, config: &ConfigParams) -> Result<()>;
}

/// Typed view of the parameters recognized by the persistence components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub options: PersistenceOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceOptions {
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

impl Default for PersistenceOptions {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PersistenceConfig {
    /// Reads `path` and `options.max_page_size` from string parameters.
    pub fn from_params(config: &ConfigParams) -> Result<Self> {
        let mut cfg = Self {
            path: config.get("path").map(PathBuf::from),
            options: PersistenceOptions::default(),
        };
        let options = config.get_section("options");
        if let Some(max_page_size) = options.get_as_nullable_usize("max_page_size")? {
            cfg.options.max_page_size = max_page_size;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses a JSON document such as `{"path": "...", "options": {"max_page_size": 20}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| PersistenceError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.options.max_page_size == 0 {
            return Err(PersistenceError::Config(
                "options.max_page_size must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
