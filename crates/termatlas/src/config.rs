//! Engine configuration types.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a single unification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifyConfig {
    /// Maximum recursion depth of the unifier. `None` means unbounded; the
    /// depth is then limited only by the nesting of the input terms.
    pub max_depth: Option<usize>,
}

/// Configuration for forward chaining over a knowledge base.
///
/// The unifier used while chaining is configured separately, through
/// [`Config::unify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Maximum number of saturation rounds (0 means no limit)
    pub max_iterations: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            max_iterations: 1000,
        }
    }
}

/// Top-level configuration as loaded by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shared by plain unification problems and forward chaining
    pub unify: UnifyConfig,
    pub chain: ChainConfig,
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
