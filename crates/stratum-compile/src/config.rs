//! Compilation parameters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters shared by a compilation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Radius of the subtemplates used to look detectors up.
    pub manhattan_radius: usize,
    /// Scale parameter the templates are instantiated at.
    pub k: u32,
    /// Skip the cells holding plaquette index 0.
    pub avoid_zero_plaquettes: bool,
    /// Detector database to load, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            manhattan_radius: 2,
            k: 2,
            avoid_zero_plaquettes: true,
            database_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CompileConfig = serde_json::from_str(r#"{"k": 5}"#).unwrap();
        assert_eq!(config.k, 5);
        assert_eq!(config.manhattan_radius, 2);
        assert!(config.avoid_zero_plaquettes);
        assert!(config.database_path.is_none());
    }
}
