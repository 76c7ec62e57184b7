//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use stratum_compile::{CompileConfig, DetectorDatabase};

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<CompileConfig> {
    let Some(path) = path else {
        return Ok(CompileConfig::default());
    };
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
    let config: CompileConfig = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid configuration: {}", path.display()))?;
    debug!("Loaded configuration {:?}", config);
    Ok(config)
}

/// Pick the database file: the explicit one, else the configured one.
pub fn database_path(config: &CompileConfig, file: Option<&Path>) -> Result<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| config.database_path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No database given and no database_path in the configuration")
        })
}

/// Load a detector database from a JSON file.
pub fn load_database(path: &Path) -> Result<DetectorDatabase> {
    if !path.exists() {
        anyhow::bail!("Database not found: {}", path.display());
    }
    DetectorDatabase::load(path)
        .with_context(|| format!("Failed to load database: {}", path.display()))
}
