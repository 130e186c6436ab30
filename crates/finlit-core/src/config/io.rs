use super::models::AppConfig;
use super::tables::{ConfigTables, TABLE_NAMES};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse either the sectioned layout (`[appearance]`, `[reading]`, ...) or a
/// flat list of `AppConfig` keys.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let table: toml::Table = contents.parse().context("config is not valid TOML")?;
    let sectioned = TABLE_NAMES.iter().any(|name| table.contains_key(*name));
    if sectioned {
        let tables: ConfigTables =
            toml::from_str(contents).context("failed to read sectioned config")?;
        Ok(tables.into())
    } else {
        toml::from_str(contents).context("failed to read flat config")
    }
}

/// Render the config in the sectioned layout.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("failed to serialize config")
}

/// Write the config to `path` in the sectioned layout, creating parent dirs.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = serialize_config(config)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Saved config");
    Ok(())
}
