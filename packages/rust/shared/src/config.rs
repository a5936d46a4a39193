//! Application configuration for Signpost.
//!
//! User config lives at `~/.signpost/signpost.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignpostError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "signpost.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".signpost";

/// Catalogue name that selects the built-in questionnaire.
pub const BUILTIN_CATALOGUE: &str = "builtin";

// ---------------------------------------------------------------------------
// Config structs (matching signpost.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Registered catalogue files.
    #[serde(default)]
    pub catalogues: Vec<CatalogueRegistryEntry>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Catalogue to use: `builtin`, a registered name, or a file path.
    #[serde(default = "default_catalogue")]
    pub catalogue: String,

    /// Whether to list candidate outcomes while answering.
    #[serde(default)]
    pub show_candidates: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            catalogue: default_catalogue(),
            show_candidates: false,
        }
    }
}

fn default_catalogue() -> String {
    BUILTIN_CATALOGUE.into()
}

/// `[[catalogues]]` entry — a named catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueRegistryEntry {
    /// Name used with `--catalogue`.
    pub name: String,
    /// Path to a `.toml` or `.json` catalogue.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Catalogue selection (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Where the catalogue for a session comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for CatalogueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str(BUILTIN_CATALOGUE),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl AppConfig {
    /// Resolve which catalogue to load.
    ///
    /// `requested` (usually a CLI flag) wins over `defaults.catalogue`. The
    /// value is matched against `builtin`, then registry names, and is
    /// otherwise treated as a path.
    pub fn catalogue_source(&self, requested: Option<&str>) -> CatalogueSource {
        let name = requested.unwrap_or(self.defaults.catalogue.as_str());

        if name == BUILTIN_CATALOGUE {
            return CatalogueSource::Builtin;
        }

        let path = self
            .catalogues
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.path.as_str())
            .unwrap_or(name);

        CatalogueSource::File(expand_home(path))
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.signpost/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SignpostError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.signpost/signpost.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SignpostError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SignpostError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SignpostError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SignpostError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SignpostError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
