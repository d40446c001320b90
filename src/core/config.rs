//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tagscan/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::NfcSupport;
use crate::core::router::{Route, ScreenName};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TagscanConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub screens: ScreensConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulatorConfig {
    pub nfc_support: Option<NfcSupport>,
    pub failure_reason: Option<String>,
    pub fail_start: Option<String>,
    pub probe_delay_ms: Option<u64>,
    #[serde(default)]
    pub sample_tags: Vec<String>,
    #[serde(default)]
    pub sample_codes: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScreensConfig {
    pub home_title: Option<String>,
    pub nfc_title: Option<String>,
    pub qr_title: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PROBE_DELAY_MS: u64 = 300;
pub const DEFAULT_FAILURE_REASON: &str = "NFC service did not respond";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

const DEFAULT_SAMPLE_TAGS: &[&str] = &["04a224b2c85e80", "04a2", "deadbeef", "04:a2:24"];
const DEFAULT_SAMPLE_CODES: &[&str] = &[
    "https://example.com",
    "WIFI:S:guest;T:WPA;P:correct-horse;;",
    "hello from a QR code",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub nfc_support: NfcSupport,
    pub failure_reason: String,
    pub fail_start: Option<String>,
    pub probe_delay_ms: u64,
    pub sample_tags: Vec<String>,
    pub sample_codes: Vec<String>,
    pub routes: Vec<Route>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tagscan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tagscan").join("config.toml"))
}

/// Load config from `~/.tagscan/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TagscanConfig::default()`.
pub fn load_config() -> Result<TagscanConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TagscanConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if absent.
pub fn load_config_from(path: &Path) -> Result<TagscanConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TagscanConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TagscanConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tagscan Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [simulator]
# nfc_support = "supported"          # "supported", "unsupported" or "failing"
# failure_reason = "NFC service did not respond"
# fail_start = "radio busy"          # Make start() reject after a positive probe
# probe_delay_ms = 300
# sample_tags = ["04a224b2c85e80", "04a2", "deadbeef"]
# sample_codes = ["https://example.com"]

# [screens]
# home_title = "Home"
# nfc_title = "NFC"
# qr_title = "QR"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_support` and `cli_probe_delay_ms` are from CLI flags (None = not specified).
pub fn resolve(
    config: &TagscanConfig,
    cli_support: Option<NfcSupport>,
    cli_probe_delay_ms: Option<u64>,
) -> ResolvedConfig {
    // Support mode: CLI → env → config → default
    let nfc_support = cli_support
        .or_else(|| {
            std::env::var("TAGSCAN_NFC_SUPPORT")
                .ok()
                .and_then(|v| NfcSupport::parse(&v))
        })
        .or_else(|| config.simulator.nfc_support.clone())
        .unwrap_or_default();

    // Probe delay: CLI → env → config → default
    let probe_delay_ms = cli_probe_delay_ms
        .or_else(|| {
            std::env::var("TAGSCAN_PROBE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.simulator.probe_delay_ms)
        .unwrap_or(DEFAULT_PROBE_DELAY_MS);

    // Log level: env → config → default
    let log_level = std::env::var("TAGSCAN_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level '{}', using default", level);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        log_level,
        nfc_support,
        failure_reason: config
            .simulator
            .failure_reason
            .clone()
            .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string()),
        fail_start: config.simulator.fail_start.clone(),
        probe_delay_ms,
        sample_tags: or_defaults(&config.simulator.sample_tags, DEFAULT_SAMPLE_TAGS),
        sample_codes: or_defaults(&config.simulator.sample_codes, DEFAULT_SAMPLE_CODES),
        routes: resolve_routes(&config.screens),
    }
}

fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.to_vec()
    }
}

/// Builds the route table with configured titles.
fn resolve_routes(screens: &ScreensConfig) -> Vec<Route> {
    let title = |configured: &Option<String>, default: &str| {
        configured
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    vec![
        Route::new(ScreenName::Home, title(&screens.home_title, "Home")),
        Route::new(ScreenName::Nfc, title(&screens.nfc_title, "NFC")),
        Route::new(ScreenName::Qr, title(&screens.qr_title, "QR")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TagscanConfig::default();
        assert!(config.simulator.sample_tags.is_empty());
        assert!(config.simulator.nfc_support.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TagscanConfig::default();
        let resolved = resolve(&config, None, Some(0));
        assert_eq!(resolved.failure_reason, DEFAULT_FAILURE_REASON);
        assert_eq!(resolved.sample_tags.len(), DEFAULT_SAMPLE_TAGS.len());
        assert_eq!(resolved.sample_codes[0], "https://example.com");
        assert!(resolved.fail_start.is_none());
        let titles: Vec<&str> = resolved.routes.iter().map(|r| r.options.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "NFC", "QR"]);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TagscanConfig {
            simulator: SimulatorConfig {
                nfc_support: Some(NfcSupport::Unsupported),
                probe_delay_ms: Some(900),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(NfcSupport::Failing), Some(5));
        assert_eq!(resolved.nfc_support, NfcSupport::Failing);
        assert_eq!(resolved.probe_delay_ms, 5);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "info"

[simulator]
nfc_support = "unsupported"
failure_reason = "no adapter"
probe_delay_ms = 10
sample_tags = ["0102"]
sample_codes = ["one", "two"]

[screens]
nfc_title = "Tags"
"#;
        let config: TagscanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.simulator.nfc_support, Some(NfcSupport::Unsupported));
        assert_eq!(config.simulator.sample_tags, vec!["0102"]);

        let resolved = resolve(&config, None, Some(0));
        assert_eq!(resolved.failure_reason, "no adapter");
        assert_eq!(resolved.sample_codes, vec!["one", "two"]);
        assert_eq!(resolved.routes[1].options.title, "Tags");
        assert_eq!(resolved.routes[2].options.title, "QR");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[screens]
home_title = "Start"
"#;
        let config: TagscanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.screens.home_title.as_deref(), Some("Start"));
        assert!(config.simulator.nfc_support.is_none());
        assert!(config.simulator.sample_codes.is_empty());
    }

    #[test]
    fn test_blank_title_falls_back() {
        let screens = ScreensConfig {
            qr_title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_routes(&screens)[2].options.title, "QR");
    }

    #[test]
    fn test_unknown_support_mode_is_parse_error() {
        let result: Result<TagscanConfig, _> = toml::from_str("[simulator]\nnfc_support = \"maybe\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_generates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.simulator.sample_tags.is_empty());
        assert!(path.exists());

        // The generated file is all comments and parses back to defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.general.log_level.is_none());
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[simulator\nbroken").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
