use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Loads the config from the files listed in `FOLIO_CONFIG_PATH`, falling
/// back to [`DEFAULT_CONFIG_PATH`].
pub fn load() -> anyhow::Result<Config> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => load_paths(&std::env::split_paths(&paths).collect::<Vec<_>>()),
        None => load_paths(&[DEFAULT_CONFIG_PATH]),
    }
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub relay: RelayConfig,
    pub contact: ContactConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub endpoint: Url,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient_name: String,
    pub fallback_email: String,
    pub rate_limit: Duration,
    pub message_min_len: usize,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the persisted key-value pairs.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                parse_duration_part(part).map(|part| total + part)
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

/// Parses a single `<number><unit>` component like `1500ms` or `7h`.
fn parse_duration_part(part: &str) -> Option<std::time::Duration> {
    let split = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(split);
    let value = value.parse::<u64>().ok()?;

    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return None,
    };

    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
}
