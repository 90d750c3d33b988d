use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use inquiry_models::email_address::EmailAddress;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable naming an additional config file that is layered on
/// top of the default one.
pub const EXTRA_CONFIG_ENV: &str = "INQUIRY_CONFIG";

/// Loads the default config file and the file referenced by
/// [`EXTRA_CONFIG_ENV`], if set.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Some(extra) = std::env::var_os(EXTRA_CONFIG_ENV) {
        paths.push(extra.into());
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Loads the given config files and finally applies the inline toml
/// `overrides`.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of the owner notification
    pub email: EmailAddress,
    /// Sender display name of the acknowledgment mail
    pub site_name: String,
    pub rate_limit: Duration,
    pub acknowledgment: bool,
    pub log_path: Option<PathBuf>,
}
