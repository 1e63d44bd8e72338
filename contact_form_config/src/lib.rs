use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of additional config files.
pub const CONFIG_PATH_ENV: &str = "CONTACT_FORM_CONFIG";

/// Load the default config file followed by every file listed in
/// `CONTACT_FORM_CONFIG`, later files taking precedence.
pub fn load() -> anyhow::Result<Config> {
    load_paths(&config_paths()[..])
}

pub fn config_paths() -> Vec<PathBuf> {
    let extra = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
    std::iter::once(PathBuf::from(DEFAULT_CONFIG_PATH))
        .chain(
            extra
                .split(':')
                .filter(|x| !x.is_empty())
                .map(PathBuf::from),
        )
        .collect()
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[] as &[&str])
}

/// Like [`load_paths`], but applies `overrides` (TOML snippets) on top of the
/// files.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[impl AsRef<str>],
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
        .fold(builder, |builder, x| {
            builder.add_source(File::from_str(x.as_ref(), FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub submission: SubmissionConfig,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionConfig {
    pub origin: Url,
    pub endpoint_override: Option<Url>,
}
