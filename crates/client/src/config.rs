//! Client configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

use crate::listing::DisplayOrder;

pub const API_URL_VAR: &str = "STOREFRONT_API_URL";
pub const STORAGE_PATH_VAR: &str = "STOREFRONT_STORAGE_PATH";
pub const SHUFFLE_VAR: &str = "STOREFRONT_SHUFFLE";
pub const TIMEOUT_VAR: &str = "STOREFRONT_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root of the REST API; endpoint paths are joined onto it.
    pub api_url: Url,
    /// File backing the client's local storage.
    pub storage_path: PathBuf,
    pub display_order: DisplayOrder,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (environment-like key access).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .with_context(|| format!("{API_URL_VAR} is not a valid URL: {raw_url}"))?;

        let storage_path = match lookup(STORAGE_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()?,
        };

        let display_order = match lookup(SHUFFLE_VAR).as_deref() {
            None => DisplayOrder::Shuffled,
            Some("1" | "true" | "yes") => DisplayOrder::Shuffled,
            Some("0" | "false" | "no") => DisplayOrder::AsReceived,
            Some(other) => anyhow::bail!("{SHUFFLE_VAR} must be true or false, got {other:?}"),
        };

        let request_timeout = lookup(TIMEOUT_VAR)
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))
            })
            .transpose()?;

        Ok(Self {
            api_url,
            storage_path,
            display_order,
            request_timeout,
        })
    }
}

/// `<data dir>/storefront/local_storage.json`.
pub fn default_storage_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        }))
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("storefront");
    path.push("local_storage.json");

    Ok(path)
}
