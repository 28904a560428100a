//! Configuration loading and representation.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const BIND_ADDR_VAR: &str = "STOREFRONT_BIND_ADDR";
pub const DATA_DIR_VAR: &str = "STOREFRONT_DATA_DIR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "./data";

/// Where the collection documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join("carts.json")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys fall back
    /// to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_VAR} is not a socket address: {bind_raw:?}"))?;

        let store = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(|dir| StoreConfig::new(dir))
            .unwrap_or_default();

        Ok(Self { bind_addr, store })
    }
}
