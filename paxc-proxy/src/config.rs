//! Standard configuration module.

use serde_derive::Deserialize;
use paxc_util::{ConfigExt, crate_name};
use std::time::Duration;

fn default_listen() -> String {
    "127.0.0.1:3000".into()
}
fn default_api_base() -> String {
    "https://apis.data.go.kr/B551177/passgrAnncmt".into()
}
fn default_timeout_ms() -> u64 {
    10_000
}

/// `paxc-proxy` configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Base URL of the passenger forecast API (without `/getPassgrAnncmt`).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Data portal service key. Without it, the passenger endpoint refuses
    /// to work, but the server still starts.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Upstream request timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
    /// The service key, if one is set and isn't blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref()
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: default_listen(),
            api_base: default_api_base(),
            api_key: None,
            timeout_ms: default_timeout_ms()
        }
    }
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
}
