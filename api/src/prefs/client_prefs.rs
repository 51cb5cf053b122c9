use serde::Deserialize;
use serde::Serialize;
use std::env;

/// Node address used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Address whose balance is watched at startup.
pub const DEFAULT_WATCH_ADDRESS: &str = "miner-address";

/// Represents all client prefs.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ClientPrefs {
    api_base: String,
    watch_address: String,
}

impl ClientPrefs {
    pub fn new(api_base: impl Into<String>, watch_address: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            watch_address: watch_address.into(),
        }
    }

    /// Creates a ClientPrefs instance from environment variables,
    /// with in-code defaults.
    ///
    /// # Environment Variables
    /// - `LEDGER_API_BASE`: base URL of the ledger node.
    /// - `LEDGER_WATCH_ADDRESS`: address whose balance is shown first.
    ///
    /// Each is read from the process environment when one exists, then from
    /// the build environment (browser builds have no process environment).
    pub fn from_env() -> Self {
        let api_base = lookup(
            "LEDGER_API_BASE",
            option_env!("LEDGER_API_BASE"),
            DEFAULT_API_BASE,
        );
        let watch_address = lookup(
            "LEDGER_WATCH_ADDRESS",
            option_env!("LEDGER_WATCH_ADDRESS"),
            DEFAULT_WATCH_ADDRESS,
        );
        Self {
            api_base,
            watch_address,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn watch_address(&self) -> &str {
        &self.watch_address
    }
}

impl Default for ClientPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}

fn lookup(name: &str, build_time: Option<&'static str>, fallback: &str) -> String {
    let runtime = if cfg!(target_arch = "wasm32") {
        None
    } else {
        env::var(name).ok()
    };
    pick(runtime, build_time, fallback)
}

fn pick(runtime: Option<String>, build_time: Option<&str>, fallback: &str) -> String {
    runtime
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            build_time
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string())
}
