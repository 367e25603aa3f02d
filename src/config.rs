//! Configuration loader for the `aquaops-compliance` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Evaluation code never reads the environment; the
//! values here are threaded into it explicitly.
use std::{env, net::SocketAddr};

use anyhow::{anyhow, bail, Result};

use crate::alerts::{AlertPolicy, DUE_SOON_DAYS, URGENT_DAYS};
use crate::stats::RECENT_POOL_TEST_WINDOW;

/// Parse an optional variable into `$ty`, falling back to a default.
macro_rules! parse_var {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Day cutoffs for due-date maintenance alerts.
    pub alert_policy: AlertPolicy,

    /// Number of most recent pool tests the compliance rate covers.
    pub recent_pool_test_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            alert_policy: AlertPolicy::default(),
            recent_pool_test_window: RECENT_POOL_TEST_WINDOW,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `ALERT_DUE_SOON_DAYS` – days ahead a due-soon alert appears (default: 7)
/// - `ALERT_URGENT_DAYS` – due-soon alerts at or under this are medium (default: 3)
/// - `RECENT_POOL_TEST_WINDOW` – pool tests in the compliance rate (default: 10)
///
/// Returns an error if any variable is invalid.
pub fn load_from_env() -> Result<Config> {
    load_with(|name| env::var(name).ok())
}

/// Load configuration from an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let bind_addr = parse_var!(lookup, "BIND_ADDR", SocketAddr, default_bind_addr());
    let due_soon_days = parse_var!(lookup, "ALERT_DUE_SOON_DAYS", u32, DUE_SOON_DAYS as u32);
    let urgent_days = parse_var!(lookup, "ALERT_URGENT_DAYS", u32, URGENT_DAYS as u32);
    let recent_pool_test_window = parse_var!(
        lookup,
        "RECENT_POOL_TEST_WINDOW",
        usize,
        RECENT_POOL_TEST_WINDOW
    );

    if urgent_days > due_soon_days {
        bail!(
            "ALERT_URGENT_DAYS ({}) must not exceed ALERT_DUE_SOON_DAYS ({})",
            urgent_days,
            due_soon_days
        );
    }
    if recent_pool_test_window == 0 {
        return Err(anyhow!("RECENT_POOL_TEST_WINDOW must be at least 1"));
    }

    Ok(Config {
        bind_addr,
        alert_policy: AlertPolicy {
            due_soon_days: i64::from(due_soon_days),
            urgent_days: i64::from(urgent_days),
        },
        recent_pool_test_window,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR               : {}", self.bind_addr);
        tracing::info!("  ALERT_DUE_SOON_DAYS     : {}", self.alert_policy.due_soon_days);
        tracing::info!("  ALERT_URGENT_DAYS       : {}", self.alert_policy.urgent_days);
        tracing::info!("  RECENT_POOL_TEST_WINDOW : {}", self.recent_pool_test_window);
    }
}
