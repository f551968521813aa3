use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Backend endpoint serving the JSON array of reports.
pub const DEFAULT_REPORTS_URL: &str = "http://localhost:8080/api/reports";

/// Address of the deployed reports contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Account allowed to see owner-only affordances.
///
/// Compared literally (case-insensitive) against the connected account; it is
/// never validated as an address.
pub const DEFAULT_OWNER_ADDRESS: &str = "0x0a5be85d5437d8db3887de2acf64457c67030278";

const DEFAULT_CONFIRMATIONS: u64 = 1;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Everything the admin panel needs to know about its collaborators.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    pub reports_url: String,
    pub contract_address: String,
    pub owner_address: String,
    /// Confirmations to observe before a verification counts as done.
    pub confirmations: u64,
    /// Delay between receipt polls while waiting on a transaction.
    pub receipt_poll_interval: Duration,
}

impl AdminConfig {
    /// Creates an AdminConfig from build-time environment variables,
    /// falling back to the in-code defaults.
    ///
    /// The panel runs in a browser, which has no process environment, so the
    /// values are captured when the wasm binary is compiled.
    ///
    /// # Environment Variables
    /// - `REPORTS_API_URL`: endpoint returning the report list.
    /// - `REPORTS_CONTRACT_ADDRESS`: the contract exposing `verifyReport`.
    /// - `REPORTS_OWNER_ADDRESS`: account shown as contract owner.
    /// - `REPORTS_CONFIRMATIONS`: confirmations to wait for, at least 1.
    /// - `REPORTS_POLL_INTERVAL_MS`: receipt poll interval in milliseconds.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "REPORTS_API_URL" => option_env!("REPORTS_API_URL"),
            "REPORTS_CONTRACT_ADDRESS" => option_env!("REPORTS_CONTRACT_ADDRESS"),
            "REPORTS_OWNER_ADDRESS" => option_env!("REPORTS_OWNER_ADDRESS"),
            "REPORTS_CONFIRMATIONS" => option_env!("REPORTS_CONFIRMATIONS"),
            "REPORTS_POLL_INTERVAL_MS" => option_env!("REPORTS_POLL_INTERVAL_MS"),
            _ => None,
        })
    }

    fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let string_or = |key: &str, default: &str| {
            lookup(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        let confirmations = lookup("REPORTS_CONFIRMATIONS")
            .and_then(|s| u64::from_str(s.trim()).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONFIRMATIONS);

        let poll_ms = lookup("REPORTS_POLL_INTERVAL_MS")
            .and_then(|s| u64::from_str(s.trim()).ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        Self {
            reports_url: string_or("REPORTS_API_URL", DEFAULT_REPORTS_URL),
            contract_address: string_or("REPORTS_CONTRACT_ADDRESS", DEFAULT_CONTRACT_ADDRESS),
            owner_address: string_or("REPORTS_OWNER_ADDRESS", DEFAULT_OWNER_ADDRESS),
            confirmations,
            receipt_poll_interval: Duration::from_millis(poll_ms),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
