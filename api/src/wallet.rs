//! The seam between the panel and an injected EIP-1193 wallet provider.

use serde_json::Value;
use thiserror::Error;

use crate::ether_amount::ParseEtherError;

/// Provider error code for a request the user declined in the wallet.
pub const USER_REJECTED_REQUEST: i64 = 4001;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("no injected wallet provider found")]
    NoProvider,
    #[error("the wallet returned no accounts")]
    NoAccounts,
    /// An error object returned by the provider, e.g. code 4001 when the user rejects.
    #[error("wallet request failed ({code}): {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected response to {method}: {response}")]
    UnexpectedResponse { method: String, response: String },
    #[error("contract interface has no function {0}")]
    UnknownFunction(String),
    #[error("{0} is not payable")]
    NotPayable(String),
    #[error("transaction {0} reverted")]
    Reverted(String),
    #[error("invalid reward amount: {0}")]
    InvalidAmount(#[from] ParseEtherError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl WalletError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, WalletError::Rpc { code, .. } if *code == USER_REJECTED_REQUEST)
    }

    pub(crate) fn unexpected(method: &str, response: &Value) -> Self {
        WalletError::UnexpectedResponse {
            method: method.to_string(),
            response: response.to_string(),
        }
    }
}

/// A trait for a browser wallet that answers JSON-RPC style requests.
///
/// This is the `request({ method, params })` entry point of an EIP-1193
/// provider such as `window.ethereum`.
pub trait WalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// An account the provider has authorized, able to sign and send transactions.
#[derive(Clone, Debug)]
pub struct Signer<P> {
    provider: P,
    address: String,
}

impl<P: WalletProvider> Signer<P> {
    pub fn new(provider: P, address: impl Into<String>) -> Self {
        Self {
            provider,
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Shortens an address for display, e.g. `0x1234...abcd`.
///
/// Strings too short to abbreviate are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Parses a JSON-RPC hex quantity such as `"0x1b4"`.
pub(crate) fn parse_quantity(value: &Value) -> Option<u64> {
    let hex = value.as_str()?.strip_prefix("0x")?;
    u64::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncates_long_addresses() {
        assert_eq!(
            truncate_address("0x0a5be85d5437d8db3887de2acf64457c67030278"),
            "0x0a5b...0278"
        );
        assert_eq!(truncate_address("0x1234"), "0x1234");
        assert_eq!(truncate_address(""), "");
    }

    #[test]
    fn recognises_user_rejection() {
        let rejected = WalletError::Rpc {
            code: USER_REJECTED_REQUEST,
            message: "User denied transaction signature.".to_string(),
        };
        assert!(rejected.is_user_rejection());
        assert!(!WalletError::NoProvider.is_user_rejection());
    }

    #[test]
    fn parses_hex_quantities() {
        assert_eq!(parse_quantity(&json!("0x1b4")), Some(436));
        assert_eq!(parse_quantity(&json!("0x0")), Some(0));
        assert_eq!(parse_quantity(&json!("1b4")), None);
        assert_eq!(parse_quantity(&json!(436)), None);
    }
}
