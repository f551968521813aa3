//! The connected-wallet session and how it is established.

use serde_json::json;

use crate::config::AdminConfig;
use crate::contract::ReportsContract;
use crate::contract::REPORTS_INTERFACE;
use crate::wallet::Signer;
use crate::wallet::WalletError;
use crate::wallet::WalletProvider;

/// A connected account plus the contract handle it signs for.
///
/// Lives only in memory; reloading the page or disconnecting drops it.
#[derive(Clone, Debug)]
pub struct WalletSession<P> {
    account: String,
    is_owner: bool,
    contract: ReportsContract<P>,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn is_owner(&self) -> bool {
        self.is_owner
    }

    pub fn contract(&self) -> &ReportsContract<P> {
        &self.contract
    }
}

/// Literal, case-insensitive comparison against the configured owner.
pub fn is_owner_account(account: &str, owner: &str) -> bool {
    account.to_lowercase() == owner.to_lowercase()
}

/// Asks the provider for account access and binds the contract to the first account.
pub async fn connect<P: WalletProvider>(
    provider: P,
    config: &AdminConfig,
) -> Result<WalletSession<P>, WalletError> {
    const METHOD: &str = "eth_requestAccounts";
    let response = provider.request(METHOD, json!([])).await?;
    let accounts = response
        .as_array()
        .ok_or_else(|| WalletError::unexpected(METHOD, &response))?;
    let account = match accounts.first() {
        Some(first) => first
            .as_str()
            .ok_or_else(|| WalletError::unexpected(METHOD, &response))?
            .to_string(),
        None => return Err(WalletError::NoAccounts),
    };

    let is_owner = is_owner_account(&account, &config.owner_address);
    let signer = Signer::new(provider, account.clone());
    let contract = ReportsContract::new(config.contract_address.clone(), REPORTS_INTERFACE, signer);

    dioxus_logger::tracing::info!("wallet connected: {account} (owner: {is_owner})");

    Ok(WalletSession {
        account,
        is_owner,
        contract,
    })
}

/// Either a live session or nothing; what the panel consults before offering
/// owner badges or verification.
#[derive(Clone, Debug)]
pub struct WalletState<P> {
    session: Option<WalletSession<P>>,
}

impl<P> Default for WalletState<P> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<P: WalletProvider> WalletState<P> {
    pub fn connected(session: WalletSession<P>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&WalletSession<P>> {
        self.session.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_owner(&self) -> bool {
        self.session.as_ref().is_some_and(WalletSession::is_owner)
    }

    pub fn contract(&self) -> Option<&ReportsContract<P>> {
        self.session.as_ref().map(WalletSession::contract)
    }

    /// Verification needs a contract binding to send through.
    pub fn can_verify(&self) -> bool {
        self.contract().is_some()
    }

    /// Forgets the session locally. Nothing is revoked at the provider.
    pub fn disconnect(&mut self) {
        self.session = None;
    }
}
