//! The admin panel's user actions, free of any rendering concerns.
//!
//! Every failure ends up as a [`Notice`] for the user; nothing here retries
//! and nothing mutates the report list in place.

use dioxus_logger::tracing::error;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;

use crate::config::AdminConfig;
use crate::ether_amount::EtherAmount;
use crate::report::Report;
use crate::report::ReportSource;
use crate::session;
use crate::session::WalletSession;
use crate::wallet::WalletError;
use crate::wallet::WalletProvider;

pub const FETCH_FAILED: &str = "Failed to fetch reports";
pub const CONNECTED: &str = "Wallet connected successfully!";
pub const CONNECT_FAILED: &str = "Failed to connect wallet";
pub const NO_PROVIDER: &str = "Please install MetaMask!";
pub const DISCONNECTED: &str = "Wallet disconnected";
pub const VERIFIED: &str = "Report verified successfully!";
pub const VERIFY_FAILED: &str = "Failed to verify the report";

/// Text of the reward prompt shown before a verification.
pub const REWARD_PROMPT: &str = "Enter reward amount (in ETH):";

/// A transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

/// Which evidence link, if any, is expanded. At most one at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvidencePreview {
    shown: Option<String>,
}

impl EvidencePreview {
    /// Shows `link`, or hides it if it is the one already shown.
    pub fn toggle(&mut self, link: &str) {
        if self.is_shown(link) {
            self.shown = None;
        } else {
            self.shown = Some(link.to_string());
        }
    }

    pub fn is_shown(&self, link: &str) -> bool {
        self.shown.as_deref() == Some(link)
    }
}

/// The one verification allowed in flight at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerificationSlot {
    in_flight: Option<u64>,
}

impl VerificationSlot {
    /// Claims the slot for `report_id`. False if another verification holds it.
    pub fn try_begin(&mut self, report_id: u64) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(report_id);
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = None;
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }
}

/// Fetches the full list. On failure the caller keeps whatever it had.
pub async fn load_reports<S: ReportSource>(source: &S) -> Result<Vec<Report>, Notice> {
    source.fetch_reports().await.map_err(|e| {
        error!("Error fetching reports: {e:#}");
        Notice::error(FETCH_FAILED)
    })
}

/// Logs a wallet failure, quietly if the user declined it in the wallet.
fn log_wallet_error(context: &str, e: &WalletError) {
    if e.is_user_rejection() {
        warn!("{context}: rejected in wallet");
    } else {
        error!("{context}: {e}");
    }
}

/// Connects through `provider`, or explains that there is none.
pub async fn connect_wallet<P: WalletProvider>(
    provider: Option<P>,
    config: &AdminConfig,
) -> (Option<WalletSession<P>>, Notice) {
    let Some(provider) = provider else {
        warn!("no injected wallet provider");
        return (None, Notice::error(NO_PROVIDER));
    };

    match session::connect(provider, config).await {
        Ok(session) => (Some(session), Notice::success(CONNECTED)),
        Err(e) => {
            log_wallet_error("Error connecting wallet", &e);
            (None, Notice::error(CONNECT_FAILED))
        }
    }
}

async fn send_verification<P: WalletProvider>(
    session: &WalletSession<P>,
    report_id: u64,
    amount_input: &str,
    config: &AdminConfig,
) -> Result<(), WalletError> {
    let reward: EtherAmount = amount_input.parse()?;
    let pending = session.contract().verify_report(report_id, reward).await?;
    let receipt = pending
        .wait(config.confirmations, config.receipt_poll_interval)
        .await?;
    info!(
        "report {report_id} verified for {} with {} in block {}",
        reward.to_string_with_unit(),
        receipt.hash,
        receipt.block_number
    );
    Ok(())
}

/// Verifies `report_id`, paying the amount the user typed, then refetches once.
///
/// `amount_input` is the raw prompt answer; a dismissed prompt (`None`) fails
/// like any other unparsable amount. The outcome notice goes to `notify` as
/// soon as it is known, so a confirmed verification is announced before the
/// refetch starts. Returns the refetched list, or `None` if nothing was
/// verified and therefore nothing refetched.
pub async fn verify_report<P: WalletProvider, S: ReportSource>(
    session: &WalletSession<P>,
    source: &S,
    report_id: u64,
    amount_input: Option<&str>,
    config: &AdminConfig,
    mut notify: impl FnMut(Notice),
) -> Option<Result<Vec<Report>, Notice>> {
    let amount_input = amount_input.unwrap_or_default();

    if let Err(e) = send_verification(session, report_id, amount_input, config).await {
        log_wallet_error(&format!("Error verifying report {report_id}"), &e);
        notify(Notice::error(VERIFY_FAILED));
        return None;
    }

    notify(Notice::success(VERIFIED));
    Some(load_reports(source).await)
}
