//! Defines the mutable, reactive state for the application's UI.

use api::session::WalletState;
use dioxus::prelude::*;

use crate::compat::InjectedProvider;

/// The wallet as the browser sees it: either connected through the injected
/// provider, or not.
pub type Wallet = WalletState<InjectedProvider>;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// This struct holds `Signal`s for any UI-related state that more than one
/// component reads. It is separate from the immutable `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The connected session, if any. Replaced wholesale on connect and disconnect.
    pub wallet: Signal<Wallet>,
}
