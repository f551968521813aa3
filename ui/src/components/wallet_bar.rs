use api::panel;
use api::panel::Notice;
use api::session::WalletState;
use api::wallet::truncate_address;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::compat;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::hooks::use_toaster::use_toaster;

/// Connect/disconnect control with the connected account and owner badge.
#[component]
pub fn WalletBar() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut toaster = use_toaster();
    let mut connecting = use_signal(|| false);

    let connected = {
        let wallet = app_state_mut.wallet.read();
        wallet
            .session()
            .map(|s| (s.account().to_string(), wallet.is_owner()))
    };

    rsx! {
        div {
            class: "wallet-bar",
            match connected {
                Some((account, is_owner)) => rsx! {
                    Button {
                        button_type: ButtonType::Danger,
                        on_click: move |_| {
                            app_state_mut.wallet.write().disconnect();
                            toaster.notify(Notice::success(panel::DISCONNECTED));
                        },
                        "👛 Disconnect Wallet"
                    }
                    WalletStatus { account, is_owner }
                },
                None => rsx! {
                    Button {
                        busy: connecting(),
                        on_click: move |_| {
                            let config = app_state.config.clone();
                            spawn(async move {
                                connecting.set(true);
                                let (session, notice) =
                                    panel::connect_wallet(compat::injected_provider(), &config).await;
                                if let Some(session) = session {
                                    app_state_mut.wallet.set(WalletState::connected(session));
                                }
                                connecting.set(false);
                                toaster.notify(notice);
                            });
                        },
                        "👛 Connect Wallet"
                    }
                },
            }
        }
    }
}

/// The connected account, abbreviated, and the owner badge when it applies.
#[component]
pub fn WalletStatus(account: String, is_owner: bool) -> Element {
    rsx! {
        p {
            class: "wallet-account",
            title: "{account}",
            "Connected: {truncate_address(&account)}"
        }
        if is_owner {
            p { class: "owner-badge", "Contract Owner" }
        }
    }
}

#[cfg(test)]
mod tests {
    use api::config::DEFAULT_OWNER_ADDRESS;
    use api::session::is_owner_account;
    use dioxus_core::VirtualDom;

    use super::*;

    fn render(account: &str) -> String {
        let is_owner = is_owner_account(account, DEFAULT_OWNER_ADDRESS);
        let mut dom = VirtualDom::new_with_props(
            WalletStatus,
            WalletStatusProps {
                account: account.to_string(),
                is_owner,
            },
        );
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn owner_sees_the_owner_badge() {
        let html = render("0x0A5BE85D5437D8DB3887DE2ACF64457C67030278");
        assert!(html.contains("Contract Owner"));
        assert!(html.contains("Connected: 0x0A5B...0278"));
    }

    #[test]
    fn other_accounts_get_no_badge() {
        let html = render("0x00000000000000000000000000000000000000bb");
        assert!(!html.contains("Contract Owner"));
        assert!(html.contains("Connected: 0x0000...00bb"));
    }
}
