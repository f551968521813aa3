// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
mod screens;

use api::config::AdminConfig;
use api::session::WalletState;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Container;
use components::toaster::ToastStack;
use components::wallet_bar::WalletBar;
use hooks::use_toaster::Toaster;
use screens::reports::ReportsScreen;

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let panel_css = r#"
    /* --- PAGE --- */
    body { background-color: var(--pico-muted-border-color); }
    .app-title { text-align: center; margin: 2rem 0 1.5rem; }

    /* --- WALLET --- */
    .wallet-bar { display: flex; flex-direction: column; align-items: center; margin-bottom: 2rem; }
    .wallet-account { margin: 0.5rem 0 0; font-size: 0.875rem; color: var(--pico-muted-color); }
    .owner-badge { margin: 0.25rem 0 0; font-size: 0.75rem; font-weight: 600; color: #16a34a; }

    /* --- BUTTONS --- */
    button.danger { background-color: #ef4444; border-color: #ef4444; color: #fff; }
    button.danger:hover { background-color: #dc2626; border-color: #dc2626; }

    /* --- REPORT CARDS --- */
    .report-card { animation: rise-in 0.3s ease-out; }
    .report-card-header { display: flex; justify-content: space-between; align-items: center; }
    .report-card-header h4 { margin: 0; }
    .report-facts { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem; font-size: 0.875rem; color: var(--pico-muted-color); }
    .report-facts .truncate { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
    .report-card p { margin-top: 0.75rem; font-size: 0.875rem; }
    .report-card-footer { display: flex; justify-content: space-between; align-items: center; }
    .evidence-preview { margin-top: 1rem; animation: unfold 0.3s ease-out; overflow: hidden; }
    .evidence-preview img { max-width: 100%; height: auto; border-radius: var(--pico-border-radius); }

    .badge { padding: 0.125rem 0.5rem; border-radius: 999px; font-size: 0.75rem; font-weight: 600; }
    .badge-positive { background-color: #dcfce7; color: #166534; }
    .badge-pending { background-color: #fef9c3; color: #854d0e; }

    /* --- EMPTY STATE --- */
    .empty-state { display: flex; flex-direction: column; align-items: center; padding: 2rem; text-align: center;
        color: var(--pico-muted-color); border: 2px dashed var(--pico-card-border-color); border-radius: var(--pico-border-radius); }
    .empty-state-icon { font-size: 3rem; margin-bottom: 1rem; opacity: 0.8; }

    /* --- TOASTS --- */
    .toaster { position: fixed; top: 1rem; right: 1rem; z-index: 1000; display: flex; flex-direction: column; gap: 0.5rem; }
    .toast { padding: 0.75rem 1rem; border-radius: var(--pico-border-radius); background: var(--pico-card-background-color);
        box-shadow: 0 4px 12px rgba(0,0,0,0.15); cursor: pointer; animation: rise-in 0.2s ease-out; max-width: 22rem; }
    .toast-success { border-left: 4px solid #22c55e; }
    .toast-error { border-left: 4px solid #ef4444; }

    @keyframes rise-in { from { opacity: 0; transform: translateY(20px); } to { opacity: 1; transform: none; } }
    @keyframes unfold { from { opacity: 0; max-height: 0; } to { opacity: 1; max-height: 100vh; } }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{panel_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // Provide the stable, non-reactive AppState.
    use_context_provider(|| AppState::new(AdminConfig::from_env()));

    // Create signals for mutable state at the top level of the component.
    let wallet_signal = use_signal(WalletState::default);
    use_context_provider(|| AppStateMut {
        wallet: wallet_signal,
    });

    let toasts_signal = use_signal(Vec::new);
    let next_toast_id = use_signal(|| 0);
    use_context_provider(|| Toaster::new(toasts_signal, next_toast_id));

    rsx! {
        ToastStack {}
        Container {
            h1 {
                class: "app-title",
                "Admin Panel"
            }
            WalletBar {}
            ReportsScreen {}
        }
    }
}
