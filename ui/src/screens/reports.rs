use api::panel;
use api::panel::EvidencePreview;
use api::panel::VerificationSlot;
use api::report::Report;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::compat;
use crate::components::pico::Card;
use crate::components::report_list::ReportList;
use crate::hooks::use_toaster::use_toaster;

#[component]
pub fn ReportsScreen() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let mut toaster = use_toaster();

    let mut reports = use_signal(Vec::<Report>::new);
    let mut loading = use_signal(|| true);
    let mut preview = use_signal(EvidencePreview::default);
    let mut verifying = use_signal(VerificationSlot::default);

    // one fetch on mount; the list is only ever replaced wholesale.
    let state = app_state.clone();
    use_future(move || {
        let state = state.clone();
        async move {
            loading.set(true);
            match panel::load_reports(&state.reports).await {
                Ok(list) => reports.set(list),
                Err(notice) => toaster.notify(notice),
            }
            loading.set(false);
        }
    });

    let on_toggle_evidence = use_callback(move |link: String| preview.write().toggle(&link));

    let state = app_state.clone();
    let on_verify = use_callback(move |report_id: u64| {
        let Some(session) = app_state_mut.wallet.read().session().cloned() else {
            return;
        };
        // claimed before spawning so a second click cannot slip in first.
        if !verifying.write().try_begin(report_id) {
            return;
        }
        let amount = compat::prompt(panel::REWARD_PROMPT);
        let state = state.clone();
        spawn(async move {
            let refreshed = panel::verify_report(
                &session,
                &state.reports,
                report_id,
                amount.as_deref(),
                &state.config,
                |notice| toaster.notify(notice),
            )
            .await;
            verifying.write().finish();

            match refreshed {
                Some(Ok(list)) => reports.set(list),
                Some(Err(notice)) => toaster.notify(notice),
                None => {}
            }
        });
    });

    let can_verify = app_state_mut.wallet.read().can_verify();

    if loading() {
        return rsx! {
            Card {
                h3 { "Reports" }
                p { "Loading..." }
                progress {}
            }
        };
    }

    rsx! {
        ReportList {
            reports: reports(),
            preview: preview(),
            verifying: verifying().in_flight(),
            can_verify,
            on_toggle_evidence,
            on_verify,
        }
    }
}
