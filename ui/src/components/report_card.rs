use api::report::Report;
use api::wallet::truncate_address;
use dioxus::prelude::*;

use crate::components::pico::Badge;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;

/// One report, with its evidence toggle and, while unverified, a verify button.
///
/// `verifying` marks a verification in flight for this report; `can_verify`
/// is false while no wallet is connected.
#[component]
pub fn ReportCard(
    report: Report,
    previewed: bool,
    verifying: bool,
    can_verify: bool,
    on_toggle_evidence: EventHandler<String>,
    on_verify: EventHandler<u64>,
) -> Element {
    let id = report.id;
    let link = report.evidence_link.clone();
    let (status, status_icon) = if report.verified {
        ("Verified", "✔")
    } else {
        ("Not Verified", "✘")
    };

    rsx! {
        div {
            class: "report-card",
            Card {
                header {
                    class: "report-card-header",
                    h4 { "Report #{id}" }
                    Badge {
                        text: if report.verified { "Verified".to_string() } else { "Pending".to_string() },
                        positive: report.verified,
                    }
                }
                div {
                    class: "report-facts",
                    span {
                        title: "{report.reporter}",
                        "📄 "
                        code { "{truncate_address(&report.reporter)}" }
                    }
                    span { class: "truncate", "📍 {report.location}" }
                    span { "💰 {report.reward} ETH" }
                    span { "{status_icon} {status}" }
                }
                p { "{report.description}" }
                footer {
                    class: "report-card-footer",
                    Button {
                        button_type: ButtonType::Secondary,
                        on_click: move |_| on_toggle_evidence.call(link.clone()),
                        if previewed { "Hide Evidence" } else { "View Evidence" }
                    }
                    if !report.verified {
                        Button {
                            disabled: !can_verify,
                            busy: verifying,
                            title: if can_verify {
                                "Pay the reward and mark verified".to_string()
                            } else {
                                "Connect a wallet to verify".to_string()
                            },
                            on_click: move |_| on_verify.call(id),
                            "Verify Report"
                        }
                    }
                }
                if previewed {
                    div {
                        key: "{id}-evidence",
                        class: "evidence-preview",
                        img {
                            src: "{report.evidence_link}",
                            alt: "Evidence Preview",
                        }
                    }
                }
            }
        }
    }
}
