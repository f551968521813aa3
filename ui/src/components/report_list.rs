use api::panel::EvidencePreview;
use api::report::Report;
use dioxus::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::components::report_card::ReportCard;

/// One card per report, or an empty state when there are none.
///
/// `verifying` is the id of the report whose verification is in flight.
#[component]
pub fn ReportList(
    reports: Vec<Report>,
    preview: EvidencePreview,
    verifying: Option<u64>,
    can_verify: bool,
    on_toggle_evidence: EventHandler<String>,
    on_verify: EventHandler<u64>,
) -> Element {
    if reports.is_empty() {
        return rsx! {
            EmptyState {
                title: "No reports".to_string(),
                description: Some("Nothing has been reported yet, or the reports service could not be reached.".to_string()),
                icon: rsx! { "📭" },
            }
        };
    }

    rsx! {
        div {
            class: "report-list",
            for report in reports {
                ReportCard {
                    key: "{report.id}",
                    previewed: preview.is_shown(&report.evidence_link),
                    verifying: verifying == Some(report.id),
                    can_verify,
                    on_toggle_evidence,
                    on_verify,
                    report: report.clone(),
                }
            }
        }
    }
}
