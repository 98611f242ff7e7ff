use dioxus::prelude::*;

use crate::t;

use super::{dom_ids, use_dashboard};

/// AI analysis of the missing / errored events; hidden when there are none.
#[component]
pub fn AiAnalysisPanel() -> Element {
    let dashboard = use_dashboard();
    let panel = dashboard.view.read().ai_panel();
    let stamp = (dashboard.stamp)();
    let updated = t!("ai-updated", stamp = stamp);
    let title = t!("ai-title");

    rsx! {
        section {
            id: dom_ids::AI_ANALYSIS,
            class: "card ai-analysis",
            style: if panel.visible { "display: block;" } else { "display: none;" },
            div { class: "card-header",
                h2 { class: "card-title",
                    i { class: "fas fa-robot" }
                    " {title}"
                }
                span { id: dom_ids::AI_ANALYSIS_TIMESTAMP, class: "ai-analysis-timestamp", "{updated}" }
            }
            div { id: dom_ids::AI_ANALYSIS_CONTENT, class: "ai-analysis-content", "{panel.text}" }
        }
    }
}
