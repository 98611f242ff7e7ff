use dioxus::prelude::*;

use crate::dashboard::{
    dom_ids, use_dashboard, AiAnalysisPanel, ChartCard, EventsCard, SummaryBoxes,
};
use crate::t;

/// The dashboard page. Mounting it (re)runs setup against the loaded payload.
#[component]
pub fn Overview() -> Element {
    let dashboard = use_dashboard();
    use_effect(move || dashboard.setup());

    let stamp = (dashboard.stamp)();
    let load_error = (dashboard.load_error)();

    rsx! {
        main { class: "page dashboard",
            header { class: "dashboard-header",
                div {
                    h1 { {t!("dashboard-title")} }
                    p { class: "dashboard-intro", {t!("dashboard-intro")} }
                }
                span { class: "dashboard-generated",
                    {t!("dashboard-generated")}
                    " "
                    span { id: dom_ids::DASHBOARD_TIMESTAMP, "{stamp}" }
                }
            }

            if let Some(err) = load_error {
                div { class: "load-error", role: "alert",
                    p { class: "load-error__title", {t!("load-error-title")} }
                    p { "{err}" }
                }
            }

            SummaryBoxes {}
            AiAnalysisPanel {}
            ChartCard {}
            EventsCard {}
        }
    }
}
