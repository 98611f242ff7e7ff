use dioxus::prelude::*;

use crate::core::chart_presets::{ChartConfig, ChartKind};
use crate::core::state::{ChartError, ChartHandle, ChartHost};
use crate::t;

use super::{dom_ids, use_dashboard};

pub(crate) const CHART_BRIDGE_JS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/js/chart_bridge.js"
));

/// Chart.js driven through `document::eval`. Instances live on the JS side,
/// keyed by the id carried in each [`ChartHandle`].
#[derive(Debug, Default)]
pub struct ScriptChartHost {
    next_id: u64,
}

impl ChartHost for ScriptChartHost {
    fn mount(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<ChartHandle, ChartError> {
        let config_json = serde_json::to_string(config)?;
        let canvas_json = serde_json::to_string(canvas_id)?;
        self.next_id += 1;
        let id = self.next_id;

        let _ = document::eval(&format!(
            "{CHART_BRIDGE_JS}\nwindow.TagValidatorCharts.mount({id}, {canvas_json}, {config_json});"
        ));
        Ok(ChartHandle::new(id))
    }

    fn dispose(&mut self, handle: ChartHandle) {
        let _ = document::eval(&format!(
            "{CHART_BRIDGE_JS}\nwindow.TagValidatorCharts.dispose({});",
            handle.id()
        ));
    }
}

#[component]
pub fn ChartCard() -> Element {
    let dashboard = use_dashboard();
    let active = (dashboard.active_chart)();

    use_drop(move || dashboard.release_chart());

    let title = t!("chart-title");
    let tabs = [
        (ChartKind::Distribuicao, t!("chart-tab-distribution")),
        (ChartKind::Erros, t!("chart-tab-errors")),
        (ChartKind::Telas, t!("chart-tab-screens")),
    ];

    rsx! {
        section { class: "card chart-card",
            div { class: "card-header",
                h2 { class: "card-title",
                    i { class: "fas fa-chart-pie" }
                    " {title}"
                }
                div { class: "chart-tabs",
                    for (kind, label) in tabs {
                        button {
                            key: "{kind.slug()}",
                            r#type: "button",
                            class: if kind == active { "chart-tab active" } else { "chart-tab" },
                            "data-chart": kind.slug(),
                            onclick: move |_| dashboard.switch_chart_tab(kind),
                            "{label}"
                        }
                    }
                }
            }
            div { class: "chart-container",
                canvas { id: dom_ids::MAIN_CHART }
            }
        }
    }
}
