use dioxus::prelude::*;

use crate::core::animation::CounterSlot;
use crate::core::record::EventTab;
use crate::t;

use super::use_dashboard;

struct SummaryBox {
    slot: CounterSlot,
    class: &'static str,
    icon: &'static str,
    label: String,
    /// Tab opened when the box is clicked.
    tab: EventTab,
}

#[component]
pub fn SummaryBoxes() -> Element {
    let dashboard = use_dashboard();
    let counters = (dashboard.counters)();

    let boxes = [
        SummaryBox {
            slot: CounterSlot::Corretos,
            class: "correto",
            icon: "fas fa-check-circle",
            label: t!("summary-correct"),
            tab: EventTab::Corretos,
        },
        SummaryBox {
            slot: CounterSlot::Ausentes,
            class: "ausente",
            icon: "fas fa-times-circle",
            label: t!("summary-missing"),
            tab: EventTab::Ausentes,
        },
        SummaryBox {
            slot: CounterSlot::ComErro,
            class: "com-erro",
            icon: "fas fa-exclamation-circle",
            label: t!("summary-errored"),
            tab: EventTab::ComErro,
        },
        SummaryBox {
            slot: CounterSlot::Total,
            class: "total",
            icon: "fas fa-list-ul",
            label: t!("summary-total"),
            tab: EventTab::Corretos,
        },
    ];

    rsx! {
        div { class: "summary-container",
            for entry in boxes {
                div {
                    key: "{entry.slot.element_id()}",
                    class: "summary-box {entry.class}",
                    onclick: move |_| dashboard.navigate_to_tab(entry.tab.slug()),
                    div { class: "summary-icon", i { class: "{entry.icon}" } }
                    div { class: "summary-number", id: entry.slot.element_id(),
                        "{counters.shown(entry.slot)}"
                    }
                    div { class: "summary-label", "{entry.label}" }
                }
            }
        }
    }
}
