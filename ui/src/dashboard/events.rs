use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::core::fragments::{empty_message, event_details_body, time_class};
use crate::core::record::{EventRecord, EventTab};
use crate::t;

use super::{dom_ids, use_dashboard};

#[component]
pub fn EventsCard() -> Element {
    let dashboard = use_dashboard();
    let active = (dashboard.active_tab)();
    let (records, resumo) = {
        let view = dashboard.view.read();
        (view.records.clone(), view.filtered.resumo)
    };

    let title = t!("events-title");
    let tabs = [
        (EventTab::Corretos, t!("tab-correct")),
        (EventTab::Ausentes, t!("tab-missing")),
        (EventTab::ComErro, t!("tab-errored")),
    ];

    rsx! {
        section { id: dom_ids::EVENTS_CARD, class: "card eventos-card",
            div { class: "card-header",
                h2 { class: "card-title",
                    i { class: "fas fa-stream" }
                    " {title}"
                }
                FilterBar {}
            }

            div { class: "tabs",
                for (tab, label) in tabs {
                    div {
                        key: "{tab.slug()}",
                        class: if tab == active { "tab active" } else { "tab" },
                        "data-tab": tab.slug(),
                        onclick: move |_| dashboard.switch_tab(tab),
                        "{label}"
                        span { class: "tab-count", "{resumo.count(tab.kind())}" }
                    }
                }
            }

            for tab in EventTab::ALL {
                div {
                    key: "{tab.content_id()}",
                    id: tab.content_id(),
                    class: if tab == active { "tab-content active" } else { "tab-content" },
                    div { id: tab.container_id(), class: "eventos-container",
                        if records.get(tab.kind()).is_empty() {
                            div { class: "sem-itens",
                                i { class: "far fa-smile" }
                                " {empty_message(tab.kind())}"
                            }
                        } else {
                            for record in records.get(tab.kind()).iter().cloned() {
                                EventCard { key: "{record.dom_id}", record }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One event: header line always visible, details collapsed until clicked.
#[component]
pub fn EventCard(record: EventRecord) -> Element {
    let dashboard = use_dashboard();
    let rendered_at = use_hook(OffsetDateTime::now_utc);
    let source = dashboard.settings.read().event_time;
    let shown = record.display_time(source, rendered_at);
    let panel = dashboard.details.read().get(&record.dom_id);
    let body = event_details_body(&record);

    let kind = record.kind;
    let toggle_id = record.dom_id.clone();

    rsx! {
        div {
            class: "evento {kind.slug()}",
            id: "{record.dom_id}",
            onclick: move |_| dashboard.toggle_detail(toggle_id.clone()),
            div { class: "evento-info",
                span { class: "evento-badge {kind.slug()}",
                    i { class: "fas fa-{kind.icon()}" }
                    " {kind.label()}"
                }
                span { class: "evento-id",
                    i { class: "fas fa-fingerprint" }
                    " ID: {record.id}"
                }
                span { class: "evento-tela",
                    i { class: "fas fa-mobile-alt" }
                    " {record.screen}"
                }
                span { class: "evento-nome",
                    i { class: "fas fa-tag" }
                    " {record.name}"
                }
                span { class: time_class(&shown),
                    i { class: "far fa-clock" }
                    " {shown.text}"
                }
            }
            div {
                class: "evento-detalhes",
                id: "{record.dom_id}-detalhes",
                style: panel.style(),
                dangerous_inner_html: body,
            }
        }
    }
}

/// Search box narrowing every widget to matching events.
#[component]
pub fn FilterBar() -> Element {
    let dashboard = use_dashboard();
    let mut draft = use_signal(|| dashboard.view.peek().query.clone());

    let label = t!("filter-label");
    let placeholder = t!("filter-placeholder");
    let clear = t!("filter-clear");

    rsx! {
        div { class: "event-filter",
            label { class: "visually-hidden", r#for: dom_ids::EVENT_FILTER, "{label}" }
            i { class: "fas fa-search" }
            input {
                id: dom_ids::EVENT_FILTER,
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{draft}",
                oninput: move |evt: FormEvent| {
                    let query = evt.value();
                    dashboard.apply_filter(&query);
                    draft.set(query);
                },
            }
            button {
                r#type: "button",
                class: "button button--ghost",
                disabled: draft.read().is_empty(),
                onclick: move |_| {
                    draft.set(String::new());
                    dashboard.apply_filter("");
                },
                "{clear}"
            }
        }
    }
}
