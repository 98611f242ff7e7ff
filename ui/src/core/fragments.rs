//! HTML fragments for event cards.
//!
//! The live dashboard renders the card shell through components and injects
//! [`event_details_body`] as raw markup; the standalone snapshot export uses
//! [`container_html`] for the whole list. All payload text is escaped.

use serde_json::{Map, Value};

use super::format::{display_value, html_escape};
use super::record::{DisplayTime, EventKind, EventRecord, ReservedKey};

/// Inline hook exposed by the snapshot script for detail toggling.
pub const TOGGLE_HOOK: &str = "TagValidator.toggleDetail";
/// Inline hook exposed by the snapshot script for summary-box navigation.
pub const NAVIGATE_HOOK: &str = "TagValidator.navigateToTab";

/// Badge for a kind slug. Unknown slugs render with an empty label and icon.
pub fn status_badge(slug: &str) -> String {
    let (label, icon) = EventKind::from_slug(slug)
        .map(|kind| (kind.label(), kind.icon()))
        .unwrap_or(("", ""));
    format!(
        r#"<span class="evento-badge {slug}"><i class="fas fa-{icon}"></i> {label}</span>"#,
        slug = html_escape(slug),
    )
}

/// Expected-vs-logged values, one block per differing field, in payload order.
pub fn diff_fragment(diferencas: &Map<String, Value>) -> String {
    let mut html = String::from(
        r#"<div class="evento-detalhes-titulo"><i class="fas fa-not-equal"></i> Diferenças Encontradas</div><div class="diferencas">"#,
    );
    for (field, diff) in diferencas {
        let expected = diff_side(diff, "esperado");
        let logged = diff_side(diff, "log");
        html.push_str(&format!(
            concat!(
                r#"<div class="diferenca">"#,
                r#"<div class="diferenca-titulo"><i class="fas fa-exclamation-triangle"></i> {field}</div>"#,
                r#"<div class="valores">"#,
                r#"<div class="valor-label"><i class="fas fa-check-circle"></i> Esperado:</div>"#,
                r#"<div class="valor-conteudo valor-esperado">{expected}</div>"#,
                r#"<div class="valor-label"><i class="fas fa-times-circle"></i> Log:</div>"#,
                r#"<div class="valor-conteudo valor-log">{logged}</div>"#,
                "</div></div>"
            ),
            field = html_escape(field),
            expected = html_escape(&expected),
            logged = html_escape(&logged),
        ));
    }
    html.push_str("</div>");
    html
}

fn diff_side(diff: &Value, side: &str) -> String {
    diff.get(side).map(display_value).unwrap_or_default()
}

/// Every field of the wrapper as an uppercased key/value table.
///
/// A wrapper carrying both `evento` and `log` objects lists the event fields,
/// then (only when it has no `diferencas`) a `LOG:` separator followed by the
/// log fields. Any other wrapper lists its own non-reserved fields.
pub fn detail_fragment(wrapper: &Map<String, Value>) -> String {
    let mut html = String::from(
        r#"<div class="evento-detalhes-titulo"><i class="fas fa-info-circle"></i> Detalhes Completos</div><div class="evento-detalhes-tabela">"#,
    );

    let evento = wrapper.get(ReservedKey::Evento.as_str()).and_then(Value::as_object);
    let log = wrapper.get(ReservedKey::Log.as_str()).and_then(Value::as_object);

    match (evento, log) {
        (Some(evento), Some(log)) => {
            push_rows(&mut html, evento.iter());
            if !has_differences(wrapper) {
                html.push_str(concat!(
                    r#"<div class="evento-detalhes-item evento-detalhes-separator">"#,
                    r#"<div class="evento-detalhes-chave">LOG:</div>"#,
                    r#"<div class="evento-detalhes-valor"></div>"#,
                    "</div>"
                ));
                push_rows(&mut html, log.iter());
            }
        }
        _ => push_rows(
            &mut html,
            wrapper.iter().filter(|(key, _)| !ReservedKey::is_reserved(key)),
        ),
    }

    html.push_str("</div>");
    html
}

/// `diferencas` present with a truthy value.
fn has_differences(wrapper: &Map<String, Value>) -> bool {
    match wrapper.get(ReservedKey::Diferencas.as_str()) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

fn push_rows<'a>(html: &mut String, rows: impl Iterator<Item = (&'a String, &'a Value)>) {
    for (field, value) in rows {
        html.push_str(&format!(
            concat!(
                r#"<div class="evento-detalhes-item">"#,
                r#"<div class="evento-detalhes-chave">{key}:</div>"#,
                r#"<div class="evento-detalhes-valor">{value}</div>"#,
                "</div>"
            ),
            key = html_escape(&field.to_uppercase()),
            value = html_escape(&display_value(value)),
        ));
    }
}

/// Contents of an event's collapsible detail panel.
pub fn event_details_body(record: &EventRecord) -> String {
    let mut html = String::new();
    if record.kind == EventKind::Errored {
        if let Some(diferencas) = record.wrapper.diferencas() {
            html.push_str(&diff_fragment(diferencas));
        }
    }
    html.push_str(&detail_fragment(record.wrapper.fields()));
    html
}

/// Class list of the timestamp span; render-time stamps are marked so they
/// can be styled apart from event-intrinsic ones.
pub fn time_class(shown: &DisplayTime) -> &'static str {
    if shown.is_render_time {
        "evento-data evento-data--render"
    } else {
        "evento-data"
    }
}

/// Complete card for one event, detail panel collapsed.
pub fn format_event(record: &EventRecord, shown: &DisplayTime) -> String {
    let slug = record.kind.slug();
    let dom_id = html_escape(&record.dom_id);
    format!(
        concat!(
            r#"<div class="evento {slug}" id="{dom_id}" onclick="{hook}('{dom_id}')">"#,
            r#"<div class="evento-info">"#,
            "{badge}",
            r#"<span class="evento-id"><i class="fas fa-fingerprint"></i> ID: {id}</span>"#,
            r#"<span class="evento-tela"><i class="fas fa-mobile-alt"></i> {screen}</span>"#,
            r#"<span class="evento-nome"><i class="fas fa-tag"></i> {name}</span>"#,
            r#"<span class="{time_class}"><i class="far fa-clock"></i> {time}</span>"#,
            "</div>",
            r#"<div class="evento-detalhes" id="{dom_id}-detalhes" style="display: none;">{body}</div>"#,
            "</div>"
        ),
        slug = slug,
        dom_id = dom_id,
        hook = TOGGLE_HOOK,
        badge = status_badge(slug),
        id = html_escape(&record.id),
        screen = html_escape(&record.screen),
        name = html_escape(&record.name),
        time_class = time_class(shown),
        time = html_escape(&shown.text),
        body = event_details_body(record),
    )
}

/// Placeholder for a category with no events.
pub fn empty_placeholder(kind: EventKind) -> String {
    format!(
        r#"<div class="sem-itens"><i class="far fa-smile"></i> {}</div>"#,
        empty_message(kind)
    )
}

pub fn empty_message(kind: EventKind) -> String {
    format!("Nenhum evento {} encontrado.", kind.slug().replace('-', " "))
}

/// A category's cards in payload order, or its placeholder when empty.
pub fn container_html(
    records: &[EventRecord],
    kind: EventKind,
    shown: impl Fn(&EventRecord) -> DisplayTime,
) -> String {
    if records.is_empty() {
        return empty_placeholder(kind);
    }
    records
        .iter()
        .map(|record| format_event(record, &shown(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::EventWrapper;
    use serde_json::json;

    fn record(value: Value, kind: EventKind) -> EventRecord {
        let wrapper: EventWrapper = serde_json::from_value(value).unwrap();
        EventRecord::resolve(&wrapper, kind)
    }

    fn render_time() -> DisplayTime {
        DisplayTime {
            text: "01/02/2024 10:00:00".into(),
            is_render_time: true,
        }
    }

    #[test]
    fn badge_for_known_and_unknown_slugs() {
        assert_eq!(
            status_badge("ausente"),
            r#"<span class="evento-badge ausente"><i class="fas fa-times"></i> Ausente</span>"#
        );
        assert_eq!(
            status_badge("pendente"),
            r#"<span class="evento-badge pendente"><i class="fas fa-"></i> </span>"#
        );
    }

    #[test]
    fn errored_event_with_differences_hides_log_block() {
        let record = record(
            json!({
                "ID": "9",
                "evento": { "ID": "9", "TELA": "checkout" },
                "log": { "ID": "9", "TELA": "carrinho" },
                "diferencas": { "TELA": { "esperado": "checkout", "log": "carrinho" } }
            }),
            EventKind::Errored,
        );
        let html = format_event(&record, &render_time());
        assert!(html.contains("Diferenças Encontradas"));
        assert!(html.contains(r#"<div class="valor-conteudo valor-log">carrinho</div>"#));
        assert!(!html.contains("evento-detalhes-separator"));
        assert!(!html.contains(r#"<div class="evento-detalhes-valor">carrinho</div>"#));
    }

    #[test]
    fn wrapper_without_differences_lists_log_fields() {
        let record = record(
            json!({
                "evento": { "id": "3", "tela": "home" },
                "log": { "id": "3", "categoria": "nav" }
            }),
            EventKind::Errored,
        );
        let body = event_details_body(&record);
        assert!(!body.contains("Diferenças Encontradas"));
        assert!(body.contains("evento-detalhes-separator"));
        assert!(body.contains(r#"<div class="evento-detalhes-chave">CATEGORIA:</div>"#));
    }

    #[test]
    fn plain_wrapper_skips_reserved_keys() {
        let html = detail_fragment(
            json!({ "ID": 1, "evento": "x", "diferencas": null, "extra": { "a": 1 } })
                .as_object()
                .unwrap(),
        );
        assert!(html.contains(r#"<div class="evento-detalhes-chave">ID:</div>"#));
        assert!(html.contains(r#"<div class="evento-detalhes-chave">EXTRA:</div>"#));
        assert!(html.contains("{&quot;a&quot;:1}"));
        assert!(!html.contains("DIFERENCAS"));
        assert!(!html.contains("EVENTO:"));
    }

    #[test]
    fn card_carries_ids_hook_and_render_marker() {
        let record = record(json!({ "ID": "5", "TELA": "<home>" }), EventKind::Correct);
        let html = format_event(&record, &render_time());
        assert!(html.starts_with(r#"<div class="evento correto" id="evento-correto-5""#));
        assert!(html.contains("TagValidator.toggleDetail('evento-correto-5')"));
        assert!(html.contains(r#"id="evento-correto-5-detalhes""#));
        assert!(html.contains("evento-data--render"));
        assert!(html.contains("&lt;home&gt;"));
        assert!(html.contains("Evento Sem Nome"));
    }

    #[test]
    fn empty_category_renders_placeholder() {
        assert_eq!(
            container_html(&[], EventKind::Errored, |_| render_time()),
            r#"<div class="sem-itens"><i class="far fa-smile"></i> Nenhum evento com erro encontrado.</div>"#
        );
    }

    #[test]
    fn container_keeps_payload_order() {
        let records = vec![
            record(json!({ "ID": "b" }), EventKind::Correct),
            record(json!({ "ID": "a" }), EventKind::Correct),
        ];
        let html = container_html(&records, EventKind::Correct, |_| render_time());
        let first = html.find("evento-correto-b").unwrap();
        let second = html.find("evento-correto-a").unwrap();
        assert!(first < second);
    }
}
