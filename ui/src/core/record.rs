//! Normalized event records.
//!
//! Upstream field names are inconsistent (`ID` / `id`, `NOME DO EVENTO` /
//! `nome_evento`, ...). Each wrapper is resolved once, when the payload is
//! ingested, against the alias lists below; rendering then works from the
//! resolved [`EventRecord`] instead of probing on every pass.

use std::collections::HashSet;

use serde_json::Value;
use time::OffsetDateTime;

use super::config::EventTimeSource;
use super::format;
use super::lookup::{lookup_or, lookup_property};
use super::payload::{EventWrapper, ValidationPayload};

pub const ID_ALIASES: &[&str] = &["id", "ID", "Id"];
pub const NAME_ALIASES: &[&str] = &["nome do evento", "NOME DO EVENTO", "Nome do Evento", "nome_evento"];
pub const SCREEN_ALIASES: &[&str] = &["tela", "TELA", "Tela"];
pub const TIMESTAMP_ALIASES: &[&str] = &["timestamp", "data_hora", "datetime", "data"];

pub const UNNAMED_EVENT: &str = "Evento Sem Nome";
pub const UNSPECIFIED_SCREEN: &str = "Tela Não Especificada";

/// Classification of a validated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Correct,
    Missing,
    Errored,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Correct, EventKind::Missing, EventKind::Errored];

    /// CSS / DOM slug used by the markup contract.
    pub fn slug(self) -> &'static str {
        match self {
            EventKind::Correct => "correto",
            EventKind::Missing => "ausente",
            EventKind::Errored => "com-erro",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Correct => "Correto",
            EventKind::Missing => "Ausente",
            EventKind::Errored => "Com Erro",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EventKind::Correct => "check",
            EventKind::Missing => "times",
            EventKind::Errored => "exclamation",
        }
    }

    pub fn tab(self) -> EventTab {
        match self {
            EventKind::Correct => EventTab::Corretos,
            EventKind::Missing => EventTab::Ausentes,
            EventKind::Errored => EventTab::ComErro,
        }
    }
}

/// Tabs of the events card; each owns one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum EventTab {
    #[default]
    #[serde(rename = "corretos")]
    Corretos,
    #[serde(rename = "ausentes")]
    Ausentes,
    #[serde(rename = "com-erro")]
    ComErro,
}

impl EventTab {
    pub const ALL: [EventTab; 3] = [EventTab::Corretos, EventTab::Ausentes, EventTab::ComErro];

    pub fn slug(self) -> &'static str {
        match self {
            EventTab::Corretos => "corretos",
            EventTab::Ausentes => "ausentes",
            EventTab::ComErro => "com-erro",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }

    pub fn kind(self) -> EventKind {
        match self {
            EventTab::Corretos => EventKind::Correct,
            EventTab::Ausentes => EventKind::Missing,
            EventTab::ComErro => EventKind::Errored,
        }
    }

    pub fn content_id(self) -> String {
        format!("{}-content", self.slug())
    }

    pub fn container_id(self) -> &'static str {
        match self {
            EventTab::Corretos => "corretos-container",
            EventTab::Ausentes => "ausentes-container",
            EventTab::ComErro => "com-erro-container",
        }
    }
}

/// Wrapper keys with structural meaning; never listed as plain fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedKey {
    Diferencas,
    Evento,
    Log,
}

impl ReservedKey {
    pub const ALL: [ReservedKey; 3] = [ReservedKey::Diferencas, ReservedKey::Evento, ReservedKey::Log];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservedKey::Diferencas => "diferencas",
            ReservedKey::Evento => "evento",
            ReservedKey::Log => "log",
        }
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::ALL.iter().any(|reserved| reserved.as_str() == key)
    }
}

/// An event wrapper resolved against the alias lists.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub kind: EventKind,
    pub id: String,
    pub name: String,
    pub screen: String,
    /// Unique within its container; targets of detail toggling.
    pub dom_id: String,
    /// Event-intrinsic timestamp, when the event carries one.
    pub occurred_at: Option<String>,
    pub wrapper: EventWrapper,
}

impl EventRecord {
    pub fn resolve(wrapper: &EventWrapper, kind: EventKind) -> Self {
        let subject = wrapper.subject();

        let id = match lookup_property(subject, ID_ALIASES) {
            Some(value) if !value.is_null() => format::display_value(value),
            _ => lookup_or(wrapper.fields(), ID_ALIASES, ""),
        };
        let name = lookup_or(subject, NAME_ALIASES, UNNAMED_EVENT);
        let screen = lookup_or(subject, SCREEN_ALIASES, UNSPECIFIED_SCREEN);
        let occurred_at = lookup_property(subject, TIMESTAMP_ALIASES)
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            kind,
            dom_id: format!("evento-{}-{}", kind.slug(), dom_safe(&id)),
            id,
            name,
            screen,
            occurred_at,
            wrapper: wrapper.clone(),
        }
    }

    /// Case-insensitive substring match over id, name and screen.
    pub fn matches(&self, needle_lower: &str) -> bool {
        [&self.id, &self.name, &self.screen]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }

    /// The timestamp shown on the card, and whether it is the render time
    /// rather than the event's own.
    pub fn display_time(&self, source: EventTimeSource, rendered_at: OffsetDateTime) -> DisplayTime {
        match (source, self.occurred_at.as_deref()) {
            (EventTimeSource::EventField, Some(raw)) => DisplayTime {
                text: format::format_date(Some(raw)),
                is_render_time: false,
            },
            _ => DisplayTime {
                text: format::format_instant(rendered_at),
                is_render_time: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTime {
    pub text: String,
    pub is_render_time: bool,
}

/// Resolved records per category, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBuckets {
    pub corretos: Vec<EventRecord>,
    pub ausentes: Vec<EventRecord>,
    pub com_erro: Vec<EventRecord>,
}

impl EventBuckets {
    pub fn ingest(payload: &ValidationPayload) -> Self {
        let mut buckets = Self::default();
        for kind in EventKind::ALL {
            *buckets.get_mut(kind) = resolve_all(payload.eventos.list(kind), kind);
        }
        buckets
    }

    pub fn get(&self, kind: EventKind) -> &[EventRecord] {
        match kind {
            EventKind::Correct => &self.corretos,
            EventKind::Missing => &self.ausentes,
            EventKind::Errored => &self.com_erro,
        }
    }

    pub fn set(&mut self, kind: EventKind, records: Vec<EventRecord>) {
        *self.get_mut(kind) = records;
    }

    pub fn total(&self) -> usize {
        self.corretos.len() + self.ausentes.len() + self.com_erro.len()
    }

    fn get_mut(&mut self, kind: EventKind) -> &mut Vec<EventRecord> {
        match kind {
            EventKind::Correct => &mut self.corretos,
            EventKind::Missing => &mut self.ausentes,
            EventKind::Errored => &mut self.com_erro,
        }
    }
}

fn resolve_all(wrappers: &[EventWrapper], kind: EventKind) -> Vec<EventRecord> {
    let mut seen = HashSet::new();
    wrappers
        .iter()
        .enumerate()
        .map(|(position, wrapper)| {
            let mut record = EventRecord::resolve(wrapper, kind);
            let base = record.dom_id.clone();
            let mut suffix = position;
            while !seen.insert(record.dom_id.clone()) {
                record.dom_id = format!("{base}-{suffix}");
                suffix += 1;
            }
            record
        })
        .collect()
}

fn dom_safe(id: &str) -> String {
    id.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrapper(value: Value) -> EventWrapper {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn resolves_fields_from_nested_event() {
        let record = EventRecord::resolve(
            &wrapper(json!({
                "ID": "w-1",
                "evento": { "id": "7", "Nome do evento": "click_buy", "TELA": "checkout" }
            })),
            EventKind::Missing,
        );
        assert_eq!(record.id, "7");
        assert_eq!(record.name, "click_buy");
        assert_eq!(record.screen, "checkout");
        assert_eq!(record.dom_id, "evento-ausente-7");
    }

    #[test]
    fn id_falls_back_to_wrapper_then_empty() {
        let record = EventRecord::resolve(
            &wrapper(json!({ "ID": "42", "evento": { "TELA": "home" } })),
            EventKind::Errored,
        );
        assert_eq!(record.id, "42");

        let record = EventRecord::resolve(&wrapper(json!({ "evento": { "id": null } })), EventKind::Errored);
        assert_eq!(record.id, "");
        assert_eq!(record.name, UNNAMED_EVENT);
        assert_eq!(record.screen, UNSPECIFIED_SCREEN);
    }

    #[test]
    fn duplicate_ids_get_unique_dom_ids() {
        let payload: ValidationPayload = serde_json::from_value(json!({
            "eventos": { "corretos": [{ "ID": "1" }, { "ID": "1" }] }
        }))
        .unwrap();
        let buckets = EventBuckets::ingest(&payload);
        let ids: Vec<_> = buckets.get(EventKind::Correct).iter().map(|r| r.dom_id.as_str()).collect();
        assert_eq!(ids, vec!["evento-correto-1", "evento-correto-1-1"]);
    }

    #[test]
    fn suffixed_dom_id_is_not_reused_by_a_later_event() {
        let payload: ValidationPayload = serde_json::from_value(json!({
            "eventos": { "corretos": [{ "ID": "1" }, { "ID": "1" }, { "ID": "1-1" }] }
        }))
        .unwrap();
        let buckets = EventBuckets::ingest(&payload);
        let ids: HashSet<&str> = buckets.get(EventKind::Correct).iter().map(|r| r.dom_id.as_str()).collect();
        assert_eq!(ids.len(), 3, "{ids:?}");
        assert!(ids.contains("evento-correto-1-1"));
    }

    #[test]
    fn render_time_is_flagged_unless_event_time_requested() {
        let record = EventRecord::resolve(
            &wrapper(json!({ "ID": "1", "timestamp": "2024-01-02T03:04:05Z" })),
            EventKind::Correct,
        );
        let now = OffsetDateTime::now_utc();

        assert!(record.display_time(EventTimeSource::RenderTime, now).is_render_time);
        let shown = record.display_time(EventTimeSource::EventField, now);
        assert!(!shown.is_render_time);
        assert!(shown.text.contains("2024"));
    }

    #[test]
    fn slugs_round_trip_and_reject_unknowns() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(EventKind::from_slug("pending"), None);
        assert_eq!(EventTab::from_slug("com-erro"), Some(EventTab::ComErro));
        assert_eq!(EventTab::from_slug("nope"), None);
    }

    #[test]
    fn reserved_keys_are_explicit() {
        assert!(ReservedKey::is_reserved("diferencas"));
        assert!(ReservedKey::is_reserved("log"));
        assert!(!ReservedKey::is_reserved("LOG"));
        assert!(!ReservedKey::is_reserved("TELA"));
    }
}
