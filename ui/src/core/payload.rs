//! Validation payload produced upstream by the tag validator and handed to the
//! dashboard fully formed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::EventKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationPayload {
    #[serde(default)]
    pub resumo: Summary,
    #[serde(default)]
    pub eventos: EventLists,
    #[serde(default)]
    pub erros_por_campo: Map<String, Value>,
    #[serde(default)]
    pub eventos_por_tela: Map<String, Value>,
    #[serde(default)]
    pub analise_ia: Option<String>,
}

/// Headline counts. `total` is expected to equal the sum of the other three but
/// nothing here enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub corretos: u64,
    #[serde(default)]
    pub ausentes: u64,
    #[serde(default)]
    pub com_erro: u64,
    #[serde(default)]
    pub total: u64,
}

impl Summary {
    pub fn count(&self, kind: EventKind) -> u64 {
        match kind {
            EventKind::Correct => self.corretos,
            EventKind::Missing => self.ausentes,
            EventKind::Errored => self.com_erro,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLists {
    #[serde(default)]
    pub corretos: Option<Vec<EventWrapper>>,
    #[serde(default)]
    pub ausentes: Option<Vec<EventWrapper>>,
    #[serde(default)]
    pub com_erro: Option<Vec<EventWrapper>>,
}

impl EventLists {
    /// Events of one category; an absent or `null` list reads as empty.
    pub fn list(&self, kind: EventKind) -> &[EventWrapper] {
        let list = match kind {
            EventKind::Correct => &self.corretos,
            EventKind::Missing => &self.ausentes,
            EventKind::Errored => &self.com_erro,
        };
        list.as_deref().unwrap_or_default()
    }

    pub fn set_list(&mut self, kind: EventKind, events: Vec<EventWrapper>) {
        let slot = match kind {
            EventKind::Correct => &mut self.corretos,
            EventKind::Missing => &mut self.ausentes,
            EventKind::Errored => &mut self.com_erro,
        };
        *slot = Some(events);
    }
}

/// One validated occurrence as emitted upstream.
///
/// Correct events arrive as the raw spreadsheet row; missing and errored events
/// arrive wrapped (`evento`, optional `log`, optional `diferencas`). The map is
/// kept untouched so field order matches the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventWrapper(pub Map<String, Value>);

impl EventWrapper {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The nested `evento` object, when present and non-null.
    pub fn evento(&self) -> Option<&Map<String, Value>> {
        self.0.get("evento").and_then(Value::as_object)
    }

    pub fn log(&self) -> Option<&Map<String, Value>> {
        self.0.get("log").and_then(Value::as_object)
    }

    pub fn diferencas(&self) -> Option<&Map<String, Value>> {
        self.0.get("diferencas").and_then(Value::as_object)
    }

    /// The object describing the event itself: `evento` when the wrapper has
    /// one, otherwise the wrapper.
    pub fn subject(&self) -> &Map<String, Value> {
        self.evento().unwrap_or(&self.0)
    }
}

/// Numeric series of a `field → count` mapping, in payload order. Non-numeric
/// counts read as zero.
pub fn count_series(mapping: &Map<String, Value>) -> Vec<(String, f64)> {
    mapping
        .iter()
        .map(|(key, value)| (key.clone(), value.as_f64().unwrap_or(0.0)))
        .collect()
}
