//! View state owned by the render layer: the loaded payload, the filtered
//! subset every widget draws from, and the one chart bound to the canvas.

use serde_json::{Map, Value};
use thiserror::Error;

use super::chart_presets::{ChartConfig, ChartKind};
use super::payload::{EventLists, Summary, ValidationPayload};
use super::record::{EventBuckets, EventKind, EventRecord};

pub const NO_ANALYSIS: &str = "Nenhuma análise de IA disponível para os erros encontrados.";

/// Owned reference to a chart instance living in the charting library.
/// Deliberately not `Clone`: whoever holds it is responsible for disposing it.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("couldn't encode chart config: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("chart host unavailable: {0}")]
    Host(String),
}

/// The charting collaborator: takes a config for a canvas and hands back a
/// disposable handle.
pub trait ChartHost {
    fn mount(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<ChartHandle, ChartError>;
    fn dispose(&mut self, handle: ChartHandle);
}

/// Visibility and text of the AI analysis panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPanel {
    pub visible: bool,
    pub text: String,
}

impl AiPanel {
    /// Hidden when nothing is missing or errored; otherwise shows the
    /// analysis verbatim or a fixed notice.
    pub fn configure(payload: &ValidationPayload) -> Self {
        let resumo = payload.resumo;
        Self {
            visible: !(resumo.com_erro == 0 && resumo.ausentes == 0),
            text: payload
                .analise_ia
                .clone()
                .unwrap_or_else(|| NO_ANALYSIS.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub current: ValidationPayload,
    pub filtered: ValidationPayload,
    /// Records of `filtered`, in payload order.
    pub records: EventBuckets,
    pub query: String,
    all_records: EventBuckets,
    active_chart: Option<ChartHandle>,
}

impl ViewState {
    pub fn new(payload: ValidationPayload) -> Self {
        let mut state = Self::default();
        state.load(payload);
        state
    }

    /// Re-derive everything from `payload`. The chart stays mounted until the
    /// next [`Self::render_chart`] replaces it.
    pub fn load(&mut self, payload: ValidationPayload) {
        self.all_records = EventBuckets::ingest(&payload);
        self.records = self.all_records.clone();
        self.filtered = payload.clone();
        self.current = payload;
        self.query.clear();
    }

    /// Narrow the view to events whose id, name or screen contains `query`
    /// (case-insensitive). A blank query restores the full payload.
    pub fn apply_filter(&mut self, query: &str) {
        let query = query.trim();
        self.query = query.to_string();

        if query.is_empty() {
            self.records = self.all_records.clone();
            self.filtered = self.current.clone();
            return;
        }

        let needle = query.to_lowercase();
        let mut records = EventBuckets::default();
        for kind in EventKind::ALL {
            let kept: Vec<EventRecord> = self
                .all_records
                .get(kind)
                .iter()
                .filter(|record| record.matches(&needle))
                .cloned()
                .collect();
            records.set(kind, kept);
        }

        self.filtered = derive_payload(&self.current, &records);
        self.records = records;
        tracing::debug!(query, total = self.filtered.resumo.total, "event filter applied");
    }

    pub fn ai_panel(&self) -> AiPanel {
        AiPanel::configure(&self.filtered)
    }

    pub fn has_active_chart(&self) -> bool {
        self.active_chart.is_some()
    }

    /// Replace the chart on `canvas_id` with `kind` drawn from the filtered
    /// payload. The previous instance is disposed before the new one mounts.
    pub fn render_chart<H: ChartHost + ?Sized>(
        &mut self,
        host: &mut H,
        canvas_id: &str,
        kind: ChartKind,
    ) -> Result<(), ChartError> {
        if let Some(previous) = self.active_chart.take() {
            host.dispose(previous);
        }
        let config = ChartConfig::build(kind, &self.filtered);
        tracing::debug!(chart = kind.slug(), "rendering chart");
        self.active_chart = Some(host.mount(canvas_id, &config)?);
        Ok(())
    }

    /// Dispose the active chart, if any.
    pub fn release_chart<H: ChartHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.active_chart.take() {
            host.dispose(handle);
        }
    }
}

/// Payload restricted to `records`, with every aggregate recounted from them.
fn derive_payload(source: &ValidationPayload, records: &EventBuckets) -> ValidationPayload {
    let mut eventos = EventLists::default();
    for kind in EventKind::ALL {
        eventos.set_list(
            kind,
            records.get(kind).iter().map(|record| record.wrapper.clone()).collect(),
        );
    }

    let resumo = Summary {
        corretos: records.corretos.len() as u64,
        ausentes: records.ausentes.len() as u64,
        com_erro: records.com_erro.len() as u64,
        total: (records.corretos.len() + records.ausentes.len() + records.com_erro.len()) as u64,
    };

    let mut erros_por_campo = Map::new();
    for record in &records.com_erro {
        if let Some(diferencas) = record.wrapper.diferencas() {
            for field in diferencas.keys() {
                bump(&mut erros_por_campo, field);
            }
        }
    }

    let mut eventos_por_tela = Map::new();
    for kind in EventKind::ALL {
        for record in records.get(kind) {
            bump(&mut eventos_por_tela, &record.screen);
        }
    }

    ValidationPayload {
        resumo,
        eventos,
        erros_por_campo,
        eventos_por_tela,
        analise_ia: source.analise_ia.clone(),
    }
}

fn bump(counts: &mut Map<String, Value>, key: &str) {
    let next = counts.get(key).and_then(Value::as_u64).unwrap_or(0) + 1;
    counts.insert(key.to_string(), Value::from(next));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct CountingHost {
        next: u64,
        live: Vec<u64>,
    }

    impl ChartHost for CountingHost {
        fn mount(&mut self, _canvas_id: &str, _config: &ChartConfig) -> Result<ChartHandle, ChartError> {
            self.next += 1;
            self.live.push(self.next);
            Ok(ChartHandle::new(self.next))
        }

        fn dispose(&mut self, handle: ChartHandle) {
            self.live.retain(|id| *id != handle.id());
        }
    }

    fn sample() -> ValidationPayload {
        serde_json::from_value(json!({
            "resumo": { "corretos": 2, "ausentes": 1, "com_erro": 1, "total": 4 },
            "eventos": {
                "corretos": [
                    { "ID": "1", "NOME DO EVENTO": "login", "TELA": "home" },
                    { "ID": "2", "NOME DO EVENTO": "logout", "TELA": "perfil" }
                ],
                "ausentes": [{ "ID": "3", "evento": { "ID": "3", "NOME DO EVENTO": "login_erro", "TELA": "home" } }],
                "com_erro": [{
                    "ID": "4",
                    "evento": { "ID": "4", "NOME DO EVENTO": "compra", "TELA": "checkout" },
                    "log": { "ID": "4" },
                    "diferencas": { "TELA": { "esperado": "checkout", "log": "home" } }
                }]
            },
            "erros_por_campo": { "TELA": 1 },
            "eventos_por_tela": { "home": 2, "perfil": 1, "checkout": 1 },
            "analise_ia": "texto"
        }))
        .unwrap()
    }

    #[test]
    fn rendering_twice_leaves_one_live_chart() {
        let mut host = CountingHost::default();
        let mut state = ViewState::new(sample());
        state.render_chart(&mut host, "main-chart", ChartKind::Distribuicao).unwrap();
        state.render_chart(&mut host, "main-chart", ChartKind::Distribuicao).unwrap();
        assert_eq!(host.live, vec![2]);

        state.render_chart(&mut host, "main-chart", ChartKind::Telas).unwrap();
        assert_eq!(host.live.len(), 1);

        state.release_chart(&mut host);
        assert!(host.live.is_empty());
        assert!(!state.has_active_chart());
    }

    #[test]
    fn ai_panel_hidden_only_without_problems() {
        let mut payload = sample();
        payload.resumo = Summary { corretos: 5, ausentes: 0, com_erro: 0, total: 5 };
        let panel = AiPanel::configure(&payload);
        assert!(!panel.visible);
        assert_eq!(panel.text, "texto");

        payload.resumo.com_erro = 1;
        payload.analise_ia = None;
        let panel = AiPanel::configure(&payload);
        assert!(panel.visible);
        assert_eq!(panel.text, NO_ANALYSIS);
    }

    #[test]
    fn filter_recounts_aggregates() {
        let mut state = ViewState::new(sample());
        state.apply_filter("  LOGIN ");
        assert_eq!(state.query, "LOGIN");
        assert_eq!(
            state.filtered.resumo,
            Summary { corretos: 1, ausentes: 1, com_erro: 0, total: 2 }
        );
        assert_eq!(state.filtered.eventos_por_tela, json!({ "home": 2 }).as_object().cloned().unwrap());
        assert!(state.filtered.erros_por_campo.is_empty());
        assert_eq!(state.records.ausentes[0].dom_id, "evento-ausente-3");

        state.apply_filter("checkout");
        assert_eq!(state.filtered.erros_por_campo, json!({ "TELA": 1 }).as_object().cloned().unwrap());
    }

    #[test]
    fn blank_filter_restores_payload() {
        let mut state = ViewState::new(sample());
        state.apply_filter("nada-casa");
        assert_eq!(state.filtered.resumo.total, 0);
        state.apply_filter("");
        assert_eq!(state.filtered, state.current);
        assert_eq!(state.records.corretos.len(), 2);
    }

    #[test]
    fn reload_rederives_without_accumulating() {
        let mut host = CountingHost::default();
        let mut state = ViewState::new(sample());
        state.render_chart(&mut host, "main-chart", ChartKind::Erros).unwrap();
        state.apply_filter("home");
        state.load(sample());
        state.load(sample());
        assert_eq!(state.records.corretos.len(), 2);
        assert!(state.query.is_empty());
        assert!(state.has_active_chart());
    }
}
