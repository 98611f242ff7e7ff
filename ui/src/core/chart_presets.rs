//! Static Chart.js presets per chart kind, and the data series they are
//! combined with at render time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::format::percent_share;
use super::payload::{count_series, ValidationPayload};

pub const CHART_FONT: &str = "Poppins";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Share of correct / missing / errored events.
    #[default]
    Distribuicao,
    /// Error count per field.
    Erros,
    /// Event count per screen.
    Telas,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Distribuicao, ChartKind::Erros, ChartKind::Telas];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Distribuicao => "distribuicao",
            ChartKind::Erros => "erros",
            ChartKind::Telas => "telas",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Doughnut,
    Bar,
}

/// How the hover label of a segment is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipMode {
    /// Chart.js default.
    Default,
    /// `"{label}: {value} ({pct}%)"`, percentage of the dataset sum.
    ShareOfTotal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPreset {
    pub chart_type: ChartType,
    pub options: Value,
    pub tooltip: TooltipMode,
}

/// Every preset, keyed by kind.
pub fn chart_presets() -> [(ChartKind, ChartPreset); 3] {
    ChartKind::ALL.map(|kind| (kind, preset(kind)))
}

pub fn preset(kind: ChartKind) -> ChartPreset {
    match kind {
        ChartKind::Distribuicao => ChartPreset {
            chart_type: ChartType::Doughnut,
            options: json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": {
                        "position": "right",
                        "labels": { "font": { "family": CHART_FONT, "size": 13 }, "padding": 15 }
                    },
                    "title": title("Distribuição de Status dos Eventos")
                },
                "animation": {
                    "animateScale": true,
                    "animateRotate": true,
                    "duration": 2000,
                    "easing": "easeOutQuart"
                },
                "cutout": "60%"
            }),
            tooltip: TooltipMode::ShareOfTotal,
        },
        ChartKind::Erros => bar_preset("Distribuição de Erros por Campo"),
        ChartKind::Telas => bar_preset("Quantidade de Eventos por Tela"),
    }
}

fn bar_preset(heading: &str) -> ChartPreset {
    ChartPreset {
        chart_type: ChartType::Bar,
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "ticks": { "precision": 0, "font": { "family": CHART_FONT } },
                    "grid": { "color": "rgba(0,0,0,0.05)" }
                },
                "x": {
                    "ticks": { "font": { "family": CHART_FONT } },
                    "grid": { "display": false }
                }
            },
            "plugins": {
                "legend": { "display": false },
                "title": title(heading)
            },
            "animation": { "duration": 1500, "easing": "easeInOutQuart" }
        }),
        tooltip: TooltipMode::Default,
    }
}

fn title(text: &str) -> Value {
    json!({
        "display": true,
        "text": text,
        "font": { "family": CHART_FONT, "size": 16, "weight": "500" },
        "padding": { "bottom": 20 }
    })
}

/// Labelled values plotted by a chart kind.
pub fn chart_series(kind: ChartKind, payload: &ValidationPayload) -> Vec<(String, f64)> {
    match kind {
        ChartKind::Distribuicao => vec![
            ("Corretos".to_string(), payload.resumo.corretos as f64),
            ("Ausentes".to_string(), payload.resumo.ausentes as f64),
            ("Com Erros".to_string(), payload.resumo.com_erro as f64),
        ],
        ChartKind::Erros => count_series(&payload.erros_por_campo),
        ChartKind::Telas => count_series(&payload.eventos_por_tela),
    }
}

/// Hover label for one segment of the distribution chart.
pub fn share_label(label: &str, value: f64, dataset: &[f64]) -> String {
    let total: f64 = dataset.iter().sum();
    format!("{label}: {value} ({}%)", percent_share(value, total))
}

/// Everything the charting library needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Value,
    pub options: Value,
    #[serde(rename = "tooltipLabels", skip_serializing_if = "Option::is_none")]
    pub tooltip_labels: Option<Vec<String>>,
}

impl ChartConfig {
    pub fn build(kind: ChartKind, payload: &ValidationPayload) -> Self {
        let preset = preset(kind);
        let series = chart_series(kind, payload);
        let labels: Vec<&str> = series.iter().map(|(label, _)| label.as_str()).collect();
        let values: Vec<f64> = series.iter().map(|(_, value)| *value).collect();

        let data = match kind {
            ChartKind::Distribuicao => json!({
                "labels": labels,
                "datasets": [{
                    "data": values,
                    "backgroundColor": ["rgba(39, 174, 96, 0.9)", "rgba(231, 76, 60, 0.9)", "rgba(243, 156, 18, 0.9)"],
                    "borderColor": ["rgba(39, 174, 96, 1)", "rgba(231, 76, 60, 1)", "rgba(243, 156, 18, 1)"],
                    "borderWidth": 2,
                    "hoverOffset": 15
                }]
            }),
            ChartKind::Erros => json!({
                "labels": labels,
                "datasets": [{
                    "label": "Quantidade de Erros",
                    "data": values,
                    "backgroundColor": "rgba(243, 156, 18, 0.7)",
                    "borderColor": "rgba(230, 126, 34, 1)",
                    "borderWidth": 1,
                    "borderRadius": 5,
                    "hoverBackgroundColor": "rgba(243, 156, 18, 0.9)"
                }]
            }),
            ChartKind::Telas => json!({
                "labels": labels,
                "datasets": [{
                    "label": "Quantidade de Eventos",
                    "data": values,
                    "backgroundColor": "rgba(52, 152, 219, 0.7)",
                    "borderColor": "rgba(41, 128, 185, 1)",
                    "borderWidth": 1,
                    "borderRadius": 5,
                    "hoverBackgroundColor": "rgba(52, 152, 219, 0.9)"
                }]
            }),
        };

        let tooltip_labels = match preset.tooltip {
            TooltipMode::ShareOfTotal => Some(
                series
                    .iter()
                    .map(|(label, value)| share_label(label, *value, &values))
                    .collect(),
            ),
            TooltipMode::Default => None,
        };

        Self {
            chart_type: preset.chart_type,
            data,
            options: preset.options,
            tooltip_labels,
        }
    }
}
