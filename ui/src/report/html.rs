//! Self-contained HTML snapshot of the dashboard: one file carrying the
//! theme, the rendered event lists, the chart configs and a small script that
//! reproduces the tab / detail / chart interactions.

use std::fmt::Write as _;

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::core::animation::CounterSlot;
use crate::core::chart_presets::{ChartConfig, ChartKind};
use crate::core::config::DashboardSettings;
use crate::core::format::{format_instant, html_escape};
use crate::core::fragments::{container_html, NAVIGATE_HOOK};
use crate::core::payload::ValidationPayload;
use crate::core::record::{EventBuckets, EventKind, EventTab};
use crate::core::state::AiPanel;
use crate::dashboard::{dom_ids, CHART_BRIDGE_JS};
use crate::THEME_CSS;

const SNAPSHOT_JS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/js/snapshot.js"));

pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";
pub const FONT_AWESOME_CDN: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
pub const POPPINS_CSS: &str =
    "https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600&display=swap";

pub fn standalone_html(
    payload: &ValidationPayload,
    settings: &DashboardSettings,
    now: OffsetDateTime,
) -> Result<String, serde_json::Error> {
    let stamp = format_instant(now);
    let records = EventBuckets::ingest(payload);
    let panel = AiPanel::configure(payload);

    let mut charts = Map::new();
    for kind in ChartKind::ALL {
        charts.insert(
            kind.slug().to_string(),
            serde_json::to_value(ChartConfig::build(kind, payload))?,
        );
    }
    let boot = serde_json::json!({
        "charts": Value::Object(charts),
        "defaultChart": settings.default_chart.slug(),
        "canvasId": dom_ids::MAIN_CHART,
        "eventsCardId": dom_ids::EVENTS_CARD,
        "collapseMs": settings.detail_collapse_ms,
        "counterTickMs": settings.counter_tick_ms,
        "counterSteps": settings.counter_steps,
    });
    // `</` inside an inline script would end it early.
    let boot_json = serde_json::to_string(&boot)?.replace("</", "<\\/");

    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        concat!(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>Dashboard de Validação</title>\n",
            "<link rel=\"stylesheet\" href=\"{fa}\">\n",
            "<link rel=\"stylesheet\" href=\"{poppins}\">\n",
            "<script src=\"{chartjs}\"></script>\n",
            "<style>\n{css}\n</style>\n",
            "</head>\n<body class=\"dashboard-snapshot\">\n<main class=\"page dashboard\">\n",
            "<header class=\"dashboard-header\"><h1>Dashboard de Validação</h1>",
            "<span class=\"dashboard-generated\">Gerado em <span id=\"{stamp_id}\">{stamp}</span></span></header>\n"
        ),
        fa = FONT_AWESOME_CDN,
        poppins = POPPINS_CSS,
        chartjs = CHART_JS_CDN,
        css = THEME_CSS,
        stamp_id = dom_ids::DASHBOARD_TIMESTAMP,
        stamp = html_escape(&stamp),
    );

    push_summary(&mut html, payload);
    push_ai_panel(&mut html, &panel, &stamp);
    push_chart_card(&mut html, settings.default_chart);
    push_events_card(&mut html, &records, payload, settings, now);

    let _ = write!(
        html,
        "</main>\n<script>window.__TAGVALIDATOR_SNAPSHOT__ = {boot_json};</script>\n<script>\n{CHART_BRIDGE_JS}\n{SNAPSHOT_JS}\n</script>\n</body>\n</html>\n"
    );
    Ok(html)
}

fn push_summary(html: &mut String, payload: &ValidationPayload) {
    let boxes = [
        (CounterSlot::Corretos, "correto", "fa-check-circle", "Corretos", EventTab::Corretos),
        (CounterSlot::Ausentes, "ausente", "fa-times-circle", "Ausentes", EventTab::Ausentes),
        (CounterSlot::ComErro, "com-erro", "fa-exclamation-circle", "Com Erro", EventTab::ComErro),
        (CounterSlot::Total, "total", "fa-list-ul", "Total de Eventos", EventTab::Corretos),
    ];
    html.push_str("<div class=\"summary-container\">");
    for (slot, class, icon, label, tab) in boxes {
        let _ = write!(
            html,
            concat!(
                "<div class=\"summary-box {class}\" onclick=\"{hook}('{tab}')\">",
                "<div class=\"summary-icon\"><i class=\"fas {icon}\"></i></div>",
                "<div class=\"summary-number\" id=\"{id}\" data-target=\"{value}\">{value}</div>",
                "<div class=\"summary-label\">{label}</div></div>"
            ),
            class = class,
            hook = NAVIGATE_HOOK,
            tab = tab.slug(),
            icon = icon,
            id = slot.element_id(),
            label = label,
            value = slot.target(&payload.resumo),
        );
    }
    html.push_str("</div>\n");
}

fn push_ai_panel(html: &mut String, panel: &AiPanel, stamp: &str) {
    let _ = write!(
        html,
        concat!(
            "<section id=\"{panel_id}\" class=\"card ai-analysis\" style=\"display: {display};\">",
            "<div class=\"card-header\"><h2 class=\"card-title\"><i class=\"fas fa-robot\"></i> Análise de IA</h2>",
            "<span id=\"{stamp_id}\" class=\"ai-analysis-timestamp\">Atualizado em: {stamp}</span></div>",
            "<div id=\"{content_id}\" class=\"ai-analysis-content\">{text}</div></section>\n"
        ),
        panel_id = dom_ids::AI_ANALYSIS,
        display = if panel.visible { "block" } else { "none" },
        stamp_id = dom_ids::AI_ANALYSIS_TIMESTAMP,
        stamp = html_escape(stamp),
        content_id = dom_ids::AI_ANALYSIS_CONTENT,
        text = html_escape(&panel.text),
    );
}

fn push_chart_card(html: &mut String, active: ChartKind) {
    html.push_str(concat!(
        "<section class=\"card chart-card\"><div class=\"card-header\">",
        "<h2 class=\"card-title\"><i class=\"fas fa-chart-pie\"></i> Gráficos</h2><div class=\"chart-tabs\">"
    ));
    for (kind, label) in [
        (ChartKind::Distribuicao, "Distribuição"),
        (ChartKind::Erros, "Erros por Campo"),
        (ChartKind::Telas, "Eventos por Tela"),
    ] {
        let _ = write!(
            html,
            "<button type=\"button\" class=\"chart-tab{active}\" data-chart=\"{slug}\">{label}</button>",
            active = if kind == active { " active" } else { "" },
            slug = kind.slug(),
        );
    }
    let _ = write!(
        html,
        "</div></div><div class=\"chart-container\"><canvas id=\"{}\"></canvas></div></section>\n",
        dom_ids::MAIN_CHART
    );
}

fn push_events_card(
    html: &mut String,
    records: &EventBuckets,
    payload: &ValidationPayload,
    settings: &DashboardSettings,
    now: OffsetDateTime,
) {
    let _ = write!(
        html,
        concat!(
            "<section id=\"{id}\" class=\"card eventos-card\"><div class=\"card-header\">",
            "<h2 class=\"card-title\"><i class=\"fas fa-stream\"></i> Eventos</h2></div><div class=\"tabs\">"
        ),
        id = dom_ids::EVENTS_CARD,
    );
    for (tab, label) in [
        (EventTab::Corretos, "Corretos"),
        (EventTab::Ausentes, "Ausentes"),
        (EventTab::ComErro, "Com Erro"),
    ] {
        let _ = write!(
            html,
            "<div class=\"tab{active}\" data-tab=\"{slug}\">{label}<span class=\"tab-count\">{count}</span></div>",
            active = if tab == settings.default_tab { " active" } else { "" },
            slug = tab.slug(),
            count = payload.resumo.count(tab.kind()),
        );
    }
    html.push_str("</div>");

    for tab in EventTab::ALL {
        let kind: EventKind = tab.kind();
        let body = container_html(records.get(kind), kind, |record| {
            record.display_time(settings.event_time, now)
        });
        let _ = write!(
            html,
            "<div id=\"{content}\" class=\"tab-content{active}\"><div id=\"{container}\" class=\"eventos-container\">{body}</div></div>",
            content = tab.content_id(),
            active = if tab == settings.default_tab { " active" } else { "" },
            container = tab.container_id(),
        );
    }
    html.push_str("</section>\n");
}
