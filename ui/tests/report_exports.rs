use serde_json::json;
use time::macros::datetime;

use ui::core::config::{DashboardSettings, EventTimeSource};
use ui::core::payload::ValidationPayload;
use ui::report::{json_export, standalone_html, text_report};

fn sample() -> ValidationPayload {
    serde_json::from_value(json!({
        "resumo": { "corretos": 1, "ausentes": 1, "com_erro": 0, "total": 2 },
        "eventos": {
            "corretos": [{ "ID": "1", "TELA": "home", "timestamp": "2024-02-10T08:30:00Z" }],
            "ausentes": [{ "ID": "2", "evento": { "ID": "2", "TELA": "perfil", "ZETA": "z", "ALFA": "a" } }]
        },
        "eventos_por_tela": { "home": 1, "perfil": 1 }
    }))
    .unwrap()
}

#[test]
fn json_export_keeps_payload_field_order() {
    let json = json_export(&sample()).unwrap();
    let zeta = json.find("\"ZETA\"").unwrap();
    let alfa = json.find("\"ALFA\"").unwrap();
    assert!(zeta < alfa, "fields were reordered:\n{json}");
}

#[test]
fn snapshot_honours_event_time_setting() {
    let settings = DashboardSettings {
        event_time: EventTimeSource::EventField,
        ..DashboardSettings::default()
    };
    let html = standalone_html(&sample(), &settings, datetime!(2030-01-01 0:00 UTC)).unwrap();
    assert!(html.contains("/2024 "));
    assert!(html.contains("evento-data evento-data--render"), "the event without timestamp falls back to render time");

    let render_only = standalone_html(&sample(), &DashboardSettings::default(), datetime!(2030-01-01 0:00 UTC)).unwrap();
    assert!(!render_only.contains("/2024 "));
}

#[test]
fn text_report_lists_missing_event_fields() {
    let report = text_report(&sample(), datetime!(2024-05-01 12:00 UTC));
    assert!(report.contains("### Evento Ausente #1"));
    assert!(report.contains("- **Tela:** perfil"));
    assert!(report.contains("- **ZETA:** z"));
    assert!(report.contains("(50.0%)"));
}
