//! Every class the dashboard markup emits must be styled by the shared theme,
//! both for the live widgets and for the exported snapshot.

use crate::core::fragments::container_html;
use crate::core::payload::ValidationPayload;
use crate::core::record::{DisplayTime, EventBuckets, EventKind};
use crate::THEME_CSS;

const WIDGET_CLASSES: &[&str] = &[
    ".summary-container",
    ".summary-box",
    ".summary-box.correto",
    ".summary-box.ausente",
    ".summary-box.com-erro",
    ".summary-box.total",
    ".summary-number",
    ".summary-label",
    ".chart-tab.active",
    ".chart-container",
    ".tab.active",
    ".tab-content.active",
    ".ai-analysis-content",
    ".event-filter",
    ".load-error",
    "@keyframes slideDown",
];

/// Pull every `class="..."` token out of rendered fragment markup.
fn classes_in(html: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("class=\"") {
        let tail = &rest[start + 7..];
        let Some(end) = tail.find('"') else { break };
        for class in tail[..end].split_whitespace() {
            // Font Awesome classes come from the CDN stylesheet.
            if !class.starts_with("fa") {
                found.push(class.to_string());
            }
        }
        rest = &tail[end..];
    }
    found.sort();
    found.dedup();
    found
}

#[test]
fn widget_selectors_are_styled() {
    for selector in WIDGET_CLASSES {
        assert!(THEME_CSS.contains(selector), "theme lacks `{selector}`");
    }
}

#[test]
fn fragment_classes_are_styled() {
    let payload: ValidationPayload = serde_json::from_value(serde_json::json!({
        "eventos": {
            "corretos": [{ "ID": "1" }],
            "ausentes": [{ "ID": "2", "evento": { "ID": "2" } }],
            "com_erro": [{
                "ID": "3",
                "evento": { "ID": "3" },
                "log": { "ID": "3" },
                "diferencas": { "TELA": { "esperado": "a", "log": "b" } }
            }, {
                "ID": "4",
                "evento": { "ID": "4" },
                "log": { "ID": "4" }
            }]
        }
    }))
    .unwrap();
    let buckets = EventBuckets::ingest(&payload);

    let mut html = container_html(&[], EventKind::Correct, |_| DisplayTime {
        text: String::new(),
        is_render_time: true,
    });
    for kind in EventKind::ALL {
        html.push_str(&container_html(buckets.get(kind), kind, |_| DisplayTime {
            text: "01/01/2024, 10:00:00".into(),
            is_render_time: true,
        }));
    }

    for class in classes_in(&html) {
        assert!(
            THEME_CSS.contains(&format!(".{class}")),
            "fragment class `{class}` has no rule in the theme"
        );
    }
}
