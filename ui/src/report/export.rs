use std::future::Future;

use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::core::config::DashboardSettings;
use crate::core::payload::ValidationPayload;
use crate::dashboard::use_dashboard;
use crate::t;

use super::{json_export, standalone_html, text_report};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("could not save file: {0}")]
    Save(String),
    #[error("{0}")]
    Browser(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

/// Export buttons for the loaded run: raw JSON, a standalone HTML dashboard
/// and the plain-text report.
#[component]
pub fn ExportPanel() -> Element {
    let dashboard = use_dashboard();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);
    let total = dashboard.view.read().current.resumo.total;

    let feedback = match &*status.read() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("export-panel__meta", format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "export-panel__meta export-panel__meta--success",
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-panel__meta export-panel__meta--error",
            format!("⚠️ {err}"),
        )),
    };

    let json_handler = move |_| {
        let payload = dashboard.view.peek().current.clone();
        run_export(status, busy, t!("export-working-json"), perform_json_export(payload));
    };
    let html_handler = move |_| {
        let payload = dashboard.view.peek().current.clone();
        let settings = dashboard.settings.peek().clone();
        run_export(status, busy, t!("export-working-html"), perform_html_export(payload, settings));
    };
    let txt_handler = move |_| {
        let payload = dashboard.view.peek().current.clone();
        run_export(status, busy, t!("export-working-txt"), perform_txt_export(payload));
    };

    let title = t!("export-title");
    let intro = t!("export-intro");
    let summary = t!("export-summary", total = total);

    rsx! {
        section { class: "card export-panel",
            div { class: "card-header",
                h2 { class: "card-title",
                    i { class: "fas fa-file-export" }
                    " {title}"
                }
            }

            if total == 0 {
                p { class: "sem-itens", {t!("export-empty")} }
            } else {
                p { "{intro}" }
                ul { class: "export-panel__summary",
                    li { "{summary}" }
                }

                div { class: "export-panel__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: html_handler,
                        {t!("export-html")}
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: txt_handler,
                        {t!("export-txt")}
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy(),
                        onclick: json_handler,
                        {t!("export-json")}
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}

/// Run one export job, reporting progress through `status`. Ignored while
/// another export is in flight.
fn run_export<F>(mut status: Signal<ExportStatus>, mut busy: Signal<bool>, label: String, job: F)
where
    F: Future<Output = Result<String, ExportError>> + 'static,
{
    if *busy.peek() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working(label));

    #[cfg(target_arch = "wasm32")]
    spawn(async move {
        let outcome = job.await;
        finish_export(status, busy, outcome);
    });

    #[cfg(not(target_arch = "wasm32"))]
    finish_export(status, busy, futures::executor::block_on(job));
}

fn finish_export(
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
    outcome: Result<String, ExportError>,
) {
    match outcome {
        Ok(message) => {
            tracing::info!(%message, "export finished");
            status.set(ExportStatus::Done(message));
        }
        Err(err) => {
            tracing::warn!(%err, "export failed");
            status.set(ExportStatus::Error(err.to_string()));
        }
    }
    busy.set(false);
}

async fn perform_json_export(payload: ValidationPayload) -> Result<String, ExportError> {
    let json = json_export(&payload)?;
    copy_to_clipboard(json.clone()).await?;
    let filename = format!("tagvalidator-dados-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => t!("export-json-saved", path = path),
        None => t!("export-json-downloaded"),
    })
}

async fn perform_html_export(
    payload: ValidationPayload,
    settings: DashboardSettings,
) -> Result<String, ExportError> {
    let html = standalone_html(&payload, &settings, OffsetDateTime::now_utc())?;
    let filename = format!("dashboard-{}.html", timestamp_slug());
    let delivery = download_bytes(&filename, "text/html", html.into_bytes()).await?;
    Ok(saved_message(delivery))
}

async fn perform_txt_export(payload: ValidationPayload) -> Result<String, ExportError> {
    let report = text_report(&payload, OffsetDateTime::now_utc());
    let filename = format!("relatorio_validacao-{}.txt", timestamp_slug());
    let delivery = download_bytes(&filename, "text/plain", report.into_bytes()).await?;
    Ok(saved_message(delivery))
}

fn saved_message(delivery: Option<String>) -> String {
    match delivery {
        Some(path) => t!("export-file-saved", path = path),
        None => t!("export-file-downloaded"),
    }
}

fn timestamp_slug() -> String {
    use time::macros::format_description;

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or(ExportError::Browser("window unavailable"))?;
        let document = window
            .document()
            .ok_or(ExportError::Browser("document unavailable"))?;
        let body = document.body().ok_or(ExportError::Browser("missing body"))?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| ExportError::Browser("unable to create textarea"))?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| ExportError::Browser("textarea cast failed"))?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()
            .and_then(|html| html.exec_command("copy").ok())
            .unwrap_or(false);
        textarea.remove();
        if !copied {
            return Err(ExportError::Clipboard("copy blocked by the browser".into()));
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard =
            Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

/// Hand `bytes` to the user: a browser download on web, a file under the
/// app's data directory on desktop (whose path is returned).
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Browser("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Browser("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Browser("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Browser("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| ExportError::Browser("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or(ExportError::Browser("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| ExportError::Save(err.to_string()))?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| ExportError::Save(err.to_string()))?;
        file.write_all(&bytes)
            .map_err(|err| ExportError::Save(err.to_string()))?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "TagValidator", "TagValidator")
        .ok_or_else(|| ExportError::Save("unable to determine export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_slug_is_filename_safe() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), "20240101_000000".len());
        assert!(slug.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn saved_message_names_the_desktop_path() {
        crate::i18n::init();
        let message = saved_message(Some("/tmp/exports/dashboard.html".into()));
        assert!(message.contains("/tmp/exports/dashboard.html"));
        assert_eq!(saved_message(None), "Download iniciado");
    }
}
