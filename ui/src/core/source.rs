//! Payload ingestion: the page global on the web, a JSON file on desktop.

use std::path::PathBuf;

use thiserror::Error;

use super::config::PayloadSource;
use super::payload::ValidationPayload;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("global `{0}` is not defined")]
    MissingGlobal(String),
    #[error("payload source not available on this platform")]
    Unsupported,
    #[error("couldn't read payload from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_payload(raw: &str) -> Result<ValidationPayload, PayloadError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_payload(source: &PayloadSource) -> Result<ValidationPayload, PayloadError> {
    match source {
        PayloadSource::Global(name) => {
            let raw = read_global_json(name).ok_or_else(|| PayloadError::MissingGlobal(name.clone()))?;
            parse_payload(&raw)
        }
        PayloadSource::File(path) => {
            #[cfg(not(target_arch = "wasm32"))]
            {
                let raw = std::fs::read_to_string(path).map_err(|source| PayloadError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_payload(&raw)
            }

            #[cfg(target_arch = "wasm32")]
            {
                let _ = path;
                Err(PayloadError::Unsupported)
            }
        }
    }
}

/// JSON text of `window[name]`, if the global is set.
#[cfg(target_arch = "wasm32")]
pub(crate) fn read_global_json(name: &str) -> Option<String> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn read_global_json(_name: &str) -> Option<String> {
    None
}

/// Loaded payload or the reason it couldn't be loaded, ready for the views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadState {
    pub payload: ValidationPayload,
    pub error: Option<String>,
}

impl PayloadState {
    pub fn load(source: &PayloadSource) -> Self {
        match load_payload(source) {
            Ok(payload) => Self {
                payload,
                error: None,
            },
            Err(err) => {
                tracing::error!(%err, "validation payload unavailable");
                Self {
                    payload: ValidationPayload::default(),
                    error: Some(format!("Couldn't load validation data: {err}")),
                }
            }
        }
    }
}
