//! Dashboard tunables and where the payload comes from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chart_presets::ChartKind;
use super::record::EventTab;

/// Name of the global the host page assigns the payload to.
pub const PAYLOAD_GLOBAL: &str = "__DADOS_DASHBOARD__";
/// Optional global carrying settings overrides on the web.
pub const SETTINGS_GLOBAL: &str = "__DASHBOARD_SETTINGS__";

pub const PAYLOAD_PATH_ENV: &str = "TAGVALIDATOR_PAYLOAD";
pub const SETTINGS_PATH_ENV: &str = "TAGVALIDATOR_SETTINGS";
pub const DEFAULT_PAYLOAD_FILE: &str = "dashboard_data.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Interval between counter animation frames.
    pub counter_tick_ms: u64,
    /// Counters reach their target in this many frames.
    pub counter_steps: u64,
    /// Matches the duration of the reverse slide animation.
    pub detail_collapse_ms: u64,
    pub default_chart: ChartKind,
    pub default_tab: EventTab,
    pub event_time: EventTimeSource,
    pub payload: PayloadSource,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            counter_tick_ms: 20,
            counter_steps: 25,
            detail_collapse_ms: 280,
            default_chart: ChartKind::Distribuicao,
            default_tab: EventTab::Corretos,
            event_time: EventTimeSource::RenderTime,
            payload: PayloadSource::default(),
        }
    }
}

/// Which timestamp an event card shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTimeSource {
    /// The moment the card was rendered.
    #[default]
    RenderTime,
    /// The event's own timestamp field, falling back to render time.
    EventField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PayloadSource {
    /// A global variable on `window` (web).
    Global(String),
    /// A JSON file on disk (desktop).
    File(PathBuf),
}

impl Default for PayloadSource {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PayloadSource::Global(PAYLOAD_GLOBAL.to_string())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            PayloadSource::File(default_payload_path())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_payload_path() -> PathBuf {
    std::env::var_os(PAYLOAD_PATH_ENV)
        .map(PathBuf::from)
        .or_else(|| std::env::args_os().nth(1).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PAYLOAD_FILE))
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("couldn't read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Settings overrides for this platform, or defaults when none are provided.
    pub fn load() -> Result<Self, SettingsError> {
        #[cfg(target_arch = "wasm32")]
        {
            match super::source::read_global_json(SETTINGS_GLOBAL) {
                Some(raw) => Self::from_json_str(&raw),
                None => Ok(Self::default()),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            match std::env::var_os(SETTINGS_PATH_ENV) {
                Some(path) => {
                    let path = PathBuf::from(path);
                    let raw = std::fs::read_to_string(&path)
                        .map_err(|source| SettingsError::Io { path, source })?;
                    Self::from_json_str(&raw)
                }
                None => Ok(Self::default()),
            }
        }
    }

    /// [`Self::load`], logging and falling back to defaults on failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default dashboard settings");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_timings() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.counter_tick_ms, 20);
        assert_eq!(settings.counter_steps, 25);
        assert_eq!(settings.detail_collapse_ms, 280);
        assert_eq!(settings.default_chart, ChartKind::Distribuicao);
        assert_eq!(settings.event_time, EventTimeSource::RenderTime);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let settings = DashboardSettings::from_json_str(
            r#"{ "counter_tick_ms": 5, "default_chart": "telas", "event_time": "event_field" }"#,
        )
        .unwrap();
        assert_eq!(settings.counter_tick_ms, 5);
        assert_eq!(settings.default_chart, ChartKind::Telas);
        assert_eq!(settings.event_time, EventTimeSource::EventField);
        assert_eq!(settings.counter_steps, 25);
    }

    #[test]
    fn payload_source_is_tagged() {
        let settings = DashboardSettings::from_json_str(
            r#"{ "payload": { "kind": "file", "value": "/tmp/run/dashboard_data.json" } }"#,
        )
        .unwrap();
        assert_eq!(
            settings.payload,
            PayloadSource::File(PathBuf::from("/tmp/run/dashboard_data.json"))
        );
    }

    #[test]
    fn malformed_settings_are_reported() {
        assert!(matches!(
            DashboardSettings::from_json_str("{ nope"),
            Err(SettingsError::Json(_))
        ));
    }
}
