//! Render layer: the application context shared by every dashboard widget,
//! and the widgets themselves.

mod ai_panel;
pub use ai_panel::AiAnalysisPanel;

mod chart;
pub use chart::{ChartCard, ScriptChartHost};
pub(crate) use chart::CHART_BRIDGE_JS;

mod events;
pub use events::{EventCard, EventsCard, FilterBar};

mod summary;
pub use summary::SummaryBoxes;

use dioxus::prelude::*;

use crate::core::animation::{CounterBoard, CounterSlot, DetailPanels};
use crate::core::chart_presets::ChartKind;
use crate::core::config::DashboardSettings;
use crate::core::format::format_now;
use crate::core::record::EventTab;
use crate::core::source::PayloadState;
use crate::core::state::ViewState;
use crate::core::timing::sleep_ms;

/// Element ids the dashboard markup guarantees.
pub mod dom_ids {
    pub const DASHBOARD_TIMESTAMP: &str = "dashboard-timestamp";
    pub const AI_ANALYSIS: &str = "ai-analysis";
    pub const AI_ANALYSIS_CONTENT: &str = "ai-analysis-content";
    pub const AI_ANALYSIS_TIMESTAMP: &str = "ai-analysis-timestamp";
    pub const MAIN_CHART: &str = "main-chart";
    pub const EVENTS_CARD: &str = "eventos-card";
    pub const EVENT_FILTER: &str = "event-filter";
}

/// Everything the dashboard widgets share, built once per app and handed out
/// through context. Every field is a signal, so the context is `Copy`.
#[derive(Clone, Copy, PartialEq)]
pub struct DashboardContext {
    pub settings: Signal<DashboardSettings>,
    pub view: Signal<ViewState>,
    pub load_error: Signal<Option<String>>,
    pub counters: Signal<CounterBoard>,
    pub details: Signal<DetailPanels>,
    pub active_tab: Signal<EventTab>,
    pub active_chart: Signal<ChartKind>,
    pub chart_host: Signal<ScriptChartHost>,
    /// Wall-clock time of the last setup, already formatted.
    pub stamp: Signal<String>,
}

impl DashboardContext {
    fn new(settings: DashboardSettings, loaded: PayloadState) -> Self {
        Self {
            active_tab: Signal::new(settings.default_tab),
            active_chart: Signal::new(settings.default_chart),
            settings: Signal::new(settings),
            view: Signal::new(ViewState::new(loaded.payload)),
            load_error: Signal::new(loaded.error),
            counters: Signal::new(CounterBoard::default()),
            details: Signal::new(DetailPanels::default()),
            chart_host: Signal::new(ScriptChartHost::default()),
            stamp: Signal::new(String::new()),
        }
    }

    /// Bring the dashboard to its initial state: stamps, counters, default tab
    /// and chart. Running it again re-derives everything from the loaded
    /// payload.
    pub fn setup(mut self) {
        let payload = self.view.peek().current.clone();
        self.view.write().load(payload);
        self.details.write().clear();

        let (default_tab, default_chart) = {
            let settings = self.settings.peek();
            (settings.default_tab, settings.default_chart)
        };
        self.active_tab.set(default_tab);
        self.stamp.set(format_now());

        self.animate_counters();
        self.switch_chart_tab(default_chart);
        tracing::info!(
            total = self.view.peek().current.resumo.total,
            "dashboard initialised"
        );
    }

    pub fn animate_counters(self) {
        let resumo = self.view.peek().filtered.resumo;
        for slot in CounterSlot::ALL {
            self.animate_counter(slot, slot.target(&resumo));
        }
    }

    /// Count `slot` up to `target` from its displayed value. A newer animation
    /// on the same slot stops this one.
    pub fn animate_counter(mut self, slot: CounterSlot, target: u64) {
        let (tick_ms, steps) = {
            let settings = self.settings.peek();
            (settings.counter_tick_ms, settings.counter_steps)
        };
        let (generation, frames) = self.counters.write().start(slot, target, steps);

        spawn(async move {
            for value in frames {
                sleep_ms(tick_ms).await;
                if !self.counters.write().apply(slot, generation, value) {
                    break;
                }
            }
        });
    }

    /// Replace whatever chart is on the canvas with `kind`.
    pub fn render_chart(mut self, kind: ChartKind) {
        let mut host = self.chart_host.write();
        if let Err(err) = self
            .view
            .write()
            .render_chart(&mut *host, dom_ids::MAIN_CHART, kind)
        {
            tracing::warn!(%err, chart = kind.slug(), "chart render failed");
        }
    }

    pub fn release_chart(mut self) {
        let mut host = self.chart_host.write();
        self.view.write().release_chart(&mut *host);
    }

    pub fn toggle_detail(mut self, dom_id: String) {
        let Some(token) = self.details.write().toggle(&dom_id) else {
            return;
        };
        let delay = self.settings.peek().detail_collapse_ms;
        spawn(async move {
            sleep_ms(delay).await;
            self.details.write().finish_collapse(&dom_id, token);
        });
    }

    pub fn switch_tab(mut self, tab: EventTab) {
        self.active_tab.set(tab);
    }

    pub fn switch_chart_tab(mut self, kind: ChartKind) {
        self.active_chart.set(kind);
        self.render_chart(kind);
    }

    /// Activate the tab named by `slug` and scroll the events card into view.
    /// Unknown slugs are ignored.
    pub fn navigate_to_tab(self, slug: &str) {
        let Some(tab) = EventTab::from_slug(slug) else {
            tracing::debug!(slug, "ignoring navigation to unknown tab");
            return;
        };
        self.switch_tab(tab);
        let _ = document::eval(&format!(
            "document.getElementById('{}')?.scrollIntoView({{ behavior: 'smooth', block: 'start' }});",
            dom_ids::EVENTS_CARD
        ));
    }

    /// Narrow every widget to events matching `query`; counters re-animate
    /// and the chart is redrawn from the recounted payload.
    pub fn apply_filter(mut self, query: &str) {
        self.view.write().apply_filter(query);
        self.details.write().clear();
        self.animate_counters();
        let kind = *self.active_chart.peek();
        self.render_chart(kind);
    }
}

/// Build the dashboard context from settings and the configured payload
/// source, and provide it to every descendant.
pub fn use_dashboard_provider() -> DashboardContext {
    use_context_provider(|| {
        let settings = DashboardSettings::load_or_default();
        let loaded = PayloadState::load(&settings.payload);
        DashboardContext::new(settings, loaded)
    })
}

pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>()
}
