//! Counter and detail-panel animation state, kept free of timers so the
//! dashboard can drive it from whatever scheduler the platform offers.

use std::collections::HashMap;

use super::payload::Summary;

/// Frames of a counter counting up from `start` to `target`.
///
/// Each frame adds `ceil(target / steps)`; the last frame is exactly
/// `target` and no frame exceeds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    current: u64,
    target: u64,
    step: u64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(start: u64, target: u64, steps: u64) -> Self {
        Self {
            current: start,
            target,
            step: target.div_ceil(steps.max(1)),
            done: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.current = self.current.saturating_add(self.step);
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(self.current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterSlot {
    Corretos,
    Ausentes,
    ComErro,
    Total,
}

impl CounterSlot {
    pub const ALL: [CounterSlot; 4] = [
        CounterSlot::Corretos,
        CounterSlot::Ausentes,
        CounterSlot::ComErro,
        CounterSlot::Total,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            CounterSlot::Corretos => "total-corretos",
            CounterSlot::Ausentes => "total-ausentes",
            CounterSlot::ComErro => "total-com-erro",
            CounterSlot::Total => "total-eventos",
        }
    }

    pub fn target(self, resumo: &Summary) -> u64 {
        match self {
            CounterSlot::Corretos => resumo.corretos,
            CounterSlot::Ausentes => resumo.ausentes,
            CounterSlot::ComErro => resumo.com_erro,
            CounterSlot::Total => resumo.total,
        }
    }

    fn index(self) -> usize {
        match self {
            CounterSlot::Corretos => 0,
            CounterSlot::Ausentes => 1,
            CounterSlot::ComErro => 2,
            CounterSlot::Total => 3,
        }
    }
}

/// Displayed counter values plus a generation per slot. Starting a new
/// animation bumps the generation; frames carrying an older one are dropped,
/// so a restarted counter never has two loops writing to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterBoard {
    shown: [u64; 4],
    generation: [u64; 4],
}

impl CounterBoard {
    pub fn shown(&self, slot: CounterSlot) -> u64 {
        self.shown[slot.index()]
    }

    /// Start animating `slot` towards `target` from whatever it currently shows.
    pub fn start(&mut self, slot: CounterSlot, target: u64, steps: u64) -> (u64, CounterAnimation) {
        let idx = slot.index();
        self.generation[idx] += 1;
        (
            self.generation[idx],
            CounterAnimation::new(self.shown[idx], target, steps),
        )
    }

    /// Apply one frame. Returns `false` once the frame's animation was
    /// superseded and the caller should stop.
    pub fn apply(&mut self, slot: CounterSlot, generation: u64, value: u64) -> bool {
        let idx = slot.index();
        if self.generation[idx] != generation {
            return false;
        }
        self.shown[idx] = value;
        true
    }
}

pub const SLIDE_DOWN_STYLE: &str = "display: block; animation: slideDown 0.3s ease forwards;";
pub const SLIDE_UP_STYLE: &str = "display: block; animation: slideDown 0.3s ease reverse forwards;";
pub const HIDDEN_STYLE: &str = "display: none;";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailPanel {
    #[default]
    Collapsed,
    Expanded,
    /// Reverse animation playing; hidden once the matching delay elapses.
    Collapsing { token: u64 },
}

impl DetailPanel {
    pub fn style(self) -> &'static str {
        match self {
            DetailPanel::Collapsed => HIDDEN_STYLE,
            DetailPanel::Expanded => SLIDE_DOWN_STYLE,
            DetailPanel::Collapsing { .. } => SLIDE_UP_STYLE,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, DetailPanel::Expanded)
    }
}

/// Per-event detail panels, all collapsed until toggled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPanels {
    panels: HashMap<String, DetailPanel>,
    next_token: u64,
}

impl DetailPanels {
    pub fn get(&self, id: &str) -> DetailPanel {
        self.panels.get(id).copied().unwrap_or_default()
    }

    /// Expand a collapsed (or collapsing) panel, or start collapsing an
    /// expanded one. When collapsing, returns the token the caller must hand
    /// back to [`Self::finish_collapse`] after the animation delay.
    pub fn toggle(&mut self, id: &str) -> Option<u64> {
        let next = match self.get(id) {
            DetailPanel::Collapsed | DetailPanel::Collapsing { .. } => DetailPanel::Expanded,
            DetailPanel::Expanded => {
                self.next_token += 1;
                DetailPanel::Collapsing {
                    token: self.next_token,
                }
            }
        };
        self.panels.insert(id.to_string(), next);
        match next {
            DetailPanel::Collapsing { token } => Some(token),
            _ => None,
        }
    }

    /// Hide the panel if it is still collapsing under `token`.
    pub fn finish_collapse(&mut self, id: &str, token: u64) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) if *panel == (DetailPanel::Collapsing { token }) => {
                *panel = DetailPanel::Collapsed;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }
}
