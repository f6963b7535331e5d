use std::collections::HashSet;

use serde::Serialize;
use shared::{
    domain::{Section, SectionId},
    protocol::{fragment_for_step, step_from_fragment, GuideEvent, HistoryState},
};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

pub mod host;
pub mod input;

pub use host::{InMemoryHost, PageHost};
pub use input::{Focus, NavAction, Swipe};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("a guide needs at least one section")]
    NoSections,
    #[error("duplicate section id {0}")]
    DuplicateSection(SectionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    HistoryReplay,
}

/// Where a section sits relative to the active one; drives transition styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPosition {
    Before,
    Current,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressDot {
    pub active: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardControl {
    Next,
    /// Last section: jump back to the first.
    Restart,
    /// The form section advances through its own submit buttons.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionControls {
    pub prev: bool,
    pub label: String,
    pub forward: ForwardControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub current_index: usize,
    pub total: usize,
}

/// Linear step controller over a fixed list of sections.
///
/// User-initiated moves push one history entry per index change; moves
/// replayed from the history stack never push. Every accepted move publishes
/// a [`GuideEvent::StepChanged`] after the index is updated.
pub struct StepNavigator<H: PageHost> {
    sections: Vec<Section>,
    current: usize,
    host: H,
    events: broadcast::Sender<GuideEvent>,
}

impl<H: PageHost> StepNavigator<H> {
    pub fn new(sections: Vec<Section>, host: H) -> Result<Self, NavigationError> {
        if sections.is_empty() {
            return Err(NavigationError::NoSections);
        }
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id.clone()) {
                return Err(NavigationError::DuplicateSection(section.id.clone()));
            }
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            sections,
            current: 0,
            host,
            events,
        })
    }

    /// Shows the step encoded in the URL fragment (or the first one) and
    /// replaces the current history entry with it.
    pub fn start(&mut self) -> usize {
        let initial = self
            .host
            .fragment()
            .and_then(|fragment| step_from_fragment(&fragment, self.total()))
            .unwrap_or(0);

        self.transition(initial, Origin::HistoryReplay);
        self.host
            .replace_state(HistoryState::new(initial), &fragment_for_step(initial));

        info!(
            total = self.total(),
            initial_step = initial,
            "guide navigator started"
        );
        initial
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<GuideEvent> {
        self.events.subscribe()
    }

    pub fn event_sender(&self) -> broadcast::Sender<GuideEvent> {
        self.events.clone()
    }

    /// Out-of-range indices are ignored and return `false`.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.transition(index, Origin::User)
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn restart(&mut self) -> bool {
        self.go_to(0)
    }

    /// Browser back/forward. States without a numeric `step` are ignored.
    pub fn handle_pop_state(&mut self, state: Option<&serde_json::Value>) -> bool {
        match state.and_then(HistoryState::from_value) {
            Some(state) => self.transition(state.step, Origin::HistoryReplay),
            None => {
                debug!("ignoring history entry without a step");
                false
            }
        }
    }

    pub fn apply(&mut self, action: NavAction) -> bool {
        match action {
            NavAction::Next => self.next(),
            NavAction::Prev => self.prev(),
            NavAction::First => self.go_to(0),
            NavAction::Last => self.go_to(self.total() - 1),
        }
    }

    /// Returns whether the key was consumed (the caller prevents the default).
    pub fn handle_key(&mut self, key: &str, focus: Focus) -> bool {
        if focus == Focus::FormField || self.current_section().is_form() {
            return false;
        }
        match input::key_action(key) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn handle_swipe(&mut self, swipe: Swipe) -> bool {
        if self.current_section().is_form() {
            return false;
        }
        input::swipe_action(swipe).is_some_and(|action| self.apply(action))
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.sections.len()
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current,
            total: self.total(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn current_section(&self) -> &Section {
        &self.sections[self.current]
    }

    pub fn position_of(&self, index: usize) -> SectionPosition {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => SectionPosition::Before,
            std::cmp::Ordering::Equal => SectionPosition::Current,
            std::cmp::Ordering::Greater => SectionPosition::After,
        }
    }

    pub fn positions(&self) -> Vec<SectionPosition> {
        (0..self.total()).map(|i| self.position_of(i)).collect()
    }

    pub fn progress_dots(&self) -> Vec<ProgressDot> {
        (0..self.total())
            .map(|i| ProgressDot {
                active: i == self.current,
                completed: i < self.current,
            })
            .collect()
    }

    /// Fraction of the guide reached, `(current + 1) / total`.
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.total() as f64
    }

    pub fn controls_for(&self, index: usize) -> Option<SectionControls> {
        let section = self.sections.get(index)?;
        let forward = if section.is_form() {
            ForwardControl::None
        } else if index + 1 < self.total() {
            ForwardControl::Next
        } else {
            ForwardControl::Restart
        };

        Some(SectionControls {
            prev: index > 0,
            label: format!("{} / {}", index + 1, self.total()),
            forward,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn transition(&mut self, index: usize, origin: Origin) -> bool {
        if index >= self.total() {
            debug!(
                requested = index,
                total = self.total(),
                "ignoring out-of-range step"
            );
            return false;
        }

        let previous = self.current;
        self.current = index;

        let section_id = self.sections[index].id.clone();
        self.host.scroll_to_top(&section_id);

        if origin == Origin::User && previous != index {
            self.host
                .push_state(HistoryState::new(index), &fragment_for_step(index));
        }

        debug!(
            from = previous,
            to = index,
            section = %section_id,
            replay = origin == Origin::HistoryReplay,
            "step changed"
        );
        let _ = self.events.send(GuideEvent::StepChanged {
            current_index: index,
            previous_index: previous,
            section_id,
        });
        true
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
