//! The page the navigator drives: address bar, history stack and viewport.

use shared::{domain::SectionId, protocol::HistoryState};
use url::Url;

pub trait PageHost: Send {
    /// Current URL fragment without the leading `#`, if any.
    fn fragment(&self) -> Option<String>;
    fn push_state(&mut self, state: HistoryState, fragment: &str);
    fn replace_state(&mut self, state: HistoryState, fragment: &str);
    fn scroll_to_top(&mut self, section: &SectionId);
}

#[derive(Debug, Clone, PartialEq)]
struct HistoryEntry {
    state: serde_json::Value,
    fragment: Option<String>,
}

/// History stack kept in memory, with browser back/forward semantics.
///
/// Used by the command-line walk-through and by tests.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    base: Url,
    entries: Vec<HistoryEntry>,
    cursor: usize,
    pushes: usize,
    scrolled_to: Vec<SectionId>,
}

impl InMemoryHost {
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url)?;
        let fragment = parsed.fragment().map(str::to_string);
        let mut base = parsed;
        base.set_fragment(None);

        Ok(Self {
            base,
            entries: vec![HistoryEntry {
                state: serde_json::Value::Null,
                fragment,
            }],
            cursor: 0,
            pushes: 0,
            scrolled_to: Vec::new(),
        })
    }

    /// Moves one entry back and returns the state the page would receive in
    /// its `popstate` event, or `None` at the start of the stack.
    pub fn back(&mut self) -> Option<serde_json::Value> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].state.clone())
    }

    pub fn forward(&mut self) -> Option<serde_json::Value> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].state.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_count(&self) -> usize {
        self.pushes
    }

    pub fn current_state(&self) -> &serde_json::Value {
        &self.entries[self.cursor].state
    }

    pub fn current_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_fragment(self.entries[self.cursor].fragment.as_deref());
        url
    }

    pub fn scrolled_to(&self) -> &[SectionId] {
        &self.scrolled_to
    }
}

impl PageHost for InMemoryHost {
    fn fragment(&self) -> Option<String> {
        self.entries[self.cursor].fragment.clone()
    }

    fn push_state(&mut self, state: HistoryState, fragment: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            state: state.to_value(),
            fragment: Some(fragment.to_string()),
        });
        self.cursor = self.entries.len() - 1;
        self.pushes += 1;
    }

    fn replace_state(&mut self, state: HistoryState, fragment: &str) {
        self.entries[self.cursor] = HistoryEntry {
            state: state.to_value(),
            fragment: Some(fragment.to_string()),
        };
    }

    fn scroll_to_top(&mut self, section: &SectionId) {
        self.scrolled_to.push(section.clone());
    }
}
