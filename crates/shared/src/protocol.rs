use serde::{Deserialize, Serialize};

use crate::domain::SectionId;

pub const STEP_FRAGMENT_PREFIX: &str = "paso-";

/// State object attached to every history entry the navigator writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub step: usize,
}

impl HistoryState {
    pub fn new(step: usize) -> Self {
        Self { step }
    }

    /// Reads a state object written by any page script. Objects without a
    /// numeric `step` are not ours and yield `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let step = value.get("step")?;
        let step = match step.as_u64() {
            Some(step) => step,
            // `2.0` is as good a step as `2`
            None => {
                let step = step.as_f64()?;
                if step < 0.0 || step.fract() != 0.0 || step > u64::MAX as f64 {
                    return None;
                }
                step as u64
            }
        };
        usize::try_from(step).ok().map(Self::new)
    }

    pub fn to_value(self) -> serde_json::Value {
        serde_json::json!({ "step": self.step })
    }
}

/// `paso-K` for the 0-based index `K-1`.
pub fn fragment_for_step(index: usize) -> String {
    format!("{STEP_FRAGMENT_PREFIX}{}", index + 1)
}

/// Parses `paso-K` (with or without a leading `#`) back into a 0-based
/// index, rejecting anything outside `1..=total`.
pub fn step_from_fragment(fragment: &str, total: usize) -> Option<usize> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let number = fragment.strip_prefix(STEP_FRAGMENT_PREFIX)?;
    let step: usize = number.parse().ok()?;
    (1..=total).contains(&step).then(|| step - 1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum GuideEvent {
    StepChanged {
        current_index: usize,
        previous_index: usize,
        section_id: SectionId,
    },
    ProfileChanged {
        is_example: bool,
    },
    ProfileCleared,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
