//! Scripted navigation over an in-memory page, one token per move.

use std::str::FromStr;

use anyhow::{bail, Context};
use navigator::{Focus, InMemoryHost, NavAction, StepNavigator, Swipe};

#[derive(Debug, Clone, PartialEq)]
pub enum WalkStep {
    Action(NavAction),
    Restart,
    /// 1-based, as in `#paso-K`.
    GoTo(usize),
    Back,
    Forward,
    Key(String),
    Swipe(Swipe),
}

impl FromStr for WalkStep {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let step = match raw {
            "next" => WalkStep::Action(NavAction::Next),
            "prev" => WalkStep::Action(NavAction::Prev),
            "first" => WalkStep::Action(NavAction::First),
            "last" => WalkStep::Action(NavAction::Last),
            "restart" => WalkStep::Restart,
            "back" => WalkStep::Back,
            "forward" => WalkStep::Forward,
            "swipe:left" => WalkStep::Swipe(Swipe::new((300.0, 200.0), (100.0, 200.0))),
            "swipe:right" => WalkStep::Swipe(Swipe::new((100.0, 200.0), (300.0, 200.0))),
            _ => {
                if let Some(step) = raw.strip_prefix("goto:") {
                    let step = step
                        .parse::<usize>()
                        .with_context(|| format!("invalid step number in '{raw}'"))?;
                    WalkStep::GoTo(step)
                } else if let Some(key) = raw.strip_prefix("key:") {
                    WalkStep::Key(key.to_string())
                } else {
                    bail!("unknown walk step '{raw}'");
                }
            }
        };
        Ok(step)
    }
}

/// Applies one step. Returns whether the navigator accepted it.
pub fn apply(navigator: &mut StepNavigator<InMemoryHost>, step: &WalkStep) -> bool {
    match step {
        WalkStep::Action(action) => navigator.apply(*action),
        WalkStep::Restart => navigator.restart(),
        WalkStep::GoTo(step) => step
            .checked_sub(1)
            .is_some_and(|index| navigator.go_to(index)),
        WalkStep::Back => {
            let state = navigator.host_mut().back();
            state.is_some() && navigator.handle_pop_state(state.as_ref())
        }
        WalkStep::Forward => {
            let state = navigator.host_mut().forward();
            state.is_some() && navigator.handle_pop_state(state.as_ref())
        }
        WalkStep::Key(key) => navigator.handle_key(key, Focus::Page),
        WalkStep::Swipe(swipe) => navigator.handle_swipe(*swipe),
    }
}

#[cfg(test)]
#[path = "tests/walk_tests.rs"]
mod tests;
