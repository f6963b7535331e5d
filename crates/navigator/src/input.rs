//! Keyboard and touch gestures mapped to navigation actions.

use serde::{Deserialize, Serialize};

/// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    Next,
    Prev,
    First,
    Last,
}

/// Where keyboard focus sits when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    /// An input, textarea or select: keys belong to the field.
    FormField,
}

impl Focus {
    pub fn from_tag_name(tag: &str) -> Self {
        if ["INPUT", "TEXTAREA", "SELECT"]
            .iter()
            .any(|field| field.eq_ignore_ascii_case(tag))
        {
            Focus::FormField
        } else {
            Focus::Page
        }
    }
}

/// Maps a `KeyboardEvent.key` value.
pub fn key_action(key: &str) -> Option<NavAction> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(NavAction::Next),
        "ArrowLeft" | "ArrowUp" => Some(NavAction::Prev),
        "Home" => Some(NavAction::First),
        "End" => Some(NavAction::Last),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Swipe {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
        }
    }
}

/// Horizontal swipes only; a leftward swipe advances.
pub fn swipe_action(swipe: Swipe) -> Option<NavAction> {
    let dx = swipe.start_x - swipe.end_x;
    let dy = swipe.start_y - swipe.end_y;

    if dx.abs() <= dy.abs() || dx.abs() <= MIN_SWIPE_DISTANCE {
        return None;
    }
    if dx > 0.0 {
        Some(NavAction::Next)
    } else {
        Some(NavAction::Prev)
    }
}
