//! Input decoding
//!
//! Hosts translate their raw events into [`Intent`]s (one-shot actions) and a
//! held [`TickInput`](crate::sim::TickInput) for steering. Key names follow
//! the DOM `KeyboardEvent.key` convention.

/// Minimum horizontal travel for a touch gesture to count as a swipe
pub const MIN_SWIPE: f32 = 40.0;

/// One-shot player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Confirm,
    PauseToggle,
    Boost,
    Quit,
    RetryYes,
    RetryNo,
    /// Zero-based vehicle index
    SelectVehicle(usize),
    SwipeLeft,
    SwipeRight,
}

impl Intent {
    /// Map a key name to its action, if it has one
    pub fn from_key(key: &str) -> Option<Self> {
        let intent = match key {
            " " | "Enter" => Intent::Confirm,
            "p" | "P" => Intent::PauseToggle,
            "Shift" => Intent::Boost,
            "Escape" => Intent::Quit,
            "y" | "Y" => Intent::RetryYes,
            "n" | "N" => Intent::RetryNo,
            "1" => Intent::SelectVehicle(0),
            "2" => Intent::SelectVehicle(1),
            "3" => Intent::SelectVehicle(2),
            _ => return None,
        };
        Some(intent)
    }
}

/// Held steering keys
pub fn held_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Classify a finished touch gesture by its total displacement
pub fn classify_swipe(dx: f32, dy: f32) -> Option<Intent> {
    if dx.abs() < MIN_SWIPE || dx.abs() <= dy.abs() {
        return None;
    }
    Some(if dx < 0.0 {
        Intent::SwipeLeft
    } else {
        Intent::SwipeRight
    })
}
