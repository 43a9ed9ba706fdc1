//! Keyboard and button input
//!
//! Press/release events update `InputTracker`; the frame loop reads one
//! `TickInput` snapshot per frame. Momentary keys (boost, pause, restart)
//! come back as `Action`s for the caller to apply immediately.

use crate::sim::{Directions, TickInput};

/// A held movement control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

impl Control {
    /// Map a `KeyboardEvent.key` value to a movement control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Control::Up),
            "ArrowDown" | "s" | "S" => Some(Control::Down),
            "ArrowLeft" | "a" | "A" => Some(Control::Left),
            "ArrowRight" | "d" | "D" => Some(Control::Right),
            _ => None,
        }
    }
}

/// One-shot commands triggered by a key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Boost,
    BoostRelease,
    TogglePause,
    Restart,
    ToggleIdle,
}

impl Action {
    /// Map a key press to an action
    pub fn from_key_down(key: &str) -> Option<Self> {
        match key {
            " " => Some(Action::Boost),
            "p" | "P" => Some(Action::TogglePause),
            "r" | "R" => Some(Action::Restart),
            "i" | "I" => Some(Action::ToggleIdle),
            _ => None,
        }
    }

    /// Map a key release to an action
    pub fn from_key_up(key: &str) -> Option<Self> {
        match key {
            " " => Some(Action::BoostRelease),
            _ => None,
        }
    }
}

/// Held-control state, read once per frame
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    directions: Directions,
    idle_mode: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release a movement control (keys and on-screen buttons)
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Up => self.directions.up = pressed,
            Control::Down => self.directions.down = pressed,
            Control::Left => self.directions.left = pressed,
            Control::Right => self.directions.right = pressed,
        }
    }

    /// Key pressed; returns an action if the key is a one-shot command
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        if let Some(action) = Action::from_key_down(key) {
            if action == Action::ToggleIdle {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
            return Some(action);
        }
        if let Some(control) = Control::from_key(key) {
            self.set(control, true);
        }
        None
    }

    /// Key released
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        if let Some(action) = Action::from_key_up(key) {
            return Some(action);
        }
        if let Some(control) = Control::from_key(key) {
            self.set(control, false);
        }
        None
    }

    /// Release everything (focus lost, restart)
    pub fn clear(&mut self) {
        self.directions = Directions::default();
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Input for this frame
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            directions: self.directions,
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_share_controls() {
        let mut input = InputTracker::new();
        assert_eq!(input.key_down("W"), None);
        assert_eq!(input.key_down("ArrowRight"), None);
        let snap = input.snapshot();
        assert!(snap.directions.up && snap.directions.right);

        input.key_up("w");
        input.key_up("ArrowRight");
        assert_eq!(input.snapshot().directions, Directions::default());
    }

    #[test]
    fn test_actions_do_not_stick() {
        let mut input = InputTracker::new();
        assert_eq!(input.key_down(" "), Some(Action::Boost));
        assert_eq!(input.key_up(" "), Some(Action::BoostRelease));
        assert_eq!(input.key_down("p"), Some(Action::TogglePause));
        assert_eq!(input.key_down("R"), Some(Action::Restart));
        assert_eq!(input.snapshot().directions, Directions::default());
    }

    #[test]
    fn test_idle_toggle() {
        let mut input = InputTracker::new();
        input.key_down("i");
        assert!(input.snapshot().idle_mode);
        input.key_down("I");
        assert!(!input.idle_mode());
    }

    #[test]
    fn test_buttons_and_clear() {
        let mut input = InputTracker::new();
        input.set(Control::Left, true);
        input.set(Control::Down, true);
        assert!(input.snapshot().directions.left);
        input.clear();
        assert_eq!(input.snapshot().directions, Directions::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputTracker::new();
        assert_eq!(input.key_down("x"), None);
        assert_eq!(input.key_up("Shift"), None);
        assert_eq!(input.snapshot(), TickInput::default());
    }
}
