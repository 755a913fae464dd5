//! Keyboard and mouse state fed by the host.
//!
//! The host reports raw state changes as they arrive.
//! The world snapshots the state at the end of every tick,
//! so that behaviors can query edges (pressed or released during this tick)
//! as well as levels (held down).

use std::collections::BTreeSet;

use glam::Vec2;

/// A mouse button.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Button {
    /// The primary button.
    Left,
    /// The wheel button.
    Middle,
    /// The secondary button.
    Right,
}

#[derive(Debug, Default, Clone)]
struct Snapshot {
    keys:    BTreeSet<String>,
    buttons: BTreeSet<Button>,
}

/// The input state visible to behaviors.
#[derive(Debug, Default)]
pub struct Input {
    current:  Snapshot,
    previous: Snapshot,
    cursor:   Vec2,
}

fn normalize(key: &str) -> String { key.to_ascii_lowercase() }

impl Input {
    /// Reports that `key` was pressed or released.
    ///
    /// Key names are case-insensitive.
    pub fn set_key(&mut self, key: &str, down: bool) {
        let key = normalize(key);
        if down {
            self.current.keys.insert(key);
        } else {
            self.current.keys.remove(&key);
        }
    }

    /// Reports that `button` was pressed or released.
    pub fn set_button(&mut self, button: Button, down: bool) {
        if down {
            self.current.buttons.insert(button);
        } else {
            self.current.buttons.remove(&button);
        }
    }

    /// Reports the cursor position in world coordinates.
    ///
    /// Hosts that track the cursor in screen coordinates
    /// should convert with [`spatial::from_screen`](crate::spatial::from_screen).
    pub fn set_cursor(&mut self, pos: Vec2) { self.cursor = pos; }

    /// Whether `key` went down during this tick.
    pub fn key_pressed(&self, key: &str) -> bool {
        let key = normalize(key);
        self.current.keys.contains(&key) && !self.previous.keys.contains(&key)
    }

    /// Whether `key` is held down.
    pub fn key_down(&self, key: &str) -> bool { self.current.keys.contains(&normalize(key)) }

    /// Whether `key` went up during this tick.
    pub fn key_released(&self, key: &str) -> bool {
        let key = normalize(key);
        !self.current.keys.contains(&key) && self.previous.keys.contains(&key)
    }

    /// Whether `button` went down during this tick.
    pub fn mouse_pressed(&self, button: Button) -> bool {
        self.current.buttons.contains(&button) && !self.previous.buttons.contains(&button)
    }

    /// Whether `button` is held down.
    pub fn mouse_down(&self, button: Button) -> bool { self.current.buttons.contains(&button) }

    /// Whether `button` went up during this tick.
    pub fn mouse_released(&self, button: Button) -> bool {
        !self.current.buttons.contains(&button) && self.previous.buttons.contains(&button)
    }

    /// The cursor position in world coordinates.
    pub fn cursor(&self) -> Vec2 { self.cursor }

    pub(crate) fn end_tick(&mut self) { self.previous = self.current.clone(); }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::{Button, Input};

    #[test]
    fn test_key_edges() {
        let mut input = Input::default();

        input.set_key("Space", true);
        assert!(input.key_pressed("space"));
        assert!(input.key_down("SPACE"));
        assert!(!input.key_released("space"));

        input.end_tick();
        assert!(!input.key_pressed("space"));
        assert!(input.key_down("space"));

        input.set_key("space", false);
        assert!(input.key_released("space"));
        assert!(!input.key_down("space"));

        input.end_tick();
        assert!(!input.key_released("space"));
    }

    #[test]
    fn test_mouse_edges() {
        let mut input = Input::default();
        input.set_button(Button::Left, true);
        assert!(input.mouse_pressed(Button::Left));
        assert!(!input.mouse_down(Button::Right));

        input.end_tick();
        input.set_button(Button::Left, false);
        assert!(input.mouse_released(Button::Left));
    }

    #[test]
    fn test_button_parse() {
        assert_eq!(Button::from_str("left"), Ok(Button::Left));
        assert_eq!(Button::from_str("RIGHT"), Ok(Button::Right));
        assert!(Button::from_str("fourth").is_err());

        for button in Button::iter() {
            assert_eq!(Button::from_str(&button.to_string()), Ok(button));
        }
    }
}
