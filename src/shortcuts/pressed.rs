//! Tracking of keys currently held down.

use super::types::{canonicalize_key, Combo};

/// Keys that clear the whole set when released. While meta is held, macOS
/// browsers never deliver keyup for the other keys.
const CLEARING_KEYS: &[&str] = &["meta", "command", "cmd"];

/// Keys currently held down, in press order, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PressedKeys {
    keys: Vec<String>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Returns false for a repeat of a held key.
    pub fn press(&mut self, key: &str) -> bool {
        let key = canonicalize_key(key);
        if key.is_empty() || self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Record a keyup.
    pub fn release(&mut self, key: &str) {
        let key = canonicalize_key(key);
        if CLEARING_KEYS.contains(&key.as_str()) {
            self.keys.clear();
        } else {
            self.keys.retain(|held| *held != key);
        }
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn has(&self, key: &str) -> bool {
        self.keys.contains(&canonicalize_key(key))
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The held keys as a combo, `None` when nothing is held.
    pub fn as_combo(&self) -> Option<Combo> {
        Combo::new(&self.keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut pressed = PressedKeys::new();
        assert!(pressed.press("Shift"));
        assert!(pressed.press("a"));
        assert!(!pressed.press("A"));
        assert!(pressed.has("shift"));

        pressed.release("a");
        assert_eq!(pressed.keys(), &["shift".to_string()]);
    }

    #[test]
    fn test_meta_release_clears_everything() {
        let mut pressed = PressedKeys::new();
        pressed.press("Meta");
        pressed.press("k");
        pressed.release("Meta");
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_as_combo_is_sorted() {
        let mut pressed = PressedKeys::new();
        assert!(pressed.as_combo().is_none());
        pressed.press("meta");
        pressed.press("k");
        assert_eq!(pressed.as_combo().unwrap().canonical(), "k-meta");
    }

    #[test]
    fn test_space_bar_is_named() {
        let mut pressed = PressedKeys::new();
        pressed.press(" ");
        assert!(pressed.has("space"));
    }
}
