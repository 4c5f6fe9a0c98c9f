//! Held-key tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a key stays held until it is released or no press/repeat for it has been
//! seen for `release_timeout`.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::core::context::{PressedKeys, MAX_PRESSED_KEYS};
use crate::types::Key;

// Longer than the typical gap between terminal auto-repeat events once the
// repeat has kicked in.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<(Key, Instant), MAX_PRESSED_KEYS>,
    release_timeout: Duration,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Record a press or auto-repeat of `key` at `now`.
    pub fn press(&mut self, key: Key, now: Instant) {
        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = now;
        } else {
            let _ = self.held.try_push((key, now));
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.retain(|(k, _)| *k != key);
    }

    /// Drop keys not seen within the release timeout.
    pub fn expire(&mut self, now: Instant) {
        let timeout = self.release_timeout;
        self.held
            .retain(|(_, seen)| now.saturating_duration_since(*seen) <= timeout);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Overwrite `keys` with the currently held set.
    pub fn fill(&self, keys: &mut PressedKeys) {
        keys.clear();
        for (key, _) in &self.held {
            keys.press(*key);
        }
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_is_visible_until_timeout() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new();
        tracker.press(Key::Left, t0);

        tracker.expire(t0 + Duration::from_millis(100));
        assert!(tracker.is_held(Key::Left));

        tracker.expire(t0 + Duration::from_millis(151));
        assert!(!tracker.is_held(Key::Left));
    }

    #[test]
    fn test_repeat_extends_hold() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new();
        tracker.press(Key::Space, t0);
        tracker.press(Key::Space, t0 + Duration::from_millis(120));
        tracker.expire(t0 + Duration::from_millis(200));
        assert!(tracker.is_held(Key::Space));
    }

    #[test]
    fn test_release_and_fill() {
        let t0 = Instant::now();
        let mut tracker = KeyTracker::new().with_release_timeout(Duration::from_secs(1));
        tracker.press(Key::Left, t0);
        tracker.press(Key::Char('a'), t0);
        tracker.release(Key::Left);

        let mut keys = PressedKeys::new();
        keys.press(Key::Down);
        tracker.fill(&mut keys);
        assert!(keys.is_pressed("a"));
        assert!(!keys.is_pressed("left"));
        assert!(!keys.is_pressed("down"));
    }
}
