//! Key states with per-frame edge detection

use std::collections::HashSet;
use std::hash::Hash;

/// Current and previous-frame state of every key seen so far
#[derive(Debug, Clone)]
pub struct KeyStates<K> {
    current: HashSet<K>,
    previous: HashSet<K>,
}

impl<K> Default for KeyStates<K> {
    fn default() -> Self {
        Self {
            current: HashSet::new(),
            previous: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> KeyStates<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event
    pub fn set(&mut self, key: K, down: bool) {
        if down {
            self.current.insert(key);
        } else {
            self.current.remove(&key);
        }
    }

    pub fn is_down(&self, key: K) -> bool {
        self.current.contains(&key)
    }

    /// Down now but not at the end of the previous frame
    pub fn was_pressed(&self, key: K) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    /// Keys that went down this frame
    pub fn just_pressed(&self) -> impl Iterator<Item = K> + '_ {
        self.current.difference(&self.previous).copied()
    }

    /// Roll the current state over; call once at the end of each frame
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Forget every key, e.g. after focus loss
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}
