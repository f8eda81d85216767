//! Page chrome rules: the sticky header and the one-shot fade-in reveal.
//!
//! The browser applies these on `scroll` and `IntersectionObserver` events.
//! The layout renders the class names and the reveal threshold below into
//! `data-` attributes on `<body>`, and the site script reads them from there;
//! [`header_is_scrolled`] and [`RevealTracker`] are the rules that script
//! follows.

use std::collections::HashSet;
use std::hash::Hash;

/// Fraction of an element that must be in the viewport before it fades in.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Class toggled on the header once the hero has scrolled away.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Class marking elements that fade in.
pub const FADE_IN_CLASS: &str = "fade-in";

/// Class added once an element has been revealed.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Whether the header should carry the scrolled state.
#[must_use]
pub fn header_is_scrolled(scroll_y: f64, hero_height: f64, header_height: f64) -> bool {
    scroll_y > hero_height - header_height
}

/// Tracks which elements are still waiting to be revealed.
///
/// Each element is revealed at most once; after that it is no longer
/// observed, so scrolling away and back has no effect.
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    observed: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            observed: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    /// Start observing `key`. Already revealed elements are not re-observed.
    pub fn observe(&mut self, key: K) {
        if !self.revealed.contains(&key) {
            self.observed.insert(key);
        }
    }

    /// Report that `ratio` of `key` is in the viewport.
    ///
    /// Returns `true` when this report reveals the element.
    pub fn record(&mut self, key: &K, ratio: f64) -> bool {
        if ratio < REVEAL_THRESHOLD || !self.observed.remove(key) {
            return false;
        }
        self.revealed.insert(key.clone());
        true
    }

    #[must_use]
    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    #[must_use]
    pub fn is_observed(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    /// Number of elements still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_scrolled_past_hero() {
        // hero 600, header 80: threshold is 520
        assert!(!header_is_scrolled(0.0, 600.0, 80.0));
        assert!(!header_is_scrolled(520.0, 600.0, 80.0));
        assert!(header_is_scrolled(520.5, 600.0, 80.0));
        assert!(header_is_scrolled(2_000.0, 600.0, 80.0));
    }

    #[test]
    fn test_header_scrolled_when_hero_shorter_than_header() {
        assert!(header_is_scrolled(0.0, 40.0, 80.0));
    }

    #[test]
    fn test_reveal_needs_threshold() {
        let mut tracker = RevealTracker::new();
        tracker.observe("intro");
        assert!(!tracker.record(&"intro", 0.05));
        assert!(tracker.is_observed(&"intro"));
        assert!(tracker.record(&"intro", 0.1));
        assert!(tracker.is_revealed(&"intro"));
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let mut tracker = RevealTracker::new();
        tracker.observe("card-1");
        tracker.observe("card-2");
        assert!(tracker.record(&"card-1", 0.5));
        assert!(!tracker.record(&"card-1", 0.0));
        assert!(!tracker.record(&"card-1", 1.0));
        tracker.observe("card-1");
        assert!(!tracker.is_observed(&"card-1"));
        assert!(tracker.is_revealed(&"card-1"));
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn test_unobserved_elements_are_ignored() {
        let mut tracker: RevealTracker<&str> = RevealTracker::default();
        assert!(!tracker.record(&"stray", 1.0));
        assert!(!tracker.is_revealed(&"stray"));
    }
}
