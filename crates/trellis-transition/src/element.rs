//! Presentation element
//!
//! A shared handle to the root node of a rendered widget part. Hosts
//! paint it; the library only toggles classes and attributes on it.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

static NEXT_ELEMENT_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an element, stable across attribute changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(u64);

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct ElementState {
    id: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    transition_delay: Duration,
    transition_duration: Duration,
    reflows: u32,
}

#[derive(Clone)]
pub struct Element {
    key: ElementKey,
    state: Arc<RwLock<ElementState>>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: ElementKey(NEXT_ELEMENT_KEY.fetch_add(1, Ordering::Relaxed)),
            state: Arc::new(RwLock::new(ElementState {
                id: id.into(),
                ..ElementState::default()
            })),
        }
    }

    pub fn key(&self) -> ElementKey {
        self.key
    }

    pub fn id(&self) -> String {
        self.state.read().id.clone()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.state.write().id = id.into();
    }

    /// Add a class; no-op if already present
    pub fn add_class(&self, class: &str) {
        let mut state = self.state.write();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.state.write().classes.retain(|c| c != class);
    }

    /// Add or remove a class depending on `on`
    pub fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.read().classes.iter().any(|c| c == class)
    }

    /// Classes in insertion order
    pub fn classes(&self) -> Vec<String> {
        self.state.read().classes.clone()
    }

    /// Set an attribute, or remove it when `value` is `None`
    pub fn set_attribute(&self, name: &str, value: Option<&str>) {
        let mut state = self.state.write();
        match value {
            Some(value) => {
                state.attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                state.attributes.remove(name);
            }
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.read().attributes.get(name).cloned()
    }

    /// Computed `transition-delay` and `transition-duration`
    pub fn set_transition(&self, delay: Duration, duration: Duration) {
        let mut state = self.state.write();
        state.transition_delay = delay;
        state.transition_duration = duration;
    }

    /// Total time a transition on this element takes (delay + duration)
    pub fn transition_time(&self) -> Duration {
        let state = self.state.read();
        state.transition_delay + state.transition_duration
    }

    /// Force a layout pass so that subsequent class changes animate
    pub fn reflow(&self) {
        self.state.write().reflows += 1;
    }

    pub fn reflow_count(&self) -> u32 {
        self.state.read().reflows
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Element")
            .field("key", &self.key)
            .field("id", &state.id)
            .field("classes", &state.classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list() {
        let el = Element::new("pane-1");
        el.add_class("tab-pane");
        el.add_class("show");
        el.add_class("show");
        assert_eq!(el.classes(), vec!["tab-pane", "show"]);

        el.toggle_class("fade", true);
        assert!(el.has_class("fade"));
        el.toggle_class("fade", false);
        assert!(!el.has_class("fade"));

        el.remove_class("show");
        assert_eq!(el.classes(), vec!["tab-pane"]);
    }

    #[test]
    fn test_attributes() {
        let el = Element::new("pane-1");
        el.set_attribute("role", Some("tabpanel"));
        assert_eq!(el.attribute("role").as_deref(), Some("tabpanel"));
        el.set_attribute("role", None);
        assert!(el.attribute("role").is_none());
    }

    #[test]
    fn test_identity() {
        let a = Element::new("same");
        let b = Element::new("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_transition_time() {
        let el = Element::new("pane");
        assert!(el.transition_time().is_zero());
        el.set_transition(Duration::from_millis(50), Duration::from_millis(150));
        assert_eq!(el.transition_time(), Duration::from_millis(200));
    }
}
