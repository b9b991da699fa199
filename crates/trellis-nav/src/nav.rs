//! Nav host
//!
//! Owns the items and the active id. Every accepted change of the active
//! id is published on the item change stream, which the outlet consumes.
//! Three paths change the active id:
//! - `select` (API call)
//! - `set_active_id` (bound value)
//! - `click` (user), the only one that emits a cancelable `NavChangeEvent`

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Keyboard, NavConfig, Orientation, Roles};
use crate::error::NavError;
use crate::event::EventEmitter;
use crate::item::{NavItem, NavItemConfig};
use crate::stream::{ChangeStream, Subscription};
use crate::Result;

/// State shared between a nav and its items
#[derive(Debug)]
pub(crate) struct NavShared {
    pub(crate) nav_id: String,
    pub(crate) config: RwLock<NavConfig>,
    pub(crate) active_id: RwLock<Option<String>>,
}

impl NavShared {
    pub(crate) fn new(nav_id: String, config: NavConfig) -> Self {
        Self {
            nav_id,
            config: RwLock::new(config),
            active_id: RwLock::new(None),
        }
    }
}

/// Emitted before a user-initiated change; `prevent_default` vetoes it
#[derive(Debug)]
pub struct NavChangeEvent {
    pub active_id: Option<String>,
    pub next_id: Option<String>,
    default_prevented: AtomicBool,
}

impl NavChangeEvent {
    fn new(active_id: Option<String>, next_id: Option<String>) -> Self {
        Self {
            active_id,
            next_id,
            default_prevented: AtomicBool::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::Relaxed);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

pub struct Nav {
    shared: Arc<NavShared>,
    items: RwLock<Vec<NavItem>>,
    focused_id: RwLock<Option<String>>,
    changes: ChangeStream<Option<NavItem>>,
    nav_change: EventEmitter<NavChangeEvent>,
    active_id_change: EventEmitter<Option<String>>,
    shown: EventEmitter<String>,
    hidden: EventEmitter<String>,
}

impl Nav {
    pub fn new(config: NavConfig) -> Self {
        Self::with_id(format!("nav-{}", Uuid::new_v4()), config)
    }

    pub fn with_id(id: impl Into<String>, config: NavConfig) -> Self {
        Self {
            shared: Arc::new(NavShared::new(id.into(), config)),
            items: RwLock::new(Vec::new()),
            focused_id: RwLock::new(None),
            changes: ChangeStream::new(),
            nav_change: EventEmitter::new(),
            active_id_change: EventEmitter::new(),
            shown: EventEmitter::new(),
            hidden: EventEmitter::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.shared.nav_id
    }

    pub fn config(&self) -> NavConfig {
        self.shared.config.read().clone()
    }

    pub fn set_config(&self, config: NavConfig) {
        *self.shared.config.write() = config;
    }

    pub fn animation(&self) -> bool {
        self.shared.config.read().animation
    }

    pub fn set_animation(&self, animation: bool) {
        self.shared.config.write().animation = animation;
    }

    pub fn roles(&self) -> Roles {
        self.shared.config.read().roles
    }

    // === Items ===

    pub fn add_item(&self, config: NavItemConfig) -> Result<NavItem> {
        let item = {
            let mut items = self.items.write();
            if items.iter().any(|i| i.id() == config.id) {
                return Err(NavError::DuplicateItem(config.id));
            }
            let item = NavItem::new(config, Arc::clone(&self.shared))?;
            items.push(item.clone());
            item
        };

        tracing::debug!(nav_id = %self.id(), item_id = %item.id(), "Added nav item");

        self.notify_item_changed(self.active_id().as_deref());
        Ok(item)
    }

    pub fn remove_item(&self, id: &str) -> Result<NavItem> {
        let item = {
            let mut items = self.items.write();
            let index = items
                .iter()
                .position(|i| i.id() == id)
                .ok_or_else(|| NavError::ItemNotFound(id.to_string()))?;
            items.remove(index)
        };

        tracing::debug!(nav_id = %self.id(), item_id = %id, "Removed nav item");

        self.notify_item_changed(self.active_id().as_deref());
        Ok(item)
    }

    /// Items in display order
    pub fn items(&self) -> Vec<NavItem> {
        self.items.read().clone()
    }

    pub fn item(&self, id: &str) -> Result<NavItem> {
        self.find_item(id)
            .ok_or_else(|| NavError::ItemNotFound(id.to_string()))
    }

    fn find_item(&self, id: &str) -> Option<NavItem> {
        self.items.read().iter().find(|i| i.id() == id).cloned()
    }

    // === Active id ===

    pub fn active_id(&self) -> Option<String> {
        self.shared.active_id.read().clone()
    }

    pub fn active_item(&self) -> Option<NavItem> {
        self.active_id().and_then(|id| self.find_item(&id))
    }

    /// Default to the first item when nothing is active yet
    pub fn after_content_init(&self) {
        if self.active_id().is_some() {
            return;
        }

        let first = self.items.read().first().map(|i| i.id().to_string());
        if let Some(first) = first {
            self.update_active_id(Some(first), false);
        }
    }

    /// Programmatic selection
    pub fn select(&self, id: &str) {
        self.update_active_id(Some(id.to_string()), false);
    }

    /// Bound-value change
    pub fn set_active_id(&self, id: Option<&str>) {
        self.update_active_id(id.map(str::to_string), false);
    }

    /// User selection. Returns whether the active id changed.
    pub fn click(&self, id: &str) -> bool {
        match self.find_item(id) {
            Some(item) if !item.is_disabled() => {
                *self.focused_id.write() = Some(id.to_string());
                self.update_active_id(Some(id.to_string()), true)
            }
            _ => false,
        }
    }

    // === Focus / keyboard ===

    pub fn focused_id(&self) -> Option<String> {
        self.focused_id.read().clone()
    }

    pub fn focus(&self, id: &str) {
        *self.focused_id.write() = Some(id.to_string());
    }

    pub fn blur(&self) {
        *self.focused_id.write() = None;
    }

    /// Move focus among enabled items; with `ChangeWithArrows`, also select.
    /// Returns whether the key was handled.
    pub fn on_key_down(&self, key: NavKey) -> bool {
        let config = self.config();
        if config.roles != Roles::Tablist || config.keyboard == Keyboard::Off {
            return false;
        }

        let enabled: Vec<NavItem> = self
            .items
            .read()
            .iter()
            .filter(|i| !i.is_disabled())
            .cloned()
            .collect();
        if enabled.is_empty() {
            return false;
        }

        let focused = self.focused_id();
        let mut position = focused
            .as_deref()
            .and_then(|id| enabled.iter().position(|i| i.id() == id))
            .map(|p| p as i64)
            .unwrap_or(-1);

        let vertical = config.orientation == Orientation::Vertical;
        match key {
            NavKey::ArrowLeft if !vertical => position -= 1,
            NavKey::ArrowRight if !vertical => position += 1,
            NavKey::ArrowUp if vertical => position -= 1,
            NavKey::ArrowDown if vertical => position += 1,
            NavKey::Home => position = 0,
            NavKey::End => position = enabled.len() as i64 - 1,
            _ => return false,
        }

        let target = &enabled[position.rem_euclid(enabled.len() as i64) as usize];
        if config.keyboard == Keyboard::ChangeWithArrows {
            self.select(target.id());
        }
        self.focus(target.id());
        true
    }

    // === Notifications ===

    /// Subscribe to active-item changes; the current value is replayed
    pub fn subscribe(&self) -> Subscription<Option<NavItem>> {
        self.changes.subscribe()
    }

    /// Cancelable user-initiated change event
    pub fn nav_change(&self) -> &EventEmitter<NavChangeEvent> {
        &self.nav_change
    }

    pub fn active_id_change(&self) -> &EventEmitter<Option<String>> {
        &self.active_id_change
    }

    /// Emitted with the item id after a pane has faded in
    pub fn shown(&self) -> &EventEmitter<String> {
        &self.shown
    }

    /// Emitted with the item id after a pane has faded out
    pub fn hidden(&self) -> &EventEmitter<String> {
        &self.hidden
    }

    /// Teardown: complete the change stream
    pub fn destroy(&self) {
        self.changes.close();
        tracing::debug!(nav_id = %self.id(), "Nav destroyed");
    }

    fn update_active_id(&self, next_id: Option<String>, emit_nav_change: bool) -> bool {
        let active_id = self.active_id();
        if active_id == next_id {
            return false;
        }

        if emit_nav_change {
            let event = NavChangeEvent::new(active_id.clone(), next_id.clone());
            self.nav_change.emit(&event);
            if event.is_default_prevented() {
                tracing::debug!(
                    nav_id = %self.id(),
                    from = ?active_id,
                    to = ?next_id,
                    "Nav change prevented"
                );
                return false;
            }
        }

        *self.shared.active_id.write() = next_id.clone();

        tracing::debug!(
            nav_id = %self.id(),
            from = ?active_id,
            to = ?next_id,
            "Active nav item changed"
        );

        self.active_id_change.emit(&next_id);
        self.notify_item_changed(next_id.as_deref());
        true
    }

    fn notify_item_changed(&self, id: Option<&str>) {
        self.changes.publish(id.and_then(|id| self.find_item(id)));
    }
}

impl std::fmt::Debug for Nav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nav")
            .field("id", &self.shared.nav_id)
            .field("active_id", &self.active_id())
            .field("items", &self.items.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn nav_with(ids: &[&str]) -> Nav {
        let nav = Nav::with_id("nav", NavConfig::default());
        for id in ids {
            nav.add_item(NavItemConfig::new(*id)).unwrap();
        }
        nav
    }

    #[test]
    fn test_after_content_init_selects_first() {
        let nav = nav_with(&["a", "b"]);
        nav.after_content_init();
        assert_eq!(nav.active_id().as_deref(), Some("a"));
        assert!(nav.item("a").unwrap().is_active());
        assert!(!nav.item("b").unwrap().is_active());
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let nav = nav_with(&["a"]);
        let result = nav.add_item(NavItemConfig::new("a"));
        assert!(matches!(result, Err(NavError::DuplicateItem(_))));
    }

    #[test]
    fn test_remove_unknown_item() {
        let nav = nav_with(&["a"]);
        assert!(matches!(
            nav.remove_item("zzz"),
            Err(NavError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_select_publishes_item() {
        let nav = nav_with(&["a", "b"]);
        let mut sub = nav.subscribe();
        // Adding items published "no active item"
        assert_eq!(sub.try_next(), Some(None));

        nav.select("b");
        let published = sub.try_next().unwrap().unwrap();
        assert_eq!(published, nav.item("b").unwrap());

        // Unknown id publishes no item
        nav.select("missing");
        assert_eq!(sub.try_next(), Some(None));
        assert_eq!(nav.active_id().as_deref(), Some("missing"));
    }

    #[test]
    fn test_same_id_is_not_a_change() {
        let nav = nav_with(&["a"]);
        nav.select("a");
        let mut sub = nav.subscribe();
        assert!(sub.try_next().is_some()); // replay
        nav.select("a");
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_click_emits_nav_change() {
        let nav = nav_with(&["a", "b"]);
        nav.select("a");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        nav.nav_change().subscribe(move |e: &NavChangeEvent| {
            sink.lock().push((e.active_id.clone(), e.next_id.clone()));
        });

        assert!(nav.click("b"));
        assert_eq!(
            *events.lock(),
            vec![(Some("a".to_string()), Some("b".to_string()))]
        );
        assert_eq!(nav.focused_id().as_deref(), Some("b"));
    }

    #[test]
    fn test_click_prevented() {
        let nav = nav_with(&["a", "b"]);
        nav.select("a");
        nav.nav_change()
            .subscribe(|e: &NavChangeEvent| e.prevent_default());

        assert!(!nav.click("b"));
        assert_eq!(nav.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_click_disabled_ignored() {
        let nav = nav_with(&["a"]);
        nav.add_item(NavItemConfig::new("b").disabled(true)).unwrap();
        nav.select("a");

        assert!(!nav.click("b"));
        assert_eq!(nav.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_active_id_change_emitted() {
        let nav = nav_with(&["a", "b"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        nav.active_id_change()
            .subscribe(move |id: &Option<String>| sink.lock().push(id.clone()));

        nav.select("a");
        nav.set_active_id(None);
        assert_eq!(*seen.lock(), vec![Some("a".to_string()), None]);
    }

    #[test]
    fn test_keyboard_disabled_by_default() {
        let nav = nav_with(&["a", "b"]);
        assert!(!nav.on_key_down(NavKey::ArrowRight));
    }

    #[test]
    fn test_keyboard_wraps_and_skips_disabled() {
        let nav = Nav::with_id(
            "nav",
            NavConfig {
                keyboard: Keyboard::ChangeWithArrows,
                ..NavConfig::default()
            },
        );
        nav.add_item(NavItemConfig::new("a")).unwrap();
        nav.add_item(NavItemConfig::new("b").disabled(true)).unwrap();
        nav.add_item(NavItemConfig::new("c")).unwrap();
        nav.focus("a");

        assert!(nav.on_key_down(NavKey::ArrowRight));
        assert_eq!(nav.focused_id().as_deref(), Some("c"));
        assert_eq!(nav.active_id().as_deref(), Some("c"));

        assert!(nav.on_key_down(NavKey::ArrowRight));
        assert_eq!(nav.active_id().as_deref(), Some("a"));

        assert!(nav.on_key_down(NavKey::End));
        assert_eq!(nav.active_id().as_deref(), Some("c"));

        // Vertical keys are ignored in horizontal orientation
        assert!(!nav.on_key_down(NavKey::ArrowDown));
    }

    #[test]
    fn test_keyboard_focus_only() {
        let nav = Nav::with_id(
            "nav",
            NavConfig {
                keyboard: Keyboard::On,
                orientation: Orientation::Vertical,
                ..NavConfig::default()
            },
        );
        nav.add_item(NavItemConfig::new("a")).unwrap();
        nav.add_item(NavItemConfig::new("b")).unwrap();
        nav.select("a");
        nav.focus("a");

        assert!(nav.on_key_down(NavKey::ArrowUp));
        assert_eq!(nav.focused_id().as_deref(), Some("b"));
        assert_eq!(nav.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_destroy_closes_stream() {
        let nav = nav_with(&["a"]);
        let sub = nav.subscribe();
        nav.destroy();
        nav.select("a");
        assert!(sub.is_closed());
    }
}
