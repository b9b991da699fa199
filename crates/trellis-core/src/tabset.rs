//! Tab set
//!
//! Wires a `Nav`, its `NavOutlet` and a `TransitionEngine` together so a
//! host only has to forward input and timing events. Every entry point
//! runs the outlet afterwards, so the pane state is always up to date
//! when a call returns.

use std::sync::Arc;
use std::time::Instant;

use trellis_nav::{Nav, NavItem, NavItemConfig, NavKey, NavOutlet, Pane};
use trellis_transition::TransitionEngine;

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct TabSet {
    config: Config,
    engine: Arc<TransitionEngine>,
    nav: Nav,
    outlet: NavOutlet,
    initialized: bool,
    destroyed: bool,
}

impl TabSet {
    pub fn new(config: Config) -> Self {
        let engine = Arc::new(TransitionEngine::new());
        let nav = Nav::new(config.nav_config());
        let outlet = NavOutlet::new(Arc::clone(&engine));

        Self {
            config,
            engine,
            nav,
            outlet,
            initialized: false,
            destroyed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn nav(&self) -> &Nav {
        &self.nav
    }

    pub fn outlet(&self) -> &NavOutlet {
        &self.outlet
    }

    pub fn engine(&self) -> &Arc<TransitionEngine> {
        &self.engine
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn add_tab(&mut self, config: NavItemConfig) -> Result<NavItem> {
        let item = self.nav.add_item(config)?;
        self.process();
        Ok(item)
    }

    pub fn remove_tab(&mut self, id: &str) -> Result<NavItem> {
        let item = self.nav.remove_item(id)?;
        self.process();
        Ok(item)
    }

    /// Pick the initial tab and render it without animation
    pub fn init(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(CoreError::Destroyed);
        }
        if self.initialized {
            return Err(CoreError::AlreadyInitialized);
        }

        self.nav.after_content_init();
        self.outlet.after_view_init(&self.nav);
        self.initialized = true;

        tracing::info!(
            nav_id = %self.nav.id(),
            tabs = self.nav.items().len(),
            active = ?self.nav.active_id(),
            "Tab set initialized"
        );
        Ok(())
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        self.ensure_initialized()?;
        self.nav.item(id)?;
        self.nav.select(id);
        self.process();
        Ok(())
    }

    /// User click; `false` when the tab is disabled or the change was vetoed
    pub fn click(&mut self, id: &str) -> Result<bool> {
        self.ensure_initialized()?;
        let changed = self.nav.click(id);
        self.process();
        Ok(changed)
    }

    pub fn key_down(&mut self, key: NavKey) -> Result<bool> {
        self.ensure_initialized()?;
        let handled = self.nav.on_key_down(key);
        self.process();
        Ok(handled)
    }

    pub fn set_animation(&mut self, animation: bool) {
        self.config.animation = animation;
        self.config.apply_to_nav(&self.nav);
    }

    /// The host saw the transition of `item_id`'s pane finish.
    /// Returns whether a running transition was completed.
    ///
    /// A removed tab's pane keeps fading out as the active pane, so it is
    /// still found here after the item has left the nav.
    pub fn transition_end(&mut self, item_id: &str) -> Result<bool> {
        let element = self
            .outlet
            .panes()
            .iter()
            .chain(self.outlet.active_pane())
            .find(|pane| pane.item().id() == item_id)
            .map(|pane| pane.element().clone());

        let element = match element {
            Some(element) => element,
            None => {
                self.nav.item(item_id)?;
                return Ok(false);
            }
        };

        let completed = self.engine.transition_end(&element).is_some();
        self.outlet.poll(&self.nav);
        Ok(completed)
    }

    /// Complete every transition whose deadline is before `now`
    pub fn tick(&mut self, now: Instant) -> usize {
        let completed = self.engine.tick(now).len();
        if completed > 0 {
            self.outlet.poll(&self.nav);
        }
        completed
    }

    pub fn active_id(&self) -> Option<String> {
        self.nav.active_id()
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.outlet.active_pane()
    }

    pub fn is_settled(&self) -> bool {
        self.outlet.is_settled()
    }

    /// Tear down. The tab set cannot be initialized again afterwards.
    pub fn destroy(&mut self) {
        self.outlet.destroy();
        self.engine.stop_all();
        self.nav.destroy();
        self.initialized = false;
        self.destroyed = true;
        tracing::debug!(nav_id = %self.nav.id(), "Tab set destroyed");
    }

    fn process(&mut self) {
        if self.initialized {
            self.outlet.process(&self.nav);
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.destroyed {
            Err(CoreError::Destroyed)
        } else if self.initialized {
            Ok(())
        } else {
            Err(CoreError::NotInitialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;
    use trellis_nav::{Keyboard, Phase};

    fn tab_set(animation: bool) -> TabSet {
        let mut config = Config::default();
        config.animation = animation;
        config.nav.keyboard = Keyboard::ChangeWithArrows;

        let mut tabs = TabSet::new(config);
        tabs.add_tab(NavItemConfig::new("a")).unwrap();
        tabs.add_tab(NavItemConfig::new("b")).unwrap();
        tabs.add_tab(NavItemConfig::new("c").disabled(true)).unwrap();
        tabs
    }

    fn record_events(tabs: &TabSet) -> Arc<Mutex<Vec<String>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let shown = events.clone();
        tabs.nav()
            .shown()
            .subscribe(move |id| shown.lock().push(format!("shown:{id}")));
        let hidden = events.clone();
        tabs.nav()
            .hidden()
            .subscribe(move |id| hidden.lock().push(format!("hidden:{id}")));
        events
    }

    fn active_pane_id(tabs: &TabSet) -> Option<String> {
        tabs.active_pane().map(|pane| pane.item().id().to_string())
    }

    #[test]
    fn test_requires_init() {
        let mut tabs = tab_set(false);
        assert!(matches!(tabs.select("a"), Err(CoreError::NotInitialized)));

        tabs.init().unwrap();
        assert!(matches!(tabs.init(), Err(CoreError::AlreadyInitialized)));
    }

    #[test]
    fn test_init_shows_first_tab() {
        let mut tabs = tab_set(true);
        let events = record_events(&tabs);
        tabs.init().unwrap();

        assert_eq!(tabs.active_id().as_deref(), Some("a"));
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("a"));
        assert!(tabs.is_settled());
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_switch_without_animation() {
        let mut tabs = tab_set(false);
        let events = record_events(&tabs);
        tabs.init().unwrap();

        tabs.select("b").unwrap();

        assert!(tabs.is_settled());
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("b"));
        assert_eq!(events.lock().as_slice(), &["hidden:a", "shown:b"]);
    }

    #[test]
    fn test_switch_with_transition_end() {
        let mut tabs = tab_set(true);
        let events = record_events(&tabs);
        tabs.init().unwrap();

        assert!(tabs.click("b").unwrap());
        assert!(matches!(tabs.outlet().phase(), Phase::FadingOut { .. }));
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("a"));

        assert!(tabs.transition_end("a").unwrap());
        assert!(matches!(tabs.outlet().phase(), Phase::FadingIn { .. }));
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("b"));
        assert_eq!(events.lock().as_slice(), &["hidden:a"]);

        assert!(tabs.transition_end("b").unwrap());
        assert!(tabs.is_settled());
        assert_eq!(events.lock().as_slice(), &["hidden:a", "shown:b"]);

        assert!(!tabs.transition_end("b").unwrap());
    }

    #[test]
    fn test_switch_with_timer() {
        let mut tabs = tab_set(true);
        tabs.init().unwrap();
        tabs.select("b").unwrap();

        assert_eq!(tabs.tick(Instant::now()), 0);

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(tabs.tick(later), 1);
        assert!(matches!(tabs.outlet().phase(), Phase::FadingIn { .. }));

        let later = later + Duration::from_secs(1);
        assert_eq!(tabs.tick(later), 1);
        assert!(tabs.is_settled());
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("b"));
    }

    #[test]
    fn test_disabled_tab_ignores_click() {
        let mut tabs = tab_set(false);
        tabs.init().unwrap();

        assert!(!tabs.click("c").unwrap());
        assert_eq!(tabs.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_select_unknown_tab() {
        let mut tabs = tab_set(false);
        tabs.init().unwrap();

        assert!(matches!(tabs.select("zzz"), Err(CoreError::Nav(_))));
        assert_eq!(tabs.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_keyboard_changes_tab() {
        let mut tabs = tab_set(false);
        tabs.init().unwrap();
        tabs.nav().focus("a");

        assert!(tabs.key_down(NavKey::ArrowRight).unwrap());
        assert_eq!(tabs.active_id().as_deref(), Some("b"));
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("b"));

        // the disabled tab is skipped
        assert!(tabs.key_down(NavKey::ArrowRight).unwrap());
        assert_eq!(tabs.active_id().as_deref(), Some("a"));
    }

    #[test]
    fn test_set_animation_applies_to_next_switch() {
        let mut tabs = tab_set(true);
        tabs.init().unwrap();

        tabs.set_animation(false);
        tabs.select("b").unwrap();
        assert!(tabs.is_settled());
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("b"));
    }

    #[test]
    fn test_destroy() {
        let mut tabs = tab_set(true);
        tabs.init().unwrap();
        tabs.select("b").unwrap();
        assert_eq!(tabs.engine().running_count(), 1);

        tabs.destroy();
        assert!(tabs.is_settled());
        assert_eq!(tabs.engine().running_count(), 0);
        assert!(!tabs.is_initialized());

        assert!(matches!(tabs.init(), Err(CoreError::Destroyed)));
        assert!(matches!(tabs.select("a"), Err(CoreError::Destroyed)));
    }

    #[test]
    fn test_remove_active_tab_while_fading() {
        let mut tabs = tab_set(true);
        let events = record_events(&tabs);
        tabs.init().unwrap();

        tabs.remove_tab("a").unwrap();
        assert!(matches!(tabs.outlet().phase(), Phase::FadingOut { .. }));
        assert_eq!(active_pane_id(&tabs).as_deref(), Some("a"));

        assert!(tabs.transition_end("a").unwrap());
        assert!(tabs.is_settled());
        assert!(tabs.active_pane().is_none());
        assert_eq!(events.lock().as_slice(), &["hidden:a"]);

        // Gone from the nav and from the outlet
        assert!(matches!(tabs.transition_end("a"), Err(CoreError::Nav(_))));
    }

    #[test]
    fn test_transition_end_without_pane() {
        let mut tabs = tab_set(true);
        tabs.init().unwrap();

        // "b" is not mounted while "a" is active
        assert!(!tabs.transition_end("b").unwrap());
        assert!(matches!(tabs.transition_end("zzz"), Err(CoreError::Nav(_))));
    }
}
