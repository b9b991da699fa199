//! Nav Outlet
//!
//! Renders the panes of a nav and drives the hand-off between them.
//!
//! ```text
//! Idle
//!   ↓ genuine active-item change
//! FadingOut (active pane)
//!   ↓ fade-out complete: swap active pane, emit hidden(previous)
//! FadingIn (new active pane)
//!   ↓ fade-in complete: emit shown(next)
//! Idle
//! ```
//!
//! The active pane is swapped only once the fade-out has completed, so it
//! lags behind the nav's active item while the outgoing pane animates.
//! A pane stays mounted while its item is mount-eligible or while it is
//! the active pane. A new change during a cycle stops the running
//! transition and starts over from the current active pane.

use std::sync::Arc;
use std::time::Duration;

use trellis_transition::{
    TransitionEngine, TransitionHandle, TransitionOptions, TransitionRunner,
};

use crate::config::Roles;
use crate::item::NavItem;
use crate::nav::Nav;
use crate::pane::{Pane, PaneRegistry};
use crate::stream::Changes;
use crate::transition::{FadeIn, FadeOut, ACTIVE_CLASS, SHOW_CLASS};

const FADE_CLASS: &str = "fade";

/// Bootstrap's `.fade` transition time
const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FadingOut {
        handle: TransitionHandle,
        next_item: Option<NavItem>,
    },
    FadingIn {
        handle: TransitionHandle,
        item: NavItem,
    },
}

impl Phase {
    pub fn handle(&self) -> Option<&TransitionHandle> {
        match self {
            Phase::Idle => None,
            Phase::FadingOut { handle, .. } | Phase::FadingIn { handle, .. } => Some(handle),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::FadingOut { .. } => "fading_out",
            Phase::FadingIn { .. } => "fading_in",
        }
    }
}

pub struct NavOutlet<R = TransitionEngine> {
    runner: Arc<R>,
    registry: PaneRegistry,
    /// Pane considered shown; lags the active item during a fade-out
    active_pane: Option<Pane>,
    phase: Phase,
    changes: Option<Changes<Option<NavItem>>>,
    pane_role: Option<String>,
    fade_duration: Duration,
}

impl<R: TransitionRunner> NavOutlet<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self {
            runner,
            registry: PaneRegistry::new(),
            active_pane: None,
            phase: Phase::Idle,
            changes: None,
            pane_role: None,
            fade_duration: DEFAULT_FADE_DURATION,
        }
    }

    /// Role for pane elements; defaults to `tabpanel` for tablist navs
    pub fn with_pane_role(mut self, role: impl Into<String>) -> Self {
        self.pane_role = Some(role.into());
        self
    }

    /// Transition time given to faded pane elements on render
    pub fn set_fade_duration(&mut self, duration: Duration) {
        self.fade_duration = duration;
    }

    pub fn runner(&self) -> &Arc<R> {
        &self.runner
    }

    /// First render: show the active pane without animation, then start
    /// listening for changes
    pub fn after_view_init(&mut self, nav: &Nav) {
        if self.changes.is_some() {
            tracing::warn!(nav_id = %nav.id(), "Nav outlet already initialized");
            return;
        }

        self.render(nav);
        self.update_active_pane();

        let seed = self.active_pane.as_ref().map(|pane| pane.item().clone());
        tracing::info!(
            nav_id = %nav.id(),
            active_item = ?seed.as_ref().map(NavItem::id),
            panes = self.registry.len(),
            "Nav outlet initialized"
        );

        self.changes = Some(Changes::seeded(seed, nav.subscribe()));
        self.process(nav);
    }

    /// Handle pending active-item changes, then advance finished transitions
    pub fn process(&mut self, nav: &Nav) {
        while let Some(next_item) = self.changes.as_mut().and_then(Changes::next_change) {
            self.on_item_change(nav, next_item);
        }

        if self.changes.as_ref().is_some_and(Changes::is_closed) {
            tracing::debug!(nav_id = %nav.id(), "Nav change stream closed");
            self.changes = None;
        }

        self.poll(nav);
    }

    /// Advance the state machine past every completed transition
    pub fn poll(&mut self, nav: &Nav) {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::FadingOut { handle, next_item } if handle.is_complete() => {
                    self.complete_fade_out(nav, next_item);
                }
                Phase::FadingIn { handle, item } if handle.is_complete() => {
                    tracing::debug!(nav_id = %nav.id(), item_id = %item.id(), "Pane shown");
                    item.shown().emit(&());
                    nav.shown().emit(&item.id().to_string());
                }
                phase => {
                    self.phase = phase;
                    break;
                }
            }
        }
    }

    /// Reconcile mounted panes with the nav's items
    pub fn render(&mut self, nav: &Nav) {
        let transitioning = self.active_pane.as_ref().map(|pane| pane.item().clone());
        let items = nav.items();

        let (mounted, unmounted) = self.registry.reconcile(&items, |item| {
            item.is_panel_in_dom() || transitioning.as_ref() == Some(item)
        });

        let animation = nav.animation();
        let role = self
            .pane_role
            .clone()
            .or_else(|| (nav.roles() == Roles::Tablist).then(|| "tabpanel".to_string()));
        let duration = if animation {
            self.fade_duration
        } else {
            Duration::ZERO
        };

        for pane in self.registry.iter() {
            let element = pane.element();
            element.toggle_class(FADE_CLASS, animation);
            element.set_attribute("role", role.as_deref());
            element.set_transition(Duration::ZERO, duration);
        }

        if !mounted.is_empty() || !unmounted.is_empty() {
            tracing::debug!(
                nav_id = %nav.id(),
                mounted = ?mounted,
                unmounted = ?unmounted,
                "Rendered panes"
            );
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// No transition in flight
    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.active_pane.as_ref()
    }

    pub fn panes(&self) -> &PaneRegistry {
        &self.registry
    }

    /// Whether `item`'s pane is the active pane, which keeps it mounted
    /// while it fades out
    pub fn is_panel_transitioning(&self, item: &NavItem) -> bool {
        self.active_pane
            .as_ref()
            .is_some_and(|pane| pane.item() == item)
    }

    /// Context flag handed to the pane's content
    pub fn is_content_active(&self, pane: &Pane) -> bool {
        pane.item().is_active() || self.is_panel_transitioning(pane.item())
    }

    /// Stop the running transition and stop listening for changes
    pub fn destroy(&mut self) {
        if let Some(handle) = self.phase.handle() {
            handle.cancel();
        }
        self.phase = Phase::Idle;
        self.changes = None;
    }

    fn update_active_pane(&mut self) {
        self.active_pane = self.registry.find_active().cloned();
        if let Some(pane) = &self.active_pane {
            pane.element().add_class(SHOW_CLASS);
            pane.element().add_class(ACTIVE_CLASS);
        }
    }

    fn options(&self, nav: &Nav) -> TransitionOptions {
        TransitionOptions::new(nav.animation())
    }

    fn on_item_change(&mut self, nav: &Nav, next_item: Option<NavItem>) {
        if next_item.is_none() && self.active_pane.is_none() {
            return;
        }

        if let Some(handle) = self.phase.handle() {
            if handle.cancel() {
                tracing::debug!(
                    nav_id = %nav.id(),
                    phase = self.phase.as_str(),
                    "Interrupted running pane transition"
                );
            }
        }
        self.phase = Phase::Idle;

        // The pane of the next item only exists after a render
        self.render(nav);

        match self.active_pane.clone() {
            Some(pane) => {
                tracing::debug!(
                    nav_id = %nav.id(),
                    from = %pane.item().id(),
                    to = ?next_item.as_ref().map(NavItem::id),
                    "Fading out active pane"
                );
                let handle = self
                    .runner
                    .run(pane.element(), Arc::new(FadeOut), &self.options(nav));
                self.phase = Phase::FadingOut { handle, next_item };
            }
            None => self.complete_fade_out(nav, next_item),
        }

        self.poll(nav);
    }

    fn complete_fade_out(&mut self, nav: &Nav, next_item: Option<NavItem>) {
        let outgoing = self.active_pane.take().map(|pane| pane.item().clone());
        self.active_pane = self.registry.find_by_item(next_item.as_ref()).cloned();

        // Drops the outgoing pane unless its item is still mount-eligible
        self.render(nav);

        if let Some(pane) = self.active_pane.clone() {
            // .active must be in place before the fade-in reflows
            pane.element().add_class(ACTIVE_CLASS);
            let handle = self
                .runner
                .run(pane.element(), Arc::new(FadeIn), &self.options(nav));
            self.phase = Phase::FadingIn {
                handle,
                item: pane.item().clone(),
            };
        }

        if let Some(item) = outgoing {
            tracing::debug!(nav_id = %nav.id(), item_id = %item.id(), "Pane hidden");
            item.hidden().emit(&());
            nav.hidden().emit(&item.id().to_string());
        }
    }
}
