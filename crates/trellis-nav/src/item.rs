//! Nav item
//!
//! Items are shared handles: equality is identity, not value. Two items
//! with the same id in different navs are different items.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::NavError;
use crate::event::EventEmitter;
use crate::nav::NavShared;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItemConfig {
    pub id: String,
    #[serde(default)]
    pub disabled: bool,
    /// Overrides the nav-level `destroy_on_hide`
    #[serde(default)]
    pub destroy_on_hide: Option<bool>,
    /// Overrides the generated `{nav_id}-{id}` DOM id
    #[serde(default)]
    pub dom_id: Option<String>,
}

impl NavItemConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn destroy_on_hide(mut self, destroy_on_hide: bool) -> Self {
        self.destroy_on_hide = Some(destroy_on_hide);
        self
    }
}

#[derive(Debug)]
struct ItemState {
    disabled: bool,
    destroy_on_hide: Option<bool>,
}

struct ItemInner {
    id: String,
    dom_id: String,
    state: RwLock<ItemState>,
    nav: Arc<NavShared>,
    shown: EventEmitter<()>,
    hidden: EventEmitter<()>,
}

#[derive(Clone)]
pub struct NavItem {
    inner: Arc<ItemInner>,
}

impl NavItem {
    pub(crate) fn new(config: NavItemConfig, nav: Arc<NavShared>) -> Result<Self> {
        if config.id.trim().is_empty() {
            return Err(NavError::InvalidId(config.id));
        }

        let dom_id = config
            .dom_id
            .unwrap_or_else(|| format!("{}-{}", nav.nav_id, config.id));

        Ok(Self {
            inner: Arc::new(ItemInner {
                id: config.id,
                dom_id,
                state: RwLock::new(ItemState {
                    disabled: config.disabled,
                    destroy_on_hide: config.destroy_on_hide,
                }),
                nav,
                shown: EventEmitter::new(),
                hidden: EventEmitter::new(),
            }),
        })
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// DOM id of the nav link
    pub fn dom_id(&self) -> &str {
        &self.inner.dom_id
    }

    /// DOM id of the pane rendered for this item
    pub fn panel_dom_id(&self) -> String {
        format!("{}-panel", self.inner.dom_id)
    }

    /// Whether this item is the nav's active item
    pub fn is_active(&self) -> bool {
        self.inner.nav.active_id.read().as_deref() == Some(self.inner.id.as_str())
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.state.read().disabled
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.state.write().disabled = disabled;
    }

    pub fn set_destroy_on_hide(&self, destroy_on_hide: Option<bool>) {
        self.inner.state.write().destroy_on_hide = destroy_on_hide;
    }

    /// Mount eligibility: the pane stays rendered while the item is active,
    /// or always when hidden panes are not destroyed
    pub fn is_panel_in_dom(&self) -> bool {
        let destroy_on_hide = self
            .inner
            .state
            .read()
            .destroy_on_hide
            .unwrap_or_else(|| self.inner.nav.config.read().destroy_on_hide);

        !destroy_on_hide || self.is_active()
    }

    /// Emitted after this item's pane has faded in
    pub fn shown(&self) -> &EventEmitter<()> {
        &self.inner.shown
    }

    /// Emitted after this item's pane has faded out
    pub fn hidden(&self) -> &EventEmitter<()> {
        &self.inner.hidden
    }
}

impl PartialEq for NavItem {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for NavItem {}

impl fmt::Debug for NavItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavItem")
            .field("id", &self.inner.id)
            .field("active", &self.is_active())
            .field("disabled", &self.is_disabled())
            .finish()
    }
}
