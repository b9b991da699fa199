//! Panes and the pane registry
//!
//! A pane is the mounted container for one item's content. The registry
//! holds the panes of the current render pass, in item order.

use trellis_transition::Element;

use crate::item::NavItem;

pub(crate) const TAB_PANE_CLASS: &str = "tab-pane";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    item: NavItem,
    element: Element,
}

impl Pane {
    pub(crate) fn new(item: NavItem) -> Self {
        let element = Element::new(item.panel_dom_id());
        element.add_class(TAB_PANE_CLASS);
        element.set_attribute("aria-labelledby", Some(item.dom_id()));

        Self { item, element }
    }

    pub fn item(&self) -> &NavItem {
        &self.item
    }

    /// Root presentation element
    pub fn element(&self) -> &Element {
        &self.element
    }
}

#[derive(Debug, Default)]
pub struct PaneRegistry {
    panes: Vec<Pane>,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pane backing `item`, by identity
    pub fn find_by_item(&self, item: Option<&NavItem>) -> Option<&Pane> {
        let item = item?;
        self.panes.iter().find(|pane| pane.item == *item)
    }

    /// First pane whose item is active
    pub fn find_active(&self) -> Option<&Pane> {
        self.panes.iter().find(|pane| pane.item.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pane> {
        self.panes.iter()
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Render pass: keep one pane per item accepted by `keep`, in `items`
    /// order. Existing panes are reused so their elements survive.
    /// Returns the ids of items whose panes were mounted and unmounted.
    pub fn reconcile<F>(&mut self, items: &[NavItem], keep: F) -> (Vec<String>, Vec<String>)
    where
        F: Fn(&NavItem) -> bool,
    {
        let mut previous = std::mem::take(&mut self.panes);
        let mut mounted = Vec::new();

        for item in items.iter().filter(|item| keep(item)) {
            match previous.iter().position(|pane| pane.item == *item) {
                Some(index) => self.panes.push(previous.remove(index)),
                None => {
                    mounted.push(item.id().to_string());
                    self.panes.push(Pane::new(item.clone()));
                }
            }
        }

        let unmounted = previous
            .iter()
            .map(|pane| pane.item.id().to_string())
            .collect();

        (mounted, unmounted)
    }
}
