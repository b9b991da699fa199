//! Pane fade transitions

use trellis_transition::{Element, Transition};

pub(crate) const SHOW_CLASS: &str = "show";
pub(crate) const ACTIVE_CLASS: &str = "active";

/// Drops `.show`, then `.active` once the fade has finished
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeOut;

impl Transition for FadeOut {
    fn on_start(&self, element: &Element, _animation: bool) {
        element.remove_class(SHOW_CLASS);
    }

    fn on_end(&self, element: &Element) {
        element.remove_class(ACTIVE_CLASS);
    }

    fn name(&self) -> &'static str {
        "nav-fade-out"
    }
}

/// Adds `.show`. Expects `.active` to be in place already.
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeIn;

impl Transition for FadeIn {
    fn on_start(&self, element: &Element, animation: bool) {
        if animation {
            element.reflow();
        }
        element.add_class(SHOW_CLASS);
    }

    fn name(&self) -> &'static str {
        "nav-fade-in"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_out() {
        let el = Element::new("pane");
        el.add_class(SHOW_CLASS);
        el.add_class(ACTIVE_CLASS);

        FadeOut.on_start(&el, true);
        assert!(!el.has_class(SHOW_CLASS));
        assert!(el.has_class(ACTIVE_CLASS));

        FadeOut.on_end(&el);
        assert!(!el.has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_fade_in_reflows_only_when_animated() {
        let el = Element::new("pane");
        FadeIn.on_start(&el, false);
        assert_eq!(el.reflow_count(), 0);
        assert!(el.has_class(SHOW_CLASS));

        FadeIn.on_start(&el, true);
        assert_eq!(el.reflow_count(), 1);
    }
}
