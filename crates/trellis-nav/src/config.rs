//! Nav configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Accessibility roles applied to the nav and its panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roles {
    #[default]
    Tablist,
    None,
}

/// Keyboard navigation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyboard {
    #[default]
    Off,
    /// Arrow keys move focus only
    On,
    /// Arrow keys move focus and select
    ChangeWithArrows,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Animate pane hand-off; read at the start of every transition
    pub animation: bool,
    /// Unmount panes of inactive items
    pub destroy_on_hide: bool,
    pub orientation: Orientation,
    pub roles: Roles,
    pub keyboard: Keyboard,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            animation: true,
            destroy_on_hide: true,
            orientation: Orientation::Horizontal,
            roles: Roles::Tablist,
            keyboard: Keyboard::Off,
        }
    }
}
