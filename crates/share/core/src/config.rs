//! User-facing options for the bridge.
//!
//! The value type lives here so every crate can read it; loading and saving
//! is handled by `share-content`.

use crate::catalog::DEFAULT_EXCLUDED_ACTIONS;

/// Options recognised by the bridge.
///
/// Every field falls back to its default when absent from a persisted file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ShareConfig {
    /// Only open a selection while the share hotkey is held.
    pub require_hold_key: bool,
    /// Draw the "ALLY" indicator on shareable cards.
    pub show_share_indicator: bool,
    /// Skip interactive selection and pick the most wounded peer.
    pub auto_select_lowest_health: bool,
    /// Name of the modifier key that activates sharing (`SHIFT`, `CTRL`, `ALT`).
    pub share_hotkey: String,
    /// Catalog ids that must never be redirected.
    pub excluded_actions: Vec<String>,
}

impl ShareConfig {
    pub const DEFAULT_HOTKEY: &'static str = "SHIFT";

    pub fn new() -> Self {
        Self {
            require_hold_key: false,
            show_share_indicator: true,
            auto_select_lowest_health: false,
            share_hotkey: Self::DEFAULT_HOTKEY.to_owned(),
            excluded_actions: DEFAULT_EXCLUDED_ACTIONS
                .iter()
                .map(|id| (*id).to_owned())
                .collect(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self::new()
    }
}
