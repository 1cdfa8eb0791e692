//! Environment overrides layered on top of the persisted file.

use std::env;

use share_core::ShareConfig;

/// Apply process environment variables to a loaded configuration.
///
/// Environment variables:
/// - `SHARE_REQUIRE_HOLD_KEY` - Only share while the hotkey is held
/// - `SHARE_SHOW_INDICATOR` - Show the "ALLY" indicator on cards
/// - `SHARE_AUTO_SELECT_LOWEST_HEALTH` - Pick the most wounded peer automatically
/// - `SHARE_HOTKEY` - Modifier name (`SHIFT`, `CTRL`, `ALT`)
pub fn apply_env(config: &mut ShareConfig) {
    apply_with(config, |key| env::var(key).ok());
}

fn apply_with(config: &mut ShareConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(value) = lookup("SHARE_REQUIRE_HOLD_KEY").as_deref().and_then(parse_bool) {
        config.require_hold_key = value;
    }
    if let Some(value) = lookup("SHARE_SHOW_INDICATOR").as_deref().and_then(parse_bool) {
        config.show_share_indicator = value;
    }
    if let Some(value) = lookup("SHARE_AUTO_SELECT_LOWEST_HEALTH")
        .as_deref()
        .and_then(parse_bool)
    {
        config.auto_select_lowest_health = value;
    }
    if let Some(hotkey) = lookup("SHARE_HOTKEY").filter(|value| !value.trim().is_empty()) {
        config.share_hotkey = hotkey.trim().to_owned();
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
