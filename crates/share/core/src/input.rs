//! Per-frame input as reported by the host.

use std::str::FromStr;

use bitflags::bitflags;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::actor::ScreenPoint;

bitflags! {
    /// Modifier keys currently held down.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// Modifier that activates sharing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Hotkey {
    #[default]
    Shift,
    #[strum(to_string = "CTRL", serialize = "CONTROL")]
    Ctrl,
    Alt,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown share hotkey `{0}`")]
pub struct HotkeyParseError(pub String);

impl Hotkey {
    /// Parses a configured hotkey name.
    pub fn parse(name: &str) -> Result<Self, HotkeyParseError> {
        Self::from_str(name.trim()).map_err(|_| HotkeyParseError(name.to_owned()))
    }

    pub fn modifier(self) -> Modifiers {
        match self {
            Hotkey::Shift => Modifiers::SHIFT,
            Hotkey::Ctrl => Modifiers::CTRL,
            Hotkey::Alt => Modifiers::ALT,
        }
    }

    pub fn is_held(self, modifiers: Modifiers) -> bool {
        modifiers.contains(self.modifier())
    }
}

/// Pointer state sampled once per frame.
///
/// Click flags are edge-triggered ("just clicked this frame"). Consumers that
/// act on a click clear the flag so no other consumer sees it on the same
/// frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerInput {
    pub position: ScreenPoint,
    pub clicked_primary: bool,
    pub clicked_secondary: bool,
    pub cancel_pressed: bool,
}

impl PointerInput {
    /// Pointer resting at a position with no buttons pressed.
    pub fn hover(position: ScreenPoint) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Primary click at a position.
    pub fn click(position: ScreenPoint) -> Self {
        Self {
            position,
            clicked_primary: true,
            ..Self::default()
        }
    }

    /// Secondary click at a position.
    pub fn right_click(position: ScreenPoint) -> Self {
        Self {
            position,
            clicked_secondary: true,
            ..Self::default()
        }
    }

    /// Cancel key pressed with the pointer at a position.
    pub fn cancel(position: ScreenPoint) -> Self {
        Self {
            position,
            cancel_pressed: true,
            ..Self::default()
        }
    }
}
