//! Presentation data for a renderer. Nothing here draws pixels.

use share_core::{ActorId, HitRegion};

/// RGBA colour with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const AVAILABLE: Tint = Tint::rgba(0.3, 0.8, 1.0, 0.5);
    pub const HOVERED: Tint = Tint::rgba(0.2, 1.0, 0.2, 0.7);
    pub const INDICATOR: Tint = Tint::rgba(0.3, 0.7, 1.0, 0.8);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Available,
    Hovered,
}

impl Emphasis {
    pub fn tint(self) -> Tint {
        match self {
            Emphasis::Available => Tint::AVAILABLE,
            Emphasis::Hovered => Tint::HOVERED,
        }
    }
}

/// Overlay for one selectable peer.
#[derive(Clone, Debug, PartialEq)]
pub struct PeerHighlight {
    pub peer: ActorId,
    pub name: String,
    pub region: HitRegion,
    pub emphasis: Emphasis,
    pub tint: Tint,
}

/// Label drawn above a card that would be shared if played now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShareIndicator {
    pub label: &'static str,
    pub tint: Tint,
}

impl Default for ShareIndicator {
    fn default() -> Self {
        Self {
            label: "ALLY",
            tint: Tint::INDICATOR,
        }
    }
}
