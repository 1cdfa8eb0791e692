//! Inbound host hooks.
//!
//! The host calls into [`ShareBridge`](crate::ShareBridge) from its own
//! lifecycle and per-frame callbacks. Lifecycle callbacks can also be
//! forwarded as a single [`HostEvent`] stream through
//! [`ShareBridge::handle`](crate::ShareBridge::handle).
//!
//! # Ordering
//!
//! Lifecycle hooks always invalidate the peer cache and force selection back
//! to idle before the next frame's gameplay logic runs. No hook returns an
//! error; internal failures degrade to "no peers" or "pass-through".

mod targeting;

pub use targeting::TargetingOverrides;

use share_core::ActionCard;

/// Lifecycle events that may change peer membership or end an action.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    BattleStart,
    BattleEnd,
    GameStart,
    CardDrawn(ActionCard),
    /// The local actor finished using an action.
    ActionUsed(ActionCard),
}

impl HostEvent {
    /// True for events that mark a battle or game boundary.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            HostEvent::BattleStart | HostEvent::BattleEnd | HostEvent::GameStart
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::BattleStart => "battle_start",
            HostEvent::BattleEnd => "battle_end",
            HostEvent::GameStart => "game_start",
            HostEvent::CardDrawn(_) => "card_drawn",
            HostEvent::ActionUsed(_) => "action_used",
        }
    }
}
