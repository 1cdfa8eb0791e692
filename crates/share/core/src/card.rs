//! Action cards as exposed by the host's card catalog.
//!
//! Only the fields the bridge reads are modelled. Type and amounts are
//! optional because modded catalogs do not always fill them in.
use strum::{Display, EnumString};

use crate::actor::Quantity;

/// Catalog category of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

/// How the host resolves the target of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardTarget {
    /// Targets the acting actor.
    #[default]
    #[strum(serialize = "self")]
    SelfTarget,
    Enemy,
    AllEnemies,
    SelfAndEnemy,
    NoTarget,
    /// Alternate mode set while the share hotkey is held: the host shows its
    /// single-target arrow so the player can aim at a peer.
    Peer,
}

/// One action instance in the local actor's hand or play pile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCard {
    /// Per-instance identity; two copies of the same card differ here.
    pub instance: u64,
    /// Catalog identifier (e.g. `Defend_R`).
    pub id: String,
    pub card_type: Option<CardType>,
    pub target: CardTarget,
    /// Grant amount after upgrades and modifiers.
    pub block: Option<Quantity>,
    /// Grant amount before modifiers.
    pub base_block: Option<Quantity>,
    /// Raw rules text, used only by the fallback heuristic.
    pub description: Option<String>,
}

impl ActionCard {
    pub fn new(instance: u64, id: impl Into<String>) -> Self {
        Self {
            instance,
            id: id.into(),
            card_type: None,
            target: CardTarget::SelfTarget,
            block: None,
            base_block: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: CardTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: Quantity) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn with_base_block(mut self, base_block: Quantity) -> Self {
        self.base_block = Some(base_block);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
