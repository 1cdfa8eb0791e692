//! Alternate-targeting mode for qualifying cards in hand.

use std::collections::HashMap;

use share_core::{ActionCard, CardTarget};
use tracing::trace;

/// Remembers the original targeting mode of cards switched to
/// [`CardTarget::Peer`], keyed by card instance.
#[derive(Debug, Default)]
pub struct TargetingOverrides {
    original: HashMap<u64, CardTarget>,
}

impl TargetingOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches a self-targeted card to peer targeting.
    ///
    /// The original mode is recorded the first time only. Cards with any
    /// other targeting mode are left untouched.
    pub fn apply(&mut self, card: &mut ActionCard) {
        if card.target != CardTarget::SelfTarget && !self.original.contains_key(&card.instance) {
            return;
        }
        self.original.entry(card.instance).or_insert(card.target);
        if card.target == CardTarget::SelfTarget {
            trace!(target: "share::bridge", card = %card.id, "Peer targeting enabled");
            card.target = CardTarget::Peer;
        }
    }

    /// Puts back the recorded mode, if the card was overridden.
    pub fn restore(&mut self, card: &mut ActionCard) {
        if let Some(original) = self.original.remove(&card.instance) {
            trace!(target: "share::bridge", card = %card.id, "Peer targeting restored");
            card.target = original;
        }
    }

    /// Drops the record for a card instance without touching the card.
    pub fn forget(&mut self, instance: u64) {
        self.original.remove(&instance);
    }

    pub fn clear(&mut self) {
        self.original.clear();
    }

    pub fn is_overridden(&self, instance: u64) -> bool {
        self.original.contains_key(&instance)
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}
