//! Qualifying-action predicate for resource grants.
//!
//! The host's card catalog owns the authoritative type and amount fields.
//! [`GrantDetector`] trusts them, layers a short exclusion list on top, and
//! only falls back to reading rules text when the catalog left both the type
//! and the amounts empty.

use std::collections::HashSet;

use crate::actor::Quantity;
use crate::card::ActionCard;
use crate::config::ShareConfig;

/// Read-only view of the catalog consumed by the bridge.
pub trait GrantCatalog: Send + Sync {
    /// Returns true if the action grants a defensive resource and may be shared.
    fn is_resource_grant(&self, action: &ActionCard) -> bool;

    /// Returns the amount the action grants, or 0 if unknown.
    fn grant_amount(&self, action: &ActionCard) -> Quantity;
}

/// Base-game actions known to grant block, grouped by character.
pub const KNOWN_GRANT_ACTIONS: &[&str] = &[
    // Ironclad
    "Defend_R",
    "Shrug It Off",
    "Iron Wave",
    "Impervious",
    "Flame Barrier",
    "Entrench",
    "Ghostly Armor",
    "Metallicize",
    "Power Through",
    "Second Wind",
    "True Grit",
    // Silent
    "Defend_G",
    "Dodge and Roll",
    "Blur",
    "Backflip",
    "Cloak and Dagger",
    "Deflect",
    "Leg Sweep",
    "After Image",
    "Footwork",
    "Piercing Wail",
    "Escape Plan",
    "Calculated Gamble",
    // Defect
    "Defend_B",
    "Glacier",
    "Leap",
    "Chill",
    "Coolheaded",
    "Hologram",
    "Auto-Shields",
    "Reinforced Body",
    "Equilibrium",
    "Consume",
    "Core Surge",
    // Watcher
    "Defend_P",
    "Protect",
    "Third Eye",
    "Empty Body",
    "Halt",
    "Wallop",
    "Indignation",
    "Like Water",
    "Mental Fortress",
    "Perseverance",
    "Sanctity",
    "Talk to the Hand",
    "Wave of the Hand",
    "Spirit Shield",
    // Colorless
    "Defend_C",
    "Panacea",
];

/// Actions whose secondary effects make redirection unsafe.
pub const DEFAULT_EXCLUDED_ACTIONS: &[&str] = &[
    // Permanent effect on the caster
    "Barricade",
    // Doubles the caster's existing block
    "Entrench",
    // Deals damage based on the caster's own block
    "Body Slam",
];

const TEXT_MARKERS: &[&str] = &["block", "defend"];

/// Default [`GrantCatalog`] implementation.
#[derive(Clone, Debug)]
pub struct GrantDetector {
    known: HashSet<String>,
    excluded: HashSet<String>,
}

impl GrantDetector {
    /// Creates a detector with the built-in known list and the given exclusions.
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: KNOWN_GRANT_ACTIONS.iter().map(|id| (*id).to_owned()).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a detector using the exclusion list from configuration.
    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(config.excluded_actions.iter().cloned())
    }

    /// Marks a (modded) action id as a known grant.
    pub fn register(&mut self, id: impl Into<String>) {
        self.known.insert(id.into());
    }

    /// Prevents an action id from ever being shared.
    pub fn exclude(&mut self, id: impl Into<String>) {
        self.excluded.insert(id.into());
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(id)
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    fn mentions_grant(description: Option<&str>) -> bool {
        description.is_some_and(|text| {
            let text = text.to_lowercase();
            TEXT_MARKERS.iter().any(|marker| text.contains(marker))
        })
    }
}

impl Default for GrantDetector {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_ACTIONS.iter().copied())
    }
}

impl GrantCatalog for GrantDetector {
    fn is_resource_grant(&self, action: &ActionCard) -> bool {
        if self.is_excluded(&action.id) {
            return false;
        }
        if self.is_known(&action.id) {
            return true;
        }
        if self.grant_amount(action) > 0 {
            return true;
        }

        let catalog_silent =
            action.card_type.is_none() && action.block.is_none() && action.base_block.is_none();
        catalog_silent && Self::mentions_grant(action.description.as_deref())
    }

    fn grant_amount(&self, action: &ActionCard) -> Quantity {
        match (action.block, action.base_block) {
            (Some(block), _) if block > 0 => block,
            (_, Some(base)) if base > 0 => base,
            _ => 0,
        }
    }
}
