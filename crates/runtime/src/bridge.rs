//! The explicit context object that receives host hooks.
//!
//! [`ShareBridge`] owns one instance of every stateful component (peer cache,
//! selection machine, redirector) and wires them to the host's callbacks. It
//! is built once per session through [`ShareBridgeBuilder`] and then driven
//! synchronously from the host's single update thread.

use share_core::{
    Actor, ActorId, ActionCard, GrantCatalog, GrantDetector, Hotkey, Modifiers, PointerInput,
    Quantity, ShareConfig, health_percentage,
};
use tracing::{debug, info};

use crate::cache::{PeerCache, PeerPattern, PeerSnapshot};
use crate::capability::Capability;
use crate::error::{BridgeError, Result};
use crate::hooks::{HostEvent, TargetingOverrides};
use crate::redirect::ActionRedirector;
use crate::selection::{SelectionView, TargetSelectionMachine, TickOutcome};
use crate::view::{Emphasis, PeerHighlight, ShareIndicator};

/// Why a played action did not start sharing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    CapabilityAbsent,
    NotQualifying,
    HotkeyNotHeld,
    NoPeers,
    AlreadySelecting,
    /// The aimed-at actor is not in the current peer set.
    NotAPeer,
}

/// Result of offering a played action for sharing.
#[derive(Clone, Debug, PartialEq)]
pub enum ShareDecision {
    Skipped(SkipReason),
    /// An interactive selection episode is open.
    Selecting,
    /// The most wounded peer was chosen without asking.
    AutoSelected(Actor),
    /// The action was aimed directly at a peer.
    Aimed(Actor),
}

impl ShareDecision {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ShareDecision::Skipped(_))
    }
}

/// Per-session bridge between host hooks and the sharing components.
pub struct ShareBridge {
    capability: Capability,
    cache: PeerCache,
    selection: TargetSelectionMachine,
    redirector: ActionRedirector,
    catalog: Box<dyn GrantCatalog>,
    config: ShareConfig,
    hotkey: Hotkey,
    overrides: TargetingOverrides,
    pending_action: Option<u64>,
}

impl ShareBridge {
    pub fn builder() -> ShareBridgeBuilder {
        ShareBridgeBuilder::new()
    }

    // ---------------------------------------------------------------------
    // Lifecycle hooks
    // ---------------------------------------------------------------------

    pub fn on_battle_start(&mut self) {
        self.handle(&HostEvent::BattleStart);
    }

    pub fn on_battle_end(&mut self) {
        self.handle(&HostEvent::BattleEnd);
    }

    pub fn on_game_start(&mut self) {
        self.handle(&HostEvent::GameStart);
    }

    /// Peer membership can change between battle boundaries; drawing a card
    /// is the earliest stable point to notice.
    pub fn on_card_drawn(&mut self, card: &ActionCard) {
        debug!(target: "share::bridge", card = %card.id, "Card drawn, invalidating peers");
        self.cache.invalidate();
        self.end_selection();
    }

    /// The local actor finished using `card`.
    ///
    /// The redirect intent is cleared whether or not the card qualified, so
    /// an intent can never leak into a later action.
    pub fn on_actor_action_used(&mut self, card: &ActionCard) {
        self.redirector.clear_intent();
        self.overrides.forget(card.instance);
        if self.pending_action == Some(card.instance) {
            debug!(
                target: "share::bridge",
                card = %card.id,
                "Owning action resolved, ending selection"
            );
            self.end_selection();
        }
    }

    /// Forwards one lifecycle event to the matching hook.
    pub fn handle(&mut self, event: &HostEvent) {
        if event.is_boundary() {
            self.reset_boundary(event.name());
            return;
        }
        match event {
            HostEvent::CardDrawn(card) => self.on_card_drawn(card),
            HostEvent::ActionUsed(card) => self.on_actor_action_used(card),
            HostEvent::BattleStart | HostEvent::BattleEnd | HostEvent::GameStart => {}
        }
    }

    fn reset_boundary(&mut self, boundary: &'static str) {
        debug!(target: "share::bridge", boundary, "Lifecycle boundary, resetting share state");
        self.cache.invalidate();
        self.end_selection();
        self.redirector.clear_intent();
        self.overrides.clear();
    }

    fn end_selection(&mut self) {
        self.selection.end();
        self.pending_action = None;
    }

    // ---------------------------------------------------------------------
    // Triggering events
    // ---------------------------------------------------------------------

    /// Offers a freshly played action for sharing.
    pub fn on_action_played(&mut self, card: &ActionCard, modifiers: Modifiers) -> ShareDecision {
        if let Some(reason) = self.precheck(card) {
            return self.skip(card, reason);
        }
        if self.config.require_hold_key && !self.hotkey.is_held(modifiers) {
            return self.skip(card, SkipReason::HotkeyNotHeld);
        }
        if !self.selection.is_idle() {
            return self.skip(card, SkipReason::AlreadySelecting);
        }

        if self.config.auto_select_lowest_health {
            let Some(peer) = self.cache.most_wounded() else {
                return self.skip(card, SkipReason::NoPeers);
            };
            info!(
                target: "share::bridge",
                card = %card.id,
                peer = %peer.id,
                name = %peer.name,
                health = health_percentage(peer.health, peer.max_health),
                "Auto-selected most wounded peer"
            );
            self.redirector.set_intent(peer.clone());
            return ShareDecision::AutoSelected(peer);
        }

        if !self.selection.begin(&mut self.cache) {
            return self.skip(card, SkipReason::NoPeers);
        }
        self.pending_action = Some(card.instance);
        ShareDecision::Selecting
    }

    /// Handles an action the player aimed directly at an actor while in
    /// peer-targeting mode.
    pub fn on_action_aimed(
        &mut self,
        card: &ActionCard,
        target: ActorId,
        modifiers: Modifiers,
    ) -> ShareDecision {
        if let Some(reason) = self.precheck(card) {
            return self.skip(card, reason);
        }
        if !self.hotkey.is_held(modifiers) {
            return self.skip(card, SkipReason::HotkeyNotHeld);
        }
        if !self.selection.is_idle() {
            return self.skip(card, SkipReason::AlreadySelecting);
        }
        let Some(peer) = self.cache.find(target) else {
            return self.skip(card, SkipReason::NotAPeer);
        };

        info!(target: "share::bridge", card = %card.id, peer = %peer.id, "Action aimed at peer");
        self.redirector.set_intent(peer.clone());
        ShareDecision::Aimed(peer)
    }

    fn precheck(&self, card: &ActionCard) -> Option<SkipReason> {
        if !self.capability.is_present() {
            Some(SkipReason::CapabilityAbsent)
        } else if !self.catalog.is_resource_grant(card) {
            Some(SkipReason::NotQualifying)
        } else {
            None
        }
    }

    fn skip(&self, card: &ActionCard, reason: SkipReason) -> ShareDecision {
        debug!(target: "share::bridge", card = %card.id, reason = ?reason, "Action not shared");
        ShareDecision::Skipped(reason)
    }

    // ---------------------------------------------------------------------
    // Per-frame hooks
    // ---------------------------------------------------------------------

    /// Toggles peer targeting on a card in (or leaving) the local hand.
    pub fn on_entity_update(&mut self, card: &mut ActionCard, in_hand: bool, modifiers: Modifiers) {
        if !self.capability.is_present() {
            return;
        }
        if !in_hand {
            self.overrides.restore(card);
            return;
        }
        if !self.catalog.is_resource_grant(card) {
            return;
        }
        if self.cache.has_peers() && self.hotkey.is_held(modifiers) {
            self.overrides.apply(card);
        } else {
            self.overrides.restore(card);
        }
    }

    /// Advances the open selection episode, if any.
    pub fn on_frame_update(&mut self, input: &mut PointerInput) -> TickOutcome {
        let outcome = self.selection.tick(input);
        match &outcome {
            TickOutcome::Resolved(peer) => {
                self.redirector.set_intent(peer.clone());
                self.end_selection();
            }
            TickOutcome::Aborted => self.end_selection(),
            TickOutcome::Inactive | TickOutcome::Selecting { .. } => {}
        }
        outcome
    }

    // ---------------------------------------------------------------------
    // Interception
    // ---------------------------------------------------------------------

    /// Returns the actor a newly constructed grant should apply to.
    pub fn on_grant_action_constructed(&mut self, original: ActorId, amount: Quantity) -> ActorId {
        if !self.capability.is_present() {
            return original;
        }
        self.redirector.on_grant_action_constructed(original, amount)
    }

    // ---------------------------------------------------------------------
    // Rendering collaborator
    // ---------------------------------------------------------------------

    /// Current peers, refreshed first if the cache is stale.
    pub fn peers(&mut self) -> Vec<Actor> {
        self.cache.peers()
    }

    pub fn selection_state(&self) -> SelectionView {
        self.selection.view()
    }

    /// One overlay per selectable peer while an episode is open.
    pub fn peer_highlights(&self) -> Vec<PeerHighlight> {
        let hovered = self.selection.hovered().map(|peer| peer.id);
        self.selection
            .candidates()
            .iter()
            .map(|peer| {
                let emphasis = if Some(peer.id) == hovered {
                    Emphasis::Hovered
                } else {
                    Emphasis::Available
                };
                PeerHighlight {
                    peer: peer.id,
                    name: peer.name.clone(),
                    region: peer.region,
                    emphasis,
                    tint: emphasis.tint(),
                }
            })
            .collect()
    }

    /// Indicator for a card in the local hand, if it would be shared now.
    pub fn share_indicator(
        &mut self,
        card: &ActionCard,
        in_combat: bool,
        modifiers: Modifiers,
    ) -> Option<ShareIndicator> {
        let show = self.config.show_share_indicator
            && in_combat
            && self.hotkey.is_held(modifiers)
            && self.can_be_shared(card);
        show.then(ShareIndicator::default)
    }

    /// True if the card qualifies and there is someone to share it with.
    pub fn can_be_shared(&mut self, card: &ActionCard) -> bool {
        self.capability.is_present()
            && self.catalog.is_resource_grant(card)
            && self.cache.has_peers()
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn cache(&self) -> &PeerCache {
        &self.cache
    }

    /// Shared peer snapshot, refreshed first if the cache is stale.
    pub fn peer_snapshot(&mut self) -> PeerSnapshot {
        self.cache.snapshot()
    }

    pub fn selection(&self) -> &TargetSelectionMachine {
        &self.selection
    }

    pub fn redirector(&self) -> &ActionRedirector {
        &self.redirector
    }

    pub fn overrides(&self) -> &TargetingOverrides {
        &self.overrides
    }

    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    pub fn hotkey(&self) -> Hotkey {
        self.hotkey
    }

    pub fn local_actor(&self) -> ActorId {
        self.redirector.local_actor()
    }

    /// Rebinds the bridge to a new local actor (e.g. after a reconnect).
    pub fn set_local_actor(&mut self, local: ActorId) {
        self.cache.set_local_actor(local);
        self.redirector.set_local_actor(local);
        self.redirector.clear_intent();
        self.end_selection();
    }
}

/// Builder for [`ShareBridge`].
pub struct ShareBridgeBuilder {
    config: ShareConfig,
    local: Option<ActorId>,
    capability: Capability,
    catalog: Option<Box<dyn GrantCatalog>>,
    pattern: PeerPattern,
}

impl ShareBridgeBuilder {
    fn new() -> Self {
        Self {
            config: ShareConfig::default(),
            local: None,
            capability: Capability::absent(),
            catalog: None,
            pattern: PeerPattern::default(),
        }
    }

    /// Override configuration
    pub fn config(mut self, config: ShareConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the local actor (required)
    pub fn local_actor(mut self, local: ActorId) -> Self {
        self.local = Some(local);
        self
    }

    /// Set the detected capability. Defaults to absent.
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self
    }

    /// Replace the grant catalog.
    ///
    /// If not provided, a [`GrantDetector`] built from the configured
    /// exclusion list is used.
    pub fn catalog(mut self, catalog: impl GrantCatalog + 'static) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    pub fn peer_pattern(mut self, pattern: PeerPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn build(self) -> Result<ShareBridge> {
        let local = self.local.ok_or(BridgeError::MissingLocalActor)?;

        let hotkey = Hotkey::parse(&self.config.share_hotkey).unwrap_or_else(|error| {
            debug!(target: "share::bridge", error = %error, "Falling back to default share hotkey");
            Hotkey::default()
        });
        let catalog = self.catalog.unwrap_or_else(|| {
            Box::new(GrantDetector::from_config(&self.config)) as Box<dyn GrantCatalog>
        });
        let cache = PeerCache::new(&self.capability, local).with_pattern(self.pattern);

        info!(
            target: "share::bridge",
            local = %local,
            subsystem = self.capability.subsystem().unwrap_or("<absent>"),
            hotkey = %hotkey,
            "Share bridge ready"
        );

        Ok(ShareBridge {
            capability: self.capability,
            cache,
            selection: TargetSelectionMachine::new(),
            redirector: ActionRedirector::new(local),
            catalog,
            config: self.config,
            hotkey,
            overrides: TargetingOverrides::new(),
            pending_action: None,
        })
    }
}
