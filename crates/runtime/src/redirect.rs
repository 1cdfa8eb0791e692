//! Single-shot rewrite of self-targeted grant actions.

use share_core::{Actor, ActorId, Quantity};
use tracing::{debug, info};

/// Pending instruction to redirect the next self-targeted grant.
#[derive(Clone, Debug, PartialEq)]
pub struct RedirectIntent {
    pub target: Actor,
}

/// Owns the (at most one) live [`RedirectIntent`].
#[derive(Debug)]
pub struct ActionRedirector {
    local: ActorId,
    intent: Option<RedirectIntent>,
}

impl ActionRedirector {
    pub fn new(local: ActorId) -> Self {
        Self {
            local,
            intent: None,
        }
    }

    pub fn local_actor(&self) -> ActorId {
        self.local
    }

    pub fn set_local_actor(&mut self, local: ActorId) {
        self.local = local;
    }

    /// Arms the redirector. An existing intent is replaced.
    pub fn set_intent(&mut self, target: Actor) {
        if let Some(previous) = &self.intent {
            debug!(
                target: "share::redirect",
                previous = %previous.target.id,
                next = %target.id,
                "Replacing unconsumed redirect intent"
            );
        }
        self.intent = Some(RedirectIntent { target });
    }

    pub fn clear_intent(&mut self) {
        if let Some(intent) = self.intent.take() {
            debug!(target: "share::redirect", peer = %intent.target.id, "Redirect intent cleared");
        }
    }

    pub fn intent(&self) -> Option<&RedirectIntent> {
        self.intent.as_ref()
    }

    pub fn has_intent(&self) -> bool {
        self.intent.is_some()
    }

    /// Interception point for a freshly constructed grant action.
    ///
    /// Returns the target the action should apply to. Only a positive grant
    /// aimed at the local actor is redirected, and doing so consumes the
    /// intent. Grants already aimed elsewhere leave the intent live.
    pub fn on_grant_action_constructed(&mut self, original: ActorId, amount: Quantity) -> ActorId {
        if amount <= 0 || original != self.local {
            return original;
        }
        let Some(intent) = self.intent.take() else {
            return original;
        };

        info!(
            target: "share::redirect",
            peer = %intent.target.id,
            name = %intent.target.name,
            amount,
            "Grant redirected to peer"
        );
        intent.target.id
    }
}
