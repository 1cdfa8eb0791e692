//! Interactive peer selection driven by per-frame pointer input.
//!
//! ```text
//! Idle ──begin()──▶ Selecting ──primary click on peer──▶ Committed ─┐
//!  ▲                    │                                           │
//!  │                    └──secondary click / cancel──▶ Cancelled ───┤
//!  └─────────────────────────────── end() ◀─────────────────────────┘
//! ```
//!
//! An episode only ever looks at the snapshot taken when it began, so a peer
//! that appears or disappears mid-episode can never be committed.

use share_core::{Actor, ActorId, PointerInput};
use tracing::{debug, info};

use crate::cache::{PeerCache, PeerSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Selecting,
    Committed,
    Cancelled,
}

/// Signal returned by [`TargetSelectionMachine::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// No episode is open.
    Inactive,
    /// Still selecting; carries the peer under the pointer, if any.
    Selecting { hovered: Option<ActorId> },
    /// A peer was committed this tick.
    Resolved(Actor),
    /// The episode was cancelled this tick.
    Aborted,
}

/// Read-only view of the machine for presentation.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SelectionView {
    pub selecting: bool,
    pub hovered: Option<Actor>,
}

/// Single-episode selection state machine.
#[derive(Debug, Default)]
pub struct TargetSelectionMachine {
    phase: SelectionPhase,
    snapshot: Option<PeerSnapshot>,
    hovered: Option<usize>,
    committed: Option<Actor>,
}

impl TargetSelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an episode over a freshly refreshed peer set.
    ///
    /// Returns true if the machine is selecting afterwards. Calling this
    /// while an episode is open leaves the machine and its snapshot as they
    /// are.
    pub fn begin(&mut self, cache: &mut PeerCache) -> bool {
        if self.phase != SelectionPhase::Idle {
            debug!(
                target: "share::selection",
                phase = ?self.phase,
                "begin() ignored, episode already open"
            );
            return self.phase == SelectionPhase::Selecting;
        }

        cache.refresh();
        let snapshot = cache.snapshot();
        if snapshot.is_empty() {
            debug!(target: "share::selection", "No peers, selection not started");
            return false;
        }

        debug!(target: "share::selection", peers = snapshot.len(), "Selection started");
        self.snapshot = Some(snapshot);
        self.hovered = None;
        self.committed = None;
        self.phase = SelectionPhase::Selecting;
        true
    }

    /// Advances the episode by one frame of input.
    ///
    /// A primary click that commits a peer is consumed: `clicked_primary` is
    /// cleared on `input` so later consumers on the same frame do not see it.
    pub fn tick(&mut self, input: &mut PointerInput) -> TickOutcome {
        if self.phase != SelectionPhase::Selecting {
            return TickOutcome::Inactive;
        }
        let Some(snapshot) = self.snapshot.as_ref() else {
            debug!(target: "share::selection", "Selecting without a snapshot, resetting");
            self.end();
            return TickOutcome::Inactive;
        };

        self.hovered = snapshot
            .iter()
            .position(|peer| peer.region.contains(input.position));

        if input.clicked_primary
            && let Some(index) = self.hovered
        {
            let peer = snapshot[index].clone();
            input.clicked_primary = false;
            info!(target: "share::selection", peer = %peer.id, name = %peer.name, "Peer selected");
            self.committed = Some(peer.clone());
            self.phase = SelectionPhase::Committed;
            return TickOutcome::Resolved(peer);
        }

        if input.clicked_secondary || input.cancel_pressed {
            debug!(target: "share::selection", "Selection cancelled");
            self.phase = SelectionPhase::Cancelled;
            return TickOutcome::Aborted;
        }

        TickOutcome::Selecting {
            hovered: self.hovered.map(|index| snapshot[index].id),
        }
    }

    /// Forces the machine back to `Idle` from any phase.
    pub fn end(&mut self) {
        self.phase = SelectionPhase::Idle;
        self.snapshot = None;
        self.hovered = None;
        self.committed = None;
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SelectionPhase::Idle
    }

    pub fn is_selecting(&self) -> bool {
        self.phase == SelectionPhase::Selecting
    }

    pub fn hovered(&self) -> Option<&Actor> {
        let index = self.hovered?;
        self.snapshot.as_ref()?.get(index)
    }

    pub fn committed(&self) -> Option<&Actor> {
        self.committed.as_ref()
    }

    /// Peers of the open episode, empty when idle.
    pub fn candidates(&self) -> &[Actor] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    pub fn view(&self) -> SelectionView {
        SelectionView {
            selecting: self.is_selecting(),
            hovered: self.hovered().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use share_core::{HitRegion, PeerReadError, ScreenPoint};

    use super::*;
    use crate::capability::{Capability, PeerSource};

    struct SharedSource(Mutex<Vec<Actor>>);

    impl PeerSource for SharedSource {
        fn describe(&self) -> String {
            "shared".into()
        }

        fn read_peers(&self) -> Result<Vec<Actor>, PeerReadError> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    fn peer(id: u64, x: f32) -> Actor {
        Actor::player(ActorId(id), format!("peer-{id}"), 20)
            .with_region(HitRegion::new(x, 0.0, 100.0, 100.0))
    }

    fn setup(peers: Vec<Actor>) -> (Arc<SharedSource>, PeerCache) {
        let source = Arc::new(SharedSource(Mutex::new(peers)));
        let capability =
            Capability::with_source("test", Arc::clone(&source) as Arc<dyn PeerSource>);
        (source, PeerCache::new(&capability, ActorId(0)))
    }

    #[test]
    fn begin_without_peers_stays_idle() {
        let (_, mut cache) = setup(vec![]);
        let mut machine = TargetSelectionMachine::new();
        assert!(!machine.begin(&mut cache));
        assert_eq!(machine.phase(), SelectionPhase::Idle);
    }

    #[test]
    fn begin_is_idempotent() {
        let (source, mut cache) = setup(vec![peer(1, 0.0)]);
        let mut machine = TargetSelectionMachine::new();

        assert!(machine.begin(&mut cache));
        let refreshes = cache.refresh_count();
        source.0.lock().unwrap().push(peer(2, 200.0));

        assert!(machine.begin(&mut cache));
        assert_eq!(machine.phase(), SelectionPhase::Selecting);
        assert_eq!(machine.candidates().len(), 1);
        assert_eq!(cache.refresh_count(), refreshes);
    }

    #[test]
    fn hover_picks_first_match_in_snapshot_order() {
        // Overlapping regions: both contain x = 60.
        let (_, mut cache) = setup(vec![peer(1, 0.0), peer(2, 50.0)]);
        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);

        let mut input = PointerInput::hover(ScreenPoint::new(60.0, 10.0));
        assert_eq!(
            machine.tick(&mut input),
            TickOutcome::Selecting {
                hovered: Some(ActorId(1))
            }
        );

        let mut input = PointerInput::hover(ScreenPoint::new(500.0, 10.0));
        assert_eq!(
            machine.tick(&mut input),
            TickOutcome::Selecting { hovered: None }
        );
        assert!(machine.hovered().is_none());
    }

    #[test]
    fn primary_click_on_peer_commits_and_consumes_click() {
        let (_, mut cache) = setup(vec![peer(1, 0.0), peer(2, 200.0)]);
        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);

        let mut input = PointerInput::click(ScreenPoint::new(250.0, 50.0));
        let outcome = machine.tick(&mut input);

        assert_eq!(outcome, TickOutcome::Resolved(peer(2, 200.0)));
        assert!(!input.clicked_primary);
        assert_eq!(machine.phase(), SelectionPhase::Committed);
        assert_eq!(machine.committed().map(|p| p.id), Some(ActorId(2)));

        // Resolution is signalled exactly once.
        let mut again = PointerInput::click(ScreenPoint::new(250.0, 50.0));
        assert_eq!(machine.tick(&mut again), TickOutcome::Inactive);
        assert!(again.clicked_primary);
    }

    #[test]
    fn primary_click_on_empty_space_keeps_selecting() {
        let (_, mut cache) = setup(vec![peer(1, 0.0)]);
        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);

        let mut input = PointerInput::click(ScreenPoint::new(900.0, 900.0));
        assert_eq!(
            machine.tick(&mut input),
            TickOutcome::Selecting { hovered: None }
        );
        assert!(input.clicked_primary);
        assert!(machine.committed().is_none());
    }

    #[test]
    fn secondary_click_or_cancel_aborts() {
        let (_, mut cache) = setup(vec![peer(1, 0.0)]);

        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);
        let mut input = PointerInput::right_click(ScreenPoint::new(10.0, 10.0));
        assert_eq!(machine.tick(&mut input), TickOutcome::Aborted);
        assert_eq!(machine.phase(), SelectionPhase::Cancelled);

        machine.end();
        machine.begin(&mut cache);
        let mut input = PointerInput::cancel(ScreenPoint::new(10.0, 10.0));
        assert_eq!(machine.tick(&mut input), TickOutcome::Aborted);
    }

    #[test]
    fn commit_only_from_begin_snapshot() {
        let (source, mut cache) = setup(vec![peer(1, 0.0)]);
        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);

        // A peer that joins mid-episode is not clickable.
        source.0.lock().unwrap().push(peer(2, 200.0));
        cache.invalidate();

        let mut input = PointerInput::click(ScreenPoint::new(250.0, 50.0));
        assert_eq!(
            machine.tick(&mut input),
            TickOutcome::Selecting { hovered: None }
        );
    }

    #[test]
    fn end_resets_from_any_phase() {
        let (_, mut cache) = setup(vec![peer(1, 0.0)]);
        let mut machine = TargetSelectionMachine::new();
        machine.begin(&mut cache);
        machine.tick(&mut PointerInput::click(ScreenPoint::new(10.0, 10.0)));
        assert_eq!(machine.phase(), SelectionPhase::Committed);

        machine.end();
        assert_eq!(machine.phase(), SelectionPhase::Idle);
        assert!(machine.committed().is_none());
        assert!(machine.candidates().is_empty());
        assert_eq!(machine.view(), SelectionView::default());
    }
}
