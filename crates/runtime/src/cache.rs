//! Invalidation-driven cache of peer actors.
//!
//! Peers are read from the cooperative subsystem only when the cache is
//! stale, never on every frame. Host lifecycle hooks invalidate the cache
//! whenever peer membership may have changed; the next reader triggers a
//! single synchronous refresh.

use std::cmp::Ordering;
use std::sync::Arc;

use share_core::{Actor, ActorId};
use tracing::{debug, trace};

use crate::capability::{Capability, PeerSource};

/// Immutable, ordered set of peers produced by one refresh.
pub type PeerSnapshot = Arc<[Actor]>;

/// Recognises entities that represent cooperative players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerPattern {
    /// Type path prefixes of network player proxies.
    pub network_prefixes: Vec<String>,
}

impl PeerPattern {
    pub const NETWORK_PLAYER_PREFIX: &'static str = "spireTogether.monsters.playerChars.Network";

    pub fn new(network_prefixes: Vec<String>) -> Self {
        Self { network_prefixes }
    }

    /// Player characters always match; other entities match by type path.
    pub fn matches(&self, actor: &Actor) -> bool {
        actor.kind == share_core::ActorKind::Player
            || self
                .network_prefixes
                .iter()
                .any(|prefix| actor.type_path.starts_with(prefix.as_str()))
    }
}

impl Default for PeerPattern {
    fn default() -> Self {
        Self::new(vec![Self::NETWORK_PLAYER_PREFIX.to_owned()])
    }
}

/// Cache of actors eligible to receive a redirected grant.
pub struct PeerCache {
    source: Option<Arc<dyn PeerSource>>,
    local: ActorId,
    pattern: PeerPattern,
    peers: PeerSnapshot,
    valid: bool,
    refreshes: u64,
}

impl PeerCache {
    /// Creates a stale cache reading from the capability's source, if any.
    pub fn new(capability: &Capability, local: ActorId) -> Self {
        Self {
            source: capability.source().cloned(),
            local,
            pattern: PeerPattern::default(),
            peers: Arc::from(Vec::new()),
            valid: false,
            refreshes: 0,
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: PeerPattern) -> Self {
        self.pattern = pattern;
        self.valid = false;
        self
    }

    /// Changes the local actor; the cached set is no longer trustworthy.
    pub fn set_local_actor(&mut self, local: ActorId) {
        if self.local != local {
            self.local = local;
            self.invalidate();
        }
    }

    pub fn local_actor(&self) -> ActorId {
        self.local
    }

    /// Marks the cache stale. Cheap; the next reader refreshes.
    pub fn invalidate(&mut self) {
        if self.valid {
            trace!(target: "share::cache", "Peer cache invalidated");
        }
        self.valid = false;
        self.peers = Arc::from(Vec::new());
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of refreshes performed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Rebuilds the peer set from the source and marks the cache valid.
    ///
    /// Read failures produce an empty set for this cycle; the source itself
    /// is kept, since mid-transition host states are expected.
    pub fn refresh(&mut self) {
        self.refreshes += 1;

        let peers: Vec<Actor> = match &self.source {
            None => Vec::new(),
            Some(source) => match source.read_peers() {
                Ok(actors) => actors
                    .into_iter()
                    .filter(|actor| {
                        actor.id != self.local && actor.is_alive() && self.pattern.matches(actor)
                    })
                    .collect(),
                Err(error) => {
                    debug!(
                        target: "share::cache",
                        source = %source.describe(),
                        error = %error,
                        "Peer read failed, treating as no peers"
                    );
                    Vec::new()
                }
            },
        };

        trace!(target: "share::cache", peers = peers.len(), "Peer cache refreshed");
        self.peers = Arc::from(peers);
        self.valid = true;
    }

    fn ensure_fresh(&mut self) {
        if !self.valid {
            self.refresh();
        }
    }

    pub fn has_peers(&mut self) -> bool {
        self.ensure_fresh();
        !self.peers.is_empty()
    }

    /// Returns a copy of the current peers in snapshot order.
    pub fn peers(&mut self) -> Vec<Actor> {
        self.ensure_fresh();
        self.peers.to_vec()
    }

    /// Returns the shared snapshot without copying the actors.
    pub fn snapshot(&mut self) -> PeerSnapshot {
        self.ensure_fresh();
        Arc::clone(&self.peers)
    }

    /// Looks a peer up by id in the current snapshot.
    pub fn find(&mut self, id: ActorId) -> Option<Actor> {
        self.ensure_fresh();
        self.peers.iter().find(|peer| peer.id == id).cloned()
    }

    /// Peer with the lowest health ratio; exact ties keep snapshot order.
    pub fn most_wounded(&mut self) -> Option<Actor> {
        self.ensure_fresh();
        self.peers
            .iter()
            .min_by(|a, b| compare_health_ratio(a, b))
            .cloned()
    }
}

/// Orders actors by `health / max_health` without rounding.
///
/// A non-positive maximum counts as full health.
fn compare_health_ratio(a: &Actor, b: &Actor) -> Ordering {
    let ratio = |actor: &Actor| -> (i64, i64) {
        if actor.max_health <= 0 {
            (1, 1)
        } else {
            (i64::from(actor.health.max(0)), i64::from(actor.max_health))
        }
    };
    let (a_health, a_max) = ratio(a);
    let (b_health, b_max) = ratio(b);
    (a_health * b_max).cmp(&(b_health * a_max))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use share_core::{ActorKind, PeerReadError};

    use super::*;

    struct ScriptedSource {
        actors: Mutex<Result<Vec<Actor>, PeerReadError>>,
        reads: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(actors: Vec<Actor>) -> Arc<Self> {
            Arc::new(Self {
                actors: Mutex::new(Ok(actors)),
                reads: AtomicUsize::new(0),
            })
        }

        fn set(&self, next: Result<Vec<Actor>, PeerReadError>) {
            *self.actors.lock().unwrap() = next;
        }
    }

    impl PeerSource for ScriptedSource {
        fn describe(&self) -> String {
            "scripted".into()
        }

        fn read_peers(&self) -> Result<Vec<Actor>, PeerReadError> {
            self.reads.fetch_add(1, AtomicOrdering::Relaxed);
            self.actors.lock().unwrap().clone()
        }
    }

    const LOCAL: ActorId = ActorId(1);

    fn cache_over(source: &Arc<ScriptedSource>) -> PeerCache {
        let capability =
            Capability::with_source("test", Arc::clone(source) as Arc<dyn PeerSource>);
        PeerCache::new(&capability, LOCAL)
    }

    #[test]
    fn filters_self_dead_and_foreign_entities() {
        let source = ScriptedSource::new(vec![
            Actor::player(LOCAL, "me", 50),
            Actor::player(ActorId(2), "alive", 10),
            Actor::player(ActorId(3), "dead", 0),
            Actor::player(ActorId(4), "slime", 20).with_kind(ActorKind::Creature),
            Actor::player(ActorId(5), "proxy", 15)
                .with_kind(ActorKind::Creature)
                .with_type_path("spireTogether.monsters.playerChars.NetworkIronclad"),
        ]);
        let mut cache = cache_over(&source);

        let ids: Vec<_> = cache.peers().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ActorId(2), ActorId(5)]);
    }

    #[test]
    fn refreshes_once_per_invalidation() {
        let source = ScriptedSource::new(vec![Actor::player(ActorId(2), "a", 10)]);
        let mut cache = cache_over(&source);

        assert!(!cache.is_valid());
        let first = cache.snapshot();
        let second = cache.snapshot();
        assert!(cache.has_peers());
        assert_eq!(cache.refresh_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        cache.invalidate();
        source.set(Ok(vec![Actor::player(ActorId(3), "b", 10)]));
        let third = cache.peers();
        assert_eq!(cache.refresh_count(), 2);
        assert_eq!(third[0].id, ActorId(3));
        assert_eq!(source.reads.load(AtomicOrdering::Relaxed), 2);
    }

    #[test]
    fn read_errors_yield_no_peers_until_next_invalidation() {
        let source = ScriptedSource::new(vec![]);
        source.set(Err(PeerReadError::Transient("loading room".into())));
        let mut cache = cache_over(&source);

        assert!(!cache.has_peers());
        assert!(cache.is_valid());

        source.set(Ok(vec![Actor::player(ActorId(2), "a", 10)]));
        assert!(!cache.has_peers());

        cache.invalidate();
        assert!(cache.has_peers());
    }

    #[test]
    fn absent_capability_is_valid_and_empty() {
        let mut cache = PeerCache::new(&Capability::absent(), LOCAL);
        assert!(!cache.has_peers());
        assert!(cache.is_valid());
        assert!(cache.peers().is_empty());
    }

    #[test]
    fn returned_peers_are_a_copy() {
        let source = ScriptedSource::new(vec![Actor::player(ActorId(2), "a", 10)]);
        let mut cache = cache_over(&source);

        let mut copy = cache.peers();
        copy.clear();
        assert_eq!(cache.peers().len(), 1);
    }

    #[test]
    fn local_actor_change_invalidates() {
        let source = ScriptedSource::new(vec![
            Actor::player(ActorId(2), "a", 10),
            Actor::player(ActorId(3), "b", 10),
        ]);
        let mut cache = cache_over(&source);
        assert_eq!(cache.peers().len(), 2);

        cache.set_local_actor(ActorId(2));
        assert!(!cache.is_valid());
        let ids: Vec<_> = cache.peers().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ActorId(3)]);
    }

    #[test]
    fn most_wounded_prefers_lowest_percentage() {
        let source = ScriptedSource::new(vec![
            Actor::player(ActorId(2), "a", 40).with_max_health(80),
            Actor::player(ActorId(3), "b", 10).with_max_health(70),
            Actor::player(ActorId(4), "c", 5).with_max_health(35),
        ]);
        let mut cache = cache_over(&source);

        // b and c are both at exactly 1/7; snapshot order breaks the tie.
        assert_eq!(cache.most_wounded().map(|p| p.id), Some(ActorId(3)));
    }

    #[test]
    fn most_wounded_compares_exact_ratios() {
        // 10/70 is 14.28% and 14/99 is 14.14%; whole percentages would tie.
        let source = ScriptedSource::new(vec![
            Actor::player(ActorId(2), "a", 10).with_max_health(70),
            Actor::player(ActorId(3), "b", 14).with_max_health(99),
        ]);
        let mut cache = cache_over(&source);
        assert_eq!(cache.most_wounded().map(|p| p.id), Some(ActorId(3)));
    }

    #[test]
    fn unknown_max_health_counts_as_full() {
        let source = ScriptedSource::new(vec![
            Actor::player(ActorId(2), "a", 5).with_max_health(0),
            Actor::player(ActorId(3), "b", 79).with_max_health(80),
        ]);
        let mut cache = cache_over(&source);
        assert_eq!(cache.most_wounded().map(|p| p.id), Some(ActorId(3)));
    }
}
