//! In-memory stand-in for a host with the cooperative extension loaded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use share_core::{Actor, ActorId, ActorKind, HitRegion, PeerReadError, ScreenPoint};
use share_runtime::{AccessorKind, ExtensionHost, MemberShape, MemberValue, Subsystem};

pub const SUBSYSTEM: &str = "spireTogether.SpireTogetherMod";
pub const LOCAL: ActorId = ActorId(1);

/// Cooperative subsystem keyed by network player id, read through the
/// `getPlayers` accessor.
#[derive(Default)]
pub struct SimSubsystem {
    players: Mutex<Vec<(String, Actor)>>,
}

impl SimSubsystem {
    pub fn join(&self, key: &str, actor: Actor) {
        if let Ok(mut players) = self.players.lock() {
            players.retain(|(existing, _)| existing != key);
            players.push((key.to_owned(), actor));
        }
    }

    pub fn leave(&self, key: &str) {
        if let Ok(mut players) = self.players.lock() {
            players.retain(|(existing, _)| existing != key);
        }
    }
}

impl Subsystem for SimSubsystem {
    fn member_shape(&self, kind: AccessorKind, member: &str) -> Option<MemberShape> {
        match (kind, member) {
            (AccessorKind::Field, "players") => Some(MemberShape::Other("int".into())),
            (AccessorKind::Method, "getPlayers") => Some(MemberShape::Mapping),
            _ => None,
        }
    }

    fn read_member(&self, kind: AccessorKind, member: &str) -> Result<MemberValue, PeerReadError> {
        if (kind, member) != (AccessorKind::Method, "getPlayers") {
            return Err(PeerReadError::Unavailable);
        }
        let players = self
            .players
            .lock()
            .map_err(|_| PeerReadError::Transient("roster lock poisoned".into()))?;
        Ok(MemberValue::Mapping(players.clone()))
    }
}

#[derive(Default)]
pub struct SimHost {
    subsystems: HashMap<String, Arc<dyn Subsystem>>,
}

impl SimHost {
    pub fn with_subsystem(name: &str, subsystem: Arc<dyn Subsystem>) -> Self {
        let mut subsystems = HashMap::new();
        subsystems.insert(name.to_owned(), subsystem);
        Self { subsystems }
    }
}

impl ExtensionHost for SimHost {
    fn lookup_subsystem(&self, qualified_name: &str) -> Option<Arc<dyn Subsystem>> {
        self.subsystems.get(qualified_name).cloned()
    }
}

/// Player character standing at a slot on screen.
pub fn player(id: u64, name: &str, health: i32, max_health: i32, slot: u32) -> Actor {
    let center = ScreenPoint::new(300.0 + 260.0 * slot as f32, 420.0);
    Actor::player(ActorId(id), name, health)
        .with_max_health(max_health)
        .with_region(HitRegion::centered(center, 180.0, 260.0))
}

/// Network proxy of a remote player, recognised by its type path.
pub fn network_player(id: u64, name: &str, health: i32, max_health: i32, slot: u32) -> Actor {
    player(id, name, health, max_health, slot)
        .with_kind(ActorKind::Creature)
        .with_type_path("spireTogether.monsters.playerChars.NetworkSilent")
}
