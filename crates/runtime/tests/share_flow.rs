use std::sync::{Arc, Mutex};

use share_core::{
    ActionCard, Actor, ActorId, CardType, HitRegion, Modifiers, PeerReadError, PointerInput,
    ScreenPoint, ShareConfig,
};
use share_runtime::{
    AccessorKind, CapabilityDetector, ExtensionHost, HostEvent, MemberShape, MemberValue,
    PeerCache, SelectionPhase, ShareBridge, ShareDecision, SkipReason, Subsystem,
    TargetSelectionMachine, TickOutcome,
};

const LOCAL: ActorId = ActorId(1);

/// Cooperative subsystem exposing its roster through a `players` field.
struct CoopSubsystem {
    players: Mutex<Vec<Actor>>,
}

impl Subsystem for CoopSubsystem {
    fn member_shape(&self, kind: AccessorKind, member: &str) -> Option<MemberShape> {
        (kind == AccessorKind::Field && member == "players").then_some(MemberShape::Sequence)
    }

    fn read_member(&self, kind: AccessorKind, member: &str) -> Result<MemberValue, PeerReadError> {
        if kind != AccessorKind::Field || member != "players" {
            return Err(PeerReadError::Unavailable);
        }
        Ok(MemberValue::Sequence(self.players.lock().unwrap().clone()))
    }
}

struct Host {
    coop: Option<Arc<CoopSubsystem>>,
}

impl ExtensionHost for Host {
    fn lookup_subsystem(&self, qualified_name: &str) -> Option<Arc<dyn Subsystem>> {
        if qualified_name != "spireTogether.SpireTogetherMod" {
            return None;
        }
        self.coop
            .as_ref()
            .map(|coop| Arc::clone(coop) as Arc<dyn Subsystem>)
    }
}

fn actor(id: u64, health: i32, x: f32) -> Actor {
    Actor::player(ActorId(id), format!("player-{id}"), health)
        .with_max_health(70)
        .with_region(HitRegion::new(x, 100.0, 120.0, 200.0))
}

fn over(actor: &Actor) -> ScreenPoint {
    actor.region.center()
}

fn defend() -> ActionCard {
    ActionCard::new(40, "Defend_R")
        .with_type(CardType::Skill)
        .with_block(5)
}

fn session(players: Vec<Actor>, config: ShareConfig) -> (Arc<CoopSubsystem>, ShareBridge) {
    let coop = Arc::new(CoopSubsystem {
        players: Mutex::new(players),
    });
    let host = Host {
        coop: Some(Arc::clone(&coop)),
    };
    let detector = CapabilityDetector::default();
    let bridge = ShareBridge::builder()
        .config(config)
        .local_actor(LOCAL)
        .capability(detector.detect(&host).clone())
        .build()
        .unwrap();
    (coop, bridge)
}

#[test]
fn end_to_end_share_episode() {
    let a = actor(2, 10, 0.0);
    let b = actor(3, 0, 200.0);
    let (coop, mut bridge) = session(
        vec![actor(1, 50, 400.0), a.clone(), b],
        ShareConfig::default(),
    );

    let peers = bridge.peers();
    assert_eq!(peers, vec![a.clone()]);

    let card = defend();
    assert_eq!(
        bridge.on_action_played(&card, Modifiers::empty()),
        ShareDecision::Selecting
    );

    let mut input = PointerInput::click(over(&a));
    assert_eq!(bridge.on_frame_update(&mut input), TickOutcome::Resolved(a.clone()));
    assert!(!input.clicked_primary);

    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 6), a.id);
    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 6), LOCAL);

    bridge.handle(&HostEvent::ActionUsed(card));
    assert!(!bridge.redirector().has_intent());

    // Roster changes while the cache still holds the old pair.
    let c = actor(4, 30, 0.0);
    *coop.players.lock().unwrap() = vec![actor(1, 50, 400.0), c.clone()];
    bridge.handle(&HostEvent::BattleEnd);
    assert_eq!(bridge.peers(), vec![c]);
}

#[test]
fn committed_peer_comes_from_begin_snapshot() {
    let a = actor(2, 10, 0.0);
    let (coop, bridge) = session(vec![a.clone()], ShareConfig::default());
    let mut cache = PeerCache::new(bridge.capability(), LOCAL);
    let mut machine = TargetSelectionMachine::new();

    assert!(machine.begin(&mut cache));
    coop.players.lock().unwrap().push(actor(5, 40, 300.0));
    assert!(machine.begin(&mut cache));

    let mut input = PointerInput::click(ScreenPoint::new(350.0, 150.0));
    assert_eq!(
        machine.tick(&mut input),
        TickOutcome::Selecting { hovered: None }
    );

    let mut input = PointerInput::click(over(&a));
    assert_eq!(machine.tick(&mut input), TickOutcome::Resolved(a.clone()));
    assert_eq!(machine.phase(), SelectionPhase::Committed);
    assert_eq!(machine.committed(), Some(&a));
}

#[test]
fn invalidation_triggers_exactly_one_refresh() {
    let (_, mut bridge) = session(vec![actor(2, 10, 0.0)], ShareConfig::default());

    bridge.peers();
    bridge.peers();
    assert_eq!(bridge.cache().refresh_count(), 1);

    bridge.on_card_drawn(&ActionCard::new(50, "Strike_R"));
    assert!(!bridge.cache().is_valid());
    let first = bridge.peer_snapshot();
    let second = bridge.peer_snapshot();
    assert_eq!(bridge.cache().refresh_count(), 2);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn non_self_and_empty_grants_pass_through() {
    let a = actor(2, 10, 0.0);
    let (_, mut bridge) = session(vec![a.clone()], ShareConfig::default());

    bridge.on_action_played(&defend(), Modifiers::empty());
    bridge.on_frame_update(&mut PointerInput::click(over(&a)));

    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 0), LOCAL);
    assert_eq!(bridge.on_grant_action_constructed(ActorId(9), 5), ActorId(9));
    assert!(bridge.redirector().has_intent());
    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 5), a.id);
}

#[test]
fn intent_does_not_survive_an_action_without_grant() {
    let config = ShareConfig {
        auto_select_lowest_health: true,
        ..ShareConfig::default()
    };
    let (_, mut bridge) = session(vec![actor(2, 10, 0.0)], config);
    let card = defend();

    assert!(matches!(
        bridge.on_action_played(&card, Modifiers::empty()),
        ShareDecision::AutoSelected(_)
    ));
    // The action resolved without constructing a grant.
    bridge.on_actor_action_used(&card);
    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 5), LOCAL);
}

#[test]
fn card_draw_mid_episode_forces_idle() {
    let (_, mut bridge) = session(vec![actor(2, 10, 0.0)], ShareConfig::default());
    bridge.on_action_played(&defend(), Modifiers::empty());
    assert!(bridge.selection_state().selecting);

    bridge.handle(&HostEvent::CardDrawn(ActionCard::new(51, "Backflip")));
    assert!(!bridge.selection_state().selecting);
    assert_eq!(
        bridge.on_frame_update(&mut PointerInput::hover(ScreenPoint::new(10.0, 150.0))),
        TickOutcome::Inactive
    );
}

#[test]
fn missing_subsystem_degrades_to_no_sharing() {
    let host = Host { coop: None };
    let detector = CapabilityDetector::default();
    let mut bridge = ShareBridge::builder()
        .local_actor(LOCAL)
        .capability(detector.detect(&host).clone())
        .build()
        .unwrap();

    assert_eq!(
        bridge.on_action_played(&defend(), Modifiers::SHIFT),
        ShareDecision::Skipped(SkipReason::CapabilityAbsent)
    );
    assert!(bridge.peers().is_empty());
    assert_eq!(bridge.on_grant_action_constructed(LOCAL, 5), LOCAL);

    detector.detect(&host);
    assert_eq!(detector.probe_count(), 1);
}
