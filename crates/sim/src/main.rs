//! Headless share session.
//!
//! Scripts a short cooperative battle against an in-memory host and logs
//! every decision the bridge makes. Useful for eyeballing behaviour with
//! `RUST_LOG=share=debug`.
//!
//! ```bash
//! SHARE_CONFIG=config/share.toml SHARE_AUTO_SELECT_LOWEST_HEALTH=false cargo run -p share-sim
//! ```

mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use share_content::{ConfigLoader, apply_env};
use share_core::{ActionCard, CardType, Modifiers, PointerInput};
use share_runtime::{CapabilityDetector, HostEvent, ShareBridge, ShareDecision, Subsystem};

use host::{LOCAL, SUBSYSTEM, SimHost, SimSubsystem, network_player, player};

const DEFAULT_CONFIG_PATH: &str = "share.toml";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::var("SHARE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = ConfigLoader::load_or_default(&path);
    apply_env(&mut config);

    let coop = Arc::new(SimSubsystem::default());
    coop.join("local", player(LOCAL.0, "Ironclad", 64, 80, 0));
    coop.join("steam:2", network_player(2, "Silent", 18, 70, 1));
    coop.join("steam:3", network_player(3, "Defect", 0, 75, 2));

    let host = SimHost::with_subsystem(SUBSYSTEM, Arc::clone(&coop) as Arc<dyn Subsystem>);
    let detector = CapabilityDetector::default();
    let capability = detector.detect(&host).clone();

    let mut bridge = ShareBridge::builder()
        .config(config)
        .local_actor(LOCAL)
        .capability(capability)
        .build()?;

    run_battle(&mut bridge, &coop);
    Ok(())
}

fn run_battle(bridge: &mut ShareBridge, coop: &SimSubsystem) {
    bridge.handle(&HostEvent::BattleStart);

    let mut defend = ActionCard::new(1, "Defend_R")
        .with_type(CardType::Skill)
        .with_block(5);
    bridge.handle(&HostEvent::CardDrawn(defend.clone()));

    let peers = bridge.peers();
    tracing::info!(count = peers.len(), "Peers available");

    bridge.on_entity_update(&mut defend, true, Modifiers::SHIFT);
    if let Some(indicator) = bridge.share_indicator(&defend, true, Modifiers::SHIFT) {
        tracing::info!(
            card = %defend.id,
            label = indicator.label,
            mode = %defend.target,
            "Card shows share indicator"
        );
    }

    let decision = bridge.on_action_played(&defend, Modifiers::SHIFT);
    tracing::info!(?decision, "Defend played");
    if decision.is_skipped() {
        tracing::warn!("Defend was not offered for sharing");
    }

    if decision == ShareDecision::Selecting
        && let Some(target) = peers.first()
    {
        let mut hover = PointerInput::hover(target.region.center());
        bridge.on_frame_update(&mut hover);
        for highlight in bridge.peer_highlights() {
            tracing::info!(peer = %highlight.peer, emphasis = ?highlight.emphasis, "Highlight");
        }

        let mut click = PointerInput::click(target.region.center());
        let outcome = bridge.on_frame_update(&mut click);
        tracing::info!(?outcome, "Selection finished");
    }

    let amount = 5;
    let recipient = bridge.on_grant_action_constructed(LOCAL, amount);
    tracing::info!(recipient = %recipient, amount, "Block granted");
    bridge.handle(&HostEvent::ActionUsed(defend));

    coop.leave("steam:2");
    coop.join("steam:4", network_player(4, "Watcher", 40, 72, 1));
    bridge.handle(&HostEvent::BattleEnd);

    let names: Vec<String> = bridge.peers().into_iter().map(|peer| peer.name).collect();
    tracing::info!(?names, "Peers after battle");
}
