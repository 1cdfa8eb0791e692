//! Runtime components of the peer grant redirection bridge.
//!
//! This crate lets the local actor's self-targeted resource grant be
//! redirected to a cooperative peer. Consumers detect the optional
//! cooperative subsystem once, build a [`ShareBridge`] around the result and
//! forward the host's lifecycle, per-frame and action-construction callbacks
//! to it.
//!
//! Modules are organized by responsibility:
//! - [`capability`] detects the optional subsystem and its peer accessor
//! - [`cache`] keeps an invalidation-driven snapshot of peers
//! - [`selection`] turns pointer input into a single peer decision
//! - [`redirect`] rewrites the target of the next self-targeted grant
//! - [`hooks`] and [`bridge`] wire the above to host callbacks
//! - [`view`] exposes presentation data for a renderer
pub mod bridge;
pub mod cache;
pub mod capability;
pub mod hooks;
pub mod redirect;
pub mod selection;
pub mod view;

mod error;

pub use bridge::{ShareBridge, ShareBridgeBuilder, ShareDecision, SkipReason};
pub use cache::{PeerCache, PeerPattern, PeerSnapshot};
pub use capability::{
    AccessorCandidate, AccessorHandle, AccessorKind, Capability, CapabilityDetector,
    ExtensionHost, MemberShape, MemberValue, PeerSource, ProbePlan, Subsystem,
};
pub use error::{BridgeError, Result};
pub use hooks::{HostEvent, TargetingOverrides};
pub use redirect::{ActionRedirector, RedirectIntent};
pub use selection::{SelectionPhase, SelectionView, TargetSelectionMachine, TickOutcome};
pub use view::{Emphasis, PeerHighlight, ShareIndicator, Tint};
