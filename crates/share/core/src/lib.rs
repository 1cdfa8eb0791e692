//! Domain model shared by the peer grant redirection bridge.
//!
//! `share-core` describes the host-facing vocabulary (actors, hit regions,
//! action cards, input modifiers) and the pure decision rules that do not
//! depend on any runtime state: which actions count as resource grants and
//! how much they grant. Stateful components live in `share-runtime`.
pub mod actor;
pub mod card;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;

pub use actor::{Actor, ActorId, ActorKind, HitRegion, Quantity, ScreenPoint, health_percentage};
pub use card::{ActionCard, CardTarget, CardType};
pub use catalog::{GrantCatalog, GrantDetector};
pub use config::ShareConfig;
pub use error::PeerReadError;
pub use input::{Hotkey, HotkeyParseError, Modifiers, PointerInput};
