//! Errors surfaced while assembling a bridge.
//!
//! Inbound hooks never fail; only construction can.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("bridge requires the local actor to be set before building")]
    MissingLocalActor,
}
