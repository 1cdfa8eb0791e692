//! Errors raised while reading the optional subsystem.
//!
//! None of these ever reach the host: the cache turns them into an empty
//! peer set for the current refresh cycle.

use thiserror::Error;

/// Failure reading the external peer collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerReadError {
    #[error("peer collection is unavailable")]
    Unavailable,

    #[error("member `{member}` returned {found}, expected a sequence or mapping")]
    UnexpectedShape { member: String, found: String },

    #[error("transient host state: {0}")]
    Transient(String),
}
