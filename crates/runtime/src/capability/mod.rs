//! Detection of the optional cooperative-play subsystem.
//!
//! The host may or may not have the cooperative extension loaded. Instead of
//! looking types up dynamically on every call, detection happens once and
//! produces a [`Capability`]: whether the subsystem is present and, if its
//! peer collection could be located, a [`PeerSource`] that reads it.
//!
//! # Resolution
//!
//! - [`CapabilityDetector::detect`] walks the [`ProbePlan`] exactly once and
//!   memoizes the result for the detector's lifetime
//! - The first subsystem name the host resolves wins
//! - The first accessor candidate that exists and is a sequence or mapping
//!   becomes the [`AccessorHandle`]
//! - A present subsystem without a usable accessor stays present but yields
//!   no peers; resolution is never retried
//!
//! Host adapters that can talk to the subsystem directly skip probing and
//! hand a ready [`PeerSource`] to [`CapabilityDetector::with_source`].

mod detector;
mod probe;

pub use detector::CapabilityDetector;
pub use probe::{
    AccessorCandidate, AccessorHandle, AccessorKind, ExtensionHost, MemberShape, MemberValue,
    ProbePlan, ResolvedPeerSource, Subsystem,
};

use std::fmt;
use std::sync::Arc;

use share_core::{Actor, PeerReadError};

/// Read access to the peer collection of the cooperative subsystem.
///
/// Implementations return every entity the subsystem knows about; filtering
/// (self, dead actors, foreign entities) is done by the peer cache.
pub trait PeerSource: Send + Sync {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Reads the current peer collection in the subsystem's own order.
    fn read_peers(&self) -> Result<Vec<Actor>, PeerReadError>;
}

/// Outcome of subsystem detection.
///
/// Immutable once produced. Cloning shares the underlying source.
#[derive(Clone, Default)]
pub struct Capability {
    subsystem: Option<String>,
    source: Option<Arc<dyn PeerSource>>,
}

impl Capability {
    /// The subsystem is not loaded in this process.
    pub fn absent() -> Self {
        Self::default()
    }

    /// The subsystem is loaded but its peer collection could not be located.
    pub fn without_accessor(subsystem: impl Into<String>) -> Self {
        Self {
            subsystem: Some(subsystem.into()),
            source: None,
        }
    }

    /// The subsystem is loaded and readable through `source`.
    pub fn with_source(subsystem: impl Into<String>, source: Arc<dyn PeerSource>) -> Self {
        Self {
            subsystem: Some(subsystem.into()),
            source: Some(source),
        }
    }

    pub fn is_present(&self) -> bool {
        self.subsystem.is_some()
    }

    /// Name under which the subsystem was found.
    pub fn subsystem(&self) -> Option<&str> {
        self.subsystem.as_deref()
    }

    pub fn source(&self) -> Option<&Arc<dyn PeerSource>> {
        self.source.as_ref()
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("subsystem", &self.subsystem)
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .finish()
    }
}
