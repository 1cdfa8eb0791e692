//! Host-facing probe contracts and the default probe plan.

use std::fmt;
use std::sync::Arc;

use share_core::{Actor, PeerReadError};

use super::PeerSource;

/// How a member of the subsystem is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// A stored field.
    Field,
    /// A zero-argument accessor method.
    Method,
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccessorKind::Field => "field",
            AccessorKind::Method => "method",
        };
        write!(f, "{}", label)
    }
}

/// Shape of a member as reported by the host before reading it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberShape {
    Sequence,
    Mapping,
    /// Anything else; carries the host's type name for logging.
    Other(String),
}

impl MemberShape {
    /// Sequences and mappings can hold a peer collection.
    pub fn is_collection(&self) -> bool {
        matches!(self, MemberShape::Sequence | MemberShape::Mapping)
    }
}

/// Value read from a subsystem member.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberValue {
    Sequence(Vec<Actor>),
    /// Keyed collection; entries keep the host's iteration order.
    Mapping(Vec<(String, Actor)>),
    Other(String),
}

/// Handle to the loaded subsystem, supplied by the host adapter.
pub trait Subsystem: Send + Sync {
    /// Returns the member's shape, or `None` if it does not exist.
    fn member_shape(&self, kind: AccessorKind, member: &str) -> Option<MemberShape>;

    /// Reads the member's current value.
    fn read_member(&self, kind: AccessorKind, member: &str) -> Result<MemberValue, PeerReadError>;
}

/// Lookup of optional subsystems by qualified name.
pub trait ExtensionHost {
    fn lookup_subsystem(&self, qualified_name: &str) -> Option<Arc<dyn Subsystem>>;
}

/// One member to try when locating the peer collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorCandidate {
    pub kind: AccessorKind,
    pub member: String,
}

impl AccessorCandidate {
    pub fn field(member: impl Into<String>) -> Self {
        Self {
            kind: AccessorKind::Field,
            member: member.into(),
        }
    }

    pub fn method(member: impl Into<String>) -> Self {
        Self {
            kind: AccessorKind::Method,
            member: member.into(),
        }
    }
}

/// Resolved description of how to read the peer collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorHandle {
    pub subsystem: String,
    pub kind: AccessorKind,
    pub member: String,
}

impl fmt::Display for AccessorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({})", self.subsystem, self.member, self.kind)
    }
}

/// Ordered names tried during detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbePlan {
    pub subsystems: Vec<String>,
    pub accessors: Vec<AccessorCandidate>,
}

impl ProbePlan {
    /// Known qualified names of the cooperative extension, oldest releases last.
    pub const SUBSYSTEMS: &'static [&'static str] = &[
        "spireTogether.SpireTogetherMod",
        "togetherinspire.TogetherInSpire",
        "tis.TogetherInSpire",
        "togetherinspire.TIS",
        "com.togetherinspire.TogetherInSpire",
    ];

    pub const FIELDS: &'static [&'static str] = &[
        "players",
        "otherPlayers",
        "allies",
        "connectedPlayers",
        "coopPlayers",
    ];

    pub const METHODS: &'static [&'static str] = &[
        "getPlayers",
        "getOtherPlayers",
        "getAllies",
        "getConnectedPlayers",
    ];

    pub fn new(subsystems: Vec<String>, accessors: Vec<AccessorCandidate>) -> Self {
        Self {
            subsystems,
            accessors,
        }
    }
}

impl Default for ProbePlan {
    fn default() -> Self {
        let accessors = Self::FIELDS
            .iter()
            .map(|name| AccessorCandidate::field(*name))
            .chain(Self::METHODS.iter().map(|name| AccessorCandidate::method(*name)))
            .collect();

        Self {
            subsystems: Self::SUBSYSTEMS.iter().map(|name| (*name).to_owned()).collect(),
            accessors,
        }
    }
}

/// [`PeerSource`] backed by a probed subsystem member.
pub struct ResolvedPeerSource {
    subsystem: Arc<dyn Subsystem>,
    handle: AccessorHandle,
}

impl ResolvedPeerSource {
    pub fn new(subsystem: Arc<dyn Subsystem>, handle: AccessorHandle) -> Self {
        Self { subsystem, handle }
    }
}

impl PeerSource for ResolvedPeerSource {
    fn describe(&self) -> String {
        self.handle.to_string()
    }

    fn read_peers(&self) -> Result<Vec<Actor>, PeerReadError> {
        match self
            .subsystem
            .read_member(self.handle.kind, &self.handle.member)?
        {
            MemberValue::Sequence(actors) => Ok(actors),
            MemberValue::Mapping(entries) => Ok(entries.into_iter().map(|(_, a)| a).collect()),
            MemberValue::Other(found) => Err(PeerReadError::UnexpectedShape {
                member: self.handle.member.clone(),
                found,
            }),
        }
    }
}
