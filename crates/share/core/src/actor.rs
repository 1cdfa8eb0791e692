//! Actors owned by the host and the screen geometry used to pick them.
use std::fmt;

/// Signed amount of a granted resource (block, shield, ...).
///
/// Signed because host calculations may produce zero or negative grants,
/// which are never redirected.
pub type Quantity = i32;

/// Stable identity of a host actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse classification the host reports for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// A player character, local or remote.
    Player,
    /// Anything else: monsters, summons, network proxies of unknown shape.
    Creature,
}

/// Screen-space point in host pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle anchored at its lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HitRegion {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a region of the given size centred on a draw position.
    pub fn centered(center: ScreenPoint, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside the region (edges inclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Snapshot of a host actor as seen by the bridge.
///
/// The host owns the real entity; this value is a transient copy that is
/// only trusted until the next cache invalidation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    /// Fully qualified host type of the entity (e.g. a network player proxy).
    pub type_path: String,
    pub health: i32,
    pub max_health: i32,
    pub region: HitRegion,
}

impl Actor {
    /// Creates a player actor with full health and an empty hit region.
    pub fn player(id: ActorId, name: impl Into<String>, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ActorKind::Player,
            type_path: String::new(),
            health,
            max_health: health.max(0),
            region: HitRegion::default(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_type_path(mut self, type_path: impl Into<String>) -> Self {
        self.type_path = type_path.into();
        self
    }

    #[must_use]
    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: HitRegion) -> Self {
        self.region = region;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Health as a percentage of maximum, clamped to `[0, 100]`.
///
/// An actor without a known maximum counts as full health.
pub fn health_percentage(current: i32, maximum: i32) -> u32 {
    if maximum <= 0 {
        return 100;
    }
    let current = current.clamp(0, maximum) as i64;
    ((current * 100) / maximum as i64) as u32
}
