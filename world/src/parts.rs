use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

/// Independently destructible surfaces of a single tile.
///
/// Walls sit on the owning tile's west and north edges; the wall between two
/// tiles is stored on exactly one of them.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
    FromRepr,
)]
pub enum TilePart {
    Floor,
    WestWall,
    NorthWall,
    Object,
}

/// Channels that blockage and falloff rules are evaluated against.
///
/// Plain sight is its own channel, distinct from explosive blockage.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize, EnumIter,
)]
pub enum DamageChannel {
    Vision,
    HighExplosive,
    Smoke,
    Incendiary,
    Stun,
    ArmorPiercing,
}
