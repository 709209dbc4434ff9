use glam::IVec2;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

/// Compass octants in clock face order.
///
/// Screen convention, north points towards -y.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
    FromRepr,
)]
pub enum Dir8 {
    #[default]
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Dir8 {
    pub const VECTORS: [IVec2; 8] = [
        IVec2::from_array([0, -1]),
        IVec2::from_array([1, -1]),
        IVec2::from_array([1, 0]),
        IVec2::from_array([1, 1]),
        IVec2::from_array([0, 1]),
        IVec2::from_array([-1, 1]),
        IVec2::from_array([-1, 0]),
        IVec2::from_array([-1, -1]),
    ];

    /// Unit step vector of the octant.
    pub fn vector(self) -> IVec2 {
        Self::VECTORS[self as usize]
    }

    /// Classify a delta vector into an octant.
    ///
    /// Only unit step vectors classify, anything longer or zero is `None`.
    /// This is valid exactly because adjacent-tile queries never produce
    /// longer deltas.
    pub fn from_vector(v: IVec2) -> Option<Dir8> {
        Self::VECTORS
            .iter()
            .position(|&u| u == v)
            .and_then(|i| Dir8::from_repr(i))
    }

    /// North, east, south or west.
    pub fn is_cardinal(self) -> bool {
        (self as usize) % 2 == 0
    }
}
