//! Unopinionated standalone utilities.

mod rng;
pub use rng::{srng, RngExt};

pub type FastHasher = rustc_hash::FxHasher;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
