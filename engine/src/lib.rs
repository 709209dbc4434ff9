//! Terrain interaction engine: sight, light, blast and fire propagation
//! over the battlefield grid.
//!
//! Every entry point runs to completion on the caller's thread and leaves
//! the grid consistent for the next query; no engine state survives a call.

/// Power budget of a single sight ray, spent on voxel steps and blockage.
pub const SIGHT_POWER: i32 = 20;

/// Light a burning tile throws.
pub const FIRE_LIGHT: i32 = 15;

/// Personal light carried by player units.
pub const PERSONAL_LIGHT: i32 = 15;

/// Flat power decay per tile step of a blast ray.
pub const BLAST_STEP_DECAY: i32 = 10;

/// Tiles at this shade or darker can't be seen into.
pub const SIGHT_SHADE_LIMIT: i32 = 10;

/// Global shade levels at or below this count as daylight, where the sun
/// drops shadows below blocking floors.
pub const DUSK_SHADE: i32 = 5;

/// Sight opacity of any floor; floors are near-opaque to the eye.
pub const FLOOR_BLOCK: i32 = 255;

/// Blast opacity of any floor; floors only partially resist blast.
pub const FLOOR_BLAST_BLOCK: i32 = 15;

mod blockage;
pub use blockage::{horizontal_blockage, part_blockage, vertical_blockage};

mod door;
pub use door::{close_mechanical_doors, unit_opens_door};

mod explode;
pub use explode::explode;

mod fov;
pub use crate::fov::{compute_fov, refresh_side_fov};

mod light;
pub use light::{
    add_light, calculate_sun_shading, calculate_terrain_light,
    calculate_unit_light,
};

mod raster;
pub use raster::{trace_line, Capture};

mod turn;
pub use turn::prepare_new_turn;

mod voxel;
pub use voxel::{voxel_check, Impact};

#[cfg(test)]
mod testutil;
