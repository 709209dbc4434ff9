//! Battlefield grid datatypes and static terrain rules.

use glam::{ivec3, IVec3};

mod battlefield;
pub use battlefield::{Battlefield, DoorEvent};

mod dir;
pub use dir::Dir8;

mod material;
pub use material::{Blockage, Catalog, DoorKind, LoftId, Material, MaterialId};

mod parts;
pub use parts::{DamageChannel, TilePart};

mod tile;
pub use tile::{LightLayer, Tile};

mod unit;
pub use unit::{Faction, Unit, UnitId};

/// Horizontal voxel subdivisions along one tile axis.
pub const TILE_VOXELS: i32 = 16;

/// Vertical voxel subdivisions of one floor level.
pub const LEVEL_VOXELS: i32 = 24;

/// Loft bitmask layers per floor level, each two voxels tall.
pub const LOFT_LAYERS: i32 = LEVEL_VOXELS / 2;

/// Darkest global shade value, full night.
pub const MAX_SHADE: i32 = 15;

/// Tile coordinate of the voxel.
pub fn voxel_to_tile(voxel: IVec3) -> IVec3 {
    ivec3(
        voxel.x.div_euclid(TILE_VOXELS),
        voxel.y.div_euclid(TILE_VOXELS),
        voxel.z.div_euclid(LEVEL_VOXELS),
    )
}

/// Floor-level center voxel of the tile.
pub fn tile_center_voxel(tile: IVec3) -> IVec3 {
    ivec3(
        tile.x * TILE_VOXELS + TILE_VOXELS / 2,
        tile.y * TILE_VOXELS + TILE_VOXELS / 2,
        tile.z * LEVEL_VOXELS,
    )
}
