use glam::IVec3;
use strum::IntoEnumIterator;
use world::{
    voxel_to_tile, Battlefield, TilePart, UnitId, LEVEL_VOXELS, TILE_VOXELS,
};

/// What a single voxel probe ran into.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Impact {
    Part(TilePart),
    Unit(UnitId),
    OutOfMap,
}

/// Resolve what occupies one voxel, or `None` for empty space.
///
/// Units are tested before terrain, but only below their current eye/body
/// height and against their body loft. Terrain parts are tested in fixed
/// order: floor, west wall, north wall, object; the first loft bit hit
/// wins. Parts whose door stands open never register.
pub fn voxel_check(
    field: &Battlefield,
    voxel: IVec3,
    exclude: Option<UnitId>,
) -> Option<Impact> {
    let Some(tile) = field.tile(voxel_to_tile(voxel)) else {
        return Some(Impact::OutOfMap);
    };

    // Loft rows run north to south and bits east to west, so both sub-tile
    // coordinates mirror before the lookup.
    let row = 15 - voxel.y.rem_euclid(TILE_VOXELS);
    let bit = 15 - voxel.x.rem_euclid(TILE_VOXELS);
    let sub_z = voxel.z.rem_euclid(LEVEL_VOXELS);

    if let Some(id) = tile.unit {
        if exclude != Some(id) {
            let unit = field.unit(id);
            if sub_z < unit.height()
                && field.catalog.loft_row(unit.loft, row) & (1 << bit) != 0
            {
                return Some(Impact::Unit(id));
            }
        }
    }

    for part in TilePart::iter() {
        if tile.is_door_open(part) {
            continue;
        }
        let Some(material) =
            tile.part(part).and_then(|id| field.catalog.material(id))
        else {
            continue;
        };
        // Two voxels of height per loft layer.
        let loft = material.loft(sub_z / 2);
        if field.catalog.loft_row(loft, row) & (1 << bit) != 0 {
            return Some(Impact::Part(part));
        }
    }

    None
}
