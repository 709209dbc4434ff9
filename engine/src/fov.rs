//! Field of view sweeps. A unit's sight is a fan of power-budgeted rays
//! cast through tile space; every tile a ray still has power on becomes
//! discovered, and units standing on discovered tiles get a voxel-accurate
//! confirmation trace before they count as seen.

use glam::{ivec3, IVec3};
use util::HashSet;
use world::{
    Battlefield, DamageChannel, Faction, TilePart, UnitId,
};

use crate::{
    horizontal_blockage, part_blockage, trace_line, vertical_blockage,
    Capture, Impact, SIGHT_POWER, SIGHT_SHADE_LIMIT,
};

/// Sweep start azimuth per facing octant, degrees. The fan runs 90 degrees
/// clockwise from here, centered on the facing.
const START_ANGLE: [f64; 8] = [225., 270., -45., 0., 45., 90., 135., 180.];

/// Recompute everything one unit can see from where it stands.
///
/// Player sweeps discover tiles and reveal doors adjacent to discovered
/// tiles; every sweep rebuilds the unit's visible-unit set. Lighting is
/// read, not written; run the light passes first or night sweeps see
/// nothing.
pub fn compute_fov(field: &mut Battlefield, id: UnitId) {
    let (pos, facing, faction, eye) = {
        let unit = field.unit(id);
        (unit.pos, unit.facing, unit.faction, unit.eye_voxel())
    };
    field.unit_mut(id).visible.clear();

    let center_x = pos.x as f64 + 0.5;
    let center_y = pos.y as f64 + 0.5;
    // Vertical sweep works in half-level units to get a usable resolution
    // out of integer tile coordinates.
    let center_z = pos.z as f64 * 2.0 + 1.5;
    let start = START_ANGLE[facing as usize];
    // On the ground floor there is nothing below to look at.
    let low_fi = if pos.z == 0 { 0 } else { -90 };

    let mut swept: HashSet<IVec3> = HashSet::default();
    let mut spotted: Vec<UnitId> = Vec::new();

    // The tile underfoot is known even in pitch darkness.
    if faction == Faction::Player {
        if let Some(tile) = field.tile_mut(pos) {
            tile.discovered = true;
        }
    }

    for az_step in 0..=30 {
        let te = (start + 3.0 * az_step as f64).to_radians();
        let (sin_te, cos_te) = te.sin_cos();
        let mut fi = low_fi;
        while fi <= 60 {
            let (sin_fi, cos_fi) = (fi as f64).to_radians().sin_cos();
            let mut origin = pos;
            let mut power = SIGHT_POWER;
            // Rays pick up at the first neighboring tile.
            let mut l = 1.0;
            while power > 0 {
                power -= 1;
                let vx = center_x + l * cos_te * cos_fi;
                let vy = center_y + l * sin_te * cos_fi;
                let vz = center_z + l * sin_fi;
                let dest = ivec3(
                    vx.floor() as i32,
                    vy.floor() as i32,
                    (vz / 2.0).floor() as i32,
                );
                if !field.in_bounds(dest) {
                    break;
                }
                power -= horizontal_blockage(
                    field,
                    origin,
                    dest,
                    DamageChannel::Vision,
                );
                power -= vertical_blockage(
                    field,
                    origin,
                    dest,
                    DamageChannel::Vision,
                );
                // Objects on the tile block what lies beyond it, not the
                // tile itself.
                let object_falloff = part_blockage(
                    field,
                    dest,
                    TilePart::Object,
                    DamageChannel::Vision,
                );
                if power > 0
                    && field
                        .tile(dest)
                        .is_some_and(|t| t.shade() < SIGHT_SHADE_LIMIT)
                    && swept.insert(dest)
                {
                    // The discovery shroud is the player's record; enemy
                    // sweeps only track unit contacts.
                    if faction == Faction::Player {
                        if let Some(tile) = field.tile_mut(dest) {
                            tile.discovered = true;
                        }
                        reveal_adjacent_doors(field, dest);
                    }
                    spot_unit(field, id, faction, eye, dest, &mut spotted);
                }
                power -= object_falloff;
                origin = dest;
                l += 1.0;
            }
            fi += 6;
        }
    }

    let unit = field.unit_mut(id);
    unit.visible.extend(spotted.iter().copied());
    log::trace!("unit {id} sees {} units", unit.visible.len());
}

/// Recompute sight for every active unit of the side whose turn it is.
pub fn refresh_side_fov(field: &mut Battlefield, center: IVec3) {
    // TODO: Only refresh units within sight range of center.
    let ids: Vec<UnitId> = field
        .unit_ids()
        .filter(|&id| {
            let unit = field.unit(id);
            unit.faction == field.side && unit.is_active()
        })
        .collect();
    log::trace!("refreshing sight of {} units around {center}", ids.len());
    for id in ids {
        compute_fov(field, id);
    }
}

/// Whether a looker of one faction cares to track units of another.
/// Players don't track their own side or bystanders; hostiles track
/// everything that isn't their own kind.
fn wants_contact(looker: Faction, other: Faction) -> bool {
    !matches!(
        (looker, other),
        (Faction::Player, Faction::Player | Faction::Neutral)
            | (Faction::Hostile, Faction::Hostile)
    )
}

/// A unit standing on a sighted tile still needs an unobstructed eye-to-eye
/// trace before it counts as seen; tile sweeps overshoot corners the voxel
/// geometry doesn't.
fn spot_unit(
    field: &Battlefield,
    looker: UnitId,
    faction: Faction,
    eye: IVec3,
    dest: IVec3,
    spotted: &mut Vec<UnitId>,
) {
    let Some(other) = field.unit_at(dest) else { return };
    if other == looker
        || !wants_contact(faction, field.unit(other).faction)
        || !field.unit(other).is_active()
    {
        return;
    }
    let target = field.unit(other).eye_voxel();
    match trace_line(field, eye, target, Capture::None, Some(looker)) {
        None => spotted.push(other),
        Some(Impact::Unit(hit)) if hit == other => spotted.push(other),
        _ => (),
    }
}

/// Doors open into the tiles around them, so seeing a tile also reveals a
/// door hung on the far side of its east or south edge.
fn reveal_adjacent_doors(field: &mut Battlefield, pos: IVec3) {
    let east = pos + ivec3(1, 0, 0);
    if field
        .material(east, TilePart::WestWall)
        .is_some_and(|m| m.is_door())
    {
        if let Some(tile) = field.tile_mut(east) {
            tile.discovered = true;
        }
    }
    let south = pos + ivec3(0, 1, 0);
    if field
        .material(south, TilePart::NorthWall)
        .is_some_and(|m| m.is_door())
    {
        if let Some(tile) = field.tile_mut(south) {
            tile.discovered = true;
        }
    }
}
