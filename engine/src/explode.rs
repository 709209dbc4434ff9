use glam::{ivec3, IVec3};
use rand::Rng;
use util::RngExt;
use world::{voxel_to_tile, Battlefield, DamageChannel, TilePart, UnitId};

use crate::{
    calculate_terrain_light, horizontal_blockage, part_blockage,
    refresh_side_fov, voxel_check, Impact, BLAST_STEP_DECAY,
};

/// Resolve one damaging event against the battlefield.
///
/// Armor piercing is a single-point hit at the exact voxel; everything else
/// radiates from the center tile through a fan of 121 rays over the full
/// circle, one z level, each ray spending power on wall blockage, a flat
/// per-tile decay and the object standing on each tile it leaves behind.
///
/// High explosive defers its structural damage to tile charges and commits
/// them in one pass at the end, so overlapping rays never demolish the
/// same wall twice. The aftermath always rechecks sight and static light
/// since walls may be gone and fires may have started.
pub fn explode(
    field: &mut Battlefield,
    rng: &mut impl Rng,
    center: IVec3,
    power: i32,
    channel: DamageChannel,
    max_radius: i32,
    source: Option<UnitId>,
) {
    let center_tile = voxel_to_tile(center);
    log::info!("{channel:?} explosion at {center_tile}, power {power}");

    if channel == DamageChannel::ArmorPiercing {
        match voxel_check(field, center, source) {
            Some(Impact::Part(part)) => {
                let damage = rng.roll(power / 4, power * 3 / 4);
                field.damage_part(center_tile, part, damage);
            }
            Some(Impact::Unit(id)) => {
                let damage = rng.roll(0, power * 2);
                field.unit_mut(id).apply_damage(damage);
            }
            _ => (),
        }
    } else {
        let power = if channel == DamageChannel::Incendiary {
            power / 2
        } else {
            power
        };
        let cx = center_tile.x as f64 + 0.5;
        let cy = center_tile.y as f64 + 0.5;
        for te in (0..=360).step_by(3) {
            let (sin_te, cos_te) = (te as f64).to_radians().sin_cos();
            let mut origin = center_tile;
            let mut p = power;
            let mut l = 0;
            while p > 0 && l <= max_radius {
                let dest = ivec3(
                    (cx + l as f64 * cos_te).floor() as i32,
                    (cy + l as f64 * sin_te).floor() as i32,
                    center_tile.z,
                );
                if !field.in_bounds(dest) {
                    break;
                }
                p -= horizontal_blockage(field, origin, dest, channel);
                if p > 0 {
                    apply_ray_effect(field, rng, dest, p, channel);
                }
                p -= BLAST_STEP_DECAY;
                p -= part_blockage(field, dest, TilePart::Object, channel);
                origin = dest;
                l += 1;
            }
        }
        if channel == DamageChannel::HighExplosive {
            field.detonate_all();
        }
    }

    refresh_side_fov(field, center_tile);
    calculate_terrain_light(field);
}

fn apply_ray_effect(
    field: &mut Battlefield,
    rng: &mut impl Rng,
    dest: IVec3,
    power: i32,
    channel: DamageChannel,
) {
    match channel {
        DamageChannel::HighExplosive => {
            if let Some(tile) = field.tile_mut(dest) {
                tile.set_explosive(power / 2);
            }
            if let Some(id) = field.unit_at(dest) {
                let damage = rng
                    .roll_f64(power as f64 / 2.0, power as f64 * 1.5)
                    as i32;
                field.unit_mut(id).apply_damage(damage);
            }
        }
        DamageChannel::Smoke => {
            // Heavy smoke doesn't thicken further.
            if let Some(tile) = field.tile_mut(dest) {
                if tile.smoke < 10 {
                    tile.add_smoke(rng.roll(15, 20));
                }
            }
        }
        DamageChannel::Incendiary => {
            field.ignite(dest);
        }
        _ => (),
    }
}
