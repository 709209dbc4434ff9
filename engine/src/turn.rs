use glam::IVec3;
use rand::Rng;
use strum::IntoEnumIterator;
use util::RngExt;
use world::{Battlefield, DamageChannel, Dir8};

use crate::{calculate_terrain_light, horizontal_blockage};

/// Deviation of the fire-catching roll. Flammability values run 0 to 255
/// with 0 the most flammable; a fold this wide ignites even sturdy
/// materials now and then.
const SPREAD_DEV: f64 = 126.0;

/// Advance fire and smoke by one turn.
///
/// The burning and smoking tiles are snapshotted before anything mutates,
/// so spread decisions see the pre-turn state and a freshly caught tile
/// never spreads on the turn it caught. Each burning tile burns down one
/// step and then tries to leap to its eight same-level neighbors; a leap
/// is stopped outright by any incendiary-channel wall blockage and
/// otherwise must pass two independent dice gates against the neighbor's
/// flammability.
pub fn prepare_new_turn(field: &mut Battlefield, rng: &mut impl Rng) {
    let mut on_fire: Vec<IVec3> = Vec::new();
    let mut smoking: Vec<IVec3> = Vec::new();
    for pos in field.tile_positions() {
        let Some(tile) = field.tile(pos) else { continue };
        if tile.fire > 0 {
            on_fire.push(pos);
        }
        if tile.smoke > 0 {
            smoking.push(pos);
        }
    }

    for &pos in &smoking {
        if let Some(tile) = field.tile_mut(pos) {
            tile.age_smoke();
        }
    }

    for &pos in &on_fire {
        if let Some(tile) = field.tile_mut(pos) {
            tile.age_fire();
        }
        for dir in Dir8::iter() {
            let neighbor = pos + dir.vector().extend(0);
            if !field.tile(neighbor).is_some_and(|t| t.fire == 0) {
                continue;
            }
            if horizontal_blockage(
                field,
                pos,
                neighbor,
                DamageChannel::Incendiary,
            ) > 0
            {
                continue;
            }
            let flam = field.flammability(neighbor);
            if flam >= 255 {
                continue;
            }
            if rng.folded_normal(SPREAD_DEV) > flam as f64
                && rng.roll(0, flam) < 2
            {
                field.ignite(neighbor);
            }
        }
    }

    if !on_fire.is_empty() {
        log::debug!("{} tiles burning", on_fire.len());
        calculate_terrain_light(field);
    }
}
