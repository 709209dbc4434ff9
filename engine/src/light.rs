//! The three-layer lighting model. Each pass recomputes one layer from
//! scratch over the whole grid; layers never read each other.

use glam::{ivec3, IVec3};
use strum::IntoEnumIterator;
use world::{
    Battlefield, DamageChannel, Faction, LightLayer, TilePart, UnitId,
    MAX_SHADE,
};

use crate::{
    vertical_blockage, DUSK_SHADE, FIRE_LIGHT, PERSONAL_LIGHT,
};

/// Splash a point light over the grid with radial falloff.
///
/// Every tile within `power` steps of the center gets lit to
/// `power - round(euclidean distance)`, on every level. Sub-zero fringe
/// values are dropped by the accumulator. Walls do not cast shadows here;
/// light leaks through terrain by design of the shading model.
pub fn add_light(
    field: &mut Battlefield,
    center: IVec3,
    power: i32,
    layer: LightLayer,
) {
    let levels = field.levels();
    for dy in 0..=power {
        for dx in 0..=power {
            let value =
                power - (((dx * dx + dy * dy) as f64).sqrt().round() as i32);
            for z in 0..levels {
                for pos in [
                    ivec3(center.x + dx, center.y + dy, z),
                    ivec3(center.x + dx, center.y - dy, z),
                    ivec3(center.x - dx, center.y + dy, z),
                    ivec3(center.x - dx, center.y - dy, z),
                ] {
                    if let Some(tile) = field.tile_mut(pos) {
                        tile.add_light(value, layer);
                    }
                }
            }
        }
    }
}

/// Recompute the ambient layer from the global shade.
///
/// Every tile gets the sun level. In daylight, tiles under a blocking
/// floor take a fixed shadow penalty; at night there is nothing left to
/// shadow.
pub fn calculate_sun_shading(field: &mut Battlefield) {
    let sun = MAX_SHADE - field.global_shade;
    let top = field.levels() - 1;
    let daytime = field.global_shade <= DUSK_SHADE;
    for pos in field.tile_positions() {
        let mut power = sun;
        if daytime
            && vertical_blockage(
                field,
                ivec3(pos.x, pos.y, top),
                pos,
                DamageChannel::Vision,
            ) > 0
        {
            power -= 2;
        }
        if let Some(tile) = field.tile_mut(pos) {
            tile.reset_light(LightLayer::Ambient);
            tile.add_light(power, LightLayer::Ambient);
        }
    }
    commit_layer(field, LightLayer::Ambient);
}

/// Recompute the static layer from glowing terrain and burning tiles.
pub fn calculate_terrain_light(field: &mut Battlefield) {
    for pos in field.tile_positions() {
        if let Some(tile) = field.tile_mut(pos) {
            tile.reset_light(LightLayer::Static);
        }
    }

    // In full daylight the sun washes out every terrain source.
    if field.global_shade < 1 {
        commit_layer(field, LightLayer::Static);
        return;
    }

    let mut sources: Vec<(IVec3, i32)> = Vec::new();
    for pos in field.tile_positions() {
        let mut power = TilePart::iter()
            .filter_map(|p| field.material(pos, p))
            .map(|m| m.light_emission)
            .max()
            .unwrap_or(0);
        if field.tile(pos).is_some_and(|t| t.fire > 0) {
            power = power.max(FIRE_LIGHT);
        }
        if power > 0 {
            sources.push((pos, power));
        }
    }
    for (pos, power) in sources {
        add_light(field, pos, power, LightLayer::Static);
    }

    commit_layer(field, LightLayer::Static);
}

/// Recompute the dynamic layer from the personal lights of living player
/// units. Player lights stay lit on either side's turn.
pub fn calculate_unit_light(field: &mut Battlefield) {
    for pos in field.tile_positions() {
        if let Some(tile) = field.tile_mut(pos) {
            tile.reset_light(LightLayer::Dynamic);
        }
    }

    if field.global_shade < 1 {
        commit_layer(field, LightLayer::Dynamic);
        return;
    }

    let carriers: Vec<UnitId> = field
        .unit_ids()
        .filter(|&id| {
            let unit = field.unit(id);
            unit.faction == Faction::Player && unit.is_active()
        })
        .collect();
    for id in carriers {
        let pos = field.unit(id).pos;
        add_light(field, pos, PERSONAL_LIGHT, LightLayer::Dynamic);
    }

    commit_layer(field, LightLayer::Dynamic);
}

fn commit_layer(field: &mut Battlefield, layer: LightLayer) {
    for pos in field.tile_positions() {
        if let Some(tile) = field.tile_mut(pos) {
            tile.commit_light(layer);
        }
    }
}
