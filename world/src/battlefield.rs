use glam::{ivec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::{
    Catalog, DoorKind, Faction, Material, Tile, TilePart, Unit, UnitId,
};

/// Outcome of a unit trying a door.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum DoorEvent {
    /// Nothing door-like in the way; walk on through.
    NoDoor,
    /// A normal door swung open.
    NormalOpened,
    /// A mechanical door started to open; wait for it.
    MechanicalOpening,
    /// The mechanical door is already opening; have patience.
    MechanicalStillOpening,
}

/// The battlefield state container: a dense tile arena, the unit roster and
/// the terrain-rules catalog the tiles refer into.
///
/// Tiles live in a flat buffer indexed `(z * length + y) * width + x`; all
/// position lookups are bounds checked and return `None` off the map.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Battlefield {
    width: i32,
    length: i32,
    levels: i32,
    tiles: Vec<Tile>,
    pub units: Vec<Unit>,
    pub catalog: Catalog,
    /// Time-of-day darkness, 0 full day to 15 full night.
    pub global_shade: i32,
    /// Faction whose turn it is.
    pub side: Faction,
}

impl Battlefield {
    pub fn new(width: i32, length: i32, levels: i32, catalog: Catalog) -> Self {
        assert!(width > 0 && length > 0 && levels > 0, "degenerate map");
        Battlefield {
            width,
            length,
            levels,
            tiles: vec![Tile::default(); (width * length * levels) as usize],
            units: Vec::new(),
            catalog,
            global_shade: 0,
            side: Faction::Player,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    /// Number of floor levels.
    pub fn levels(&self) -> i32 {
        self.levels
    }

    pub fn in_bounds(&self, pos: IVec3) -> bool {
        (0..self.width).contains(&pos.x)
            && (0..self.length).contains(&pos.y)
            && (0..self.levels).contains(&pos.z)
    }

    fn index(&self, pos: IVec3) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| ((pos.z * self.length + pos.y) * self.width + pos.x) as usize)
    }

    pub fn tile(&self, pos: IVec3) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, pos: IVec3) -> Option<&mut Tile> {
        self.index(pos).map(|i| &mut self.tiles[i])
    }

    /// Every tile position, x varying fastest.
    pub fn tile_positions(&self) -> impl Iterator<Item = IVec3> {
        let (w, l, h) = (self.width, self.length, self.levels);
        (0..h).flat_map(move |z| {
            (0..l).flat_map(move |y| (0..w).map(move |x| ivec3(x, y, z)))
        })
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id]
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.units[id]
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> {
        0..self.units.len()
    }

    /// Add a unit to the roster and stand it on its tile.
    pub fn add_unit(&mut self, unit: Unit) -> UnitId {
        let pos = unit.pos;
        self.units.push(unit);
        let id = self.units.len() - 1;
        if let Some(tile) = self.tile_mut(pos) {
            tile.unit = Some(id);
        }
        id
    }

    /// Material of a tile part, if the tile exists and the part is present.
    pub fn material(&self, pos: IVec3, part: TilePart) -> Option<&Material> {
        self.tile(pos)
            .and_then(|t| t.part(part))
            .and_then(|id| self.catalog.material(id))
    }

    /// How readily the tile catches fire; the most flammable present part
    /// decides. 255 for bare ground.
    pub fn flammability(&self, pos: IVec3) -> i32 {
        use strum::IntoEnumIterator;
        TilePart::iter()
            .filter_map(|p| self.material(pos, p))
            .map(|m| m.flammability)
            .min()
            .unwrap_or(255)
    }

    /// Set the tile burning if it isn't already. Burn duration comes from
    /// the longest-burning part present.
    pub fn ignite(&mut self, pos: IVec3) {
        use strum::IntoEnumIterator;
        let Some(i) = self.index(pos) else { return };
        if self.tiles[i].fire > 0 {
            return;
        }
        let fuel = TilePart::iter()
            .filter_map(|p| self.material(pos, p))
            .map(|m| m.fuel)
            .max()
            .unwrap_or(0);
        log::debug!("tile {pos} caught fire");
        self.tiles[i].fire = fuel + 1;
    }

    /// Apply structural damage to one part. The part is destroyed outright
    /// when the damage meets its armor. Returns whether it was destroyed.
    pub fn damage_part(
        &mut self,
        pos: IVec3,
        part: TilePart,
        power: i32,
    ) -> bool {
        let Some(i) = self.index(pos) else { return false };
        let Some(id) = self.tiles[i].part(part) else { return false };
        let Some(material) = self.catalog.material(id) else { return false };
        if power >= material.armor {
            log::debug!("{} {part:?} at {pos} destroyed", material.name);
            self.tiles[i].set_part(part, None);
            true
        } else {
            false
        }
    }

    /// Resolve every deferred explosive charge in one pass, so overlapping
    /// blast rays never double-apply destruction.
    pub fn detonate_all(&mut self) {
        let pending: Vec<(IVec3, i32)> = self
            .tile_positions()
            .filter_map(|pos| {
                let charge = self.tile(pos)?.explosive();
                (charge > 0).then_some((pos, charge))
            })
            .collect();
        for (pos, charge) in pending {
            if let Some(tile) = self.tile_mut(pos) {
                tile.take_explosive();
            }
            self.damage_part(pos, TilePart::Floor, charge);
            self.damage_part(pos, TilePart::Object, charge);
        }
    }

    /// Try a door on one wall part of a tile.
    pub fn open_door(&mut self, pos: IVec3, part: TilePart) -> DoorEvent {
        let Some(i) = self.index(pos) else {
            return DoorEvent::NoDoor;
        };
        let Some(id) = self.tiles[i].part(part) else {
            return DoorEvent::NoDoor;
        };
        let Some(material) = self.catalog.material(id) else {
            return DoorEvent::NoDoor;
        };
        let kind = material.door;
        let open = self.tiles[i].is_door_open(part);
        match (kind, open) {
            (DoorKind::None, _) => DoorEvent::NoDoor,
            // Already swung open, nothing left to do.
            (DoorKind::Normal, true) => DoorEvent::NoDoor,
            (DoorKind::Normal, false) => {
                self.tiles[i].set_door_open(part, true);
                DoorEvent::NormalOpened
            }
            (DoorKind::Mechanical, true) => DoorEvent::MechanicalStillOpening,
            (DoorKind::Mechanical, false) => {
                self.tiles[i].set_door_open(part, true);
                DoorEvent::MechanicalOpening
            }
        }
    }

    pub fn unit_at(&self, pos: IVec3) -> Option<UnitId> {
        self.tile(pos).and_then(|t| t.unit)
    }
}

impl std::fmt::Debug for Battlefield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battlefield")
            .field("width", &self.width)
            .field("length", &self.length)
            .field("levels", &self.levels)
            .field("units", &self.units.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blockage, DamageChannel};
    use pretty_assertions::assert_eq;

    fn test_field() -> Battlefield {
        let mut catalog = Catalog::new();
        catalog.add_loft([0; 16]);
        let wall = catalog.add_material(Material {
            name: "wall".into(),
            blockage: Blockage::SOLID,
            armor: 40,
            flammability: 255,
            ..Default::default()
        });
        let mut field = Battlefield::new(8, 8, 2, catalog);
        field
            .tile_mut(ivec3(2, 2, 0))
            .unwrap()
            .set_part(TilePart::WestWall, Some(wall));
        field
    }

    #[test]
    fn out_of_bounds_is_none() {
        let field = test_field();
        assert!(field.tile(ivec3(-1, 0, 0)).is_none());
        assert!(field.tile(ivec3(8, 0, 0)).is_none());
        assert!(field.tile(ivec3(0, 0, 2)).is_none());
        assert!(field.tile(ivec3(7, 7, 1)).is_some());
    }

    #[test]
    fn arena_addresses_every_tile_once() {
        let field = test_field();
        assert_eq!(field.tile_positions().count(), 8 * 8 * 2);
    }

    #[test]
    fn armor_gates_structural_damage() {
        let mut field = test_field();
        let pos = ivec3(2, 2, 0);
        assert!(!field.damage_part(pos, TilePart::WestWall, 39));
        assert!(field.tile(pos).unwrap().part(TilePart::WestWall).is_some());
        assert!(field.damage_part(pos, TilePart::WestWall, 40));
        assert!(field.tile(pos).unwrap().part(TilePart::WestWall).is_none());
    }

    #[test]
    fn detonation_resolves_each_charge_once() {
        let mut field = test_field();
        let floor = field.catalog.add_material(Material {
            name: "floor".into(),
            armor: 20,
            ..Default::default()
        });
        let pos = ivec3(3, 3, 0);
        field.tile_mut(pos).unwrap().set_part(TilePart::Floor, Some(floor));
        field.tile_mut(pos).unwrap().set_explosive(25);
        field.detonate_all();
        assert!(field.tile(pos).unwrap().part(TilePart::Floor).is_none());
        // Charge was consumed; a second pass is a no-op.
        field.detonate_all();
    }

    #[test]
    fn bare_ground_is_fireproof() {
        let field = test_field();
        assert_eq!(field.flammability(ivec3(5, 5, 0)), 255);
        assert_eq!(
            field
                .material(ivec3(2, 2, 0), TilePart::WestWall)
                .unwrap()
                .block(DamageChannel::Vision),
            255
        );
    }
}
