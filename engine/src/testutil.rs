//! Canned battlefield scenarios for engine tests.

use glam::{ivec3, IVec3};
use world::{
    Battlefield, Blockage, Catalog, DoorKind, LoftId, Material, MaterialId,
    TilePart,
};

pub struct Scenario {
    pub field: Battlefield,
    pub west_wall: MaterialId,
    pub north_wall: MaterialId,
    pub floor: MaterialId,
    pub wood_door: MaterialId,
    pub mech_door: MaterialId,
    pub lamp: MaterialId,
    pub straw: MaterialId,
    pub body_loft: LoftId,
}

impl Scenario {
    /// A flat open field: turf floor on level 0, clear air above.
    pub fn open_field(width: i32, length: i32, levels: i32) -> Self {
        let mut catalog = Catalog::new();

        // Template 0 is empty space by convention.
        catalog.add_loft([0; 16]);
        let cube = catalog.add_loft([0xffff; 16]);
        let west_strip = catalog.add_loft([0x8000; 16]);
        let mut north_rows = [0u16; 16];
        // Rows mirror, the north edge of the tile is row 15.
        north_rows[15] = 0xffff;
        let north_strip = catalog.add_loft(north_rows);
        let body_loft = cube;

        let wall = |name: &str, strip: LoftId| Material {
            name: name.into(),
            blockage: Blockage::SOLID,
            armor: 40,
            flammability: 255,
            lofts: [strip; 12],
            ..Default::default()
        };

        let west_wall = catalog.add_material(wall("stone wall w", west_strip));
        let north_wall =
            catalog.add_material(wall("stone wall n", north_strip));

        let mut floor_lofts = [0; 12];
        floor_lofts[0] = cube;
        let floor = catalog.add_material(Material {
            name: "turf".into(),
            armor: 20,
            flammability: 140,
            fuel: 1,
            lofts: floor_lofts,
            ..Default::default()
        });

        let wood_door = catalog.add_material(Material {
            door: DoorKind::Normal,
            armor: 25,
            flammability: 30,
            fuel: 4,
            ..wall("wood door", west_strip)
        });

        let mech_door = catalog.add_material(Material {
            door: DoorKind::Mechanical,
            ..wall("powered door", west_strip)
        });

        let lamp = catalog.add_material(Material {
            name: "lamp".into(),
            armor: 10,
            flammability: 255,
            light_emission: 10,
            ..Default::default()
        });

        let straw = catalog.add_material(Material {
            name: "straw bale".into(),
            armor: 5,
            flammability: 0,
            fuel: 3,
            ..Default::default()
        });

        let mut field = Battlefield::new(width, length, levels, catalog);
        for y in 0..length {
            for x in 0..width {
                field
                    .tile_mut(ivec3(x, y, 0))
                    .unwrap()
                    .set_part(TilePart::Floor, Some(floor));
            }
        }

        Scenario {
            field,
            west_wall,
            north_wall,
            floor,
            wood_door,
            mech_door,
            lamp,
            straw,
            body_loft,
        }
    }

    pub fn set_west_wall(&mut self, pos: IVec3) {
        let id = self.west_wall;
        self.set(pos, TilePart::WestWall, id);
    }

    pub fn set_north_wall(&mut self, pos: IVec3) {
        let id = self.north_wall;
        self.set(pos, TilePart::NorthWall, id);
    }

    pub fn set_wood_door(&mut self, pos: IVec3) {
        let id = self.wood_door;
        self.set(pos, TilePart::WestWall, id);
    }

    pub fn set_mech_door(&mut self, pos: IVec3) {
        let id = self.mech_door;
        self.set(pos, TilePart::WestWall, id);
    }

    pub fn set_lamp(&mut self, pos: IVec3) {
        let id = self.lamp;
        self.set(pos, TilePart::Object, id);
    }

    pub fn set_straw(&mut self, pos: IVec3) {
        let id = self.straw;
        self.set(pos, TilePart::Object, id);
    }

    fn set(&mut self, pos: IVec3, part: TilePart, id: MaterialId) {
        self.field
            .tile_mut(pos)
            .expect("scenario tile out of bounds")
            .set_part(part, Some(id));
    }
}
