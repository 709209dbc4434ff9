use serde::{Deserialize, Serialize};

use crate::{DamageChannel, LOFT_LAYERS};

/// Index into the catalog's material table.
pub type MaterialId = usize;

/// Index into the catalog's loft bitmask table.
pub type LoftId = u16;

/// Per-channel opacity a surface presents, 0 transparent to 255 solid.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize,
)]
#[serde(default, rename_all = "kebab-case")]
pub struct Blockage {
    pub vision: u8,
    pub explosive: u8,
    pub smoke: u8,
    pub fire: u8,
    pub stun: u8,
}

impl Blockage {
    /// Fully opaque to every channel.
    pub const SOLID: Blockage = Blockage {
        vision: 255,
        explosive: 255,
        smoke: 255,
        fire: 255,
        stun: 255,
    };
}

/// Door behavior of a wall material.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DoorKind {
    #[default]
    None,
    /// Swings open instantly when used.
    Normal,
    /// Powered multi-tile door that animates open over a turn. Its closed
    /// visual persists one step into the open state.
    Mechanical,
}

/// Static terrain rules for one tile part material.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Material {
    pub name: String,
    pub blockage: Blockage,
    /// Structural damage below this is shrugged off.
    pub armor: i32,
    /// 0 catches fire at a spark, 255 is fireproof.
    pub flammability: i32,
    /// Turns the material burns for once ignited.
    pub fuel: i32,
    /// Light the material radiates, 0 for inert terrain.
    pub light_emission: i32,
    pub door: DoorKind,
    /// Loft template per vertical sub-layer, bottom first.
    pub lofts: [LoftId; LOFT_LAYERS as usize],
}

impl Material {
    /// Opacity of the material on the given channel.
    pub fn block(&self, channel: DamageChannel) -> i32 {
        use DamageChannel::*;
        (match channel {
            Vision => self.blockage.vision,
            HighExplosive => self.blockage.explosive,
            Smoke => self.blockage.smoke,
            Incendiary => self.blockage.fire,
            Stun => self.blockage.stun,
            // Armor piercing hits resolve against voxel lofts, not opacity.
            ArmorPiercing => 0,
        }) as i32
    }

    pub fn is_door(&self) -> bool {
        self.door != DoorKind::None
    }

    pub fn loft(&self, layer: i32) -> LoftId {
        self.lofts.get(layer as usize).copied().unwrap_or(0)
    }
}

/// Terrain-rules catalog: material table plus the loft bitmask table shared
/// by terrain parts and unit bodies.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Catalog {
    materials: Vec<Material>,
    /// 16 rows of 16 bits per loft template, row 0 northmost.
    loft_rows: Vec<u16>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Register a 16x16 occupancy bitmask, returning its template id.
    pub fn add_loft(&mut self, rows: [u16; 16]) -> LoftId {
        let id = (self.loft_rows.len() / 16) as LoftId;
        self.loft_rows.extend_from_slice(&rows);
        id
    }

    /// One row of a loft template. Out-of-table lookups read as empty.
    pub fn loft_row(&self, loft: LoftId, row: i32) -> u16 {
        self.loft_rows
            .get(loft as usize * 16 + row as usize)
            .copied()
            .unwrap_or(0)
    }
}
