use serde::{Deserialize, Serialize};

use crate::{MaterialId, TilePart, UnitId, MAX_SHADE};

/// The three independently recomputed light fields over the grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum LightLayer {
    /// Sunlight, driven by global shade.
    Ambient,
    /// Terrain light sources and fires.
    Static,
    /// Personal lights carried by units.
    Dynamic,
}

/// One grid cell. Up to four independently-blocking surfaces plus the
/// mutable battle state that accumulates on the cell.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Tile {
    parts: [Option<MaterialId>; 4],
    door_open: [bool; 4],
    light: [i32; 3],
    /// Light values as of the last commit, for render change detection.
    seen_light: [i32; 3],
    dirty: bool,
    /// Turns of burning left.
    pub fire: i32,
    /// Turns of smoke left.
    pub smoke: i32,
    /// Deferred structural charge, resolved once per explosion event.
    explosive: i32,
    pub unit: Option<UnitId>,
    pub discovered: bool,
}

impl Tile {
    pub fn part(&self, part: TilePart) -> Option<MaterialId> {
        self.parts[part as usize]
    }

    /// Install or remove a part. Resets the part's door state.
    pub fn set_part(&mut self, part: TilePart, material: Option<MaterialId>) {
        self.parts[part as usize] = material;
        self.door_open[part as usize] = false;
    }

    pub fn is_door_open(&self, part: TilePart) -> bool {
        self.door_open[part as usize]
    }

    pub fn set_door_open(&mut self, part: TilePart, open: bool) {
        self.door_open[part as usize] = open;
    }

    pub fn light(&self, layer: LightLayer) -> i32 {
        self.light[layer as usize]
    }

    pub fn reset_light(&mut self, layer: LightLayer) {
        self.light[layer as usize] = 0;
    }

    /// Raise the layer towards the given level.
    ///
    /// Light sources combine by maximum, not by sum; overlapping radiances
    /// don't brighten each other and the negative fringe of a radial falloff
    /// square is a no-op.
    pub fn add_light(&mut self, value: i32, layer: LightLayer) {
        if value > self.light[layer as usize] {
            self.light[layer as usize] = value;
        }
    }

    /// Latch the recomputed layer value, flagging the tile for re-render if
    /// it changed since the last commit.
    pub fn commit_light(&mut self, layer: LightLayer) {
        if self.light[layer as usize] != self.seen_light[layer as usize] {
            self.seen_light[layer as usize] = self.light[layer as usize];
            self.dirty = true;
        }
    }

    /// Consume the render-dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Darkness of the tile, 0 full bright to 15 pitch black. The brightest
    /// layer wins.
    pub fn shade(&self) -> i32 {
        let brightest = self.light.iter().copied().max().unwrap_or(0);
        (MAX_SHADE - brightest).clamp(0, MAX_SHADE)
    }

    pub fn add_smoke(&mut self, turns: i32) {
        self.smoke += turns;
    }

    pub fn age_smoke(&mut self) {
        self.smoke = (self.smoke - 1).max(0);
    }

    pub fn age_fire(&mut self) {
        self.fire = (self.fire - 1).max(0);
    }

    /// Mark deferred structural damage. Overlapping rays keep the strongest
    /// charge rather than stacking.
    pub fn set_explosive(&mut self, power: i32) {
        self.explosive = self.explosive.max(power);
    }

    pub fn explosive(&self) -> i32 {
        self.explosive
    }

    pub fn take_explosive(&mut self) -> i32 {
        std::mem::take(&mut self.explosive)
    }
}
