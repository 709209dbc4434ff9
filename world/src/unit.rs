use glam::{ivec3, IVec3};
use serde::{Deserialize, Serialize};
use util::HashSet;

use crate::{Dir8, LoftId, LEVEL_VOXELS, TILE_VOXELS};

/// Identity of a unit within its battlefield, index into the unit roster.
pub type UnitId = usize;

#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Faction {
    Player,
    Hostile,
    Neutral,
}

/// A combatant, referenced by the engine through its grid position and
/// sensing state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Unit {
    pub pos: IVec3,
    pub facing: Dir8,
    pub faction: Faction,
    pub kneeling: bool,
    pub out_of_action: bool,
    pub health: i32,
    /// Eye height in voxels when standing.
    pub stand_height: i32,
    /// Eye height in voxels when kneeling.
    pub kneel_height: i32,
    /// Body shape template for voxel hit tests.
    pub loft: LoftId,
    /// Units this one currently sees. Rebuilt by every sight sweep.
    pub visible: HashSet<UnitId>,
}

impl Unit {
    pub fn new(pos: IVec3, faction: Faction, loft: LoftId) -> Self {
        Unit {
            pos,
            facing: Dir8::North,
            faction,
            kneeling: false,
            out_of_action: false,
            health: 35,
            stand_height: 22,
            kneel_height: 14,
            loft,
            visible: HashSet::default(),
        }
    }

    /// Current eye/body height in voxels.
    pub fn height(&self) -> i32 {
        if self.kneeling {
            self.kneel_height
        } else {
            self.stand_height
        }
    }

    pub fn is_active(&self) -> bool {
        !self.out_of_action
    }

    /// Voxel the unit looks out from, center of its tile at eye height.
    pub fn eye_voxel(&self) -> IVec3 {
        ivec3(
            self.pos.x * TILE_VOXELS + TILE_VOXELS / 2,
            self.pos.y * TILE_VOXELS + TILE_VOXELS / 2,
            self.pos.z * LEVEL_VOXELS + self.height(),
        )
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.out_of_action = true;
        }
    }
}
