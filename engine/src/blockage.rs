use glam::{ivec3, IVec3};
use world::{Battlefield, DamageChannel, Dir8, TilePart};

use crate::{FLOOR_BLAST_BLOCK, FLOOR_BLOCK};

/// Opacity one part of a tile presents to a channel.
///
/// Floors are special-cased: near-opaque to anything but blast, which they
/// only partially resist. An opened door is structurally still there but
/// blocks nothing. Missing tiles and missing parts block nothing.
pub fn part_blockage(
    field: &Battlefield,
    pos: IVec3,
    part: TilePart,
    channel: DamageChannel,
) -> i32 {
    let Some(tile) = field.tile(pos) else { return 0 };
    if tile.part(part).is_none() {
        return 0;
    }
    if tile.is_door_open(part) {
        return 0;
    }
    if part == TilePart::Floor {
        return if channel == DamageChannel::HighExplosive {
            FLOOR_BLAST_BLOCK
        } else {
            FLOOR_BLOCK
        };
    }
    field
        .material(pos, part)
        .map_or(0, |material| material.block(channel))
}

/// Power blocked crossing floor levels within one tile column.
///
/// Only floors matter; the ray pays for every floor strictly between the
/// levels, plus the one it enters through on the far end.
pub fn vertical_blockage(
    field: &Battlefield,
    start: IVec3,
    end: IVec3,
    channel: DamageChannel,
) -> i32 {
    let (x, y) = (start.x, start.y);
    let levels = if end.z < start.z {
        (end.z + 1)..=start.z
    } else if end.z > start.z {
        (start.z + 1)..=end.z
    } else {
        return 0;
    };
    levels
        .map(|z| part_blockage(field, ivec3(x, y, z), TilePart::Floor, channel))
        .sum()
}

/// Power blocked crossing between two adjacent tiles on the same level.
///
/// Cardinal crossings pay for the single shared wall. Diagonal crossings
/// pay the average of the two walls on the direct tiles plus the average of
/// the two walls of the corner tile the path clips. Non-adjacent tile pairs
/// block nothing; rays are sampled at tile resolution so longer deltas
/// never reach here with meaningful geometry.
pub fn horizontal_blockage(
    field: &Battlefield,
    start: IVec3,
    end: IVec3,
    channel: DamageChannel,
) -> i32 {
    use Dir8::*;
    use TilePart::{NorthWall, WestWall};

    let Some(dir) = Dir8::from_vector((end - start).truncate()) else {
        return 0;
    };

    let b = |pos, part| part_blockage(field, pos, part, channel);
    let east = start + ivec3(1, 0, 0);
    let south = start + ivec3(0, 1, 0);
    let north = start + ivec3(0, -1, 0);
    let west = start + ivec3(-1, 0, 0);

    match dir {
        North => b(start, NorthWall),
        East => b(end, WestWall),
        South => b(end, NorthWall),
        West => b(start, WestWall),
        Northeast => {
            (b(start, NorthWall) + b(end, WestWall)) / 2
                + (b(east, WestWall) + b(east, NorthWall)) / 2
        }
        Southeast => {
            (b(end, WestWall) + b(end, NorthWall)) / 2
                + (b(east, WestWall) + b(south, NorthWall)) / 2
        }
        Southwest => {
            (b(end, NorthWall) + b(start, WestWall)) / 2
                + (b(south, WestWall) + b(south, NorthWall)) / 2
        }
        Northwest => {
            (b(start, WestWall) + b(start, NorthWall)) / 2
                + (b(north, WestWall) + b(west, NorthWall)) / 2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Scenario;

    #[test]
    fn floors_resist_sight_more_than_blast() {
        let s = Scenario::open_field(4, 4, 2);
        let pos = ivec3(1, 1, 0);
        assert_eq!(
            part_blockage(&s.field, pos, TilePart::Floor, DamageChannel::Vision),
            255
        );
        assert_eq!(
            part_blockage(
                &s.field,
                pos,
                TilePart::Floor,
                DamageChannel::HighExplosive
            ),
            15
        );
        // No floor on the upper level.
        assert_eq!(
            part_blockage(
                &s.field,
                ivec3(1, 1, 1),
                TilePart::Floor,
                DamageChannel::Vision
            ),
            0
        );
    }

    #[test]
    fn open_door_blocks_nothing() {
        let mut s = Scenario::open_field(4, 4, 2);
        let pos = ivec3(2, 2, 0);
        s.set_mech_door(pos);
        assert_eq!(
            part_blockage(&s.field, pos, TilePart::WestWall, DamageChannel::Vision),
            255
        );
        s.field.open_door(pos, TilePart::WestWall);
        assert_eq!(
            part_blockage(&s.field, pos, TilePart::WestWall, DamageChannel::Vision),
            0
        );
    }

    #[test]
    fn cardinal_crossings_pay_the_shared_wall() {
        let mut s = Scenario::open_field(4, 4, 2);
        let here = ivec3(1, 1, 0);
        s.set_north_wall(here);
        s.set_west_wall(here);
        let ch = DamageChannel::Vision;

        // Wall between (1,1) and its north neighbor (1,0).
        assert_eq!(
            horizontal_blockage(&s.field, here, ivec3(1, 0, 0), ch),
            255
        );
        assert_eq!(
            horizontal_blockage(&s.field, ivec3(1, 0, 0), here, ch),
            255
        );
        // Wall between (1,1) and its west neighbor (0,1).
        assert_eq!(
            horizontal_blockage(&s.field, here, ivec3(0, 1, 0), ch),
            255
        );
        assert_eq!(
            horizontal_blockage(&s.field, ivec3(0, 1, 0), here, ch),
            255
        );
        // The east and south crossings of (1,1) are open.
        assert_eq!(
            horizontal_blockage(&s.field, here, ivec3(2, 1, 0), ch),
            0
        );
        assert_eq!(
            horizontal_blockage(&s.field, here, ivec3(1, 2, 0), ch),
            0
        );
    }

    #[test]
    fn diagonal_crossing_averages_both_wall_pairs() {
        let mut s = Scenario::open_field(4, 4, 2);
        // Going northeast from (1,1) to (2,0), clipping the corner at (2,1).
        s.set_north_wall(ivec3(1, 1, 0));
        s.set_west_wall(ivec3(2, 0, 0));
        s.set_west_wall(ivec3(2, 1, 0));
        s.set_north_wall(ivec3(2, 1, 0));
        assert_eq!(
            horizontal_blockage(
                &s.field,
                ivec3(1, 1, 0),
                ivec3(2, 0, 0),
                DamageChannel::Vision
            ),
            510
        );
        // Only the corner tile's walls present: half weight.
        let mut s2 = Scenario::open_field(4, 4, 2);
        s2.set_west_wall(ivec3(2, 1, 0));
        s2.set_north_wall(ivec3(2, 1, 0));
        assert_eq!(
            horizontal_blockage(
                &s2.field,
                ivec3(1, 1, 0),
                ivec3(2, 0, 0),
                DamageChannel::Vision
            ),
            255
        );
    }

    #[test]
    fn non_adjacent_pairs_block_nothing() {
        let mut s = Scenario::open_field(6, 6, 2);
        s.set_west_wall(ivec3(3, 3, 0));
        assert_eq!(
            horizontal_blockage(
                &s.field,
                ivec3(1, 3, 0),
                ivec3(5, 3, 0),
                DamageChannel::Vision
            ),
            0
        );
    }

    #[test]
    fn vertical_blockage_sums_intervening_floors() {
        let mut s = Scenario::open_field(4, 4, 3);
        let floor = s.floor;
        for z in 1..3 {
            s.field
                .tile_mut(ivec3(2, 2, z))
                .unwrap()
                .set_part(TilePart::Floor, Some(floor));
        }
        let ch = DamageChannel::Vision;
        // Looking down from the top, both upper floors intervene; the
        // ground floor is the far tile's own and isn't crossed.
        assert_eq!(
            vertical_blockage(&s.field, ivec3(2, 2, 2), ivec3(2, 2, 0), ch),
            510
        );
        // Going up one level crosses that level's floor.
        assert_eq!(
            vertical_blockage(&s.field, ivec3(2, 2, 0), ivec3(2, 2, 1), ch),
            255
        );
        assert_eq!(
            vertical_blockage(&s.field, ivec3(2, 2, 1), ivec3(2, 2, 1), ch),
            0
        );
    }
}
