use glam::{ivec3, IVec3};
use strum::IntoEnumIterator;
use world::{Battlefield, Dir8, DoorEvent, DoorKind, TilePart, UnitId};

use crate::refresh_side_fov;

/// A unit tries the door directly ahead of it.
///
/// Walls hang on the west and north edges of their tile, so facing east or
/// south addresses the neighboring tile's wall. Only cardinal facings can
/// work a door. Opening a mechanical door also slides open any mechanical
/// door sections on the directly adjacent wall segments, and any opening
/// at all lets new light and sightlines through, so the acting side's
/// sight is refreshed on the spot.
pub fn unit_opens_door(field: &mut Battlefield, id: UnitId) -> DoorEvent {
    let (pos, facing) = {
        let unit = field.unit(id);
        (unit.pos, unit.facing)
    };
    let (door_pos, part, along) = match facing {
        Dir8::North => (pos, TilePart::NorthWall, ivec3(1, 0, 0)),
        Dir8::East => {
            (pos + ivec3(1, 0, 0), TilePart::WestWall, ivec3(0, 1, 0))
        }
        Dir8::South => {
            (pos + ivec3(0, 1, 0), TilePart::NorthWall, ivec3(1, 0, 0))
        }
        Dir8::West => (pos, TilePart::WestWall, ivec3(0, 1, 0)),
        _ => return DoorEvent::NoDoor,
    };

    let event = field.open_door(door_pos, part);
    match event {
        DoorEvent::NormalOpened => {
            log::debug!("unit {id} opened the door at {door_pos}");
            refresh_side_fov(field, door_pos);
        }
        DoorEvent::MechanicalOpening => {
            slide_open_neighbors(field, door_pos, part, along);
            log::debug!("unit {id} triggered the door at {door_pos}");
            refresh_side_fov(field, door_pos);
        }
        DoorEvent::NoDoor | DoorEvent::MechanicalStillOpening => (),
    }
    event
}

/// Mechanical doors come in multi-tile sections that slide as one.
fn slide_open_neighbors(
    field: &mut Battlefield,
    door_pos: IVec3,
    part: TilePart,
    along: IVec3,
) {
    for neighbor in [door_pos + along, door_pos - along] {
        if field
            .material(neighbor, part)
            .is_some_and(|m| m.door == DoorKind::Mechanical)
        {
            if let Some(tile) = field.tile_mut(neighbor) {
                tile.set_door_open(part, true);
            }
        }
    }
}

/// Slide every opened mechanical door shut again. Runs between turns;
/// normal doors stay as they were left. Returns how many closed.
pub fn close_mechanical_doors(field: &mut Battlefield) -> usize {
    let mut closed = 0;
    for pos in field.tile_positions().collect::<Vec<_>>() {
        for part in TilePart::iter() {
            if field.tile(pos).is_some_and(|t| t.is_door_open(part))
                && field
                    .material(pos, part)
                    .is_some_and(|m| m.door == DoorKind::Mechanical)
            {
                if let Some(tile) = field.tile_mut(pos) {
                    tile.set_door_open(part, false);
                    closed += 1;
                }
            }
        }
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculate_sun_shading, testutil::Scenario};
    use world::{Faction, Unit};

    fn unit_at(s: &mut Scenario, pos: IVec3, facing: Dir8) -> UnitId {
        let id =
            s.field
                .add_unit(Unit::new(pos, Faction::Player, s.body_loft));
        s.field.unit_mut(id).facing = facing;
        id
    }

    #[test]
    fn facing_addresses_the_right_wall() {
        let mut s = Scenario::open_field(8, 8, 1);
        s.set_wood_door(ivec3(4, 4, 0));
        // Facing west from inside the tile the door hangs on.
        let id = unit_at(&mut s, ivec3(4, 4, 0), Dir8::West);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NormalOpened);
        assert!(s
            .field
            .tile(ivec3(4, 4, 0))
            .unwrap()
            .is_door_open(TilePart::WestWall));
        // Facing east from the neighbor on the far side.
        let mut s2 = Scenario::open_field(8, 8, 1);
        s2.set_wood_door(ivec3(4, 4, 0));
        let id = unit_at(&mut s2, ivec3(3, 4, 0), Dir8::East);
        assert_eq!(
            unit_opens_door(&mut s2.field, id),
            DoorEvent::NormalOpened
        );
        assert!(s2
            .field
            .tile(ivec3(4, 4, 0))
            .unwrap()
            .is_door_open(TilePart::WestWall));
    }

    #[test]
    fn no_door_cases() {
        let mut s = Scenario::open_field(8, 8, 1);
        s.set_west_wall(ivec3(4, 4, 0));
        s.set_wood_door(ivec3(6, 6, 0));
        // A plain wall is not a door.
        let id = unit_at(&mut s, ivec3(4, 4, 0), Dir8::West);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NoDoor);
        // Diagonal facings never address a door.
        let id = unit_at(&mut s, ivec3(6, 6, 0), Dir8::Northwest);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NoDoor);
        // An already swung normal door is just an opening.
        let id = unit_at(&mut s, ivec3(6, 6, 0), Dir8::West);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NormalOpened);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NoDoor);
    }

    #[test]
    fn mechanical_sections_slide_together_and_close_on_turn_end() {
        let mut s = Scenario::open_field(8, 8, 1);
        s.set_mech_door(ivec3(4, 3, 0));
        s.set_mech_door(ivec3(4, 4, 0));
        s.set_mech_door(ivec3(4, 5, 0));
        let id = unit_at(&mut s, ivec3(4, 4, 0), Dir8::West);
        assert_eq!(
            unit_opens_door(&mut s.field, id),
            DoorEvent::MechanicalOpening
        );
        for y in 3..=5 {
            assert!(s
                .field
                .tile(ivec3(4, y, 0))
                .unwrap()
                .is_door_open(TilePart::WestWall));
        }
        assert_eq!(
            unit_opens_door(&mut s.field, id),
            DoorEvent::MechanicalStillOpening
        );
        assert_eq!(close_mechanical_doors(&mut s.field), 3);
        assert!(!s
            .field
            .tile(ivec3(4, 4, 0))
            .unwrap()
            .is_door_open(TilePart::WestWall));
    }

    #[test]
    fn opening_a_door_extends_sight() {
        let mut s = Scenario::open_field(8, 8, 1);
        s.field.global_shade = 0;
        calculate_sun_shading(&mut s.field);
        for y in 0..8 {
            s.set_west_wall(ivec3(4, y, 0));
        }
        s.set_wood_door(ivec3(4, 4, 0));
        let id = unit_at(&mut s, ivec3(3, 4, 0), Dir8::East);
        crate::compute_fov(&mut s.field, id);
        assert!(!s.field.tile(ivec3(5, 4, 0)).unwrap().discovered);
        assert_eq!(unit_opens_door(&mut s.field, id), DoorEvent::NormalOpened);
        assert!(s.field.tile(ivec3(5, 4, 0)).unwrap().discovered);
    }
}
