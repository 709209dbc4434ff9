use anyhow::Result;
use clap::Parser;
use glam::{ivec3, IVec3};

use engine::{
    calculate_sun_shading, calculate_terrain_light, calculate_unit_light,
    explode, prepare_new_turn, refresh_side_fov, unit_opens_door,
};
use util::srng;
use world::{
    tile_center_voxel, Battlefield, Blockage, Catalog, DamageChannel, Dir8,
    DoorKind, Faction, LoftId, Material, TilePart, Unit,
};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "dawn raid", help = "Scenario seed")]
    seed: String,

    #[arg(
        long,
        default_value_t = 4,
        help = "Time-of-day darkness, 0 day to 15 night"
    )]
    shade: i32,

    #[arg(long, help = "Log engine internals")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose)?;

    let mut rng = srng(&args.seed);
    let mut field = build_scenario(args.shade.clamp(0, 15));

    calculate_sun_shading(&mut field);
    calculate_terrain_light(&mut field);
    calculate_unit_light(&mut field);
    refresh_side_fov(&mut field, ivec3(0, 0, 0));

    println!("-- first sight --");
    print_map(&field);

    // The pointman tries the farmhouse door.
    let pointman = 0;
    let event = unit_opens_door(&mut field, pointman);
    log::info!("door attempt: {event:?}");

    println!("-- door opened --");
    print_map(&field);

    // A stray rocket craters the yard east of the house.
    explode(
        &mut field,
        &mut rng,
        tile_center_voxel(ivec3(16, 6, 0)),
        120,
        DamageChannel::HighExplosive,
        4,
        None,
    );
    calculate_unit_light(&mut field);
    refresh_side_fov(&mut field, ivec3(16, 6, 0));

    println!("-- after the blast --");
    print_map(&field);

    prepare_new_turn(&mut field, &mut rng);

    println!("-- next turn --");
    print_map(&field);

    Ok(())
}

fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

/// A farmyard at first light: a walled farmhouse with a wooden front door
/// and a powered double door, a lamp inside, straw bales in the yard, two
/// player units outside and one hostile indoors.
fn build_scenario(shade: i32) -> Battlefield {
    let mut catalog = Catalog::new();
    catalog.add_loft([0; 16]);
    let cube = catalog.add_loft([0xffff; 16]);
    let west_strip = catalog.add_loft([0x8000; 16]);
    let mut north_rows = [0u16; 16];
    north_rows[15] = 0xffff;
    let north_strip = catalog.add_loft(north_rows);

    let wall = |name: &str, strip: LoftId| Material {
        name: name.into(),
        blockage: Blockage::SOLID,
        armor: 40,
        flammability: 255,
        lofts: [strip; 12],
        ..Default::default()
    };
    let west_wall = catalog.add_material(wall("stone wall", west_strip));
    let north_wall = catalog.add_material(wall("stone wall", north_strip));
    let wood_door = catalog.add_material(Material {
        door: DoorKind::Normal,
        armor: 25,
        flammability: 30,
        fuel: 4,
        ..wall("front door", west_strip)
    });
    let mech_door = catalog.add_material(Material {
        door: DoorKind::Mechanical,
        ..wall("powered door", north_strip)
    });

    let mut floor_lofts = [0; 12];
    floor_lofts[0] = cube;
    let turf = catalog.add_material(Material {
        name: "turf".into(),
        armor: 20,
        flammability: 140,
        fuel: 1,
        lofts: floor_lofts,
        ..Default::default()
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

    let mut field = Battlefield::new(20, 12, 1, catalog);
    field.global_shade = shade;

    for y in 0..12 {
        for x in 0..20 {
            if let Some(tile) = field.tile_mut(ivec3(x, y, 0)) {
                tile.set_part(TilePart::Floor, Some(turf));
            }
        }
    }

    // Farmhouse spanning tiles (10..14, 4..8).
    let mut set = |pos: IVec3, part: TilePart, id| {
        if let Some(tile) = field.tile_mut(pos) {
            tile.set_part(part, Some(id));
        }
    };
    for x in 10..14 {
        set(ivec3(x, 4, 0), TilePart::NorthWall, north_wall);
        set(ivec3(x, 8, 0), TilePart::NorthWall, mech_door);
    }
    for y in 4..8 {
        set(ivec3(10, y, 0), TilePart::WestWall, west_wall);
        set(ivec3(14, y, 0), TilePart::WestWall, west_wall);
    }
    // Swap the middle of the west face for the front door.
    set(ivec3(10, 6, 0), TilePart::WestWall, wood_door);
    set(ivec3(11, 5, 0), TilePart::Object, lamp);
    set(ivec3(6, 9, 0), TilePart::Object, straw);
    set(ivec3(7, 9, 0), TilePart::Object, straw);

    let pointman = field.add_unit(Unit::new(
        ivec3(9, 6, 0),
        Faction::Player,
        cube,
    ));
    field.unit_mut(pointman).facing = Dir8::East;
    let support = field.add_unit(Unit::new(
        ivec3(7, 7, 0),
        Faction::Player,
        cube,
    ));
    field.unit_mut(support).facing = Dir8::East;
    field.add_unit(Unit::new(ivec3(12, 6, 0), Faction::Hostile, cube));

    field
}

/// One character per ground-floor tile. Undiscovered tiles print as
/// shroud; walls on tile edges get folded into the tile glyph.
fn print_map(field: &Battlefield) {
    for y in 0..field.length() {
        let mut row = String::new();
        for x in 0..field.width() {
            row.push(tile_glyph(field, ivec3(x, y, 0)));
        }
        println!("{row}");
    }
}

fn tile_glyph(field: &Battlefield, pos: IVec3) -> char {
    let Some(tile) = field.tile(pos) else { return ' ' };
    if !tile.discovered {
        return '?';
    }
    if let Some(id) = tile.unit.filter(|&id| field.unit(id).is_active()) {
        return match field.unit(id).faction {
            Faction::Player => '@',
            Faction::Hostile => 'h',
            Faction::Neutral => 'n',
        };
    }
    if tile.fire > 0 {
        return '*';
    }
    if tile.smoke > 0 {
        return '%';
    }
    for part in [TilePart::WestWall, TilePart::NorthWall] {
        if let Some(material) = field.material(pos, part) {
            if material.is_door() {
                return if tile.is_door_open(part) { '/' } else { '+' };
            }
            return '#';
        }
    }
    if tile.part(TilePart::Object).is_some() {
        return 'o';
    }
    if tile.part(TilePart::Floor).is_some() {
        return shade_glyph(tile.shade());
    }
    ' '
}

fn shade_glyph(shade: i32) -> char {
    match shade {
        0..=3 => '.',
        4..=9 => ',',
        _ => ' ',
    }
}
