use std::mem;

use glam::{ivec3, IVec3};
use world::{Battlefield, UnitId};

use crate::{voxel_check, Impact};

/// How much of a traced line to record.
pub enum Capture<'a> {
    /// Just the verdict, no positions.
    None,
    /// Append every visited voxel, hit or not.
    FullPath(&'a mut Vec<IVec3>),
    /// Append only the stopping voxel, if the ray stops.
    Impact(&'a mut Vec<IVec3>),
}

/// March a discrete 3D line from `origin` towards `target` one voxel at a
/// time and report the first thing it runs into.
///
/// Bresenham in three dimensions: the axis with the largest delta drives
/// the march and the other two accumulate drift. Axis roles swap through
/// two steep flags, xy first and then xz, so ties resolve the same way for
/// every line. The target voxel itself is never tested; a zero-length line
/// reports no hit without leaving the origin.
pub fn trace_line(
    field: &Battlefield,
    origin: IVec3,
    target: IVec3,
    mut capture: Capture,
    exclude: Option<UnitId>,
) -> Option<Impact> {
    let (mut x0, mut y0, mut z0) = (origin.x, origin.y, origin.z);
    let (mut x1, mut y1, mut z1) = (target.x, target.y, target.z);

    // Steep in the xy plane, make x the longest horizontal axis.
    let swap_xy = (y1 - y0).abs() > (x1 - x0).abs();
    if swap_xy {
        mem::swap(&mut x0, &mut y0);
        mem::swap(&mut x1, &mut y1);
    }

    // Same again for xz.
    let swap_xz = (z1 - z0).abs() > (x1 - x0).abs();
    if swap_xz {
        mem::swap(&mut x0, &mut z0);
        mem::swap(&mut x1, &mut z1);
    }

    let delta_x = (x1 - x0).abs();
    let delta_y = (y1 - y0).abs();
    let delta_z = (z1 - z0).abs();

    // Starting drift keeps the line centered.
    let mut drift_xy = delta_x / 2;
    let mut drift_xz = delta_x / 2;

    let step_x = if x0 > x1 { -1 } else { 1 };
    let step_y = if y0 > y1 { -1 } else { 1 };
    let step_z = if z0 > z1 { -1 } else { 1 };

    let mut y = y0;
    let mut z = z0;
    let mut x = x0;

    while x != x1 {
        // Unswap back into world axes, in reverse order.
        let (mut cx, mut cy, mut cz) = (x, y, z);
        if swap_xz {
            mem::swap(&mut cx, &mut cz);
        }
        if swap_xy {
            mem::swap(&mut cx, &mut cy);
        }
        let visit = ivec3(cx, cy, cz);

        if let Capture::FullPath(path) = &mut capture {
            path.push(visit);
        }

        if let Some(hit) = voxel_check(field, visit, exclude) {
            if let Capture::Impact(path) = &mut capture {
                path.push(visit);
            }
            return Some(hit);
        }

        drift_xy -= delta_y;
        drift_xz -= delta_z;

        if drift_xy < 0 {
            y += step_y;
            drift_xy += delta_x;
        }
        if drift_xz < 0 {
            z += step_z;
            drift_xz += delta_x;
        }

        x += step_x;
    }

    None
}
