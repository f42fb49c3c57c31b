//! Lower perimeter stretchers tying the legs together.

use crate::assembly::Subassembly;
use crate::dims::DimensionSet;
use crate::primitives::{Anchor, Axis, TubeSegment};
use tracing::{debug, instrument};

/// Build the four stretchers forming the lower perimeter.
///
/// Stretchers sit with their underside `height_above_floor` above the
/// floor plane. Each spans the inner opening along its axis, shortened by
/// `end_gap` and lengthened by `end_overlap` at both ends, so its ends
/// embed into the adjacent legs.
///
/// Across its axis, a stretcher's outer face is coplanar with the inner
/// face of the legs: the leg center sits at `half_outer - tube_od/2`, one
/// tube width further in gives `half_outer - 1.5 * tube_od`.
///
/// Returns `None` unless both legs and stretchers are enabled.
#[instrument(skip_all, fields(stretchers = ?dims.stretchers))]
pub fn build_stretchers(dims: &DimensionSet) -> Option<Subassembly<TubeSegment>> {
    let z = dims.stretcher_center_z()?;
    let length_x = dims.stretcher_length(Axis::X)?;
    let length_y = dims.stretcher_length(Axis::Y)?;
    let od = dims.tube_od;
    let offset_y = dims.outer_y / 2.0 - 1.5 * od;
    let offset_x = dims.outer_x / 2.0 - 1.5 * od;

    let stretcher = |name: &str, axis, length, position| TubeSegment {
        name: name.to_string(),
        axis,
        length,
        joint_allowance: 0.0,
        outer_side: od,
        wall: dims.wall,
        anchor: Anchor::Center,
        position,
    };

    let stretchers = vec![
        stretcher("stretcher_front", Axis::X, length_x, [0.0, -offset_y, z]),
        stretcher("stretcher_back", Axis::X, length_x, [0.0, offset_y, z]),
        stretcher("stretcher_left", Axis::Y, length_y, [-offset_x, 0.0, z]),
        stretcher("stretcher_right", Axis::Y, length_y, [offset_x, 0.0, z]),
    ];
    for s in &stretchers {
        debug!(name = %s.name, length = s.length, position = ?s.position, "placed stretcher");
    }
    Some(Subassembly::from_tubes("stretchers", stretchers, dims.epsilon))
}
