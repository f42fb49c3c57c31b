//! Top perimeter frame: four rails joined with butt joints.

use crate::assembly::Subassembly;
use crate::dims::DimensionSet;
use crate::primitives::{Anchor, Axis, TubeSegment};
use tracing::{debug, instrument};

/// Build the closed rectangular ring of the table top.
///
/// The two long rails run along X for the full `outer_x` and sit flush with
/// the `outer_y` boundary. The two short rails run along Y between them
/// with a cut length of `outer_y - 2 * tube_od`. Rails are centered on
/// `z = 0`, so the frame occupies `[-tube_od/2, tube_od/2]` vertically.
///
/// Short rails are modeled `epsilon` longer at each end so they embed into
/// the long rails; the long rails carry no allowance and define the outer
/// envelope exactly.
#[instrument(skip_all, fields(outer_x = dims.outer_x, outer_y = dims.outer_y))]
pub fn build_frame(dims: &DimensionSet) -> Subassembly<TubeSegment> {
    let od = dims.tube_od;
    let long_offset = dims.outer_y / 2.0 - od / 2.0;
    let short_offset = dims.outer_x / 2.0 - od / 2.0;
    let short_length = dims.outer_y - 2.0 * od;

    let rail = |name: &str, axis, length, joint_allowance, position| TubeSegment {
        name: name.to_string(),
        axis,
        length,
        joint_allowance,
        outer_side: od,
        wall: dims.wall,
        anchor: Anchor::Center,
        position,
    };

    let rails = vec![
        rail("rail_front", Axis::X, dims.outer_x, 0.0, [0.0, -long_offset, 0.0]),
        rail("rail_back", Axis::X, dims.outer_x, 0.0, [0.0, long_offset, 0.0]),
        rail("rail_left", Axis::Y, short_length, dims.epsilon, [-short_offset, 0.0, 0.0]),
        rail("rail_right", Axis::Y, short_length, dims.epsilon, [short_offset, 0.0, 0.0]),
    ];
    for r in &rails {
        debug!(name = %r.name, length = r.length, position = ?r.position, "placed rail");
    }
    Subassembly::from_tubes("frame", rails, dims.epsilon)
}
