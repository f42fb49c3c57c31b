//! Corner legs.

use crate::assembly::Subassembly;
use crate::dims::DimensionSet;
use crate::primitives::{Anchor, Axis, TubeSegment};
use tracing::{debug, instrument};

/// Build four vertical legs, one under each outer corner of the frame.
///
/// Each leg is centered on its corner at
/// `(±(outer_x/2 - tube_od/2), ±(outer_y/2 - tube_od/2))`, with its top face
/// on the frame underside (`z = -tube_od/2`), hanging down `leg_length` to
/// the floor plane. Returns `None` when legs are disabled.
#[instrument(skip_all, fields(leg_length = ?dims.leg_length))]
pub fn build_legs(dims: &DimensionSet) -> Option<Subassembly<TubeSegment>> {
    let length = dims.leg_length?;
    let od = dims.tube_od;
    let x = dims.outer_x / 2.0 - od / 2.0;
    let y = dims.outer_y / 2.0 - od / 2.0;
    let top = dims.frame_underside();

    let legs: Vec<TubeSegment> = [
        ("leg_front_left", -x, -y),
        ("leg_front_right", x, -y),
        ("leg_back_left", -x, y),
        ("leg_back_right", x, y),
    ]
    .into_iter()
    .map(|(name, x, y)| TubeSegment {
        name: name.to_string(),
        axis: Axis::Z,
        length,
        joint_allowance: 0.0,
        outer_side: od,
        wall: dims.wall,
        anchor: Anchor::Top,
        position: [x, y, top],
    })
    .collect();

    for leg in &legs {
        debug!(name = %leg.name, position = ?leg.position, "placed leg");
    }
    Some(Subassembly::from_tubes("legs", legs, dims.epsilon))
}
