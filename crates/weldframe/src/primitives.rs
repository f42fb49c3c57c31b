//! Hollow square-tube primitive.
//!
//! Every structural member of the frame is a [`TubeSegment`]: a placement
//! descriptor that knows its nominal length and can lower itself into a
//! [`Part`] through [`hollow_tube`].

use crate::{centered_cube, Part};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis (frame length).
    X,
    /// Y axis (frame width).
    Y,
    /// Z axis (vertical).
    Z,
}

impl Axis {
    /// Box size with `along` on this axis and `across` on the other two.
    fn box_size(self, along: f64, across: f64) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::new(along, across, across),
            Axis::Y => Vector3::new(across, along, across),
            Axis::Z => Vector3::new(across, across, along),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Which point of a primitive sits at its local origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// The solid is centered on the origin in all three axes.
    Center,
    /// The solid's top face lies in `z = 0` and the solid extends downward;
    /// it stays centered in X and Y.
    Top,
}

/// Build a hollow square tube running along `axis`.
///
/// The outer prism has side `outer_side` and spans `length` along `axis`.
/// The bore (side `outer_side - 2 * wall`) is modeled `2 * epsilon` longer
/// so that it cuts cleanly through both end faces; the extra length never
/// shows up in the solid's bounds.
///
/// With [`Anchor::Center`] the tube spans `[-length/2, length/2]` along its
/// axis. With [`Anchor::Top`] its highest face sits at `z = 0`; for a
/// vertical tube that means it occupies `z` in `[-length, 0]`.
///
/// The caller is responsible for ensuring `outer_side - 2 * wall > 0`.
pub fn hollow_tube(
    name: &str,
    length: f64,
    outer_side: f64,
    wall: f64,
    axis: Axis,
    anchor: Anchor,
    epsilon: f64,
) -> Part {
    let outer = axis.box_size(length, outer_side);
    let bore_side = outer_side - 2.0 * wall;
    let bore = axis.box_size(length + 2.0 * epsilon, bore_side);

    let tube = centered_cube(name, outer.x, outer.y, outer.z)
        .difference(&centered_cube(format!("{name}_bore"), bore.x, bore.y, bore.z));
    let tube = match anchor {
        Anchor::Center => tube,
        Anchor::Top => tube.translate(0.0, 0.0, -outer.z / 2.0),
    };
    tube.renamed(name)
}

/// A placed length of square tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TubeSegment {
    /// Member name (e.g. `"leg_front_left"`).
    pub name: String,
    /// Running axis.
    pub axis: Axis,
    /// Nominal (cut) length.
    pub length: f64,
    /// Extra length modeled past each end to overlap a butt joint.
    /// Not part of the cut length.
    pub joint_allowance: f64,
    /// Outside width of the tube.
    pub outer_side: f64,
    /// Wall thickness.
    pub wall: f64,
    /// Local origin convention of the unplaced tube.
    pub anchor: Anchor,
    /// Translation applied to the anchored tube.
    pub position: [f64; 3],
}

impl TubeSegment {
    /// Side of the square bore.
    pub fn inner_side(&self) -> f64 {
        self.outer_side - 2.0 * self.wall
    }

    /// Length of the modeled solid, including joint allowances.
    pub fn modeled_length(&self) -> f64 {
        self.length + 2.0 * self.joint_allowance
    }

    /// Lower into a placed solid.
    pub fn to_part(&self, epsilon: f64) -> Part {
        let [x, y, z] = self.position;
        hollow_tube(
            &self.name,
            self.modeled_length(),
            self.outer_side,
            self.wall,
            self.axis,
            self.anchor,
            epsilon,
        )
        .translate(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn x_tube_is_centered() {
        let tube = hollow_tube("rail", 48.0, 1.125, 0.1, Axis::X, Anchor::Center, 0.01);
        let bb = tube.bounding_box().unwrap();
        assert_eq!(bb.min, Point3::new(-24.0, -0.5625, -0.5625));
        assert_eq!(bb.max, Point3::new(24.0, 0.5625, 0.5625));
        assert_eq!(tube.name, "rail");
        assert_eq!(tube.primitive_count(), 2);
    }

    #[test]
    fn y_tube_runs_along_y() {
        let tube = hollow_tube("rail", 19.75, 1.125, 0.1, Axis::Y, Anchor::Center, 0.01);
        let size = tube.bounding_box().unwrap().size();
        assert_eq!(size, Vector3::new(1.125, 19.75, 1.125));
    }

    #[test]
    fn vertical_tube_hangs_from_origin() {
        let tube = hollow_tube("leg", 32.0, 1.125, 0.1, Axis::Z, Anchor::Top, 0.01);
        let bb = tube.bounding_box().unwrap();
        assert_eq!(bb.max.z, 0.0);
        assert_eq!(bb.min.z, -32.0);
        assert_eq!(bb.center().x, 0.0);
        assert_eq!(bb.center().y, 0.0);
    }

    #[test]
    fn bore_is_longer_than_tube_but_bounds_are_not() {
        let tube = hollow_tube("t", 10.0, 2.0, 0.25, Axis::X, Anchor::Center, 0.5);
        let doc = tube.to_document();
        let bore = doc
            .nodes
            .values()
            .find_map(|n| match (&n.name, &n.op) {
                (Some(name), weldframe_ir::CsgOp::Cube { size }) if name == "t_bore" => Some(*size),
                _ => None,
            })
            .expect("bore cube");
        assert_eq!(bore.x, 11.0);
        assert_eq!(bore.y, 1.5);
        assert_eq!(bore.z, 1.5);
        assert_eq!(tube.bounding_box().unwrap().size().x, 10.0);
    }

    #[test]
    fn segment_lowering_applies_position_and_allowance() {
        let seg = TubeSegment {
            name: "short".to_string(),
            axis: Axis::Y,
            length: 19.75,
            joint_allowance: 0.01,
            outer_side: 1.125,
            wall: 0.1,
            anchor: Anchor::Center,
            position: [23.4375, 0.0, 0.0],
        };
        assert_relative_eq!(seg.inner_side(), 0.925, epsilon = 1e-12);
        assert_relative_eq!(seg.modeled_length(), 19.77, epsilon = 1e-12);
        let bb = seg.to_part(0.01).bounding_box().unwrap();
        assert_relative_eq!(bb.center().x, 23.4375, epsilon = 1e-12);
        assert_relative_eq!(bb.size().y, 19.77, epsilon = 1e-12);
    }
}
