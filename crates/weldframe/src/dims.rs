//! Resolved dimensions in model units.
//!
//! A [`DimensionSet`] is the single source of truth for every builder: all
//! placement math reads from it and nothing else. It can only be obtained
//! through [`DimensionSet::resolve`], which validates the parameters first.

use crate::error::ConfigError;
use crate::params::FrameParams;
use crate::primitives::Axis;
use crate::units::Units;

/// Stretcher dimensions, present when stretchers are enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretcherDims {
    /// Height of the stretcher underside above the floor.
    pub height_above_floor: f64,
    /// Relief removed from each end.
    pub end_gap: f64,
    /// Embedment of each end into its leg.
    pub end_overlap: f64,
}

/// Fastener hole dimensions, present when holes are enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleDims {
    /// Hole diameter.
    pub diameter: f64,
    /// Hole center distance from the wall face.
    pub inset: f64,
    /// Circular segments.
    pub segments: u32,
}

/// Tab dimensions, present when tabs are enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabDims {
    /// Length along the wall.
    pub length: f64,
    /// Reach inward from the wall.
    pub depth: f64,
    /// Plate thickness.
    pub thickness: f64,
    /// Distance from the inner corner to each tab center.
    pub edge_margin: f64,
    /// Optional fastener hole.
    pub hole: Option<HoleDims>,
}

/// Every length needed to build the frame, converted to model units.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSet {
    /// Unit system the lengths are expressed in.
    pub units: Units,
    /// Boolean-robustness overlap (model units).
    pub epsilon: f64,
    /// Outer length along X.
    pub outer_x: f64,
    /// Outer width along Y.
    pub outer_y: f64,
    /// Inner opening along X (`outer_x - 2 * tube_od`).
    pub inner_x: f64,
    /// Inner opening along Y (`outer_y - 2 * tube_od`).
    pub inner_y: f64,
    /// Outside width of the square tube.
    pub tube_od: f64,
    /// Tube wall thickness.
    pub wall: f64,
    /// Leg length, when legs are enabled.
    pub leg_length: Option<f64>,
    /// Stretcher settings, when enabled.
    pub stretchers: Option<StretcherDims>,
    /// Plywood thickness.
    pub ply_thickness: f64,
    /// Plywood installation clearance.
    pub ply_clearance: f64,
    /// Plywood recess below the frame top.
    pub recess: f64,
    /// Tab settings, when enabled.
    pub tabs: Option<TabDims>,
    /// Material name.
    pub material: String,
    /// Material density in lb/in^3 (never converted).
    pub density: f64,
}

impl DimensionSet {
    /// Validate `params` and convert them to the configured model units.
    pub fn resolve(params: &FrameParams) -> Result<Self, ConfigError> {
        Self::resolve_in(params, params.model.units)
    }

    /// Validate `params` and convert them to `units`.
    ///
    /// The epsilon is taken as-is: it is always expressed in the units of
    /// the emitted model.
    pub fn resolve_in(params: &FrameParams, units: Units) -> Result<Self, ConfigError> {
        params.validate()?;
        let m = |inches: f64| units.to_model(inches);
        let f = &params.frame;

        let stretchers = params.stretchers.enabled.then(|| StretcherDims {
            height_above_floor: m(params.stretchers.height_above_floor),
            end_gap: m(params.stretchers.end_gap),
            end_overlap: m(params.stretchers.end_overlap),
        });

        let t = &params.tabs;
        let tabs = t.enabled.then(|| TabDims {
            length: m(t.length),
            depth: m(t.depth),
            thickness: m(t.thickness),
            edge_margin: m(t.edge_margin),
            hole: t.holes.then(|| HoleDims {
                diameter: m(t.hole_diameter),
                inset: m(t.hole_inset),
                segments: t.hole_segments,
            }),
        });

        Ok(Self {
            units,
            epsilon: params.model.epsilon,
            outer_x: m(f.outer_x),
            outer_y: m(f.outer_y),
            inner_x: m(f.outer_x - 2.0 * f.tube_od),
            inner_y: m(f.outer_y - 2.0 * f.tube_od),
            tube_od: m(f.tube_od),
            wall: m(f.wall),
            leg_length: params.legs.enabled.then(|| m(params.legs.length)),
            stretchers,
            ply_thickness: m(params.plywood.thickness),
            ply_clearance: m(params.plywood.clearance),
            recess: m(params.plywood.recess),
            tabs,
            material: params.material.name.clone(),
            density: params.material.density,
        })
    }

    /// Side of the square bore (`tube_od - 2 * wall`).
    pub fn tube_bore(&self) -> f64 {
        self.tube_od - 2.0 * self.wall
    }

    /// Outer footprint along a horizontal axis.
    pub fn outer(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.outer_x,
            Axis::Y => self.outer_y,
            Axis::Z => self.tube_od,
        }
    }

    /// Inner opening along a horizontal axis.
    pub fn inner(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.inner_x,
            Axis::Y => self.inner_y,
            Axis::Z => 0.0,
        }
    }

    /// Top plane of the frame rails.
    pub fn frame_top(&self) -> f64 {
        self.tube_od / 2.0
    }

    /// Underside plane of the frame rails, where the legs begin.
    pub fn frame_underside(&self) -> f64 {
        -self.tube_od / 2.0
    }

    /// Floor plane, or `None` without legs.
    pub fn floor_z(&self) -> Option<f64> {
        self.leg_length.map(|leg| self.frame_underside() - leg)
    }

    /// Center plane of the stretchers, when both legs and stretchers exist.
    pub fn stretcher_center_z(&self) -> Option<f64> {
        let floor = self.floor_z()?;
        let s = self.stretchers?;
        Some(floor + s.height_above_floor + self.tube_od / 2.0)
    }

    /// Nominal stretcher length along `axis`:
    /// `inner_span - 2 * end_gap + 2 * end_overlap`.
    pub fn stretcher_length(&self, axis: Axis) -> Option<f64> {
        let s = self.stretchers?;
        Some(self.inner(axis) - 2.0 * s.end_gap + 2.0 * s.end_overlap)
    }

    /// Plane where the plywood underside meets the tabs.
    pub fn tab_top_z(&self) -> f64 {
        self.frame_top() - self.recess - self.ply_thickness - self.ply_clearance
    }

    /// Signed along-wall offsets of the two tab centers on a wall running
    /// along `axis`: `±(span / 2 - edge_margin)`.
    pub fn tab_centers(&self, axis: Axis) -> Option<[f64; 2]> {
        let t = self.tabs?;
        let c = self.inner(axis) / 2.0 - t.edge_margin;
        Some([-c, c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inch_dims() -> DimensionSet {
        DimensionSet::resolve_in(&FrameParams::default(), Units::Inches).unwrap()
    }

    #[test]
    fn inner_opening_is_outer_minus_two_tubes() {
        let d = inch_dims();
        assert_eq!(d.inner_x, 45.75);
        assert_eq!(d.inner_y, 19.75);
        assert_relative_eq!(d.tube_bore(), 0.925, epsilon = 1e-12);
    }

    #[test]
    fn millimeter_resolution_scales_lengths() {
        let d = DimensionSet::resolve(&FrameParams::default()).unwrap();
        assert_eq!(d.units, Units::Millimeters);
        assert_relative_eq!(d.outer_x, 1219.2, epsilon = 1e-9);
        assert_relative_eq!(d.inner_x, 45.75 * 25.4, epsilon = 1e-9);
        assert_eq!(d.epsilon, 0.01);
        assert_eq!(d.density, 0.283);
    }

    #[test]
    fn vertical_reference_planes() {
        let d = inch_dims();
        assert_eq!(d.frame_underside(), -0.5625);
        assert_eq!(d.floor_z(), Some(-32.5625));
        assert_eq!(d.stretcher_center_z(), Some(-32.5625 + 6.0 + 0.5625));
        assert_eq!(d.tab_top_z(), 0.5625 - 0.75);
    }

    #[test]
    fn stretcher_length_law() {
        let d = inch_dims();
        assert_eq!(d.stretcher_length(Axis::X), Some(46.25));
        assert_eq!(d.stretcher_length(Axis::Y), Some(20.25));
    }

    #[test]
    fn tab_centers_are_symmetric() {
        let d = inch_dims();
        assert_eq!(d.tab_centers(Axis::X), Some([-17.875, 17.875]));
        assert_eq!(d.tab_centers(Axis::Y), Some([-4.875, 4.875]));
    }

    #[test]
    fn disabled_features_resolve_to_none() {
        let mut params = FrameParams::default();
        params.stretchers.enabled = false;
        params.legs.enabled = false;
        params.tabs.enabled = false;
        let d = DimensionSet::resolve(&params).unwrap();
        assert!(d.floor_z().is_none());
        assert!(d.stretcher_center_z().is_none());
        assert!(d.stretcher_length(Axis::X).is_none());
        assert!(d.tab_centers(Axis::X).is_none());
    }

    #[test]
    fn resolve_rejects_invalid_params() {
        let mut params = FrameParams::default();
        params.frame.wall = 0.6;
        assert!(matches!(
            DimensionSet::resolve(&params),
            Err(ConfigError::WallTooThick { .. })
        ));
    }
}
