//! Error types for frame generation.

use crate::primitives::Axis;
use thiserror::Error;

/// A parameter combination that cannot produce a valid frame.
///
/// Lengths are reported in inches, as the parameters were given.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter is NaN or infinite.
    #[error("{name} must be a finite number, got {value}")]
    NotFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A parameter that must be strictly positive is not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A parameter that must not be negative is.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The tube wall leaves no bore.
    #[error("wall ({wall}) must be less than half of tube_od ({tube_od}); tube bore would be {bore}")]
    WallTooThick {
        /// Wall thickness.
        wall: f64,
        /// Tube outer side.
        tube_od: f64,
        /// Resulting bore side (`tube_od - 2 * wall`).
        bore: f64,
    },

    /// The tube is too large for the outer footprint.
    #[error("outer_{axis} ({outer}) minus two tube_od ({tube_od}) leaves inner opening {inner}")]
    NoInnerOpening {
        /// Axis of the footprint.
        axis: Axis,
        /// Outer footprint length.
        outer: f64,
        /// Tube outer side.
        tube_od: f64,
        /// Resulting inner opening.
        inner: f64,
    },

    /// Stretchers are placed relative to the floor, which only legs define.
    #[error("stretchers require legs to be enabled")]
    StretchersWithoutLegs,

    /// The stretcher would pierce the far wall of the leg.
    #[error("end_overlap ({overlap}) must be less than tube_od ({tube_od})")]
    OverlapThroughLeg {
        /// Requested overlap.
        overlap: f64,
        /// Tube outer side.
        tube_od: f64,
    },

    /// Gap and overlap leave no stretcher.
    #[error("stretcher along {axis} has non-positive length {length} (inner span {span}, end_gap {gap}, end_overlap {overlap})")]
    StretcherTooShort {
        /// Running axis of the stretcher.
        axis: Axis,
        /// Resulting length.
        length: f64,
        /// Inner span the stretcher bridges.
        span: f64,
        /// End gap.
        gap: f64,
        /// End overlap.
        overlap: f64,
    },

    /// The stretcher would stick out above the top of the legs.
    #[error("stretcher top ({top} above floor) exceeds leg_length ({leg_length})")]
    StretcherAboveLegs {
        /// Height of the stretcher top above the floor.
        top: f64,
        /// Leg length.
        leg_length: f64,
    },

    /// Tabs on one wall collide.
    #[error("tabs along {axis} overlap: centers {spacing} apart but tab length is {tab_length} (edge_margin {edge_margin})")]
    TabsOverlap {
        /// Running axis of the wall.
        axis: Axis,
        /// Distance between the two tab centers.
        spacing: f64,
        /// Tab length.
        tab_length: f64,
        /// Edge margin.
        edge_margin: f64,
    },

    /// A tab hangs past the end of its wall.
    #[error("edge_margin ({edge_margin}) is less than half the tab length ({tab_length}); tab runs past the wall end")]
    TabPastWallEnd {
        /// Edge margin.
        edge_margin: f64,
        /// Tab length.
        tab_length: f64,
    },

    /// Tabs on adjacent walls would meet in a corner.
    #[error("tabs collide at the corners: first tab starts {corner_gap} from the corner but tab_depth is {depth}; raise edge_margin")]
    TabsCollideAtCorner {
        /// Distance from the inner corner to the nearest tab end
        /// (`edge_margin - length / 2`).
        corner_gap: f64,
        /// Tab depth.
        depth: f64,
    },

    /// Tabs from opposite walls would meet.
    #[error("tab_depth ({depth}) reaches half of the inner span along {axis} ({half_span})")]
    TabTooDeep {
        /// Axis across which the opposite walls face each other.
        axis: Axis,
        /// Tab depth.
        depth: f64,
        /// Half of the inner span.
        half_span: f64,
    },

    /// The tab slab does not sit on the rail's inner wall.
    #[error("tab slab [{bottom}, {top}] leaves the rail height [{rail_bottom}, {rail_top}]; check plywood thickness, clearance and recess")]
    TabOutsideRail {
        /// Tab bottom plane.
        bottom: f64,
        /// Tab top plane.
        top: f64,
        /// Rail underside plane.
        rail_bottom: f64,
        /// Rail top plane.
        rail_top: f64,
    },

    /// The fastener hole does not fit inside the tab.
    #[error("hole (diameter {diameter}, inset {inset}) does not fit inside a {length} x {depth} tab")]
    HoleOutsideTab {
        /// Hole diameter.
        diameter: f64,
        /// Hole center distance from the wall face.
        inset: f64,
        /// Tab length.
        length: f64,
        /// Tab depth.
        depth: f64,
    },

    /// Too few segments to approximate a round hole.
    #[error("hole_segments must be at least 3, got {0}")]
    TooFewSegments(u32),

    /// The boolean overlap would push parts through a tube wall.
    #[error("model.epsilon ({epsilon} in) must be less than the tube wall ({wall})")]
    EpsilonTooLarge {
        /// Epsilon converted to inches.
        epsilon: f64,
        /// Tube wall thickness.
        wall: f64,
    },

    /// Material needs a name for the report and the scene.
    #[error("material name must not be empty")]
    EmptyMaterialName,
}

/// Errors returned by weldframe operations.
#[derive(Error, Debug)]
pub enum FrameError {
    /// The parameters describe an invalid frame.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// An I/O error occurred while reading parameters.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid TOML for [`crate::FrameParams`].
    #[error("failed to parse parameters: {0}")]
    Parse(#[from] toml::de::Error),
    /// Parameters could not be written as TOML.
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for weldframe operations.
pub type Result<T> = std::result::Result<T, FrameError>;
