//! Plywood-support tabs and their fastener holes.
//!
//! Tabs and holes are placed from the same list of tab sites, so a hole is
//! always centered on its tab even though holes are only subtracted after
//! the whole frame has been unioned.

use crate::assembly::Subassembly;
use crate::dims::{DimensionSet, TabDims};
use crate::primitives::Axis;
use crate::{centered_cube, Part};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// One of the four inner walls of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    /// Inner face of the front (-Y) long rail.
    Front,
    /// Inner face of the back (+Y) long rail.
    Back,
    /// Inner face of the left (-X) short rail.
    Left,
    /// Inner face of the right (+X) short rail.
    Right,
}

impl Wall {
    /// All walls in placement order.
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Back, Wall::Left, Wall::Right];

    /// Axis the wall runs along.
    pub fn running_axis(self) -> Axis {
        match self {
            Wall::Front | Wall::Back => Axis::X,
            Wall::Left | Wall::Right => Axis::Y,
        }
    }

    /// Axis across the opening, perpendicular to the wall.
    pub fn inward_axis(self) -> Axis {
        match self {
            Wall::Front | Wall::Back => Axis::Y,
            Wall::Left | Wall::Right => Axis::X,
        }
    }

    fn side(self) -> f64 {
        match self {
            Wall::Front | Wall::Left => -1.0,
            Wall::Back | Wall::Right => 1.0,
        }
    }

    /// Plan position `[x, y]` of a point `along` the wall (from its midpoint)
    /// and `inset` in from its face.
    pub fn plan_point(self, dims: &DimensionSet, along: f64, inset: f64) -> [f64; 2] {
        let face = dims.inner(self.inward_axis()) / 2.0;
        let across = self.side() * (face - inset);
        match self.running_axis() {
            Axis::X => [along, across],
            _ => [across, along],
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Wall::Front => "front",
            Wall::Back => "back",
            Wall::Left => "left",
            Wall::Right => "right",
        })
    }
}

/// A flat support ledge welded to an inner wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab name (e.g. `"tab_front_1"`).
    pub name: String,
    /// Wall the tab is welded to.
    pub wall: Wall,
    /// Offset of the tab center from the wall midpoint, along the wall.
    pub along: f64,
    /// Length along the wall.
    pub length: f64,
    /// Reach inward from the wall.
    pub depth: f64,
    /// Plate thickness.
    pub thickness: f64,
    /// Nominal center of the plate.
    pub center: [f64; 3],
}

impl Tab {
    /// Top plane of the plate.
    pub fn top_z(&self) -> f64 {
        self.center[2] + self.thickness / 2.0
    }

    /// Lower into a placed solid. The plate is modeled `epsilon` deeper so
    /// that it embeds into its wall.
    pub fn to_part(&self, dims: &DimensionSet) -> Part {
        let eps = dims.epsilon;
        let depth = self.depth + eps;
        let [x, y] = self
            .wall
            .plan_point(dims, self.along, (self.depth - eps) / 2.0);
        let (sx, sy) = match self.wall.running_axis() {
            Axis::X => (self.length, depth),
            _ => (depth, self.length),
        };
        centered_cube(self.name.as_str(), sx, sy, self.thickness).translate(x, y, self.center[2])
    }
}

/// A round fastener hole through a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabHole {
    /// Hole name (matches its tab, with a `_hole` suffix).
    pub name: String,
    /// Wall of the tab.
    pub wall: Wall,
    /// Hole diameter.
    pub diameter: f64,
    /// Center distance from the wall face.
    pub inset: f64,
    /// Plan center `[x, y]`.
    pub center: [f64; 2],
    /// Bottom plane of the tab it passes through.
    pub bottom_z: f64,
    /// Thickness of the tab it passes through.
    pub depth: f64,
    /// Circular segments.
    pub segments: u32,
}

impl TabHole {
    /// Lower into a placed cutter, `epsilon` proud of both tab faces.
    pub fn to_part(&self, epsilon: f64) -> Part {
        let [x, y] = self.center;
        Part::cylinder(
            self.name.as_str(),
            self.diameter / 2.0,
            self.depth + 2.0 * epsilon,
            self.segments,
        )
        .translate(x, y, self.bottom_z - epsilon)
    }
}

/// Tab sites: wall, along-wall offset and name, two per wall.
fn tab_sites(dims: &DimensionSet) -> Vec<(Wall, f64, String)> {
    Wall::ALL
        .into_iter()
        .flat_map(|wall| {
            let centers = dims.tab_centers(wall.running_axis()).unwrap_or_default();
            centers
                .into_iter()
                .enumerate()
                .map(move |(i, along)| (wall, along, format!("tab_{wall}_{i}")))
        })
        .collect()
}

fn place_tab(dims: &DimensionSet, t: &TabDims, wall: Wall, along: f64, name: String) -> Tab {
    let [x, y] = wall.plan_point(dims, along, t.depth / 2.0);
    let z = dims.tab_top_z() - t.thickness / 2.0;
    Tab {
        name,
        wall,
        along,
        length: t.length,
        depth: t.depth,
        thickness: t.thickness,
        center: [x, y, z],
    }
}

/// Build the eight support tabs, two per inner wall.
///
/// Tab tops sit on the plywood underside:
/// `tube_od/2 - recess - ply_thickness - ply_clearance`. On each wall the
/// tab centers are at `±(span/2 - edge_margin)` along the wall, where span
/// is `inner_x` for the front/back walls and `inner_y` for left/right.
/// Returns `None` when tabs are disabled.
#[instrument(skip_all, fields(tab_top = dims.tab_top_z()))]
pub fn build_tabs(dims: &DimensionSet) -> Option<Subassembly<Tab>> {
    let t = dims.tabs?;
    let tabs: Vec<Tab> = tab_sites(dims)
        .into_iter()
        .map(|(wall, along, name)| place_tab(dims, &t, wall, along, name))
        .collect();
    for tab in &tabs {
        debug!(name = %tab.name, center = ?tab.center, "placed tab");
    }
    let parts: Vec<Part> = tabs.iter().map(|tab| tab.to_part(dims)).collect();
    Some(Subassembly::new(tabs, Part::union_all("tabs", &parts)))
}

/// Build the hole cutters, one per tab.
///
/// Each hole is centered `hole_inset` from the wall face and on its tab's
/// along-wall center. Returns `None` unless tabs and holes are both enabled.
#[instrument(skip_all)]
pub fn build_tab_holes(dims: &DimensionSet) -> Option<Subassembly<TabHole>> {
    let t = dims.tabs?;
    let hole = t.hole?;
    let bottom_z = dims.tab_top_z() - t.thickness;
    let holes: Vec<TabHole> = tab_sites(dims)
        .into_iter()
        .map(|(wall, along, name)| TabHole {
            name: format!("{name}_hole"),
            wall,
            diameter: hole.diameter,
            inset: hole.inset,
            center: wall.plan_point(dims, along, hole.inset),
            bottom_z,
            depth: t.thickness,
            segments: hole.segments,
        })
        .collect();
    for h in &holes {
        debug!(name = %h.name, center = ?h.center, "placed tab hole");
    }
    let parts: Vec<Part> = holes.iter().map(|h| h.to_part(dims.epsilon)).collect();
    Some(Subassembly::new(holes, Part::union_all("tab_holes", &parts)))
}
