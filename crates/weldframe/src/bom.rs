//! Bill of materials.
//!
//! The report is derived from the same dimensions as the solid but never
//! from the solid itself. Every value is in inches and pounds regardless of
//! the model units.

use crate::dims::DimensionSet;
use crate::error::Result;
use crate::params::FrameParams;
use crate::primitives::Axis;
use crate::units::Units;
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

/// Kind of part a BOM line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartClass {
    /// Top rail running the full outer length.
    FrameLongRail,
    /// Top rail fitted between the long rails.
    FrameShortRail,
    /// Corner leg.
    Leg,
    /// Stretcher running along X.
    StretcherX,
    /// Stretcher running along Y.
    StretcherY,
    /// Plywood-support tab.
    Tab,
}

impl PartClass {
    /// Report label.
    pub fn label(self) -> &'static str {
        match self {
            PartClass::FrameLongRail => "Frame long rail",
            PartClass::FrameShortRail => "Frame short rail",
            PartClass::Leg => "Leg",
            PartClass::StretcherX => "Stretcher X",
            PartClass::StretcherY => "Stretcher Y",
            PartClass::Tab => "Tab",
        }
    }

    /// Whether the part is cut from tube stock.
    pub fn is_tube(self) -> bool {
        !matches!(self, PartClass::Tab)
    }
}

impl fmt::Display for PartClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nominal size of one piece, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartSize {
    /// Tube cut to length.
    Cut {
        /// Cut length.
        length: f64,
    },
    /// Rectangular plate.
    Plate {
        /// Length along the wall.
        length: f64,
        /// Inward reach.
        width: f64,
        /// Plate thickness.
        thickness: f64,
    },
}

impl PartSize {
    /// Volume of one piece in cubic inches, for plates.
    pub fn plate_volume(&self) -> Option<f64> {
        match *self {
            PartSize::Cut { .. } => None,
            PartSize::Plate {
                length,
                width,
                thickness,
            } => Some(length * width * thickness),
        }
    }
}

impl fmt::Display for PartSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSize::Cut { length } => write!(f, "{length:.3} in"),
            PartSize::Plate {
                length,
                width,
                thickness,
            } => write!(f, "{length:.3} x {width:.3} x {thickness:.3} in"),
        }
    }
}

/// One line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomEntry {
    /// Part class.
    pub part: PartClass,
    /// Number of identical pieces.
    pub quantity: u32,
    /// Nominal length of one piece (cut length, or tab length along the wall).
    pub length_in: f64,
    /// Full nominal size.
    pub size: PartSize,
    /// Stock description.
    pub stock: String,
}

impl BomEntry {
    /// Combined length of all pieces.
    pub fn total_length_in(&self) -> f64 {
        f64::from(self.quantity) * self.length_in
    }
}

/// Aggregate totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BomTotals {
    /// Total tube length in inches.
    pub tube_length_in: f64,
    /// Total tube length in feet.
    pub tube_length_ft: f64,
    /// Tube cross-section area in square inches.
    pub cross_section_area_in2: f64,
    /// Weight of all tube pieces.
    pub tube_weight_lb: f64,
    /// Weight of all tabs.
    pub tab_weight_lb: f64,
    /// Tube plus tab weight.
    pub total_weight_lb: f64,
}

/// Bill of materials for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomReport {
    /// Material name.
    pub material: String,
    /// Material density in lb/in^3.
    pub density_lb_in3: f64,
    /// Entries in fixed part-class order; disabled classes are omitted.
    pub entries: Vec<BomEntry>,
    /// Aggregates.
    pub totals: BomTotals,
    /// Inner opening along X (informational).
    pub inner_x_in: f64,
    /// Inner opening along Y (informational).
    pub inner_y_in: f64,
}

/// Hollow square tube cross-section area.
pub fn tube_cross_section(outer_side: f64, wall: f64) -> f64 {
    let bore = outer_side - 2.0 * wall;
    outer_side * outer_side - bore * bore
}

impl BomReport {
    /// Validate `params` and build the report in inches.
    pub fn from_params(params: &FrameParams) -> Result<Self> {
        let dims = DimensionSet::resolve_in(params, Units::Inches)?;
        Ok(Self::from_dimensions(&dims))
    }

    /// Build the report from resolved dimensions, converting back to inches
    /// when they are in another unit system.
    #[instrument(skip_all, fields(material = %dims.material))]
    pub fn from_dimensions(dims: &DimensionSet) -> Self {
        let inch = |v: f64| dims.units.from_model(v);
        let od = inch(dims.tube_od);
        let wall = inch(dims.wall);
        let tube_stock = format!("{od:.3} in sq tube x {wall:.3} in wall");
        let cut = |part, quantity, length: f64| BomEntry {
            part,
            quantity,
            length_in: length,
            size: PartSize::Cut { length },
            stock: tube_stock.clone(),
        };

        let mut entries = vec![
            cut(PartClass::FrameLongRail, 2, inch(dims.outer_x)),
            cut(PartClass::FrameShortRail, 2, inch(dims.outer_y - 2.0 * dims.tube_od)),
        ];
        if let Some(length) = dims.leg_length {
            entries.push(cut(PartClass::Leg, 4, inch(length)));
        }
        if let (Some(_), Some(x), Some(y)) = (
            dims.floor_z(),
            dims.stretcher_length(Axis::X),
            dims.stretcher_length(Axis::Y),
        ) {
            entries.push(cut(PartClass::StretcherX, 2, inch(x)));
            entries.push(cut(PartClass::StretcherY, 2, inch(y)));
        }
        if let Some(t) = dims.tabs {
            let size = PartSize::Plate {
                length: inch(t.length),
                width: inch(t.depth),
                thickness: inch(t.thickness),
            };
            entries.push(BomEntry {
                part: PartClass::Tab,
                quantity: 8,
                length_in: inch(t.length),
                size,
                stock: format!("{:.3} in plate", inch(t.thickness)),
            });
        }

        let area = tube_cross_section(od, wall);
        let tube_length_in: f64 = entries
            .iter()
            .filter(|e| e.part.is_tube())
            .map(BomEntry::total_length_in)
            .sum();
        let tab_volume: f64 = entries
            .iter()
            .filter_map(|e| e.size.plate_volume().map(|v| f64::from(e.quantity) * v))
            .sum();
        let tube_weight_lb = area * tube_length_in * dims.density;
        let tab_weight_lb = tab_volume * dims.density;
        let totals = BomTotals {
            tube_length_in,
            tube_length_ft: tube_length_in / 12.0,
            cross_section_area_in2: area,
            tube_weight_lb,
            tab_weight_lb,
            total_weight_lb: tube_weight_lb + tab_weight_lb,
        };
        info!(
            entries = entries.len(),
            tube_length_in,
            total_weight_lb = totals.total_weight_lb,
            "computed bill of materials"
        );

        Self {
            material: dims.material.clone(),
            density_lb_in3: dims.density,
            entries,
            totals,
            inner_x_in: inch(dims.inner_x),
            inner_y_in: inch(dims.inner_y),
        }
    }

    /// Entry for a part class, if present.
    pub fn entry(&self, part: PartClass) -> Option<&BomEntry> {
        self.entries.iter().find(|e| e.part == part)
    }

    /// Render the report as text lines: material, one line per entry,
    /// tube length, weights, then the inner opening.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 6);
        lines.push(format!(
            "Material: {} ({:.3} lb/in^3)",
            self.material, self.density_lb_in3
        ));
        for e in &self.entries {
            lines.push(format!(
                "{}: {} @ {}, {}",
                e.part, e.quantity, e.size, e.stock
            ));
        }
        let t = &self.totals;
        lines.push(format!(
            "Total tube length: {:.3} in ({:.3} ft)",
            t.tube_length_in, t.tube_length_ft
        ));
        lines.push(format!("Tube weight: {:.2} lb", t.tube_weight_lb));
        lines.push(format!("Tab weight: {:.2} lb", t.tab_weight_lb));
        lines.push(format!("Total weight: {:.2} lb", t.total_weight_lb));
        lines.push(format!(
            "Inner opening: {:.3} x {:.3} in",
            self.inner_x_in, self.inner_y_in
        ));
        lines
    }
}
