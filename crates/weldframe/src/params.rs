//! Frame parameters: the single input to every component.
//!
//! All lengths are inches; density is pounds per cubic inch. Parameters are
//! loaded from TOML, with every missing key falling back to its default.
//!
//! ```toml
//! [frame]
//! outer_x = 48.0
//! outer_y = 22.0
//!
//! [stretchers]
//! height_above_floor = 8.0
//!
//! [tabs]
//! holes = true
//! ```

use crate::error::{ConfigError, Result};
use crate::primitives::Axis;
use crate::units::Units;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Perimeter frame footprint and tube stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameSpec {
    /// Outer length along X.
    pub outer_x: f64,
    /// Outer width along Y.
    pub outer_y: f64,
    /// Outside width of the square tube.
    pub tube_od: f64,
    /// Tube wall thickness.
    pub wall: f64,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            outer_x: 48.0,
            outer_y: 22.0,
            tube_od: 1.125,
            wall: 0.100,
        }
    }
}

/// Corner legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegParams {
    /// Add four legs.
    pub enabled: bool,
    /// Leg length below the frame underside.
    pub length: f64,
}

impl Default for LegParams {
    fn default() -> Self {
        Self {
            enabled: true,
            length: 32.0,
        }
    }
}

/// Lower perimeter stretchers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StretcherParams {
    /// Add four stretchers.
    pub enabled: bool,
    /// Height of the stretcher underside above the floor.
    pub height_above_floor: f64,
    /// Relief removed from each end.
    pub end_gap: f64,
    /// Length each end embeds into its leg.
    pub end_overlap: f64,
}

impl Default for StretcherParams {
    fn default() -> Self {
        Self {
            enabled: true,
            height_above_floor: 6.0,
            end_gap: 0.0,
            end_overlap: 0.25,
        }
    }
}

/// Plywood panel resting on the tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlywoodParams {
    /// Panel thickness.
    pub thickness: f64,
    /// Installation gap between the panel underside and the tabs.
    pub clearance: f64,
    /// Drop of the panel top below the frame top.
    pub recess: f64,
}

impl Default for PlywoodParams {
    fn default() -> Self {
        Self {
            thickness: 0.75,
            clearance: 0.0,
            recess: 0.0,
        }
    }
}

/// Plywood-support tabs and their optional fastener holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabParams {
    /// Add two tabs to each inner wall.
    pub enabled: bool,
    /// Tab length along its wall.
    pub length: f64,
    /// Tab reach inward from its wall.
    pub depth: f64,
    /// Tab plate thickness.
    pub thickness: f64,
    /// Distance from the inner corner to each tab center.
    pub edge_margin: f64,
    /// Punch a fastener hole through every tab.
    pub holes: bool,
    /// Hole diameter.
    pub hole_diameter: f64,
    /// Hole center distance from the wall face.
    pub hole_inset: f64,
    /// Circular segments used for each hole.
    pub hole_segments: u32,
}

impl Default for TabParams {
    fn default() -> Self {
        Self {
            enabled: true,
            length: 1.0,
            depth: 1.0,
            thickness: 0.125,
            edge_margin: 5.0,
            holes: false,
            hole_diameter: 0.25,
            hole_inset: 0.5,
            hole_segments: 32,
        }
    }
}

/// Stock material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialParams {
    /// Material name for reports.
    pub name: String,
    /// Density in lb/in^3.
    pub density: f64,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            name: "steel".to_string(),
            density: 0.283,
        }
    }
}

/// Model output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    /// Unit system of the emitted solid.
    pub units: Units,
    /// Boolean-robustness overlap, in model units. Never reported.
    pub epsilon: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            units: Units::Millimeters,
            epsilon: 0.01,
        }
    }
}

/// Complete, immutable parameter set for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameParams {
    /// Footprint and tube stock.
    pub frame: FrameSpec,
    /// Corner legs.
    pub legs: LegParams,
    /// Lower stretchers.
    pub stretchers: StretcherParams,
    /// Plywood panel.
    pub plywood: PlywoodParams,
    /// Support tabs.
    pub tabs: TabParams,
    /// Stock material.
    pub material: MaterialParams,
    /// Output model settings.
    pub model: ModelParams,
}

fn finite(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if finite(name, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl FrameParams {
    /// Parse parameters from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render parameters as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject every parameter combination that would produce a degenerate
    /// or self-intersecting frame.
    ///
    /// Checks run from the frame outward: tube stock, footprint, legs,
    /// stretchers, plywood, tabs, holes, material, model settings. The
    /// first violation found is returned.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let f = &self.frame;
        let outer_x = positive("frame.outer_x", f.outer_x)?;
        let outer_y = positive("frame.outer_y", f.outer_y)?;
        let od = positive("frame.tube_od", f.tube_od)?;
        let wall = positive("frame.wall", f.wall)?;

        let bore = od - 2.0 * wall;
        if bore <= 0.0 {
            return Err(ConfigError::WallTooThick {
                wall,
                tube_od: od,
                bore,
            });
        }
        let inner_x = outer_x - 2.0 * od;
        let inner_y = outer_y - 2.0 * od;
        for (axis, outer, inner) in [(Axis::X, outer_x, inner_x), (Axis::Y, outer_y, inner_y)] {
            if inner <= 0.0 {
                return Err(ConfigError::NoInnerOpening {
                    axis,
                    outer,
                    tube_od: od,
                    inner,
                });
            }
        }

        if self.legs.enabled {
            positive("legs.length", self.legs.length)?;
        }

        if self.stretchers.enabled {
            if !self.legs.enabled {
                return Err(ConfigError::StretchersWithoutLegs);
            }
            let s = &self.stretchers;
            let height = non_negative("stretchers.height_above_floor", s.height_above_floor)?;
            let gap = non_negative("stretchers.end_gap", s.end_gap)?;
            let overlap = non_negative("stretchers.end_overlap", s.end_overlap)?;
            if overlap >= od {
                return Err(ConfigError::OverlapThroughLeg {
                    overlap,
                    tube_od: od,
                });
            }
            for (axis, span) in [(Axis::X, inner_x), (Axis::Y, inner_y)] {
                let length = span - 2.0 * gap + 2.0 * overlap;
                if length <= 0.0 {
                    return Err(ConfigError::StretcherTooShort {
                        axis,
                        length,
                        span,
                        gap,
                        overlap,
                    });
                }
            }
            let top = height + od;
            if top > self.legs.length {
                return Err(ConfigError::StretcherAboveLegs {
                    top,
                    leg_length: self.legs.length,
                });
            }
        }

        let ply = non_negative("plywood.thickness", self.plywood.thickness)?;
        let clearance = non_negative("plywood.clearance", self.plywood.clearance)?;
        let recess = non_negative("plywood.recess", self.plywood.recess)?;

        if self.tabs.enabled {
            let t = &self.tabs;
            let length = positive("tabs.length", t.length)?;
            let depth = positive("tabs.depth", t.depth)?;
            let thickness = positive("tabs.thickness", t.thickness)?;
            let margin = finite("tabs.edge_margin", t.edge_margin)?;

            if margin < length / 2.0 {
                return Err(ConfigError::TabPastWallEnd {
                    edge_margin: margin,
                    tab_length: length,
                });
            }
            for (axis, span) in [(Axis::X, inner_x), (Axis::Y, inner_y)] {
                let spacing = 2.0 * (span / 2.0 - margin);
                if spacing <= length {
                    return Err(ConfigError::TabsOverlap {
                        axis,
                        spacing,
                        tab_length: length,
                        edge_margin: margin,
                    });
                }
            }
            // The first tab on a wall starts `margin - length/2` from the
            // corner; the tab on the adjacent wall reaches `depth` out of it.
            let corner_gap = margin - length / 2.0;
            if corner_gap < depth {
                return Err(ConfigError::TabsCollideAtCorner {
                    corner_gap,
                    depth,
                });
            }
            // Front/back tabs reach across Y, left/right tabs across X.
            for (axis, span) in [(Axis::Y, inner_y), (Axis::X, inner_x)] {
                if depth >= span / 2.0 {
                    return Err(ConfigError::TabTooDeep {
                        axis,
                        depth,
                        half_span: span / 2.0,
                    });
                }
            }

            let rail_top = od / 2.0;
            let rail_bottom = -od / 2.0;
            let top = rail_top - recess - ply - clearance;
            let bottom = top - thickness;
            if top > rail_top || bottom < rail_bottom {
                return Err(ConfigError::TabOutsideRail {
                    bottom,
                    top,
                    rail_bottom,
                    rail_top,
                });
            }

            if t.holes {
                let diameter = positive("tabs.hole_diameter", t.hole_diameter)?;
                let inset = finite("tabs.hole_inset", t.hole_inset)?;
                let r = diameter / 2.0;
                if inset - r <= 0.0 || inset + r >= depth || diameter >= length {
                    return Err(ConfigError::HoleOutsideTab {
                        diameter,
                        inset,
                        length,
                        depth,
                    });
                }
                if t.hole_segments < 3 {
                    return Err(ConfigError::TooFewSegments(t.hole_segments));
                }
            }
        }

        if self.material.name.trim().is_empty() {
            return Err(ConfigError::EmptyMaterialName);
        }
        positive("material.density", self.material.density)?;
        let epsilon = positive("model.epsilon", self.model.epsilon)?;
        // Allowances embed short rails and tabs `epsilon` into a wall.
        let epsilon_in = self.model.units.from_model(epsilon);
        if epsilon_in >= wall {
            return Err(ConfigError::EpsilonTooLarge {
                epsilon: epsilon_in,
                wall,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FrameParams::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let params = FrameParams::from_toml_str(
            r#"
            [frame]
            outer_x = 60.0

            [tabs]
            holes = true

            [model]
            units = "inches"
            "#,
        )
        .unwrap();
        assert_eq!(params.frame.outer_x, 60.0);
        assert_eq!(params.frame.outer_y, 22.0);
        assert!(params.tabs.holes);
        assert_eq!(params.tabs.length, 1.0);
        assert_eq!(params.model.units, Units::Inches);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = FrameParams::from_toml_str("[frame]\nouter_z = 3.0\n").unwrap_err();
        assert!(err.to_string().contains("outer_z"), "{err}");
    }

    #[test]
    fn toml_roundtrip() {
        let params = FrameParams::default();
        let text = params.to_toml_string().unwrap();
        assert_eq!(FrameParams::from_toml_str(&text).unwrap(), params);
    }

    #[test]
    fn wall_at_half_od_is_rejected() {
        let mut params = FrameParams::default();
        params.frame.wall = params.frame.tube_od / 2.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::WallTooThick { .. })
        ));
    }

    #[test]
    fn tube_wider_than_footprint_is_rejected() {
        let mut params = FrameParams::default();
        params.frame.outer_y = 2.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NoInnerOpening { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let mut params = FrameParams::default();
        params.frame.outer_x = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NotFinite {
                name: "frame.outer_x",
                ..
            })
        ));
    }

    #[test]
    fn stretchers_need_legs() {
        let mut params = FrameParams::default();
        params.legs.enabled = false;
        assert_eq!(params.validate(), Err(ConfigError::StretchersWithoutLegs));

        params.stretchers.enabled = false;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn overlap_through_leg_is_rejected() {
        let mut params = FrameParams::default();
        params.stretchers.end_overlap = params.frame.tube_od;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::OverlapThroughLeg { .. })
        ));
    }

    #[test]
    fn huge_gap_is_rejected() {
        let mut params = FrameParams::default();
        params.stretchers.end_gap = 12.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::StretcherTooShort { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn stretcher_above_legs_is_rejected() {
        let mut params = FrameParams::default();
        params.stretchers.height_above_floor = 31.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::StretcherAboveLegs { .. })
        ));
    }

    #[test]
    fn excessive_edge_margin_is_rejected() {
        let mut params = FrameParams::default();
        // inner_y = 19.75, so centers at +/-(9.875 - 9.5) are 0.75 apart.
        params.tabs.edge_margin = 9.5;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::TabsOverlap { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn tiny_edge_margin_is_rejected() {
        let mut params = FrameParams::default();
        params.tabs.edge_margin = 0.25;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::TabPastWallEnd { .. })
        ));
    }

    #[test]
    fn corner_tabs_must_not_collide() {
        let mut params = FrameParams::default();
        // Tab runs from 0 to 1 along the front wall; the left tab reaches 1 in.
        params.tabs.edge_margin = 0.5;
        assert_eq!(
            params.validate(),
            Err(ConfigError::TabsCollideAtCorner {
                corner_gap: 0.0,
                depth: 1.0
            })
        );

        // Faces touching at the corner are fine.
        params.tabs.edge_margin = 1.5;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn epsilon_must_stay_inside_the_wall() {
        let mut params = FrameParams::default();
        params.model.units = Units::Inches;
        params.model.epsilon = 2.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::EpsilonTooLarge { wall, .. }) if wall == 0.1
        ));

        // Millimeter epsilon is compared after conversion: 2 mm < 0.1 in.
        params.model.units = Units::Millimeters;
        assert!(params.validate().is_ok());
        params.model.epsilon = 5.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::EpsilonTooLarge { .. })
        ));
    }

    #[test]
    fn thick_plywood_pushes_tabs_below_rail() {
        let mut params = FrameParams::default();
        params.plywood.thickness = 1.1;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::TabOutsideRail { .. })
        ));
    }

    #[test]
    fn hole_must_fit_in_tab() {
        let mut params = FrameParams::default();
        params.tabs.holes = true;
        assert!(params.validate().is_ok());

        params.tabs.hole_inset = 0.9;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::HoleOutsideTab { .. })
        ));
    }

    #[test]
    fn hole_checks_skipped_when_disabled() {
        let mut params = FrameParams::default();
        params.tabs.hole_diameter = -1.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn density_must_be_positive() {
        let mut params = FrameParams::default();
        params.material.density = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NotPositive {
                name: "material.density",
                ..
            })
        ));
    }
}
