#![warn(missing_docs)]

//! weldframe: parametric welded table frame generator.
//!
//! Builds the CSG solid of a rectangular square-tube table frame with legs,
//! perimeter stretchers and plywood-support tabs, and derives its bill of
//! materials from the same parameters.
//!
//! # Example
//!
//! ```rust,no_run
//! use weldframe::{Assembly, BomReport, FrameParams};
//!
//! let params = FrameParams::default();
//! let assembly = Assembly::from_params(&params).unwrap();
//! let json = assembly.to_document().to_json().unwrap();
//! let bom = BomReport::from_params(&params).unwrap();
//! for line in bom.lines() {
//!     println!("{line}");
//! }
//! # let _ = json;
//! ```

use nalgebra::{Point3, Rotation3, Vector3};
use std::sync::Arc;
use weldframe_ir::{CsgOp, Document, Node, NodeId, SceneEntry, Vec3 as IrVec3};

pub mod assembly;
pub mod bom;
pub mod dims;
pub mod error;
pub mod frame;
pub mod legs;
pub mod params;
pub mod primitives;
pub mod stretchers;
pub mod tabs;
pub mod units;

pub use assembly::{compose, Assembly, Subassembly};
pub use bom::{BomEntry, BomReport, BomTotals, PartClass, PartSize};
pub use dims::DimensionSet;
pub use error::{ConfigError, FrameError, Result};
pub use params::FrameParams;
pub use primitives::{hollow_tube, Anchor, Axis, TubeSegment};
pub use tabs::{Tab, TabHole, Wall};
pub use units::Units;

// =============================================================================
// Bounding boxes
// =============================================================================

/// Axis-aligned bounding box in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box spanning two corners (in any order).
    pub fn from_corners(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Smallest box containing both.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Whether `other` lies entirely inside this box, allowing `tol` slack.
    pub fn contains(&self, other: &Aabb, tol: f64) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] - tol && other.max[i] <= self.max[i] + tol)
    }

    fn translated(&self, offset: Vector3<f64>) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    fn rotated(&self, rotation: &Rotation3<f64>) -> Aabb {
        let (lo, hi) = (self.min, self.max);
        let mut corners = (0..8).map(|i| {
            rotation
                * Point3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                )
        });
        // Eight corners always present.
        let first = corners.next().unwrap_or(lo);
        corners.fold(Aabb::from_corners(first, first), |acc, p| {
            acc.merge(&Aabb::from_corners(p, p))
        })
    }
}

// =============================================================================
// Part: a named CSG expression
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Empty,
    Cube {
        size: Vector3<f64>,
    },
    Cylinder {
        radius: f64,
        height: f64,
        segments: u32,
    },
    Union(Arc<Part>, Arc<Part>),
    Difference(Arc<Part>, Arc<Part>),
    Translate(Arc<Part>, Vector3<f64>),
    Rotate(Arc<Part>, Vector3<f64>),
}

/// A named part with geometry.
///
/// Parts are the building block of every frame component. Create primitives
/// with [`Part::cube`] and [`Part::cylinder`], then combine them with
/// [`Part::union`] / [`Part::difference`] or the operator shorthands (`+`,
/// `-`). A part is an immutable expression tree; transforms and booleans
/// return new parts that share their operands.
///
/// Lower a part to the IR with [`Part::to_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Human-readable name (carried into IR node names).
    pub name: String,
    shape: Shape,
}

impl Part {
    fn with_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    // =========================================================================
    // Public constructors
    // =========================================================================

    /// Create an empty part.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_shape(name, Shape::Empty)
    }

    /// Create a box with one corner at the origin, spanning `[0, x] x [0, y] x [0, z]`.
    pub fn cube(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::with_shape(
            name,
            Shape::Cube {
                size: Vector3::new(x, y, z),
            },
        )
    }

    /// Create a cylinder along +Z from `z = 0` to `z = height`.
    pub fn cylinder(name: impl Into<String>, radius: f64, height: f64, segments: u32) -> Self {
        Self::with_shape(
            name,
            Shape::Cylinder {
                radius,
                height,
                segments,
            },
        )
    }

    // =========================================================================
    // CSG operations
    // =========================================================================

    /// Boolean difference (self - other).
    pub fn difference(&self, other: &Part) -> Self {
        Self::with_shape(
            format!("{}-diff", self.name),
            Shape::Difference(Arc::new(self.clone()), Arc::new(other.clone())),
        )
    }

    /// Boolean union (self + other).
    pub fn union(&self, other: &Part) -> Self {
        Self::with_shape(
            format!("{}-union", self.name),
            Shape::Union(Arc::new(self.clone()), Arc::new(other.clone())),
        )
    }

    /// Union of every part in `parts`, left to right.
    ///
    /// Returns an empty part named `name` when `parts` is empty; a single
    /// part is returned renamed but otherwise unchanged.
    pub fn union_all<'a>(name: &str, parts: impl IntoIterator<Item = &'a Part>) -> Part {
        let mut iter = parts.into_iter();
        let Some(first) = iter.next() else {
            return Part::empty(name);
        };
        iter.fold(first.clone(), |acc, part| acc.union(part))
            .renamed(name)
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate the part.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Self {
        self.translate_vec(Vector3::new(x, y, z))
    }

    /// Translate by vector.
    pub fn translate_vec(&self, v: Vector3<f64>) -> Self {
        Self::with_shape(
            self.name.clone(),
            Shape::Translate(Arc::new(self.clone()), v),
        )
    }

    /// Rotate the part (angles in degrees, applied X then Y then Z).
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self::with_shape(
            self.name.clone(),
            Shape::Rotate(Arc::new(self.clone()), Vector3::new(x_deg, y_deg, z_deg)),
        )
    }

    /// Same geometry under a new name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True when the part contributes no primitive solids at all.
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    /// Number of cube and cylinder leaves in the expression.
    pub fn primitive_count(&self) -> usize {
        match &self.shape {
            Shape::Empty => 0,
            Shape::Cube { .. } | Shape::Cylinder { .. } => 1,
            Shape::Union(a, b) | Shape::Difference(a, b) => {
                a.primitive_count() + b.primitive_count()
            }
            Shape::Translate(child, _) | Shape::Rotate(child, _) => child.primitive_count(),
        }
    }

    /// Axis-aligned bounding box, or `None` for an empty part.
    ///
    /// Differences report the bounds of their base operand, so material
    /// removed by a subtraction never widens the box.
    pub fn bounding_box(&self) -> Option<Aabb> {
        match &self.shape {
            Shape::Empty => None,
            Shape::Cube { size } => Some(Aabb::from_corners(
                Point3::origin(),
                Point3::from(*size),
            )),
            Shape::Cylinder { radius, height, .. } => Some(Aabb::from_corners(
                Point3::new(-radius, -radius, 0.0),
                Point3::new(*radius, *radius, *height),
            )),
            Shape::Union(a, b) => match (a.bounding_box(), b.bounding_box()) {
                (Some(a), Some(b)) => Some(a.merge(&b)),
                (a, b) => a.or(b),
            },
            Shape::Difference(a, _) => a.bounding_box(),
            Shape::Translate(child, offset) => {
                child.bounding_box().map(|bb| bb.translated(*offset))
            }
            Shape::Rotate(child, angles) => {
                let rotation = Rotation3::from_euler_angles(
                    angles.x.to_radians(),
                    angles.y.to_radians(),
                    angles.z.to_radians(),
                );
                child.bounding_box().map(|bb| bb.rotated(&rotation))
            }
        }
    }

    // =========================================================================
    // IR lowering
    // =========================================================================

    /// Lower this part into IR nodes, returning the root id.
    ///
    /// Ids are assigned in post-order starting after the largest id already
    /// in `doc`, so children always precede their parents.
    pub fn lower_into(&self, doc: &mut Document) -> NodeId {
        let op = match &self.shape {
            Shape::Empty => CsgOp::Empty,
            Shape::Cube { size } => CsgOp::Cube {
                size: IrVec3::new(size.x, size.y, size.z),
            },
            Shape::Cylinder {
                radius,
                height,
                segments,
            } => CsgOp::Cylinder {
                radius: *radius,
                height: *height,
                segments: *segments,
            },
            Shape::Union(a, b) => {
                let left = a.lower_into(doc);
                let right = b.lower_into(doc);
                CsgOp::Union { left, right }
            }
            Shape::Difference(a, b) => {
                let left = a.lower_into(doc);
                let right = b.lower_into(doc);
                CsgOp::Difference { left, right }
            }
            Shape::Translate(child, offset) => CsgOp::Translate {
                child: child.lower_into(doc),
                offset: IrVec3::new(offset.x, offset.y, offset.z),
            },
            Shape::Rotate(child, angles) => CsgOp::Rotate {
                child: child.lower_into(doc),
                angles: IrVec3::new(angles.x, angles.y, angles.z),
            },
        };
        let id = doc.max_id() + 1;
        doc.nodes.insert(
            id,
            Node {
                id,
                name: Some(self.name.clone()),
                op,
            },
        );
        id
    }

    /// Extract the IR document for this part.
    ///
    /// The document contains all nodes in this part's construction DAG
    /// with this part's root node as the single scene entry. Identical parts
    /// always lower to identical documents.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        let root = self.lower_into(&mut doc);
        doc.roots.push(SceneEntry {
            root,
            material: "default".to_string(),
        });
        doc
    }
}

/// Helper to create a box centered at the origin.
pub fn centered_cube(name: impl Into<String>, x: f64, y: f64, z: f64) -> Part {
    Part::cube(name, x, y, z).translate(-x / 2.0, -y / 2.0, -z / 2.0)
}

/// Helper to create a cylinder centered at the origin.
pub fn centered_cylinder(name: impl Into<String>, radius: f64, height: f64, segments: u32) -> Part {
    Part::cylinder(name, radius, height, segments).translate(0.0, 0.0, -height / 2.0)
}

// =============================================================================
// Operator overloads for ergonomic CSG
// =============================================================================

/// Union: `&a + &b`
impl std::ops::Add for &Part {
    type Output = Part;
    fn add(self, rhs: &Part) -> Part {
        self.union(rhs)
    }
}

/// Union: `a + b`
impl std::ops::Add for Part {
    type Output = Part;
    fn add(self, rhs: Part) -> Part {
        self.union(&rhs)
    }
}

/// Difference: `&a - &b`
impl std::ops::Sub for &Part {
    type Output = Part;
    fn sub(self, rhs: &Part) -> Part {
        self.difference(rhs)
    }
}

/// Difference: `a - b`
impl std::ops::Sub for Part {
    type Output = Part;
    fn sub(self, rhs: Part) -> Part {
        self.difference(&rhs)
    }
}

// =============================================================================
// Scene (multi-part assembly with materials)
// =============================================================================

/// A scene node containing a part with its material assignment.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// The geometry for this node.
    pub part: Part,
    /// Material key for this node.
    pub material_key: String,
}

impl SceneNode {
    /// Create a new scene node with a part and material key.
    pub fn new(part: Part, material_key: impl Into<String>) -> Self {
        Self {
            part,
            material_key: material_key.into(),
        }
    }
}

/// A scene containing multiple parts.
///
/// Unlike [`Part::union`], which merges geometry into a single solid, a
/// scene keeps each part as its own root so renderers can treat them
/// separately.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Name of the scene.
    pub name: String,
    /// Ordered list of parts with their material assignments.
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a part with its material key.
    pub fn add(&mut self, part: Part, material_key: impl Into<String>) {
        self.nodes.push(SceneNode::new(part, material_key));
    }

    /// Get total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Extract the IR document for the full scene (multi-root).
    ///
    /// Each scene node becomes a root entry in the document with its
    /// assigned material key.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for scene_node in &self.nodes {
            let root = scene_node.part.lower_into(&mut doc);
            doc.roots.push(SceneEntry {
                root,
                material: scene_node.material_key.clone(),
            });
        }
        doc
    }
}
