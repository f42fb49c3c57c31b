//! Intermediate representation for weldframe solids.
//!
//! This crate defines the DAG-based IR handed to export and render
//! collaborators. The IR is purely declarative: no mesh data, just a graph
//! of CSG operations over boxes and cylinders. Evaluation (meshing, boolean
//! solving) happens outside this workspace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Unique identifier for a node in the IR graph.
pub type NodeId = u64;

/// 3D vector with f64 components (in model units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// CSG operation, the building block of the IR DAG.
///
/// Each variant is either a leaf primitive or a combining/transform operation
/// that references child nodes by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CsgOp {
    /// Axis-aligned box with one corner at the origin, spanning `[0, size]`.
    Cube {
        /// Size along each axis.
        size: Vec3,
    },
    /// Cylinder along +Z from `z = 0` to `z = height`, centered on the Z axis.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Height of the cylinder.
        height: f64,
        /// Number of circular segments (0 = auto).
        segments: u32,
    },
    /// Empty geometry (identity for union).
    Empty,
    /// Boolean union of two geometries.
    Union {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Boolean difference (left minus right).
    Difference {
        /// Left operand (base).
        left: NodeId,
        /// Right operand (subtracted).
        right: NodeId,
    },
    /// Translation by an offset vector.
    Translate {
        /// Child node to translate.
        child: NodeId,
        /// Translation offset.
        offset: Vec3,
    },
    /// Rotation by Euler angles in degrees (applied as X, then Y, then Z).
    Rotate {
        /// Child node to rotate.
        child: NodeId,
        /// Rotation angles in degrees.
        angles: Vec3,
    },
}

impl CsgOp {
    /// Child node ids referenced by this operation, in operand order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            CsgOp::Cube { .. } | CsgOp::Cylinder { .. } | CsgOp::Empty => Vec::new(),
            CsgOp::Union { left, right } | CsgOp::Difference { left, right } => {
                vec![*left, *right]
            }
            CsgOp::Translate { child, .. } | CsgOp::Rotate { child, .. } => vec![*child],
        }
    }
}

/// A node in the IR graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Optional human-readable name.
    pub name: Option<String>,
    /// The operation this node represents.
    pub op: CsgOp,
}

/// PBR material definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Material name (e.g. "steel").
    pub name: String,
    /// Base color as `[r, g, b]` in 0.0..1.0.
    pub color: [f64; 3],
    /// Metallic factor (0.0 = dielectric, 1.0 = metal).
    pub metallic: f64,
    /// Roughness factor (0.0 = mirror, 1.0 = diffuse).
    pub roughness: f64,
    /// Density in kg/m^3.
    pub density: Option<f64>,
}

/// An entry in the scene: a root node with an assigned material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Root node of this scene part.
    pub root: NodeId,
    /// Material key referencing a [`MaterialDef::name`].
    pub material: String,
}

/// Structural problems found by [`Document::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrError {
    /// A node is stored under a key that differs from its own id.
    #[error("node stored under key {key} has id {id}")]
    KeyMismatch {
        /// Map key.
        key: NodeId,
        /// Id recorded in the node.
        id: NodeId,
    },
    /// A node or scene entry references a node that does not exist.
    #[error("node {from} references missing node {missing}")]
    DanglingReference {
        /// Referencing node (0 for a scene entry).
        from: NodeId,
        /// Missing node id.
        missing: NodeId,
    },
    /// A node references a child with an equal or larger id.
    #[error("node {parent} references child {child} that is not built before it")]
    ForwardReference {
        /// Parent node.
        parent: NodeId,
        /// Offending child.
        child: NodeId,
    },
    /// A scene entry names a material with no definition.
    #[error("scene entry for node {root} uses undefined material '{material}'")]
    UnknownMaterial {
        /// Root node of the entry.
        root: NodeId,
        /// Material key.
        material: String,
    },
}

/// A weldframe document, the JSON hand-off format.
///
/// Contains the full IR DAG, material definitions, and scene assembly.
/// Nodes and materials are kept in ordered maps so that serializing the
/// same model twice produces identical text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// All nodes in the graph, keyed by [`NodeId`].
    pub nodes: BTreeMap<NodeId, Node>,
    /// Material definitions, keyed by name.
    pub materials: BTreeMap<String, MaterialDef>,
    /// Scene entries (assembled parts with materials).
    pub roots: Vec<SceneEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            nodes: BTreeMap::new(),
            materials: BTreeMap::new(),
            roots: Vec::new(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Largest node id in use, or 0 for an empty document.
    pub fn max_id(&self) -> NodeId {
        self.nodes.keys().next_back().copied().unwrap_or(0)
    }

    /// Check that the graph is well formed.
    ///
    /// Children must exist and carry smaller ids than their parents, which
    /// also rules out cycles. Every scene entry must point at an existing
    /// node; if any materials are defined, scene entries must use one of them.
    pub fn validate(&self) -> Result<(), IrError> {
        for (&key, node) in &self.nodes {
            if key != node.id {
                return Err(IrError::KeyMismatch { key, id: node.id });
            }
            for child in node.op.children() {
                if !self.nodes.contains_key(&child) {
                    return Err(IrError::DanglingReference {
                        from: key,
                        missing: child,
                    });
                }
                if child >= key {
                    return Err(IrError::ForwardReference { parent: key, child });
                }
            }
        }
        for entry in &self.roots {
            if !self.nodes.contains_key(&entry.root) {
                return Err(IrError::DanglingReference {
                    from: 0,
                    missing: entry.root,
                });
            }
            if !self.materials.is_empty() && !self.materials.contains_key(&entry.material) {
                return Err(IrError::UnknownMaterial {
                    root: entry.root,
                    material: entry.material.clone(),
                });
            }
        }
        Ok(())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tube_document() -> Document {
        let mut doc = Document::new();
        doc.nodes.insert(
            1,
            Node {
                id: 1,
                name: Some("outer".to_string()),
                op: CsgOp::Cube {
                    size: Vec3::new(48.0, 1.125, 1.125),
                },
            },
        );
        doc.nodes.insert(
            2,
            Node {
                id: 2,
                name: Some("bore".to_string()),
                op: CsgOp::Cube {
                    size: Vec3::new(48.02, 0.925, 0.925),
                },
            },
        );
        doc.nodes.insert(
            3,
            Node {
                id: 3,
                name: Some("bore".to_string()),
                op: CsgOp::Translate {
                    child: 2,
                    offset: Vec3::new(-0.01, 0.1, 0.1),
                },
            },
        );
        doc.nodes.insert(
            4,
            Node {
                id: 4,
                name: Some("rail".to_string()),
                op: CsgOp::Difference { left: 1, right: 3 },
            },
        );
        doc.materials.insert(
            "steel".to_string(),
            MaterialDef {
                name: "steel".to_string(),
                color: [0.55, 0.56, 0.58],
                metallic: 1.0,
                roughness: 0.5,
                density: Some(7833.4),
            },
        );
        doc.roots.push(SceneEntry {
            root: 4,
            material: "steel".to_string(),
        });
        doc
    }

    #[test]
    fn roundtrip_document() {
        let doc = tube_document();
        let json = doc.to_json().expect("serialize");
        let restored = Document::from_json(&json).expect("deserialize");

        assert_eq!(doc, restored);
        assert_eq!(restored.nodes.len(), 4);
        assert_eq!(restored.materials.len(), 1);
        assert_eq!(restored.roots.len(), 1);
    }

    #[test]
    fn serialization_is_stable() {
        let a = tube_document().to_json().unwrap();
        let b = tube_document().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert_eq!(doc.version, "0.1");
        assert!(doc.nodes.is_empty());
        assert!(doc.materials.is_empty());
        assert!(doc.roots.is_empty());
        assert_eq!(doc.max_id(), 0);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn serde_tagged_enum() {
        let op = CsgOp::Cube {
            size: Vec3::new(1.0, 2.0, 3.0),
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains(r#""type":"Cube""#));

        let restored: CsgOp = serde_json::from_str(&json).unwrap();
        assert_eq!(op, restored);
    }

    #[test]
    fn validate_accepts_well_formed_graph() {
        let doc = tube_document();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.max_id(), 4);
        assert_eq!(doc.node(4).unwrap().op.children(), vec![1, 3]);
    }

    #[test]
    fn validate_rejects_dangling_child() {
        let mut doc = tube_document();
        doc.nodes.remove(&3);
        assert_eq!(
            doc.validate(),
            Err(IrError::DanglingReference {
                from: 4,
                missing: 3
            })
        );
    }

    #[test]
    fn validate_rejects_forward_reference() {
        let mut doc = tube_document();
        doc.nodes.insert(
            5,
            Node {
                id: 5,
                name: None,
                op: CsgOp::Empty,
            },
        );
        doc.nodes.get_mut(&3).unwrap().op = CsgOp::Translate {
            child: 5,
            offset: Vec3::new(0.0, 0.0, 0.0),
        };
        assert_eq!(
            doc.validate(),
            Err(IrError::ForwardReference {
                parent: 3,
                child: 5
            })
        );
    }

    #[test]
    fn validate_rejects_unknown_material() {
        let mut doc = tube_document();
        doc.roots[0].material = "oak".to_string();
        assert!(matches!(
            doc.validate(),
            Err(IrError::UnknownMaterial { root: 4, .. })
        ));
    }
}
