//! Composition of the frame components into the final solid.
//!
//! Composition is a two-stage pipeline: every additive solid (frame, legs,
//! stretchers, tabs) is unioned in one reduction, then every subtractive
//! solid (tab holes) is removed in one difference.

use crate::dims::DimensionSet;
use crate::error::Result;
use crate::frame::build_frame;
use crate::legs::build_legs;
use crate::params::FrameParams;
use crate::primitives::TubeSegment;
use crate::stretchers::build_stretchers;
use crate::tabs::{build_tab_holes, build_tabs, Tab, TabHole};
use crate::{Aabb, Part, Scene};
use tracing::{info, instrument};
use weldframe_ir::{Document, MaterialDef};

/// lb/in^3 to kg/m^3.
const LB_PER_IN3_TO_KG_PER_M3: f64 = 27_679.904_710_2;

/// A group of placed members together with their combined solid.
#[derive(Debug, Clone)]
pub struct Subassembly<T> {
    /// Placement descriptors, in build order.
    pub members: Vec<T>,
    /// Union of every member's solid.
    pub part: Part,
}

impl<T> Subassembly<T> {
    /// Pair members with an already-built solid.
    pub fn new(members: Vec<T>, part: Part) -> Self {
        Self { members, part }
    }
}

impl Subassembly<TubeSegment> {
    /// Lower every tube and union them under `name`.
    pub fn from_tubes(name: &str, members: Vec<TubeSegment>, epsilon: f64) -> Self {
        let parts: Vec<Part> = members.iter().map(|m| m.to_part(epsilon)).collect();
        let part = Part::union_all(name, &parts);
        Self { members, part }
    }
}

/// Compose the final solid.
///
/// Unions the frame with whichever of legs, stretchers and tabs are
/// present, then subtracts the tab holes. Holes are ignored without tabs.
pub fn compose(
    frame: &Subassembly<TubeSegment>,
    legs: Option<&Subassembly<TubeSegment>>,
    stretchers: Option<&Subassembly<TubeSegment>>,
    tabs: Option<&Subassembly<Tab>>,
    tab_holes: Option<&Subassembly<TabHole>>,
) -> Part {
    let additive = additive_parts(frame, legs, stretchers, tabs);
    let body = Part::union_all("table_frame", additive);
    match subtractive_parts(tabs, tab_holes).as_slice() {
        [] => body,
        cutters => body
            .difference(&Part::union_all("tab_holes", cutters.iter().copied()))
            .renamed("table_frame"),
    }
}

fn additive_parts<'a>(
    frame: &'a Subassembly<TubeSegment>,
    legs: Option<&'a Subassembly<TubeSegment>>,
    stretchers: Option<&'a Subassembly<TubeSegment>>,
    tabs: Option<&'a Subassembly<Tab>>,
) -> Vec<&'a Part> {
    std::iter::once(&frame.part)
        .chain(legs.map(|s| &s.part))
        .chain(stretchers.map(|s| &s.part))
        .chain(tabs.map(|s| &s.part))
        .collect()
}

fn subtractive_parts<'a>(
    tabs: Option<&'a Subassembly<Tab>>,
    tab_holes: Option<&'a Subassembly<TabHole>>,
) -> Vec<&'a Part> {
    match (tabs, tab_holes) {
        (Some(_), Some(holes)) => vec![&holes.part],
        _ => Vec::new(),
    }
}

/// The complete table frame: every component plus the composed solid.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Dimensions the assembly was built from.
    pub dims: DimensionSet,
    /// Top perimeter rails.
    pub frame: Subassembly<TubeSegment>,
    /// Corner legs.
    pub legs: Option<Subassembly<TubeSegment>>,
    /// Lower stretchers.
    pub stretchers: Option<Subassembly<TubeSegment>>,
    /// Plywood-support tabs.
    pub tabs: Option<Subassembly<Tab>>,
    /// Tab hole cutters.
    pub tab_holes: Option<Subassembly<TabHole>>,
    /// Final composed solid.
    pub solid: Part,
}

impl Assembly {
    /// Validate `params` and build the assembly.
    pub fn from_params(params: &FrameParams) -> Result<Self> {
        Ok(Self::build(DimensionSet::resolve(params)?))
    }

    /// Build every component from resolved dimensions and compose them.
    #[instrument(skip_all, fields(units = %dims.units))]
    pub fn build(dims: DimensionSet) -> Self {
        let frame = build_frame(&dims);
        let legs = build_legs(&dims);
        let stretchers = build_stretchers(&dims);
        let tabs = build_tabs(&dims);
        let tab_holes = build_tab_holes(&dims);
        let solid = compose(
            &frame,
            legs.as_ref(),
            stretchers.as_ref(),
            tabs.as_ref(),
            tab_holes.as_ref(),
        );
        info!(
            primitives = solid.primitive_count(),
            legs = legs.is_some(),
            stretchers = stretchers.is_some(),
            tabs = tabs.is_some(),
            holes = tab_holes.is_some(),
            "composed table frame"
        );
        Self {
            dims,
            frame,
            legs,
            stretchers,
            tabs,
            tab_holes,
            solid,
        }
    }

    /// Solids unioned into the body, in union order.
    pub fn additive(&self) -> Vec<&Part> {
        additive_parts(
            &self.frame,
            self.legs.as_ref(),
            self.stretchers.as_ref(),
            self.tabs.as_ref(),
        )
    }

    /// Solids subtracted from the body after the union.
    pub fn subtractive(&self) -> Vec<&Part> {
        subtractive_parts(self.tabs.as_ref(), self.tab_holes.as_ref())
    }

    /// Every tube member: rails, then legs, then stretchers.
    pub fn tube_segments(&self) -> impl Iterator<Item = &TubeSegment> {
        self.frame
            .members
            .iter()
            .chain(self.legs.iter().flat_map(|s| s.members.iter()))
            .chain(self.stretchers.iter().flat_map(|s| s.members.iter()))
    }

    /// Bounds of the composed solid.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.solid.bounding_box()
    }

    /// Render material for the stock, with density in kg/m^3.
    pub fn material(&self) -> MaterialDef {
        MaterialDef {
            name: self.dims.material.clone(),
            color: [0.55, 0.56, 0.58],
            metallic: 1.0,
            roughness: 0.5,
            density: Some(self.dims.density * LB_PER_IN3_TO_KG_PER_M3),
        }
    }

    /// IR document with the composed solid as its single root.
    pub fn to_document(&self) -> Document {
        let mut doc = self.solid.to_document();
        let material = self.material();
        for root in &mut doc.roots {
            root.material = material.name.clone();
        }
        doc.materials.insert(material.name.clone(), material);
        doc
    }

    /// Scene with one root per component, for renderers that want to show
    /// them separately. Tab holes are cut from the tabs root.
    pub fn to_scene(&self) -> Scene {
        let key = self.dims.material.clone();
        let mut scene = Scene::new("table_frame");
        scene.add(self.frame.part.clone(), key.as_str());
        if let Some(legs) = &self.legs {
            scene.add(legs.part.clone(), key.as_str());
        }
        if let Some(stretchers) = &self.stretchers {
            scene.add(stretchers.part.clone(), key.as_str());
        }
        if let Some(tabs) = &self.tabs {
            let part = match &self.tab_holes {
                Some(holes) => tabs.part.difference(&holes.part).renamed("tabs"),
                None => tabs.part.clone(),
            };
            scene.add(part, key.as_str());
        }
        scene
    }

    /// Scene document including the material definition.
    pub fn to_scene_document(&self) -> Document {
        let mut doc = self.to_scene().to_document();
        let material = self.material();
        doc.materials.insert(material.name.clone(), material);
        doc
    }
}
