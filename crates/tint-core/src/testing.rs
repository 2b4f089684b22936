//! Test fixtures: shape builders and a kernel that replays scripted results

use std::collections::{HashMap, VecDeque};

use glam::{DAffine3, DVec3};
use parking_lot::Mutex;
use tint_cad::{
    BooleanType, CadError, CadKernel, CadResult, EdgeInfo, FaceInfo, Placement, Solid, SurfaceKind,
    VertexInfo,
};

use crate::fingerprint::Fingerprinter;
use crate::snapshot::Snapshot;

pub(crate) fn p(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}

/// Straight segment with its endpoints in lexicographic order, so that both
/// faces sharing it report the same curve
pub(crate) fn line(a: DVec3, b: DVec3) -> EdgeInfo {
    let key = |v: DVec3| (v.x, v.y, v.z);
    if key(a) <= key(b) {
        EdgeInfo::line(a, b)
    } else {
        EdgeInfo::line(b, a)
    }
}

/// Closed loop through four corners
pub(crate) fn quad_loop(corners: [DVec3; 4]) -> Vec<EdgeInfo> {
    (0..4).map(|i| line(corners[i], corners[(i + 1) % 4])).collect()
}

/// Full circle in a plane normal to Z, with its seam on the +X side
pub(crate) fn circle_loop(center: DVec3, radius: f64) -> Vec<EdgeInfo> {
    vec![EdgeInfo::circle(center + DVec3::X * radius, radius)]
}

/// Planar face from an outer loop and any inner loops
pub(crate) fn plane(loops: Vec<Vec<EdgeInfo>>, center: DVec3, normal: DVec3) -> FaceInfo {
    FaceInfo::new(
        SurfaceKind::Plane,
        loops.into_iter().flatten().collect(),
        Placement::new(center, normal),
        center,
    )
}

fn quad(corners: [DVec3; 4], normal: DVec3) -> FaceInfo {
    let center = corners.iter().copied().sum::<DVec3>() / 4.0;
    plane(vec![quad_loop(corners)], center, normal)
}

/// Corners of an axis-aligned box, indexed by `[x][y][z]` with 0 = min
fn corners(min: DVec3, max: DVec3) -> [[[DVec3; 2]; 2]; 2] {
    let pick = |i: usize, lo: f64, hi: f64| if i == 0 { lo } else { hi };
    std::array::from_fn(|i| {
        std::array::from_fn(|j| {
            std::array::from_fn(|k| {
                p(pick(i, min.x, max.x), pick(j, min.y, max.y), pick(k, min.z, max.z))
            })
        })
    })
}

/// Faces of an axis-aligned box: -X, +X, -Y, +Y, -Z, +Z
pub(crate) fn box_faces(min: DVec3, max: DVec3) -> Vec<FaceInfo> {
    let c = corners(min, max);
    vec![
        quad([c[0][0][0], c[0][1][0], c[0][1][1], c[0][0][1]], -DVec3::X),
        quad([c[1][0][0], c[1][1][0], c[1][1][1], c[1][0][1]], DVec3::X),
        quad([c[0][0][0], c[1][0][0], c[1][0][1], c[0][0][1]], -DVec3::Y),
        quad([c[0][1][0], c[1][1][0], c[1][1][1], c[0][1][1]], DVec3::Y),
        quad([c[0][0][0], c[1][0][0], c[1][1][0], c[0][1][0]], -DVec3::Z),
        quad([c[0][0][1], c[1][0][1], c[1][1][1], c[0][1][1]], DVec3::Z),
    ]
}

/// Lateral surface of a Z-aligned cylinder
pub(crate) fn cylinder_wall(base: DVec3, radius: f64, height: f64) -> FaceInfo {
    let top = base + DVec3::Z * height;
    let mut edges = circle_loop(base, radius);
    edges.extend(circle_loop(top, radius));
    edges.push(line(base + DVec3::X * radius, top + DVec3::X * radius));
    FaceInfo::new(
        SurfaceKind::Cylinder,
        edges,
        Placement::new(base, DVec3::Z),
        base + DVec3::Z * (height / 2.0),
    )
}

/// Wall, bottom cap and top cap of a Z-aligned cylinder
pub(crate) fn cylinder_faces(base: DVec3, radius: f64, height: f64) -> Vec<FaceInfo> {
    let top = base + DVec3::Z * height;
    vec![
        cylinder_wall(base, radius, height),
        plane(vec![circle_loop(base, radius)], base, -DVec3::Z),
        plane(vec![circle_loop(top, radius)], top, DVec3::Z),
    ]
}

/// Distinct boundary curves of the faces, in face order
pub(crate) fn edges_of(faces: &[FaceInfo]) -> Vec<EdgeInfo> {
    let mut edges: Vec<EdgeInfo> = Vec::new();
    for edge in faces.iter().flat_map(|f| &f.edges) {
        if !edges.contains(edge) {
            edges.push(edge.clone());
        }
    }
    edges
}

/// Distinct vertices of the faces, in face order
pub(crate) fn vertices_of(faces: &[FaceInfo]) -> Vec<VertexInfo> {
    let mut vertices: Vec<VertexInfo> = Vec::new();
    for point in faces.iter().flat_map(|f| f.vertices()) {
        if !vertices.iter().any(|v| v.point == point) {
            vertices.push(VertexInfo::new(point));
        }
    }
    vertices
}

/// Snapshot of a face list at default precision
pub(crate) fn snapshot_of(faces: &[FaceInfo]) -> Snapshot {
    Snapshot::build(
        faces,
        &edges_of(faces),
        &vertices_of(faces),
        &Fingerprinter::default(),
    )
    .unwrap()
}

/// Kernel whose booleans, fillets and chamfers return queued face lists
///
/// Primitives and transforms compute their faces directly.
#[derive(Default)]
pub(crate) struct ScriptedKernel {
    solids: Mutex<HashMap<Solid, Vec<FaceInfo>>>,
    script: Mutex<VecDeque<Vec<FaceInfo>>>,
}

impl ScriptedKernel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a solid made of the given faces
    pub(crate) fn insert(&self, faces: Vec<FaceInfo>) -> Solid {
        let solid = Solid::generate();
        self.solids.lock().insert(solid, faces);
        solid
    }

    /// Queue the faces of the next boolean, fillet or chamfer result
    pub(crate) fn script(&self, faces: Vec<FaceInfo>) {
        self.script.lock().push_back(faces);
    }

    fn faces(&self, solid: &Solid) -> CadResult<Vec<FaceInfo>> {
        self.solids
            .lock()
            .get(solid)
            .cloned()
            .ok_or(CadError::SolidNotFound(solid.id))
    }

    fn next_result(&self) -> CadResult<Solid> {
        let faces = self
            .script
            .lock()
            .pop_front()
            .ok_or_else(|| CadError::OperationFailed("no scripted result".into()))?;
        Ok(self.insert(faces))
    }
}

impl CadKernel for ScriptedKernel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn create_box(&self, center: DVec3, size: DVec3) -> CadResult<Solid> {
        if size.min_element() <= 0.0 {
            return Err(CadError::InvalidInput("box size must be positive".into()));
        }
        Ok(self.insert(box_faces(center - size / 2.0, center + size / 2.0)))
    }

    fn create_cylinder(
        &self,
        base_center: DVec3,
        radius: f64,
        height: f64,
        _axis: DVec3,
    ) -> CadResult<Solid> {
        Ok(self.insert(cylinder_faces(base_center, radius, height)))
    }

    fn boolean(&self, a: &Solid, b: &Solid, _op: BooleanType) -> CadResult<Solid> {
        self.faces(a)?;
        self.faces(b)?;
        self.next_result()
    }

    fn transform(&self, solid: &Solid, transform: &DAffine3) -> CadResult<Solid> {
        let faces = self
            .faces(solid)?
            .iter()
            .map(|f| f.transformed(transform))
            .collect();
        Ok(self.insert(faces))
    }

    fn fillet(&self, solid: &Solid, edges: &[EdgeInfo], _radius: f64) -> CadResult<Solid> {
        self.faces(solid)?;
        if edges.is_empty() {
            return Err(CadError::InvalidInput("no edges to fillet".into()));
        }
        self.next_result()
    }

    fn chamfer(
        &self,
        solid: &Solid,
        edges: &[EdgeInfo],
        _length: f64,
        _length2: Option<f64>,
    ) -> CadResult<Solid> {
        self.faces(solid)?;
        if edges.is_empty() {
            return Err(CadError::InvalidInput("no edges to chamfer".into()));
        }
        self.next_result()
    }

    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceInfo>> {
        self.faces(solid)
    }

    fn get_edges(&self, solid: &Solid) -> CadResult<Vec<EdgeInfo>> {
        Ok(edges_of(&self.faces(solid)?))
    }

    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<VertexInfo>> {
        Ok(vertices_of(&self.faces(solid)?))
    }
}
