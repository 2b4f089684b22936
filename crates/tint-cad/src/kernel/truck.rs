//! Truck CAD Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library.
//!
//! Note: Truck has no fillet or chamfer operation; both report
//! `CadError::OperationFailed`.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use glam::{DAffine3, DMat4, DVec3};
use parking_lot::Mutex;
use uuid::Uuid;

use truck_modeling::{
    BoundedCurve, Curve, Edge as TruckEdge, Face as TruckFace, Matrix4, ParametricCurve, Point3,
    Rad, Solid as TruckSolid, Surface, Vector3, builder,
};

use super::{
    BooleanType, CadError, CadKernel, CadResult, CurveKind, EdgeInfo, FaceInfo, Placement, Solid,
    SurfaceKind, VertexInfo, centroid, fit_circle, polygon_normal,
};

/// Tolerance handed to truck-shapeops
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Distance tolerance when recognizing rational curves as circles
const CIRCLE_TOLERANCE: f64 = 1.0e-6;

/// Number of samples taken along a curve for circle recognition
const CIRCLE_SAMPLES: usize = 6;

/// Truck-based CAD kernel
pub struct TruckKernel {
    /// Storage for solid data (keyed by UUID)
    solids: Mutex<HashMap<Uuid, TruckSolid>>,
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self {
            solids: Mutex::new(HashMap::new()),
        }
    }

    /// Store a solid and return a Solid reference
    fn store_solid(&self, solid: TruckSolid) -> Solid {
        let handle = Solid::generate();
        self.solids.lock().insert(handle.id, solid);
        handle
    }

    /// Get a stored solid by ID
    fn get_solid(&self, solid: &Solid) -> CadResult<TruckSolid> {
        self.solids
            .lock()
            .get(&solid.id)
            .cloned()
            .ok_or(CadError::SolidNotFound(solid.id))
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn to_point(p: DVec3) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

fn to_vector(v: DVec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

fn from_point(p: Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

fn from_vector(v: Vector3) -> DVec3 {
    DVec3::new(v.x, v.y, v.z)
}

fn to_matrix(transform: &DAffine3) -> Matrix4 {
    let c = DMat4::from(*transform).to_cols_array();
    Matrix4::new(
        c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7], c[8], c[9], c[10], c[11], c[12], c[13],
        c[14], c[15],
    )
}

/// Radius of a rational curve when it traces a circle
fn circle_radius(curve: &Curve) -> Option<f64> {
    let Curve::NurbsCurve(nurbs) = curve else {
        return None;
    };
    let (t0, t1) = nurbs.range_tuple();
    let samples: Vec<DVec3> = (0..CIRCLE_SAMPLES)
        .map(|i| {
            let t = t0 + (t1 - t0) * i as f64 / CIRCLE_SAMPLES as f64;
            from_point(nurbs.subs(t))
        })
        .collect();
    fit_circle(&samples, CIRCLE_TOLERANCE).map(|(_, radius)| radius)
}

/// Describe an edge in its absolute orientation, so that both faces sharing
/// it report the same endpoints
fn describe_edge(edge: &TruckEdge) -> EdgeInfo {
    let front = edge.absolute_front();
    let back = edge.absolute_back();
    let vertices = if front.id() == back.id() {
        vec![from_point(front.point())]
    } else {
        vec![from_point(front.point()), from_point(back.point())]
    };

    let curve = edge.curve();
    #[allow(unreachable_patterns)]
    let (kind, radius) = match &curve {
        Curve::Line(_) => (CurveKind::Line, None),
        Curve::BSplineCurve(_) => (CurveKind::BSpline, None),
        Curve::NurbsCurve(_) => match circle_radius(&curve) {
            Some(radius) => (CurveKind::Circle, Some(radius)),
            None => (CurveKind::BSpline, None),
        },
        Curve::IntersectionCurve(_) => (CurveKind::Intersection, None),
        _ => (CurveKind::Other("truck-curve".into()), None),
    };

    EdgeInfo::new(kind, vertices, radius)
}

fn describe_face(face: &TruckFace) -> FaceInfo {
    let boundaries = face.boundaries();
    let edges: Vec<EdgeInfo> = boundaries
        .iter()
        .flat_map(|wire| wire.edge_iter().map(describe_edge))
        .collect();

    let points: Vec<DVec3> = edges
        .iter()
        .flat_map(|e| e.vertices.iter().copied())
        .collect();
    let center = centroid(&points);

    #[allow(unreachable_patterns)]
    let (kind, placement) = match face.surface() {
        Surface::Plane(plane) => (
            SurfaceKind::Plane,
            Placement::new(from_point(plane.origin()), from_vector(plane.normal())),
        ),
        Surface::RevolutedCurve(_) => (
            SurfaceKind::Revolution,
            Placement::new(center, polygon_normal(&points)),
        ),
        Surface::BSplineSurface(_) | Surface::NurbsSurface(_) => (
            SurfaceKind::BSpline,
            Placement::new(center, polygon_normal(&points)),
        ),
        _ => (
            SurfaceKind::Other("truck-surface".into()),
            Placement::new(center, polygon_normal(&points)),
        ),
    };

    FaceInfo::new(kind, edges, placement, center)
}

impl CadKernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn create_box(&self, center: DVec3, size: DVec3) -> CadResult<Solid> {
        if size.min_element() <= 0.0 {
            return Err(CadError::InvalidInput(format!(
                "Box size must be positive, got {size}"
            )));
        }
        let min = center - size * 0.5;

        let vertex = builder::vertex(to_point(min));
        let edge = builder::tsweep(&vertex, Vector3::new(size.x, 0.0, 0.0));
        let face = builder::tsweep(&edge, Vector3::new(0.0, size.y, 0.0));
        let solid = builder::tsweep(&face, Vector3::new(0.0, 0.0, size.z));

        Ok(self.store_solid(solid))
    }

    fn create_cylinder(
        &self,
        base_center: DVec3,
        radius: f64,
        height: f64,
        axis: DVec3,
    ) -> CadResult<Solid> {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO || radius <= 0.0 || height <= 0.0 {
            return Err(CadError::InvalidInput(
                "Cylinder needs a non-zero axis and positive radius and height".into(),
            ));
        }

        let seam = base_center + axis.any_orthonormal_vector() * radius;
        let vertex = builder::vertex(to_point(seam));
        let circle = builder::rsweep(&vertex, to_point(base_center), to_vector(axis), Rad(TAU));
        let disk = builder::try_attach_plane(&[circle])
            .map_err(|e| CadError::OperationFailed(format!("Failed to create face: {:?}", e)))?;
        let solid = builder::tsweep(&disk, to_vector(axis * height));

        Ok(self.store_solid(solid))
    }

    fn boolean(&self, a: &Solid, b: &Solid, op: BooleanType) -> CadResult<Solid> {
        let a = self.get_solid(a)?;
        let mut b = self.get_solid(b)?;

        let result = match op {
            BooleanType::Union => truck_shapeops::or(&a, &b, BOOLEAN_TOLERANCE),
            BooleanType::Intersect => truck_shapeops::and(&a, &b, BOOLEAN_TOLERANCE),
            BooleanType::Subtract => {
                b.not();
                truck_shapeops::and(&a, &b, BOOLEAN_TOLERANCE)
            }
        };

        match result {
            Some(solid) => Ok(self.store_solid(solid)),
            None => {
                tracing::warn!("Truck boolean {:?} produced no solid", op);
                Err(CadError::BooleanFailed(format!("{:?} produced no solid", op)))
            }
        }
    }

    fn transform(&self, solid: &Solid, transform: &DAffine3) -> CadResult<Solid> {
        let solid = self.get_solid(solid)?;
        let moved = builder::transformed(&solid, to_matrix(transform));
        Ok(self.store_solid(moved))
    }

    fn fillet(&self, _solid: &Solid, _edges: &[EdgeInfo], _radius: f64) -> CadResult<Solid> {
        Err(CadError::OperationFailed(
            "Fillet is not supported in Truck kernel".into(),
        ))
    }

    fn chamfer(
        &self,
        _solid: &Solid,
        _edges: &[EdgeInfo],
        _length: f64,
        _length2: Option<f64>,
    ) -> CadResult<Solid> {
        Err(CadError::OperationFailed(
            "Chamfer is not supported in Truck kernel".into(),
        ))
    }

    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceInfo>> {
        let solid = self.get_solid(solid)?;
        Ok(solid
            .boundaries()
            .iter()
            .flat_map(|shell| shell.face_iter())
            .map(describe_face)
            .collect())
    }

    fn get_edges(&self, solid: &Solid) -> CadResult<Vec<EdgeInfo>> {
        let solid = self.get_solid(solid)?;
        let mut seen = HashSet::new();
        Ok(solid
            .boundaries()
            .iter()
            .flat_map(|shell| shell.edge_iter())
            .filter(|edge| seen.insert(edge.id()))
            .map(describe_edge)
            .collect())
    }

    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<VertexInfo>> {
        let solid = self.get_solid(solid)?;
        let mut seen = HashSet::new();
        Ok(solid
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter())
            .filter(|vertex| seen.insert(vertex.id()))
            .map(|vertex| VertexInfo::new(from_point(vertex.point())))
            .collect())
    }
}
