//! Kernel-reported shape descriptors
//!
//! The kernel hands out plain descriptions of the faces, edges and vertices of
//! a solid. Nothing here carries kernel-internal identity: two descriptors are
//! the same shape exactly when their geometry is the same.

use std::fmt;

use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};

/// Geometric kind of a boundary curve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    Line,
    Circle,
    Ellipse,
    Hyperbola,
    Parabola,
    Bezier,
    BSpline,
    /// Curve produced by intersecting two surfaces
    Intersection,
    Offset,
    /// A kind the kernel knows but the engine does not
    Other(String),
}

impl CurveKind {
    /// Short lowercase name of the kind
    pub fn name(&self) -> &str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Hyperbola => "hyperbola",
            Self::Parabola => "parabola",
            Self::Bezier => "bezier",
            Self::BSpline => "bspline",
            Self::Intersection => "intersection",
            Self::Offset => "offset",
            Self::Other(name) => name,
        }
    }

    /// Whether the kind belongs to the known taxonomy
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometric kind of a surface
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Plane,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    Bezier,
    BSpline,
    /// Surface of revolution
    Revolution,
    /// Surface of linear extrusion
    Extrusion,
    Offset,
    /// A kind the kernel knows but the engine does not
    Other(String),
}

impl SurfaceKind {
    /// Short lowercase name of the kind
    pub fn name(&self) -> &str {
        match self {
            Self::Plane => "plane",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Bezier => "bezier",
            Self::BSpline => "bspline",
            Self::Revolution => "revolution",
            Self::Extrusion => "extrusion",
            Self::Offset => "offset",
            Self::Other(name) => name,
        }
    }

    /// Whether the kind belongs to the known taxonomy
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vertex of a solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexInfo {
    /// Position of the vertex
    pub point: DVec3,
}

impl VertexInfo {
    /// Create a vertex at the given position
    pub fn new(point: DVec3) -> Self {
        Self { point }
    }
}

/// A boundary curve of a solid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInfo {
    /// Geometric kind of the curve
    pub kind: CurveKind,
    /// Endpoint vertices in kernel order (one entry for closed curves)
    pub vertices: Vec<DVec3>,
    /// Radius for circular curves
    pub radius: Option<f64>,
}

impl EdgeInfo {
    /// Create an edge description
    pub fn new(kind: CurveKind, vertices: Vec<DVec3>, radius: Option<f64>) -> Self {
        Self {
            kind,
            vertices,
            radius,
        }
    }

    /// Create a straight segment between two points
    pub fn line(start: DVec3, end: DVec3) -> Self {
        Self::new(CurveKind::Line, vec![start, end], None)
    }

    /// Create a full circle starting and ending at `seam`
    pub fn circle(seam: DVec3, radius: f64) -> Self {
        Self::new(CurveKind::Circle, vec![seam], Some(radius))
    }

    /// Create a circular arc between two points
    pub fn arc(start: DVec3, end: DVec3, radius: f64) -> Self {
        Self::new(CurveKind::Circle, vec![start, end], Some(radius))
    }

    /// Whether the curve is circular
    pub fn is_circle(&self) -> bool {
        self.kind == CurveKind::Circle
    }

    /// Apply a rigid transform to the curve
    pub fn transformed(&self, transform: &DAffine3) -> Self {
        Self {
            kind: self.kind.clone(),
            vertices: self
                .vertices
                .iter()
                .map(|p| transform.transform_point3(*p))
                .collect(),
            radius: self.radius,
        }
    }
}

/// Location and orientation of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Origin of the surface frame
    pub origin: DVec3,
    /// Main axis of the surface frame (normal for planes, axis for revolutions)
    pub axis: DVec3,
}

impl Placement {
    /// Create a placement
    pub fn new(origin: DVec3, axis: DVec3) -> Self {
        Self {
            origin,
            axis: axis.normalize_or_zero(),
        }
    }

    /// Apply a rigid transform to the placement
    pub fn transformed(&self, transform: &DAffine3) -> Self {
        Self::new(
            transform.transform_point3(self.origin),
            transform.transform_vector3(self.axis),
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::Z)
    }
}

/// A face of a solid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceInfo {
    /// Geometric kind of the underlying surface
    pub kind: SurfaceKind,
    /// Boundary curves in kernel order (outer loop first)
    pub edges: Vec<EdgeInfo>,
    /// Surface frame
    pub placement: Placement,
    /// Center of the bounded face
    pub center: DVec3,
}

impl FaceInfo {
    /// Create a face description
    pub fn new(kind: SurfaceKind, edges: Vec<EdgeInfo>, placement: Placement, center: DVec3) -> Self {
        Self {
            kind,
            edges,
            placement,
            center,
        }
    }

    /// Create a planar face, deriving the frame from its boundary
    ///
    /// The origin is the centroid of the boundary vertices and the axis the
    /// polygon normal of the boundary.
    pub fn planar(edges: Vec<EdgeInfo>) -> Self {
        Self::planar_with_holes(edges, Vec::new())
    }

    /// Create a planar face with inner loops
    ///
    /// The frame comes from the outer loop only, so punching a hole into a
    /// face keeps its placement.
    pub fn planar_with_holes(outer: Vec<EdgeInfo>, holes: Vec<Vec<EdgeInfo>>) -> Self {
        let points: Vec<DVec3> = outer
            .iter()
            .flat_map(|e| e.vertices.iter().copied())
            .collect();
        let center = centroid(&points);
        let normal = polygon_normal(&points);

        let mut edges = outer;
        edges.extend(holes.into_iter().flatten());

        Self::new(
            SurfaceKind::Plane,
            edges,
            Placement::new(center, normal),
            center,
        )
    }

    /// Apply a rigid transform to the face
    pub fn transformed(&self, transform: &DAffine3) -> Self {
        Self {
            kind: self.kind.clone(),
            edges: self.edges.iter().map(|e| e.transformed(transform)).collect(),
            placement: self.placement.transformed(transform),
            center: transform.transform_point3(self.center),
        }
    }

    /// All boundary vertices in boundary order
    pub fn vertices(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.edges.iter().flat_map(|e| e.vertices.iter().copied())
    }
}

/// Average of a point set (origin for an empty set)
pub fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Newell normal of a closed polygon (zero for degenerate input)
pub fn polygon_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    let mut normal = DVec3::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal.normalize_or_zero()
}

/// Fit a circle through sample points of a curve
///
/// Uses the first three samples to compute the circumcircle, then checks every
/// sample against it. Returns the center and radius when all samples lie on the
/// circle within `tolerance`.
pub fn fit_circle(samples: &[DVec3], tolerance: f64) -> Option<(DVec3, f64)> {
    if samples.len() < 3 {
        return None;
    }
    let (a, b, c) = (samples[0], samples[1], samples[2]);
    let ab = b - a;
    let ac = c - a;
    let n = ab.cross(ac);
    let denom = 2.0 * n.length_squared();
    if denom < f64::EPSILON {
        return None;
    }
    let offset = (n.cross(ab) * ac.length_squared() + ac.cross(n) * ab.length_squared()) / denom;
    let center = a + offset;
    let radius = offset.length();

    samples
        .iter()
        .all(|p| ((*p - center).length() - radius).abs() <= tolerance)
        .then_some((center, radius))
}
