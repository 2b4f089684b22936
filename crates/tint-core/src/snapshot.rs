//! Fingerprinted view of a solid at one point in history

use std::collections::{HashMap, HashSet};

use tint_cad::{CadKernel, EdgeInfo, FaceInfo, Solid, SurfaceKind, VertexInfo};

use crate::error::TintResult;
use crate::fingerprint::{Fingerprint, Fingerprinter};

/// Quantized kind, frame and center of a face
///
/// Two faces with equal keys sit at the same place with the same orientation,
/// even when their boundaries differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoseKey {
    pub kind: SurfaceKind,
    pub origin: [i64; 3],
    pub axis: [i64; 3],
    pub center: [i64; 3],
}

impl PoseKey {
    fn of(face: &FaceInfo, fingerprinter: &Fingerprinter) -> Self {
        Self {
            kind: face.kind.clone(),
            origin: fingerprinter.quantize_point(face.placement.origin),
            axis: fingerprinter.quantize_point(face.placement.axis),
            center: fingerprinter.quantize_point(face.center),
        }
    }
}

/// A face together with its fingerprints
#[derive(Debug, Clone)]
pub struct SnapshotFace {
    pub fingerprint: Fingerprint,
    /// Fingerprints of the boundary curves, in boundary order
    pub edges: Vec<Fingerprint>,
    pub pose: PoseKey,
    pub info: FaceInfo,
}

impl SnapshotFace {
    /// Whether both faces have a boundary curve in common
    pub fn shares_boundary(&self, other: &SnapshotFace) -> bool {
        self.edges.iter().any(|e| other.edges.contains(e))
    }

    /// Whether both faces have the same kind, frame and center
    pub fn coincides_with(&self, other: &SnapshotFace) -> bool {
        self.pose == other.pose
    }
}

/// An edge together with its fingerprints
#[derive(Debug, Clone)]
pub struct SnapshotEdge {
    pub fingerprint: Fingerprint,
    /// Fingerprints of the endpoint vertices
    pub vertices: Vec<Fingerprint>,
    pub info: EdgeInfo,
}

/// The fingerprinted faces, edges and vertices of a solid
///
/// Entries keep the kernel's order. When two entries share a fingerprint only
/// the first one is kept.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    faces: Vec<SnapshotFace>,
    edges: Vec<SnapshotEdge>,
    vertices: Vec<Fingerprint>,
    face_index: HashMap<Fingerprint, usize>,
    edge_index: HashMap<Fingerprint, usize>,
    vertex_index: HashSet<Fingerprint>,
}

impl Snapshot {
    /// Fingerprint kernel-reported shapes
    ///
    /// # Errors
    ///
    /// Fails with [`crate::TintError::UnsupportedShapeKind`] if any curve or
    /// surface is outside the known taxonomy.
    pub fn build(
        faces: &[FaceInfo],
        edges: &[EdgeInfo],
        vertices: &[VertexInfo],
        fingerprinter: &Fingerprinter,
    ) -> TintResult<Self> {
        let mut snapshot = Self::default();

        for vertex in vertices {
            let fingerprint = fingerprinter.vertex(vertex.point);
            if snapshot.vertex_index.insert(fingerprint.clone()) {
                snapshot.vertices.push(fingerprint);
            }
        }

        for edge in edges {
            let fingerprint = fingerprinter.edge(edge)?;
            if snapshot.edge_index.contains_key(&fingerprint) {
                tracing::trace!("Duplicate edge fingerprint {}", fingerprint.short(8));
                continue;
            }
            let vertices = edge.vertices.iter().map(|p| fingerprinter.vertex(*p)).collect();
            snapshot
                .edge_index
                .insert(fingerprint.clone(), snapshot.edges.len());
            snapshot.edges.push(SnapshotEdge {
                fingerprint,
                vertices,
                info: edge.clone(),
            });
        }

        for face in faces {
            let fingerprint = fingerprinter.face(face)?;
            if snapshot.face_index.contains_key(&fingerprint) {
                tracing::trace!("Duplicate face fingerprint {}", fingerprint.short(8));
                continue;
            }
            let edges = face
                .edges
                .iter()
                .map(|e| fingerprinter.edge(e))
                .collect::<TintResult<Vec<_>>>()?;
            snapshot
                .face_index
                .insert(fingerprint.clone(), snapshot.faces.len());
            snapshot.faces.push(SnapshotFace {
                fingerprint,
                edges,
                pose: PoseKey::of(face, fingerprinter),
                info: face.clone(),
            });
        }

        Ok(snapshot)
    }

    /// Query a kernel for the shapes of a solid and fingerprint them
    pub fn capture(
        kernel: &dyn CadKernel,
        solid: &Solid,
        fingerprinter: &Fingerprinter,
    ) -> TintResult<Self> {
        let faces = kernel.get_faces(solid)?;
        let edges = kernel.get_edges(solid)?;
        let vertices = kernel.get_vertices(solid)?;
        Self::build(&faces, &edges, &vertices, fingerprinter)
    }

    /// Faces in kernel order
    pub fn faces(&self) -> &[SnapshotFace] {
        &self.faces
    }

    /// Edges in kernel order
    pub fn edges(&self) -> &[SnapshotEdge] {
        &self.edges
    }

    /// Vertex fingerprints in kernel order
    pub fn vertices(&self) -> &[Fingerprint] {
        &self.vertices
    }

    /// Get a face by fingerprint
    pub fn face(&self, fingerprint: &Fingerprint) -> Option<&SnapshotFace> {
        self.face_index.get(fingerprint).map(|&i| &self.faces[i])
    }

    /// Get an edge by fingerprint
    pub fn edge(&self, fingerprint: &Fingerprint) -> Option<&SnapshotEdge> {
        self.edge_index.get(fingerprint).map(|&i| &self.edges[i])
    }

    pub fn contains_face(&self, fingerprint: &Fingerprint) -> bool {
        self.face_index.contains_key(fingerprint)
    }

    pub fn contains_edge(&self, fingerprint: &Fingerprint) -> bool {
        self.edge_index.contains_key(fingerprint)
    }

    pub fn contains_vertex(&self, fingerprint: &Fingerprint) -> bool {
        self.vertex_index.contains(fingerprint)
    }

    /// Check if the snapshot holds no faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TintError;
    use crate::testing::{box_faces, edges_of, p, vertices_of};
    use tint_cad::CurveKind;

    #[test]
    fn test_build_box() {
        let faces = box_faces(p(0.0, 0.0, 0.0), p(9.0, 9.0, 3.0));
        let snapshot = Snapshot::build(
            &faces,
            &edges_of(&faces),
            &vertices_of(&faces),
            &Fingerprinter::default(),
        )
        .unwrap();

        assert_eq!(snapshot.faces().len(), 6);
        assert_eq!(snapshot.edges().len(), 12);
        assert_eq!(snapshot.vertices().len(), 8);
        for face in snapshot.faces() {
            assert_eq!(face.edges.len(), 4);
            assert!(face.edges.iter().all(|e| snapshot.contains_edge(e)));
        }
        for edge in snapshot.edges() {
            assert!(edge.vertices.iter().all(|v| snapshot.contains_vertex(v)));
        }
    }

    #[test]
    fn test_duplicates_collapse() {
        let faces = box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let doubled: Vec<FaceInfo> = faces.iter().chain(faces.iter()).cloned().collect();
        let snapshot = Snapshot::build(&doubled, &[], &[], &Fingerprinter::default()).unwrap();
        assert_eq!(snapshot.faces().len(), 6);
    }

    #[test]
    fn test_adjacent_faces_share_boundary() {
        let faces = box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let snapshot = Snapshot::build(&faces, &[], &[], &Fingerprinter::default()).unwrap();
        let [x_min, x_max, y_min, ..] = snapshot.faces() else {
            panic!("box has six faces");
        };

        assert!(x_min.shares_boundary(y_min));
        assert!(!x_min.shares_boundary(x_max));
        assert!(!x_min.coincides_with(x_max));
        assert!(x_min.coincides_with(x_min));
    }

    #[test]
    fn test_unsupported_edge_aborts() {
        let edge = EdgeInfo::new(CurveKind::Other("helix".into()), vec![p(0.0, 0.0, 0.0)], None);
        let result = Snapshot::build(&[], &[edge], &[], &Fingerprinter::default());
        assert!(matches!(result, Err(TintError::UnsupportedShapeKind { .. })));
    }
}
