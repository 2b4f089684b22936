//! Content fingerprints for kernel shapes
//!
//! A fingerprint is the SHA-256 digest of a canonical form built from
//! quantized coordinates, so that the same geometry always gets the same
//! identifier regardless of which kernel object reported it.
//!
//! Vertex and curve order is taken as reported by the kernel and is not
//! sorted. Distinct geometry that quantizes to the same canonical form shares
//! a fingerprint; such collisions are neither detected nor corrected.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tint_cad::{EdgeInfo, FaceInfo};

use crate::constants::FINGERPRINT_PRECISION;
use crate::error::{TintError, TintResult};

/// Content-derived identifier of a face, edge or vertex
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest a canonical form
    pub fn digest(canonical: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `len` characters, used as a display label
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes fingerprints at a fixed quantization precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fingerprinter {
    precision: f64,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(FINGERPRINT_PRECISION)
    }
}

impl Fingerprinter {
    /// Create a fingerprinter; coordinates are multiplied by `precision` and
    /// truncated toward zero
    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    /// The quantization factor
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Quantize a scalar
    pub fn quantize(&self, value: f64) -> i64 {
        (value * self.precision).trunc() as i64
    }

    /// Quantize a point
    pub fn quantize_point(&self, p: DVec3) -> [i64; 3] {
        [self.quantize(p.x), self.quantize(p.y), self.quantize(p.z)]
    }

    fn canonical_vertex(&self, p: DVec3) -> String {
        let [x, y, z] = self.quantize_point(p);
        format!("({x}, {y}, {z})")
    }

    fn canonical_edge(&self, edge: &EdgeInfo) -> TintResult<String> {
        if !edge.kind.is_supported() {
            return Err(TintError::UnsupportedShapeKind {
                entity: "curve",
                kind: edge.kind.name().to_string(),
            });
        }
        let vertices: Vec<String> = edge
            .vertices
            .iter()
            .map(|p| self.canonical_vertex(*p))
            .collect();
        let radius = match edge.radius {
            Some(r) if edge.is_circle() => self.quantize(r),
            _ => 0,
        };
        Ok(format!("({}, ({}), {radius})", edge.kind, vertices.join(", ")))
    }

    fn canonical_face(&self, face: &FaceInfo) -> TintResult<String> {
        if !face.kind.is_supported() {
            return Err(TintError::UnsupportedShapeKind {
                entity: "surface",
                kind: face.kind.name().to_string(),
            });
        }
        let edges = face
            .edges
            .iter()
            .map(|e| self.canonical_edge(e))
            .collect::<TintResult<Vec<_>>>()?;
        Ok(format!("({})", edges.join(", ")))
    }

    /// Fingerprint of a vertex
    pub fn vertex(&self, point: DVec3) -> Fingerprint {
        Fingerprint::digest(&self.canonical_vertex(point))
    }

    /// Fingerprint of a boundary curve
    ///
    /// # Errors
    ///
    /// Returns [`TintError::UnsupportedShapeKind`] for curves outside the
    /// known taxonomy.
    pub fn edge(&self, edge: &EdgeInfo) -> TintResult<Fingerprint> {
        Ok(Fingerprint::digest(&self.canonical_edge(edge)?))
    }

    /// Fingerprint of a surface
    ///
    /// # Errors
    ///
    /// Returns [`TintError::UnsupportedShapeKind`] when the surface or any of
    /// its boundary curves is outside the known taxonomy.
    pub fn face(&self, face: &FaceInfo) -> TintResult<Fingerprint> {
        Ok(Fingerprint::digest(&self.canonical_face(face)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tint_cad::{CurveKind, SurfaceKind};

    fn p(x: f64, y: f64, z: f64) -> DVec3 {
        DVec3::new(x, y, z)
    }

    fn triangle(offset: f64) -> FaceInfo {
        FaceInfo::planar(vec![
            EdgeInfo::line(p(offset, 0.0, 0.0), p(offset + 1.0, 0.0, 0.0)),
            EdgeInfo::line(p(offset + 1.0, 0.0, 0.0), p(offset, 1.0, 0.0)),
            EdgeInfo::line(p(offset, 1.0, 0.0), p(offset, 0.0, 0.0)),
        ])
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = Fingerprinter::default().vertex(p(1.0, 2.0, 3.0));
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp.short(6).len(), 6);
        assert_eq!(fp.short(100), fp.as_str());
        assert_eq!(
            Fingerprint::digest("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_quantization_absorbs_noise() {
        let fp = Fingerprinter::default();
        assert_eq!(fp.vertex(p(1.0, 2.0, 3.0)), fp.vertex(p(1.0000001, 2.0, 3.0)));
        assert_ne!(fp.vertex(p(1.0, 2.0, 3.0)), fp.vertex(p(1.002, 2.0, 3.0)));
        assert_eq!(fp.quantize(-0.0004), 0);
        assert_eq!(fp.quantize(2.9999), 2999);
    }

    #[test]
    fn test_precision_is_configurable() {
        let coarse = Fingerprinter::new(10.0);
        assert_eq!(coarse.vertex(p(1.0, 0.0, 0.0)), coarse.vertex(p(1.05, 0.0, 0.0)));
        let fine = Fingerprinter::default();
        assert_ne!(fine.vertex(p(1.0, 0.0, 0.0)), fine.vertex(p(1.05, 0.0, 0.0)));
    }

    #[test]
    fn test_identical_geometry_same_fingerprint() {
        let fp = Fingerprinter::default();
        assert_eq!(fp.face(&triangle(0.0)).unwrap(), fp.face(&triangle(0.0)).unwrap());
        assert_ne!(fp.face(&triangle(0.0)).unwrap(), fp.face(&triangle(2.0)).unwrap());
    }

    #[test]
    fn test_radius_only_counts_for_circles() {
        let fp = Fingerprinter::default();
        let a = EdgeInfo::new(CurveKind::Line, vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], Some(4.0));
        let b = EdgeInfo::line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert_eq!(fp.edge(&a).unwrap(), fp.edge(&b).unwrap());

        let small = EdgeInfo::circle(p(1.0, 0.0, 0.0), 1.0);
        let large = EdgeInfo::circle(p(1.0, 0.0, 0.0), 2.0);
        assert_ne!(fp.edge(&small).unwrap(), fp.edge(&large).unwrap());
    }

    #[test]
    fn test_kind_is_part_of_curve_identity() {
        let fp = Fingerprinter::default();
        let line = EdgeInfo::line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let spline = EdgeInfo::new(CurveKind::BSpline, line.vertices.clone(), None);
        assert_ne!(fp.edge(&line).unwrap(), fp.edge(&spline).unwrap());
    }

    #[test]
    fn test_vertex_order_matters() {
        let fp = Fingerprinter::default();
        let forward = EdgeInfo::line(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let backward = EdgeInfo::line(p(1.0, 0.0, 0.0), p(0.0, 0.0, 0.0));
        assert_ne!(fp.edge(&forward).unwrap(), fp.edge(&backward).unwrap());
    }

    #[test]
    fn test_unsupported_kinds_fail() {
        let fp = Fingerprinter::default();
        let edge = EdgeInfo::new(CurveKind::Other("clothoid".into()), vec![p(0.0, 0.0, 0.0)], None);
        assert!(matches!(
            fp.edge(&edge),
            Err(TintError::UnsupportedShapeKind { entity: "curve", .. })
        ));

        let mut face = triangle(0.0);
        face.kind = SurfaceKind::Other("subdivision".into());
        assert!(matches!(
            fp.face(&face),
            Err(TintError::UnsupportedShapeKind { entity: "surface", .. })
        ));

        let mut face = triangle(0.0);
        face.edges.push(edge);
        assert!(matches!(
            fp.face(&face),
            Err(TintError::UnsupportedShapeKind { entity: "curve", .. })
        ));
    }
}
