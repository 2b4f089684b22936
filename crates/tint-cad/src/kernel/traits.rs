//! Kernel boundary
//!
//! Everything the lineage engine asks of a modeling kernel: primitives,
//! booleans, rigid transforms, edge rounding and topology queries.

use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::shape::{EdgeInfo, FaceInfo, VertexInfo};

/// Error type for CAD kernel operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Boolean operation failed: {0}")]
    BooleanFailed(String),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Solid not found: {0}")]
    SolidNotFound(Uuid),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// Handle to a solid body owned by a kernel
///
/// The geometry itself lives inside the kernel; the handle is cheap to clone
/// and is replaced wholesale by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solid {
    /// Unique identifier
    pub id: Uuid,
}

impl Solid {
    /// Create a handle with the given ID
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    /// Create a handle with a fresh random ID
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }
}

/// Boolean operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanType {
    /// Union (add)
    Union,
    /// Subtraction (cut)
    Subtract,
    /// Intersection (common)
    Intersect,
}

/// The main CAD kernel trait
///
/// Implementations perform the actual geometry work. The engine only ever
/// looks at the shape descriptors they report, never at kernel-internal
/// identity.
pub trait CadKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Create an axis-aligned box primitive
    fn create_box(&self, center: DVec3, size: DVec3) -> CadResult<Solid>;

    /// Create a cylinder primitive
    ///
    /// # Arguments
    /// * `base_center` - Center of the bottom cap
    /// * `radius` - Cylinder radius
    /// * `height` - Extent along `axis`
    /// * `axis` - Cylinder axis direction
    fn create_cylinder(
        &self,
        base_center: DVec3,
        radius: f64,
        height: f64,
        axis: DVec3,
    ) -> CadResult<Solid>;

    /// Perform a boolean operation on two solids
    fn boolean(&self, a: &Solid, b: &Solid, op: BooleanType) -> CadResult<Solid>;

    /// Apply a rigid transform to a solid
    fn transform(&self, solid: &Solid, transform: &DAffine3) -> CadResult<Solid>;

    /// Round the given edges with a fillet of the given radius
    fn fillet(&self, solid: &Solid, edges: &[EdgeInfo], radius: f64) -> CadResult<Solid>;

    /// Bevel the given edges
    ///
    /// `length2` gives an asymmetric chamfer when set.
    fn chamfer(
        &self,
        solid: &Solid,
        edges: &[EdgeInfo],
        length: f64,
        length2: Option<f64>,
    ) -> CadResult<Solid>;

    // ========== Topology Queries ==========

    /// Get all faces of a solid, in kernel order
    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceInfo>>;

    /// Get all edges of a solid, in kernel order
    fn get_edges(&self, solid: &Solid) -> CadResult<Vec<EdgeInfo>>;

    /// Get all vertices of a solid, in kernel order
    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<VertexInfo>>;
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl NullKernel {
    fn unavailable<T>() -> CadResult<T> {
        Err(CadError::KernelNotAvailable("No CAD kernel available".into()))
    }
}

impl CadKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn create_box(&self, _center: DVec3, _size: DVec3) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn create_cylinder(
        &self,
        _base_center: DVec3,
        _radius: f64,
        _height: f64,
        _axis: DVec3,
    ) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn boolean(&self, _a: &Solid, _b: &Solid, _op: BooleanType) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn transform(&self, _solid: &Solid, _transform: &DAffine3) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn fillet(&self, _solid: &Solid, _edges: &[EdgeInfo], _radius: f64) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn chamfer(
        &self,
        _solid: &Solid,
        _edges: &[EdgeInfo],
        _length: f64,
        _length2: Option<f64>,
    ) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn get_faces(&self, _solid: &Solid) -> CadResult<Vec<FaceInfo>> {
        Self::unavailable()
    }

    fn get_edges(&self, _solid: &Solid) -> CadResult<Vec<EdgeInfo>> {
        Self::unavailable()
    }

    fn get_vertices(&self, _solid: &Solid) -> CadResult<Vec<VertexInfo>> {
        Self::unavailable()
    }
}

/// Get the default CAD kernel based on available features
pub fn default_kernel() -> Box<dyn CadKernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_kernel_is_unavailable() {
        let kernel = NullKernel;
        assert!(!kernel.is_available());
        assert!(matches!(
            kernel.create_box(DVec3::ZERO, DVec3::ONE),
            Err(CadError::KernelNotAvailable(_))
        ));
        assert!(kernel.get_faces(&Solid::generate()).is_err());
    }

    #[test]
    fn test_default_kernel() {
        let kernel = default_kernel();
        assert_eq!(kernel.is_available(), cfg!(feature = "truck"));
        let expected = if cfg!(feature = "truck") { "truck" } else { "null" };
        assert_eq!(kernel.name(), expected);
    }

    #[test]
    fn test_generated_solids_are_distinct() {
        assert_ne!(Solid::generate(), Solid::generate());
    }
}
