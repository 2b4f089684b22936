//! CAD Kernel Boundary
//!
//! This crate provides:
//! - The abstract CAD kernel trait consumed by the tint engine
//! - Kernel-neutral descriptors of faces, edges and vertices
//! - A pure Rust B-Rep backend on top of Truck (feature `truck`)

pub mod kernel;

// Re-exports for convenience
#[cfg(feature = "truck")]
pub use kernel::TruckKernel;
pub use kernel::{
    BooleanType, CadError, CadKernel, CadResult, CurveKind, EdgeInfo, FaceInfo, NullKernel,
    Placement, Solid, SurfaceKind, VertexInfo, default_kernel,
};
