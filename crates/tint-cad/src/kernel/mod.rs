//! CAD kernel abstraction
//!
//! Backends implement [`CadKernel`]; the engine talks to them only through
//! the shape descriptors in [`shape`].

pub mod shape;
mod traits;
#[cfg(feature = "truck")]
mod truck;

pub use shape::{
    CurveKind, EdgeInfo, FaceInfo, Placement, SurfaceKind, VertexInfo, centroid, fit_circle,
    polygon_normal,
};
pub use traits::{
    BooleanType, CadError, CadKernel, CadResult, NullKernel, Solid, default_kernel,
};
#[cfg(feature = "truck")]
pub use truck::TruckKernel;
