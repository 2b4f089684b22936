//! Face Lineage and Color Propagation
//!
//! This crate provides:
//! - Content fingerprints for faces, edges and vertices reported by a kernel
//! - Snapshots of a solid and the diff between consecutive snapshots
//! - An append-only history of modeling operations
//! - Color propagation across the history, with debug overrides
//! - A builder facade driving a [`tint_cad::CadKernel`]

pub mod builder;
pub mod color;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod history;
pub mod operation;
pub mod palette;
pub mod propagate;
pub mod report;
pub mod snapshot;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use builder::{Builder, ColoredFace, Operand, Style};
pub use color::Color;
pub use config::{ReportConfig, TintConfig};
pub use diff::classify;
pub use error::{TintError, TintResult};
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use history::History;
pub use operation::{AliasMap, Operation, OperationKind};
pub use palette::{AutoColor, Palette};
pub use propagate::{FaceColors, apply_overrides, colors_for};
pub use report::{InfoColumn, Report, ReportRow};
pub use snapshot::{PoseKey, Snapshot, SnapshotEdge, SnapshotFace};
pub use state::{Classification, ShapeState, StateMap};
