//! Builder
//!
//! Drives a CAD kernel, records every operation in a [`History`] and exposes
//! the faces of the current solid with their propagated colors.

use std::collections::BTreeMap;
use std::io;

use glam::DAffine3;
use tint_cad::{BooleanType, CadKernel, EdgeInfo, FaceInfo, Solid};

use crate::color::Color;
use crate::config::TintConfig;
use crate::error::{TintError, TintResult};
use crate::fingerprint::{Fingerprint, Fingerprinter};
use crate::history::History;
use crate::operation::{AliasMap, Operation, OperationKind};
use crate::palette::AutoColor;
use crate::propagate::{FaceColors, apply_overrides, colors_for};
use crate::report::Report;
use crate::snapshot::{Snapshot, SnapshotFace};
use crate::state::ShapeState;

/// Color and debug settings of a single operation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    /// Explicit color (None = automatic)
    pub color: Option<Color>,
    /// Highlight the faces this operation adds
    pub debug: bool,
}

impl Style {
    /// Automatic color, no debug
    pub fn auto() -> Self {
        Self::default()
    }

    /// Explicit color
    pub fn colored(color: impl Into<Color>) -> Self {
        Self {
            color: Some(color.into()),
            debug: false,
        }
    }

    /// Explicit color given by name or hex notation
    pub fn named(color: &str) -> TintResult<Self> {
        Ok(Self::colored(color.parse::<Color>()?))
    }

    /// Enable debug highlighting
    pub fn with_debug(self) -> Self {
        Self { debug: true, ..self }
    }
}

/// Right-hand side of a boolean operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operand {
    solid: Option<Solid>,
    color: Option<Color>,
}

impl From<Solid> for Operand {
    fn from(solid: Solid) -> Self {
        Self {
            solid: Some(solid),
            color: None,
        }
    }
}

impl From<&Solid> for Operand {
    fn from(solid: &Solid) -> Self {
        Self::from(*solid)
    }
}

/// A builder lends its color when it holds a single operation
impl From<&Builder<'_>> for Operand {
    fn from(builder: &Builder<'_>) -> Self {
        let color = match builder.history.len() {
            1 => builder.history.get(0).and_then(Operation::color),
            _ => None,
        };
        Self {
            solid: builder.solid,
            color,
        }
    }
}

/// A face of the current solid ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredFace {
    pub fingerprint: Fingerprint,
    pub face: FaceInfo,
    pub color: Color,
    /// Short fingerprint prefix
    pub label: String,
}

/// Records modeling operations and colors the resulting faces
pub struct Builder<'k> {
    kernel: &'k dyn CadKernel,
    config: TintConfig,
    fingerprinter: Fingerprinter,
    solid: Option<Solid>,
    history: History,
    debug_faces: BTreeMap<Fingerprint, Color>,
}

impl<'k> Builder<'k> {
    /// Create a builder with the default configuration
    pub fn new(kernel: &'k dyn CadKernel) -> Self {
        Self::assemble(kernel, TintConfig::default())
    }

    /// Create a builder with a custom configuration
    pub fn with_config(kernel: &'k dyn CadKernel, config: TintConfig) -> TintResult<Self> {
        config.validate()?;
        Ok(Self::assemble(kernel, config))
    }

    fn assemble(kernel: &'k dyn CadKernel, config: TintConfig) -> Self {
        if !kernel.is_available() {
            tracing::warn!("Kernel {} is not available, every operation will fail", kernel.name());
        }
        Self {
            kernel,
            fingerprinter: config.fingerprinter(),
            config,
            solid: None,
            history: History::new(),
            debug_faces: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &TintConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Handle of the current solid
    pub fn solid(&self) -> Option<Solid> {
        self.solid
    }

    /// Forced colors of debugged faces
    pub fn debug_faces(&self) -> &BTreeMap<Fingerprint, Color> {
        &self.debug_faces
    }

    fn current(&self) -> TintResult<Solid> {
        self.solid.ok_or(TintError::EmptyHistory)
    }

    fn kernel_call<T>(
        &self,
        kind: OperationKind,
        result: tint_cad::CadResult<T>,
    ) -> TintResult<T> {
        result.map_err(|e| {
            tracing::warn!("Kernel {} failed during {}: {}", self.kernel.name(), kind, e);
            TintError::from(e)
        })
    }

    /// Record the solid produced by an operation
    ///
    /// The snapshot is taken before any state changes, so a failure leaves the
    /// builder untouched.
    fn mutate(
        &mut self,
        kind: OperationKind,
        result: Solid,
        color: Option<Color>,
        debug: bool,
        face_alias: AliasMap,
    ) -> TintResult<&Operation> {
        let snapshot = Snapshot::capture(self.kernel, &result, &self.fingerprinter)
            .inspect_err(|e| tracing::warn!("Snapshot of {} failed: {}", kind, e))?;

        self.solid = Some(result);
        let op = self.history.append(kind, snapshot, color, face_alias);

        if debug {
            let debug_color = color.unwrap_or(self.config.default_debug_color);
            for fingerprint in op.faces_with(ShapeState::Added) {
                self.debug_faces.insert(fingerprint.clone(), debug_color);
            }
        }
        Ok(op)
    }

    fn boolean(
        &mut self,
        kind: OperationKind,
        op: BooleanType,
        operand: Operand,
        style: Style,
    ) -> TintResult<&Operation> {
        let current = self.current()?;
        let other = operand.solid.ok_or(TintError::EmptyHistory)?;
        let result = self.kernel_call(kind, self.kernel.boolean(&current, &other, op))?;
        self.mutate(kind, result, style.color.or(operand.color), style.debug, AliasMap::new())
    }

    /// Fuse a solid into the current one
    ///
    /// On an empty builder the operand becomes the current solid.
    pub fn add(&mut self, operand: impl Into<Operand>, style: Style) -> TintResult<&Operation> {
        let operand = operand.into();
        if self.solid.is_none() {
            let other = operand.solid.ok_or(TintError::EmptyHistory)?;
            let color = style.color.or(operand.color);
            return self.mutate(OperationKind::Add, other, color, style.debug, AliasMap::new());
        }
        self.boolean(OperationKind::Add, BooleanType::Union, operand, style)
    }

    /// Cut a solid from the current one
    pub fn sub(&mut self, operand: impl Into<Operand>, style: Style) -> TintResult<&Operation> {
        self.boolean(OperationKind::Sub, BooleanType::Subtract, operand.into(), style)
    }

    /// Keep the common part of a solid and the current one
    pub fn intersect(
        &mut self,
        operand: impl Into<Operand>,
        style: Style,
    ) -> TintResult<&Operation> {
        self.boolean(OperationKind::Intersect, BooleanType::Intersect, operand.into(), style)
    }

    /// Apply a rigid transform to the current solid
    ///
    /// Every moved face keeps the color of the face it came from.
    pub fn move_by(&mut self, transform: &DAffine3, style: Style) -> TintResult<&Operation> {
        let current = self.current()?;

        let mut alias = AliasMap::new();
        for face in self.history.last()?.snapshot().faces() {
            let moved = self.fingerprinter.face(&face.info.transformed(transform))?;
            alias.insert(moved, face.fingerprint.clone());
        }

        let result = self.kernel_call(
            OperationKind::Move,
            self.kernel.transform(&current, transform),
        )?;
        self.mutate(OperationKind::Move, result, style.color, style.debug, alias)
    }

    fn resolve_edges(&self, edges: &[Fingerprint]) -> TintResult<Vec<EdgeInfo>> {
        let snapshot = self.history.last()?.snapshot();
        edges
            .iter()
            .map(|fp| {
                snapshot
                    .edge(fp)
                    .map(|e| e.info.clone())
                    .ok_or_else(|| TintError::not_found("edge", fp))
            })
            .collect()
    }

    /// Round edges of the current solid
    pub fn fillet(
        &mut self,
        edges: &[Fingerprint],
        radius: f64,
        style: Style,
    ) -> TintResult<&Operation> {
        let current = self.current()?;
        let edges = self.resolve_edges(edges)?;
        let result = self.kernel_call(
            OperationKind::Fillet,
            self.kernel.fillet(&current, &edges, radius),
        )?;
        self.mutate(OperationKind::Fillet, result, style.color, style.debug, AliasMap::new())
    }

    /// Bevel edges of the current solid
    ///
    /// `length2` gives an asymmetric chamfer when set.
    pub fn chamfer(
        &mut self,
        edges: &[Fingerprint],
        length: f64,
        length2: Option<f64>,
        style: Style,
    ) -> TintResult<&Operation> {
        let current = self.current()?;
        let edges = self.resolve_edges(edges)?;
        let result = self.kernel_call(
            OperationKind::Chamfer,
            self.kernel.chamfer(&current, &edges, length, length2),
        )?;
        self.mutate(OperationKind::Chamfer, result, style.color, style.debug, AliasMap::new())
    }

    /// Highlight faces
    ///
    /// The faces keep `color` (the default debug color when None) while every
    /// other face turns translucent. Faces that were removed since stay
    /// visible.
    pub fn debug(&mut self, faces: &[Fingerprint], color: Option<Color>) -> TintResult<()> {
        if let Some(unknown) = faces
            .iter()
            .find(|fp| self.history.find_face(fp, true).is_none())
        {
            return Err(TintError::not_found("face", unknown));
        }
        let color = color.unwrap_or(self.config.default_debug_color);
        for fp in faces {
            self.debug_faces.insert(fp.clone(), color);
        }
        Ok(())
    }

    /// Drop every debug highlight
    pub fn clear_debug(&mut self) {
        self.debug_faces.clear();
    }

    fn auto_color(&self) -> Box<dyn AutoColor> {
        match self.config.palette {
            Some(palette) => Box::new(palette),
            None => {
                let color = self.config.default_color;
                Box::new(move |_: usize, _: usize| color)
            }
        }
    }

    /// Colors of the current faces, debug highlights applied
    pub fn face_colors(&self) -> TintResult<FaceColors> {
        let auto = self.auto_color();
        let colors = colors_for(&self.history, auto.as_ref())?;
        Ok(apply_overrides(
            &colors,
            &self.debug_faces,
            self.config.debug_alpha,
        ))
    }

    /// Faces of the current solid with their colors and labels
    ///
    /// Debugged faces that are no longer part of the solid are included with
    /// their last known geometry.
    pub fn faces(&self) -> TintResult<Vec<ColoredFace>> {
        let last = self.history.last()?;
        let colors = self.face_colors()?;
        let fallback = if self.debug_faces.is_empty() {
            self.config.default_color
        } else {
            self.config.default_color.with_alpha(self.config.debug_alpha)
        };

        let mut faces: Vec<ColoredFace> = last
            .snapshot()
            .faces()
            .iter()
            .map(|face| self.colored_face(face, &colors, fallback))
            .collect();

        for fp in self.debug_faces.keys() {
            if last.snapshot().contains_face(fp) {
                continue;
            }
            if let Some(face) = self.history.find_face(fp, true) {
                faces.push(self.colored_face(face, &colors, fallback));
            }
        }
        Ok(faces)
    }

    fn colored_face(&self, face: &SnapshotFace, colors: &FaceColors, fallback: Color) -> ColoredFace {
        ColoredFace {
            fingerprint: face.fingerprint.clone(),
            face: face.info.clone(),
            color: colors.resolve(&face.fingerprint, fallback),
            label: face.fingerprint.short(self.config.label_length).to_string(),
        }
    }

    /// Get an operation by index
    pub fn operation(&self, index: usize) -> TintResult<&Operation> {
        self.history
            .get(index)
            .ok_or_else(|| TintError::not_found("operation", index))
    }

    /// Get an operation by its `"{kind}-{index}"` identifier
    pub fn operation_by_id(&self, id: &str) -> TintResult<&Operation> {
        self.history.lookup_by_id(id)
    }

    /// Operation that first produced a face
    pub fn face_operation(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.history.face_owner(fingerprint)
    }

    /// Operation that first produced an edge
    pub fn edge_operation(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.history.edge_owner(fingerprint)
    }

    /// Operation that first produced a face or edge
    pub fn owner_of(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.history.owner_of(fingerprint)
    }

    /// Geometry of a face from any point in history
    pub fn find_face(&self, fingerprint: &Fingerprint, from_end: bool) -> Option<&FaceInfo> {
        self.history
            .find_face(fingerprint, from_end)
            .map(|face| &face.info)
    }

    /// Operation report
    pub fn info(&self) -> Report {
        let auto = self.auto_color();
        Report::from_history(&self.history, auto.as_ref(), &self.config.report)
    }

    /// Write the operation report
    pub fn write_info(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "{}", self.info())
    }
}
