//! Operation History
//!
//! Append-only list of recorded operations. Each operation is classified
//! against the one before it when appended and never changes afterwards.

use crate::color::Color;
use crate::diff::classify;
use crate::error::{TintError, TintResult};
use crate::fingerprint::Fingerprint;
use crate::operation::{AliasMap, Operation, OperationKind};
use crate::snapshot::{Snapshot, SnapshotFace};
use crate::state::ShapeState;

/// Ordered list of operations applied to a solid
#[derive(Debug, Clone, Default)]
pub struct History {
    operations: Vec<Operation>,
}

impl History {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Record an operation
    ///
    /// The snapshot is classified against the snapshot of the last operation.
    pub fn append(
        &mut self,
        kind: OperationKind,
        snapshot: Snapshot,
        color: Option<Color>,
        face_alias: AliasMap,
    ) -> &Operation {
        let index = self.operations.len();
        let states = classify(&snapshot, self.operations.last().map(Operation::snapshot));

        tracing::debug!(
            "Recorded {}-{}: faces +{} ~{} -{}, edges +{} ~{} -{}",
            kind,
            index,
            states.faces.count(ShapeState::Added),
            states.faces.count(ShapeState::Altered),
            states.faces.count(ShapeState::Removed),
            states.edges.count(ShapeState::Added),
            states.edges.count(ShapeState::Altered),
            states.edges.count(ShapeState::Removed),
        );

        self.operations.push(Operation::new(
            index, kind, color, snapshot, states, face_alias,
        ));
        &self.operations[index]
    }

    /// Get an operation by index
    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    /// Get an operation by its `"{kind}-{index}"` identifier
    pub fn lookup_by_id(&self, id: &str) -> TintResult<&Operation> {
        self.operations
            .iter()
            .find(|op| op.id() == id)
            .ok_or_else(|| TintError::not_found("operation", id))
    }

    /// The most recent operation
    pub fn last(&self) -> TintResult<&Operation> {
        self.operations.last().ok_or(TintError::EmptyHistory)
    }

    /// The operation before `op`
    pub fn previous(&self, op: &Operation) -> Option<&Operation> {
        op.index().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Get all operations in order
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// First operation whose faces or edges mention `fingerprint`
    pub fn owner_of(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.operations
            .iter()
            .find(|op| op.face_state(fingerprint).is_some() || op.edge_state(fingerprint).is_some())
            .ok_or_else(|| TintError::not_found("shape", fingerprint))
    }

    /// First operation whose faces mention `fingerprint`
    pub fn face_owner(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.operations
            .iter()
            .find(|op| op.face_state(fingerprint).is_some())
            .ok_or_else(|| TintError::not_found("face", fingerprint))
    }

    /// First operation whose edges mention `fingerprint`
    pub fn edge_owner(&self, fingerprint: &Fingerprint) -> TintResult<&Operation> {
        self.operations
            .iter()
            .find(|op| op.edge_state(fingerprint).is_some())
            .ok_or_else(|| TintError::not_found("edge", fingerprint))
    }

    /// Faces removed by `op`, as they were in the previous snapshot
    ///
    /// The result keeps the order of the previous snapshot.
    pub fn removed_faces<'a>(&'a self, op: &Operation) -> Vec<&'a SnapshotFace> {
        let Some(previous) = self.previous(op) else {
            return Vec::new();
        };
        previous
            .snapshot()
            .faces()
            .iter()
            .filter(|f| op.face_state(&f.fingerprint) == Some(ShapeState::Removed))
            .collect()
    }

    /// Locate the geometry of a face in any snapshot
    ///
    /// Snapshots are searched from the most recent one when `from_end` is set,
    /// from the first one otherwise.
    pub fn find_face(&self, fingerprint: &Fingerprint, from_end: bool) -> Option<&SnapshotFace> {
        let has_face = |op: &&Operation| op.snapshot().contains_face(fingerprint);
        let op = if from_end {
            self.operations.iter().rev().find(has_face)
        } else {
            self.operations.iter().find(has_face)
        };
        op.and_then(|op| op.snapshot().face(fingerprint))
    }
}
