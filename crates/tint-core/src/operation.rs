//! One recorded modeling step

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::fingerprint::Fingerprint;
use crate::snapshot::Snapshot;
use crate::state::{Classification, ShapeState, StateMap};

/// Maps a face fingerprint produced by an operation to the fingerprint of
/// the face it stands for in the previous solid
pub type AliasMap = BTreeMap<Fingerprint, Fingerprint>;

/// Kind of modeling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Add,
    Sub,
    Intersect,
    Move,
    Fillet,
    Chamfer,
}

impl OperationKind {
    /// Short name used in operation identifiers
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Intersect => "inter",
            Self::Move => "move",
            Self::Fillet => "fillet",
            Self::Chamfer => "chamfer",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded operation: the resulting snapshot and what changed
#[derive(Debug, Clone)]
pub struct Operation {
    index: usize,
    kind: OperationKind,
    id: String,
    color: Option<Color>,
    snapshot: Snapshot,
    states: Classification,
    face_alias: AliasMap,
}

impl Operation {
    pub(crate) fn new(
        index: usize,
        kind: OperationKind,
        color: Option<Color>,
        snapshot: Snapshot,
        states: Classification,
        face_alias: AliasMap,
    ) -> Self {
        Self {
            index,
            kind,
            id: format!("{}-{index}", kind.name()),
            color,
            snapshot,
            states,
            face_alias,
        }
    }

    /// Position in the history
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Identifier of the form `"{kind}-{index}"`, unique within a history
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Explicit color, if one was given
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Snapshot of the solid after this operation
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn states(&self) -> &Classification {
        &self.states
    }

    pub fn face_alias(&self) -> &AliasMap {
        &self.face_alias
    }

    /// State of a face in this operation
    pub fn face_state(&self, fingerprint: &Fingerprint) -> Option<ShapeState> {
        self.states.faces.get(fingerprint)
    }

    /// State of an edge in this operation
    pub fn edge_state(&self, fingerprint: &Fingerprint) -> Option<ShapeState> {
        self.states.edges.get(fingerprint)
    }

    /// Faces in the given state
    pub fn faces_with(&self, state: ShapeState) -> impl Iterator<Item = &Fingerprint> {
        self.states.faces.with_state(state)
    }

    /// Edges in the given state
    pub fn edges_with(&self, state: ShapeState) -> impl Iterator<Item = &Fingerprint> {
        self.states.edges.with_state(state)
    }

    /// Added, altered and removed face counts
    pub fn face_counts(&self) -> [usize; 3] {
        counts(&self.states.faces)
    }

    /// Added, altered and removed edge counts
    pub fn edge_counts(&self) -> [usize; 3] {
        counts(&self.states.edges)
    }
}

fn counts(map: &StateMap) -> [usize; 3] {
    [
        map.count(ShapeState::Added),
        map.count(ShapeState::Altered),
        map.count(ShapeState::Removed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::classify;
    use crate::testing::{box_faces, p, snapshot_of};

    #[test]
    fn test_id_format() {
        let snapshot = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let states = classify(&snapshot, None);
        let op = Operation::new(3, OperationKind::Intersect, None, snapshot, states, AliasMap::new());

        assert_eq!(op.id(), "inter-3");
        assert_eq!(op.index(), 3);
        assert_eq!(op.face_counts(), [6, 0, 0]);
        assert_eq!(op.edge_counts(), [12, 0, 0]);
        assert_eq!(op.faces_with(ShapeState::Added).count(), 6);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(OperationKind::Add.to_string(), "add");
        assert_eq!(OperationKind::Sub.name(), "sub");
        assert_eq!(OperationKind::Chamfer.name(), "chamfer");
    }
}
