//! Per-operation shape states

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// What an operation did to a face or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeState {
    /// New geometry with no link to the previous solid
    Added,
    /// New geometry touching the previous solid
    Altered,
    /// Present before and after
    Untouched,
    /// Present before, gone after
    Removed,
}

impl ShapeState {
    /// One-character marker used in reports
    pub fn symbol(self) -> char {
        match self {
            Self::Added => '+',
            Self::Altered => '~',
            Self::Untouched => '=',
            Self::Removed => '-',
        }
    }
}

impl fmt::Display for ShapeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "added",
            Self::Altered => "altered",
            Self::Untouched => "untouched",
            Self::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// State of every shape involved in one operation, ordered by fingerprint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMap(BTreeMap<Fingerprint, ShapeState>);

impl StateMap {
    pub(crate) fn insert(&mut self, fingerprint: Fingerprint, state: ShapeState) {
        self.0.insert(fingerprint, state);
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<ShapeState> {
        self.0.get(fingerprint).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, ShapeState)> {
        self.0.iter().map(|(fp, state)| (fp, *state))
    }

    /// Fingerprints in the given state
    pub fn with_state(&self, state: ShapeState) -> impl Iterator<Item = &Fingerprint> {
        self.0
            .iter()
            .filter(move |(_, s)| **s == state)
            .map(|(fp, _)| fp)
    }

    pub fn count(&self, state: ShapeState) -> usize {
        self.with_state(state).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Face and edge states of one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub faces: StateMap,
    pub edges: StateMap,
}
