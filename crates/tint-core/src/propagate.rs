//! Color Propagation
//!
//! Walks the history in order and assigns each face of the final solid a
//! color:
//! - Added faces take the color of the face they alias (possibly none), else
//!   the operation color, else an automatic color
//! - Untouched faces keep their color
//! - Altered faces inherit from the faces the operation removed
//!
//! When all removed faces share one color every altered face takes it. An
//! uncolored removed face counts as a color of its own.
//! Otherwise each altered face is matched against the removed faces, first by
//! a shared boundary curve, then by identical kind, frame and center.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{TintError, TintResult};
use crate::fingerprint::Fingerprint;
use crate::history::History;
use crate::operation::Operation;
use crate::palette::AutoColor;
use crate::snapshot::SnapshotFace;
use crate::state::ShapeState;

/// Resolved color of each face, ordered by fingerprint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceColors(BTreeMap<Fingerprint, Color>);

impl FaceColors {
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Color> {
        self.0.get(fingerprint).copied()
    }

    /// Color of a face, or `fallback` when it has none
    pub fn resolve(&self, fingerprint: &Fingerprint, fallback: Color) -> Color {
        self.get(fingerprint).unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, Color)> {
        self.0.iter().map(|(fp, c)| (fp, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the colors of the faces of the last operation
///
/// # Errors
///
/// Returns [`TintError::EmptyHistory`] when nothing was recorded.
pub fn colors_for(history: &History, auto: &dyn AutoColor) -> TintResult<FaceColors> {
    if history.is_empty() {
        return Err(TintError::EmptyHistory);
    }

    let total = history.len();
    let mut colors = BTreeMap::new();
    for op in history.iter() {
        colors = step(history, op, &colors, auto, total);
    }
    Ok(FaceColors(colors))
}

/// Colors after `op`, given the colors before it
fn step(
    history: &History,
    op: &Operation,
    before: &BTreeMap<Fingerprint, Color>,
    auto: &dyn AutoColor,
    total: usize,
) -> BTreeMap<Fingerprint, Color> {
    let own_color = op
        .color()
        .unwrap_or_else(|| auto.auto_color(op.index(), total));

    // Removed faces in previous snapshot order, None when uncolored
    let removed: Vec<(&SnapshotFace, Option<Color>)> = history
        .removed_faces(op)
        .into_iter()
        .map(|face| (face, before.get(&face.fingerprint).copied()))
        .collect();

    let mut distinct: Vec<Option<Color>> = Vec::new();
    for (_, color) in &removed {
        if !distinct.iter().any(|c| same_color(c, color)) {
            distinct.push(*color);
        }
    }

    let mut after = BTreeMap::new();
    for (fingerprint, state) in op.states().faces.iter() {
        let color = match state {
            ShapeState::Removed => continue,
            ShapeState::Untouched => before.get(fingerprint).copied(),
            ShapeState::Added => match op.face_alias().get(fingerprint) {
                Some(old) => before.get(old).copied(),
                None => Some(own_color),
            },
            ShapeState::Altered => match distinct.as_slice() {
                [] => None,
                [only] => *only,
                _ => op
                    .snapshot()
                    .face(fingerprint)
                    .and_then(|face| match_removed(face, &removed)),
            },
        };
        if let Some(color) = color {
            after.insert(fingerprint.clone(), color);
        }
    }
    after
}

/// Uncolored faces form a color of their own
fn same_color(a: &Option<Color>, b: &Option<Color>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_as(b),
        (None, None) => true,
        _ => false,
    }
}

/// Color of the removed face an altered face derives from
///
/// None when nothing matches or when the matched face was uncolored.
fn match_removed(
    face: &SnapshotFace,
    removed: &[(&SnapshotFace, Option<Color>)],
) -> Option<Color> {
    let by_boundary: Vec<&(&SnapshotFace, Option<Color>)> = removed
        .iter()
        .filter(|(r, _)| face.shares_boundary(r))
        .collect();
    let candidates = if by_boundary.is_empty() {
        removed
            .iter()
            .filter(|(r, _)| face.coincides_with(r))
            .collect()
    } else {
        by_boundary
    };

    if candidates.len() > 1 {
        tracing::debug!(
            "Face {} matches {} removed faces, using the first",
            face.fingerprint.short(8),
            candidates.len()
        );
    }
    candidates.first().and_then(|(_, color)| *color)
}

/// Apply debug overrides to computed colors
///
/// Overridden faces take their forced color and every other face turns
/// translucent with the given alpha. Overrides for faces missing from
/// `colors` are added. Without overrides the colors are returned unchanged.
pub fn apply_overrides(
    colors: &FaceColors,
    overrides: &BTreeMap<Fingerprint, Color>,
    alpha: f32,
) -> FaceColors {
    if overrides.is_empty() {
        return colors.clone();
    }

    let mut result: BTreeMap<Fingerprint, Color> = colors
        .iter()
        .map(|(fp, color)| (fp.clone(), color.with_alpha(alpha)))
        .collect();
    for (fp, color) in overrides {
        result.insert(fp.clone(), *color);
    }
    FaceColors(result)
}
