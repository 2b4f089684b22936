//! Classification of the shapes of a snapshot against its predecessor

use crate::snapshot::Snapshot;
use crate::state::{Classification, ShapeState, StateMap};

/// Classify faces and edges of `current` relative to `previous`
///
/// A face present in both snapshots is untouched. A new face is altered when
/// one of its boundary curves already existed, and added otherwise. Edges
/// follow the same rule through their vertices. Shapes of `previous` that are
/// gone from `current` are removed. Without a predecessor everything is added.
pub fn classify(current: &Snapshot, previous: Option<&Snapshot>) -> Classification {
    let mut faces = StateMap::default();
    let mut edges = StateMap::default();

    let Some(previous) = previous else {
        for face in current.faces() {
            faces.insert(face.fingerprint.clone(), ShapeState::Added);
        }
        for edge in current.edges() {
            edges.insert(edge.fingerprint.clone(), ShapeState::Added);
        }
        return Classification { faces, edges };
    };

    for face in current.faces() {
        let state = if previous.contains_face(&face.fingerprint) {
            ShapeState::Untouched
        } else if face.edges.iter().any(|e| previous.contains_edge(e)) {
            ShapeState::Altered
        } else {
            ShapeState::Added
        };
        faces.insert(face.fingerprint.clone(), state);
    }
    for face in previous.faces() {
        if !current.contains_face(&face.fingerprint) {
            faces.insert(face.fingerprint.clone(), ShapeState::Removed);
        }
    }

    for edge in current.edges() {
        let state = if previous.contains_edge(&edge.fingerprint) {
            ShapeState::Untouched
        } else if edge.vertices.iter().any(|v| previous.contains_vertex(v)) {
            ShapeState::Altered
        } else {
            ShapeState::Added
        };
        edges.insert(edge.fingerprint.clone(), state);
    }
    for edge in previous.edges() {
        if !current.contains_edge(&edge.fingerprint) {
            edges.insert(edge.fingerprint.clone(), ShapeState::Removed);
        }
    }

    Classification { faces, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{box_faces, p, snapshot_of};
    use tint_cad::{EdgeInfo, FaceInfo};

    #[test]
    fn test_first_snapshot_is_all_added() {
        let current = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let result = classify(&current, None);

        assert_eq!(result.faces.count(ShapeState::Added), 6);
        assert_eq!(result.edges.count(ShapeState::Added), 12);
        assert_eq!(result.faces.len(), 6);
    }

    #[test]
    fn test_identical_snapshots_are_untouched() {
        let current = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let result = classify(&current, Some(&current));

        assert_eq!(result.faces.count(ShapeState::Untouched), 6);
        assert_eq!(result.edges.count(ShapeState::Untouched), 12);
        assert_eq!(result.faces.count(ShapeState::Removed), 0);
    }

    #[test]
    fn test_disjoint_snapshots() {
        let previous = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let current = snapshot_of(&box_faces(p(5.0, 5.0, 5.0), p(6.0, 6.0, 6.0)));
        let result = classify(&current, Some(&previous));

        assert_eq!(result.faces.count(ShapeState::Added), 6);
        assert_eq!(result.faces.count(ShapeState::Removed), 6);
        assert_eq!(result.edges.count(ShapeState::Added), 12);
        assert_eq!(result.edges.count(ShapeState::Removed), 12);
    }

    #[test]
    fn test_shared_boundary_marks_altered() {
        // Splitting the top of a unit square: the new halves reuse two of the
        // old boundary curves
        let a = p(0.0, 0.0, 0.0);
        let b = p(2.0, 0.0, 0.0);
        let c = p(2.0, 1.0, 0.0);
        let d = p(0.0, 1.0, 0.0);
        let m0 = p(1.0, 0.0, 0.0);
        let m1 = p(1.0, 1.0, 0.0);

        let whole = FaceInfo::planar(vec![
            EdgeInfo::line(a, b),
            EdgeInfo::line(b, c),
            EdgeInfo::line(c, d),
            EdgeInfo::line(d, a),
        ]);
        let left = FaceInfo::planar(vec![
            EdgeInfo::line(a, m0),
            EdgeInfo::line(m0, m1),
            EdgeInfo::line(m1, d),
            EdgeInfo::line(d, a),
        ]);
        let right = FaceInfo::planar(vec![
            EdgeInfo::line(m0, b),
            EdgeInfo::line(b, c),
            EdgeInfo::line(c, m1),
            EdgeInfo::line(m1, m0),
        ]);

        let previous = snapshot_of(&[whole]);
        let current = snapshot_of(&[left, right]);
        let result = classify(&current, Some(&previous));

        assert_eq!(result.faces.count(ShapeState::Altered), 2);
        assert_eq!(result.faces.count(ShapeState::Removed), 1);
        // d-a and b-c survive; the new segments touch old corners
        assert_eq!(result.edges.count(ShapeState::Untouched), 2);
        assert_eq!(result.edges.count(ShapeState::Removed), 2);
        assert!(result.edges.count(ShapeState::Altered) >= 4);
    }

    #[test]
    fn test_states_partition_union() {
        let previous = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0)));
        let current = snapshot_of(&box_faces(p(0.0, 0.0, 0.0), p(2.0, 2.0, 3.0)));
        let result = classify(&current, Some(&previous));

        for face in current.faces() {
            let state = result.faces.get(&face.fingerprint).unwrap();
            assert_ne!(state, ShapeState::Removed);
        }
        for face in previous.faces() {
            if !current.contains_face(&face.fingerprint) {
                assert_eq!(result.faces.get(&face.fingerprint), Some(ShapeState::Removed));
            }
        }
        let total = [
            ShapeState::Added,
            ShapeState::Altered,
            ShapeState::Untouched,
            ShapeState::Removed,
        ]
        .iter()
        .map(|s| result.faces.count(*s))
        .sum::<usize>();
        assert_eq!(total, result.faces.len());
        // Bottom survives, four sides stretch, top moves
        assert_eq!(result.faces.count(ShapeState::Untouched), 1);
        assert_eq!(result.faces.count(ShapeState::Altered), 4);
        assert_eq!(result.faces.count(ShapeState::Added), 1);
        assert_eq!(result.faces.count(ShapeState::Removed), 5);
    }
}
