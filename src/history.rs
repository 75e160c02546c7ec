use std::collections::VecDeque;

use crate::document::StrokeList;

/// Bounded stack of stroke-list snapshots for undo.
///
/// Snapshots are stored by value, so later edits to the live list never
/// reach a stored state. Pushing past capacity drops the oldest snapshot.
/// There is no redo.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: VecDeque<StrokeList>,
    capacity: usize,
}

impl SnapshotHistory {
    /// Creates an empty history holding at most `capacity` snapshots
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a copy of `strokes` as the state to return to on undo
    pub fn snapshot(&mut self, strokes: &StrokeList) {
        self.snapshots.push_back(strokes.clone());
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Pop the most recent snapshot, or `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<StrokeList> {
        self.snapshots.pop_back()
    }

    /// Returns true if there are snapshots that can be restored
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Stroke, StrokePoint};
    use egui::pos2;

    fn list_of(n: usize) -> StrokeList {
        (0..n)
            .map(|i| {
                Stroke::from_samples(
                    "#000000",
                    2.0,
                    &[StrokePoint::new(pos2(i as f32, 0.0), 0.0)],
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_undo_on_empty_is_none() {
        let mut history = SnapshotHistory::new(3);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_returns_most_recent_first() {
        let mut history = SnapshotHistory::new(5);
        history.snapshot(&list_of(0));
        history.snapshot(&list_of(1));
        assert_eq!(history.undo(), Some(list_of(1)));
        assert_eq!(history.undo(), Some(list_of(0)));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SnapshotHistory::new(20);
        for n in 0..25 {
            history.snapshot(&list_of(n));
        }
        assert_eq!(history.len(), 20);

        let mut restored = Vec::new();
        while let Some(list) = history.undo() {
            restored.push(list.len());
        }
        assert_eq!(restored.len(), 20);
        assert_eq!(restored.first(), Some(&24));
        assert_eq!(restored.last(), Some(&5));
    }

    #[test]
    fn test_zero_capacity_keeps_one_snapshot() {
        let mut history = SnapshotHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.snapshot(&list_of(1));
        history.snapshot(&list_of(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.undo(), Some(list_of(2)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut history = SnapshotHistory::default();
        let mut live = list_of(1);
        history.snapshot(&live);
        live.push(list_of(1).last().unwrap().clone());
        assert_eq!(history.undo().unwrap().len(), 1);
    }
}
