// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::collections::VecDeque;

use bevy::math::Vec3;

/// A directed offset between two objects, remembered for snapping.  The
/// offset is recomputed from the objects' current positions every time it is
/// asked for, so it tracks them as they move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AlignmentVector<Id> {
    pub start: Id,
    pub end: Id,
    /// The molecule the start object belongs to, if it is an atom.
    pub parent: Option<Id>,
}

impl<Id: Copy + PartialEq> AlignmentVector<Id> {
    pub fn vector(&self, position_of: impl Fn(Id) -> Option<Vec3>) -> Vec3 {
        match (position_of(self.start), position_of(self.end)) {
            (Some(start), Some(end)) => end - start,
            _ => Vec3::ZERO,
        }
    }

    pub fn start_position(&self, position_of: impl Fn(Id) -> Option<Vec3>) -> Vec3 {
        position_of(self.start).unwrap_or(Vec3::ZERO)
    }

    pub fn involves(&self, id: Id) -> bool {
        self.start == id || self.end == id || self.parent == Some(id)
    }
}

/// The two most recently saved alignment vectors.
#[derive(Debug, Clone)]
pub struct SavedVectors<Id> {
    vectors: VecDeque<AlignmentVector<Id>>,
}

impl<Id> Default for SavedVectors<Id> {
    fn default() -> Self {
        Self {
            vectors: VecDeque::with_capacity(Self::CAPACITY + 1),
        }
    }
}

impl<Id> SavedVectors<Id> {
    pub const CAPACITY: usize = 2;
}

impl<Id: Copy + PartialEq> SavedVectors<Id> {
    pub fn push(&mut self, vector: AlignmentVector<Id>) {
        self.vectors.push_back(vector);
        while self.vectors.len() > Self::CAPACITY {
            self.vectors.pop_front();
        }
    }

    /// `last(0)` is the most recent vector, `last(1)` the one before it.
    pub fn last(&self, index: usize) -> Option<&AlignmentVector<Id>> {
        let len = self.vectors.len();
        if index < len {
            self.vectors.get(len - index - 1)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn clear(&mut self) {
        self.vectors.clear();
    }

    pub fn retain_valid(&mut self, alive: impl Fn(Id) -> bool) {
        self.vectors
            .retain(|v| alive(v.start) && alive(v.end) && v.parent.map_or(true, &alive));
    }

    pub(crate) fn forget(&mut self, id: Id) {
        self.vectors.retain(|v| !v.involves(id));
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AlignmentVector<Id>> {
        self.vectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(start: u32, end: u32) -> AlignmentVector<u32> {
        AlignmentVector {
            start,
            end,
            parent: None,
        }
    }

    #[test]
    fn keeps_only_the_two_most_recent() {
        let mut saved = SavedVectors::default();
        saved.push(v(1, 2));
        saved.push(v(2, 3));
        saved.push(v(3, 4));
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.last(0), Some(&v(3, 4)));
        assert_eq!(saved.last(1), Some(&v(2, 3)));
        assert_eq!(saved.last(2), None);
        let order: Vec<_> = saved.iter().map(|v| v.start).collect();
        assert_eq!(order, [2, 3]);
    }

    #[test]
    fn vector_tracks_positions_and_missing_objects() {
        let position_of = |id: u32| match id {
            1 => Some(Vec3::new(1.0, 0.0, 0.0)),
            2 => Some(Vec3::new(1.0, 2.0, 0.0)),
            _ => None,
        };
        assert_eq!(v(1, 2).vector(position_of), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(v(1, 9).vector(position_of), Vec3::ZERO);
        assert_eq!(v(1, 2).start_position(position_of), Vec3::X);
        assert_eq!(v(9, 2).start_position(position_of), Vec3::ZERO);
    }

    #[test]
    fn retain_and_forget_drop_dead_references() {
        let mut saved = SavedVectors::default();
        saved.push(AlignmentVector {
            start: 1,
            end: 2,
            parent: Some(10),
        });
        saved.push(v(3, 4));
        saved.retain_valid(|id| id != 10);
        assert_eq!(saved.len(), 1);
        saved.forget(4);
        assert!(saved.is_empty());
    }
}

// End of File
