// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::math::{Vec2, Vec3};
use thiserror::Error;

use crate::{AlignmentVector, Axis, AxisKey, SavedVectors, TransformMode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("nothing is selected")]
    NoSelection,
    #[error("an alignment vector needs a previously selected object")]
    NoPreviousSelection,
    #[error("an alignment vector needs two different objects")]
    SameObject,
    #[error("vector alignment needs two saved vectors, found {0}")]
    NotEnoughVectors(usize),
}

/// Per-gesture state, reset whenever the mode, axis or selection changes.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Translating {
        plane_point: Vec3,
        plane_normal: Vec3,
        last_hit: Vec3,
    },
    Rotating {
        /// Cursor position relative to the object's screen position.
        last_offset: Vec2,
    },
}

#[derive(Debug, Clone)]
pub struct TransformManager<Id> {
    selected: Option<Id>,
    last_selected: Option<Id>,
    mode: TransformMode,
    axis: Axis,
    vectors: SavedVectors<Id>,
    origin: Vec3,
    pub drag: DragState,
}

impl<Id> Default for TransformManager<Id> {
    fn default() -> Self {
        Self {
            selected: None,
            last_selected: None,
            mode: TransformMode::None,
            axis: Axis::None,
            vectors: SavedVectors::default(),
            origin: Vec3::ZERO,
            drag: DragState::Idle,
        }
    }
}

impl<Id: Copy + PartialEq> TransformManager<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Id> {
        self.selected
    }

    pub fn last_selected(&self) -> Option<Id> {
        self.last_selected
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn vectors(&self) -> &SavedVectors<Id> {
        &self.vectors
    }

    pub fn vectors_mut(&mut self) -> &mut SavedVectors<Id> {
        &mut self.vectors
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn select(&mut self, id: Id) {
        if self.selected != Some(id) {
            self.last_selected = self.selected;
            self.selected = Some(id);
        }
        self.drag = DragState::Idle;
    }

    /// Drops every reference to an object that no longer exists.
    pub fn forget(&mut self, id: Id) {
        if self.selected == Some(id) {
            self.selected = None;
            self.drag = DragState::Idle;
        }
        if self.last_selected == Some(id) {
            self.last_selected = None;
        }
        self.vectors.forget(id);
    }

    pub fn toggle_mode(&mut self, mode: TransformMode) {
        self.mode = self.mode.toggled(mode);
        self.drag = DragState::Idle;
    }

    pub fn stop(&mut self) {
        self.mode = TransformMode::None;
        self.drag = DragState::Idle;
    }

    pub fn cycle_axis(&mut self, key: AxisKey) {
        self.axis = self.axis.cycled(key);
        self.drag = DragState::Idle;
    }

    /// Saves the offset from the previously selected object to the current
    /// one.  `parent_of` names the molecule an atom belongs to.
    pub fn save_vector(
        &mut self,
        parent_of: impl FnOnce(Id) -> Option<Id>,
    ) -> Result<&AlignmentVector<Id>, TransformError> {
        let end = self.selected.ok_or(TransformError::NoSelection)?;
        let start = self
            .last_selected
            .ok_or(TransformError::NoPreviousSelection)?;
        if start == end {
            return Err(TransformError::SameObject);
        }
        self.vectors.push(AlignmentVector {
            start,
            end,
            parent: parent_of(start),
        });
        self.vectors.last(0).ok_or(TransformError::NotEnoughVectors(0))
    }

    pub fn clear_vectors(&mut self) {
        self.vectors.clear();
    }

    /// The latest vector and the one before it, as used by vector alignment.
    pub fn alignment_pair(
        &self,
    ) -> Result<(&AlignmentVector<Id>, &AlignmentVector<Id>), TransformError> {
        match (self.vectors.last(0), self.vectors.last(1)) {
            (Some(latest), Some(previous)) => Ok((latest, previous)),
            _ => Err(TransformError::NotEnoughVectors(self.vectors.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_remembers_previous_object() {
        let mut manager = TransformManager::new();
        manager.select(1u32);
        manager.select(2);
        assert_eq!(manager.selected(), Some(2));
        assert_eq!(manager.last_selected(), Some(1));
        manager.select(2);
        assert_eq!(manager.last_selected(), Some(1));
    }

    #[test]
    fn mode_changes_reset_the_gesture() {
        let mut manager = TransformManager::<u32>::new();
        manager.toggle_mode(TransformMode::Rotation);
        manager.drag = DragState::Rotating {
            last_offset: Vec2::ONE,
        };
        manager.cycle_axis(AxisKey::X);
        assert_eq!(manager.drag, DragState::Idle);
        assert_eq!(manager.axis(), Axis::X);
        assert_eq!(manager.mode(), TransformMode::Rotation);
        manager.stop();
        assert_eq!(manager.mode(), TransformMode::None);
        manager.toggle_mode(TransformMode::Translation);
        manager.toggle_mode(TransformMode::Translation);
        assert_eq!(manager.mode(), TransformMode::None);
    }

    #[test]
    fn save_vector_needs_two_distinct_selections() {
        let mut manager = TransformManager::<u32>::new();
        assert_eq!(manager.save_vector(|_| None), Err(TransformError::NoSelection));
        manager.select(1);
        assert_eq!(
            manager.save_vector(|_| None),
            Err(TransformError::NoPreviousSelection)
        );
        manager.select(2);
        let saved = *manager.save_vector(|id| Some(id + 100)).unwrap();
        assert_eq!(
            saved,
            AlignmentVector {
                start: 1,
                end: 2,
                parent: Some(101)
            }
        );
    }

    #[test]
    fn alignment_pair_orders_latest_first() {
        let mut manager = TransformManager::<u32>::new();
        manager.select(1);
        manager.select(2);
        manager.save_vector(|_| None).unwrap();
        assert_eq!(
            manager.alignment_pair().err(),
            Some(TransformError::NotEnoughVectors(1))
        );
        manager.select(3);
        manager.save_vector(|_| None).unwrap();
        let (latest, previous) = manager.alignment_pair().unwrap();
        assert_eq!((latest.start, latest.end), (2, 3));
        assert_eq!((previous.start, previous.end), (1, 2));
        manager.clear_vectors();
        assert!(manager.vectors().is_empty());
    }

    #[test]
    fn forgetting_an_object_clears_references() {
        let mut manager = TransformManager::<u32>::new();
        manager.select(1);
        manager.select(2);
        manager.save_vector(|_| None).unwrap();
        manager.forget(1);
        assert_eq!(manager.last_selected(), None);
        assert_eq!(manager.selected(), Some(2));
        assert!(manager.vectors().is_empty());
        manager.forget(2);
        assert_eq!(manager.selected(), None);
    }
}

// End of File
