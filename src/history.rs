//! Snapshot-based undo/redo over the watched part of a [`Selection`].
//!
//! The manager keeps the last observed [`WatchedFields`] snapshot. Every time
//! the store has written to the selection it calls [`HistoryManager::observe`];
//! if the watched fields differ from the last snapshot, the previous snapshot
//! is pushed onto the undo stack and the redo stack is cleared.
//!
//! Undo and redo hand back a snapshot to restore. While that restore is being
//! written the manager is disarmed: the next `observe` only records the
//! restored state as the new baseline and re-arms change detection.
//!
//! ```text
//! observe(s1), observe(s2)      past: [s0, s1]  current: s2  future: []
//! undo()                        past: [s0]      current: s1  future: [s2]
//! undo()                        past: []        current: s0  future: [s1, s2]
//! observe(s3)                   past: [s0]      current: s3  future: []
//! ```

use crate::types::{
    Artwork, Background, FrameIndex, FrameStyle, Layout, MeasurementUnit, Offset, Place,
    PrintOrientation, Selection, SpacingPreset,
};
use std::collections::{BTreeMap, VecDeque};

/// The projection of [`Selection`] tracked by undo/redo.
///
/// Filters, cart contents and panel visibility are not part of it. Field
/// meanings follow [`Selection`] and [`crate::types::WallSettings`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedFields {
    pub place: Option<Place>,
    pub background: Option<Background>,
    pub layout: Option<Layout>,
    pub artworks: BTreeMap<FrameIndex, Artwork>,
    pub frames: BTreeMap<FrameIndex, FrameStyle>,
    pub print_orientation: PrintOrientation,
    pub print_style: Option<String>,
    pub print_size: Option<String>,
    pub measurement_unit: MeasurementUnit,
    pub wall_scale: f32,
    pub spacing_preset: SpacingPreset,
    pub spacing_value: f32,
    pub group_offset: Offset,
}

impl WatchedFields {
    /// Captures the watched fields of `selection`.
    pub fn capture(selection: &Selection) -> Self {
        Self {
            place: selection.selected_place.clone(),
            background: selection.selected_background.clone(),
            layout: selection.selected_layout.clone(),
            artworks: selection.selected_artworks.clone(),
            frames: selection.selected_frames.clone(),
            print_orientation: selection.wall.print_orientation,
            print_style: selection.wall.print_style.clone(),
            print_size: selection.wall.print_size.clone(),
            measurement_unit: selection.wall.measurement_unit,
            wall_scale: selection.wall.wall_scale,
            spacing_preset: selection.wall.spacing_preset,
            spacing_value: selection.wall.spacing_value,
            group_offset: selection.group_offset,
        }
    }

    /// Writes the snapshot back into `selection`, leaving unwatched fields alone.
    pub fn restore_into(self, selection: &mut Selection) {
        selection.selected_place = self.place;
        selection.selected_background = self.background;
        selection.selected_layout = self.layout;
        selection.selected_artworks = self.artworks;
        selection.selected_frames = self.frames;
        selection.wall.print_orientation = self.print_orientation;
        selection.wall.print_style = self.print_style;
        selection.wall.print_size = self.print_size;
        selection.wall.measurement_unit = self.measurement_unit;
        selection.wall.wall_scale = self.wall_scale;
        selection.wall.spacing_preset = self.spacing_preset;
        selection.wall.spacing_value = self.spacing_value;
        selection.group_offset = self.group_offset;
    }
}

/// Linear undo/redo history of [`WatchedFields`] snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Older snapshots, most recent at the back
    past: VecDeque<WatchedFields>,
    /// Undone snapshots, next redo at the front
    future: VecDeque<WatchedFields>,
    /// Last observed snapshot
    current: WatchedFields,
    /// Set while a restored snapshot waits to be observed
    restoring: bool,
    max_depth: usize,
}

impl HistoryManager {
    /// Creates a history whose baseline is `initial`.
    pub fn new(initial: WatchedFields, max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            current: initial,
            restoring: false,
            max_depth: max_depth.max(1),
        }
    }

    /// Records the state after a write.
    ///
    /// Returns `true` when a new history entry was created.
    pub fn observe(&mut self, latest: WatchedFields) -> bool {
        if self.restoring {
            self.restoring = false;
            self.current = latest;
            return false;
        }
        if latest == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, latest);
        self.push_past(previous);
        self.future.clear();
        log::debug!("history: recorded change, {} undo entries", self.past.len());
        true
    }

    /// Steps back one entry. Returns the snapshot to write into the selection.
    pub fn undo(&mut self) -> Option<WatchedFields> {
        let target = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.current, target.clone());
        self.future.push_front(current);
        self.restoring = true;
        log::debug!("history: undo, {} undo / {} redo", self.past.len(), self.future.len());
        Some(target)
    }

    /// Steps forward one entry. Returns the snapshot to write into the selection.
    pub fn redo(&mut self) -> Option<WatchedFields> {
        let target = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.current, target.clone());
        self.push_past(current);
        self.restoring = true;
        log::debug!("history: redo, {} undo / {} redo", self.past.len(), self.future.len());
        Some(target)
    }

    /// Drops all entries and makes `baseline` the current state.
    pub fn reset(&mut self, baseline: WatchedFields) {
        self.past.clear();
        self.future.clear();
        self.current = baseline;
        self.restoring = false;
    }

    /// Returns true if there are entries that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns true if there are entries that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo entries.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redo entries.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self, snapshot: WatchedFields) {
        self.past.push_back(snapshot);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_offset(x: f32) -> WatchedFields {
        let mut selection = Selection::default();
        selection.group_offset = Offset::new(x, 0.0);
        WatchedFields::capture(&selection)
    }

    #[test]
    fn observe_ignores_unchanged_state() {
        let mut history = HistoryManager::new(with_offset(0.0), 50);
        assert!(!history.observe(with_offset(0.0)));
        assert!(!history.can_undo());
        assert!(history.observe(with_offset(1.0)));
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn undo_and_redo_walk_the_stacks() {
        let mut history = HistoryManager::new(with_offset(0.0), 50);
        history.observe(with_offset(1.0));
        history.observe(with_offset(2.0));

        let restored = history.undo().unwrap();
        assert_eq!(restored, with_offset(1.0));
        // The restore write must not become a new entry.
        assert!(!history.observe(restored));
        assert!(history.can_redo());

        let restored = history.redo().unwrap();
        assert_eq!(restored, with_offset(2.0));
        history.observe(restored);
        assert_eq!(history.undo_depth(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut history = HistoryManager::new(with_offset(0.0), 50);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn new_change_clears_redo() {
        let mut history = HistoryManager::new(with_offset(0.0), 50);
        history.observe(with_offset(1.0));
        let restored = history.undo().unwrap();
        history.observe(restored);
        assert!(history.can_redo());
        history.observe(with_offset(5.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn depth_is_bounded_dropping_oldest() {
        let mut history = HistoryManager::new(with_offset(0.0), 50);
        for i in 1..=60 {
            history.observe(with_offset(i as f32));
        }
        assert_eq!(history.undo_depth(), 50);
        let mut last = None;
        while let Some(s) = history.undo() {
            history.observe(s.clone());
            last = Some(s);
        }
        // Oldest ten entries (0..=9) were evicted.
        assert_eq!(last, Some(with_offset(10.0)));
    }

    proptest! {
        #[test]
        fn n_undos_return_to_start_and_n_redos_come_back(n in 1usize..=50) {
            let mut history = HistoryManager::new(with_offset(0.0), 50);
            for i in 1..=n {
                history.observe(with_offset(i as f32));
            }
            let mut state = with_offset(n as f32);
            for _ in 0..n {
                state = history.undo().unwrap();
                history.observe(state.clone());
            }
            prop_assert_eq!(&state, &with_offset(0.0));
            for _ in 0..n {
                state = history.redo().unwrap();
                history.observe(state.clone());
            }
            prop_assert_eq!(&state, &with_offset(n as f32));
        }
    }
}
