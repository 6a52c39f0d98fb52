//! Pointer-driven positioning of the frame group and of individual frames.
//!
//! The engine only tracks the drag in flight. Committed offsets live in the
//! [`Selection`](crate::types::Selection); the engine reads them when the
//! pointer moves and hands back what should be committed on release.
//!
//! Group drags are bounded: past the [`Boundary`] the pointer keeps moving the
//! group, but only by `resistance` times the overshoot, and the release clamps
//! hard to the boundary. Individual drags are unbounded.

use crate::config::{Boundary, DragConfig};
use crate::types::{FrameIndex, Offset};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActiveDrag {
    Group {
        start: Offset,
        delta: Offset,
    },
    Individual {
        index: FrameIndex,
        start: Offset,
        base: Offset,
        delta: Offset,
    },
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCommit {
    /// New committed group offset
    Group(Offset),
    /// New committed offset of one frame
    Individual {
        /// Frame slot that was dragged
        index: FrameIndex,
        /// Its new offset
        offset: Offset,
    },
}

/// Tracks at most one drag at a time.
#[derive(Debug, Clone)]
pub struct DragEngine {
    config: DragConfig,
    active: Option<ActiveDrag>,
    has_dragged: bool,
}

impl DragEngine {
    /// Creates an idle engine.
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            active: None,
            has_dragged: false,
        }
    }

    /// Engine tuning.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Starts dragging the whole group from `pointer`. Replaces any drag in flight.
    pub fn begin_group(&mut self, pointer: Offset) {
        self.active = Some(ActiveDrag::Group {
            start: pointer,
            delta: Offset::ZERO,
        });
        self.has_dragged = false;
    }

    /// Starts dragging one frame whose committed offset is `committed`.
    pub fn begin_individual(&mut self, index: FrameIndex, pointer: Offset, committed: Offset) {
        self.active = Some(ActiveDrag::Individual {
            index,
            start: pointer,
            base: committed,
            delta: Offset::ZERO,
        });
        self.has_dragged = false;
    }

    /// Feeds a pointer move. `committed_group` is the current committed group offset.
    ///
    /// Moves are ignored when no drag is active.
    pub fn update(&mut self, pointer: Offset, committed_group: Offset) {
        let config = self.config;
        match self.active.as_mut() {
            Some(ActiveDrag::Group { start, delta }) => {
                let raw = pointer - *start;
                if exceeds(raw, config.group_threshold) {
                    self.has_dragged = true;
                }
                *delta = elastic_delta(committed_group, raw, &config.boundary, config.resistance);
            }
            Some(ActiveDrag::Individual { start, delta, .. }) => {
                let raw = pointer - *start;
                if exceeds(raw, config.individual_threshold) {
                    self.has_dragged = true;
                }
                *delta = raw;
            }
            None => {}
        }
    }

    /// Ends the drag in flight and returns what to commit.
    pub fn end(&mut self, committed_group: Offset) -> Option<DragCommit> {
        match self.active.take()? {
            ActiveDrag::Group { delta, .. } => Some(DragCommit::Group(clamp_offset(
                committed_group + delta,
                &self.config.boundary,
            ))),
            ActiveDrag::Individual {
                index, base, delta, ..
            } => Some(DragCommit::Individual {
                index,
                offset: base + delta,
            }),
        }
    }

    /// Abandons the drag in flight without committing anything.
    pub fn cancel(&mut self) {
        self.active = None;
        self.has_dragged = false;
    }

    /// Whether a drag is in flight.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the current (or last released) press moved past the drag threshold.
    ///
    /// Click handlers use this to tell a tap from the end of a drag.
    pub fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    /// In-flight delta of the group drag, zero when none is active.
    pub fn group_delta(&self) -> Offset {
        match self.active {
            Some(ActiveDrag::Group { delta, .. }) => delta,
            _ => Offset::ZERO,
        }
    }

    /// In-flight offset of the frame being dragged individually.
    pub fn individual_preview(&self) -> Option<(FrameIndex, Offset)> {
        match self.active {
            Some(ActiveDrag::Individual {
                index, base, delta, ..
            }) => Some((index, base + delta)),
            _ => None,
        }
    }
}

/// Delta to apply on top of `committed` for a raw pointer movement, with
/// elastic resistance outside `boundary`.
pub fn elastic_delta(committed: Offset, raw: Offset, boundary: &Boundary, resistance: f32) -> Offset {
    Offset::new(
        elastic_axis(committed.x, raw.x, -boundary.left, boundary.right, resistance),
        elastic_axis(committed.y, raw.y, -boundary.top, boundary.bottom, resistance),
    )
}

fn elastic_axis(committed: f32, raw: f32, min: f32, max: f32, resistance: f32) -> f32 {
    let total = committed + raw;
    if total > max {
        max - committed + (total - max) * resistance
    } else if total < min {
        min - committed - (min - total) * resistance
    } else {
        raw
    }
}

/// A press turns into a drag once either axis moves past `threshold`.
fn exceeds(raw: Offset, threshold: f32) -> bool {
    raw.x.abs() > threshold || raw.y.abs() > threshold
}

/// Clamps an offset into `boundary`.
pub fn clamp_offset(offset: Offset, boundary: &Boundary) -> Offset {
    Offset::new(
        offset.x.clamp(-boundary.left, boundary.right),
        offset.y.clamp(-boundary.top, boundary.bottom),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> DragEngine {
        DragEngine::new(DragConfig::default())
    }

    #[test]
    fn overshoot_is_damped() {
        let delta = elastic_delta(
            Offset::new(240.0, 0.0),
            Offset::new(50.0, 0.0),
            &Boundary::default(),
            0.3,
        );
        assert!((delta.x - 22.0).abs() < 1e-4);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn overshoot_on_negative_edges_is_damped() {
        let delta = elastic_delta(
            Offset::ZERO,
            Offset::new(-260.0, -60.0),
            &Boundary::default(),
            0.3,
        );
        assert!((delta.x - (-253.0)).abs() < 1e-4);
        assert!((delta.y - (-53.0)).abs() < 1e-4);
    }

    #[test]
    fn group_drag_commits_clamped_offset() {
        let mut drag = engine();
        let committed = Offset::new(240.0, 0.0);
        drag.begin_group(Offset::new(100.0, 100.0));
        drag.update(Offset::new(150.0, 400.0), committed);
        assert!(drag.has_dragged());
        assert!(drag.group_delta().x > 10.0);

        let commit = drag.end(committed);
        assert_eq!(commit, Some(DragCommit::Group(Offset::new(250.0, 200.0))));
        assert!(!drag.is_active());
        assert_eq!(drag.group_delta(), Offset::ZERO);
    }

    #[test]
    fn small_moves_are_clicks() {
        let mut drag = engine();
        drag.begin_group(Offset::ZERO);
        drag.update(Offset::new(3.0, 3.0), Offset::ZERO);
        assert!(!drag.has_dragged());
        drag.update(Offset::new(4.0, 4.0), Offset::ZERO);
        assert!(!drag.has_dragged());
        drag.update(Offset::new(0.0, -5.5), Offset::ZERO);
        assert!(drag.has_dragged());
    }

    #[test]
    fn individual_drag_is_unbounded_and_relative_to_its_base() {
        let mut drag = engine();
        let base = Offset::new(10.0, 10.0);
        drag.begin_individual(2, Offset::new(0.0, 0.0), base);
        drag.update(Offset::new(900.0, -700.0), Offset::ZERO);
        assert!(drag.has_dragged());
        assert_eq!(drag.individual_preview(), Some((2, Offset::new(910.0, -690.0))));
        assert_eq!(drag.group_delta(), Offset::ZERO);
        assert_eq!(
            drag.end(Offset::ZERO),
            Some(DragCommit::Individual { index: 2, offset: Offset::new(910.0, -690.0) })
        );
    }

    #[test]
    fn individual_threshold_is_smaller() {
        let mut drag = engine();
        drag.begin_individual(0, Offset::ZERO, Offset::ZERO);
        drag.update(Offset::new(3.5, 0.0), Offset::ZERO);
        assert!(drag.has_dragged());
    }

    #[test]
    fn moves_without_active_drag_are_ignored() {
        let mut drag = engine();
        drag.update(Offset::new(50.0, 50.0), Offset::ZERO);
        assert!(drag.end(Offset::ZERO).is_none());
    }

    proptest! {
        #[test]
        fn release_never_leaves_boundary(
            cx in -250.0f32..250.0, cy in -50.0f32..200.0,
            dx in -2000.0f32..2000.0, dy in -2000.0f32..2000.0,
        ) {
            let mut drag = engine();
            let committed = Offset::new(cx, cy);
            drag.begin_group(Offset::ZERO);
            drag.update(Offset::new(dx, dy), committed);
            let Some(DragCommit::Group(result)) = drag.end(committed) else {
                panic!("group drag should commit");
            };
            prop_assert!(result.x >= -250.0 && result.x <= 250.0);
            prop_assert!(result.y >= -50.0 && result.y <= 200.0);
        }
    }
}
