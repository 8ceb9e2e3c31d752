//! Contact bookkeeping for pointer and touch streams.
//!
//! One contact is a drag, exactly two are a pinch. A third touch is dropped.
//! Events that do not fit the current contact state (a move without a down,
//! a pointer event in the middle of a touch gesture) are logged and ignored.

use super::{GestureSample, TouchPoint};

/// Where a single-contact gesture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Touch,
}

/// Normalized gesture signal produced by [`InputTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedInput {
    DragStart(GestureSample),
    DragMove(GestureSample),
    /// Carries the last sample recorded before the release.
    DragEnd(GestureSample),
    PinchStart { distance: f64 },
    PinchMove { distance: f64 },
    PinchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Contacts {
    None,
    Single {
        source: InputSource,
        last: GestureSample,
    },
    Pair,
    /// A pinch lost a finger; the rest is ignored until everything lifts.
    Draining,
}

#[derive(Debug)]
pub struct InputTracker {
    contacts: Contacts,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            contacts: Contacts::None,
        }
    }

    /// Forget every contact.
    pub fn reset(&mut self) {
        self.contacts = Contacts::None;
    }

    /// Number of contacts currently tracked as part of a gesture.
    pub fn contact_count(&self) -> usize {
        match self.contacts {
            Contacts::None | Contacts::Draining => 0,
            Contacts::Single { .. } => 1,
            Contacts::Pair => 2,
        }
    }

    pub fn pointer_down(&mut self, x: f64, now_ms: f64) -> Option<TrackedInput> {
        if !x.is_finite() {
            log::debug!("Ignoring pointer down at non-finite position {}", x);
            return None;
        }
        match self.contacts {
            Contacts::None => {
                let sample = GestureSample::new(x, now_ms);
                self.contacts = Contacts::Single {
                    source: InputSource::Pointer,
                    last: sample,
                };
                Some(TrackedInput::DragStart(sample))
            }
            other => {
                log::debug!("Ignoring pointer down while {:?}", other);
                None
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, now_ms: f64) -> Option<TrackedInput> {
        if !x.is_finite() {
            log::debug!("Ignoring pointer move to non-finite position {}", x);
            return None;
        }
        match &mut self.contacts {
            Contacts::Single {
                source: InputSource::Pointer,
                last,
            } => {
                *last = GestureSample::new(x, now_ms);
                Some(TrackedInput::DragMove(*last))
            }
            other => {
                log::debug!("Ignoring pointer move without matching down ({:?})", other);
                None
            }
        }
    }

    pub fn pointer_up(&mut self) -> Option<TrackedInput> {
        match self.contacts {
            Contacts::Single {
                source: InputSource::Pointer,
                last,
            } => {
                self.contacts = Contacts::None;
                Some(TrackedInput::DragEnd(last))
            }
            other => {
                log::debug!("Ignoring pointer up without matching down ({:?})", other);
                None
            }
        }
    }

    /// Feed the full set of current touch contacts.
    ///
    /// Points carry no contact ids, so the pinch pair is always the first two
    /// entries of `points`. With three fingers down, lifting one of the first
    /// two promotes the third into the pair and the next `PinchMove` distance
    /// jumps to the new pair's spread.
    pub fn touches_changed(&mut self, points: &[TouchPoint], now_ms: f64) -> Option<TrackedInput> {
        if points.len() > 2 {
            log::debug!("Ignoring {} touch contacts beyond the second", points.len() - 2);
        }
        let points = &points[..points.len().min(2)];
        if points.iter().any(|p| !p.is_finite()) {
            log::debug!("Ignoring touch update with non-finite coordinates");
            return None;
        }

        match (self.contacts, points) {
            (Contacts::None, []) => None,
            (Contacts::None, [p]) => {
                let sample = GestureSample::new(p.x, now_ms);
                self.contacts = Contacts::Single {
                    source: InputSource::Touch,
                    last: sample,
                };
                Some(TrackedInput::DragStart(sample))
            }
            (Contacts::Single { source: InputSource::Touch, last }, []) => {
                self.contacts = Contacts::None;
                Some(TrackedInput::DragEnd(last))
            }
            (
                Contacts::Single {
                    source: InputSource::Touch,
                    ..
                },
                [p],
            ) => {
                let sample = GestureSample::new(p.x, now_ms);
                self.contacts = Contacts::Single {
                    source: InputSource::Touch,
                    last: sample,
                };
                Some(TrackedInput::DragMove(sample))
            }
            (Contacts::Single { source: InputSource::Pointer, .. }, _) => {
                log::debug!("Ignoring touch update during a pointer drag");
                None
            }
            (Contacts::None | Contacts::Single { .. } | Contacts::Draining, [a, b]) => {
                self.contacts = Contacts::Pair;
                Some(TrackedInput::PinchStart {
                    distance: a.distance_to(b),
                })
            }
            (Contacts::Pair, [a, b]) => Some(TrackedInput::PinchMove {
                distance: a.distance_to(b),
            }),
            (Contacts::Pair, [_]) => {
                self.contacts = Contacts::Draining;
                Some(TrackedInput::PinchEnd)
            }
            (Contacts::Pair, []) => {
                self.contacts = Contacts::None;
                Some(TrackedInput::PinchEnd)
            }
            (Contacts::Draining, []) => {
                self.contacts = Contacts::None;
                None
            }
            (Contacts::Draining, [_]) => None,
            // Slice is at most two long.
            (_, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    #[test]
    fn test_pointer_sequence() {
        let mut tracker = InputTracker::new();
        assert_eq!(
            tracker.pointer_down(10.0, 0.0),
            Some(TrackedInput::DragStart(GestureSample::new(10.0, 0.0)))
        );
        assert_eq!(
            tracker.pointer_move(-5.0, 16.0),
            Some(TrackedInput::DragMove(GestureSample::new(-5.0, 16.0)))
        );
        assert_eq!(
            tracker.pointer_up(),
            Some(TrackedInput::DragEnd(GestureSample::new(-5.0, 16.0)))
        );
        assert_eq!(tracker.contact_count(), 0);
    }

    #[test]
    fn test_move_and_up_without_down_are_noops() {
        let mut tracker = InputTracker::new();
        assert_eq!(tracker.pointer_move(3.0, 1.0), None);
        assert_eq!(tracker.pointer_up(), None);
    }

    #[test]
    fn test_duplicate_down_ignored() {
        let mut tracker = InputTracker::new();
        assert!(tracker.pointer_down(0.0, 0.0).is_some());
        assert_eq!(tracker.pointer_down(50.0, 5.0), None);
    }

    #[test]
    fn test_second_touch_starts_pinch() {
        let mut tracker = InputTracker::new();
        tracker.touches_changed(&[pt(0.0, 0.0)], 0.0);
        assert_eq!(
            tracker.touches_changed(&[pt(0.0, 0.0), pt(30.0, 40.0)], 5.0),
            Some(TrackedInput::PinchStart { distance: 50.0 })
        );
        assert_eq!(tracker.contact_count(), 2);
    }

    #[test]
    fn test_third_touch_ignored() {
        let mut tracker = InputTracker::new();
        tracker.touches_changed(&[pt(0.0, 0.0), pt(100.0, 0.0)], 0.0);
        assert_eq!(
            tracker.touches_changed(&[pt(0.0, 0.0), pt(150.0, 0.0), pt(900.0, 900.0)], 5.0),
            Some(TrackedInput::PinchMove { distance: 150.0 })
        );
    }

    #[test]
    fn test_third_touch_replaces_lifted_pair_finger() {
        let mut tracker = InputTracker::new();
        let three = [pt(0.0, 0.0), pt(100.0, 0.0), pt(0.0, 300.0)];
        tracker.touches_changed(&three, 0.0);
        assert_eq!(
            tracker.touches_changed(&[pt(0.0, 0.0), pt(0.0, 300.0)], 5.0),
            Some(TrackedInput::PinchMove { distance: 300.0 })
        );
        assert_eq!(tracker.contact_count(), 2);
    }

    #[test]
    fn test_remaining_finger_after_pinch_is_ignored() {
        let mut tracker = InputTracker::new();
        tracker.touches_changed(&[pt(0.0, 0.0), pt(100.0, 0.0)], 0.0);
        assert_eq!(
            tracker.touches_changed(&[pt(0.0, 0.0)], 5.0),
            Some(TrackedInput::PinchEnd)
        );
        assert_eq!(tracker.touches_changed(&[pt(20.0, 0.0)], 10.0), None);
        assert_eq!(tracker.touches_changed(&[], 15.0), None);
        assert!(matches!(
            tracker.touches_changed(&[pt(1.0, 0.0)], 20.0),
            Some(TrackedInput::DragStart(_))
        ));
    }

    #[test]
    fn test_non_finite_input_dropped() {
        let mut tracker = InputTracker::new();
        assert_eq!(tracker.pointer_down(f64::NAN, 0.0), None);
        assert_eq!(tracker.touches_changed(&[pt(f64::INFINITY, 0.0)], 0.0), None);
        assert_eq!(tracker.contact_count(), 0);
    }
}
