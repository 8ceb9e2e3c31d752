//! Gesture pipeline without the engine: tracker output fed through the
//! velocity estimator, drag controller, pinch controller and inertia.

use carousel_engine::config::CarouselConfig;
use carousel_engine::gesture::{
    DragController, InputTracker, PinchZoomController, TouchPoint, TrackedInput,
    VelocityEstimator,
};
use carousel_engine::inertia::{InertiaParams, InertiaSimulator};
use carousel_engine::page::{Direction, PageIndex};

/// The gesture components the engine wires together, built from one config.
struct Pipeline {
    tracker: InputTracker,
    velocity: VelocityEstimator,
    drag: DragController,
    pinch: PinchZoomController,
    inertia: InertiaSimulator,
}

impl Pipeline {
    fn new(config: &CarouselConfig) -> Self {
        Self {
            tracker: InputTracker::new(),
            velocity: VelocityEstimator::new(config.tuning.velocity_scale),
            drag: DragController::new(config.drag_threshold_px),
            pinch: PinchZoomController::new(
                config.tuning.min_scale,
                config.tuning.max_scale,
                config.reset_scale_on_release,
            ),
            inertia: InertiaSimulator::new(InertiaParams::from_config(config)),
        }
    }

    /// Route one tracker signal. Returns the page committed by a drag release.
    fn apply(&mut self, input: Option<TrackedInput>) -> Option<Direction> {
        match input? {
            TrackedInput::DragStart(sample) => {
                self.drag.begin(sample.position);
                self.velocity.begin(sample);
            }
            TrackedInput::DragMove(sample) => {
                self.drag.update(sample.position);
                self.velocity.update(sample);
            }
            TrackedInput::DragEnd(_) => {
                let transition = self.drag.release().and_then(|r| r.transition);
                self.inertia.start(self.velocity.velocity());
                return transition;
            }
            TrackedInput::PinchStart { distance } => {
                self.drag.cancel();
                self.velocity.reset();
                self.pinch.begin(distance);
            }
            TrackedInput::PinchMove { distance } => {
                self.pinch.update(distance);
            }
            TrackedInput::PinchEnd => self.pinch.end(),
        }
        None
    }

    /// Run inertia to completion, returning every page step it produced.
    fn coast(&mut self) -> Vec<Direction> {
        let mut steps = Vec::new();
        while self.inertia.is_active() {
            steps.extend(self.inertia.step().transition);
        }
        steps
    }
}

fn pair(spread: f64) -> [TouchPoint; 2] {
    [TouchPoint::new(0.0, 0.0), TouchPoint::new(spread, 0.0)]
}

#[test]
fn test_slow_pointer_drag_commits_without_momentum() {
    let mut pipeline = Pipeline::new(&CarouselConfig::default());
    let t = &mut pipeline.tracker;
    let inputs = [
        t.pointer_down(300.0, 0.0),
        t.pointer_move(280.0, 200.0),
        t.pointer_move(230.0, 1000.0),
    ];
    for input in inputs {
        assert_eq!(pipeline.apply(input), None);
    }
    assert_eq!(pipeline.drag.progress(), -0.7);

    let up = pipeline.tracker.pointer_up();
    assert_eq!(pipeline.apply(up), Some(Direction::Next));
    assert!(!pipeline.inertia.is_active());
}

#[test]
fn test_short_fling_coasts_through_pages() {
    let config = CarouselConfig::default();
    let mut pipeline = Pipeline::new(&config);
    let down = pipeline.tracker.pointer_down(0.0, 0.0);
    pipeline.apply(down);
    let moved = pipeline.tracker.pointer_move(-40.0, 50.0);
    pipeline.apply(moved);
    let up = pipeline.tracker.pointer_up();

    // 40px is short of the commit distance, but 8 units of velocity is a fling
    assert_eq!(pipeline.apply(up), None);
    assert!(pipeline.inertia.is_active());
    assert_eq!(pipeline.coast(), vec![Direction::Next; 4]);

    let mut page = PageIndex::new(3, false);
    for direction in [Direction::Next; 4] {
        page.step(direction);
    }
    assert_eq!(page.current(), 2);
}

#[test]
fn test_velocity_from_last_pair_only() {
    let mut pipeline = Pipeline::new(&CarouselConfig::default());
    let t = &mut pipeline.tracker;
    let inputs = [
        t.pointer_down(0.0, 0.0),
        // Fast start, then a slow finish: no momentum
        t.pointer_move(-90.0, 20.0),
        t.pointer_move(-95.0, 520.0),
        t.pointer_up(),
    ];
    let committed: Vec<_> = inputs
        .into_iter()
        .filter_map(|input| pipeline.apply(input))
        .collect();
    assert_eq!(committed, vec![Direction::Next]);
    assert!(!pipeline.inertia.is_active());
}

#[test]
fn test_touch_drag_promoted_to_pinch_drops_the_drag() {
    let mut pipeline = Pipeline::new(&CarouselConfig::default());
    let t = &mut pipeline.tracker;
    let inputs = [
        t.touches_changed(&[TouchPoint::new(0.0, 0.0)], 0.0),
        t.touches_changed(&[TouchPoint::new(-70.0, 0.0)], 10.0),
        t.touches_changed(&pair(100.0), 20.0),
        t.touches_changed(&pair(150.0), 30.0),
    ];
    for input in inputs {
        pipeline.apply(input);
    }
    assert!(!pipeline.drag.is_active());
    assert_eq!(pipeline.velocity.velocity(), 0.0);
    assert_eq!(pipeline.pinch.scale(), 1.5);

    // Lifting one finger, dragging it and lifting it never commits a page
    let t = &mut pipeline.tracker;
    let inputs = [
        t.touches_changed(&[TouchPoint::new(0.0, 0.0)], 40.0),
        t.touches_changed(&[TouchPoint::new(-90.0, 0.0)], 50.0),
        t.touches_changed(&[], 60.0),
    ];
    for input in inputs {
        assert_eq!(pipeline.apply(input), None);
    }
    assert_eq!(pipeline.pinch.scale(), 1.0);
    assert!(!pipeline.inertia.is_active());
}

#[test]
fn test_kept_pinch_scale_carries_into_next_pinch() {
    let config = CarouselConfig {
        reset_scale_on_release: false,
        ..CarouselConfig::default()
    };
    let mut pipeline = Pipeline::new(&config);
    let t = &mut pipeline.tracker;
    let inputs = [
        t.touches_changed(&pair(100.0), 0.0),
        t.touches_changed(&pair(150.0), 10.0),
        t.touches_changed(&[], 20.0),
        t.touches_changed(&pair(200.0), 30.0),
        t.touches_changed(&pair(100.0), 40.0),
    ];
    for input in inputs {
        pipeline.apply(input);
    }
    assert_eq!(pipeline.pinch.scale(), 0.75);
}

#[test]
fn test_any_fling_halts_within_bound() {
    let config = CarouselConfig::default();
    for (distance, duration) in [(-15.0, 100.0), (30.0, 10.0), (-400.0, 16.0), (900.0, 1.0)] {
        let mut pipeline = Pipeline::new(&config);
        let down = pipeline.tracker.pointer_down(0.0, 0.0);
        pipeline.apply(down);
        let moved = pipeline.tracker.pointer_move(distance, duration);
        pipeline.apply(moved);
        let up = pipeline.tracker.pointer_up();
        pipeline.apply(up);

        let velocity = pipeline.velocity.velocity();
        let bound = pipeline.inertia.step_bound(velocity);
        let mut steps = 0;
        while pipeline.inertia.is_active() {
            pipeline.inertia.step();
            steps += 1;
        }
        assert!(steps <= bound, "{} steps from velocity {}", steps, velocity);
    }
}
