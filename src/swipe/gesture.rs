//! Drag displacement to card visuals and release decisions.
//!
//! Everything here is a pure function of the horizontal displacement `dx`
//! (pixels, signed, 0 at rest) so the same numbers can be served to the
//! client animation and used for the release rule.

use serde::Serialize;

use super::candidate::SwipeDirection;

/// Release displacement that must be exceeded (strictly) to decide.
pub const DECISION_THRESHOLD_PX: f64 = 100.0;

/// Pointer travel below which a gesture is a tap rather than a drag.
pub const TAP_THRESHOLD_PX: f64 = 10.0;

const ROTATION_INPUT: [f64; 2] = [-200.0, 200.0];
const ROTATION_OUTPUT: [f64; 2] = [-25.0, 25.0];

const OPACITY_INPUT: [f64; 5] = [-200.0, -125.0, 0.0, 125.0, 200.0];
const OPACITY_OUTPUT: [f64; 5] = [0.0, 1.0, 1.0, 1.0, 0.0];

const ACCEPT_OPACITY_INPUT: [f64; 3] = [0.0, 25.0, 150.0];
const ACCEPT_OPACITY_OUTPUT: [f64; 3] = [0.0, 0.5, 1.0];
const REJECT_OPACITY_INPUT: [f64; 3] = [-150.0, -25.0, 0.0];
const REJECT_OPACITY_OUTPUT: [f64; 3] = [1.0, 0.5, 0.0];

const SCALE_INPUT: [f64; 5] = [-150.0, -100.0, 0.0, 100.0, 150.0];
const SCALE_OUTPUT: [f64; 5] = [1.0, 0.8, 0.5, 0.8, 1.0];

const ACCEPT_OFFSET_INPUT: [f64; 5] = [0.0, 50.0, 100.0, 150.0, 200.0];
const ACCEPT_OFFSET_OUTPUT: [f64; 5] = [20.0, 40.0, 0.0, -50.0, -100.0];
const REJECT_OFFSET_INPUT: [f64; 5] = [-200.0, -150.0, -100.0, -50.0, 0.0];
const REJECT_OFFSET_OUTPUT: [f64; 5] = [100.0, 50.0, 0.0, -40.0, -20.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorVisuals {
    pub opacity: f64,
    pub scale: f64,
    pub offset_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardVisuals {
    pub dx: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub accept: IndicatorVisuals,
    pub reject: IndicatorVisuals,
}

#[derive(Debug, Clone, Copy)]
pub enum Easing {
    Linear,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
}

impl Easing {
    fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(t, 0.42, 0.0, 1.0, 1.0),
        }
    }
}

/// Clamped piecewise interpolation over ascending `input` stops.
pub fn interpolate(x: f64, input: &[f64], output: &[f64], easing: Easing) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let (Some(&first), Some(&last)) = (input.first(), input.last()) else {
        return 0.0;
    };
    if x <= first {
        return output[0];
    }
    if x >= last {
        return output[output.len() - 1];
    }

    let segment = input
        .windows(2)
        .position(|w| x >= w[0] && x <= w[1])
        .unwrap_or(input.len() - 2);
    let (from, to) = (input[segment], input[segment + 1]);
    let span = to - from;
    let progress = if span == 0.0 { 0.0 } else { (x - from) / span };
    let eased = easing.apply(progress);
    output[segment] + (output[segment + 1] - output[segment]) * eased
}

pub fn project(dx: f64) -> CardVisuals {
    let scale = interpolate(dx, &SCALE_INPUT, &SCALE_OUTPUT, Easing::Linear);
    CardVisuals {
        dx,
        rotation_deg: interpolate(dx, &ROTATION_INPUT, &ROTATION_OUTPUT, Easing::Linear),
        opacity: interpolate(dx, &OPACITY_INPUT, &OPACITY_OUTPUT, Easing::Linear),
        accept: IndicatorVisuals {
            opacity: interpolate(dx, &ACCEPT_OPACITY_INPUT, &ACCEPT_OPACITY_OUTPUT, Easing::Linear),
            scale,
            offset_x: interpolate(dx, &ACCEPT_OFFSET_INPUT, &ACCEPT_OFFSET_OUTPUT, Easing::EaseIn),
        },
        reject: IndicatorVisuals {
            opacity: interpolate(dx, &REJECT_OPACITY_INPUT, &REJECT_OPACITY_OUTPUT, Easing::Linear),
            scale,
            offset_x: interpolate(dx, &REJECT_OFFSET_INPUT, &REJECT_OFFSET_OUTPUT, Easing::EaseIn),
        },
    }
}

/// Release rule. Exactly ±100 snaps back.
pub fn decide(dx: f64) -> Option<SwipeDirection> {
    if dx > DECISION_THRESHOLD_PX {
        Some(SwipeDirection::Accept)
    } else if dx < -DECISION_THRESHOLD_PX {
        Some(SwipeDirection::Reject)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Pointer barely moved: open the detail view.
    Tap,
    /// Dragged but released inside the threshold.
    SnapBack,
    Decided(SwipeDirection),
}

/// Tracks one pointer gesture on the active card.
#[derive(Debug, Clone)]
pub struct DragTracker {
    start: Point,
    dragging: bool,
}

impl DragTracker {
    pub fn begin(start: Point) -> Self {
        Self {
            start,
            dragging: false,
        }
    }

    /// Feeds a pointer sample and returns the current visuals.
    pub fn update(&mut self, point: Point) -> CardVisuals {
        if !self.dragging && self.start.distance_to(point) >= TAP_THRESHOLD_PX {
            self.dragging = true;
        }
        project(point.x - self.start.x)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn release(mut self, end: Point) -> GestureOutcome {
        self.update(end);
        if !self.dragging {
            return GestureOutcome::Tap;
        }
        match decide(end.x - self.start.x) {
            Some(direction) => GestureOutcome::Decided(direction),
            None => GestureOutcome::SnapBack,
        }
    }
}

fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t.clamp(0.0, 1.0);
    }

    let mut lower = 0.0;
    let mut upper = 1.0;
    let mut param = t;
    for _ in 0..12 {
        param = lower + (upper - lower) / 2.0;
        let delta = bezier_axis(param, x1, x2) - t;
        if delta.abs() <= 1e-7 {
            break;
        }
        if delta > 0.0 {
            upper = param;
        } else {
            lower = param;
        }
    }
    bezier_axis(param, y1, y2)
}

fn bezier_axis(t: f64, a1: f64, a2: f64) -> f64 {
    (((1.0 - 3.0 * a2 + 3.0 * a1) * t + (3.0 * a2 - 6.0 * a1)) * t + 3.0 * a1) * t
}
