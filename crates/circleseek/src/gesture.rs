use crate::geometry::{Geometry, Point};
use crate::range::{Direction, FULL_TURN};
use crate::render::DOT_ANGLE_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(position: Point, phase: PointerPhase) -> Self {
        Self { position, phase }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerPhase::Down)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerPhase::Move)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerPhase::Up)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerPhase::Cancel)
    }
}

/// What the host should do after delivering a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerResponse {
    /// The widget keeps the gesture; ancestors must not intercept it.
    pub claimed: bool,
    pub should_redraw: bool,
}

impl PointerResponse {
    pub fn claimed(should_redraw: bool) -> Self {
        Self {
            claimed: true,
            should_redraw,
        }
    }
}

// trig round-off just short of a full turn belongs to the start of the scale
const SEAM_EPSILON: f64 = 1e-9;

/// Sweep angle in `[0, 360)` under `point`, the inverse of dot placement.
pub fn sweep_at(geometry: &Geometry, direction: Direction, point: Point) -> f64 {
    let screen = geometry.angle_of(point);
    let sweep = (direction.sign() * (screen - DOT_ANGLE_OFFSET)).rem_euclid(FULL_TURN);
    if FULL_TURN - sweep < SEAM_EPSILON {
        0.0
    } else {
        sweep
    }
}

/// Shortest signed turn from `from` to `to`, in `[-180, 180)`.
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let half = FULL_TURN / 2.0;
    (to - from + half).rem_euclid(FULL_TURN) - half
}

/// State of one drag gesture.
///
/// The pointer sweep is unwrapped: it follows the pointer continuously past
/// 360 or below 0 instead of jumping across the min/max seam, so the value
/// stays pinned at a bound until the pointer comes back around.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: bool,
    sweep: f64,
}

impl DragTracker {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `true` when this call opened the drag.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// `true` when a drag was open and is now closed.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Anchors the unwrapped sweep, e.g. at 360 when the dot is grabbed at max.
    pub fn anchor(&mut self, sweep: f64) {
        self.sweep = sweep;
    }

    /// Advances the unwrapped sweep to the pointer's `[0, 360)` sweep by the
    /// shortest turn and returns it.
    pub fn follow(&mut self, sweep: f64) -> f64 {
        let current = self.sweep.rem_euclid(FULL_TURN);
        self.sweep += angle_delta(current, sweep);
        self.sweep
    }
}
