use std::time::{Duration, Instant};

/// Gap kept between the sliding row and the viewport edge, in cells.
const EDGE_MARGIN: i32 = 10;

/// A fixed-duration linear transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    started: Instant,
    duration: Duration,
}

impl Tween {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started: now,
            duration,
        }
    }

    /// Progress in `[0.0, 1.0]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Horizontal offsets of the outgoing and incoming rows.
///
/// The outgoing row travels from 0 to `-(width - 10)`, the incoming row from
/// `width - 10` to 0.
pub fn row_offsets(progress: f32, viewport_width: u16) -> (i32, i32) {
    let travel = (viewport_width as i32 - EDGE_MARGIN).max(0);
    let progress = progress.clamp(0.0, 1.0);
    let exiting = -((travel as f32) * progress).round() as i32;
    let entering = ((travel as f32) * (1.0 - progress)).round() as i32;
    (exiting, entering)
}
