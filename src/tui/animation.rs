use std::time::{Duration, Instant};

/// Delay between consecutive rows of a staggered slide.
pub const STAGGER: Duration = Duration::from_millis(40);

/// A slide in (entering) or out (leaving) that started at a given instant.
///
/// Progress is a pure function of elapsed time, so rendering code asks for
/// the visible fraction at "now" and tests can ask for any point in time.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    entering: bool,
    started: Instant,
    duration: Duration,
}

impl Transition {
    pub fn new(entering: bool, duration: Duration, started: Instant) -> Self {
        Self {
            entering,
            started,
            duration,
        }
    }

    /// Fraction of the element on screen (0.0 hidden, 1.0 in place) after
    /// `elapsed`, for an element whose slide starts `delay` late.
    pub fn visible_after(&self, elapsed: Duration, delay: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            let local = elapsed.saturating_sub(delay);
            (local.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        let eased = ease_out_cubic(t);
        if self.entering {
            eased
        } else {
            1.0 - eased
        }
    }

    pub fn visible_at(&self, now: Instant, delay: Duration) -> f64 {
        self.visible_after(now.saturating_duration_since(self.started), delay)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// How far (in cells) to push an element of size `span` that is `visible`
/// fraction on screen.
pub fn slide_offset(span: u16, visible: f64) -> u16 {
    let hidden = (1.0 - visible.clamp(0.0, 1.0)) * f64::from(span);
    (hidden.round() as u16).min(span)
}

/// Start delay for row `index` of a staggered list.
pub fn stagger_delay(index: usize) -> Duration {
    STAGGER * index as u32
}
