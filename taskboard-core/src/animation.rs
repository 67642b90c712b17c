//! Fixed-duration offset animations.
//!
//! Rows are displaced vertically while dragged and when they first appear.
//! Both displacements settle back to zero with an [`OffsetAnimation`]
//! sampled on the UI tick; nothing here owns a clock.

use std::time::{Duration, Instant};

/// Duration of the drag-release and slide-in animations.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Timing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Exponential ease-out: fast start, long soft landing.
    #[default]
    ExpOut,
}

impl Easing {
    /// Eased progress for linear progress `t`. Inputs outside `[0, 1]` are
    /// clamped.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            // 1 - 2^(-10t) never reaches 1 exactly; snap at the end.
            Self::ExpOut if t >= 1.0 => 1.0,
            Self::ExpOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

/// Interpolates a vertical offset from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetAnimation {
    from: f32,
    to: f32,
    duration: Duration,
    started_at: Instant,
    easing: Easing,
}

impl OffsetAnimation {
    /// Starts an animation at `started_at`.
    #[must_use]
    pub const fn new(
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        started_at: Instant,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            started_at,
            easing,
        }
    }

    /// Exponential-out animation from `from` back to zero.
    #[must_use]
    pub const fn settle(from: f32, duration: Duration, started_at: Instant) -> Self {
        Self::new(from, 0.0, duration, Easing::ExpOut, started_at)
    }

    /// Linear progress in `[0, 1]` at `now`.
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Offset at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the animation has reached its target at `now`.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Target offset.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.to
    }
}
