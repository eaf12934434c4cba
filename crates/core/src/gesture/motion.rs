//! Post-release motion: momentum decay and the snap tween.

use super::Millis;
use super::controller::GestureConfig;

/// Ease-out cubic: fast start, gentle landing. `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Nearest multiple of `footprint` to `offset`.
///
/// A non-positive or non-finite footprint leaves the offset where it is.
#[must_use]
pub fn snap_target(offset: f64, footprint: f64) -> f64 {
    if !footprint.is_finite() || footprint <= 0.0 {
        return offset;
    }
    (offset / footprint).round() * footprint
}

/// Inertial scroll after release.
///
/// Each frame moves the rail by `velocity * frame_interval` and then decays
/// the velocity geometrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    velocity: f64,
    released_at: Millis,
}

impl Momentum {
    /// Start momentum with the last drag velocity (px/ms).
    #[must_use]
    pub const fn new(velocity: f64, released_at: Millis) -> Self {
        Self {
            velocity,
            released_at,
        }
    }

    /// Current velocity in px/ms.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Still moving: velocity above epsilon and inside the time budget.
    #[must_use]
    pub fn is_running(&self, now: Millis, config: &GestureConfig) -> bool {
        self.velocity.abs() > config.velocity_epsilon
            && now - self.released_at < config.max_momentum_ms
    }

    /// Advance one frame and return the offset delta to apply.
    pub fn advance(&mut self, config: &GestureConfig) -> f64 {
        let delta = self.velocity * config.frame_interval_ms;
        self.velocity *= config.decay;
        delta
    }
}

/// Time-driven tween from one offset to a snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTween {
    from: f64,
    to: f64,
    started_at: Millis,
    duration: Millis,
}

impl SnapTween {
    /// Tween from `from` to `to`, starting at `started_at`.
    #[must_use]
    pub const fn new(from: f64, to: f64, started_at: Millis, duration: Millis) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Offset the tween is heading for.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Offset at `now` and whether the tween has finished.
    ///
    /// A finished tween reports exactly the target.
    #[must_use]
    pub fn sample(&self, now: Millis) -> (f64, bool) {
        let progress = if self.duration > 0.0 {
            ((now - self.started_at) / self.duration).min(1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            return (self.to, true);
        }
        let offset = (self.to - self.from).mul_add(ease_out_cubic(progress), self.from);
        (offset, false)
    }
}
