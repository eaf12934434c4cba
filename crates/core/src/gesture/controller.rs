//! Per-rail gesture state machine.
//!
//! ```text
//!          pointer_down                 pointer_up
//!   Idle ───────────────▶ Dragging ───────────────▶ Settling ──┐
//!    ▲                        ▲                        │        │ momentum spent
//!    │                        │      pointer_down      │        ▼
//!    │                        └────────────────────────┘   snap tween
//!    └──────────────────────────────────────────────────────────┘ tween done
//! ```
//!
//! A rail's controller is the only writer of that rail's scroll offset while
//! a gesture or settle is in flight.

use tracing::{debug, trace};

use super::Millis;
use super::frames::{FrameHandle, FrameScheduler, ManualFrames};
use super::motion::{Momentum, SnapTween, snap_target};
use super::surface::ScrollSurface;

/// Tuning for drag, momentum and snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Card width plus the gap between cards, in px.
    pub item_footprint: f64,
    /// Velocities at or below this (px/ms) count as stopped.
    pub velocity_epsilon: f64,
    /// Per-frame velocity multiplier during momentum.
    pub decay: f64,
    /// Nominal frame length used to integrate momentum.
    pub frame_interval_ms: f64,
    /// Momentum never runs longer than this after release.
    pub max_momentum_ms: f64,
    /// Length of the snap tween.
    pub snap_duration_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            item_footprint: 224.0,
            velocity_epsilon: 0.01,
            decay: 0.95,
            frame_interval_ms: 16.0,
            max_momentum_ms: 1000.0,
            snap_duration_ms: 300.0,
        }
    }
}

/// Observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Settling,
}

/// What the host should do with the native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The controller handled it; suppress native scrolling and selection.
    Consumed,
    /// Not ours; let the platform handle it.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_x: f64,
    start_time: Millis,
    start_offset: f64,
    last_x: f64,
    last_time: Millis,
    velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Momentum(Momentum),
    Snap(SnapTween),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Settle {
    motion: Motion,
    frame: FrameHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum State {
    #[default]
    Idle,
    Dragging(Drag),
    Settling(Settle),
}

/// Touch-driven horizontal scroller for one rail.
///
/// Drags move the rail 1:1 (dragging left scrolls right). On release the
/// last sampled velocity carries into momentum, after which the rail snaps
/// to the nearest card boundary.
#[derive(Debug)]
pub struct RailController<S> {
    config: GestureConfig,
    scheduler: S,
    state: State,
}

impl<S: FrameScheduler> RailController<S> {
    /// Controller with the default tuning.
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self::with_config(GestureConfig::default(), scheduler)
    }

    /// Controller with custom tuning.
    #[must_use]
    pub fn with_config(config: GestureConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            state: State::Idle,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub const fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Dragging(_) => GesturePhase::Dragging,
            State::Settling(_) => GesturePhase::Settling,
        }
    }

    /// Current velocity estimate in px/ms (zero when idle or snapping).
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        match self.state {
            State::Dragging(drag) => drag.velocity,
            State::Settling(Settle {
                motion: Motion::Momentum(momentum),
                ..
            }) => momentum.velocity(),
            State::Idle | State::Settling(_) => 0.0,
        }
    }

    /// Offset the snap tween is heading for, if one is running.
    #[must_use]
    pub const fn snap_target(&self) -> Option<f64> {
        match self.state {
            State::Settling(Settle {
                motion: Motion::Snap(tween),
                ..
            }) => Some(tween.target()),
            _ => None,
        }
    }

    /// Finger or pointer touched the rail.
    ///
    /// Any running settle is cancelled first; the rail stays wherever the
    /// settle had moved it.
    pub fn pointer_down(
        &mut self,
        x: f64,
        now: Millis,
        surface: Option<&mut dyn ScrollSurface>,
    ) -> Disposition {
        let Some(surface) = surface else {
            return Disposition::Ignored;
        };

        self.cancel();

        let offset = surface.scroll_offset();
        self.state = State::Dragging(Drag {
            start_x: x,
            start_time: now,
            start_offset: offset,
            last_x: x,
            last_time: now,
            velocity: 0.0,
        });
        trace!(x, offset, "drag started");
        Disposition::Consumed
    }

    /// Pointer moved while down. Scrolls by the horizontal delta since the
    /// previous sample and re-estimates velocity from that sample alone.
    pub fn pointer_move(
        &mut self,
        x: f64,
        now: Millis,
        surface: Option<&mut dyn ScrollSurface>,
    ) -> Disposition {
        let State::Dragging(drag) = &mut self.state else {
            return Disposition::Ignored;
        };
        let Some(surface) = surface else {
            return Disposition::Ignored;
        };

        let delta = drag.last_x - x;
        let elapsed = now - drag.last_time;
        if elapsed > 0.0 {
            drag.velocity = delta / elapsed;
        }

        surface.set_scroll_offset(surface.scroll_offset() + delta);
        drag.last_x = x;
        drag.last_time = now;
        Disposition::Consumed
    }

    /// Pointer released. Starts momentum when the rail was flung, otherwise
    /// snaps straight away.
    pub fn pointer_up(
        &mut self,
        now: Millis,
        surface: Option<&mut dyn ScrollSurface>,
    ) -> Disposition {
        let State::Dragging(drag) = self.state else {
            return Disposition::Ignored;
        };
        let Some(surface) = surface else {
            self.state = State::Idle;
            return Disposition::Ignored;
        };

        debug!(
            travelled = drag.start_x - drag.last_x,
            duration_ms = now - drag.start_time,
            scrolled = surface.scroll_offset() - drag.start_offset,
            velocity = drag.velocity,
            "drag released"
        );

        if drag.velocity.abs() > self.config.velocity_epsilon {
            self.schedule(Motion::Momentum(Momentum::new(drag.velocity, now)));
        } else {
            self.begin_snap(surface.scroll_offset(), now);
        }
        Disposition::Consumed
    }

    /// Deliver a frame requested from the scheduler.
    ///
    /// Frames other than the one currently pending are stale and ignored. A
    /// frame without a surface means the rail was unmounted; the settle ends.
    pub fn on_frame(
        &mut self,
        frame: FrameHandle,
        now: Millis,
        surface: Option<&mut dyn ScrollSurface>,
    ) {
        let State::Settling(settle) = self.state else {
            return;
        };
        if settle.frame != frame {
            trace!(frame = frame.get(), "stale frame ignored");
            return;
        }
        let Some(surface) = surface else {
            debug!("rail surface gone, settle abandoned");
            self.state = State::Idle;
            return;
        };

        match settle.motion {
            Motion::Momentum(mut momentum) => {
                if momentum.is_running(now, &self.config) {
                    let delta = momentum.advance(&self.config);
                    surface.set_scroll_offset(surface.scroll_offset() + delta);
                    self.schedule(Motion::Momentum(momentum));
                } else {
                    self.begin_snap(surface.scroll_offset(), now);
                }
            }
            Motion::Snap(tween) => {
                let (offset, finished) = tween.sample(now);
                surface.set_scroll_offset(offset);
                if finished {
                    trace!(offset, "snap finished");
                    self.state = State::Idle;
                } else {
                    self.schedule(Motion::Snap(tween));
                }
            }
        }
    }

    /// Stop any running settle and return to idle without touching the offset.
    pub fn cancel(&mut self) {
        if let State::Settling(settle) = self.state {
            self.scheduler.cancel_frame(settle.frame);
            trace!(frame = settle.frame.get(), "settle cancelled");
        }
        self.state = State::Idle;
    }

    fn begin_snap(&mut self, offset: f64, now: Millis) {
        let target = snap_target(offset, self.config.item_footprint);
        trace!(offset, target, "snap started");
        self.schedule(Motion::Snap(SnapTween::new(
            offset,
            target,
            now,
            self.config.snap_duration_ms,
        )));
    }

    fn schedule(&mut self, motion: Motion) {
        let frame = self.scheduler.request_frame();
        self.state = State::Settling(Settle { motion, frame });
    }
}

impl RailController<ManualFrames> {
    /// Deliver every pending frame at `now`. Returns how many were delivered.
    pub fn pump(&mut self, now: Millis, mut surface: Option<&mut dyn ScrollSurface>) -> usize {
        let frames = self.scheduler.take_pending();
        for frame in &frames {
            let surface: Option<&mut dyn ScrollSurface> = match surface {
                Some(ref mut s) => Some(&mut **s),
                None => None,
            };
            self.on_frame(*frame, now, surface);
        }
        frames.len()
    }

    /// Pump frames every `frame_interval_ms` from `now` until the rail is
    /// idle or `max_frames` have run. Returns the time of the last frame.
    pub fn run_until_idle(
        &mut self,
        mut now: Millis,
        surface: &mut dyn ScrollSurface,
        max_frames: usize,
    ) -> Millis {
        let interval = self.config.frame_interval_ms;
        for _ in 0..max_frames {
            if self.phase() != GesturePhase::Settling {
                break;
            }
            now += interval;
            self.pump(now, Some(&mut *surface));
        }
        now
    }
}
