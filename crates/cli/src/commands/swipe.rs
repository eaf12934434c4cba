//! Headless swipe simulation on one rail.

use std::io::Write;

use clap::Args;
use duka_core::gesture::{
    GestureConfig, GesturePhase, ManualFrames, Millis, RailController, ScrollSurface, VirtualRail,
};

use super::CliError;

/// Arguments for `duka swipe`.
#[derive(Debug, Clone, Args)]
pub struct SwipeArgs {
    /// Cards in the rail
    #[arg(long, default_value_t = 12)]
    pub items: usize,

    /// Visible rail width in px
    #[arg(long, default_value_t = 390.0)]
    pub viewport: f64,

    /// Scroll offset before the drag
    #[arg(long, default_value_t = 0.0)]
    pub start_offset: f64,

    /// Pointer x where the drag starts
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub from: f64,

    /// Pointer x where the drag is released
    #[arg(long, default_value_t = 70.0, allow_negative_numbers = true)]
    pub to: f64,

    /// Drag duration in ms
    #[arg(long, default_value_t = 60.0)]
    pub duration: f64,

    /// Pointer move events between down and up
    #[arg(long, default_value_t = 1)]
    pub steps: u32,

    /// Give up after this many frames
    #[arg(long, default_value_t = 500)]
    pub max_frames: usize,

    /// Print the offset at every frame
    #[arg(long)]
    pub frames: bool,
}

impl Default for SwipeArgs {
    fn default() -> Self {
        Self {
            items: 12,
            viewport: 390.0,
            start_offset: 0.0,
            from: 100.0,
            to: 70.0,
            duration: 60.0,
            steps: 1,
            max_frames: 500,
            frames: false,
        }
    }
}

/// Outcome of one simulated swipe.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeReport {
    /// Offset when the pointer was released.
    pub released_offset: f64,
    /// Drag velocity at release, px/ms.
    pub release_velocity: f64,
    pub final_offset: f64,
    /// Frames delivered after release.
    pub frames: usize,
    /// Time from release to the last frame.
    pub settle_ms: Millis,
    /// Whether the rail came to rest within `max_frames`.
    pub settled: bool,
    /// `(time, offset)` after each frame.
    pub trace: Vec<(Millis, f64)>,
}

fn validate(args: &SwipeArgs) -> Result<(), CliError> {
    if args.steps == 0 {
        return Err(CliError::Swipe("steps must be at least 1".to_string()));
    }
    if !(args.duration.is_finite() && args.duration > 0.0) {
        return Err(CliError::Swipe(format!(
            "duration must be positive (got {})",
            args.duration
        )));
    }
    if !(args.viewport.is_finite() && args.viewport > 0.0) {
        return Err(CliError::Swipe(format!(
            "viewport must be positive (got {})",
            args.viewport
        )));
    }
    Ok(())
}

/// Drag from `from` to `to` over `duration`, release, and pump frames until
/// the rail settles.
///
/// # Errors
///
/// Returns `CliError::Swipe` for parameters that do not describe a drag.
pub fn run(args: &SwipeArgs) -> Result<SwipeReport, CliError> {
    validate(args)?;

    let config = GestureConfig::default();
    let interval = config.frame_interval_ms;
    let mut rail = VirtualRail::for_items(args.items, config.item_footprint, args.viewport);
    rail.set_scroll_offset(args.start_offset);
    let mut controller = RailController::with_config(config, ManualFrames::new());

    let mut now: Millis = 0.0;
    controller.pointer_down(args.from, now, Some(&mut rail));
    for step in 1..=args.steps {
        let progress = f64::from(step) / f64::from(args.steps);
        now = args.duration * progress;
        let x = (args.to - args.from).mul_add(progress, args.from);
        controller.pointer_move(x, now, Some(&mut rail));
    }

    let released_offset = rail.scroll_offset();
    let release_velocity = controller.velocity();
    let released_at = now;
    controller.pointer_up(now, Some(&mut rail));
    tracing::debug!(released_offset, release_velocity, "released");

    let mut trace = Vec::new();
    while controller.phase() == GesturePhase::Settling && trace.len() < args.max_frames {
        now += interval;
        controller.pump(now, Some(&mut rail));
        trace.push((now - released_at, rail.scroll_offset()));
    }

    Ok(SwipeReport {
        released_offset,
        release_velocity,
        final_offset: rail.scroll_offset(),
        frames: trace.len(),
        settle_ms: now - released_at,
        settled: controller.phase() == GesturePhase::Idle,
        trace,
    })
}

/// Run a swipe and print the report.
///
/// # Errors
///
/// Returns an error for invalid parameters or if writing fails.
pub fn simulate(out: &mut impl Write, args: &SwipeArgs) -> Result<(), CliError> {
    let report = run(args)?;

    writeln!(
        out,
        "released at offset {:.1}px, velocity {:.3}px/ms",
        report.released_offset, report.release_velocity
    )?;
    if args.frames {
        for (time, offset) in &report.trace {
            writeln!(out, "  +{time:>6.0}ms  {offset:>8.1}px")?;
        }
    }
    if report.settled {
        writeln!(
            out,
            "settled at {:.1}px after {} frames ({:.0}ms)",
            report.final_offset, report.frames, report.settle_ms
        )?;
    } else {
        writeln!(
            out,
            "still moving at {:.1}px after {} frames",
            report.final_offset, report.frames
        )?;
    }
    Ok(())
}
