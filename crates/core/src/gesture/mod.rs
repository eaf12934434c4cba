//! Touch scrolling for category rails.
//!
//! Each rail gets a [`RailController`]: a small state machine that turns
//! pointer events into scroll offsets, carries the release velocity into a
//! decaying momentum phase and finishes with an eased snap onto the nearest
//! card boundary.
//!
//! The module is host-agnostic. A host supplies two things:
//!
//! - a [`ScrollSurface`] for reading and writing the rail's offset
//! - a [`FrameScheduler`] that delivers frame callbacks
//!
//! Timestamps are milliseconds on any monotonic clock.
//!
//! # Example
//!
//! ```rust
//! use duka_core::gesture::{GesturePhase, ManualFrames, RailController, ScrollSurface, VirtualRail};
//!
//! let mut rail = VirtualRail::for_items(8, 224.0, 360.0);
//! let mut controller = RailController::new(ManualFrames::new());
//!
//! controller.pointer_down(100.0, 0.0, Some(&mut rail));
//! controller.pointer_move(70.0, 60.0, Some(&mut rail));
//! controller.pointer_up(60.0, Some(&mut rail));
//! controller.run_until_idle(60.0, &mut rail, 500);
//!
//! assert_eq!(controller.phase(), GesturePhase::Idle);
//! assert_eq!(rail.scroll_offset(), 224.0);
//! ```

pub mod controller;
pub mod deck;
pub mod frames;
pub mod motion;
pub mod surface;

/// Milliseconds on the host's monotonic clock.
pub type Millis = f64;

pub use controller::{Disposition, GestureConfig, GesturePhase, RailController};
pub use deck::RailDeck;
pub use frames::{FrameHandle, FrameScheduler, ManualFrames};
pub use motion::{Momentum, SnapTween, ease_out_cubic, snap_target};
pub use surface::{ScrollSurface, VirtualRail};
