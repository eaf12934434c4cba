//! Duka Core - catalog and rail interaction library.
//!
//! This crate provides the logic shared by every Duka surface:
//! - `storefront` - Server-rendered shop and admin console
//! - `cli` - Command-line previews of catalog rails and swipe gestures
//!
//! # Architecture
//!
//! The core crate contains no I/O, no database access and no HTTP clients.
//! Product records arrive already fetched; scroll surfaces and animation
//! frames are supplied by the host through small traits.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and order statuses
//! - [`catalog`] - Variant grouping, filtering and per-category rails
//! - [`gesture`] - Momentum scrolling with snap-to-item for one rail

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod gesture;
pub mod types;

pub use types::*;
