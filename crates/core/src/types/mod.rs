//! Core types for Duka.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, RawPrice, UnknownCurrency, format_amount, parse_price};
pub use status::OrderStatus;
