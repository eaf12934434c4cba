//! Staff-only pages.

pub mod orders;
