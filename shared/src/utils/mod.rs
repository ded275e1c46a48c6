//! Utility helpers shared across crates

pub mod identity;
pub mod pin;
