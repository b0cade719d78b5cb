//! Utility functions and helpers

pub mod accel;

pub use accel::Capabilities;
