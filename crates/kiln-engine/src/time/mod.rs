//! Blocking timing helpers.

mod delay;

pub use delay::delay;
