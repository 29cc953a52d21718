//! Hardware abstraction traits
//!
//! These traits define the interface between application code and the
//! display bank drivers.

pub mod display;

pub use display::{MultiplexedDisplay, RenderOptions};
