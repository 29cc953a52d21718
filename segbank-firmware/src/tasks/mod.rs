//! Embassy async tasks

pub mod display;

pub use display::display_task;
