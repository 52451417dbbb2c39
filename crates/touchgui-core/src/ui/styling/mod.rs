//! Styling for the widget library

pub mod colors;

pub use colors::*;
