// src/ui/mod.rs
//! Widget layer: touch types, drawing helpers, colors and the widgets
//! themselves.

pub mod components;
pub mod core;
pub mod draw;
pub mod styling;

// Re-export commonly used items
pub use components::{Button, Chart, ChartLayout, ChartMode, Slider, SliderColors};
pub use self::core::{TouchEvent, TouchPoint, Touchable};
