// src/ui/components/mod.rs
//! Widget library

pub mod button;
pub mod chart;
pub mod slider;

pub use button::{Button, ButtonHandler, ButtonId};
pub use chart::{Chart, ChartLayout, ChartMode, validate_chart};
pub use slider::{Slider, SliderChangeHandler, SliderColors, SliderId, ValueFormatter, ValueText};
