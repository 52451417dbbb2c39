//! Hardware-independent touch widget library for small RGB565 displays
//!
//! This crate contains the widget registry and touch-dispatch engine shared
//! by buttons and sliders: geometry validation against the display, ordered
//! registries addressed by typed handles, first-match hit testing with a
//! tolerance border, and the slider value-change protocol. A simple chart
//! widget and a RAM framebuffer with dirty-region flushing round it off.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//! Rendering goes through any `embedded_graphics::DrawTarget<Color = Rgb565>`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod gui;
pub mod registry;
pub mod sync;
pub mod ui;

pub use config::GuiConfig;
pub use error::{Report, Validated, WidgetError};
pub use geometry::DisplayBounds;
pub use gui::Gui;
pub use registry::{Handle, Registration, Registry};
pub use sync::SharedGui;
