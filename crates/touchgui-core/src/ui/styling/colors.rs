//! Default widget colors
//!
//! All colors are RGB565, the native format of the small SPI panels this
//! library targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};

/// Build an RGB565 color from 8-bit channels.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Raw 16-bit encoding of a color (`RRRRRGGGGGGBBBBB`).
pub fn to_raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

pub fn from_raw(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

// ============================================================================
// Base Colors
// ============================================================================

pub const BLACK: Rgb565 = rgb(0, 0, 0);
pub const WHITE: Rgb565 = rgb(255, 255, 255);
pub const RED: Rgb565 = rgb(255, 0, 0);
pub const GREEN: Rgb565 = rgb(0, 255, 0);
pub const BLUE: Rgb565 = rgb(0, 0, 255);
pub const YELLOW: Rgb565 = rgb(255, 255, 0);

/// Light gray used for button bodies and slider frames
pub const LIGHT_GRAY: Rgb565 = rgb(180, 180, 180);

/// Medium gray used for chart grid lines
pub const GRAY: Rgb565 = rgb(128, 128, 128);

// ============================================================================
// Widget Defaults
// ============================================================================

pub const BUTTON_DEFAULT_COLOR: Rgb565 = LIGHT_GRAY;
pub const BUTTON_DEFAULT_CAPTION_COLOR: Rgb565 = BLACK;

pub const SLIDER_DEFAULT_SLIDER_COLOR: Rgb565 = LIGHT_GRAY;
pub const SLIDER_DEFAULT_BAR_COLOR: Rgb565 = GREEN;
pub const SLIDER_DEFAULT_BAR_THRESHOLD_COLOR: Rgb565 = RED;
pub const SLIDER_DEFAULT_BAR_BACKGROUND_COLOR: Rgb565 = WHITE;
pub const SLIDER_DEFAULT_CAPTION_COLOR: Rgb565 = BLACK;
pub const SLIDER_DEFAULT_VALUE_COLOR: Rgb565 = BLUE;
pub const SLIDER_DEFAULT_CAPTION_VALUE_BACKGROUND_COLOR: Rgb565 = WHITE;

pub const CHART_DEFAULT_BACKGROUND_COLOR: Rgb565 = WHITE;
pub const CHART_DEFAULT_AXES_COLOR: Rgb565 = BLACK;
pub const CHART_DEFAULT_GRID_COLOR: Rgb565 = GRAY;
