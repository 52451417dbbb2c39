//! Geometry validation against the display's addressable area.
//!
//! Every validator follows the same policy: check each rule independently,
//! replace an offending field with a documented fallback, record the finding
//! in a [`Report`] and carry on. A widget is always constructible.
//!
//! All edge arithmetic is done in `u32` or with saturating operations so no
//! rule depends on integer wraparound.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

use crate::error::{Report, Validated, WidgetError};
use crate::ui::core::TouchPoint;

/// Horizontal pixels per slider size unit.
pub const SLIDER_SIZE_FACTOR: u16 = 2;

/// Unit size substituted for a zero or oversized slider size.
pub const SLIDER_DEFAULT_SIZE: u8 = 4;

/// Largest accepted slider unit size.
pub const SLIDER_MAX_SIZE: u8 = 20;

/// Unit size used when a slider had to be moved back onto the display.
pub const SLIDER_FALLBACK_SIZE: u8 = 1;

/// Addressable display area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub width: u16,
    pub height: u16,
}

impl DisplayBounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Read the bounds from any embedded-graphics target.
    pub fn of<D: Dimensions>(display: &D) -> Self {
        let size = display.bounding_box().size;
        Self {
            width: size.width.min(u16::MAX as u32) as u16,
            height: size.height.min(u16::MAX as u32) as u16,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

/// Inclusive pixel rectangle: top-left corner plus bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub x: u16,
    pub y: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Extent {
    pub fn width(&self) -> u16 {
        self.right.saturating_sub(self.x) + 1
    }

    pub fn height(&self) -> u16 {
        self.bottom.saturating_sub(self.y) + 1
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::with_corners(
            Point::new(self.x as i32, self.y as i32),
            Point::new(self.right as i32, self.bottom as i32),
        )
    }

    /// The touch-sensitive area: this extent grown by `border` on every side,
    /// never below zero.
    pub fn touch_area(&self, border: u8) -> TouchArea {
        let border = border as u16;
        TouchArea {
            left: self.x.saturating_sub(border),
            top: self.y.saturating_sub(border),
            right: self.right.saturating_add(border),
            bottom: self.bottom.saturating_add(border),
        }
    }
}

/// Inclusive rectangle used only for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchArea {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl TouchArea {
    pub fn contains(&self, point: TouchPoint) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.top..=self.bottom).contains(&point.y)
    }
}

/// Validate a button's body against the display.
///
/// `width` and `height` are the measured body size; zero is treated as one
/// pixel. The right and bottom edges are checked independently. The top-left
/// corner is pulled in with a clamped edge so the extent never inverts.
pub fn validate_button(
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    bounds: DisplayBounds,
) -> Validated<Extent> {
    let mut report = Report::new();
    let max_x = (bounds.width as u32).saturating_sub(1);
    let max_y = (bounds.height as u32).saturating_sub(1);

    let mut right = x as u32 + width.max(1) as u32 - 1;
    if right > max_x {
        right = max_x;
        report.push(WidgetError::XRight);
    }

    let mut bottom = y as u32 + height.max(1) as u32 - 1;
    if bottom > max_y {
        bottom = max_y;
        report.push(WidgetError::YBottom);
    }

    if let Some(error) = report.status() {
        warn!("button at ({}, {}) clamped: {}", x, y, error);
    }

    let right = right as u16;
    let bottom = bottom as u16;
    Validated::new(
        Extent {
            x: x.min(right),
            y: y.min(bottom),
            right,
            bottom,
        },
        report,
    )
}

/// Requested slider parameters prior to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRequest {
    pub x: u16,
    pub y: u16,
    pub size: u8,
    pub max_value: u8,
    pub value: u8,
    pub show_border: bool,
}

/// Accepted slider geometry.
///
/// The slider is a vertical bar `size * SLIDER_SIZE_FACTOR` pixels wide and
/// `max_value` pixels tall, one pixel per value step. With a border the bar is
/// framed by columns of the same width on both sides and rows `size` pixels
/// high above and below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderGeometry {
    pub x: u16,
    pub y: u16,
    pub size: u8,
    pub max_value: u8,
    pub value: u8,
    pub show_border: bool,
    pub right: u16,
    pub bottom: u16,
}

impl SliderGeometry {
    /// Height of the top and bottom border rows (zero without a border).
    pub fn border(&self) -> u16 {
        if self.show_border { self.size as u16 } else { 0 }
    }

    pub fn bar_width(&self) -> u16 {
        self.size as u16 * SLIDER_SIZE_FACTOR
    }

    pub fn bar_left(&self) -> u16 {
        self.x + self.border() * SLIDER_SIZE_FACTOR
    }

    pub fn bar_right(&self) -> u16 {
        self.bar_left() + self.bar_width() - 1
    }

    /// First interior row (maps to `max_value`).
    pub fn bar_top(&self) -> u16 {
        self.y + self.border()
    }

    /// Last interior row (maps to `1`).
    pub fn bar_bottom(&self) -> u16 {
        self.bottom.saturating_sub(self.border())
    }

    pub fn extent(&self) -> Extent {
        Extent {
            x: self.x,
            y: self.y,
            right: self.right,
            bottom: self.bottom,
        }
    }

    /// Map a touch row to a value in `[0, max_value]`.
    ///
    /// Rows below the interior give 0, rows above it give `max_value`, and
    /// interior rows count pixels up from the bottom edge.
    pub fn value_at(&self, touch_y: u16) -> u8 {
        let bar_bottom = self.bar_bottom();
        if touch_y > bar_bottom {
            0
        } else if touch_y < self.bar_top() {
            self.max_value
        } else {
            (bar_bottom - touch_y + 1).min(self.max_value as u16) as u8
        }
    }
}

fn slider_width(size: u8, show_border: bool) -> u32 {
    let units = if show_border { 3 * size as u32 } else { size as u32 };
    units * SLIDER_SIZE_FACTOR as u32
}

fn slider_height(size: u8, max_value: u8, show_border: bool) -> u32 {
    let borders = if show_border { 2 * size as u32 } else { 0 };
    max_value as u32 + borders
}

/// Validate a slider request against the display.
///
/// Rules run in a fixed order: size, value range, position, then edges.
/// Position and edge fallbacks move the slider to the display edge and shrink
/// it to [`SLIDER_FALLBACK_SIZE`] so the result never lands half clamped.
pub fn validate_slider(request: SliderRequest, bounds: DisplayBounds) -> Validated<SliderGeometry> {
    let mut report = Report::new();
    let SliderRequest {
        mut x,
        mut y,
        mut size,
        mut max_value,
        mut value,
        show_border,
    } = request;
    let width = bounds.width as u32;
    let height = bounds.height as u32;

    if size == 0 {
        size = SLIDER_DEFAULT_SIZE;
        report.push(WidgetError::SizeZero);
    } else if size > SLIDER_MAX_SIZE {
        size = SLIDER_DEFAULT_SIZE;
        report.push(WidgetError::Size);
    }

    if max_value == 0 {
        max_value = 1;
        report.push(WidgetError::MaxValue);
    }
    if value > max_value {
        value = max_value;
        report.push(WidgetError::ActualValue);
    }

    if x as u32 >= width.saturating_sub(3 * SLIDER_SIZE_FACTOR as u32) {
        x = 0;
        size = SLIDER_FALLBACK_SIZE;
        report.push(WidgetError::PosX);
    }
    if y as u32 >= height.saturating_sub(3) {
        y = 0;
        size = SLIDER_FALLBACK_SIZE;
        report.push(WidgetError::PosY);
    }

    if x as u32 + slider_width(size, show_border) > width {
        x = 0;
        size = SLIDER_FALLBACK_SIZE;
        report.push(WidgetError::XRight);
    }

    if y as u32 + slider_height(size, max_value, show_border) > height {
        y = 0;
        size = SLIDER_FALLBACK_SIZE;
        let borders = slider_height(size, 0, show_border);
        if slider_height(size, max_value, show_border) > height {
            max_value = height.saturating_sub(borders).clamp(1, u8::MAX as u32) as u8;
            value = value.min(max_value);
        }
        report.push(WidgetError::YBottom);
    }

    let right = (x as u32 + slider_width(size, show_border) - 1).min(width.saturating_sub(1));
    let bottom =
        (y as u32 + slider_height(size, max_value, show_border) - 1).min(height.saturating_sub(1));

    if let Some(error) = report.status() {
        warn!("slider at ({}, {}) adjusted: {}", request.x, request.y, error);
    }

    Validated::new(
        SliderGeometry {
            x,
            y,
            size,
            max_value,
            value,
            show_border,
            right: right as u16,
            bottom: bottom as u16,
        },
        report,
    )
}
