// src/ui/components/button.rs
//! Touch button: a filled box with an optional centered caption, or a bare
//! caption.

use alloc::boxed::Box;
use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;
use log::debug;

use crate::config::ButtonDefaults;
use crate::error::{Report, WidgetError};
use crate::geometry::{DisplayBounds, Extent, validate_button};
use crate::registry::{Handle, Registration, Registry};
use crate::ui::core::{TouchPoint, Touchable};
use crate::ui::draw::{draw_text, fill_rect, text_height, text_width};

/// Longest caption a button stores; longer captions are truncated.
pub const MAX_CAPTION_LEN: usize = 32;

pub type ButtonId = Handle<Button>;

/// Called with the touched button's handle and its stored value.
pub type ButtonHandler = Box<dyn FnMut(ButtonId, i16) + Send>;

/// Copy as much of `text` as fits into a fixed-capacity caption.
pub(crate) fn caption_string<const N: usize>(text: &str) -> String<N> {
    let mut caption = String::new();
    for c in text.chars() {
        if caption.push(c).is_err() {
            break;
        }
    }
    caption
}

/// Touch button.
///
/// The rendering mode follows the requested width and caption size:
/// - `width == 0`: only the caption is drawn and the touch area is the
///   caption's own extent
/// - `caption_size == 0`: the body is filled but the caption is skipped
/// - otherwise a filled body with the caption centered inside
///
/// A button is inactive until it is drawn or explicitly activated.
///
/// # Examples
/// ```ignore
/// let ok = Button::new(20, 50, 80, 40)
///     .with_caption("OK", 2)
///     .with_value(1)
///     .on_touch(|_, value| info!("pressed {}", value));
/// let registration = gui.add_button(ok);
/// ```
pub struct Button {
    extent: Extent,
    width: u16,
    height: u16,
    caption: Option<String<MAX_CAPTION_LEN>>,
    caption_size: u8,
    color: Rgb565,
    caption_color: Rgb565,
    touch_border: u8,
    value: i16,
    active: bool,
    on_touch: Option<ButtonHandler>,
}

impl Button {
    /// Create a button with the built-in defaults.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::with_defaults(&ButtonDefaults::default(), x, y, width, height)
    }

    /// Create a button whose colors and touch border come from `defaults`.
    ///
    /// Geometry is not validated until the button is registered or moved with
    /// [`Button::set_position`].
    pub fn with_defaults(defaults: &ButtonDefaults, x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            extent: Extent {
                x,
                y,
                right: x.saturating_add(width.max(1) - 1),
                bottom: y.saturating_add(height.max(1) - 1),
            },
            width,
            height,
            caption: None,
            caption_size: 1,
            color: defaults.color,
            caption_color: defaults.caption_color,
            touch_border: defaults.touch_border,
            value: 0,
            active: false,
            on_touch: None,
        }
    }

    pub fn with_caption(mut self, caption: &str, caption_size: u8) -> Self {
        self.caption = Some(caption_string(caption));
        self.caption_size = caption_size;
        self
    }

    pub fn with_value(mut self, value: i16) -> Self {
        self.value = value;
        self
    }

    pub fn with_touch_border(mut self, touch_border: u8) -> Self {
        self.touch_border = touch_border;
        self
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    pub fn with_caption_color(mut self, color: Rgb565) -> Self {
        self.caption_color = color;
        self
    }

    /// Set the handler fired when a touch lands on this button.
    pub fn on_touch(mut self, handler: impl FnMut(ButtonId, i16) + Send + 'static) -> Self {
        self.on_touch = Some(Box::new(handler));
        self
    }

    fn is_caption_only(&self) -> bool {
        self.width == 0
    }

    /// Body size used for layout: the requested size, or the caption's size
    /// for caption-only buttons.
    fn measured_size(&self) -> (u16, u16) {
        if self.is_caption_only() {
            let caption = self.caption.as_deref().unwrap_or("");
            (
                text_width(caption, self.caption_size),
                text_height(self.caption_size),
            )
        } else {
            (self.width, self.height)
        }
    }

    /// Move the button and revalidate its extent against the display.
    ///
    /// Does not redraw; call [`Button::draw`] afterwards.
    pub fn set_position(&mut self, x: u16, y: u16, bounds: DisplayBounds) -> Report {
        let (width, height) = self.measured_size();
        let validated = validate_button(x, y, width, height, bounds);
        self.extent = validated.value;
        validated.report
    }

    /// Render body and caption. Marks the button active.
    ///
    /// The returned report carries caption layout findings; the outer error
    /// is the display's own.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<Report, D::Error> {
        if !self.is_caption_only() {
            let Extent { x, y, right, bottom } = self.extent;
            fill_rect(display, x, y, right, bottom, self.color)?;
        }
        self.draw_caption(display)
    }

    /// Render only the caption. Marks the button active.
    pub fn draw_caption<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<Report, D::Error> {
        self.active = true;

        let mut report = Report::new();
        let Some(caption) = self.caption.as_deref() else {
            return Ok(report);
        };
        if self.caption_size == 0 {
            return Ok(report);
        }

        let Extent { x, y, right, bottom } = self.extent;
        if self.is_caption_only() {
            draw_text(display, x, y, caption, self.caption_size, self.caption_color, self.color)?;
            return Ok(report);
        }

        // Center the caption; fall back to the top-left corner when it does not fit.
        let caption_width = text_width(caption, self.caption_size);
        let caption_x = if x as u32 + caption_width as u32 >= right as u32 {
            report.push(WidgetError::CaptionTooLong);
            x
        } else {
            x + 1 + (self.extent.width() - caption_width) / 2
        };

        let caption_height = text_height(self.caption_size);
        let caption_y = if y as u32 + caption_height as u32 >= bottom as u32 {
            report.push(WidgetError::CaptionTooHigh);
            y
        } else {
            y + 1 + (self.extent.height() - caption_height) / 2
        };

        draw_text(
            display,
            caption_x,
            caption_y,
            caption,
            self.caption_size,
            self.caption_color,
            self.color,
        )?;
        Ok(report)
    }

    /// Fire the handler if `point` hits this button.
    ///
    /// Returns whether the touch was inside the touch area.
    pub fn check(&mut self, handle: ButtonId, point: TouchPoint) -> bool {
        if !self.contains_point(point) {
            return false;
        }
        if let Some(handler) = self.on_touch.as_mut() {
            handler(handle, self.value);
        }
        true
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Replace the caption. Caption-only buttons are re-measured on the next
    /// [`Button::set_position`].
    pub fn set_caption(&mut self, caption: &str) {
        self.caption = Some(caption_string(caption));
    }

    pub fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    pub fn set_caption_color(&mut self, color: Rgb565) {
        self.caption_color = color;
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    pub fn set_value(&mut self, value: i16) {
        self.value = value;
    }

    pub fn set_touch_border(&mut self, touch_border: u8) {
        self.touch_border = touch_border;
    }

    pub fn position_x(&self) -> u16 {
        self.extent.x
    }

    pub fn position_y(&self) -> u16 {
        self.extent.y
    }

    pub fn position_x_right(&self) -> u16 {
        self.extent.right
    }

    pub fn position_y_bottom(&self) -> u16 {
        self.extent.bottom
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Touchable for Button {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn touch_border(&self) -> u8 {
        self.touch_border
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={:03} Y={:03} X1={:03} Y1={:03} B={:02} {}",
            self.extent.x,
            self.extent.y,
            self.extent.right,
            self.extent.bottom,
            self.touch_border,
            self.caption.as_deref().unwrap_or("")
        )
    }
}

impl Registry<Button> {
    /// Validate the button against the display and append it.
    pub fn add_button(&mut self, mut button: Button, bounds: DisplayBounds) -> Registration<Button> {
        let Extent { x, y, .. } = button.extent;
        let report = button.set_position(x, y, bounds);
        Registration {
            handle: self.register(button),
            report,
        }
    }

    /// Fire the first active button under `point`.
    ///
    /// Returns `false` when nothing was hit, including when the registry is
    /// empty.
    pub fn dispatch_button(&mut self, point: TouchPoint) -> bool {
        let Some(handle) = self.hit_test(point) else {
            return false;
        };
        debug!("touch ({}, {}) hit button {}", point.x, point.y, handle.index());
        self.get_mut(handle)
            .is_some_and(|button| button.check(handle, point))
    }
}
