// src/ui/components/slider.rs
//! Vertical touch slider returning a byte value.
//!
//! The bar is one pixel per value step, so a slider with `max_value = 100`
//! is 100 pixels tall plus its border rows. Touching anywhere in the touch
//! area maps the touch row to a value, runs the change handler and redraws
//! only the bar and the value text when the committed value changes.

use alloc::boxed::Box;
use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;
use log::debug;

use crate::config::SliderDefaults;
use crate::error::{Report, WidgetError};
use crate::geometry::{DisplayBounds, Extent, SliderGeometry, SliderRequest, validate_slider};
use crate::registry::{Handle, Registration, Registry};
use crate::ui::components::button::{MAX_CAPTION_LEN, caption_string};
use crate::ui::core::{TouchPoint, Touchable};
use crate::ui::draw::{draw_text, fill_rect, text_height, text_width};

/// Maximum value used by [`Slider::new`].
pub const SLIDER_DEFAULT_MAX_VALUE: u8 = 160;

/// Threshold used by [`Slider::new`]; values above it switch the bar color.
pub const SLIDER_DEFAULT_THRESHOLD: u8 = 100;

/// Initial value used by [`Slider::new`].
pub const SLIDER_DEFAULT_VALUE: u8 = (SLIDER_DEFAULT_MAX_VALUE / 4) * 3;

/// Caption and value text are always rendered with the base font.
const TEXT_SIZE: u8 = 1;

pub const MAX_VALUE_TEXT_LEN: usize = 8;

pub type ValueText = String<MAX_VALUE_TEXT_LEN>;

pub type SliderId = Handle<Slider>;

/// Called with the touch-derived value; the returned value is committed.
///
/// Returning the current committed value vetoes the change.
pub type SliderChangeHandler = Box<dyn FnMut(SliderId, u8) -> u8 + Send>;

/// Renders the committed value below the slider.
pub type ValueFormatter = fn(u8) -> ValueText;

fn default_value_text(value: u8) -> ValueText {
    let mut text = ValueText::new();
    // Three digits always fit.
    let _ = write!(text, "{:03}", value);
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderColors {
    /// Border frame
    pub slider: Rgb565,
    pub bar: Rgb565,
    /// Bar color while the value is above the threshold
    pub bar_threshold: Rgb565,
    pub bar_background: Rgb565,
    pub caption: Rgb565,
    pub value: Rgb565,
    pub caption_value_background: Rgb565,
}

impl From<&SliderDefaults> for SliderColors {
    fn from(defaults: &SliderDefaults) -> Self {
        Self {
            slider: defaults.slider_color,
            bar: defaults.bar_color,
            bar_threshold: defaults.bar_threshold_color,
            bar_background: defaults.bar_background_color,
            caption: defaults.caption_color,
            value: defaults.value_color,
            caption_value_background: defaults.caption_value_background_color,
        }
    }
}

/// Touch slider.
///
/// Like buttons, a slider is inactive until drawn. Its geometry is validated
/// against the display when it is registered or moved; until then it is laid
/// out against an unbounded surface.
///
/// # Examples
/// ```ignore
/// let volume = Slider::new(10, 10, 10)
///     .with_max_value(100)
///     .with_threshold(80)
///     .with_caption("Vol")
///     .with_show_value(true)
///     .on_change(|_, value| value - value % 5);
/// let registration = gui.add_slider(volume);
/// ```
pub struct Slider {
    request: SliderRequest,
    geometry: SliderGeometry,
    bounds: DisplayBounds,
    threshold: u8,
    touch_value: u8,
    caption: Option<String<MAX_CAPTION_LEN>>,
    show_value: bool,
    colors: SliderColors,
    touch_border: u8,
    active: bool,
    on_change: Option<SliderChangeHandler>,
    formatter: Option<ValueFormatter>,
}

impl Slider {
    /// Create a bordered slider with the built-in defaults.
    pub fn new(x: u16, y: u16, size: u8) -> Self {
        Self::with_defaults(&SliderDefaults::default(), x, y, size)
    }

    /// Create a slider whose colors and touch border come from `defaults`.
    pub fn with_defaults(defaults: &SliderDefaults, x: u16, y: u16, size: u8) -> Self {
        let mut slider = Self {
            request: SliderRequest {
                x,
                y,
                size,
                max_value: SLIDER_DEFAULT_MAX_VALUE,
                value: SLIDER_DEFAULT_VALUE,
                show_border: true,
            },
            geometry: SliderGeometry {
                x,
                y,
                size,
                max_value: SLIDER_DEFAULT_MAX_VALUE,
                value: SLIDER_DEFAULT_VALUE,
                show_border: true,
                right: x,
                bottom: y,
            },
            bounds: DisplayBounds::new(u16::MAX, u16::MAX),
            threshold: SLIDER_DEFAULT_THRESHOLD,
            touch_value: SLIDER_DEFAULT_VALUE,
            caption: None,
            show_value: false,
            colors: SliderColors::from(defaults),
            touch_border: defaults.touch_border,
            active: false,
            on_change: None,
            formatter: None,
        };
        slider.layout();
        slider
    }

    /// Re-run validation of the current request against the stored bounds.
    fn layout(&mut self) -> Report {
        let validated = validate_slider(self.request, self.bounds);
        self.geometry = validated.value;
        self.touch_value = self.geometry.value;
        validated.report
    }

    pub fn with_max_value(mut self, max_value: u8) -> Self {
        self.request.max_value = max_value;
        self.layout();
        self
    }

    /// Initial committed value.
    pub fn with_value(mut self, value: u8) -> Self {
        self.request.value = value;
        self.layout();
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Show or hide the frame around the bar.
    pub fn with_border(mut self, show_border: bool) -> Self {
        self.request.show_border = show_border;
        self.layout();
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption_string(caption));
        self
    }

    pub fn with_show_value(mut self, show_value: bool) -> Self {
        self.show_value = show_value;
        self
    }

    pub fn with_touch_border(mut self, touch_border: u8) -> Self {
        self.touch_border = touch_border;
        self
    }

    pub fn with_colors(mut self, colors: SliderColors) -> Self {
        self.colors = colors;
        self
    }

    /// Replace the default `{:03}` value text.
    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Set the handler that may adjust or veto touch-derived values.
    pub fn on_change(mut self, handler: impl FnMut(SliderId, u8) -> u8 + Send + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Move the slider and revalidate its geometry against the display.
    ///
    /// Does not redraw. The returned report lists every fallback applied.
    pub fn set_position(&mut self, x: u16, y: u16, bounds: DisplayBounds) -> Report {
        self.request.x = x;
        self.request.y = y;
        self.bounds = bounds;
        let value = self.geometry.value;
        self.request.value = value;
        self.layout()
    }

    /// Render border, bar, caption and value. Marks the slider active.
    ///
    /// Any caption finding skips the value text for this draw. An empty
    /// caption is dropped, so the next draw prints the value.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<Report, D::Error> {
        self.active = true;

        if self.geometry.show_border {
            self.draw_border(display)?;
        }
        self.draw_bar(display)?;

        let mut report = self.print_caption(display)?;
        if !report.is_ok() {
            return Ok(report);
        }
        report.merge(&self.print_value(display)?);
        Ok(report)
    }

    /// Frame columns left and right of the bar plus rows above and below it.
    pub fn draw_border<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let g = &self.geometry;
        let color = self.colors.slider;
        let (left, right) = (g.bar_left(), g.bar_right());

        fill_rect(display, g.x, g.y, left.saturating_sub(1), g.bottom, color)?;
        fill_rect(display, right + 1, g.y, g.right, g.bottom, color)?;
        fill_rect(display, left, g.y, right, g.bar_top().saturating_sub(1), color)?;
        fill_rect(display, left, g.bar_bottom() + 1, right, g.bottom, color)
    }

    /// Bar background above the committed value, value bar below it.
    pub fn draw_bar<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let g = &self.geometry;
        let value = g.value as u16;
        let (left, right, bar_bottom) = (g.bar_left(), g.bar_right(), g.bar_bottom());

        if g.value < g.max_value {
            fill_rect(
                display,
                left,
                g.bar_top(),
                right,
                bar_bottom.saturating_sub(value),
                self.colors.bar_background,
            )?;
        }

        if g.value > 0 {
            let color = if g.value > self.threshold {
                self.colors.bar_threshold
            } else {
                self.colors.bar
            };
            fill_rect(display, left, (bar_bottom + 1).saturating_sub(value), right, bar_bottom, color)?;
        }
        Ok(())
    }

    /// Caption centered below the slider.
    ///
    /// An empty caption is dropped and reported as `CaptionLength`.
    pub fn print_caption<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<Report, D::Error> {
        let mut report = Report::new();
        let Some(caption) = self.caption.as_deref() else {
            return Ok(report);
        };
        if caption.is_empty() {
            self.caption = None;
            report.push(WidgetError::CaptionLength);
            return Ok(report);
        }

        let g = &self.geometry;
        let half_width = g.extent().width() / 2;
        let caption_x = (g.x + half_width).saturating_sub(text_width(caption, TEXT_SIZE) / 2);
        let caption_y = g.bottom.saturating_add(g.size as u16);
        if caption_y as u32 + text_height(TEXT_SIZE) as u32 > self.bounds.height as u32 {
            report.push(WidgetError::CaptionHeight);
            return Ok(report);
        }

        draw_text(
            display,
            caption_x,
            caption_y,
            caption,
            TEXT_SIZE,
            self.colors.caption,
            self.colors.caption_value_background,
        )?;
        Ok(report)
    }

    /// Value text left-aligned below the caption.
    ///
    /// Without room the value is hidden for good and `ValueTooHigh` reported.
    pub fn print_value<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<Report, D::Error> {
        let mut report = Report::new();
        if !self.show_value {
            return Ok(report);
        }

        let g = &self.geometry;
        let mut value_y = g.bottom.saturating_add(g.size as u16);
        if self.caption.is_some() {
            value_y = value_y.saturating_add(text_height(TEXT_SIZE));
        }
        if value_y as u32 + text_height(TEXT_SIZE) as u32 > self.bounds.height as u32 {
            self.show_value = false;
            report.push(WidgetError::ValueTooHigh);
            return Ok(report);
        }

        let format = self.formatter.unwrap_or(default_value_text);
        let text = format(g.value);
        draw_text(
            display,
            g.x,
            value_y,
            &text,
            TEXT_SIZE,
            self.colors.value,
            self.colors.caption_value_background,
        )?;
        Ok(report)
    }

    /// Redraw only what depends on the committed value.
    pub fn redraw_value<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<Report, D::Error> {
        self.draw_bar(display)?;
        self.print_value(display)
    }

    /// React to a touch at `point`.
    ///
    /// Returns whether the point was inside the touch area. The bar and the
    /// value text are redrawn only when the committed value changes.
    pub fn check<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        handle: SliderId,
        point: TouchPoint,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if !self.contains_point(point) {
            return Ok(false);
        }

        let candidate = self.geometry.value_at(point.y);
        if candidate == self.touch_value {
            return Ok(true);
        }
        self.touch_value = candidate;

        let requested = match self.on_change.as_mut() {
            Some(handler) => handler(handle, candidate),
            None => candidate,
        };
        if requested == self.geometry.value {
            return Ok(true);
        }

        self.geometry.value = requested.min(self.geometry.max_value);
        self.redraw_value(display)?;
        Ok(true)
    }

    pub fn value(&self) -> u8 {
        self.geometry.value
    }

    /// Commit a value without redrawing; clamped to the maximum.
    pub fn set_value(&mut self, value: u8) -> Report {
        let mut report = Report::new();
        let max_value = self.geometry.max_value;
        self.geometry.value = if value > max_value {
            report.push(WidgetError::ActualValue);
            max_value
        } else {
            value
        };
        report
    }

    pub fn max_value(&self) -> u8 {
        self.geometry.max_value
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: u8) {
        self.threshold = threshold;
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.caption = Some(caption_string(caption));
    }

    pub fn set_show_value(&mut self, show_value: bool) {
        self.show_value = show_value;
    }

    pub fn set_formatter(&mut self, formatter: Option<ValueFormatter>) {
        self.formatter = formatter;
    }

    pub fn colors(&self) -> SliderColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: SliderColors) {
        self.colors = colors;
    }

    pub fn set_slider_color(&mut self, color: Rgb565) {
        self.colors.slider = color;
    }

    pub fn set_bar_color(&mut self, color: Rgb565) {
        self.colors.bar = color;
    }

    pub fn set_bar_threshold_color(&mut self, color: Rgb565) {
        self.colors.bar_threshold = color;
    }

    pub fn set_touch_border(&mut self, touch_border: u8) {
        self.touch_border = touch_border;
    }

    pub fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    pub fn position_x_right(&self) -> u16 {
        self.geometry.right
    }

    pub fn position_y_bottom(&self) -> u16 {
        self.geometry.bottom
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Touchable for Slider {
    fn extent(&self) -> Extent {
        self.geometry.extent()
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

impl Registry<Slider> {
    /// Validate the slider against the display and append it.
    pub fn add_slider(&mut self, mut slider: Slider, bounds: DisplayBounds) -> Registration<Slider> {
        let SliderRequest { x, y, .. } = slider.request;
        let report = slider.set_position(x, y, bounds);
        Registration {
            handle: self.register(slider),
            report,
        }
    }

    /// Deliver a touch to the first active slider under `point`.
    ///
    /// Returns `Ok(false)` when nothing was hit.
    pub fn dispatch_slider<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        point: TouchPoint,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        let Some(handle) = self.hit_test(point) else {
            return Ok(false);
        };
        debug!("touch ({}, {}) hit slider {}", point.x, point.y, handle.index());
        match self.get_mut(handle) {
            Some(slider) => slider.check(handle, point, display),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::*;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};

    const QVGA: DisplayBounds = DisplayBounds::new(320, 240);

    fn scenario_slider() -> Slider {
        Slider::new(10, 10, 10)
            .with_max_value(100)
            .with_value(0)
            .with_threshold(50)
    }

    #[test]
    fn test_defaults() {
        let slider = Slider::new(10, 10, 4);
        assert_eq!(slider.max_value(), 160);
        assert_eq!(slider.value(), 120);
        assert_eq!(slider.threshold(), 100);
        assert!(!slider.is_active());
    }

    #[test]
    fn test_value_colors_follow_threshold() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut registry: Registry<Slider> = Registry::new();
        let reg = registry.add_slider(scenario_slider(), QVGA);
        assert!(reg.report.is_ok());
        registry.get_mut(reg.handle).unwrap().draw(&mut fb).unwrap();

        // Border frame and empty bar.
        assert_eq!(fb.pixel(10, 10), Some(SLIDER_DEFAULT_SLIDER_COLOR));
        assert_eq!(fb.pixel(30, 119), Some(SLIDER_DEFAULT_BAR_BACKGROUND_COLOR));

        assert!(registry.dispatch_slider(TouchPoint::new(15, 70), &mut fb).unwrap());
        assert_eq!(registry.get(reg.handle).unwrap().value(), 50);
        assert_eq!(fb.pixel(30, 119), Some(SLIDER_DEFAULT_BAR_COLOR));
        assert_eq!(fb.pixel(30, 70), Some(SLIDER_DEFAULT_BAR_COLOR));
        assert_eq!(fb.pixel(30, 69), Some(SLIDER_DEFAULT_BAR_BACKGROUND_COLOR));

        assert!(registry.dispatch_slider(TouchPoint::new(15, 69), &mut fb).unwrap());
        assert_eq!(registry.get(reg.handle).unwrap().value(), 51);
        assert_eq!(fb.pixel(30, 69), Some(SLIDER_DEFAULT_BAR_THRESHOLD_COLOR));
    }

    #[test]
    fn test_touch_rows_map_to_range_ends() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut registry: Registry<Slider> = Registry::new();
        let reg = registry.add_slider(scenario_slider().with_value(30), QVGA);
        registry.activate_all();

        assert!(registry.dispatch_slider(TouchPoint::new(15, 10), &mut fb).unwrap());
        assert_eq!(registry.get(reg.handle).unwrap().value(), 100);

        assert!(registry.dispatch_slider(TouchPoint::new(15, 129), &mut fb).unwrap());
        assert_eq!(registry.get(reg.handle).unwrap().value(), 0);

        assert!(!registry.dispatch_slider(TouchPoint::new(15, 229), &mut fb).unwrap());
    }

    #[test]
    fn test_same_touch_redraws_once() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut registry: Registry<Slider> = Registry::new();
        let reg = registry.add_slider(scenario_slider().with_show_value(true), QVGA);
        registry.get_mut(reg.handle).unwrap().draw(&mut fb).unwrap();
        fb.take_dirty();

        assert!(registry.dispatch_slider(TouchPoint::new(15, 70), &mut fb).unwrap());
        assert!(fb.take_dirty().is_some());

        assert!(registry.dispatch_slider(TouchPoint::new(15, 70), &mut fb).unwrap());
        assert!(fb.take_dirty().is_none());
    }

    #[test]
    fn test_handler_can_veto() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut registry: Registry<Slider> = Registry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let reg = registry.add_slider(
            scenario_slider().with_value(20).on_change(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                20
            }),
            QVGA,
        );
        registry.get_mut(reg.handle).unwrap().draw(&mut fb).unwrap();
        fb.take_dirty();

        assert!(registry.dispatch_slider(TouchPoint::new(15, 40), &mut fb).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.get(reg.handle).unwrap().value(), 20);
        assert!(fb.take_dirty().is_none());

        // A different row runs the handler again even though nothing is committed.
        assert!(registry.dispatch_slider(TouchPoint::new(15, 41), &mut fb).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handler_result_is_clamped() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut registry: Registry<Slider> = Registry::new();
        let reg = registry.add_slider(scenario_slider().on_change(|_, _| 250), QVGA);
        registry.activate_all();

        assert!(registry.dispatch_slider(TouchPoint::new(15, 100), &mut fb).unwrap());
        assert_eq!(registry.get(reg.handle).unwrap().value(), 100);
    }

    #[test]
    fn test_caption_and_value_below_slider() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut slider = scenario_slider()
            .with_value(7)
            .with_caption("Vol")
            .with_show_value(true)
            .with_formatter(|value| {
                let mut text = ValueText::new();
                let _ = write!(text, "v{}", value);
                text
            });
        slider.set_position(10, 10, QVGA);

        let report = slider.draw(&mut fb).unwrap();
        assert!(report.is_ok());
        // Caption row starts at bottom + size, value row one glyph lower.
        let caption_row = 129 + 10;
        assert_eq!(fb.pixel(10, caption_row + 10), Some(SLIDER_DEFAULT_CAPTION_VALUE_BACKGROUND_COLOR));
    }

    #[test]
    fn test_empty_caption_is_dropped() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut slider = scenario_slider().with_caption("").with_show_value(true);
        slider.set_position(10, 10, QVGA);

        // The caption finding ends the first draw before the value text.
        let report = slider.draw(&mut fb).unwrap();
        assert_eq!(report.status(), Some(WidgetError::CaptionLength));
        assert_eq!(slider.caption(), None);
        assert_eq!(fb.take_dirty().map(|area| area.bottom_right()), Some(Some(Point::new(69, 129))));

        // Without a caption the value moves up to the caption row.
        let report = slider.draw(&mut fb).unwrap();
        assert!(report.is_ok());
        let dirty = fb.take_dirty().unwrap();
        assert!(dirty.top_left.y >= 139);
        assert!(dirty.top_left.y < 149);
    }

    #[test]
    fn test_no_room_for_caption_or_value() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut slider = Slider::new(10, 10, 4)
            .with_max_value(200)
            .with_caption("Level")
            .with_show_value(true);
        let report = slider.set_position(10, 10, QVGA);
        assert!(report.is_ok());

        // bottom = 10 + 200 + 8 - 1 = 217, caption at 221 needs rows up to 230.
        let report = slider.draw(&mut fb).unwrap();
        assert_eq!(report.status(), Some(WidgetError::ValueTooHigh));

        slider.set_position(10, 25, QVGA);
        let report = slider.draw(&mut fb).unwrap();
        assert_eq!(report.status(), Some(WidgetError::CaptionHeight));
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = scenario_slider();
        let report = slider.set_value(150);
        assert_eq!(report.status(), Some(WidgetError::ActualValue));
        assert_eq!(slider.value(), 100);
        assert!(slider.set_value(42).is_ok());
        assert_eq!(slider.value(), 42);
    }

    #[test]
    fn test_value_text_is_zero_padded() {
        assert_eq!(default_value_text(7).as_str(), "007");
        assert_eq!(default_value_text(255).as_str(), "255");
    }
}
