//! Application-owned GUI context.
//!
//! [`Gui`] bundles everything that is shared between widgets of a screen:
//! the display bounds used for validation, the defaults for new widgets and
//! one registry per touchable widget kind. All process-wide operations
//! (changing defaults, bulk activation, checking a touch against every
//! widget) are methods on the context.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::config::{ButtonDefaults, GuiConfig, SliderDefaults};
use crate::geometry::DisplayBounds;
use crate::registry::{Registration, Registry};
use crate::ui::components::button::{Button, ButtonId};
use crate::ui::components::slider::{Slider, SliderId, ValueFormatter};
use crate::ui::core::{TouchEvent, TouchPoint};

pub struct Gui {
    bounds: DisplayBounds,
    config: GuiConfig,
    buttons: Registry<Button>,
    sliders: Registry<Slider>,
}

impl Gui {
    /// Context with the built-in defaults.
    pub fn new(bounds: DisplayBounds) -> Self {
        Self::with_config(bounds, GuiConfig::default())
    }

    pub fn with_config(bounds: DisplayBounds, config: GuiConfig) -> Self {
        info!("GUI context for {}x{} display", bounds.width, bounds.height);
        Self {
            bounds,
            config,
            buttons: Registry::new(),
            sliders: Registry::new(),
        }
    }

    pub fn bounds(&self) -> DisplayBounds {
        self.bounds
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Defaults only apply to widgets created afterwards.
    pub fn config_mut(&mut self) -> &mut GuiConfig {
        &mut self.config
    }

    pub fn set_button_defaults(&mut self, defaults: ButtonDefaults) {
        self.config.button = defaults;
    }

    pub fn set_slider_defaults(&mut self, defaults: SliderDefaults) {
        self.config.slider = defaults;
    }

    pub fn set_default_button_touch_border(&mut self, touch_border: u8) {
        self.config.button.touch_border = touch_border;
    }

    pub fn set_default_button_color(&mut self, color: Rgb565) {
        self.config.button.color = color;
    }

    pub fn set_default_caption_color(&mut self, color: Rgb565) {
        self.config.button.caption_color = color;
    }

    pub fn set_default_slider_color(&mut self, color: Rgb565) {
        self.config.slider.slider_color = color;
    }

    pub fn set_default_bar_color(&mut self, color: Rgb565) {
        self.config.slider.bar_color = color;
    }

    /// A button prefilled with the current defaults. Register it with
    /// [`Gui::add_button`].
    pub fn new_button(&self, x: u16, y: u16, width: u16, height: u16) -> Button {
        Button::with_defaults(&self.config.button, x, y, width, height)
    }

    /// A slider prefilled with the current defaults. Register it with
    /// [`Gui::add_slider`].
    pub fn new_slider(&self, x: u16, y: u16, size: u8) -> Slider {
        Slider::with_defaults(&self.config.slider, x, y, size)
    }

    pub fn add_button(&mut self, button: Button) -> Registration<Button> {
        self.buttons.add_button(button, self.bounds)
    }

    /// Shorthand for a captioned button with the default colors.
    #[allow(clippy::too_many_arguments)]
    pub fn add_simple_button(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        caption: &str,
        caption_size: u8,
        value: i16,
        on_touch: impl FnMut(ButtonId, i16) + Send + 'static,
    ) -> Registration<Button> {
        let button = self
            .new_button(x, y, width, height)
            .with_caption(caption, caption_size)
            .with_value(value)
            .on_touch(on_touch);
        self.add_button(button)
    }

    pub fn add_slider(&mut self, slider: Slider) -> Registration<Slider> {
        self.sliders.add_slider(slider, self.bounds)
    }

    /// Shorthand for a bordered slider with the default range and threshold.
    #[allow(clippy::too_many_arguments)]
    pub fn add_simple_slider(
        &mut self,
        x: u16,
        y: u16,
        size: u8,
        caption: &str,
        show_value: bool,
        on_change: impl FnMut(SliderId, u8) -> u8 + Send + 'static,
        formatter: Option<ValueFormatter>,
    ) -> Registration<Slider> {
        let mut slider = self
            .new_slider(x, y, size)
            .with_caption(caption)
            .with_show_value(show_value)
            .on_change(on_change);
        if let Some(formatter) = formatter {
            slider = slider.with_formatter(formatter);
        }
        self.add_slider(slider)
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id)
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.get_mut(id)
    }

    pub fn slider(&self, id: SliderId) -> Option<&Slider> {
        self.sliders.get(id)
    }

    pub fn slider_mut(&mut self, id: SliderId) -> Option<&mut Slider> {
        self.sliders.get_mut(id)
    }

    pub fn buttons(&self) -> &Registry<Button> {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut Registry<Button> {
        &mut self.buttons
    }

    pub fn sliders(&self) -> &Registry<Slider> {
        &self.sliders
    }

    pub fn sliders_mut(&mut self) -> &mut Registry<Slider> {
        &mut self.sliders
    }

    /// Fire the first active button under `point`.
    pub fn check_all_buttons(&mut self, point: TouchPoint) -> bool {
        self.buttons.dispatch_button(point)
    }

    /// Deliver `point` to the first active slider under it.
    pub fn check_all_sliders<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        point: TouchPoint,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        self.sliders.dispatch_slider(point, display)
    }

    /// Route a touch event: a press goes to buttons first and then sliders,
    /// a drag only moves sliders.
    pub fn handle_touch<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        event: TouchEvent,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        let point = event.point();
        if let TouchEvent::Press(_) = event
            && self.check_all_buttons(point)
        {
            return Ok(true);
        }
        let handled = self.check_all_sliders(point, display)?;
        if !handled {
            debug!("touch ({}, {}) hit nothing", point.x, point.y);
        }
        Ok(handled)
    }

    pub fn activate_all_buttons(&mut self) {
        self.buttons.activate_all();
    }

    pub fn deactivate_all_buttons(&mut self) {
        self.buttons.deactivate_all();
    }

    pub fn activate_all_sliders(&mut self) {
        self.sliders.activate_all();
    }

    pub fn deactivate_all_sliders(&mut self) {
        self.sliders.deactivate_all();
    }

    /// Draw every registered button and slider, activating them.
    pub fn draw_all<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        for (_, button) in self.buttons.iter_mut() {
            button.draw(display)?;
        }
        for (_, slider) in self.sliders.iter_mut() {
            slider.draw(display)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::core::Touchable;
    use crate::ui::styling::{BLUE, YELLOW};

    #[test]
    fn test_defaults_apply_to_later_widgets_only() {
        let mut gui = Gui::new(DisplayBounds::new(320, 240));
        let before = gui.add_button(gui.new_button(0, 0, 20, 20));

        gui.set_default_button_color(YELLOW);
        gui.set_default_button_touch_border(9);
        let after = gui.add_button(gui.new_button(50, 0, 20, 20));

        let mut fb = FrameBuffer::new(320, 240);
        gui.draw_all(&mut fb).unwrap();
        assert_ne!(fb.pixel(0, 0), Some(YELLOW));
        assert_eq!(fb.pixel(50, 0), Some(YELLOW));
        assert_eq!(gui.button(before.handle).unwrap().touch_border(), 2);
        assert_eq!(gui.button(after.handle).unwrap().touch_border(), 9);
    }

    #[test]
    fn test_slider_defaults_are_used() {
        let mut gui = Gui::new(DisplayBounds::new(320, 240));
        gui.set_default_bar_color(BLUE);
        let reg = gui.add_simple_slider(10, 10, 4, "Lvl", true, |_, value| value, None);
        assert!(reg.report.is_ok());
        assert_eq!(gui.slider(reg.handle).unwrap().colors().bar, BLUE);
        assert_eq!(gui.slider(reg.handle).unwrap().max_value(), 160);
    }

    #[test]
    fn test_drag_skips_buttons() {
        let mut gui = Gui::new(DisplayBounds::new(320, 240));
        let mut fb = FrameBuffer::new(320, 240);
        gui.add_simple_button(0, 0, 50, 50, "B", 1, 0, |_, _| {});
        gui.activate_all_buttons();

        let point = TouchPoint::new(10, 10);
        assert!(gui.handle_touch(TouchEvent::Press(point), &mut fb).unwrap());
        assert!(!gui.handle_touch(TouchEvent::Drag(point), &mut fb).unwrap());

        gui.deactivate_all_buttons();
        assert!(!gui.handle_touch(TouchEvent::Press(point), &mut fb).unwrap());
    }
}
