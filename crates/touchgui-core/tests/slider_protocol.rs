
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use fixture::{QVGA, RecordingDisplay};
use touchgui_core::Gui;
use touchgui_core::error::WidgetError;
use touchgui_core::geometry::SLIDER_FALLBACK_SIZE;
use touchgui_core::ui::components::slider::Slider;
use touchgui_core::ui::core::{TouchEvent, TouchPoint};
use touchgui_core::ui::styling::{
    SLIDER_DEFAULT_BAR_BACKGROUND_COLOR, SLIDER_DEFAULT_BAR_COLOR,
    SLIDER_DEFAULT_BAR_THRESHOLD_COLOR,
};

/// Slider at (10, 10), unit size 10, range 0..=100, threshold 50.
///
/// Bordered: columns 10..=69, rows 10..=129, bar interior rows 20..=119.
fn scenario(gui: &mut Gui) -> touchgui_core::ui::components::slider::SliderId {
    let slider = gui
        .new_slider(10, 10, 10)
        .with_max_value(100)
        .with_value(0)
        .with_threshold(50)
        .with_show_value(true);
    let reg = gui.add_slider(slider);
    assert!(reg.report.is_ok());
    reg.handle
}

#[test]
fn scenario_touch_rows_and_colors() {
    let mut gui = Gui::new(QVGA);
    let mut display = RecordingDisplay::new();
    let id = scenario(&mut gui);
    gui.draw_all(&mut display).unwrap();

    let geometry = *gui.slider(id).unwrap().geometry();
    assert_eq!(geometry.right, 69);
    assert_eq!(geometry.bottom, 129);

    // Bottom border row maps to 0, top border row to the maximum.
    assert!(gui.check_all_sliders(TouchPoint::new(15, 10), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 100);
    assert!(gui.check_all_sliders(TouchPoint::new(15, 129), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 0);

    // At the threshold the normal bar color is used.
    assert!(gui.check_all_sliders(TouchPoint::new(15, 70), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 50);
    assert_eq!(display.pixel(40, 119), Some(SLIDER_DEFAULT_BAR_COLOR));
    assert_eq!(display.pixel(40, 69), Some(SLIDER_DEFAULT_BAR_BACKGROUND_COLOR));

    assert!(gui.check_all_sliders(TouchPoint::new(15, 69), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 51);
    assert_eq!(display.pixel(40, 119), Some(SLIDER_DEFAULT_BAR_THRESHOLD_COLOR));

    // Below the touch border: not this slider.
    assert!(!gui.check_all_sliders(TouchPoint::new(15, 229), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 51);
}

#[test]
fn identity_handler_redraws_once_per_new_value() {
    let mut gui = Gui::new(QVGA);
    let mut display = RecordingDisplay::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let slider = gui
        .new_slider(10, 10, 10)
        .with_max_value(100)
        .with_value(0)
        .on_change(move |_, value| {
            counter.fetch_add(1, Ordering::SeqCst);
            value
        });
    gui.add_slider(slider);
    gui.draw_all(&mut display).unwrap();
    display.take_draw_calls();

    let press = TouchEvent::Press(TouchPoint::new(15, 80));
    assert!(gui.handle_touch(press, &mut display).unwrap());
    assert!(display.take_draw_calls() > 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(gui.handle_touch(press, &mut display).unwrap());
    assert_eq!(display.take_draw_calls(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Dragging to a new row changes the value again.
    let drag = TouchEvent::Drag(TouchPoint::new(15, 79));
    assert!(gui.handle_touch(drag, &mut display).unwrap());
    assert!(display.take_draw_calls() > 0);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn value_change_redraws_only_bar_and_value_text() {
    let mut gui = Gui::new(QVGA);
    let mut display = RecordingDisplay::new();
    let id = scenario(&mut gui);
    gui.slider_mut(id).unwrap().set_caption("Vol");
    gui.draw_all(&mut display).unwrap();

    // Mark border pixels on all four sides and the whole caption cell run.
    let border = [
        Point::new(10, 10),
        Point::new(35, 15),
        Point::new(65, 100),
        Point::new(35, 125),
    ];
    for point in border {
        Pixel(point, Rgb565::CYAN).draw(&mut display.frame).unwrap();
    }
    // "Vol" is centered below the slider: x = 40 - 9, one row below bottom + size.
    let caption = Rectangle::new(Point::new(31, 139), Size::new(18, 10));
    display.frame.fill_solid(&caption, Rgb565::CYAN).unwrap();
    display.frame.take_dirty();

    assert!(gui.check_all_sliders(TouchPoint::new(15, 70), &mut display).unwrap());
    assert_eq!(gui.slider(id).unwrap().value(), 50);

    for point in border {
        assert_eq!(display.pixel(point.x as u16, point.y as u16), Some(Rgb565::CYAN));
    }
    for point in caption.points() {
        assert_eq!(display.pixel(point.x as u16, point.y as u16), Some(Rgb565::CYAN));
    }

    // Bar columns 30..=49 rows 20..=119, value text from x = 10 on rows 149..=158.
    let dirty = display.frame.take_dirty().unwrap();
    let corner = dirty.bottom_right().unwrap();
    assert!(dirty.top_left.x >= 10 && corner.x <= 49);
    assert!(dirty.top_left.y >= 20 && corner.y <= 158);
    assert_eq!(display.pixel(40, 70), Some(SLIDER_DEFAULT_BAR_COLOR));
}

#[test]
fn mapping_covers_whole_range_in_order() {
    let mut gui = Gui::new(QVGA);
    let mut display = RecordingDisplay::new();
    let id = scenario(&mut gui);
    gui.activate_all_sliders();

    let mut previous = 0;
    let mut seen = [false; 101];
    for y in (10..=129).rev() {
        assert!(gui.check_all_sliders(TouchPoint::new(40, y), &mut display).unwrap());
        let value = gui.slider(id).unwrap().value();
        assert!(value >= previous);
        seen[value as usize] = true;
        previous = value;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn slider_at_display_width_falls_back_to_origin() {
    let mut gui = Gui::new(QVGA);
    for size in [1, 5, 20] {
        let reg = gui.add_slider(Slider::new(QVGA.width, 10, size));
        let geometry = *gui.slider(reg.handle).unwrap().geometry();

        assert_eq!(geometry.x, 0);
        assert_eq!(geometry.size, SLIDER_FALLBACK_SIZE);
        assert!(matches!(
            reg.report.status(),
            Some(WidgetError::PosX | WidgetError::XRight)
        ));
        assert!(geometry.right < QVGA.width);
        assert!(geometry.bottom < QVGA.height);
    }
}
