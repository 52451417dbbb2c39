//! Desktop simulator for the touchgui widget library.
//!
//! Renders a demo screen in an SDL2 window via `embedded-graphics-simulator`:
//! a chart whose waveform is driven by two sliders, and three buttons that
//! switch the chart's drawing mode.
//!
//! Widgets draw into a [`FrameBuffer`]; only the changed region is copied to
//! the simulator display each frame, the same way firmware would push it to
//! an SPI panel.
//!
//! # Controls
//!
//! | Input           | Action                        |
//! |-----------------|-------------------------------|
//! | Mouse click     | Touch press                   |
//! | Mouse drag      | Touch drag (moves sliders)    |
//! | Q / Esc         | Quit                          |

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use touchgui_core::framebuffer::FrameBuffer;
use touchgui_core::ui::components::chart::{Chart, ChartLayout, ChartMode};
use touchgui_core::ui::components::slider::ValueText;
use touchgui_core::ui::core::{TouchEvent, TouchPoint};
use touchgui_core::ui::styling::{BLUE, WHITE};
use touchgui_core::{DisplayBounds, Gui};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u16 = 320;
const DISPLAY_HEIGHT_PX: u16 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Samples plotted per frame; one per chart column.
const SAMPLE_COUNT: usize = 200;

// ---------------------------------------------------------------------------
// Demo state shared with widget handlers
// ---------------------------------------------------------------------------

/// Values written by widget handlers and read by the render loop.
#[derive(Default)]
struct DemoState {
    mode: AtomicU8,
    amplitude: AtomicU8,
    frequency: AtomicU8,
    chart_dirty: AtomicBool,
}

impl DemoState {
    fn mode(&self) -> ChartMode {
        match self.mode.load(Ordering::Relaxed) {
            0 => ChartMode::Pixel,
            1 => ChartMode::Line,
            _ => ChartMode::Area,
        }
    }

    fn set(&self, field: &AtomicU8, value: u8) {
        field.store(value, Ordering::Relaxed);
        self.chart_dirty.store(true, Ordering::Relaxed);
    }
}

/// Sine wave scaled to `amplitude` rows with `frequency` controlling the period.
fn waveform(amplitude: u8, frequency: u8) -> Vec<u8> {
    let period = 4.0 + (100 - frequency.min(100)) as f32 / 2.0;
    (0..SAMPLE_COUNT)
        .map(|i| {
            let phase = i as f32 / period;
            (amplitude as f32 * (0.5 + 0.5 * phase.sin())) as u8
        })
        .collect()
}

fn percent_text(value: u8) -> ValueText {
    let mut text = ValueText::new();
    let _ = write!(text, "{:>3}%", value);
    text
}

/// Register the demo widgets and return the chart.
fn build_screen(gui: &mut Gui, state: &Arc<DemoState>) -> Chart {
    for (index, (x, caption)) in [(10, "Pixel"), (80, "Line"), (150, "Area")]
        .into_iter()
        .enumerate()
    {
        let state = state.clone();
        let registration = gui.add_simple_button(
            x,
            200,
            60,
            30,
            caption,
            1,
            index as i16,
            move |_, value| {
                info!("Mode button {} pressed", value);
                state.set(&state.mode, value as u8);
            },
        );
        if !registration.report.is_ok() {
            warn!("button {} placed with code {}", caption, registration.code());
        }
    }

    let amplitude = state.clone();
    let registration = gui.add_slider(
        gui.new_slider(250, 10, 4)
            .with_max_value(100)
            .with_value(60)
            .with_threshold(90)
            .with_caption("Amp")
            .with_show_value(true)
            .on_change(move |_, value| {
                amplitude.set(&amplitude.amplitude, value);
                value
            }),
    );
    if !registration.report.is_ok() {
        warn!("amplitude slider placed with code {}", registration.code());
    }

    // Snaps to steps of ten.
    let frequency = state.clone();
    let registration = gui.add_slider(
        gui.new_slider(285, 10, 4)
            .with_max_value(100)
            .with_value(50)
            .with_caption("Frq")
            .with_show_value(true)
            .with_formatter(percent_text)
            .on_change(move |_, value| {
                let snapped = (value + 5) / 10 * 10;
                frequency.set(&frequency.frequency, snapped);
                snapped
            }),
    );
    if !registration.report.is_ok() {
        warn!("frequency slider placed with code {}", registration.code());
    }

    state.amplitude.store(60, Ordering::Relaxed);
    state.frequency.store(50, Ordering::Relaxed);
    state.chart_dirty.store(true, Ordering::Relaxed);

    let layout = ChartLayout::new(40, 170, SAMPLE_COUNT as u16, 150)
        .with_axes_size(2)
        .with_grid(20, 20);
    let chart = Chart::new(layout, gui.bounds());
    if !chart.report.is_ok() {
        warn!("chart placed with code {}", chart.code());
    }
    chart.value
}

fn redraw_chart(chart: &Chart, state: &DemoState, fb: &mut FrameBuffer) {
    let data = waveform(
        state.amplitude.load(Ordering::Relaxed),
        state.frequency.load(Ordering::Relaxed),
    );
    let Ok(()) = chart.clear(fb);
    let Ok(()) = chart.draw(fb);
    let Ok(fits) = chart.draw_data(fb, &data, BLUE, state.mode());
    if !fits {
        warn!("chart data clipped");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting touchgui simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Click buttons, drag sliders, Q=Quit");

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("touchgui Simulator", &output_settings);

    let mut fb = FrameBuffer::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);
    let mut gui = Gui::new(DisplayBounds::of(&fb));
    let state = Arc::new(DemoState::default());
    let chart = build_screen(&mut gui, &state);

    let Ok(()) = fb.clear(WHITE);
    let Ok(()) = gui.draw_all(&mut fb);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let Ok(()) = fb.flush(&mut display);
    window.update(&display);

    let mut pressed = false;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let touch = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    None
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    Some(TouchEvent::Press(TouchPoint::from_point(point)))
                }

                SimulatorEvent::MouseMove { point } if pressed => {
                    Some(TouchEvent::Drag(TouchPoint::from_point(point)))
                }

                SimulatorEvent::MouseButtonUp { .. } => {
                    pressed = false;
                    None
                }

                _ => None,
            };

            if let Some(touch) = touch {
                let Ok(handled) = gui.handle_touch(touch, &mut fb);
                if !handled && matches!(touch, TouchEvent::Press(_)) {
                    info!("Touch at {:?} hit no widget", touch.point());
                }
            }
        }

        // --- Render -------------------------------------------------------
        if state.chart_dirty.swap(false, Ordering::Relaxed) {
            redraw_chart(&chart, &state, &mut fb);
        }

        let Ok(()) = fb.flush(&mut display);
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
