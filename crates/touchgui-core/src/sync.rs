//! Interrupt-safe shared access to a [`Gui`].
//!
//! A single-executor application can own its `Gui` directly. Firmware that
//! feeds touches from an interrupt handler or from several executors keeps
//! the context in a [`SharedGui`] instead: registration, dispatch and bulk
//! activation then run inside one critical section.
//!
//! # Example
//!
//! ```ignore
//! use static_cell::StaticCell;
//!
//! static GUI: StaticCell<SharedGui> = StaticCell::new();
//!
//! let gui = GUI.init(SharedGui::new(Gui::new(DisplayBounds::of(&display))));
//! gui.lock(|gui| gui.add_button(ok_button));
//!
//! // In the touch task:
//! gui.handle_touch(TouchEvent::Press(point), &mut framebuffer)?;
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::gui::Gui;
use crate::ui::core::TouchEvent;

pub struct SharedGui {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Gui>>,
}

impl SharedGui {
    pub const fn new(gui: Gui) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(gui)),
        }
    }

    /// Run `f` with exclusive access to the context.
    ///
    /// # Panics
    ///
    /// Panics when called again from inside `f`, e.g. from a widget handler
    /// that tries to lock the same context.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Gui) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// [`Gui::handle_touch`] inside the critical section.
    pub fn handle_touch<D: DrawTarget<Color = Rgb565>>(
        &self,
        event: TouchEvent,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        self.lock(|gui| gui.handle_touch(event, display))
    }

    pub fn into_inner(self) -> Gui {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::geometry::DisplayBounds;
    use crate::ui::components::button::Button;
    use crate::ui::core::TouchPoint;

    #[test]
    fn test_lock_gives_mutable_access() {
        let shared = SharedGui::new(Gui::new(DisplayBounds::new(320, 240)));
        let mut fb = FrameBuffer::new(320, 240);

        let registration = shared.lock(|gui| gui.add_button(Button::new(0, 0, 30, 30)));
        assert!(registration.report.is_ok());
        shared.lock(|gui| gui.activate_all_buttons());

        let event = TouchEvent::Press(TouchPoint::new(5, 5));
        assert!(shared.handle_touch(event, &mut fb).unwrap());

        let gui = shared.into_inner();
        assert_eq!(gui.buttons().len(), 1);
    }
}
