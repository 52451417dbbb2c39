//! RAM framebuffer with per-pixel change detection.
//!
//! Widgets draw into this buffer instead of the SPI display. Afterwards only
//! the rectangular region containing changed pixels is flushed to the
//! hardware display in a single transaction, which keeps slider drags cheap
//! on slow display buses.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    /// Expand the dirty region to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Create a new dirty rect covering a single pixel.
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::with_corners(
            Point::new(self.min_x as i32, self.min_y as i32),
            Point::new(self.max_x as i32, self.max_y as i32),
        )
    }
}

/// Heap-allocated framebuffer implementing `DrawTarget<Color = Rgb565>`.
///
/// A 320x240 buffer takes 153,600 bytes. The dirty bounding box only grows
/// when a write actually changes a pixel.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with black pixels.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width as usize;
        let height = height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Read back a pixel; `None` outside the buffer.
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Region changed since the last flush, resetting the dirty state.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.dirty.take().map(DirtyRect::to_rectangle)
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Flush the dirty region to a hardware display, then reset the dirty state.
    ///
    /// Only the bounding rectangle of changed pixels is sent via
    /// `fill_contiguous`. If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let width = rect.max_x - rect.min_x + 1;
        let height = rect.max_y - rect.min_y + 1;

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            width, height, rect.min_x, rect.min_y
        );

        let area = rect.to_rectangle();

        // Borrow the pixel slice so the closure captures a shared reference.
        let pixels = &self.pixels;
        let stride = self.width;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = (self.width, self.height);
        for Pixel(coord, color) in pixels {
            let x = coord.x;
            let y = coord.y;
            if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut colors = colors.into_iter();
        for point in area.points() {
            let Some(color) = colors.next() else {
                break;
            };
            if point.x >= 0 && point.y >= 0 && point.x < w && point.y < h {
                self.set_pixel(point.x as usize, point.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let (w, h) = (self.width as i64, self.height as i64);
        let left = area.top_left.x as i64;
        let top = area.top_left.y as i64;

        let x_start = left.clamp(0, w) as usize;
        let y_start = top.clamp(0, h) as usize;
        let x_end = (left + area.size.width as i64).clamp(0, w) as usize;
        let y_end = (top + area.size.height as i64).clamp(0, h) as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}
