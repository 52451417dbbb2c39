//! Drawing-surface helpers.
//!
//! Widgets speak in inclusive corner coordinates and glyph cells. These
//! helpers translate that into embedded-graphics primitives so any
//! `DrawTarget<Color = Rgb565>` can serve as the display.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

/// Base glyph cell. Larger sizes magnify it by an integer factor.
pub const BASE_FONT: &MonoFont<'static> = &FONT_6X10;

/// Glyph cell for a size multiplier. Size 0 means "render nothing".
pub fn glyph_size(size: u8) -> Size {
    BASE_FONT.character_size * size as u32
}

/// Rendered width of `text` in pixels.
pub fn text_width(text: &str, size: u8) -> u16 {
    let cells = text.chars().count() as u32;
    (cells * glyph_size(size).width).min(u16::MAX as u32) as u16
}

/// Rendered height of one line of text in pixels.
pub fn text_height(size: u8) -> u16 {
    glyph_size(size).height.min(u16::MAX as u32) as u16
}

/// Draw target that paints every pixel as a `factor` x `factor` block
/// anchored at `origin` on the wrapped display.
struct Magnified<'a, D> {
    target: &'a mut D,
    origin: Point,
    factor: u32,
}

impl<D: DrawTarget<Color = Rgb565>> Magnified<'_, D> {
    fn block(&self, top_left: Point, size: Size) -> Rectangle {
        Rectangle::new(self.origin + top_left * self.factor as i32, size * self.factor)
    }
}

impl<D: DrawTarget<Color = Rgb565>> Dimensions for Magnified<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        let f = self.factor as i32;
        let offset = outer.top_left - self.origin;
        Rectangle::new(
            Point::new(offset.x.div_euclid(f), offset.y.div_euclid(f)),
            Size::new(
                outer.size.width.div_ceil(self.factor) + 1,
                outer.size.height.div_ceil(self.factor) + 1,
            ),
        )
    }
}

impl<D: DrawTarget<Color = Rgb565>> DrawTarget for Magnified<'_, D> {
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let block = self.block(point, Size::new(1, 1));
            self.target.fill_solid(&block, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let block = self.block(area.top_left, area.size);
        self.target.fill_solid(&block, color)
    }
}

/// Fill the inclusive rectangle spanned by two corners.
pub fn fill_rect<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    color: Rgb565,
) -> Result<(), D::Error> {
    Rectangle::with_corners(
        Point::new(x0 as i32, y0 as i32),
        Point::new(x1 as i32, y1 as i32),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(display)
}

pub fn draw_line<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    color: Rgb565,
) -> Result<(), D::Error> {
    Line::new(
        Point::new(x0 as i32, y0 as i32),
        Point::new(x1 as i32, y1 as i32),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, 1))
    .draw(display)
}

pub fn draw_pixel<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: u16,
    y: u16,
    color: Rgb565,
) -> Result<(), D::Error> {
    Pixel(Point::new(x as i32, y as i32), color).draw(display)
}

/// Draw `text` with its top-left corner at `(x, y)` on a solid background.
///
/// Size `n` draws every glyph pixel as an `n` x `n` block. Returns the
/// horizontal advance in pixels.
pub fn draw_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: u16,
    y: u16,
    text: &str,
    size: u8,
    foreground: Rgb565,
    background: Rgb565,
) -> Result<u16, D::Error> {
    if size == 0 || text.is_empty() {
        return Ok(0);
    }

    let style = MonoTextStyleBuilder::new()
        .font(BASE_FONT)
        .text_color(foreground)
        .background_color(background)
        .build();
    let origin = Point::new(x as i32, y as i32);

    let advance = if size == 1 {
        Text::with_baseline(text, origin, style, Baseline::Top).draw(display)?.x - origin.x
    } else {
        let mut magnified = Magnified {
            target: display,
            origin,
            factor: size as u32,
        };
        let next = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut magnified)?;
        next.x * size as i32
    };

    Ok(advance.clamp(0, u16::MAX as i32) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    #[test]
    fn test_text_metrics_scale_with_size() {
        assert_eq!(text_width("OK", 1), 12);
        assert_eq!(text_height(1), 10);
        assert_eq!(text_width("OK", 2), 24);
        assert_eq!(text_width("OK", 3), 36);
        assert_eq!(text_height(3), 30);
        assert_eq!(text_width("OK", 0), 0);
        assert_eq!(text_height(0), 0);
    }

    #[test]
    fn test_size_three_magnifies_base_glyphs() {
        let mut small = FrameBuffer::new(64, 64);
        let mut large = FrameBuffer::new(64, 64);

        let advance = draw_text(&mut small, 0, 0, "A", 1, Rgb565::WHITE, Rgb565::BLUE).unwrap();
        assert_eq!(advance, 6);
        let advance = draw_text(&mut large, 4, 2, "A", 3, Rgb565::WHITE, Rgb565::BLUE).unwrap();
        assert_eq!(advance, 18);

        // The whole magnified cell is painted, background included.
        assert_eq!(
            large.take_dirty(),
            Some(Rectangle::new(Point::new(4, 2), Size::new(18, 30)))
        );
        for y in 0..10u16 {
            for x in 0..6u16 {
                let expected = small.pixel(x, y);
                for dy in 0..3 {
                    for dx in 0..3 {
                        assert_eq!(large.pixel(4 + x * 3 + dx, 2 + y * 3 + dy), expected);
                    }
                }
            }
        }
    }
}
