// src/ui/components/chart.rs
//! Simple data chart: two axes, an optional grid and byte-valued series
//! drawn as pixels, connected lines or filled area.
//!
//! The chart is anchored at its origin, the zero point where the axes meet.
//! The data area extends `width` pixels to the right and `height` pixels up
//! from there. One data sample occupies one column and one value step one
//! row, so no scaling happens.
//!
//! Charts do not take part in touch dispatch.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::warn;

use crate::error::{Report, Validated, WidgetError};
use crate::geometry::DisplayBounds;
use crate::ui::draw::{draw_line, draw_pixel, fill_rect};
use crate::ui::styling::{
    CHART_DEFAULT_AXES_COLOR, CHART_DEFAULT_BACKGROUND_COLOR, CHART_DEFAULT_GRID_COLOR,
};

/// Thickest accepted axis; also the fallback for an out-of-range size.
pub const CHART_MAX_AXES_SIZE: u8 = 10;

/// Data area width used when the requested position or width is unusable.
pub const CHART_FALLBACK_WIDTH: u16 = 100;

/// How [`Chart::draw_data`] renders a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// One pixel per sample
    Pixel,
    /// Samples joined by line segments
    Line,
    /// Vertical bar from the x axis up to each sample
    Area,
}

/// Placement and grid of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    /// Origin column
    pub x: u16,
    /// Origin row; the data area lies above it
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub axes_size: u8,
    pub has_grid: bool,
    /// Columns between vertical grid lines
    pub grid_x_resolution: u8,
    /// Rows between horizontal grid lines
    pub grid_y_resolution: u8,
}

impl ChartLayout {
    /// Layout with 1 pixel axes and no grid.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
            axes_size: 1,
            has_grid: false,
            grid_x_resolution: 0,
            grid_y_resolution: 0,
        }
    }

    pub const fn with_axes_size(mut self, axes_size: u8) -> Self {
        self.axes_size = axes_size;
        self
    }

    pub const fn with_grid(mut self, x_resolution: u8, y_resolution: u8) -> Self {
        self.has_grid = true;
        self.grid_x_resolution = x_resolution;
        self.grid_y_resolution = y_resolution;
        self
    }
}

/// Validate a chart layout against the display.
///
/// Rules run in order and every fallback is recorded:
/// axes size, origin x, origin y, right edge, height, grid resolution.
pub fn validate_chart(layout: ChartLayout, bounds: DisplayBounds) -> Validated<ChartLayout> {
    let mut report = Report::new();
    let mut l = layout;

    if l.axes_size == 0 || l.axes_size > CHART_MAX_AXES_SIZE {
        l.axes_size = CHART_MAX_AXES_SIZE;
        report.push(WidgetError::AxesSize);
    }

    let both_axes = 2 * l.axes_size as u16;
    if l.x < both_axes - 1 {
        l.x = both_axes - 1;
        l.width = CHART_FALLBACK_WIDTH;
        report.push(WidgetError::PosX);
    }

    let lowest_origin = bounds.height.saturating_sub(both_axes);
    if l.y > lowest_origin {
        l.y = lowest_origin;
        report.push(WidgetError::PosY);
    }

    if l.x as u32 + l.width as u32 > bounds.width as u32 {
        l.x = 0;
        l.width = CHART_FALLBACK_WIDTH;
        report.push(WidgetError::Width);
    }

    if l.height as u32 > l.y as u32 + 1 {
        l.height = l.y + 1;
        report.push(WidgetError::Height);
    }

    if l.grid_x_resolution as u16 > l.width {
        l.grid_x_resolution = (l.width / 2) as u8;
        report.push(WidgetError::GridXResolution);
    }

    if let Some(error) = report.status() {
        warn!("chart at ({}, {}) adjusted: {}", layout.x, layout.y, error);
    }
    Validated::new(l, report)
}

/// Clamp a sample to the data area height.
fn clip_sample(value: u8, ceiling: u16) -> (u16, bool) {
    let value = value as u16;
    if value > ceiling {
        (ceiling, true)
    } else {
        (value, false)
    }
}

pub struct Chart {
    layout: ChartLayout,
    background_color: Rgb565,
    axes_color: Rgb565,
    grid_color: Rgb565,
}

impl Chart {
    /// Validate `layout` and build a chart with the default colors.
    pub fn new(layout: ChartLayout, bounds: DisplayBounds) -> Validated<Self> {
        let validated = validate_chart(layout, bounds);
        Validated::new(
            Self {
                layout: validated.value,
                background_color: CHART_DEFAULT_BACKGROUND_COLOR,
                axes_color: CHART_DEFAULT_AXES_COLOR,
                grid_color: CHART_DEFAULT_GRID_COLOR,
            },
            validated.report,
        )
    }

    pub fn with_colors(mut self, axes: Rgb565, grid: Rgb565, background: Rgb565) -> Self {
        self.axes_color = axes;
        self.grid_color = grid;
        self.background_color = background;
        self
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Replace the layout. Does not redraw.
    pub fn set_layout(&mut self, layout: ChartLayout, bounds: DisplayBounds) -> Report {
        let validated = validate_chart(layout, bounds);
        self.layout = validated.value;
        validated.report
    }

    /// Axes followed by the grid.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.draw_axes(display)?;
        self.draw_grid(display)
    }

    pub fn draw_axes<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let l = &self.layout;
        let axes = l.axes_size as u16;
        let left = (l.x + 1).saturating_sub(axes);

        // X axis runs below the origin row, Y axis left of the origin column.
        fill_rect(
            display,
            left,
            l.y,
            (l.x + l.width).saturating_sub(1),
            l.y + axes - 1,
            self.axes_color,
        )?;
        fill_rect(
            display,
            left,
            (l.y + 1).saturating_sub(l.height),
            l.x,
            l.y.saturating_sub(1),
            self.axes_color,
        )
    }

    /// Grid lines inside the data area. A zero resolution skips that direction.
    pub fn draw_grid<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let l = &self.layout;
        if !l.has_grid {
            return Ok(());
        }

        let top = (l.y + 1).saturating_sub(l.height);
        if l.grid_x_resolution > 0 {
            let step = l.grid_x_resolution as usize;
            for offset in (step..=l.width as usize).step_by(step) {
                let column = l.x + offset as u16;
                fill_rect(display, column, top, column, l.y.saturating_sub(1), self.grid_color)?;
            }
        }

        if l.grid_y_resolution > 0 {
            let step = l.grid_y_resolution as usize;
            let right = (l.x + l.width).saturating_sub(1);
            for offset in (step..=l.height as usize).step_by(step) {
                let row = l.y.saturating_sub(offset as u16);
                fill_rect(display, l.x + 1, row, right, row, self.grid_color)?;
            }
        }
        Ok(())
    }

    /// Fill the data area with the background color. Axes are kept.
    pub fn clear<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let l = &self.layout;
        fill_rect(
            display,
            l.x + 1,
            (l.y + 1).saturating_sub(l.height),
            (l.x + l.width).saturating_sub(1),
            l.y.saturating_sub(1),
            self.background_color,
        )
    }

    /// Plot one sample per column starting right of the origin.
    ///
    /// Returns `Ok(false)` when samples were clipped, either because there are
    /// more samples than columns or because a value exceeds the height.
    pub fn draw_data<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        data: &[u8],
        color: Rgb565,
        mode: ChartMode,
    ) -> Result<bool, D::Error> {
        let l = &self.layout;
        let mut fits = true;

        let samples = if data.len() > l.width as usize {
            fits = false;
            &data[..l.width as usize]
        } else {
            data
        };
        let Some(&first) = samples.first() else {
            return Ok(fits);
        };

        let ceiling = l.height.saturating_sub(1);
        let (mut last, clipped) = clip_sample(first, ceiling);
        fits &= !clipped;

        let mut column = l.x;
        for &sample in samples {
            let (value, clipped) = clip_sample(sample, ceiling);
            fits &= !clipped;
            match mode {
                ChartMode::Pixel => {
                    column += 1;
                    draw_pixel(display, column, l.y.saturating_sub(value), color)?;
                }
                ChartMode::Line => {
                    draw_line(
                        display,
                        column,
                        l.y.saturating_sub(last),
                        column + 1,
                        l.y.saturating_sub(value),
                        color,
                    )?;
                    column += 1;
                    last = value;
                }
                ChartMode::Area => {
                    column += 1;
                    draw_line(display, column, l.y, column, l.y.saturating_sub(value), color)?;
                }
            }
        }
        Ok(fits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::{BLUE, WHITE};

    const QVGA: DisplayBounds = DisplayBounds::new(320, 240);

    fn chart() -> Chart {
        let validated = Chart::new(ChartLayout::new(20, 100, 50, 50), QVGA);
        assert!(validated.report.is_ok());
        validated.value
    }

    #[test]
    fn test_axes_size_out_of_range() {
        let result = validate_chart(ChartLayout::new(40, 100, 50, 50).with_axes_size(0), QVGA);
        assert_eq!(result.value.axes_size, CHART_MAX_AXES_SIZE);
        assert_eq!(result.status(), Some(WidgetError::AxesSize));

        let result = validate_chart(ChartLayout::new(40, 100, 50, 50).with_axes_size(11), QVGA);
        assert_eq!(result.status(), Some(WidgetError::AxesSize));
    }

    #[test]
    fn test_origin_left_of_axes() {
        let result = validate_chart(ChartLayout::new(0, 100, 50, 50).with_axes_size(2), QVGA);
        assert_eq!(result.value.x, 3);
        assert_eq!(result.value.width, CHART_FALLBACK_WIDTH);
        assert_eq!(result.status(), Some(WidgetError::PosX));
    }

    #[test]
    fn test_origin_too_low() {
        let result = validate_chart(ChartLayout::new(20, 239, 50, 50).with_axes_size(2), QVGA);
        assert_eq!(result.value.y, 236);
        assert_eq!(result.status(), Some(WidgetError::PosY));
    }

    #[test]
    fn test_too_wide_and_too_tall() {
        let result = validate_chart(ChartLayout::new(300, 30, 50, 80), QVGA);
        assert_eq!(result.value.x, 0);
        assert_eq!(result.value.width, CHART_FALLBACK_WIDTH);
        assert_eq!(result.value.height, 31);
        assert!(result.report.contains(WidgetError::Width));
        assert_eq!(result.status(), Some(WidgetError::Height));
    }

    #[test]
    fn test_grid_resolution_wider_than_chart() {
        let result = validate_chart(ChartLayout::new(20, 100, 40, 50).with_grid(60, 10), QVGA);
        assert_eq!(result.value.grid_x_resolution, 20);
        assert_eq!(result.status(), Some(WidgetError::GridXResolution));
    }

    #[test]
    fn test_axes_and_grid() {
        let mut fb = FrameBuffer::new(320, 240);
        let mut chart = chart();
        chart.set_layout(ChartLayout::new(20, 100, 50, 50).with_grid(10, 10), QVGA);
        chart.draw(&mut fb).unwrap();

        assert_eq!(fb.pixel(20, 100), Some(CHART_DEFAULT_AXES_COLOR));
        assert_eq!(fb.pixel(69, 100), Some(CHART_DEFAULT_AXES_COLOR));
        assert_eq!(fb.pixel(20, 51), Some(CHART_DEFAULT_AXES_COLOR));
        assert_eq!(fb.pixel(30, 80), Some(CHART_DEFAULT_GRID_COLOR));
        assert_eq!(fb.pixel(45, 90), Some(CHART_DEFAULT_GRID_COLOR));
        assert_eq!(fb.pixel(31, 81), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_pixel_and_area_modes() {
        let mut fb = FrameBuffer::new(320, 240);
        let chart = chart();

        assert!(chart.draw_data(&mut fb, &[0, 10, 49], BLUE, ChartMode::Pixel).unwrap());
        assert_eq!(fb.pixel(22, 90), Some(BLUE));
        assert_eq!(fb.pixel(23, 51), Some(BLUE));
        assert_eq!(fb.pixel(22, 91), Some(Rgb565::BLACK));

        chart.clear(&mut fb).unwrap();
        assert_eq!(fb.pixel(22, 90), Some(WHITE));

        assert!(chart.draw_data(&mut fb, &[5], BLUE, ChartMode::Area).unwrap());
        assert_eq!(fb.pixel(21, 100), Some(BLUE));
        assert_eq!(fb.pixel(21, 95), Some(BLUE));
        assert_eq!(fb.pixel(21, 94), Some(WHITE));
    }

    #[test]
    fn test_line_mode_joins_samples() {
        let mut fb = FrameBuffer::new(320, 240);
        let chart = chart();
        assert!(chart.draw_data(&mut fb, &[0, 0, 4], BLUE, ChartMode::Line).unwrap());
        assert_eq!(fb.pixel(20, 100), Some(BLUE));
        assert_eq!(fb.pixel(22, 100), Some(BLUE));
        assert_eq!(fb.pixel(23, 96), Some(BLUE));
    }

    #[test]
    fn test_clipping_is_reported() {
        let mut fb = FrameBuffer::new(320, 240);
        let chart = chart();

        assert!(!chart.draw_data(&mut fb, &[50], BLUE, ChartMode::Pixel).unwrap());
        assert_eq!(fb.pixel(21, 51), Some(BLUE));

        let long = [1u8; 60];
        assert!(!chart.draw_data(&mut fb, &long, BLUE, ChartMode::Pixel).unwrap());
        assert_eq!(fb.pixel(70, 99), Some(BLUE));
        assert_eq!(fb.pixel(71, 99), Some(Rgb565::BLACK));

        assert!(chart.draw_data(&mut fb, &[], BLUE, ChartMode::Line).unwrap());
    }
}
