// src/ui/core.rs
//! Core UI traits and types shared by every widget kind

use embedded_graphics::prelude::*;

use crate::geometry::{Extent, TouchArea};

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Convert a signed display coordinate, clamping negatives to zero.
    pub fn from_point(point: Point) -> Self {
        Self {
            x: point.x.clamp(0, u16::MAX as i32) as u16,
            y: point.y.clamp(0, u16::MAX as i32) as u16,
        }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered by a touch controller or the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Finger moved while still pressed
    Drag(TouchPoint),
}

impl TouchEvent {
    pub fn point(&self) -> TouchPoint {
        match self {
            Self::Press(point) | Self::Drag(point) => *point,
        }
    }
}

/// Trait for widgets that live in a [`Registry`](crate::registry::Registry)
/// and take part in hit testing.
pub trait Touchable {
    /// Drawn geometry of the widget.
    fn extent(&self) -> Extent;

    /// Extra pixels around the extent that still count as a hit.
    fn touch_border(&self) -> u8;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Touch-sensitive area: the extent grown by the touch border.
    fn touch_area(&self) -> TouchArea {
        self.extent().touch_area(self.touch_border())
    }

    /// Whether a touch at `point` hits this widget. Inactive widgets never hit.
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.is_active() && self.touch_area().contains(point)
    }
}
