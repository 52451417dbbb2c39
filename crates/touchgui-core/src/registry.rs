//! Append-only widget registry and first-match touch lookup.
//!
//! A [`Registry`] owns every widget of one kind in registration order.
//! Widgets are addressed by a [`Handle`] that stays valid for the lifetime of
//! the registry: there is no removal, so an index never moves.
//!
//! Hit testing walks the registry from the first registered widget to the
//! last and stops at the first active widget whose touch area contains the
//! point. Overlapping widgets are therefore resolved by registration order,
//! not by size or drawing order.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::error::Report;
use crate::ui::core::{TouchPoint, Touchable};

/// Stable index of a widget inside its registry.
///
/// The type parameter ties a handle to the widget kind, so a button handle
/// cannot be used to look up a slider.
pub struct Handle<W> {
    index: usize,
    _kind: PhantomData<fn() -> W>,
}

impl<W> Handle<W> {
    const fn new(index: usize) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position of the widget in registration order.
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<W> Clone for Handle<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for Handle<W> {}

impl<W> PartialEq for Handle<W> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<W> Eq for Handle<W> {}

impl<W> fmt::Debug for Handle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.index).finish()
    }
}

/// Outcome of adding a widget: its handle plus what validation changed.
///
/// Registration never fails; a non-empty report means the widget was placed
/// with fallback geometry.
pub struct Registration<W> {
    pub handle: Handle<W>,
    pub report: Report,
}

impl<W> Registration<W> {
    /// `0` when the widget was accepted as requested, else a negative code.
    pub fn code(&self) -> i8 {
        self.report.code()
    }
}

/// Ordered, append-only collection of widgets of one kind.
pub struct Registry<W> {
    widgets: Vec<W>,
}

impl<W> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Registry<W> {
    pub const fn new() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }

    /// Append a widget at the tail and return its handle.
    pub fn register(&mut self, widget: W) -> Handle<W> {
        self.widgets.push(widget);
        Handle::new(self.widgets.len() - 1)
    }

    pub fn get(&self, handle: Handle<W>) -> Option<&W> {
        self.widgets.get(handle.index)
    }

    pub fn get_mut(&mut self, handle: Handle<W>) -> Option<&mut W> {
        self.widgets.get_mut(handle.index)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widgets with their handles, first registered first.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<W>, &W)> {
        self.widgets
            .iter()
            .enumerate()
            .map(|(index, widget)| (Handle::new(index), widget))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<W>, &mut W)> {
        self.widgets
            .iter_mut()
            .enumerate()
            .map(|(index, widget)| (Handle::new(index), widget))
    }

    /// Visit every widget head to tail.
    pub fn for_each(&mut self, mut visitor: impl FnMut(Handle<W>, &mut W)) {
        for (handle, widget) in self.iter_mut() {
            visitor(handle, widget);
        }
    }
}

impl<W: Touchable> Registry<W> {
    pub fn activate_all(&mut self) {
        self.for_each(|_, widget| widget.set_active(true));
    }

    /// Make every widget ignore touches, e.g. before switching screens.
    pub fn deactivate_all(&mut self) {
        self.for_each(|_, widget| widget.set_active(false));
    }

    /// First active widget whose touch area contains `point`.
    ///
    /// An empty registry simply has no hit.
    pub fn hit_test(&self, point: TouchPoint) -> Option<Handle<W>> {
        self.iter()
            .find(|(_, widget)| widget.contains_point(point))
            .map(|(handle, _)| handle)
    }
}
