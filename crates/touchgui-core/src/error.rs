//! Status codes for widget construction and rendering.
//!
//! Nothing in this crate aborts on bad input. Validation substitutes a safe
//! fallback and records what it changed in a [`Report`]; callers may inspect
//! the report or ignore it, the widget stays usable either way.

use heapless::Vec;
use thiserror_no_std::Error;

/// Maximum number of findings a single validation pass can record.
pub const MAX_REPORTED_ERRORS: usize = 8;

/// A single validation or rendering-space finding.
///
/// Every variant maps to a small negative integer via [`WidgetError::code`],
/// so firmware can forward the result over a byte-oriented channel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Right edge ran past the display and was clamped
    #[error("right edge exceeds display width")]
    XRight,

    /// Bottom edge ran past the display and was clamped
    #[error("bottom edge exceeds display height")]
    YBottom,

    /// Caption is wider than the button body
    #[error("caption too long for button")]
    CaptionTooLong,

    /// Caption is taller than the button body
    #[error("caption too high for button")]
    CaptionTooHigh,

    /// X position leaves no room for the smallest widget
    #[error("x position too large")]
    PosX,

    /// Y position leaves no room for the smallest widget
    #[error("y position too large")]
    PosY,

    /// Unit size of zero was replaced by the default
    #[error("size must not be zero")]
    SizeZero,

    /// Unit size above the ceiling was replaced by the default
    #[error("size exceeds maximum")]
    Size,

    /// Maximum value of zero was replaced by one
    #[error("maximum value must not be zero")]
    MaxValue,

    /// Initial value above the maximum was clamped
    #[error("value exceeds maximum value")]
    ActualValue,

    /// Caption is empty and was dropped
    #[error("caption is empty")]
    CaptionLength,

    /// No room below the slider for the caption
    #[error("no room for caption")]
    CaptionHeight,

    /// No room below the slider for the value text
    #[error("no room for value")]
    ValueTooHigh,

    /// Chart axes thickness out of range
    #[error("axes size out of range")]
    AxesSize,

    /// Chart does not fit horizontally
    #[error("chart width exceeds display")]
    Width,

    /// Chart does not fit vertically
    #[error("chart height exceeds display")]
    Height,

    /// Chart grid resolution wider than the chart
    #[error("grid x resolution too large")]
    GridXResolution,
}

impl WidgetError {
    /// The numeric status code for this finding. Always negative.
    pub const fn code(self) -> i8 {
        match self {
            Self::XRight => -1,
            Self::YBottom => -2,
            Self::CaptionTooLong => -3,
            Self::CaptionTooHigh => -4,
            Self::PosX => -5,
            Self::PosY => -6,
            Self::SizeZero => -7,
            Self::Size => -8,
            Self::MaxValue => -9,
            Self::ActualValue => -10,
            Self::CaptionLength => -11,
            Self::CaptionHeight => -12,
            Self::ValueTooHigh => -13,
            Self::AxesSize => -14,
            Self::Width => -15,
            Self::Height => -16,
            Self::GridXResolution => -17,
        }
    }
}

/// Ordered list of findings from one validation or draw call.
///
/// Each rule that fires is appended in evaluation order. The overall status is
/// the *last* finding, which is what the numeric status code reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    errors: Vec<WidgetError, MAX_REPORTED_ERRORS>,
}

impl Report {
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a finding. Findings past capacity are dropped, but the last one
    /// always replaces the tail so [`Report::status`] stays accurate.
    pub fn push(&mut self, error: WidgetError) {
        if let Err(error) = self.errors.push(error)
            && let Some(last) = self.errors.last_mut()
        {
            *last = error;
        }
    }

    /// Append every finding of another report.
    pub fn merge(&mut self, other: &Report) {
        for error in other.iter() {
            self.push(error);
        }
    }

    /// The finding that determines the status code, if any.
    pub fn status(&self) -> Option<WidgetError> {
        self.errors.last().copied()
    }

    /// `0` on success, otherwise the negative code of the last finding.
    pub fn code(&self) -> i8 {
        self.status().map_or(0, WidgetError::code)
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, error: WidgetError) -> bool {
        self.errors.contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = WidgetError> + '_ {
        self.errors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A value accepted by a validator together with the findings that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub value: T,
    pub report: Report,
}

impl<T> Validated<T> {
    pub fn new(value: T, report: Report) -> Self {
        Self { value, report }
    }

    pub fn status(&self) -> Option<WidgetError> {
        self.report.status()
    }

    pub fn code(&self) -> i8 {
        self.report.code()
    }
}

/// Error loading a [`GuiConfig`](crate::config::GuiConfig) blob.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The blob could not be decoded
    #[error("malformed configuration: {0}")]
    Decode(postcard::Error),

    /// The config could not be encoded
    #[error("failed to encode configuration: {0}")]
    Encode(postcard::Error),
}
