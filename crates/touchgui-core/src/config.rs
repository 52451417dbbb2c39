//! Default appearance and touch settings for newly created widgets.
//!
//! These values used to be process-wide statics; here they live in a
//! [`GuiConfig`] owned by the [`Gui`](crate::gui::Gui) context. Changing a
//! default only affects widgets created afterwards.
//!
//! The config is `serde`-serializable so firmware can keep a tuned set of
//! defaults in flash as a `postcard` blob.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ui::styling::colors::*;

/// Default touch tolerance for buttons, in pixels.
pub const BUTTON_DEFAULT_TOUCH_BORDER: u8 = 2;

/// Default touch tolerance for sliders, in pixels.
pub const SLIDER_DEFAULT_TOUCH_BORDER: u8 = 4;

/// Colors are stored as their raw RGB565 word.
mod rgb565 {
    use embedded_graphics::pixelcolor::Rgb565;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::ui::styling::colors::{from_raw, to_raw};

    pub fn serialize<S: Serializer>(color: &Rgb565, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(to_raw(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb565, D::Error> {
        u16::deserialize(deserializer).map(from_raw)
    }
}

/// Defaults applied to every button created through the context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonDefaults {
    pub touch_border: u8,
    #[serde(with = "rgb565")]
    pub color: Rgb565,
    #[serde(with = "rgb565")]
    pub caption_color: Rgb565,
}

impl Default for ButtonDefaults {
    fn default() -> Self {
        Self {
            touch_border: BUTTON_DEFAULT_TOUCH_BORDER,
            color: BUTTON_DEFAULT_COLOR,
            caption_color: BUTTON_DEFAULT_CAPTION_COLOR,
        }
    }
}

/// Defaults applied to every slider created through the context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderDefaults {
    pub touch_border: u8,
    /// Border frame
    #[serde(with = "rgb565")]
    pub slider_color: Rgb565,
    /// Value bar at or below the threshold
    #[serde(with = "rgb565")]
    pub bar_color: Rgb565,
    /// Value bar above the threshold
    #[serde(with = "rgb565")]
    pub bar_threshold_color: Rgb565,
    /// Empty part of the bar
    #[serde(with = "rgb565")]
    pub bar_background_color: Rgb565,
    #[serde(with = "rgb565")]
    pub caption_color: Rgb565,
    #[serde(with = "rgb565")]
    pub value_color: Rgb565,
    /// Background behind caption and value text
    #[serde(with = "rgb565")]
    pub caption_value_background_color: Rgb565,
}

impl Default for SliderDefaults {
    fn default() -> Self {
        Self {
            touch_border: SLIDER_DEFAULT_TOUCH_BORDER,
            slider_color: SLIDER_DEFAULT_SLIDER_COLOR,
            bar_color: SLIDER_DEFAULT_BAR_COLOR,
            bar_threshold_color: SLIDER_DEFAULT_BAR_THRESHOLD_COLOR,
            bar_background_color: SLIDER_DEFAULT_BAR_BACKGROUND_COLOR,
            caption_color: SLIDER_DEFAULT_CAPTION_COLOR,
            value_color: SLIDER_DEFAULT_VALUE_COLOR,
            caption_value_background_color: SLIDER_DEFAULT_CAPTION_VALUE_BACKGROUND_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuiConfig {
    pub button: ButtonDefaults,
    pub slider: SliderDefaults,
}

impl GuiConfig {
    /// Decode a config previously produced by [`GuiConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(ConfigError::Decode)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }
}
