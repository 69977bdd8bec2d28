#![forbid(unsafe_code)]

//! Marquee configuration.
//!
//! Set once when the coordinator is built. Every field has a default, so
//! hosts usually start from [`MarqueeConfig::default`] and override a few
//! values with the builder methods.

use std::time::Duration;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: u16 = 14;

/// Default scroll step in pixels per frame.
pub const DEFAULT_SCROLL_SPEED: i32 = 2;

/// Default frame interval (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// 24-bit paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Font styling shared by both lanes.
///
/// Passed to the measurer and the renderer with every call so both agree on
/// the glyph metrics in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Point size.
    pub font_size: u16,
    /// Paint color; `None` inherits the host's foreground.
    pub color: Option<Rgb>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: None,
        }
    }
}

/// Static options for a [`ScrollCoordinator`](crate::ScrollCoordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeConfig {
    /// Pause before the first scroll movement. Applied once per coordinator.
    pub start_delay: Duration,
    /// Font styling for both lanes.
    pub style: TextStyle,
    /// Pixels subtracted from an active lane's offset every frame.
    pub scroll_speed: i32,
    /// Target time between frames for the host run loop.
    pub frame_interval: Duration,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::ZERO,
            style: TextStyle::default(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

impl MarqueeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay before scrolling begins.
    #[must_use]
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Set the font size in points.
    #[must_use]
    pub fn font_size(mut self, size: u16) -> Self {
        self.style.font_size = size;
        self
    }

    /// Set the paint color.
    #[must_use]
    pub fn text_color(mut self, color: Rgb) -> Self {
        self.style.color = Some(color);
        self
    }

    /// Set the per-frame scroll step. Values below 1 are clamped to 1.
    #[must_use]
    pub fn scroll_speed(mut self, speed: i32) -> Self {
        self.scroll_speed = speed.max(1);
        self
    }

    /// Set the frame interval. A zero interval is bumped to 1 ms.
    #[must_use]
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Start delay in whole milliseconds, saturating at `u64::MAX`.
    pub fn start_delay_ms(&self) -> u64 {
        u64::try_from(self.start_delay.as_millis()).unwrap_or(u64::MAX)
    }
}
