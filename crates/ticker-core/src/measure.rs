#![forbid(unsafe_code)]

//! Text measurement.
//!
//! The coordinator never looks at glyphs; it asks a [`TextMeasurer`] for the
//! on-screen width of a lane's text whenever that text changes.

use unicode_width::UnicodeWidthStr;

use crate::config::TextStyle;
use crate::width_cache::WidthCache;

/// Measures the rendered width of a string.
///
/// Implementations must be deterministic for a given `(text, style)` pair.
/// `&mut self` exists only so that implementations can cache.
pub trait TextMeasurer {
    /// Width of `text` in pixels when drawn with `style`.
    fn measure(&mut self, text: &str, style: &TextStyle) -> i32;
}

impl<F> TextMeasurer for F
where
    F: FnMut(&str, &TextStyle) -> i32,
{
    fn measure(&mut self, text: &str, style: &TextStyle) -> i32 {
        self(text, style)
    }
}

/// Monospace measurer for cell-based surfaces.
///
/// Width is the Unicode display width in cells multiplied by a fixed advance
/// per cell. A terminal host uses an advance of 1 so that "pixels" are
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasurer {
    advance: i32,
}

impl CellMeasurer {
    /// Create a measurer with `advance` pixels per cell (minimum 1).
    pub fn new(advance: i32) -> Self {
        Self {
            advance: advance.max(1),
        }
    }

    /// Pixels per cell.
    pub fn advance(&self) -> i32 {
        self.advance
    }
}

impl Default for CellMeasurer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&mut self, text: &str, _style: &TextStyle) -> i32 {
        let cells = i32::try_from(text.width()).unwrap_or(i32::MAX);
        cells.saturating_mul(self.advance)
    }
}

/// Wraps another measurer with a [`WidthCache`].
#[derive(Debug)]
pub struct CachedMeasurer<M> {
    inner: M,
    cache: WidthCache,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wrap `inner` with a default-sized cache.
    pub fn new(inner: M) -> Self {
        Self::with_cache(inner, WidthCache::default())
    }

    /// Wrap `inner` with the given cache.
    pub fn with_cache(inner: M, cache: WidthCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &WidthCache {
        &self.cache
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(&mut self, text: &str, style: &TextStyle) -> i32 {
        let inner = &mut self.inner;
        self.cache
            .get_or_compute(text, style.font_size, |t| inner.measure(t, style))
    }
}
