#![forbid(unsafe_code)]

//! Paint surface seam.

use crate::config::TextStyle;

/// Why a frame could not be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface is not ready yet (not created, being resized, detached).
    Unavailable,
    /// The surface failed while preparing the frame.
    Io(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "paint surface not available"),
            Self::Io(msg) => write!(f, "paint surface error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<std::io::Error> for SurfaceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Draws lanes onto the host surface.
///
/// Called once per frame in the order `begin_frame`, `paint` per visible
/// lane, `end_frame`. All three run inside the same critical section as the
/// scroll update, so a renderer always sees a consistent pair of lanes.
pub trait TextRenderer {
    /// Prepare a frame (clear the background, lock the surface).
    ///
    /// Returning an error skips the frame; nothing else is called for it.
    fn begin_frame(&mut self) -> Result<(), SurfaceError>;

    /// Paint `text` with its left edge at `x`, relative to the viewport.
    ///
    /// `x` may be negative or past the right edge; clipping is the
    /// renderer's job.
    fn paint(&mut self, text: &str, style: &TextStyle, x: i32);

    /// Publish the frame.
    fn end_frame(&mut self);
}

impl<R: TextRenderer + ?Sized> TextRenderer for Box<R> {
    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        (**self).begin_frame()
    }

    fn paint(&mut self, text: &str, style: &TextStyle, x: i32) {
        (**self).paint(text, style, x);
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }
}
