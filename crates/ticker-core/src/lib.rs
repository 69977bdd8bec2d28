#![forbid(unsafe_code)]

//! Scroll coordination for single-line ticker marquees.
//!
//! This crate owns the timing and lane-relay logic of a horizontally
//! scrolling marquee. Drawing, surface management, and the frame loop live
//! in the host; the engine only talks to it through three seams:
//!
//! - [`TextMeasurer`] - width of a string at a given [`TextStyle`]
//! - [`TextRenderer`] - paints one lane at a horizontal offset
//! - the `now_ms` timestamp handed to [`ScrollCoordinator::tick`]
//!
//! # Example
//! ```
//! use ticker_core::{
//!     CellMeasurer, MarqueeConfig, ScrollCoordinator, TextUpdate, Viewport,
//! };
//!
//! let mut marquee = ScrollCoordinator::new(MarqueeConfig::default(), CellMeasurer::new(1));
//! marquee.resize(Viewport::new(0, 10));
//!
//! assert_eq!(marquee.set_text(Some("breaking news: rust")), TextUpdate::StartRequested);
//! assert!(marquee.begin(0));
//! ```

pub mod config;
pub mod coordinator;
pub mod measure;
pub mod render;
pub mod slot;
pub mod width_cache;

pub use config::{MarqueeConfig, Rgb, TextStyle};
pub use coordinator::{
    LaneSnapshot, MarqueeSnapshot, RunState, ScrollCoordinator, TextUpdate, TickOutcome, Viewport,
    WrapEvent, Wraps,
};
pub use measure::{CachedMeasurer, CellMeasurer, TextMeasurer};
pub use render::{SurfaceError, TextRenderer};
pub use slot::{Lane, LanePosition, ScrollSlot};
pub use width_cache::{CacheStats, WidthCache};
