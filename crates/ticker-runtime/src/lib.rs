#![forbid(unsafe_code)]

//! Ticker runtime
//!
//! Hosts a [`ticker_core::ScrollCoordinator`] on a background frame loop.
//!
//! # Key Components
//!
//! - [`Marquee`] - thread-safe handle owning the coordinator, the renderer,
//!   and the loop thread
//! - [`Clock`] - timestamp source; [`SystemClock`] for real hosts,
//!   [`ManualClock`] for deterministic ones
//! - [`StopSignal`] / [`StopTrigger`] - one-way stop flag that also wakes the
//!   inter-frame sleep
//!
//! # Frame pacing
//!
//! Each frame is timed from just before the lock is taken. If the frame took
//! less than the configured interval (16 ms by default) the loop sleeps for
//! the rest; a frame whose surface was unavailable is retried after
//! [`SURFACE_RETRY`].

pub mod clock;
pub mod marquee;
pub mod stop;

pub use clock::{Clock, ManualClock, SystemClock};
pub use marquee::{LoopExit, Marquee, SURFACE_RETRY};
pub use stop::{StopSignal, StopTrigger};
