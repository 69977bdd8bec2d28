#![forbid(unsafe_code)]

//! Thread-driven marquee.
//!
//! [`Marquee`] wraps a [`ScrollCoordinator`] and a [`TextRenderer`] in a
//! single mutex and runs the frame loop on a background thread. Every frame
//! takes the lock once, moves the lanes, and paints them before releasing
//! it, so `set_text` and `resize` calls from other threads can never land
//! between a wrap and the paint that shows it.
//!
//! # Lifecycle
//!
//! - [`set_text`](Marquee::set_text) with non-empty text starts the loop if
//!   it is not running.
//! - [`start`](Marquee::start) / [`stop`](Marquee::stop) mirror a host view
//!   being attached and detached.
//! - The loop ends on its own once both lanes are textless.
//!
//! # Example
//!
//! ```ignore
//! let marquee = Marquee::new(MarqueeConfig::default(), CellMeasurer::new(1), renderer);
//! marquee.resize(Viewport::new(0, 80));
//! marquee.set_text(Some("markets open higher"));
//! // ...
//! marquee.stop();
//! ```

use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ticker_core::{
    MarqueeConfig, MarqueeSnapshot, ScrollCoordinator, SurfaceError, TextMeasurer, TextRenderer,
    TextUpdate, TickOutcome, Viewport,
};
use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::stop::{StopSignal, StopTrigger};

/// Wait before retrying a frame whose surface was unavailable.
pub const SURFACE_RETRY: Duration = Duration::from_millis(1);

const THREAD_NAME: &str = "ticker-frames";

/// Why a frame loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Both lanes became textless.
    Idle,
    /// The host requested a stop.
    Stopped,
}

struct Stage<M, R> {
    coordinator: ScrollCoordinator<M>,
    renderer: R,
}

struct Shared<M, R> {
    stage: Mutex<Stage<M, R>>,
    clock: Arc<dyn Clock>,
    frame_interval: Duration,
}

/// Set once by the loop thread as it ends, so any number of handles can
/// block on it without owning the thread.
#[derive(Debug, Default)]
struct Completion {
    /// `None` while running; `Some(None)` if the loop panicked.
    exit: Mutex<Option<Option<LoopExit>>>,
    done: Condvar,
}

impl Completion {
    fn publish(&self, exit: Option<LoopExit>) {
        *lock(&self.exit) = Some(exit);
        self.done.notify_all();
    }

    fn wait(&self) -> Option<LoopExit> {
        let exit = self
            .done
            .wait_while(lock(&self.exit), |exit| exit.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        (*exit).flatten()
    }
}

/// Publishes on drop so an unwinding loop still releases its waiters.
struct Publisher {
    completion: Arc<Completion>,
    exit: Option<LoopExit>,
}

impl Drop for Publisher {
    fn drop(&mut self) {
        self.completion.publish(self.exit);
    }
}

struct Worker {
    trigger: StopTrigger,
    handle: JoinHandle<LoopExit>,
    completion: Arc<Completion>,
}

impl Worker {
    fn join(self) -> Option<LoopExit> {
        self.handle.join().ok()
    }
}

struct Control<M, R> {
    shared: Arc<Shared<M, R>>,
    worker: Mutex<Option<Worker>>,
}

impl<M, R> Drop for Control<M, R> {
    fn drop(&mut self) {
        // Don't join in drop to avoid blocking
        if let Some(worker) = lock(&self.worker).take() {
            worker.trigger.stop();
        }
    }
}

/// Cloneable, thread-safe handle to a running marquee.
pub struct Marquee<M, R> {
    control: Arc<Control<M, R>>,
}

impl<M, R> Clone for Marquee<M, R> {
    fn clone(&self) -> Self {
        Self {
            control: Arc::clone(&self.control),
        }
    }
}

impl<M, R> std::fmt::Debug for Marquee<M, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marquee")
            .field("frame_interval", &self.control.shared.frame_interval)
            .field("worker", &lock(&self.control.worker).is_some())
            .finish()
    }
}

impl<M, R> Marquee<M, R>
where
    M: TextMeasurer + Send + 'static,
    R: TextRenderer + Send + 'static,
{
    /// Create a stopped marquee timed by a [`SystemClock`].
    pub fn new(config: MarqueeConfig, measurer: M, renderer: R) -> Self {
        Self::with_clock(config, measurer, renderer, SystemClock::new())
    }

    /// Create a stopped marquee with a custom clock.
    pub fn with_clock(
        config: MarqueeConfig,
        measurer: M,
        renderer: R,
        clock: impl Clock + 'static,
    ) -> Self {
        let frame_interval = config.frame_interval;
        let shared = Shared {
            stage: Mutex::new(Stage {
                coordinator: ScrollCoordinator::new(config, measurer),
                renderer,
            }),
            clock: Arc::new(clock),
            frame_interval,
        };
        Self {
            control: Arc::new(Control {
                shared: Arc::new(shared),
                worker: Mutex::new(None),
            }),
        }
    }

    /// Store new text, starting the loop if it was idle.
    ///
    /// `None` is ignored. If the loop thread cannot be spawned the failure is
    /// logged and the marquee stays idle; a later call retries.
    pub fn set_text(&self, text: Option<&str>) -> TextUpdate {
        let update = lock(&self.control.shared.stage)
            .coordinator
            .set_text(text);
        if update == TextUpdate::StartRequested {
            if let Err(err) = self.start() {
                warn!(error = %err, "failed to start marquee loop");
            }
        }
        update
    }

    /// Apply a new viewport. Lanes in flight keep their offsets.
    pub fn resize(&self, viewport: Viewport) {
        lock(&self.control.shared.stage).coordinator.resize(viewport);
    }

    /// Start the frame loop (host attached).
    ///
    /// Returns `Ok(false)` if a loop is already running or no text was ever
    /// set.
    pub fn start(&self) -> io::Result<bool> {
        let shared = &self.control.shared;
        let mut worker = lock(&self.control.worker);

        let reaped = match worker.take() {
            Some(previous) => {
                let alive = !previous.handle.is_finished();
                if alive && lock(&shared.stage).coordinator.is_running() {
                    *worker = Some(previous);
                    return Ok(false);
                }
                // The old loop has ended or is about to; reap it.
                previous.trigger.stop();
                let exit = previous.join();
                trace!(?exit, "reaped previous marquee loop");
                true
            }
            None => false,
        };

        {
            let mut stage = lock(&shared.stage);
            if stage.coordinator.is_running() {
                if !reaped {
                    debug!("marquee start ignored: coordinator already running");
                    return Ok(false);
                }
                // A loop thread that panicked never marked the coordinator idle.
                stage.coordinator.halt();
            }
            if !stage.coordinator.is_ready() {
                debug!("marquee start ignored: no text yet");
                return Ok(false);
            }
            stage.coordinator.begin(shared.clock.now_ms());
        }

        let (signal, trigger) = StopSignal::new();
        let completion = Arc::new(Completion::default());
        let loop_shared = Arc::clone(shared);
        let loop_completion = Arc::clone(&completion);
        let spawned = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                let mut publisher = Publisher {
                    completion: loop_completion,
                    exit: None,
                };
                let exit = run_frames(&loop_shared, &signal);
                publisher.exit = Some(exit);
                exit
            });

        match spawned {
            Ok(handle) => {
                *worker = Some(Worker {
                    trigger,
                    handle,
                    completion,
                });
                Ok(true)
            }
            Err(err) => {
                lock(&shared.stage).coordinator.halt();
                Err(err)
            }
        }
    }

    /// Stop the frame loop (host detached) and wait for it to finish the
    /// frame in progress.
    ///
    /// Handles blocked in [`wait`](Self::wait) return
    /// [`LoopExit::Stopped`].
    pub fn stop(&self) -> Option<LoopExit> {
        // Held until the coordinator is halted so no start slips in between.
        let mut worker = lock(&self.control.worker);
        let exit = worker.take().and_then(|worker| {
            worker.trigger.stop();
            worker.join()
        });
        lock(&self.control.shared.stage).coordinator.halt();
        exit
    }

    /// Block until the current loop ends, on its own or through
    /// [`stop`](Self::stop).
    ///
    /// Returns `None` if no loop was started or the loop thread panicked.
    /// The loop stays owned by the marquee, so other handles can still stop
    /// or restart it meanwhile.
    pub fn wait(&self) -> Option<LoopExit> {
        let completion = lock(&self.control.worker)
            .as_ref()
            .map(|worker| Arc::clone(&worker.completion))?;
        completion.wait()
    }

    /// Whether a frame loop is driving the coordinator.
    pub fn is_running(&self) -> bool {
        lock(&self.control.shared.stage).coordinator.is_running()
    }

    /// Consistent copy of both lanes.
    pub fn snapshot(&self) -> MarqueeSnapshot {
        lock(&self.control.shared.stage).coordinator.snapshot()
    }

    /// Run `f` against the coordinator and renderer under the frame lock.
    pub fn inspect<T>(&self, f: impl FnOnce(&ScrollCoordinator<M>, &R) -> T) -> T {
        let stage = lock(&self.control.shared.stage);
        f(&stage.coordinator, &stage.renderer)
    }
}

fn run_frames<M, R>(shared: &Shared<M, R>, stop: &StopSignal) -> LoopExit
where
    M: TextMeasurer,
    R: TextRenderer,
{
    let interval = shared.frame_interval;
    info!(interval_ms = interval.as_millis() as u64, "marquee frame loop running");

    let exit = loop {
        if stop.is_stopped() {
            break LoopExit::Stopped;
        }

        let frame_start = Instant::now();
        let outcome = {
            let mut stage = lock(&shared.stage);
            let Stage {
                coordinator,
                renderer,
            } = &mut *stage;
            coordinator.tick(shared.clock.now_ms(), renderer)
        };

        match outcome {
            TickOutcome::Idle => break LoopExit::Idle,
            TickOutcome::Skipped(err) => {
                if let SurfaceError::Io(msg) = &err {
                    warn!(error = %msg, "marquee surface error; retrying");
                }
                if stop.wait_timeout(SURFACE_RETRY) {
                    break LoopExit::Stopped;
                }
                continue;
            }
            TickOutcome::Painted { wraps } => {
                trace!(wraps = wraps.len(), "marquee frame painted");
            }
        }

        // ~60fps; without pacing the loop would spin
        let spent = frame_start.elapsed();
        if let Some(rest) = interval.checked_sub(spent) {
            if !rest.is_zero() && stop.wait_timeout(rest) {
                break LoopExit::Stopped;
            }
        }
    };

    info!(?exit, "marquee frame loop exited");
    exit
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
