#![forbid(unsafe_code)]

//! The two-lane scroll coordinator.
//!
//! [`ScrollCoordinator`] owns both lanes, the pending text, and the timing
//! state. The host calls [`tick`](ScrollCoordinator::tick) once per frame
//! with a monotonic timestamp; the coordinator moves the lanes, relays text
//! between them, and paints both through a [`TextRenderer`].
//!
//! # Relay
//!
//! ```text
//!  viewport                    right boundary
//!  |<--------------------------->|  spacer  |
//!  [ lane A scrolling left ......]          [ lane B parked ]
//! ```
//!
//! When lane A's trailing edge clears the right boundary, lane B is loaded
//! with the pending text and parked at `right_boundary + spacer`. Both then
//! move left at the same speed, so the gap between them never closes. When B
//! in turn clears the boundary, A (long gone off the left edge) is reloaded
//! and parked behind it.
//!
//! # Frame order
//!
//! Each frame runs: primary advance, primary wrap check, secondary advance,
//! secondary wrap check, then paint. If the surface could not be prepared,
//! the next frame repaints without moving anything.

use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::config::{MarqueeConfig, TextStyle};
use crate::measure::TextMeasurer;
use crate::render::{SurfaceError, TextRenderer};
use crate::slot::{Lane, LanePosition, ScrollSlot};

/// Horizontal extent of the visible area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge of the viewport within its parent.
    pub left: i32,
    /// Visible width.
    pub width: i32,
}

impl Viewport {
    /// Create a viewport. Negative widths are treated as zero.
    pub const fn new(left: i32, width: i32) -> Self {
        Self {
            left,
            width: if width < 0 { 0 } else { width },
        }
    }
}

/// Derived boundaries recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Geometry {
    pub(crate) viewport_width: i32,
    pub(crate) right_boundary: i32,
    pub(crate) wrap_spacer: i32,
}

impl Geometry {
    /// Where a freshly wrapped lane is parked.
    pub(crate) fn wrap_target(self) -> i32 {
        self.right_boundary.saturating_add(self.wrap_spacer)
    }
}

impl From<Viewport> for Geometry {
    fn from(viewport: Viewport) -> Self {
        Self {
            viewport_width: viewport.width,
            right_boundary: viewport.left.saturating_add(viewport.width),
            wrap_spacer: viewport.width / 6,
        }
    }
}

/// Speed and start-delay bookkeeping shared by both lanes.
#[derive(Debug, Clone)]
pub(crate) struct ScrollTiming {
    pub(crate) speed: i32,
    start_delay_ms: u64,
    animation_start_ms: u64,
    /// One-way latch; once set, the start delay is never applied again.
    pub(crate) past_initial_delay: bool,
}

impl ScrollTiming {
    pub(crate) fn new(speed: i32, start_delay_ms: u64) -> Self {
        Self {
            speed,
            start_delay_ms,
            animation_start_ms: 0,
            past_initial_delay: false,
        }
    }

    pub(crate) fn start(&mut self, now_ms: u64) {
        self.animation_start_ms = now_ms;
    }

    pub(crate) fn delay_elapsed(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.animation_start_ms) > self.start_delay_ms
    }
}

/// Whether a host frame loop is driving the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No loop is running.
    #[default]
    Idle,
    /// A loop has called [`ScrollCoordinator::begin`] and not yet stopped.
    Running,
}

/// Result of [`ScrollCoordinator::set_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextUpdate {
    /// `None` was passed; nothing changed.
    Ignored,
    /// Text stored; no new loop is needed.
    Stored,
    /// Text stored and the coordinator is idle: the host should start a loop.
    StartRequested,
}

/// A lane being reloaded and parked past the right edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapEvent {
    /// The lane that received new text.
    pub lane: Lane,
    /// Offset the lane was parked at.
    pub parked_at: i32,
    /// Text loaded into the lane.
    pub text: Arc<str>,
}

/// Up to one wrap per lane per frame.
pub type Wraps = SmallVec<[WrapEvent; 2]>;

/// Result of one [`ScrollCoordinator::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Both lanes painted.
    Painted {
        /// Wraps performed during this frame.
        wraps: Wraps,
    },
    /// The surface was unavailable. The next tick repaints without moving.
    Skipped(SurfaceError),
    /// Both lanes are textless; the host should stop its loop.
    Idle,
}

impl TickOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Copy of one lane at a frame boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSnapshot {
    pub text: Option<Arc<str>>,
    pub width: i32,
    pub position: LanePosition,
}

impl From<&ScrollSlot> for LaneSnapshot {
    fn from(slot: &ScrollSlot) -> Self {
        Self {
            text: slot.shared_text().cloned(),
            width: slot.width(),
            position: slot.position(),
        }
    }
}

/// Consistent copy of the whole marquee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeSnapshot {
    pub primary: LaneSnapshot,
    pub secondary: LaneSnapshot,
    pub pending: Option<Arc<str>>,
    pub past_initial_delay: bool,
    pub run_state: RunState,
}

impl MarqueeSnapshot {
    pub fn lane(&self, lane: Lane) -> &LaneSnapshot {
        match lane {
            Lane::Primary => &self.primary,
            Lane::Secondary => &self.secondary,
        }
    }
}

/// Drives two [`ScrollSlot`]s as a seamless looping marquee.
#[derive(Debug)]
pub struct ScrollCoordinator<M> {
    lanes: [ScrollSlot; 2],
    pending: Option<Arc<str>>,
    viewport: Viewport,
    geometry: Geometry,
    timing: ScrollTiming,
    style: TextStyle,
    frame_interval: Duration,
    measurer: M,
    run_state: RunState,
    ready: bool,
    skip_relocation: bool,
    frames_painted: u64,
}

impl<M: TextMeasurer> ScrollCoordinator<M> {
    /// Create a coordinator with the primary lane at 0 and the secondary
    /// lane dormant. The viewport starts empty until [`resize`](Self::resize).
    pub fn new(config: MarqueeConfig, measurer: M) -> Self {
        let timing = ScrollTiming::new(config.scroll_speed.max(1), config.start_delay_ms());
        Self {
            lanes: [
                ScrollSlot::new(LanePosition::Active(0)),
                ScrollSlot::new(LanePosition::Dormant),
            ],
            pending: None,
            viewport: Viewport::default(),
            geometry: Geometry::default(),
            timing,
            style: config.style,
            frame_interval: config.frame_interval,
            measurer,
            run_state: RunState::Idle,
            ready: false,
            skip_relocation: false,
            frames_painted: 0,
        }
    }

    /// Store new content.
    ///
    /// A lane with nothing to draw (never assigned, or holding empty text)
    /// takes it immediately, but only while it sits off screen. An empty lane
    /// that a resize pulled inside the viewport waits for the next wrap like
    /// any other lane. Lanes already showing text keep it, and the next lane
    /// to wrap picks up the new content.
    pub fn set_text(&mut self, text: Option<&str>) -> TextUpdate {
        let Some(text) = text else {
            return TextUpdate::Ignored;
        };
        let text: Arc<str> = Arc::from(text);
        let right_boundary = self.geometry.right_boundary;

        for slot in &mut self.lanes {
            if !slot.is_textless() {
                continue;
            }
            if slot.is_off_screen(right_boundary) {
                slot.assign(Arc::clone(&text), &mut self.measurer, &self.style);
                self.ready = true;
            } else {
                trace!(
                    position = ?slot.position(),
                    "empty lane on screen; deferring text to next wrap"
                );
            }
        }

        let has_content = !text.is_empty();
        debug!(
            len = text.len(),
            running = self.run_state == RunState::Running,
            "marquee text stored"
        );
        self.pending = Some(text);

        if self.run_state == RunState::Idle && has_content {
            TextUpdate::StartRequested
        } else {
            TextUpdate::Stored
        }
    }

    /// Apply a new viewport.
    ///
    /// Only the right boundary and wrap spacer change; lanes in flight keep
    /// their offsets.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.geometry = Geometry::from(viewport);
        debug!(
            left = viewport.left,
            width = viewport.width,
            right_boundary = self.geometry.right_boundary,
            wrap_spacer = self.geometry.wrap_spacer,
            "marquee viewport resized"
        );
    }

    /// Mark a host loop as started at `now_ms`.
    ///
    /// Returns `false` if a loop was already running. The start timestamp is
    /// what the start delay is measured from.
    pub fn begin(&mut self, now_ms: u64) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.run_state = RunState::Running;
        self.timing.start(now_ms);
        info!(now_ms, "marquee loop started");
        true
    }

    /// Mark the host loop as stopped.
    pub fn halt(&mut self) {
        if self.run_state == RunState::Running {
            info!(frames = self.frames_painted, "marquee loop halted");
        }
        self.run_state = RunState::Idle;
    }

    /// Run one frame.
    pub fn tick<R>(&mut self, now_ms: u64, renderer: &mut R) -> TickOutcome
    where
        R: TextRenderer + ?Sized,
    {
        if self.lanes.iter().all(ScrollSlot::is_textless) {
            if self.run_state == RunState::Running {
                info!("both lanes empty; marquee going idle");
            }
            self.run_state = RunState::Idle;
            return TickOutcome::Idle;
        }

        let mut wraps = Wraps::new();
        if !self.skip_relocation {
            self.relocate(now_ms, &mut wraps);
        }

        if let Err(err) = renderer.begin_frame() {
            trace!(error = %err, "marquee frame skipped");
            self.skip_relocation = true;
            return TickOutcome::Skipped(err);
        }
        self.skip_relocation = false;

        for slot in &self.lanes {
            if let (Some(text), LanePosition::Active(x)) = (slot.text(), slot.position()) {
                if !text.is_empty() {
                    renderer.paint(text, &self.style, x);
                }
            }
        }
        renderer.end_frame();
        self.frames_painted += 1;

        TickOutcome::Painted { wraps }
    }

    fn relocate(&mut self, now_ms: u64, wraps: &mut Wraps) {
        let geometry = self.geometry;
        let Some(pending) = self.pending.clone() else {
            return;
        };
        let [primary, secondary] = &mut self.lanes;

        primary.advance(now_ms, &mut self.timing, geometry.viewport_width);
        if let Some(parked_at) = primary.check_wrap_and_reset(
            secondary,
            geometry,
            &pending,
            &mut self.measurer,
            &self.style,
        ) {
            wraps.push(wrap_event(Lane::Secondary, parked_at, &pending));
        }

        secondary.advance(now_ms, &mut self.timing, geometry.viewport_width);
        if let Some(parked_at) = secondary.check_wrap_and_reset(
            primary,
            geometry,
            &pending,
            &mut self.measurer,
            &self.style,
        ) {
            wraps.push(wrap_event(Lane::Primary, parked_at, &pending));
        }
    }

    /// A lane by name.
    pub fn lane(&self, lane: Lane) -> &ScrollSlot {
        &self.lanes[lane.index()]
    }

    /// Consistent copy of both lanes and the shared state.
    pub fn snapshot(&self) -> MarqueeSnapshot {
        MarqueeSnapshot {
            primary: LaneSnapshot::from(&self.lanes[0]),
            secondary: LaneSnapshot::from(&self.lanes[1]),
            pending: self.pending.clone(),
            past_initial_delay: self.timing.past_initial_delay,
            run_state: self.run_state,
        }
    }

    /// The most recently stored text.
    pub fn pending_text(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// `viewport.left + viewport.width`.
    pub fn right_boundary(&self) -> i32 {
        self.geometry.right_boundary
    }

    /// Gap between the trailing edge of one lane and the next: a sixth of the
    /// viewport width.
    pub fn wrap_spacer(&self) -> i32 {
        self.geometry.wrap_spacer
    }

    /// Whether the start delay has elapsed at least once.
    pub fn has_passed_initial_delay(&self) -> bool {
        self.timing.past_initial_delay
    }

    /// Whether any lane has ever been given text.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Frame interval the host should pace ticks to.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Frames painted over the coordinator's lifetime.
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }
}

fn wrap_event(lane: Lane, parked_at: i32, text: &Arc<str>) -> WrapEvent {
    debug!(?lane, parked_at, len = text.len(), "marquee lane wrapped");
    WrapEvent {
        lane,
        parked_at,
        text: Arc::clone(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Measures every string by a fixed table: 10px per byte.
    fn ten_px(text: &str, _: &TextStyle) -> i32 {
        text.len() as i32 * 10
    }

    #[derive(Debug, Default)]
    struct Recorder {
        frames: Vec<Vec<(String, i32)>>,
        current: Vec<(String, i32)>,
        fail_next: usize,
    }

    impl TextRenderer for Recorder {
        fn begin_frame(&mut self) -> Result<(), SurfaceError> {
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err(SurfaceError::Unavailable);
            }
            self.current.clear();
            Ok(())
        }

        fn paint(&mut self, text: &str, _style: &TextStyle, x: i32) {
            self.current.push((text.to_owned(), x));
        }

        fn end_frame(&mut self) {
            self.frames.push(std::mem::take(&mut self.current));
        }
    }

    fn marquee(width: i32) -> ScrollCoordinator<fn(&str, &TextStyle) -> i32> {
        let mut m = ScrollCoordinator::new(MarqueeConfig::default(), ten_px as fn(&str, &TextStyle) -> i32);
        m.resize(Viewport::new(0, width));
        m
    }

    fn x(m: &ScrollCoordinator<impl TextMeasurer>, lane: Lane) -> Option<i32> {
        m.lane(lane).position().offset()
    }

    /// 50 bytes at 10px per byte.
    const WIDE: &str = "the quick brown fox jumps over the lazy dog again!";

    #[test]
    fn new_coordinator_layout() {
        let m = marquee(300);
        assert_eq!(x(&m, Lane::Primary), Some(0));
        assert!(m.lane(Lane::Secondary).position().is_dormant());
        assert_eq!(m.run_state(), RunState::Idle);
        assert!(!m.is_ready());
    }

    #[test]
    fn resize_computes_boundaries() {
        let mut m = marquee(300);
        assert_eq!(m.right_boundary(), 300);
        assert_eq!(m.wrap_spacer(), 50);

        m.resize(Viewport::new(20, 600));
        assert_eq!(m.right_boundary(), 620);
        assert_eq!(m.wrap_spacer(), 100);
    }

    #[test]
    fn first_text_fills_both_lanes_and_requests_start() {
        let mut m = marquee(300);
        assert_eq!(m.set_text(Some("abc")), TextUpdate::StartRequested);
        assert_eq!(m.lane(Lane::Primary).text(), Some("abc"));
        assert_eq!(m.lane(Lane::Secondary).text(), Some("abc"));
        assert_eq!(m.lane(Lane::Primary).width(), 30);
        assert!(m.is_ready());
    }

    #[test]
    fn running_coordinator_does_not_request_start() {
        let mut m = marquee(300);
        m.set_text(Some("abc"));
        assert!(m.begin(0));
        assert!(!m.begin(5));
        assert_eq!(m.set_text(Some("def")), TextUpdate::Stored);
    }

    #[test]
    fn empty_text_does_not_request_start() {
        let mut m = marquee(300);
        assert_eq!(m.set_text(Some("")), TextUpdate::Stored);
        assert!(m.is_ready());
    }

    #[test]
    fn null_text_is_ignored() {
        let mut m = marquee(300);
        m.set_text(Some("abc"));
        let before = m.snapshot();

        assert_eq!(m.set_text(None), TextUpdate::Ignored);
        assert_eq!(m.snapshot(), before);
        assert_eq!(m.pending_text(), Some("abc"));
    }

    #[test]
    fn long_text_scrolls_two_px_per_tick() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder::default();

        m.tick(16, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(-2));

        for i in 2..=100 {
            m.tick(16 * i, &mut r);
        }
        assert_eq!(x(&m, Lane::Primary), Some(-200));
        assert!(m.lane(Lane::Secondary).position().is_dormant());
        assert_eq!(m.frames_painted(), 100);
    }

    #[test]
    fn fitting_text_never_moves() {
        let mut m = marquee(300);
        m.set_text(Some("0123456789"));
        m.begin(0);
        let mut r = Recorder::default();
        for i in 1..=500 {
            m.tick(i * 16, &mut r);
            assert_eq!(x(&m, Lane::Primary), Some(0));
        }
        assert!(!m.has_passed_initial_delay());
    }

    #[test]
    fn fitting_text_parks_secondary_off_screen_once() {
        let mut m = marquee(300);
        m.set_text(Some("0123456789"));
        m.begin(0);
        let mut r = Recorder::default();

        let TickOutcome::Painted { wraps } = m.tick(16, &mut r) else {
            panic!("expected a painted frame");
        };
        assert_eq!(wraps.len(), 1);
        assert_eq!(wraps[0].lane, Lane::Secondary);
        assert_eq!(wraps[0].parked_at, 350);

        for i in 2..=50 {
            let TickOutcome::Painted { wraps } = m.tick(i * 16, &mut r) else {
                panic!("expected a painted frame");
            };
            assert!(wraps.is_empty());
        }
        assert_eq!(x(&m, Lane::Secondary), Some(350));
    }

    #[test]
    fn first_wrap_parks_secondary_at_right_edge_plus_spacer() {
        // lane one 400px wide in a 300px viewport
        let text = "0123456789012345678901234567890123456789";
        let mut m = marquee(300);
        m.set_text(Some(text));
        m.set_text(Some("next headline that is long enough to scroll"));
        m.begin(0);
        let mut r = Recorder::default();

        let mut wrap = None;
        for i in 1..=200 {
            if let TickOutcome::Painted { wraps } = m.tick(i * 16, &mut r) {
                if let Some(ev) = wraps.into_iter().next() {
                    wrap = Some((i, ev));
                    break;
                }
            }
        }
        let (tick, ev) = wrap.expect("secondary lane should wrap");

        // primary reached -102, the first offset with x + 400 < 300
        assert_eq!(tick, 51);
        assert_eq!(x(&m, Lane::Primary), Some(-102));
        assert_eq!(ev.lane, Lane::Secondary);
        assert_eq!(ev.parked_at, 350);
        assert_eq!(&*ev.text, "next headline that is long enough to scroll");
        // secondary advanced once in the same frame after being parked
        assert_eq!(x(&m, Lane::Secondary), Some(348));
        assert_eq!(m.lane(Lane::Primary).text(), Some(text));
    }

    #[test]
    fn lanes_relay_back_and_forth() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder::default();

        let mut relayed = Vec::new();
        for i in 1..=2000 {
            if let TickOutcome::Painted { wraps } = m.tick(i * 16, &mut r) {
                relayed.extend(wraps.into_iter().map(|w| w.lane));
            }
        }
        assert!(relayed.len() >= 4);
        for pair in relayed.windows(2) {
            assert_ne!(pair[0], pair[1], "lanes must alternate: {relayed:?}");
        }
    }

    #[test]
    fn new_text_waits_for_next_wrap() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder::default();
        for i in 1..=10 {
            m.tick(i * 16, &mut r);
        }

        m.set_text(Some("BREAKING: a brand new and rather long headline!!"));
        assert_eq!(m.lane(Lane::Primary).text(), Some(WIDE));
        assert_eq!(m.lane(Lane::Secondary).text(), Some(WIDE));

        let mut i = 11;
        loop {
            if let TickOutcome::Painted { wraps } = m.tick(i * 16, &mut r) {
                if !wraps.is_empty() {
                    break;
                }
            }
            assert_eq!(m.lane(Lane::Primary).text(), Some(WIDE));
            i += 1;
        }
        assert_eq!(
            m.lane(Lane::Secondary).text(),
            Some("BREAKING: a brand new and rather long headline!!")
        );
    }

    #[test]
    fn start_delay_pauses_first_cycle_only() {
        let config = MarqueeConfig::default().start_delay(Duration::from_millis(100));
        let mut m = ScrollCoordinator::new(config, ten_px as fn(&str, &TextStyle) -> i32);
        m.resize(Viewport::new(0, 300));
        m.set_text(Some(WIDE));
        m.begin(1_000);
        let mut r = Recorder::default();

        m.tick(1_050, &mut r);
        m.tick(1_100, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(0));
        assert!(!m.has_passed_initial_delay());

        m.tick(1_101, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(-2));
        assert!(m.has_passed_initial_delay());

        // a fresh loop does not re-apply the delay
        m.halt();
        m.begin(5_000);
        m.tick(5_001, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(-4));
        assert!(m.has_passed_initial_delay());
    }

    #[test]
    fn skipped_frame_suppresses_next_relocation() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder {
            fail_next: 1,
            ..Recorder::default()
        };

        // relocation ran, paint failed
        assert_eq!(
            m.tick(16, &mut r),
            TickOutcome::Skipped(SurfaceError::Unavailable)
        );
        assert_eq!(x(&m, Lane::Primary), Some(-2));
        assert!(r.frames.is_empty());

        // stale frame is painted without moving again
        assert!(matches!(m.tick(32, &mut r), TickOutcome::Painted { .. }));
        assert_eq!(x(&m, Lane::Primary), Some(-2));
        assert_eq!(r.frames.last(), Some(&vec![(WIDE.to_owned(), -2)]));

        m.tick(48, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(-4));
    }

    #[test]
    fn repeated_skips_never_move_lanes() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder {
            fail_next: 5,
            ..Recorder::default()
        };
        for i in 1..=5 {
            m.tick(i * 16, &mut r);
        }
        assert_eq!(x(&m, Lane::Primary), Some(-2));
    }

    #[test]
    fn dormant_lane_is_not_painted() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder::default();
        m.tick(16, &mut r);
        assert_eq!(r.frames, vec![vec![(WIDE.to_owned(), -2)]]);
    }

    #[test]
    fn both_lanes_empty_goes_idle() {
        let mut m = marquee(300);
        m.set_text(Some(""));
        m.begin(0);
        let mut r = Recorder::default();
        assert_eq!(m.tick(16, &mut r), TickOutcome::Idle);
        assert_eq!(m.run_state(), RunState::Idle);
        assert!(r.frames.is_empty());
    }

    #[test]
    fn unassigned_lanes_are_idle() {
        let mut m = marquee(300);
        m.begin(0);
        let mut r = Recorder::default();
        assert!(m.tick(16, &mut r).is_idle());
    }

    #[test]
    fn idle_coordinator_requests_restart_on_new_text() {
        let mut m = marquee(300);
        m.set_text(Some(""));
        m.begin(0);
        m.tick(16, &mut Recorder::default());
        assert_eq!(m.set_text(Some("back")), TextUpdate::StartRequested);
        assert_eq!(m.lane(Lane::Primary).text(), Some("back"));
        assert_eq!(m.lane(Lane::Secondary).text(), Some("back"));
        assert_eq!(x(&m, Lane::Primary), Some(0));
        assert!(m.lane(Lane::Secondary).position().is_dormant());
    }

    #[test]
    fn empty_parked_lane_takes_new_text_in_place() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        m.set_text(Some(""));
        let mut r = Recorder::default();
        for i in 1..=101 {
            m.tick(i * 16, &mut r);
        }
        // secondary was parked with the empty pending text and cannot move
        assert_eq!(m.lane(Lane::Secondary).text(), Some(""));
        assert_eq!(x(&m, Lane::Secondary), Some(350));

        m.set_text(Some("0123456789012345678901234567890123456789"));
        assert_eq!(
            m.lane(Lane::Secondary).text(),
            Some("0123456789012345678901234567890123456789")
        );
        assert_eq!(x(&m, Lane::Secondary), Some(350));
        // the visible lane keeps its text
        assert_eq!(m.lane(Lane::Primary).text(), Some(WIDE));

        m.tick(102 * 16, &mut r);
        assert_eq!(x(&m, Lane::Secondary), Some(348));
    }

    #[test]
    fn empty_lane_pulled_on_screen_keeps_waiting() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        m.set_text(Some(""));
        let mut r = Recorder::default();
        for i in 1..=101 {
            m.tick(i * 16, &mut r);
        }
        assert_eq!(x(&m, Lane::Secondary), Some(350));

        // a wider viewport brings the empty parked lane inside it
        m.resize(Viewport::new(0, 600));
        let long = "y".repeat(70);
        assert_eq!(m.set_text(Some(long.as_str())), TextUpdate::Stored);

        assert_eq!(m.lane(Lane::Secondary).text(), Some(""));
        assert_eq!(m.lane(Lane::Secondary).width(), 0);
        assert_eq!(x(&m, Lane::Secondary), Some(350));
        assert_eq!(m.lane(Lane::Primary).text(), Some(WIDE));
        assert_eq!(m.pending_text(), Some(long.as_str()));
    }

    #[test]
    fn resize_keeps_offsets_in_flight() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        let mut r = Recorder::default();
        for i in 1..=20 {
            m.tick(i * 16, &mut r);
        }
        assert_eq!(x(&m, Lane::Primary), Some(-40));

        m.resize(Viewport::new(0, 120));
        assert_eq!(x(&m, Lane::Primary), Some(-40));
        assert_eq!(m.wrap_spacer(), 20);

        m.tick(21 * 16, &mut r);
        assert_eq!(x(&m, Lane::Primary), Some(-42));
    }

    #[test]
    fn resize_changes_wrap_target() {
        let mut m = marquee(300);
        m.set_text(Some(WIDE));
        m.begin(0);
        m.resize(Viewport::new(0, 120));
        let mut r = Recorder::default();

        let mut parked = None;
        for i in 1..=400 {
            if let TickOutcome::Painted { wraps } = m.tick(i * 16, &mut r) {
                if let Some(ev) = wraps.first() {
                    parked = Some(ev.parked_at);
                    break;
                }
            }
        }
        assert_eq!(parked, Some(140));
    }

    #[test]
    fn custom_speed() {
        let config = MarqueeConfig::default().scroll_speed(5);
        let mut m = ScrollCoordinator::new(config, ten_px as fn(&str, &TextStyle) -> i32);
        m.resize(Viewport::new(0, 300));
        m.set_text(Some(WIDE));
        m.begin(0);
        m.tick(16, &mut Recorder::default());
        assert_eq!(x(&m, Lane::Primary), Some(-5));
    }
}
