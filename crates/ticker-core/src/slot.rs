#![forbid(unsafe_code)]

//! Scroll lanes.
//!
//! A marquee relays its text between two [`ScrollSlot`]s. Each slot holds the
//! text it is currently showing, the measured width of that text, and where
//! it sits horizontally. Slots never change text while they can be seen; new
//! text only lands in a slot when it is parked past the right edge.

use std::sync::Arc;

use crate::config::TextStyle;
use crate::coordinator::{Geometry, ScrollTiming};
use crate::measure::TextMeasurer;

/// Which of the two lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Created first, starts at offset 0.
    Primary,
    /// Created second, starts dormant.
    Secondary,
}

impl Lane {
    /// The opposite lane.
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

/// Horizontal placement of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePosition {
    /// Never moves until the other lane wraps it into play.
    ///
    /// Orders to the left of every active position, so the first lane can
    /// hand off to it.
    Dormant,
    /// Left edge of the text in pixels, relative to the viewport's left edge.
    Active(i32),
}

impl LanePosition {
    /// Offset of an active lane.
    pub const fn offset(self) -> Option<i32> {
        match self {
            Self::Dormant => None,
            Self::Active(x) => Some(x),
        }
    }

    pub const fn is_dormant(self) -> bool {
        matches!(self, Self::Dormant)
    }

    /// Whether this position lies strictly left of `other`.
    pub const fn is_left_of(self, other: Self) -> bool {
        match (self, other) {
            (Self::Dormant, Self::Active(_)) => true,
            (Self::Active(a), Self::Active(b)) => a < b,
            (_, Self::Dormant) => false,
        }
    }
}

/// One lane of the marquee.
#[derive(Debug, Clone)]
pub struct ScrollSlot {
    text: Option<Arc<str>>,
    width: i32,
    position: LanePosition,
}

impl ScrollSlot {
    pub(crate) fn new(position: LanePosition) -> Self {
        Self {
            text: None,
            width: 0,
            position,
        }
    }

    /// Text currently shown by this lane, if any was ever assigned.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn shared_text(&self) -> Option<&Arc<str>> {
        self.text.as_ref()
    }

    /// Whether the lane has been given text (possibly empty).
    pub fn is_assigned(&self) -> bool {
        self.text.is_some()
    }

    /// Whether the lane has nothing to draw: unassigned or empty text.
    pub fn is_textless(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }

    /// Measured width of the current text.
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn position(&self) -> LanePosition {
        self.position
    }

    /// Whether no part of the lane can be seen: dormant, past the right
    /// boundary, or fully scrolled off the left edge.
    pub fn is_off_screen(&self, right_boundary: i32) -> bool {
        match self.position {
            LanePosition::Dormant => true,
            LanePosition::Active(x) => x >= right_boundary || x.saturating_add(self.width) <= 0,
        }
    }

    /// Replace the text and remeasure it. Position is untouched.
    pub(crate) fn assign<M: TextMeasurer>(
        &mut self,
        text: Arc<str>,
        measurer: &mut M,
        style: &TextStyle,
    ) {
        self.width = measurer.measure(&text, style).max(0);
        self.text = Some(text);
    }

    /// Move one step left if this lane is allowed to scroll.
    ///
    /// Dormant lanes and text narrower than the viewport stay put. The start
    /// delay is honoured until it has elapsed once, after which the shared
    /// latch keeps every later cycle moving immediately.
    pub(crate) fn advance(&mut self, now_ms: u64, timing: &mut ScrollTiming, viewport_width: i32) {
        let LanePosition::Active(x) = self.position else {
            return;
        };
        if self.width < viewport_width {
            return;
        }
        if timing.past_initial_delay || timing.delay_elapsed(now_ms) {
            self.position = LanePosition::Active(x.saturating_sub(timing.speed));
            timing.past_initial_delay = true;
        }
    }

    /// Whether this lane's trailing edge has cleared the right boundary while
    /// `other` sits further left.
    pub(crate) fn should_wrap(&self, other: &ScrollSlot, right_boundary: i32) -> bool {
        let LanePosition::Active(x) = self.position else {
            return false;
        };
        x.saturating_add(self.width) < right_boundary && other.position.is_left_of(self.position)
    }

    /// Check the wrap condition and, if it holds, reload `other` with
    /// `pending` and park it just past the right edge.
    ///
    /// Returns the parked offset when a wrap happened. `self` keeps
    /// scrolling either way.
    pub(crate) fn check_wrap_and_reset<M: TextMeasurer>(
        &self,
        other: &mut ScrollSlot,
        geometry: Geometry,
        pending: &Arc<str>,
        measurer: &mut M,
        style: &TextStyle,
    ) -> Option<i32> {
        if !self.should_wrap(other, geometry.right_boundary) {
            return None;
        }
        let parked = geometry.wrap_target();
        other.assign(Arc::clone(pending), measurer, style);
        other.position = LanePosition::Active(parked);
        Some(parked)
    }
}
