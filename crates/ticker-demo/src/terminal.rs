#![forbid(unsafe_code)]

//! Crossterm surface for the marquee.
//!
//! [`TerminalSession`] owns raw mode and the alternate screen and undoes both
//! on drop. [`TerminalRenderer`] draws the lanes on the middle row, clipping
//! each lane to the visible columns by grapheme so a wide character that
//! straddles an edge is blanked rather than torn.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use ticker_core::{SurfaceError, TextRenderer, TextStyle};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal size shared between the event loop and the renderer.
#[derive(Debug, Default)]
pub struct Surface {
    cols: AtomicU16,
    rows: AtomicU16,
}

impl Surface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: AtomicU16::new(cols),
            rows: AtomicU16::new(rows),
        }
    }

    pub fn resize(&self, cols: u16, rows: u16) {
        self.cols.store(cols, Ordering::Relaxed);
        self.rows.store(rows, Ordering::Relaxed);
    }

    /// `(cols, rows)`
    pub fn size(&self) -> (u16, u16) {
        (
            self.cols.load(Ordering::Relaxed),
            self.rows.load(Ordering::Relaxed),
        )
    }
}

/// Raw mode plus alternate screen, restored on drop.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self { active: true };
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            session.cleanup();
            return Err(err);
        }
        Ok(session)
    }

    /// Current `(cols, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show);
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Draws marquee lanes on the middle row of a terminal.
///
/// Write errors raised while painting are held until the next
/// [`begin_frame`](TextRenderer::begin_frame), which reports them as
/// [`SurfaceError::Io`] so the frame loop logs and retries.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    surface: Arc<Surface>,
    row: u16,
    cols: u16,
    deferred: Option<io::Error>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, surface: Arc<Surface>) -> Self {
        Self {
            out,
            surface,
            row: 0,
            cols: 0,
            deferred: None,
        }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn draw(&mut self, col: u16, visible: &str, style: &TextStyle) -> io::Result<()> {
        queue!(self.out, MoveTo(col, self.row))?;
        match style.color {
            Some(rgb) => queue!(
                self.out,
                SetForegroundColor(Color::Rgb {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                }),
                Print(visible),
                ResetColor
            ),
            None => queue!(self.out, Print(visible)),
        }
    }

    fn defer(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.deferred.get_or_insert(err);
        }
    }
}

impl<W: Write> TextRenderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> Result<(), SurfaceError> {
        if let Some(err) = self.deferred.take() {
            return Err(err.into());
        }
        let (cols, rows) = self.surface.size();
        if cols == 0 || rows == 0 {
            return Err(SurfaceError::Unavailable);
        }
        self.cols = cols;
        self.row = rows / 2;
        queue!(self.out, MoveTo(0, self.row), Clear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn paint(&mut self, text: &str, style: &TextStyle, x: i32) {
        let Some((col, visible)) = clip(text, x, self.cols) else {
            return;
        };
        let result = self.draw(col, &visible, style);
        self.defer(result);
    }

    fn end_frame(&mut self) {
        let result = self.out.flush();
        self.defer(result);
    }
}

/// Portion of `text` drawn at column `x` that lands inside `0..cols`.
///
/// Returns the first visible column and the visible text. Graphemes cut by
/// the left edge are replaced by spaces covering their visible columns;
/// graphemes cut by the right edge are dropped.
pub fn clip(text: &str, x: i32, cols: u16) -> Option<(u16, String)> {
    let cols = i64::from(cols);
    let mut col = i64::from(x);
    let mut start = None;
    let mut visible = String::new();

    for grapheme in text.graphemes(true) {
        if col >= cols {
            break;
        }
        let width = grapheme.width() as i64;
        if col >= 0 {
            if col + width > cols {
                break;
            }
            start.get_or_insert(col);
            visible.push_str(grapheme);
        } else if col + width > 0 {
            start.get_or_insert(0);
            visible.extend(std::iter::repeat_n(' ', (col + width) as usize));
        }
        col += width;
    }

    if visible.is_empty() {
        return None;
    }
    let start = u16::try_from(start?).ok()?;
    Some((start, visible))
}
