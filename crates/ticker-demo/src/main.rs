#![forbid(unsafe_code)]

//! Ticker demo binary entry point.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ticker_core::{CachedMeasurer, CellMeasurer, Viewport};
use ticker_demo::cli::{self, Command, Opts};
use ticker_demo::logging;
use ticker_demo::terminal::{Surface, TerminalRenderer, TerminalSession};
use ticker_runtime::Marquee;
use tracing::info;

const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() {
    let opts = match Opts::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            std::process::exit(0);
        }
        Ok(Command::Version) => {
            println!("{}", Opts::version_line());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if let Some(path) = &opts.log_path
        && let Err(e) = logging::init(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    if let Err(e) = run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> io::Result<()> {
    let session = TerminalSession::enter()?;
    let (cols, rows) = session.size()?;
    let surface = Arc::new(Surface::new(cols, rows));

    let renderer = TerminalRenderer::new(io::stdout(), Arc::clone(&surface));
    let measurer = CachedMeasurer::new(CellMeasurer::new(1));
    let marquee = Marquee::new(opts.marquee_config(), measurer, renderer);
    marquee.resize(Viewport::new(0, i32::from(cols)));

    let mut headlines = opts.headlines.iter().cycle();
    marquee.set_text(headlines.next().map(String::as_str));
    info!(cols, rows, headlines = opts.headlines.len(), "ticker demo started");

    let started = Instant::now();
    let rotate = (opts.rotate_ms > 0 && opts.headlines.len() > 1)
        .then(|| Duration::from_millis(opts.rotate_ms));
    let mut next_rotation = rotate.map(|period| started + period);
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));

    loop {
        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => break,
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    marquee.resize(Viewport::new(0, i32::from(cols)));
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if let (Some(at), Some(period)) = (next_rotation, rotate)
            && now >= at
        {
            marquee.set_text(headlines.next().map(String::as_str));
            next_rotation = Some(at + period);
        }
        if exit_after.is_some_and(|limit| now.duration_since(started) >= limit) {
            break;
        }
    }

    let exit = marquee.stop();
    let cache = marquee.inspect(|coordinator, _| coordinator.measurer().cache().stats());
    info!(
        ?exit,
        cache_hits = cache.hits,
        cache_misses = cache.misses,
        "ticker demo finished"
    );
    drop(session);
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
