#![forbid(unsafe_code)]

//! Command-line argument parsing for the ticker demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `TICKER_DEMO_*` prefix; explicit flags win.

use std::path::PathBuf;
use std::time::Duration;

use ticker_core::{MarqueeConfig, Rgb};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Ticker Demo - a looping single-line marquee in your terminal

USAGE:
    ticker-demo [OPTIONS]

OPTIONS:
    --text=TEXT          Headline to scroll; repeat to rotate several
    --delay-ms=N         Pause before the first scroll (default: 0)
    --speed=N            Columns moved per frame (default: 1)
    --frame-ms=N         Frame interval in milliseconds (default: 60)
    --color=RRGGBB       Text color as hex (default: terminal foreground)
    --rotate-ms=N        Switch to the next headline every N ms (default: 0, off)
    --exit-after-ms=N    Quit automatically after N ms (default: 0, off)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    TICKER_DEMO_TEXT           Override --text (single headline)
    TICKER_DEMO_DELAY_MS       Override --delay-ms
    TICKER_DEMO_SPEED          Override --speed
    TICKER_DEMO_FRAME_MS       Override --frame-ms
    TICKER_DEMO_EXIT_AFTER_MS  Override --exit-after-ms
    TICKER_LOG                 Write tracing output to this file
    RUST_LOG                   Log filter (default: info)";

const DEFAULT_HEADLINE: &str = "Markets open higher as chip makers rally  \u{2022}  \
Rain expected across the coast by evening  \u{2022}  \
Local team clinches the title in extra time";

/// What the parser decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the marquee with these options.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Headlines; the first is shown immediately.
    pub headlines: Vec<String>,
    pub delay_ms: u64,
    pub speed: i32,
    pub frame_ms: u64,
    pub color: Option<Rgb>,
    /// Headline rotation period (0 = off).
    pub rotate_ms: u64,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Destination for tracing output.
    pub log_path: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            headlines: vec![DEFAULT_HEADLINE.to_owned()],
            delay_ms: 0,
            speed: 1,
            frame_ms: 60,
            color: None,
            rotate_ms: 0,
            exit_after_ms: 0,
            log_path: None,
        }
    }
}

/// A flag value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, CliError> {
        Self::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parse `args` (without the program name), reading overrides through
    /// `env`.
    pub fn parse_from<I, S>(args: I, env: impl Fn(&str) -> Option<String>) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env("TICKER_DEMO_TEXT") {
            opts.headlines = vec![val];
        }
        if let Some(val) = env("TICKER_DEMO_DELAY_MS")
            && let Ok(n) = val.parse()
        {
            opts.delay_ms = n;
        }
        if let Some(val) = env("TICKER_DEMO_SPEED")
            && let Ok(n) = val.parse()
        {
            opts.speed = n;
        }
        if let Some(val) = env("TICKER_DEMO_FRAME_MS")
            && let Ok(n) = val.parse()
        {
            opts.frame_ms = n;
        }
        if let Some(val) = env("TICKER_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        opts.log_path = env("TICKER_LOG").map(PathBuf::from);

        // Parse command-line args (override env vars)
        let mut cli_headlines = Vec::new();
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--text=") {
                        cli_headlines.push(val.to_owned());
                    } else if let Some(val) = other.strip_prefix("--delay-ms=") {
                        opts.delay_ms = number("--delay-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--speed=") {
                        opts.speed = number("--speed", val)?;
                    } else if let Some(val) = other.strip_prefix("--frame-ms=") {
                        opts.frame_ms = number("--frame-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--rotate-ms=") {
                        opts.rotate_ms = number("--rotate-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = number("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--color=") {
                        opts.color = Some(Rgb::from_hex(val).ok_or_else(|| {
                            CliError::InvalidValue {
                                flag: "--color",
                                value: val.to_owned(),
                            }
                        })?);
                    } else {
                        return Err(CliError::UnknownArgument(other.to_owned()));
                    }
                }
            }
        }
        if !cli_headlines.is_empty() {
            opts.headlines = cli_headlines;
        }

        Ok(Command::Run(opts))
    }

    /// Marquee configuration for these options.
    pub fn marquee_config(&self) -> MarqueeConfig {
        let mut config = MarqueeConfig::new()
            .start_delay(Duration::from_millis(self.delay_ms))
            .scroll_speed(self.speed)
            .frame_interval(Duration::from_millis(self.frame_ms));
        if let Some(color) = self.color {
            config = config.text_color(color);
        }
        config
    }

    pub fn version_line() -> String {
        format!("ticker-demo {VERSION}")
    }
}

fn number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(args: &[&str]) -> Opts {
        match Opts::parse_from(args, no_env).unwrap() {
            Command::Run(opts) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run(&[]);
        assert_eq!(opts.headlines.len(), 1);
        assert_eq!(opts.delay_ms, 0);
        assert_eq!(opts.speed, 1);
        assert_eq!(opts.frame_ms, 60);
        assert_eq!(opts.color, None);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run(&[
            "--text=one",
            "--text=two",
            "--delay-ms=250",
            "--speed=3",
            "--frame-ms=16",
            "--color=#00ff00",
            "--rotate-ms=4000",
            "--exit-after-ms=900",
        ]);
        assert_eq!(opts.headlines, vec!["one", "two"]);
        assert_eq!(opts.delay_ms, 250);
        assert_eq!(opts.speed, 3);
        assert_eq!(opts.frame_ms, 16);
        assert_eq!(opts.color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(opts.rotate_ms, 4000);
        assert_eq!(opts.exit_after_ms, 900);
    }

    #[test]
    fn env_overrides_defaults_but_not_flags() {
        let env = |key: &str| match key {
            "TICKER_DEMO_SPEED" => Some("4".to_owned()),
            "TICKER_DEMO_DELAY_MS" => Some("1000".to_owned()),
            "TICKER_DEMO_TEXT" => Some("from env".to_owned()),
            "TICKER_LOG" => Some("/tmp/ticker.log".to_owned()),
            _ => None,
        };
        let Command::Run(opts) = Opts::parse_from(["--speed=2"], env).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(opts.speed, 2);
        assert_eq!(opts.delay_ms, 1000);
        assert_eq!(opts.headlines, vec!["from env"]);
        assert_eq!(opts.log_path, Some(PathBuf::from("/tmp/ticker.log")));
    }

    #[test]
    fn malformed_env_is_ignored() {
        let env = |key: &str| (key == "TICKER_DEMO_FRAME_MS").then(|| "fast".to_owned());
        let Command::Run(opts) = Opts::parse_from(Vec::<String>::new(), env).unwrap() else {
            panic!("expected Run");
        };
        assert_eq!(opts.frame_ms, 60);
    }

    #[test]
    fn bad_values_are_errors() {
        assert_eq!(
            Opts::parse_from(["--speed=fast"], no_env),
            Err(CliError::InvalidValue {
                flag: "--speed",
                value: "fast".into()
            })
        );
        assert!(matches!(
            Opts::parse_from(["--color=blue"], no_env),
            Err(CliError::InvalidValue { flag: "--color", .. })
        ));
        assert_eq!(
            Opts::parse_from(["--bogus"], no_env),
            Err(CliError::UnknownArgument("--bogus".into()))
        );
    }

    #[test]
    fn help_and_version() {
        assert_eq!(Opts::parse_from(["-h"], no_env), Ok(Command::Help));
        assert_eq!(Opts::parse_from(["--version"], no_env), Ok(Command::Version));
        assert!(Opts::version_line().starts_with("ticker-demo "));
    }

    #[test]
    fn marquee_config_carries_options() {
        let opts = run(&["--delay-ms=300", "--speed=2", "--frame-ms=30", "--color=ff0000"]);
        let config = opts.marquee_config();
        assert_eq!(config.start_delay, Duration::from_millis(300));
        assert_eq!(config.scroll_speed, 2);
        assert_eq!(config.frame_interval, Duration::from_millis(30));
        assert_eq!(config.style.color, Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn help_text_lists_env_vars() {
        assert!(HELP_TEXT.contains("TICKER_DEMO_SPEED"));
        assert!(HELP_TEXT.contains("TICKER_LOG"));
    }
}
