//! countdown - Terminal Countdown Timer
//!
//! A TUI countdown timer with a persisted light/dark theme.
//!
//! Features:
//! - Enter minutes and seconds, start/pause/resume/reset
//! - Blocking "time's up" notification with optional terminal bell
//! - Light/Dark theme remembered across sessions
//!
//! Usage: countdown [-m MINUTES] [-s SECONDS]

mod app;
mod config;
mod preferences;
mod storage;
mod timer;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::fs::{self, OpenOptions};
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use storage::{FileStore, KeyValueStore, MemoryStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::Countdown;

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    minutes: u32,
    seconds: u32,
    help: bool,
    version: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "-v" | "--version" => parsed.version = true,
                "-m" | "--minutes" => parsed.minutes = number_arg(arg, iter.next())?,
                "-s" | "--seconds" => parsed.seconds = number_arg(arg, iter.next())?,
                other => bail!("unknown argument '{}'", other),
            }
        }

        Ok(parsed)
    }

    fn initial_countdown(&self) -> Countdown {
        Countdown::new(self.minutes, self.seconds)
    }
}

fn number_arg(flag: &str, value: Option<&String>) -> Result<u32> {
    let value = value.with_context(|| format!("{} expects a number", flag))?;
    value
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}\n\nTry 'countdown --help'", e);
            std::process::exit(2);
        }
    };

    if cli.help {
        print_help();
        return Ok(());
    }

    if cli.version {
        println!("countdown {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Run the application
    let result = run_app(&cli);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"countdown - Terminal Countdown Timer

USAGE:
    countdown [OPTIONS]

OPTIONS:
    -m, --minutes <N>    Initial minutes
    -s, --seconds <N>    Initial seconds (0-59)
    -h, --help           Print help information
    -v, --version        Print version information

KEYBINDINGS:
    s                Start
    p / Space        Pause / Resume
    r                Reset
    t                Toggle light/dark theme
    Tab              Switch between minutes and seconds
    0-9, Backspace   Edit the focused field
    Up/Down          Adjust the focused field
    ?                Help
    q                Quit

FILES:
    ~/.config/countdown/config.toml    Settings
    ~/.config/countdown/state.toml     Remembered theme

ENVIRONMENT:
    COUNTDOWN_LOG    Log filter (e.g. debug), overrides log_level
"#
    );
}

/// Send tracing output to a log file; the terminal belongs to the UI
fn init_logging(config: &Config) -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("countdown");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;

    let path = dir.join("countdown.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_new(config.log_directive(std::env::var(config::LOG_ENV).ok()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;

    Ok(path)
}

fn run_app(cli: &CliArgs) -> Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    match init_logging(&config) {
        Ok(path) => info!(log = ?path, "countdown {} starting", env!("CARGO_PKG_VERSION")),
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    // Create application state
    let store: Box<dyn KeyValueStore> = match FileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("theme will not be remembered: {:#}", e);
            Box::new(MemoryStore::new())
        }
    };
    let mut app = App::new(config, store, cli.initial_countdown())
        .context("Failed to initialize application")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    } else {
        info!("countdown exiting");
    }
    result
}

fn main_loop<B: Backend + Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        if app.take_bell() {
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            Write::flush(backend)?;
        }

        // Poll for events with timeout (for timer updates)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now())?;
                }
            }
        }

        // Advance the countdown
        app.update(Instant::now());

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("countdown")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = CliArgs::parse(&args(&[])).unwrap();
        assert_eq!(cli, CliArgs::default());
        assert_eq!(cli.initial_countdown(), Countdown::ZERO);
    }

    #[test]
    fn test_parse_initial_time() {
        let cli = CliArgs::parse(&args(&["-m", "25", "--seconds", "90"])).unwrap();
        assert_eq!(cli.minutes, 25);
        assert_eq!(cli.initial_countdown(), Countdown::new(25, 59));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(CliArgs::parse(&args(&["-m"])).is_err());
        assert!(CliArgs::parse(&args(&["-m", "-3"])).is_err());
        assert!(CliArgs::parse(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = CliArgs::parse(&args(&["--help", "-v"])).unwrap();
        assert!(cli.help);
        assert!(cli.version);
    }
}
