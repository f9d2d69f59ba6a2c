//! Application state and event handling
//!
//! This is the core of countdown, managing:
//! - The timer widget and the edited input field
//! - Event handling (keyboard input)
//! - Popups, flash messages and the persisted theme

use crate::config::Config;
use crate::preferences::ThemePreference;
use crate::storage::KeyValueStore;
use crate::timer::{TimerEvent, TimerWidget};
use crate::types::{push_digit, Countdown, Field, MAX_SECONDS};
use crate::ui::Theme;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// How long a flash message stays on screen
const FLASH_TIMEOUT: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    pub preference: ThemePreference,

    // Timer
    pub timer: TimerWidget,
    pub focus: Field,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)

    // Set when the terminal bell should ring on the next frame
    pub bell_pending: bool,
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    TimesUp {
        finished_at: String,
    },
    Error {
        title: String,
        message: String,
    },
    Help,
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Notification,
    ShowError,
    Help,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config, store: Box<dyn KeyValueStore>, initial: Countdown) -> Result<Self> {
        let mut theme = Theme::default();
        let preference = ThemePreference::load(store, &mut theme);

        Ok(Self {
            should_quit: false,
            config,
            theme,
            preference,

            timer: TimerWidget::default().with_countdown(initial),
            focus: Field::Minutes,

            popup: PopupState::None,
            flash_message: None,
            bell_pending: false,
        })
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::None => AppState::Normal,
            PopupState::TimesUp { .. } => AppState::Notification,
            PopupState::Error { .. } => AppState::ShowError,
            PopupState::Help => AppState::Help,
        }
    }

    /// Advance the timer and expire stale feedback
    pub fn update(&mut self, now: Instant) {
        if let Some((_, _, instant)) = &self.flash_message {
            if now.saturating_duration_since(*instant) >= FLASH_TIMEOUT {
                self.flash_message = None;
            }
        }

        let event = self.timer.update(now);
        self.on_timer_event(event);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        // Blocking popups swallow everything but their dismiss keys
        match self.state() {
            AppState::Notification | AppState::ShowError | AppState::Help => {
                self.handle_popup_key(key);
                Ok(())
            }
            AppState::Normal => self.handle_normal_key(key, now),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.popup = PopupState::Help,

            // Controls
            KeyCode::Char('s') => {
                if !self.timer.start(now) && self.timer.countdown().is_zero() {
                    self.show_flash("Set a time first", true);
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.timer.toggle_pause(now);
            }
            KeyCode::Char('r') => self.timer.reset(),
            KeyCode::Char('t') => self.toggle_theme(),

            // Field editing
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focus = self.focus.other();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(digit) = c.to_digit(10) {
                    self.type_digit(digit);
                }
            }
            KeyCode::Backspace => {
                let value = self.timer.countdown().get(self.focus) / 10;
                self.edit_focused(value);
            }
            KeyCode::Up | KeyCode::Char('+') => self.adjust(1),
            KeyCode::Down | KeyCode::Char('-') => self.adjust(-1),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while a popup is shown
    fn handle_popup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            KeyCode::Char('?') if self.state() == AppState::Help => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
    }

    /// Append a digit to the focused field.
    ///
    /// A digit that would push the field out of range starts a new value.
    fn type_digit(&mut self, digit: u32) {
        let current = self.timer.countdown().get(self.focus);
        let limit = match self.focus {
            Field::Minutes => u32::MAX,
            Field::Seconds => MAX_SECONDS,
        };
        let value = push_digit(current, digit)
            .filter(|v| *v <= limit)
            .unwrap_or(digit);
        self.edit_focused(value);
    }

    /// Step the focused field up or down
    fn adjust(&mut self, delta: i64) {
        let current = self.timer.countdown().get(self.focus) as i64;
        let value = (current + delta).clamp(0, u32::MAX as i64) as u32;
        self.edit_focused(value);
    }

    fn edit_focused(&mut self, value: u32) {
        let event = match self.focus {
            Field::Minutes => self.timer.set_minutes(value),
            Field::Seconds => self.timer.set_seconds(value),
        };
        self.on_timer_event(event);
    }

    fn toggle_theme(&mut self) {
        match self.preference.toggle(&mut self.theme) {
            Ok(theme) => self.show_flash(&format!("{} theme", theme.as_str()), false),
            Err(e) => {
                error!("Failed to persist theme: {:#}", e);
                self.show_error("Save Failed", &format!("{:#}", e));
            }
        }
    }

    fn on_timer_event(&mut self, event: Option<TimerEvent>) {
        if let Some(TimerEvent::Finished) = event {
            let finished_at = Local::now().format("%H:%M:%S").to_string();
            info!(%finished_at, "time's up");
            self.popup = PopupState::TimesUp { finished_at };
            self.bell_pending = self.config.bell;
        }
    }

    /// Take the pending bell request, if any
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    // === HELPER METHODS ===

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}
