//! Persisted theme preference
//!
//! The preference owns its store and pushes every change through an
//! injected `ApplyTheme` effect, so the caller decides what "applying" a
//! theme means (for the TUI: swapping the palette used to paint the screen).

use crate::config::ThemeName;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Key the theme is stored under
pub const THEME_KEY: &str = "theme";

/// Effect invoked whenever the active theme changes
pub trait ApplyTheme {
    fn apply_theme(&mut self, theme: ThemeName);
}

/// Theme preference backed by a key-value store
pub struct ThemePreference {
    store: Box<dyn KeyValueStore>,
    current: ThemeName,
}

impl ThemePreference {
    /// Read the stored theme and apply it.
    ///
    /// A missing, unrecognized or unreadable value falls back to Light,
    /// which is written back to the store. Storage failures only cost
    /// persistence, never startup.
    pub fn load(mut store: Box<dyn KeyValueStore>, target: &mut dyn ApplyTheme) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read theme preference, using default: {:#}", e);
                None
            }
        };

        let current = match stored.as_deref().map(ThemeName::from_key) {
            Some(Some(theme)) => theme,
            Some(None) => {
                warn!(value = ?stored, "unrecognized stored theme, using default");
                Self::write_default(store.as_mut())
            }
            None => Self::write_default(store.as_mut()),
        };

        info!(theme = current.key(), "theme loaded");
        target.apply_theme(current);
        Self { store, current }
    }

    fn write_default(store: &mut dyn KeyValueStore) -> ThemeName {
        let theme = ThemeName::default();
        if let Err(e) = store.set(THEME_KEY, theme.key()) {
            warn!("Failed to save default theme: {:#}", e);
        }
        theme
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Flip Light/Dark, apply it, then persist it.
    ///
    /// The new theme stays active even when persisting fails.
    pub fn toggle(&mut self, target: &mut dyn ApplyTheme) -> Result<ThemeName> {
        self.current = self.current.toggle();
        target.apply_theme(self.current);
        info!(theme = self.current.key(), "theme toggled");

        self.store
            .set(THEME_KEY, self.current.key())
            .context("Failed to save theme preference")?;
        Ok(self.current)
    }
}
