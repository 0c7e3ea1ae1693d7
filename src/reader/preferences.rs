//! Reader Display Preferences

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::storage::{PreferenceStorage, StorageError};

/// Storage key for the theme.
pub const THEME_KEY: &str = "reader-theme";

/// Storage key for the font size.
pub const FONT_SIZE_KEY: &str = "reader-font";

/// Theme string was neither `light` nor `dark`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct ParseThemeError(String);

/// Light or dark reading theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light background
    #[default]
    Light,

    /// Dark background
    Dark,
}

impl Theme {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Reader font size in pixels, kept within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSize(u32);

impl FontSize {
    /// Smallest size.
    pub const MIN: u32 = 12;

    /// Largest size.
    pub const MAX: u32 = 32;

    /// Increment used by the zoom controls.
    pub const STEP: u32 = 2;

    /// Size used when nothing has been saved.
    pub const DEFAULT: u32 = 18;

    /// Create a font size, clamping into range.
    pub fn new(px: u32) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    /// Size in pixels.
    pub fn px(self) -> u32 {
        self.0
    }

    /// One step larger, capped at [`FontSize::MAX`].
    #[must_use]
    pub fn increased(self) -> Self {
        Self::new(self.0.saturating_add(Self::STEP))
    }

    /// One step smaller, floored at [`FontSize::MIN`].
    #[must_use]
    pub fn decreased(self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Theme and font size for the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderPreferences {
    /// Theme
    pub theme: Theme,

    /// Font size
    pub font_size: FontSize,
}

impl ReaderPreferences {
    /// Read saved preferences. Missing or unreadable values use defaults; any
    /// saved theme other than `dark` reads as light.
    pub fn load(storage: &impl PreferenceStorage) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .map(|saved| {
                if saved == Theme::Dark.as_str() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            })
            .unwrap_or_default();

        let font_size = storage
            .get(FONT_SIZE_KEY)
            .and_then(|saved| saved.trim().parse::<u32>().ok())
            .map(FontSize::new)
            .unwrap_or_default();

        Self { theme, font_size }
    }

    /// Write both preferences.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the storage backend fails.
    pub fn save(&self, storage: &mut impl PreferenceStorage) -> Result<(), StorageError> {
        storage.set(THEME_KEY, self.theme.as_str())?;
        storage.set(FONT_SIZE_KEY, &self.font_size.px().to_string())?;

        Ok(())
    }
}

/// Reader display settings bound to their storage.
///
/// Preferences are read once when mounted and written back after every change.
#[derive(Debug)]
pub struct ReaderDisplay<S> {
    preferences: ReaderPreferences,
    storage: S,
}

impl<S: PreferenceStorage> ReaderDisplay<S> {
    /// Load preferences from `storage`.
    pub fn mount(storage: S) -> Self {
        let preferences = ReaderPreferences::load(&storage);

        debug!(
            theme = %preferences.theme,
            font_size = preferences.font_size.px(),
            "mounted reader display"
        );

        Self {
            preferences,
            storage,
        }
    }

    /// Current preferences.
    pub fn preferences(&self) -> ReaderPreferences {
        self.preferences
    }

    /// Switch between light and dark.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if saving fails; the change is kept in memory.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.update(|prefs| prefs.theme = prefs.theme.toggled())?;

        Ok(self.preferences.theme)
    }

    /// Set the theme.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if saving fails; the change is kept in memory.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.update(|prefs| prefs.theme = theme)
    }

    /// Increase the font size by one step.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if saving fails; the change is kept in memory.
    pub fn increase_font(&mut self) -> Result<FontSize, StorageError> {
        self.update(|prefs| prefs.font_size = prefs.font_size.increased())?;

        Ok(self.preferences.font_size)
    }

    /// Decrease the font size by one step.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if saving fails; the change is kept in memory.
    pub fn decrease_font(&mut self) -> Result<FontSize, StorageError> {
        self.update(|prefs| prefs.font_size = prefs.font_size.decreased())?;

        Ok(self.preferences.font_size)
    }

    /// Give back the storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn update(&mut self, change: impl FnOnce(&mut ReaderPreferences)) -> Result<(), StorageError> {
        change(&mut self.preferences);

        self.preferences.save(&mut self.storage)
    }
}
