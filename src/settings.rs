//! Appearance preferences
//!
//! Persisted separately from app data, as a raw `light` / `dark` token.

use serde::{Deserialize, Serialize};

use crate::consts::THEME_KEY;
use crate::persistence::Storage;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Current theme plus the storage it is mirrored to
#[derive(Debug, Clone)]
pub struct ThemePreference {
    theme: Theme,
    storage: Storage,
}

impl ThemePreference {
    /// Stored token wins; otherwise follow the system hint; otherwise light
    pub fn load(storage: Storage, prefers_dark: bool) -> Self {
        let stored = storage.load_token(THEME_KEY);
        let theme = match stored.as_deref().and_then(Theme::from_str) {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        };
        log::info!("Using {} theme", theme.as_str());
        Self { theme, storage }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.storage.save_token(THEME_KEY, theme.as_str());
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }
}

/// `prefers-color-scheme: dark` media query (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn system_prefers_dark() -> bool {
    false
}
