// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[player]` - Playback defaults applied when a player mounts
//! - `[controls]` - Controls surface behavior (auto-hide delay)
//!
//! Nothing about a playback session itself is persisted; these are only the
//! defaults a new session starts from.
//!
//! # Examples
//!
//! ```no_run
//! use iced_player::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::ui::HideDelay;
use crate::domain::video::{Quality, SeekStep, Volume};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Playback defaults for newly mounted players.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Start playing as soon as the player mounts.
    #[serde(default = "default_autoplay", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Initial volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether the player starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Relative seek step in seconds (skip buttons, arrow keys).
    #[serde(
        default = "default_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub seek_step_secs: Option<f64>,

    /// Initial quality hint ("auto", "1080p", ... "144p").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Whether captions are requested when the player mounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<bool>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            volume: default_volume(),
            muted: Some(false),
            seek_step_secs: default_seek_step_secs(),
            quality: None,
            captions: Some(false),
        }
    }
}

impl PlayerConfig {
    /// Returns the configured volume, clamped to the valid range.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume.map_or_else(Volume::default, Volume::new)
    }

    /// Returns the configured seek step, clamped to the valid range.
    #[must_use]
    pub fn seek_step(&self) -> SeekStep {
        self.seek_step_secs.map_or_else(SeekStep::default, SeekStep::new)
    }

    /// Returns the configured quality hint.
    ///
    /// Unknown identifiers fall back to automatic selection.
    #[must_use]
    pub fn quality(&self) -> Quality {
        match self.quality.as_deref().map(str::parse::<Quality>) {
            Some(Ok(quality)) => quality,
            Some(Err(err)) => {
                log::warn!("{err}, falling back to auto");
                Quality::Auto
            }
            None => Quality::Auto,
        }
    }
}

/// Controls surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Inactivity delay before the controls hide during playback (seconds).
    #[serde(
        default = "default_hide_delay_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_delay_secs: Option<u32>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_secs: default_hide_delay_secs(),
        }
    }
}

impl ControlsConfig {
    /// Returns the configured hide delay, clamped to the valid range.
    #[must_use]
    pub fn hide_delay(&self) -> HideDelay {
        self.hide_delay_secs.map_or_else(HideDelay::default, HideDelay::new)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Playback defaults.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Controls surface settings.
    #[serde(default)]
    pub controls: ControlsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_autoplay() -> Option<bool> {
    Some(true)
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_SEEK_STEP_SECS)
}

fn default_hide_delay_secs() -> Option<u32> {
    Some(DEFAULT_HIDE_DELAY_SECS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("failed to load {}: {err}", path.display());
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
