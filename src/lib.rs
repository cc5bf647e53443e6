// SPDX-License-Identifier: MPL-2.0
//! `iced_player` is a media playback controller built with the Iced GUI framework.
//!
//! It keeps one playback session in sync with a pluggable playback engine,
//! renders an auto-hiding controls surface (seek bar with hover preview,
//! volume, speed and quality menus, captions, fullscreen), and localizes
//! every label with Fluent.
//!
//! The windowless core lives in [`video_player`]; [`ui`] and [`app`] wire it
//! into an Iced application.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
