// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`player`] - Player screen with controls bar, seek bar, and menus
//! - [`fullscreen`] - Window fullscreen capability
//! - [`styles`] - Centralized styling (buttons, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod fullscreen;
pub mod player;
pub mod styles;
pub mod theming;
