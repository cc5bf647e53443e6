// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with no dependencies outside `std`.
//!
//! # Modules
//!
//! - [`ui`]: UI value objects ([`HideDelay`](ui::HideDelay))
//! - [`video`]: Playback value objects ([`Volume`](video::Volume),
//!   [`PlaybackRate`](video::PlaybackRate), [`Quality`](video::Quality),
//!   [`PlayedFraction`](video::PlayedFraction), [`SeekStep`](video::SeekStep))

pub mod ui;
pub mod video;
