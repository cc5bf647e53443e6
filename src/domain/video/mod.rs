// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects and enums that are
//! independent of any presentation or engine concerns.

pub mod newtypes;

pub use newtypes::{PlaybackRate, PlayedFraction, Quality, SeekStep, UnknownQuality, Volume};
