// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the player chrome.

pub mod button;
pub mod overlay;
