// SPDX-License-Identifier: MPL-2.0
//! Player screen: the media surface, the controls bar, and its menus.
//!
//! [`State`] wraps a [`crate::video_player::Controller`] and turns its
//! effects into Iced tasks. Views are plain functions over the session.

pub mod component;
pub mod controls;
pub mod menus;
pub mod seek_bar;

pub use component::{Effect, Message, State, ViewContext};
pub use menus::MenuState;
