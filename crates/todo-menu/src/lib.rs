//! # Todo Menu
//!
//! Context menu for the todo table. Opening it on a row points the show,
//! edit and delete links at that todo and places the menu at the pointer,
//! clamped so it never overflows the viewport. Any click outside the menu,
//! on its background, or on one of its links closes it.
//!
//! The widget talks to the page through [`MenuDom`] and [`EventTarget`];
//! the `web` feature implements both over `web-sys`.

pub mod dom;
pub mod error;
pub mod geometry;
pub mod state;
pub mod widget;

#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
mod testing;

pub use dom::{ClickEvent, ClickListener, EventTarget, ListenerId, MenuDom};
pub use error::MenuError;
pub use geometry::{place_within, Point, Position, Rect, Size};
pub use state::{Action, MenuState, Visibility};
pub use widget::ContextMenu;
