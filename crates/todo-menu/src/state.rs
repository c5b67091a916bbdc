//! Menu state and action links

use crate::dom::{DELETE_TARGET, EDIT_TARGET, SHOW_TARGET};
use crate::geometry::Position;

const TODOS_PATH: &str = "/todos";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// Ephemeral per-widget state, rebuilt on every page load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuState {
    pub visibility: Visibility,
    pub target_row_id: Option<String>,
    pub position: Position,
}

impl MenuState {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// `Hidden -> Shown`, or `Shown -> Shown` when repositioning
    pub fn show(&mut self, row_id: Option<String>, position: Position) {
        self.visibility = Visibility::Shown;
        self.target_row_id = row_id;
        self.position = position;
    }

    /// Returns whether anything changed
    pub fn hide(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.visibility = Visibility::Hidden;
        true
    }
}

/// The three row actions offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Show, Action::Edit, Action::Delete];

    pub fn target_name(&self) -> &'static str {
        match self {
            Action::Show => SHOW_TARGET,
            Action::Edit => EDIT_TARGET,
            Action::Delete => DELETE_TARGET,
        }
    }

    /// Link target for a validated row id
    pub fn href(&self, row_id: &str) -> String {
        match self {
            Action::Show | Action::Delete => format!("{}/{}", TODOS_PATH, row_id),
            Action::Edit => format!("{}/{}/edit", TODOS_PATH, row_id),
        }
    }
}

/// A usable row id is one non-empty path segment of `[A-Za-z0-9_-]`.
pub fn valid_row_id(raw: Option<&str>) -> Option<&str> {
    let id = raw?.trim();
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ok.then_some(id)
}
