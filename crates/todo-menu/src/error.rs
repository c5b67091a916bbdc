use thiserror::Error;

/// Raised while wiring the widget to the page, never during event handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Missing menu target: data-menu-target=\"{0}\"")]
    MissingTarget(&'static str),

    #[error("Context menu is already attached")]
    AlreadyAttached,

    #[error("Failed to register click listener: {0}")]
    Listener(String),
}
