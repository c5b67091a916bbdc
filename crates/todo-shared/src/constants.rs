//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_TITLE_LENGTH: u64 = 255;
pub const TODOS_PATH: &str = "/todos";
pub const DEFAULT_LOG_FILTER: &str = "info,todo_server=debug,todo_api=debug";
