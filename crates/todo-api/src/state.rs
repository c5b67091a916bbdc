use std::sync::Arc;

use todo_core::services::TodoService;
use todo_shared::config::AppConfig;

use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub views: Arc<Views>,
    pub config: AppConfig,
}
