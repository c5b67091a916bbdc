// ============================================================================
// Todo API - HTML Views
// File: crates/todo-api/src/views.rs
// Description: Handlebars registry and the view models the pages render
// ============================================================================

use handlebars::Handlebars;
use serde::Serialize;

use todo_core::domain::{Todo, TodoDraft, TodoPage};
use todo_shared::constants::{MAX_TITLE_LENGTH, TODOS_PATH};

use crate::error::ApiError;

const HEADER: &str = include_str!("../templates/header.hbs");
const FOOTER: &str = include_str!("../templates/footer.hbs");
const INDEX: &str = include_str!("../templates/index.hbs");
const SHOW: &str = include_str!("../templates/show.hbs");
const FORM: &str = include_str!("../templates/form.hbs");

/// Todo as the templates see it: NULL columns render as empty strings
#[derive(Debug, Serialize)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub path: String,
    pub edit_path: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone().unwrap_or_default(),
            description: todo.description.clone().unwrap_or_default(),
            done: todo.is_done(),
            path: todo.path(),
            edit_path: todo.edit_path(),
            created_at: todo.created_at.format("%Y-%m-%d %H:%M").to_string(),
            updated_at: todo.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    app_name: &'a str,
    todos: Vec<TodoRow>,
    total: u64,
    page: u32,
    total_pages: u64,
    prev_page: Option<u32>,
    next_page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ShowPage<'a> {
    app_name: &'a str,
    todo: TodoRow,
}

/// New and edit forms share one template
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub heading: String,
    pub action: String,
    /// Value of the hidden `_method` field, if any
    pub method: Option<&'static str>,
    pub submit_label: &'static str,
    pub cancel_path: String,
    pub title: String,
    pub description: String,
    pub done: bool,
    pub error: Option<String>,
}

impl FormPage {
    pub fn new_todo() -> Self {
        Self {
            heading: "New todo".to_string(),
            action: TODOS_PATH.to_string(),
            method: None,
            submit_label: "Create",
            cancel_path: TODOS_PATH.to_string(),
            title: String::new(),
            description: String::new(),
            done: false,
            error: None,
        }
    }

    pub fn edit_todo(todo: &Todo) -> Self {
        Self {
            heading: format!("Edit todo #{}", todo.id),
            action: todo.path(),
            method: Some("put"),
            submit_label: "Update",
            cancel_path: todo.path(),
            title: todo.title.clone().unwrap_or_default(),
            description: todo.description.clone().unwrap_or_default(),
            done: todo.is_done(),
            error: None,
        }
    }

    /// Re-fill the form with what was submitted, plus the rejection message
    pub fn with_submission(mut self, draft: &TodoDraft, error: impl Into<String>) -> Self {
        self.title = draft.title.clone().unwrap_or_default();
        self.description = draft.description.clone().unwrap_or_default();
        self.done = draft.done.unwrap_or(false);
        self.error = Some(error.into());
        self
    }
}

#[derive(Serialize)]
struct FormContext<'a> {
    app_name: &'a str,
    title_max_length: u64,
    #[serde(flatten)]
    form: &'a FormPage,
}

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ApiError> {
        let mut registry = Handlebars::new();

        registry
            .register_partial("header", HEADER)
            .map_err(|e| ApiError::InternalError(format!("header template: {}", e)))?;
        registry
            .register_partial("footer", FOOTER)
            .map_err(|e| ApiError::InternalError(format!("footer template: {}", e)))?;

        for (name, source) in [("index", INDEX), ("show", SHOW), ("form", FORM)] {
            registry
                .register_template_string(name, source)
                .map_err(|e| ApiError::InternalError(format!("{} template: {}", name, e)))?;
        }

        Ok(Self { registry })
    }

    pub fn index(&self, app_name: &str, page: &TodoPage) -> Result<String, ApiError> {
        let total_pages = page.total_pages();
        let current = u64::from(page.page);
        let context = IndexPage {
            app_name,
            todos: page.items.iter().map(TodoRow::from).collect(),
            total: page.total,
            page: page.page,
            total_pages,
            prev_page: (page.page > 1).then(|| page.page - 1),
            next_page: (current < total_pages).then(|| page.page + 1),
        };
        self.render("index", &context)
    }

    pub fn show(&self, app_name: &str, todo: &Todo) -> Result<String, ApiError> {
        self.render(
            "show",
            &ShowPage {
                app_name,
                todo: TodoRow::from(todo),
            },
        )
    }

    pub fn form(&self, app_name: &str, form: &FormPage) -> Result<String, ApiError> {
        self.render(
            "form",
            &FormContext {
                app_name,
                title_max_length: MAX_TITLE_LENGTH,
                form,
            },
        )
    }

    fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, ApiError> {
        self.registry
            .render(name, context)
            .map_err(|e| ApiError::InternalError(format!("render {}: {}", name, e)))
    }
}
