//! Browser binding over `web-sys`
//!
//! Page contract: a container element holding the todo table and the menu.
//! The menu (`data-menu-target="menu"`) is `position: fixed` and toggled with
//! the `hidden` attribute; rows carry `data-todo-id`.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::dom::{ClickEvent, ClickListener, EventTarget, ListenerId, MenuDom, ROW_ID_ATTRIBUTE, TARGET_ATTRIBUTE};
use crate::error::MenuError;
use crate::geometry::{Point, Position, Rect, Size};
use crate::widget::ContextMenu;

fn point_of(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn warn_on_err(result: Result<(), JsValue>, what: &str) {
    if let Err(e) = result {
        warn!("Context menu DOM write failed ({}): {:?}", what, e);
    }
}

#[derive(Clone)]
pub struct WebDom {
    window: web_sys::Window,
}

impl WebDom {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl MenuDom for WebDom {
    type Element = Element;

    fn find_target(&self, container: &Element, name: &str) -> Option<Element> {
        let selector = format!("[{}=\"{}\"]", TARGET_ATTRIBUTE, name);
        container.query_selector(&selector).ok().flatten()
    }

    fn viewport(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Size::new(width, height)
    }

    fn is_hidden(&self, element: &Element) -> bool {
        element.has_attribute("hidden")
    }

    fn set_hidden(&self, element: &Element, hidden: bool) {
        if hidden {
            warn_on_err(element.set_attribute("hidden", ""), "set hidden");
        } else {
            warn_on_err(element.remove_attribute("hidden"), "remove hidden");
        }
    }

    fn rendered_size(&self, element: &Element) -> Size {
        let rect = element.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn move_to(&self, element: &Element, position: Position) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let style = html.style();
            warn_on_err(style.set_property("left", &format!("{}px", position.left)), "left");
            warn_on_err(style.set_property("top", &format!("{}px", position.top)), "top");
        }
    }

    fn set_href(&self, element: &Element, href: &str) {
        warn_on_err(element.set_attribute("href", href), "href");
    }

    fn is_link(&self, element: &Element) -> bool {
        matches!(element.closest("a"), Ok(Some(_)))
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }
}

/// Document click registry. Each listener keeps the exact closure it was
/// registered with so removal can hand the same function back to the browser.
pub struct WebDocument {
    document: web_sys::Document,
    closures: RefCell<BTreeMap<ListenerId, Closure<dyn FnMut(MouseEvent)>>>,
    next_id: Cell<u64>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            closures: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
        }
    }
}

impl EventTarget<Element> for WebDocument {
    fn add_click_listener(&self, listener: ClickListener<Element>) -> Result<ListenerId, MenuError> {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
            listener(&ClickEvent::new(point_of(&ev), target));
        });
        self.document
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| MenuError::Listener(format!("{:?}", e)))?;

        let id = ListenerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.closures.borrow_mut().insert(id, closure);
        Ok(id)
    }

    fn remove_click_listener(&self, id: ListenerId) -> bool {
        match self.closures.borrow_mut().remove(&id) {
            Some(closure) => {
                warn_on_err(
                    self.document
                        .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref()),
                    "remove click listener",
                );
                true
            }
            None => false,
        }
    }
}

/// JS entry point: `new TodoContextMenu("todo-table")`
#[wasm_bindgen]
pub struct TodoContextMenu {
    menu: Rc<RefCell<ContextMenu<WebDom>>>,
    container: Element,
    on_context_menu: Option<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl TodoContextMenu {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<TodoContextMenu, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", container_id)))?;

        let mut menu = ContextMenu::new(WebDom::new(window), &container)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        menu.attach(Rc::new(WebDocument::new(document)))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let menu = Rc::new(RefCell::new(menu));

        let handle = menu.clone();
        let on_context_menu = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let row_id = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&format!("[{}]", ROW_ID_ATTRIBUTE)).ok().flatten())
                .and_then(|row| row.get_attribute(ROW_ID_ATTRIBUTE));
            if handle.borrow().open(point_of(&ev), row_id.as_deref()) {
                ev.prevent_default();
            }
        });
        container.add_event_listener_with_callback("contextmenu", on_context_menu.as_ref().unchecked_ref())?;

        Ok(TodoContextMenu {
            menu,
            container,
            on_context_menu: Some(on_context_menu),
        })
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.menu.borrow().is_visible()
    }

    /// Remove both the row trigger and the document click listener.
    pub fn detach(&mut self) {
        if let Some(closure) = self.on_context_menu.take() {
            warn_on_err(
                self.container
                    .remove_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref()),
                "remove contextmenu listener",
            );
        }
        self.menu.borrow_mut().detach();
    }
}

impl Drop for TodoContextMenu {
    fn drop(&mut self) {
        self.detach();
    }
}
