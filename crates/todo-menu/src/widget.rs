// ============================================================================
// Todo Menu - Context Menu Widget
// File: crates/todo-menu/src/widget.rs
// ============================================================================
//! Row context menu: open at the pointer, clamp into the viewport, close on
//! any outside click.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::dom::{
    ClickEvent, ClickListener, EventTarget, ListenerId, MenuDom, MENU_TARGET,
};
use crate::error::MenuError;
use crate::geometry::{place_within, Point, Size};
use crate::state::{valid_row_id, Action, MenuState};

/// Link target while no row is selected
const DETACHED_HREF: &str = "#";

/// Sub-elements resolved once at construction
struct Targets<E> {
    menu: E,
    show: E,
    edit: E,
    delete: E,
}

impl<E> Targets<E> {
    fn link(&self, action: Action) -> &E {
        match action {
            Action::Show => &self.show,
            Action::Edit => &self.edit,
            Action::Delete => &self.delete,
        }
    }
}

fn resolve<D: MenuDom>(dom: &D, container: &D::Element) -> Result<Targets<D::Element>, MenuError> {
    let find = |name: &'static str| dom.find_target(container, name).ok_or(MenuError::MissingTarget(name));
    Ok(Targets {
        menu: find(MENU_TARGET)?,
        show: find(Action::Show.target_name())?,
        edit: find(Action::Edit.target_name())?,
        delete: find(Action::Delete.target_name())?,
    })
}

/// Un-hides an element for measurement and restores its hidden flag on drop.
struct Reveal<'a, D: MenuDom> {
    dom: &'a D,
    element: &'a D::Element,
    was_hidden: bool,
}

impl<'a, D: MenuDom> Reveal<'a, D> {
    fn new(dom: &'a D, element: &'a D::Element) -> Self {
        let was_hidden = dom.is_hidden(element);
        if was_hidden {
            dom.set_hidden(element, false);
        }
        Self { dom, element, was_hidden }
    }

    fn size(&self) -> Size {
        self.dom.rendered_size(self.element)
    }
}

impl<D: MenuDom> Drop for Reveal<'_, D> {
    fn drop(&mut self) {
        if self.was_hidden {
            self.dom.set_hidden(self.element, true);
        }
    }
}

struct Inner<D: MenuDom> {
    dom: D,
    targets: Targets<D::Element>,
    state: MenuState,
}

impl<D: MenuDom> Inner<D> {
    fn open(&mut self, at: Point, row_id: Option<&str>) {
        let row_id = valid_row_id(row_id);

        // Link visibility first: it changes the menu's size.
        for action in Action::ALL {
            let link = self.targets.link(action);
            match row_id {
                Some(id) => {
                    self.dom.set_href(link, &action.href(id));
                    self.dom.set_hidden(link, false);
                }
                None => {
                    self.dom.set_href(link, DETACHED_HREF);
                    self.dom.set_hidden(link, true);
                }
            }
        }

        let size = Reveal::new(&self.dom, &self.targets.menu).size();
        let position = place_within(at, size, self.dom.viewport());

        self.dom.move_to(&self.targets.menu, position);
        self.dom.set_hidden(&self.targets.menu, false);
        self.state.show(row_id.map(str::to_owned), position);

        debug!(
            "Context menu opened for row {:?} at ({}, {})",
            row_id, position.left, position.top
        );
    }

    fn close(&mut self) -> bool {
        if !self.state.hide() {
            return false;
        }
        self.dom.set_hidden(&self.targets.menu, true);
        debug!("Context menu closed");
        true
    }

    fn should_close(&self, event: &ClickEvent<D::Element>) -> bool {
        let menu = &self.targets.menu;
        if !self.dom.bounding_rect(menu).contains(event.point) {
            return true;
        }
        match &event.target {
            Some(target) if target == menu => true,
            Some(target) => self.dom.is_link(target) && self.dom.contains(menu, target),
            None => false,
        }
    }

    fn handle_document_click(&mut self, event: &ClickEvent<D::Element>) -> bool {
        if !self.state.is_visible() || !self.should_close(event) {
            return false;
        }
        self.close()
    }
}

/// Listener registration; removes the listener it registered when dropped.
struct Registration<E> {
    document: Rc<dyn EventTarget<E>>,
    id: ListenerId,
}

impl<E> Drop for Registration<E> {
    fn drop(&mut self) {
        if !self.document.remove_click_listener(self.id) {
            warn!("Click listener {:?} was already removed", self.id);
        }
    }
}

/// Context menu bound to one container element.
///
/// Actions only run while attached: a detached widget neither opens nor
/// reacts to document clicks.
pub struct ContextMenu<D: MenuDom + 'static> {
    inner: Rc<RefCell<Inner<D>>>,
    registration: Option<Registration<D::Element>>,
}

impl<D: MenuDom + 'static> ContextMenu<D> {
    /// Resolve the `menu`, `show`, `edit` and `delete` targets under `container`.
    pub fn new(dom: D, container: &D::Element) -> Result<Self, MenuError> {
        let targets = resolve(&dom, container)?;
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                dom,
                targets,
                state: MenuState::default(),
            })),
            registration: None,
        })
    }

    /// Register the document-wide click listener.
    pub fn attach<T>(&mut self, document: Rc<T>) -> Result<(), MenuError>
    where
        T: EventTarget<D::Element> + 'static,
    {
        if self.registration.is_some() {
            return Err(MenuError::AlreadyAttached);
        }

        let weak = Rc::downgrade(&self.inner);
        let listener: ClickListener<D::Element> = Rc::new(move |event: &ClickEvent<D::Element>| {
            let Some(inner) = weak.upgrade() else { return };
            match inner.try_borrow_mut() {
                Ok(mut inner) => {
                    inner.handle_document_click(event);
                }
                Err(_) => warn!("Context menu busy, click ignored"),
            };
        });

        let id = document.add_click_listener(listener)?;
        debug!("Context menu attached with listener {:?}", id);
        self.registration = Some(Registration { document, id });
        Ok(())
    }

    /// Remove the listener registered by `attach`. No-op when detached.
    pub fn detach(&mut self) {
        if let Some(registration) = self.registration.take() {
            debug!("Context menu detached from listener {:?}", registration.id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_some()
    }

    /// Open at `at` for the clicked row's `data-todo-id`.
    ///
    /// Without a usable id the menu still opens, with its action links hidden.
    /// Returns `false` when the widget is detached.
    pub fn open(&self, at: Point, row_id: Option<&str>) -> bool {
        if !self.is_attached() {
            debug!("Context menu detached, open ignored");
            return false;
        }
        self.inner.borrow_mut().open(at, row_id);
        true
    }

    /// Hide the menu. Returns whether it was shown.
    pub fn close(&self) -> bool {
        self.inner.borrow_mut().close()
    }

    pub fn state(&self) -> MenuState {
        self.inner.borrow().state.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().state.is_visible()
    }
}
