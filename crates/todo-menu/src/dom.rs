//! Host page contract: element queries and document listeners

use std::rc::Rc;

use crate::error::MenuError;
use crate::geometry::{Point, Position, Rect, Size};

/// Attribute naming the menu's sub-elements inside the container
pub const TARGET_ATTRIBUTE: &str = "data-menu-target";
/// Attribute holding a table row's todo identifier
pub const ROW_ID_ATTRIBUTE: &str = "data-todo-id";

pub const MENU_TARGET: &str = "menu";
pub const SHOW_TARGET: &str = "show";
pub const EDIT_TARGET: &str = "edit";
pub const DELETE_TARGET: &str = "delete";

/// Element operations the widget needs from the page.
///
/// Mutations take `&self`: elements are shared handles, as in the browser.
pub trait MenuDom {
    type Element: Clone + PartialEq + 'static;

    /// Descendant of `container` whose `data-menu-target` equals `name`
    fn find_target(&self, container: &Self::Element, name: &str) -> Option<Self::Element>;

    fn viewport(&self) -> Size;

    fn is_hidden(&self, element: &Self::Element) -> bool;

    fn set_hidden(&self, element: &Self::Element, hidden: bool);

    /// Laid-out size. Hidden elements report zero.
    fn rendered_size(&self, element: &Self::Element) -> Size;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn move_to(&self, element: &Self::Element, position: Position);

    fn set_href(&self, element: &Self::Element, href: &str);

    /// True for an anchor or anything nested inside one
    fn is_link(&self, element: &Self::Element) -> bool;

    /// True when `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;
}

/// A pointer click as seen by a document-level listener
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent<E> {
    pub point: Point,
    pub target: Option<E>,
}

impl<E> ClickEvent<E> {
    pub fn new(point: Point, target: Option<E>) -> Self {
        Self { point, target }
    }
}

/// Token returned on registration; removing with it removes exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

pub type ClickListener<E> = Rc<dyn Fn(&ClickEvent<E>)>;

/// Document-wide click registration
pub trait EventTarget<E> {
    /// Fails with [`MenuError::Listener`] when the host refuses the registration
    fn add_click_listener(&self, listener: ClickListener<E>) -> Result<ListenerId, MenuError>;

    /// `false` when `id` was not registered
    fn remove_click_listener(&self, id: ListenerId) -> bool;
}
