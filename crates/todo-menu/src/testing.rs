//! In-memory page used by the widget tests

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::{ClickEvent, ClickListener, EventTarget, ListenerId, MenuDom};
use crate::error::MenuError;
use crate::geometry::{Point, Position, Rect, Size};

pub type NodeId = usize;

#[derive(Default)]
struct Node {
    tag: &'static str,
    parent: Option<NodeId>,
    target: Option<&'static str>,
    hidden: bool,
    hidden_history: Vec<bool>,
    natural: Size,
    per_visible_child: f64,
    position: Position,
    href: Option<String>,
}

struct Tree {
    nodes: Vec<Node>,
    viewport: Size,
}

/// Element tree with just enough layout: a node's height grows by a fixed
/// amount per visible child, and hidden nodes measure zero.
#[derive(Clone)]
pub struct FakeDom {
    tree: Rc<RefCell<Tree>>,
}

impl FakeDom {
    pub fn new(viewport: Size) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree { nodes: Vec::new(), viewport })),
        }
    }

    pub fn element(&self, tag: &'static str, parent: Option<NodeId>, target: Option<&'static str>) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node {
            tag,
            parent,
            target,
            ..Default::default()
        });
        tree.nodes.len() - 1
    }

    pub fn set_natural_size(&self, id: NodeId, size: Size) {
        self.tree.borrow_mut().nodes[id].natural = size;
    }

    pub fn set_size_per_visible_child(&self, id: NodeId, height: f64) {
        self.tree.borrow_mut().nodes[id].per_visible_child = height;
    }

    pub fn href(&self, id: NodeId) -> Option<String> {
        self.tree.borrow().nodes[id].href.clone()
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.tree.borrow().nodes[id].position
    }

    /// Every value written through `set_hidden`, in order
    pub fn hidden_history(&self, id: NodeId) -> Vec<bool> {
        self.tree.borrow().nodes[id].hidden_history.clone()
    }

    fn is_descendant(tree: &Tree, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match tree.nodes[node].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

impl MenuDom for FakeDom {
    type Element = NodeId;

    fn find_target(&self, container: &NodeId, name: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len()).find(|&id| {
            id != *container
                && tree.nodes[id].target == Some(name)
                && Self::is_descendant(&tree, *container, id)
        })
    }

    fn viewport(&self) -> Size {
        self.tree.borrow().viewport
    }

    fn is_hidden(&self, element: &NodeId) -> bool {
        self.tree.borrow().nodes[*element].hidden
    }

    fn set_hidden(&self, element: &NodeId, hidden: bool) {
        let mut tree = self.tree.borrow_mut();
        let node = &mut tree.nodes[*element];
        node.hidden = hidden;
        node.hidden_history.push(hidden);
    }

    fn rendered_size(&self, element: &NodeId) -> Size {
        let tree = self.tree.borrow();
        let node = &tree.nodes[*element];
        if node.hidden {
            return Size::default();
        }
        let visible_children = tree
            .nodes
            .iter()
            .filter(|n| n.parent == Some(*element) && !n.hidden)
            .count();
        Size::new(
            node.natural.width,
            node.natural.height + node.per_visible_child * visible_children as f64,
        )
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let size = self.rendered_size(element);
        let position = self.position(*element);
        Rect::new(position.left, position.top, size.width, size.height)
    }

    fn move_to(&self, element: &NodeId, position: Position) {
        self.tree.borrow_mut().nodes[*element].position = position;
    }

    fn set_href(&self, element: &NodeId, href: &str) {
        self.tree.borrow_mut().nodes[*element].href = Some(href.to_string());
    }

    fn is_link(&self, element: &NodeId) -> bool {
        let tree = self.tree.borrow();
        let mut current = Some(*element);
        while let Some(id) = current {
            if tree.nodes[id].tag == "a" {
                return true;
            }
            current = tree.nodes[id].parent;
        }
        false
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        Self::is_descendant(&self.tree.borrow(), *ancestor, *node)
    }
}

/// Document stand-in that dispatches clicks to registered listeners
pub struct FakeDocument<E> {
    listeners: RefCell<BTreeMap<ListenerId, ClickListener<E>>>,
    next_id: RefCell<u64>,
    removed: RefCell<Vec<ListenerId>>,
    refuse: bool,
}

impl<E> FakeDocument<E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(BTreeMap::new()),
            next_id: RefCell::new(0),
            removed: RefCell::new(Vec::new()),
            refuse: false,
        }
    }

    /// Document that rejects every registration
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn click(&self, point: Point, target: Option<E>) {
        let event = ClickEvent::new(point, target);
        // Listeners may deregister while running
        let listeners: Vec<_> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn removed(&self) -> Vec<ListenerId> {
        self.removed.borrow().clone()
    }
}

impl<E> EventTarget<E> for FakeDocument<E> {
    fn add_click_listener(&self, listener: ClickListener<E>) -> Result<ListenerId, MenuError> {
        if self.refuse {
            return Err(MenuError::Listener("registration refused".to_string()));
        }
        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        let id = ListenerId(*next_id);
        self.listeners.borrow_mut().insert(id, listener);
        Ok(id)
    }

    fn remove_click_listener(&self, id: ListenerId) -> bool {
        let removed = self.listeners.borrow_mut().remove(&id).is_some();
        if removed {
            self.removed.borrow_mut().push(id);
        }
        removed
    }
}
