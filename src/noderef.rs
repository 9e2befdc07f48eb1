use std::{
    cell::{BorrowError, Ref, RefCell, RefMut},
    ops::Deref,
    rc::{Rc, Weak},
};

use crate::{
    display::TreeDisplay,
    iterator::{IterNode, NodeRefIter},
    node::Node,
    NodeId,
};

/// Shared handle to a [`Node`], wrapping it in `Rc<RefCell>` for interior
/// mutability. Cloning the handle shares the node; handle identity is
/// compared with [`NodeRef::ptr_eq`].
pub struct NodeRef<D> {
    node_ref: Rc<RefCell<Node<D>>>,
}

impl<D> NodeRef<D> {
    pub fn new(node: Node<D>) -> Self {
        Self {
            node_ref: Rc::new(RefCell::new(node)),
        }
    }

    /// Get a reference to the inner node
    pub fn node(&self) -> Ref<'_, Node<D>> {
        (*self.node_ref).borrow()
    }

    pub fn try_node(&self) -> Result<Ref<'_, Node<D>>, BorrowError> {
        self.node_ref.try_borrow()
    }

    /// Get a mutable reference to the inner node
    pub fn node_mut(&self) -> RefMut<'_, Node<D>> {
        (*self.node_ref).borrow_mut()
    }

    /// The node's identifier
    pub fn id(&self) -> NodeId {
        self.node().id().clone()
    }

    /// Calls the provided closure with the node's payload slot
    pub fn with_data<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(Option<&Rc<D>>) -> Result<R, E>,
    {
        let node = self.node();
        f(node.data())
    }

    /// True if both handles point at the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node_ref, &other.node_ref)
    }

    pub fn downgrade(&self) -> WeakNodeRef<D> {
        WeakNodeRef {
            node_ref: Rc::downgrade(&self.node_ref),
        }
    }

    /// Calls the provided closure for each node in the subtree.
    /// Includes depth of the node in the first parameter of the closure
    pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, Self) -> Result<(), E>,
    {
        for node in self.clone().into_iter() {
            f(node.depth(), (*node).clone())?;
        }
        Ok(())
    }
}

impl<D> Clone for NodeRef<D> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}

impl<D> std::fmt::Display for NodeRef<D>
where
    D: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreeDisplay::format(self, f)
    }
}

impl<D> std::fmt::Debug for NodeRef<D>
where
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("node", &self.try_node())
            .finish()
    }
}

impl<D> Deref for NodeRef<D> {
    type Target = RefCell<Node<D>>;

    fn deref(&self) -> &Self::Target {
        &*self.node_ref
    }
}

impl<D> IntoIterator for NodeRef<D> {
    type Item = IterNode<D>;
    type IntoIter = NodeRefIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        // Create an iterator starting with this node in the stack
        NodeRefIter::new(self)
    }
}

impl<'a, D> IntoIterator for &'a NodeRef<D> {
    type Item = IterNode<D>;
    type IntoIter = NodeRefIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        NodeRefIter::new(self.clone())
    }
}

/// Non-owning handle used for parent back-links, so that dropping a tree
/// tears down the child edges without the back-link keeping nodes alive.
pub struct WeakNodeRef<D> {
    node_ref: Weak<RefCell<Node<D>>>,
}

impl<D> WeakNodeRef<D> {
    pub fn upgrade(&self) -> Option<NodeRef<D>> {
        self.node_ref.upgrade().map(|node_ref| NodeRef { node_ref })
    }
}

impl<D> Clone for WeakNodeRef<D> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}
