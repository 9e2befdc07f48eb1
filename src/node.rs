use std::rc::Rc;

use tracing::debug;

use crate::{
    noderef::{NodeRef, WeakNodeRef},
    IdGenerator, NodeId, UniqueGenerator as _,
};

/// A single tree vertex.
///
/// Holds an identifier, an optional opaque payload, the ordered list of
/// owned children, and a non-owning back-reference to the parent. The
/// payload is shared behind an [`Rc`] so that a value placed in the tree
/// through [`Tree::load`](crate::Tree::load) is handed back by
/// [`Tree::export`](crate::Tree::export) as the identical object, never a
/// copy. Structural mutation happens only through
/// [`Tree`](crate::Tree); `Node` itself exposes its links for reading.
pub struct Node<D> {
    id: NodeId,
    data: Option<Rc<D>>,
    children: Vec<NodeRef<D>>,
    // Weak to avoid an ownership cycle with the child list. None only for the root.
    parent: Option<WeakNodeRef<D>>,
}

impl<D> Node<D> {
    pub fn new(id: impl Into<NodeId>, data: Option<Rc<D>>) -> Self {
        let id = id.into();
        debug!("Created node {}", id);

        Node {
            id,
            data,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Create an unattached node with a freshly generated id.
    pub fn generate(data: Option<Rc<D>>) -> Self {
        Self::new(IdGenerator::default().generate(), data)
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn data(&self) -> Option<&Rc<D>> {
        self.data.as_ref()
    }

    /// Replace the payload. The tree never touches this slot itself.
    pub fn set_data(&mut self, data: Option<Rc<D>>) {
        self.data = data;
    }

    pub fn children(&self) -> &[NodeRef<D>] {
        &self.children
    }

    /// Return the number of child nodes for this node
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Upgrade the parent back-link, if this node has one.
    pub fn parent(&self) -> Option<NodeRef<D>> {
        self.parent.as_ref().and_then(WeakNodeRef::upgrade)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WeakNodeRef<D>>) {
        self.parent = parent;
    }

    /// Append a child, preserving insertion order of existing siblings
    pub(crate) fn push_child(&mut self, node: NodeRef<D>) {
        self.children.push(node);
    }

    /// Remove a child by handle identity, returning the index it held
    pub(crate) fn remove_child(&mut self, node: &NodeRef<D>) -> Option<usize> {
        let index = self.children.iter().position(|child| child.ptr_eq(node))?;
        self.children.remove(index);
        Some(index)
    }
}

impl<D> std::fmt::Debug for Node<D>
where
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("data", &self.data)
            .field(
                "parent_id",
                &format_args!("{:?}", self.parent().map(|p| p.id())),
            )
            .field(
                "child_ids",
                &format_args!(
                    "{:?}",
                    self.children.iter().map(|c| c.id()).collect::<Vec<_>>()
                ),
            )
            .finish()
    }
}
