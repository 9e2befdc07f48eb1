use std::rc::Rc;

use crate::NodeId;

/// Nested mapping form of a subtree, produced by
/// [`Tree::export`](crate::Tree::export) and consumed by
/// [`Tree::load`](crate::Tree::load).
///
/// Mirrors the wire contract of each node mapping: a required `id`, an
/// optional opaque `data` payload, and an ordered `children` list where
/// an empty list is equivalent to the key being absent. The payload is
/// held behind an [`Rc`] and passed through by reference, so this is an
/// in-memory transform rather than a serialization; a payload with no
/// serializable form round-trips untouched.
pub struct NodeMapping<D> {
    id: NodeId,
    data: Option<Rc<D>>,
    children: Vec<NodeMapping<D>>,
}

impl<D> NodeMapping<D> {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            data: None,
            children: Vec::new(),
        }
    }

    pub fn with_data(self, data: D) -> Self {
        self.with_data_shared(Rc::new(data))
    }

    pub fn with_data_shared(mut self, data: Rc<D>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_child(mut self, child: NodeMapping<D>) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn data(&self) -> Option<&Rc<D>> {
        self.data.as_ref()
    }

    pub fn children(&self) -> &[NodeMapping<D>] {
        &self.children
    }

    pub(crate) fn into_parts(self) -> (NodeId, Option<Rc<D>>, Vec<NodeMapping<D>>) {
        (self.id, self.data, self.children)
    }
}

impl<D> Clone for NodeMapping<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            data: self.data.clone(),
            children: self.children.clone(),
        }
    }
}

impl<D> PartialEq for NodeMapping<D>
where
    D: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data.as_deref() == other.data.as_deref()
            && self.children == other.children
    }
}

impl<D> Eq for NodeMapping<D> where D: Eq {}

impl<D> std::fmt::Debug for NodeMapping<D>
where
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("NodeMapping");
        s.field("id", &self.id);
        if let Some(data) = &self.data {
            s.field("data", data);
        }
        if !self.children.is_empty() {
            s.field("children", &self.children);
        }
        s.finish()
    }
}
