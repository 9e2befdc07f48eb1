use std::collections::HashMap;

use crate::{
    error::{TreeError, TreeResult},
    noderef::NodeRef,
    NodeId,
};

pub trait TreeIndex<D> {
    fn new() -> Self;
    fn from_node(root: &NodeRef<D>) -> TreeResult<Self>
    where
        Self: Sized;
    fn insert(&mut self, id: NodeId, node: NodeRef<D>) -> Option<NodeRef<D>>;
    fn remove(&mut self, id: &str) -> Option<NodeRef<D>>;
    fn get(&self, id: &str) -> Option<&NodeRef<D>>;
    fn contains(&self, id: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-backed id index giving O(1) average lookup of any reachable node
pub struct HashIndex<D> {
    index: HashMap<NodeId, NodeRef<D>>,
}

impl<D> TreeIndex<D> for HashIndex<D> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Index every node reachable from `root`. Fails with
    /// [`TreeError::DuplicateId`] if the subtree repeats an id.
    fn from_node(root: &NodeRef<D>) -> TreeResult<Self> {
        let mut index = Self::new();

        for node in root.into_iter() {
            let id = node.id();
            if index.insert(id.clone(), (*node).clone()).is_some() {
                return Err(TreeError::DuplicateId(id));
            }
        }

        Ok(index)
    }

    fn insert(&mut self, id: NodeId, node: NodeRef<D>) -> Option<NodeRef<D>> {
        self.index.insert(id, node)
    }

    fn remove(&mut self, id: &str) -> Option<NodeRef<D>> {
        self.index.remove(id)
    }

    fn get(&self, id: &str) -> Option<&NodeRef<D>> {
        self.index.get(id)
    }

    fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

impl<D> std::fmt::Debug for HashIndex<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashIndex")
            .field("ids", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::Node, noderef::NodeRef, NodeMapping, Tree, TreeError};

    use super::{HashIndex, TreeIndex};

    #[test]
    fn from_node_indexes_whole_subtree() {
        let mapping = NodeMapping::<()>::new("r")
            .with_child(NodeMapping::new("a").with_child(NodeMapping::new("a1")))
            .with_child(NodeMapping::new("b"));
        let tree = Tree::load(mapping).unwrap();

        let index = HashIndex::from_node(&tree.root()).unwrap();
        assert_eq!(index.len(), 4);
        assert!(index.contains("a1"));
        assert!(!index.contains("missing"));
    }

    #[test]
    fn insert_returns_previous_entry_on_collision() {
        let a = NodeRef::new(Node::<()>::new("dup", None));
        let b = NodeRef::new(Node::<()>::new("dup", None));

        let mut index = HashIndex::new();
        assert!(index.insert("dup".into(), a).is_none());
        assert!(index.insert("dup".into(), b).is_some());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_forgets_the_node() {
        let root = NodeRef::new(Node::<()>::new("r", None));
        let mut index = HashIndex::from_node(&root).unwrap();
        assert!(index.remove("r").is_some());
        assert!(index.is_empty());
    }

    #[test]
    fn duplicate_subtree_surfaces_as_error() {
        let mapping = NodeMapping::<()>::new("r")
            .with_child(NodeMapping::new("x"))
            .with_child(NodeMapping::new("x"));

        match Tree::load(mapping) {
            Err(TreeError::DuplicateId(id)) => assert_eq!(id, "x"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }
}
