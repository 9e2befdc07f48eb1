use tracing::debug;

use crate::{
    error::{TreeError, TreeResult},
    index::{HashIndex, TreeIndex},
    mapping::NodeMapping,
    node::Node,
    noderef::NodeRef,
};

/// Owning container for a connected, cycle-free node graph plus an id
/// index covering exactly the nodes reachable from the root.
///
/// All structural mutation goes through the tree so the index never
/// drifts from the graph: every mutating operation either fully succeeds
/// or leaves both untouched.
pub struct Tree<D> {
    root: NodeRef<D>,
    index: HashIndex<D>,
}

impl<D> Tree<D> {
    /// Create a tree around a payload-less root with a generated id.
    pub fn new() -> Self {
        let root = NodeRef::new(Node::generate(None));
        let mut index = HashIndex::new();
        index.insert(root.id(), root.clone());

        Self { root, index }
    }

    /// Wrap a pre-built node graph, indexing every node reachable from
    /// `root`. Fails with [`TreeError::DuplicateId`] if the graph repeats
    /// an id, before any `Tree` value exists.
    pub fn with_root(root: NodeRef<D>) -> TreeResult<Self> {
        let index = HashIndex::from_node(&root)?;
        root.node_mut().set_parent(None);

        debug!("Indexed tree of {} nodes at root {}", index.len(), root.id());

        Ok(Self { root, index })
    }

    pub fn root(&self) -> NodeRef<D> {
        self.root.clone()
    }

    pub fn root_ref(&self) -> &NodeRef<D> {
        &self.root
    }

    /// Number of reachable nodes, root included
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// O(1)-average lookup by id. Absence is a normal result, never an
    /// error.
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef<D>> {
        self.index.get(id).cloned()
    }

    /// Attach `node` (and its whole subtree) under `parent`, or under the
    /// root when no parent is given. Returns the attached node.
    ///
    /// Fails with [`TreeError::NotFound`] if `parent` is not a member of
    /// this tree, and with [`TreeError::DuplicateId`] if any id in the
    /// incoming subtree is already indexed or repeats within the subtree.
    /// A failed add leaves the tree exactly as it was.
    pub fn add(&mut self, node: NodeRef<D>, parent: Option<&NodeRef<D>>) -> TreeResult<NodeRef<D>> {
        let parent = match parent {
            Some(parent) => self.member(parent)?,
            None => self.root.clone(),
        };

        // Collect the incoming subtree up front so a collision anywhere
        // rejects the whole operation before any link changes.
        let mut incoming = Vec::new();
        for member in node.clone().into_iter() {
            let id = member.id();
            if self.index.contains(&id) || incoming.iter().any(|(seen, _)| *seen == id) {
                return Err(TreeError::DuplicateId(id));
            }
            incoming.push((id, (*member).clone()));
        }

        parent.node_mut().push_child(node.clone());
        node.node_mut().set_parent(Some(parent.downgrade()));

        debug!(
            "Attached {} node(s) at {} under parent {}",
            incoming.len(),
            node.id(),
            parent.id()
        );

        for (id, member) in incoming {
            self.index.insert(id, member);
        }

        Ok(node)
    }

    /// Re-parent `node` under `new_parent`, appending it to the end of
    /// the new sibling list. Both handles must be members of this tree.
    ///
    /// The ancestry walk from `new_parent` up to the root runs to
    /// completion before any link changes, so a rejected move leaves the
    /// tree untouched. Moving a node onto its current parent is a
    /// reorder: the node is detached and re-appended at the end of the
    /// sibling list.
    pub fn move_node(&mut self, node: &NodeRef<D>, new_parent: &NodeRef<D>) -> TreeResult<()> {
        let node = self.member(node)?;
        let new_parent = self.member(new_parent)?;

        if node.ptr_eq(&self.root) {
            return Err(TreeError::InvalidOperation(
                "the root node cannot be moved".into(),
            ));
        }

        // Cycle guard: reject if the target is the node itself or sits
        // anywhere below it.
        if new_parent.ptr_eq(&node)
            || self
                .ancestors(&new_parent)
                .iter()
                .any(|ancestor| ancestor.ptr_eq(&node))
        {
            return Err(TreeError::Cycle {
                node: node.id(),
                new_parent: new_parent.id(),
            });
        }

        // Remove the node from its current parent's children list,
        // preserving the order of the remaining siblings
        if let Some(old_parent) = node.node().parent() {
            old_parent.node_mut().remove_child(&node);
        }

        new_parent.node_mut().push_child(node.clone());
        node.node_mut().set_parent(Some(new_parent.downgrade()));

        debug!("Moved node {} under {}", node.id(), new_parent.id());

        // Nothing joined or left the tree; the index is unchanged
        Ok(())
    }

    /// Walk parent links from `node` to the root, nearest ancestor first.
    pub fn ancestors(&self, node: &NodeRef<D>) -> Vec<NodeRef<D>> {
        let mut collection = Vec::new();
        let mut current = node.node().parent();

        while let Some(ancestor) = current {
            current = ancestor.node().parent();
            collection.push(ancestor);
        }

        collection
    }

    /// Build a tree from its nested mapping form, depth-first, preserving
    /// child order. Fails with [`TreeError::DuplicateId`] if any id
    /// repeats anywhere in the input.
    pub fn load(mapping: NodeMapping<D>) -> TreeResult<Self> {
        let root = Self::load_node(mapping);
        Self::with_root(root)
    }

    fn load_node(mapping: NodeMapping<D>) -> NodeRef<D> {
        let (id, data, children) = mapping.into_parts();
        let node = NodeRef::new(Node::new(id, data));

        for child in children {
            let child = Self::load_node(child);
            child.node_mut().set_parent(Some(node.downgrade()));
            node.node_mut().push_child(child);
        }

        node
    }

    /// Inverse of [`Tree::load`]: the nested mapping form of the current
    /// tree, children in current order, payloads carried through by
    /// reference.
    pub fn export(&self) -> NodeMapping<D> {
        Self::export_node(&self.root)
    }

    fn export_node(node: &NodeRef<D>) -> NodeMapping<D> {
        let inner = node.node();
        let mut mapping = NodeMapping::new(inner.id().clone());

        if let Some(data) = inner.data() {
            mapping = mapping.with_data_shared(data.clone());
        }

        for child in inner.children() {
            mapping = mapping.with_child(Self::export_node(child));
        }

        mapping
    }

    /// Resolve a handle to the indexed member it refers to. A foreign
    /// handle that merely shares an id with a member does not count.
    fn member(&self, node: &NodeRef<D>) -> TreeResult<NodeRef<D>> {
        let id = node.id();
        self.index
            .get(&id)
            .filter(|member| member.ptr_eq(node))
            .cloned()
            .ok_or(TreeError::NotFound(id))
    }
}

impl<D> Default for Tree<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for Tree<D>
where
    D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("index", &self.index)
            .finish()
    }
}

impl<D> std::fmt::Display for Tree<D>
where
    D: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
