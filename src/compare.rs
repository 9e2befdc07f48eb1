use std::hash::Hasher as _;

use xxhash_rust::xxh64::Xxh64;

use crate::{noderef::NodeRef, tree::Tree};

/// Tree Comparison
///
/// Structural hashing over ids, depth and child counts. Payloads are
/// deliberately excluded so opaque payload types carry no trait bounds.

/// Hash the structure of the subtree rooted at `node`
pub fn subtree_hash<D>(node: &NodeRef<D>) -> u64 {
    let mut hasher = Xxh64::new(0);

    for node in node.into_iter() {
        let inner = node.node();
        hasher.write(inner.id().as_bytes());
        hasher.write_usize(inner.num_children());
        hasher.write_usize(node.depth());
    }

    hasher.finish()
}

impl<D> Tree<D> {
    /// Hash of the whole tree's structure. Two calls return the same
    /// value exactly when no structural mutation happened in between.
    pub fn structure_hash(&self) -> u64 {
        subtree_hash(self.root_ref())
    }
}

impl<D> PartialEq for Tree<D> {
    fn eq(&self, other: &Self) -> bool {
        self.structure_hash() == other.structure_hash()
    }
}

impl<D> Eq for Tree<D> {}

#[cfg(test)]
mod tests {
    use crate::{NodeMapping, Tree};

    fn small_tree() -> Tree<()> {
        Tree::load(
            NodeMapping::new("r")
                .with_child(NodeMapping::new("a"))
                .with_child(NodeMapping::new("b").with_child(NodeMapping::new("b1"))),
        )
        .unwrap()
    }

    #[test]
    fn identical_structures_hash_equal() {
        assert_eq!(small_tree(), small_tree());
    }

    #[test]
    fn mutation_changes_the_hash() {
        let tree = small_tree();
        let before = tree.structure_hash();

        let mut tree = tree;
        let node = tree.find_by_id("a").unwrap();
        let new_parent = tree.find_by_id("b1").unwrap();
        tree.move_node(&node, &new_parent).unwrap();

        assert_ne!(before, tree.structure_hash());
    }
}
