use std::{collections::VecDeque, ops::Deref};

use crate::noderef::NodeRef;

/// A node yielded by depth-first traversal, along with its depth below
/// the starting node.
pub struct IterNode<D> {
    depth: usize,
    node: NodeRef<D>,
}

impl<D> IterNode<D> {
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<D> Deref for IterNode<D> {
    type Target = NodeRef<D>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Depth-first iterator over a subtree, yielding parents before children
/// and siblings in child-list order.
pub struct NodeRefIter<D> {
    stack: VecDeque<(usize, NodeRef<D>)>,
}

impl<D> NodeRefIter<D> {
    pub fn new(node: NodeRef<D>) -> Self {
        Self {
            stack: VecDeque::from([(0, node)]),
        }
    }
}

impl<D> Iterator for NodeRefIter<D> {
    type Item = IterNode<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop_front();

        current.map(|(depth, node)| {
            {
                let inner = node.node();
                inner
                    .children()
                    .iter()
                    .rev()
                    .for_each(|child| self.stack.push_front((depth + 1, child.clone())));
            }

            IterNode { depth, node }
        })
    }
}
