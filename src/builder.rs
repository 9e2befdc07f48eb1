//! A module providing builders for constructing trees and nodes.
//!
//! The `NodeBuilder` and `TreeBuilder` types enable building tree structures in a composable way.
//!

use std::{marker::PhantomData, rc::Rc};

use tracing::{debug, debug_span};

use crate::{
    error::TreeResult, id::UniqueGenerator, node::Node, noderef::NodeRef, NodeId, Tree,
};

/// A builder for constructing children from a parent node.
///
/// The `NodeBuilder` type provides methods for adding child nodes to the current parent node.
/// It is designed to be used with the `TreeBuilder` type.
///
pub struct NodeBuilder<'a, D, E, G = crate::IdGenerator>
where
    G: UniqueGenerator<Output = NodeId>,
{
    // NodeRef of this node
    node_ref: &'a NodeRef<D>,
    // UniqueGenerator handle
    idgen: &'a mut G,

    _phantom: PhantomData<E>,
}

impl<'a, D, E, G> NodeBuilder<'a, D, E, G>
where
    G: UniqueGenerator<Output = NodeId>,
{
    pub fn new(node_ref: &'a NodeRef<D>, idgen: &'a mut G) -> Self {
        Self {
            node_ref,
            idgen,
            _phantom: PhantomData,
        }
    }

    /// Adds a child with a generated id to the current node.
    ///
    /// # Arguments
    ///
    /// * `data`: The payload to associate with the child node.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn child<F>(&mut self, data: D, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, D, E, G>) -> Result<(), E>,
    {
        let id = self.idgen.generate();
        self.child_with_id(id, data, f)
    }

    /// Adds a child with a caller-supplied id to the current node.
    pub fn child_with_id<F>(&mut self, id: NodeId, data: D, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, D, E, G>) -> Result<(), E>,
    {
        let node = NodeRef::new(Node::new(id, Some(Rc::new(data))));
        node.node_mut().set_parent(Some(self.node_ref.downgrade()));

        {
            let mut node_builder = NodeBuilder::new(&node, self.idgen);

            // Call the supplied closure with the NodeBuilder to add this node's children
            f(&mut node_builder)?;
        }

        // Push the child to the parent node
        self.node_ref.node_mut().push_child(node);

        Ok(())
    }

    pub fn node(&self) -> &NodeRef<D> {
        self.node_ref
    }
}

/// A builder for constructing trees.
///
/// There is a `root` method on the builder to add an initial root node, which calls
/// the provided closure with a NodeBuilder that can be used to recursively build children of
/// the node. The closures expect a Result<(), E> to be returned, where E is your defined error
/// type. This allows errors within your closures to propagate.
///
/// # Examples
///
/// ```
/// type MyData = String;
/// type MyError = String;
///
/// use madrone::TreeBuilder;
/// let builder = TreeBuilder::<MyData, MyError>::new();
/// let root_builder = builder.root("Root".to_string(), |root| { /* add children */ Ok(()) });
///
/// // Typically you would use `builder?.done()` to propagate errors up
/// let _done = root_builder.unwrap().done();
/// ```
#[derive(Debug)]
pub struct TreeBuilder<D, E, G = crate::IdGenerator>
where
    G: UniqueGenerator<Output = NodeId>,
{
    idgen: G,
    root: Option<NodeRef<D>>,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<D, E, G> TreeBuilder<D, E, G>
where
    G: UniqueGenerator<Output = NodeId> + Default,
{
    /// Creates a new `TreeBuilder` instance.
    pub fn new() -> Self {
        let debug_span = debug_span!("TreeBuilder");
        let _debug = debug_span.enter();
        debug!("Created new TreeBuilder");
        drop(_debug);

        Self {
            idgen: G::default(),
            root: None,
            debug_span,
            _phantom: PhantomData,
        }
    }
}

impl<D, E, G> Default for TreeBuilder<D, E, G>
where
    G: UniqueGenerator<Output = NodeId> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E, G> TreeBuilder<D, E, G>
where
    G: UniqueGenerator<Output = NodeId>,
{
    /// Returns the constructed, indexed tree when finished building it.
    pub fn done(self) -> TreeResult<Option<Tree<D>>> {
        self.debug_span.in_scope(|| {
            debug!("Finished building tree");

            match self.root {
                Some(root) => Tree::with_root(root).map(Some),
                None => Ok(None),
            }
        })
    }

    /// Adds a root node to the tree and returns the updated builder.
    ///
    /// # Arguments
    ///
    /// * `data`: The payload to associate with the root node.
    /// * `f`: A closure that takes the root builder and adds its own children.
    pub fn root<F>(mut self, data: D, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, D, E, G>) -> Result<(), E>,
    {
        let id = self.idgen.generate();
        let span = self.debug_span.clone();

        span.in_scope(|| {
            let node_ref = NodeRef::new(Node::new(id, Some(Rc::new(data))));

            {
                let mut node_builder = NodeBuilder::new(&node_ref, &mut self.idgen);

                // Call the supplied closure with the NodeBuilder to add this node's children
                f(&mut node_builder)?;
            }

            if self.root.is_none() {
                debug!("Added root");
                self.root = Some(node_ref);
            } else {
                panic!("Root node already exists");
            }
            Ok(())
        })?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug)]
    #[allow(unused)]
    enum MyError {
        Fail(String),
    }

    #[traced_test]
    #[test]
    fn test_builder() {
        let tree = TreeBuilder::<&'static str, MyError>::new()
            .root("foo", |foo| {
                foo.child("bar", |bar| bar.child("baz", |_| Ok(())))?;
                foo.child("hello", |_| Ok(()))?;

                Ok(())
            })
            .unwrap()
            .done()
            .unwrap()
            .unwrap();

        assert_eq!(tree.len(), 4);

        // Every built node is indexed and payloads land in order
        let order: Vec<_> = tree
            .root()
            .node()
            .children()
            .iter()
            .map(|c| c.node().data().map(|d| **d))
            .collect();
        assert_eq!(order, vec![Some("bar"), Some("hello")]);

        println!("{}", tree.root());
    }

    #[test]
    fn test_builder_explicit_ids() {
        let tree = TreeBuilder::<&'static str, MyError>::new()
            .root("root", |root| {
                root.child_with_id("left".into(), "l", |_| Ok(()))?;
                root.child_with_id("right".into(), "r", |_| Ok(()))?;
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap()
            .unwrap();

        assert!(tree.contains("left"));
        let right = tree.find_by_id("right").unwrap();
        assert_eq!(right.node().parent().unwrap().id(), tree.root().id());
    }

    #[test]
    fn test_builder_duplicate_ids_rejected() {
        let result = TreeBuilder::<&'static str, MyError>::new()
            .root("root", |root| {
                root.child_with_id("dup".into(), "a", |_| Ok(()))?;
                root.child_with_id("dup".into(), "b", |_| Ok(()))?;
                Ok(())
            })
            .unwrap()
            .done();

        assert!(result.is_err());
    }

    #[test]
    fn test_closure_errors_propagate() {
        let result = TreeBuilder::<&'static str, MyError>::new().root("root", |root| {
            root.child("child", |_| Err(MyError::Fail("nope".into())))
        });

        assert!(result.is_err());
    }
}
