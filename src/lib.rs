//! # Madrone
//!
//! An ordered, id-indexed multi-way tree library for Rust.
//!
//! ## Overview
//!
//! Madrone provides a [`Tree`] container over shared node handles, with
//! O(1)-average lookup of any node by id, re-parenting with cycle
//! prevention, and lossless conversion to and from a nested
//! [`NodeMapping`] form that carries arbitrary opaque payloads through
//! by reference.

mod builder;
mod compare;
mod display;
mod error;
mod id;
mod index;
mod iterator;
mod mapping;
mod tree;

pub mod node;
pub mod noderef;

pub use builder::*;
pub use compare::subtree_hash;
pub use error::{TreeError, TreeResult};
pub use id::*;
pub use index::{HashIndex, TreeIndex};
pub use iterator::{IterNode, NodeRefIter};
pub use mapping::NodeMapping;
pub use tree::Tree;

pub use node::Node;
pub use noderef::{NodeRef, WeakNodeRef};

pub type IdGenerator = id::UuidGenerator;
pub type NodeId = <IdGenerator as UniqueGenerator>::Output;
