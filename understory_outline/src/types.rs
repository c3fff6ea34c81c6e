// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for outlines: nested nodes and their flat, depth-annotated view.

use alloc::vec::Vec;

/// A node in an outline tree.
///
/// `K` is the node identifier. It must be unique across the whole tree; every
/// derived flat view refers to nodes by this id. `T` is an opaque payload that
/// travels with the node through flattening and rebuilding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K, T> {
    /// Stable identifier, unique across the tree.
    pub id: K,
    /// Caller-owned payload. Never inspected by this crate.
    pub payload: T,
    /// Ordered children.
    pub children: Vec<Self>,
    /// Whether the node's descendants are hidden from flat views.
    pub collapsed: bool,
}

impl<K, T> Node<K, T> {
    /// Create an expanded leaf node.
    pub fn new(id: K, payload: T) -> Self {
        Self {
            id,
            payload,
            children: Vec::new(),
            collapsed: false,
        }
    }

    /// Append a single child.
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, in order.
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the collapsed flag.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Whether this node has any children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of descendants (children, grandchildren, …).
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Self> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// One row of a flattened outline.
///
/// A flat sequence is a pre-order traversal of the tree where each item knows
/// its depth and parent. `index` is the item's position within the sequence it
/// belongs to; views derived from another sequence are re-indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatItem<K, T> {
    /// Node identifier.
    pub id: K,
    /// Parent identifier, or `None` for roots.
    pub parent: Option<K>,
    /// Nesting depth; roots are at depth 0.
    pub depth: usize,
    /// Position in the flat sequence.
    pub index: usize,
    /// Collapsed flag of the node.
    pub collapsed: bool,
    /// Number of descendants the node has in the tree, whether or not they are
    /// visible in this sequence.
    pub descendant_count: usize,
    /// The node's payload.
    pub payload: T,
}
