// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node collapsed state.
//!
//! [`CollapseState`] is the set of node ids whose descendants are hidden from
//! flat views. It never changes the shape of a tree; it only changes what
//! [`flatten`](crate::flatten) reveals. Use [`set_collapsed_flags`] to mirror
//! the set back into [`Node::collapsed`] when the host stores flags on nodes.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::types::Node;

/// The set of collapsed node ids.
#[derive(Clone, Debug)]
pub struct CollapseState<K> {
    ids: HashSet<K>,
}

impl<K: Eq + Hash> Default for CollapseState<K> {
    fn default() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> CollapseState<K> {
    /// Create an empty state where every node is expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state from the `collapsed` flags stored on a tree.
    pub fn from_tree<T>(roots: &[Node<K, T>]) -> Self {
        let mut state = Self::new();
        let mut stack: Vec<&Node<K, T>> = roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.collapsed {
                state.ids.insert(node.id.clone());
            }
            stack.extend(node.children.iter());
        }
        state
    }

    /// Flip the collapsed flag of `id`.
    ///
    /// Returns the new flag: `true` if `id` is now collapsed.
    pub fn toggle(&mut self, id: &K) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Collapse or expand a single node.
    pub fn set(&mut self, id: &K, collapsed: bool) {
        if collapsed {
            self.ids.insert(id.clone());
        } else {
            self.ids.remove(id);
        }
    }

    /// Expand every node.
    ///
    /// Returns `true` if anything was collapsed before the call.
    pub fn expand_all(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Whether `id` is collapsed.
    #[inline]
    pub fn is_collapsed(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    /// Number of collapsed ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is collapsed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate collapsed ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ids.iter()
    }
}

/// Write `state` into the `collapsed` flag of every node in `roots`.
pub fn set_collapsed_flags<K, T>(roots: &mut [Node<K, T>], state: &CollapseState<K>)
where
    K: Clone + Eq + Hash,
{
    let mut stack: Vec<&mut Node<K, T>> = roots.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.collapsed = state.is_collapsed(&node.id);
        stack.extend(node.children.iter_mut());
    }
}
