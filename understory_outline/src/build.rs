// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat sequence → tree.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::error::OutlineError;
use crate::types::{FlatItem, Node};

/// Rebuild a tree from a flat pre-order sequence.
///
/// Items are nested by depth and keep their flat order as sibling order. Each
/// item's `parent` must name the nearest earlier item at `depth - 1` (or be
/// `None` at depth 0); anything else is rejected, so a successful build always
/// yields a well-formed tree. `index` and `descendant_count` are derived data
/// and are not consulted.
///
/// For every valid sequence `f`, `flatten_all(&build(&f)?) == f`.
pub fn build<K, T>(items: &[FlatItem<K, T>]) -> Result<Vec<Node<K, T>>, OutlineError<K>>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    let mut roots: Vec<Node<K, T>> = Vec::new();
    // Open ancestors of the next item, outermost first.
    let mut open: SmallVec<[Node<K, T>; 8]> = SmallVec::new();
    let mut seen: HashSet<&K> = HashSet::with_capacity(items.len());

    for item in items {
        if !seen.insert(&item.id) {
            return Err(OutlineError::DuplicateId(item.id.clone()));
        }
        if item.depth > open.len() {
            return Err(OutlineError::DepthMismatch {
                id: item.id.clone(),
                depth: item.depth,
                max: open.len(),
            });
        }
        while open.len() > item.depth {
            close_last(&mut open, &mut roots);
        }

        let expected = open.last().map(|node| &node.id);
        if item.parent.as_ref() != expected {
            return Err(match &item.parent {
                Some(parent) if !seen.contains(parent) || *parent == item.id => {
                    OutlineError::MissingParent {
                        id: item.id.clone(),
                        parent: parent.clone(),
                    }
                }
                _ => OutlineError::ParentMismatch {
                    id: item.id.clone(),
                    parent: item.parent.clone(),
                    expected: expected.cloned(),
                },
            });
        }

        open.push(Node {
            id: item.id.clone(),
            payload: item.payload.clone(),
            children: Vec::new(),
            collapsed: item.collapsed,
        });
    }

    while !open.is_empty() {
        close_last(&mut open, &mut roots);
    }
    Ok(roots)
}

/// Pop the innermost open node and attach it to its parent (or the roots).
fn close_last<K, T>(open: &mut SmallVec<[Node<K, T>; 8]>, roots: &mut Vec<Node<K, T>>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
