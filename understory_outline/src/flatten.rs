// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree → flat sequence, plus helpers that operate on flat views.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::collapse::CollapseState;
use crate::error::OutlineError;
use crate::types::{FlatItem, Node};

/// Flatten `roots` into a pre-order sequence.
///
/// Every item records its depth and parent. A node whose id is collapsed in
/// `collapsed` contributes itself but none of its descendants; its
/// [`FlatItem::descendant_count`] still reports how many are hidden.
///
/// Runs in O(n) over the visible nodes plus the hidden subtrees that have to
/// be counted.
pub fn flatten<K, T>(roots: &[Node<K, T>], collapsed: &CollapseState<K>) -> Vec<FlatItem<K, T>>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    let mut out = Vec::new();
    let mut stack = Vec::new();
    stack.push(Level {
        nodes: roots.iter(),
        parent: None,
        depth: 0,
        slot: None,
        total: 0,
    });
    while let Some(level) = stack.last_mut() {
        if let Some(node) = level.nodes.next() {
            let slot = out.len();
            out.push(FlatItem {
                id: node.id.clone(),
                parent: level.parent.cloned(),
                depth: level.depth,
                index: slot,
                collapsed: node.collapsed,
                descendant_count: 0,
                payload: node.payload.clone(),
            });
            if collapsed.is_collapsed(&node.id) {
                let count = node.descendant_count();
                out[slot].descendant_count = count;
                level.total += 1 + count;
            } else {
                let depth = level.depth + 1;
                stack.push(Level {
                    nodes: node.children.iter(),
                    parent: Some(&node.id),
                    depth,
                    slot: Some(slot),
                    total: 0,
                });
            }
        } else if let Some(Level { slot, total, .. }) = stack.pop() {
            if let Some(slot) = slot {
                out[slot].descendant_count = total;
            }
            if let Some(outer) = stack.last_mut() {
                outer.total += 1 + total;
            }
        }
    }
    out
}

/// Flatten every node, ignoring collapsed state.
pub fn flatten_all<K, T>(roots: &[Node<K, T>]) -> Vec<FlatItem<K, T>>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    flatten(roots, &CollapseState::new())
}

/// One sibling list being walked by [`flatten`].
struct Level<'a, K, T> {
    nodes: core::slice::Iter<'a, Node<K, T>>,
    parent: Option<&'a K>,
    depth: usize,
    /// Position of the parent's item in the output.
    slot: Option<usize>,
    /// Nodes seen so far under the parent, hidden ones included.
    total: usize,
}

/// Remove the descendants of every item in `ids` from a flat view.
///
/// The listed items themselves stay. The result is re-indexed so that
/// [`FlatItem::index`] matches positions in the returned view.
pub fn remove_children_of<K, T>(items: &[FlatItem<K, T>], ids: &[K]) -> Vec<FlatItem<K, T>>
where
    K: Clone + PartialEq,
    T: Clone,
{
    let mut out = Vec::with_capacity(items.len());
    let mut hide_below: Option<usize> = None;
    for item in items {
        if let Some(depth) = hide_below {
            if item.depth > depth {
                continue;
            }
            hide_below = None;
        }
        if ids.contains(&item.id) {
            hide_below = Some(item.depth);
        }
        let mut item = item.clone();
        item.index = out.len();
        out.push(item);
    }
    out
}

/// Exclusive end index of the subtree rooted at `start` within `items`.
///
/// Only the items present in `items` count; hidden descendants of a collapsed
/// node are not part of a view and do not extend its subtree.
pub fn subtree_end<K, T>(items: &[FlatItem<K, T>], start: usize) -> usize {
    let Some(root) = items.get(start) else {
        return start;
    };
    let mut ix = start + 1;
    while ix < items.len() && items[ix].depth > root.depth {
        ix += 1;
    }
    ix
}

/// Position of `id` within a flat sequence.
pub fn position_of<K: PartialEq, T>(items: &[FlatItem<K, T>], id: &K) -> Option<usize> {
    items.iter().position(|item| item.id == *id)
}

/// Reject trees that reuse an id.
pub fn validate_tree<K, T>(roots: &[Node<K, T>]) -> Result<(), OutlineError<K>>
where
    K: Clone + Eq + Hash,
{
    let mut seen: HashSet<&K> = HashSet::new();
    let mut stack: Vec<&Node<K, T>> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(&node.id) {
            return Err(OutlineError::DuplicateId(node.id.clone()));
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(())
}

/// Find a node anywhere in the tree.
pub fn find_node<'a, K: PartialEq, T>(roots: &'a [Node<K, T>], id: &K) -> Option<&'a Node<K, T>> {
    let mut stack: Vec<&Node<K, T>> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == *id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ids<K: Clone, T>(items: &[FlatItem<K, T>]) -> Vec<K> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    fn sample() -> Vec<Node<&'static str, u32>> {
        vec![
            Node::new("A", 1).children([
                Node::new("B", 2).child(Node::new("D", 4)),
                Node::new("C", 3),
            ]),
            Node::new("E", 5),
        ]
    }

    #[test]
    fn flatten_is_pre_order_with_depth_and_parent() {
        let flat = flatten_all(&sample());
        assert_eq!(ids(&flat), vec!["A", "B", "D", "C", "E"]);
        let depths: Vec<_> = flat.iter().map(|item| item.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
        assert_eq!(flat[0].parent, None);
        assert_eq!(flat[2].parent, Some("B"));
        assert_eq!(flat[3].parent, Some("A"));
        assert_eq!(flat[4].parent, None);
        for (ix, item) in flat.iter().enumerate() {
            assert_eq!(item.index, ix);
        }
    }

    #[test]
    fn descendant_counts() {
        let flat = flatten_all(&sample());
        let counts: Vec<_> = flat.iter().map(|item| item.descendant_count).collect();
        assert_eq!(counts, vec![3, 1, 0, 0, 0]);
    }

    #[test]
    fn collapsed_nodes_hide_descendants_but_count_them() {
        let mut state = CollapseState::new();
        state.set(&"A", true);
        let flat = flatten(&sample(), &state);
        assert_eq!(ids(&flat), vec!["A", "E"]);
        assert_eq!(flat[0].descendant_count, 3);
        assert_eq!(flat[1].index, 1);
    }

    #[test]
    fn deep_chains_flatten_count_and_flag() {
        const DEPTH: u32 = 2_000;
        let mut node = Node::new(DEPTH, ());
        for id in (0..DEPTH).rev() {
            node = Node::new(id, ()).child(node);
        }
        let mut roots = vec![node];

        let flat = flatten_all(&roots);
        assert_eq!(flat.len(), 2_001);
        assert_eq!(flat[0].descendant_count, 2_000);
        assert_eq!(flat[2_000].depth, 2_000);
        assert_eq!(flat[2_000].parent, Some(1_999));
        assert_eq!(roots[0].descendant_count(), 2_000);
        assert_eq!(find_node(&roots, &DEPTH).map(|n| n.id), Some(DEPTH));
        assert_eq!(validate_tree(&roots), Ok(()));

        let mut state = CollapseState::new();
        state.set(&1_000, true);
        let visible = flatten(&roots, &state);
        assert_eq!(visible.len(), 1_001);
        assert_eq!(visible[1_000].descendant_count, 1_000);
        assert_eq!(visible[999].descendant_count, 1_001);

        crate::set_collapsed_flags(&mut roots, &state);
        let flagged: Vec<_> = flatten_all(&roots)
            .iter()
            .filter(|item| item.collapsed)
            .map(|item| item.id)
            .collect();
        assert_eq!(flagged, vec![1_000]);
    }

    #[test]
    fn collapsing_a_parent_removes_exactly_its_descendants() {
        let tree = vec![Node::new("A", ()).children([Node::new("B", ()), Node::new("C", ())])];
        let expanded = flatten_all(&tree);
        let mut state = CollapseState::new();
        state.toggle(&"A");
        let collapsed = flatten(&tree, &state);
        assert_eq!(ids(&collapsed), vec!["A"]);
        assert_eq!(expanded.len() - collapsed.len(), 2);

        state.expand_all();
        let restored = flatten(&tree, &state);
        assert_eq!(ids(&restored), vec!["A", "B", "C"]);
        let depths: Vec<_> = restored.iter().map(|item| item.depth).collect();
        assert_eq!(depths, vec![0, 1, 1]);
    }

    #[test]
    fn remove_children_of_keeps_the_item_and_reindexes() {
        let flat = flatten_all(&sample());
        let view = remove_children_of(&flat, &["B"]);
        assert_eq!(ids(&view), vec!["A", "B", "C", "E"]);
        assert_eq!(view[2].index, 2);

        let view = remove_children_of(&flat, &["A"]);
        assert_eq!(ids(&view), vec!["A", "E"]);
    }

    #[test]
    fn subtree_end_stops_at_first_shallower_item() {
        let flat = flatten_all(&sample());
        assert_eq!(subtree_end(&flat, 0), 4);
        assert_eq!(subtree_end(&flat, 1), 3);
        assert_eq!(subtree_end(&flat, 4), 5);
        assert_eq!(subtree_end(&flat, 9), 9);
    }

    #[test]
    fn validate_rejects_duplicates() {
        assert!(validate_tree(&sample()).is_ok());
        let bad = vec![Node::new(1, ()).child(Node::new(2, ())), Node::new(2, ())];
        assert_eq!(validate_tree(&bad), Err(OutlineError::DuplicateId(2)));
    }

    #[test]
    fn find_node_searches_depth_first() {
        let tree = sample();
        assert_eq!(find_node(&tree, &"D").map(|n| n.payload), Some(4));
        assert!(find_node(&tree, &"Z").is_none());
    }
}
