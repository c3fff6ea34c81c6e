// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying a [`DropOutcome`] to a tree.

use alloc::vec::Vec;
use core::hash::Hash;

use understory_outline::{Node, OutlineError, build, flatten_all, position_of, subtree_end};

use crate::projection::{Anchor, DropOutcome};

/// Apply `outcome` to `roots` and return the rebuilt tree.
///
/// The moved node travels with its whole subtree, including descendants that
/// were hidden by collapsing. The tree is flattened in full, the block is
/// spliced into a scratch copy, and the result is rebuilt with
/// [`build`], so an inconsistent outcome is reported as an error instead of
/// producing a malformed tree. `roots` itself is never modified.
///
/// Returns `Ok(None)` for [`DropOutcome::NoOp`].
pub fn apply_drop<K, T>(
    roots: &[Node<K, T>],
    outcome: &DropOutcome<K>,
) -> Result<Option<Vec<Node<K, T>>>, OutlineError<K>>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    let (id, parent, depth, anchor) = match outcome {
        DropOutcome::NoOp => return Ok(None),
        DropOutcome::Reorder {
            id,
            parent,
            depth,
            anchor,
        } => (id, parent, *depth, anchor),
        DropOutcome::Reparent {
            id,
            to,
            depth,
            anchor,
            ..
        } => (id, to, *depth, anchor),
    };

    let mut items = flatten_all(roots);
    let start = position_of(&items, id).ok_or_else(|| OutlineError::UnknownId(id.clone()))?;
    let end = subtree_end(&items, start);
    let mut block: Vec<_> = items.drain(start..end).collect();

    let base = block[0].depth;
    for item in &mut block[1..] {
        item.depth = item.depth - base + depth;
    }
    block[0].depth = depth;
    block[0].parent = parent.clone();

    let at = match anchor {
        Anchor::Before(next) => {
            position_of(&items, next).ok_or_else(|| OutlineError::UnknownId(next.clone()))?
        }
        Anchor::End => items.len(),
    };
    items.splice(at..at, block);
    for (ix, item) in items.iter_mut().enumerate() {
        item.index = ix;
    }

    build(&items).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn shape<K: Clone, T>(roots: &[Node<K, T>]) -> Vec<(K, Vec<K>)> {
        let mut out = Vec::new();
        let mut stack: Vec<&Node<K, T>> = roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push((
                node.id.clone(),
                node.children.iter().map(|c| c.id.clone()).collect(),
            ));
            stack.extend(node.children.iter().rev());
        }
        out
    }

    fn abc() -> Vec<Node<&'static str, u8>> {
        vec![Node::new("A", 0).children([Node::new("B", 1), Node::new("C", 2)])]
    }

    #[test]
    fn noop_returns_nothing() {
        assert_eq!(apply_drop(&abc(), &DropOutcome::NoOp), Ok(None));
    }

    #[test]
    fn reorder_before_sibling() {
        let outcome = DropOutcome::Reorder {
            id: "C",
            parent: Some("A"),
            depth: 1,
            anchor: Anchor::Before("B"),
        };
        let tree = apply_drop(&abc(), &outcome).unwrap().unwrap();
        assert_eq!(
            shape(&tree),
            vec![("A", vec!["C", "B"]), ("C", vec![]), ("B", vec![])]
        );
        // Payloads travel with their nodes.
        assert_eq!(tree[0].children[0].payload, 2);
    }

    #[test]
    fn reparent_to_end() {
        let outcome = DropOutcome::Reparent {
            id: "B",
            from: Some("A"),
            to: Some("C"),
            depth: 2,
            anchor: Anchor::End,
        };
        let tree = apply_drop(&abc(), &outcome).unwrap().unwrap();
        assert_eq!(
            shape(&tree),
            vec![("A", vec!["C"]), ("C", vec!["B"]), ("B", vec![])]
        );
    }

    #[test]
    fn subtree_moves_as_a_block() {
        // A[B[C, D]], E: move B with C and D to the root after E.
        let tree = vec![
            Node::new("A", ()).child(Node::new("B", ()).children([Node::new("C", ()), Node::new("D", ())])),
            Node::new("E", ()),
        ];
        let outcome = DropOutcome::Reparent {
            id: "B",
            from: Some("A"),
            to: None,
            depth: 0,
            anchor: Anchor::End,
        };
        let moved = apply_drop(&tree, &outcome).unwrap().unwrap();
        assert_eq!(
            shape(&moved),
            vec![
                ("A", vec![]),
                ("E", vec![]),
                ("B", vec!["C", "D"]),
                ("C", vec![]),
                ("D", vec![]),
            ]
        );
    }

    #[test]
    fn reparent_under_collapsed_node_appends_after_hidden_children() {
        let tree = vec![
            Node::new("A", ())
                .collapsed(true)
                .children([Node::new("B", ()), Node::new("C", ())]),
            Node::new("D", ()),
            Node::new("E", ()),
        ];
        // In the collapsed view A is directly above D, so D nests under A
        // anchored before E.
        let outcome = DropOutcome::Reparent {
            id: "D",
            from: None,
            to: Some("A"),
            depth: 1,
            anchor: Anchor::Before("E"),
        };
        let moved = apply_drop(&tree, &outcome).unwrap().unwrap();
        assert_eq!(moved[0].children.len(), 3);
        assert_eq!(moved[0].children[2].id, "D");
        assert!(moved[0].collapsed);
    }

    #[test]
    fn inconsistent_outcomes_fail_without_touching_the_input() {
        let tree = abc();
        let outcome = DropOutcome::Reparent {
            id: "C",
            from: Some("A"),
            to: Some("B"),
            depth: 3,
            anchor: Anchor::End,
        };
        assert!(matches!(
            apply_drop(&tree, &outcome),
            Err(OutlineError::DepthMismatch { id: "C", .. })
        ));

        let outcome = DropOutcome::Reorder {
            id: "Z",
            parent: None,
            depth: 0,
            anchor: Anchor::End,
        };
        assert_eq!(apply_drop(&tree, &outcome), Err(OutlineError::UnknownId("Z")));
        assert_eq!(tree, abc());
    }

    #[test]
    fn anchor_inside_the_moved_block_is_rejected() {
        let tree = vec![Node::new("A", ()).child(Node::new("B", ()))];
        let outcome = DropOutcome::Reorder {
            id: "A",
            parent: None,
            depth: 0,
            anchor: Anchor::Before("B"),
        };
        assert_eq!(apply_drop(&tree, &outcome), Err(OutlineError::UnknownId("B")));
    }
}
