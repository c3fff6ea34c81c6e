// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth projection and drop outcomes.
//!
//! While an item is dragged, its row is shown at the slot of the row it is
//! over: dragging downward lands after that row, dragging upward lands before
//! it. The horizontal pointer offset then picks a depth, clamped so the item
//! can only nest one level under the row above it and never leaves the row
//! below it without a parent.
//!
//! Every function here expects a flat view where the active item is present
//! but its descendants have been removed (see
//! [`remove_children_of`](understory_outline::remove_children_of)). That
//! exclusion is what keeps a node from ever landing inside its own subtree.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use understory_outline::{FlatItem, position_of};

/// Where the active item would land if dropped now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection<K> {
    /// Projected depth, always within `min_depth..=max_depth`.
    pub depth: usize,
    /// Shallowest legal depth at the projected slot.
    pub min_depth: usize,
    /// Deepest legal depth at the projected slot.
    pub max_depth: usize,
    /// Projected parent, or `None` for a root.
    pub parent: Option<K>,
}

/// Indices (into the unmoved view) of the rows around the projected slot.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Slot {
    pub(crate) active: usize,
    pub(crate) predecessor: Option<usize>,
    pub(crate) successor: Option<usize>,
}

impl Slot {
    /// The slot the active row takes when moved to `over`'s index.
    pub(crate) fn locate<K: PartialEq, T>(
        items: &[FlatItem<K, T>],
        active: &K,
        over: &K,
    ) -> Option<Self> {
        let active_ix = position_of(items, active)?;
        let over_ix = position_of(items, over)?;
        let predecessor = if over_ix > active_ix {
            Some(over_ix)
        } else {
            over_ix.checked_sub(1)
        };
        let successor = if over_ix < active_ix {
            Some(over_ix)
        } else {
            Some(over_ix + 1).filter(|&ix| ix < items.len())
        };
        Some(Self {
            active: active_ix,
            predecessor,
            successor,
        })
    }

    /// Rows above the slot, nearest first, in moved order.
    pub(crate) fn above<'a, K, T>(
        &self,
        items: &'a [FlatItem<K, T>],
    ) -> impl Iterator<Item = &'a FlatItem<K, T>> {
        let active = self.active;
        let end = self.predecessor.map_or(0, |ix| ix + 1);
        items[..end]
            .iter()
            .enumerate()
            .rev()
            .filter(move |(ix, _)| *ix != active)
            .map(|(_, item)| item)
    }
}

/// Compute the projected depth and parent of `active` when dragged over `over`.
///
/// `offset_x` is the horizontal pointer travel since the drag started, and
/// `indentation_width` the width of one nesting level. The depth starts from
/// `over`'s depth plus the offset in whole levels (halves round up) and is
/// clamped to the legal range. Any offset is accepted, including non-finite
/// ones, which count as no travel.
///
/// Returns `None` when `active == over` or either id is missing from `items`.
pub fn project<K, T>(
    items: &[FlatItem<K, T>],
    active: &K,
    over: &K,
    offset_x: f64,
    indentation_width: f64,
) -> Option<Projection<K>>
where
    K: Clone + PartialEq,
{
    if active == over {
        return None;
    }
    let slot = Slot::locate(items, active, over)?;
    let over_depth = position_of(items, over).map(|ix| items[ix].depth)?;

    let predecessor = slot.predecessor.map(|ix| &items[ix]);
    let successor = slot.successor.map(|ix| &items[ix]);
    let max_depth = predecessor.map_or(0, |item| item.depth + 1);
    let min_depth = successor.map_or(0, |item| item.depth);

    let candidate = to_i64(over_depth).saturating_add(depth_delta(offset_x, indentation_width));
    let depth = clamp_depth(candidate, min_depth, max_depth);

    let parent = if depth == 0 {
        None
    } else {
        slot.above(items)
            .find(|item| item.depth + 1 == depth)
            .map(|item| item.id.clone())
    };

    log::trace!(
        "projected depth {depth} (range {min_depth}..={max_depth}) for offset {offset_x}"
    );
    Some(Projection {
        depth,
        min_depth,
        max_depth,
        parent,
    })
}

/// Whole indentation levels covered by `offset_x`; halves round toward +∞.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float to int casts saturate; depths that large are clamped away."
)]
fn depth_delta(offset_x: f64, indentation_width: f64) -> i64 {
    if !(indentation_width > 0.0) {
        return 0;
    }
    let levels = (offset_x / indentation_width + 0.5).floor();
    if levels.is_finite() { levels as i64 } else { 0 }
}

fn to_i64(depth: usize) -> i64 {
    i64::try_from(depth).unwrap_or(i64::MAX)
}

fn clamp_depth(candidate: i64, min_depth: usize, max_depth: usize) -> usize {
    // Neighbors in a valid view always have `min_depth <= max_depth`.
    let clamped = candidate.max(to_i64(min_depth)).min(to_i64(max_depth));
    usize::try_from(clamped).unwrap_or(0)
}

/// Where a dropped item goes relative to the rows that stay put.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anchor<K> {
    /// Insert directly before this item (and after any hidden descendants of
    /// the row above it).
    Before(K),
    /// Append after everything else.
    End,
}

/// The result of a drop, decided once from the projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome<K> {
    /// Nothing changes.
    NoOp,
    /// The item keeps its parent and moves among its siblings.
    Reorder {
        /// The moved item.
        id: K,
        /// Its unchanged parent.
        parent: Option<K>,
        /// Its depth.
        depth: usize,
        /// Where it is inserted.
        anchor: Anchor<K>,
    },
    /// The item moves under a different parent.
    Reparent {
        /// The moved item.
        id: K,
        /// Its parent before the drop.
        from: Option<K>,
        /// Its parent after the drop.
        to: Option<K>,
        /// Its depth after the drop.
        depth: usize,
        /// Where it is inserted.
        anchor: Anchor<K>,
    },
}

impl<K> DropOutcome<K> {
    /// Whether the drop changes nothing.
    #[inline]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// The moved item, unless this is a no-op.
    pub fn id(&self) -> Option<&K> {
        match self {
            Self::NoOp => None,
            Self::Reorder { id, .. } | Self::Reparent { id, .. } => Some(id),
        }
    }
}

/// Decide what dropping `active` over `over` does.
///
/// `projection` is the result of [`project`] for the same view and ids; a
/// missing projection, unknown ids, and a drop on the item itself all resolve
/// to [`DropOutcome::NoOp`].
pub fn resolve_drop<K, T>(
    items: &[FlatItem<K, T>],
    active: &K,
    over: &K,
    projection: Option<&Projection<K>>,
) -> DropOutcome<K>
where
    K: Clone + PartialEq,
{
    let Some(projection) = projection else {
        return DropOutcome::NoOp;
    };
    if active == over {
        return DropOutcome::NoOp;
    }
    let Some(slot) = Slot::locate(items, active, over) else {
        return DropOutcome::NoOp;
    };
    let current = &items[slot.active];
    let anchor = match slot.successor {
        Some(ix) => Anchor::Before(items[ix].id.clone()),
        None => Anchor::End,
    };

    // With distinct ids the slot always differs from the current one.
    if projection.parent == current.parent {
        DropOutcome::Reorder {
            id: current.id.clone(),
            parent: current.parent.clone(),
            depth: projection.depth,
            anchor,
        }
    } else {
        DropOutcome::Reparent {
            id: current.id.clone(),
            from: current.parent.clone(),
            to: projection.parent.clone(),
            depth: projection.depth,
            anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use understory_outline::{CollapseState, Node, flatten, flatten_all, remove_children_of};

    fn view(tree: &[Node<&'static str, ()>], active: &'static str) -> Vec<FlatItem<&'static str, ()>> {
        remove_children_of(&flatten_all(tree), &[active])
    }

    /// A[B, C]
    fn abc() -> Vec<Node<&'static str, ()>> {
        vec![Node::new("A", ()).children([Node::new("B", ()), Node::new("C", ())])]
    }

    #[test]
    fn self_and_unknown_targets_have_no_projection() {
        let items = view(&abc(), "B");
        assert_eq!(project(&items, &"B", &"B", 0.0, 20.0), None);
        assert_eq!(project(&items, &"B", &"Z", 0.0, 20.0), None);
        assert_eq!(project(&items, &"Z", &"B", 0.0, 20.0), None);
    }

    #[test]
    fn drag_up_lands_before_over() {
        let items = view(&abc(), "C");
        let p = project(&items, &"C", &"B", 0.0, 20.0).unwrap();
        assert_eq!(p.depth, 1);
        assert_eq!(p.parent, Some("A"));
        // Between A and B.
        assert_eq!((p.min_depth, p.max_depth), (1, 1));
        assert_eq!(
            resolve_drop(&items, &"C", &"B", Some(&p)),
            DropOutcome::Reorder {
                id: "C",
                parent: Some("A"),
                depth: 1,
                anchor: Anchor::Before("B"),
            }
        );
    }

    #[test]
    fn drag_down_with_offset_nests_under_over() {
        let items = view(&abc(), "B");
        let p = project(&items, &"B", &"C", 20.0, 20.0).unwrap();
        assert_eq!(p.depth, 2);
        assert_eq!(p.parent, Some("C"));
        assert_eq!(
            resolve_drop(&items, &"B", &"C", Some(&p)),
            DropOutcome::Reparent {
                id: "B",
                from: Some("A"),
                to: Some("C"),
                depth: 2,
                anchor: Anchor::End,
            }
        );
    }

    #[test]
    fn offset_rounds_half_up() {
        let items = view(&abc(), "B");
        assert_eq!(project(&items, &"B", &"C", 9.9, 20.0).unwrap().depth, 1);
        assert_eq!(project(&items, &"B", &"C", 10.0, 20.0).unwrap().depth, 2);
        // -0.5 levels rounds up to 0.
        assert_eq!(project(&items, &"B", &"C", -10.0, 20.0).unwrap().depth, 1);
        assert_eq!(project(&items, &"B", &"C", -10.1, 20.0).unwrap().depth, 0);
    }

    #[test]
    fn depth_stays_in_range_for_extreme_offsets() {
        let tree = vec![
            Node::new("A", ()).child(Node::new("B", ()).child(Node::new("C", ()))),
            Node::new("D", ()),
            Node::new("E", ()),
        ];
        let flat = flatten_all(&tree);
        for active in ["A", "B", "C", "D", "E"] {
            let items = remove_children_of(&flat, &[active]);
            for over in items.iter().map(|item| item.id) {
                for offset in [
                    f64::NEG_INFINITY,
                    -1.0e300,
                    -45.0,
                    0.0,
                    13.0,
                    1.0e300,
                    f64::INFINITY,
                    f64::NAN,
                ] {
                    if let Some(p) = project(&items, &active, &over, offset, 20.0) {
                        assert!(p.min_depth <= p.depth && p.depth <= p.max_depth);
                    }
                }
            }
        }
    }

    #[test]
    fn degenerate_indentation_counts_as_no_travel() {
        let items = view(&abc(), "B");
        for indent in [0.0, -20.0, f64::NAN] {
            let p = project(&items, &"B", &"C", 100.0, indent).unwrap();
            assert_eq!(p.depth, 1);
        }
    }

    #[test]
    fn moving_to_the_top_has_no_predecessor() {
        let tree = vec![Node::new("A", ()), Node::new("B", ()).child(Node::new("C", ()))];
        let items = view(&tree, "C");
        let p = project(&items, &"C", &"A", 60.0, 20.0).unwrap();
        assert_eq!((p.depth, p.min_depth, p.max_depth), (0, 0, 0));
        assert_eq!(p.parent, None);
    }

    #[test]
    fn outdenting_finds_the_ancestor_at_the_new_depth() {
        // A[B[C]], D; drag D up over C with a large leftward offset.
        let tree = vec![
            Node::new("A", ()).child(Node::new("B", ()).child(Node::new("C", ()))),
            Node::new("D", ()),
        ];
        let items = view(&tree, "D");
        // Moving up over C puts D between B and C, so D must stay at C's depth.
        let p = project(&items, &"D", &"C", -100.0, 20.0).unwrap();
        assert_eq!((p.depth, p.parent), (2, Some("B")));

        // A[B[C]], D, E; dragging E over D with no offset keeps it a root after D.
        let tree = vec![
            Node::new("A", ()).child(Node::new("B", ()).child(Node::new("C", ()))),
            Node::new("D", ()),
            Node::new("E", ()),
        ];
        let items = view(&tree, "D");
        let p = project(&items, &"D", &"A", 0.0, 20.0).unwrap();
        assert_eq!((p.depth, p.parent), (0, None));
        let p = project(&items, &"D", &"E", 0.0, 20.0).unwrap();
        assert_eq!((p.depth, p.parent), (0, None));
        let p = project(&items, &"D", &"E", 20.0, 20.0).unwrap();
        assert_eq!((p.depth, p.parent), (1, Some("E")));
    }

    #[test]
    fn swapping_with_a_neighbor_always_moves() {
        let tree = vec![Node::new("A", ()), Node::new("B", ()), Node::new("C", ())];
        let items = view(&tree, "B");
        for (over, anchor) in [("A", Anchor::Before("A")), ("C", Anchor::End)] {
            let p = project(&items, &"B", &over, 0.0, 20.0).unwrap();
            assert_eq!(
                resolve_drop(&items, &"B", &over, Some(&p)),
                DropOutcome::Reorder {
                    id: "B",
                    parent: None,
                    depth: 0,
                    anchor,
                }
            );
        }
    }

    #[test]
    fn own_descendants_are_never_targets() {
        let tree = vec![Node::new("A", ()).child(Node::new("B", ())), Node::new("C", ())];
        let items = view(&tree, "A");
        assert_eq!(project(&items, &"A", &"B", 40.0, 20.0), None);
        assert!(resolve_drop(&items, &"A", &"B", None).is_noop());
    }

    #[test]
    fn collapsed_rows_project_like_leaves() {
        let tree = vec![
            Node::new("A", ()).children([Node::new("B", ()), Node::new("C", ())]),
            Node::new("D", ()),
        ];
        let mut state = CollapseState::new();
        state.set(&"A", true);
        let items = remove_children_of(&flatten(&tree, &state), &["D"]);
        assert_eq!(items.len(), 2);
        let p = project(&items, &"D", &"A", 20.0, 20.0).unwrap();
        // D moves above A; nothing to nest under.
        assert_eq!((p.depth, p.parent), (0, None));
        let outcome = resolve_drop(&items, &"D", &"A", Some(&p));
        assert_eq!(outcome.id(), Some(&"D"));
        assert!(matches!(
            outcome,
            DropOutcome::Reorder {
                anchor: Anchor::Before("A"),
                ..
            }
        ));
    }
}
