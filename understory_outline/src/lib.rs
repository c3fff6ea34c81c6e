// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: nested outlines and their flat, depth-annotated views.
//!
//! An outline is an ordered tree of [`Node`]s, such as the sections listed in an editor
//! sidebar. Interactive code usually wants the same data as a list of rows. This crate
//! converts between the two representations and keeps them consistent:
//!
//! - [`flatten`] walks the tree in pre-order and produces [`FlatItem`]s that carry their
//!   depth, parent, position, and descendant count. Nodes collapsed in a
//!   [`CollapseState`] contribute themselves but hide their descendants.
//! - [`build`] is the inverse: it nests a flat sequence back into a tree and rejects any
//!   sequence whose depths and parents do not describe a pre-order traversal.
//! - [`CollapseState`] is the set of collapsed ids. Toggling it never changes the shape of
//!   the tree, only what the next [`flatten`] reveals.
//!
//! The round-trip laws hold for every valid input:
//!
//! - `build(&flatten_all(&t)) == Ok(t)`
//! - `flatten_all(&build(&f)?) == f`
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_outline::{CollapseState, Node, build, flatten, flatten_all};
//!
//! let tree = vec![Node::new("A", ()).children([Node::new("B", ()), Node::new("C", ())])];
//!
//! let mut collapsed = CollapseState::new();
//! collapsed.toggle(&"A");
//! let rows = flatten(&tree, &collapsed);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].descendant_count, 2);
//!
//! collapsed.expand_all();
//! let rows = flatten(&tree, &collapsed);
//! let depths: Vec<_> = rows.iter().map(|row| row.depth).collect();
//! assert_eq!(depths, [0, 1, 1]);
//!
//! assert_eq!(build(&flatten_all(&tree)).unwrap(), tree);
//! ```
//!
//! Ids must be unique across the whole tree. [`validate_tree`] checks that before a tree is
//! handed to interactive code; [`build`] reports structural problems as [`OutlineError`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod build;
mod collapse;
mod error;
mod flatten;
mod types;

pub use build::build;
pub use collapse::{CollapseState, set_collapsed_flags};
pub use error::OutlineError;
pub use flatten::{
    find_node, flatten, flatten_all, position_of, remove_children_of, subtree_end, validate_tree,
};
pub use types::{FlatItem, Node};
