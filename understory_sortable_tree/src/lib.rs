// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable_tree --heading-base-level=0

//! Understory Sortable Tree: headless drag-and-drop reordering for outlines.
//!
//! This crate turns a stream of normalized drag events into legal edits of an
//! [`understory_outline`] tree. It does no rendering and reads no devices; the
//! host reports where the pointer is and which row it is over, and receives the
//! rebuilt tree, announcement text, and cursor requests through [`OutlineHost`].
//!
//! ## Pieces
//!
//! - [`SortableTree`]: the session controller. One drag at a time, moving
//!   through [`DragPhase::Idle`], [`DragPhase::Dragging`], and a transient
//!   [`DragPhase::Committing`].
//! - [`project`]: the projected depth and parent of the dragged row, given the
//!   row it is over and the horizontal pointer offset. The depth is clamped so
//!   the row nests at most one level under the row above it.
//! - [`DropOutcome`] and [`apply_drop`]: a drop is decided once as a no-op, a
//!   reorder among siblings, or a reparent, and then applied by a pure reducer
//!   that rebuilds the tree from a scratch copy.
//! - [`movement_announcement`] and [`Announcer`]: de-duplicated screen reader
//!   text, in English by default.
//! - [`ActivationGate`]: distance and delay constraints that tell a drag apart
//!   from a click or a long press.
//! - [`keyboard_coordinates`]: arrow key steps for keyboard dragging.
//!
//! Collision detection comes from [`understory_collision`]; the default
//! detector is its [`FallbackChain`](understory_collision::FallbackChain).
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_outline::Node;
//! use understory_sortable_tree::{OutlineHost, SortableTree};
//!
//! struct Sidebar {
//!     tree: Vec<Node<u32, &'static str>>,
//!     spoken: Vec<String>,
//! }
//!
//! impl OutlineHost<u32, &'static str> for Sidebar {
//!     fn tree_changed(&mut self, tree: &[Node<u32, &'static str>]) {
//!         self.tree = tree.to_vec();
//!     }
//!
//!     fn announce(&mut self, text: Option<&str>) {
//!         self.spoken.extend(text.map(String::from));
//!     }
//! }
//!
//! let tree = vec![
//!     Node::new(1, "Guide").children([Node::new(2, "Install"), Node::new(3, "Usage")]),
//! ];
//! let mut sortable = SortableTree::new(Sidebar { tree: Vec::new(), spoken: Vec::new() });
//! sortable.set_tree(tree).unwrap();
//!
//! // Drag "Install" below "Usage" and one level to the right.
//! sortable.start(2);
//! sortable.drag_over(Some(3));
//! sortable.drag_move(20.0);
//! sortable.end(Some(3));
//!
//! let usage = &sortable.host().tree[0].children[0];
//! assert_eq!(usage.payload, "Usage");
//! assert_eq!(usage.children[0].payload, "Install");
//! assert_eq!(sortable.host().spoken.last().unwrap(), "2 was dropped under 3.");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod announce;
mod commit;
mod keyboard;
mod projection;
mod sensor;
mod session;

pub use announce::{
    AnnouncedPosition, Announcement, Announcer, DragEvent, EnglishAnnouncer, Placement,
    movement_announcement,
};
pub use commit::apply_drop;
pub use keyboard::{KeyboardCode, KeyboardContext, keyboard_coordinates};
pub use projection::{Anchor, DropOutcome, Projection, project, resolve_drop};
pub use sensor::{Activation, ActivationConstraint, ActivationGate, SensorKind, SensorOptions};
pub use session::{
    CursorStyle, DragPhase, InvalidTree, OutlineHost, SortableConfig, SortableTree,
};
