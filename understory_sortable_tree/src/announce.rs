// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen reader announcements for drag sessions.
//!
//! Announcements are produced as structured [`Announcement`] values and
//! rendered to text by an [`Announcer`]. [`EnglishAnnouncer`] is the default:
//!
//! ```rust
//! use understory_sortable_tree::{Announcement, Announcer, EnglishAnnouncer, Placement};
//!
//! let moved = Announcement::Moved {
//!     id: "Usage",
//!     dropped: false,
//!     placement: Placement::Under("Guide"),
//! };
//! assert_eq!(EnglishAnnouncer.render(&moved), "Usage was nested under Guide.");
//! ```
//!
//! Movement announcements are de-duplicated: while the projected parent and
//! the row under the pointer stay the same, pointer jitter produces nothing.

use alloc::format;
use alloc::string::String;
use core::fmt::Display;

use understory_outline::{FlatItem, position_of};

use crate::projection::{Projection, Slot};

/// The drag event a movement announcement is generated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragEvent {
    /// The pointer moved horizontally.
    Move,
    /// The row under the pointer changed.
    Over,
    /// The item was dropped.
    End,
}

impl DragEvent {
    /// Whether this event finishes the drag.
    #[inline]
    pub fn is_drop(self) -> bool {
        matches!(self, Self::End)
    }
}

/// Where the dragged item is, relative to a reference row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement<K> {
    /// Directly before this row, which is the first row after the item.
    Before(K),
    /// After this row, as its next sibling.
    After(K),
    /// As the first child of this row.
    Under(K),
}

/// Something worth telling assistive technology about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Announcement<K> {
    /// A drag started.
    PickedUp {
        /// The dragged item.
        id: K,
    },
    /// The projected position changed, or the item was dropped.
    Moved {
        /// The dragged item.
        id: K,
        /// Whether this describes the final drop.
        dropped: bool,
        /// Where the item is.
        placement: Placement<K>,
    },
    /// The drag was cancelled and nothing moved.
    Cancelled {
        /// The dragged item.
        id: K,
    },
}

/// The last position a movement announcement described.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnouncedPosition<K> {
    /// Projected parent at the time.
    pub parent: Option<K>,
    /// Row under the pointer at the time.
    pub over: K,
}

/// Describe where `active` is projected to land.
///
/// `items` is the drag view (the active item present, its descendants
/// removed) and `projection` the result of
/// [`project`](crate::project) for the same ids.
///
/// For every event except [`DragEvent::End`], nothing is returned when the
/// projected parent and `over` match `last`; otherwise `last` is updated. The
/// reference row is chosen from the reordered view:
///
/// - with no row above the slot, the item is "before" the row below it;
/// - deeper than the row above, it is "under" that row;
/// - otherwise it is "after" the row above or the ancestor of that row that
///   sits at the projected depth.
pub fn movement_announcement<K, T>(
    event: DragEvent,
    items: &[FlatItem<K, T>],
    active: &K,
    over: &K,
    projection: &Projection<K>,
    last: &mut Option<AnnouncedPosition<K>>,
) -> Option<Announcement<K>>
where
    K: Clone + PartialEq,
{
    if !event.is_drop() {
        let unchanged = last
            .as_ref()
            .is_some_and(|pos| pos.parent == projection.parent && pos.over == *over);
        if unchanged {
            return None;
        }
        *last = Some(AnnouncedPosition {
            parent: projection.parent.clone(),
            over: over.clone(),
        });
    }

    let slot = Slot::locate(items, active, over)?;
    let placement = match slot.predecessor.map(|ix| &items[ix]) {
        None => Placement::Before(items[slot.successor?].id.clone()),
        Some(previous) if projection.depth > previous.depth => {
            Placement::Under(previous.id.clone())
        }
        Some(previous) => {
            let mut sibling = previous;
            while projection.depth < sibling.depth {
                let parent = sibling.parent.as_ref()?;
                sibling = &items[position_of(items, parent)?];
            }
            Placement::After(sibling.id.clone())
        }
    };

    Some(Announcement::Moved {
        id: active.clone(),
        dropped: event.is_drop(),
        placement,
    })
}

/// Renders announcements as text.
pub trait Announcer<K> {
    /// Produce the text for `announcement`.
    fn render(&self, announcement: &Announcement<K>) -> String;
}

impl<K, F> Announcer<K> for F
where
    F: Fn(&Announcement<K>) -> String,
{
    fn render(&self, announcement: &Announcement<K>) -> String {
        self(announcement)
    }
}

/// English announcements, naming items by their [`Display`] form.
#[derive(Copy, Clone, Debug, Default)]
pub struct EnglishAnnouncer;

impl<K: Display> Announcer<K> for EnglishAnnouncer {
    fn render(&self, announcement: &Announcement<K>) -> String {
        match announcement {
            Announcement::PickedUp { id } => format!("Picked up {id}."),
            Announcement::Cancelled { id } => {
                format!("Moving was cancelled. {id} was dropped in its original position.")
            }
            Announcement::Moved {
                id,
                dropped,
                placement,
            } => {
                let (moved, nested) = if *dropped {
                    ("dropped", "dropped")
                } else {
                    ("moved", "nested")
                };
                match placement {
                    Placement::Before(other) => format!("{id} was {moved} before {other}."),
                    Placement::After(other) => format!("{id} was {moved} after {other}."),
                    Placement::Under(other) => format!("{id} was {nested} under {other}."),
                }
            }
        }
    }
}
