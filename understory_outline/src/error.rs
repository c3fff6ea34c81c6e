// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors for outline trees and flat sequences.

use core::fmt;

/// A structural problem found while validating or rebuilding an outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineError<K> {
    /// The same id appears more than once.
    DuplicateId(K),
    /// An item names a parent that does not appear earlier in the sequence.
    MissingParent {
        /// The offending item.
        id: K,
        /// The parent it names.
        parent: K,
    },
    /// An item's parent is not the nearest open ancestor at `depth - 1`.
    ParentMismatch {
        /// The offending item.
        id: K,
        /// The parent it names.
        parent: Option<K>,
        /// The parent implied by its depth and position.
        expected: Option<K>,
    },
    /// An item is nested more than one level below the item before it.
    DepthMismatch {
        /// The offending item.
        id: K,
        /// Its depth.
        depth: usize,
        /// The deepest depth allowed at its position.
        max: usize,
    },
    /// An operation referred to an id that is not present.
    UnknownId(K),
}

impl<K: fmt::Debug> fmt::Display for OutlineError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate id {id:?}"),
            Self::MissingParent { id, parent } => {
                write!(f, "{id:?} names parent {parent:?}, which does not precede it")
            }
            Self::ParentMismatch {
                id,
                parent,
                expected,
            } => write!(
                f,
                "{id:?} names parent {parent:?} but its position implies {expected:?}"
            ),
            Self::DepthMismatch { id, depth, max } => {
                write!(f, "{id:?} is at depth {depth}, deeper than the allowed {max}")
            }
            Self::UnknownId(id) => write!(f, "unknown id {id:?}"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for OutlineError<K> {}
