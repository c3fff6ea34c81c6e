// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collision --heading-base-level=0

//! Understory Collision: choosing a drop target from overlapping rectangles.
//!
//! While something is dragged, its rectangle usually overlaps several candidate drop
//! targets at once. This crate ranks those candidates and picks one deterministically.
//!
//! ## Key types
//!
//! - [`Droppable`]: a candidate id with its bounds.
//! - [`CollisionInput`]: the pointer (if any), the dragged rectangle, and the candidates.
//!   All rectangles should live in the same coordinate space.
//! - [`Strategy`]: one geometric ranking: center distance, pointer containment, corner
//!   distance, or rectangle intersection.
//! - [`FallbackChain`]: runs strategies in order and returns the first non-empty ranking.
//! - [`CollisionDetection`]: the seam drag controllers use. [`FallbackChain`] implements it,
//!   and so does any `Fn(&CollisionInput<'_, K>) -> Vec<Collision<K>>` closure.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_collision::{
//!     CollisionDetection, CollisionInput, Droppable, FallbackChain, first_collision,
//! };
//!
//! let rows = [
//!     Droppable::new("intro", Rect::new(0.0, 0.0, 200.0, 24.0)),
//!     Droppable::new("usage", Rect::new(0.0, 24.0, 200.0, 48.0)),
//! ];
//! let input = CollisionInput {
//!     pointer: Some(Point::new(40.0, 30.0)),
//!     collision_rect: Rect::new(0.0, 20.0, 200.0, 44.0),
//!     droppables: &rows,
//! };
//!
//! let hits = FallbackChain::default().detect(&input);
//! assert_eq!(first_collision(&hits), Some(&"usage"));
//! ```
//!
//! ## Ordering
//!
//! Within a strategy, candidates with equal scores keep the order of
//! [`CollisionInput::droppables`]. Non-finite scores are dropped.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

mod strategy;

pub use strategy::Strategy;

/// A candidate drop target.
#[derive(Clone, Debug, PartialEq)]
pub struct Droppable<K> {
    /// Identifier reported back in [`Collision::id`].
    pub id: K,
    /// Bounds of the target.
    pub rect: Rect,
}

impl<K> Droppable<K> {
    /// Create a droppable.
    pub fn new(id: K, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Everything a strategy looks at for one query.
#[derive(Clone, Debug)]
pub struct CollisionInput<'a, K> {
    /// Pointer position, if the drag is pointer driven.
    pub pointer: Option<Point>,
    /// Current bounds of the dragged item.
    pub collision_rect: Rect,
    /// Candidate drop targets.
    pub droppables: &'a [Droppable<K>],
}

/// A ranked candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Collision<K> {
    /// The droppable's id.
    pub id: K,
    /// The strategy's score for this candidate.
    ///
    /// Distances for the distance strategies, an overlap ratio for
    /// [`Strategy::RectIntersection`].
    pub value: f64,
}

impl<K> Collision<K> {
    /// Create a collision record.
    pub fn new(id: K, value: f64) -> Self {
        Self { id, value }
    }
}

/// Something that ranks drop targets, best first.
pub trait CollisionDetection<K> {
    /// Rank the droppables of `input`. An empty result means "no target".
    fn detect(&self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>>;
}

impl<K, F> CollisionDetection<K> for F
where
    F: Fn(&CollisionInput<'_, K>) -> Vec<Collision<K>>,
{
    fn detect(&self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
        self(input)
    }
}

impl<K: Clone> CollisionDetection<K> for Strategy {
    fn detect(&self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
        Self::detect(self, input)
    }
}

/// Strategies tried in order until one produces a candidate.
///
/// The default chain is center distance, then pointer containment, then corner
/// distance, then rectangle intersection. Once a strategy yields anything, the
/// strategies after it are not run.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackChain {
    /// Strategies in priority order.
    pub strategies: SmallVec<[Strategy; 4]>,
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new([
            Strategy::CENTER_DISTANCE,
            Strategy::PointerWithin,
            Strategy::CORNER_DISTANCE,
            Strategy::RectIntersection,
        ])
    }
}

impl FallbackChain {
    /// Create a chain from strategies in priority order.
    pub fn new(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        Self {
            strategies: strategies.into_iter().collect(),
        }
    }

    /// Like [`CollisionDetection::detect`], but also reports which strategy matched.
    pub fn detect_with_strategy<K: Clone>(
        &self,
        input: &CollisionInput<'_, K>,
    ) -> Option<(Strategy, Vec<Collision<K>>)> {
        self.strategies.iter().find_map(|strategy| {
            let hits = strategy.detect(input);
            (!hits.is_empty()).then_some((*strategy, hits))
        })
    }
}

impl<K: Clone> CollisionDetection<K> for FallbackChain {
    fn detect(&self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
        self.detect_with_strategy(input)
            .map(|(_, hits)| hits)
            .unwrap_or_default()
    }
}

/// The id of the best-ranked collision, if any.
#[inline]
pub fn first_collision<K>(collisions: &[Collision<K>]) -> Option<&K> {
    collisions.first().map(|collision| &collision.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rows() -> Vec<Droppable<u32>> {
        vec![
            Droppable::new(1, Rect::new(0.0, 0.0, 100.0, 20.0)),
            Droppable::new(2, Rect::new(0.0, 20.0, 100.0, 40.0)),
        ]
    }

    #[test]
    fn default_chain_uses_center_distance_first() {
        let droppables = rows();
        let input = CollisionInput {
            pointer: Some(Point::new(5.0, 5.0)),
            collision_rect: Rect::new(0.0, 18.0, 100.0, 38.0),
            droppables: &droppables,
        };
        let (strategy, hits) = FallbackChain::default()
            .detect_with_strategy(&input)
            .unwrap();
        assert_eq!(strategy, Strategy::CENTER_DISTANCE);
        // Center distance wins even though the pointer is inside row 1.
        assert_eq!(first_collision(&hits), Some(&2));
    }

    #[test]
    fn falls_through_to_the_first_non_empty_strategy() {
        let droppables = rows();
        let chain = FallbackChain::new([
            Strategy::CenterDistance {
                max_distance: Some(1.0),
            },
            Strategy::PointerWithin,
            Strategy::CORNER_DISTANCE,
        ]);
        let input = CollisionInput {
            pointer: Some(Point::new(5.0, 5.0)),
            collision_rect: Rect::new(0.0, 18.0, 100.0, 38.0),
            droppables: &droppables,
        };
        let (strategy, hits) = chain.detect_with_strategy(&input).unwrap();
        assert_eq!(strategy, Strategy::PointerWithin);
        assert_eq!(first_collision(&hits), Some(&1));

        // Without a pointer, containment yields nothing and corners decide.
        let input = CollisionInput {
            pointer: None,
            ..input
        };
        let (strategy, hits) = chain.detect_with_strategy(&input).unwrap();
        assert_eq!(strategy, Strategy::CORNER_DISTANCE);
        assert_eq!(first_collision(&hits), Some(&2));
    }

    #[test]
    fn no_droppables_means_no_target() {
        let input: CollisionInput<'_, u32> = CollisionInput {
            pointer: Some(Point::ORIGIN),
            collision_rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            droppables: &[],
        };
        assert!(FallbackChain::default().detect(&input).is_empty());
        assert!(FallbackChain::default().detect_with_strategy(&input).is_none());
        assert_eq!(first_collision::<u32>(&[]), None);
    }

    #[test]
    fn closures_are_detectors() {
        let droppables = rows();
        let input = CollisionInput {
            pointer: None,
            collision_rect: Rect::new(0.0, 0.0, 100.0, 20.0),
            droppables: &droppables,
        };
        let last = |input: &CollisionInput<'_, u32>| -> Vec<Collision<u32>> {
            input
                .droppables
                .iter()
                .rev()
                .map(|d| Collision::new(d.id, 0.0))
                .collect()
        };
        assert_eq!(first_collision(&last.detect(&input)), Some(&2));
    }
}
