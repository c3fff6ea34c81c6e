// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The individual collision strategies and their metrics.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Point, Rect};

use crate::{Collision, CollisionInput};

/// A single geometric strategy for ranking droppables.
///
/// Every strategy returns candidates ordered best first. For the distance
/// strategies a lower [`Collision::value`] is better; for
/// [`Strategy::RectIntersection`] a higher overlap ratio is better.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Distance between the center of the dragged rect and each droppable's center.
    CenterDistance {
        /// Ignore droppables farther than this, if set.
        max_distance: Option<f64>,
    },
    /// Droppables whose rect contains the pointer, edges included.
    ///
    /// Ranked by the average distance from the pointer to the rect's corners.
    /// Yields nothing when there is no pointer (for example, keyboard drags).
    PointerWithin,
    /// Average distance between corresponding corners of the dragged rect and each droppable.
    CornerDistance {
        /// Ignore droppables farther than this, if set.
        max_distance: Option<f64>,
    },
    /// Overlap between the dragged rect and each droppable, as intersection over union.
    ///
    /// Only droppables with a positive overlap are reported.
    RectIntersection,
}

impl Strategy {
    /// Unbounded center distance.
    pub const CENTER_DISTANCE: Self = Self::CenterDistance { max_distance: None };
    /// Unbounded corner distance.
    pub const CORNER_DISTANCE: Self = Self::CornerDistance { max_distance: None };

    /// Rank the droppables in `input`, best first.
    pub fn detect<K: Clone>(&self, input: &CollisionInput<'_, K>) -> Vec<Collision<K>> {
        let mut out: Vec<Collision<K>> = Vec::new();
        match *self {
            Self::CenterDistance { max_distance } => {
                let center = input.collision_rect.center();
                for droppable in input.droppables {
                    let value = center.distance(droppable.rect.center());
                    if within(value, max_distance) {
                        out.push(Collision::new(droppable.id.clone(), value));
                    }
                }
                sort_ascending(&mut out);
            }
            Self::PointerWithin => {
                let Some(pointer) = input.pointer else {
                    return out;
                };
                for droppable in input.droppables {
                    if contains_inclusive(droppable.rect, pointer) {
                        let value = average_corner_distance(droppable.rect, |_| pointer);
                        if value.is_finite() {
                            out.push(Collision::new(droppable.id.clone(), value));
                        }
                    }
                }
                sort_ascending(&mut out);
            }
            Self::CornerDistance { max_distance } => {
                let dragged = corners(input.collision_rect);
                for droppable in input.droppables {
                    let value = average_corner_distance(droppable.rect, |ix| dragged[ix]);
                    if within(value, max_distance) {
                        out.push(Collision::new(droppable.id.clone(), value));
                    }
                }
                sort_ascending(&mut out);
            }
            Self::RectIntersection => {
                for droppable in input.droppables {
                    let value = intersection_ratio(input.collision_rect, droppable.rect);
                    if value > 0.0 {
                        out.push(Collision::new(droppable.id.clone(), value));
                    }
                }
                out.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
            }
        }
        out
    }
}

fn within(value: f64, max_distance: Option<f64>) -> bool {
    value.is_finite() && max_distance.is_none_or(|max| value <= max)
}

/// Stable sort; equal metrics keep droppable order.
fn sort_ascending<K>(collisions: &mut [Collision<K>]) {
    collisions.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
}

fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}

/// Top-left, top-right, bottom-left, bottom-right.
fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
}

/// Distances are summed in ascending order; mirror-image rects score bit-identically.
fn average_corner_distance(rect: Rect, other: impl Fn(usize) -> Point) -> f64 {
    let own = corners(rect);
    let mut distances: [f64; 4] = core::array::from_fn(|ix| own[ix].distance(other(ix)));
    distances.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    distances.iter().sum::<f64>() / 4.0
}

/// Intersection area over union area, in `[0, 1]`.
fn intersection_ratio(a: Rect, b: Rect) -> f64 {
    let width = a.x1.min(b.x1) - a.x0.max(b.x0);
    let height = a.y1.min(b.y1) - a.y0.max(b.y0);
    if width <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    let overlap = width * height;
    let union = a.area() + b.area() - overlap;
    if union > 0.0 { overlap / union } else { 0.0 }
}
