// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-driven dragging.
//!
//! Arrow keys move a keyboard drag one step at a time. Up and Down jump to the
//! nearest row above or below; Left and Right change the projected depth by
//! one indentation level when the current slot allows it. The result is the
//! next pointer-equivalent coordinate, which the host feeds back in as if the
//! pointer had moved there.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use understory_collision::{CollisionInput, Droppable, Strategy};
use understory_outline::{FlatItem, position_of};

use crate::projection::project;

/// Arrow keys understood by [`keyboard_coordinates`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardCode {
    /// Move to the nearest row above.
    Up,
    /// Move to the nearest row below.
    Down,
    /// Outdent by one level.
    Left,
    /// Indent by one level.
    Right,
}

/// The drag state a keyboard step is computed from.
#[derive(Clone, Debug)]
pub struct KeyboardContext<'a, K, T> {
    /// The drag view: the active item present, its descendants removed.
    pub items: &'a [FlatItem<K, T>],
    /// Horizontal offset accumulated so far.
    pub offset: f64,
}

/// Compute where a keyboard drag moves for `code`.
///
/// `current` is the current drag coordinate, `input` the live geometry (its
/// `collision_rect` is the dragged row, `droppables` every row), and `over`
/// the row currently targeted. Returns `None` when the key has no effect.
pub fn keyboard_coordinates<K, T>(
    code: KeyboardCode,
    current: Point,
    context: &KeyboardContext<'_, K, T>,
    active: &K,
    over: Option<&K>,
    input: &CollisionInput<'_, K>,
    indentation_width: f64,
) -> Option<Point>
where
    K: Clone + PartialEq,
{
    match code {
        KeyboardCode::Left | KeyboardCode::Right => {
            let projection = project(
                context.items,
                active,
                over?,
                context.offset,
                indentation_width,
            )?;
            let step = match code {
                KeyboardCode::Left if projection.depth > projection.min_depth => -indentation_width,
                KeyboardCode::Right if projection.depth < projection.max_depth => indentation_width,
                _ => return None,
            };
            Some(current + Vec2::new(step, 0.0))
        }
        KeyboardCode::Up | KeyboardCode::Down => {
            let top = input.collision_rect.y0;
            let candidates: Vec<Droppable<K>> = input
                .droppables
                .iter()
                .filter(|droppable| Some(&droppable.id) != over)
                .filter(|droppable| match code {
                    KeyboardCode::Down => top < droppable.rect.y0,
                    _ => top > droppable.rect.y0,
                })
                .cloned()
                .collect();
            let ranked = Strategy::CORNER_DISTANCE.detect(&CollisionInput {
                pointer: None,
                collision_rect: input.collision_rect,
                droppables: &candidates,
            });
            let closest = &ranked.first()?.id;
            let rect = candidates.iter().find(|d| d.id == *closest)?.rect;

            let target = &context.items[position_of(context.items, closest)?];
            let current_item = &context.items[position_of(context.items, active)?];
            let levels = target.depth as f64 - current_item.depth as f64;
            let depth = project(
                context.items,
                active,
                closest,
                levels * indentation_width,
                indentation_width,
            )
            .map_or(target.depth, |projection| projection.depth);

            Some(Point::new(
                rect.x0 + depth as f64 * indentation_width,
                rect.y0,
            ))
        }
    }
}
