// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation constraints that tell a drag apart from a click or a tap.
//!
//! A press on a row does not start a drag right away. Mouse and pointer input
//! have to travel a minimum distance first; touch input has to hold still for
//! a while. [`ActivationGate`] tracks one press against one constraint and
//! reports when the drag should begin.
//!
//! Time is supplied by the caller in milliseconds; the gate never reads a
//! clock. Hosts that
//! want a touch drag to start while the finger is perfectly still call
//! [`ActivationGate::poll`] from their frame or timer callback.
//!
//! ```
//! use kurbo::Point;
//! use understory_sortable_tree::{Activation, ActivationGate, SensorKind, SensorOptions};
//!
//! let options = SensorOptions::default();
//! let mut gate = ActivationGate::new(options.constraint(SensorKind::Touch));
//!
//! assert_eq!(gate.on_down("row", Point::new(10.0, 10.0), 1_000), Activation::Pending);
//! // A small wobble is tolerated.
//! assert_eq!(gate.on_move(Point::new(12.0, 11.0), 1_200), Activation::Pending);
//! // Held long enough: the drag starts.
//! assert_eq!(gate.poll(1_550), Activation::Activated("row"));
//! ```

use kurbo::Point;

/// When a press turns into a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActivationConstraint {
    /// Activate once the pointer has moved strictly more than `distance`
    /// from where it went down.
    Distance {
        /// Travel required, in the same units as the event positions.
        distance: f64,
    },
    /// Activate once the press has been held for `delay` milliseconds.
    ///
    /// Moving strictly more than `tolerance` before that aborts the press, as
    /// does releasing it.
    Delay {
        /// Hold time in milliseconds.
        delay: u64,
        /// Movement allowed while holding.
        tolerance: f64,
    },
}

/// Input device families with their own activation rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Mouse input.
    Mouse,
    /// Touch input.
    Touch,
    /// Generic pointer input (pen, or pointer events that are not classified).
    Pointer,
    /// Keyboard input. Keyboard drags start immediately.
    Keyboard,
}

/// Per-sensor activation constraints.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorOptions {
    /// Constraint for [`SensorKind::Mouse`].
    pub mouse: ActivationConstraint,
    /// Constraint for [`SensorKind::Touch`].
    pub touch: ActivationConstraint,
    /// Constraint for [`SensorKind::Pointer`].
    pub pointer: ActivationConstraint,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            mouse: ActivationConstraint::Distance { distance: 10.0 },
            touch: ActivationConstraint::Delay {
                delay: 550,
                tolerance: 5.0,
            },
            pointer: ActivationConstraint::Distance { distance: 3.0 },
        }
    }
}

impl SensorOptions {
    /// The constraint for `kind`; `None` means activate on press.
    pub fn constraint(&self, kind: SensorKind) -> Option<ActivationConstraint> {
        match kind {
            SensorKind::Mouse => Some(self.mouse),
            SensorKind::Touch => Some(self.touch),
            SensorKind::Pointer => Some(self.pointer),
            SensorKind::Keyboard => None,
        }
    }
}

/// What an [`ActivationGate`] decided for an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation<K> {
    /// No press is being tracked.
    Idle,
    /// A press is being tracked but has not activated yet.
    Pending,
    /// The press became a drag of this target. The gate is idle again.
    Activated(K),
    /// The press was given up without activating. The gate is idle again.
    Aborted,
}

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    origin: Point,
    down_time: u64,
}

/// Tracks a single press against an [`ActivationConstraint`].
#[derive(Clone, Debug)]
pub struct ActivationGate<K> {
    constraint: Option<ActivationConstraint>,
    press: Option<Press<K>>,
}

impl<K> ActivationGate<K> {
    /// Create a gate. `None` activates every press immediately.
    pub fn new(constraint: Option<ActivationConstraint>) -> Self {
        Self {
            constraint,
            press: None,
        }
    }

    /// The constraint this gate enforces.
    pub fn constraint(&self) -> Option<ActivationConstraint> {
        self.constraint
    }

    /// Whether a press is waiting to activate.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.press.is_some()
    }

    /// Record a press on `target`.
    ///
    /// Replaces any press already being tracked.
    pub fn on_down(&mut self, target: K, position: Point, timestamp: u64) -> Activation<K> {
        match self.constraint {
            None | Some(ActivationConstraint::Delay { delay: 0, .. }) => {
                self.press = None;
                Activation::Activated(target)
            }
            Some(_) => {
                self.press = Some(Press {
                    target,
                    origin: position,
                    down_time: timestamp,
                });
                Activation::Pending
            }
        }
    }

    /// Track pointer movement of the current press.
    pub fn on_move(&mut self, position: Point, timestamp: u64) -> Activation<K> {
        let (Some(constraint), Some(press)) = (self.constraint, self.press.as_ref()) else {
            return Activation::Idle;
        };
        let travelled = press.origin.distance(position);
        match constraint {
            ActivationConstraint::Distance { distance } => {
                if travelled > distance {
                    self.activate()
                } else {
                    Activation::Pending
                }
            }
            ActivationConstraint::Delay { tolerance, .. } => {
                if travelled > tolerance {
                    self.press = None;
                    Activation::Aborted
                } else {
                    self.poll(timestamp)
                }
            }
        }
    }

    /// Check a delay constraint against the current time.
    ///
    /// Distance constraints only activate through [`Self::on_move`].
    pub fn poll(&mut self, now: u64) -> Activation<K> {
        let Some(press) = self.press.as_ref() else {
            return Activation::Idle;
        };
        let elapsed = now.saturating_sub(press.down_time);
        match self.constraint {
            Some(ActivationConstraint::Delay { delay, .. }) if elapsed >= delay => self.activate(),
            _ => Activation::Pending,
        }
    }

    /// The press was released before it activated.
    pub fn on_up(&mut self) -> Activation<K> {
        match self.press.take() {
            Some(_) => Activation::Aborted,
            None => Activation::Idle,
        }
    }

    /// Forget the current press. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    fn activate(&mut self) -> Activation<K> {
        match self.press.take() {
            Some(press) => Activation::Activated(press.target),
            None => Activation::Idle,
        }
    }
}
