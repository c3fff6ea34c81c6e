// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session controller.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};
use core::hash::Hash;

use kurbo::Point;
use understory_collision::{CollisionDetection, CollisionInput, FallbackChain, first_collision};
use understory_outline::{
    CollapseState, FlatItem, Node, OutlineError, find_node, flatten, position_of,
    remove_children_of, set_collapsed_flags, validate_tree,
};

use crate::announce::{
    AnnouncedPosition, Announcement, Announcer, DragEvent, EnglishAnnouncer, movement_announcement,
};
use crate::commit::apply_drop;
use crate::keyboard::{self, KeyboardCode, KeyboardContext};
use crate::projection::{DropOutcome, Projection, project, resolve_drop};
use crate::sensor::{ActivationGate, SensorKind, SensorOptions};

/// Pointer cursor requested while a drag is live.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// The "grabbing" hand.
    Grabbing,
}

/// The application side of a [`SortableTree`].
///
/// Only [`tree_changed`](Self::tree_changed) is required. It is called once
/// per committed drop and once per collapse or expand action, never on
/// cancellation.
pub trait OutlineHost<K, T> {
    /// The tree changed; `tree` is the new state.
    fn tree_changed(&mut self, tree: &[Node<K, T>]);

    /// Text for assistive technology, sent once per drag event.
    ///
    /// `None` means the event has nothing new to say.
    fn announce(&mut self, text: Option<&str>) {
        let _ = text;
    }

    /// Apply (`Some`) or clear (`None`) a global cursor override.
    ///
    /// Every `Some` is followed by exactly one `None`, on whichever path the
    /// drag ends.
    fn set_cursor(&mut self, cursor: Option<CursorStyle>) {
        let _ = cursor;
    }
}

impl<K, T, H: OutlineHost<K, T> + ?Sized> OutlineHost<K, T> for &mut H {
    fn tree_changed(&mut self, tree: &[Node<K, T>]) {
        (**self).tree_changed(tree);
    }

    fn announce(&mut self, text: Option<&str>) {
        (**self).announce(text);
    }

    fn set_cursor(&mut self, cursor: Option<CursorStyle>) {
        (**self).set_cursor(cursor);
    }
}

/// Tunables for a [`SortableTree`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SortableConfig {
    /// Horizontal distance for one nesting level.
    pub indentation_width: f64,
    /// Activation constraints handed out by [`SortableTree::activation_gate`].
    pub sensors: SensorOptions,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            indentation_width: 20.0,
            sensors: SensorOptions::default(),
        }
    }
}

/// Lifecycle of a drag session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No drag in progress.
    Idle,
    /// An item is being dragged.
    Dragging,
    /// A drop is being applied. Only observable from inside host callbacks.
    Committing,
}

/// A tree rejected by [`SortableTree::set_tree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidTree<K, T> {
    /// What was wrong with it.
    pub error: OutlineError<K>,
    /// The rejected tree, unchanged.
    pub tree: Vec<Node<K, T>>,
}

impl<K: Debug, T> Display for InvalidTree<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid outline: {}", self.error)
    }
}

impl<K: Debug, T: Debug> core::error::Error for InvalidTree<K, T> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        None
    }
}

#[derive(Clone, Debug)]
struct Session<K> {
    active: K,
    over: Option<K>,
    offset: f64,
    last: Option<AnnouncedPosition<K>>,
}

/// Headless drag-and-drop reordering for an outline.
///
/// `SortableTree` owns the tree, its collapsed set, and at most one drag
/// session. Hosts feed it normalized events and receive results through
/// [`OutlineHost`]:
///
/// - [`start`](Self::start) begins a drag of a visible row;
/// - [`drag_move`](Self::drag_move) and [`drag_over`](Self::drag_over) (or
///   [`detect_over`](Self::detect_over)) update the horizontal offset and the
///   targeted row;
/// - [`end`](Self::end) commits the projected drop, and
///   [`cancel`](Self::cancel) abandons it.
///
/// The flat view is recomputed from the tree on demand and never stored.
/// A drop is applied to a scratch copy first; if that fails the previous
/// tree stays in place.
///
/// Collision detection and announcement text are pluggable through `D` and
/// `A`; see [`with_parts`](Self::with_parts).
///
/// ```rust
/// use understory_outline::Node;
/// use understory_sortable_tree::{DropOutcome, OutlineHost, SortableTree};
///
/// #[derive(Default)]
/// struct Host {
///     changes: usize,
/// }
///
/// impl OutlineHost<&'static str, ()> for Host {
///     fn tree_changed(&mut self, _tree: &[Node<&'static str, ()>]) {
///         self.changes += 1;
///     }
/// }
///
/// let mut sortable = SortableTree::new(Host::default());
/// sortable
///     .set_tree(vec![Node::new("A", ()).children([Node::new("B", ()), Node::new("C", ())])])
///     .unwrap();
///
/// assert!(sortable.start("C"));
/// sortable.drag_over(Some("B"));
/// assert!(!sortable.end(Some("B")).is_noop());
///
/// let order: Vec<_> = sortable.tree()[0].children.iter().map(|n| n.id).collect();
/// assert_eq!(order, ["C", "B"]);
/// assert_eq!(sortable.host().changes, 1);
/// ```
pub struct SortableTree<K, T, H, D = FallbackChain, A = EnglishAnnouncer>
where
    K: Clone + Eq + Hash + Debug,
    T: Clone,
    H: OutlineHost<K, T>,
    D: CollisionDetection<K>,
    A: Announcer<K>,
{
    host: H,
    tree: Vec<Node<K, T>>,
    collapsed: CollapseState<K>,
    config: SortableConfig,
    detector: D,
    announcer: A,
    phase: DragPhase,
    session: Option<Session<K>>,
}

impl<K, T, H, D, A> Debug for SortableTree<K, T, H, D, A>
where
    K: Clone + Eq + Hash + Debug,
    T: Clone,
    H: OutlineHost<K, T>,
    D: CollisionDetection<K>,
    A: Announcer<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableTree")
            .field("roots", &self.tree.len())
            .field("collapsed", &self.collapsed.len())
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("active", &self.active())
            .field("over", &self.over())
            .finish_non_exhaustive()
    }
}

impl<K, T, H> SortableTree<K, T, H>
where
    K: Clone + Eq + Hash + Debug + Display,
    T: Clone,
    H: OutlineHost<K, T>,
{
    /// Create an empty controller with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, SortableConfig::default())
    }

    /// Create an empty controller with `config`.
    pub fn with_config(host: H, config: SortableConfig) -> Self {
        Self::with_parts(host, config, FallbackChain::default(), EnglishAnnouncer)
    }
}

impl<K, T, H, D, A> SortableTree<K, T, H, D, A>
where
    K: Clone + Eq + Hash + Debug,
    T: Clone,
    H: OutlineHost<K, T>,
    D: CollisionDetection<K>,
    A: Announcer<K>,
{
    /// Create an empty controller with an explicit detector and announcer.
    pub fn with_parts(host: H, config: SortableConfig, detector: D, announcer: A) -> Self {
        Self {
            host,
            tree: Vec::new(),
            collapsed: CollapseState::new(),
            config,
            detector,
            announcer,
            phase: DragPhase::Idle,
            session: None,
        }
    }

    /// Replace the tree.
    ///
    /// The tree is validated first; a rejected tree is handed back untouched
    /// and the current one stays. A live drag is abandoned without an
    /// announcement. The collapsed set is re-seeded from the nodes' flags.
    /// This does not call [`OutlineHost::tree_changed`].
    pub fn set_tree(&mut self, tree: Vec<Node<K, T>>) -> Result<(), InvalidTree<K, T>> {
        if let Err(error) = validate_tree(&tree) {
            log::debug!("rejected tree: {error}");
            return Err(InvalidTree { error, tree });
        }
        if self.session.is_some() {
            log::debug!("tree replaced during a drag; abandoning it");
            self.finish();
        }
        self.collapsed = CollapseState::from_tree(&tree);
        self.tree = tree;
        Ok(())
    }

    /// The current tree.
    pub fn tree(&self) -> &[Node<K, T>] {
        &self.tree
    }

    /// The collapsed ids.
    pub fn collapse_state(&self) -> &CollapseState<K> {
        &self.collapsed
    }

    /// The configuration.
    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The dragged item, if a drag is live.
    pub fn active(&self) -> Option<&K> {
        self.session.as_ref().map(|s| &s.active)
    }

    /// The targeted row, if any.
    pub fn over(&self) -> Option<&K> {
        self.session.as_ref().and_then(|s| s.over.as_ref())
    }

    /// Horizontal offset of the live drag, or 0.
    pub fn offset(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.offset)
    }

    /// The visible rows.
    ///
    /// Collapsed nodes hide their descendants, and during a drag so does the
    /// dragged item.
    pub fn flattened(&self) -> Vec<FlatItem<K, T>> {
        let visible = flatten(&self.tree, &self.collapsed);
        match &self.session {
            Some(session) => remove_children_of(&visible, core::slice::from_ref(&session.active)),
            None => visible,
        }
    }

    /// Where the dragged item would land if dropped now.
    pub fn projection(&self) -> Option<Projection<K>> {
        let session = self.session.as_ref()?;
        let over = session.over.as_ref()?;
        project(
            &self.flattened(),
            &session.active,
            over,
            session.offset,
            self.config.indentation_width,
        )
    }

    /// An activation gate for `kind`, using the configured constraints.
    pub fn activation_gate(&self, kind: SensorKind) -> ActivationGate<K> {
        ActivationGate::new(self.config.sensors.constraint(kind))
    }

    /// Begin dragging `active`.
    ///
    /// Rejected (returning `false`, with no state change) while another drag
    /// is live or when `active` is not a visible row.
    pub fn start(&mut self, active: K) -> bool {
        if self.phase != DragPhase::Idle {
            log::trace!("ignoring start of {active:?}: a drag is already live");
            return false;
        }
        let visible = flatten(&self.tree, &self.collapsed);
        let Some(ix) = position_of(&visible, &active) else {
            log::trace!("ignoring start of {active:?}: not a visible row");
            return false;
        };
        let parent = visible[ix].parent.clone();
        log::debug!("drag started on {active:?}");

        self.session = Some(Session {
            active: active.clone(),
            over: Some(active.clone()),
            offset: 0.0,
            last: Some(AnnouncedPosition {
                parent,
                over: active.clone(),
            }),
        });
        self.phase = DragPhase::Dragging;
        self.host.set_cursor(Some(CursorStyle::Grabbing));
        let text = self
            .announcer
            .render(&Announcement::PickedUp { id: active });
        self.host.announce(Some(&text));
        true
    }

    /// Update the horizontal pointer offset of the live drag.
    pub fn drag_move(&mut self, offset_x: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.offset = offset_x;
        self.announce_movement(DragEvent::Move);
    }

    /// Update the targeted row of the live drag.
    pub fn drag_over(&mut self, over: Option<K>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.over = over;
        self.announce_movement(DragEvent::Over);
    }

    /// Run the collision detector and target its best candidate.
    ///
    /// Returns the new target. Does nothing outside a drag.
    pub fn detect_over(&mut self, input: &CollisionInput<'_, K>) -> Option<K> {
        if self.session.is_none() {
            return None;
        }
        let hits = self.detector.detect(input);
        let over = first_collision(&hits).cloned();
        log::trace!("collision detection picked {over:?} from {} candidates", hits.len());
        self.drag_over(over.clone());
        over
    }

    /// Drop the dragged item on `over`.
    ///
    /// The outcome is decided from the projection against `over`. Anything
    /// other than [`DropOutcome::NoOp`] is applied to a copy of the tree; on
    /// success the copy replaces the tree and the host is notified. If the
    /// copy cannot be built the old tree stays, the failure is logged, and
    /// `NoOp` is returned. The session ends either way.
    pub fn end(&mut self, over: Option<K>) -> DropOutcome<K> {
        if self.phase != DragPhase::Dragging {
            return DropOutcome::NoOp;
        }
        let items = self.flattened();
        let Some(mut session) = self.session.take() else {
            return DropOutcome::NoOp;
        };
        self.phase = DragPhase::Committing;

        let indent = self.config.indentation_width;
        let projection = over
            .as_ref()
            .and_then(|over| project(&items, &session.active, over, session.offset, indent));
        let (outcome, mut announcement) = match (&over, &projection) {
            (Some(over), Some(projection)) => (
                resolve_drop(&items, &session.active, over, Some(projection)),
                movement_announcement(
                    DragEvent::End,
                    &items,
                    &session.active,
                    over,
                    projection,
                    &mut session.last,
                ),
            ),
            _ => (DropOutcome::NoOp, None),
        };

        let outcome = match apply_drop(&self.tree, &outcome) {
            Ok(Some(tree)) => {
                log::debug!("committed {outcome:?}");
                self.tree = tree;
                self.host.tree_changed(&self.tree);
                outcome
            }
            Ok(None) => {
                log::debug!("drop of {:?} changed nothing", session.active);
                outcome
            }
            Err(error) => {
                log::warn!("discarding drop of {:?}: {error}", session.active);
                announcement = None;
                DropOutcome::NoOp
            }
        };

        let text = announcement.map(|a| self.announcer.render(&a));
        self.host.announce(text.as_deref());
        self.finish();
        outcome
    }

    /// Abandon the live drag. The tree is not touched.
    ///
    /// Returns `false` if there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if self.phase != DragPhase::Dragging {
            return false;
        }
        let Some(session) = self.session.take() else {
            return false;
        };
        log::debug!("drag of {:?} cancelled", session.active);
        let text = self
            .announcer
            .render(&Announcement::Cancelled { id: session.active });
        self.host.announce(Some(&text));
        self.finish();
        true
    }

    /// Flip the collapsed state of `id` and notify the host.
    ///
    /// Returns `false`, without notifying, if `id` is not in the tree.
    pub fn toggle_collapsed(&mut self, id: &K) -> bool {
        if find_node(&self.tree, id).is_none() {
            return false;
        }
        let collapsed = self.collapsed.toggle(id);
        log::debug!("{id:?} collapsed: {collapsed}");
        self.publish_collapsed();
        true
    }

    /// Expand every node and notify the host.
    ///
    /// Returns `false`, without notifying, if nothing was collapsed.
    pub fn expand_all(&mut self) -> bool {
        if !self.collapsed.expand_all() {
            return false;
        }
        log::debug!("expanded all");
        self.publish_collapsed();
        true
    }

    /// The next keyboard-drag coordinate for `code`.
    ///
    /// See [`keyboard_coordinates`](crate::keyboard_coordinates). Returns
    /// `None` outside a drag.
    pub fn keyboard_coordinates(
        &self,
        code: KeyboardCode,
        current: Point,
        input: &CollisionInput<'_, K>,
    ) -> Option<Point> {
        let session = self.session.as_ref()?;
        let items = self.flattened();
        let context = KeyboardContext {
            items: &items,
            offset: session.offset,
        };
        keyboard::keyboard_coordinates(
            code,
            current,
            &context,
            &session.active,
            session.over.as_ref(),
            input,
            self.config.indentation_width,
        )
    }

    fn announce_movement(&mut self, event: DragEvent) {
        let items = self.flattened();
        let indent = self.config.indentation_width;
        let announcement = self.session.as_mut().and_then(|session| {
            let over = session.over.as_ref()?;
            let projection = project(&items, &session.active, over, session.offset, indent)?;
            movement_announcement(
                event,
                &items,
                &session.active,
                over,
                &projection,
                &mut session.last,
            )
        });
        let text = announcement.map(|a| self.announcer.render(&a));
        self.host.announce(text.as_deref());
    }

    fn publish_collapsed(&mut self) {
        set_collapsed_flags(&mut self.tree, &self.collapsed);
        self.host.tree_changed(&self.tree);
    }

    /// Return to idle and release the cursor.
    fn finish(&mut self) {
        self.session = None;
        self.phase = DragPhase::Idle;
        self.host.set_cursor(None);
    }
}

impl<K, T, H, D, A> Drop for SortableTree<K, T, H, D, A>
where
    K: Clone + Eq + Hash + Debug,
    T: Clone,
    H: OutlineHost<K, T>,
    D: CollisionDetection<K>,
    A: Announcer<K>,
{
    fn drop(&mut self) {
        if self.session.is_some() {
            self.host.set_cursor(None);
        }
    }
}
