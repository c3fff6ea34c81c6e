// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reordering a documentation sidebar with `understory_sortable_tree`.
//!
//! This example drives a few drag sessions against a small outline:
//! - a mouse press that has to travel before it becomes a drag,
//! - collision detection over row rectangles to pick the target,
//! - a rightward offset that nests the dragged page under its new neighbor,
//! - a keyboard drag and a cancelled drag,
//! - collapsing and expanding a section.
//!
//! Session transitions are logged through `log`; set `RUST_LOG=trace` to see
//! projections as well.
//!
//! Run:
//! - `cargo run -p understory_demos --example sortable_outline`

use kurbo::{Point, Rect, Vec2};
use understory_collision::{CollisionInput, Droppable};
use understory_outline::{Node, flatten};
use understory_sortable_tree::{
    Activation, CursorStyle, KeyboardCode, OutlineHost, SensorKind, SortableTree,
};

const ROW_HEIGHT: f64 = 24.0;
const ROW_WIDTH: f64 = 240.0;

/// Prints what a real sidebar would render or speak.
struct ConsoleHost;

impl OutlineHost<&'static str, &'static str> for ConsoleHost {
    fn tree_changed(&mut self, tree: &[Node<&'static str, &'static str>]) {
        println!("tree changed:");
        print_tree(tree, 1);
    }

    fn announce(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            println!("  [screen reader] {text}");
        }
    }

    fn set_cursor(&mut self, cursor: Option<CursorStyle>) {
        match cursor {
            Some(style) => println!("  [cursor] {style:?}"),
            None => println!("  [cursor] default"),
        }
    }
}

fn print_tree(nodes: &[Node<&'static str, &'static str>], depth: usize) {
    for node in nodes {
        let marker = if node.collapsed { "+" } else { "-" };
        let indent = depth * 2;
        println!("{:indent$}{marker} {} ({})", "", node.payload, node.id);
        if !node.collapsed {
            print_tree(&node.children, depth + 1);
        }
    }
}

/// One full-width rectangle per visible row.
fn row_rects(
    sortable: &SortableTree<&'static str, &'static str, ConsoleHost>,
) -> Vec<Droppable<&'static str>> {
    sortable
        .flattened()
        .iter()
        .enumerate()
        .map(|(ix, item)| {
            let y = ix as f64 * ROW_HEIGHT;
            Droppable::new(item.id, Rect::new(0.0, y, ROW_WIDTH, y + ROW_HEIGHT))
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let tree = vec![
        Node::new("guide", "Guide").children([
            Node::new("install", "Installation"),
            Node::new("usage", "Usage"),
            Node::new("config", "Configuration"),
        ]),
        Node::new("api", "API").collapsed(true).children([
            Node::new("api-tree", "Tree"),
            Node::new("api-events", "Events"),
        ]),
        Node::new("faq", "FAQ"),
    ];

    let mut sortable = SortableTree::new(ConsoleHost);
    if let Err(err) = sortable.set_tree(tree) {
        eprintln!("{err}");
        return;
    }
    println!("initial tree:");
    print_tree(sortable.tree(), 1);

    // 1) Mouse drag: press on "Installation", move until the gate activates.
    println!("\n== mouse drag ==");
    let mut gate = sortable.activation_gate(SensorKind::Mouse);
    let press = Point::new(40.0, 1.5 * ROW_HEIGHT);
    let mut activation = gate.on_down("install", press, 0);
    let mut pointer = press;
    let mut now = 0;
    while activation == Activation::Pending {
        pointer += Vec2::new(1.0, 4.0);
        now += 16;
        activation = gate.on_move(pointer, now);
    }
    let Activation::Activated(active) = activation else {
        return;
    };
    sortable.start(active);

    // Keep dragging down over "Usage" and a little to the right.
    let rows = row_rects(&sortable);
    for step in 0..4 {
        pointer += Vec2::new(6.0, 4.0);
        let dragged = Rect::from_origin_size(
            Point::new(0.0, pointer.y - 0.5 * ROW_HEIGHT),
            (ROW_WIDTH, ROW_HEIGHT),
        );
        let input = CollisionInput {
            pointer: Some(pointer),
            collision_rect: dragged,
            droppables: &rows,
        };
        sortable.detect_over(&input);
        sortable.drag_move(pointer.x - press.x);
        println!(
            "  step {step}: over {:?}, projection {:?}",
            sortable.over(),
            sortable.projection()
        );
    }
    let over = sortable.over().copied();
    let outcome = sortable.end(over);
    println!("  outcome: {outcome:?}");

    // 2) Keyboard drag: pick up "FAQ", press Up twice, then indent it with Right.
    println!("\n== keyboard drag ==");
    let mut gate = sortable.activation_gate(SensorKind::Keyboard);
    if let Activation::Activated(active) = gate.on_down("faq", Point::ORIGIN, 0) {
        sortable.start(active);
    }
    let rows = row_rects(&sortable);
    let mut at = rows
        .iter()
        .find(|row| row.id == "faq")
        .map_or(Point::ORIGIN, |row| row.rect.origin());
    for code in [KeyboardCode::Up, KeyboardCode::Up, KeyboardCode::Right] {
        let dragged = Rect::from_origin_size(Point::new(0.0, at.y), (ROW_WIDTH, ROW_HEIGHT));
        let input = CollisionInput {
            pointer: None,
            collision_rect: dragged,
            droppables: &rows,
        };
        let Some(next) = sortable.keyboard_coordinates(code, at, &input) else {
            println!("  {code:?}: no move");
            continue;
        };
        if matches!(code, KeyboardCode::Up | KeyboardCode::Down) {
            let moved = Rect::from_origin_size(Point::new(0.0, next.y), (ROW_WIDTH, ROW_HEIGHT));
            sortable.detect_over(&CollisionInput {
                collision_rect: moved,
                ..input
            });
        }
        sortable.drag_move(sortable.offset() + (next.x - at.x));
        at = next;
        println!(
            "  {code:?}: over {:?}, projection {:?}",
            sortable.over(),
            sortable.projection()
        );
    }
    let over = sortable.over().copied();
    println!("  outcome: {:?}", sortable.end(over));

    // 3) A drag that is cancelled leaves the tree alone.
    println!("\n== cancelled drag ==");
    sortable.start("guide");
    sortable.drag_over(Some("api"));
    sortable.cancel();

    // 4) Collapse state.
    println!("\n== collapse ==");
    sortable.toggle_collapsed(&"guide");
    let visible: Vec<_> = flatten(sortable.tree(), sortable.collapse_state())
        .iter()
        .map(|item| item.id)
        .collect();
    println!("  visible rows: {visible:?}");
    sortable.expand_all();
}
