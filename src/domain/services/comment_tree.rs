//! Comment thread assembly.
//!
//! Turns a flat, creation-ordered list of comments into a forest keyed by
//! `parent_id`. A node whose parent is `0`, itself, or absent from the input
//! becomes a root. Nodes on a parent cycle, and their descendants, are
//! dropped. Sibling order follows input order.
//!
//! Nesting is capped at [`MAX_THREAD_DEPTH`]: replies below that level are
//! attached to their ancestor at `MAX_THREAD_DEPTH - 1`, so they render as
//! siblings at the deepest level. Assembly is iterative and the returned
//! forest is at most `MAX_THREAD_DEPTH + 1` levels deep.

use std::collections::HashMap;

use crate::domain::entities::ROOT_PARENT_ID;

/// Deepest nesting level rendered; roots are level 0.
pub const MAX_THREAD_DEPTH: usize = 32;

/// A node that can be placed in a comment thread.
pub trait ThreadNode: Sized {
    fn node_id(&self) -> i64;
    fn parent_node_id(&self) -> i64;
    fn attach_child(&mut self, child: Self);
}

#[derive(Debug, Clone, Copy)]
enum Depth {
    Unknown,
    Visiting,
    Reachable(usize),
    Detached,
}

/// Build the thread forest from flat nodes.
pub fn assemble<N: ThreadNode>(nodes: Vec<N>) -> Vec<N> {
    let index: HashMap<i64, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.node_id(), i))
        .collect();

    let parents: Vec<Option<usize>> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let parent = node.parent_node_id();
            if parent == ROOT_PARENT_ID {
                return None;
            }
            index.get(&parent).copied().filter(|&p| p != i)
        })
        .collect();

    let depths = resolve_depths(&parents);

    // Ascending depth, so every parent is placed before its children
    let mut order: Vec<(usize, usize)> = depths
        .iter()
        .enumerate()
        .filter_map(|(i, depth)| match depth {
            Depth::Reachable(d) => Some((*d, i)),
            _ => None,
        })
        .collect();
    order.sort_unstable();

    let mut anchors: Vec<Option<usize>> = vec![None; nodes.len()];
    for &(depth, i) in &order {
        if let Some(parent) = parents[i] {
            anchors[i] = if depth <= MAX_THREAD_DEPTH {
                Some(parent)
            } else {
                anchors[parent]
            };
        }
    }

    // Deepest level first, input order within a level
    let mut placement: Vec<(usize, usize)> = order
        .into_iter()
        .map(|(depth, i)| (depth.min(MAX_THREAD_DEPTH), i))
        .collect();
    placement.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut slots: Vec<Option<N>> = nodes.into_iter().map(Some).collect();
    let mut roots = Vec::new();

    for (_, i) in placement {
        let Some(node) = slots[i].take() else {
            continue;
        };
        match anchors[i] {
            Some(anchor) => {
                if let Some(parent) = slots[anchor].as_mut() {
                    parent.attach_child(node);
                }
            }
            None => roots.push(node),
        }
    }

    roots
}

/// Distance of every node from its root, walking parent links iteratively.
fn resolve_depths(parents: &[Option<usize>]) -> Vec<Depth> {
    let mut depths = vec![Depth::Unknown; parents.len()];
    let mut path = Vec::new();

    for start in 0..parents.len() {
        let mut cursor = start;
        let mut resolved = loop {
            match depths[cursor] {
                Depth::Reachable(d) => break Some(d),
                Depth::Detached | Depth::Visiting => break None,
                Depth::Unknown => match parents[cursor] {
                    None => {
                        depths[cursor] = Depth::Reachable(0);
                        break Some(0);
                    }
                    Some(parent) => {
                        depths[cursor] = Depth::Visiting;
                        path.push(cursor);
                        cursor = parent;
                    }
                },
            }
        };

        while let Some(i) = path.pop() {
            depths[i] = match resolved {
                Some(d) => {
                    resolved = Some(d + 1);
                    Depth::Reachable(d + 1)
                }
                None => Depth::Detached,
            };
        }
    }

    depths
}
