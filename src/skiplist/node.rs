//! Skip-list node layout and level drawing.

use std::sync::Arc;

use crossbeam::epoch::Atomic;
use rand::Rng;

use crate::resting_order::RestingOrder;

/// Upper bound on a node's level. The head sentinel always carries
/// `MAX_LEVEL + 1` forward-pointer slots regardless of how many levels are
/// actually populated.
pub const MAX_LEVEL: usize = 32;

/// A skip-list node. The head sentinel is the one node with `order == None`;
/// every other node carries exactly one resting order.
pub struct Node {
    pub order: Option<Arc<RestingOrder>>,
    pub next: Vec<Atomic<Node>>,
}

impl Node {
    /// Builds the head sentinel, sized to `MAX_LEVEL + 1` slots.
    pub fn head() -> Self {
        Self {
            order: None,
            next: (0..=MAX_LEVEL).map(|_| Atomic::null()).collect(),
        }
    }

    /// Builds a node carrying `order`, sized to `level + 1` slots.
    pub fn new(order: Arc<RestingOrder>, level: usize) -> Self {
        Self {
            order: Some(order),
            next: (0..=level).map(|_| Atomic::null()).collect(),
        }
    }

    /// The node's level: its forward array has `level() + 1` slots.
    pub fn level(&self) -> usize {
        self.next.len() - 1
    }
}

/// Draws a level in `[0, max_level]` by repeated fair coin flips: start at
/// 0, and as long as the flip comes up heads and we haven't hit the cap,
/// climb one more level. Mean level is 1 (geometric distribution).
pub fn random_level(max_level: usize) -> usize {
    let mut level = 0;
    let mut rng = rand::thread_rng();
    while level < max_level && rng.gen_bool(0.5) {
        level += 1;
    }
    level
}
