//! The concurrent, price-ordered skip list. This is the hardest-engineering
//! piece of the crate: lock-free insertion via plain atomic splices, a
//! CAS-claim matching walk, and epoch-reclaimed physical deletion.

use std::sync::Arc;

use crossbeam::epoch::{self, Atomic, Owned, Shared};
use std::sync::atomic::Ordering;

use crate::resting_order::RestingOrder;
use crate::skiplist::node::{MAX_LEVEL, Node, random_level};

/// Result of one `find_and_consume` call. `matched_qty == 0` means no
/// resting order was consumed this call (either the book is empty past the
/// point we stopped, or the first live, claimable node failed the price
/// predicate).
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matched_qty: u64,
    pub price: u64,
    /// Post-trade state of the resting (maker) leg, for building a `Trade`.
    pub resting_remaining_qty: u64,
    pub resting_original_qty: u64,
    /// Human-readable description of how much of the resting order remains,
    /// `None` when no match occurred.
    pub description: Option<String>,
}

impl MatchResult {
    fn none() -> Self {
        Self {
            matched_qty: 0,
            price: 0,
            resting_remaining_qty: 0,
            resting_original_qty: 0,
            description: None,
        }
    }
}

/// A lock-free, price-ordered index over resting orders. `ascending`
/// chooses the comparison direction: ascending for the ask book (lowest
/// price first), descending for the bid book (highest price first).
pub struct PriceIndex {
    ascending: bool,
    max_level: usize,
    head: Atomic<Node>,
}

unsafe impl Send for PriceIndex {}
unsafe impl Sync for PriceIndex {}

impl PriceIndex {
    pub fn new(ascending: bool) -> Self {
        Self::with_max_level(ascending, MAX_LEVEL)
    }

    pub fn with_max_level(ascending: bool, max_level: usize) -> Self {
        Self {
            ascending,
            max_level,
            head: Atomic::new(Node::head()),
        }
    }

    /// True iff `a` compares strictly before `b` in this index's direction.
    fn strictly_before(&self, a_price: u64, b_price: u64) -> bool {
        if self.ascending {
            a_price < b_price
        } else {
            a_price > b_price
        }
    }

    /// Links `order` into the index. Returns `false` only if a node
    /// carrying the identical `Arc` (record identity, not value equality)
    /// is already linked at the level-0 successor position found by the
    /// search; duplicate detection is on record identity, not value equality.
    pub fn insert(&self, order: Arc<RestingOrder>) -> bool {
        let guard = &epoch::pin();
        let level = random_level(self.max_level);
        let mut update: Vec<Shared<Node>> = vec![Shared::null(); self.max_level + 1];

        let mut pred = self.head.load(Ordering::Acquire, guard);
        for i in (0..=self.max_level).rev() {
            loop {
                let pred_ref = unsafe { pred.as_ref() }.expect("predecessor is never null");
                let next = pred_ref.next[i].load(Ordering::Acquire, guard);
                let advance = match unsafe { next.as_ref() } {
                    Some(next_node) => {
                        let next_price = next_node
                            .order
                            .as_ref()
                            .expect("non-head node always carries an order")
                            .price();
                        self.strictly_before(next_price, order.price())
                    }
                    None => false,
                };
                if advance {
                    pred = next;
                } else {
                    break;
                }
            }
            update[i] = pred;
        }

        let successor = unsafe { update[0].as_ref() }
            .expect("predecessor is never null")
            .next[0]
            .load(Ordering::Acquire, guard);
        if let Some(successor_node) = unsafe { successor.as_ref() } {
            if let Some(existing) = &successor_node.order {
                if Arc::ptr_eq(existing, &order) {
                    return false;
                }
            }
        }

        let mut new_node = Owned::new(Node::new(order, level));
        for i in 0..=level {
            let succ = unsafe { update[i].as_ref() }
                .expect("predecessor is never null")
                .next[i]
                .load(Ordering::Acquire, guard);
            new_node.next[i].store(succ, Ordering::Relaxed);
        }
        let new_shared = new_node.into_shared(guard);
        for i in 0..=level {
            let pred_ref = unsafe { update[i].as_ref() }.expect("predecessor is never null");
            // Plain atomic write, not a CAS: a race against a concurrent
            // insert at the same predecessor is tolerated here. The
            // matching walk only ever reads level 0 and is resilient to a
            // transiently stale ordering.
            pred_ref.next[i].store(new_shared, Ordering::Release);
        }
        true
    }

    /// Walks level 0 from the head, consuming at most one resting order.
    /// `predicate` is the crossing test on price; `wanted_qty` is the
    /// aggressor's remaining quantity; `side_tag` is `"BUY"`/`"SELL"`, used
    /// only to build `description`.
    pub fn find_and_consume(
        &self,
        predicate: impl Fn(u64) -> bool,
        wanted_qty: u64,
        side_tag: &str,
    ) -> MatchResult {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let head_ref = unsafe { head.as_ref() }.expect("head is never null");
        let mut curr = head_ref.next[0].load(Ordering::Acquire, guard);

        loop {
            let node = match unsafe { curr.as_ref() } {
                None => return MatchResult::none(),
                Some(node) => node,
            };
            let order = node
                .order
                .as_ref()
                .expect("non-head node always carries an order");

            if order.is_deleted() {
                // Stepping over a ghost: either drained and awaiting sweep,
                // or claimed by a peer matcher this instant.
                curr = node.next[0].load(Ordering::Acquire, guard);
                continue;
            }

            if !predicate(order.price()) {
                // Index is price-ordered in the matching direction: no
                // later node can satisfy the predicate either.
                return MatchResult::none();
            }

            if !order.try_claim() {
                // Lost the claim race; this node is someone else's problem
                // this pass. Advance without terminating the walk.
                curr = node.next[0].load(Ordering::Acquire, guard);
                continue;
            }

            // Claimed. Consumption loop.
            loop {
                let available = order.remaining_qty();
                if available == 0 {
                    order.mark_dead();
                    break;
                }
                match order.try_consume(available, wanted_qty) {
                    Ok(matched) => {
                        let new_remaining = available - matched;
                        if new_remaining > 0 {
                            order.release_claim();
                        } else {
                            order.mark_dead();
                        }
                        let description = Some(format!(
                            "{side_tag} ORDER: {new_remaining}/{orig} left for {symbol} @ {price}",
                            orig = order.original_qty(),
                            symbol = order.symbol(),
                            price = order.price(),
                        ));
                        return MatchResult {
                            matched_qty: matched,
                            price: order.price(),
                            resting_remaining_qty: new_remaining,
                            resting_original_qty: order.original_qty(),
                            description,
                        };
                    }
                    Err(_fresh) => continue,
                }
            }

            // Consumption loop fell through: the claimed node was already
            // empty. It is left DEAD (mark_dead above); advance and keep
            // walking for a node that can actually fill the aggressor.
            curr = node.next[0].load(Ordering::Acquire, guard);
        }
    }

    /// Single-pass physical unlink of every node whose `deleted` flag is
    /// set. Not linearizable with concurrent inserts or other sweeps; each
    /// unlink re-traverses from the head per level, tolerating a predecessor
    /// that has already moved.
    pub fn sweep_deleted(&self) {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let head_ref = unsafe { head.as_ref() }.expect("head is never null");
        let mut curr = head_ref.next[0].load(Ordering::Acquire, guard);

        while let Some(node) = unsafe { curr.as_ref() } {
            let next = node.next[0].load(Ordering::Acquire, guard);
            let order = node
                .order
                .as_ref()
                .expect("non-head node always carries an order");
            if order.is_deleted() {
                self.unlink(curr, guard);
            }
            curr = next;
        }
    }

    fn unlink<'g>(&self, target: Shared<'g, Node>, guard: &'g epoch::Guard) {
        let target_ref = unsafe { target.as_ref() }.expect("target is never null");
        for level in 0..target_ref.next.len() {
            self.unlink_at_level(level, target, guard);
        }
        unsafe {
            guard.defer_destroy(target);
        }
    }

    fn unlink_at_level<'g>(&self, level: usize, target: Shared<'g, Node>, guard: &'g epoch::Guard) {
        loop {
            let mut pred = self.head.load(Ordering::Acquire, guard);
            loop {
                let pred_ref = unsafe { pred.as_ref() }.expect("predecessor is never null");
                let next = pred_ref.next[level].load(Ordering::Acquire, guard);
                if next == target {
                    let target_ref = unsafe { target.as_ref() }.expect("target is never null");
                    let target_next = target_ref.next[level].load(Ordering::Acquire, guard);
                    match pred_ref.next[level].compare_exchange(
                        next,
                        target_next,
                        Ordering::Release,
                        Ordering::Acquire,
                        guard,
                    ) {
                        Ok(_) => return,
                        Err(_) => break, // predecessor moved; re-traverse from head
                    }
                }
                match unsafe { next.as_ref() } {
                    Some(_) => pred = next,
                    None => return, // not linked at this level (already unlinked, or never was)
                }
            }
        }
    }

    /// Read-only, snapshot-style walk over live orders in index order. Does
    /// not claim nodes; purely observational, for reporting/diagnostics.
    pub fn head_iter(&self) -> Vec<Arc<RestingOrder>> {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let head_ref = unsafe { head.as_ref() }.expect("head is never null");
        let mut curr = head_ref.next[0].load(Ordering::Acquire, guard);
        let mut result = Vec::new();
        while let Some(node) = unsafe { curr.as_ref() } {
            if let Some(order) = &node.order {
                if !order.is_deleted() {
                    result.push(order.clone());
                }
            }
            curr = node.next[0].load(Ordering::Acquire, guard);
        }
        result
    }

    /// Best-effort, non-atomic count of live orders. Diagnostics only, never
    /// used for matching decisions.
    pub fn len_hint(&self) -> usize {
        self.head_iter().len()
    }
}

impl Drop for PriceIndex {
    fn drop(&mut self) {
        let guard = &epoch::pin();
        let head = self.head.load(Ordering::Acquire, guard);
        let head_ref = unsafe { head.as_ref() }.expect("head is never null");
        let mut curr = head_ref.next[0].load(Ordering::Acquire, guard);
        while let Some(node) = unsafe { curr.as_ref() } {
            let next = node.next[0].load(Ordering::Acquire, guard);
            unsafe {
                guard.defer_destroy(curr);
            }
            curr = next;
        }
        unsafe {
            guard.defer_destroy(head);
        }
    }
}
