//! The resting order record: an immutable descriptor plus the two fields a
//! matcher is allowed to mutate, `remaining_qty` and `deleted`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::engine::side::Side;

/// One order sitting in a [`crate::skiplist::PriceIndex`] awaiting a counterparty.
///
/// Everything but `remaining_qty` and `deleted` is set once at construction
/// and never changes; those two fields are mutated exclusively through the
/// claim/consume protocol described on [`RestingOrder::try_claim`].
#[derive(Debug)]
pub struct RestingOrder {
    side: Side,
    symbol: Arc<str>,
    price: u64,
    original_qty: u64,
    submitted_at: u64,
    remaining_qty: AtomicU64,
    deleted: AtomicBool,
}

impl RestingOrder {
    /// Builds a new live order with `remaining_qty == original_qty` and
    /// `deleted == false`. Always wrapped in an `Arc` immediately: record
    /// identity for the purposes of duplicate-insert detection is `Arc`
    /// pointer identity, never a value comparison of the fields below.
    pub fn new(
        side: Side,
        symbol: Arc<str>,
        price: u64,
        qty: u64,
        submitted_at: u64,
    ) -> Arc<Self> {
        Arc::new(Self {
            side,
            symbol,
            price,
            original_qty: qty,
            submitted_at,
            remaining_qty: AtomicU64::new(qty),
            deleted: AtomicBool::new(false),
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn symbol(&self) -> &Arc<str> {
        &self.symbol
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn original_qty(&self) -> u64 {
        self.original_qty
    }

    pub fn submitted_at(&self) -> u64 {
        self.submitted_at
    }

    /// Snapshot read; may be stale the instant it returns on a live index.
    pub fn remaining_qty(&self) -> u64 {
        self.remaining_qty.load(Ordering::Acquire)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.load(Ordering::Acquire)
    }

    /// Attempts to obtain exclusive matching rights over this node by
    /// flipping `deleted` from `false` to `true` (LIVE -> CLAIMED). Returns
    /// `false` if another matcher already holds the claim or the node is
    /// already dead.
    pub fn try_claim(&self) -> bool {
        self.deleted
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases a claim on a node that is still live (CLAIMED -> LIVE),
    /// after a consumption that did not drain the order.
    pub fn release_claim(&self) {
        self.deleted.store(false, Ordering::Release);
    }

    /// Marks the node permanently dead (CLAIMED -> DEAD), eligible for the
    /// next sweep.
    pub fn mark_dead(&self) {
        self.deleted.store(true, Ordering::Release);
    }

    /// Attempts to consume `wanted` units out of `remaining_qty`, assuming
    /// the caller already holds the claim. Returns `Ok(matched)` on success
    /// with the quantity actually taken (`min(available, wanted)`), or
    /// `Err(fresh_available)` if the CAS lost a race against... nothing, in
    /// practice, since only the claimer touches `remaining_qty` while
    /// claimed; `Err` surfaces only a torn read that must be retried with
    /// the fresh value.
    pub fn try_consume(&self, available: u64, wanted: u64) -> Result<u64, u64> {
        let matched = available.min(wanted);
        let new_remaining = available - matched;
        match self.remaining_qty.compare_exchange(
            available,
            new_remaining,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(matched),
            Err(fresh) => Err(fresh),
        }
    }
}
