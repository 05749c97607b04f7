//! # matchbook-rs
//!
//! A lock-free, price-ordered concurrent limit-order matching core.
//!
//! For each symbol in a fixed universe this crate maintains two
//! price-ordered books — bid and ask — and, on every incoming order,
//! attempts to cross it against resting orders on the opposite side before
//! placing any residual quantity into its own book. Multiple producer
//! threads may submit orders concurrently; matching is serialized at the
//! per-order level through a claim/consume protocol on each resting order,
//! not through a global lock.
//!
//! ## Layers
//!
//! - [`resting_order::RestingOrder`] — the order record, an immutable
//!   descriptor plus two atomically mutable fields.
//! - [`skiplist::PriceIndex`] — a hand-rolled lock-free skip list ordered by
//!   price, exposing `insert`, `find_and_consume`, and `sweep_deleted`.
//! - [`engine::Book`] — the matching orchestrator for one symbol's bid/ask
//!   pair.
//! - [`engine::MatchingEngine`] — the multi-symbol façade and validated
//!   entry point.
//!
//! ## What this crate does not do
//!
//! There is no strict price-time FIFO among same-price resting orders, no
//! fairness guarantee between concurrent matchers, no durability, and no
//! cancel-by-id on the core index — orders leave a book only by depletion.
//! See each module's documentation for the rationale.

pub mod engine;
pub mod prelude;
pub mod resting_order;
pub mod skiplist;
pub mod utils;

pub use engine::{Book, EngineError, MatchingEngine, Side, Trade, TradeListener};
pub use resting_order::RestingOrder;
pub use skiplist::PriceIndex;
