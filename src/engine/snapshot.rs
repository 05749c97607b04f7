//! Optional `serde`-gated point-in-time snapshot of a [`Book`](crate::engine::book::Book),
//! for reporting/diagnostics only — not a wire protocol (spec's reporting
//! format stays the plain-text three-line block, independent of this).

use serde::{Deserialize, Serialize};

use crate::engine::book::Book;
use crate::resting_order::RestingOrder;
use crate::utils::current_time_millis;

/// A serializable snapshot of one resting order, taken from a live
/// [`RestingOrder`] via [`OrderSnapshot::from_order`]. Captures the
/// atomically mutable fields as a single torn-free read each; the two
/// reads are not mutually atomic, so `remaining_qty` and `deleted` here
/// may describe two different instants under concurrent matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub price: u64,
    pub original_qty: u64,
    pub remaining_qty: u64,
    pub submitted_at: u64,
}

impl OrderSnapshot {
    pub fn from_order(order: &RestingOrder) -> Self {
        Self {
            price: order.price(),
            original_qty: order.original_qty(),
            remaining_qty: order.remaining_qty(),
            submitted_at: order.submitted_at(),
        }
    }
}

/// A snapshot of one symbol's book, best price first on each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: String,
    pub timestamp: u64,
    pub bids: Vec<OrderSnapshot>,
    pub asks: Vec<OrderSnapshot>,
}

impl BookSnapshot {
    /// Takes a non-atomic, best-effort snapshot of `book`'s current depth.
    /// Each side is internally consistent with itself at read time but the
    /// two sides, and the two fields of a single [`OrderSnapshot`], are not
    /// mutually consistent under concurrent matching — this is a reporting
    /// aid, not a consistent cut of the book.
    pub fn capture(book: &Book) -> Self {
        Self {
            symbol: book.symbol().to_string(),
            timestamp: current_time_millis(),
            bids: book
                .bid_depth()
                .iter()
                .map(|o| OrderSnapshot::from_order(o))
                .collect(),
            asks: book
                .ask_depth()
                .iter()
                .map(|o| OrderSnapshot::from_order(o))
                .collect(),
        }
    }

    /// Best bid: highest price, first element of `bids` since the bid side
    /// is the descending index.
    pub fn best_bid(&self) -> Option<(u64, u64)> {
        self.bids.first().map(|o| (o.price, o.remaining_qty))
    }

    /// Best ask: lowest price, first element of `asks` since the ask side
    /// is the ascending index.
    pub fn best_ask(&self) -> Option<(u64, u64)> {
        self.asks.first().map(|o| (o.price, o.remaining_qty))
    }

    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Renders this snapshot as a JSON payload, for the driver's optional
    /// periodic book-depth dump. Not a wire protocol (spec's reporting
    /// format stays the plain-text block regardless).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::side::Side;

    #[test]
    fn capture_reflects_current_depth() {
        let book = Book::new(std::sync::Arc::from("TICK0"));
        book.submit(Side::Bid, 100, 990);
        book.submit(Side::Ask, 50, 1010);

        let snapshot = BookSnapshot::capture(&book);
        assert_eq!(snapshot.symbol, "TICK0");
        assert_eq!(snapshot.best_bid(), Some((990, 100)));
        assert_eq!(snapshot.best_ask(), Some((1010, 50)));
        assert_eq!(snapshot.spread(), Some(20));
    }

    #[test]
    fn json_round_trip_preserves_depth() {
        let book = Book::new(std::sync::Arc::from("TICK0"));
        book.submit(Side::Bid, 100, 990);

        let snapshot = BookSnapshot::capture(&book);
        let json = snapshot.to_json().expect("serializes");
        let restored = BookSnapshot::from_json(&json).expect("deserializes");
        assert_eq!(restored.symbol, "TICK0");
        assert_eq!(restored.best_bid(), Some((990, 100)));
    }

    #[test]
    fn empty_book_has_no_best_prices_or_spread() {
        let book = Book::new(std::sync::Arc::from("TICK0"));
        let snapshot = BookSnapshot::capture(&book);
        assert_eq!(snapshot.best_bid(), None);
        assert_eq!(snapshot.best_ask(), None);
        assert_eq!(snapshot.spread(), None);
    }
}
