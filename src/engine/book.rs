//! The matching orchestrator: one bid/ask index pair for a single symbol.

use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::side::Side;
use crate::engine::trade::{OrderLeg, Trade, TradeListener};
use crate::resting_order::RestingOrder;
use crate::skiplist::PriceIndex;
use crate::utils::current_time_millis;

/// One symbol's bid and ask books, each a [`PriceIndex`] in opposite
/// directions (bids descending so the highest price leads; asks ascending
/// so the lowest price leads).
pub struct Book {
    symbol: Arc<str>,
    bids: PriceIndex,
    asks: PriceIndex,
    listener: Option<TradeListener>,
}

impl Book {
    pub fn new(symbol: Arc<str>) -> Self {
        Self {
            symbol,
            bids: PriceIndex::new(false),
            asks: PriceIndex::new(true),
            listener: None,
        }
    }

    pub fn with_listener(symbol: Arc<str>, listener: TradeListener) -> Self {
        Self {
            symbol,
            bids: PriceIndex::new(false),
            asks: PriceIndex::new(true),
            listener: Some(listener),
        }
    }

    pub fn symbol(&self) -> &Arc<str> {
        &self.symbol
    }

    /// Read-only snapshots of the live resting orders on each side, in
    /// index order (best price first).
    pub fn bid_depth(&self) -> Vec<Arc<RestingOrder>> {
        self.bids.head_iter()
    }

    pub fn ask_depth(&self) -> Vec<Arc<RestingOrder>> {
        self.asks.head_iter()
    }

    /// Runs the match-and-deplete protocol for one incoming order: repeatedly
    /// consume from the opposite index until filled or no more crossing,
    /// insert any residual on the own side, then sweep the opposite index.
    ///
    /// Returns `true` unless inserting the residual was rejected because an
    /// identical `Arc` record was already present — in practice unreachable
    /// here, since every call constructs a fresh `RestingOrder`, but the
    /// return value is threaded through faithfully regardless.
    pub fn submit(&self, side: Side, qty: u64, price: u64) -> bool {
        let submitted_at = current_time_millis();
        let (opposite, same) = match side {
            Side::Bid => (&self.asks, &self.bids),
            Side::Ask => (&self.bids, &self.asks),
        };
        let predicate = side.crosses(price);
        let side_tag = side.to_string();
        let mut remaining = qty;

        while remaining > 0 {
            let result = opposite.find_and_consume(&predicate, remaining, &side_tag);
            if result.matched_qty == 0 {
                break;
            }
            remaining -= result.matched_qty;

            let trade = self.build_trade(side, price, qty, remaining, &result);
            info!(
                symbol = %self.symbol,
                qty = trade.quantity,
                price = trade.trade_price,
                "trade matched"
            );
            if let Some(listener) = &self.listener {
                listener(&trade);
            }
        }

        debug!(symbol = %self.symbol, side = %side, "sweeping opposite book");
        opposite.sweep_deleted();

        if remaining > 0 {
            let order = RestingOrder::new(side, self.symbol.clone(), price, remaining, submitted_at);
            same.insert(order)
        } else {
            true
        }
    }

    fn build_trade(
        &self,
        side: Side,
        incoming_price: u64,
        incoming_original: u64,
        incoming_remaining_after: u64,
        result: &crate::skiplist::MatchResult,
    ) -> Trade {
        let incoming_leg = OrderLeg {
            price: incoming_price,
            remaining_qty: incoming_remaining_after,
            original_qty: incoming_original,
        };
        let resting_leg = OrderLeg {
            price: result.price,
            remaining_qty: result.resting_remaining_qty,
            original_qty: result.resting_original_qty,
        };
        let (buy_order, sell_order) = match side {
            Side::Bid => (incoming_leg, resting_leg),
            Side::Ask => (resting_leg, incoming_leg),
        };
        Trade {
            symbol: self.symbol.clone(),
            trade_price: result.price,
            quantity: result.matched_qty,
            buy_order,
            sell_order,
        }
    }
}
