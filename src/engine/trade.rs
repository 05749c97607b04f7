//! Match events and the listener hook that carries them out of the core.

use std::fmt;
use std::sync::Arc;

/// Post-trade state of one leg of a match, for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLeg {
    pub price: u64,
    pub remaining_qty: u64,
    pub original_qty: u64,
}

/// One match between an aggressor and a single resting order. The trade
/// price is always the resting order's price: price improvement accrues
/// to the aggressor.
#[derive(Debug, Clone)]
pub struct Trade {
    pub symbol: Arc<str>,
    pub trade_price: u64,
    pub quantity: u64,
    pub buy_order: OrderLeg,
    pub sell_order: OrderLeg,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "MATCHED: {} shares of {} at ${}",
            self.quantity, self.symbol, self.trade_price
        )?;
        writeln!(
            f,
            "  BUY ORDER: {}/{} left for {} @ {}",
            self.buy_order.remaining_qty,
            self.buy_order.original_qty,
            self.symbol,
            self.buy_order.price
        )?;
        write!(
            f,
            "  SELL ORDER: {}/{} left for {} @ {}",
            self.sell_order.remaining_qty,
            self.sell_order.original_qty,
            self.symbol,
            self.sell_order.price
        )
    }
}

/// Trade listener specification using `Arc` for shared ownership across
/// every book a `MatchingEngine` holds.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_the_reporting_format() {
        let trade = Trade {
            symbol: Arc::from("TICK0"),
            trade_price: 1000,
            quantity: 50,
            buy_order: OrderLeg {
                price: 1000,
                remaining_qty: 0,
                original_qty: 50,
            },
            sell_order: OrderLeg {
                price: 1000,
                remaining_qty: 0,
                original_qty: 50,
            },
        };
        let rendered = trade.to_string();
        assert_eq!(
            rendered,
            "MATCHED: 50 shares of TICK0 at $1000\n  BUY ORDER: 0/50 left for TICK0 @ 1000\n  SELL ORDER: 0/50 left for TICK0 @ 1000"
        );
    }
}
