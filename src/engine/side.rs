use std::fmt;
use std::str::FromStr;

use crate::engine::error::EngineError;

/// Which book an order rests on, and which book it crosses against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Builds the crossing predicate for an aggressor on this side: a
    /// resting order at `price` on the opposite book crosses iff this
    /// returns true.
    pub fn crosses(self, incoming_price: u64) -> impl Fn(u64) -> bool {
        move |resting_price: u64| match self {
            Side::Bid => resting_price <= incoming_price,
            Side::Ask => resting_price >= incoming_price,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BUY"),
            Side::Ask => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" | "BID" => Ok(Side::Bid),
            "SELL" | "ASK" => Ok(Side::Ask),
            other => Err(EngineError::UnrecognizedSide(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buy_and_sell() {
        assert_eq!(Side::from_str("BUY").unwrap(), Side::Bid);
        assert_eq!(Side::from_str("sell").unwrap(), Side::Ask);
    }

    #[test]
    fn rejects_unknown_side() {
        assert!(matches!(
            Side::from_str("HOLD"),
            Err(EngineError::UnrecognizedSide(_))
        ));
    }

    #[test]
    fn crossing_predicate_matches_direction() {
        let bid_crosses = Side::Bid.crosses(1000);
        assert!(bid_crosses(900));
        assert!(bid_crosses(1000));
        assert!(!bid_crosses(1100));

        let ask_crosses = Side::Ask.crosses(1000);
        assert!(ask_crosses(1100));
        assert!(ask_crosses(1000));
        assert!(!ask_crosses(900));
    }
}
