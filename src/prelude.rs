//! Convenience re-exports for consumers of this crate.

pub use crate::engine::{Book, EngineError, MatchingEngine, OrderLeg, Side, Trade, TradeListener};
#[cfg(feature = "serde")]
pub use crate::engine::{BookSnapshot, OrderSnapshot};
pub use crate::resting_order::RestingOrder;
pub use crate::skiplist::{MatchResult, PriceIndex};
pub use crate::utils::current_time_millis;
