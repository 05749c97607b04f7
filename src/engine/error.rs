use std::fmt;

/// Input-boundary error taxonomy. `submit` validates in the order the
/// variants are listed here before ever touching a `Book`; concurrency
/// retries inside the core never surface as errors, and a same-identity
/// insert is reported as `Ok(false)`, not an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// `symbol` is not part of this engine's fixed universe.
    UnknownSymbol(String),
    /// `qty` was zero (quantities are unsigned, so "non-positive" means zero).
    NonPositiveQuantity(u64),
    /// `price` was zero.
    NonPositivePrice(u64),
    /// `side` did not parse as `"BUY"`/`"SELL"` (or `"BID"`/`"ASK"`).
    UnrecognizedSide(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownSymbol(symbol) => write!(f, "unknown symbol: {symbol}"),
            EngineError::NonPositiveQuantity(qty) => {
                write!(f, "quantity must be positive, got {qty}")
            }
            EngineError::NonPositivePrice(price) => {
                write!(f, "price must be positive, got {price}")
            }
            EngineError::UnrecognizedSide(side) => write!(f, "unrecognized side: {side}"),
        }
    }
}

impl std::error::Error for EngineError {}
