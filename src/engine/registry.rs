//! Multi-symbol engine façade: the single validated entry point, and the
//! trivial symbol-to-book mapping the core treats as an external collaborator.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::book::Book;
use crate::engine::error::EngineError;
use crate::engine::side::Side;
use crate::engine::trade::TradeListener;

/// A fixed universe of symbols, each with its own independent bid/ask
/// [`Book`]. Validates every `submit` at the boundary before it reaches a
/// book, per the error taxonomy below.
pub struct MatchingEngine {
    books: DashMap<Arc<str>, Arc<Book>>,
}

impl MatchingEngine {
    /// Builds a registry over `symbols`, each starting with an empty book
    /// and no trade listener.
    pub fn new<S: Into<Arc<str>>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self::with_listener(symbols, None)
    }

    /// Same as [`MatchingEngine::new`], but every book is wired to
    /// `listener` for observing trades as they happen.
    pub fn with_listener<S: Into<Arc<str>>>(
        symbols: impl IntoIterator<Item = S>,
        listener: Option<TradeListener>,
    ) -> Self {
        let books = DashMap::new();
        for symbol in symbols {
            let symbol: Arc<str> = symbol.into();
            let book = match &listener {
                Some(listener) => Book::with_listener(symbol.clone(), listener.clone()),
                None => Book::new(symbol.clone()),
            };
            info!(%symbol, "registered book");
            books.insert(symbol, Arc::new(book));
        }
        Self { books }
    }

    /// Validates and submits one incoming order. Input errors are
    /// raised here, before the core ever sees the order; concurrency
    /// retries inside a book never surface through this interface.
    pub fn submit(&self, side: &str, symbol: &str, qty: u64, price: u64) -> Result<bool, EngineError> {
        let side: Side = side.parse().map_err(|e| {
            warn!(side, "rejected order: unrecognized side");
            e
        })?;
        if qty == 0 {
            warn!(symbol, "rejected order: non-positive quantity");
            return Err(EngineError::NonPositiveQuantity(qty));
        }
        if price == 0 {
            warn!(symbol, "rejected order: non-positive price");
            return Err(EngineError::NonPositivePrice(price));
        }
        let book = self
            .books
            .get(symbol)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                warn!(symbol, "rejected order: unknown symbol");
                EngineError::UnknownSymbol(symbol.to_string())
            })?;

        Ok(book.submit(side, qty, price))
    }

    pub fn book(&self, symbol: &str) -> Option<Arc<Book>> {
        self.books.get(symbol).map(|entry| entry.value().clone())
    }

    pub fn symbols(&self) -> Vec<Arc<str>> {
        self.books.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn symbol_count(&self) -> usize {
        self.books.len()
    }
}
