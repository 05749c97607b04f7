//! Concurrent aggressors racing to deplete one resting order.

use std::sync::{Arc, Barrier};
use std::thread;

use matchbook_rs::prelude::*;

#[test]
fn two_concurrent_aggressors_split_one_resting_order_exactly() {
    let engine = Arc::new(MatchingEngine::new(["TICK0"]));
    engine.submit("SELL", "TICK0", 100, 1000).unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::new();
    for _ in 0..2 {
        let engine = engine.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            let before = engine.book("TICK0").unwrap().bid_depth();
            let _ = before; // not used, just forces the book to exist on this thread too
            engine.submit("BUY", "TICK0", 60, 1000).unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let book = engine.book("TICK0").unwrap();
    // The ask is fully depleted and eventually swept.
    assert!(book.ask_depth().is_empty());

    // Between the two aggressors, 100 units were matched and 20 residual
    // remained unfilled (60 + 60 - 100), split across the two BID residuals.
    let residual_total: u64 = book.bid_depth().iter().map(|o| o.remaining_qty()).sum();
    assert_eq!(residual_total, 20);
}

#[test]
fn many_concurrent_aggressors_never_overfill_a_deep_book() {
    let engine = Arc::new(MatchingEngine::new(["TICK0"]));
    engine.submit("SELL", "TICK0", 1000, 1000).unwrap();

    let barrier = Arc::new(Barrier::new(10));
    let mut handles = Vec::new();
    for _ in 0..10 {
        let engine = engine.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            engine.submit("BUY", "TICK0", 100, 1000).unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let book = engine.book("TICK0").unwrap();
    assert!(book.ask_depth().is_empty());
    assert!(book.bid_depth().is_empty());
}
