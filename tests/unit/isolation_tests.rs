//! Operations on symbol A never touch any book of symbol B.

use matchbook_rs::prelude::*;

#[test]
fn cross_symbol_isolation_under_interleaved_submits() {
    let engine = MatchingEngine::new(["TICK0", "TICK1", "TICK2"]);

    engine.submit("SELL", "TICK0", 50, 1000).unwrap();
    engine.submit("SELL", "TICK1", 50, 1000).unwrap();
    engine.submit("BUY", "TICK0", 50, 1000).unwrap();

    let tick0 = engine.book("TICK0").unwrap();
    let tick1 = engine.book("TICK1").unwrap();
    let tick2 = engine.book("TICK2").unwrap();

    assert!(tick0.ask_depth().is_empty());
    assert!(tick0.bid_depth().is_empty());

    // TICK1's resting ask must be untouched by the TICK0 match.
    assert_eq!(tick1.ask_depth().len(), 1);
    assert_eq!(tick1.ask_depth()[0].remaining_qty(), 50);
    assert!(tick1.bid_depth().is_empty());

    // TICK2 was never submitted to at all.
    assert!(tick2.ask_depth().is_empty());
    assert!(tick2.bid_depth().is_empty());
}

#[test]
fn unknown_symbol_is_rejected_without_touching_the_registry() {
    let engine = MatchingEngine::new(["TICK0"]);
    let before = engine.symbol_count();
    assert!(engine.submit("BUY", "GHOST", 10, 1000).is_err());
    assert_eq!(engine.symbol_count(), before);
    assert!(engine.book("GHOST").is_none());
}
