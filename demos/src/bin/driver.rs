//! Concurrent load-generating driver for `matchbook-rs`.
//!
//! Spawns a configurable number of producer threads, each repeatedly
//! submitting randomly generated limit orders against a small fixed symbol
//! universe, for a configurable duration. Every match is printed to stdout
//! in the engine's reporting format; rejected orders are logged and the
//! simulation simply continues, per the driver's resilience policy.
//!
//! Usage: `driver [duration_secs] [producer_threads]` (defaults: 5, 8).

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};

use matchbook_rs::prelude::*;

const SYMBOLS: [&str; 3] = ["TICK0", "TICK1", "TICK2"];
const PRICE_MIN: u64 = 900;
const PRICE_MAX: u64 = 1100;
const QTY_MIN: u64 = 1;
const QTY_MAX: u64 = 200;

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let duration_secs: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let producer_threads: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    info!(duration_secs, producer_threads, "starting simulation");

    let trades_printed = Arc::new(AtomicU64::new(0));
    let trades_printed_for_listener = trades_printed.clone();
    let stdout_lock = Arc::new(Mutex::new(()));
    let stdout_lock_for_listener = stdout_lock.clone();
    let listener: TradeListener = Arc::new(move |trade: &Trade| {
        let _guard = stdout_lock_for_listener.lock().unwrap();
        println!("{trade}");
        trades_printed_for_listener.fetch_add(1, Ordering::Relaxed);
    });

    let engine = Arc::new(MatchingEngine::with_listener(SYMBOLS, Some(listener)));

    let rejected = Arc::new(AtomicU64::new(0));
    let submitted = Arc::new(AtomicU64::new(0));
    let deadline = Instant::now() + Duration::from_secs(duration_secs);

    let mut handles = Vec::with_capacity(producer_threads);
    for worker_id in 0..producer_threads {
        let engine = engine.clone();
        let rejected = rejected.clone();
        let submitted = submitted.clone();
        handles.push(thread::spawn(move || {
            run_producer(worker_id, engine, deadline, submitted, rejected);
        }));
    }
    for handle in handles {
        handle.join().expect("producer thread panicked");
    }

    println!("\n=== Simulation complete ===");
    println!("orders submitted: {}", submitted.load(Ordering::Relaxed));
    println!("orders rejected:  {}", rejected.load(Ordering::Relaxed));
    println!("trades reported:  {}", trades_printed.load(Ordering::Relaxed));
    for symbol in engine.symbols() {
        if let Some(book) = engine.book(&symbol) {
            println!(
                "  {symbol}: {} resting bids, {} resting asks",
                book.bid_depth().len(),
                book.ask_depth().len()
            );
        }
    }
}

fn run_producer(
    worker_id: usize,
    engine: Arc<MatchingEngine>,
    deadline: Instant,
    submitted: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
) {
    let mut rng = rand::thread_rng();
    while Instant::now() < deadline {
        let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];
        let side = if rng.gen_bool(0.5) { "BUY" } else { "SELL" };
        let qty = rng.gen_range(QTY_MIN..=QTY_MAX);
        let price = rng.gen_range(PRICE_MIN..=PRICE_MAX);

        match engine.submit(side, symbol, qty, price) {
            Ok(_) => {
                submitted.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                warn!(worker_id, %err, "order rejected");
                rejected.fetch_add(1, Ordering::Relaxed);
            }
        }

        thread::sleep(Duration::from_micros(200));
    }
}
