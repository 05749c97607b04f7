//! Integration-level tests: concurrency scenarios and cross-cutting
//! invariants that need a live `MatchingEngine`, as opposed to the
//! in-module unit tests that exercise each layer in isolation.

mod concurrency_tests;
mod invariants_tests;
mod isolation_tests;
