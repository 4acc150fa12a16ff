//! # Integration Tests
//!
//! - `flows`: full request lifecycles with real threshold ciphertexts
//! - `concurrency`: one validator shared across many tasks
//! - `policy`: scoped limiter policies driven from config
//! - `wire`: requests and keys arriving as JSON

pub mod concurrency;
pub mod flows;
