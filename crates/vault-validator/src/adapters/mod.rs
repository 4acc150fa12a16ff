//! # Adapters Layer
//!
//! In-process implementations of the outbound ports.

pub mod limiter;
