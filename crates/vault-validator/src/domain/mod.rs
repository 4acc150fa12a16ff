//! # Domain Layer
//!
//! Pure validation rules with no I/O and no limiter access.

pub mod errors;
pub mod rules;
