//! # Outbound Ports (Driven Ports / SPI)
//!
//! The batch-size limiter this subsystem depends on. It is owned and
//! configured by the surrounding service and queried on every write request.

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Caller-supplied context for limiter queries.
///
/// The validator forwards it verbatim; only limiter implementations read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitContext {
    /// Owner the request acts for, if known. Limiters may scope policy by it.
    pub owner: Option<String>,
    /// Point after which the limiter should give up.
    pub deadline: Option<Instant>,
}

impl LimitContext {
    /// Context with no scope and no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Context scoped to `owner`.
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            deadline: None,
        }
    }

    /// Attach a deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Error from limiter operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Amount is above the bound
    #[error("Limit exceeded: {amount} > {limit}")]
    LimitExceeded { amount: usize, limit: usize },

    /// Policy source could not be consulted
    #[error("Limit unavailable: {0}")]
    Unavailable(String),

    /// The context deadline passed before the limiter answered
    #[error("Context deadline exceeded")]
    DeadlineExceeded,
}

/// Context-aware upper bound on a quantity.
///
/// Implementations must be safe for concurrent use; the validator does not
/// serialize access.
pub trait BoundLimiter: Send + Sync {
    /// Check whether `amount` is within the bound for `ctx`.
    ///
    /// # Errors
    /// * `LimitError::LimitExceeded` - `amount` is above the bound
    /// * `LimitError::Unavailable` / `LimitError::DeadlineExceeded` - no answer
    fn check(&self, ctx: &LimitContext, amount: usize) -> Result<(), LimitError>;

    /// Report the bound that applies to `ctx`.
    fn limit(&self, ctx: &LimitContext) -> Result<usize, LimitError>;
}

impl<L: BoundLimiter + ?Sized> BoundLimiter for Arc<L> {
    fn check(&self, ctx: &LimitContext, amount: usize) -> Result<(), LimitError> {
        (**self).check(ctx, amount)
    }

    fn limit(&self, ctx: &LimitContext) -> Result<usize, LimitError> {
        (**self).limit(ctx)
    }
}

impl<L: BoundLimiter + ?Sized> BoundLimiter for Box<L> {
    fn check(&self, ctx: &LimitContext, amount: usize) -> Result<(), LimitError> {
        (**self).check(ctx, amount)
    }

    fn limit(&self, ctx: &LimitContext) -> Result<usize, LimitError> {
        (**self).limit(ctx)
    }
}
