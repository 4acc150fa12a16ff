//! Batch-size limiters.
//!
//! - [`StaticBoundLimiter`]: one fixed bound for every caller.
//! - [`ScopedBoundLimiter`]: a default bound with per-owner overrides that can
//!   be swapped at runtime, e.g. when an owner's tier changes.

use crate::config::ValidatorConfig;
use crate::ports::outbound::{BoundLimiter, LimitContext, LimitError};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// Fixed global bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticBoundLimiter {
    bound: usize,
}

impl StaticBoundLimiter {
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }

    /// Build from the default bound in `config`. Owner overrides are ignored.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.limits.max_request_batch_size)
    }
}

impl BoundLimiter for StaticBoundLimiter {
    fn check(&self, ctx: &LimitContext, amount: usize) -> Result<(), LimitError> {
        let limit = self.limit(ctx)?;
        if amount > limit {
            return Err(LimitError::LimitExceeded { amount, limit });
        }
        Ok(())
    }

    fn limit(&self, ctx: &LimitContext) -> Result<usize, LimitError> {
        if ctx.is_expired() {
            return Err(LimitError::DeadlineExceeded);
        }
        Ok(self.bound)
    }
}

/// Policy held by a [`ScopedBoundLimiter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitSettings {
    /// Bound for callers without an override
    pub default_bound: usize,
    /// Per-owner bounds
    pub owner_overrides: HashMap<String, usize>,
}

impl LimitSettings {
    /// Settings with only a default bound.
    pub fn new(default_bound: usize) -> Self {
        Self {
            default_bound,
            owner_overrides: HashMap::new(),
        }
    }

    /// Add an override for `owner`.
    pub fn with_override(mut self, owner: impl Into<String>, bound: usize) -> Self {
        self.owner_overrides.insert(owner.into(), bound);
        self
    }

    fn bound_for(&self, owner: Option<&str>) -> usize {
        match owner.and_then(|o| self.owner_overrides.get(o)) {
            Some(bound) => {
                debug!(owner = ?owner, bound, "Resolved owner batch-size override");
                *bound
            }
            None => self.default_bound,
        }
    }
}

/// Default bound plus per-owner overrides, updatable at runtime.
#[derive(Debug, Default)]
pub struct ScopedBoundLimiter {
    settings: RwLock<LimitSettings>,
}

impl ScopedBoundLimiter {
    pub fn new(settings: LimitSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Build from the `[limits]` section of a validator config.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(LimitSettings {
            default_bound: config.limits.max_request_batch_size,
            owner_overrides: config.limits.owner_overrides.clone(),
        })
    }

    /// Replace the active policy. Takes effect for the next query.
    pub fn update(&self, settings: LimitSettings) {
        info!(
            default_bound = settings.default_bound,
            overrides = settings.owner_overrides.len(),
            "Updating batch-size limit policy"
        );
        *self.settings.write() = settings;
    }

    /// Snapshot of the active policy.
    pub fn settings(&self) -> LimitSettings {
        self.settings.read().clone()
    }
}

impl BoundLimiter for ScopedBoundLimiter {
    fn check(&self, ctx: &LimitContext, amount: usize) -> Result<(), LimitError> {
        let limit = self.limit(ctx)?;
        if amount > limit {
            return Err(LimitError::LimitExceeded { amount, limit });
        }
        Ok(())
    }

    fn limit(&self, ctx: &LimitContext) -> Result<usize, LimitError> {
        if ctx.is_expired() {
            return Err(LimitError::DeadlineExceeded);
        }
        Ok(self.settings.read().bound_for(ctx.owner.as_deref()))
    }
}
