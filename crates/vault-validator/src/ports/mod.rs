//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: Validation API the service layer calls
//! - **Outbound (Driven)**: The batch-size limiter this subsystem consumes

pub mod inbound;
pub mod outbound;
