//! cyclekit_host
//!
//! Host-facing adapter built on top of cyclekit_core.
//! Provides logging, a hop-event stream and a transaction client,
//! while keeping execution semantics in `cyclekit_core`.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod handler;

// Re-export core types that host users will commonly need
pub use client::TransactionClient;
pub use config::ClientConfig;
pub use cyclekit_core::error::{CoreError, Result};
pub use cyclekit_core::lifecycle::LifecycleState;
pub use cyclekit_core::transaction::{ClientTransaction, Token, TransactionHandler};
pub use events::HopEvent;
pub use handler::EventedHandler;
