//! cyclekit_core: transaction-ordered lifecycle transition executor.
//!
//! Design goals:
//! - Pure, testable path logic (no dispatcher needed to resolve hops).
//! - Explicit types; items are a tagged enum, hooks sit behind traits.
//! - Small, stable public API surface.

pub mod error;

/// Lifecycle states, path resolution and closest-state selection.
pub mod lifecycle;

/// Transaction items, entity records and the batch executor.
pub mod transaction;
