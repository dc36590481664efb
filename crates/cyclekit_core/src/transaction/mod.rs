//! cyclekit_core::transaction
//!
//! Batch execution over tracked entities.
//!
//! Key ideas:
//! - A transaction is an ordered list of items; order is preserved end-to-end
//! - Each item may need its entity in a given state before and/or after it runs
//! - Hops are applied one at a time through a `TransactionHandler`
//! - A later lifecycle request can absorb the last hop of an earlier operation

mod executor;
mod handler;
mod item;
mod lookahead;
mod pending;
mod record;

pub use executor::{
    ExecutionContext, ExecutorOptions, SkippedItem, TransactionExecutor, TransactionReport,
};
pub use handler::{HopArgs, TransactionHandler};
pub use item::{
    ClientTransaction, LifecycleRequest, Operation, OperationItem, RequestOptions,
    TransactionItem,
};
pub use lookahead::should_exclude_last_hop;
pub use pending::{PendingActions, StopReport};
pub use record::{EntityRecord, EntityTable, Token};
