use cyclekit_core::error::Result;
use cyclekit_core::lifecycle::LifecycleState;
use cyclekit_core::transaction::{
    ClientTransaction, EntityRecord, ExecutorOptions, Token, TransactionExecutor,
    TransactionHandler, TransactionReport,
};
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::log_core_error;
use crate::events::HopEvent;
use crate::handler::EventedHandler;

/// Host-facing front of the executor.
///
/// Responsibilities:
/// - Own the executor and the host's hop handler
/// - Run each scheduled transaction to completion, one at a time
/// - Log aborted transactions and skipped items
/// - Provide a hop-event stream
pub struct TransactionClient<H: TransactionHandler> {
    executor: TransactionExecutor<EventedHandler<H>>,
    hop_events: broadcast::Sender<HopEvent>,
}

impl<H: TransactionHandler> TransactionClient<H> {
    pub fn new(handler: H, config: ClientConfig) -> Self {
        let (hop_events, _rx) = broadcast::channel(config.event_capacity.max(1));
        let options = ExecutorOptions {
            trace_transactions: config.trace_transactions,
        };
        let handler = EventedHandler::new(handler, hop_events.clone());

        Self {
            executor: TransactionExecutor::with_options(handler, options),
            hop_events,
        }
    }

    /// Pre-execute and execute `transaction`.
    ///
    /// An aborted transaction is logged once, then returned as the error.
    /// Hops applied before the failure stay applied.
    pub fn schedule(&mut self, transaction: ClientTransaction) -> Result<TransactionReport> {
        let id = transaction.id();
        match self.executor.schedule(transaction) {
            Ok(report) => {
                debug!(
                    transaction = id,
                    executed = report.executed.len(),
                    skipped = report.skipped.len(),
                    "transaction complete"
                );
                Ok(report)
            }
            Err(e) => {
                log_core_error(&e);
                Err(e)
            }
        }
    }

    /// Subscribe to hop events.
    pub fn subscribe_hop_events(&self) -> broadcast::Receiver<HopEvent> {
        self.hop_events.subscribe()
    }

    /// Track an entity created outside any transaction.
    pub fn track(&mut self, record: EntityRecord) {
        self.executor.track(record);
    }

    pub fn state_of(&self, token: Token) -> Option<LifecycleState> {
        self.executor.entities().state_of(token)
    }

    pub fn handler(&self) -> &H {
        self.executor.handler().inner()
    }

    pub fn handler_mut(&mut self) -> &mut H {
        self.executor.handler_mut().inner_mut()
    }
}
