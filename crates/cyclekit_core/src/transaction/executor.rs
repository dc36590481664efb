use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::{CoreError, Result};
use crate::lifecycle::{closest_pre_execution_state, resolve_path, LifecycleState};

use super::handler::{apply_hop, cycle_through};
use super::{
    should_exclude_last_hop, ClientTransaction, EntityRecord, EntityTable, HopArgs,
    LifecycleRequest, OperationItem, PendingActions, Token, TransactionHandler, TransactionItem,
};

/// Executor tuning.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ExecutorOptions {
    /// Dump every transaction at `trace` level before executing it.
    pub trace_transactions: bool,
}

/// An item that was not executed because its target is stale.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SkippedItem {
    pub index: usize,
    pub reason: CoreError,
}

/// Outcome of one completed transaction.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionReport {
    pub id: u64,
    pub executed: Vec<usize>,
    pub skipped: Vec<SkippedItem>,
}

enum ItemOutcome {
    Executed,
    Skipped(CoreError),
}

/// What item hooks get to touch while they run.
pub struct ExecutionContext<'a> {
    token: Option<Token>,
    entities: &'a mut EntityTable,
    handler: &'a mut dyn TransactionHandler,
    pending: &'a mut PendingActions,
}

impl<'a> ExecutionContext<'a> {
    /// Token of the item being executed.
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn entity(&self, token: Token) -> Option<&EntityRecord> {
        self.entities.get(token)
    }

    pub fn handler(&mut self) -> &mut dyn TransactionHandler {
        &mut *self.handler
    }

    pub fn pending(&mut self) -> &mut PendingActions {
        &mut *self.pending
    }

    /// Start tracking `token` and take it through its `Create` hop.
    ///
    /// Replaces any existing record for the token. If the hop fails the
    /// record is dropped again.
    pub fn launch(&mut self, token: Token, forward: bool) -> Result<()> {
        let mut record = EntityRecord::new(token);
        record.forward = forward;
        let args = HopArgs::cycling_to(&record, LifecycleState::Create);
        self.entities.insert(record);

        let launched = apply_hop(
            &mut *self.handler,
            &mut *self.entities,
            &mut *self.pending,
            token,
            LifecycleState::Create,
            &args,
        );
        if launched.is_err() {
            self.entities.remove(token);
        }
        launched
    }

    /// Tear `token` down and bring a fresh instance back to where the old one
    /// was: paused and stopped entities return to that state, everything else
    /// is resumed.
    pub fn relaunch(&mut self, token: Token) -> Result<()> {
        let previous = self
            .entities
            .get(token)
            .cloned()
            .ok_or_else(|| CoreError::stale_target(token.0, "relaunch of an untracked entity"))?;

        let teardown = resolve_path(previous.state, LifecycleState::Destroy, false)?;
        cycle_through(
            &mut *self.handler,
            &mut *self.entities,
            &mut *self.pending,
            token,
            &teardown,
            LifecycleState::Destroy,
        )?;

        self.launch(token, previous.forward)?;
        self.pending.report_relaunch = true;

        let target = LifecycleRequest::for_current_state(&previous).target_state();
        let hops = resolve_path(LifecycleState::Create, target, false)?;
        debug!(token = token.0, to = %target, ?hops, "re-driving relaunched entity");
        cycle_through(
            &mut *self.handler,
            &mut *self.entities,
            &mut *self.pending,
            token,
            &hops,
            target,
        )
    }

    /// Stop tracking `token` without running any hop.
    pub fn forget(&mut self, token: Token) -> Option<EntityRecord> {
        self.entities.remove(token)
    }
}

/// Drives transactions item by item against the tracked entities.
///
/// One transaction runs to completion before the next; there is no internal
/// parallelism. Entity records survive across transactions; pending actions
/// and destruction marks do not.
pub struct TransactionExecutor<H: TransactionHandler> {
    handler: H,
    entities: EntityTable,
    pending_destruction: HashSet<Token>,
    pending: PendingActions,
    options: ExecutorOptions,
}

impl<H: TransactionHandler> TransactionExecutor<H> {
    pub fn new(handler: H) -> Self {
        Self::with_options(handler, ExecutorOptions::default())
    }

    pub fn with_options(handler: H, options: ExecutorOptions) -> Self {
        Self {
            handler,
            entities: EntityTable::new(),
            pending_destruction: HashSet::new(),
            pending: PendingActions::new(),
            options,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    /// Track an entity that came into existence outside any transaction.
    pub fn track(&mut self, record: EntityRecord) {
        self.entities.insert(record);
    }

    pub fn is_pending_destruction(&self, token: Token) -> bool {
        self.pending_destruction.contains(&token)
    }

    /// Pre-execution pass: run operation `pre_execute` hooks and mark every
    /// token with a `Destroy` request as pending destruction.
    pub fn pre_execute(&mut self, transaction: &ClientTransaction) {
        for item in transaction.items() {
            match item {
                TransactionItem::Lifecycle(req)
                    if req.target_state() == LifecycleState::Destroy =>
                {
                    self.pending_destruction.insert(req.token());
                }
                TransactionItem::Lifecycle(_) => {}
                TransactionItem::Operation(op) => op.operation().pre_execute(&mut self.handler),
            }
        }
    }

    /// `pre_execute` followed by `execute`.
    pub fn schedule(&mut self, transaction: ClientTransaction) -> Result<TransactionReport> {
        self.pre_execute(&transaction);
        self.execute(transaction)
    }

    /// Execute every item in order.
    ///
    /// The first failing item aborts the rest; hops already applied stay
    /// applied. Pending actions are cleared on every exit path, and so are
    /// pending-destruction marks of destroy requests the abort never reached.
    pub fn execute(&mut self, transaction: ClientTransaction) -> Result<TransactionReport> {
        let result = self.execute_items(&transaction);
        if let Err(err) = &result {
            let reached = err.transaction.map_or(0, |origin| origin.item_index + 1);
            self.release_unreached_destruction(&transaction, reached);
        }
        self.pending.clear();
        result
    }

    fn release_unreached_destruction(&mut self, transaction: &ClientTransaction, from: usize) {
        for item in transaction.items().iter().skip(from) {
            if let TransactionItem::Lifecycle(req) = item {
                if req.target_state() == LifecycleState::Destroy
                    && self.pending_destruction.remove(&req.token())
                {
                    debug!(
                        token = req.token().0,
                        "transaction aborted, releasing destruction mark"
                    );
                }
            }
        }
    }

    fn execute_items(&mut self, transaction: &ClientTransaction) -> Result<TransactionReport> {
        if self.options.trace_transactions {
            trace!("executing transaction:\n{transaction}");
        }

        let id = transaction.id();
        let items = transaction.items();
        let mut report = TransactionReport {
            id,
            ..TransactionReport::default()
        };

        for (index, item) in items.iter().enumerate() {
            let outcome = match item {
                TransactionItem::Lifecycle(req) => {
                    self.execute_lifecycle_request(items, index, req)
                }
                TransactionItem::Operation(op) => self.execute_operation(items, index, op),
            }
            .map_err(|e| e.in_transaction(id, index))?;

            match outcome {
                ItemOutcome::Executed => report.executed.push(index),
                ItemOutcome::Skipped(reason) => {
                    warn!(transaction = id, index, "{reason}");
                    report.skipped.push(SkippedItem { index, reason });
                }
            }
        }

        Ok(report)
    }

    fn execute_lifecycle_request(
        &mut self,
        items: &[TransactionItem],
        index: usize,
        req: &LifecycleRequest,
    ) -> Result<ItemOutcome> {
        let token = req.token();
        let target = req.target_state();

        let was_pending = if target == LifecycleState::Destroy {
            self.pending_destruction.remove(&token)
        } else {
            self.pending_destruction.contains(&token)
        };

        let Some(current) = self.entities.state_of(token) else {
            let why = if was_pending {
                "skip lifecycle request for entity pending destruction"
            } else {
                "skip lifecycle request for untracked entity"
            };
            return Ok(ItemOutcome::Skipped(CoreError::stale_target(token.0, why)));
        };

        let hops = resolve_path(current, target, true)?;
        debug!(token = token.0, from = %current, to = %target, ?hops, "resolved lifecycle request");
        self.cycle(token, &hops, target)?;

        // The request performs the final hop itself.
        let reached = self.entities.state_of(token);
        if reached.is_some() && reached != Some(target) {
            let options = req.options();
            let args = HopArgs {
                forward: options.forward,
                user_leaving: options.user_leaving,
                finishing: options.finishing,
                reason: format!("lifecycle request: {target}").into(),
            };
            if target == LifecycleState::Resume {
                if let Some(record) = self.entities.get_mut(token) {
                    record.forward = options.forward;
                }
            }
            apply_hop(
                &mut self.handler,
                &mut self.entities,
                &mut self.pending,
                token,
                target,
                &args,
            )?;
        }

        self.handler
            .on_request_settled(token, target, &mut self.pending)?;
        self.discard_if_destroyed(items, index, token);

        Ok(ItemOutcome::Executed)
    }

    fn execute_operation(
        &mut self,
        items: &[TransactionItem],
        index: usize,
        op: &OperationItem,
    ) -> Result<ItemOutcome> {
        let token = op.token();
        if let Some(token) = token {
            if !self.entities.contains(token) && self.pending_destruction.contains(&token) {
                return Ok(ItemOutcome::Skipped(CoreError::stale_target(
                    token.0,
                    "skip operation for entity pending destruction",
                )));
            }
        }

        let post_state = op.post_execution_state();

        if op.has_defined_pre_execution_state() {
            let current = token.and_then(|t| self.entities.state_of(t));
            let closest = closest_pre_execution_state(current, post_state)?;
            if let (Some(token), Some(current)) = (token, current) {
                if closest != LifecycleState::Undefined {
                    let hops = resolve_path(current, closest, false)?;
                    debug!(
                        token = token.0,
                        from = %current,
                        to = %closest,
                        ?hops,
                        "cycling to pre-execution state"
                    );
                    self.cycle(token, &hops, closest)?;
                }
            }
        }

        {
            let mut ctx = ExecutionContext {
                token,
                entities: &mut self.entities,
                handler: &mut self.handler,
                pending: &mut self.pending,
            };
            op.operation().execute(&mut ctx)?;
            op.operation().post_execute(&mut ctx)?;
        }

        // The operation may have just created the record (a launch).
        if post_state != LifecycleState::Undefined {
            if let Some(token) = token {
                if let Some(current) = self.entities.state_of(token) {
                    let exclude_last = should_exclude_last_hop(items, index);
                    let hops = resolve_path(current, post_state, exclude_last)?;
                    debug!(
                        token = token.0,
                        from = %current,
                        to = %post_state,
                        exclude_last,
                        ?hops,
                        "cycling to post-execution state"
                    );
                    self.cycle(token, &hops, post_state)?;
                }
            }
        }
        if let Some(token) = token {
            self.discard_if_destroyed(items, index, token);
        }

        Ok(ItemOutcome::Executed)
    }

    fn cycle(
        &mut self,
        token: Token,
        hops: &[LifecycleState],
        destination: LifecycleState,
    ) -> Result<()> {
        cycle_through(
            &mut self.handler,
            &mut self.entities,
            &mut self.pending,
            token,
            hops,
            destination,
        )
    }

    /// Records are dropped once their entity sits in `Destroy` and no later
    /// item of the transaction addresses it.
    fn discard_if_destroyed(&mut self, items: &[TransactionItem], index: usize, token: Token) {
        let addressed_later = items
            .iter()
            .skip(index + 1)
            .any(|item| item.target_token() == Some(token));
        if !addressed_later && self.entities.state_of(token) == Some(LifecycleState::Destroy) {
            debug!(token = token.0, "entity destroyed, discarding record");
            self.entities.remove(token);
        }
    }
}
