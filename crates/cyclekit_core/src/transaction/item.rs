use std::fmt;

use crate::error::{CoreError, Domain, ErrorKind, Payload, Result};
use crate::lifecycle::LifecycleState;

use super::{EntityRecord, ExecutionContext, TransactionHandler, Token};

/// Side-effecting work carried by an [`OperationItem`].
///
/// Implementors own whatever the operation needs (resources to bind, results
/// to deliver, ...). Lifecycle bookkeeping stays with the executor.
pub trait Operation: fmt::Debug {
    /// Runs for every item before any item of the transaction executes.
    fn pre_execute(&self, _handler: &mut dyn TransactionHandler) {}

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<()>;

    fn post_execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Extra arguments for the final hop a lifecycle request performs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RequestOptions {
    /// Resume: entity is moving forward in its stack.
    pub forward: bool,
    /// Pause: the user is navigating away.
    pub user_leaving: bool,
    /// Destroy: the entity is finishing for good.
    pub finishing: bool,
}

/// "Drive the entity to this state."
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LifecycleRequest {
    token: Token,
    target: LifecycleState,
    options: RequestOptions,
}

impl LifecycleRequest {
    /// Build a request; `target` must be an ordered state.
    pub fn new(token: Token, target: LifecycleState) -> Result<Self> {
        if !target.is_ordered() {
            return Err(CoreError::error()
                .domain(Domain::Transaction)
                .kind(ErrorKind::InvalidArgument)
                .msgf(format_args!("lifecycle request cannot target {target}"))
                .payload(Payload::Token(token.0))
                .build());
        }
        Ok(Self {
            token,
            target,
            options: RequestOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// The request that keeps `entity` where it currently is.
    ///
    /// Paused and stopped entities get a request for their own state;
    /// everything else is asked to resume (not forward).
    pub fn for_current_state(entity: &EntityRecord) -> Self {
        let target = match entity.state {
            LifecycleState::Pause => LifecycleState::Pause,
            LifecycleState::Stop => LifecycleState::Stop,
            _ => LifecycleState::Resume,
        };
        Self {
            token: entity.token,
            target,
            options: RequestOptions::default(),
        }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn target_state(&self) -> LifecycleState {
        self.target
    }

    pub fn options(&self) -> RequestOptions {
        self.options
    }
}

/// An opaque operation with optional lifecycle requirements.
#[derive(Debug)]
pub struct OperationItem {
    token: Option<Token>,
    post_state: LifecycleState,
    defined_pre_state: bool,
    operation: Box<dyn Operation>,
}

impl OperationItem {
    /// Operation with no lifecycle requirement.
    pub fn new(token: Option<Token>, operation: impl Operation + 'static) -> Self {
        Self {
            token,
            post_state: LifecycleState::Undefined,
            defined_pre_state: false,
            operation: Box::new(operation),
        }
    }

    /// Require the entity to end in `post_state` once the operation has run.
    ///
    /// `Undefined` clears the requirement; `Restart` is rejected.
    pub fn with_post_state(mut self, post_state: LifecycleState) -> Result<Self> {
        if post_state == LifecycleState::Restart {
            return Err(CoreError::error()
                .domain(Domain::Transaction)
                .kind(ErrorKind::InvalidArgument)
                .msg("post-execution state cannot be the restart pseudo-state")
                .build());
        }
        self.post_state = post_state;
        Ok(self)
    }

    /// Also require the entity to sit in the closest valid pre-state first.
    ///
    /// Only `Resume` has known pre-states; any other post state fails at
    /// execution time with `UnsupportedPreState`.
    pub fn with_defined_pre_state(mut self) -> Self {
        self.defined_pre_state = true;
        self
    }

    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn post_execution_state(&self) -> LifecycleState {
        self.post_state
    }

    pub fn has_defined_pre_execution_state(&self) -> bool {
        self.defined_pre_state
    }

    pub fn operation(&self) -> &dyn Operation {
        self.operation.as_ref()
    }
}

/// One entry of a transaction.
#[derive(Debug)]
pub enum TransactionItem {
    Lifecycle(LifecycleRequest),
    Operation(OperationItem),
}

impl TransactionItem {
    pub fn is_lifecycle_item(&self) -> bool {
        matches!(self, TransactionItem::Lifecycle(_))
    }

    pub fn target_token(&self) -> Option<Token> {
        match self {
            TransactionItem::Lifecycle(req) => Some(req.token),
            TransactionItem::Operation(op) => op.token,
        }
    }

    /// `Undefined` for lifecycle requests and operations without a requirement.
    pub fn post_execution_state(&self) -> LifecycleState {
        match self {
            TransactionItem::Lifecycle(_) => LifecycleState::Undefined,
            TransactionItem::Operation(op) => op.post_state,
        }
    }

    pub fn has_defined_pre_execution_state(&self) -> bool {
        match self {
            TransactionItem::Lifecycle(_) => false,
            TransactionItem::Operation(op) => op.defined_pre_state,
        }
    }

    /// Target state of a lifecycle request.
    pub fn target_state(&self) -> Option<LifecycleState> {
        match self {
            TransactionItem::Lifecycle(req) => Some(req.target),
            TransactionItem::Operation(_) => None,
        }
    }
}

impl From<LifecycleRequest> for TransactionItem {
    fn from(req: LifecycleRequest) -> Self {
        TransactionItem::Lifecycle(req)
    }
}

impl From<OperationItem> for TransactionItem {
    fn from(op: OperationItem) -> Self {
        TransactionItem::Operation(op)
    }
}

impl fmt::Display for TransactionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionItem::Lifecycle(req) => {
                write!(f, "LifecycleRequest{{token={}, target={}}}", req.token, req.target)
            }
            TransactionItem::Operation(op) => {
                write!(f, "{:?}{{token=", op.operation)?;
                match op.token {
                    Some(token) => write!(f, "{token}")?,
                    None => f.write_str("none")?,
                }
                write!(f, ", post={}}}", op.post_state)
            }
        }
    }
}

/// Ordered batch of items, consumed once by the executor.
#[derive(Debug, Default)]
pub struct ClientTransaction {
    id: u64,
    items: Vec<TransactionItem>,
}

impl ClientTransaction {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<TransactionItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn push(&mut self, item: impl Into<TransactionItem>) {
        self.items.push(item.into());
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn items(&self) -> &[TransactionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ClientTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tId:{} Items:", self.id)?;
        for (index, item) in self.items.iter().enumerate() {
            write!(f, "\ntId:{}   {}: {}", self.id, index, item)?;
        }
        Ok(())
    }
}
