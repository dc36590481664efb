use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for cyclekit_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto `tracing` levels in the host crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    /// Path resolution and closest-state selection.
    Lifecycle,
    /// Batch execution bookkeeping.
    Transaction,
    /// An item's own hooks.
    Item,
    /// The hop dispatcher.
    Dispatch,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Undefined endpoint, `Restart` endpoint, or non-self `PreCreate` finish.
    InvalidPathRequest,
    /// Closest-state query for a post-execution state with no candidate set.
    UnsupportedPreState,
    /// Item addresses an entity that is going away or never existed.
    StaleTarget,
    /// An item hook or a dispatcher hop failed.
    ItemExecution,
    InvalidArgument,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// Requested path endpoints, as `LifecycleState::id()` values.
    LifecyclePath { start: i8, finish: i8 },

    /// Post-execution state a closest-state query was made for.
    PreState { post_state: i8 },

    /// Raw target token.
    Token(u64),

    /// Arbitrary numeric detail (e.g., error codes from external handlers).
    Code(u32),
}

/// Position of a failure inside a transaction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransactionRef {
    pub id: u64,
    pub item_index: usize,
}

/// The one error type that crosses module boundaries in cyclekit_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}{}", origin_suffix(.transaction))]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
    pub transaction: Option<TransactionRef>,
}

fn origin_suffix(origin: &Option<TransactionRef>) -> String {
    match origin {
        Some(t) => format!(" (transaction {} item {})", t.id, t.item_index),
        None => String::new(),
    }
}

impl CoreError {
    /// Fully-specified constructor (rarely needed at call sites).
    pub fn new(
        domain: Domain,
        kind: ErrorKind,
        severity: Severity,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            domain,
            kind,
            severity,
            message: message.into(),
            payload: Payload::None,
            transaction: None,
        }
    }

    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn debug() -> ErrB {
        ErrB::new(Severity::Debug)
    }
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }
    #[inline]
    pub fn fatal() -> ErrB {
        ErrB::new(Severity::Fatal)
    }

    /// Path resolution refused its endpoints.
    pub fn invalid_path_request(start: i8, finish: i8, why: &'static str) -> Self {
        CoreError::fatal()
            .domain(Domain::Lifecycle)
            .kind(ErrorKind::InvalidPathRequest)
            .msg(why)
            .payload(Payload::LifecyclePath { start, finish })
            .build()
    }

    /// No candidate pre-states are known for `post_state`.
    pub fn unsupported_pre_state(post_state: i8) -> Self {
        CoreError::fatal()
            .domain(Domain::Lifecycle)
            .kind(ErrorKind::UnsupportedPreState)
            .msgf(format_args!(
                "pre-execution states for state {post_state} are not supported"
            ))
            .payload(Payload::PreState { post_state })
            .build()
    }

    /// Item skipped because its target is going away or unknown.
    pub fn stale_target(token: u64, why: &'static str) -> Self {
        CoreError::warn()
            .domain(Domain::Transaction)
            .kind(ErrorKind::StaleTarget)
            .msg(why)
            .payload(Payload::Token(token))
            .build()
    }

    /// Stamp the transaction position into an error leaving the executor.
    ///
    /// Errors that are not already path/pre-state failures are re-kinded as
    /// `ItemExecution`.
    pub fn in_transaction(mut self, id: u64, item_index: usize) -> Self {
        if !matches!(
            self.kind,
            ErrorKind::InvalidPathRequest | ErrorKind::UnsupportedPreState
        ) {
            self.kind = ErrorKind::ItemExecution;
        }
        self.transaction = Some(TransactionRef { id, item_index });
        self
    }

    /// True when the executor cannot continue past this error.
    pub fn is_fatal(&self) -> bool {
        self.kind != ErrorKind::StaleTarget
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    // -------- Guided setters --------

    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload.
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    // -------- Finish --------
    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
            transaction: None,
        }
    }
}

impl From<ErrB> for CoreError {
    fn from(b: ErrB) -> Self {
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_other() {
        let e = CoreError::error().msg("boom").build();
        assert_eq!(e.domain, Domain::Other);
        assert_eq!(e.kind, ErrorKind::Other);
        assert_eq!(e.payload, Payload::None);
        assert_eq!(e.to_string(), "Error: boom");
    }

    #[test]
    fn in_transaction_rekinds_hook_failures_only() {
        let hook = CoreError::error()
            .domain(Domain::Item)
            .msg("bind failed")
            .build()
            .in_transaction(7, 2);
        assert_eq!(hook.kind, ErrorKind::ItemExecution);
        assert_eq!(
            hook.transaction,
            Some(TransactionRef {
                id: 7,
                item_index: 2
            })
        );
        assert_eq!(hook.to_string(), "Error: bind failed (transaction 7 item 2)");

        let path = CoreError::invalid_path_request(-2, 1, "undefined").in_transaction(7, 0);
        assert_eq!(path.kind, ErrorKind::InvalidPathRequest);
        assert!(path.is_fatal());
    }

    #[test]
    fn stale_target_is_not_fatal() {
        let e = CoreError::stale_target(42, "pending destruction");
        assert_eq!(e.severity, Severity::Warn);
        assert_eq!(e.payload, Payload::Token(42));
        assert!(!e.is_fatal());
    }
}
