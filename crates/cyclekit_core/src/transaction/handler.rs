use std::borrow::Cow;

use tracing::debug;

use crate::error::{CoreError, Domain, ErrorKind, Payload, Result};
use crate::lifecycle::LifecycleState;

use super::{EntityRecord, EntityTable, PendingActions, Token};

/// Callbacks that perform the work of a single hop.
///
/// Each call receives the record as it was *before* the hop; the executor
/// advances the record only after the call returns `Ok`. Returning an error
/// aborts the rest of the transaction.
pub trait TransactionHandler {
    fn on_create(&mut self, entity: &EntityRecord, pending: &mut PendingActions) -> Result<()>;
    fn on_start(&mut self, entity: &EntityRecord, pending: &mut PendingActions) -> Result<()>;
    fn on_resume(&mut self, entity: &EntityRecord, forward: bool, reason: &str) -> Result<()>;
    fn on_pause(
        &mut self,
        entity: &EntityRecord,
        user_leaving: bool,
        pending: &mut PendingActions,
        reason: &str,
    ) -> Result<()>;
    fn on_stop(
        &mut self,
        entity: &EntityRecord,
        pending: &mut PendingActions,
        reason: &str,
    ) -> Result<()>;
    fn on_destroy(&mut self, entity: &EntityRecord, finishing: bool, reason: &str) -> Result<()>;
    fn on_restart(&mut self, entity: &EntityRecord) -> Result<()>;

    /// Called once a lifecycle request has settled its entity in `state`.
    fn on_request_settled(
        &mut self,
        _token: Token,
        _state: LifecycleState,
        _pending: &mut PendingActions,
    ) -> Result<()> {
        Ok(())
    }
}

/// Arguments forwarded to the hop callbacks.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HopArgs {
    pub forward: bool,
    pub user_leaving: bool,
    pub finishing: bool,
    pub reason: Cow<'static, str>,
}

impl HopArgs {
    /// Arguments for a hop taken on the way to `destination`.
    pub fn cycling_to(entity: &EntityRecord, destination: LifecycleState) -> Self {
        Self {
            forward: entity.forward,
            user_leaving: false,
            finishing: false,
            reason: Cow::Owned(format!("cycling to: {destination}")),
        }
    }
}

/// Apply one hop to `token` through `handler`, then advance its record.
///
/// `Restart` leaves the recorded state untouched: it is only ever a waypoint
/// between `Stop` and `Start`.
pub(crate) fn apply_hop(
    handler: &mut dyn TransactionHandler,
    entities: &mut EntityTable,
    pending: &mut PendingActions,
    token: Token,
    hop: LifecycleState,
    args: &HopArgs,
) -> Result<()> {
    let record = entities.get(token).ok_or_else(|| untracked(token))?;

    debug!(token = token.0, from = %record.state, to = %hop, "applying lifecycle hop");

    match hop {
        LifecycleState::Create => handler.on_create(record, pending)?,
        LifecycleState::Start => handler.on_start(record, pending)?,
        LifecycleState::Resume => handler.on_resume(record, args.forward, &args.reason)?,
        LifecycleState::Pause => {
            handler.on_pause(record, args.user_leaving, pending, &args.reason)?
        }
        LifecycleState::Stop => handler.on_stop(record, pending, &args.reason)?,
        LifecycleState::Destroy => handler.on_destroy(record, args.finishing, &args.reason)?,
        LifecycleState::Restart => handler.on_restart(record)?,
        LifecycleState::Undefined | LifecycleState::PreCreate => {
            return Err(CoreError::fatal()
                .domain(Domain::Dispatch)
                .kind(ErrorKind::InvalidPathRequest)
                .msgf(format_args!("unexpected lifecycle hop: {hop}"))
                .payload(Payload::LifecyclePath {
                    start: record.state.id(),
                    finish: hop.id(),
                })
                .build());
        }
    }

    if hop != LifecycleState::Restart {
        if let Some(record) = entities.get_mut(token) {
            record.state = hop;
        }
    }

    Ok(())
}

/// Apply `hops` in order, each one committed before the next is attempted.
pub(crate) fn cycle_through(
    handler: &mut dyn TransactionHandler,
    entities: &mut EntityTable,
    pending: &mut PendingActions,
    token: Token,
    hops: &[LifecycleState],
    destination: LifecycleState,
) -> Result<()> {
    if hops.is_empty() {
        return Ok(());
    }
    let args = entities
        .get(token)
        .map(|record| HopArgs::cycling_to(record, destination))
        .ok_or_else(|| untracked(token))?;

    for &hop in hops {
        apply_hop(handler, entities, pending, token, hop, &args)?;
    }
    Ok(())
}

fn untracked(token: Token) -> CoreError {
    CoreError::error()
        .domain(Domain::Dispatch)
        .kind(ErrorKind::StaleTarget)
        .msg("hop requested for an untracked entity")
        .payload(Payload::Token(token.0))
        .build()
}
