use cyclekit_core::error::Result;
use cyclekit_core::lifecycle::LifecycleState;
use cyclekit_core::transaction::{EntityRecord, PendingActions, Token, TransactionHandler};
use tokio::sync::broadcast;

use crate::events::HopEvent;

/// Wraps a host handler and publishes a [`HopEvent`] after each successful hop.
///
/// broadcast is used so:
/// - hops never block on a slow subscriber
/// - lagging receivers drop old events rather than stalling the executor
pub struct EventedHandler<H> {
    inner: H,
    events: broadcast::Sender<HopEvent>,
}

impl<H: TransactionHandler> EventedHandler<H> {
    pub fn new(inner: H, events: broadcast::Sender<HopEvent>) -> Self {
        Self { inner, events }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    fn publish(&self, entity: &EntityRecord, goal_state: LifecycleState) {
        // No receivers is fine: events are best-effort.
        let _ = self.events.send(HopEvent {
            token: entity.token,
            start_state: entity.state,
            goal_state,
        });
    }
}

impl<H: TransactionHandler> TransactionHandler for EventedHandler<H> {
    fn on_create(&mut self, entity: &EntityRecord, pending: &mut PendingActions) -> Result<()> {
        self.inner.on_create(entity, pending)?;
        self.publish(entity, LifecycleState::Create);
        Ok(())
    }

    fn on_start(&mut self, entity: &EntityRecord, pending: &mut PendingActions) -> Result<()> {
        self.inner.on_start(entity, pending)?;
        self.publish(entity, LifecycleState::Start);
        Ok(())
    }

    fn on_resume(&mut self, entity: &EntityRecord, forward: bool, reason: &str) -> Result<()> {
        self.inner.on_resume(entity, forward, reason)?;
        self.publish(entity, LifecycleState::Resume);
        Ok(())
    }

    fn on_pause(
        &mut self,
        entity: &EntityRecord,
        user_leaving: bool,
        pending: &mut PendingActions,
        reason: &str,
    ) -> Result<()> {
        self.inner.on_pause(entity, user_leaving, pending, reason)?;
        self.publish(entity, LifecycleState::Pause);
        Ok(())
    }

    fn on_stop(
        &mut self,
        entity: &EntityRecord,
        pending: &mut PendingActions,
        reason: &str,
    ) -> Result<()> {
        self.inner.on_stop(entity, pending, reason)?;
        self.publish(entity, LifecycleState::Stop);
        Ok(())
    }

    fn on_destroy(&mut self, entity: &EntityRecord, finishing: bool, reason: &str) -> Result<()> {
        self.inner.on_destroy(entity, finishing, reason)?;
        self.publish(entity, LifecycleState::Destroy);
        Ok(())
    }

    fn on_restart(&mut self, entity: &EntityRecord) -> Result<()> {
        self.inner.on_restart(entity)?;
        self.publish(entity, LifecycleState::Restart);
        Ok(())
    }

    fn on_request_settled(
        &mut self,
        token: Token,
        state: LifecycleState,
        pending: &mut PendingActions,
    ) -> Result<()> {
        self.inner.on_request_settled(token, state, pending)
    }
}
