//! Hop event types.
//!
//! Emitted after every hop the executor applies. Hosts can subscribe and
//! forward them to whatever observes entity lifecycles.

use cyclekit_core::lifecycle::LifecycleState;
use cyclekit_core::transaction::Token;

/// Emitted after a successful hop.
///
/// `goal_state` is the hop itself; for `Restart` the entity's recorded state
/// does not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopEvent {
    pub token: Token,
    pub start_state: LifecycleState,
    pub goal_state: LifecycleState,
}
