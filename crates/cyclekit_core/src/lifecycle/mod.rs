//! cyclekit_core::lifecycle
//!
//! Pure lifecycle path arithmetic. No entity state, no callbacks.
//!
//! Key ideas:
//! - States are totally ordered, except the `Restart` pseudo-state
//! - `resolve_path()` turns a (start, finish) request into hops
//! - `closest_of()` ranks candidate states by hop count, penalizing destruction

mod closest;
mod graph;
mod path;
mod state;

pub use closest::{
    closest_of, closest_pre_execution_state, DESTRUCTION_PENALTY, RESUME_PRE_EXECUTION_STATES,
};
pub use graph::{path_table, PathEntry, PathTable};
pub use path::{path_involves_destruction, resolve_path};
pub use state::{LifecycleState, ALL_STATES, ORDERED_STATES};
