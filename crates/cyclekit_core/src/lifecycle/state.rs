use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Domain, ErrorKind, Payload};

/// Lifecycle states of a tracked entity.
///
/// Ordered states (path arithmetic runs over these):
/// - PreCreate < Create < Start < Resume < Pause < Stop < Destroy
///
/// Outside the order:
/// - Undefined: "no state" / "no requirement"
/// - Restart: pseudo-state, only ever an intermediate hop
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LifecycleState {
    Undefined,
    PreCreate,
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
    Restart,
}

impl LifecycleState {
    /// Numeric id. Ordered states compare by this value.
    ///
    /// `Undefined` sits below the order; `Restart` is given an id past
    /// `Destroy` but never participates in range arithmetic.
    pub const fn id(self) -> i8 {
        match self {
            LifecycleState::Undefined => -2,
            LifecycleState::PreCreate => -1,
            LifecycleState::Create => 0,
            LifecycleState::Start => 1,
            LifecycleState::Resume => 2,
            LifecycleState::Pause => 3,
            LifecycleState::Stop => 4,
            LifecycleState::Destroy => 5,
            LifecycleState::Restart => 6,
        }
    }

    /// True for states in the linear order.
    pub const fn is_ordered(self) -> bool {
        !matches!(self, LifecycleState::Undefined | LifecycleState::Restart)
    }

    /// Stable, human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            LifecycleState::Undefined => "UNDEFINED",
            LifecycleState::PreCreate => "PRE_CREATE",
            LifecycleState::Create => "CREATE",
            LifecycleState::Start => "START",
            LifecycleState::Resume => "RESUME",
            LifecycleState::Pause => "PAUSE",
            LifecycleState::Stop => "STOP",
            LifecycleState::Destroy => "DESTROY",
            LifecycleState::Restart => "RESTART",
        }
    }

    /// Ordered state for a numeric id, if any.
    pub fn from_ordered_id(id: i8) -> Option<Self> {
        ORDERED_STATES.into_iter().find(|s| s.id() == id)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LifecycleState {
    type Err = CoreError;

    /// Accepts labels case-insensitively, with or without the underscore
    /// (`resume`, `PRE_CREATE`, `precreate`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        ALL_STATES
            .into_iter()
            .find(|state| state.label().replace('_', "") == wanted)
            .ok_or_else(|| {
                CoreError::warn()
                    .domain(Domain::Config)
                    .kind(ErrorKind::InvalidArgument)
                    .msg("unknown lifecycle state")
                    .payload(Payload::Context {
                        key: "state",
                        value: s.to_string().into(),
                    })
                    .build()
            })
    }
}

/// The linear order, ascending.
pub const ORDERED_STATES: [LifecycleState; 7] = [
    LifecycleState::PreCreate,
    LifecycleState::Create,
    LifecycleState::Start,
    LifecycleState::Resume,
    LifecycleState::Pause,
    LifecycleState::Stop,
    LifecycleState::Destroy,
];

/// Canonical list of all lifecycle states (ordered + out-of-order).
pub const ALL_STATES: [LifecycleState; 9] = [
    LifecycleState::Undefined,
    LifecycleState::PreCreate,
    LifecycleState::Create,
    LifecycleState::Start,
    LifecycleState::Resume,
    LifecycleState::Pause,
    LifecycleState::Stop,
    LifecycleState::Destroy,
    LifecycleState::Restart,
];
