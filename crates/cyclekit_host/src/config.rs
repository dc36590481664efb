use std::env;

pub const DEFAULT_EVENT_CAPACITY: usize = 32;

pub const ENV_EVENT_CAPACITY: &str = "CYCLEKIT_EVENT_CAPACITY";
pub const ENV_TRACE: &str = "CYCLEKIT_TRACE";

/// Host-side settings for a [`crate::TransactionClient`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ClientConfig {
    /// Hop events buffered per subscriber before the oldest are dropped.
    pub event_capacity: usize,
    /// Dump each transaction at trace level before executing it.
    pub trace_transactions: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            trace_transactions: false,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CYCLEKIT_EVENT_CAPACITY` and `CYCLEKIT_TRACE`.
    ///
    /// Unparseable values are ignored; a zero capacity is raised to one.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = env::var(ENV_EVENT_CAPACITY)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.event_capacity = capacity.max(1);
        }
        if let Some(trace) = env::var(ENV_TRACE).ok().and_then(parse_bool) {
            config.trace_transactions = trace;
        }

        config
    }
}

pub fn parse_bool(value: String) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
