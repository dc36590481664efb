/// Data a stop hop hands back for the host to report once the batch settles.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StopReport {
    pub saved_state: Option<Vec<u8>>,
    pub description: Option<String>,
}

/// Accumulator shared by hops and item hooks during one `execute` call.
///
/// Cleared unconditionally when the call returns, success or failure.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PendingActions {
    pub restore_state: bool,
    pub call_post_create: bool,
    pub saved_state: Option<Vec<u8>>,
    pub stop_report: Option<StopReport>,
    pub report_relaunch: bool,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_everything() {
        let mut pending = PendingActions {
            restore_state: true,
            call_post_create: true,
            saved_state: Some(vec![1, 2]),
            stop_report: Some(StopReport::default()),
            report_relaunch: true,
        };
        assert!(!pending.is_empty());

        pending.clear();
        assert!(pending.is_empty());
    }
}
