use tracing::debug;

use crate::error::{CoreError, Result};

use super::{path_involves_destruction, resolve_path, LifecycleState};

/// Extra cost charged to a candidate whose path passes through `Destroy`.
pub const DESTRUCTION_PENALTY: usize = 10;

/// Acceptable states to be in before an item that ends in `Resume` runs.
pub const RESUME_PRE_EXECUTION_STATES: [LifecycleState; 2] =
    [LifecycleState::Start, LifecycleState::Pause];

/// Pick the candidate reachable from `current` with the fewest hops.
///
/// Destructive paths cost `DESTRUCTION_PENALTY` extra. Ties keep the
/// earliest candidate. Returns `Undefined` when there is nothing to pick
/// from or no tracked entity (`current == None`).
pub fn closest_of(
    current: Option<LifecycleState>,
    candidates: &[LifecycleState],
) -> Result<LifecycleState> {
    if candidates.is_empty() {
        return Ok(LifecycleState::Undefined);
    }
    let Some(current) = current else {
        debug!("cannot find closest state: no tracked entity");
        return Ok(LifecycleState::Undefined);
    };

    let mut closest = LifecycleState::Undefined;
    let mut shortest = usize::MAX;

    for &candidate in candidates {
        let path = resolve_path(current, candidate, false)?;
        let mut cost = path.len();
        if path_involves_destruction(&path) {
            cost += DESTRUCTION_PENALTY;
        }
        if cost < shortest {
            shortest = cost;
            closest = candidate;
        }
    }

    Ok(closest)
}

/// Closest state an entity must be in before an item ending in
/// `post_state` may run.
pub fn closest_pre_execution_state(
    current: Option<LifecycleState>,
    post_state: LifecycleState,
) -> Result<LifecycleState> {
    match post_state {
        LifecycleState::Resume => closest_of(current, &RESUME_PRE_EXECUTION_STATES),
        other => Err(CoreError::unsupported_pre_state(other.id())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use LifecycleState::*;

    #[test]
    fn zero_hop_candidate_wins() {
        assert_eq!(closest_of(Some(Start), &[Start, Pause]).unwrap(), Start);
        assert_eq!(closest_of(Some(Pause), &[Start, Pause]).unwrap(), Pause);
    }

    #[test]
    fn restart_beats_destruction() {
        // Stop -> Start is [Restart, Start]; Stop -> Pause is [Restart, Start, Resume, Pause].
        assert_eq!(closest_of(Some(Stop), &[Start, Pause]).unwrap(), Start);
        // Resume -> Create relaunches (4 hops + penalty); Resume -> Stop is 2 hops.
        assert_eq!(closest_of(Some(Resume), &[Create, Stop]).unwrap(), Stop);
    }

    #[test]
    fn ties_keep_first_candidate() {
        // Start -> Resume and Start -> Stop are both a single hop.
        assert_eq!(closest_of(Some(Start), &[Resume, Stop]).unwrap(), Resume);
        assert_eq!(closest_of(Some(Start), &[Stop, Resume]).unwrap(), Stop);
    }

    #[test]
    fn nothing_to_choose_is_undefined() {
        assert_eq!(closest_of(Some(Start), &[]).unwrap(), Undefined);
        assert_eq!(closest_of(None, &[Start, Pause]).unwrap(), Undefined);
    }

    #[test]
    fn only_resume_has_pre_execution_states() {
        assert_eq!(closest_pre_execution_state(Some(Create), Resume).unwrap(), Start);

        let e = closest_pre_execution_state(Some(Create), Pause).unwrap_err();
        assert_eq!(e.kind, ErrorKind::UnsupportedPreState);
    }
}
