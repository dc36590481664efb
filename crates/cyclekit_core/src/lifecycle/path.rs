use crate::error::{CoreError, Result};

use super::LifecycleState;

/// Resolve the ordered hops that take an entity from `start` to `finish`.
///
/// The result never contains `start` itself. Rules, in priority order:
/// - forward (`finish >= start`): every state after `start` up to `finish`,
///   except `Start -> Stop`, which is the single hop `[Stop]`
/// - `Pause -> Resume`: the single hop `[Resume]`
/// - backward within `Start..=Stop`: up to `Stop`, `Restart`, then `Start..=finish`
/// - anything else goes through `Destroy` and back up from `Create`
///
/// With `exclude_last`, the final hop is dropped (the caller performs it).
pub fn resolve_path(
    start: LifecycleState,
    finish: LifecycleState,
    exclude_last: bool,
) -> Result<Vec<LifecycleState>> {
    use LifecycleState::*;

    if start == Undefined || finish == Undefined {
        return Err(CoreError::invalid_path_request(
            start.id(),
            finish.id(),
            "can't resolve lifecycle path for undefined state",
        ));
    }
    if start == Restart || finish == Restart {
        return Err(CoreError::invalid_path_request(
            start.id(),
            finish.id(),
            "can't start or finish in intermittent restart state",
        ));
    }
    if finish == PreCreate && start != finish {
        return Err(CoreError::invalid_path_request(
            start.id(),
            finish.id(),
            "can only start in pre-create state",
        ));
    }

    let mut path = Vec::new();

    if finish.id() >= start.id() {
        if start == Start && finish == Stop {
            // Stop soon: no need to pass through Resume/Pause.
            path.push(Stop);
        } else {
            push_ascending(&mut path, start.id() + 1, finish.id());
        }
    } else if start == Pause && finish == Resume {
        path.push(Resume);
    } else if start.id() <= Stop.id() && finish.id() >= Start.id() {
        push_ascending(&mut path, start.id() + 1, Stop.id());
        path.push(Restart);
        push_ascending(&mut path, Start.id(), finish.id());
    } else {
        // Relaunch: tear down and build back up.
        push_ascending(&mut path, start.id() + 1, Destroy.id());
        push_ascending(&mut path, Create.id(), finish.id());
    }

    if exclude_last {
        path.pop();
    }

    Ok(path)
}

/// True when the hops tear the entity down.
pub fn path_involves_destruction(path: &[LifecycleState]) -> bool {
    path.contains(&LifecycleState::Destroy)
}

fn push_ascending(path: &mut Vec<LifecycleState>, from: i8, to: i8) {
    for id in from..=to {
        if let Some(state) = LifecycleState::from_ordered_id(id) {
            path.push(state);
        }
    }
}
