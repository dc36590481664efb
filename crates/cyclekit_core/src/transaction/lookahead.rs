use crate::lifecycle::LifecycleState;

use super::TransactionItem;

/// Should the item at `index` stop one hop short of its post-execution state?
///
/// True when a later lifecycle request for the same token asks for exactly
/// that state (it will perform the last hop itself) and `index` is the
/// earliest item of the run that requests it. The run is scanned backward
/// from the request and ends at the first differing post-state request or
/// at an earlier lifecycle request for the same token.
pub fn should_exclude_last_hop(items: &[TransactionItem], index: usize) -> bool {
    let Some(item) = items.get(index) else {
        return false;
    };
    let Some(token) = item.target_token() else {
        return false;
    };
    let post_state = item.post_execution_state();
    if post_state == LifecycleState::Undefined {
        return false;
    }

    let Some(request_index) = items
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, next)| next.is_lifecycle_item() && next.target_token() == Some(token))
        .map(|(i, _)| i)
    else {
        return false;
    };
    if items[request_index].target_state() != Some(post_state) {
        return false;
    }

    let mut earliest = None;
    for (i, prev) in items[..request_index].iter().enumerate().rev() {
        if prev.target_token() != Some(token) {
            continue;
        }
        if prev.is_lifecycle_item() {
            break;
        }
        match prev.post_execution_state() {
            LifecycleState::Undefined => continue,
            state if state == post_state => earliest = Some(i),
            _ => break,
        }
    }

    earliest == Some(index)
}
