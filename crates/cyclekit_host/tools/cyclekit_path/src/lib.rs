pub mod config;

use cyclekit_core::error::Result;
use cyclekit_core::lifecycle::{closest_of, path_table, resolve_path, LifecycleState};

use crate::config::Mode;

/// Render the output lines for `mode`.
pub fn render(mode: &Mode) -> Result<Vec<String>> {
    let lines = match mode {
        Mode::Path {
            from,
            to,
            exclude_last,
        } => {
            let hops = resolve_path(*from, *to, *exclude_last)?;
            vec![format!("{from} -> {to}: {}", join(&hops))]
        }
        Mode::Closest { from, candidates } => {
            let closest = closest_of(Some(*from), candidates)?;
            vec![format!("closest to {from} of [{}]: {closest}", join(candidates))]
        }
        Mode::Table => path_table()?
            .paths
            .iter()
            .map(|entry| format!("{} -> {}: {}", entry.start, entry.finish, join(&entry.hops)))
            .collect(),
        Mode::Help => Vec::new(),
    };
    Ok(lines)
}

fn join(states: &[LifecycleState]) -> String {
    if states.is_empty() {
        return "(none)".to_string();
    }
    states
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}
