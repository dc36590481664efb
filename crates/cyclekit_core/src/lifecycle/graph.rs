use crate::error::Result;

use super::{resolve_path, LifecycleState, ORDERED_STATES};

/// Every valid path endpoint pair with its resolved hops.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PathTable {
    pub states: Vec<LifecycleState>,
    pub paths: Vec<PathEntry>,
}

/// One resolved `start -> finish` request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PathEntry {
    pub start: LifecycleState,
    pub finish: LifecycleState,
    pub hops: Vec<LifecycleState>,
}

impl PathTable {
    /// Hops for `start -> finish`, if that pair is a valid request.
    pub fn hops(&self, start: LifecycleState, finish: LifecycleState) -> Option<&[LifecycleState]> {
        self.paths
            .iter()
            .find(|entry| entry.start == start && entry.finish == finish)
            .map(|entry| entry.hops.as_slice())
    }
}

/// Build the table of all valid `(start, finish)` pairs over the ordered states.
///
/// `PreCreate` only appears as a finish when it is also the start.
pub fn path_table() -> Result<PathTable> {
    let mut paths = Vec::new();

    for start in ORDERED_STATES {
        for finish in ORDERED_STATES {
            if finish == LifecycleState::PreCreate && start != finish {
                continue;
            }
            let hops = resolve_path(start, finish, false)?;
            paths.push(PathEntry {
                start,
                finish,
                hops,
            });
        }
    }

    Ok(PathTable {
        states: ORDERED_STATES.to_vec(),
        paths,
    })
}
