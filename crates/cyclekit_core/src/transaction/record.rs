use std::collections::HashMap;
use std::fmt;

use crate::lifecycle::LifecycleState;

/// Opaque identifier correlating items and records to one tracked entity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Token(pub u64);

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Current lifecycle position of one tracked entity.
///
/// `state` is always an ordered state: the `Restart` pseudo-hop never lands here.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntityRecord {
    pub token: Token,
    pub state: LifecycleState,
    /// Passed to resume hops; true when the entity is moving forward in its stack.
    pub forward: bool,
}

impl EntityRecord {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            state: LifecycleState::PreCreate,
            forward: false,
        }
    }
}

/// Records of every entity the executor currently tracks.
#[derive(Debug, Default)]
pub struct EntityTable {
    records: HashMap<Token, EntityRecord>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: Token) -> Option<&EntityRecord> {
        self.records.get(&token)
    }

    pub fn get_mut(&mut self, token: Token) -> Option<&mut EntityRecord> {
        self.records.get_mut(&token)
    }

    pub fn contains(&self, token: Token) -> bool {
        self.records.contains_key(&token)
    }

    /// Insert or replace the record for `record.token`.
    pub fn insert(&mut self, record: EntityRecord) -> Option<EntityRecord> {
        self.records.insert(record.token, record)
    }

    pub fn remove(&mut self, token: Token) -> Option<EntityRecord> {
        self.records.remove(&token)
    }

    pub fn state_of(&self, token: Token) -> Option<LifecycleState> {
        self.get(token).map(|r| r.state)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
