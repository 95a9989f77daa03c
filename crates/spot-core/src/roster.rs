use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One occupied slot of the shared roster for a single cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub identity: Uuid,
    pub display_name: String,
}

impl RosterEntry {
    pub fn new(identity: Uuid, display_name: &str) -> Self {
        Self {
            identity,
            display_name: display_name.to_string(),
        }
    }

    /// Slots the host has not resolved a name for yet.
    pub fn is_blank(&self) -> bool {
        self.display_name.trim().is_empty()
    }
}

/// Roster entries held between cycles, in feed order.
///
/// Blank-named entries are dropped on construction and each identity
/// appears at most once (first occurrence wins).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    entries: Vec<RosterEntry>,
    identities: HashSet<Uuid>,
}

/// Result of diffing two snapshots. The two lists never share an identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterDelta {
    /// In `previous` but not `current`, in `previous` order.
    pub departed: Vec<RosterEntry>,
    /// In `current` but not `previous`, in `current` order.
    pub arrived: Vec<RosterEntry>,
}

impl RosterDelta {
    pub fn is_empty(&self) -> bool {
        self.departed.is_empty() && self.arrived.is_empty()
    }
}

impl RosterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        let mut snapshot = Self::new();
        for entry in entries {
            if entry.is_blank() || snapshot.identities.contains(&entry.identity) {
                continue;
            }
            snapshot.identities.insert(entry.identity);
            snapshot.entries.push(entry);
        }
        snapshot
    }

    pub fn contains(&self, identity: &Uuid) -> bool {
        self.identities.contains(identity)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identity-based difference between `previous` and `current`.
    /// Display names are ignored, so a rename is not a departure.
    pub fn diff(previous: &RosterSnapshot, current: &RosterSnapshot) -> RosterDelta {
        let departed = previous
            .entries
            .iter()
            .filter(|e| !current.contains(&e.identity))
            .cloned()
            .collect();
        let arrived = current
            .entries
            .iter()
            .filter(|e| !previous.contains(&e.identity))
            .cloned()
            .collect();
        RosterDelta { departed, arrived }
    }
}

impl FromIterator<RosterEntry> for RosterSnapshot {
    fn from_iter<T: IntoIterator<Item = RosterEntry>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}
