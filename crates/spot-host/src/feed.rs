//! Recorded host feed: one JSON frame per line.
//!
//! ```text
//! {"kind":"activate","roster":[...],"members":[...],"self_id":"..."}
//! {"kind":"cycle","roster":[{"id":"...","name":"Alex"}],"members":[...]}
//! {"kind":"friend_add","id":"..."}
//! {"kind":"reset"}
//! ```
//!
//! Blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spot_core::{ObservedMember, PresenceMembers, RosterEntry, RosterSnapshot};
use uuid::Uuid;

use crate::error::{HostError, Result};

/// Roster slot as the feed spells it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
}

/// World state for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedState {
    #[serde(default)]
    pub roster: Vec<FeedEntry>,
    #[serde(default)]
    pub members: Vec<ObservedMember>,
    /// The operator's own identity, never tracked.
    #[serde(default)]
    pub self_id: Option<Uuid>,
}

impl FeedState {
    pub fn roster_snapshot(&self) -> RosterSnapshot {
        self.roster
            .iter()
            .map(|e| RosterEntry::new(e.id, &e.name))
            .collect()
    }

    pub fn presence_members(&self) -> PresenceMembers {
        PresenceMembers::collect(self.members.iter().cloned(), self.self_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame {
    Activate(FeedState),
    Cycle(FeedState),
    Deactivate,
    /// Fresh connection to a new session.
    Reset,
    FriendAdd { id: Uuid },
    FriendRemove { id: Uuid },
}

pub fn parse_frame(line: &str, line_no: usize) -> Result<Option<Frame>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| HostError::Json {
            line: line_no,
            source,
        })
}

/// Parse a whole feed. Line numbers in errors are 1-based.
pub fn parse_feed(content: &str) -> Result<Vec<Frame>> {
    let mut frames = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(frame) = parse_frame(line, idx + 1)? {
            frames.push(frame);
        }
    }
    Ok(frames)
}

pub fn read_feed(path: &Path) -> Result<Vec<Frame>> {
    let content = fs::read_to_string(path)?;
    let frames = parse_feed(&content)?;
    tracing::info!(frames = frames.len(), "read feed {}", path.display());
    Ok(frames)
}
