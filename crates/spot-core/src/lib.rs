//! Logout-spot tracking core.
//!
//! Diffs successive roster snapshots to find members who left or came
//! back, keeps one marker per absent member describing where they were
//! and how healthy they looked, and produces notification intents for
//! the host to surface.
//!
//! Zero I/O: a pure state machine with no opinions about rendering,
//! chat, audio or where the roster comes from.

pub mod config;
pub mod constants;
pub mod controller;
pub mod exclusion;
pub mod marker;
pub mod member;
pub mod notify;
pub mod render;
pub mod roster;
pub mod store;

pub use config::{Config, NotifyConfig, RenderConfig, Rgba, ShapeMode};
pub use controller::{CycleOutcome, LifecycleController};
pub use exclusion::{ExclusionPolicy, ExclusionRelation, NoRelation};
pub use marker::{CycleStamp, Marker, SeverityTier};
pub use member::{BoundingBox, Dimension, GameMode, ObservedMember, Position, PresenceMembers};
pub use notify::{
    Channel, EventKind, Notification, NotificationGate, NotificationIntent, NotifyMode,
};
pub use render::{Label, MarkerView, ViewContext, visible_markers};
pub use roster::{RosterDelta, RosterEntry, RosterSnapshot};
pub use store::MarkerStore;
