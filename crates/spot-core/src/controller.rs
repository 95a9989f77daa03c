use uuid::Uuid;

use crate::exclusion::{ExclusionPolicy, ExclusionRelation};
use crate::marker::{CycleStamp, Marker};
use crate::member::PresenceMembers;
use crate::notify::{EventKind, Notification, NotificationGate, NotificationIntent};
use crate::roster::{RosterDelta, RosterSnapshot};
use crate::store::MarkerStore;

/// What one cycle changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleOutcome {
    pub stamp: CycleStamp,
    /// Identities that got a marker this cycle.
    pub marked: Vec<Uuid>,
    /// Identities whose marker was retired this cycle.
    pub returned: Vec<Uuid>,
    /// Departure notifications first, then returns.
    pub notifications: Vec<Notification>,
}

impl CycleOutcome {
    pub fn is_quiet(&self) -> bool {
        self.marked.is_empty() && self.returned.is_empty()
    }
}

/// Owns the previous roster, the last presence members and the marker store,
/// and advances them once per cycle.
///
/// `on_cycle` takes `&mut self`, so it cannot be re-entered and nobody can
/// read the store while a cycle is running.
#[derive(Debug)]
pub struct LifecycleController {
    policy: ExclusionPolicy,
    gate: NotificationGate,
    store: MarkerStore,
    previous_roster: RosterSnapshot,
    previous_members: PresenceMembers,
    stamp: CycleStamp,
}

impl LifecycleController {
    pub fn new(policy: ExclusionPolicy, gate: NotificationGate) -> Self {
        Self {
            policy,
            gate,
            store: MarkerStore::new(),
            previous_roster: RosterSnapshot::new(),
            previous_members: PresenceMembers::new(),
            stamp: CycleStamp::default(),
        }
    }

    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ExclusionPolicy) {
        self.policy = policy;
    }

    pub fn gate(&self) -> NotificationGate {
        self.gate
    }

    pub fn set_gate(&mut self, gate: NotificationGate) {
        self.gate = gate;
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.store
    }

    pub fn marker_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_tracking(&self, identity: &Uuid) -> bool {
        self.store.contains(identity)
    }

    pub fn stamp(&self) -> CycleStamp {
        self.stamp
    }

    /// Seed bookkeeping from the current state without producing events.
    pub fn activate(&mut self, roster: RosterSnapshot, members: PresenceMembers) {
        self.reset();
        tracing::debug!(roster = roster.len(), members = members.len(), "activated");
        self.previous_roster = roster;
        self.previous_members = members;
    }

    /// Drop all markers and bookkeeping. No return events are emitted.
    pub fn deactivate(&mut self) {
        self.reset();
        tracing::debug!("deactivated");
    }

    /// Fresh session: markers from the old world state are meaningless.
    pub fn reset(&mut self) {
        if !self.store.is_empty() {
            tracing::debug!(dropped = self.store.len(), "clearing markers");
        }
        self.store.clear();
        self.previous_roster = RosterSnapshot::new();
        self.previous_members.clear();
    }

    /// Run one evaluation cycle against the stored previous state.
    ///
    /// Departures are resolved against the members recorded last cycle,
    /// the last time those members were still present.
    pub fn on_cycle(
        &mut self,
        roster: RosterSnapshot,
        members: PresenceMembers,
        relation: &dyn ExclusionRelation,
    ) -> CycleOutcome {
        self.stamp = self.stamp.next();
        let delta = RosterSnapshot::diff(&self.previous_roster, &roster);

        let mut outcome = CycleOutcome {
            stamp: self.stamp,
            ..CycleOutcome::default()
        };
        if !delta.is_empty() {
            tracing::trace!(
                stamp = self.stamp.0,
                departed = delta.departed.len(),
                arrived = delta.arrived.len(),
                "roster changed"
            );
        }
        self.apply_delta(&delta, relation, &mut outcome);

        self.previous_roster = roster;
        self.previous_members = members;
        outcome
    }

    fn apply_delta(
        &mut self,
        delta: &RosterDelta,
        relation: &dyn ExclusionRelation,
        outcome: &mut CycleOutcome,
    ) {
        // All departures before any arrival.
        for entry in &delta.departed {
            let Some(member) = self.previous_members.get(&entry.identity) else {
                tracing::trace!(
                    identity = %entry.identity,
                    "departed member not observed, skipping"
                );
                continue;
            };
            if self.policy.should_ignore(&entry.identity, relation) {
                tracing::trace!(identity = %entry.identity, "departed member excluded");
                continue;
            }

            let marker = Marker::capture(member, self.stamp);
            tracing::debug!(
                identity = %marker.identity,
                name = %marker.display_name,
                vital = marker.vital_value,
                "marker created"
            );
            self.notify(EventKind::Departure, &marker, outcome);
            outcome.marked.push(marker.identity);
            self.store.upsert(marker);
        }

        for entry in &delta.arrived {
            let Some(marker) = self.store.remove_by_identity(&entry.identity) else {
                continue;
            };
            tracing::debug!(
                identity = %marker.identity,
                name = %marker.display_name,
                "marker retired"
            );
            self.notify(EventKind::Return, &marker, outcome);
            outcome.returned.push(marker.identity);
        }
    }

    fn notify(&self, kind: EventKind, marker: &Marker, outcome: &mut CycleOutcome) {
        for channel in self.gate.channels(kind) {
            outcome.notifications.push(Notification {
                channel,
                intent: NotificationIntent::from_marker(kind, marker),
            });
        }
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new(ExclusionPolicy::default(), NotificationGate::default())
    }
}
