use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::marker::Marker;
use crate::member::{Dimension, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Departure,
    Return,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Message,
    Sound,
}

/// Which events a channel fires for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyMode {
    #[default]
    None,
    /// Returns only.
    JoinOnly,
    /// Departures only.
    LeaveOnly,
    Both,
}

impl NotifyMode {
    pub fn from_toggles(on_leave: bool, on_join: bool) -> Self {
        match (on_leave, on_join) {
            (true, true) => NotifyMode::Both,
            (true, false) => NotifyMode::LeaveOnly,
            (false, true) => NotifyMode::JoinOnly,
            (false, false) => NotifyMode::None,
        }
    }

    pub fn allows(self, event: EventKind) -> bool {
        matches!(
            (self, event),
            (NotifyMode::Both, _)
                | (NotifyMode::LeaveOnly, EventKind::Departure)
                | (NotifyMode::JoinOnly, EventKind::Return)
        )
    }
}

/// Per-channel event filter. Stateless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGate {
    #[serde(default)]
    pub message: NotifyMode,
    #[serde(default)]
    pub sound: NotifyMode,
}

impl NotificationGate {
    pub fn new(message: NotifyMode, sound: NotifyMode) -> Self {
        Self { message, sound }
    }

    pub fn from_toggles(
        leave_msg: bool,
        join_msg: bool,
        leave_sound: bool,
        join_sound: bool,
    ) -> Self {
        Self {
            message: NotifyMode::from_toggles(leave_msg, join_msg),
            sound: NotifyMode::from_toggles(leave_sound, join_sound),
        }
    }

    pub fn is_enabled(&self, event: EventKind, channel: Channel) -> bool {
        match channel {
            Channel::Message => self.message.allows(event),
            Channel::Sound => self.sound.allows(event),
        }
    }

    /// Enabled channels for `event`, message first.
    pub fn channels(&self, event: EventKind) -> impl Iterator<Item = Channel> + '_ {
        [Channel::Message, Channel::Sound]
            .into_iter()
            .filter(move |c| self.is_enabled(event, *c))
    }
}

/// A departure or return, described for whatever sink surfaces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub kind: EventKind,
    pub identity: Uuid,
    pub display_name: String,
    pub position: Position,
    pub dimension: Dimension,
}

impl NotificationIntent {
    pub fn from_marker(kind: EventKind, marker: &Marker) -> Self {
        Self {
            kind,
            identity: marker.identity,
            display_name: marker.display_name.clone(),
            position: marker.position,
            dimension: marker.dimension,
        }
    }

    /// Chat line for the message channel.
    pub fn message(&self) -> String {
        let verb = match self.kind {
            EventKind::Departure => "logged out",
            EventKind::Return => "logged back in",
        };
        let (x, y, z) = self.position.block();
        format!(
            "{} {verb} at {x}, {y}, {z} in the {}",
            self.display_name, self.dimension
        )
    }
}

/// An intent routed to one channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: Channel,
    pub intent: NotificationIntent,
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [EventKind; 2] = [EventKind::Departure, EventKind::Return];
    const CHANNELS: [Channel; 2] = [Channel::Message, Channel::Sound];

    #[test]
    fn test_toggles_have_no_cross_talk() {
        for mask in 0u8..16 {
            let toggles = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0];
            let gate =
                NotificationGate::from_toggles(toggles[0], toggles[1], toggles[2], toggles[3]);

            let expected = [
                (EventKind::Departure, Channel::Message, toggles[0]),
                (EventKind::Return, Channel::Message, toggles[1]),
                (EventKind::Departure, Channel::Sound, toggles[2]),
                (EventKind::Return, Channel::Sound, toggles[3]),
            ];
            for (kind, channel, on) in expected {
                assert_eq!(
                    gate.is_enabled(kind, channel),
                    on,
                    "mask {mask:04b}: {kind:?}/{channel:?}"
                );
            }
        }
    }

    #[test]
    fn test_modes() {
        assert!(NotifyMode::Both.allows(EventKind::Departure));
        assert!(NotifyMode::Both.allows(EventKind::Return));
        assert!(NotifyMode::LeaveOnly.allows(EventKind::Departure));
        assert!(!NotifyMode::LeaveOnly.allows(EventKind::Return));
        assert!(NotifyMode::JoinOnly.allows(EventKind::Return));
        assert!(!NotifyMode::JoinOnly.allows(EventKind::Departure));
        for kind in KINDS {
            assert!(!NotifyMode::None.allows(kind));
        }
    }

    #[test]
    fn test_default_gate_is_silent() {
        let gate = NotificationGate::default();
        for kind in KINDS {
            for channel in CHANNELS {
                assert!(!gate.is_enabled(kind, channel));
            }
        }
    }

    #[test]
    fn test_channels_order() {
        let gate = NotificationGate::new(NotifyMode::Both, NotifyMode::LeaveOnly);
        let dep: Vec<_> = gate.channels(EventKind::Departure).collect();
        assert_eq!(dep, vec![Channel::Message, Channel::Sound]);
        let ret: Vec<_> = gate.channels(EventKind::Return).collect();
        assert_eq!(ret, vec![Channel::Message]);
    }

    #[test]
    fn test_message_wording() {
        let mut intent = NotificationIntent {
            kind: EventKind::Departure,
            identity: Uuid::new_v4(),
            display_name: "Notch".to_string(),
            position: Position::new(-12.5, 63.9, 200.0),
            dimension: Dimension::Nether,
        };
        assert_eq!(intent.message(), "Notch logged out at -13, 63, 200 in the Nether");
        intent.kind = EventKind::Return;
        assert_eq!(
            intent.message(),
            "Notch logged back in at -13, 63, 200 in the Nether"
        );
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&NotifyMode::LeaveOnly).unwrap();
        assert_eq!(json, "\"leave_only\"");
        let mode: NotifyMode = serde_json::from_str("\"join_only\"").unwrap();
        assert_eq!(mode, NotifyMode::JoinOnly);
    }
}
