use spot_core::{Channel, Notification, NotificationIntent};

/// Where the host surfaces notifications. One method per channel.
pub trait NotificationSink {
    /// Chat/log line.
    fn message(&mut self, intent: &NotificationIntent);

    /// Audio cue.
    fn sound(&mut self, intent: &NotificationIntent);

    fn dispatch(&mut self, notification: &Notification) {
        match notification.channel {
            Channel::Message => self.message(&notification.intent),
            Channel::Sound => self.sound(&notification.intent),
        }
    }
}

/// Collects everything it is handed, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<NotificationIntent>,
    pub sounds: Vec<NotificationIntent>,
    pub log: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn message(&mut self, intent: &NotificationIntent) {
        self.messages.push(intent.clone());
        self.log.push(Notification {
            channel: Channel::Message,
            intent: intent.clone(),
        });
    }

    fn sound(&mut self, intent: &NotificationIntent) {
        self.sounds.push(intent.clone());
        self.log.push(Notification {
            channel: Channel::Sound,
            intent: intent.clone(),
        });
    }
}

/// Drops everything.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn message(&mut self, _intent: &NotificationIntent) {}

    fn sound(&mut self, _intent: &NotificationIntent) {}
}
