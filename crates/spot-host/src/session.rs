use spot_core::{Config, CycleOutcome, LifecycleController, MarkerStore};

use crate::allow_list::AllowList;
use crate::config::HostConfig;
use crate::error::Result;
use crate::feed::Frame;
use crate::sink::NotificationSink;

/// Where the tracker is in its on/off lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// No activate frame yet. Cycles still run; the first one seeds.
    #[default]
    Pending,
    Active,
    /// Switched off; cycles are ignored until the next activate.
    Deactivated,
}

/// A running tracker: the controller plus the host state it consults.
pub struct Session {
    controller: LifecycleController,
    friends: AllowList,
    config: Config,
    activation: Activation,
}

impl Session {
    pub fn new(config: Config, friends: AllowList) -> Self {
        let controller =
            LifecycleController::new(config.exclusion_policy(), config.notification_gate());
        Self {
            controller,
            friends,
            config,
            activation: Activation::Pending,
        }
    }

    pub fn from_host_config(host: &HostConfig) -> Result<Self> {
        Ok(Self::new(host.tracker.clone(), host.allow_list()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn friends(&self) -> &AllowList {
        &self.friends
    }

    pub fn markers(&self) -> &MarkerStore {
        self.controller.markers()
    }

    pub fn marker_count(&self) -> usize {
        self.controller.marker_count()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_active(&self) -> bool {
        self.activation == Activation::Active
    }

    /// Apply one feed frame and hand any notifications to `sink`.
    ///
    /// Cycles arriving before `activate` are still evaluated; the first
    /// one only seeds the previous roster. Cycles after `deactivate` are
    /// dropped.
    pub fn apply(
        &mut self,
        frame: Frame,
        sink: &mut impl NotificationSink,
    ) -> Option<CycleOutcome> {
        match frame {
            Frame::Activate(state) => {
                self.controller
                    .activate(state.roster_snapshot(), state.presence_members());
                self.activation = Activation::Active;
                None
            }
            Frame::Cycle(_) if self.activation == Activation::Deactivated => {
                tracing::trace!("tracker deactivated, ignoring cycle");
                None
            }
            Frame::Cycle(state) => {
                let outcome = self.controller.on_cycle(
                    state.roster_snapshot(),
                    state.presence_members(),
                    &self.friends,
                );
                for notification in &outcome.notifications {
                    sink.dispatch(notification);
                }
                Some(outcome)
            }
            Frame::Deactivate => {
                self.controller.deactivate();
                self.activation = Activation::Deactivated;
                None
            }
            Frame::Reset => {
                tracing::info!(dropped = self.controller.marker_count(), "session reset");
                self.controller.reset();
                None
            }
            Frame::FriendAdd { id } => {
                if !self.friends.add(id) {
                    tracing::debug!(%id, "friend already listed");
                }
                None
            }
            Frame::FriendRemove { id } => {
                if !self.friends.remove(&id) {
                    tracing::debug!(%id, "friend was not listed");
                }
                None
            }
        }
    }

    /// Apply every frame in order.
    pub fn replay<I>(&mut self, frames: I, sink: &mut impl NotificationSink) -> Vec<CycleOutcome>
    where
        I: IntoIterator<Item = Frame>,
    {
        frames
            .into_iter()
            .filter_map(|frame| self.apply(frame, sink))
            .collect()
    }
}
