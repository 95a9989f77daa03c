use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VIEW_DISTANCE_CHUNKS;
use crate::exclusion::ExclusionPolicy;
use crate::notify::{NotificationGate, NotifyMode};

/// Straight RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Sides,
    Lines,
    #[default]
    Both,
}

/// Overlay settings. Passed through to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub scale: f64,
    pub shape_mode: ShapeMode,
    pub side_color: Rgba,
    pub line_color: Rgba,
    pub background_color: Rgba,
    pub name_color: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shape_mode: ShapeMode::Both,
            side_color: Rgba::new(255, 0, 255, 55),
            line_color: Rgba::opaque(255, 0, 255),
            background_color: Rgba::new(0, 0, 0, 75),
            name_color: Rgba::opaque(255, 255, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub message: NotifyMode,
    pub sound: NotifyMode,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            message: NotifyMode::Both,
            sound: NotifyMode::None,
        }
    }
}

/// Tracker settings. Every field has a default so partial files load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignore_friends: bool,
    pub view_distance_chunks: u32,
    pub notify: NotifyConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_friends: true,
            view_distance_chunks: DEFAULT_VIEW_DISTANCE_CHUNKS,
            notify: NotifyConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new(self.ignore_friends)
    }

    pub fn notification_gate(&self) -> NotificationGate {
        NotificationGate::new(self.notify.message, self.notify.sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Channel, EventKind};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.ignore_friends);
        assert_eq!(config.view_distance_chunks, 12);
        assert!((config.render.scale - 1.0).abs() < 1e-10);

        let gate = config.notification_gate();
        assert!(gate.is_enabled(EventKind::Departure, Channel::Message));
        assert!(gate.is_enabled(EventKind::Return, Channel::Message));
        assert!(!gate.is_enabled(EventKind::Departure, Channel::Sound));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"ignore_friends": false, "notify": {"sound": "both"}}"#)
                .unwrap();
        assert!(!config.ignore_friends);
        assert_eq!(config.notify.message, NotifyMode::Both);
        assert_eq!(config.notify.sound, NotifyMode::Both);
        assert_eq!(config.render, RenderConfig::default());
    }
}
