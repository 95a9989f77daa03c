use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// World-space position of a member's feet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Integer block coordinates (floor of each axis).
    pub fn block(&self) -> (i64, i64, i64) {
        (
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Axis-aligned box copied from the member's hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Position,
    pub max: Position,
}

impl BoundingBox {
    /// Box of `width` x `height` standing on `feet`.
    pub fn standing_at(feet: Position, width: f64, height: f64) -> Self {
        let half = width / 2.0;
        Self {
            min: Position::new(feet.x - half, feet.y, feet.z - half),
            max: Position::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// Default player hitbox standing on `feet`.
    pub fn player_at(feet: Position) -> Self {
        Self::standing_at(feet, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
    End,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Overworld => "Overworld",
            Dimension::Nether => "Nether",
            Dimension::End => "End",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// Value snapshot of a present member, as read from the host's world state.
///
/// The host builds one of these per cycle; nothing here points back into
/// the host, so a member the host has already discarded is never touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservedMember {
    pub identity: Uuid,
    pub display_name: String,
    pub position: Position,
    /// Hitbox; defaults to a standard player box at `position`.
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    pub health: f32,
    #[serde(default)]
    pub absorption: f32,
    pub max_health: f32,
    #[serde(default)]
    pub dimension: Dimension,
    /// `None` when the host could not resolve the member's game mode.
    #[serde(default)]
    pub game_mode: Option<GameMode>,
}

impl ObservedMember {
    pub fn bounds(&self) -> BoundingBox {
        self.bounds.unwrap_or_else(|| BoundingBox::player_at(self.position))
    }

    /// Health plus absorption, rounded and clamped at zero.
    pub fn vital_value(&self) -> u32 {
        round_clamped(self.health + self.absorption, 0)
    }

    /// Max health plus absorption, rounded and clamped to at least one.
    pub fn max_vital_value(&self) -> u32 {
        round_clamped(self.max_health + self.absorption, 1)
    }
}

fn round_clamped(value: f32, floor: u32) -> u32 {
    if !value.is_finite() {
        return floor;
    }
    let rounded = value.round();
    if rounded <= floor as f32 {
        floor
    } else if rounded >= u32::MAX as f32 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Members the controller may build markers from, keyed by identity.
///
/// Never contains the operator, nor members without a known game mode.
#[derive(Clone, Debug, Default)]
pub struct PresenceMembers {
    members: HashMap<Uuid, ObservedMember>,
}

impl PresenceMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect host members, dropping `operator` and unclassified members.
    pub fn collect<I>(observed: I, operator: Option<Uuid>) -> Self
    where
        I: IntoIterator<Item = ObservedMember>,
    {
        let members = observed
            .into_iter()
            .filter(|m| m.game_mode.is_some())
            .filter(|m| Some(m.identity) != operator)
            .map(|m| (m.identity, m))
            .collect();
        Self { members }
    }

    pub fn get(&self, identity: &Uuid) -> Option<&ObservedMember> {
        self.members.get(identity)
    }

    pub fn contains(&self, identity: &Uuid) -> bool {
        self.members.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(health: f32, absorption: f32, max_health: f32) -> ObservedMember {
        ObservedMember {
            identity: Uuid::new_v4(),
            display_name: "Steve".to_string(),
            position: Position::new(10.4, 64.0, -3.2),
            bounds: None,
            health,
            absorption,
            max_health,
            dimension: Dimension::Overworld,
            game_mode: Some(GameMode::Survival),
        }
    }

    #[test]
    fn test_block_coords_floor_negatives() {
        let p = Position::new(10.9, 64.0, -3.2);
        assert_eq!(p.block(), (10, 64, -4));
    }

    #[test]
    fn test_vitals_include_absorption() {
        let m = member(15.4, 4.0, 20.0);
        assert_eq!(m.vital_value(), 19);
        assert_eq!(m.max_vital_value(), 24);
    }

    #[test]
    fn test_vitals_clamped() {
        let m = member(-3.0, 0.0, 0.0);
        assert_eq!(m.vital_value(), 0);
        assert_eq!(m.max_vital_value(), 1);

        let nan = member(f32::NAN, 0.0, f32::NAN);
        assert_eq!(nan.vital_value(), 0);
        assert_eq!(nan.max_vital_value(), 1);
    }

    #[test]
    fn test_default_bounds_stand_on_feet() {
        let m = member(20.0, 0.0, 20.0);
        let b = m.bounds();
        assert!((b.min.y - 64.0).abs() < 1e-10);
        assert!((b.max.y - 65.8).abs() < 1e-10);
        let c = b.center();
        assert!((c.x - 10.4).abs() < 1e-10);
        assert!((c.z + 3.2).abs() < 1e-10);
    }

    #[test]
    fn test_presence_excludes_operator_and_unclassified() {
        let me = member(20.0, 0.0, 20.0);
        let mut ghost = member(20.0, 0.0, 20.0);
        ghost.game_mode = None;
        let other = member(20.0, 0.0, 20.0);

        let presence = PresenceMembers::collect(
            vec![me.clone(), ghost.clone(), other.clone()],
            Some(me.identity),
        );
        assert_eq!(presence.len(), 1);
        assert!(presence.contains(&other.identity));
        assert!(!presence.contains(&me.identity));
        assert!(!presence.contains(&ghost.identity));
    }

    #[test]
    fn test_dimension_display_and_serde() {
        assert_eq!(Dimension::Nether.to_string(), "Nether");
        let json = serde_json::to_string(&Dimension::End).unwrap();
        assert_eq!(json, "\"end\"");
    }
}
