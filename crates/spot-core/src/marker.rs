use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{LOW_TIER_CEILING, MEDIUM_TIER_CEILING};
use crate::member::{BoundingBox, Dimension, ObservedMember, Position};

/// Coarse vitals classification, used to tint a marker's label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    /// Boundary values fall to the lower tier.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= LOW_TIER_CEILING {
            SeverityTier::Low
        } else if ratio <= MEDIUM_TIER_CEILING {
            SeverityTier::Medium
        } else {
            SeverityTier::High
        }
    }

    /// `max_vital` below one is treated as one.
    pub fn from_vitals(vital: u32, max_vital: u32) -> Self {
        Self::from_ratio(vital as f64 / max_vital.max(1) as f64)
    }
}

/// Index of the evaluation cycle that created a marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleStamp(pub u64);

impl CycleStamp {
    pub fn next(self) -> Self {
        CycleStamp(self.0 + 1)
    }
}

/// Last known state of a member believed absent.
///
/// Every field is copied from the member at capture time and never
/// recomputed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub identity: Uuid,
    pub display_name: String,
    pub dimension: Dimension,
    pub position: Position,
    pub bounds: BoundingBox,
    pub vital_value: u32,
    pub max_vital: u32,
    pub severity: SeverityTier,
    pub captured_at: CycleStamp,
}

impl Marker {
    /// Build a marker from the member's last observed state.
    pub fn capture(member: &ObservedMember, captured_at: CycleStamp) -> Self {
        let vital_value = member.vital_value();
        let max_vital = member.max_vital_value();
        Self {
            identity: member.identity,
            display_name: member.display_name.clone(),
            dimension: member.dimension,
            position: member.position,
            bounds: member.bounds(),
            vital_value,
            max_vital,
            severity: SeverityTier::from_vitals(vital_value, max_vital),
            captured_at,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.vital_value as f64 / self.max_vital.max(1) as f64
    }
}
