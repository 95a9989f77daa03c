//! Projection of the marker store into what the overlay draws.
//!
//! One box and one floating label per visible marker. Visibility is
//! decided per marker; a filtered marker never hides the ones after it.

use serde::Serialize;
use uuid::Uuid;

use crate::config::Rgba;
use crate::constants::{BLOCKS_PER_CHUNK, LABEL_LIFT};
use crate::marker::SeverityTier;
use crate::member::{BoundingBox, Dimension, Position};
use crate::store::MarkerStore;

pub const RED: Rgba = Rgba::opaque(225, 25, 25);
pub const ORANGE: Rgba = Rgba::opaque(225, 105, 25);
pub const GREEN: Rgba = Rgba::opaque(25, 225, 25);

impl SeverityTier {
    pub fn color(self) -> Rgba {
        match self {
            SeverityTier::Low => RED,
            SeverityTier::Medium => ORANGE,
            SeverityTier::High => GREEN,
        }
    }
}

/// Where the operator is looking from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewContext {
    pub camera: Position,
    pub dimension: Dimension,
    pub view_distance_chunks: u32,
}

impl ViewContext {
    pub fn range(&self) -> f64 {
        self.view_distance_chunks as f64 * BLOCKS_PER_CHUNK
    }

    pub fn can_see(&self, dimension: Dimension, position: &Position) -> bool {
        dimension == self.dimension && self.camera.distance(position) <= self.range()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Label {
    pub name: String,
    pub vitals_text: String,
    pub vitals_color: Rgba,
    pub anchor: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerView {
    pub identity: Uuid,
    pub bounds: BoundingBox,
    pub label: Label,
}

/// Markers in the camera's dimension and within view distance, in store order.
pub fn visible_markers(store: &MarkerStore, view: &ViewContext) -> Vec<MarkerView> {
    store
        .all()
        .filter(|m| view.can_see(m.dimension, &m.position))
        .map(|m| {
            let center = m.bounds.center();
            MarkerView {
                identity: m.identity,
                bounds: m.bounds,
                label: Label {
                    name: m.display_name.clone(),
                    vitals_text: m.vital_value.to_string(),
                    vitals_color: m.severity.color(),
                    anchor: Position::new(center.x, m.bounds.max.y + LABEL_LIFT, center.z),
                },
            }
        })
        .collect()
}
