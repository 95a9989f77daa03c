use uuid::Uuid;

use crate::marker::Marker;

/// Markers in insertion order, at most one per identity.
#[derive(Clone, Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any marker for the same identity, then append.
    /// Returns the marker that was replaced, if any.
    pub fn upsert(&mut self, marker: Marker) -> Option<Marker> {
        let replaced = self.remove_by_identity(&marker.identity);
        self.markers.push(marker);
        replaced
    }

    pub fn remove_by_identity(&mut self, identity: &Uuid) -> Option<Marker> {
        let idx = self.markers.iter().position(|m| m.identity == *identity)?;
        Some(self.markers.remove(idx))
    }

    pub fn get(&self, identity: &Uuid) -> Option<&Marker> {
        self.markers.iter().find(|m| m.identity == *identity)
    }

    pub fn contains(&self, identity: &Uuid) -> bool {
        self.get(identity).is_some()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn all(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{CycleStamp, SeverityTier};
    use crate::member::{BoundingBox, Dimension, Position};
    use proptest::prelude::*;

    fn marker(identity: Uuid, name: &str, stamp: u64) -> Marker {
        let position = Position::new(0.0, 64.0, 0.0);
        Marker {
            identity,
            display_name: name.to_string(),
            dimension: Dimension::Overworld,
            position,
            bounds: BoundingBox::player_at(position),
            vital_value: 20,
            max_vital: 20,
            severity: SeverityTier::High,
            captured_at: CycleStamp(stamp),
        }
    }

    #[test]
    fn test_upsert_replaces_and_moves_to_back() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut store = MarkerStore::new();
        store.upsert(marker(a, "A", 1));
        store.upsert(marker(b, "B", 1));

        let replaced = store.upsert(marker(a, "A", 2));
        assert_eq!(replaced.map(|m| m.captured_at), Some(CycleStamp(1)));
        assert_eq!(store.len(), 2);

        let order: Vec<Uuid> = store.all().map(|m| m.identity).collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(store.get(&a).map(|m| m.captured_at), Some(CycleStamp(2)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = MarkerStore::new();
        store.upsert(marker(Uuid::new_v4(), "A", 1));
        assert!(store.remove_by_identity(&Uuid::new_v4()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_marker() {
        let a = Uuid::new_v4();
        let mut store = MarkerStore::new();
        store.upsert(marker(a, "A", 3));
        let removed = store.remove_by_identity(&a).unwrap();
        assert_eq!(removed.display_name, "A");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = MarkerStore::new();
        for i in 0..4 {
            store.upsert(marker(Uuid::new_v4(), "x", i));
        }
        store.clear();
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn prop_one_marker_per_identity(picks in proptest::collection::vec(0usize..4, 0..64)) {
            let pool: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
            let mut store = MarkerStore::new();
            for (stamp, idx) in picks.iter().enumerate() {
                store.upsert(marker(pool[*idx], "p", stamp as u64));
            }
            for id in &pool {
                prop_assert!(store.all().filter(|m| m.identity == *id).count() <= 1);
            }
            let distinct: std::collections::HashSet<_> = picks.iter().collect();
            prop_assert_eq!(store.len(), distinct.len());
        }
    }
}
