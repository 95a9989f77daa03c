use std::collections::HashSet;

use spot_core::ExclusionRelation;
use uuid::Uuid;

/// Friends list. Mutable at runtime; the controller asks it on every departure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    friends: HashSet<Uuid>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `id` was already listed.
    pub fn add(&mut self, id: Uuid) -> bool {
        self.friends.insert(id)
    }

    /// Returns false if `id` was not listed.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        self.friends.remove(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.friends.contains(id)
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    /// Sorted, so output is stable.
    pub fn to_sorted_vec(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.friends.iter().copied().collect();
        ids.sort();
        ids
    }
}

impl ExclusionRelation for AllowList {
    fn is_in_relation(&self, identity: &Uuid) -> bool {
        self.contains(identity)
    }
}

impl FromIterator<Uuid> for AllowList {
    fn from_iter<T: IntoIterator<Item = Uuid>>(iter: T) -> Self {
        Self {
            friends: iter.into_iter().collect(),
        }
    }
}
