use std::collections::HashSet;

use uuid::Uuid;

/// Host-side relation such as a friends list, queried live every time.
pub trait ExclusionRelation {
    fn is_in_relation(&self, identity: &Uuid) -> bool;
}

impl ExclusionRelation for HashSet<Uuid> {
    fn is_in_relation(&self, identity: &Uuid) -> bool {
        self.contains(identity)
    }
}

impl<F> ExclusionRelation for F
where
    F: Fn(&Uuid) -> bool,
{
    fn is_in_relation(&self, identity: &Uuid) -> bool {
        self(identity)
    }
}

/// Relation that contains nobody.
pub struct NoRelation;

impl ExclusionRelation for NoRelation {
    fn is_in_relation(&self, _identity: &Uuid) -> bool {
        false
    }
}

/// Decides whether a departing member should be left without a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExclusionPolicy {
    pub ignore_related: bool,
}

impl ExclusionPolicy {
    pub fn new(ignore_related: bool) -> Self {
        Self { ignore_related }
    }

    pub fn should_ignore(&self, identity: &Uuid, relation: &dyn ExclusionRelation) -> bool {
        self.ignore_related && relation.is_in_relation(identity)
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}
