use super::parser::{FilterExpression, Operator, Predicate};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to the fields of a decoded record
pub trait FieldLookup {
    /// Value stored under `key`, if the key is present
    fn field(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldLookup for HashMap<String, String, S> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FieldLookup for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: FieldLookup + ?Sized> FieldLookup for &T {
    fn field(&self, key: &str) -> Option<&str> {
        (**self).field(key)
    }
}

impl Predicate {
    /// Check a single predicate against a record
    pub fn matches<R: FieldLookup + ?Sized>(&self, record: &R) -> bool {
        let Some(value) = record.field(&self.key) else {
            // only `-` is satisfied by a missing key
            return self.operator == Operator::Absent;
        };

        match self.operator {
            Operator::Present => true,
            Operator::Absent => false,
            Operator::Equals => value == self.value,
            Operator::NotEquals => value != self.value,
            Operator::Contains => value.contains(self.value.as_str()),
            Operator::NotContains => !value.contains(self.value.as_str()),
        }
    }
}

impl FilterExpression {
    /// Check whether a record satisfies every predicate.
    ///
    /// An empty expression matches everything.
    pub fn matches<R: FieldLookup + ?Sized>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}
