//! Policy conditions.
//!
//! A POST policy constrains an upload form through a set of named
//! [`Condition`]s. Each key maps to exactly one condition: setting a key a
//! second time replaces the earlier condition.
//!
//! See [Creating a POST policy] for the condition forms S3 understands.
//!
//! [Creating a POST policy]: https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-HTTPPOSTConstructPolicy.html

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::PolicyError;

/// How a form field is compared against a [`Condition::Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The form field must equal the value exactly.
    Exact,
    /// The form field must start with the value.
    StartsWith,
}

impl MatchKind {
    /// Get the token used for this match kind in a policy document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "eq",
            Self::StartsWith => "starts-with",
        }
    }
}

impl Display for MatchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = PolicyError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "eq" => Ok(Self::Exact),
            "starts-with" => Ok(Self::StartsWith),
            other => Err(PolicyError::InvalidMatchKind(other.to_string())),
        }
    }
}

/// A single constraint on an upload form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The field must carry exactly this value.
    ///
    /// Rendered as `{"key": "value"}`.
    Exact(String),
    /// The field is compared with the value using the given [`MatchKind`].
    ///
    /// Rendered as `["starts-with", "$key", "value"]`.
    Rule(MatchKind, String),
    /// The field is a number within `min..=max`.
    ///
    /// Rendered as `["key", min, max]`.
    Range(i64, i64),
}

/// The conditions of a POST policy, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions(IndexMap<String, Condition>);

impl Conditions {
    /// Create an empty condition set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to be exactly `value`.
    pub fn set_exact(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), Condition::Exact(value.into()));
    }

    /// Require `key` to match `value` according to `kind`.
    pub fn set_match_rule(
        &mut self,
        kind: MatchKind,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.insert(key.into(), Condition::Rule(kind, value.into()));
    }

    /// Require `key` to be a number between `min` and `max` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvertedRange`] if `min` is greater than `max`,
    /// in which case the set is left unchanged.
    pub fn set_range(
        &mut self,
        key: impl Into<String>,
        min: i64,
        max: i64,
    ) -> Result<(), PolicyError> {
        if min > max {
            return Err(PolicyError::InvertedRange { min, max });
        }
        self.insert(key.into(), Condition::Range(min, max));
        Ok(())
    }

    /// Look up the condition set for `key`.
    pub fn get(&self, key: &str) -> Result<&Condition, PolicyError> {
        if key.is_empty() {
            return Err(PolicyError::EmptyKey);
        }
        self.0
            .get(key)
            .ok_or_else(|| PolicyError::UnknownKey(key.to_string()))
    }

    /// Check whether a condition is set for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of conditions in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no conditions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, condition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.0.iter().map(|(key, condition)| (key.as_str(), condition))
    }

    fn insert(&mut self, key: String, condition: Condition) {
        // IndexMap keeps the original slot of an overwritten key
        self.0.insert(key, condition);
    }
}
