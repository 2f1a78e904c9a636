//! Core domain types for attendee rosters.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Ordered passthrough columns that carry no draw semantics.
///
/// Keys are unique and keep the column order of the source header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraFields(Vec<(String, String)>);

impl ExtraFields {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a column value. Returns `false` if the key was already present,
    /// in which case the existing value is kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.0.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.0.push((key, value.into()));
        true
    }

    /// Looks up a column value by header name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates columns in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of passthrough columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no passthrough columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One attendee row.
///
/// `username` is the identity key used by eligibility and draw removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Participation category (e.g. general or organizer slot).
    participation_frame: String,
    /// Stable identity of the attendee.
    username: String,
    /// Human label; may be empty.
    display_name: String,
    /// Registration status.
    participation_status: String,
    /// Attendance marker; only the attended literal is draw-eligible.
    attendance_status: String,
    /// Remaining source columns.
    #[new(default)]
    #[serde(default)]
    extra: ExtraFields,
}

impl Record {
    /// Attaches passthrough columns to the record.
    pub fn with_extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    /// Display name, falling back to the username when blank.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (@{})", self.label(), self.username)
    }
}
