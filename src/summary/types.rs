//! Data types produced by the summary builder.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A qualifying half-day slot, flattened for display and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub date: String,
    /// Localized half-day label.
    pub period: String,
    pub group: String,
    pub viewpoint: String,
    pub event: String,
    pub weather: String,
    pub score: f64,
    pub conditions: Map<String, Value>,
}

/// Best slot seen for a group inside the day window, threshold or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBest {
    pub viewpoint: String,
    pub score: f64,
    pub weather: String,
    pub date: String,
    pub period: String,
}

/// Group name to [`GroupBest`], kept in group order.
///
/// Serializes as a JSON object. Inserting an existing name replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupOverview {
    entries: Vec<(String, GroupBest)>,
}

impl GroupOverview {
    pub fn insert(&mut self, group: String, best: GroupBest) {
        match self.entries.iter_mut().find(|(name, _)| *name == group) {
            Some((_, existing)) => *existing = best,
            None => self.entries.push((group, best)),
        }
    }

    pub fn get(&self, group: &str) -> Option<&GroupBest> {
        self.entries
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, best)| best)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupBest)> {
        self.entries.iter().map(|(name, best)| (name.as_str(), best))
    }
}

impl Serialize for GroupOverview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Output of [`build_summary`](crate::summary::build_summary).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub generated_at: String,
    /// e.g. `2月24日—2月26日`, empty for an empty window.
    pub date_range: String,
    pub group_overview: GroupOverview,
    /// Sorted by score, highest first.
    pub highlights: Vec<Highlight>,
}
