//! Fishbone analysis model: the problem under investigation and its causes.
//!
//! An analysis is plain data loaded from JSON. Each cause belongs to one of
//! the fixed [`Category`] branches and carries a chain of "why" answers.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use serde::{Deserialize, Serialize};

use crate::fishbone::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// One answer in a five-whys chain. `level` starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Why {
    pub id: String,
    pub level: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cause {
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub is_root_cause: bool,
    pub title: String,
    #[serde(default)]
    pub whys: Vec<Why>,
}

impl Cause {
    /// The deepest why answer recorded for this cause.
    #[must_use]
    pub fn deepest_why(&self) -> Option<&Why> {
        self.whys.iter().max_by_key(|w| w.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishboneAnalysis {
    pub id: String,
    pub title: String,
    pub problem_statement: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub causes: Vec<Cause>,
}

impl FishboneAnalysis {
    /// Causes filed under `category`, in document order.
    pub fn causes_for(&self, category: Category) -> impl Iterator<Item = &Cause> {
        self.causes.iter().filter(move |c| c.category == category)
    }

    /// Causes marked as root causes.
    pub fn root_causes(&self) -> impl Iterator<Item = &Cause> {
        self.causes.iter().filter(|c| c.is_root_cause)
    }
}

/// Built-in demo analysis: a reel dropped from a clamp truck.
#[must_use]
pub fn sample_analysis() -> FishboneAnalysis {
    FishboneAnalysis {
        id: "a".into(),
        title: "Investigation into dropped reel".into(),
        problem_statement: "Dropped reel from clamp truck".into(),
        priority: Priority::High,
        status: Status::InProgress,
        created_by: "Gerard Gargan".into(),
        date_created: None,
        date_modified: None,
        causes: vec![Cause {
            id: "1".into(),
            category: Category::Environment,
            is_root_cause: false,
            title: "Wet environment".into(),
            whys: vec![Why { id: "1".into(), level: 1, reason: "Operating outside in wet weather".into() }],
        }],
    }
}
