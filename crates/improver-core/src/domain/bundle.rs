//! The improvement bundle: repository identity, goals and engagement configuration.

use serde::{Deserialize, Deserializer, Serialize};

use super::area::EngagementAreas;

/// Identity of the repository being improved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    /// Short repository name (e.g. `landing`).
    pub name: String,

    /// Owner-qualified name (e.g. `acme/landing`).
    pub full_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Browser URL of the repository.
    pub html_url: String,
}

impl RepositoryInfo {
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            description: description.into(),
            html_url: html_url.into(),
        }
    }
}

/// What the site owner wants the improvements to achieve.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    pub primary_goal: String,
    pub call_to_actions: String,
    pub target_metrics: String,
}

/// Engagement configuration: audience, known issues and selected improvement areas.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    #[serde(default)]
    pub current_issues: String,

    #[serde(default)]
    pub target_audience: String,

    #[serde(default)]
    pub engagement_areas: EngagementAreas,

    #[serde(default)]
    pub specific_improvements: String,
}

/// Everything the agent needs for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImprovementBundle {
    pub repository: RepositoryInfo,
    pub goals: Goals,
    pub engagement: Engagement,
}

impl ImprovementBundle {
    pub fn new(repository: RepositoryInfo, goals: Goals, engagement: Engagement) -> Self {
        Self {
            repository,
            goals,
            engagement,
        }
    }

    /// Selected improvement areas, in mapping order.
    pub fn areas(&self) -> &EngagementAreas {
        &self.engagement.engagement_areas
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
