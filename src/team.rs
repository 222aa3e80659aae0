//! Static team dataset: one content bundle per team member plus the weekly checklist.

use crate::checklist::{default_tasks, ChecklistTask};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

pub const BUNDLED_TEAM_DATA: &str = include_str!("../data/team_data.json");

#[derive(Debug, Error)]
pub enum TeamDataError {
    #[error("failed to read team data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse team data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate team member id: {0}")]
    DuplicateMember(String),

    #[error("duplicate checklist task id: {0}")]
    DuplicateTask(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub team_members: Vec<TeamMember>,
    #[serde(default = "default_tasks")]
    pub engagement_checklist: Vec<ChecklistTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub icp: Icp,
    pub connect_criteria: Vec<String>,
    pub engage_criteria: Vec<String>,
    pub conversation_starters: Vec<ConversationStarter>,
    pub real_quotes: Vec<String>,
    pub content_pillars: Vec<ContentPillar>,
    pub engagement_boosters: Vec<EngagementBooster>,
    pub red_flags: Vec<String>,
    pub trust_builders: Vec<String>,
    pub quick_reference: Option<QuickReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Icp {
    pub title: String,
    pub primary_service: String,
    pub services_focus: Vec<String>,
    pub target_roles: Vec<String>,
    pub company_profile: String,
    pub industries: Vec<String>,
    pub hot_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationStarter {
    pub id: String,
    pub template: String,
    pub when_to_use: String,
    pub tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPillar {
    pub title: String,
    pub frequency: String,
    pub description: String,
    pub examples: Vec<String>,
    pub posting_tips: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementBooster {
    pub step: u32,
    pub action: String,
    pub why: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickReference {
    pub decision_speed: String,
    pub buying_committee: String,
    pub when_warm: Vec<String>,
}

impl TeamData {
    pub fn parse(raw: &str) -> Result<Self, TeamDataError> {
        let data: TeamData = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    pub fn bundled() -> Result<Self, TeamDataError> {
        Self::parse(BUNDLED_TEAM_DATA)
    }

    pub async fn load(path: Option<&Path>) -> Result<Self, TeamDataError> {
        match path {
            Some(path) => Self::parse(&fs::read_to_string(path).await?),
            None => Self::bundled(),
        }
    }

    pub fn member(&self, id: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|member| member.id == id)
    }

    fn validate(&self) -> Result<(), TeamDataError> {
        let mut seen = BTreeSet::new();
        for member in &self.team_members {
            if !seen.insert(member.id.as_str()) {
                return Err(TeamDataError::DuplicateMember(member.id.clone()));
            }
        }
        let mut seen = BTreeSet::new();
        for task in &self.engagement_checklist {
            if !seen.insert(task.id.as_str()) {
                return Err(TeamDataError::DuplicateTask(task.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses() {
        let data = TeamData::bundled().expect("bundled data");
        assert!(!data.team_members.is_empty());
        assert!(!data.engagement_checklist.is_empty());
        for member in &data.team_members {
            assert!(data.member(&member.id).is_some());
            assert!(!member.name.is_empty());
        }
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let data = TeamData::parse(r#"{"teamMembers":[{"id":"sam","name":"Sam"}]}"#).unwrap();
        let sam = data.member("sam").unwrap();
        assert!(sam.conversation_starters.is_empty());
        assert!(sam.quick_reference.is_none());
        assert_eq!(sam.icp.title, "");
        assert_eq!(data.engagement_checklist, default_tasks());
    }

    #[test]
    fn duplicate_member_ids_are_rejected() {
        let raw = r#"{"teamMembers":[{"id":"sam"},{"id":"sam"}]}"#;
        assert!(matches!(
            TeamData::parse(raw),
            Err(TeamDataError::DuplicateMember(id)) if id == "sam"
        ));
    }

    #[test]
    fn unknown_member_is_none() {
        let data = TeamData::bundled().unwrap();
        assert!(data.member("nobody-by-this-name").is_none());
    }
}
