//! Job-posting records as seen by the graph engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One job posting: a stable identifier, its extracted skills and the
/// optional labels that become Role/Industry/Location nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl JobRecord {
    pub fn new(id: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            id: id.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Trimmed, non-blank skills with duplicates removed, first-seen order kept.
    pub fn distinct_skills(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && seen.insert(*s))
            .collect()
    }

    /// Role label if present and non-blank.
    pub fn role(&self) -> Option<&str> {
        non_blank(self.role.as_deref())
    }

    /// Industry label if present and non-blank.
    pub fn industry(&self) -> Option<&str> {
        non_blank(self.industry.as_deref())
    }

    /// Location label if present and non-blank.
    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    /// Reject records the catalog cannot key.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRecord("job id must not be empty".into()));
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Split a comma-separated skills field into trimmed, non-blank names.
pub fn parse_skill_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_skills_dedups_and_trims() {
        let job = JobRecord::new("J1", &["Python", " SQL", "Python", "", "SQL ", "AWS"]);
        assert_eq!(job.distinct_skills(), vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_blank_labels_are_absent() {
        let job = JobRecord::new("J1", &[]).with_role("  ").with_industry("Tech");
        assert_eq!(job.role(), None);
        assert_eq!(job.industry(), Some("Tech"));
        assert_eq!(job.location(), None);
    }

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(
            parse_skill_list("Python, SQL ,, AWS,"),
            vec!["Python".to_string(), "SQL".to_string(), "AWS".to_string()]
        );
        assert!(parse_skill_list("").is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        assert!(JobRecord::new(" ", &["Python"]).validate().is_err());
        assert!(JobRecord::new("J1", &["Python"]).validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let job: JobRecord = serde_json::from_str(r#"{"id": "J9"}"#).unwrap();
        assert_eq!(job.id, "J9");
        assert!(job.skills.is_empty());
        assert!(job.role.is_none());
    }
}
