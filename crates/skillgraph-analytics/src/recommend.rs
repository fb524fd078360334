//! Skill recommendations from the current skill set.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::frequency::Tally;
use crate::round1;
use skillgraph_core::{JobRecord, SkillClassifier};

/// Recommendations returned per request.
const MAX_RECOMMENDATIONS: usize = 10;

/// Message returned when no current skills were given.
pub const NO_SKILLS_MESSAGE: &str = "Please select your current skills";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub skill: String,
    /// Jobs listing this skill next to at least one current skill.
    pub frequency: u64,
    /// Share of this skill's jobs that also list a current skill, in percent.
    pub relevance: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub current_skills: Vec<String>,
    pub career_goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Recommend skills that co-occur with `current` in jobs for `career_goal`
/// (any role when blank). Skills already in `current` are never returned.
pub fn recommend_skills(
    jobs: &[JobRecord],
    current: &[String],
    career_goal: Option<&str>,
    classifier: &dyn SkillClassifier,
) -> RecommendationReport {
    let current: Vec<String> = current
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let career_goal = career_goal.map(str::trim).unwrap_or_default();

    if current.is_empty() {
        return RecommendationReport {
            recommendations: Vec::new(),
            current_skills: current,
            career_goal: career_goal.to_string(),
            message: Some(NO_SKILLS_MESSAGE.to_string()),
        };
    }

    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut frequency = Tally::default();
    let mut co_occurrence = Tally::default();

    let matching = jobs
        .iter()
        .filter(|job| career_goal.is_empty() || job.role() == Some(career_goal));
    for job in matching {
        let skills = job.distinct_skills();
        let has_current = skills.iter().any(|s| current_set.contains(s));
        for skill in skills {
            frequency.add(skill);
            if has_current && !current_set.contains(skill) {
                co_occurrence.add(skill);
            }
        }
    }

    let mut recommendations: Vec<Recommendation> = co_occurrence
        .names()
        .iter()
        .map(|skill| {
            let count = co_occurrence.get(skill);
            let relevance = count as f64 / frequency.get(skill).max(1) as f64 * 100.0;
            Recommendation {
                skill: skill.clone(),
                frequency: count,
                relevance: round1(relevance),
                category: classifier.classify(skill).to_string(),
            }
        })
        .collect();
    recommendations.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then(b.frequency.cmp(&a.frequency))
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);

    debug!(
        "Recommended {} skills for {} current skills",
        recommendations.len(),
        current.len()
    );

    RecommendationReport {
        recommendations,
        current_skills: current,
        career_goal: career_goal.to_string(),
        message: None,
    }
}
