//! Jaccard similarity between jobs and between role categories.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::round1;
use skillgraph_core::JobRecord;

/// Jobs must score strictly above this to count as similar.
const SIMILARITY_THRESHOLD: f64 = 20.0;
const MAX_SIMILAR_JOBS: usize = 10;

/// `|A ∩ B| / |A ∪ B| * 100`, 0 when both sets are empty.
pub fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64 * 100.0
}

/// A job resembling the target job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarJob {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub similarity: f64,
    /// Skills both jobs list, sorted.
    pub shared_skills: Vec<String>,
    /// Skills only this job lists, sorted.
    pub unique_skills: Vec<String>,
}

/// Jobs scoring above 20% against `target`, most similar first.
pub fn similar_jobs(target: &JobRecord, jobs: &[JobRecord]) -> Vec<SimilarJob> {
    let target_skills: HashSet<&str> = target.distinct_skills().into_iter().collect();

    let mut similar: Vec<SimilarJob> = jobs
        .iter()
        .filter(|job| job.id != target.id)
        .filter_map(|job| {
            let skills: HashSet<&str> = job.distinct_skills().into_iter().collect();
            let score = jaccard(&target_skills, &skills);
            if score <= SIMILARITY_THRESHOLD {
                return None;
            }
            Some(SimilarJob {
                id: job.id.clone(),
                title: job.title.clone(),
                role: job.role().map(String::from),
                location: job.location().map(String::from),
                similarity: round1(score),
                shared_skills: sorted(target_skills.intersection(&skills)),
                unique_skills: sorted(skills.difference(&target_skills)),
            })
        })
        .collect();

    similar.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    similar.truncate(MAX_SIMILAR_JOBS);
    similar
}

fn sorted<'s, 'a: 's>(skills: impl Iterator<Item = &'s &'a str>) -> Vec<String> {
    skills
        .map(|s| s.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Skill union and size of one role category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySkills {
    pub skills: Vec<String>,
    pub job_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPair {
    pub source: String,
    pub target: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySimilarityReport {
    pub categories: BTreeMap<String, CategorySkills>,
    pub similarities: Vec<CategoryPair>,
}

/// Similarity of every ordered pair of distinct role categories, comparing
/// the union of skills across each category's jobs.
pub fn category_similarity(jobs: &[JobRecord]) -> CategorySimilarityReport {
    let mut groups: BTreeMap<&str, (BTreeSet<&str>, usize)> = BTreeMap::new();
    for job in jobs {
        let Some(role) = job.role() else {
            continue;
        };
        let (skills, count) = groups.entry(role).or_default();
        skills.extend(job.distinct_skills());
        *count += 1;
    }

    let sets: Vec<(&str, HashSet<&str>)> = groups
        .iter()
        .map(|(role, (skills, _))| (*role, skills.iter().copied().collect()))
        .collect();

    let mut similarities = Vec::new();
    for (source, source_skills) in &sets {
        for (target, target_skills) in &sets {
            if source == target {
                continue;
            }
            similarities.push(CategoryPair {
                source: source.to_string(),
                target: target.to_string(),
                similarity: round1(jaccard(source_skills, target_skills)),
            });
        }
    }

    let categories = groups
        .into_iter()
        .map(|(role, (skills, job_count))| {
            (
                role.to_string(),
                CategorySkills {
                    skills: skills.into_iter().map(String::from).collect(),
                    job_count,
                },
            )
        })
        .collect();

    CategorySimilarityReport {
        categories,
        similarities,
    }
}
