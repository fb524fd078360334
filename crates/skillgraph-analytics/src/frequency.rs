//! Skill frequency tables computed from the job set.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use skillgraph_core::{CategoryTable, JobRecord, SkillClassifier};
use skillgraph_store::RankedName;

use crate::round1;

/// Skills shown per industry.
const SKILLS_PER_INDUSTRY: usize = 5;

/// The most common skills within one industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustrySkills {
    pub industry: String,
    pub skills: Vec<RankedName>,
}

/// Counts names in first-seen order.
#[derive(Default)]
pub(crate) struct Tally {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl Tally {
    pub(crate) fn add(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.order.push(name.to_string());
                self.counts.insert(name.to_string(), 1);
            }
        }
    }

    pub(crate) fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.order
    }

    /// Highest counts first, first-seen order on ties.
    pub(crate) fn top(&self, limit: usize) -> Vec<RankedName> {
        let mut ranked: Vec<RankedName> = self
            .order
            .iter()
            .map(|name| RankedName {
                name: name.clone(),
                count: self.get(name),
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

fn label_matches(label: Option<&str>, filter: Option<&str>) -> bool {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => label == Some(filter),
        None => true,
    }
}

/// Number of jobs listing each skill, optionally restricted to one industry
/// and/or role.
pub fn skill_frequency(
    jobs: &[JobRecord],
    industry: Option<&str>,
    role: Option<&str>,
    limit: usize,
) -> Vec<RankedName> {
    let mut tally = Tally::default();
    for job in jobs
        .iter()
        .filter(|j| label_matches(j.industry(), industry) && label_matches(j.role(), role))
    {
        for skill in job.distinct_skills() {
            tally.add(skill);
        }
    }
    tally.top(limit)
}

/// Top skills per industry, industries in name order.
pub fn industry_top_skills(jobs: &[JobRecord]) -> Vec<IndustrySkills> {
    let mut by_industry: BTreeMap<&str, Tally> = BTreeMap::new();
    for job in jobs {
        let Some(industry) = job.industry() else {
            continue;
        };
        let tally = by_industry.entry(industry).or_default();
        for skill in job.distinct_skills() {
            tally.add(skill);
        }
    }

    by_industry
        .into_iter()
        .map(|(industry, tally)| IndustrySkills {
            industry: industry.to_string(),
            skills: tally.top(SKILLS_PER_INDUSTRY),
        })
        .collect()
}

/// Share of one industry's categorized skill mentions per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryProfile {
    #[serde(rename = "label")]
    pub industry: String,
    /// Percentages aligned with [`IndustryComparison::labels`].
    pub data: Vec<f64>,
}

/// Per-industry category mix over a shared category axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryComparison {
    pub labels: Vec<String>,
    #[serde(rename = "datasets")]
    pub industries: Vec<IndustryProfile>,
}

/// Category mix of each industry's skills.
///
/// The axis holds every table category, ordered by how many distinct
/// cataloged skills fall in it (table order on ties). Each industry's values
/// are its skill mentions per category as a percentage of its categorized
/// mentions, rounded to one decimal; an industry with none reports zeros.
/// Skills outside the table are ignored.
pub fn industry_category_profile(jobs: &[JobRecord], table: &CategoryTable) -> IndustryComparison {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct_per_category: HashMap<&str, usize> = HashMap::new();
    for job in jobs {
        for skill in job.distinct_skills() {
            if !seen.insert(skill) {
                continue;
            }
            if let Some(category) = table.lookup(skill) {
                *distinct_per_category.entry(category).or_default() += 1;
            }
        }
    }

    let mut labels: Vec<&str> = table.categories().iter().map(|(c, _)| c.as_str()).collect();
    labels.sort_by_key(|c| std::cmp::Reverse(distinct_per_category.get(c).copied().unwrap_or(0)));

    let mut by_industry: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for job in jobs {
        let Some(industry) = job.industry() else {
            continue;
        };
        let counts = by_industry
            .entry(industry)
            .or_insert_with(|| vec![0; labels.len()]);
        for skill in job.distinct_skills() {
            let slot = table
                .lookup(skill)
                .and_then(|category| labels.iter().position(|l| *l == category));
            if let Some(slot) = slot {
                counts[slot] += 1;
            }
        }
    }

    let industries = by_industry
        .into_iter()
        .map(|(industry, counts)| {
            let total = counts.iter().sum::<u64>().max(1) as f64;
            IndustryProfile {
                industry: industry.to_string(),
                data: counts
                    .iter()
                    .map(|&count| round1(count as f64 / total * 100.0))
                    .collect(),
            }
        })
        .collect();

    IndustryComparison {
        labels: labels.into_iter().map(str::to_string).collect(),
        industries,
    }
}
