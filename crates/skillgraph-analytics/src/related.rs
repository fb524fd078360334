//! Related-skill lookups.

use serde::Serialize;

use skillgraph_core::JobRecord;
use skillgraph_store::{GraphService, Neighbor};

/// Skills of a job considered for the related-skills panel.
const JOB_SKILLS_CONSIDERED: usize = 3;
/// Related skills shown per job skill.
const RELATED_PER_SKILL: usize = 5;

/// One job skill with the skills that most often appear beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedGroup {
    pub skill: String,
    pub related: Vec<Neighbor>,
}

pub async fn related_skills(graph: &GraphService, skill: &str, limit: usize) -> Vec<Neighbor> {
    graph.neighbors(skill.trim(), limit).await
}

/// Related skills for the first few skills of a job. Skills with no
/// co-occurrences are left out.
pub async fn related_for_job(graph: &GraphService, job: &JobRecord) -> Vec<RelatedGroup> {
    let mut groups = Vec::new();
    for skill in job.distinct_skills().into_iter().take(JOB_SKILLS_CONSIDERED) {
        let related = graph.neighbors(skill, RELATED_PER_SKILL).await;
        if !related.is_empty() {
            groups.push(RelatedGroup {
                skill: skill.to_string(),
                related,
            });
        }
    }
    groups
}
