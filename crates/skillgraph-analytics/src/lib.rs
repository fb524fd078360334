//! SkillGraph Analytics — related skills, recommendations, similarity and
//! frequency reports over the skill graph and the job set.

pub mod frequency;
pub mod network;
pub mod recommend;
pub mod related;
pub mod similarity;

pub use frequency::{
    industry_category_profile, industry_top_skills, skill_frequency, IndustryComparison,
    IndustryProfile, IndustrySkills,
};
pub use network::{relationship_graph, skill_network, NetworkNode, SkillNetwork};
pub use recommend::{recommend_skills, Recommendation, RecommendationReport};
pub use related::{related_for_job, related_skills, RelatedGroup};
pub use similarity::{
    category_similarity, jaccard, similar_jobs, CategoryPair, CategorySimilarityReport,
    CategorySkills, SimilarJob,
};

/// Round a percentage to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
