//! Static skill → category classification.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Category assigned to skills missing from the table.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Built-in categories in priority order, each with its member skills.
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "ML",
        &[
            "Python",
            "TensorFlow",
            "PyTorch",
            "Deep Learning",
            "Computer Vision",
            "NLP",
            "R",
            "Statistics",
            "Mathematics",
        ],
    ),
    (
        "Data",
        &["SQL", "Spark", "Hadoop", "Tableau", "Data Visualization", "Scala", "ETL"],
    ),
    ("Cloud", &["AWS", "Azure", "GCP", "Docker", "Kubernetes", "Linux"]),
    ("LLM", &["Transformers", "BERT", "GPT"]),
    ("Engineering", &["Git", "Java", "REST APIs"]),
    ("MLOps", &["MLOps", "CI/CD", "Model Monitoring"]),
];

static BUILTIN: Lazy<CategoryTable> = Lazy::new(|| CategoryTable::from_groups(DEFAULT_CATEGORIES));

/// Classifies a skill name into a category.
pub trait SkillClassifier: Send + Sync {
    /// Category for an exact skill name, if the table knows it.
    fn lookup(&self, skill: &str) -> Option<&str>;

    /// Category for a skill, `"Other"` when unmatched.
    fn classify(&self, skill: &str) -> &str {
        self.lookup(skill).unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Exact-name category table.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    entries: HashMap<String, String>,
    categories: Vec<(String, Vec<String>)>,
}

impl CategoryTable {
    /// Build a table from `(category, skills)` groups; earlier groups win.
    pub fn from_groups<C, S>(groups: &[(C, &[S])]) -> Self
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut entries = HashMap::new();
        let mut categories = Vec::with_capacity(groups.len());
        for (category, skills) in groups {
            let category = category.as_ref().to_string();
            for skill in skills.iter() {
                entries
                    .entry(skill.as_ref().to_string())
                    .or_insert_with(|| category.clone());
            }
            categories.push((
                category,
                skills.iter().map(|s| s.as_ref().to_string()).collect(),
            ));
        }
        Self {
            entries,
            categories,
        }
    }

    /// The built-in AI/data skill table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Categories in priority order with their member skills.
    pub fn categories(&self) -> &[(String, Vec<String>)] {
        &self.categories
    }
}

impl SkillClassifier for CategoryTable {
    fn lookup(&self, skill: &str) -> Option<&str> {
        self.entries.get(skill).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_classification() {
        let table = CategoryTable::builtin();
        assert_eq!(table.classify("Python"), "ML");
        assert_eq!(table.classify("SQL"), "Data");
        assert_eq!(table.classify("Kubernetes"), "Cloud");
        assert_eq!(table.classify("Cobol"), DEFAULT_CATEGORY);
        assert_eq!(table.lookup("Cobol"), None);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let table = CategoryTable::builtin();
        assert_eq!(table.classify("python"), DEFAULT_CATEGORY);
        assert_eq!(table.classify("Python "), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_first_matching_category_wins() {
        let groups: &[(&str, &[&str])] = &[("A", &["Rust", "Go"]), ("B", &["Go", "Zig"])];
        let table = CategoryTable::from_groups(groups);
        assert_eq!(table.classify("Go"), "A");
        assert_eq!(table.classify("Zig"), "B");
        assert_eq!(table.categories().len(), 2);
    }
}
