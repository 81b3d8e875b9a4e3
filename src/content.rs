//! Read-only page content: career timeline, process steps, case studies and
//! education. Loaded once from the JSON bundled into the binary.

use std::collections::HashSet;

use serde::Deserialize;

use crate::category::Category;
use crate::error::{SiteError, SiteResult};

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    Current,
    Earlier,
}

impl Era {
    pub fn as_str(self) -> &'static str {
        match self {
            Era::Current => "Current",
            Era::Earlier => "Earlier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CareerNode {
    pub id: String,
    pub category: Category,
    /// Full label, prefixed with the era, e.g. `Current — AI & systems lead`.
    pub label: String,
    pub title: String,
    pub description: String,
    pub bullets: Vec<String>,
    pub takeaway: String,
}

impl CareerNode {
    const SEPARATOR: &'static str = " — ";

    pub fn era(&self) -> Era {
        if self.label.starts_with(Era::Earlier.as_str()) {
            Era::Earlier
        } else {
            Era::Current
        }
    }

    /// Label without its era prefix.
    pub fn short_label(&self) -> &str {
        [Era::Current, Era::Earlier]
            .iter()
            .find_map(|era| {
                self.label
                    .strip_prefix(era.as_str())
                    .and_then(|rest| rest.strip_prefix(Self::SEPARATOR))
            })
            .unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationKind {
    Degree,
    Certification,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EducationEntry {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub kind: EducationKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessStep {
    pub step: String,
    pub title: String,
    pub description: String,
    /// Colour family of the step badge.
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub context: String,
    pub action: String,
    pub result: String,
}

impl CaseStudy {
    /// Two-digit ordinal shown behind the study, counting from one.
    pub fn ordinal(index: usize) -> String {
        format!("{:02}", index + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentStore {
    career: Vec<CareerNode>,
    education: Vec<EducationEntry>,
    steps: Vec<ProcessStep>,
    case_studies: Vec<CaseStudy>,
}

impl ContentStore {
    /// The content shipped with the site.
    pub fn embedded() -> SiteResult<Self> {
        Self::from_json(SITE_JSON)
    }

    pub fn from_json(json: &str) -> SiteResult<Self> {
        let store: ContentStore = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> SiteResult<()> {
        if self.career.is_empty() {
            return Err(SiteError::Content("career timeline is empty".into()));
        }
        let mut seen = HashSet::new();
        for node in &self.career {
            if !seen.insert(node.id.as_str()) {
                return Err(SiteError::Content(format!("duplicate career id {}", node.id)));
            }
        }
        Ok(())
    }

    pub fn career(&self) -> &[CareerNode] {
        &self.career
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn steps(&self) -> &[ProcessStep] {
        &self.steps
    }

    pub fn case_studies(&self) -> &[CaseStudy] {
        &self.case_studies
    }

    /// Fraction of the timeline bar filled when node `index` is selected.
    pub fn timeline_progress(&self, index: usize) -> f64 {
        let last = self.career.len().saturating_sub(1);
        if last == 0 {
            return 0.0;
        }
        index.min(last) as f64 / last as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_loads() {
        let store = ContentStore::embedded().unwrap();
        assert_eq!(store.career().len(), 4);
        assert_eq!(store.education().len(), 4);
        assert_eq!(store.steps().len(), 6);
        assert_eq!(store.case_studies().len(), 3);

        let categories: Vec<Category> = store.career().iter().map(|n| n.category).collect();
        assert_eq!(
            categories,
            vec![Category::Ai, Category::Ops, Category::Founder, Category::Brand]
        );
        assert!(store.career().iter().all(|n| n.bullets.len() == 3));
        assert_eq!(store.education()[3].kind, EducationKind::Certification);
    }

    #[test]
    fn labels_split_into_era_and_name() {
        let store = ContentStore::embedded().unwrap();
        let first = &store.career()[0];
        assert_eq!(first.era(), Era::Current);
        assert_eq!(first.short_label(), "AI & systems lead");
        let third = &store.career()[2];
        assert_eq!(third.era(), Era::Earlier);
        assert_eq!(third.short_label(), "Co-founder and operator");
    }

    #[test]
    fn timeline_progress_spans_zero_to_one() {
        let store = ContentStore::embedded().unwrap();
        assert_eq!(store.timeline_progress(0), 0.0);
        assert!((store.timeline_progress(1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(store.timeline_progress(3), 1.0);
        assert_eq!(store.timeline_progress(9), 1.0);
    }

    #[test]
    fn single_node_timeline_has_no_progress() {
        let json = r#"{
            "career": [{"id": "x", "category": "brand", "label": "Solo", "title": "t",
                        "description": "d", "bullets": [], "takeaway": "k"}],
            "education": [], "steps": [], "case_studies": []
        }"#;
        let store = ContentStore::from_json(json).unwrap();
        assert_eq!(store.timeline_progress(0), 0.0);
        assert_eq!(store.career()[0].short_label(), "Solo");
    }

    #[test]
    fn rejects_empty_or_duplicate_timelines() {
        let empty = r#"{"career": [], "education": [], "steps": [], "case_studies": []}"#;
        assert!(matches!(ContentStore::from_json(empty), Err(SiteError::Content(_))));

        let node = r#"{"id": "dup", "category": "ai", "label": "L", "title": "t",
                       "description": "d", "bullets": [], "takeaway": "k"}"#;
        let dup = format!(
            r#"{{"career": [{node}, {node}], "education": [], "steps": [], "case_studies": []}}"#
        );
        assert!(matches!(ContentStore::from_json(&dup), Err(SiteError::Content(_))));
        assert!(matches!(ContentStore::from_json("{"), Err(SiteError::Json(_))));
    }

    #[test]
    fn case_study_ordinals() {
        assert_eq!(CaseStudy::ordinal(0), "01");
        assert_eq!(CaseStudy::ordinal(11), "12");
    }
}
