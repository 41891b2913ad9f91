//! Assessment results with JSON persistence.
//!
//! [`AssessmentReport::build`] is the single results entry point: given a
//! bank and the three completed response maps it yields the section scores,
//! badges, overall tier and the tier's recommendation copy.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::AssessmentData;
use crate::error::AssessmentError;
use crate::model::{
    wiscar_progress, CategoryProgress, LearningResources, QuestionBank, Section, TierContent,
};
use crate::scoring::{Badge, SectionScores, Tier};

/// A complete assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank (without the question definitions).
    pub bank: BankSummary,
    /// The responses that were scored.
    pub responses: AssessmentData,
    /// Per-section score and badge, in presentation order.
    pub sections: Vec<SectionResult>,
    /// Unweighted mean of the section scores.
    pub overall: f64,
    pub tier: Tier,
    /// Copy for the selected tier.
    pub recommendation: TierContent,
    pub resources: LearningResources,
    /// WISCAR answered/total per category.
    #[serde(default)]
    pub wiscar_progress: Vec<CategoryProgress>,
}

/// Summary of a question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub title: String,
    pub role: String,
    pub question_count: usize,
}

/// One section's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub section: Section,
    pub score: f64,
    pub badge: Badge,
    pub answered: usize,
}

impl AssessmentReport {
    /// Score a completed assessment.
    ///
    /// Fails when any section is missing answers, answers unknown questions
    /// or holds values outside its domain.
    pub fn build(bank: &QuestionBank, data: &AssessmentData) -> Result<Self, AssessmentError> {
        data.check_complete(bank)?;

        let scores = SectionScores::compute(&data.psychometric, &data.technical, &data.wiscar);
        let tier = scores.tier();
        let sections = Section::ALL
            .iter()
            .map(|&section| {
                let score = scores.get(section);
                SectionResult {
                    section,
                    score,
                    badge: Badge::for_score(score),
                    answered: data.get(section).len(),
                }
            })
            .collect();

        let recommendation = match tier {
            Tier::Strong => bank.recommendations.strong.clone(),
            Tier::Moderate => bank.recommendations.moderate.clone(),
            Tier::Low => bank.recommendations.low.clone(),
        };

        tracing::info!(bank = %bank.id, overall = scores.overall(), %tier, "assessment scored");

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id.clone(),
                title: bank.title.clone(),
                role: bank.role.clone(),
                question_count: bank.total_questions(),
            },
            responses: data.clone(),
            sections,
            overall: scores.overall(),
            tier,
            recommendation,
            resources: bank.resources.clone(),
            wiscar_progress: wiscar_progress(&bank.wiscar, &data.wiscar),
        })
    }

    /// The result for one section.
    pub fn section(&self, section: Section) -> Option<&SectionResult> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Load a responses file (`{"psychometric": {..}, "technical": {..}, "wiscar": {..}}`).
pub fn load_responses(path: &Path) -> Result<AssessmentData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse responses JSON: {}", path.display()))
}
