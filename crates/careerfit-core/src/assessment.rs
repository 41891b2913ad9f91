//! Host flow: the owning container for the three response maps.
//!
//! [`AssessmentFlow`] sequences the intro, the three scored sections and the
//! results stage. Collectors hand their finished maps to
//! [`AssessmentFlow::record`]; [`AssessmentData::check_complete`] gates the
//! hand-off to the aggregator so partial maps are never scored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{LikertScale, QuestionBank, ResponseMap, Section};

/// The three response maps collected during one assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentData {
    #[serde(default)]
    pub psychometric: ResponseMap,
    #[serde(default)]
    pub technical: ResponseMap,
    #[serde(default)]
    pub wiscar: ResponseMap,
}

impl AssessmentData {
    pub fn get(&self, section: Section) -> &ResponseMap {
        match section {
            Section::Psychometric => &self.psychometric,
            Section::Technical => &self.technical,
            Section::Wiscar => &self.wiscar,
        }
    }

    pub fn get_mut(&mut self, section: Section) -> &mut ResponseMap {
        match section {
            Section::Psychometric => &mut self.psychometric,
            Section::Technical => &mut self.technical,
            Section::Wiscar => &mut self.wiscar,
        }
    }

    /// Merge a section's responses into what was captured before.
    pub fn merge(&mut self, section: Section, responses: ResponseMap) {
        self.get_mut(section).extend(responses);
    }

    /// Check that a section holds exactly one valid response per bank question.
    pub fn check_section(&self, bank: &QuestionBank, section: Section) -> Result<(), AssessmentError> {
        self.check_entries(bank, section)?;

        let responses = self.get(section);
        let ids = bank.question_ids(section);
        let answered = ids.iter().filter(|id| responses.contains_key(**id)).count();
        if answered != ids.len() {
            return Err(AssessmentError::Incomplete {
                section,
                answered,
                expected: ids.len(),
            });
        }
        Ok(())
    }

    /// Check that every stored response names a bank question and holds a
    /// value in its section's domain. Unanswered questions are allowed.
    pub fn check_partial(&self, bank: &QuestionBank) -> Result<(), AssessmentError> {
        for section in Section::ALL {
            self.check_entries(bank, section)?;
        }
        Ok(())
    }

    fn check_entries(&self, bank: &QuestionBank, section: Section) -> Result<(), AssessmentError> {
        let ids = bank.question_ids(section);
        for (id, &value) in self.get(section) {
            if !ids.contains(&id.as_str()) {
                return Err(AssessmentError::UnknownQuestion {
                    section,
                    question_id: id.clone(),
                });
            }
            let valid = match section {
                Section::Technical => value <= 1,
                Section::Psychometric | Section::Wiscar => LikertScale::contains(value),
            };
            if !valid {
                return Err(AssessmentError::InvalidValue {
                    section,
                    question_id: id.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Check every section; the first failing section is reported.
    pub fn check_complete(&self, bank: &QuestionBank) -> Result<(), AssessmentError> {
        for section in Section::ALL {
            self.check_section(bank, section)?;
        }
        Ok(())
    }
}

/// A stage of the host flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Intro,
    Psychometric,
    Technical,
    Wiscar,
    Results,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Intro,
        Stage::Psychometric,
        Stage::Technical,
        Stage::Wiscar,
        Stage::Results,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Intro => "Introduction",
            Stage::Psychometric => "Psychological Fit",
            Stage::Technical => "Technical Readiness",
            Stage::Wiscar => "Career Alignment",
            Stage::Results => "Your Results",
        }
    }

    /// One-line description; the intro names the role being assessed.
    pub fn description(&self, role: &str) -> String {
        match self {
            Stage::Intro => format!("Learn about the {role} role"),
            Stage::Psychometric => "Personality and work style assessment".to_string(),
            Stage::Technical => "Domain knowledge and aptitude test".to_string(),
            Stage::Wiscar => "WISCAR framework evaluation".to_string(),
            Stage::Results => "Personalized career recommendations".to_string(),
        }
    }

    /// The scored section collected at this stage, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            Stage::Psychometric => Some(Section::Psychometric),
            Stage::Technical => Some(Section::Technical),
            Stage::Wiscar => Some(Section::Wiscar),
            Stage::Intro | Stage::Results => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Stage pointer plus the responses gathered so far.
#[derive(Debug, Clone, Default)]
pub struct AssessmentFlow {
    stage: usize,
    data: AssessmentData,
}

impl AssessmentFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume with previously captured responses, starting at the intro.
    pub fn with_data(data: AssessmentData) -> Self {
        Self { stage: 0, data }
    }

    pub fn stage(&self) -> Stage {
        Stage::ALL[self.stage]
    }

    pub fn stage_index(&self) -> usize {
        self.stage
    }

    pub fn data(&self) -> &AssessmentData {
        &self.data
    }

    pub fn into_data(self) -> AssessmentData {
        self.data
    }

    /// Responses previously captured for a section, used as a collector's initial data.
    pub fn initial_data(&self, section: Section) -> ResponseMap {
        self.data.get(section).clone()
    }

    /// Completion hand-off from a section's collector.
    pub fn record(&mut self, section: Section, responses: ResponseMap) {
        tracing::debug!(%section, answered = responses.len(), "recording section");
        self.data.merge(section, responses);
    }

    /// Advance one stage; stays put on the results stage.
    pub fn next_stage(&mut self) -> Stage {
        if self.stage + 1 < Stage::ALL.len() {
            self.stage += 1;
        }
        self.stage()
    }

    /// Go back one stage; stays put on the intro.
    pub fn previous_stage(&mut self) -> Stage {
        self.stage = self.stage.saturating_sub(1);
        self.stage()
    }

    pub fn progress_percent(&self) -> f64 {
        (self.stage + 1) as f64 / Stage::ALL.len() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::builtin_bank;

    fn complete_data(bank: &QuestionBank, likert: u8, correct: usize) -> AssessmentData {
        let mut data = AssessmentData::default();
        for q in &bank.psychometric {
            data.psychometric.insert(q.id.clone(), likert);
        }
        for (i, q) in bank.technical.iter().enumerate() {
            data.technical.insert(q.id.clone(), u8::from(i < correct));
        }
        for q in &bank.wiscar {
            data.wiscar.insert(q.id.clone(), likert);
        }
        data
    }

    #[test]
    fn flow_walks_stages_and_clamps() {
        let mut flow = AssessmentFlow::new();
        assert_eq!(flow.stage(), Stage::Intro);
        assert_eq!(flow.progress_percent(), 20.0);
        assert_eq!(flow.previous_stage(), Stage::Intro);
        assert_eq!(flow.next_stage(), Stage::Psychometric);
        assert_eq!(flow.next_stage(), Stage::Technical);
        assert_eq!(flow.next_stage(), Stage::Wiscar);
        assert_eq!(flow.next_stage(), Stage::Results);
        assert_eq!(flow.next_stage(), Stage::Results);
        assert_eq!(flow.progress_percent(), 100.0);
        assert_eq!(flow.previous_stage(), Stage::Wiscar);
    }

    #[test]
    fn stage_descriptions() {
        assert_eq!(
            Stage::Intro.description("Clinical Data Analyst"),
            "Learn about the Clinical Data Analyst role"
        );
        assert_eq!(Stage::Wiscar.section(), Some(Section::Wiscar));
        assert_eq!(Stage::Results.section(), None);
    }

    #[test]
    fn record_merges_over_previous_responses() {
        let mut flow = AssessmentFlow::new();
        let mut first = ResponseMap::new();
        first.insert("a".into(), 1);
        first.insert("b".into(), 2);
        flow.record(Section::Psychometric, first);

        let mut second = ResponseMap::new();
        second.insert("b".into(), 5);
        flow.record(Section::Psychometric, second);

        let initial = flow.initial_data(Section::Psychometric);
        assert_eq!(initial["a"], 1);
        assert_eq!(initial["b"], 5);
        assert!(flow.data().technical.is_empty());
    }

    #[test]
    fn complete_data_passes_check() {
        let bank = builtin_bank().unwrap();
        let data = complete_data(&bank, 3, 6);
        assert!(data.check_complete(&bank).is_ok());
    }

    #[test]
    fn missing_answer_is_incomplete() {
        let bank = builtin_bank().unwrap();
        let mut data = complete_data(&bank, 3, 6);
        data.wiscar.remove("will_persistence");
        assert_eq!(
            data.check_complete(&bank),
            Err(AssessmentError::Incomplete {
                section: Section::Wiscar,
                answered: 11,
                expected: 12,
            })
        );
    }

    #[test]
    fn unknown_question_is_rejected() {
        let bank = builtin_bank().unwrap();
        let mut data = complete_data(&bank, 3, 6);
        data.technical.insert("bogus".into(), 1);
        let err = data.check_complete(&bank).unwrap_err();
        assert_eq!(err.section(), Section::Technical);
        assert!(matches!(err, AssessmentError::UnknownQuestion { .. }));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let bank = builtin_bank().unwrap();
        let mut data = complete_data(&bank, 3, 6);
        data.technical.insert("data_types".into(), 2);
        assert!(matches!(
            data.check_section(&bank, Section::Technical),
            Err(AssessmentError::InvalidValue { value: 2, .. })
        ));

        let mut data = complete_data(&bank, 3, 6);
        data.psychometric.insert("structured_work".into(), 0);
        assert!(data.check_section(&bank, Section::Psychometric).is_err());
    }

    #[test]
    fn partial_answers_pass_partial_check() {
        let bank = builtin_bank().unwrap();
        let mut data = AssessmentData::default();
        data.psychometric.insert("structured_work".into(), 4);
        data.technical.insert("data_types".into(), 1);
        assert!(data.check_partial(&bank).is_ok());
        assert!(data.check_complete(&bank).is_err());

        data.wiscar.insert("will_persistence".into(), 9);
        assert_eq!(
            data.check_partial(&bank),
            Err(AssessmentError::InvalidValue {
                section: Section::Wiscar,
                question_id: "will_persistence".into(),
                value: 9,
            })
        );

        let mut data = AssessmentData::default();
        data.psychometric.insert("bogus".into(), 3);
        assert!(matches!(
            data.check_partial(&bank),
            Err(AssessmentError::UnknownQuestion { .. })
        ));
    }

    #[test]
    fn data_json_shape() {
        let json = r#"{"psychometric":{"a":3},"technical":{"t":1}}"#;
        let data: AssessmentData = serde_json::from_str(json).unwrap();
        assert_eq!(data.psychometric["a"], 3);
        assert_eq!(data.technical["t"], 1);
        assert!(data.wiscar.is_empty());
    }
}
