//! Per-section answer collectors.
//!
//! A collector walks one question set, caching responses as the user moves
//! forward and backward. "next" on the final question hands the finished
//! [`ResponseMap`] back exactly once via [`Advance::Complete`]; after that the
//! collector is terminal and every transition returns
//! [`CollectorError::Completed`].
//!
//! [`LikertCollector`] serves the psychometric and WISCAR sets.
//! [`GradedCollector`] serves the technical set and interposes a graded
//! feedback state between recording an answer and advancing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CollectorError;
use crate::model::{
    wiscar_progress, CategoryProgress, LikertItem, LikertScale, ResponseMap,
    TechnicalQuestion, WiscarQuestion,
};
use crate::scoring::grade;

/// Outcome of a successful "next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index.
    Moved(usize),
    /// The set is exhausted; these are the finished responses.
    Complete(ResponseMap),
}

fn progress_percent(current: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    (current + 1) as f64 / len as f64 * 100.0
}

// ---------------------------------------------------------------------------
// Likert collector
// ---------------------------------------------------------------------------

/// Collector for sets answered on a 1–5 scale.
#[derive(Debug, Clone)]
pub struct LikertCollector<'a, Q> {
    questions: &'a [Q],
    current: usize,
    responses: ResponseMap,
    selection: Option<u8>,
    completed: bool,
}

impl<'a, Q: LikertItem> LikertCollector<'a, Q> {
    /// Start at question 0, pre-populated with previously captured responses.
    ///
    /// Entries for questions outside this set or off the 1–5 scale are dropped.
    pub fn new(questions: &'a [Q], mut initial: ResponseMap) -> Self {
        initial.retain(|id, value| {
            let keep =
                LikertScale::contains(*value) && questions.iter().any(|q| q.id() == id.as_str());
            if !keep {
                tracing::warn!(question = %id, value = *value, "dropping invalid initial response");
            }
            keep
        });
        let mut collector = Self {
            questions,
            current: 0,
            responses: initial,
            selection: None,
            completed: false,
        };
        collector.redisplay();
        collector
    }

    fn redisplay(&mut self) {
        self.selection = self
            .questions
            .get(self.current)
            .and_then(|q| self.responses.get(q.id()).copied());
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&'a Q> {
        self.questions.get(self.current)
    }

    pub fn scale(&self) -> LikertScale {
        Q::SCALE
    }

    /// The rating currently shown as selected, if any.
    pub fn selection(&self) -> Option<u8> {
        self.selection
    }

    /// Responses recorded so far.
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current, self.questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Choose a rating for the current question. Nothing is recorded until "next".
    pub fn select(&mut self, value: u8) -> Result<(), CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        if self.current_question().is_none() {
            return Err(CollectorError::Empty);
        }
        if !LikertScale::contains(value) {
            return Err(CollectorError::OutOfRange {
                value: value as usize,
                min: LikertScale::MIN as usize,
                max: LikertScale::MAX as usize,
            });
        }
        self.selection = Some(value);
        Ok(())
    }

    /// Whether "next" is enabled.
    pub fn can_advance(&self) -> bool {
        !self.completed && self.selection.is_some() && self.current < self.questions.len()
    }

    /// Record the current selection and move on, or complete on the last question.
    pub fn next(&mut self) -> Result<Advance, CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        let question = self.questions.get(self.current).ok_or(CollectorError::Empty)?;
        let value = self.selection.ok_or_else(|| CollectorError::NoSelection {
            question_id: question.id().to_string(),
        })?;

        self.responses.insert(question.id().to_string(), value);
        tracing::debug!(question = question.id(), value, "recorded response");

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.redisplay();
            Ok(Advance::Moved(self.current))
        } else {
            self.completed = true;
            tracing::debug!(answered = self.responses.len(), "section complete");
            Ok(Advance::Complete(self.responses.clone()))
        }
    }

    /// Step back one question, keeping every recorded response.
    pub fn previous(&mut self) -> Result<usize, CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        self.current = self.current.saturating_sub(1);
        self.redisplay();
        Ok(self.current)
    }
}

impl LikertCollector<'_, WiscarQuestion> {
    /// Answered/total counts per WISCAR category.
    pub fn category_progress(&self) -> Vec<CategoryProgress> {
        wiscar_progress(self.questions, &self.responses)
    }
}

// ---------------------------------------------------------------------------
// Graded collector
// ---------------------------------------------------------------------------

/// How an option should be highlighted once feedback is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    /// The answer-key option.
    Correct,
    /// The user's selection, when it is wrong.
    Incorrect,
    Neutral,
}

/// Inline feedback for a graded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub question_id: String,
    pub selected: usize,
    pub correct: usize,
    pub grade: u8,
    pub explanation: String,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        self.grade == 1
    }

    pub fn mark(&self, option: usize) -> OptionMark {
        if option == self.correct {
            OptionMark::Correct
        } else if option == self.selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }
}

/// Collector for the multiple-choice technical set.
#[derive(Debug, Clone)]
pub struct GradedCollector<'a> {
    questions: &'a [TechnicalQuestion],
    current: usize,
    responses: ResponseMap,
    /// Raw option indices, kept only to re-display choices on backward navigation.
    selections: HashMap<String, usize>,
    selection: Option<usize>,
    feedback: Option<Feedback>,
    completed: bool,
}

impl<'a> GradedCollector<'a> {
    /// Start at question 0 with previously captured grades.
    ///
    /// Grades do not reveal which option was chosen, so questions carried in
    /// `initial` start without a selection and must be answered again to advance.
    pub fn new(questions: &'a [TechnicalQuestion], initial: ResponseMap) -> Self {
        Self {
            questions,
            current: 0,
            responses: initial,
            selections: HashMap::new(),
            selection: None,
            feedback: None,
            completed: false,
        }
    }

    fn redisplay(&mut self) {
        self.feedback = None;
        self.selection = self
            .questions
            .get(self.current)
            .and_then(|q| self.selections.get(&q.id).copied());
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&'a TechnicalQuestion> {
        self.questions.get(self.current)
    }

    /// Zero-based option index currently selected, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Feedback for the current question once it has been submitted.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Grades recorded so far.
    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current, self.questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Choose an option for the current question. Disabled once graded.
    pub fn select(&mut self, option: usize) -> Result<(), CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        let question = self.questions.get(self.current).ok_or(CollectorError::Empty)?;
        if self.feedback.is_some() {
            return Err(CollectorError::Locked {
                question_id: question.id.clone(),
            });
        }
        if option >= question.options.len() {
            return Err(CollectorError::OutOfRange {
                value: option,
                min: 0,
                max: question.options.len().saturating_sub(1),
            });
        }
        self.selection = Some(option);
        Ok(())
    }

    /// Whether "submit" is enabled.
    pub fn can_submit(&self) -> bool {
        !self.completed && self.feedback.is_none() && self.selection.is_some()
    }

    /// Grade the current selection, record the grade and lock the question.
    ///
    /// Submitting again before moving on returns the same feedback.
    pub fn submit(&mut self) -> Result<Feedback, CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        if let Some(feedback) = &self.feedback {
            return Ok(feedback.clone());
        }
        let question = self.questions.get(self.current).ok_or(CollectorError::Empty)?;
        let selected = self.selection.ok_or_else(|| CollectorError::NoSelection {
            question_id: question.id.clone(),
        })?;

        let graded = grade(selected, question.correct);
        self.responses.insert(question.id.clone(), graded);
        self.selections.insert(question.id.clone(), selected);
        tracing::debug!(question = %question.id, selected, grade = graded, "graded answer");

        let feedback = Feedback {
            question_id: question.id.clone(),
            selected,
            correct: question.correct,
            grade: graded,
            explanation: question.explanation.clone(),
        };
        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Whether "next" is enabled: only after the current answer was graded.
    pub fn can_advance(&self) -> bool {
        !self.completed && self.feedback.is_some()
    }

    /// Move past a graded question, or complete on the last one.
    pub fn next(&mut self) -> Result<Advance, CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        let question = self.questions.get(self.current).ok_or(CollectorError::Empty)?;
        if self.feedback.is_none() {
            return Err(CollectorError::NotSubmitted {
                question_id: question.id.clone(),
            });
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.redisplay();
            Ok(Advance::Moved(self.current))
        } else {
            self.completed = true;
            tracing::debug!(answered = self.responses.len(), "section complete");
            Ok(Advance::Complete(self.responses.clone()))
        }
    }

    /// Step back one question. Feedback is cleared and the earlier choice re-displayed.
    pub fn previous(&mut self) -> Result<usize, CollectorError> {
        if self.completed {
            return Err(CollectorError::Completed);
        }
        self.current = self.current.saturating_sub(1);
        self.redisplay();
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Dimension, PsychometricQuestion, WiscarCategory, WiscarKind};

    fn likert_set(n: usize) -> Vec<PsychometricQuestion> {
        (0..n)
            .map(|i| PsychometricQuestion {
                id: format!("p{i}"),
                category: "Openness".into(),
                prompt: format!("Statement {i}"),
                dimension: Dimension::ALL[i % Dimension::ALL.len()],
            })
            .collect()
    }

    fn technical_set() -> Vec<TechnicalQuestion> {
        (0..3)
            .map(|i| TechnicalQuestion {
                id: format!("t{i}"),
                category: "Statistics".into(),
                difficulty: Difficulty::Basic,
                prompt: format!("Question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct: 1,
                explanation: format!("because {i}"),
            })
            .collect()
    }

    #[test]
    fn next_is_disabled_without_selection() {
        let questions = likert_set(3);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        assert!(!collector.can_advance());
        let err = collector.next().unwrap_err();
        assert_eq!(
            err,
            CollectorError::NoSelection {
                question_id: "p0".into()
            }
        );
        assert_eq!(collector.current_index(), 0);
        assert!(collector.responses().is_empty());
    }

    #[test]
    fn select_rejects_off_scale_values() {
        let questions = likert_set(1);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        assert!(matches!(
            collector.select(0),
            Err(CollectorError::OutOfRange { .. })
        ));
        assert!(collector.select(6).is_err());
        assert_eq!(collector.selection(), None);
    }

    #[test]
    fn completes_exactly_once() {
        let questions = likert_set(3);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        let mut completions = 0;
        for value in [3, 4, 5] {
            collector.select(value).unwrap();
            match collector.next().unwrap() {
                Advance::Moved(_) => {}
                Advance::Complete(responses) => {
                    completions += 1;
                    assert_eq!(responses.len(), 3);
                    assert_eq!(responses["p2"], 5);
                }
            }
        }
        assert_eq!(completions, 1);
        assert!(collector.is_complete());
        assert_eq!(collector.next(), Err(CollectorError::Completed));
        assert_eq!(collector.previous(), Err(CollectorError::Completed));
    }

    #[test]
    fn partial_traversal_never_completes() {
        let questions = likert_set(3);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        collector.select(2).unwrap();
        assert_eq!(collector.next().unwrap(), Advance::Moved(1));
        collector.select(2).unwrap();
        assert_eq!(collector.next().unwrap(), Advance::Moved(2));
        assert!(!collector.is_complete());
    }

    #[test]
    fn previous_preserves_and_redisplays_responses() {
        let questions = likert_set(3);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        collector.select(4).unwrap();
        collector.next().unwrap();
        assert_eq!(collector.selection(), None);
        collector.select(2).unwrap();
        collector.next().unwrap();

        assert_eq!(collector.previous().unwrap(), 1);
        assert_eq!(collector.selection(), Some(2));
        assert_eq!(collector.previous().unwrap(), 0);
        assert_eq!(collector.selection(), Some(4));
        // clamped at the first question
        assert_eq!(collector.previous().unwrap(), 0);
        assert_eq!(collector.responses()["p0"], 4);
        assert_eq!(collector.responses()["p1"], 2);
    }

    #[test]
    fn overwrite_before_completion() {
        let questions = likert_set(2);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        collector.select(1).unwrap();
        collector.next().unwrap();
        collector.previous().unwrap();
        collector.select(5).unwrap();
        collector.next().unwrap();
        collector.select(3).unwrap();
        let Advance::Complete(responses) = collector.next().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(responses["p0"], 5);
    }

    #[test]
    fn initial_data_prepopulates_selection() {
        let questions = likert_set(2);
        let mut initial = ResponseMap::new();
        initial.insert("p0".into(), 4);
        initial.insert("p1".into(), 2);
        let mut collector = LikertCollector::new(&questions, initial);
        assert_eq!(collector.selection(), Some(4));
        assert!(collector.can_advance());
        collector.next().unwrap();
        assert_eq!(collector.selection(), Some(2));
        assert!(matches!(collector.next().unwrap(), Advance::Complete(_)));
    }

    #[test]
    fn initial_data_drops_off_scale_and_foreign_entries() {
        let questions = likert_set(2);
        let mut initial = ResponseMap::new();
        initial.insert("p0".into(), 9);
        initial.insert("p1".into(), 3);
        initial.insert("elsewhere".into(), 4);
        let mut collector = LikertCollector::new(&questions, initial);

        assert_eq!(collector.selection(), None);
        assert!(!collector.can_advance());
        assert_eq!(collector.responses().len(), 1);
        assert_eq!(collector.responses()["p1"], 3);
        assert!(matches!(
            collector.next(),
            Err(CollectorError::NoSelection { .. })
        ));

        collector.select(2).unwrap();
        collector.next().unwrap();
        let Advance::Complete(responses) = collector.next().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(responses.len(), 2);
        assert_eq!(responses["p0"], 2);
    }

    #[test]
    fn progress_is_one_based() {
        let questions = likert_set(4);
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        assert_eq!(collector.progress_percent(), 25.0);
        collector.select(3).unwrap();
        collector.next().unwrap();
        assert_eq!(collector.progress_percent(), 50.0);
    }

    #[test]
    fn empty_set_cannot_advance() {
        let questions: Vec<PsychometricQuestion> = Vec::new();
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        assert!(collector.current_question().is_none());
        assert_eq!(collector.select(3), Err(CollectorError::Empty));
        assert_eq!(collector.selection(), None);
        assert!(!collector.can_advance());
        assert_eq!(collector.next(), Err(CollectorError::Empty));
    }

    #[test]
    fn wiscar_category_progress_tracks_answers() {
        let questions: Vec<WiscarQuestion> = [WiscarCategory::Will, WiscarCategory::Will]
            .iter()
            .enumerate()
            .map(|(i, &category)| WiscarQuestion {
                id: format!("w{i}"),
                category,
                prompt: "?".into(),
                kind: WiscarKind::Scenario,
            })
            .collect();
        let mut collector = LikertCollector::new(&questions, ResponseMap::new());
        assert_eq!(collector.scale().labels[0], "Very Low/Not at all");
        collector.select(5).unwrap();
        collector.next().unwrap();
        let progress = collector.category_progress();
        assert_eq!(progress.len(), 1);
        assert_eq!((progress[0].answered, progress[0].total), (1, 2));
    }

    #[test]
    fn graded_submit_records_grade_not_index() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        collector.select(2).unwrap();
        let feedback = collector.submit().unwrap();
        assert!(!feedback.is_correct());
        assert_eq!(feedback.explanation, "because 0");
        assert_eq!(collector.responses()["t0"], 0);
        assert_eq!(feedback.mark(1), OptionMark::Correct);
        assert_eq!(feedback.mark(2), OptionMark::Incorrect);
        assert_eq!(feedback.mark(0), OptionMark::Neutral);
    }

    #[test]
    fn graded_resubmission_is_idempotent() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        collector.select(1).unwrap();
        let first = collector.submit().unwrap();
        let second = collector.submit().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.grade, 1);
        assert_eq!(collector.responses().len(), 1);
    }

    #[test]
    fn graded_question_is_locked_until_advance() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        assert!(!collector.can_submit());
        collector.select(0).unwrap();
        assert!(!collector.can_advance());
        assert!(matches!(
            collector.next(),
            Err(CollectorError::NotSubmitted { .. })
        ));
        collector.submit().unwrap();
        assert!(matches!(
            collector.select(1),
            Err(CollectorError::Locked { .. })
        ));
        assert_eq!(collector.selection(), Some(0));
        assert_eq!(collector.next().unwrap(), Advance::Moved(1));
        assert!(collector.feedback().is_none());
        collector.select(1).unwrap();
    }

    #[test]
    fn graded_select_rejects_unknown_option() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        assert_eq!(
            collector.select(4),
            Err(CollectorError::OutOfRange {
                value: 4,
                min: 0,
                max: 3
            })
        );
    }

    #[test]
    fn graded_previous_redisplays_earlier_selection() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        collector.select(3).unwrap();
        collector.submit().unwrap();
        collector.next().unwrap();
        collector.select(1).unwrap();
        collector.submit().unwrap();
        collector.next().unwrap();

        collector.previous().unwrap();
        assert_eq!(collector.selection(), Some(1));
        assert!(collector.feedback().is_none());
        collector.previous().unwrap();
        assert_eq!(collector.selection(), Some(3));
        assert_eq!(collector.responses()["t0"], 0);
    }

    #[test]
    fn graded_full_pass_completes_once() {
        let questions = technical_set();
        let mut collector = GradedCollector::new(&questions, ResponseMap::new());
        let mut completed = None;
        for option in [1, 1, 0] {
            collector.select(option).unwrap();
            collector.submit().unwrap();
            if let Advance::Complete(responses) = collector.next().unwrap() {
                assert!(completed.is_none());
                completed = Some(responses);
            }
        }
        let responses = completed.expect("section should complete");
        let score = crate::scoring::technical_score(&responses);
        assert!((score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(collector.submit(), Err(CollectorError::Completed));
    }

    #[test]
    fn graded_initial_grades_require_reanswer() {
        let questions = technical_set();
        let mut initial = ResponseMap::new();
        initial.insert("t0".into(), 1);
        let mut collector = GradedCollector::new(&questions, initial);
        assert_eq!(collector.selection(), None);
        assert!(!collector.can_advance());
        assert_eq!(collector.responses()["t0"], 1);
        collector.select(0).unwrap();
        collector.submit().unwrap();
        assert_eq!(collector.responses()["t0"], 0);
    }
}
