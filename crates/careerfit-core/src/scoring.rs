//! Section scoring and recommendation tiers.
//!
//! Each scorer maps a completed [`ResponseMap`] to a percentage in `[0, 100]`.
//! An empty map scores 0. The overall score is the unweighted mean of the
//! three section scores and selects one of three [`Tier`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ResponseMap, Section};

/// Top of the Likert scale, used to normalize means to a percentage.
pub const LIKERT_MAX: f64 = 5.0;

/// Flat multiplier applied to the normalized psychometric mean.
pub const PSYCHOMETRIC_BOOST: f64 = 1.1;

/// Overall score at or above which the tier is [`Tier::Strong`].
pub const STRONG_THRESHOLD: f64 = 75.0;

/// Overall score at or above which the tier is at least [`Tier::Moderate`].
pub const MODERATE_THRESHOLD: f64 = 60.0;

fn mean(responses: &ResponseMap) -> Option<f64> {
    if responses.is_empty() {
        return None;
    }
    let sum: f64 = responses.values().map(|&v| v as f64).sum();
    Some(sum / responses.len() as f64)
}

/// Psychological-fit score.
///
/// Unweighted mean of the 1–5 ratings, normalized to 0–100, boosted by
/// [`PSYCHOMETRIC_BOOST`] and capped at 100. Dimension weights are not applied.
pub fn psychometric_score(responses: &ResponseMap) -> f64 {
    match mean(responses) {
        Some(avg) => ((avg / LIKERT_MAX) * 100.0 * PSYCHOMETRIC_BOOST).min(100.0),
        None => 0.0,
    }
}

/// Technical-readiness score: percent of questions answered correctly.
pub fn technical_score(responses: &ResponseMap) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let correct: f64 = responses.values().map(|&v| v as f64).sum();
    (correct / responses.len() as f64) * 100.0
}

/// Career-alignment score: unweighted mean of the 1–5 ratings, normalized to 0–100.
pub fn wiscar_score(responses: &ResponseMap) -> f64 {
    match mean(responses) {
        Some(avg) => (avg / LIKERT_MAX) * 100.0,
        None => 0.0,
    }
}

/// Grade a multiple-choice answer: 1 if the selection is the correct option, else 0.
pub fn grade(selected: usize, correct: usize) -> u8 {
    u8::from(selected == correct)
}

/// A score as displayed: a whole percent, with halves rounded up.
pub fn whole_percent(score: f64) -> String {
    format!("{}%", score.round() as i64)
}

/// The three section scores of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub psychometric: f64,
    pub technical: f64,
    pub wiscar: f64,
}

impl SectionScores {
    pub fn compute(psychometric: &ResponseMap, technical: &ResponseMap, wiscar: &ResponseMap) -> Self {
        let scores = Self {
            psychometric: psychometric_score(psychometric),
            technical: technical_score(technical),
            wiscar: wiscar_score(wiscar),
        };
        tracing::debug!(
            psychometric = scores.psychometric,
            technical = scores.technical,
            wiscar = scores.wiscar,
            "computed section scores"
        );
        scores
    }

    pub fn get(&self, section: Section) -> f64 {
        match section {
            Section::Psychometric => self.psychometric,
            Section::Technical => self.technical,
            Section::Wiscar => self.wiscar,
        }
    }

    /// Unweighted mean of the three scores.
    pub fn overall(&self) -> f64 {
        (self.psychometric + self.technical + self.wiscar) / 3.0
    }

    pub fn tier(&self) -> Tier {
        Tier::from_overall(self.overall())
    }
}

/// Final recommendation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Strong,
    Moderate,
    Low,
}

impl Tier {
    pub fn from_overall(overall: f64) -> Self {
        if overall >= STRONG_THRESHOLD {
            Tier::Strong
        } else if overall >= MODERATE_THRESHOLD {
            Tier::Moderate
        } else {
            Tier::Low
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Strong => write!(f, "strong"),
            Tier::Moderate => write!(f, "moderate"),
            Tier::Low => write!(f, "low"),
        }
    }
}

/// Recommendation tier for three section scores.
pub fn recommend(psychometric: f64, technical: f64, wiscar: f64) -> Tier {
    SectionScores {
        psychometric,
        technical,
        wiscar,
    }
    .tier()
}

/// Display-only classification of a single section score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Excellent,
    Good,
    Moderate,
    NeedsDevelopment,
}

impl Badge {
    pub fn for_score(score: f64) -> Self {
        if score >= 85.0 {
            Badge::Excellent
        } else if score >= 70.0 {
            Badge::Good
        } else if score >= 55.0 {
            Badge::Moderate
        } else {
            Badge::NeedsDevelopment
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Excellent => "Excellent",
            Badge::Good => "Good",
            Badge::Moderate => "Moderate",
            Badge::NeedsDevelopment => "Needs Development",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
