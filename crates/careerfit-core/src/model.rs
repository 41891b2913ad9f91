//! Core data model types for careerfit.
//!
//! A [`QuestionBank`] bundles the three question sets (psychometric,
//! technical, WISCAR) together with the copy shown around them: intro
//! content, per-tier recommendations and learning resources.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Question id → numeric response.
///
/// Likert sets store the rating (1–5); the technical set stores the grade
/// (0 or 1), never the selected option index.
pub type ResponseMap = BTreeMap<String, u8>;

/// One of the three scored sections of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Psychometric,
    Technical,
    Wiscar,
}

impl Section {
    /// All scored sections, in the order the host flow presents them.
    pub const ALL: [Section; 3] = [Section::Psychometric, Section::Technical, Section::Wiscar];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Psychometric => "Psychological Fit",
            Section::Technical => "Technical Readiness",
            Section::Wiscar => "Career Alignment",
        }
    }

    /// Short blurb shown next to the section's score.
    pub fn blurb(&self) -> &'static str {
        match self {
            Section::Psychometric => {
                "Measures personality traits, work preferences, and behavioral tendencies aligned with the role."
            }
            Section::Technical => {
                "Evaluates current knowledge in the domain, its statistics, data management, and regulatory compliance."
            }
            Section::Wiscar => {
                "WISCAR framework assessment of motivation, learning ability, and real-world job alignment."
            }
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Psychometric => write!(f, "psychometric"),
            Section::Technical => write!(f, "technical"),
            Section::Wiscar => write!(f, "wiscar"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "psychometric" | "psych" => Ok(Section::Psychometric),
            "technical" | "tech" => Ok(Section::Technical),
            "wiscar" | "career" => Ok(Section::Wiscar),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Question trait
// ---------------------------------------------------------------------------

/// Common read-only view over every question kind.
pub trait Question {
    /// Unique identifier within its set.
    fn id(&self) -> &str;
    /// Category label shown alongside the question number.
    fn category(&self) -> &str;
    /// The text put to the user.
    fn prompt(&self) -> &str;
}

/// A question answered on a fixed five-point scale.
pub trait LikertItem: Question {
    /// Labels for ratings 1 through 5.
    const SCALE: LikertScale;
}

/// Labels for the five points of a Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikertScale {
    pub labels: [&'static str; 5],
}

impl LikertScale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Label for a rating, or `None` when the rating is off the scale.
    pub fn label(&self, value: u8) -> Option<&'static str> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(self.labels[(value - Self::MIN) as usize])
        } else {
            None
        }
    }

    pub fn contains(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

pub const AGREEMENT_SCALE: LikertScale = LikertScale {
    labels: [
        "Strongly Disagree",
        "Disagree",
        "Neutral",
        "Agree",
        "Strongly Agree",
    ],
};

pub const INTENSITY_SCALE: LikertScale = LikertScale {
    labels: [
        "Very Low/Not at all",
        "Low/Slightly",
        "Moderate/Somewhat",
        "High/Very much",
        "Very High/Extremely",
    ],
};

// ---------------------------------------------------------------------------
// Psychometric
// ---------------------------------------------------------------------------

/// Personal-trait dimension a psychometric question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    AttentionToDetail,
    StructurePreference,
    AnalyticalMindset,
    DomainInterest,
    ComplianceOrientation,
    QualityFocus,
    PatternSkills,
    TaskPersistence,
    Collaboration,
    ContinuousLearning,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::AttentionToDetail,
        Dimension::StructurePreference,
        Dimension::AnalyticalMindset,
        Dimension::DomainInterest,
        Dimension::ComplianceOrientation,
        Dimension::QualityFocus,
        Dimension::PatternSkills,
        Dimension::TaskPersistence,
        Dimension::Collaboration,
        Dimension::ContinuousLearning,
    ];

    /// Declared importance of the dimension.
    ///
    /// Shown next to questions for reference only: the psychometric score is
    /// an unweighted mean and does not read these values.
    pub fn declared_weight(&self) -> f64 {
        match self {
            Dimension::AttentionToDetail => 1.2,
            Dimension::StructurePreference => 1.1,
            Dimension::AnalyticalMindset => 1.3,
            Dimension::DomainInterest => 1.0,
            Dimension::ComplianceOrientation => 1.2,
            Dimension::QualityFocus => 1.3,
            Dimension::PatternSkills => 1.1,
            Dimension::TaskPersistence => 1.1,
            Dimension::Collaboration => 0.9,
            Dimension::ContinuousLearning => 1.0,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dimension::AttentionToDetail => "attention_to_detail",
            Dimension::StructurePreference => "structure_preference",
            Dimension::AnalyticalMindset => "analytical_mindset",
            Dimension::DomainInterest => "domain_interest",
            Dimension::ComplianceOrientation => "compliance_orientation",
            Dimension::QualityFocus => "quality_focus",
            Dimension::PatternSkills => "pattern_skills",
            Dimension::TaskPersistence => "task_persistence",
            Dimension::Collaboration => "collaboration",
            Dimension::ContinuousLearning => "continuous_learning",
        };
        f.write_str(s)
    }
}

/// A Likert statement about work style or personality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychometricQuestion {
    pub id: String,
    pub category: String,
    pub prompt: String,
    pub dimension: Dimension,
}

impl Question for PsychometricQuestion {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl LikertItem for PsychometricQuestion {
    const SCALE: LikertScale = AGREEMENT_SCALE;
}

// ---------------------------------------------------------------------------
// Technical
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Basic => write!(f, "Basic"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// A multiple-choice question graded against an answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    pub id: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct: usize,
    /// Shown as feedback once the answer is submitted.
    #[serde(default)]
    pub explanation: String,
}

impl Question for TechnicalQuestion {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn prompt(&self) -> &str {
        &self.prompt
    }
}

// ---------------------------------------------------------------------------
// WISCAR
// ---------------------------------------------------------------------------

/// The six WISCAR categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WiscarCategory {
    Will,
    Interest,
    Skill,
    #[serde(rename = "Cognitive Readiness")]
    CognitiveReadiness,
    #[serde(rename = "Ability to Learn")]
    AbilityToLearn,
    #[serde(rename = "Real-World Alignment")]
    RealWorldAlignment,
}

impl WiscarCategory {
    pub const ALL: [WiscarCategory; 6] = [
        WiscarCategory::Will,
        WiscarCategory::Interest,
        WiscarCategory::Skill,
        WiscarCategory::CognitiveReadiness,
        WiscarCategory::AbilityToLearn,
        WiscarCategory::RealWorldAlignment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WiscarCategory::Will => "Will",
            WiscarCategory::Interest => "Interest",
            WiscarCategory::Skill => "Skill",
            WiscarCategory::CognitiveReadiness => "Cognitive Readiness",
            WiscarCategory::AbilityToLearn => "Ability to Learn",
            WiscarCategory::RealWorldAlignment => "Real-World Alignment",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WiscarCategory::Will => "🎯",
            WiscarCategory::Interest => "🧠",
            WiscarCategory::Skill => "⚡",
            WiscarCategory::CognitiveReadiness => "🔍",
            WiscarCategory::AbilityToLearn => "📚",
            WiscarCategory::RealWorldAlignment => "🌍",
        }
    }
}

impl fmt::Display for WiscarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiscarKind {
    Scenario,
    Interest,
    SelfAssessment,
    Preference,
    Commitment,
}

/// A career-alignment question rated on the intensity scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiscarQuestion {
    pub id: String,
    pub category: WiscarCategory,
    pub prompt: String,
    pub kind: WiscarKind,
}

impl Question for WiscarQuestion {
    fn id(&self) -> &str {
        &self.id
    }
    fn category(&self) -> &str {
        self.category.label()
    }
    fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl LikertItem for WiscarQuestion {
    const SCALE: LikertScale = INTENSITY_SCALE;
}

/// Answered/total counts for one WISCAR category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category: WiscarCategory,
    pub answered: usize,
    pub total: usize,
}

/// Per-category progress over a WISCAR set, in canonical category order.
///
/// Categories with no questions are omitted.
pub fn wiscar_progress(questions: &[WiscarQuestion], responses: &ResponseMap) -> Vec<CategoryProgress> {
    WiscarCategory::ALL
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<&WiscarQuestion> =
                questions.iter().filter(|q| q.category == category).collect();
            if in_category.is_empty() {
                return None;
            }
            let answered = in_category
                .iter()
                .filter(|q| responses.contains_key(&q.id))
                .count();
            Some(CategoryProgress {
                category,
                answered,
                total: in_category.len(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bank
// ---------------------------------------------------------------------------

/// A career path shown on the intro stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
}

/// Copy shown before the first section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intro {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub career_paths: Vec<CareerPath>,
    #[serde(default)]
    pub success_traits: Vec<String>,
}

/// A titled list of suggested next steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Fixed recommendation copy for one tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierContent {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub plan_title: String,
    #[serde(default)]
    pub steps: Vec<StepGroup>,
}

impl TierContent {
    pub fn is_empty(&self) -> bool {
        self.headline.trim().is_empty() && self.summary.trim().is_empty() && self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub strong: TierContent,
    #[serde(default)]
    pub moderate: TierContent,
    #[serde(default)]
    pub low: TierContent,
}

/// Learning resources shown regardless of tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningResources {
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A complete assessment definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub title: String,
    /// The career the assessment measures fit for.
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub intro: Intro,
    #[serde(default)]
    pub psychometric: Vec<PsychometricQuestion>,
    #[serde(default)]
    pub technical: Vec<TechnicalQuestion>,
    #[serde(default)]
    pub wiscar: Vec<WiscarQuestion>,
    #[serde(default)]
    pub recommendations: Recommendations,
    #[serde(default)]
    pub resources: LearningResources,
}

impl QuestionBank {
    /// Question ids of a section, in presentation order.
    pub fn question_ids(&self, section: Section) -> Vec<&str> {
        match section {
            Section::Psychometric => self.psychometric.iter().map(|q| q.id()).collect(),
            Section::Technical => self.technical.iter().map(|q| q.id()).collect(),
            Section::Wiscar => self.wiscar.iter().map(|q| q.id()).collect(),
        }
    }

    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Psychometric => self.psychometric.len(),
            Section::Technical => self.technical.len(),
            Section::Wiscar => self.wiscar.len(),
        }
    }

    pub fn total_questions(&self) -> usize {
        Section::ALL.iter().map(|s| self.section_len(*s)).sum()
    }
}
