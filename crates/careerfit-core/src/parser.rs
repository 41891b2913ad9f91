//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Intro, LearningResources, PsychometricQuestion, QuestionBank, Recommendations, Section,
    TechnicalQuestion, WiscarCategory, WiscarQuestion,
};

/// The Clinical Data Analyst bank, compiled into the binary.
pub const BUILTIN_BANK: &str = include_str!("../banks/clinical-data-analyst.toml");

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    intro: Intro,
    #[serde(default)]
    psychometric: Vec<PsychometricQuestion>,
    #[serde(default)]
    technical: Vec<TechnicalQuestion>,
    #[serde(default)]
    wiscar: Vec<WiscarQuestion>,
    #[serde(default)]
    recommendations: Recommendations,
    #[serde(default)]
    resources: LearningResources,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    title: String,
    role: String,
    #[serde(default)]
    description: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        title: parsed.bank.title,
        role: parsed.bank.role,
        description: parsed.bank.description,
        intro: parsed.intro,
        psychometric: parsed.psychometric,
        technical: parsed.technical,
        wiscar: parsed.wiscar,
        recommendations: parsed.recommendations,
        resources: parsed.resources,
    })
}

/// The bank shipped with careerfit.
pub fn builtin_bank() -> Result<QuestionBank> {
    parse_bank_str(BUILTIN_BANK, Path::new("<builtin>/clinical-data-analyst.toml"))
}

/// Load the bank at `path`, or the built-in bank when no path is given.
pub fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(p) => parse_bank(p),
        None => builtin_bank(),
    }
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The section (if applicable).
    pub section: Option<Section>,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(section: Section, question_id: &str, message: impl Into<String>) -> Self {
        Self {
            section: Some(section),
            question_id: Some(question_id.to_string()),
            message: message.into(),
        }
    }

    fn section(section: Section, message: impl Into<String>) -> Self {
        Self {
            section: Some(section),
            question_id: None,
            message: message.into(),
        }
    }
}

fn check_ids_and_prompts<'a>(
    section: Section,
    items: impl Iterator<Item = (&'a str, &'a str)>,
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut seen_ids = HashSet::new();
    let mut count = 0usize;
    for (id, prompt) in items {
        count += 1;
        if !seen_ids.insert(id) {
            warnings.push(ValidationWarning::question(
                section,
                id,
                format!("duplicate question ID: {id}"),
            ));
        }
        if prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(section, id, "prompt is empty"));
        }
    }
    if count == 0 {
        warnings.push(ValidationWarning::section(section, "section has no questions"));
    }
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    check_ids_and_prompts(
        Section::Psychometric,
        bank.psychometric.iter().map(|q| (q.id.as_str(), q.prompt.as_str())),
        &mut warnings,
    );
    check_ids_and_prompts(
        Section::Technical,
        bank.technical.iter().map(|q| (q.id.as_str(), q.prompt.as_str())),
        &mut warnings,
    );
    check_ids_and_prompts(
        Section::Wiscar,
        bank.wiscar.iter().map(|q| (q.id.as_str(), q.prompt.as_str())),
        &mut warnings,
    );

    // Each trait dimension should be probed once
    let mut seen_dimensions = HashSet::new();
    for q in &bank.psychometric {
        if !seen_dimensions.insert(q.dimension) {
            warnings.push(ValidationWarning::question(
                Section::Psychometric,
                &q.id,
                format!("dimension {} is probed by more than one question", q.dimension),
            ));
        }
    }

    // Answer key must point at a real option
    for q in &bank.technical {
        if q.options.len() < 2 {
            warnings.push(ValidationWarning::question(
                Section::Technical,
                &q.id,
                "fewer than two answer options",
            ));
        }
        if q.correct >= q.options.len() {
            warnings.push(ValidationWarning::question(
                Section::Technical,
                &q.id,
                format!(
                    "correct index {} is out of range for {} options",
                    q.correct,
                    q.options.len()
                ),
            ));
        }
        if q.explanation.trim().is_empty() {
            warnings.push(ValidationWarning::question(
                Section::Technical,
                &q.id,
                "no explanation provided for feedback",
            ));
        }
    }

    // WISCAR categories are weighted by question count, so counts should match
    if !bank.wiscar.is_empty() {
        let mut per_category: BTreeMap<WiscarCategory, usize> = BTreeMap::new();
        for q in &bank.wiscar {
            *per_category.entry(q.category).or_default() += 1;
        }
        for category in WiscarCategory::ALL {
            if !per_category.contains_key(&category) {
                warnings.push(ValidationWarning::section(
                    Section::Wiscar,
                    format!("category {category} has no questions"),
                ));
            }
        }
        let counts: HashSet<usize> = per_category.values().copied().collect();
        if counts.len() > 1 {
            let detail = per_category
                .iter()
                .map(|(c, n)| format!("{c}={n}"))
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(ValidationWarning::section(
                Section::Wiscar,
                format!("categories have unequal question counts ({detail})"),
            ));
        }
    }

    // Every tier needs copy to show
    for (tier, content) in [
        ("strong", &bank.recommendations.strong),
        ("moderate", &bank.recommendations.moderate),
        ("low", &bank.recommendations.low),
    ] {
        if content.is_empty() {
            warnings.push(ValidationWarning {
                section: None,
                question_id: None,
                message: format!("no recommendation content for the {tier} tier"),
            });
        }
    }

    warnings
}
