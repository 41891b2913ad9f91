//! The `careerfit show` command: print the questions of a bank.

use std::path::PathBuf;

use anyhow::Result;

use careerfit_core::model::{LikertItem, PsychometricQuestion, QuestionBank, Section, WiscarQuestion};
use careerfit_core::parser::load_bank;

use crate::config::load_config_from;

pub fn execute(
    bank_path: Option<PathBuf>,
    section: Option<Section>,
    reveal: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_bank(config.bank_path(bank_path).as_deref())?;

    println!("{} ({})", bank.title, bank.id);
    if !bank.description.is_empty() {
        println!("{}", bank.description);
    }

    let sections: Vec<Section> = match section {
        Some(s) => vec![s],
        None => Section::ALL.to_vec(),
    };
    for s in sections {
        print_section(&bank, s, reveal);
    }
    Ok(())
}

fn print_section(bank: &QuestionBank, section: Section, reveal: bool) {
    println!(
        "\n== {} ({} questions) ==\n{}",
        section.title(),
        bank.section_len(section),
        section.blurb()
    );

    match section {
        Section::Psychometric => {
            print_scale_labels::<PsychometricQuestion>();
            for (i, q) in bank.psychometric.iter().enumerate() {
                println!(
                    "{:>2}. [{}] {} (dimension: {}, weight {:.1})",
                    i + 1,
                    q.category,
                    q.prompt,
                    q.dimension,
                    q.dimension.declared_weight()
                );
            }
        }
        Section::Technical => {
            for (i, q) in bank.technical.iter().enumerate() {
                println!("{:>2}. [{} / {}] {}", i + 1, q.category, q.difficulty, q.prompt);
                for (j, option) in q.options.iter().enumerate() {
                    let marker = if reveal && j == q.correct { '+' } else { ' ' };
                    println!("     {marker} {}) {option}", j + 1);
                }
                if reveal && !q.explanation.is_empty() {
                    println!("       {}", q.explanation);
                }
            }
        }
        Section::Wiscar => {
            print_scale_labels::<WiscarQuestion>();
            for (i, q) in bank.wiscar.iter().enumerate() {
                println!(
                    "{:>2}. {} [{}] {}",
                    i + 1,
                    q.category.icon(),
                    q.category.label(),
                    q.prompt
                );
            }
        }
    }
}

fn print_scale_labels<Q: LikertItem>() {
    let labels = Q::SCALE
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{}={label}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Scale: {labels}");
}
