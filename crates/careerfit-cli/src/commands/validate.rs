//! The `careerfit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use careerfit_core::model::Section;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        careerfit_core::parser::load_bank_directory(&bank_path)?
    } else {
        vec![careerfit_core::parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        let counts = Section::ALL
            .iter()
            .map(|s| format!("{} {s}", bank.section_len(*s)))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Question bank: {} ({counts})", bank.title);

        let warnings = careerfit_core::parser::validate_bank(bank);
        for w in &warnings {
            let prefix = match (&w.section, &w.question_id) {
                (Some(section), Some(id)) => format!("  [{section}/{id}]"),
                (Some(section), None) => format!("  [{section}]"),
                _ => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
