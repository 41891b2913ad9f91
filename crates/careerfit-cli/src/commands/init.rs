//! The `careerfit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("careerfit.toml").exists() {
        println!("careerfit.toml already exists, skipping.");
    } else {
        std::fs::write("careerfit.toml", SAMPLE_CONFIG)?;
        println!("Created careerfit.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml with your own questions");
    println!("  2. Run: careerfit validate --bank banks/example.toml");
    println!("  3. Run: careerfit take --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# careerfit configuration

# Question bank to use; the built-in Clinical Data Analyst bank when unset.
# CAREERFIT_BANK overrides this value.
# bank = "banks/example.toml"

# Where `--save` writes reports.
output_dir = "./careerfit-results"

# Report formats: json, html, markdown
formats = ["json"]
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
title = "Example Career Fit Assessment"
role = "Data Analyst"
description = "A small example bank to get started"

[intro]
summary = "Data analysts turn raw data into answers for the rest of the business."
success_traits = ["Curiosity", "Attention to detail"]

[[intro.career_paths]]
title = "Junior Data Analyst"
level = "Entry"
salary = "$50k-$65k"
description = "Prepares reports and cleans data under supervision"

[[psychometric]]
id = "detail"
category = "Work Style"
prompt = "I notice small inconsistencies in data that others miss."
dimension = "attention_to_detail"

[[psychometric]]
id = "puzzles"
category = "Cognition"
prompt = "I enjoy breaking complex problems into smaller parts."
dimension = "analytical_mindset"

[[technical]]
id = "median"
category = "Statistics"
difficulty = "basic"
prompt = "What is the median of 1, 3, 3, 6, 7?"
options = ["3", "4", "6", "7"]
correct = 0
explanation = "The median is the middle value of the sorted list."

[[technical]]
id = "join"
category = "SQL"
difficulty = "intermediate"
prompt = "Which join keeps every row from the left table?"
options = ["INNER JOIN", "LEFT JOIN", "CROSS JOIN"]
correct = 1
explanation = "A LEFT JOIN keeps all left rows and fills missing matches with NULL."

[[wiscar]]
id = "will"
category = "Will"
prompt = "I keep going when a dataset takes days to clean."
kind = "commitment"

[[wiscar]]
id = "interest"
category = "Interest"
prompt = "I read about data topics in my free time."
kind = "interest"

[[wiscar]]
id = "skill"
category = "Skill"
prompt = "How would you rate your spreadsheet skills?"
kind = "self_assessment"

[[wiscar]]
id = "cognitive"
category = "Cognitive Readiness"
prompt = "A chart contradicts last month's numbers. How confident are you in tracing why?"
kind = "scenario"

[[wiscar]]
id = "learning"
category = "Ability to Learn"
prompt = "I pick up new tools quickly from documentation."
kind = "self_assessment"

[[wiscar]]
id = "alignment"
category = "Real-World Alignment"
prompt = "I would enjoy spending most of my day at a desk analyzing numbers."
kind = "preference"

[recommendations.strong]
headline = "Strong Fit!"
summary = "Your answers line up well with day-to-day analyst work."
plan_title = "Next Steps"

[[recommendations.strong.steps]]
title = "Build a portfolio"
items = ["Publish two small analyses", "Apply for junior roles"]

[recommendations.moderate]
headline = "Moderate Fit"
summary = "You have a foundation to build on."
plan_title = "Development Plan"

[[recommendations.moderate.steps]]
title = "Strengthen the basics"
items = ["Take an introductory SQL course", "Practice with public datasets"]

[recommendations.low]
headline = "Consider Alternative Paths"
summary = "Other roles may suit your profile better."
plan_title = "Alternative Paths"

[[recommendations.low.steps]]
title = "Related roles"
items = ["Business Operations Associate", "Customer Success Specialist"]

[resources]
certifications = ["Google Data Analytics Certificate"]
skills = ["SQL", "Spreadsheets", "Descriptive statistics"]
"#;
