//! Markdown report generator, suitable for pasting into issues or notes.

use anyhow::Result;
use std::path::Path;

use careerfit_core::report::AssessmentReport;
use careerfit_core::scoring::whole_percent;

/// Generate a Markdown summary of an assessment report.
pub fn generate_markdown(report: &AssessmentReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.bank.title));
    md.push_str(&format!(
        "**Role:** {} | **Taken:** {}\n\n",
        report.bank.role,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str(&format!("## {}\n\n", report.recommendation.headline));
    md.push_str(&format!(
        "**Overall score:** {} ({} fit)\n\n",
        whole_percent(report.overall),
        report.tier
    ));
    if !report.recommendation.summary.is_empty() {
        md.push_str(&report.recommendation.summary);
        md.push_str("\n\n");
    }

    md.push_str("### Section Scores\n\n");
    md.push_str("| Section | Score | Rating |\n");
    md.push_str("|---------|-------|--------|\n");
    for s in &report.sections {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            s.section.title(),
            whole_percent(s.score),
            s.badge
        ));
    }
    md.push('\n');

    if !report.recommendation.steps.is_empty() {
        md.push_str(&format!("### {}\n\n", report.recommendation.plan_title));
        for group in &report.recommendation.steps {
            md.push_str(&format!("**{}**\n\n", group.title));
            for item in &group.items {
                md.push_str(&format!("- {item}\n"));
            }
            md.push('\n');
        }
    }

    let resources = &report.resources;
    if !resources.certifications.is_empty() {
        md.push_str("### Certifications\n\n");
        for c in &resources.certifications {
            md.push_str(&format!("- {c}\n"));
        }
        md.push('\n');
    }
    if !resources.skills.is_empty() {
        md.push_str("### Key Skills to Develop\n\n");
        for s in &resources.skills {
            md.push_str(&format!("- {s}\n"));
        }
        md.push('\n');
    }

    md.push_str(&format!("_Report id: {}_\n", report.id));
    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}
