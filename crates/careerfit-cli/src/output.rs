//! Result printing and report writing shared by `take` and `score`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use careerfit_core::report::AssessmentReport;
use careerfit_core::scoring::whole_percent;
use careerfit_report::html::write_html_report;
use careerfit_report::markdown::write_markdown_report;

use crate::config::CareerfitConfig;

/// A report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
    Markdown,
}

impl ReportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "md",
        }
    }
}

/// Parse a list of format names; `all` expands to every format.
pub fn parse_formats<S: AsRef<str>>(names: &[S]) -> Result<Vec<ReportFormat>> {
    let mut formats = Vec::new();
    for name in names {
        for part in name.as_ref().split(',') {
            let parsed: &[ReportFormat] = match part.trim().to_lowercase().as_str() {
                "json" => &[ReportFormat::Json],
                "html" => &[ReportFormat::Html],
                "markdown" | "md" => &[ReportFormat::Markdown],
                "all" => &[ReportFormat::Json, ReportFormat::Html, ReportFormat::Markdown],
                other => anyhow::bail!("unknown report format: '{other}'"),
            };
            for f in parsed {
                if !formats.contains(f) {
                    formats.push(*f);
                }
            }
        }
    }
    Ok(formats)
}

/// Where and how to save reports, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub dir: PathBuf,
    pub formats: Vec<ReportFormat>,
}

impl SaveOptions {
    /// Reports are saved when `--output` or `--save` is given.
    pub fn resolve(
        config: &CareerfitConfig,
        output: Option<PathBuf>,
        save: bool,
        format: Option<String>,
    ) -> Result<Option<Self>> {
        if output.is_none() && !save {
            return Ok(None);
        }
        let formats = match format {
            Some(f) => parse_formats(&[f])?,
            None => parse_formats(&config.formats)?,
        };
        anyhow::ensure!(!formats.is_empty(), "no report formats selected");
        Ok(Some(Self {
            dir: output.unwrap_or_else(|| config.output_dir.clone()),
            formats,
        }))
    }
}

/// Write the report in each requested format; returns the written paths.
pub fn save_reports(report: &AssessmentReport, options: &SaveOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&options.dir)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let mut written = Vec::new();
    for format in &options.formats {
        let path = options
            .dir
            .join(format!("careerfit-{timestamp}.{}", format.extension()));
        write_report(report, *format, &path)?;
        tracing::info!(path = %path.display(), "report written");
        written.push(path);
    }
    Ok(written)
}

fn write_report(report: &AssessmentReport, format: ReportFormat, path: &Path) -> Result<()> {
    match format {
        ReportFormat::Json => report.save_json(path),
        ReportFormat::Html => write_html_report(report, path),
        ReportFormat::Markdown => write_markdown_report(report, path),
    }
}

/// Print the results screen: tier headline, section table, plan, resources.
pub fn print_results<W: Write>(report: &AssessmentReport, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", report.recommendation.headline)?;
    writeln!(out, "Overall score: {}", whole_percent(report.overall))?;
    if !report.recommendation.summary.is_empty() {
        writeln!(out, "{}", report.recommendation.summary)?;
    }

    let mut table = Table::new();
    table.set_header(vec!["Section", "Score", "Rating", "Answered"]);
    for s in &report.sections {
        table.add_row(vec![
            Cell::new(s.section.title()),
            Cell::new(whole_percent(s.score)),
            Cell::new(s.badge.label()),
            Cell::new(s.answered),
        ]);
    }
    writeln!(out, "\n{table}")?;

    if !report.recommendation.steps.is_empty() {
        writeln!(out, "\n{}", report.recommendation.plan_title)?;
        for group in &report.recommendation.steps {
            writeln!(out, "  {}", group.title)?;
            for item in &group.items {
                writeln!(out, "    - {item}")?;
            }
        }
    }

    let resources = &report.resources;
    if !resources.certifications.is_empty() {
        writeln!(out, "\nCertifications")?;
        for c in &resources.certifications {
            writeln!(out, "  - {c}")?;
        }
    }
    if !resources.skills.is_empty() {
        writeln!(out, "\nKey Skills to Develop")?;
        for s in &resources.skills {
            writeln!(out, "  - {s}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_and_dedupe() {
        assert_eq!(
            parse_formats(&["json,html"]).unwrap(),
            vec![ReportFormat::Json, ReportFormat::Html]
        );
        assert_eq!(parse_formats(&["all", "json"]).unwrap().len(), 3);
        assert_eq!(parse_formats(&["md"]).unwrap(), vec![ReportFormat::Markdown]);
        assert!(parse_formats(&["sarif"]).is_err());
    }

    #[test]
    fn nothing_saved_without_flags() {
        let config = CareerfitConfig::default();
        assert!(SaveOptions::resolve(&config, None, false, None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_flag_uses_config() {
        let config = CareerfitConfig {
            formats: vec!["markdown".into()],
            ..CareerfitConfig::default()
        };
        let options = SaveOptions::resolve(&config, None, true, None)
            .unwrap()
            .unwrap();
        assert_eq!(options.dir, PathBuf::from("./careerfit-results"));
        assert_eq!(options.formats, vec![ReportFormat::Markdown]);

        let options = SaveOptions::resolve(&config, Some("out".into()), false, Some("all".into()))
            .unwrap()
            .unwrap();
        assert_eq!(options.dir, PathBuf::from("out"));
        assert_eq!(options.formats.len(), 3);
    }
}
