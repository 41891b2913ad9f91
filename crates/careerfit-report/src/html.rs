//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use careerfit_core::report::{AssessmentReport, SectionResult};
use careerfit_core::scoring::{whole_percent, Badge, Tier};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn badge_class(badge: Badge) -> &'static str {
    match badge {
        Badge::Excellent => "excellent",
        Badge::Good => "good",
        Badge::Moderate => "moderate",
        Badge::NeedsDevelopment => "needs-development",
    }
}

fn badge_color(badge: Badge) -> &'static str {
    match badge {
        Badge::Excellent => "#22c55e",
        Badge::Good => "#3b82f6",
        Badge::Moderate => "#eab308",
        Badge::NeedsDevelopment => "#ef4444",
    }
}

fn tier_class(tier: Tier) -> &'static str {
    match tier {
        Tier::Strong => "tier-strong",
        Tier::Moderate => "tier-moderate",
        Tier::Low => "tier-low",
    }
}

/// Generate an HTML report from an assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>careerfit report: {}</title>\n",
        html_escape(&report.bank.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.bank.title)));
    html.push_str(&format!(
        "<p class=\"meta\">Role: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.bank.role),
        report.bank.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Overall + tier
    html.push_str(&format!(
        "<section class=\"verdict {}\">\n",
        tier_class(report.tier)
    ));
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        html_escape(&report.recommendation.headline)
    ));
    html.push_str(&format!(
        "<p class=\"overall\">Overall score: <strong>{}</strong></p>\n",
        whole_percent(report.overall)
    ));
    if !report.recommendation.summary.is_empty() {
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&report.recommendation.summary)
        ));
    }
    html.push_str("</section>\n");

    // Section scores
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Section Scores</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Section</th><th>Score</th><th>Rating</th><th>Answered</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &report.sections {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            s.section.title(),
            whole_percent(s.score),
            badge_class(s.badge),
            s.badge,
            s.answered,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.sections.is_empty() {
        html.push_str(&generate_bar_chart(&report.sections));
    }

    if !report.wiscar_progress.is_empty() {
        html.push_str("<h3>WISCAR Categories</h3>\n<ul class=\"categories\">\n");
        for p in &report.wiscar_progress {
            html.push_str(&format!(
                "<li>{} {}: {}/{}</li>\n",
                p.category.icon(),
                p.category.label(),
                p.answered,
                p.total
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    // Recommendation plan
    if !report.recommendation.steps.is_empty() {
        html.push_str("<section class=\"plan\">\n");
        html.push_str(&format!(
            "<h2>{}</h2>\n",
            html_escape(&report.recommendation.plan_title)
        ));
        for group in &report.recommendation.steps {
            html.push_str(&format!("<h3>{}</h3>\n<ul>\n", html_escape(&group.title)));
            for item in &group.items {
                html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</section>\n");
    }

    // Resources
    let resources = &report.resources;
    if !resources.certifications.is_empty() || !resources.skills.is_empty() {
        html.push_str("<section class=\"resources\">\n<h2>Learning Resources</h2>\n");
        for (heading, items) in [
            ("Certifications", &resources.certifications),
            ("Key Skills to Develop", &resources.skills),
        ] {
            if items.is_empty() {
                continue;
            }
            html.push_str(&format!("<h3>{heading}</h3>\n<ul>\n"));
            for item in items {
                html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</section>\n");
    }

    // Per-question responses
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Responses</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"responses\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Section</th><th onclick=\"sortTable(1)\">Question</th><th onclick=\"sortTable(2)\">Response</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &report.sections {
        for (id, value) in report.responses.get(s.section) {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                s.section,
                html_escape(id),
                value
            ));
        }
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(sections: &[SectionResult]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = sections.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, s) in sections.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (s.score.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            s.section.title()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            badge_color(s.badge)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            whole_percent(s.score)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --moderate: #fef9c3; --low: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --moderate: #713f12; --low: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.verdict { padding: 1rem 1.5rem; border-radius: 8px; }
.verdict h2 { margin-top: 0; }
.overall { font-size: 1.25rem; }
.tier-strong { background: var(--strong); }
.tier-moderate { background: var(--moderate); }
.tier-low { background: var(--low); }
.excellent { color: #16a34a; font-weight: bold; }
.good { color: #2563eb; font-weight: bold; }
.moderate { color: #ca8a04; font-weight: bold; }
.needs-development { color: #dc2626; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.categories { list-style: none; padding-left: 0; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('responses');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
