//! careerfit-report — HTML and Markdown renderings of assessment reports.

pub mod html;
pub mod markdown;
