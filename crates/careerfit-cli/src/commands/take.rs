//! The `careerfit take` command: an interactive, line-driven questionnaire.
//!
//! Each line of input is one action: a number selects an answer, an empty
//! line continues, `b` goes back and `q` quits without saving anything.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use careerfit_core::assessment::{AssessmentData, AssessmentFlow, Stage};
use careerfit_core::collector::{Advance, GradedCollector, LikertCollector, OptionMark};
use careerfit_core::error::CollectorError;
use careerfit_core::model::{
    CategoryProgress, LikertItem, LikertScale, QuestionBank, ResponseMap, Section,
};
use careerfit_core::parser::load_bank;
use careerfit_core::report::{load_responses, AssessmentReport};
use careerfit_core::scoring::whole_percent;

use crate::config::load_config_from;
use crate::output::{print_results, save_reports, SaveOptions};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Empty line.
    Continue,
    Back,
    Quit,
    /// A 1-based answer number.
    Choice(usize),
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" => Input::Continue,
            "b" | "back" => Input::Back,
            "q" | "quit" => Input::Quit,
            other => match other.parse::<usize>() {
                Ok(n) => Input::Choice(n),
                Err(_) => Input::Invalid(other.to_string()),
            },
        }
    }
}

/// How a section ended.
#[derive(Debug)]
enum Step {
    Done(ResponseMap),
    /// Backed out of the first question; carries what was recorded so far.
    Back(ResponseMap),
    Quit,
}

fn read_input<R: BufRead>(input: &mut R) -> Result<Input> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("input ended before the assessment was complete");
    }
    Ok(Input::parse(&line))
}

pub fn execute(
    bank_path: Option<PathBuf>,
    answers: Option<PathBuf>,
    output: Option<PathBuf>,
    save: bool,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let save_options = SaveOptions::resolve(&config, output, save, format)?;
    let bank = load_bank(config.bank_path(bank_path).as_deref())?;

    let initial = match &answers {
        Some(path) => load_initial_answers(&bank, path)?,
        None => AssessmentData::default(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    let Some(data) = run_session(&bank, initial, &mut input, &mut out)? else {
        writeln!(out, "\nAssessment cancelled. No responses were saved.")?;
        return Ok(());
    };

    let report = AssessmentReport::build(&bank, &data)?;
    print_results(&report, &mut out)?;

    if let Some(options) = save_options {
        for path in save_reports(&report, &options)? {
            writeln!(out, "Report saved to: {}", path.display())?;
        }
    }

    Ok(())
}

/// Load a responses file to pre-populate the session. Partial files are fine,
/// but every entry must name a bank question and hold a valid value.
fn load_initial_answers(bank: &QuestionBank, path: &Path) -> Result<AssessmentData> {
    let data = load_responses(path)?;
    data.check_partial(bank)
        .with_context(|| format!("invalid answers file {}", path.display()))?;
    Ok(data)
}

/// Walk the host flow until the results stage. `None` means the user quit.
fn run_session<R: BufRead, W: Write>(
    bank: &QuestionBank,
    initial: AssessmentData,
    input: &mut R,
    out: &mut W,
) -> Result<Option<AssessmentData>> {
    let mut flow = AssessmentFlow::with_data(initial);

    loop {
        let stage = flow.stage();
        if stage != Stage::Results {
            writeln!(
                out,
                "\n== Step {} of {}: {} ==\n{}",
                flow.stage_index() + 1,
                Stage::ALL.len(),
                stage.title(),
                stage.description(&bank.role)
            )?;
        }

        let step = match stage {
            Stage::Intro => {
                print_intro(bank, out)?;
                loop {
                    write!(out, "\nPress Enter to begin (q = quit): ")?;
                    out.flush()?;
                    match read_input(input)? {
                        Input::Quit => return Ok(None),
                        Input::Continue => break,
                        _ => writeln!(out, "Press Enter to begin.")?,
                    }
                }
                flow.next_stage();
                continue;
            }
            Stage::Psychometric => run_likert(
                Section::Psychometric,
                &bank.psychometric,
                flow.initial_data(Section::Psychometric),
                |_| None,
                input,
                out,
            )?,
            Stage::Technical => run_graded(
                &bank.technical,
                flow.initial_data(Section::Technical),
                input,
                out,
            )?,
            Stage::Wiscar => run_likert(
                Section::Wiscar,
                &bank.wiscar,
                flow.initial_data(Section::Wiscar),
                |c| Some(format_category_progress(&c.category_progress())),
                input,
                out,
            )?,
            Stage::Results => return Ok(Some(flow.into_data())),
        };

        // The stage is a scored section from here on.
        let Some(section) = stage.section() else {
            continue;
        };
        match step {
            Step::Done(responses) => {
                flow.record(section, responses);
                flow.next_stage();
            }
            Step::Back(responses) => {
                flow.record(section, responses);
                flow.previous_stage();
            }
            Step::Quit => return Ok(None),
        }
    }
}

fn print_intro<W: Write>(bank: &QuestionBank, out: &mut W) -> Result<()> {
    writeln!(out, "\n{}", bank.title)?;
    if !bank.intro.summary.is_empty() {
        writeln!(out, "{}", bank.intro.summary)?;
    }
    if !bank.intro.career_paths.is_empty() {
        writeln!(out, "\nCareer paths:")?;
        for path in &bank.intro.career_paths {
            writeln!(out, "  - {} ({}, {})", path.title, path.level, path.salary)?;
        }
    }
    if !bank.intro.success_traits.is_empty() {
        writeln!(out, "\nTraits that predict success:")?;
        for trait_ in &bank.intro.success_traits {
            writeln!(out, "  - {trait_}")?;
        }
    }
    writeln!(
        out,
        "\nThe assessment has {} questions in {} sections.",
        bank.total_questions(),
        Section::ALL.len()
    )?;
    Ok(())
}

fn format_category_progress(progress: &[CategoryProgress]) -> String {
    progress
        .iter()
        .map(|p| format!("{} {} {}/{}", p.category.icon(), p.category.label(), p.answered, p.total))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_scale<W: Write>(scale: LikertScale, selection: Option<u8>, out: &mut W) -> Result<()> {
    for value in LikertScale::MIN..=LikertScale::MAX {
        let marker = if selection == Some(value) { '*' } else { ' ' };
        let label = scale.label(value).unwrap_or_default();
        writeln!(out, " {marker} {value}) {label}")?;
    }
    Ok(())
}

fn run_likert<'a, Q, F, R, W>(
    section: Section,
    questions: &'a [Q],
    initial: ResponseMap,
    header: F,
    input: &mut R,
    out: &mut W,
) -> Result<Step>
where
    Q: LikertItem,
    F: Fn(&LikertCollector<'a, Q>) -> Option<String>,
    R: BufRead,
    W: Write,
{
    let mut collector = LikertCollector::new(questions, initial);
    if collector.is_empty() {
        return Ok(Step::Done(ResponseMap::new()));
    }

    loop {
        let question = collector
            .current_question()
            .context("collector has no current question")?;
        writeln!(
            out,
            "\n[{}] Question {} of {} ({})",
            section.title(),
            collector.current_index() + 1,
            collector.len(),
            whole_percent(collector.progress_percent())
        )?;
        if let Some(line) = header(&collector) {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{}: {}", question.category(), question.prompt())?;
        print_scale(collector.scale(), collector.selection(), out)?;
        write!(
            out,
            "Choose {}-{}, Enter to keep the marked answer (b = back, q = quit): ",
            LikertScale::MIN,
            LikertScale::MAX
        )?;
        out.flush()?;

        match read_input(input)? {
            Input::Quit => return Ok(Step::Quit),
            Input::Back => {
                if collector.current_index() == 0 {
                    return Ok(Step::Back(collector.responses().clone()));
                }
                collector.previous()?;
                continue;
            }
            Input::Choice(n) => {
                let selected = match u8::try_from(n) {
                    Ok(value) => collector.select(value),
                    Err(_) => Err(CollectorError::OutOfRange {
                        value: n,
                        min: LikertScale::MIN as usize,
                        max: LikertScale::MAX as usize,
                    }),
                };
                if let Err(e) = selected {
                    writeln!(out, "  {e}")?;
                    continue;
                }
            }
            Input::Continue => {
                if !collector.can_advance() {
                    writeln!(out, "  Please choose an answer first.")?;
                    continue;
                }
            }
            Input::Invalid(text) => {
                writeln!(out, "  Unrecognized input: {text}")?;
                continue;
            }
        }

        if let Advance::Complete(responses) = collector.next()? {
            return Ok(Step::Done(responses));
        }
    }
}

fn run_graded<R: BufRead, W: Write>(
    questions: &[careerfit_core::model::TechnicalQuestion],
    initial: ResponseMap,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    let mut collector = GradedCollector::new(questions, initial);
    if collector.is_empty() {
        return Ok(Step::Done(ResponseMap::new()));
    }

    loop {
        let question = collector
            .current_question()
            .context("collector has no current question")?;
        writeln!(
            out,
            "\n[{}] Question {} of {} ({})",
            Section::Technical.title(),
            collector.current_index() + 1,
            collector.len(),
            whole_percent(collector.progress_percent())
        )?;
        writeln!(out, "{} ({}): {}", question.category, question.difficulty, question.prompt)?;

        let feedback = collector.feedback().cloned();
        for (i, option) in question.options.iter().enumerate() {
            let marker = match &feedback {
                Some(fb) => match fb.mark(i) {
                    OptionMark::Correct => '+',
                    OptionMark::Incorrect => 'x',
                    OptionMark::Neutral => ' ',
                },
                None if collector.selection() == Some(i) => '*',
                None => ' ',
            };
            writeln!(out, " {marker} {}) {option}", i + 1)?;
        }

        if let Some(fb) = &feedback {
            if fb.is_correct() {
                writeln!(out, "Correct!")?;
            } else {
                let answer = question.options.get(fb.correct).map(String::as_str).unwrap_or("");
                writeln!(out, "Incorrect. The answer is {}) {answer}", fb.correct + 1)?;
            }
            if !fb.explanation.is_empty() {
                writeln!(out, "{}", fb.explanation)?;
            }
            write!(out, "Press Enter to continue (b = back, q = quit): ")?;
        } else {
            write!(
                out,
                "Choose 1-{} to submit (b = back, q = quit): ",
                question.options.len()
            )?;
        }
        out.flush()?;

        match read_input(input)? {
            Input::Quit => return Ok(Step::Quit),
            Input::Back => {
                if collector.current_index() == 0 {
                    return Ok(Step::Back(collector.responses().clone()));
                }
                collector.previous()?;
            }
            Input::Choice(n) => {
                let selected = match n.checked_sub(1) {
                    Some(option) => collector.select(option),
                    None => Err(CollectorError::OutOfRange {
                        value: n,
                        min: 1,
                        max: question.options.len(),
                    }),
                };
                match selected {
                    Ok(()) => {
                        collector.submit()?;
                    }
                    Err(CollectorError::Locked { .. }) => {
                        writeln!(out, "  This answer is locked. Press Enter to continue.")?;
                    }
                    Err(CollectorError::OutOfRange { .. }) => {
                        writeln!(
                            out,
                            "  Please choose an option between 1 and {}.",
                            question.options.len()
                        )?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Input::Continue => {
                if collector.can_advance() {
                    if let Advance::Complete(responses) = collector.next()? {
                        return Ok(Step::Done(responses));
                    }
                } else if collector.can_submit() {
                    collector.submit()?;
                } else {
                    writeln!(out, "  Please choose an answer first.")?;
                }
            }
            Input::Invalid(text) => {
                writeln!(out, "  Unrecognized input: {text}")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerfit_core::parser::builtin_bank;
    use std::io::Cursor;

    fn run(bank: &QuestionBank, initial: AssessmentData, script: &str) -> (Result<Option<AssessmentData>>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_session(bank, initial, &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn likert_lines(n: usize, value: u8) -> String {
        format!("{value}\n").repeat(n)
    }

    /// Answers every technical question with the given 1-based option.
    fn technical_lines(n: usize, option: usize) -> String {
        format!("{option}\n\n").repeat(n)
    }

    #[test]
    fn input_parsing() {
        assert_eq!(Input::parse("\n"), Input::Continue);
        assert_eq!(Input::parse(" B "), Input::Back);
        assert_eq!(Input::parse("quit"), Input::Quit);
        assert_eq!(Input::parse("3"), Input::Choice(3));
        assert_eq!(Input::parse("x"), Input::Invalid("x".into()));
    }

    #[test]
    fn full_session_collects_every_section() {
        let bank = builtin_bank().unwrap();
        let script = format!(
            "\n{}{}{}",
            likert_lines(10, 3),
            technical_lines(8, 2),
            likert_lines(12, 4)
        );
        let (result, output) = run(&bank, AssessmentData::default(), &script);
        let data = result.unwrap().unwrap();

        assert!(data.check_complete(&bank).is_ok());
        assert!(data.psychometric.values().all(|&v| v == 3));
        assert!(data.wiscar.values().all(|&v| v == 4));
        // option 2 is the key for six of the eight questions
        assert_eq!(data.technical.values().filter(|&&g| g == 1).count(), 6);
        assert!(output.contains("Step 2 of 5: Psychological Fit"));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Incorrect. The answer is 3)"));
    }

    #[test]
    fn quit_returns_nothing() {
        let bank = builtin_bank().unwrap();
        let (result, _) = run(&bank, AssessmentData::default(), "\n3\n3\nq\n");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn quit_at_intro() {
        let bank = builtin_bank().unwrap();
        let (result, _) = run(&bank, AssessmentData::default(), "q\n");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn eof_is_an_error() {
        let bank = builtin_bank().unwrap();
        let (result, _) = run(&bank, AssessmentData::default(), "\n3\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }

    #[test]
    fn back_revises_previous_answer() {
        let bank = builtin_bank().unwrap();
        // answer q1=2, go back, change it to 5 and keep going
        let script = format!(
            "\n2\nb\n5\n{}{}{}",
            likert_lines(9, 3),
            technical_lines(8, 2),
            likert_lines(12, 4)
        );
        let (result, _) = run(&bank, AssessmentData::default(), &script);
        let data = result.unwrap().unwrap();
        assert_eq!(data.psychometric[&bank.psychometric[0].id], 5);
    }

    #[test]
    fn back_from_section_start_returns_to_previous_section() {
        let bank = builtin_bank().unwrap();
        // finish psychometric with 3s, back out of the technical set, then
        // walk psychometric again keeping every answer with Enter
        let script = format!(
            "\n{}b\n{}{}{}",
            likert_lines(10, 3),
            "\n".repeat(10),
            technical_lines(8, 2),
            likert_lines(12, 4)
        );
        let (result, output) = run(&bank, AssessmentData::default(), &script);
        let data = result.unwrap().unwrap();
        assert!(data.psychometric.values().all(|&v| v == 3));
        assert_eq!(output.matches("Step 2 of 5").count(), 2);
    }

    #[test]
    fn enter_without_selection_is_rejected() {
        let bank = builtin_bank().unwrap();
        let (_, output) = run(&bank, AssessmentData::default(), "\n\n");
        assert!(output.contains("Please choose an answer first."));
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        let bank = builtin_bank().unwrap();
        let (_, output) = run(&bank, AssessmentData::default(), "\n9\nmaybe\n");
        assert!(output.contains("out of range"));
        assert!(output.contains("Unrecognized input: maybe"));
    }

    #[test]
    fn initial_answers_prefill_likert_sections() {
        let bank = builtin_bank().unwrap();
        let mut initial = AssessmentData::default();
        for q in &bank.psychometric {
            initial.psychometric.insert(q.id.clone(), 4);
        }
        let script = format!(
            "\n{}{}{}",
            "\n".repeat(10),
            technical_lines(8, 2),
            likert_lines(12, 4)
        );
        let (result, output) = run(&bank, initial, &script);
        let data = result.unwrap().unwrap();
        assert!(data.psychometric.values().all(|&v| v == 4));
        assert!(output.contains(" * 4) Agree"));
    }

    #[test]
    fn answers_file_may_be_partial() {
        let bank = builtin_bank().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"psychometric": {"structured_work": 4}}"#).unwrap();
        let data = load_initial_answers(&bank, &path).unwrap();
        assert_eq!(data.psychometric["structured_work"], 4);
    }

    #[test]
    fn answers_file_with_bad_entries_is_rejected() {
        let bank = builtin_bank().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");

        std::fs::write(&path, r#"{"psychometric": {"structured_work": 9}}"#).unwrap();
        let err = load_initial_answers(&bank, &path).unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));

        std::fs::write(&path, r#"{"technical": {"data_types": 3}}"#).unwrap();
        assert!(load_initial_answers(&bank, &path).is_err());

        std::fs::write(&path, r#"{"wiscar": {"nope": 3}}"#).unwrap();
        let err = load_initial_answers(&bank, &path).unwrap_err();
        assert!(format!("{err:#}").contains("unknown question nope"));
    }

    #[test]
    fn progress_rounds_half_percent_up() {
        let bank = builtin_bank().unwrap();
        // question 1 of 8 is 12.5%
        let script = format!("\n{}", likert_lines(10, 3));
        let (_, output) = run(&bank, AssessmentData::default(), &script);
        assert!(output.contains("Question 1 of 8 (13%)"));
    }

    #[test]
    fn wiscar_shows_category_progress() {
        let bank = builtin_bank().unwrap();
        let script = format!(
            "\n{}{}{}",
            likert_lines(10, 3),
            technical_lines(8, 2),
            likert_lines(12, 4)
        );
        let (_, output) = run(&bank, AssessmentData::default(), &script);
        assert!(output.contains("Will 0/2"));
        assert!(output.contains("Real-World Alignment 0/2"));
    }
}
