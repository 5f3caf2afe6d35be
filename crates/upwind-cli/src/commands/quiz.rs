//! The `upwind quiz` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use upwind_core::config::load_config_from;
use upwind_core::{QuizError, QuizSession, ScoreReport};

/// How an interactive quiz ended.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Every question was answered.
    Completed(ScoreReport),
    /// The user quit or input ran out before the last question.
    Abandoned,
}

pub fn execute(
    bank_path: Option<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    topic: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "markdown" | "md" | "json"),
        "unknown format '{format}' (expected text, markdown, or json)"
    );

    let config = load_config_from(config_path.as_deref())?;

    // Flags win over config
    let bank_path = bank_path.or(config.bank);
    let count = count.unwrap_or(config.question_count);
    let seed = seed.or(config.seed);
    let topics: Vec<String> = match &topic {
        Some(t) => t
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => config.topics,
    };

    let bank = super::load_merged_bank(bank_path.as_deref())?;
    let topic_refs: Vec<&str> = topics.iter().map(String::as_str).collect();
    let bank = bank.filter_topics(&topic_refs);
    anyhow::ensure!(
        !bank.pool.is_empty(),
        "no questions match topics: {}",
        topics.join(", ")
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut session = QuizSession::start(&bank.pool, count, &mut rng)?;
    tracing::info!(
        "quiz started: {} questions from '{}' ({} available)",
        session.len(),
        bank.name,
        bank.pool.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    writeln!(output, "{}", bank.name)?;
    match run_console(&mut session, &mut rng, &mut input, &mut output)? {
        Outcome::Completed(report) => {
            writeln!(output)?;
            match format.as_str() {
                "markdown" | "md" => write!(output, "{}", report.to_markdown())?,
                "json" => writeln!(output, "{}", serde_json::to_string_pretty(&report)?)?,
                _ => write!(output, "{}", report.to_text())?,
            }
        }
        Outcome::Abandoned => {
            writeln!(output, "\nQuiz abandoned.")?;
        }
    }

    Ok(())
}

/// Drive `session` from line-based input until it completes or the user
/// quits.
///
/// Each question shows its options numbered from 1. A line may be an option
/// number or the option's exact text; `q` or `quit` (or end of input)
/// abandons the quiz.
pub fn run_console<R, I, O>(
    session: &mut QuizSession<'_>,
    rng: &mut R,
    input: &mut I,
    output: &mut O,
) -> Result<Outcome>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    while let Some(question) = session.current_question() {
        let options = session.presented_options(rng)?;

        writeln!(
            output,
            "\nQuestion {} of {}\n\n{}\n",
            session.current_index() + 1,
            session.len(),
            question.prompt()
        )?;
        for (i, option) in options.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, option)?;
        }

        loop {
            write!(output, "\nYour answer (1-{}, q to quit): ", options.len())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(Outcome::Abandoned);
            }
            let entry = line.trim();
            if matches!(entry, "q" | "quit") {
                return Ok(Outcome::Abandoned);
            }

            let answer = match entry.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => options[n - 1],
                _ => entry,
            };

            match session.record_answer(answer) {
                Ok(()) => break,
                Err(QuizError::NoSelection) => {
                    writeln!(output, "Please select an answer before proceeding.")?;
                }
                Err(e) if e.is_invalid_answer() => {
                    writeln!(
                        output,
                        "'{entry}' is not one of the options. Enter a number from 1 to {}.",
                        options.len()
                    )?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        session.advance()?;
    }

    Ok(Outcome::Completed(session.score()))
}
