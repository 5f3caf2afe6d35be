//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionBank, QuestionPool, StudyCategory};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    categories: Vec<StudyCategory>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    topic: String,
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

    let pool = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            Question::new(q.prompt, q.options, q.correct_answer, q.explanation)
                .map(|question| question.with_topic(q.topic))
                .with_context(|| format!("question #{} in {}", i + 1, source_path.display()))
        })
        .collect::<Result<QuestionPool>>()?;

    tracing::debug!(
        "parsed bank '{}' with {} questions from {}",
        parsed.bank.id,
        pool.len(),
        source_path.display()
    );

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        categories: parsed.categories,
        pool,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
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

/// Load a bank file, or every bank in a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring issues.
///
/// Structural problems (wrong option count, duplicate options, a correct
/// answer outside the options) are already rejected while parsing.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate prompts
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, q) in bank.pool.iter().enumerate() {
        let first = *seen.entry(q.prompt()).or_insert(i + 1);
        if first != i + 1 {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate prompt (first seen at question #{first})"),
            });
        }
    }

    for (i, q) in bank.pool.iter().enumerate() {
        if q.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "prompt is empty".into(),
            });
        }
        if q.explanation().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "explanation is empty".into(),
            });
        }
    }

    // Topics should be listed by some category when the bank has categories
    if !bank.categories.is_empty() {
        let listed: HashSet<String> = bank
            .categories
            .iter()
            .flat_map(|c| c.topics.iter().map(|t| t.to_lowercase()))
            .collect();

        for topic in bank.topics() {
            if !listed.contains(&topic.to_lowercase()) {
                warnings.push(ValidationWarning {
                    question: None,
                    message: format!("topic '{topic}' is not listed in any category"),
                });
            }
        }

        for category in &bank.categories {
            for topic in &category.topics {
                if bank.question_count(topic) == 0 {
                    warnings.push(ValidationWarning {
                        question: None,
                        message: format!(
                            "category '{}' lists topic '{topic}' which has no questions",
                            category.name
                        ),
                    });
                }
            }
        }
    }

    if bank.pool.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions".into(),
        });
    }

    warnings
}
