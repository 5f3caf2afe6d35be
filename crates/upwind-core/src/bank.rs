//! The built-in FAR Part 103 question bank.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;

use crate::model::QuestionBank;
use crate::parser::parse_bank_str;

const PART103_TOML: &str = include_str!("../banks/part103.toml");

static BUILTIN: OnceLock<QuestionBank> = OnceLock::new();

/// Parse the embedded bank. Prefer [`builtin_bank`], which caches the result.
pub fn load_builtin_bank() -> Result<QuestionBank> {
    parse_bank_str(PART103_TOML, Path::new("<builtin>/part103.toml"))
}

/// The embedded Part 103 bank, parsed once per process.
pub fn builtin_bank() -> Result<&'static QuestionBank> {
    if let Some(bank) = BUILTIN.get() {
        return Ok(bank);
    }
    let bank = load_builtin_bank()?;
    tracing::info!("loaded built-in bank '{}' ({} questions)", bank.id, bank.pool.len());
    Ok(BUILTIN.get_or_init(|| bank))
}
