pub mod init;
pub mod quiz;
pub mod topics;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use upwind_core::bank::builtin_bank;
use upwind_core::parser;
use upwind_core::QuestionBank;

/// Load every bank under `path`, or the built-in bank when no path is given.
pub fn load_banks(path: Option<&Path>) -> Result<Vec<QuestionBank>> {
    match path {
        Some(path) => {
            let banks = parser::load_banks(path)?;
            anyhow::ensure!(
                !banks.is_empty(),
                "no question banks found in {}",
                path.display()
            );
            Ok(banks)
        }
        None => Ok(vec![builtin_bank()?.clone()]),
    }
}

/// Load the bank(s) under `path` merged into one pool.
pub fn load_merged_bank(path: Option<&Path>) -> Result<QuestionBank> {
    QuestionBank::merge(load_banks(path)?)
        .ok_or_else(|| anyhow::anyhow!("no question banks to load"))
}
