//! The `upwind validate` command.

use std::path::PathBuf;

use anyhow::Result;

use upwind_core::parser::validate_bank;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let banks = super::load_banks(bank_path.as_deref())?;

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.pool.len());

        let warnings = validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [#{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
