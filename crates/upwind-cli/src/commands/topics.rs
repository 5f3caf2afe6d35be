//! The `upwind topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use upwind_core::QuestionBank;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let bank = super::load_merged_bank(bank_path.as_deref())?;

    println!("{}", topics_table(&bank));
    println!("{} questions in total.", bank.pool.len());

    Ok(())
}

/// Categories and their topics with question counts. Topics no category
/// lists are grouped under "Other".
fn topics_table(bank: &QuestionBank) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Topic", "Questions"]);

    for category in &bank.categories {
        for topic in &category.topics {
            table.add_row(vec![
                Cell::new(&category.name),
                Cell::new(topic),
                Cell::new(bank.question_count(topic)),
            ]);
        }
    }

    for topic in bank.topics() {
        if bank.category_of(topic).is_none() {
            table.add_row(vec![
                Cell::new("Other"),
                Cell::new(topic),
                Cell::new(bank.question_count(topic)),
            ]);
        }
    }

    let untagged = bank.pool.iter().filter(|q| q.topic().is_empty()).count();
    if untagged > 0 {
        table.add_row(vec![
            Cell::new("Other"),
            Cell::new("(no topic)"),
            Cell::new(untagged),
        ]);
    }

    table
}
