//! Score report types and their text/markdown renderings.

use serde::{Deserialize, Serialize};

/// Shown in the review for questions the user never answered.
pub const NO_ANSWER: &str = "No answer";

const REVIEW_WIDTH: usize = 80;

/// The outcome of a completed or abandoned quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Questions answered correctly.
    pub correct_count: usize,
    /// Questions in the session.
    pub total: usize,
    /// `100 * correct_count / total`.
    pub percentage: f64,
    /// Every missed or unanswered question, in presentation order.
    pub wrong_items: Vec<WrongItem>,
}

/// A question the user got wrong, ready for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongItem {
    pub question: String,
    /// The chosen answer, or [`NO_ANSWER`].
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: String,
}

impl ScoreReport {
    pub fn new(correct_count: usize, total: usize, wrong_items: Vec<WrongItem>) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            100.0 * correct_count as f64 / total as f64
        };
        Self {
            correct_count,
            total,
            percentage,
            wrong_items,
        }
    }

    /// Returns true if every question was answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct_count == self.total
    }

    /// One-line summary, e.g. `You scored: 17/20 (85.00%)`.
    pub fn summary(&self) -> String {
        format!(
            "You scored: {}/{} ({:.2}%)",
            self.correct_count, self.total, self.percentage
        )
    }

    /// Plain-text results screen with a review of incorrect answers.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Quiz Results\n\n");
        out.push_str(&self.summary());
        out.push_str("\n\n");

        if self.wrong_items.is_empty() {
            out.push_str(
                "Excellent! You got all questions correct. \
                 You have a strong understanding of FAR Part 103.\n",
            );
            return out;
        }

        out.push_str("Review of Incorrect Answers:\n\n");
        for item in &self.wrong_items {
            out.push_str(&format!("Q: {}\n\n", item.question));
            out.push_str(&format!("  Your Answer: {}\n", item.user_answer));
            out.push_str(&format!("  Correct Answer: {}\n\n", item.correct_answer));
            for line in wrap(&format!("Explanation: {}", item.explanation), REVIEW_WIDTH) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&"-".repeat(REVIEW_WIDTH));
            out.push_str("\n\n");
        }

        out
    }

    /// Markdown rendering with a table of incorrect answers.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("## Quiz Results\n\n");
        md.push_str(&format!(
            "**Score:** {}/{} ({:.2}%)\n\n",
            self.correct_count, self.total, self.percentage
        ));

        if self.wrong_items.is_empty() {
            md.push_str("All questions answered correctly.\n");
            return md;
        }

        md.push_str("### Review of Incorrect Answers\n\n");
        md.push_str("| # | Question | Your Answer | Correct Answer | Explanation |\n");
        md.push_str("|---|----------|-------------|----------------|-------------|\n");
        for (i, item) in self.wrong_items.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                i + 1,
                md_cell(&item.question),
                md_cell(&item.user_answer),
                md_cell(&item.correct_answer),
                md_cell(&item.explanation),
            ));
        }

        md
    }
}

/// Escape a string for use inside a markdown table cell.
fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
