//! Core data model types for upwind.
//!
//! Questions, the read-only pool they live in, and the bank that groups a
//! pool with its study categories.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Always holds exactly [`OPTION_COUNT`] distinct options, one of which is
/// the correct answer. The only way to build one is [`Question::new`], which
/// enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_answer: String,
    explanation: String,
    topic: String,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        let malformed = |reason: String| QuizError::MalformedQuestion {
            prompt: prompt.clone(),
            reason,
        };

        let count = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| malformed(format!("expected {OPTION_COUNT} options, found {count}")))?;

        let mut seen = HashSet::new();
        for option in &options {
            if option.trim().is_empty() {
                return Err(malformed("options must not be blank".into()));
            }
            if !seen.insert(option.as_str()) {
                return Err(malformed(format!("duplicate option '{option}'")));
            }
        }

        if !options.contains(&correct_answer) {
            return Err(malformed(format!(
                "correct answer '{correct_answer}' is not one of the options"
            )));
        }

        Ok(Self {
            prompt,
            options,
            correct_answer,
            explanation: explanation.into(),
            topic: String::new(),
        })
    }

    /// Attach the study topic this question belongs to.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in their stored order. Use the session's presented options
    /// for display.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Study topic, empty when the bank did not assign one.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Exact, case-sensitive membership test.
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// The fixed universe of candidate questions.
///
/// Never mutated once built; sessions borrow from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn contains(&self, question: &Question) -> bool {
        self.questions.contains(question)
    }
}

impl FromIterator<Question> for QuestionPool {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QuestionPool {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// A named group of study topics (e.g. "Flight Environment").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyCategory {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A parsed question bank: metadata, study categories, and the pool.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what the bank covers.
    pub description: String,
    /// Study categories, each listing the topics it groups.
    pub categories: Vec<StudyCategory>,
    /// The questions.
    pub pool: QuestionPool,
}

impl QuestionBank {
    /// Distinct question topics in first-seen order. Untagged questions are
    /// not listed.
    pub fn topics(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.pool
            .iter()
            .map(Question::topic)
            .filter(|t| !t.is_empty() && seen.insert(*t))
            .collect()
    }

    /// Number of questions tagged with `topic` (case-insensitive).
    pub fn question_count(&self, topic: &str) -> usize {
        self.pool
            .iter()
            .filter(|q| q.topic().eq_ignore_ascii_case(topic))
            .count()
    }

    /// The category that lists `topic`, if any.
    pub fn category_of(&self, topic: &str) -> Option<&StudyCategory> {
        self.categories
            .iter()
            .find(|c| c.topics.iter().any(|t| t.eq_ignore_ascii_case(topic)))
    }

    /// A copy of this bank restricted to questions whose topic matches one of
    /// `topics` (case-insensitive). An empty filter keeps everything.
    pub fn filter_topics(&self, topics: &[&str]) -> QuestionBank {
        if topics.is_empty() {
            return self.clone();
        }

        let pool = self
            .pool
            .iter()
            .filter(|q| topics.iter().any(|t| q.topic().eq_ignore_ascii_case(t)))
            .cloned()
            .collect();

        QuestionBank {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            categories: self.categories.clone(),
            pool,
        }
    }

    /// Merge several banks into one pool. Metadata comes from the first bank.
    ///
    /// A question whose prompt already appeared in an earlier bank is dropped,
    /// so a quiz never asks the same prompt twice.
    pub fn merge(banks: Vec<QuestionBank>) -> Option<QuestionBank> {
        let mut iter = banks.into_iter();
        let mut merged = iter.next()?;
        let mut questions: Vec<Question> = merged.pool.iter().cloned().collect();
        let mut prompts: HashSet<String> =
            questions.iter().map(|q| q.prompt().to_string()).collect();

        for bank in iter {
            for question in bank.pool.iter() {
                if prompts.insert(question.prompt().to_string()) {
                    questions.push(question.clone());
                } else {
                    tracing::warn!(
                        "bank '{}' repeats prompt '{}'; keeping the first copy",
                        bank.id,
                        question.prompt()
                    );
                }
            }
            for category in bank.categories {
                if !merged.categories.iter().any(|c| c.name == category.name) {
                    merged.categories.push(category);
                }
            }
        }

        merged.pool = QuestionPool::new(questions);
        Some(merged)
    }
}
