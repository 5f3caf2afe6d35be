//! Quiz session engine.
//!
//! A [`QuizSession`] samples questions from a borrowed [`QuestionPool`],
//! records one answer per question while moving strictly forward, and scores
//! the attempt. Every randomized step takes the random source as an argument
//! so callers control determinism.

use std::collections::BTreeMap;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::error::QuizError;
use crate::model::{Question, QuestionPool};
use crate::report::{ScoreReport, WrongItem, NO_ANSWER};

/// Questions per quiz unless the caller asks otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 20;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Presenting the question at this index.
    InProgress(usize),
    /// Every question has been presented.
    Complete,
}

/// One attempt at a sampled quiz.
#[derive(Debug, Clone)]
pub struct QuizSession<'pool> {
    questions: Vec<&'pool Question>,
    current: usize,
    answers: BTreeMap<usize, String>,
}

/// Start a quiz of `k` questions drawn from `pool`.
///
/// Free-function form of [`QuizSession::start`].
pub fn start_session<'pool, R>(
    pool: &'pool QuestionPool,
    k: usize,
    rng: &mut R,
) -> Result<QuizSession<'pool>, QuizError>
where
    R: Rng + ?Sized,
{
    QuizSession::start(pool, k, rng)
}

impl<'pool> QuizSession<'pool> {
    /// Draw `k` distinct questions uniformly at random without replacement.
    /// The draw order becomes the presentation order.
    pub fn start<R>(pool: &'pool QuestionPool, k: usize, rng: &mut R) -> Result<Self, QuizError>
    where
        R: Rng + ?Sized,
    {
        if k == 0 {
            return Err(QuizError::EmptyQuiz);
        }
        if pool.len() < k {
            return Err(QuizError::InsufficientPool {
                available: pool.len(),
                requested: k,
            });
        }

        let questions: Vec<&Question> = index::sample(rng, pool.len(), k)
            .into_iter()
            .filter_map(|i| pool.get(i))
            .collect();

        tracing::debug!("started quiz session: {k} of {} questions", pool.len());

        Ok(Self::from_questions(questions))
    }

    /// Build a session over an explicit question order, bypassing sampling.
    pub fn from_questions(questions: Vec<&'pool Question>) -> Self {
        Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current < self.questions.len() {
            SessionState::InProgress(self.current)
        } else {
            SessionState::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// Number of questions in this quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question being presented, or `None` once complete.
    pub fn current_question(&self) -> Option<&'pool Question> {
        self.questions.get(self.current).copied()
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[&'pool Question] {
        &self.questions
    }

    /// The answer recorded for question `index`, if any.
    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Number of questions with a recorded answer.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    fn require_current(&self) -> Result<&'pool Question, QuizError> {
        self.current_question().ok_or(QuizError::SessionComplete)
    }

    /// The current question's options, shuffled afresh on every call so the
    /// correct answer's position is not fixed across renders.
    pub fn presented_options<R>(&self, rng: &mut R) -> Result<Vec<&'pool str>, QuizError>
    where
        R: Rng + ?Sized,
    {
        let question = self.require_current()?;
        let mut options: Vec<&str> = question.options().iter().map(String::as_str).collect();
        options.shuffle(rng);
        Ok(options)
    }

    /// Record `answer` for the current question.
    ///
    /// The answer must match one of the options exactly. A later call for the
    /// same question replaces the earlier answer. Does not advance.
    pub fn record_answer(&mut self, answer: &str) -> Result<(), QuizError> {
        let question = self.require_current()?;

        if answer.trim().is_empty() {
            return Err(QuizError::NoSelection);
        }
        if !question.has_option(answer) {
            return Err(QuizError::InvalidAnswer(answer.to_string()));
        }

        tracing::debug!("recorded answer for question {}", self.current + 1);
        self.answers.insert(self.current, answer.to_string());
        Ok(())
    }

    /// Move to the next question.
    ///
    /// Returns `true` while questions remain and `false` once the quiz is
    /// complete. The current question must already have an answer.
    pub fn advance(&mut self) -> Result<bool, QuizError> {
        self.require_current()?;

        if !self.answers.contains_key(&self.current) {
            return Err(QuizError::NoSelection);
        }

        self.current += 1;
        let more = self.current < self.questions.len();
        if !more {
            tracing::debug!("quiz session complete after {} questions", self.len());
        }
        Ok(more)
    }

    /// Score the attempt. Unanswered questions count as wrong.
    ///
    /// Pure: may be called at any point, any number of times.
    pub fn score(&self) -> ScoreReport {
        let mut correct_count = 0;
        let mut wrong_items = Vec::new();

        for (i, question) in self.questions.iter().enumerate() {
            match self.answer_for(i) {
                Some(answer) if question.is_correct(answer) => correct_count += 1,
                answer => wrong_items.push(WrongItem {
                    question: question.prompt().to_string(),
                    user_answer: answer.unwrap_or(NO_ANSWER).to_string(),
                    correct_answer: question.correct_answer().to_string(),
                    explanation: question.explanation().to_string(),
                }),
            }
        }

        ScoreReport::new(correct_count, self.len(), wrong_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_of(n: usize) -> QuestionPool {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Question {i}"),
                    vec![
                        format!("right {i}"),
                        format!("wrong a{i}"),
                        format!("wrong b{i}"),
                        format!("wrong c{i}"),
                    ],
                    format!("right {i}"),
                    format!("Because {i}."),
                )
                .unwrap()
            })
            .collect()
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn answer_all(session: &mut QuizSession<'_>, pick: impl Fn(&Question) -> String) {
        while let Some(q) = session.current_question() {
            session.record_answer(&pick(q)).unwrap();
            session.advance().unwrap();
        }
    }

    #[test]
    fn samples_k_distinct_members() {
        let pool = pool_of(25);
        for seed in 0..20 {
            let session = start_session(&pool, 20, &mut rng(seed)).unwrap();
            assert_eq!(session.len(), 20);
            let prompts: HashSet<&str> = session.questions().iter().map(|q| q.prompt()).collect();
            assert_eq!(prompts.len(), 20);
            assert!(session.questions().iter().all(|q| pool.contains(q)));
            assert_eq!(session.state(), SessionState::InProgress(0));
            assert_eq!(session.answered(), 0);
        }
    }

    #[test]
    fn whole_pool_can_be_drawn() {
        let pool = pool_of(5);
        let session = start_session(&pool, 5, &mut rng(7)).unwrap();
        assert_eq!(session.len(), 5);
    }

    #[test]
    fn same_seed_same_quiz() {
        let pool = pool_of(50);
        let a = start_session(&pool, 10, &mut rng(42)).unwrap();
        let b = start_session(&pool, 10, &mut rng(42)).unwrap();
        let prompts = |s: &QuizSession<'_>| -> Vec<String> {
            s.questions().iter().map(|q| q.prompt().to_string()).collect()
        };
        assert_eq!(prompts(&a), prompts(&b));
        assert_eq!(
            a.presented_options(&mut rng(1)).unwrap(),
            b.presented_options(&mut rng(1)).unwrap()
        );
    }

    #[test]
    fn insufficient_pool() {
        let pool = pool_of(3);
        let err = start_session(&pool, 20, &mut rng(0)).unwrap_err();
        assert_eq!(
            err,
            QuizError::InsufficientPool {
                available: 3,
                requested: 20
            }
        );
    }

    #[test]
    fn zero_questions_rejected() {
        let pool = pool_of(3);
        assert_eq!(
            start_session(&pool, 0, &mut rng(0)).unwrap_err(),
            QuizError::EmptyQuiz
        );
    }

    #[test]
    fn presented_options_are_a_permutation() {
        let pool = pool_of(1);
        let session = start_session(&pool, 1, &mut rng(3)).unwrap();
        let question = session.current_question().unwrap();
        let mut r = rng(9);
        for _ in 0..10 {
            let mut shown = session.presented_options(&mut r).unwrap();
            shown.sort_unstable();
            let mut stored: Vec<&str> = question.options().iter().map(String::as_str).collect();
            stored.sort_unstable();
            assert_eq!(shown, stored);
        }
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn presented_options_eventually_move_the_correct_answer() {
        let pool = pool_of(1);
        let session = start_session(&pool, 1, &mut rng(3)).unwrap();
        let mut r = rng(11);
        let positions: HashSet<usize> = (0..50)
            .map(|_| {
                session
                    .presented_options(&mut r)
                    .unwrap()
                    .iter()
                    .position(|o| *o == "right 0")
                    .unwrap()
            })
            .collect();
        assert!(positions.len() > 1);
    }

    #[test]
    fn record_answer_accepts_options_only() {
        let q = Question::new(
            "P",
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            "B",
            "E",
        )
        .unwrap();
        let mut session = QuizSession::from_questions(vec![&q]);

        assert_eq!(
            session.record_answer("Z").unwrap_err(),
            QuizError::InvalidAnswer("Z".into())
        );
        assert_eq!(session.answer_for(0), None);

        assert_eq!(session.record_answer("").unwrap_err(), QuizError::NoSelection);
        assert_eq!(session.record_answer("  ").unwrap_err(), QuizError::NoSelection);
        assert_eq!(
            session.record_answer("b").unwrap_err(),
            QuizError::InvalidAnswer("b".into())
        );
        assert_eq!(session.answer_for(0), None);

        session.record_answer("B").unwrap();
        assert_eq!(session.answer_for(0), Some("B"));

        // A rejected answer leaves the earlier one in place.
        assert!(session.record_answer("Z").is_err());
        assert_eq!(session.answer_for(0), Some("B"));

        // Re-answering replaces.
        session.record_answer("C").unwrap();
        assert_eq!(session.answer_for(0), Some("C"));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_requires_an_answer() {
        let pool = pool_of(2);
        let mut session = start_session(&pool, 2, &mut rng(5)).unwrap();
        assert_eq!(session.advance().unwrap_err(), QuizError::NoSelection);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_k_times_completes() {
        let pool = pool_of(4);
        let mut session = start_session(&pool, 4, &mut rng(5)).unwrap();

        for i in 0..4 {
            let answer = session.current_question().unwrap().correct_answer().to_string();
            session.record_answer(&answer).unwrap();
            let more = session.advance().unwrap();
            assert_eq!(more, i < 3);
        }

        assert!(session.is_complete());
        assert_eq!(session.state(), SessionState::Complete);
        assert!(session.current_question().is_none());
        assert_eq!(session.advance().unwrap_err(), QuizError::SessionComplete);
        assert_eq!(
            session.record_answer("right 0").unwrap_err(),
            QuizError::SessionComplete
        );
        assert_eq!(
            session.presented_options(&mut rng(0)).unwrap_err(),
            QuizError::SessionComplete
        );
    }

    #[test]
    fn perfect_score() {
        let pool = pool_of(25);
        let mut session = start_session(&pool, 20, &mut rng(8)).unwrap();
        answer_all(&mut session, |q| q.correct_answer().to_string());

        let report = session.score();
        assert_eq!(report.correct_count, 20);
        assert_eq!(report.total, 20);
        assert_eq!(report.percentage, 100.0);
        assert!(report.wrong_items.is_empty());
        assert!(report.is_perfect());
    }

    #[test]
    fn unanswered_session_scores_zero() {
        let pool = pool_of(10);
        let session = start_session(&pool, 6, &mut rng(2)).unwrap();

        let report = session.score();
        assert_eq!(report.correct_count, 0);
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.wrong_items.len(), 6);
        assert!(report.wrong_items.iter().all(|w| w.user_answer == NO_ANSWER));
    }

    #[test]
    fn wrong_items_keep_presentation_order() {
        let pool = pool_of(10);
        let mut session = start_session(&pool, 4, &mut rng(13)).unwrap();
        let order: Vec<String> = session
            .questions()
            .iter()
            .map(|q| q.prompt().to_string())
            .collect();

        // Answer the first two wrong, then abandon.
        for _ in 0..2 {
            let q = session.current_question().unwrap();
            let wrong = q
                .options()
                .iter()
                .find(|o| !q.is_correct(o))
                .unwrap()
                .clone();
            session.record_answer(&wrong).unwrap();
            session.advance().unwrap();
        }

        let report = session.score();
        assert_eq!(report.correct_count, 0);
        let reviewed: Vec<&str> = report.wrong_items.iter().map(|w| w.question.as_str()).collect();
        assert_eq!(reviewed, order.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(report.wrong_items[0].user_answer.starts_with("wrong"));
        assert_eq!(report.wrong_items[2].user_answer, NO_ANSWER);
        assert_eq!(report.wrong_items[3].correct_answer, session.questions()[3].correct_answer());
        assert_eq!(report.wrong_items[3].explanation, session.questions()[3].explanation());
    }

    #[test]
    fn score_is_idempotent() {
        let pool = pool_of(10);
        let mut session = start_session(&pool, 5, &mut rng(21)).unwrap();
        let answer = session.current_question().unwrap().correct_answer().to_string();
        session.record_answer(&answer).unwrap();
        session.advance().unwrap();

        let first = session.score();
        let second = session.score();
        assert_eq!(first, second);
        assert_eq!(first.correct_count, 1);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answered(), 1);
    }

    #[test]
    fn mixed_score_percentage() {
        let pool = pool_of(8);
        let mut session = start_session(&pool, 8, &mut rng(4)).unwrap();
        answer_all(&mut session, |q| {
            if q.prompt().ends_with(|c: char| matches!(c, '0'..='2')) {
                q.correct_answer().to_string()
            } else {
                q.options()[1].clone()
            }
        });

        let report = session.score();
        assert_eq!(report.correct_count, 3);
        assert_eq!(report.wrong_items.len(), 5);
        assert_eq!(report.percentage, 37.5);
    }
}
