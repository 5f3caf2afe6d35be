//! upwind-core: Question bank, quiz session engine, and scoring.
//!
//! This crate defines the question model, the TOML bank format, the built-in
//! FAR Part 103 bank, and the session engine that the `upwind` front-end
//! drives.

pub mod bank;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;

pub use error::QuizError;
pub use model::{Question, QuestionBank, QuestionPool, StudyCategory};
pub use report::{ScoreReport, WrongItem};
pub use session::{start_session, QuizSession, SessionState, DEFAULT_QUESTION_COUNT};
