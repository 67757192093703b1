pub mod assistant;
pub mod quiz_session;

pub use assistant::Assistant;
pub use quiz_session::{AnswerRecord, QuizSession, QuizSummary};
