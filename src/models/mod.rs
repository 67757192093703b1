pub mod loaders;
pub mod question;
pub mod quiz_request;

pub use loaders::{load_question_set, load_quiz_text, save_question_set};
pub use question::{Letter, Options, Question, QuestionRecord, QuestionSet};
pub use quiz_request::{Difficulty, QuizRequest, QuizRequestError};
