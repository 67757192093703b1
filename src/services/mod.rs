pub mod answer_checker;
pub mod debounce;
pub mod formatter;
pub mod llm_service;
pub mod validator;

pub use answer_checker::{check_answer, selected_letter};
pub use debounce::RequestDebouncer;
pub use formatter::format_question;
pub use llm_service::LlmService;
pub use validator::{validate, validate_record, ValidationError};
