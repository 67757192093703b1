pub mod text_loader;
pub mod toml_loader;

pub use text_loader::load_quiz_text;
pub use toml_loader::{load_question_set, save_question_set};
