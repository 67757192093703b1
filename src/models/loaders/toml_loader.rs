use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{Question, QuestionRecord, QuestionSet};

/// TOML 中读出的原始题组，题目尚未校验
#[derive(Debug, Deserialize)]
struct RawQuestionSet {
    name: String,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

/// 从 TOML 文件加载题组
///
/// 每道题都重新校验，无效题目记录警告后丢弃
pub async fn load_question_set(path: &Path) -> AppResult<QuestionSet> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let raw: RawQuestionSet =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    let total = raw.questions.len();
    let questions: Vec<Question> = raw
        .questions
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match Question::try_from(record) {
            Ok(q) => Some(q),
            Err(e) => {
                tracing::warn!("题组 {} 第 {} 题无效，已跳过: {}", raw.name, idx + 1, e);
                None
            }
        })
        .collect();

    tracing::info!(
        "成功加载题组 {}: {}/{} 道有效题目",
        raw.name,
        questions.len(),
        total
    );

    Ok(QuestionSet::new(raw.name, questions))
}

/// 将题组写入 TOML 文件
pub async fn save_question_set(path: &Path, set: &QuestionSet) -> AppResult<()> {
    let content = toml::to_string_pretty(set).map_err(FileError::from)?;
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    tracing::info!("已导出 {} 道题目到 {}", set.questions.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Letter, Options};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("quizbot_{}_{}.toml", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let set = QuestionSet::new(
            "geo",
            vec![
                Question::from_option_answer(
                    "Capital of France?".to_string(),
                    Options::new("Berlin", "Madrid", "Paris", None),
                    Letter::C,
                ),
                Question {
                    text: "Largest ocean?".to_string(),
                    options: Options::new("Atlantic", "Pacific", "Indian", Some("Arctic".to_string())),
                    answer_letter: Letter::B,
                    answer_text: "The Pacific Ocean".to_string(),
                },
            ],
        );
        let path = temp_path("roundtrip");

        save_question_set(&path, &set).await.unwrap();
        let loaded = load_question_set(&path).await.unwrap();
        assert_eq!(loaded, set);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_invalid_questions_are_dropped() {
        let path = temp_path("invalid");
        let content = r#"
name = "mixed"

[[questions]]
q = "Valid?"
answer = "A"
options = { A = "yes", B = "no", C = "maybe" }

[[questions]]
q = "Missing C"
answer = "A"
options = { A = "yes", B = "no" }

[[questions]]
q = "Answer D without D"
answer = "D"
options = { A = "yes", B = "no", C = "maybe" }
"#;
        fs::write(&path, content).await.unwrap();

        let loaded = load_question_set(&path).await.unwrap();
        assert_eq!(loaded.name, "mixed");
        assert_eq!(loaded.questions.len(), 1);
        assert_eq!(loaded.questions[0].answer_text, "yes");

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_question_set(&temp_path("does_not_exist")).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
