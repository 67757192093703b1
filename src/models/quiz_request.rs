use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 单次生成题目数量上限
pub const MAX_QUESTION_COUNT: usize = 20;
/// 主题最短字符数
pub const MIN_TOPIC_CHARS: usize = 2;

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

static DIFFICULTIES: phf::Map<&'static str, Difficulty> = phf::phf_map! {
    "easy" => Difficulty::Easy,
    "medium" => Difficulty::Medium,
    "hard" => Difficulty::Hard,
};

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 困难题目使用更强的模型
    pub fn needs_pro_model(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = QuizRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DIFFICULTIES
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| QuizRequestError::UnknownDifficulty(s.to_string()))
    }
}

/// 生成请求参数错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizRequestError {
    #[error("题目数量必须在 1 到 20 之间，实际为 {0}")]
    CountOutOfRange(usize),

    #[error("未知难度 '{0}'，可选: easy, medium, hard")]
    UnknownDifficulty(String),

    #[error("主题过短，至少需要 2 个字符")]
    TopicTooShort,
}

/// 题目生成请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    pub count: usize,
    pub difficulty: Difficulty,
}

impl QuizRequest {
    /// 校验并创建请求
    pub fn new(topic: &str, count: usize, difficulty: &str) -> Result<Self, QuizRequestError> {
        if !(1..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(QuizRequestError::CountOutOfRange(count));
        }
        let difficulty = difficulty.parse::<Difficulty>()?;

        let topic = topic.trim();
        if topic.chars().count() < MIN_TOPIC_CHARS {
            return Err(QuizRequestError::TopicTooShort);
        }

        Ok(Self {
            topic: topic.to_string(),
            count,
            difficulty,
        })
    }
}
