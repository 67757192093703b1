//! 答题会话 - 流程层
//!
//! 定义"一组题"的作答流程：出题 → 收答案 → 判定 → 记录

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::models::question::{Letter, Question};
use crate::services::answer_checker::selected_letter;
use crate::services::formatter::format_question;
use crate::utils::logging::truncate_text;

/// 单次作答记录，对应存储层的答题文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub set_name: String,
    /// 题号（从1开始）
    pub question_no: usize,
    /// 用户原始回复
    pub user_answer: String,
    /// 回复对应的选项（无法对应时为空）
    pub selected: Option<Letter>,
    pub correct_answer: Letter,
    pub is_correct: bool,
}

/// 答题统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
}

impl QuizSummary {
    /// 正确率（百分比）
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✅ {} correct, ❌ {} wrong, {} total ({:.0}%)",
            self.correct,
            self.wrong,
            self.total,
            self.percentage()
        )
    }
}

/// 答题会话
#[derive(Debug, Clone)]
pub struct QuizSession {
    set_name: String,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<AnswerRecord>,
}

impl QuizSession {
    pub fn new(set_name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            set_name: set_name.into(),
            questions,
            current: 0,
            answers: Vec::new(),
        }
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 当前题目的展示文本，全部答完时返回 `None`
    pub fn current_prompt(&self) -> Option<String> {
        self.current_question()
            .map(|q| format_question(q, self.current + 1))
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// 提交当前题目的答案并进入下一题
    pub fn submit(&mut self, reply: &str) -> Option<AnswerRecord> {
        let question = self.questions.get(self.current)?;

        let is_correct = question.is_correct(reply);
        let record = AnswerRecord {
            set_name: self.set_name.clone(),
            question_no: self.current + 1,
            user_answer: reply.trim().to_string(),
            selected: selected_letter(reply, &question.options),
            correct_answer: question.answer_letter,
            is_correct,
        };
        debug!(
            "[{} 题目#{}] 回复 '{}' -> {}",
            self.set_name,
            record.question_no,
            truncate_text(&record.user_answer, 30),
            if is_correct { "正确" } else { "错误" }
        );
        debug!(
            "作答记录: {}",
            serde_json::to_string(&record).unwrap_or_default()
        );

        self.answers.push(record.clone());
        self.current += 1;

        if self.is_finished() {
            info!("🏁 [{}] 答题结束: {}", self.set_name, self.summary());
        }

        Some(record)
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn summary(&self) -> QuizSummary {
        let correct = self.answers.iter().filter(|a| a.is_correct).count();
        QuizSummary {
            correct,
            wrong: self.answers.len() - correct,
            total: self.questions.len(),
        }
    }
}
