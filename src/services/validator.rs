//! 题目校验 - 业务能力层
//!
//! 题目在入库或展示给用户之前必须通过这里的检查。
//! 对外的 `validate` / `validate_record` 只返回 bool，从不报错；
//! `check_*` 返回具体失败原因，便于调用方记录日志。

use thiserror::Error;

use crate::models::question::{Letter, Question, QuestionRecord};

/// 题干最大字符数
pub const MAX_QUESTION_CHARS: usize = 5000;

const REQUIRED_LETTERS: [Letter; 3] = [Letter::A, Letter::B, Letter::C];

/// 题目校验失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("缺少字段: {0}")]
    MissingField(&'static str),

    #[error("题干为空")]
    EmptyQuestion,

    #[error("题干过长: {len} 字符 (上限 {max})")]
    QuestionTooLong { len: usize, max: usize },

    #[error("缺少选项 {0}")]
    MissingOption(Letter),

    #[error("选项 {0} 内容为空")]
    BlankOption(Letter),

    #[error("答案 '{0}' 不是有效的选项字母")]
    InvalidAnswer(String),

    #[error("答案 {0} 没有对应的选项")]
    AnswerNotInOptions(Letter),
}

/// 题目是否可用
pub fn validate(question: Option<&Question>) -> bool {
    question.is_some_and(|q| check_question(q).is_ok())
}

/// 存储文档是否可用
pub fn validate_record(record: Option<&QuestionRecord>) -> bool {
    record.is_some_and(|r| check_record(r).is_ok())
}

pub fn check_question(question: &Question) -> Result<(), ValidationError> {
    check_text(&question.text)?;

    let options = &question.options;
    for letter in REQUIRED_LETTERS {
        if options.get(letter).is_some_and(is_blank) {
            return Err(ValidationError::BlankOption(letter));
        }
    }
    if options.d.as_deref().is_some_and(is_blank) {
        return Err(ValidationError::BlankOption(Letter::D));
    }

    if !options.contains(question.answer_letter) {
        return Err(ValidationError::AnswerNotInOptions(question.answer_letter));
    }

    Ok(())
}

pub fn check_record(record: &QuestionRecord) -> Result<(), ValidationError> {
    let text = record
        .q
        .as_deref()
        .ok_or(ValidationError::MissingField("q"))?;
    let options = record
        .options
        .as_ref()
        .ok_or(ValidationError::MissingField("options"))?;
    let answer = record
        .answer
        .as_deref()
        .ok_or(ValidationError::MissingField("answer"))?;

    check_text(text)?;

    for letter in REQUIRED_LETTERS {
        match options.get(letter.as_str()) {
            None => return Err(ValidationError::MissingOption(letter)),
            Some(value) if is_blank(value) => return Err(ValidationError::BlankOption(letter)),
            Some(_) => {}
        }
    }
    let has_d = match options.get(Letter::D.as_str()) {
        Some(value) if is_blank(value) => return Err(ValidationError::BlankOption(Letter::D)),
        Some(_) => true,
        None => false,
    };

    let letter = Letter::from_key(answer)
        .filter(|letter| *letter != Letter::D || has_d)
        .ok_or_else(|| ValidationError::InvalidAnswer(answer.to_string()))?;

    if !options.contains_key(letter.as_str()) {
        return Err(ValidationError::AnswerNotInOptions(letter));
    }

    Ok(())
}

fn check_text(text: &str) -> Result<(), ValidationError> {
    if is_blank(text) {
        return Err(ValidationError::EmptyQuestion);
    }
    let len = text.chars().count();
    if len > MAX_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooLong {
            len,
            max: MAX_QUESTION_CHARS,
        });
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
