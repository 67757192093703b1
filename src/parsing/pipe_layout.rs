//! `||` 分隔的单行题目格式
//!
//! ```text
//! Q: 题干 || A) 选项 || B) 选项 || C) 选项 || [D) 选项 ||] Answer: C
//! ```

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use super::{capture_text, LayoutMatcher};
use crate::models::question::{Letter, Options, Question};

const PATTERN: &str = r"(?i)^\s*Q:\s*(.*?)\s*\|\|\s*A\)\s*(.*?)\s*\|\|\s*B\)\s*(.*?)\s*\|\|\s*C\)\s*(.*?)\s*(?:\|\|\s*D\)\s*(.*?)\s*)?\|\|\s*Answer:\s*([ABCD])";

fn pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(PATTERN)
            .map_err(|e| warn!("`||` 格式正则编译失败: {}", e))
            .ok()
    })
    .as_ref()
}

/// 第二种格式：答案文本总是取自对应选项
#[derive(Debug, Default, Clone, Copy)]
pub struct PipeLayout;

impl LayoutMatcher for PipeLayout {
    fn name(&self) -> &'static str {
        "pipe"
    }

    fn try_match(&self, line: &str) -> Option<Question> {
        let caps = pattern()?.captures(line)?;

        let options = Options::new(
            capture_text(&caps, 2)?,
            capture_text(&caps, 3)?,
            capture_text(&caps, 4)?,
            capture_text(&caps, 5).filter(|d| !d.is_empty()),
        );
        let answer_letter = caps
            .get(6)
            .and_then(|m| m.as_str().chars().next())
            .and_then(Letter::from_char)?;

        Some(Question::from_option_answer(
            capture_text(&caps, 1)?,
            options,
            answer_letter,
        ))
    }
}
