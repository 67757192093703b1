//! 题目文本解析
//!
//! 把一行半结构化文本（人工录入或 LLM 生成）转换为标准 `Question`。
//! 已知格式按固定优先级依次尝试，第一个匹配的格式胜出；
//! 所有格式都不匹配时返回 `None`，这是常见情况而不是错误。

pub mod generated_block;
pub mod marker_layout;
pub mod pipe_layout;

use regex::Captures;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::models::question::Question;
use crate::services::validator;
use crate::utils::logging::truncate_text;

pub use generated_block::split_generated_text;
pub use marker_layout::MarkerLayout;
pub use pipe_layout::PipeLayout;

/// 单一文本格式的匹配器
pub trait LayoutMatcher: Send + Sync {
    /// 格式名称（仅用于日志）
    fn name(&self) -> &'static str;

    /// 尝试按本格式解析一行文本
    fn try_match(&self, line: &str) -> Option<Question>;
}

/// 按优先级组合多个格式的解析器
pub struct QuestionParser {
    layouts: Vec<Box<dyn LayoutMatcher>>,
}

impl QuestionParser {
    /// 不含任何格式的空解析器
    pub fn empty() -> Self {
        Self {
            layouts: Vec::new(),
        }
    }

    /// 追加一个格式，优先级低于已有格式
    pub fn with_layout(mut self, layout: impl LayoutMatcher + 'static) -> Self {
        self.layouts.push(Box::new(layout));
        self
    }

    pub fn layout_names(&self) -> Vec<&'static str> {
        self.layouts.iter().map(|l| l.name()).collect()
    }

    /// 解析一行文本，返回第一个匹配格式的结果
    pub fn parse(&self, line: &str) -> Option<Question> {
        for layout in &self.layouts {
            if let Some(question) = layout.try_match(line) {
                debug!(
                    "格式 {} 匹配: {}",
                    layout.name(),
                    truncate_text(&question.text, 50)
                );
                return Some(question);
            }
        }
        debug!("无法解析: {}", truncate_text(line, 50));
        None
    }
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::empty().with_layout(MarkerLayout).with_layout(PipeLayout)
    }
}

/// 使用默认解析器解析一行文本
pub fn parse_question(line: &str) -> Option<Question> {
    static PARSER: OnceLock<QuestionParser> = OnceLock::new();
    PARSER.get_or_init(QuestionParser::default).parse(line)
}

/// 批量解析结果
#[derive(Debug, Default, Clone)]
pub struct ParseReport {
    /// 解析并通过校验的题目
    pub accepted: Vec<Question>,
    /// 无法解析的行数
    pub unparsed: usize,
    /// 解析成功但未通过校验的题目数
    pub rejected: usize,
}

impl ParseReport {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.unparsed + self.rejected
    }
}

/// 解析一整段题目文本（支持 LLM 生成的多行块格式）
pub fn parse_quiz_text(text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for line in split_generated_text(text) {
        let Some(question) = parse_question(&line) else {
            report.unparsed += 1;
            continue;
        };
        match validator::check_question(&question) {
            Ok(()) => report.accepted.push(question),
            Err(e) => {
                warn!("丢弃无效题目 ({}): {}", e, truncate_text(&question.text, 50));
                report.rejected += 1;
            }
        }
    }

    report
}

/// 取出捕获组并去除首尾空白
pub(crate) fn capture_text(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().trim().to_string())
}
