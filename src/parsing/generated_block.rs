//! LLM 生成文本的预处理
//!
//! 生成题目时要求模型按多行块输出：
//!
//! ```text
//! Q) What is the capital of France?
//! A. Berlin
//! B. Madrid
//! C. Paris
//! D. Rome
//! Answer: C
//! ```
//!
//! 这里把每个块拼成一行 `$$` 格式，交给 `QuestionParser` 处理。

use tracing::debug;

use super::marker_layout::MARKER;

/// 把生成文本拆成候选题目行
///
/// 已经带分隔符（`$$` 或 `||`）的行原样输出；
/// 其余非空行累积成块，遇到 `Answer:` 答案行时闭合。
/// 题号行（`Q)`、`Q1.`、`2)` 等）开启新块，之前未闭合的内容被丢弃，
/// 末尾未闭合的块同样丢弃。
pub fn split_generated_text(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(MARKER) || line.contains("||") {
            if !block.is_empty() {
                debug!("丢弃未闭合的题目块 ({} 行)", block.len());
                block.clear();
            }
            lines.push(line.to_string());
            continue;
        }

        if starts_question(line) && !block.is_empty() {
            debug!("丢弃题号前的多余内容 ({} 行)", block.len());
            block.clear();
        }

        block.push(line);
        if starts_with_answer(line) {
            lines.push(block.join(format!(" {} ", MARKER).as_str()));
            block.clear();
        }
    }

    if !block.is_empty() {
        debug!("丢弃末尾未闭合的题目块 ({} 行)", block.len());
    }

    lines
}

/// 是否以题号开头，如 `Q)`、`Q1:`、`3.`
fn starts_question(line: &str) -> bool {
    let rest = line.strip_prefix(['Q', 'q']).unwrap_or(line);
    let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let has_prefix = rest.len() != line.len() || after_digits.len() != rest.len();
    has_prefix && after_digits.trim_start().starts_with([':', '.', ')'])
}

/// 是否为答案行：`Answer` 后紧跟（可有空白）冒号
fn starts_with_answer(line: &str) -> bool {
    let is_answer = line
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("answer"));
    is_answer
        && line
            .get(6..)
            .is_some_and(|rest| rest.trim_start().starts_with(':'))
}
