//! `$$` 分隔的单行题目格式
//!
//! ```text
//! Q: 题干 $$ A. 选项 $$ B. 选项 $$ C. 选项 [$$ D. 选项] $$ Answer: C [$$ 答案文本]
//! ```
//!
//! 题号前缀 `Q.`、`1.` 后面必须跟空白，否则视为题干的一部分（如 `2.5 + 2.5`）。
//! 答案文本可用 `$$`、`)`、`.`、`:`、`-` 分隔，也可直接跟在空格后或写在括号里。

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::warn;

use super::{capture_text, LayoutMatcher};
use crate::models::question::{Letter, Options, Question};

/// 分隔标记
pub const MARKER: &str = "$$";

const PATTERN: &str = r"(?i)^\s*(?:(?:Q\s*\d*\s*[:)]|\d+\s*[:)]|(?:Q\s*\d*|\d+)\s*\.\s)\s*)?(.+?)\s*\$\$\s*A\.\s*(.*?)\s*\$\$\s*B\.\s*(.*?)\s*\$\$\s*C\.\s*(.*?)\s*(?:\$\$\s*D\.\s*(.*?)\s*)?\$\$\s*Answer\s*:\s*([ABCD])\b(?:\s*(\$\$|[).:(-])?\s*(.*?))?\s*$";

fn pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(PATTERN)
            .map_err(|e| warn!("`$$` 格式正则编译失败: {}", e))
            .ok()
    })
    .as_ref()
}

/// 第一种格式：字母加点的选项，答案后可附带独立的答案文本
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerLayout;

impl LayoutMatcher for MarkerLayout {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn try_match(&self, line: &str) -> Option<Question> {
        let caps = pattern()?.captures(line)?;

        let text = capture_text(&caps, 1)?;
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

        let question = match explicit_answer_text(&caps) {
            Some(answer_text) => Question {
                text,
                options,
                answer_letter,
                answer_text,
            },
            None => Question::from_option_answer(text, options, answer_letter),
        };
        Some(question)
    }
}

/// 答案字母之后的显式答案文本；括号形式去掉闭合的 `)`
fn explicit_answer_text(caps: &Captures<'_>) -> Option<String> {
    let text = capture_text(caps, 8)?;
    let text = match caps.get(7).map(|m| m.as_str()) {
        Some("(") => text
            .strip_suffix(')')
            .map(|t| t.trim_end().to_string())
            .unwrap_or(text),
        _ => text,
    };
    Some(text).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Question> {
        MarkerLayout.try_match(line)
    }

    #[test]
    fn test_four_options() {
        let q = parse(
            "Q: What is the capital of France? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ D. Rome $$ Answer: C",
        )
        .unwrap();

        assert_eq!(q.text, "What is the capital of France?");
        assert_eq!(q.options.a, "Berlin");
        assert_eq!(q.options.d.as_deref(), Some("Rome"));
        assert_eq!(q.answer_letter, Letter::C);
        assert_eq!(q.answer_text, "Paris");
    }

    #[test]
    fn test_three_options_without_prefix() {
        let q = parse("Largest planet? $$ A. Mars $$ B. Jupiter $$ C. Venus $$ answer: b").unwrap();

        assert_eq!(q.text, "Largest planet?");
        assert!(q.options.d.is_none());
        assert_eq!(q.answer_letter, Letter::B);
        assert_eq!(q.answer_text, "Jupiter");
    }

    #[test]
    fn test_explicit_answer_text_is_preserved() {
        let q = parse("Q1) Pick $$ A. one $$ B. two $$ C. three $$ Answer: A $$ The number one").unwrap();
        assert_eq!(q.text, "Pick");
        assert_eq!(q.answer_letter, Letter::A);
        assert_eq!(q.answer_text, "The number one");

        let q = parse("Pick $$ A. one $$ B. two $$ C. three $$ Answer: B) two!").unwrap();
        assert_eq!(q.answer_text, "two!");
    }

    #[test]
    fn test_answer_text_after_space_or_parenthesis() {
        let q = parse("Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C Paris").unwrap();
        assert_eq!(q.answer_letter, Letter::C);
        assert_eq!(q.answer_text, "Paris");

        let q = parse("Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C (Paris)").unwrap();
        assert_eq!(q.answer_text, "Paris");

        let q = parse("Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C because it is").unwrap();
        assert_eq!(q.answer_text, "because it is");

        // 空括号等同于没有答案文本
        let q = parse("Capital? $$ A. Berlin $$ B. Madrid $$ C. Paris $$ Answer: C ()").unwrap();
        assert_eq!(q.answer_text, "Paris");
    }

    #[test]
    fn test_question_text_is_not_eaten_by_prefix() {
        let q = parse("2.5 + 2.5 = ? $$ A. 4 $$ B. 5 $$ C. 6 $$ Answer: B").unwrap();
        assert_eq!(q.text, "2.5 + 2.5 = ?");

        let q = parse("Q.E.D. stands for? $$ A. a $$ B. b $$ C. c $$ Answer: A").unwrap();
        assert_eq!(q.text, "Q.E.D. stands for?");

        let q = parse("1999 was when? $$ A. a $$ B. b $$ C. c $$ Answer: A").unwrap();
        assert_eq!(q.text, "1999 was when?");

        // 真正的题号仍然去掉
        for line in [
            "Q1. Pick $$ A. a $$ B. b $$ C. c $$ Answer: A",
            "3. Pick $$ A. a $$ B. b $$ C. c $$ Answer: A",
            "q2: Pick $$ A. a $$ B. b $$ C. c $$ Answer: A",
            "4) Pick $$ A. a $$ B. b $$ C. c $$ Answer: A",
        ] {
            assert_eq!(parse(line).unwrap().text, "Pick", "{}", line);
        }
    }

    #[test]
    fn test_answer_letter_without_option() {
        // 字母 D 没有对应选项：解析成功，交给校验环节拒绝
        let q = parse("Pick $$ A. one $$ B. two $$ C. three $$ Answer: D").unwrap();
        assert_eq!(q.answer_letter, Letter::D);
        assert_eq!(q.answer_text, "");
    }

    #[test]
    fn test_non_matching_lines() {
        assert!(parse("").is_none());
        assert!(parse("just some chatter").is_none());
        assert!(parse("Pick $$ A. one $$ B. two $$ Answer: A").is_none());
        assert!(parse("Pick $$ A. one $$ B. two $$ C. three $$ Answer: E").is_none());
        assert!(parse("Q: x || A) 1 || B) 2 || C) 3 || Answer: A").is_none());
    }
}
