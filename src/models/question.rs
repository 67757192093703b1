use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::services::answer_checker;
use crate::services::validator::{self, ValidationError};

/// 选项字母
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// 按显示顺序排列的全部字母
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
        }
    }

    /// 从单个字符解析（不区分大小写）
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            _ => None,
        }
    }

    /// 从用户输入解析：去除首尾空白后必须恰好是一个字符
    pub fn from_input(input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// 从存储文档中的键解析，只接受大写的 "A".."D"
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "A" => Some(Letter::A),
            "B" => Some(Letter::B),
            "C" => Some(Letter::C),
            "D" => Some(Letter::D),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 题目选项
///
/// A、B、C 必有，D 可选。遍历顺序固定为 A、B、C、(D)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D", default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl Options {
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: Option<String>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d,
        }
    }

    pub fn get(&self, letter: Letter) -> Option<&str> {
        match letter {
            Letter::A => Some(&self.a),
            Letter::B => Some(&self.b),
            Letter::C => Some(&self.c),
            Letter::D => self.d.as_deref(),
        }
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.get(letter).is_some()
    }

    pub fn has_d(&self) -> bool {
        self.d.is_some()
    }

    /// 按 A、B、C、(D) 顺序遍历存在的选项
    pub fn iter(&self) -> impl Iterator<Item = (Letter, &str)> + '_ {
        Letter::ALL
            .into_iter()
            .filter_map(move |letter| self.get(letter).map(|text| (letter, text)))
    }

    /// 有效答案字母集合的展示形式
    pub fn letters_label(&self) -> &'static str {
        if self.has_d() {
            "A/B/C/D"
        } else {
            "A/B/C"
        }
    }
}

/// 标准化后的选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub text: String,
    pub options: Options,
    #[serde(rename = "answer")]
    pub answer_letter: Letter,
    pub answer_text: String,
}

impl Question {
    /// 答案文本取自对应选项；字母没有对应选项时为空串
    pub fn from_option_answer(text: String, options: Options, answer_letter: Letter) -> Self {
        let answer_text = options.get(answer_letter).unwrap_or_default().to_string();
        Self {
            text,
            options,
            answer_letter,
            answer_text,
        }
    }

    /// 判断用户的回复是否正确
    pub fn is_correct(&self, reply: &str) -> bool {
        answer_checker::check_answer(
            reply,
            self.answer_letter.as_str(),
            &self.answer_text,
            &self.options,
        )
    }
}

/// 数据库中读回的松散题目文档，所有字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
}

impl From<&Question> for QuestionRecord {
    fn from(q: &Question) -> Self {
        let options = q
            .options
            .iter()
            .map(|(letter, text)| (letter.as_str().to_string(), text.to_string()))
            .collect();
        Self {
            q: Some(q.text.clone()),
            options: Some(options),
            answer: Some(q.answer_letter.as_str().to_string()),
            answer_text: Some(q.answer_text.clone()),
        }
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ValidationError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        validator::check_record(&record)?;

        // check_record 已保证以下字段存在
        let mut options = record.options.unwrap_or_default();
        let mut take = |key: &str| options.remove(key);
        let a = take("A").unwrap_or_default();
        let b = take("B").unwrap_or_default();
        let c = take("C").unwrap_or_default();
        let d = take("D");
        let options = Options::new(a, b, c, d);

        let answer = record.answer.unwrap_or_default();
        let answer_letter =
            Letter::from_key(&answer).ok_or(ValidationError::InvalidAnswer(answer))?;

        let answer_text = match record.answer_text {
            Some(text) if !text.is_empty() => text,
            _ => options.get(answer_letter).unwrap_or_default().to_string(),
        };

        Ok(Self {
            text: record.q.unwrap_or_default(),
            options,
            answer_letter,
            answer_text,
        })
    }
}

/// 一组题目，导出为 TOML 的单位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }
}
