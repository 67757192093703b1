//! # Quizbot
//!
//! 选择题文本解析与判题核心
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 标准题目 `Question`、存储文档 `QuestionRecord`、生成请求 `QuizRequest`
//! - `models/loaders` - 题目文本读取、TOML 题组导入导出
//!
//! ### ② 解析层（Parsing）
//! - `parsing/` - 按固定优先级尝试多种单行格式，第一个匹配的格式胜出
//! - `split_generated_text` - 把 LLM 输出的多行块拼成单行格式
//!
//! ### ③ 业务能力层（Services）
//! - `validator` - 题目入库/展示前的校验
//! - `answer_checker` - 字母或全文作答的判定
//! - `formatter` - 题目展示文本
//! - `LlmService` - 题目生成、答案讲解与问答
//! - `RequestDebouncer` - 重复请求拦截
//!
//! ### ④ 流程层（Workflow）
//! - `QuizSession` - 一组题的作答流程与统计
//! - `Assistant` - AI 请求的权限检查与去重
//!
//! 解析、校验、判定、展示都是无状态的纯函数，可在任意上下文并发调用。

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod parsing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AccessError, AppError, AppResult};
pub use models::{Letter, Options, Question, QuestionRecord, QuestionSet};
pub use parsing::{parse_question, parse_quiz_text, ParseReport, QuestionParser};
pub use services::{check_answer, format_question, validate, validate_record};
pub use workflow::{AnswerRecord, Assistant, QuizSession, QuizSummary};
