//! 批量处理入口
//!
//! 读取（或生成）题目文本 → 解析 → 校验 → 导出 TOML，
//! 以及单次 AI 问答

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_quiz_text, save_question_set, QuestionSet};
use crate::parsing::{parse_quiz_text, ParseReport};
use crate::services::format_question;
use crate::utils::logging::{append_report, init_report_file, log_startup, print_final_stats};
use crate::workflow::Assistant;

/// 应用程序
///
/// 持有唯一的 `Assistant`，多次调用共享同一张去重表。
pub struct App {
    config: Config,
    assistant: Assistant,
}

impl App {
    /// 校验配置并准备报告文件
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().map_err(AppError::from)?;

        init_report_file(&config.report_file, &config.quiz_set_name).await?;

        let assistant = Assistant::new(&config);
        Ok(Self { config, assistant })
    }

    /// 以配置中的请求用户身份提问
    pub async fn ask(&mut self, input: &str, context: Option<&str>) -> Result<String> {
        self.assistant
            .handle_ai_request(self.config.requester_id, input, context)
            .await
    }

    /// 运行一次完整的处理流程
    pub async fn run(&mut self) -> Result<ParseReport> {
        let report = match self.config.quiz_topic.clone() {
            Some(topic) => {
                log_startup(&format!("LLM 生成 (主题: {})", topic));
                self.assistant
                    .handle_quiz_generation(
                        self.config.requester_id,
                        &topic,
                        self.config.quiz_count,
                        &self.config.quiz_difficulty,
                    )
                    .await?
            }
            None => {
                log_startup(&self.config.quiz_file);
                let text = load_quiz_text(Path::new(&self.config.quiz_file)).await?;
                parse_quiz_text(&text)
            }
        };

        for (idx, question) in report.accepted.iter().enumerate() {
            info!("\n{}", format_question(question, idx + 1));
        }

        append_report(&self.config.report_file, &report).await?;

        let set = QuestionSet::new(&self.config.quiz_set_name, report.accepted.clone());
        save_question_set(Path::new(&self.config.export_file), &set)
            .await
            .context("导出题组失败")?;

        print_final_stats(&report, &self.config.export_file);
        Ok(report)
    }
}
