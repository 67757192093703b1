//! AI 请求入口 - 流程层
//!
//! 所有 LLM 请求（问答、生成题目）先经过这里：
//! 权限检查 → 去重 → 调用 `LlmService`
//!
//! 去重表随实例存活，调用方应在整个进程内复用同一个 `Assistant`。

use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AccessError, AppError, LlmError};
use crate::models::quiz_request::QuizRequest;
use crate::parsing::ParseReport;
use crate::services::debounce::{request_key, RequestDebouncer};
use crate::services::LlmService;
use crate::utils::logging::truncate_text;

/// AI 请求入口
pub struct Assistant {
    llm: LlmService,
    debouncer: RequestDebouncer,
    authorized: Vec<i64>,
}

impl Assistant {
    pub fn new(config: &Config) -> Self {
        Self {
            llm: LlmService::new(config),
            debouncer: RequestDebouncer::new(config.debounce_window(), config.debounce_retention()),
            authorized: config.authorized_users(),
        }
    }

    pub fn is_authorized(&self, user_id: i64) -> bool {
        self.authorized.contains(&user_id)
    }

    /// 权限检查后再去重；被拒绝的用户不会占用去重记录
    pub fn admit(&mut self, user_id: i64, input: &str, now: Instant) -> Result<(), AccessError> {
        if !self.is_authorized(user_id) {
            warn!("🚫 拒绝未授权用户 {} 的请求", user_id);
            return Err(AccessError::Unauthorized { user_id });
        }

        if !self.debouncer.check(&request_key(user_id, input), now) {
            return Err(AccessError::Duplicate { user_id });
        }

        Ok(())
    }

    /// 处理问答请求
    pub async fn handle_ai_request(
        &mut self,
        user_id: i64,
        user_input: &str,
        context: Option<&str>,
    ) -> Result<String> {
        self.admit(user_id, user_input, Instant::now())
            .map_err(AppError::from)?;

        info!(
            "🤖 处理用户 {} 的问答请求: {}",
            user_id,
            truncate_text(user_input, 50)
        );
        self.llm.generate_response(user_input, context).await
    }

    /// 处理生成题目请求
    ///
    /// 先检查权限，再校验参数，最后去重并调用 LLM。
    pub async fn handle_quiz_generation(
        &mut self,
        user_id: i64,
        topic: &str,
        count: usize,
        difficulty: &str,
    ) -> Result<ParseReport> {
        if !self.is_authorized(user_id) {
            warn!("🚫 拒绝未授权用户 {} 的生成请求", user_id);
            return Err(AppError::from(AccessError::Unauthorized { user_id }).into());
        }

        let request = QuizRequest::new(topic, count, difficulty).map_err(AppError::from)?;
        self.admit(user_id, &generation_input(&request), Instant::now())
            .map_err(AppError::from)?;

        let report = self.llm.generate_questions(&request).await?;
        if report.accepted.is_empty() {
            return Err(AppError::Llm(LlmError::NoValidQuestions {
                topic: request.topic,
            })
            .into());
        }

        Ok(report)
    }
}

/// 生成请求的去重内容，与问答内容区分开
fn generation_input(request: &QuizRequest) -> String {
    format!(
        "quiz|{}|{}|{}",
        request.topic, request.count, request.difficulty
    )
}
