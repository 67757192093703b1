//! LLM 服务 - 业务能力层
//!
//! 负责"生成题目"、"讲解答案"和"自由问答"三种能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::question::Question;
use crate::models::quiz_request::QuizRequest;
use crate::parsing::{parse_quiz_text, ParseReport};

const GENERATION_TEMPERATURE: f32 = 0.7;
const EXPLAIN_TEMPERATURE: f32 = 0.3;
const ASK_TEMPERATURE: f32 = 0.7;

/// 问答的系统提示词
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a friendly study assistant for a multiple-choice quiz bot. \
Answer questions about the quiz topics, explain concepts clearly, suggest how to study them \
and keep answers short and practical. If you are not sure, say so.";

/// LLM 服务
///
/// 职责：
/// - 按主题生成选择题文本并解析为 `Question`
/// - 讲解用户的作答
/// - 回答用户的自由提问
/// - 不持有任何会话状态
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    pro_model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            pro_model_name: config.llm_pro_model_name.clone(),
        }
    }

    /// 根据难度选择模型
    pub fn model_for(&self, request: &QuizRequest) -> &str {
        if request.difficulty.needs_pro_model() {
            &self.pro_model_name
        } else {
            &self.model_name
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `model`: 模型名称
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `temperature`: 采样温度
    ///
    /// # 返回
    /// 返回去除首尾空白后的响应内容
    pub async fn send_to_llm(
        &self,
        model: &str,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", model);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(2048u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }

    /// 生成题目原始文本
    pub async fn generate_quiz_text(&self, request: &QuizRequest) -> Result<String> {
        let model = self.model_for(request);
        info!(
            "🤖 生成题目: 主题 '{}'，{} 道，难度 {}，模型 {}",
            request.topic, request.count, request.difficulty, model
        );

        let prompt = build_quiz_prompt(request);
        self.send_to_llm(model, &prompt, None, GENERATION_TEMPERATURE)
            .await
    }

    /// 生成题目并解析、校验
    pub async fn generate_questions(&self, request: &QuizRequest) -> Result<ParseReport> {
        let text = self.generate_quiz_text(request).await?;
        let report = parse_quiz_text(&text);

        if report.accepted.len() < request.count {
            warn!(
                "请求 {} 道题，仅得到 {} 道有效题目",
                request.count,
                report.accepted.len()
            );
        }

        Ok(report)
    }

    /// 自由问答，`context` 为可选的前文
    pub async fn generate_response(&self, user_input: &str, context: Option<&str>) -> Result<String> {
        info!("🤖 问答请求，模型 {}", self.model_name);
        let prompt = build_ask_prompt(user_input, context);
        self.send_to_llm(
            &self.model_name,
            &prompt,
            Some(ASSISTANT_SYSTEM_PROMPT),
            ASK_TEMPERATURE,
        )
        .await
    }

    /// 讲解用户的作答
    pub async fn explain_answer(&self, question: &Question, user_answer: &str) -> Result<String> {
        let correct = format!("{}) {}", question.answer_letter, question.answer_text);
        let prompt = build_explain_prompt(&question.text, user_answer, &correct);
        self.send_to_llm(&self.model_name, &prompt, None, EXPLAIN_TEMPERATURE)
            .await
    }
}

/// 构建生成题目的提示词
///
/// 输出格式与 `parsing::split_generated_text` 的块格式一致
pub fn build_quiz_prompt(request: &QuizRequest) -> String {
    format!(
        r#"You are a Quiz Generator AI.
Generate {count} multiple-choice quiz questions on the topic "{topic}".
Difficulty: {difficulty}.

Rules:
1. Each question must have exactly 4 options.
2. Label options as A., B., C., D.
3. Clearly specify the correct answer at the end as: Answer: X
4. Output must ONLY follow the below format (no extra explanation, no extra text):

Format Example:
Q) What is the capital of France?
A. Berlin
B. Madrid
C. Paris
D. Rome
Answer: C

Generate {count} questions now:"#,
        count = request.count,
        topic = request.topic,
        difficulty = request.difficulty,
    )
}

/// 构建问答的用户消息
pub fn build_ask_prompt(user_input: &str, context: Option<&str>) -> String {
    let mut prompt = String::new();
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("Context: {}\n\n", context));
    }
    prompt.push_str(&format!("User Input: {}\n\nResponse:", user_input.trim()));
    prompt
}

/// 构建讲解答案的提示词
pub fn build_explain_prompt(question: &str, user_answer: &str, correct_answer: &str) -> String {
    format!(
        r#"Question: {question}
User's Answer: {user_answer}
Correct Answer: {correct_answer}

Please explain:
1. Whether the user's answer is correct or incorrect
2. Why the correct answer is right
3. Provide a brief educational explanation

Keep the response concise and educational."#
    )
}
