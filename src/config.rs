use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题目文本文件
    pub quiz_file: String,
    /// 导出的 TOML 文件
    pub export_file: String,
    /// 处理报告文件
    pub report_file: String,
    /// 题组名称
    pub quiz_set_name: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 题目生成（设置主题时改为调用 LLM 生成） ---
    pub quiz_topic: Option<String>,
    pub quiz_count: usize,
    pub quiz_difficulty: String,
    /// 发起请求的用户 ID（用于权限检查和去重）
    pub requester_id: i64,
    // --- 问答（设置后只执行一次问答） ---
    pub ask_input: Option<String>,
    pub ask_context: Option<String>,
    // --- 权限配置 ---
    pub owner_id: i64,
    pub sudo_users: Vec<i64>,
    // --- 去重配置 ---
    pub debounce_window_secs: u64,
    pub debounce_retention_secs: u64,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_pro_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_file: "quiz.txt".to_string(),
            export_file: "quiz_set.toml".to_string(),
            report_file: "quiz_report.txt".to_string(),
            quiz_set_name: "default".to_string(),
            verbose_logging: false,
            quiz_topic: None,
            quiz_count: 5,
            quiz_difficulty: "medium".to_string(),
            requester_id: 0,
            ask_input: None,
            ask_context: None,
            owner_id: 0,
            sudo_users: Vec::new(),
            debounce_window_secs: 10,
            debounce_retention_secs: 60,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash-lite".to_string(),
            llm_pro_model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            quiz_file: std::env::var("QUIZ_FILE").unwrap_or(default.quiz_file),
            export_file: std::env::var("EXPORT_FILE").unwrap_or(default.export_file),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
            quiz_set_name: std::env::var("QUIZ_SET_NAME").unwrap_or(default.quiz_set_name),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            quiz_topic: std::env::var("QUIZ_TOPIC").ok().filter(|t| !t.trim().is_empty()),
            quiz_count: std::env::var("QUIZ_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.quiz_count),
            quiz_difficulty: std::env::var("QUIZ_DIFFICULTY").unwrap_or(default.quiz_difficulty),
            requester_id: std::env::var("REQUESTER_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(default.requester_id),
            ask_input: std::env::var("ASK_INPUT").ok().filter(|t| !t.trim().is_empty()),
            ask_context: std::env::var("ASK_CONTEXT").ok().filter(|t| !t.trim().is_empty()),
            owner_id: std::env::var("OWNER_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(default.owner_id),
            sudo_users: std::env::var("SUDO_USERS").map(|v| parse_user_ids(&v)).unwrap_or(default.sudo_users),
            debounce_window_secs: std::env::var("DEBOUNCE_WINDOW_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.debounce_window_secs),
            debounce_retention_secs: std::env::var("DEBOUNCE_RETENTION_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.debounce_retention_secs),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_pro_model_name: std::env::var("LLM_PRO_MODEL_NAME").unwrap_or(default.llm_pro_model_name),
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_secs(self.debounce_window_secs)
    }

    pub fn debounce_retention(&self) -> Duration {
        Duration::from_secs(self.debounce_retention_secs)
    }

    /// 有权使用 LLM 功能的用户：所有者加 sudo 用户
    pub fn authorized_users(&self) -> Vec<i64> {
        std::iter::once(self.owner_id)
            .chain(self.sudo_users.iter().copied())
            .collect()
    }

    /// 启用 LLM 生成或问答时检查必需的配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let uses_llm = self.quiz_topic.is_some() || self.ask_input.is_some();
        if uses_llm && self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::Missing("LLM_API_KEY"));
        }
        if self.debounce_window_secs == 0 {
            return Err(ConfigError::EnvVarParseFailed {
                var_name: "DEBOUNCE_WINDOW_SECS".to_string(),
                value: "0".to_string(),
                expected_type: "正整数".to_string(),
            });
        }
        Ok(())
    }
}

/// 解析逗号或空白分隔的用户 ID 列表，忽略无法解析的项
fn parse_user_ids(value: &str) -> Vec<i64> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce_window(), Duration::from_secs(10));
        assert_eq!(config.debounce_retention(), Duration::from_secs(60));
    }

    #[test]
    fn test_topic_requires_api_key() {
        let config = Config {
            quiz_topic: Some("Rust".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("LLM_API_KEY"))
        ));

        let config = Config {
            ask_input: Some("How do I learn Rust?".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_authorized_users() {
        let config = Config {
            owner_id: 1,
            sudo_users: vec![7, 9],
            ..Config::default()
        };
        assert_eq!(config.authorized_users(), vec![1, 7, 9]);
    }

    #[test]
    fn test_parse_user_ids() {
        assert_eq!(parse_user_ids("1, 2,3 4"), vec![1, 2, 3, 4]);
        assert_eq!(parse_user_ids("x,5,"), vec![5]);
        assert!(parse_user_ids("").is_empty());
    }
}
