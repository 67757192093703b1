use thiserror::Error;

use crate::models::quiz_request::QuizRequestError;
use crate::services::validator::ValidationError;

/// 应用程序错误类型
///
/// 解析、校验、判定本身从不报错（返回 `Option` / `bool`），
/// 这里只覆盖外围的文件、配置和 LLM 调用。
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 权限或去重拦截
    #[error("请求被拒绝: {0}")]
    Access(#[from] AccessError),
    /// 生成请求参数错误
    #[error("请求错误: {0}")]
    Request(#[from] QuizRequestError),
    /// 题目校验失败
    #[error("题目无效: {0}")]
    Validation(#[from] ValidationError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少必需的配置项
    #[error("缺少配置项: {0}")]
    Missing(&'static str),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 生成结果中没有可用的题目
    #[error("LLM 未生成任何有效题目 (主题: {topic})")]
    NoValidQuestions { topic: String },
}

/// 请求被拦截的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// 不在所有者 / sudo 名单中
    #[error("❌ 用户 {user_id} 无权使用 AI 功能")]
    Unauthorized { user_id: i64 },
    /// 窗口内的重复请求
    #[error("⏳ 用户 {user_id} 的相同请求仍在处理中，请稍后再试")]
    Duplicate { user_id: i64 },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AppError::File(FileError::NotFound { path })
        } else {
            AppError::File(FileError::ReadFailed { path, source })
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
