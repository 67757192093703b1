use std::path::Path;
use tokio::fs;

use crate::error::{AppError, AppResult};

/// 读取题目文本文件
///
/// 文件内容可以是每行一道题，也可以是 LLM 输出的多行块格式
pub async fn load_quiz_text(path: &Path) -> AppResult<String> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    tracing::info!(
        "正在加载: {} ({} 行)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        content.lines().count()
    );

    Ok(content)
}
