//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::parsing::ParseReport;

/// 初始化报告文件
///
/// # 参数
/// - `report_file_path`: 报告文件路径
/// - `set_name`: 题组名称
pub async fn init_report_file(report_file_path: &str, set_name: &str) -> Result<()> {
    let header = format!(
        "{}\n题目处理报告 [{}] - {}\n{}\n\n",
        "=".repeat(60),
        set_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(report_file_path, header)
        .await
        .with_context(|| format!("无法写入报告文件: {}", report_file_path))?;
    Ok(())
}

/// 追加解析统计到报告文件
pub async fn append_report(report_file_path: &str, report: &ParseReport) -> Result<()> {
    let content = format!(
        "有效: {}\n无效: {}\n无法解析: {}\n共计: {}\n",
        report.accepted.len(),
        report.rejected,
        report.unparsed,
        report.total()
    );
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_file_path)
        .await
        .with_context(|| format!("无法打开报告文件: {}", report_file_path))?;
    file.write_all(content.as_bytes())
        .await
        .with_context(|| format!("无法写入报告文件: {}", report_file_path))?;
    file.flush()
        .await
        .with_context(|| format!("无法写入报告文件: {}", report_file_path))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 题目来源描述
pub fn log_startup(source: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目解析模式");
    info!("📄 题目来源: {}", source);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 解析结果
/// - `export_path`: 导出文件路径
pub fn print_final_stats(report: &ParseReport, export_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 有效: {}/{}", report.accepted.len(), report.total());
    info!("❌ 无效: {}", report.rejected);
    info!("❔ 无法解析: {}", report.unparsed);
    info!("{}", "=".repeat(60));
    info!("\n题组已导出至: {}", export_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("题目解析测试", 2), "题目...");
    }

    #[tokio::test]
    async fn test_report_file() {
        let path = std::env::temp_dir().join(format!("quizbot_report_{}.txt", std::process::id()));
        let path = path.to_string_lossy().to_string();

        init_report_file(&path, "demo").await.unwrap();
        append_report(&path, &ParseReport::default()).await.unwrap();
        append_report(&path, &ParseReport::default()).await.unwrap();

        // 追加不覆盖已有的表头和记录
        let content = fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("题目处理报告 [demo]"));
        assert_eq!(content.matches("共计: 0").count(), 2);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_append_report_reports_open_failure() {
        let dir = std::env::temp_dir().join(format!("quizbot_report_dir_{}", std::process::id()));
        fs::create_dir_all(&dir).await.unwrap();

        // 目录无法以追加方式打开，错误必须向上传递
        let result = append_report(&dir.to_string_lossy(), &ParseReport::default()).await;
        assert!(result.is_err());

        let _ = fs::remove_dir(&dir).await;
    }
}
