//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `version`: 程序版本号
pub fn log_startup(version: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 MES 报告工具启动 - 版本: {}", version);
    info!("{}", "=".repeat(60));
}

/// 记录程序结束信息
///
/// # 参数
/// - `output_path`: 报告输出路径
pub fn log_finished(output_path: &str) {
    info!("{}", "=".repeat(60));
    info!("✅ 工具执行完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("报告已保存至: {}", output_path);
    info!("{}", "=".repeat(60));
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
    fn short_text_is_unchanged() {
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_text("制造执行系统", 4), "制造执行...");
    }
}
