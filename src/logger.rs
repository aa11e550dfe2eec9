//! 日志初始化模块
//!
//! 同时输出到控制台与日志目录下的 debug_时间戳.log 文件；
//! 日志目录无法创建时退化为仅控制台输出。

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志
///
/// # 参数
/// - `log_dir`: 日志目录，按需创建
pub fn init(log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let stdout_layer = fmt::layer().with_target(false);

    match prepare_log_file(log_dir) {
        Ok(file) => {
            let file_layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
            tracing::warn!("无法创建日志文件 ({}): {}，仅输出到控制台", log_dir.display(), e);
        }
    }
}

/// 创建本次运行的日志文件
fn prepare_log_file(log_dir: &Path) -> std::io::Result<File> {
    fs::create_dir_all(log_dir)?;
    let file_name = format!(
        "debug_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    File::create(log_dir.join(file_name))
}
