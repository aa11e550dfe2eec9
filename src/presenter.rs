//! 错误呈现模块
//!
//! 把最终的失败信息呈现给产线操作人员。对话框与控制台两种实现，
//! 启动时选定一次，由调用方显式传入，不读全局状态。

use tracing::error;

/// 错误呈现能力
pub trait ErrorPresenter {
    /// 呈现一条错误信息
    fn present(&self, message: &str);
}

/// 控制台呈现：输出到标准错误流
pub struct ConsolePresenter;

impl ErrorPresenter for ConsolePresenter {
    fn present(&self, message: &str) {
        eprintln!("\n[ERROR] {}\n", message);
    }
}

/// 对话框呈现：弹出系统消息框，失败时退回控制台
pub struct DialogPresenter;

impl ErrorPresenter for DialogPresenter {
    fn present(&self, message: &str) {
        if let Err(e) = show_message_box(message) {
            error!("无法创建 GUI 窗口: {}", e);
            eprintln!("\n[ERROR] {}\n", message);
        }
    }
}

/// 选择当前环境下的呈现方式
///
/// Windows 机台使用对话框，其余环境（Linux/PXE）使用控制台。
pub fn select_presenter() -> Box<dyn ErrorPresenter> {
    if cfg!(windows) {
        Box::new(DialogPresenter)
    } else {
        Box::new(ConsolePresenter)
    }
}

#[cfg(windows)]
fn show_message_box(message: &str) -> std::io::Result<()> {
    use std::process::Command;

    let script = format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         [System.Windows.Forms.MessageBox]::Show('{}', 'Connection Failed') | Out-Null",
        message.replace('\'', "''")
    );
    let status = Command::new("powershell")
        .args(["-NoProfile", "-Command", script.as_str()])
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "消息框进程退出码非零",
        ))
    }
}

#[cfg(not(windows))]
fn show_message_box(_message: &str) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "当前平台没有 GUI 对话框",
    ))
}
