//! 应用程序错误类型
//!
//! 按失败域划分：配置、SN 读取、MES 连接、文件写入。
//! 单次连接尝试内的失败（[`AttemptError`]）只用于重试判断，
//! 由重试循环记录日志后吞掉，不会直接向上传播。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（致命，不重试）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// SN 文件读取错误（致命，不重试）
    #[error("SN 读取错误: {0}")]
    SerialRead(#[from] SerialReadError),

    /// HTTP 客户端初始化失败（致命）
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// 重试次数用尽后仍未取得业务成功的 MES 响应（致命）
    #[error("无法连接 MES 系统 (已尝试 {attempts} 次): {url}")]
    MesUnreachable { url: String, attempts: u32 },

    /// 文件写入失败（处理后报告为致命，原始 JSON 由调用方降级处理）
    #[error("写入文件失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// 转成提示给产线操作人员的信息
    ///
    /// 细节都在日志里，这里只给出下一步该找谁的简短提示。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => {
                "Failed to load configuration, please check the log.".to_string()
            }
            AppError::SerialRead(_) => {
                "Failed to load SN configuration, please check the log.".to_string()
            }
            AppError::HttpClient(_) => {
                "Failed to initialize HTTP client, please check the log.".to_string()
            }
            AppError::MesUnreachable { url, .. } => format!(
                "Could not connect to MES system.\nURL: {}\nPlease check the network connection or contact IT personnel.",
                url
            ),
            AppError::Write { path, .. } => {
                format!("Could not write to output file '{}'.", path)
            }
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    NotFound { path: String },

    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 解析配置文件失败（含必填项缺失）
    #[error("解析配置文件失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 配置项取值非法
    #[error("配置项 {key} 无效: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// SN 读取错误
#[derive(Debug, Error)]
pub enum SerialReadError {
    /// SN 文件不存在
    #[error("SN 文件不存在: {path}")]
    NotFound { path: String },

    /// 读取 SN 文件失败
    #[error("读取 SN 文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// SN 文件内容为空（含只有空白字符）
    #[error("SN 文件为空: {path}")]
    Empty { path: String },
}

/// 单次连接尝试内的失败
///
/// 这些错误只决定"本次尝试算失败"，是否继续由重试循环裁决。
#[derive(Debug, Error)]
pub enum AttemptError {
    /// 传输层失败（连接错误、超时）
    #[error("HTTP 请求异常: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 状态码非 200
    #[error("连接失败，状态码: {status}")]
    BadStatus { status: u16 },

    /// 响应体不是合法 JSON
    #[error("无法将 MES 响应解析为 JSON")]
    InvalidJson,

    /// HTTP 200 但业务侧 success 不为 true
    #[error("MES 业务逻辑失败: {message}")]
    BusinessRejected { message: String },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
