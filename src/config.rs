//! 程序配置模块
//!
//! 从可执行文件同目录的 config.toml 读取 `[global]` 配置表。
//! 必填项（mes_server / mes_api / mb_sn_path）缺失时直接失败，
//! 不允许核心流程在无配置下运行；其余配置项带默认值。

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置
///
/// 启动时加载一次并校验，之后各层只读。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// MES 服务器地址
    pub mes_server: String,
    /// MES API 路径片段
    pub mes_api: String,
    /// 主板 SN 文件路径
    pub mb_sn_path: String,
    /// 连接重试次数
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// 重试间隔（秒）
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
    /// 报告模板路径
    #[serde(default = "default_template_path")]
    pub template_path: String,
    /// 处理后报告输出路径
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// 原始 JSON 输出路径
    #[serde(default = "default_raw_output_path")]
    pub raw_output_path: String,
    /// 日志目录
    #[serde(default = "default_log_path")]
    pub log_path: String,
    /// 单次请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// config.toml 的顶层结构
#[derive(Debug, Deserialize)]
struct ConfigFile {
    global: Settings,
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

fn default_template_path() -> String {
    "template.txt".to_string()
}

fn default_output_path() -> String {
    "MES.txt".to_string()
}

fn default_raw_output_path() -> String {
    "MES_raw.json".to_string()
}

fn default_log_path() -> String {
    "./log/".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Settings {
    /// 从指定路径加载并校验配置
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.is_file() {
            return Err(ConfigError::NotFound {
                path: config_path.display().to_string(),
            });
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadFailed {
                path: config_path.display().to_string(),
                source: e,
            })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let settings = file.global;
        settings.validate()?;

        tracing::info!("✓ 配置加载成功");
        Ok(settings)
    }

    /// 校验配置不变量
    ///
    /// 路径类配置不允许为空，retry_count 至少为 1，超时必须大于 0。
    fn validate(&self) -> Result<(), ConfigError> {
        let non_empty = [
            ("mes_server", &self.mes_server),
            ("mes_api", &self.mes_api),
            ("mb_sn_path", &self.mb_sn_path),
            ("template_path", &self.template_path),
            ("output_path", &self.output_path),
            ("raw_output_path", &self.raw_output_path),
            ("log_path", &self.log_path),
        ];
        for (key, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: "不能为空".to_string(),
                });
            }
        }

        if self.retry_count < 1 {
            return Err(ConfigError::InvalidValue {
                key: "retry_count",
                reason: "必须至少为 1".to_string(),
            });
        }
        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout",
                reason: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }
}

/// 取得相对于可执行文件目录的资源路径
///
/// 取不到可执行文件路径时退回当前目录；传入绝对路径时原样返回。
pub fn resource_path(relative: &str) -> PathBuf {
    let base = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(relative)
}

/// 在严格加载配置前，先宽松地取出日志目录
///
/// 日志初始化必须先于配置加载，这样配置错误本身也能被记录；
/// 配置文件缺失或损坏时退回默认目录。
pub fn peek_log_path(config_path: &Path) -> String {
    std::fs::read_to_string(config_path)
        .ok()
        .and_then(|content| content.parse::<toml::Value>().ok())
        .and_then(|value| {
            value
                .get("global")?
                .get("log_path")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(default_log_path)
}
