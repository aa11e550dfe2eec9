//! MES API 客户端
//!
//! 封装所有与 MES 系统相关的调用逻辑：组装查询 URL、
//! 带重试的 HTTP GET、双层成功判定（HTTP 200 且业务 success 为 true）。

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::{AppError, AttemptError};
use crate::models::MesRecord;
use crate::utils::logging::truncate_text;

/// 单次尝试日志中响应体的最大显示长度
const BODY_SNIPPET_LEN: usize = 200;

/// MES API 客户端
pub struct MesClient {
    client: Client,
    base_url: String,
    api_fragment: String,
    retry_count: u32,
    retry_delay: u64,
}

impl MesClient {
    /// 创建新的 MES 客户端
    ///
    /// 请求超时在这里固定进 HTTP 客户端，覆盖连接与读取全程。
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.mes_server.clone(),
            api_fragment: settings.mes_api.clone(),
            retry_count: settings.retry_count,
            retry_delay: settings.retry_delay,
        })
    }

    /// 以主板 SN 为键查询 MES 制造记录
    ///
    /// 最多尝试 retry_count 次；HTTP 200 且业务 success == true
    /// 才算成功，其余情况（传输失败、非 200、非法 JSON、业务失败）
    /// 一律计为本次尝试失败，间隔 retry_delay 秒后重试。
    ///
    /// # 参数
    /// - `serial`: 主板序列号
    ///
    /// # 返回
    /// 返回解析后的 MES 记录；重试用尽后返回终态错误
    pub async fn fetch(&self, serial: &str) -> Result<MesRecord, AppError> {
        let url = self.build_url(serial);
        info!("准备连接 MES API: {}", url);

        for attempt in 1..=self.retry_count {
            info!("连接尝试 {}/{}...", attempt, self.retry_count);

            match self.try_fetch(&url).await {
                Ok(record) => {
                    info!("✓ MES 业务逻辑成功 (HTTP {})", record.status);
                    return Ok(record);
                }
                Err(e) => log_attempt_failure(attempt, &e),
            }

            // 非最后一次尝试时等待后重试
            if attempt < self.retry_count {
                info!("等待 {} 秒后重试...", self.retry_delay);
                sleep(Duration::from_secs(self.retry_delay)).await;
            }
        }

        error!("已重试 {} 次，仍无法从 MES 取得资料", self.retry_count);
        Err(AppError::MesUnreachable {
            url,
            attempts: self.retry_count,
        })
    }

    /// 单次连接尝试
    async fn try_fetch(&self, url: &str) -> Result<MesRecord, AttemptError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(
            "Response Status: {}, Response Body: {}",
            status,
            truncate_text(&text, BODY_SNIPPET_LEN)
        );

        if status != 200 {
            return Err(AttemptError::BadStatus { status });
        }

        let body: Value = serde_json::from_str(&text).map_err(|_| AttemptError::InvalidJson)?;

        // HTTP 200 不代表成功，还要看业务侧 success 标志
        match body.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(MesRecord {
                status,
                body,
                raw_text: text,
            }),
            _ => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("No message provided.")
                    .to_string();
                Err(AttemptError::BusinessRejected { message })
            }
        }
    }

    /// 组装查询 URL
    ///
    /// 服务器地址去掉尾部斜杠，API 片段去掉头部斜杠，末尾直接接 SN。
    fn build_url(&self, serial: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_fragment.trim_start_matches('/'),
            serial
        )
    }
}

/// 按失败类型输出本次尝试的诊断日志
fn log_attempt_failure(attempt: u32, error: &AttemptError) {
    match error {
        AttemptError::Transport(e) => {
            error!("第 {} 次尝试发生 HTTP 请求异常: {}", attempt, e);
        }
        AttemptError::BadStatus { status } => {
            warn!("第 {} 次尝试连接失败，状态码: {}", attempt, status);
        }
        AttemptError::InvalidJson => {
            error!("第 {} 次尝试无法将 MES 响应解析为 JSON", attempt);
        }
        AttemptError::BusinessRejected { message } => {
            warn!(
                "第 {} 次尝试 MES 业务逻辑失败，Message: {}",
                attempt, message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(server: &str, api: &str) -> Settings {
        Settings {
            mes_server: server.to_string(),
            mes_api: api.to_string(),
            mb_sn_path: "sn.txt".to_string(),
            retry_count: 3,
            retry_delay: 5,
            template_path: "template.txt".to_string(),
            output_path: "MES.txt".to_string(),
            raw_output_path: "MES_raw.json".to_string(),
            log_path: "./log/".to_string(),
            request_timeout: 10,
        }
    }

    #[test]
    fn url_joins_server_fragment_and_serial() {
        let client = MesClient::new(&settings(
            "http://mes.local:8080",
            "api/mes/record/",
        ))
        .unwrap();
        assert_eq!(
            client.build_url("SN123"),
            "http://mes.local:8080/api/mes/record/SN123"
        );
    }

    #[test]
    fn url_normalizes_redundant_slashes() {
        let client = MesClient::new(&settings(
            "http://mes.local:8080///",
            "///api/mes/record/",
        ))
        .unwrap();
        assert_eq!(
            client.build_url("SN123"),
            "http://mes.local:8080/api/mes/record/SN123"
        );
    }

    #[test]
    fn url_without_any_slashes_still_joins() {
        let client = MesClient::new(&settings("http://mes.local", "query?sn=")).unwrap();
        assert_eq!(client.build_url("SN9"), "http://mes.local/query?sn=SN9");
    }
}
