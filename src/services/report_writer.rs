//! 报告写入服务 - 业务能力层
//!
//! 只负责"落盘"能力：处理后报告与原始 JSON 两个文件。
//! 处理后报告写失败是致命错误；原始 JSON 写失败由调用方降级为警告。

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use tokio::fs;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::MesRecord;

/// 报告写入服务
pub struct ReportWriter {
    output_path: PathBuf,
    raw_output_path: PathBuf,
}

impl ReportWriter {
    /// 创建新的报告写入服务
    pub fn new(output_path: impl Into<PathBuf>, raw_output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            raw_output_path: raw_output_path.into(),
        }
    }

    /// 写入处理后的报告
    ///
    /// 输出目录不存在时自动创建。
    pub async fn write_report(&self, lines: &[String]) -> Result<(), AppError> {
        ensure_parent_dir(&self.output_path).await?;

        let content: String = lines.concat();
        fs::write(&self.output_path, content)
            .await
            .map_err(|e| AppError::Write {
                path: self.output_path.display().to_string(),
                source: e,
            })?;

        info!("✓ MES 报告已写入: {}", self.output_path.display());
        Ok(())
    }

    /// 写入原始 JSON
    ///
    /// 响应体无法重新序列化时，退回写入原始响应文本。
    pub async fn write_raw(&self, record: &MesRecord) -> Result<(), AppError> {
        ensure_parent_dir(&self.raw_output_path).await?;

        let content = match pretty_json(&record.body) {
            Ok(json) => json,
            Err(e) => {
                warn!("⚠️ 响应体无法重新序列化: {}，改写原始响应文本", e);
                record.raw_text.clone()
            }
        };

        fs::write(&self.raw_output_path, content)
            .await
            .map_err(|e| AppError::Write {
                path: self.raw_output_path.display().to_string(),
                source: e,
            })?;

        info!("✓ 原始 JSON 已写入: {}", self.raw_output_path.display());
        Ok(())
    }
}

/// 按 4 空格缩进输出 JSON，非 ASCII 字符原样保留
fn pretty_json(value: &serde_json::Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Write {
                    path: parent.display().to_string(),
                    source: e,
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(body: serde_json::Value) -> MesRecord {
        let raw_text = body.to_string();
        MesRecord {
            status: 200,
            body,
            raw_text,
        }
    }

    #[test]
    fn report_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("MES.txt");
        let writer = ReportWriter::new(&path, dir.path().join("raw.json"));

        let lines = vec!["first\n".to_string(), "second\n".to_string()];
        tokio_test::block_on(writer.write_report(&lines)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn raw_dump_uses_four_space_indent_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        let writer = ReportWriter::new(dir.path().join("MES.txt"), &path);

        let record = record(json!({"success": true, "message": "序号已找到"}));
        tokio_test::block_on(writer.write_raw(&record)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("    \"success\": true"));
        assert!(written.contains("序号已找到"));
        assert!(!written.contains("\\u"));
    }

    #[test]
    fn report_write_failure_is_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        // 输出路径指向已存在的目录，写入必然失败
        let path = dir.path().join("as_dir");
        std::fs::create_dir(&path).unwrap();
        let writer = ReportWriter::new(&path, dir.path().join("raw.json"));

        let err = tokio_test::block_on(writer.write_report(&["x\n".to_string()])).unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}
