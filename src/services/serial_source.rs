//! SN 读取服务 - 业务能力层
//!
//! 只负责"读主板 SN"能力，不关心流程

use std::path::Path;

use tokio::fs;
use tracing::{error, info};

use crate::error::{AppError, SerialReadError};

/// 从指定文件读取主板序列号
///
/// # 参数
/// - `file_path`: SN 文件路径
///
/// # 返回
/// 返回去除首尾空白后的 SN；文件缺失、不可读或内容为空时返回错误
pub async fn read_serial(file_path: &str) -> Result<String, AppError> {
    let path = Path::new(file_path);
    if !path.is_file() {
        error!("SN 文件不存在: {}", file_path);
        return Err(SerialReadError::NotFound {
            path: file_path.to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path).await.map_err(|e| {
        error!("读取 SN 文件失败 ({}): {}", file_path, e);
        SerialReadError::ReadFailed {
            path: file_path.to_string(),
            source: e,
        }
    })?;

    let sn = content.trim();
    if sn.is_empty() {
        error!("SN 文件为空: {}", file_path);
        return Err(SerialReadError::Empty {
            path: file_path.to_string(),
        }
        .into());
    }

    info!("✓ 成功读取 SN: {}", sn);
    Ok(sn.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_trims_serial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sn.txt");
        std::fs::write(&path, "  SN12345678\n").unwrap();

        let sn = tokio_test::block_on(read_serial(path.to_str().unwrap())).unwrap();
        assert_eq!(sn, "SN12345678");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_sn.txt");

        let err = tokio_test::block_on(read_serial(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(
            err,
            AppError::SerialRead(SerialReadError::NotFound { .. })
        ));
    }

    #[test]
    fn whitespace_only_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sn.txt");
        std::fs::write(&path, " \t \n").unwrap();

        let err = tokio_test::block_on(read_serial(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(
            err,
            AppError::SerialRead(SerialReadError::Empty { .. })
        ));
    }
}
