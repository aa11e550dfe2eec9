//! 报告生成流程 - 流程层
//!
//! 核心职责：定义"一次查询"的完整处理流程
//!
//! 流程顺序：
//! 1. MES 查询（带重试）
//! 2. 提取 data 键值
//! 3. 模板合并
//! 4. 写报告（致命）→ 写原始 JSON（非致命兜底）

use std::path::PathBuf;

use tracing::{info, warn};

use crate::clients::MesClient;
use crate::config::{resource_path, Settings};
use crate::error::AppError;
use crate::services::{template_merger, ReportWriter};

/// 报告生成流程
///
/// - 编排完整的查询到落盘流程
/// - 不持有配置整体，只保留自己需要的路径
/// - 只依赖客户端与业务能力（services）
pub struct ReportFlow {
    mes_client: MesClient,
    report_writer: ReportWriter,
    template_path: PathBuf,
}

impl ReportFlow {
    /// 创建新的报告生成流程
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        Ok(Self {
            mes_client: MesClient::new(settings)?,
            report_writer: ReportWriter::new(
                resource_path(&settings.output_path),
                resource_path(&settings.raw_output_path),
            ),
            template_path: resource_path(&settings.template_path),
        })
    }

    /// 执行完整的报告生成流程
    ///
    /// # 参数
    /// - `serial`: 主板序列号
    pub async fn run(&self, serial: &str) -> Result<(), AppError> {
        // ========== 流程 1: 查询 MES ==========
        let record = self.mes_client.fetch(serial).await?;
        if let Some(message) = record.message() {
            info!("MES Message: {}", message);
        }

        // ========== 流程 2: 提取 data 键值 ==========
        let data = record.data_map();
        if data.is_empty() {
            warn!("⚠️ MES 响应中没有可用的 data 键值");
        } else {
            info!("✓ 取得 {} 个 data 键值", data.len());
        }

        // ========== 流程 3: 模板合并 ==========
        let template_lines = template_merger::load_template_lines(&self.template_path).await;
        let merged = template_merger::merge(&template_lines, &data);
        info!("✓ 模板合并完成，共 {} 行", merged.len());

        // ========== 流程 4: 落盘 ==========
        self.report_writer.write_report(&merged).await?;

        // 原始 JSON 写失败只记录，不影响整体结果
        if let Err(e) = self.report_writer.write_raw(&record).await {
            warn!("⚠️ 原始 JSON 写入失败（不影响流程）: {}", e);
        }

        Ok(())
    }
}
