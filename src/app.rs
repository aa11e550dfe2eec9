//! 应用编排层
//!
//! 管理一次运行的生命周期：启动横幅、读主板 SN、驱动报告流程。

use tracing::info;

use crate::config::Settings;
use crate::error::AppError;
use crate::services::serial_source;
use crate::utils::logging::{log_finished, log_startup};
use crate::workflow::ReportFlow;

/// 应用主结构
pub struct App {
    settings: Settings,
    flow: ReportFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(settings: Settings) -> Result<Self, AppError> {
        log_startup(env!("CARGO_PKG_VERSION"));
        info!("MES 服务器: {}", settings.mes_server);
        info!(
            "重试策略: {} 次，间隔 {} 秒，单次超时 {} 秒",
            settings.retry_count, settings.retry_delay, settings.request_timeout
        );

        let flow = ReportFlow::new(&settings)?;
        Ok(Self { settings, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<(), AppError> {
        // 读取主板 SN
        let serial = serial_source::read_serial(&self.settings.mb_sn_path).await?;

        // 查询 MES 并生成报告
        self.flow.run(&serial).await?;

        log_finished(&self.settings.output_path);
        Ok(())
    }
}
