//! # MES Report Tool
//!
//! 产线 MES 制造记录查询工具：以本机存放的主板 SN 为键，
//! 向 MES HTTP 接口查询制造记录，填入行式模板后落盘，
//! 并同时保存一份原始 JSON。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装远端调用
//! - `MesClient` - 带重试与双层成功判定的 MES 查询
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `serial_source` - 读主板 SN 能力
//! - `template_merger` - 模板合并能力（纯函数）
//! - `ReportWriter` - 报告落盘能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次查询"的完整处理流程
//! - `ReportFlow` - 流程编排（查询 → 合并 → 落盘）
//!
//! ### ④ 编排层（App）
//! - `app` - 管理运行生命周期，衔接配置、SN 与流程
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod presenter;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::MesClient;
pub use config::Settings;
pub use error::{AppError, AppResult};
pub use models::MesRecord;
pub use presenter::{ConsolePresenter, DialogPresenter, ErrorPresenter};
pub use workflow::ReportFlow;
