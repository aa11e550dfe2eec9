use std::process;

use tracing::{error, info, warn};

use mes_report_tool::app::App;
use mes_report_tool::config::{self, Settings};
use mes_report_tool::error::AppError;
use mes_report_tool::logger;
use mes_report_tool::presenter::{self, ErrorPresenter};

/// 用户中断（Ctrl+C）的约定退出码
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // 初始化日志：日志目录先于严格配置加载宽松取得，
    // 这样配置错误本身也会留在日志里
    let config_path = config::resource_path("config.toml");
    let log_dir = config::resource_path(&config::peek_log_path(&config_path));
    logger::init(&log_dir);

    // 选定错误呈现方式（对话框或控制台）
    let presenter = presenter::select_presenter();

    // 加载配置
    let settings = match Settings::load(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            let e = AppError::from(e);
            error!("配置加载失败: {}", e);
            exit_with_error(presenter.as_ref(), &e);
        }
    };

    // 初始化应用
    let app = match App::initialize(settings) {
        Ok(app) => app,
        Err(e) => {
            error!("应用初始化失败: {}", e);
            exit_with_error(presenter.as_ref(), &e);
        }
    };

    // 运行主流程，同时监听用户中断
    tokio::select! {
        result = app.run() => match result {
            Ok(()) => {
                info!("工具执行结束。");
                process::exit(0);
            }
            Err(e) => {
                error!("执行失败: {}", e);
                exit_with_error(presenter.as_ref(), &e);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("程序被用户中断 (Ctrl+C)，正常收尾退出。");
            process::exit(EXIT_INTERRUPTED);
        }
    }
}

/// 呈现错误并以非零码退出
fn exit_with_error(presenter: &dyn ErrorPresenter, error: &AppError) -> ! {
    let message = error.user_message();
    error!("Displaying error and exiting: {}", message);
    presenter.present(&message);
    process::exit(1);
}
