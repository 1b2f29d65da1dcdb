pub mod cli;
pub mod errors;
pub mod loader;

use errors::FrontendError;
use roomcraft_config::AppConfig;
use roomcraft_core::model::ProjectId;
use tracing::info;

/// 启动 CLI 演示；`project_id` 指定时尝试从项目目录加载。
pub fn run_cli_demo(
    config: &AppConfig,
    project_id: Option<ProjectId>,
) -> Result<(), FrontendError> {
    info!("启动 CLI 演示前端");
    cli::run_demo(config, project_id)
}
