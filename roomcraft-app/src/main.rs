use std::path::PathBuf;

use roomcraft_config::{AppConfig, ConfigError};
use roomcraft_core::model::ProjectId;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod storage;

use storage::ProjectsDir;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config_override: Option<PathBuf> = None;
    let mut project_id: Option<ProjectId> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    eprintln!("`--config` 需要提供配置文件路径");
                    std::process::exit(1);
                };
                config_override = Some(PathBuf::from(path));
            }
            "--project" => {
                let Some(raw) = args.next() else {
                    eprintln!("`--project` 需要提供项目 ID");
                    std::process::exit(1);
                };
                match raw.parse() {
                    Ok(id) => project_id = Some(id),
                    Err(err) => {
                        eprintln!("无效的项目 ID {raw}: {err}");
                        std::process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("未知参数：{other}");
                std::process::exit(1);
            }
        }
    }

    let config = load_configuration(config_override);
    init_logging(&config);
    info!("启动 RoomCraft 应用");

    match storage::inspect_projects_dir(&config.storage) {
        Ok(ProjectsDir::Ready(dir)) => info!(path = %dir.display(), "项目目录就绪"),
        Ok(ProjectsDir::Pending(dir)) => info!(path = %dir.display(), "项目目录将在打开时创建"),
        Ok(ProjectsDir::Unconfigured) => info!("未配置项目目录，项目只保存在内存中"),
        Err(err) => warn!(error = %err, "项目目录不可用"),
    }

    if let Err(err) = roomcraft_frontend::run_cli_demo(&config, project_id) {
        error!(error = %err, "执行 CLI 演示失败");
        std::process::exit(1);
    }
}

fn load_configuration(override_path: Option<PathBuf>) -> AppConfig {
    match override_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
            AppConfig::default()
        }),
        None => match AppConfig::discover() {
            Ok(cfg) => cfg,
            Err(err) => {
                match &err {
                    ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                        warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
                    }
                    ConfigError::Context { .. } => {
                        warn!(error = %err, "加载默认配置失败，使用内建默认值");
                    }
                }
                AppConfig::default()
            }
        },
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
