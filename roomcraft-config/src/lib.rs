use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// 应用配置的根结构。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// 从显式路径加载配置。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 自动发现配置文件：优先读取环境变量 `ROOMCRAFT_CONFIG`，否则寻找 `./config/default.toml`。
    /// 若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os("ROOMCRAFT_CONFIG") {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "获取当前工作目录失败".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// 日志配置，支持设置默认等级。
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 编辑器参数。缺省值与新建项目时的房间布局一致。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid_cell_size: f64,
    pub wall_height: f64,
    pub wall_thickness: f64,
    pub room_width: f64,
    pub room_depth: f64,
    pub duplicate_offset: f64,
    pub min_wall_length: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_cell_size: 0.5,
            wall_height: 2.5,
            wall_thickness: 0.15,
            room_width: 10.0,
            room_depth: 10.0,
            duplicate_offset: 1.0,
            min_wall_length: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 未设置时项目只保存在内存中。
    #[serde(default)]
    pub projects_dir: Option<PathBuf>,
    #[serde(default = "StorageConfig::default_auto_create")]
    pub auto_create_dir: bool,
    #[serde(default = "StorageConfig::default_owner")]
    pub owner: String,
    #[serde(default = "StorageConfig::default_share_base_url")]
    pub share_base_url: String,
}

impl StorageConfig {
    fn default_auto_create() -> bool {
        true
    }

    fn default_owner() -> String {
        "local".to_string()
    }

    fn default_share_base_url() -> String {
        "http://localhost:8080".to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            projects_dir: None,
            auto_create_dir: Self::default_auto_create(),
            owner: Self::default_owner(),
            share_base_url: Self::default_share_base_url(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}
