use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use roomcraft_config::StorageConfig;

/// 启动前检查的项目目录状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsDir {
    /// 未配置目录，项目只保存在内存中。
    Unconfigured,
    Ready(PathBuf),
    /// 目录尚不存在，打开存储时会创建。
    Pending(PathBuf),
}

/// 只检查项目目录，不做任何创建；创建由存储层在打开时完成。
pub fn inspect_projects_dir(config: &StorageConfig) -> Result<ProjectsDir, StorageError> {
    let Some(root) = config.projects_dir.as_ref() else {
        return Ok(ProjectsDir::Unconfigured);
    };
    let target = normalize_path(root)?;
    if target.is_dir() {
        return Ok(ProjectsDir::Ready(target));
    }
    if target.exists() {
        return Err(StorageError::NotADirectory { target });
    }
    if !config.auto_create_dir {
        return Err(StorageError::AutoCreateDisabled { target });
    }
    Ok(ProjectsDir::Pending(target))
}

fn normalize_path(path: &Path) -> Result<PathBuf, StorageError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = env::current_dir().map_err(|error| StorageError::Io { error })?;
        Ok(cwd.join(path))
    }
}

#[derive(Debug)]
pub enum StorageError {
    NotADirectory { target: PathBuf },
    AutoCreateDisabled { target: PathBuf },
    Io { error: std::io::Error },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotADirectory { target } => {
                write!(f, "{} 已存在但不是目录", target.display())
            }
            StorageError::AutoCreateDisabled { target } => {
                write!(
                    f,
                    "项目目录 {} 不存在且 auto_create_dir 已关闭",
                    target.display()
                )
            }
            StorageError::Io { error } => {
                write!(f, "I/O 错误: {error}")
            }
        }
    }
}

impl Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: PathBuf, auto_create_dir: bool) -> StorageConfig {
        StorageConfig {
            projects_dir: Some(dir),
            auto_create_dir,
            ..StorageConfig::default()
        }
    }

    #[test]
    fn unconfigured_directory_is_skipped() {
        let state = inspect_projects_dir(&StorageConfig::default()).unwrap();
        assert_eq!(state, ProjectsDir::Unconfigured);
    }

    #[test]
    fn existing_directory_is_ready() {
        let dir = tempfile::tempdir().unwrap();
        let state = inspect_projects_dir(&storage(dir.path().to_path_buf(), false)).unwrap();
        assert_eq!(state, ProjectsDir::Ready(dir.path().to_path_buf()));
    }

    #[test]
    fn missing_directory_is_left_for_the_repository() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("projects");
        let state = inspect_projects_dir(&storage(target.clone(), true)).unwrap();
        assert_eq!(state, ProjectsDir::Pending(target.clone()));
        assert!(!target.exists());
    }

    #[test]
    fn disabled_auto_create_and_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("projects");
        let err = inspect_projects_dir(&storage(target.clone(), false)).unwrap_err();
        assert!(matches!(err, StorageError::AutoCreateDisabled { .. }));

        std::fs::write(&target, "not a directory").unwrap();
        let err = inspect_projects_dir(&storage(target, true)).unwrap_err();
        assert!(matches!(err, StorageError::NotADirectory { .. }));
    }
}
