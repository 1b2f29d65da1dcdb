use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use roomcraft_core::model::{
    DEFAULT_PROJECT_NAME, DEFAULT_ROOM_DEPTH, DEFAULT_ROOM_WIDTH, FurnitureItem, Project,
    ProjectId, Wall,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to (de)serialize project {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("project {0} not found")]
    NotFound(ProjectId),
    #[error("invalid project record: {0}")]
    InvalidRecord(String),
}

/// 持久化形式的项目。字段名与存储表一致，家具对象内部使用 camelCase。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub room_width: f64,
    pub room_depth: f64,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn from_project(project: &Project, owner: &str) -> Self {
        Self {
            id: project.id,
            user_id: owner.to_string(),
            name: project.name.clone(),
            thumbnail_url: project.thumbnail_url.clone(),
            room_width: project.room_width,
            room_depth: project.room_depth,
            furniture: project.furniture.clone(),
            walls: project.walls.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }

    /// 还原为编辑器项目。尺寸必须为正，家具与墙体 ID 各自不得重复；
    /// 非正的缩放、墙高与墙厚按新建实体的规则修正。
    pub fn into_project(mut self) -> Result<Project, IoError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.room_width) || !positive(self.room_depth) {
            return Err(IoError::InvalidRecord(format!(
                "room size {} x {} must be positive",
                self.room_width, self.room_depth
            )));
        }
        let mut seen = HashSet::new();
        if let Some(item) = self.furniture.iter().find(|item| !seen.insert(item.id)) {
            return Err(IoError::InvalidRecord(format!(
                "duplicate furniture id {}",
                item.id
            )));
        }
        let mut seen = HashSet::new();
        if let Some(wall) = self.walls.iter().find(|wall| !seen.insert(wall.id)) {
            return Err(IoError::InvalidRecord(format!("duplicate wall id {}", wall.id)));
        }

        self.furniture.iter_mut().for_each(FurnitureItem::sanitize);
        self.walls.iter_mut().for_each(Wall::sanitize);

        Ok(Project {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            room_width: self.room_width,
            room_depth: self.room_depth,
            furniture: self.furniture,
            walls: self.walls,
            thumbnail_url: self.thumbnail_url,
        })
    }

    /// 新建记录：默认房间尺寸，家具与墙体均为空。
    fn blank(owner: &str, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PROJECT_NAME);
        let project = Project::empty(name, DEFAULT_ROOM_WIDTH, DEFAULT_ROOM_DEPTH);
        Self::from_project(&project, owner)
    }

    /// 复制记录：新 ID 与新时间戳，名称追加 " (Copy)"，缩略图不复制。
    fn copy_of(&self) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            user_id: self.user_id.clone(),
            name: format!("{} (Copy)", self.name),
            thumbnail_url: None,
            room_width: self.room_width,
            room_depth: self.room_depth,
            furniture: self.furniture.clone(),
            walls: self.walls.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 项目存储。所有修改操作返回写入后的记录。
pub trait ProjectRepository {
    /// 指定所有者的全部项目，最近更新的在前。
    fn list(&self, owner: &str) -> Result<Vec<ProjectRecord>, IoError>;
    fn get(&self, id: ProjectId) -> Result<ProjectRecord, IoError>;
    fn create(&mut self, owner: &str, name: Option<&str>) -> Result<ProjectRecord, IoError>;
    /// 插入或覆盖，并刷新 `updated_at`。
    fn save(&mut self, record: ProjectRecord) -> Result<ProjectRecord, IoError>;
    fn delete(&mut self, id: ProjectId) -> Result<(), IoError>;
    fn duplicate(&mut self, id: ProjectId) -> Result<ProjectRecord, IoError>;
}

fn newest_first(records: &mut [ProjectRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: HashMap<ProjectId, ProjectRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProjectRepository for MemoryRepository {
    fn list(&self, owner: &str) -> Result<Vec<ProjectRecord>, IoError> {
        let mut records: Vec<_> = self
            .records
            .values()
            .filter(|record| record.user_id == owner)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }

    fn get(&self, id: ProjectId) -> Result<ProjectRecord, IoError> {
        self.records.get(&id).cloned().ok_or(IoError::NotFound(id))
    }

    fn create(&mut self, owner: &str, name: Option<&str>) -> Result<ProjectRecord, IoError> {
        let record = ProjectRecord::blank(owner, name);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn save(&mut self, mut record: ProjectRecord) -> Result<ProjectRecord, IoError> {
        record.updated_at = Utc::now();
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: ProjectId) -> Result<(), IoError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(IoError::NotFound(id))
    }

    fn duplicate(&mut self, id: ProjectId) -> Result<ProjectRecord, IoError> {
        let copy = self.get(id)?.copy_of();
        self.records.insert(copy.id, copy.clone());
        Ok(copy)
    }
}

/// 目录存储：每个项目一个 `<id>.json` 文件。
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    root: PathBuf,
}

impl JsonDirRepository {
    /// 打开已有目录；`create` 为真时目录不存在则创建。
    pub fn open(root: impl Into<PathBuf>, create: bool) -> Result<Self, IoError> {
        let root = root.into();
        if !root.is_dir() {
            if !create {
                return Err(IoError::ReadError {
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "projects directory does not exist",
                    ),
                    path: root,
                });
            }
            fs::create_dir_all(&root).map_err(|source| IoError::WriteError {
                path: root.clone(),
                source,
            })?;
            debug!(path = %root.display(), "创建项目目录");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: ProjectId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn read_record(path: &Path) -> Result<ProjectRecord, IoError> {
        let data = fs::read_to_string(path).map_err(|source| IoError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| IoError::Serialization {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_record(&self, record: &ProjectRecord) -> Result<(), IoError> {
        let path = self.path_for(record.id);
        let data =
            serde_json::to_string_pretty(record).map_err(|source| IoError::Serialization {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, data).map_err(|source| IoError::WriteError {
            path: path.clone(),
            source,
        })?;
        debug!(project = %record.id, path = %path.display(), "写入项目");
        Ok(())
    }
}

impl ProjectRepository for JsonDirRepository {
    fn list(&self, owner: &str) -> Result<Vec<ProjectRecord>, IoError> {
        let entries = fs::read_dir(&self.root).map_err(|source| IoError::ReadError {
            path: self.root.clone(),
            source,
        })?;
        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| IoError::ReadError {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // 损坏的文件跳过，不影响其余项目
            match Self::read_record(&path) {
                Ok(record) if record.user_id == owner => records.push(record),
                Ok(_) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "跳过无法解析的项目文件"),
            }
        }
        newest_first(&mut records);
        Ok(records)
    }

    fn get(&self, id: ProjectId) -> Result<ProjectRecord, IoError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(IoError::NotFound(id));
        }
        Self::read_record(&path)
    }

    fn create(&mut self, owner: &str, name: Option<&str>) -> Result<ProjectRecord, IoError> {
        let record = ProjectRecord::blank(owner, name);
        self.write_record(&record)?;
        Ok(record)
    }

    fn save(&mut self, mut record: ProjectRecord) -> Result<ProjectRecord, IoError> {
        record.updated_at = Utc::now();
        self.write_record(&record)?;
        Ok(record)
    }

    fn delete(&mut self, id: ProjectId) -> Result<(), IoError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(IoError::NotFound(id));
        }
        fs::remove_file(&path).map_err(|source| IoError::WriteError { path, source })?;
        debug!(project = %id, "删除项目");
        Ok(())
    }

    fn duplicate(&mut self, id: ProjectId) -> Result<ProjectRecord, IoError> {
        let copy = self.get(id)?.copy_of();
        self.write_record(&copy)?;
        Ok(copy)
    }
}

/// 分享链接：`<base>/editor/<id>`。
pub fn share_url(base: &str, id: ProjectId) -> String {
    format!("{}/editor/{id}", base.trim_end_matches('/'))
}
