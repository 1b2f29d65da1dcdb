use roomcraft_config::{AppConfig, EditorConfig, StorageConfig};
use roomcraft_core::model::ProjectId;
use roomcraft_engine::session::{EditorSession, EditorSettings};
use roomcraft_io::{IoError, JsonDirRepository, ProjectRepository};
use tracing::{info, warn};

/// 项目来源，便于前端呈现加载信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    Stored(ProjectId),
    Fresh,
}

/// 加载后的会话与元信息。未配置项目目录时 `repository` 为空。
#[derive(Debug)]
pub struct LoadedSession {
    pub session: EditorSession,
    pub source: ProjectSource,
    pub repository: Option<JsonDirRepository>,
}

pub fn editor_settings(config: &EditorConfig) -> EditorSettings {
    EditorSettings {
        grid_cell: config.grid_cell_size,
        wall_height: config.wall_height,
        wall_thickness: config.wall_thickness,
        room_width: config.room_width,
        room_depth: config.room_depth,
        duplicate_offset: config.duplicate_offset,
        min_wall_length: config.min_wall_length,
    }
}

pub fn open_repository(config: &StorageConfig) -> Result<Option<JsonDirRepository>, IoError> {
    config
        .projects_dir
        .as_ref()
        .map(|dir| JsonDirRepository::open(dir, config.auto_create_dir))
        .transpose()
}

/// 从存储中取出指定项目；未指定、找不到或记录非法时新建默认项目。
pub fn load_session_from(
    repository: Option<&dyn ProjectRepository>,
    settings: EditorSettings,
    project_id: Option<ProjectId>,
) -> (EditorSession, ProjectSource) {
    let mut session = EditorSession::new(settings);
    if let (Some(repository), Some(id)) = (repository, project_id) {
        match repository.get(id).and_then(|record| record.into_project()) {
            Ok(project) => {
                info!(project = %id, name = %project.name, "从存储加载项目");
                session.set_current_project(Some(project));
                return (session, ProjectSource::Stored(id));
            }
            Err(err) => {
                warn!(project = %id, error = %err, "加载项目失败，改为新建项目");
            }
        }
    } else if let Some(id) = project_id {
        warn!(project = %id, "未配置项目目录，无法加载指定项目");
    }

    session.start_new_project();
    (session, ProjectSource::Fresh)
}

pub fn load_session(config: &AppConfig, project_id: Option<ProjectId>) -> LoadedSession {
    let repository = match open_repository(&config.storage) {
        Ok(repository) => repository,
        Err(err) => {
            warn!(error = %err, "无法打开项目目录，项目将只保存在内存中");
            None
        }
    };
    let (session, source) = load_session_from(
        repository.as_ref().map(|repo| repo as &dyn ProjectRepository),
        editor_settings(&config.editor),
        project_id,
    );
    LoadedSession {
        session,
        source,
        repository,
    }
}

#[cfg(test)]
mod tests {
    use roomcraft_core::model::Project;
    use roomcraft_io::{MemoryRepository, ProjectRecord};

    use super::*;

    #[test]
    fn stored_project_is_loaded() {
        let mut repo = MemoryRepository::new();
        let mut project = Project::new_default();
        project.name = "Loft".to_string();
        let saved = repo
            .save(ProjectRecord::from_project(&project, "local"))
            .unwrap();

        let (session, source) =
            load_session_from(Some(&repo), EditorSettings::default(), Some(saved.id));
        assert_eq!(source, ProjectSource::Stored(saved.id));
        assert_eq!(session.project().unwrap().name, "Loft");
    }

    #[test]
    fn missing_project_starts_fresh() {
        let repo = MemoryRepository::new();
        let (session, source) =
            load_session_from(Some(&repo), EditorSettings::default(), Some(ProjectId::new()));
        assert_eq!(source, ProjectSource::Fresh);
        assert_eq!(session.project().unwrap().walls.len(), 4);

        let (_, source) = load_session_from(None, EditorSettings::default(), None);
        assert_eq!(source, ProjectSource::Fresh);
    }

    #[test]
    fn editor_config_drives_new_room() {
        let mut config = AppConfig::default();
        config.editor.room_width = 6.0;
        config.editor.room_depth = 4.0;
        let loaded = load_session(&config, None);
        assert!(loaded.repository.is_none());
        let project = loaded.session.project().unwrap();
        assert_eq!((project.room_width, project.room_depth), (6.0, 4.0));
    }

    #[test]
    fn repository_is_created_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = StorageConfig::default();
        storage.projects_dir = Some(dir.path().join("rooms"));
        let repo = open_repository(&storage).unwrap().expect("configured");
        assert!(repo.root().is_dir());

        storage.projects_dir = Some(dir.path().join("absent"));
        storage.auto_create_dir = false;
        assert!(open_repository(&storage).is_err());
    }
}
