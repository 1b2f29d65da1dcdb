pub mod command;
pub mod input;
pub mod interaction;

pub mod errors {
    use roomcraft_core::model::{FurnitureId, WallId};
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq)]
    pub enum EngineError {
        #[error("no project is loaded")]
        NoProject,
        #[error("furniture item {0} not found")]
        FurnitureNotFound(FurnitureId),
        #[error("wall {0} not found")]
        WallNotFound(WallId),
        #[error("wall is too short ({length:.3} units)")]
        DegenerateWall { length: f64 },
        #[error("invalid room size {width} x {depth}")]
        InvalidRoomSize { width: f64, depth: f64 },
        #[error("project name must not be empty")]
        InvalidName,
    }
}

pub mod session {
    use roomcraft_core::geometry::{
        DEFAULT_GRID_CELL, MIN_WALL_LENGTH, Point2, Vector3, is_degenerate_with, segment_length,
    };
    use roomcraft_core::model::{
        DEFAULT_PROJECT_NAME, DEFAULT_ROOM_DEPTH, DEFAULT_ROOM_WIDTH, DEFAULT_WALL_HEIGHT,
        DEFAULT_WALL_THICKNESS, FurnitureId, FurnitureItem, FurniturePatch, NewFurniture,
        NewWall, Project, Wall, WallId, WallPatch,
    };
    use tracing::debug;

    use crate::errors::EngineError;

    /// 工具栏上的工具，决定视口指针输入的含义。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tool {
        Select,
        Move,
        Rotate,
        Scale,
        Wall,
    }

    impl Tool {
        pub const ALL: [Tool; 5] = [
            Tool::Select,
            Tool::Move,
            Tool::Rotate,
            Tool::Scale,
            Tool::Wall,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                Tool::Select => "select",
                Tool::Move => "move",
                Tool::Rotate => "rotate",
                Tool::Scale => "scale",
                Tool::Wall => "wall",
            }
        }

        pub fn from_name(name: &str) -> Option<Self> {
            Self::ALL
                .into_iter()
                .find(|tool| tool.as_str().eq_ignore_ascii_case(name.trim()))
        }
    }

    /// 需要变换手柄的三种工具。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TransformTool {
        Move,
        Rotate,
        Scale,
    }

    /// 墙体绘制的临时状态。只有在墙体工具下才存在。
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub enum WallDraft {
        #[default]
        Idle,
        Drafting { start: Point2 },
    }

    /// 编辑模式。草稿只能出现在 `Mode::Wall` 中，
    /// 因此“非墙体工具下仍在绘制”这种状态无法表示。
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub enum Mode {
        #[default]
        Select,
        Transform(TransformTool),
        Wall(WallDraft),
    }

    impl Mode {
        pub fn for_tool(tool: Tool) -> Self {
            match tool {
                Tool::Select => Mode::Select,
                Tool::Move => Mode::Transform(TransformTool::Move),
                Tool::Rotate => Mode::Transform(TransformTool::Rotate),
                Tool::Scale => Mode::Transform(TransformTool::Scale),
                Tool::Wall => Mode::Wall(WallDraft::Idle),
            }
        }

        pub fn tool(&self) -> Tool {
            match self {
                Mode::Select => Tool::Select,
                Mode::Transform(TransformTool::Move) => Tool::Move,
                Mode::Transform(TransformTool::Rotate) => Tool::Rotate,
                Mode::Transform(TransformTool::Scale) => Tool::Scale,
                Mode::Wall(_) => Tool::Wall,
            }
        }

        #[inline]
        pub fn draft_start(&self) -> Option<Point2> {
            match self {
                Mode::Wall(WallDraft::Drafting { start }) => Some(*start),
                _ => None,
            }
        }
    }

    /// 互斥选中：同一时刻最多选中一件家具或一面墙。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Selection {
        #[default]
        None,
        Furniture(FurnitureId),
        Wall(WallId),
    }

    impl Selection {
        #[inline]
        pub fn is_none(&self) -> bool {
            matches!(self, Selection::None)
        }

        #[inline]
        pub fn furniture_id(&self) -> Option<FurnitureId> {
            match self {
                Selection::Furniture(id) => Some(*id),
                _ => None,
            }
        }

        #[inline]
        pub fn wall_id(&self) -> Option<WallId> {
            match self {
                Selection::Wall(id) => Some(*id),
                _ => None,
            }
        }

        pub fn kind(&self) -> &'static str {
            match self {
                Selection::None => "none",
                Selection::Furniture(_) => "furniture",
                Selection::Wall(_) => "wall",
            }
        }
    }

    /// 编辑器运行参数，通常由配置层填充。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct EditorSettings {
        pub grid_cell: f64,
        pub wall_height: f64,
        pub wall_thickness: f64,
        pub room_width: f64,
        pub room_depth: f64,
        pub duplicate_offset: f64,
        pub min_wall_length: f64,
    }

    impl Default for EditorSettings {
        fn default() -> Self {
            Self {
                grid_cell: DEFAULT_GRID_CELL,
                wall_height: DEFAULT_WALL_HEIGHT,
                wall_thickness: DEFAULT_WALL_THICKNESS,
                room_width: DEFAULT_ROOM_WIDTH,
                room_depth: DEFAULT_ROOM_DEPTH,
                duplicate_offset: 1.0,
                min_wall_length: MIN_WALL_LENGTH,
            }
        }
    }

    /// 一次编辑会话的全部状态：当前项目、选中、工具模式与网格开关。
    /// 进入编辑器时创建，离开时丢弃；所有项目修改都经由这里的方法完成。
    #[derive(Debug)]
    pub struct EditorSession {
        project: Option<Project>,
        selection: Selection,
        mode: Mode,
        grid_visible: bool,
        settings: EditorSettings,
    }

    impl EditorSession {
        pub fn new(settings: EditorSettings) -> Self {
            Self {
                project: None,
                selection: Selection::None,
                mode: Mode::Select,
                grid_visible: true,
                settings,
            }
        }

        pub fn with_project(project: Project) -> Self {
            let mut session = Self::new(EditorSettings::default());
            session.set_current_project(Some(project));
            session
        }

        #[inline]
        pub fn settings(&self) -> &EditorSettings {
            &self.settings
        }

        /// 以当前设置新建默认项目（四面围墙）并设为当前项目。
        pub fn start_new_project(&mut self) -> &Project {
            let project = Project::with_perimeter(
                DEFAULT_PROJECT_NAME,
                self.settings.room_width,
                self.settings.room_depth,
                self.settings.wall_height,
                self.settings.wall_thickness,
            );
            self.set_current_project(Some(project));
            self.project.get_or_insert_with(Project::new_default)
        }

        /// 整体替换当前项目，同时清空选中并取消墙体草稿。
        pub fn set_current_project(&mut self, project: Option<Project>) {
            if let Some(project) = &project {
                debug!(
                    project = %project.id,
                    walls = project.walls.len(),
                    furniture = project.furniture.len(),
                    "加载项目"
                );
            }
            self.project = project;
            self.selection = Selection::None;
            self.cancel_wall_draft();
        }

        #[inline]
        pub fn project(&self) -> Option<&Project> {
            self.project.as_ref()
        }

        /// 取出当前项目并结束会话中的项目状态。
        pub fn take_project(&mut self) -> Option<Project> {
            self.selection = Selection::None;
            self.cancel_wall_draft();
            self.project.take()
        }

        fn project_mut(&mut self) -> Result<&mut Project, EngineError> {
            self.project.as_mut().ok_or(EngineError::NoProject)
        }

        fn project_ref(&self) -> Result<&Project, EngineError> {
            self.project.as_ref().ok_or(EngineError::NoProject)
        }

        // ---- 选中 ----

        #[inline]
        pub fn selection(&self) -> Selection {
            self.selection
        }

        #[inline]
        pub fn selected_furniture_id(&self) -> Option<FurnitureId> {
            self.selection.furniture_id()
        }

        #[inline]
        pub fn selected_wall_id(&self) -> Option<WallId> {
            self.selection.wall_id()
        }

        pub fn selected_furniture(&self) -> Option<&FurnitureItem> {
            let id = self.selection.furniture_id()?;
            self.project.as_ref()?.furniture_item(id)
        }

        pub fn selected_wall(&self) -> Option<&Wall> {
            let id = self.selection.wall_id()?;
            self.project.as_ref()?.wall(id)
        }

        /// 选中家具（清除墙体选中）。传入 `None` 只清除家具选中。
        pub fn select_furniture(&mut self, id: Option<FurnitureId>) -> Result<(), EngineError> {
            match id {
                Some(id) => {
                    if self.project_ref()?.furniture_item(id).is_none() {
                        return Err(EngineError::FurnitureNotFound(id));
                    }
                    self.selection = Selection::Furniture(id);
                }
                None => {
                    if self.selection.furniture_id().is_some() {
                        self.selection = Selection::None;
                    }
                }
            }
            Ok(())
        }

        /// 选中墙体（清除家具选中）。传入 `None` 只清除墙体选中。
        pub fn select_wall(&mut self, id: Option<WallId>) -> Result<(), EngineError> {
            match id {
                Some(id) => {
                    if self.project_ref()?.wall(id).is_none() {
                        return Err(EngineError::WallNotFound(id));
                    }
                    self.selection = Selection::Wall(id);
                }
                None => {
                    if self.selection.wall_id().is_some() {
                        self.selection = Selection::None;
                    }
                }
            }
            Ok(())
        }

        #[inline]
        pub fn clear_selection(&mut self) {
            self.selection = Selection::None;
        }

        // ---- 工具与草稿 ----

        #[inline]
        pub fn mode(&self) -> Mode {
            self.mode
        }

        #[inline]
        pub fn active_tool(&self) -> Tool {
            self.mode.tool()
        }

        #[inline]
        pub fn is_drawing_wall(&self) -> bool {
            self.mode.draft_start().is_some()
        }

        #[inline]
        pub fn wall_start_point(&self) -> Option<Point2> {
            self.mode.draft_start()
        }

        /// 切换工具。离开墙体工具会丢弃未完成的草稿；重复选择墙体工具保留草稿。
        pub fn set_active_tool(&mut self, tool: Tool) {
            if self.mode.tool() == tool {
                return;
            }
            if self.is_drawing_wall() {
                debug!(to = tool.as_str(), "切换工具，取消墙体草稿");
            }
            self.mode = Mode::for_tool(tool);
        }

        /// 低层开关。只有墙体工具下生效；开始绘制必须先有起点，
        /// 因此 `true` 仅在已有起点时保持绘制状态。返回设置后的绘制状态。
        pub fn set_drawing_wall(&mut self, drawing: bool) -> bool {
            if let Mode::Wall(draft) = &mut self.mode {
                if !drawing {
                    *draft = WallDraft::Idle;
                }
            }
            self.is_drawing_wall()
        }

        /// 设置或清除草稿起点。只有墙体工具下生效，设置起点即进入绘制状态。
        pub fn set_wall_start_point(&mut self, point: Option<Point2>) {
            if let Mode::Wall(draft) = &mut self.mode {
                *draft = match point {
                    Some(start) => WallDraft::Drafting { start },
                    None => WallDraft::Idle,
                };
            }
        }

        /// 取消墙体草稿，返回之前是否处于绘制状态。
        pub fn cancel_wall_draft(&mut self) -> bool {
            match &mut self.mode {
                Mode::Wall(draft @ WallDraft::Drafting { .. }) => {
                    *draft = WallDraft::Idle;
                    true
                }
                _ => false,
            }
        }

        // ---- 网格 ----

        #[inline]
        pub fn grid_visible(&self) -> bool {
            self.grid_visible
        }

        /// 切换网格可见性，返回切换后的状态。
        pub fn toggle_grid(&mut self) -> bool {
            self.grid_visible = !self.grid_visible;
            self.grid_visible
        }

        // ---- 家具 ----

        pub fn add_furniture(&mut self, item: NewFurniture) -> Result<FurnitureId, EngineError> {
            let project = self.project_mut()?;
            let id = project.push_furniture(item);
            project.touch();
            debug!(furniture = %id, "添加家具");
            Ok(id)
        }

        pub fn update_furniture(
            &mut self,
            id: FurnitureId,
            patch: FurniturePatch,
        ) -> Result<(), EngineError> {
            let project = self.project_mut()?;
            let item = project
                .furniture_item_mut(id)
                .ok_or(EngineError::FurnitureNotFound(id))?;
            item.apply(patch);
            project.touch();
            Ok(())
        }

        /// 删除家具；若其处于选中状态则清除选中。
        pub fn remove_furniture(&mut self, id: FurnitureId) -> Result<FurnitureItem, EngineError> {
            let project = self.project_mut()?;
            let removed = project
                .take_furniture(id)
                .ok_or(EngineError::FurnitureNotFound(id))?;
            project.touch();
            if self.selection == Selection::Furniture(id) {
                self.selection = Selection::None;
            }
            debug!(furniture = %id, "删除家具");
            Ok(removed)
        }

        /// 复制家具：沿 X/Z 方向偏移，并分配新 ID。不改变当前选中。
        pub fn duplicate_furniture(&mut self, id: FurnitureId) -> Result<FurnitureId, EngineError> {
            let offset = self.settings.duplicate_offset;
            let project = self.project_mut()?;
            let source = project
                .furniture_item(id)
                .ok_or(EngineError::FurnitureNotFound(id))?;
            let mut copy = source.to_new();
            let p = copy.position;
            copy.position = Vector3::new(p.x() + offset, p.y(), p.z() + offset);
            let new_id = project.push_furniture(copy);
            project.touch();
            debug!(source = %id, copy = %new_id, "复制家具");
            Ok(new_id)
        }

        // ---- 墙体 ----

        /// 添加墙体；短于最小长度的墙段被拒绝。
        pub fn add_wall(&mut self, wall: NewWall) -> Result<WallId, EngineError> {
            let min_length = self.settings.min_wall_length;
            if is_degenerate_with(wall.start, wall.end, min_length) {
                return Err(EngineError::DegenerateWall {
                    length: segment_length(wall.start, wall.end),
                });
            }
            let project = self.project_mut()?;
            let id = project.push_wall(wall);
            project.touch();
            debug!(wall = %id, "添加墙体");
            Ok(id)
        }

        /// 更新墙体；若更新后墙段退化则拒绝且不修改。
        pub fn update_wall(&mut self, id: WallId, patch: WallPatch) -> Result<(), EngineError> {
            let min_length = self.settings.min_wall_length;
            let project = self.project_mut()?;
            let wall = project.wall_mut(id).ok_or(EngineError::WallNotFound(id))?;
            let mut candidate = wall.clone();
            candidate.apply(patch);
            if is_degenerate_with(candidate.start, candidate.end, min_length) {
                return Err(EngineError::DegenerateWall {
                    length: segment_length(candidate.start, candidate.end),
                });
            }
            *wall = candidate;
            project.touch();
            Ok(())
        }

        pub fn remove_wall(&mut self, id: WallId) -> Result<Wall, EngineError> {
            let project = self.project_mut()?;
            let removed = project.take_wall(id).ok_or(EngineError::WallNotFound(id))?;
            project.touch();
            if self.selection == Selection::Wall(id) {
                self.selection = Selection::None;
            }
            debug!(wall = %id, "删除墙体");
            Ok(removed)
        }

        // ---- 选中集合上的操作 ----

        /// 删除当前选中的家具或墙体，返回被删除的选中项；未选中任何对象时返回 `Selection::None`。
        pub fn delete_selection(&mut self) -> Result<Selection, EngineError> {
            let selection = self.selection;
            match selection {
                Selection::None => {}
                Selection::Furniture(id) => {
                    self.remove_furniture(id)?;
                }
                Selection::Wall(id) => {
                    self.remove_wall(id)?;
                }
            }
            Ok(selection)
        }

        /// 复制当前选中的家具；未选中家具时返回 `None`。
        pub fn duplicate_selection(&mut self) -> Result<Option<FurnitureId>, EngineError> {
            match self.selection.furniture_id() {
                Some(id) => self.duplicate_furniture(id).map(Some),
                None => Ok(None),
            }
        }

        // ---- 项目属性 ----

        /// 更新房间尺寸。不会重新生成已有围墙。
        pub fn update_room_size(&mut self, width: f64, depth: f64) -> Result<(), EngineError> {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(width) || !valid(depth) {
                return Err(EngineError::InvalidRoomSize { width, depth });
            }
            let project = self.project_mut()?;
            project.room_width = width;
            project.room_depth = depth;
            project.touch();
            Ok(())
        }

        pub fn rename_project(&mut self, name: &str) -> Result<(), EngineError> {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(EngineError::InvalidName);
            }
            let project = self.project_mut()?;
            project.name = trimmed.to_string();
            project.touch();
            Ok(())
        }
    }

    impl Default for EditorSession {
        fn default() -> Self {
            Self::new(EditorSettings::default())
        }
    }

}
