//! 视口交互控制器：把指针与键盘事件翻译为会话操作。

use roomcraft_core::geometry::{
    Point2, is_degenerate_with, segment_angle, segment_length, snap_to_grid,
};
use roomcraft_core::model::{FurnitureId, FurniturePatch, NewWall, Transform, WallId};
use tracing::debug;

use crate::errors::EngineError;
use crate::session::{EditorSession, Mode, Selection, Tool, TransformTool, WallDraft};

/// 视口中的指针事件。地面坐标为未吸附的原始命中点。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    FloorClick(Point2),
    FloorMove(Point2),
    FurnitureClick(FurnitureId),
    WallClick(WallId),
    /// 变换手柄释放，携带家具当前的实时变换。
    TransformEnd {
        id: FurnitureId,
        transform: Transform,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Delete,
    Backspace,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    #[inline]
    fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// 焦点位于文本输入框时快捷键全部忽略。
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            in_text_input: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
            ..Self::plain(key)
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::default()
            },
            ..Self::plain(key)
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// 单个事件处理后的结果，供渲染层与面板刷新使用。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Ignored,
    DraftStarted(Point2),
    PreviewMoved(Point2),
    /// 墙体已提交，草稿在 `next_start` 处继续。
    WallCommitted { id: WallId, next_start: Point2 },
    /// 点击点与起点过近，未提交墙体，草稿重新锚定。
    DegenerateSkipped(Point2),
    Selected(Selection),
    SelectionCleared,
    Transformed(FurnitureId),
    ToolChanged { tool: Tool, draft_cancelled: bool },
    Escaped { draft_cancelled: bool },
    Deleted(Selection),
    Duplicated(FurnitureId),
    GridToggled(bool),
}

/// 墙体草稿的预览段。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPreview {
    pub start: Point2,
    pub end: Point2,
    pub length: f64,
    pub angle: f64,
}

/// 交互控制器本身只保存预览点，其余状态都在 `EditorSession` 中。
#[derive(Debug, Default)]
pub struct SceneController {
    preview_point: Option<Point2>,
}

impl SceneController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_pointer(
        &mut self,
        session: &mut EditorSession,
        event: PointerEvent,
    ) -> Interaction {
        match event {
            PointerEvent::FloorClick(point) => self.floor_click(session, point),
            PointerEvent::FloorMove(point) => self.floor_move(session, point),
            PointerEvent::FurnitureClick(id) => {
                if session.is_drawing_wall() {
                    return Interaction::Ignored;
                }
                let selected = Interaction::Selected(Selection::Furniture(id));
                settle(session.select_furniture(Some(id)).map(|_| selected))
            }
            PointerEvent::WallClick(id) => {
                if session.is_drawing_wall() {
                    return Interaction::Ignored;
                }
                let selected = Interaction::Selected(Selection::Wall(id));
                settle(session.select_wall(Some(id)).map(|_| selected))
            }
            PointerEvent::TransformEnd { id, transform } => settle(
                session
                    .update_furniture(id, FurniturePatch::transform(transform))
                    .map(|_| Interaction::Transformed(id)),
            ),
        }
    }

    fn floor_click(&mut self, session: &mut EditorSession, raw: Point2) -> Interaction {
        let Mode::Wall(draft) = session.mode() else {
            session.clear_selection();
            return Interaction::SelectionCleared;
        };

        let settings = *session.settings();
        let point = snap_to_grid(raw, settings.grid_cell);
        match draft {
            WallDraft::Idle => {
                session.set_wall_start_point(Some(point));
                self.preview_point = None;
                debug!(x = point.x(), z = point.z(), "开始绘制墙体");
                Interaction::DraftStarted(point)
            }
            WallDraft::Drafting { start } => {
                let outcome = if is_degenerate_with(start, point, settings.min_wall_length) {
                    Interaction::DegenerateSkipped(point)
                } else {
                    let wall = NewWall {
                        start,
                        end: point,
                        height: settings.wall_height,
                        thickness: settings.wall_thickness,
                    };
                    match session.add_wall(wall) {
                        Ok(id) => Interaction::WallCommitted {
                            id,
                            next_start: point,
                        },
                        Err(err) => {
                            debug!(error = %err, "墙体提交失败");
                            Interaction::Ignored
                        }
                    }
                };
                // 以点击点为新起点继续绘制，形成连续墙
                session.set_wall_start_point(Some(point));
                outcome
            }
        }
    }

    fn floor_move(&mut self, session: &EditorSession, raw: Point2) -> Interaction {
        if !session.is_drawing_wall() {
            return Interaction::Ignored;
        }
        let point = snap_to_grid(raw, session.settings().grid_cell);
        self.preview_point = Some(point);
        Interaction::PreviewMoved(point)
    }

    /// 当前草稿的预览段；不在绘制状态或预览段退化时返回 `None`。
    pub fn wall_preview(&self, session: &EditorSession) -> Option<WallPreview> {
        let start = session.wall_start_point()?;
        let end = self.preview_point?;
        if is_degenerate_with(start, end, session.settings().min_wall_length) {
            return None;
        }
        Some(WallPreview {
            start,
            end,
            length: segment_length(start, end),
            angle: segment_angle(start, end),
        })
    }

    /// 需要挂载变换手柄的家具：选中了家具且当前是移动/旋转/缩放工具。
    pub fn gizmo_target(session: &EditorSession) -> Option<(FurnitureId, TransformTool)> {
        let Mode::Transform(tool) = session.mode() else {
            return None;
        };
        let item = session.selected_furniture()?;
        Some((item.id, tool))
    }

    /// 快捷键。带修饰键时只认 ctrl/meta+D（复制）与 alt+G（网格开关），
    /// 其余修饰组合一律忽略，不会退回到同名的单键工具切换。
    pub fn handle_key(&mut self, session: &mut EditorSession, event: KeyEvent) -> Interaction {
        if event.in_text_input {
            return Interaction::Ignored;
        }
        let modifiers = event.modifiers;
        let key = match event.key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };

        if modifiers.command() {
            if key == Key::Char('d') {
                return match session.duplicate_selection() {
                    Ok(Some(id)) => Interaction::Duplicated(id),
                    Ok(None) => Interaction::Ignored,
                    Err(err) => settle(Err(err)),
                };
            }
            return Interaction::Ignored;
        }
        if modifiers.alt {
            if key == Key::Char('g') {
                return Interaction::GridToggled(session.toggle_grid());
            }
            return Interaction::Ignored;
        }
        if modifiers.shift {
            return Interaction::Ignored;
        }

        match key {
            Key::Char('v') => self.switch_tool(session, Tool::Select),
            Key::Char('g') => self.switch_tool(session, Tool::Move),
            Key::Char('r') => self.switch_tool(session, Tool::Rotate),
            Key::Char('s') => self.switch_tool(session, Tool::Scale),
            Key::Char('w') => self.switch_tool(session, Tool::Wall),
            Key::Escape => {
                let draft_cancelled = session.cancel_wall_draft();
                self.preview_point = None;
                session.clear_selection();
                session.set_active_tool(Tool::Select);
                Interaction::Escaped { draft_cancelled }
            }
            Key::Delete | Key::Backspace => match session.delete_selection() {
                Ok(Selection::None) => Interaction::Ignored,
                Ok(removed) => Interaction::Deleted(removed),
                Err(err) => settle(Err(err)),
            },
            _ => Interaction::Ignored,
        }
    }

    fn switch_tool(&mut self, session: &mut EditorSession, tool: Tool) -> Interaction {
        let was_drawing = session.is_drawing_wall();
        session.set_active_tool(tool);
        let draft_cancelled = was_drawing && !session.is_drawing_wall();
        if draft_cancelled {
            self.preview_point = None;
        }
        Interaction::ToolChanged {
            tool,
            draft_cancelled,
        }
    }
}

/// 交互层不向上传播错误：缺失实体等情况记录后视为忽略。
fn settle(result: Result<Interaction, EngineError>) -> Interaction {
    result.unwrap_or_else(|err| {
        debug!(error = %err, "交互被忽略");
        Interaction::Ignored
    })
}
