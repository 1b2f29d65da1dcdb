use std::collections::HashMap;

use roomcraft_core::catalog;
use roomcraft_core::geometry::{Point2, snap_to_grid};

use crate::input::parse_number;
use crate::session::{EditorSession, Selection, Tool};

#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new(name: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// 按空白切分一行命令文本；空行返回 `None`。
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next()?.to_string();
        Some(Self {
            name,
            args: parts.map(str::to_string).collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

pub trait CommandHandler: Send + Sync {
    fn name(&self) -> &'static str;
    fn execute(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse;
}

pub struct CommandContext<'a> {
    pub session: &'a mut EditorSession,
}

pub struct CommandBus {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandBus {
    pub fn new() -> Self {
        let mut bus = Self {
            handlers: HashMap::new(),
        };
        bus.register(ToggleGridCommand);
        bus.register(ClearSelectionCommand);
        bus.register(DeleteSelectionCommand);
        bus.register(DuplicateSelectionCommand);
        bus.register(SetToolCommand);
        bus.register(AddCatalogCommand);
        bus.register(RoomSizeCommand);
        bus.register(RenameCommand);
        bus
    }

    pub fn register<H: CommandHandler + 'static>(&mut self, handler: H) {
        self.handlers.insert(handler.name(), Box::new(handler));
    }

    pub fn dispatch(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        if let Some(handler) = self.handlers.get(request.name.as_str()) {
            handler.execute(request, context)
        } else {
            CommandResponse::err(format!("未知命令: {}", request.name))
        }
    }

    pub fn available_commands(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

struct ToggleGridCommand;

impl CommandHandler for ToggleGridCommand {
    fn name(&self) -> &'static str {
        "toggle_grid"
    }

    fn execute(
        &self,
        _request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        if context.session.toggle_grid() {
            CommandResponse::ok("网格已显示")
        } else {
            CommandResponse::ok("网格已隐藏")
        }
    }
}

struct ClearSelectionCommand;

impl CommandHandler for ClearSelectionCommand {
    fn name(&self) -> &'static str {
        "clear_selection"
    }

    fn execute(
        &self,
        _request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        context.session.clear_selection();
        CommandResponse::ok("选中已清空")
    }
}

struct DeleteSelectionCommand;

impl CommandHandler for DeleteSelectionCommand {
    fn name(&self) -> &'static str {
        "delete_selection"
    }

    fn execute(
        &self,
        _request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        match context.session.delete_selection() {
            Ok(Selection::None) => CommandResponse::err("当前没有选中对象"),
            Ok(Selection::Furniture(id)) => CommandResponse::ok(format!("已删除家具 {id}")),
            Ok(Selection::Wall(id)) => CommandResponse::ok(format!("已删除墙体 {id}")),
            Err(err) => CommandResponse::err(err.to_string()),
        }
    }
}

struct DuplicateSelectionCommand;

impl CommandHandler for DuplicateSelectionCommand {
    fn name(&self) -> &'static str {
        "duplicate_selection"
    }

    fn execute(
        &self,
        _request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        match context.session.duplicate_selection() {
            Ok(Some(id)) => CommandResponse::ok(format!("已复制家具，新 ID = {id}")),
            Ok(None) => CommandResponse::err("当前没有选中家具"),
            Err(err) => CommandResponse::err(err.to_string()),
        }
    }
}

struct SetToolCommand;

impl CommandHandler for SetToolCommand {
    fn name(&self) -> &'static str {
        "set_tool"
    }

    fn execute(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        let Some(tool) = request.args.first().and_then(|name| Tool::from_name(name)) else {
            return CommandResponse::err("用法: set_tool <select|move|rotate|scale|wall>");
        };
        context.session.set_active_tool(tool);
        CommandResponse::ok(format!("当前工具: {}", tool.as_str()))
    }
}

struct AddCatalogCommand;

impl CommandHandler for AddCatalogCommand {
    fn name(&self) -> &'static str {
        "add_catalog"
    }

    fn execute(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        let Some(slug) = request.args.first() else {
            return CommandResponse::err("用法: add_catalog <slug> [x z]");
        };
        let Some(entry) = catalog::find(slug) else {
            return CommandResponse::err(format!("家具库中没有 {slug}"));
        };
        let x = request.args.get(1).and_then(|raw| parse_number(raw)).unwrap_or(0.0);
        let z = request.args.get(2).and_then(|raw| parse_number(raw)).unwrap_or(0.0);
        let at = snap_to_grid(Point2::new(x, z), context.session.settings().grid_cell);
        match context.session.add_furniture(entry.to_furniture(at)) {
            Ok(id) => CommandResponse::ok(format!("已放置 {}，ID = {id}", entry.name)),
            Err(err) => CommandResponse::err(err.to_string()),
        }
    }
}

struct RoomSizeCommand;

impl CommandHandler for RoomSizeCommand {
    fn name(&self) -> &'static str {
        "room_size"
    }

    fn execute(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        let width = request.args.first().and_then(|raw| parse_number(raw));
        let depth = request.args.get(1).and_then(|raw| parse_number(raw));
        let (Some(width), Some(depth)) = (width, depth) else {
            return CommandResponse::err("用法: room_size <宽> <深>");
        };
        match context.session.update_room_size(width, depth) {
            Ok(()) => CommandResponse::ok(format!("房间尺寸已更新为 {width} x {depth}")),
            Err(err) => CommandResponse::err(err.to_string()),
        }
    }
}

struct RenameCommand;

impl CommandHandler for RenameCommand {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn execute(
        &self,
        request: &CommandRequest,
        context: &mut CommandContext<'_>,
    ) -> CommandResponse {
        let name = request.args.join(" ");
        match context.session.rename_project(&name) {
            Ok(()) => CommandResponse::ok(format!("项目已重命名为 {}", name.trim())),
            Err(err) => CommandResponse::err(err.to_string()),
        }
    }
}
