use roomcraft_config::AppConfig;
use roomcraft_core::catalog;
use roomcraft_core::geometry::{Point2, Vector3, wall_angle, wall_length};
use roomcraft_core::model::{FurnitureId, ProjectId, Transform};
use roomcraft_engine::command::{CommandBus, CommandContext, CommandRequest};
use roomcraft_engine::interaction::{Interaction, Key, KeyEvent, PointerEvent, SceneController};
use roomcraft_engine::session::{EditorSession, Selection};
use roomcraft_io::{ProjectRecord, ProjectRepository, share_url};
use tracing::{info, warn};

use crate::errors::FrontendError;
use crate::loader::{ProjectSource, load_session};

/// 演示墙体链的顶点（未吸附的原始点击位置）。
const WALL_CHAIN: [(f64, f64); 4] = [(-2.1, 1.2), (1.9, 1.2), (1.9, 3.4), (1.9, 3.4)];

/// 简易 CLI 演示：加载或新建项目，通过交互控制器与命令总线走一遍典型编辑流程，
/// 打印项目概览，配置了项目目录时保存项目。
pub fn run_demo(config: &AppConfig, project_id: Option<ProjectId>) -> Result<(), FrontendError> {
    let loaded = load_session(config, project_id);
    let mut session = loaded.session;
    let mut repository = loaded.repository;
    let mut controller = SceneController::new();
    let command_bus = CommandBus::new();

    println!("RoomCraft CLI 演示");
    match loaded.source {
        ProjectSource::Stored(id) => println!("已从存储加载项目：{id}"),
        ProjectSource::Fresh => println!("已新建默认项目（四面围墙）"),
    }
    let mut commands: Vec<&str> = command_bus.available_commands().copied().collect();
    commands.sort_unstable();
    println!("支持的命令: {}", commands.join(", "));
    println!(
        "家具库: {} 件，分类 {}",
        catalog::entries().count(),
        catalog::categories().join(" / ")
    );

    draw_wall_chain(&mut controller, &mut session);
    let placed = place_furniture(&command_bus, &mut session)?;
    edit_furniture(&mut controller, &mut session, &placed);

    if matches!(loaded.source, ProjectSource::Fresh) {
        let mut context = CommandContext {
            session: &mut session,
        };
        dispatch_cli_command(&command_bus, "rename Demo Living Room", &mut context)?;
    }

    print_summary(&session);

    let Some(project) = session.project() else {
        return Ok(());
    };
    match repository.as_mut() {
        Some(repo) => {
            let record = ProjectRecord::from_project(project, &config.storage.owner);
            let record = repo.save(record)?;
            info!(project = %record.id, "项目已保存");
            println!("项目已保存到 {}", repo.root().display());
            println!(
                "分享链接: {}",
                share_url(&config.storage.share_base_url, record.id)
            );
        }
        None => println!("未配置项目目录，项目未保存。"),
    }
    Ok(())
}

fn draw_wall_chain(controller: &mut SceneController, session: &mut EditorSession) {
    controller.handle_key(session, KeyEvent::plain(Key::Char('w')));
    for (x, z) in WALL_CHAIN {
        let click = PointerEvent::FloorClick(Point2::new(x, z));
        match controller.handle_pointer(session, click) {
            Interaction::DraftStarted(start) => {
                println!("[墙体] 起点 ({:.2}, {:.2})", start.x(), start.z());
            }
            Interaction::WallCommitted { id, next_start } => {
                println!(
                    "[墙体] 提交 {id}，继续于 ({:.2}, {:.2})",
                    next_start.x(),
                    next_start.z()
                );
            }
            Interaction::DegenerateSkipped(point) => {
                println!("[墙体] ({:.2}, {:.2}) 与起点重合，跳过", point.x(), point.z());
            }
            other => warn!(?other, "墙体绘制中出现意外结果"),
        }
    }
    if let Interaction::Escaped { draft_cancelled } =
        controller.handle_key(session, KeyEvent::plain(Key::Escape))
    {
        println!("[墙体] 结束绘制，草稿已取消: {draft_cancelled}");
    }
}

/// 通过命令总线放置几件家具，返回新家具的 ID（按放置顺序）。
fn place_furniture(
    bus: &CommandBus,
    session: &mut EditorSession,
) -> Result<Vec<FurnitureId>, FrontendError> {
    let mut context = CommandContext { session };
    let mut placed = Vec::new();
    for line in [
        "add_catalog sofa 0 -2.2",
        "add_catalog coffee-table 0.1 -0.7",
        "add_catalog floor-lamp 2.4 -2.6",
    ] {
        dispatch_cli_command(bus, line, &mut context)?;
        if let Some(item) = context.session.project().and_then(|p| p.furniture.last()) {
            placed.push(item.id);
        }
    }
    Ok(placed)
}

fn edit_furniture(
    controller: &mut SceneController,
    session: &mut EditorSession,
    placed: &[FurnitureId],
) {
    let [sofa, _, lamp] = placed else {
        warn!(count = placed.len(), "家具数量与演示脚本不符，跳过编辑");
        return;
    };

    controller.handle_pointer(session, PointerEvent::FurnitureClick(*sofa));
    controller.handle_key(session, KeyEvent::plain(Key::Char('r')));
    if let Some((id, tool)) = SceneController::gizmo_target(session) {
        let Some(item) = session.selected_furniture() else {
            return;
        };
        let transform = Transform {
            rotation: Vector3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0),
            ..item.transform()
        };
        let outcome =
            controller.handle_pointer(session, PointerEvent::TransformEnd { id, transform });
        println!("[变换] {tool:?} 手柄释放: {outcome:?}");
    }

    if let Interaction::Duplicated(copy) =
        controller.handle_key(session, KeyEvent::ctrl(Key::Char('d')))
    {
        println!("[复制] 新家具 ID = {copy}");
    }

    controller.handle_pointer(session, PointerEvent::FurnitureClick(*lamp));
    if let Interaction::Deleted(Selection::Furniture(id)) =
        controller.handle_key(session, KeyEvent::plain(Key::Delete))
    {
        println!("[删除] 已删除家具 {id}");
    }
    controller.handle_key(session, KeyEvent::alt(Key::Char('g')));
}

fn dispatch_cli_command(
    bus: &CommandBus,
    line: &str,
    context: &mut CommandContext<'_>,
) -> Result<(), FrontendError> {
    let Some(request) = CommandRequest::parse(line) else {
        return Ok(());
    };
    let response = bus.dispatch(&request, context);
    if response.success {
        if let Some(message) = response.message {
            println!("[命令] {message}");
        }
        Ok(())
    } else {
        Err(FrontendError::Command {
            command: request.name,
            message: response.message.unwrap_or_else(|| "未知错误".to_string()),
        })
    }
}

fn print_summary(session: &EditorSession) {
    let Some(project) = session.project() else {
        println!("当前没有打开的项目。");
        return;
    };
    info!(
        walls = project.walls.len(),
        furniture = project.furniture.len(),
        "CLI 演示项目统计"
    );

    println!(
        "项目 {}：{}，房间 {:.1} x {:.1}",
        project.id, project.name, project.room_width, project.room_depth
    );
    println!(
        "当前工具={}，网格可见={}",
        session.active_tool().as_str(),
        if session.grid_visible() { "是" } else { "否" }
    );
    match session.selection() {
        Selection::None => println!("当前尚未选中任何对象。"),
        Selection::Furniture(id) => println!("选中家具 {id}"),
        Selection::Wall(id) => println!("选中墙体 {id}"),
    }

    println!("墙体：");
    for wall in &project.walls {
        println!(
            "  - ({:.2}, {:.2}) -> ({:.2}, {:.2})，长度={:.2}，角度={:.1}°，高={:.2}，厚={:.2}",
            wall.start.x(),
            wall.start.z(),
            wall.end.x(),
            wall.end.z(),
            wall_length(wall),
            wall_angle(wall).to_degrees(),
            wall.height,
            wall.thickness
        );
    }

    println!("家具：");
    for item in &project.furniture {
        println!(
            "  - {} [{}] {}，位置=({:.2}, {:.2}, {:.2})，朝向={:.1}°，缩放=({:.2}, {:.2}, {:.2})，颜色={}",
            item.name,
            item.category,
            item.model_type.as_str(),
            item.position.x(),
            item.position.y(),
            item.position.z(),
            item.rotation.y().to_degrees(),
            item.scale.x(),
            item.scale.y(),
            item.scale.z(),
            item.color
        );
    }
}
