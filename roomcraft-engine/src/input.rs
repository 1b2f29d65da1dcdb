//! 属性面板输入清洗：原始文本在这里转换为合法数值，不向界面抛出错误。

use roomcraft_core::model::{FurnitureId, FurniturePatch, MIN_FURNITURE_SCALE};

use crate::errors::EngineError;
use crate::session::EditorSession;

pub const MIN_ROTATION_DEGREES: f64 = -180.0;
pub const MAX_ROTATION_DEGREES: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// 一次属性面板编辑，携带用户输入的原始文本。
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Position(Axis, String),
    /// 角度制，超出 [-180, 180] 时截断。
    RotationDegrees(Axis, String),
    Scale(Axis, String),
    Color(String),
    Name(String),
}

/// 解析有限数值，空串、非数字、NaN 与无穷都返回 `None`。
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[inline]
pub fn number_or(raw: &str, fallback: f64) -> f64 {
    parse_number(raw).unwrap_or(fallback)
}

/// `#rgb` 或 `#rrggbb`。
pub fn is_hex_color(raw: &str) -> bool {
    let Some(hex) = raw.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// 合法颜色统一为小写，否则沿用之前的颜色。
pub fn sanitize_color(raw: &str, previous: &str) -> String {
    let candidate = raw.trim();
    if is_hex_color(candidate) {
        candidate.to_ascii_lowercase()
    } else {
        previous.to_string()
    }
}

/// 应用一次属性编辑：
/// - 位置：非法输入视为 0；
/// - 旋转：非法输入保持原值，合法值截断到 [-180, 180] 后转为弧度；
/// - 缩放：非法输入视为最小缩放，且不低于最小缩放；
/// - 颜色/名称：非法或空白时保持原值。
pub fn apply_property_edit(
    session: &mut EditorSession,
    id: FurnitureId,
    edit: PropertyEdit,
) -> Result<(), EngineError> {
    let item = session
        .project()
        .ok_or(EngineError::NoProject)?
        .furniture_item(id)
        .ok_or(EngineError::FurnitureNotFound(id))?;

    let patch = match edit {
        PropertyEdit::Position(axis, raw) => {
            let value = number_or(&raw, 0.0);
            FurniturePatch {
                position: Some(item.position.with_axis(axis.index(), value)),
                ..FurniturePatch::default()
            }
        }
        PropertyEdit::RotationDegrees(axis, raw) => {
            let Some(degrees) = parse_number(&raw) else {
                return Ok(());
            };
            let radians = degrees
                .clamp(MIN_ROTATION_DEGREES, MAX_ROTATION_DEGREES)
                .to_radians();
            FurniturePatch {
                rotation: Some(item.rotation.with_axis(axis.index(), radians)),
                ..FurniturePatch::default()
            }
        }
        PropertyEdit::Scale(axis, raw) => {
            let value = number_or(&raw, MIN_FURNITURE_SCALE).max(MIN_FURNITURE_SCALE);
            FurniturePatch {
                scale: Some(item.scale.with_axis(axis.index(), value)),
                ..FurniturePatch::default()
            }
        }
        PropertyEdit::Color(raw) => FurniturePatch {
            color: Some(sanitize_color(&raw, &item.color)),
            ..FurniturePatch::default()
        },
        PropertyEdit::Name(raw) => {
            let name = raw.trim();
            if name.is_empty() {
                return Ok(());
            }
            FurniturePatch {
                name: Some(name.to_string()),
                ..FurniturePatch::default()
            }
        }
    };
    session.update_furniture(id, patch)
}

/// 房间尺寸输入：非法或非正数的一边沿用当前值。
pub fn apply_room_size_edit(
    session: &mut EditorSession,
    raw_width: &str,
    raw_depth: &str,
) -> Result<(), EngineError> {
    let project = session.project().ok_or(EngineError::NoProject)?;
    let pick = |raw: &str, current: f64| {
        parse_number(raw)
            .filter(|v| *v > 0.0)
            .unwrap_or(current)
    };
    let width = pick(raw_width, project.room_width);
    let depth = pick(raw_depth, project.room_depth);
    session.update_room_size(width, depth)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use roomcraft_core::geometry::Vector3;
    use roomcraft_core::model::NewFurniture;

    use super::*;

    fn setup() -> (EditorSession, FurnitureId) {
        let mut session = EditorSession::default();
        session.start_new_project();
        let id = session
            .add_furniture(
                NewFurniture::new("Desk", "Office")
                    .with_position(Vector3::new(1.0, 0.5, 1.0))
                    .with_scale(Vector3::new(1.4, 0.75, 0.7))
                    .with_color("#34495e"),
            )
            .unwrap();
        (session, id)
    }

    fn item(session: &EditorSession, id: FurnitureId) -> roomcraft_core::model::FurnitureItem {
        session
            .project()
            .unwrap()
            .furniture_item(id)
            .unwrap()
            .clone()
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn position_falls_back_to_zero() {
        let (mut session, id) = setup();
        apply_property_edit(&mut session, id, PropertyEdit::Position(Axis::X, "3.5".into()))
            .unwrap();
        apply_property_edit(&mut session, id, PropertyEdit::Position(Axis::Z, "".into())).unwrap();
        assert_eq!(item(&session, id).position, Vector3::new(3.5, 0.5, 0.0));
    }

    #[test]
    fn rotation_is_clamped_and_converted() {
        let (mut session, id) = setup();
        let edit = PropertyEdit::RotationDegrees(Axis::Y, "90".into());
        apply_property_edit(&mut session, id, edit).unwrap();
        assert!((item(&session, id).rotation.y() - FRAC_PI_2).abs() < 1e-12);

        let edit = PropertyEdit::RotationDegrees(Axis::Y, "oops".into());
        apply_property_edit(&mut session, id, edit).unwrap();
        assert!((item(&session, id).rotation.y() - FRAC_PI_2).abs() < 1e-12);

        let edit = PropertyEdit::RotationDegrees(Axis::X, "720".into());
        apply_property_edit(&mut session, id, edit).unwrap();
        assert!((item(&session, id).rotation.x() - 180f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn scale_never_drops_below_minimum() {
        let (mut session, id) = setup();
        apply_property_edit(&mut session, id, PropertyEdit::Scale(Axis::X, "-4".into())).unwrap();
        apply_property_edit(&mut session, id, PropertyEdit::Scale(Axis::Y, "x".into())).unwrap();
        apply_property_edit(&mut session, id, PropertyEdit::Scale(Axis::Z, "2".into())).unwrap();
        assert_eq!(
            item(&session, id).scale,
            Vector3::new(MIN_FURNITURE_SCALE, MIN_FURNITURE_SCALE, 2.0)
        );
    }

    #[test]
    fn color_and_name_keep_previous_on_bad_input() {
        let (mut session, id) = setup();
        apply_property_edit(&mut session, id, PropertyEdit::Color("blue".into())).unwrap();
        assert_eq!(item(&session, id).color, "#34495e");
        apply_property_edit(&mut session, id, PropertyEdit::Color("#ABCDEF".into())).unwrap();
        assert_eq!(item(&session, id).color, "#abcdef");

        apply_property_edit(&mut session, id, PropertyEdit::Name("   ".into())).unwrap();
        assert_eq!(item(&session, id).name, "Desk");
    }

    #[test]
    fn missing_item_is_reported() {
        let (mut session, _) = setup();
        let missing = FurnitureId::new();
        let err = apply_property_edit(&mut session, missing, PropertyEdit::Color("#fff".into()))
            .unwrap_err();
        assert_eq!(err, EngineError::FurnitureNotFound(missing));
    }

    #[test]
    fn room_size_edit_keeps_current_on_bad_side() {
        let (mut session, _) = setup();
        apply_room_size_edit(&mut session, "12", "-3").unwrap();
        let project = session.project().unwrap();
        assert_eq!(project.room_width, 12.0);
        assert_eq!(project.room_depth, 10.0);
    }

    #[test]
    fn hex_color_shapes() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#gggggg"));
    }
}
