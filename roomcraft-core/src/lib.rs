pub mod geometry {
    use glam::{DVec2, DVec3};
    use serde::{Deserialize, Serialize};

    use crate::model::Wall;

    /// 默认网格步长（世界单位），墙体绘制与家具摆放共用。
    pub const DEFAULT_GRID_CELL: f64 = 0.5;
    /// 短于该长度的墙段视为退化，既不提交也不渲染。
    pub const MIN_WALL_LENGTH: f64 = 0.1;

    /// 地面平面上的点。`x` 对应世界 X 轴，`z` 对应世界 Z 轴。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, z: f64) -> Self {
            Self(DVec2::new(x, z))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn translate(self, offset: Vector2) -> Self {
            Self(self.0 + offset.0)
        }

        #[inline]
        pub fn vector_to(self, other: Point2) -> Vector2 {
            Vector2(other.0 - self.0)
        }

        #[inline]
        pub fn distance(self, other: Point2) -> f64 {
            self.0.distance(other.0)
        }

        #[inline]
        pub fn midpoint(self, other: Point2) -> Point2 {
            Self((self.0 + other.0) * 0.5)
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Point2 {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 地面平面上的二维向量。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector2(pub DVec2);

    impl Vector2 {
        #[inline]
        pub fn new(x: f64, z: f64) -> Self {
            Self(DVec2::new(x, z))
        }

        #[inline]
        pub fn from_points(start: Point2, end: Point2) -> Self {
            Self(end.0 - start.0)
        }

        #[inline]
        pub fn length(self) -> f64 {
            self.0.length()
        }

        #[inline]
        pub fn length_squared(self) -> f64 {
            self.0.length_squared()
        }

        /// 相对 +X 轴的朝向角，等价于 `atan2(dz, dx)`。
        #[inline]
        pub fn angle(self) -> f64 {
            self.0.y.atan2(self.0.x)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.y
        }
    }

    impl From<DVec2> for Vector2 {
        fn from(value: DVec2) -> Self {
            Self(value)
        }
    }

    /// 三维向量，用于家具的位置、旋转（弧度）与缩放。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector3(pub DVec3);

    impl Vector3 {
        pub const ZERO: Self = Self(DVec3::ZERO);
        pub const ONE: Self = Self(DVec3::ONE);

        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }

        #[inline]
        pub fn to_array(self) -> [f64; 3] {
            self.0.to_array()
        }

        /// 返回替换第 `axis` 个分量后的新向量，越界轴号保持原值。
        pub fn with_axis(self, axis: usize, value: f64) -> Self {
            let mut components = self.0.to_array();
            if let Some(slot) = components.get_mut(axis) {
                *slot = value;
            }
            Self(DVec3::from_array(components))
        }

        /// 按下标取分量，越界返回 `None`。
        #[inline]
        pub fn axis(self, axis: usize) -> Option<f64> {
            self.0.to_array().get(axis).copied()
        }
    }

    impl From<DVec3> for Vector3 {
        fn from(value: DVec3) -> Self {
            Self(value)
        }
    }

    impl From<[f64; 3]> for Vector3 {
        fn from(value: [f64; 3]) -> Self {
            Self(DVec3::from_array(value))
        }
    }

    /// 墙体渲染所需的长方体描述：中心、尺寸（长/高/厚）与绕 Y 轴的朝向角。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct WallBox {
        pub center: Vector3,
        pub size: Vector3,
        pub angle: f64,
    }

    /// 将单个坐标吸附到 `cell` 的整数倍，恰好位于两格中间时向正无穷取整。
    #[inline]
    pub fn snap_value(value: f64, cell: f64) -> f64 {
        if !(cell.is_finite() && cell > 0.0) || !value.is_finite() {
            return value;
        }
        (value / cell + 0.5).floor() * cell
    }

    /// 网格吸附。吸附与网格是否可见无关。
    pub fn snap_to_grid(point: Point2, cell: f64) -> Point2 {
        Point2::new(snap_value(point.x(), cell), snap_value(point.z(), cell))
    }

    #[inline]
    pub fn segment_length(start: Point2, end: Point2) -> f64 {
        start.distance(end)
    }

    #[inline]
    pub fn segment_angle(start: Point2, end: Point2) -> f64 {
        Vector2::from_points(start, end).angle()
    }

    #[inline]
    pub fn is_degenerate_segment(start: Point2, end: Point2) -> bool {
        is_degenerate_with(start, end, MIN_WALL_LENGTH)
    }

    /// 使用自定义阈值判断墙段是否退化；非有限长度同样视为退化。
    #[inline]
    pub fn is_degenerate_with(start: Point2, end: Point2, min_length: f64) -> bool {
        let length = segment_length(start, end);
        !length.is_finite() || length < min_length
    }

    #[inline]
    pub fn wall_length(wall: &Wall) -> f64 {
        segment_length(wall.start, wall.end)
    }

    #[inline]
    pub fn wall_angle(wall: &Wall) -> f64 {
        segment_angle(wall.start, wall.end)
    }

    #[inline]
    pub fn wall_midpoint(wall: &Wall) -> Point2 {
        wall.start.midpoint(wall.end)
    }

    /// 计算墙体长方体；退化墙体返回 `None`，调用方应跳过渲染。
    pub fn wall_box(wall: &Wall) -> Option<WallBox> {
        if is_degenerate_segment(wall.start, wall.end) {
            return None;
        }
        let mid = wall_midpoint(wall);
        Some(WallBox {
            center: Vector3::new(mid.x(), wall.height / 2.0, mid.z()),
            size: Vector3::new(wall_length(wall), wall.height, wall.thickness),
            angle: wall_angle(wall),
        })
    }

}

pub mod model {
    use std::fmt;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::geometry::{Point2, Vector3};

    pub const DEFAULT_WALL_HEIGHT: f64 = 2.5;
    pub const DEFAULT_WALL_THICKNESS: f64 = 0.15;
    pub const DEFAULT_ROOM_WIDTH: f64 = 10.0;
    pub const DEFAULT_ROOM_DEPTH: f64 = 10.0;
    pub const DEFAULT_PROJECT_NAME: &str = "Untitled Room";
    pub const DEFAULT_FURNITURE_COLOR: &str = "#8b7355";
    pub const MIN_FURNITURE_SCALE: f64 = 0.1;

    macro_rules! uuid_id {
        ($(#[$meta:meta])* $name:ident) => {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                /// 生成新的随机 ID（UUID v4）。
                #[inline]
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                #[inline]
                pub fn from_uuid(raw: Uuid) -> Self {
                    Self(raw)
                }

                #[inline]
                pub fn get(self) -> Uuid {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl std::str::FromStr for $name {
                type Err = uuid::Error;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    Uuid::parse_str(raw.trim()).map(Self)
                }
            }
        };
    }

    uuid_id!(
        /// 家具 ID。
        FurnitureId
    );
    uuid_id!(
        /// 墙体 ID。
        WallId
    );
    uuid_id!(
        /// 项目 ID，同时用作持久化主键与分享链接的一部分。
        ProjectId
    );

    /// 没有外部模型资源时使用的基础几何体。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ShapeKind {
        #[default]
        Box,
        Cylinder,
        Sphere,
    }

    impl ShapeKind {
        pub fn as_str(self) -> &'static str {
            match self {
                ShapeKind::Box => "box",
                ShapeKind::Cylinder => "cylinder",
                ShapeKind::Sphere => "sphere",
            }
        }
    }

    /// 家具的完整变换：位置、欧拉角（弧度）与缩放。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Transform {
        pub position: Vector3,
        pub rotation: Vector3,
        pub scale: Vector3,
    }

    impl Default for Transform {
        fn default() -> Self {
            Self {
                position: Vector3::ZERO,
                rotation: Vector3::ZERO,
                scale: Vector3::ONE,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FurnitureItem {
        pub id: FurnitureId,
        pub name: String,
        pub category: String,
        pub position: Vector3,
        pub rotation: Vector3,
        pub scale: Vector3,
        #[serde(default)]
        pub model_type: ShapeKind,
        pub color: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub model_url: Option<String>,
    }

    impl FurnitureItem {
        pub fn from_new(id: FurnitureId, item: NewFurniture) -> Self {
            let NewFurniture {
                name,
                category,
                position,
                rotation,
                scale,
                model_type,
                color,
                model_url,
            } = item;
            Self {
                id,
                name,
                category,
                position,
                rotation,
                scale: sanitize_scale(scale),
                model_type,
                color,
                model_url,
            }
        }

        #[inline]
        pub fn transform(&self) -> Transform {
            Transform {
                position: self.position,
                rotation: self.rotation,
                scale: self.scale,
            }
        }

        /// 去掉 ID，得到可以重新插入的家具描述（复制家具时使用）。
        pub fn to_new(&self) -> NewFurniture {
            NewFurniture {
                name: self.name.clone(),
                category: self.category.clone(),
                position: self.position,
                rotation: self.rotation,
                scale: self.scale,
                model_type: self.model_type,
                color: self.color.clone(),
                model_url: self.model_url.clone(),
            }
        }

        /// 修正从外部读入的数据：缩放分量不低于最小缩放。
        pub fn sanitize(&mut self) {
            self.scale = sanitize_scale(self.scale);
        }

        /// 合并补丁字段。缩放会被限制为正数。
        pub fn apply(&mut self, patch: FurniturePatch) {
            if let Some(name) = patch.name {
                self.name = name;
            }
            if let Some(category) = patch.category {
                self.category = category;
            }
            if let Some(position) = patch.position {
                self.position = position;
            }
            if let Some(rotation) = patch.rotation {
                self.rotation = rotation;
            }
            if let Some(scale) = patch.scale {
                self.scale = sanitize_scale(scale);
            }
            if let Some(model_type) = patch.model_type {
                self.model_type = model_type;
            }
            if let Some(color) = patch.color {
                self.color = color;
            }
            if let Some(model_url) = patch.model_url {
                self.model_url = model_url;
            }
        }
    }

    /// 尚未分配 ID 的家具。
    #[derive(Debug, Clone, PartialEq)]
    pub struct NewFurniture {
        pub name: String,
        pub category: String,
        pub position: Vector3,
        pub rotation: Vector3,
        pub scale: Vector3,
        pub model_type: ShapeKind,
        pub color: String,
        pub model_url: Option<String>,
    }

    impl NewFurniture {
        pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                category: category.into(),
                position: Vector3::ZERO,
                rotation: Vector3::ZERO,
                scale: Vector3::ONE,
                model_type: ShapeKind::Box,
                color: DEFAULT_FURNITURE_COLOR.to_string(),
                model_url: None,
            }
        }

        pub fn with_position(mut self, position: Vector3) -> Self {
            self.position = position;
            self
        }

        pub fn with_scale(mut self, scale: Vector3) -> Self {
            self.scale = scale;
            self
        }

        pub fn with_shape(mut self, shape: ShapeKind) -> Self {
            self.model_type = shape;
            self
        }

        pub fn with_color(mut self, color: impl Into<String>) -> Self {
            self.color = color.into();
            self
        }
    }

    /// 家具的局部更新。`model_url` 使用双层 `Option` 以区分“不修改”与“清空”。
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct FurniturePatch {
        pub name: Option<String>,
        pub category: Option<String>,
        pub position: Option<Vector3>,
        pub rotation: Option<Vector3>,
        pub scale: Option<Vector3>,
        pub model_type: Option<ShapeKind>,
        pub color: Option<String>,
        pub model_url: Option<Option<String>>,
    }

    impl FurniturePatch {
        pub fn transform(transform: Transform) -> Self {
            Self {
                position: Some(transform.position),
                rotation: Some(transform.rotation),
                scale: Some(transform.scale),
                ..Self::default()
            }
        }
    }

    /// 非正数或非有限的缩放分量会被提升到 `MIN_FURNITURE_SCALE`。
    pub fn sanitize_scale(scale: Vector3) -> Vector3 {
        let fix = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                MIN_FURNITURE_SCALE
            }
        };
        Vector3::new(fix(scale.x()), fix(scale.y()), fix(scale.z()))
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Wall {
        pub id: WallId,
        pub start: Point2,
        pub end: Point2,
        pub height: f64,
        pub thickness: f64,
    }

    impl Wall {
        pub fn from_new(id: WallId, wall: NewWall) -> Self {
            Self {
                id,
                start: wall.start,
                end: wall.end,
                height: positive_or(wall.height, DEFAULT_WALL_HEIGHT),
                thickness: positive_or(wall.thickness, DEFAULT_WALL_THICKNESS),
            }
        }

        /// 修正从外部读入的数据：非正数的高度与厚度回退为默认值。
        pub fn sanitize(&mut self) {
            self.height = positive_or(self.height, DEFAULT_WALL_HEIGHT);
            self.thickness = positive_or(self.thickness, DEFAULT_WALL_THICKNESS);
        }

        pub fn apply(&mut self, patch: WallPatch) {
            if let Some(start) = patch.start {
                self.start = start;
            }
            if let Some(end) = patch.end {
                self.end = end;
            }
            if let Some(height) = patch.height {
                self.height = positive_or(height, self.height);
            }
            if let Some(thickness) = patch.thickness {
                self.thickness = positive_or(thickness, self.thickness);
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct NewWall {
        pub start: Point2,
        pub end: Point2,
        pub height: f64,
        pub thickness: f64,
    }

    impl NewWall {
        /// 使用默认高度与厚度连接两点。
        pub fn between(start: Point2, end: Point2) -> Self {
            Self {
                start,
                end,
                height: DEFAULT_WALL_HEIGHT,
                thickness: DEFAULT_WALL_THICKNESS,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct WallPatch {
        pub start: Option<Point2>,
        pub end: Option<Point2>,
        pub height: Option<f64>,
        pub thickness: Option<f64>,
    }

    fn positive_or(value: f64, fallback: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            fallback
        }
    }

    /// 沿房间四条边生成围墙（房间中心位于原点），顺序为南、东、北、西，首尾相接。
    pub fn perimeter_walls(width: f64, depth: f64, height: f64, thickness: f64) -> [NewWall; 4] {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        let corners = [
            Point2::new(-hw, -hd),
            Point2::new(hw, -hd),
            Point2::new(hw, hd),
            Point2::new(-hw, hd),
        ];
        std::array::from_fn(|i| NewWall {
            start: corners[i],
            end: corners[(i + 1) % 4],
            height,
            thickness,
        })
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Project {
        pub id: ProjectId,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub room_width: f64,
        pub room_depth: f64,
        #[serde(default)]
        pub furniture: Vec<FurnitureItem>,
        #[serde(default)]
        pub walls: Vec<Wall>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub thumbnail_url: Option<String>,
    }

    impl Project {
        /// 空项目：没有墙体和家具。
        pub fn empty(name: impl Into<String>, room_width: f64, room_depth: f64) -> Self {
            let now = Utc::now();
            Self {
                id: ProjectId::new(),
                name: name.into(),
                created_at: now,
                updated_at: now,
                room_width,
                room_depth,
                furniture: Vec::new(),
                walls: Vec::new(),
                thumbnail_url: None,
            }
        }

        /// 进入编辑器新建项目时使用的默认布局：四面围墙，无家具。
        pub fn with_perimeter(
            name: impl Into<String>,
            room_width: f64,
            room_depth: f64,
            wall_height: f64,
            wall_thickness: f64,
        ) -> Self {
            let mut project = Self::empty(name, room_width, room_depth);
            for wall in perimeter_walls(room_width, room_depth, wall_height, wall_thickness) {
                project.walls.push(Wall::from_new(WallId::new(), wall));
            }
            project
        }

        pub fn new_default() -> Self {
            Self::with_perimeter(
                DEFAULT_PROJECT_NAME,
                DEFAULT_ROOM_WIDTH,
                DEFAULT_ROOM_DEPTH,
                DEFAULT_WALL_HEIGHT,
                DEFAULT_WALL_THICKNESS,
            )
        }

        #[inline]
        pub fn touch(&mut self) {
            self.updated_at = Utc::now();
        }

        pub fn furniture_item(&self, id: FurnitureId) -> Option<&FurnitureItem> {
            self.furniture.iter().find(|item| item.id == id)
        }

        pub fn furniture_item_mut(&mut self, id: FurnitureId) -> Option<&mut FurnitureItem> {
            self.furniture.iter_mut().find(|item| item.id == id)
        }

        pub fn wall(&self, id: WallId) -> Option<&Wall> {
            self.walls.iter().find(|wall| wall.id == id)
        }

        pub fn wall_mut(&mut self, id: WallId) -> Option<&mut Wall> {
            self.walls.iter_mut().find(|wall| wall.id == id)
        }

        /// 追加家具并返回新 ID。与已有 ID 冲突时重新生成。
        pub fn push_furniture(&mut self, item: NewFurniture) -> FurnitureId {
            let mut id = FurnitureId::new();
            while self.furniture_item(id).is_some() {
                id = FurnitureId::new();
            }
            self.furniture.push(FurnitureItem::from_new(id, item));
            id
        }

        pub fn push_wall(&mut self, wall: NewWall) -> WallId {
            let mut id = WallId::new();
            while self.wall(id).is_some() {
                id = WallId::new();
            }
            self.walls.push(Wall::from_new(id, wall));
            id
        }

        pub fn take_furniture(&mut self, id: FurnitureId) -> Option<FurnitureItem> {
            let index = self.furniture.iter().position(|item| item.id == id)?;
            Some(self.furniture.remove(index))
        }

        pub fn take_wall(&mut self, id: WallId) -> Option<Wall> {
            let index = self.walls.iter().position(|wall| wall.id == id)?;
            Some(self.walls.remove(index))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::geometry::wall_length;

        #[test]
        fn default_project_has_closed_perimeter() {
            let project = Project::new_default();
            assert_eq!(project.walls.len(), 4);
            assert!(project.furniture.is_empty());
            assert_eq!(project.name, DEFAULT_PROJECT_NAME);

            let perimeter: f64 = project.walls.iter().map(wall_length).sum();
            assert!((perimeter - 40.0).abs() < 1e-9);

            for (i, wall) in project.walls.iter().enumerate() {
                let next = &project.walls[(i + 1) % project.walls.len()];
                assert_eq!(wall.end, next.start, "wall {i} must meet wall {}", i + 1);
                assert_eq!(wall.height, DEFAULT_WALL_HEIGHT);
                assert_eq!(wall.thickness, DEFAULT_WALL_THICKNESS);
            }
        }

        #[test]
        fn perimeter_follows_room_size() {
            let walls = perimeter_walls(6.0, 4.0, 3.0, 0.2);
            assert_eq!(walls[0].start, Point2::new(-3.0, -2.0));
            assert_eq!(walls[0].end, Point2::new(3.0, -2.0));
            assert_eq!(walls[2].start, Point2::new(3.0, 2.0));
            assert_eq!(walls[3].end, Point2::new(-3.0, -2.0));
            assert!(walls.iter().all(|w| w.height == 3.0 && w.thickness == 0.2));
        }

        #[test]
        fn scale_is_kept_positive() {
            let mut project = Project::empty("t", 5.0, 5.0);
            let id = project.push_furniture(
                NewFurniture::new("Box", "Misc").with_scale(Vector3::new(0.0, -2.0, 1.5)),
            );
            let item = project.furniture_item(id).unwrap();
            assert_eq!(item.scale, Vector3::new(MIN_FURNITURE_SCALE, MIN_FURNITURE_SCALE, 1.5));

            let item = project.furniture_item_mut(id).unwrap();
            item.apply(FurniturePatch {
                scale: Some(Vector3::new(f64::NAN, 2.0, 2.0)),
                ..FurniturePatch::default()
            });
            assert_eq!(item.scale, Vector3::new(MIN_FURNITURE_SCALE, 2.0, 2.0));
        }

        #[test]
        fn wall_patch_keeps_dimensions_positive() {
            let mut wall = Wall::from_new(
                WallId::new(),
                NewWall {
                    start: Point2::new(0.0, 0.0),
                    end: Point2::new(1.0, 0.0),
                    height: -1.0,
                    thickness: 0.0,
                },
            );
            assert_eq!(wall.height, DEFAULT_WALL_HEIGHT);
            assert_eq!(wall.thickness, DEFAULT_WALL_THICKNESS);

            wall.apply(WallPatch {
                height: Some(3.0),
                thickness: Some(-0.5),
                ..WallPatch::default()
            });
            assert_eq!(wall.height, 3.0);
            assert_eq!(wall.thickness, DEFAULT_WALL_THICKNESS);
        }

        #[test]
        fn sanitize_repairs_loaded_entities() {
            let mut wall = Wall {
                id: WallId::new(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(1.0, 0.0),
                height: -1.0,
                thickness: f64::NAN,
            };
            wall.sanitize();
            assert_eq!(wall.height, DEFAULT_WALL_HEIGHT);
            assert_eq!(wall.thickness, DEFAULT_WALL_THICKNESS);

            let mut item =
                FurnitureItem::from_new(FurnitureId::new(), NewFurniture::new("Desk", "Office"));
            item.scale = Vector3::new(0.0, -2.0, 1.0);
            item.sanitize();
            assert_eq!(
                item.scale,
                Vector3::new(MIN_FURNITURE_SCALE, MIN_FURNITURE_SCALE, 1.0)
            );
        }

        #[test]
        fn furniture_serializes_with_camel_case_keys() {
            let mut project = Project::empty("t", 5.0, 5.0);
            let id = project.push_furniture(
                NewFurniture::new("Floor Lamp", "Living Room").with_shape(ShapeKind::Cylinder),
            );
            let value = serde_json::to_value(project.furniture_item(id).unwrap()).unwrap();
            assert_eq!(value["modelType"], "cylinder");
            assert_eq!(value["position"], serde_json::json!([0.0, 0.0, 0.0]));
            assert!(value.get("modelUrl").is_none());
        }

        #[test]
        fn take_removes_only_the_matching_entry() {
            let mut project = Project::new_default();
            let first = project.walls[0].id;
            let removed = project.take_wall(first).expect("wall exists");
            assert_eq!(removed.id, first);
            assert_eq!(project.walls.len(), 3);
            assert!(project.take_wall(first).is_none());
        }

        #[test]
        fn ids_parse_from_display_form() {
            let id = ProjectId::new();
            let parsed: ProjectId = format!(" {id} ").parse().expect("valid uuid");
            assert_eq!(parsed, id);
            assert!("not-a-uuid".parse::<ProjectId>().is_err());
        }
    }
}

pub mod catalog {
    use crate::geometry::{Point2, Vector3};
    use crate::model::{NewFurniture, ShapeKind};

    /// 内置家具库条目。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct CatalogEntry {
        pub slug: &'static str,
        pub name: &'static str,
        pub category: &'static str,
        pub shape: ShapeKind,
        pub default_scale: [f64; 3],
        pub color: &'static str,
    }

    impl CatalogEntry {
        /// 生成放置在地面点 `at` 上的家具，底面贴地。
        pub fn to_furniture(&self, at: Point2) -> NewFurniture {
            let scale = Vector3::from(self.default_scale);
            NewFurniture::new(self.name, self.category)
                .with_shape(self.shape)
                .with_scale(scale)
                .with_color(self.color)
                .with_position(Vector3::new(at.x(), scale.y() / 2.0, at.z()))
        }
    }

    const fn entry(
        slug: &'static str,
        name: &'static str,
        category: &'static str,
        shape: ShapeKind,
        default_scale: [f64; 3],
        color: &'static str,
    ) -> CatalogEntry {
        CatalogEntry {
            slug,
            name,
            category,
            shape,
            default_scale,
            color,
        }
    }

    pub static CATALOG: [CatalogEntry; 12] = [
        entry("sofa", "Sofa", "Living Room", ShapeKind::Box, [2.0, 0.8, 1.0], "#4a90a4"),
        entry("armchair", "Armchair", "Living Room", ShapeKind::Box, [1.0, 0.8, 1.0], "#6b8e7f"),
        entry(
            "coffee-table",
            "Coffee Table",
            "Living Room",
            ShapeKind::Box,
            [1.2, 0.4, 0.6],
            "#8b7355",
        ),
        entry(
            "floor-lamp",
            "Floor Lamp",
            "Living Room",
            ShapeKind::Cylinder,
            [0.3, 1.5, 0.3],
            "#d4af37",
        ),
        entry("tv-stand", "TV Stand", "Living Room", ShapeKind::Box, [1.8, 0.5, 0.4], "#2c3e50"),
        entry("bed", "Double Bed", "Bedroom", ShapeKind::Box, [2.0, 0.6, 2.2], "#7d8c8d"),
        entry("nightstand", "Nightstand", "Bedroom", ShapeKind::Box, [0.5, 0.5, 0.4], "#5d4e37"),
        entry("desk", "Desk", "Office", ShapeKind::Box, [1.4, 0.75, 0.7], "#34495e"),
        entry("bookshelf", "Bookshelf", "Office", ShapeKind::Box, [1.0, 2.0, 0.3], "#6c5b4a"),
        entry(
            "dining-table",
            "Dining Table",
            "Kitchen",
            ShapeKind::Box,
            [1.8, 0.75, 1.0],
            "#5c4033",
        ),
        entry(
            "kitchen-island",
            "Kitchen Island",
            "Kitchen",
            ShapeKind::Box,
            [1.5, 0.9, 0.8],
            "#2f4f4f",
        ),
        entry("plant-pot", "Plant Pot", "Decor", ShapeKind::Cylinder, [0.4, 0.8, 0.4], "#228b22"),
    ];

    #[inline]
    pub fn entries() -> impl Iterator<Item = &'static CatalogEntry> {
        CATALOG.iter()
    }

    pub fn find(slug: &str) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|entry| entry.slug == slug)
    }

    /// 按首次出现顺序列出分类。
    pub fn categories() -> Vec<&'static str> {
        let mut seen: Vec<&'static str> = Vec::new();
        for entry in &CATALOG {
            if !seen.contains(&entry.category) {
                seen.push(entry.category);
            }
        }
        seen
    }

}
