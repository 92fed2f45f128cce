//! 图形目录接口
//!
//! 宿主应用持有所有可绘制图形及其选中状态。核心只通过 [`ShapeCatalog`]
//! 读取图形的控制点，从不直接修改图形。

use crate::error::MeasureError;
use crate::geometry::{Geometry, Segment};
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 图形唯一标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// 分配新的ID（进程内唯一）
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 图形类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    Line,
    ParallelLines,
    Circle,
    /// 宿主的其他图形（只参与捕捉）
    Other,
}

/// 图层分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayerKind {
    /// 用户绘制的标注
    #[default]
    Draw,
    /// 派生的测量图形
    Measure,
}

/// 宿主图形的只读视图
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeView {
    pub id: EntityId,
    pub kind: ShapeKind,
    pub layer: LayerKind,
    pub selected: bool,
    pub handles: Vec<Point2>,
}

impl ShapeView {
    pub fn is_line(&self) -> bool {
        self.kind == ShapeKind::Line
    }

    /// 线段能力检查
    ///
    /// 非线段或控制点缺失/非有限值时返回 `None`。
    pub fn as_segment(&self) -> Option<Segment> {
        if !self.is_line() {
            return None;
        }
        match self.handles.as_slice() {
            [start, end, ..] => Some(Segment::new(*start, *end)).filter(Segment::is_finite),
            _ => None,
        }
    }
}

/// 图形目录
///
/// 迭代顺序即目录顺序，"第一个选中的线段" 按此顺序确定。
pub trait ShapeCatalog {
    /// 所有图形
    fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_;

    /// 选中的图形（保持目录顺序）
    fn selected_shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.shapes().filter(|s| s.selected)
    }
}

impl ShapeCatalog for [ShapeView] {
    fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.iter().cloned()
    }
}

impl ShapeCatalog for Vec<ShapeView> {
    fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.iter().cloned()
    }
}

/// 实体：几何 + 图层 + 选中状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub geometry: Geometry,
    pub layer: LayerKind,
    pub selected: bool,
}

impl Entity {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: EntityId::new(),
            geometry,
            layer: LayerKind::Draw,
            selected: false,
        }
    }

    pub fn with_layer(mut self, layer: LayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn view(&self) -> ShapeView {
        ShapeView {
            id: self.id,
            kind: self.geometry.kind(),
            layer: self.layer,
            selected: self.selected,
            handles: self.geometry.handle_points(),
        }
    }
}

impl ShapeCatalog for [Entity] {
    fn shapes(&self) -> impl Iterator<Item = ShapeView> + '_ {
        self.iter().map(Entity::view)
    }
}

/// 取前 `required` 条有效的选中线段
///
/// 控制点缺失或非有限值的线段被跳过，由后面的有效线段补上。
/// 有效线段不足 → [`MeasureError::InsufficientSelection`]
pub fn selected_lines<C>(catalog: &C, required: usize) -> Result<Vec<Segment>, MeasureError>
where
    C: ShapeCatalog + ?Sized,
{
    let lines: Vec<Segment> = catalog
        .selected_shapes()
        .filter(ShapeView::is_line)
        .filter_map(|view| {
            let segment = view.as_segment();
            if segment.is_none() {
                tracing::warn!("Skipping selected line {} with invalid handle points", view.id);
            }
            segment
        })
        .take(required)
        .collect();

    if lines.len() < required {
        return Err(MeasureError::InsufficientSelection {
            required,
            found: lines.len(),
        });
    }
    Ok(lines)
}

/// 第一条选中的线段
///
/// 第一条选中线段无效时不会改用后面的线段，返回 [`MeasureError::InvalidShape`]。
pub fn first_selected_line<C>(catalog: &C) -> Result<Segment, MeasureError>
where
    C: ShapeCatalog + ?Sized,
{
    let view = catalog
        .selected_shapes()
        .find(ShapeView::is_line)
        .ok_or(MeasureError::InsufficientSelection {
            required: 1,
            found: 0,
        })?;

    view.as_segment().ok_or_else(|| {
        tracing::warn!("Selected line {} has invalid handle points", view.id);
        MeasureError::InvalidShape(view.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_view(selected: bool, handles: Vec<Point2>) -> ShapeView {
        ShapeView {
            id: EntityId::new(),
            kind: ShapeKind::Line,
            layer: LayerKind::Draw,
            selected,
            handles,
        }
    }

    #[test]
    fn test_selected_lines_in_catalog_order() {
        let catalog = vec![
            line_view(false, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]),
            line_view(true, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]),
            ShapeView {
                id: EntityId::new(),
                kind: ShapeKind::Circle,
                layer: LayerKind::Draw,
                selected: true,
                handles: vec![Point2::new(5.0, 5.0)],
            },
            line_view(true, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)]),
        ];

        let lines = selected_lines(&catalog, 2).unwrap();
        assert_eq!(lines[0].end, Point2::new(2.0, 0.0));
        assert_eq!(lines[1].end, Point2::new(3.0, 0.0));
    }

    #[test]
    fn test_insufficient_selection() {
        let catalog = vec![line_view(true, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])];
        assert_eq!(
            selected_lines(&catalog, 2),
            Err(MeasureError::InsufficientSelection { required: 2, found: 1 })
        );

        let empty: Vec<ShapeView> = Vec::new();
        assert!(matches!(
            first_selected_line(&empty),
            Err(MeasureError::InsufficientSelection { required: 1, found: 0 })
        ));
    }

    #[test]
    fn test_invalid_line_handles() {
        let broken = line_view(true, vec![Point2::new(0.0, 0.0)]);
        let id = broken.id;
        let catalog = vec![broken];
        assert_eq!(first_selected_line(&catalog), Err(MeasureError::InvalidShape(id)));

        let nan = line_view(true, vec![Point2::new(f64::NAN, 0.0), Point2::new(1.0, 0.0)]);
        assert!(nan.as_segment().is_none());
    }

    #[test]
    fn test_invalid_line_is_skipped() {
        let broken = line_view(true, vec![Point2::new(0.0, 0.0)]);
        let broken_id = broken.id;
        let catalog = vec![
            broken,
            line_view(true, vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]),
            line_view(true, vec![Point2::new(0.0, 0.0), Point2::new(0.0, 10.0)]),
        ];

        let lines = selected_lines(&catalog, 2).unwrap();
        assert_eq!(lines[0].end, Point2::new(10.0, 0.0));
        assert_eq!(lines[1].end, Point2::new(0.0, 10.0));

        // 单线工具不跳过
        assert_eq!(first_selected_line(&catalog), Err(MeasureError::InvalidShape(broken_id)));

        // 有效线段不足时只计入有效的
        assert_eq!(
            selected_lines(&catalog[..2], 2),
            Err(MeasureError::InsufficientSelection { required: 2, found: 1 })
        );
    }

    #[test]
    fn test_entity_view() {
        let entity = Entity::new(Geometry::Line(Segment::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
        )))
        .with_layer(LayerKind::Measure);
        let view = entity.view();
        assert_eq!(view.id, entity.id);
        assert_eq!(view.layer, LayerKind::Measure);
        assert_eq!(view.handles.len(), 2);
    }
}
