//! 几何图元定义
//!
//! 支持的图元：
//! - 点 (Point)
//! - 线段 (Segment)
//! - 延长线 (ContinuedLine)：线段加上终点之后等长的延伸部分
//! - 平行线对 (ParallelLines)
//! - 三点圆 (CenterCircle)

use crate::catalog::ShapeKind;
use crate::math::{self, Point2, Vector2, DEGENERATE_LENGTH, EPSILON};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point2),
    Line(Segment),
    /// 延伸部分由线段导出，没有自己的控制点
    ContinuedLine(Segment),
    ParallelLines(ParallelLines),
    Circle(CenterCircle),
}

impl Geometry {
    /// 获取几何的类型
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::Line(_) | Geometry::ContinuedLine(_) => ShapeKind::Line,
            Geometry::ParallelLines(_) => ShapeKind::ParallelLines,
            Geometry::Circle(_) => ShapeKind::Circle,
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::ContinuedLine(_) => "Continue Line",
            Geometry::ParallelLines(_) => "Parallel Lines",
            Geometry::Circle(_) => "Circle Center",
        }
    }

    /// 控制点（用于选择、拖动和捕捉）
    pub fn handle_points(&self) -> Vec<Point2> {
        match self {
            Geometry::Point(p) => vec![*p],
            Geometry::Line(s) | Geometry::ContinuedLine(s) => vec![s.start, s.end],
            Geometry::ParallelLines(pl) => pl.points().to_vec(),
            Geometry::Circle(c) => c.handle_points().to_vec(),
        }
    }

    /// 拖动第 `index` 个控制点，返回新的几何
    ///
    /// 索引越界，或拖动后无法构成圆时返回 `None`。
    pub fn move_handle(&self, index: usize, delta: Vector2) -> Option<Geometry> {
        match self {
            Geometry::Point(p) => (index == 0).then(|| Geometry::Point(*p + delta)),
            Geometry::Line(s) => s.move_handle(index, delta).map(Geometry::Line),
            Geometry::ContinuedLine(s) => s.move_handle(index, delta).map(Geometry::ContinuedLine),
            Geometry::ParallelLines(pl) => pl.move_handle(index, delta).map(Geometry::ParallelLines),
            Geometry::Circle(c) => c.move_handle(index, delta).map(Geometry::Circle),
        }
    }

    /// 仅线段（含延长线的主体部分）返回 `Some`
    pub fn as_segment(&self) -> Option<Segment> {
        match self {
            Geometry::Line(s) | Geometry::ContinuedLine(s) => Some(*s),
            _ => None,
        }
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 方向向量（未归一化）
    pub fn direction(&self) -> Vector2 {
        math::direction(self)
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// 长度低于退化阈值
    pub fn is_degenerate(&self) -> bool {
        self.length() < DEGENERATE_LENGTH
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        math::midpoint(&self.start, &self.end)
    }

    /// 参数 `t` 处的点，`t` 不限制在 [0, 1]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    /// 从终点按原长度继续延伸：`B -> B + (B - A)`
    pub fn extension(&self) -> Segment {
        Segment::new(self.end, self.end + self.direction())
    }

    fn move_handle(&self, index: usize, delta: Vector2) -> Option<Self> {
        let mut s = *self;
        match index {
            0 => s.start += delta,
            1 => s.end += delta,
            _ => return None,
        }
        Some(s)
    }

    /// 两端点都是有限值
    pub fn is_finite(&self) -> bool {
        [self.start.x, self.start.y, self.end.x, self.end.y]
            .iter()
            .all(|c| c.is_finite())
    }
}

/// 平行线构造结果
///
/// 点的顺序固定为 `[A, B, C, D, E, F]`：原线 AB，平移线 CD，
/// E 为 AB 中点，F 为 CD 中点。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallelLines {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
    pub d: Point2,
    pub e: Point2,
    pub f: Point2,
}

impl ParallelLines {
    /// 按构造顺序返回六个点
    pub fn points(&self) -> [Point2; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn reference(&self) -> Segment {
        Segment::new(self.a, self.b)
    }

    pub fn offset_line(&self) -> Segment {
        Segment::new(self.c, self.d)
    }

    /// 两条线之间的距离
    pub fn distance(&self) -> f64 {
        (self.e - self.f).norm()
    }

    /// 拖动控制点
    ///
    /// 拖动中点 E/F 平移整条线；拖动端点只移动该端点，并重新计算所在线的中点。
    pub fn move_handle(&self, index: usize, delta: Vector2) -> Option<Self> {
        let mut pl = *self;
        match index {
            0 => pl.a += delta,
            1 => pl.b += delta,
            2 => pl.c += delta,
            3 => pl.d += delta,
            4 => {
                pl.a += delta;
                pl.b += delta;
            }
            5 => {
                pl.c += delta;
                pl.d += delta;
            }
            _ => return None,
        }
        pl.e = math::midpoint(&pl.a, &pl.b);
        pl.f = math::midpoint(&pl.c, &pl.d);
        Some(pl)
    }
}

/// 圆心十字标记的半臂长
pub const CENTER_MARKER_SIZE: f64 = 2.5;

/// 过三点的圆，带圆心标记
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterCircle {
    /// 定义圆的三个点
    pub through: [Point2; 3],
    pub center: Point2,
    pub radius: f64,
}

impl CenterCircle {
    /// 从三点求圆
    ///
    /// 三点共线（或重合）时返回 `None`。
    pub fn from_three_points(p1: Point2, p2: Point2, p3: Point2) -> Option<Self> {
        let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));

        if d.abs() < EPSILON {
            return None;
        }

        let s1 = p1.x * p1.x + p1.y * p1.y;
        let s2 = p2.x * p2.x + p2.y * p2.y;
        let s3 = p3.x * p3.x + p3.y * p3.y;

        let ux = (s1 * (p2.y - p3.y) + s2 * (p3.y - p1.y) + s3 * (p1.y - p2.y)) / d;
        let uy = (s1 * (p3.x - p2.x) + s2 * (p1.x - p3.x) + s3 * (p2.x - p1.x)) / d;

        let center = Point2::new(ux, uy);
        Some(Self {
            through: [p1, p2, p3],
            center,
            radius: (p1 - center).norm(),
        })
    }

    /// 圆心十字标记：水平线和竖直线各一条
    pub fn center_marker(&self) -> [Segment; 2] {
        let c = self.center;
        let s = CENTER_MARKER_SIZE;
        [
            Segment::new(Point2::new(c.x - s, c.y), Point2::new(c.x + s, c.y)),
            Segment::new(Point2::new(c.x, c.y - s), Point2::new(c.x, c.y + s)),
        ]
    }

    /// 三个定义点之后追加圆心
    pub fn handle_points(&self) -> [Point2; 4] {
        [self.through[0], self.through[1], self.through[2], self.center]
    }

    /// 拖动控制点
    ///
    /// 拖动圆心（索引 3）平移整个圆；拖动圆上的点按新的三点重新求圆，
    /// 三点共线时返回 `None`。
    pub fn move_handle(&self, index: usize, delta: Vector2) -> Option<Self> {
        match index {
            0..=2 => {
                let mut through = self.through;
                through[index] += delta;
                Self::from_three_points(through[0], through[1], through[2])
            }
            3 => Some(self.translated(delta)),
            _ => None,
        }
    }

    /// 整体平移
    pub fn translated(&self, delta: Vector2) -> Self {
        Self {
            through: self.through.map(|p| p + delta),
            center: self.center + delta,
            radius: self.radius,
        }
    }
}
