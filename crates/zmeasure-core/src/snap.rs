//! 端点捕捉
//!
//! 绘制线段端点时，若附近（屏幕距离）存在其他图形的控制点，
//! 则把候选点替换为该控制点。
//!
//! 距离在屏幕空间中比较，返回的始终是模型空间中的控制点。

use crate::catalog::{EntityId, ShapeCatalog};
use crate::math::{Point2, EPSILON};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 默认捕捉容差（屏幕像素）
pub const SNAP_TOLERANCE_PX: f64 = 15.0;

/// 捕捉配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// 捕捉容差（屏幕像素），距离必须严格小于该值
    pub tolerance: f64,
    pub enabled: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: SNAP_TOLERANCE_PX,
            enabled: true,
        }
    }
}

/// 模型空间与屏幕空间之间的投影
pub trait ScreenProjection {
    /// 模型坐标 → 屏幕坐标，不可投影时返回 `None`
    fn to_screen(&self, model: Point2) -> Option<Point2>;

    /// 屏幕坐标 → 模型坐标
    fn to_model(&self, _screen: Point2) -> Option<Point2> {
        None
    }
}

impl<F> ScreenProjection for F
where
    F: Fn(Point2) -> Option<Point2>,
{
    fn to_screen(&self, model: Point2) -> Option<Point2> {
        self(model)
    }
}

/// 视图变换：`screen = model * zoom + pan`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f64,
    /// 平移（屏幕像素）
    pub pan: Point2,
}

impl ViewTransform {
    pub fn new(zoom: f64, pan: Point2) -> Self {
        Self { zoom, pan }
    }

    fn is_valid(&self) -> bool {
        self.zoom.is_finite() && self.zoom > EPSILON
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(1.0, Point2::origin())
    }
}

impl ScreenProjection for ViewTransform {
    fn to_screen(&self, model: Point2) -> Option<Point2> {
        self.is_valid()
            .then(|| Point2::from(model.coords * self.zoom + self.pan.coords))
    }

    fn to_model(&self, screen: Point2) -> Option<Point2> {
        self.is_valid()
            .then(|| Point2::from((screen.coords - self.pan.coords) / self.zoom))
    }
}

/// 捕捉结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    /// 捕捉到的模型坐标
    pub point: Point2,
    pub entity_id: EntityId,
    /// 在该图形控制点列表中的索引
    pub handle_index: usize,
    /// 屏幕距离（像素）
    pub distance: f64,
}

/// 捕捉求解器
///
/// 每次调用都完整扫描目录，不做缓存。
#[derive(Debug, Clone, Default)]
pub struct SnapResolver {
    config: SnapConfig,
}

impl SnapResolver {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SnapConfig {
        &mut self.config
    }

    /// 寻找最近的控制点
    ///
    /// # 参数
    /// - `query`: 候选点（模型坐标）
    /// - `exclude`: 正在绘制的图形，不参与捕捉
    /// - `projection`: 当前视图的投影
    /// - `catalog`: 所有图形
    ///
    /// 距离相等时先遇到的控制点优先（目录顺序，其次控制点索引）。
    pub fn find_snap_point<C, P>(
        &self,
        query: Point2,
        exclude: Option<EntityId>,
        projection: &P,
        catalog: &C,
    ) -> Option<SnapPoint>
    where
        C: ShapeCatalog + ?Sized,
        P: ScreenProjection + ?Sized,
    {
        if !self.config.enabled {
            return None;
        }

        let query_screen = projection.to_screen(query)?;
        let mut best: Option<SnapPoint> = None;

        for shape in catalog.shapes() {
            if Some(shape.id) == exclude {
                continue;
            }

            for (index, handle) in shape.handles.iter().enumerate() {
                let Some(handle_screen) = projection.to_screen(*handle) else {
                    continue;
                };

                let distance = (handle_screen - query_screen).norm();
                let closer = best.map_or(true, |b| distance < b.distance);
                if distance < self.config.tolerance && closer {
                    best = Some(SnapPoint {
                        point: *handle,
                        entity_id: shape.id,
                        handle_index: index,
                        distance,
                    });
                }
            }
        }

        if let Some(snap) = &best {
            trace!(
                "Snapped to handle {} of {} ({:.2}px)",
                snap.handle_index,
                snap.entity_id,
                snap.distance
            );
        }
        best
    }
}

/// 一次拖动过程中的捕捉会话
///
/// 记录正在绘制的图形（排除在捕捉之外）和最近一次捕捉结果。
#[derive(Debug, Clone)]
pub struct SnapSession {
    resolver: SnapResolver,
    exclude: Option<EntityId>,
    current: Option<SnapPoint>,
}

impl SnapSession {
    pub fn begin(resolver: SnapResolver, exclude: Option<EntityId>) -> Self {
        Self {
            resolver,
            exclude,
            current: None,
        }
    }

    /// 候选点更新，返回捕捉后的点（未捕捉时原样返回）
    pub fn update<C, P>(&mut self, candidate: Point2, projection: &P, catalog: &C) -> Point2
    where
        C: ShapeCatalog + ?Sized,
        P: ScreenProjection + ?Sized,
    {
        self.current = self
            .resolver
            .find_snap_point(candidate, self.exclude, projection, catalog);
        self.current.map_or(candidate, |snap| snap.point)
    }

    pub fn current(&self) -> Option<&SnapPoint> {
        self.current.as_ref()
    }

    pub fn exclude(&self) -> Option<EntityId> {
        self.exclude
    }
}
