//! Action 系统
//!
//! 每个测量工具是一个独立的 Action 实现，采用状态机模式处理用户交互。
//! Action 只读取文档，新图形通过 [`ActionResult::CreateEntities`] 交给文档插入。

use crate::document::Document;
use zmeasure_core::geometry::Geometry;
use zmeasure_core::math::{AngleMeasure, Point2};
use zmeasure_core::snap::ScreenProjection;
use zmeasure_core::MeasureError;

/// Action 执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// 继续当前 action
    Continue,
    /// 完成当前 action，创建实体
    CreateEntities(Vec<Geometry>),
    /// 完成当前 action，显示夹角
    ShowAngle(AngleMeasure),
    /// 无法执行（选择不足、线段退化等），提示用户
    Rejected(MeasureError),
    /// 取消当前 action
    Cancel,
}

impl ActionResult {
    /// 需要提示给用户的文本
    pub fn message(&self) -> Option<String> {
        match self {
            ActionResult::ShowAngle(m) => Some(format!(
                "Angle between the two lines:\n  Acute/Obtuse: {:.2}°\n  Supplementary: {:.2}°",
                m.angle, m.supplementary
            )),
            ActionResult::Rejected(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

impl From<Result<Vec<Geometry>, MeasureError>> for ActionResult {
    fn from(result: Result<Vec<Geometry>, MeasureError>) -> Self {
        match result {
            Ok(geometries) => ActionResult::CreateEntities(geometries),
            Err(err) => ActionResult::Rejected(err),
        }
    }
}

/// Action 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    AngleCalculation,
    PerpendicularBisector,
    PerpendicularDistance,
    ParallelLine,
    TrisectionPerpendicular,
    ContinueLine,
    CircleCenter,
}

impl ActionType {
    pub const ALL: [ActionType; 7] = [
        ActionType::AngleCalculation,
        ActionType::PerpendicularBisector,
        ActionType::PerpendicularDistance,
        ActionType::ParallelLine,
        ActionType::TrisectionPerpendicular,
        ActionType::ContinueLine,
        ActionType::CircleCenter,
    ];

    /// 获取 action 的名称
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::AngleCalculation => "Angle Calculation",
            ActionType::PerpendicularBisector => "Perpendicular Bisector",
            ActionType::PerpendicularDistance => "Perpendicular Distance",
            ActionType::ParallelLine => "Parallel Line",
            ActionType::TrisectionPerpendicular => "Trisection Perpendiculars",
            ActionType::ContinueLine => "Continue Line",
            ActionType::CircleCenter => "Circle Center",
        }
    }

    /// 需要的选中线段数量
    pub fn required_lines(&self) -> usize {
        match self {
            ActionType::AngleCalculation => 2,
            ActionType::PerpendicularBisector
            | ActionType::PerpendicularDistance
            | ActionType::ParallelLine
            | ActionType::TrisectionPerpendicular => 1,
            ActionType::ContinueLine | ActionType::CircleCenter => 0,
        }
    }
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 鼠标模型坐标
    pub mouse_pos: Point2,
    /// 当前文档（只读）
    pub document: &'a Document,
    /// 当前视图投影（用于捕捉）
    pub projection: &'a dyn ScreenProjection,
}

impl<'a> ActionContext<'a> {
    pub fn new(document: &'a Document, projection: &'a dyn ScreenProjection, mouse_pos: Point2) -> Self {
        Self {
            mouse_pos,
            document,
            projection,
        }
    }

    /// 同一文档和视图，新的鼠标位置
    pub fn at(&self, mouse_pos: Point2) -> Self {
        Self {
            mouse_pos,
            document: self.document,
            projection: self.projection,
        }
    }
}

/// 预览几何体
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGeometry {
    pub geometry: Geometry,
    pub is_reference: bool, // 是否是参考线（虚线显示）
}

impl PreviewGeometry {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            is_reference: false,
        }
    }

    pub fn reference(geometry: Geometry) -> Self {
        Self {
            geometry,
            is_reference: true,
        }
    }
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Action trait - 所有测量工具的核心接口
pub trait Action: Send {
    /// 获取 action 类型
    fn action_type(&self) -> ActionType;

    /// 获取 action 名称
    fn name(&self) -> &str {
        self.action_type().name()
    }

    /// 激活 action
    ///
    /// 只依赖当前选择的工具在这里直接给出结果。
    fn init(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    /// 重置 action 状态
    fn reset(&mut self);

    // ========== 事件处理 ==========

    /// 鼠标移动事件
    fn on_mouse_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    /// 鼠标点击事件
    fn on_mouse_click(&mut self, _ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Right => ActionResult::Cancel,
            _ => ActionResult::Continue,
        }
    }

    // ========== UI 提示 ==========

    /// 获取当前状态的提示文本
    fn get_prompt(&self) -> &str;

    // ========== 预览 ==========

    /// 获取预览几何体
    fn get_preview(&self, _ctx: &ActionContext) -> Vec<PreviewGeometry> {
        Vec::new()
    }
}
