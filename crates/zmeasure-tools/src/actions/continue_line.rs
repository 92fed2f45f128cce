//! 延长线 Action
//!
//! 与普通画线相同，但端点会捕捉附近其他图形的控制点，
//! 并且沿线段方向从终点再延伸一倍长度。
//!
//! 完成后只生成一个 [`Geometry::ContinuedLine`]：延伸部分属于同一图形，
//! 不提供额外的控制点，拖动端点时随之更新。

use crate::action::{
    Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry,
};
use zmeasure_core::geometry::{Geometry, Segment};
use zmeasure_core::math::Point2;
use zmeasure_core::snap::{SnapPoint, SnapSession};

/// 画线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// 等待设置起点
    SetStartpoint,
    /// 等待设置终点
    SetEndpoint,
}

pub struct ContinueLineAction {
    status: Status,
    start_point: Option<Point2>,
    /// 最近一次捕捉后的鼠标位置
    current_point: Option<Point2>,
    /// 当前拖动的捕捉会话，`reset` 时结束
    session: Option<SnapSession>,
}

impl ContinueLineAction {
    pub fn new() -> Self {
        Self {
            status: Status::SetStartpoint,
            start_point: None,
            current_point: None,
            session: None,
        }
    }

    /// 捕捉当前鼠标位置
    fn snap(&mut self, ctx: &ActionContext) -> Point2 {
        // 正在绘制的线段尚未加入文档，不需要排除
        let session = self
            .session
            .get_or_insert_with(|| SnapSession::begin(ctx.document.snap_resolver(), None));
        let point = session.update(ctx.mouse_pos, ctx.projection, ctx.document);
        self.current_point = Some(point);
        point
    }

    /// 最近一次捕捉结果（用于显示捕捉标记）
    pub fn current_snap(&self) -> Option<&SnapPoint> {
        self.session.as_ref().and_then(SnapSession::current)
    }

    fn trigger(&mut self, ctx: &ActionContext, start: Point2, end: Point2) -> ActionResult {
        let line = Segment::new(start, end);
        let result: ActionResult = ctx
            .document
            .solver()
            .continuation(&line)
            .map(|_| vec![Geometry::ContinuedLine(line)])
            .into();
        self.reset();
        result
    }
}

impl Default for ContinueLineAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ContinueLineAction {
    fn action_type(&self) -> ActionType {
        ActionType::ContinueLine
    }

    fn reset(&mut self) {
        self.status = Status::SetStartpoint;
        self.start_point = None;
        self.current_point = None;
        self.session = None;
    }

    fn on_mouse_move(&mut self, ctx: &ActionContext) -> ActionResult {
        self.snap(ctx);
        ActionResult::Continue
    }

    fn on_mouse_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let point = self.snap(ctx);
                match (self.status, self.start_point) {
                    (Status::SetEndpoint, Some(start)) => self.trigger(ctx, start, point),
                    _ => {
                        self.start_point = Some(point);
                        self.status = Status::SetEndpoint;
                        ActionResult::Continue
                    }
                }
            }
            MouseButton::Right => match self.status {
                Status::SetStartpoint => ActionResult::Cancel,
                Status::SetEndpoint => {
                    self.reset();
                    ActionResult::Continue
                }
            },
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn get_prompt(&self) -> &str {
        match self.status {
            Status::SetStartpoint => "Specify first point:",
            Status::SetEndpoint => "Specify next point:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        let mut previews = Vec::new();

        if let (Status::SetEndpoint, Some(start)) = (self.status, self.start_point) {
            let end = self.current_point.unwrap_or(ctx.mouse_pos);
            let line = Segment::new(start, end);
            previews.push(PreviewGeometry::new(Geometry::Line(line)));

            if let Ok(extension) = ctx.document.solver().continuation(&line) {
                previews.push(PreviewGeometry::reference(Geometry::Line(extension)));
            }
        }

        if let Some(snap) = self.current_snap() {
            previews.push(PreviewGeometry::reference(Geometry::Point(snap.point)));
        }

        previews
    }
}
