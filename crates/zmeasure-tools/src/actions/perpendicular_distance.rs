//! 垂直距离 Action
//!
//! 先选中一条参考线，激活后单击任意点，生成从该点到参考线所在直线的垂线段。
//! 垂足可以落在参考线的延长线上。右键取消。

use crate::action::{
    Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry,
};
use zmeasure_core::catalog::first_selected_line;
use zmeasure_core::geometry::{Geometry, Segment};

/// 测量状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待激活（检查选择）
    Idle,
    /// 等待单击测量点
    SetPoint { reference: Segment },
}

pub struct PerpendicularDistanceAction {
    status: Status,
}

impl PerpendicularDistanceAction {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
        }
    }

    fn reference(&self) -> Option<Segment> {
        match self.status {
            Status::SetPoint { reference } => Some(reference),
            Status::Idle => None,
        }
    }
}

impl Default for PerpendicularDistanceAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PerpendicularDistanceAction {
    fn action_type(&self) -> ActionType {
        ActionType::PerpendicularDistance
    }

    fn init(&mut self, ctx: &ActionContext) -> ActionResult {
        match first_selected_line(ctx.document) {
            Ok(reference) => {
                self.status = Status::SetPoint { reference };
                ActionResult::Continue
            }
            Err(err) => {
                self.reset();
                ActionResult::Rejected(err)
            }
        }
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
    }

    fn on_mouse_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let Some(reference) = self.reference() else {
                    return ActionResult::Continue;
                };
                let measured = ctx
                    .document
                    .solver()
                    .perpendicular_distance(&reference, &ctx.mouse_pos);
                self.reset();
                ActionResult::CreateEntities(vec![Geometry::Line(measured.segment)])
            }
            MouseButton::Right => {
                self.reset();
                ActionResult::Cancel
            }
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn get_prompt(&self) -> &str {
        match self.status {
            Status::Idle => "Select a reference line first",
            Status::SetPoint { .. } => "Click a point to measure its distance to the line:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        let Some(reference) = self.reference() else {
            return Vec::new();
        };

        let solver = ctx.document.solver();
        let foot = solver.perpendicular_foot(&reference, &ctx.mouse_pos);
        let mut previews = vec![PreviewGeometry::new(Geometry::Line(Segment::new(
            ctx.mouse_pos,
            foot,
        )))];

        if reference.is_degenerate() {
            return previews;
        }

        // 垂足在线段外时，用参考线画出延长部分
        let ab = reference.direction();
        let t = (foot - reference.start).dot(&ab) / ab.norm_squared();
        if !(0.0..=1.0).contains(&t) {
            let nearest_end = if t < 0.0 { reference.start } else { reference.end };
            previews.push(PreviewGeometry::reference(Geometry::Line(Segment::new(
                nearest_end,
                foot,
            ))));
        }

        previews
    }
}
