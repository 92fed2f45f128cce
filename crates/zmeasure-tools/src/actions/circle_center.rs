//! 三点圆圆心 Action
//!
//! 依次指定圆上三点，生成带圆心十字标记的圆。圆心作为额外的控制点参与捕捉。

use crate::action::{
    Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry,
};
use zmeasure_core::geometry::Geometry;
use zmeasure_core::math::Point2;

pub struct CircleCenterAction {
    /// 已指定的点（最多两个，第三个点触发创建）
    points: Vec<Point2>,
}

impl CircleCenterAction {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(3),
        }
    }
}

impl Default for CircleCenterAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for CircleCenterAction {
    fn action_type(&self) -> ActionType {
        ActionType::CircleCenter
    }

    fn reset(&mut self) {
        self.points.clear();
    }

    fn on_mouse_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                if self.points.len() < 2 {
                    self.points.push(ctx.mouse_pos);
                    return ActionResult::Continue;
                }
                let (p1, p2) = (self.points[0], self.points[1]);

                let result = match ctx.document.solver().circle_through(p1, p2, ctx.mouse_pos) {
                    Ok(circle) => ActionResult::CreateEntities(vec![Geometry::Circle(circle)]),
                    Err(err) => ActionResult::Rejected(err),
                };
                self.reset();
                result
            }
            MouseButton::Right => {
                if self.points.is_empty() {
                    ActionResult::Cancel
                } else {
                    self.reset();
                    ActionResult::Continue
                }
            }
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn get_prompt(&self) -> &str {
        match self.points.len() {
            0 => "Specify first point on circle:",
            1 => "Specify second point on circle:",
            _ => "Specify third point on circle:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        let [p1, p2] = match self.points.as_slice() {
            [p1, p2] => [*p1, *p2],
            _ => return Vec::new(),
        };

        let Ok(circle) = ctx.document.solver().circle_through(p1, p2, ctx.mouse_pos) else {
            return Vec::new();
        };

        let mut previews = vec![PreviewGeometry::new(Geometry::Circle(circle))];
        previews.extend(
            circle
                .center_marker()
                .into_iter()
                .map(|s| PreviewGeometry::reference(Geometry::Line(s))),
        );
        previews
    }
}
