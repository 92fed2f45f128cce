//! 平行线 Action
//!
//! 在第一条选中线段的逆时针一侧生成平行线对，
//! 两条线可以拖动中点 E/F 调整距离。

use crate::action::{Action, ActionContext, ActionResult, ActionType};
use zmeasure_core::catalog::first_selected_line;
use zmeasure_core::geometry::Geometry;

pub struct ParallelLineAction;

impl ParallelLineAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParallelLineAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ParallelLineAction {
    fn action_type(&self) -> ActionType {
        ActionType::ParallelLine
    }

    fn init(&mut self, ctx: &ActionContext) -> ActionResult {
        first_selected_line(ctx.document)
            .and_then(|line| ctx.document.solver().parallel_offset(&line))
            .map(|parallel| vec![Geometry::ParallelLines(parallel)])
            .into()
    }

    fn reset(&mut self) {}

    fn get_prompt(&self) -> &str {
        "Please select a line first"
    }
}
