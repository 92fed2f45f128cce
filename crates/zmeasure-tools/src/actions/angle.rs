//! 夹角计算 Action
//!
//! 取前两条选中的线段，计算方向向量之间的夹角和补角。

use crate::action::{Action, ActionContext, ActionResult, ActionType};
use zmeasure_core::catalog::selected_lines;

pub struct AngleAction;

impl AngleAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AngleAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for AngleAction {
    fn action_type(&self) -> ActionType {
        ActionType::AngleCalculation
    }

    fn init(&mut self, ctx: &ActionContext) -> ActionResult {
        let lines = match selected_lines(ctx.document, self.action_type().required_lines()) {
            Ok(lines) => lines,
            Err(err) => return ActionResult::Rejected(err),
        };

        match ctx.document.solver().inter_line_angle(&lines[0], &lines[1]) {
            Ok(measure) => ActionResult::ShowAngle(measure),
            Err(err) => ActionResult::Rejected(err),
        }
    }

    fn reset(&mut self) {}

    fn get_prompt(&self) -> &str {
        "Select two lines (Ctrl+Click to multi-select)"
    }
}
