//! 垂直平分线 Action

use crate::action::{Action, ActionContext, ActionResult, ActionType};
use zmeasure_core::catalog::first_selected_line;
use zmeasure_core::geometry::Geometry;

pub struct PerpendicularBisectorAction;

impl PerpendicularBisectorAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerpendicularBisectorAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PerpendicularBisectorAction {
    fn action_type(&self) -> ActionType {
        ActionType::PerpendicularBisector
    }

    fn init(&mut self, ctx: &ActionContext) -> ActionResult {
        first_selected_line(ctx.document)
            .and_then(|line| ctx.document.solver().perpendicular_bisector(&line))
            .map(|bisector| vec![Geometry::Line(bisector)])
            .into()
    }

    fn reset(&mut self) {}

    fn get_prompt(&self) -> &str {
        "Select a line first"
    }
}
