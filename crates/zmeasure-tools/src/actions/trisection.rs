//! 三等分点垂线 Action

use crate::action::{Action, ActionContext, ActionResult, ActionType};
use zmeasure_core::catalog::first_selected_line;
use zmeasure_core::geometry::Geometry;

pub struct TrisectionAction;

impl TrisectionAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrisectionAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for TrisectionAction {
    fn action_type(&self) -> ActionType {
        ActionType::TrisectionPerpendicular
    }

    fn init(&mut self, ctx: &ActionContext) -> ActionResult {
        // 两条垂线一起创建，任何一条失败都不创建
        first_selected_line(ctx.document)
            .and_then(|line| ctx.document.solver().trisection_perpendiculars(&line))
            .map(|lines| lines.into_iter().map(Geometry::Line).collect::<Vec<_>>())
            .into()
    }

    fn reset(&mut self) {}

    fn get_prompt(&self) -> &str {
        "Select a line first"
    }
}
