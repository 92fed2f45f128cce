//! 具体的 Action 实现
//!
//! 每个测量工具对应一个 Action 实现

mod angle;
mod bisector;
mod circle_center;
mod continue_line;
mod parallel_line;
mod perpendicular_distance;
mod trisection;

pub use angle::AngleAction;
pub use bisector::PerpendicularBisectorAction;
pub use circle_center::CircleCenterAction;
pub use continue_line::ContinueLineAction;
pub use parallel_line::ParallelLineAction;
pub use perpendicular_distance::PerpendicularDistanceAction;
pub use trisection::TrisectionAction;

use crate::action::{Action, ActionType};

/// 创建指定类型的 Action
pub fn create_action(action_type: ActionType) -> Box<dyn Action> {
    match action_type {
        ActionType::AngleCalculation => Box::new(AngleAction::new()),
        ActionType::PerpendicularBisector => Box::new(PerpendicularBisectorAction::new()),
        ActionType::PerpendicularDistance => Box::new(PerpendicularDistanceAction::new()),
        ActionType::ParallelLine => Box::new(ParallelLineAction::new()),
        ActionType::TrisectionPerpendicular => Box::new(TrisectionAction::new()),
        ActionType::ContinueLine => Box::new(ContinueLineAction::new()),
        ActionType::CircleCenter => Box::new(CircleCenterAction::new()),
    }
}
