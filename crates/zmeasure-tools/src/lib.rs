//! ZMeasure 测量工具
//!
//! 在核心几何引擎之上实现交互式测量工具：
//! 读取文档中的选择，调用求解器，把结果作为新的测量图形交回文档。

pub mod action;
pub mod actions;
pub mod document;

pub use action::{Action, ActionContext, ActionResult, ActionType, MouseButton, PreviewGeometry};
pub use actions::create_action;
pub use document::Document;
