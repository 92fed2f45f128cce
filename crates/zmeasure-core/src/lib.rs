//! ZMeasure 核心几何引擎
//!
//! 为二维线段标注画布提供派生几何计算和端点捕捉，与任何 GUI 事件循环无关。
//!
//! # 架构设计
//!
//! - `math`: 向量运算（方向、长度、归一化、垂直、中点、夹角）
//! - `relation`: 由参考线段构造派生图形（垂直平分线、平行线、垂足等）
//! - `snap`: 在屏幕容差内捕捉其他图形的控制点
//! - `catalog`: 宿主图形目录的只读接口
//!
//! 所有计算都是同步的纯函数，失败以 [`MeasureError`] 返回。
//!
//! # 示例
//!
//! ```rust
//! use zmeasure_core::prelude::*;
//!
//! let solver = LineRelationSolver::default();
//! let line = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
//!
//! let bisector = solver.perpendicular_bisector(&line).unwrap();
//! assert!((bisector.length() - 100.0).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod relation;
pub mod snap;

pub use error::{ConfigError, MeasureError};

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::catalog::{
        first_selected_line, selected_lines, Entity, EntityId, LayerKind, ShapeCatalog, ShapeKind,
        ShapeView,
    };
    pub use crate::config::{ConstructionConfig, MeasureConfig};
    pub use crate::error::{ConfigError, MeasureError};
    pub use crate::geometry::{CenterCircle, Geometry, ParallelLines, Segment};
    pub use crate::math::{AngleMeasure, Point2, Vector2};
    pub use crate::relation::{LineRelationSolver, PerpendicularDistance};
    pub use crate::snap::{ScreenProjection, SnapConfig, SnapPoint, SnapResolver, SnapSession, ViewTransform};
}
