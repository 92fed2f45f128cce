//! 错误定义

use crate::catalog::EntityId;
use thiserror::Error;

/// 派生几何操作的失败原因
///
/// 都是可恢复的局部错误：最坏结果是不生成新图形并提示用户。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Please select at least {required} line(s); {found} selected")]
    InsufficientSelection { required: usize, found: usize },

    #[error("Line is too short to define a direction (length {length:.6})")]
    DegenerateInput { length: f64 },

    #[error("Coordinates are out of range")]
    NonFinite,

    #[error("Invalid line selected: {0}")]
    InvalidShape(EntityId),
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
