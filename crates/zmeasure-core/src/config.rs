//! 测量工具配置
//!
//! 所有字段都有默认值，JSON 中缺省的字段使用默认值。

use crate::error::ConfigError;
use crate::snap::SnapConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 派生图形的默认尺寸（模型单位，与缩放无关）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// 垂直平分线/三等分垂线的最小长度
    pub perpendicular_length: f64,
    /// 垂线长度相对原线长度的比例
    pub perpendicular_ratio: f64,
    /// 平行线的最小偏移距离
    pub parallel_offset: f64,
    /// 平行线偏移相对原线长度的比例
    pub parallel_ratio: f64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            perpendicular_length: 100.0,
            perpendicular_ratio: 0.5,
            parallel_offset: 50.0,
            parallel_ratio: 0.3,
        }
    }
}

impl ConstructionConfig {
    /// `max(perpendicular_length, line_length * perpendicular_ratio)`
    pub fn perpendicular_length_for(&self, line_length: f64) -> f64 {
        self.perpendicular_length.max(line_length * self.perpendicular_ratio)
    }

    /// `max(parallel_offset, line_length * parallel_ratio)`
    pub fn parallel_offset_for(&self, line_length: f64) -> f64 {
        self.parallel_offset.max(line_length * self.parallel_ratio)
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub snap: SnapConfig,
    pub construction: ConstructionConfig,
}

impl MeasureConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded measure config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        let non_negative = |x: f64| x.is_finite() && x >= 0.0;

        if !positive(self.snap.tolerance) {
            return Err(ConfigError::Invalid(format!(
                "snap tolerance must be positive, got {}",
                self.snap.tolerance
            )));
        }

        let c = &self.construction;
        if !positive(c.perpendicular_length) || !positive(c.parallel_offset) {
            return Err(ConfigError::Invalid(
                "default construction lengths must be positive".to_string(),
            ));
        }
        if !non_negative(c.perpendicular_ratio) || !non_negative(c.parallel_ratio) {
            return Err(ConfigError::Invalid(
                "construction ratios must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}
