//! 二维向量运算
//!
//! 所有计算都在模型（图像）空间中进行，点和向量使用 nalgebra 的 `f64` 类型。

use crate::error::MeasureError;
use crate::geometry::Segment;
use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-10;

/// 线段退化阈值（模型单位）
///
/// 长度小于该值的线段没有可用的方向。
pub const DEGENERATE_LENGTH: f64 = 1e-3;

/// 线段方向向量（终点减起点，不归一化）
#[inline]
pub fn direction(segment: &Segment) -> Vector2 {
    segment.end - segment.start
}

/// 向量长度
#[inline]
pub fn length(v: &Vector2) -> f64 {
    v.norm()
}

/// 单位向量
///
/// 长度溢出（或为 NaN）时返回 [`MeasureError::NonFinite`]，
/// 小于 [`DEGENERATE_LENGTH`] 时返回 [`MeasureError::DegenerateInput`]。
pub fn normalize(v: &Vector2) -> Result<Vector2, MeasureError> {
    let len = length(v);
    if !len.is_finite() {
        return Err(MeasureError::NonFinite);
    }
    if len < DEGENERATE_LENGTH {
        return Err(MeasureError::DegenerateInput { length: len });
    }
    Ok(v / len)
}

/// 逆时针旋转 90°：`(x, y) -> (-y, x)`
///
/// 所有垂线构造都使用这一个方向约定。
#[inline]
pub fn perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 两点中点
#[inline]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// 两条线之间的夹角（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasure {
    /// 方向向量夹角，范围 [0, 180]
    pub angle: f64,
    /// 补角 `180 - angle`
    pub supplementary: f64,
}

/// 计算两个方向向量的夹角
///
/// 任一向量退化或长度溢出时返回 `None`。余弦值会被钳制到 [-1, 1]，避免 `acos` 产生 NaN。
pub fn angle_between(d1: &Vector2, d2: &Vector2) -> Option<AngleMeasure> {
    let len1 = length(d1);
    let len2 = length(d2);
    let usable = |len: f64| len.is_finite() && len >= DEGENERATE_LENGTH;
    if !usable(len1) || !usable(len2) {
        return None;
    }

    let cos = (d1.dot(d2) / (len1 * len2)).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();

    Some(AngleMeasure {
        angle,
        supplementary: 180.0 - angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_perpendicular_is_counter_clockwise() {
        let p = perpendicular(&Vector2::new(1.0, 0.0));
        assert_eq!(p, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_normalize_rejects_short_vector() {
        let err = normalize(&Vector2::new(1e-4, 0.0)).unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateInput { .. }));

        let unit = normalize(&Vector2::new(3.0, 4.0)).unwrap();
        assert!((unit.norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_rejects_overflow() {
        // 2e308 溢出为 inf
        let v = Vector2::new(1e308, 0.0) * 2.0;
        assert_eq!(normalize(&v), Err(MeasureError::NonFinite));
        assert_eq!(normalize(&Vector2::new(f64::NAN, 1.0)), Err(MeasureError::NonFinite));
    }

    #[test]
    fn test_angle_same_and_opposite() {
        let d = Vector2::new(2.0, 7.0);
        let same = angle_between(&d, &d).unwrap();
        assert!(same.angle.abs() < 1e-6);
        assert!((same.supplementary - 180.0).abs() < 1e-6);

        let opposite = angle_between(&d, &-d).unwrap();
        assert!((opposite.angle - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_degenerate_has_no_result() {
        assert!(angle_between(&Vector2::zeros(), &Vector2::new(1.0, 0.0)).is_none());
        let huge = Vector2::new(1e308, 1e308) * 2.0;
        assert!(angle_between(&huge, &Vector2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(&Point2::new(0.0, 0.0), &Point2::new(4.0, -2.0));
        assert_eq!(m, Point2::new(2.0, -1.0));
    }

    proptest! {
        #[test]
        fn angle_and_flipped_angle_sum_to_180(a in 0.0f64..std::f64::consts::TAU, b in 0.0f64..std::f64::consts::TAU) {
            let d1 = Vector2::new(a.cos(), a.sin());
            let d2 = Vector2::new(b.cos(), b.sin());
            let sum = angle_between(&d1, &d2).unwrap().angle + angle_between(&d1, &-d2).unwrap().angle;
            prop_assert!((sum - 180.0).abs() < 1e-6);
        }

        #[test]
        fn angle_stays_in_range(x1 in -100.0f64..100.0, y1 in -100.0f64..100.0, x2 in -100.0f64..100.0, y2 in -100.0f64..100.0) {
            if let Some(m) = angle_between(&Vector2::new(x1, y1), &Vector2::new(x2, y2)) {
                prop_assert!(m.angle >= 0.0 && m.angle <= 180.0);
                prop_assert!((m.angle + m.supplementary - 180.0).abs() < EPSILON);
            }
        }
    }
}
