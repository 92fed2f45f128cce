//! 线段关系求解
//!
//! 由一条或两条参考线段构造派生图形：
//! - 夹角 (inter_line_angle)
//! - 垂直平分线 (perpendicular_bisector)
//! - 垂足 / 垂直距离 (perpendicular_foot / perpendicular_distance)
//! - 平行线 (parallel_offset)
//! - 三等分点垂线 (trisection_perpendiculars)
//! - 延长线 (continuation)
//! - 三点圆圆心 (circle_through)
//!
//! 所有垂线使用 [`math::perpendicular`] 的逆时针约定。

use crate::config::ConstructionConfig;
use crate::error::MeasureError;
use crate::geometry::{CenterCircle, ParallelLines, Segment};
use crate::math::{self, AngleMeasure, Point2, Vector2};
use tracing::debug;

/// 退化为一点的线段（|AB|² 低于此值时垂足返回起点）
const FOOT_DEGENERATE_LENGTH_SQ: f64 = 1e-10;

/// 垂线段：起点为查询点，终点为垂足
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerpendicularDistance {
    pub segment: Segment,
    pub distance: f64,
}

/// 派生几何求解器
///
/// 无内部状态，只持有构造尺寸配置。
#[derive(Debug, Clone, Default)]
pub struct LineRelationSolver {
    config: ConstructionConfig,
}

impl LineRelationSolver {
    pub fn new(config: ConstructionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConstructionConfig {
        &self.config
    }

    /// 两条线段之间的夹角及补角
    pub fn inter_line_angle(
        &self,
        line1: &Segment,
        line2: &Segment,
    ) -> Result<AngleMeasure, MeasureError> {
        let measure = math::angle_between(&line1.direction(), &line2.direction()).ok_or_else(
            || {
                let length = line1.length().min(line2.length());
                if line1.length().is_finite() && line2.length().is_finite() {
                    MeasureError::DegenerateInput { length }
                } else {
                    MeasureError::NonFinite
                }
            },
        )?;

        debug!(
            "Angle between lines: {:.2}° (supplementary {:.2}°)",
            measure.angle, measure.supplementary
        );
        Ok(measure)
    }

    /// 垂直平分线
    ///
    /// 以中点为中心，长度为 `max(100, |line| * 0.5)`。
    pub fn perpendicular_bisector(&self, line: &Segment) -> Result<Segment, MeasureError> {
        let length = self.config.perpendicular_length_for(line.length());
        let bisector = self.centered_perpendicular(line, line.midpoint(), length)?;

        debug!(
            "Perpendicular bisector through ({:.3}, {:.3}), length {:.3}",
            line.midpoint().x,
            line.midpoint().y,
            length
        );
        Ok(bisector)
    }

    /// 查询点在线段所在直线上的垂足
    ///
    /// 参数 `t` 不限制在 [0, 1]，垂足可以落在线段延长线上。
    /// 线段退化为一点时返回起点。
    pub fn perpendicular_foot(&self, line: &Segment, point: &Point2) -> Point2 {
        let ab = line.direction();
        let len_sq = ab.norm_squared();

        if len_sq < FOOT_DEGENERATE_LENGTH_SQ {
            return line.start;
        }

        let t = (point - line.start).dot(&ab) / len_sq;
        line.point_at(t)
    }

    /// 查询点到直线的垂线段及距离
    pub fn perpendicular_distance(&self, line: &Segment, point: &Point2) -> PerpendicularDistance {
        let foot = self.perpendicular_foot(line, point);
        let segment = Segment::new(*point, foot);
        let distance = segment.length();

        debug!(
            "Perpendicular distance from ({:.3}, {:.3}): {:.3}",
            point.x, point.y, distance
        );
        PerpendicularDistance { segment, distance }
    }

    /// 平行线
    ///
    /// 沿逆时针法向平移 `max(50, |line| * 0.3)`。
    pub fn parallel_offset(&self, line: &Segment) -> Result<ParallelLines, MeasureError> {
        let normal = math::normalize(&math::perpendicular(&line.direction()))?;
        let offset = self.config.parallel_offset_for(line.length());
        let shift = normal * offset;

        let a = line.start;
        let b = line.end;
        let c = a + shift;
        let d = b + shift;

        let parallel = ParallelLines {
            a,
            b,
            c,
            d,
            e: math::midpoint(&a, &b),
            f: math::midpoint(&c, &d),
        };
        if !parallel.points().iter().all(is_finite_point) {
            return Err(MeasureError::NonFinite);
        }

        debug!("Parallel line at offset {:.3}", offset);
        Ok(parallel)
    }

    /// 三等分点处的两条垂线
    ///
    /// 两条都成功才返回，否则整体失败。
    pub fn trisection_perpendiculars(&self, line: &Segment) -> Result<[Segment; 2], MeasureError> {
        let length = self.config.perpendicular_length_for(line.length());
        let one_third = line.point_at(1.0 / 3.0);
        let two_thirds = line.point_at(2.0 / 3.0);

        let first = self.centered_perpendicular(line, one_third, length)?;
        let second = self.centered_perpendicular(line, two_thirds, length)?;

        debug!("Trisection perpendiculars, length {:.3}", length);
        Ok([first, second])
    }

    /// 从终点 B 按原长度继续延伸的线段 `B -> B + (B - A)`
    pub fn continuation(&self, line: &Segment) -> Result<Segment, MeasureError> {
        if line.is_degenerate() {
            return Err(MeasureError::DegenerateInput {
                length: line.length(),
            });
        }
        let extension = line.extension();
        if !extension.is_finite() {
            return Err(MeasureError::NonFinite);
        }
        Ok(extension)
    }

    /// 过三点的圆
    pub fn circle_through(
        &self,
        p1: Point2,
        p2: Point2,
        p3: Point2,
    ) -> Result<CenterCircle, MeasureError> {
        let circle = CenterCircle::from_three_points(p1, p2, p3).ok_or_else(|| {
            MeasureError::DegenerateInput {
                length: (p2 - p1).norm().min((p3 - p2).norm()),
            }
        })?;
        if !is_finite_point(&circle.center) || !circle.radius.is_finite() {
            return Err(MeasureError::NonFinite);
        }

        debug!(
            "Circle center ({:.3}, {:.3}), radius {:.3}",
            circle.center.x, circle.center.y, circle.radius
        );
        Ok(circle)
    }

    /// 以 `anchor` 为中心、垂直于 `line`、总长 `length` 的线段
    fn centered_perpendicular(
        &self,
        line: &Segment,
        anchor: Point2,
        length: f64,
    ) -> Result<Segment, MeasureError> {
        let normal: Vector2 = math::normalize(&math::perpendicular(&line.direction()))?;
        let half = normal * (length / 2.0);
        let segment = Segment::new(anchor - half, anchor + half);
        if !segment.is_finite() {
            return Err(MeasureError::NonFinite);
        }
        Ok(segment)
    }
}

fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;
    use proptest::prelude::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    fn assert_point(actual: Point2, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({}, {}), got ({}, {})",
            x,
            y,
            actual.x,
            actual.y
        );
    }

    #[test]
    fn test_right_angle() {
        let solver = LineRelationSolver::default();
        let m = solver
            .inter_line_angle(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 0.0, 0.0, 10.0))
            .unwrap();
        assert!((m.angle - 90.0).abs() < 1e-9);
        assert!((m.supplementary - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_with_degenerate_line() {
        let solver = LineRelationSolver::default();
        let err = solver
            .inter_line_angle(&seg(0.0, 0.0, 10.0, 0.0), &seg(1.0, 1.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateInput { .. }));
    }

    #[test]
    fn test_perpendicular_bisector() {
        let solver = LineRelationSolver::default();
        let b = solver.perpendicular_bisector(&seg(0.0, 0.0, 10.0, 0.0)).unwrap();
        assert_point(b.start, 5.0, -50.0);
        assert_point(b.end, 5.0, 50.0);
        assert!((b.length() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bisector_of_long_line_scales() {
        let solver = LineRelationSolver::default();
        let b = solver.perpendicular_bisector(&seg(0.0, 0.0, 0.0, 400.0)).unwrap();
        assert!((b.length() - 200.0).abs() < 1e-9);
        assert_point(b.midpoint(), 0.0, 200.0);
    }

    #[test]
    fn test_perpendicular_foot_inside() {
        let solver = LineRelationSolver::default();
        let line = seg(0.0, 0.0, 10.0, 0.0);
        assert_point(solver.perpendicular_foot(&line, &Point2::new(5.0, 5.0)), 5.0, 0.0);

        let d = solver.perpendicular_distance(&line, &Point2::new(5.0, 5.0));
        assert!((d.distance - 5.0).abs() < EPSILON);
        assert_eq!(d.segment.start, Point2::new(5.0, 5.0));
    }

    #[test]
    fn test_perpendicular_foot_on_extension() {
        let solver = LineRelationSolver::default();
        let line = seg(0.0, 0.0, 10.0, 0.0);
        assert_point(solver.perpendicular_foot(&line, &Point2::new(-7.0, 3.0)), -7.0, 0.0);
        assert_point(solver.perpendicular_foot(&line, &Point2::new(25.0, -2.0)), 25.0, 0.0);
    }

    #[test]
    fn test_perpendicular_foot_degenerate_line() {
        let solver = LineRelationSolver::default();
        let line = seg(3.0, 4.0, 3.0, 4.0);
        assert_eq!(solver.perpendicular_foot(&line, &Point2::new(9.0, 9.0)), line.start);
    }

    #[test]
    fn test_parallel_offset() {
        let solver = LineRelationSolver::default();
        let p = solver.parallel_offset(&seg(0.0, 0.0, 10.0, 0.0)).unwrap();
        assert_point(p.c, 0.0, 50.0);
        assert_point(p.d, 10.0, 50.0);
        assert_point(p.e, 5.0, 0.0);
        assert_point(p.f, 5.0, 50.0);
        assert!((p.distance() - 50.0).abs() < 1e-9);
        assert_eq!(p.points()[0], p.a);
        assert_eq!(p.points()[5], p.f);
    }

    #[test]
    fn test_trisection_perpendiculars() {
        let solver = LineRelationSolver::default();
        let [first, second] = solver.trisection_perpendiculars(&seg(0.0, 0.0, 9.0, 0.0)).unwrap();
        assert_point(first.midpoint(), 3.0, 0.0);
        assert_point(second.midpoint(), 6.0, 0.0);
        assert!((first.length() - 100.0).abs() < 1e-9);
        assert!((second.length() - 100.0).abs() < 1e-9);
        assert!(first.direction().dot(&Vector2::new(9.0, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_lines_rejected() {
        let solver = LineRelationSolver::default();
        let tiny = seg(1.0, 1.0, 1.0 + 5e-4, 1.0);

        assert!(matches!(
            solver.perpendicular_bisector(&tiny),
            Err(MeasureError::DegenerateInput { .. })
        ));
        assert!(matches!(
            solver.parallel_offset(&tiny),
            Err(MeasureError::DegenerateInput { .. })
        ));
        assert!(matches!(
            solver.trisection_perpendiculars(&tiny),
            Err(MeasureError::DegenerateInput { .. })
        ));
        assert!(matches!(
            solver.continuation(&tiny),
            Err(MeasureError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_overflowing_lines_rejected() {
        let solver = LineRelationSolver::default();
        let huge = seg(-1e308, 0.0, 1e308, 0.0);

        assert_eq!(solver.perpendicular_bisector(&huge), Err(MeasureError::NonFinite));
        assert_eq!(solver.parallel_offset(&huge), Err(MeasureError::NonFinite));
        assert_eq!(solver.trisection_perpendiculars(&huge), Err(MeasureError::NonFinite));
        assert_eq!(solver.continuation(&huge), Err(MeasureError::NonFinite));
        assert_eq!(
            solver.inter_line_angle(&huge, &seg(0.0, 0.0, 1.0, 0.0)),
            Err(MeasureError::NonFinite)
        );

        // 方向有限，但平移后超出范围
        let edge = seg(f64::MAX, 1e300, f64::MAX, 0.0);
        assert_eq!(solver.parallel_offset(&edge), Err(MeasureError::NonFinite));
    }

    #[test]
    fn test_continuation() {
        let solver = LineRelationSolver::default();
        let ext = solver.continuation(&seg(1.0, 1.0, 4.0, 5.0)).unwrap();
        assert_eq!(ext.start, Point2::new(4.0, 5.0));
        assert_eq!(ext.end, Point2::new(7.0, 9.0));
    }

    #[test]
    fn test_circle_through_collinear() {
        let solver = LineRelationSolver::default();
        let err = solver
            .circle_through(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, MeasureError::DegenerateInput { .. }));
    }

    #[test]
    fn test_custom_config() {
        let solver = LineRelationSolver::new(ConstructionConfig {
            perpendicular_length: 20.0,
            ..Default::default()
        });
        let b = solver.perpendicular_bisector(&seg(0.0, 0.0, 10.0, 0.0)).unwrap();
        assert!((b.length() - 20.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn foot_of_point_on_line_is_the_point(
            x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
            x2 in -500.0f64..500.0, y2 in -500.0f64..500.0,
            t in -3.0f64..3.0,
        ) {
            let line = seg(x1, y1, x2, y2);
            prop_assume!(!line.is_degenerate());
            let on_line = line.point_at(t);
            let foot = LineRelationSolver::default().perpendicular_foot(&line, &on_line);
            prop_assert!((foot - on_line).norm() < 1e-6);
        }

        #[test]
        fn parallel_offset_is_a_translation(
            x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
            x2 in -500.0f64..500.0, y2 in -500.0f64..500.0,
        ) {
            let line = seg(x1, y1, x2, y2);
            prop_assume!(!line.is_degenerate());
            let p = LineRelationSolver::default().parallel_offset(&line).unwrap();
            prop_assert!((p.reference().length() - p.offset_line().length()).abs() < 1e-9);
            prop_assert!(((p.e - p.a).norm() - (p.e - p.b).norm()).abs() < 1e-9);
            prop_assert!(((p.f - p.c).norm() - (p.f - p.d).norm()).abs() < 1e-9);
            prop_assert!(p.points().iter().all(|pt| pt.x.is_finite() && pt.y.is_finite()));
        }
    }
}
