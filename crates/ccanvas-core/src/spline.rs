//! Display-only spline through captured points.
//!
//! Each pair of neighbouring points is joined by a Catmull-Rom segment
//! (tension 0.5) expressed as a cubic Bézier, and every segment is sampled at
//! a fixed arc-length step derived from the domain. The result passes through
//! every input point, in input order.

use crate::config::Domain;
use kurbo::{BezPath, CubicBez, ParamCurve, ParamCurveArclen, Point};

/// Samples per shorter domain side: `step = min(width, height) / SPLINE_RESOLUTION`.
pub const SPLINE_RESOLUTION: f64 = 100.0;

/// Catmull-Rom tension used for the tangents.
const TENSION: f64 = 0.5;

/// Arc-length accuracy used when measuring segments.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// Absorbs arc-length measurement error so exact multiples of the step do
/// not gain an extra sample.
const STEP_SLACK: f64 = 1e-4;

/// Upper bound on samples per segment, for segments far larger than the domain.
const MAX_SAMPLES_PER_SEGMENT: usize = 10_000;

/// Arc-length sampling step for a domain.
pub fn sampling_step(domain: &Domain) -> f64 {
    domain.min_extent() / SPLINE_RESOLUTION
}

/// Cubic segments of the Catmull-Rom curve through `points`.
fn segments(points: &[Point]) -> impl Iterator<Item = CubicBez> + '_ {
    let last = points.len().saturating_sub(1);
    (0..last).map(move |i| {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let t1 = (p2 - p0) * TENSION;
        let t2 = (p3 - p1) * TENSION;

        CubicBez::new(p1, p1 + t1 / 3.0, p2 - t2 / 3.0, p2)
    })
}

/// Interpolate a smooth curve through `points`.
///
/// Callers must pass at least two points; fewer yield the input unchanged.
pub fn interpolate(points: &[Point], domain: &Domain) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let step = sampling_step(domain);
    let mut curve = vec![points[0]];

    for segment in segments(points) {
        let length = segment.arclen(ARCLEN_ACCURACY);
        let samples = ((length / step - STEP_SLACK).ceil() as usize).clamp(1, MAX_SAMPLES_PER_SEGMENT);

        for i in 1..samples {
            let t = segment.inv_arclen(length * i as f64 / samples as f64, ARCLEN_ACCURACY);
            curve.push(segment.eval(t));
        }
        // Land exactly on the captured point.
        curve.push(segment.p3);
    }

    curve
}

/// Polyline path through already-interpolated points.
pub fn to_path(curve: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = curve.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain::new(10.0, 10.0).unwrap()
    }

    #[test]
    fn test_sampling_step() {
        assert!((sampling_step(&domain()) - 0.1).abs() < f64::EPSILON);
        let wide = Domain::new(200.0, 50.0).unwrap();
        assert!((sampling_step(&wide) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_passes_through_inputs_in_order() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 3.0),
            Point::new(5.0, 1.0),
            Point::new(8.0, 6.0),
        ];
        let curve = interpolate(&points, &domain());

        assert!(curve.len() > points.len());
        assert_eq!(curve.first(), points.first());
        assert_eq!(curve.last(), points.last());

        let mut search_from = 0;
        for p in &points {
            let offset = curve[search_from..]
                .iter()
                .position(|c| c == p)
                .expect("input point missing from curve");
            search_from += offset;
        }
    }

    #[test]
    fn test_density_follows_domain_not_point_count() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let curve = interpolate(&points, &domain());
        // A straight 10-unit segment at step 0.1 gives 100 intervals.
        assert_eq!(curve.len(), 101);

        let coarse = Domain::new(100.0, 100.0).unwrap();
        assert_eq!(interpolate(&points, &coarse).len(), 11);
    }

    #[test]
    fn test_straight_segment_is_monotonic() {
        let points = vec![Point::new(1.0, 1.0), Point::new(4.0, 1.0)];
        let curve = interpolate(&points, &domain());
        for pair in curve.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!((pair[1].y - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_does_not_mutate_input() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let before = points.clone();
        let _ = interpolate(&points, &domain());
        assert_eq!(points, before);
    }

    #[test]
    fn test_repeated_point_segment() {
        let points = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let curve = interpolate(&points, &domain());
        assert_eq!(curve.first(), Some(&Point::new(1.0, 1.0)));
        assert_eq!(curve.last(), Some(&Point::new(2.0, 2.0)));
        assert!(curve.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_to_path() {
        assert!(to_path(&[]).elements().is_empty());
        let path = to_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(path.elements().len(), 2);
    }
}
