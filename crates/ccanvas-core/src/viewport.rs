//! Mapping between window pixels and domain coordinates.

use crate::config::Domain;
use kurbo::{Affine, Point, Rect, Size};

/// Default gap between the window edge and the plot rectangle, in pixels.
pub const DEFAULT_MARGIN: f64 = 48.0;

/// Smallest plot side in pixels, so tiny windows still map invertibly.
const MIN_PLOT_SIDE: f64 = 1.0;

/// Viewport maps the domain onto the plot rectangle of a window.
///
/// The domain's origin sits at the bottom-left corner of the plot rectangle
/// and the y axis points up. Each axis is scaled independently so the domain
/// fills the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    domain: Domain,
    window: Size,
    margin: f64,
}

impl Viewport {
    /// Create a viewport for a window of the given size in physical pixels.
    pub fn new(domain: Domain, window: Size) -> Self {
        Self {
            domain,
            window,
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Update after a window resize.
    pub fn resize(&mut self, window: Size) {
        self.window = window;
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The data region in screen coordinates.
    pub fn plot_rect(&self) -> Rect {
        let x0 = self.margin.min(self.window.width / 2.0);
        let y0 = self.margin.min(self.window.height / 2.0);
        let width = (self.window.width - 2.0 * x0).max(MIN_PLOT_SIDE);
        let height = (self.window.height - 2.0 * y0).max(MIN_PLOT_SIDE);
        Rect::new(x0, y0, x0 + width, y0 + height)
    }

    /// Transform from domain to screen coordinates.
    pub fn transform(&self) -> Affine {
        let plot = self.plot_rect();
        let sx = plot.width() / self.domain.width();
        let sy = plot.height() / self.domain.height();
        Affine::translate((plot.x0, plot.y1)) * Affine::scale_non_uniform(sx, -sy)
    }

    /// Transform from screen to domain coordinates.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    pub fn data_to_screen(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Domain coordinates under a screen point, or `None` outside the plot
    /// rectangle (edges included).
    ///
    /// Points on the plot edge map onto the domain edge even when the inverse
    /// transform rounds past it.
    pub fn screen_to_data(&self, screen: Point) -> Option<Point> {
        let plot = self.plot_rect();
        let inside = (plot.x0..=plot.x1).contains(&screen.x) && (plot.y0..=plot.y1).contains(&screen.y);
        if !inside {
            return None;
        }
        let data = self.inverse_transform() * screen;
        let bounds = self.domain.rect();
        Some(Point::new(
            data.x.clamp(bounds.x0, bounds.x1),
            data.y.clamp(bounds.y0, bounds.y1),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        // 100 x 100 plot for a 10 x 10 domain: 10 px per unit.
        Viewport::new(Domain::default(), Size::new(140.0, 140.0)).with_margin(20.0)
    }

    #[test]
    fn test_plot_rect() {
        let plot = viewport().plot_rect();
        assert_eq!(plot, Rect::new(20.0, 20.0, 120.0, 120.0));
    }

    #[test]
    fn test_origin_is_bottom_left() {
        let vp = viewport();
        let origin = vp.data_to_screen(Point::ORIGIN);
        assert!((origin.x - 20.0).abs() < f64::EPSILON);
        assert!((origin.y - 120.0).abs() < f64::EPSILON);

        let corner = vp.data_to_screen(Point::new(10.0, 10.0));
        assert!((corner.x - 120.0).abs() < f64::EPSILON);
        assert!((corner.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_data_roundtrip() {
        let vp = viewport();
        let data = Point::new(2.5, 7.0);
        let back = vp.screen_to_data(vp.data_to_screen(data)).unwrap();
        assert!((back.x - data.x).abs() < 1e-9);
        assert!((back.y - data.y).abs() < 1e-9);
    }

    #[test]
    fn test_outside_plot_is_none() {
        let vp = viewport();
        assert!(vp.screen_to_data(Point::new(10.0, 60.0)).is_none());
        assert!(vp.screen_to_data(Point::new(60.0, 130.0)).is_none());
        assert!(vp.screen_to_data(Point::new(20.0, 20.0)).is_some());
    }

    #[test]
    fn test_non_uniform_scale() {
        let domain = Domain::new(20.0, 5.0).unwrap();
        let vp = Viewport::new(domain, Size::new(200.0, 100.0)).with_margin(0.0);
        let p = vp.data_to_screen(Point::new(10.0, 2.5));
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_and_degenerate_window() {
        let mut vp = viewport();
        vp.resize(Size::new(0.0, 0.0));
        let plot = vp.plot_rect();
        assert!(plot.width() >= MIN_PLOT_SIDE);
        assert!(plot.height() >= MIN_PLOT_SIDE);
        assert!(vp.inverse_transform().determinant().is_finite());
    }

    #[test]
    fn test_plot_edges_map_inside_domain() {
        let domain = Domain::new(7.3, 3.1).unwrap();
        for (w, h) in [(1000.0, 700.0), (1913.0, 1047.0), (333.0, 251.0)] {
            let vp = Viewport::new(domain, Size::new(w, h));
            let plot = vp.plot_rect();
            for corner in [
                Point::new(plot.x0, plot.y0),
                Point::new(plot.x1, plot.y0),
                Point::new(plot.x0, plot.y1),
                Point::new(plot.x1, plot.y1),
            ] {
                let data = vp.screen_to_data(corner).unwrap();
                assert!(domain.contains(data), "{:?} mapped to {:?}", corner, data);
            }
            let top_right = vp.screen_to_data(Point::new(plot.x1, plot.y0)).unwrap();
            assert!((top_right.x - 7.3).abs() < 1e-9);
            assert!((top_right.y - 3.1).abs() < 1e-9);
        }
    }
}
