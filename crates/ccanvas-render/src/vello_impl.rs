//! Vello-based renderer implementation.

use crate::renderer::{GridStyle, RenderContext, Renderer};
use ccanvas_core::spline::to_path;
use ccanvas_core::{CanvasStyle, LineRender, LinkShape, PointShape, Viewport};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Most grid lines drawn along one axis before the spacing grows tenfold.
const MAX_GRID_LINES: f64 = 50.0;

/// Dash pattern for dashed links, in multiples of the link width.
const DASH_PATTERN: [f64; 2] = [6.0, 4.0];

/// Vello-based renderer for the capture surface.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_plot(&mut self, ctx: &RenderContext) {
        let plot = ctx.viewport.plot_rect();
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, ctx.plot_color, None, &plot);

        if ctx.grid_style == GridStyle::Lines {
            self.render_grid_lines(ctx.viewport);
        }

        self.scene.stroke(
            &Stroke::new(1.0),
            Affine::IDENTITY,
            ctx.frame_color,
            None,
            &plot,
        );
    }

    /// Render grid lines across the plot rectangle.
    fn render_grid_lines(&mut self, viewport: &Viewport) {
        let grid_color = Color::from_rgba8(200, 200, 200, 100);
        let stroke = Stroke::new(0.5);
        let domain = viewport.domain();

        let mut path = BezPath::new();
        let step_x = grid_step(domain.width());
        for i in 1..grid_count(domain.width(), step_x) {
            let x = i as f64 * step_x;
            path.move_to(viewport.data_to_screen(Point::new(x, 0.0)));
            path.line_to(viewport.data_to_screen(Point::new(x, domain.height())));
        }
        let step_y = grid_step(domain.height());
        for i in 1..grid_count(domain.height(), step_y) {
            let y = i as f64 * step_y;
            path.move_to(viewport.data_to_screen(Point::new(0.0, y)));
            path.line_to(viewport.data_to_screen(Point::new(domain.width(), y)));
        }

        self.scene
            .stroke(&stroke, Affine::IDENTITY, grid_color, None, &path);
    }

    fn render_link(&mut self, curve: &[Point], color: Color, style: &CanvasStyle, viewport: &Viewport) {
        let transform = viewport.transform();
        let screen: Vec<Point> = curve.iter().map(|p| transform * *p).collect();
        let path = to_path(&screen);

        let width = style.link_size;
        let stroke = match style.link_shape {
            LinkShape::Solid => Stroke::new(width),
            LinkShape::Dashed => {
                Stroke::new(width).with_dashes(0.0, DASH_PATTERN.map(|d| d * width.max(1.0)))
            }
        };
        self.scene
            .stroke(&stroke, Affine::IDENTITY, color, None, &path);
    }

    fn render_marker(&mut self, point: Point, color: Color, style: &CanvasStyle, viewport: &Viewport) {
        let center = viewport.data_to_screen(point);
        let size = style.point_size;
        match style.point_shape {
            PointShape::Circle => {
                let circle = Circle::new(center, size / 2.0);
                self.scene
                    .fill(Fill::NonZero, Affine::IDENTITY, color, None, &circle);
            }
            PointShape::Square => {
                let square = Rect::from_center_size(center, Size::new(size, size));
                self.scene
                    .fill(Fill::NonZero, Affine::IDENTITY, color, None, &square);
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();

        self.render_plot(ctx);

        for (index, capture) in ctx.captures.iter().enumerate() {
            let link = ctx.style.link_color(index);
            let marker = ctx.style.marker_color(index);

            match capture.render() {
                LineRender::Empty => {}
                LineRender::Marker(point) => {
                    self.render_marker(*point, marker, &ctx.style, ctx.viewport);
                }
                LineRender::Curve(curve) => {
                    self.render_link(curve, link, &ctx.style, ctx.viewport);
                    for point in capture.line().points() {
                        self.render_marker(*point, marker, &ctx.style, ctx.viewport);
                    }
                }
            }
        }
    }
}

/// Grid spacing for an axis: 1 unit, grown tenfold until the line count is reasonable.
fn grid_step(extent: f64) -> f64 {
    let mut step = 1.0;
    while extent / step > MAX_GRID_LINES {
        step *= 10.0;
    }
    step
}

/// Number of grid intervals, counting a partial interval at the far edge.
fn grid_count(extent: f64, step: f64) -> usize {
    (extent / step).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccanvas_core::{Domain, LineCapture, LineId};

    fn viewport() -> Viewport {
        Viewport::new(Domain::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let viewport = viewport();
        let ctx = RenderContext::new(&[], &viewport);

        renderer.build_scene(&ctx);
        // Plot frame and grid at minimum
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_lines() {
        let mut renderer = VelloRenderer::new();
        let viewport = viewport();
        let domain = Domain::default();

        let mut curve = LineCapture::new(LineId::from_index(0), domain);
        curve.set_points(vec![Point::new(1.0, 1.0), Point::new(4.0, 6.0), Point::new(8.0, 2.0)]);
        let mut single = LineCapture::new(LineId::from_index(1), domain);
        single.set_points(vec![Point::new(5.0, 5.0)]);
        let captures = vec![curve, single, LineCapture::new(LineId::from_index(2), domain)];

        let mut style = CanvasStyle::default();
        style.point_shape = PointShape::Square;
        style.link_shape = LinkShape::Dashed;
        let ctx = RenderContext::new(&captures, &viewport)
            .with_style(style)
            .with_grid(GridStyle::None);
        renderer.build_scene(&ctx);

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_background_color() {
        let renderer = VelloRenderer::new();
        let viewport = viewport();
        let black = Color::from_rgba8(0, 0, 0, 255);
        let ctx = RenderContext::new(&[], &viewport).with_background(black);
        assert_eq!(renderer.background_color(&ctx).to_rgba8().a, 255);
        assert_eq!(renderer.background_color(&ctx).to_rgba8().r, 0);
    }

    #[test]
    fn test_grid_step() {
        assert!((grid_step(10.0) - 1.0).abs() < f64::EPSILON);
        assert!((grid_step(50.0) - 1.0).abs() < f64::EPSILON);
        assert!((grid_step(51.0) - 10.0).abs() < f64::EPSILON);
        assert!((grid_step(2000.0) - 100.0).abs() < f64::EPSILON);
        assert_eq!(grid_count(10.5, 1.0), 11);
        assert_eq!(grid_count(10.0, 1.0), 10);
    }
}
