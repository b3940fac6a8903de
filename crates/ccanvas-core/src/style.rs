//! Typed styling for captured lines.

use peniko::Color;

/// Marker shape drawn at each captured point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointShape {
    #[default]
    Circle,
    Square,
}

/// Stroke pattern for the interpolated curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkShape {
    #[default]
    Solid,
    Dashed,
}

/// A named palette slot with its link color and the darker marker variant.
#[derive(Debug, Clone, Copy)]
pub struct LineColor {
    pub name: &'static str,
    pub link: Color,
    pub marker: Color,
}

impl LineColor {
    const fn new(name: &'static str, link: [u8; 3], marker: [u8; 3]) -> Self {
        Self {
            name,
            link: Color::from_rgba8(link[0], link[1], link[2], 255),
            marker: Color::from_rgba8(marker[0], marker[1], marker[2], 255),
        }
    }
}

/// One slot per selectable line, cycled by line index.
pub const PALETTE: [LineColor; 9] = [
    LineColor::new("red", [255, 0, 0], [139, 0, 0]),
    LineColor::new("green", [0, 128, 0], [0, 100, 0]),
    LineColor::new("salmon", [250, 128, 114], [233, 150, 122]),
    LineColor::new("blue", [0, 0, 255], [0, 0, 139]),
    LineColor::new("orange", [255, 165, 0], [255, 140, 0]),
    LineColor::new("violet", [238, 130, 238], [148, 0, 211]),
    LineColor::new("goldenrod", [218, 165, 32], [184, 134, 11]),
    LineColor::new("gray", [128, 128, 128], [169, 169, 169]),
    LineColor::new("cyan", [0, 255, 255], [0, 139, 139]),
];

/// Point and link styling shared by every line, plus the color palette.
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    pub point_shape: PointShape,
    /// Marker diameter in screen pixels.
    pub point_size: f64,
    pub point_alpha: f64,
    pub link_shape: LinkShape,
    /// Curve stroke width in screen pixels.
    pub link_size: f64,
    pub link_alpha: f64,
    pub palette: [LineColor; 9],
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            point_shape: PointShape::Circle,
            point_size: 5.0,
            point_alpha: 1.0,
            link_shape: LinkShape::Solid,
            link_size: 1.0,
            link_alpha: 0.5,
            palette: PALETTE,
        }
    }
}

impl CanvasStyle {
    /// Palette slot for a 0-based line index.
    pub fn line_color(&self, index: usize) -> &LineColor {
        &self.palette[index % self.palette.len()]
    }

    /// Link color for a line with link alpha applied.
    pub fn link_color(&self, index: usize) -> Color {
        with_alpha(self.line_color(index).link, self.link_alpha)
    }

    /// Marker color for a line with point alpha applied.
    pub fn marker_color(&self, index: usize) -> Color {
        with_alpha(self.line_color(index).marker, self.point_alpha)
    }
}

fn with_alpha(color: Color, alpha: f64) -> Color {
    let rgba = color.to_rgba8();
    let alpha = (rgba.a as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
}
