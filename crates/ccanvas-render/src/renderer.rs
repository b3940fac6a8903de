//! Renderer trait abstraction.

use ccanvas_core::{CanvasStyle, LineCapture, Viewport};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plot frame only.
    None,
    /// Grid lines at unit spacing (coarser for large domains).
    #[default]
    Lines,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Lines to draw, in slot order.
    pub captures: &'a [LineCapture],
    /// Domain to window mapping.
    pub viewport: &'a Viewport,
    pub style: CanvasStyle,
    /// Window background color.
    pub background_color: Color,
    /// Fill of the data region.
    pub plot_color: Color,
    pub frame_color: Color,
    pub grid_style: GridStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(captures: &'a [LineCapture], viewport: &'a Viewport) -> Self {
        Self {
            captures,
            viewport,
            style: CanvasStyle::default(),
            background_color: Color::from_rgba8(235, 235, 235, 255),
            plot_color: Color::from_rgba8(255, 255, 255, 255),
            frame_color: Color::from_rgba8(40, 40, 40, 255),
            grid_style: GridStyle::Lines,
        }
    }

    /// Set the line style.
    pub fn with_style(mut self, style: CanvasStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
