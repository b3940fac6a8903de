//! ccanvas Render Library
//!
//! Renderer abstraction for the capture surface. The default implementation
//! builds Vello scenes.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{GridStyle, RenderContext, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
