//! Core application state and lifecycle.

use ccanvas_core::{
    CanvasSession, CanvasStyle, ConfigError, Key, LoadError, Response, SessionEvent, StorageError,
    Viewport,
};
use ccanvas_render::{GridStyle, RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Size};
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowId};

/// Application errors. Each one ends the process with a failure status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Failed to save coordinates: {0}")]
    Storage(#[from] StorageError),
    #[error("Window error: {0}")]
    Window(String),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Window size before maximizing, in logical pixels.
    pub width: u32,
    pub height: u32,
    pub grid_style: GridStyle,
    pub background_color: Color,
    pub style: CanvasStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "ccanvas".to_string(),
            width: 1280,
            height: 800,
            grid_style: GridStyle::Lines,
            background_color: Color::from_rgba8(235, 235, 235, 255),
            style: CanvasStyle::default(),
        }
    }
}

/// Runtime state that exists while the window is open.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    viewport: Viewport,
    /// Last cursor position in physical pixels; `None` once it leaves the window.
    cursor: Option<Point>,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    session: CanvasSession,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    error: Option<AppError>,
}

impl App {
    /// Create an application around a ready session.
    pub fn new(session: CanvasSession, config: AppConfig) -> Self {
        Self {
            config,
            session,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the event loop until the session closes.
    pub async fn run(session: CanvasSession, config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(session, config);
        event_loop.run_app(&mut app)?;

        if let Some(err) = app.error.take() {
            return Err(err);
        }
        // The platform may end the loop without a close request.
        if !app.session.is_closed() {
            app.session.close()?;
        }
        Ok(())
    }

    fn title(&self) -> String {
        let instructions: Vec<_> = self.session.instructions().lines().map(str::to_string).collect();
        format!(
            "{} - {} ({})",
            self.config.title,
            self.session.prompt(),
            instructions.join("; ")
        )
    }

    /// Create the renderer for a new surface.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) -> Result<(), AppError> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("RenderContext not initialized".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface format may differ.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let viewport = Viewport::new(
            *self.session.domain(),
            Size::new(surface.config.width as f64, surface.config.height as f64),
        );

        log::info!("ccanvas initialized - {}x{}", surface.config.width, surface.config.height);

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(),
            texture_blitter,
            viewport,
            cursor: None,
        });

        // Seeded lines are already computed; draw them once.
        window.request_redraw();
        Ok(())
    }

    /// Abort the event loop with an error.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.error = Some(err);
        self.state = None;
        event_loop.exit();
    }

    /// Feed an event to the session and act on its response.
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: SessionEvent) {
        match self.session.handle_event(event) {
            Ok(Response::Ignored) => {}
            Ok(Response::Redraw) => {
                let title = self.title();
                if let Some(state) = &self.state {
                    state.window.set_title(&title);
                    state.window.request_redraw();
                }
            }
            Ok(Response::Closed) => {
                // Dropping the state releases the surface and the window.
                self.state = None;
                event_loop.exit();
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn render(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        let Some(render_cx) = self.render_cx.as_ref() else {
            return;
        };

        let ctx = RenderContext::new(self.session.captures(), &state.viewport)
            .with_style(self.config.style.clone())
            .with_background(self.config.background_color)
            .with_grid(self.config.grid_style);
        state.scene_renderer.build_scene(&ctx);
        let base_color = state.scene_renderer.background_color(&ctx);
        let scene = state.scene_renderer.take_scene();

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = state.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        state
            .texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.session.is_closed() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_maximized(true);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, AppError::Window(e.to_string()));
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                self.fail(event_loop, RendererError::Surface(e.to_string()).into());
                return;
            }
        };

        if let Err(e) = self.finish_init(window, surface) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.state.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(event_loop, SessionEvent::CloseRequested);
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                let Some(state) = &mut self.state else {
                    return;
                };
                state
                    .viewport
                    .resize(Size::new(size.width as f64, size.height as f64));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                        self.render();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let Some(state) = &mut self.state else {
                    return;
                };
                let screen = Point::new(position.x, position.y);
                state.cursor = Some(screen);
                let position = state.viewport.screen_to_data(screen);
                self.dispatch(event_loop, SessionEvent::PointerMove { position });
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(state) = &mut self.state {
                    state.cursor = None;
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                let position = self.state.as_ref().and_then(|state| {
                    state
                        .cursor
                        .and_then(|screen| state.viewport.screen_to_data(screen))
                });
                self.dispatch(event_loop, SessionEvent::PointerDown { position });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = translate_key(&event);
                let event = match event.state {
                    ElementState::Pressed => SessionEvent::KeyPressed(key),
                    ElementState::Released => SessionEvent::KeyReleased(key),
                };
                self.dispatch(event_loop, event);
            }

            _ => {}
        }
    }
}

/// Map a winit key event to a session key.
fn translate_key(event: &KeyEvent) -> Key {
    match &event.logical_key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(text) => Key::Character(text.to_string()),
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccanvas_core::CanvasConfig;

    fn app(line_count: usize) -> App {
        let config = CanvasConfig {
            line_count,
            ..CanvasConfig::default()
        };
        let session = CanvasSession::new(&config).unwrap();
        App::new(session, AppConfig::default())
    }

    #[test]
    fn test_title_shows_prompt_and_bindings() {
        let app = app(3);
        assert_eq!(
            app.title(),
            "ccanvas - Click to add points for line number 1... \
             (Press keys 1 to 3 to switch lines; Close the window, press ESC or Q to save and exit)"
        );
    }

    #[test]
    fn test_new_app_has_no_window() {
        let app = app(1);
        assert!(app.state.is_none());
        assert!(app.error.is_none());
        assert!(!app.session.is_closed());
    }
}
