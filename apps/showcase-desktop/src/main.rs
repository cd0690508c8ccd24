use anyhow::Result;
use clap::Parser;
use showcase_input::{InputEvent, ListenerRegistry};
use showcase_render_wgpu::WgpuEngine;
use showcase_runtime::{
    FrameOutcome, FrameQueue, FrameScheduler, LoopHandle, MountState, Showcase, ShowcaseConfig,
};
use showcase_scene::Layout;
use showcase_tools::SceneInspector;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "showcase-desktop", about = "Interactive 3D tile showcase")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout preset, overriding the config file
    #[arg(short, long)]
    layout: Option<Layout>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Frame requests become window redraws; the handle is dispatched from
/// `RedrawRequested`.
#[derive(Default)]
struct RedrawScheduler {
    queue: FrameQueue,
    window: Option<Arc<Window>>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> LoopHandle {
        let handle = self.queue.request_frame();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: LoopHandle) {
        self.queue.cancel_frame(handle);
    }
}

struct ShowcaseApp {
    config: Option<ShowcaseConfig>,
    initial_size: LogicalSize<u32>,
    showcase: Option<Showcase<WgpuEngine>>,
    listeners: ListenerRegistry,
    scheduler: RedrawScheduler,
    window: Option<Arc<Window>>,
}

impl ShowcaseApp {
    fn new(config: ShowcaseConfig, width: u32, height: u32) -> Self {
        Self {
            config: Some(config),
            initial_size: LogicalSize::new(width, height),
            showcase: None,
            listeners: ListenerRegistry::new(),
            scheduler: RedrawScheduler::default(),
            window: None,
        }
    }

    fn logical_size(window: &Window, size: PhysicalSize<u32>) -> (u32, u32) {
        let logical: LogicalSize<f64> = size.to_logical(window.scale_factor());
        (logical.width.round() as u32, logical.height.round() as u32)
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(self.initial_size);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        let engine = match WgpuEngine::new(window.clone(), &config.title, &config.subtitle) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize renderer");
                event_loop.exit();
                return;
            }
        };

        self.scheduler.window = Some(window.clone());
        self.window = Some(window.clone());

        let mut showcase = Showcase::new(config, engine, window.scale_factor());
        let (width, height) = Self::logical_size(&window, window.inner_size());
        if let Err(e) = showcase.on_mount(&mut self.listeners, &mut self.scheduler, width, height) {
            tracing::error!(error = %e, "mount failed");
            showcase.on_unmount(&mut self.listeners, &mut self.scheduler);
            event_loop.exit();
        }
        self.showcase = Some(showcase);
    }

    fn unmount(&mut self) {
        if let Some(showcase) = &mut self.showcase {
            if showcase.mount_state() == MountState::Mounted {
                showcase.on_unmount(&mut self.listeners, &mut self.scheduler);
            }
        }
    }

    /// Forward a notification if the showcase is listening for it.
    fn dispatch(&mut self, event: InputEvent) {
        if !self.listeners.accepts(&event) {
            return;
        }
        if let Some(showcase) = &mut self.showcase {
            if let Err(e) = showcase.handle_event(event) {
                tracing::warn!(error = %e, ?event, "event rejected");
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(showcase) = &mut self.showcase else {
            return;
        };
        // One frame per redraw; the frame itself requests the next one.
        let Some(handle) = self.scheduler.queue.take_due() else {
            return;
        };
        if let FrameOutcome::Failed(e) = showcase.on_frame(handle, &mut self.scheduler) {
            tracing::error!(error = %e, "render loop stopped");
            self.unmount();
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ShowcaseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        self.mount(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::Escape => {
                    self.unmount();
                    event_loop.exit();
                }
                KeyCode::KeyI => {
                    if let Some(showcase) = &self.showcase {
                        tracing::info!("{}", SceneInspector::summary(showcase));
                    }
                }
                _ => {}
            },
            WindowEvent::Resized(size) => {
                let (width, height) = Self::logical_size(&window, size);
                self.dispatch(InputEvent::ViewportResized { width, height });
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(showcase) = &mut self.showcase {
                    if let Err(e) = showcase.set_pixel_density(scale_factor) {
                        tracing::warn!(error = %e, scale_factor, "pixel density change rejected");
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                self.dispatch(InputEvent::PointerMoved {
                    x: logical.x,
                    y: logical.y,
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("showcase-desktop starting");

    let config = ShowcaseConfig::resolve(cli.config.as_deref(), cli.layout)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ShowcaseApp::new(config, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
