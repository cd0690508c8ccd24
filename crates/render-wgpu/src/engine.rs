use crate::gpu::TilePipeline;
use crate::overlay::LabelOverlay;
use showcase_render::{CameraState, FrameStatus, RenderEngine, SurfaceError, physical_size};
use showcase_scene::SceneGraph;
use std::sync::Arc;
use winit::window::Window;

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tiles: TilePipeline,
    overlay: LabelOverlay,
}

/// [`RenderEngine`] drawing into a winit window with wgpu.
///
/// GPU resources live until [`RenderEngine::release`]; afterwards every call
/// fails with [`SurfaceError::Released`].
pub struct WgpuEngine {
    window: Arc<Window>,
    gpu: Option<GpuState>,
}

impl WgpuEngine {
    /// Acquire a surface, adapter and device for `window`.
    pub fn new(window: Arc<Window>, title: &str, subtitle: &str) -> Result<Self, SurfaceError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| SurfaceError::Acquire(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| SurfaceError::Acquire("no compatible GPU adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("showcase_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| SurfaceError::Acquire(e.to_string()))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| SurfaceError::Acquire("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let tiles = TilePipeline::new(&device, surface_format, config.width, config.height);
        let overlay = LabelOverlay::new(
            &window,
            &device,
            surface_format,
            title.to_string(),
            subtitle.to_string(),
        );

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            format = ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            window,
            gpu: Some(GpuState {
                surface,
                device,
                queue,
                config,
                tiles,
                overlay,
            }),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl RenderEngine for WgpuEngine {
    fn submit_frame(
        &mut self,
        scene: &SceneGraph,
        camera: &CameraState,
    ) -> Result<FrameStatus, SurfaceError> {
        let gpu = self.gpu.as_mut().ok_or(SurfaceError::Released)?;

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface outdated, reconfiguring and skipping frame");
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(FrameStatus::Dropped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("timed out acquiring surface texture, skipping frame");
                return Ok(FrameStatus::Dropped);
            }
            Err(wgpu::SurfaceError::Lost) => return Err(SurfaceError::Lost),
            Err(e) => return Err(SurfaceError::Acquire(e.to_string())),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.tiles
            .render(&gpu.device, &gpu.queue, &view, scene, camera);
        gpu.overlay.paint(
            &self.window,
            &gpu.device,
            &gpu.queue,
            &view,
            [gpu.config.width, gpu.config.height],
            scene,
            camera,
        );

        output.present();
        Ok(FrameStatus::Presented)
    }

    fn resize_surface(
        &mut self,
        width: u32,
        height: u32,
        pixel_density: f64,
    ) -> Result<(), SurfaceError> {
        let gpu = self.gpu.as_mut().ok_or(SurfaceError::Released)?;
        let (physical_width, physical_height) = physical_size(width, height, pixel_density);

        let limit = gpu.device.limits().max_texture_dimension_2d;
        if physical_width > limit || physical_height > limit {
            return Err(SurfaceError::Resize {
                width,
                height,
                reason: format!("exceeds max texture dimension {limit}"),
            });
        }

        gpu.config.width = physical_width;
        gpu.config.height = physical_height;
        gpu.surface.configure(&gpu.device, &gpu.config);
        gpu.tiles
            .resize(&gpu.device, physical_width, physical_height);
        tracing::debug!(physical_width, physical_height, "surface configured");
        Ok(())
    }

    fn release(&mut self) {
        if self.gpu.take().is_some() {
            tracing::info!("GPU resources released");
        }
    }
}
