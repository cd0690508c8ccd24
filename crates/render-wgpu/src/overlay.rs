use crate::frame::project_to_screen;
use egui::{Align2, Color32, FontId, Id, LayerId, Order};
use showcase_common::Color;
use showcase_render::CameraState;
use showcase_scene::SceneGraph;
use winit::window::Window;

/// egui pass drawn on top of the tiles: one label per tile plus the title.
pub(crate) struct LabelOverlay {
    ctx: egui::Context,
    winit: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    title: String,
    subtitle: String,
}

impl LabelOverlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        title: String,
        subtitle: String,
    ) -> Self {
        let ctx = egui::Context::default();
        let winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        Self {
            ctx,
            winit,
            renderer,
            title,
            subtitle,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        scene: &SceneGraph,
        camera: &CameraState,
    ) {
        let raw_input = self.winit.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            draw_labels(ctx, scene, camera);
            draw_title(ctx, &self.title, &self.subtitle);
        });
        self.winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("overlay_encoder"),
        });
        self.renderer
            .update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn color32(color: Color) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(color.r), channel(color.g), channel(color.b))
}

fn draw_labels(ctx: &egui::Context, scene: &SceneGraph, camera: &CameraState) {
    let screen = ctx.screen_rect();
    let view_proj = camera.view_projection();
    let painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("tile_labels")));
    for tile in scene.tiles() {
        let anchor = scene.label_anchor(tile);
        let Some([x, y]) = project_to_screen(view_proj, anchor, [screen.width(), screen.height()])
        else {
            continue;
        };
        let pos = screen.min + egui::vec2(x, y);
        painter.text(
            pos + egui::vec2(1.0, 1.0),
            Align2::CENTER_BOTTOM,
            tile.label(),
            FontId::proportional(16.0),
            Color32::from_black_alpha(160),
        );
        painter.text(
            pos,
            Align2::CENTER_BOTTOM,
            tile.label(),
            FontId::proportional(16.0),
            color32(tile.color()),
        );
    }
}

fn draw_title(ctx: &egui::Context, title: &str, subtitle: &str) {
    egui::Area::new(Id::new("showcase_title"))
        .anchor(Align2::LEFT_TOP, [16.0, 16.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.heading(egui::RichText::new(title).color(Color32::WHITE).strong());
            ui.label(egui::RichText::new(subtitle).color(Color32::WHITE));
        });
}
