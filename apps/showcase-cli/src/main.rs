use anyhow::Context;
use clap::{Parser, Subcommand};
use showcase_input::{InputEvent, ListenerRegistry};
use showcase_render::DebugTextEngine;
use showcase_runtime::{FrameOutcome, FrameQueue, Showcase, ShowcaseConfig};
use showcase_scene::{Layout, SceneGraph};
use showcase_tools::SceneInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase-cli", about = "Headless tool for the tile showcase")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Mount the showcase headlessly and run a number of frames
    Simulate {
        /// Number of frames to dispatch
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Viewport width in logical pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Viewport height in logical pixels
        #[arg(long, default_value = "600")]
        height: u32,
        /// Pointer x position in logical pixels (defaults to the center)
        #[arg(long)]
        pointer_x: Option<f32>,
        /// Pointer y position in logical pixels (defaults to the center)
        #[arg(long)]
        pointer_y: Option<f32>,
        /// Config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Layout preset, overriding the config file
        #[arg(short, long)]
        layout: Option<Layout>,
        /// Simulate losing the surface on this frame
        #[arg(long)]
        lose_surface_at: Option<u64>,
    },
    /// Check that a config file builds a valid scene
    Validate {
        /// Config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("showcase-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", showcase_common::crate_info());
            println!("scene: {}", showcase_scene::crate_info());
            println!("input: {}", showcase_input::crate_info());
            println!("render: {}", showcase_render::crate_info());
            println!("runtime: {}", showcase_runtime::crate_info());
            println!("tools: {}", showcase_tools::crate_info());
            let layouts: Vec<&str> = Layout::ALL.iter().map(|l| l.name()).collect();
            println!("layouts: {}", layouts.join(", "));
        }
        Commands::Simulate {
            frames,
            width,
            height,
            pointer_x,
            pointer_y,
            config,
            layout,
            lose_surface_at,
        } => {
            let config = ShowcaseConfig::resolve(config.as_deref(), layout)
                .context("loading configuration")?;
            let mut engine = DebugTextEngine::new();
            if let Some(frame) = lose_surface_at {
                engine = engine.with_surface_loss_at(frame);
            }

            let mut listeners = ListenerRegistry::new();
            let mut queue = FrameQueue::new();
            let mut showcase = Showcase::new(config, engine, 1.0);

            if let Err(e) = showcase.on_mount(&mut listeners, &mut queue, width, height) {
                showcase.on_unmount(&mut listeners, &mut queue);
                return Err(e).context("mounting showcase");
            }

            if pointer_x.is_some() || pointer_y.is_some() {
                let event = InputEvent::PointerMoved {
                    x: pointer_x.unwrap_or(width as f32 / 2.0),
                    y: pointer_y.unwrap_or(height as f32 / 2.0),
                };
                if listeners.accepts(&event) {
                    showcase.handle_event(event)?;
                }
            }

            println!("Simulating {frames} frames at {width}x{height}");
            let mut dispatched = 0;
            while dispatched < frames {
                let Some(handle) = queue.take_due() else {
                    break;
                };
                dispatched += 1;
                if let FrameOutcome::Failed(e) = showcase.on_frame(handle, &mut queue) {
                    println!("Frame {dispatched} failed: {e}");
                    break;
                }
            }

            println!("{}", SceneInspector::summary(&showcase));
            if let Some(frame) = showcase.engine().last_frame() {
                println!("{frame}");
            }
            showcase.on_unmount(&mut listeners, &mut queue);
        }
        Commands::Validate { config } => {
            let loaded = ShowcaseConfig::load(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            let scene = SceneGraph::build(&loaded.scene_spec())
                .with_context(|| format!("building scene from {}", config.display()))?;
            println!(
                "{}: OK ({} layout, {} tiles, {} lights)",
                config.display(),
                loaded.layout,
                scene.tile_count(),
                scene.lights().len()
            );
            for tile in SceneInspector::list_tiles(&scene) {
                println!("  {tile}");
            }
        }
    }

    Ok(())
}
