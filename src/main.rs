use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use antagonist_sprite::{init_logging, Demo, DemoConfig};

/// Spawns antagonist sprites from a config file and draws them.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file describing the window and the antagonists to spawn
    #[arg(short, long, default_value = "antagonists.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = DemoConfig::load_or_default(&args.config)?;
    let (width, height) = (config.window.width, config.window.height);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.window.title.as_str())
        .with_inner_size(LogicalSize::new(width as f64, height as f64))
        .with_resizable(false)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels = Pixels::new(width, height, surface_texture)?;

    let mut demo = Demo::from_config(&config);
    log::info!("Scene ready with {} antagonists", demo.scene().len());

    let mut cursor = PhysicalPosition::new(0.0f64, 0.0f64);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                } => {
                    let pressed = state == ElementState::Pressed;
                    if pressed && keycode == VirtualKeyCode::Escape {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    demo.on_key(keycode, pressed);
                }
                WindowEvent::CursorMoved { position, .. } => cursor = position,
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Ok((col, row)) =
                        pixels.window_pos_to_pixel((cursor.x as f32, cursor.y as f32))
                    {
                        // Pixel rows run downwards, scene y runs upwards.
                        let point = Vec2::new(col as f32 + 0.5, height as f32 - row as f32 - 0.5);
                        demo.on_click(point);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                demo.update(dt);

                if let Err(e) = demo.render(pixels.frame_mut()) {
                    log::error!("{e}");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if let Err(e) = pixels.render() {
                    log::error!("Render failed: {e}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
