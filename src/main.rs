mod renderer;

use crawlers::constants::{
    BASE_SEGMENT_RADIUS, FPS_UPDATE_INTERVAL_SECS, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crawlers::utils::jittered_palette;
use crawlers::{FrameContext, PointerSample, Swarm, SwarmConfig};
use glam::Vec2;
use renderer::Renderer;
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const PALETTE_JITTER: f32 = 0.06;

/// Host-side inputs the swarm reads each frame.
struct HostState {
    pointer: Option<PointerSample>,
    device_pixel_ratio: f32,
    reduced_motion: bool,
}

impl HostState {
    fn frame_context(&self, size: PhysicalSize<u32>) -> FrameContext {
        FrameContext {
            arena: Vec2::new(size.width as f32, size.height as f32),
            pointer: self.pointer,
            device_pixel_ratio: self.device_pixel_ratio,
            reduced_motion: self.reduced_motion,
        }
    }
}

fn reinitialize(swarm: &mut Swarm, size: PhysicalSize<u32>, device_pixel_ratio: f32) {
    let seed = rand::random::<u64>();
    if let Err(e) = swarm.initialize(
        size.width as f32,
        size.height as f32,
        BASE_SEGMENT_RADIUS * device_pixel_ratio,
        seed,
    ) {
        log::warn!("Swarm initialization failed: {}", e);
    }
}

fn update_title(window: &Window, swarm: &Swarm, host: &HostState, fps: f64) {
    let (organisms, segments) = swarm.counts();
    let mut flags = String::new();
    if swarm.is_paused() {
        flags.push_str(" [PAUSED]");
    }
    if host.reduced_motion {
        flags.push_str(" [REDUCED MOTION]");
    }
    window.set_title(&format!(
        "Crawlers - {} organisms, {} segments - FPS: {:.1}{}",
        organisms, segments, fps, flags
    ));
}

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Crawlers")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let mut host = HostState {
        pointer: None,
        device_pixel_ratio: window.scale_factor() as f32,
        reduced_motion: false,
    };
    let mut palette = jittered_palette(&mut rand::thread_rng(), PALETTE_JITTER);
    let mut swarm = Swarm::new(SwarmConfig::new());
    reinitialize(&mut swarm, renderer.size, host.device_pixel_ratio);

    let mut last_frame_time = Instant::now();
    let mut last_fps_update_time = Instant::now();
    let mut frames_since_last_fps_update = 0u32;

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => window.request_redraw(),
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    reinitialize(&mut swarm, renderer.size, host.device_pixel_ratio);
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    host.device_pixel_ratio = scale_factor as f32;
                    renderer.resize(window.inner_size());
                    reinitialize(&mut swarm, renderer.size, host.device_pixel_ratio);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    host.pointer = Some(PointerSample {
                        position: Vec2::new(position.x as f32, position.y as f32),
                        in_bounds: true,
                    });
                }
                WindowEvent::CursorLeft { .. } => {
                    if let Some(pointer) = host.pointer.as_mut() {
                        pointer.in_bounds = false;
                    }
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state == ElementState::Pressed && !key_event.repeat {
                        match key_event.physical_key {
                            PhysicalKey::Code(KeyCode::Space) => swarm.toggle_pause(),
                            PhysicalKey::Code(KeyCode::KeyR) => {
                                palette = jittered_palette(&mut rand::thread_rng(), PALETTE_JITTER);
                                if let Err(e) = swarm.restart(rand::random::<u64>()) {
                                    log::warn!("Restart failed: {}", e);
                                }
                            }
                            PhysicalKey::Code(KeyCode::KeyM) => {
                                host.reduced_motion = !host.reduced_motion;
                                log::info!("Reduced motion: {}", host.reduced_motion);
                            }
                            PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let delta_time = now.duration_since(last_frame_time).as_secs_f32();
                    last_frame_time = now;
                    swarm.update(delta_time, &host.frame_context(renderer.size));

                    frames_since_last_fps_update += 1;
                    let elapsed_secs = now.duration_since(last_fps_update_time).as_secs_f64();
                    if elapsed_secs >= FPS_UPDATE_INTERVAL_SECS {
                        let current_fps = frames_since_last_fps_update as f64 / elapsed_secs;
                        last_fps_update_time = now;
                        frames_since_last_fps_update = 0;
                        update_title(&window, &swarm, &host, current_fps);
                    }

                    match renderer.render(&swarm, &palette) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("WGPU Error: OutOfMemory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("WGPU Error: {:?}", e),
                    }
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
