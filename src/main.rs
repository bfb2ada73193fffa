use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    event::*,
    event_loop::EventLoop,
    window::Window,
};

use splash_bash::{
    config::AppConfig,
    controller::{FrameLoop, FramePlan},
    error::InitError,
    logging,
    model::MaterialLibrary,
    view::{BloomChain, GpuContext, SceneRenderer},
};

struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,
    bloom: BloomChain,
    frame_loop: FrameLoop,
    clear_color: wgpu::Color,
    base_title: String,
    title: String,
}

impl App {
    async fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, InitError> {
        let gpu = GpuContext::new(window.clone()).await?;
        let (width, height) = (gpu.config.width, gpu.config.height);

        let materials = MaterialLibrary::new();
        let renderer = SceneRenderer::new(&gpu.device, &gpu.queue, &materials);
        let bloom = BloomChain::new(&gpu.device, gpu.format, width, height, &config.bloom);
        let frame_loop = FrameLoop::new(config, width, height);

        let [r, g, b] = config.clear_color;
        Ok(Self {
            window,
            gpu,
            renderer,
            bloom,
            frame_loop,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            base_title: config.window.title.clone(),
            title: String::new(),
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        self.frame_loop.handle_window_event(event)
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.gpu.resize(new_size.width, new_size.height);
        self.bloom.resize(&self.gpu.device, new_size.width, new_size.height);
        self.frame_loop.resize(new_size.width, new_size.height);
    }

    fn update(&mut self) -> FramePlan {
        let plan = self.frame_loop.step();

        let title = self.frame_loop.title(&self.base_title);
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
        plan
    }

    fn render(&mut self, plan: &FramePlan) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.write_frame(&self.gpu.queue, &plan.frame);
        self.bloom.prepare(&self.gpu.device, &self.gpu.queue, &plan.bloom);

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        self.renderer.render(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            self.bloom.scene_view(),
            self.bloom.depth_view(),
            &plan.draw_list,
            self.clear_color,
        );
        let stages = plan.bloom.plan(plan.post_processing);
        self.bloom.encode(&self.gpu.device, &mut encoder, &stages, &view);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn run(config: AppConfig) -> Result<bool, InitError> {
    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = pollster::block_on(App::new(window, &config))?;
    tracing::info!("entering main loop");

    let out_of_memory = Rc::new(Cell::new(false));
    let oom = out_of_memory.clone();

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let plan = app.update();
                            match app.render(&plan) {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    tracing::warn!("surface lost or outdated, reconfiguring");
                                    app.gpu.reconfigure();
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    tracing::error!("GPU out of memory");
                                    oom.set(true);
                                    elwt.exit();
                                }
                                Err(e) => tracing::warn!("frame skipped: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(!out_of_memory.get())
}

fn main() -> ExitCode {
    logging::init();

    match run(AppConfig::default()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("initialization failed: {e}");
            ExitCode::from(1)
        }
    }
}
