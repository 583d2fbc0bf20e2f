use std::sync::Arc;
use std::time::Instant;
use std::{thread, time::Duration};

use app_api::UiApp;
use egui::{Context as EguiContext, viewport::ViewportId};
use egui_wgpu::{Renderer as EguiWgpuRenderer, ScreenDescriptor, wgpu};
use egui_winit::State as EguiWinitState;
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

enum UserEvent {
    Tick,
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),
}

/// Open the window and drive `app` until it closes.
pub fn run(app: Box<dyn UiApp>, title: &str) -> Result<(), PlatformError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut host = PlatformApp {
        app,
        title: title.to_string(),
        window: None,
        proxy: Some(proxy),
        ticker_started: false,
        egui: None,
        gpu: None,
    };
    event_loop.run_app(&mut host)?;
    Ok(())
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: EguiWgpuRenderer,
}

struct PlatformApp {
    app: Box<dyn UiApp>,
    title: String,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    egui: Option<(EguiContext, EguiWinitState)>,
    gpu: Option<Gpu>,
}

impl PlatformApp {
    fn init_gpu(window: &Arc<Window>) -> Result<Gpu, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(Arc::clone(window))
            .map_err(|e| format!("surface: {e}"))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .map_err(|e| format!("no suitable adapter: {e}"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::default(),
        }))
        .map_err(|e| format!("device: {e}"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);
        Ok(Gpu {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn logical_width(window: &Window) -> f32 {
        window.inner_size().to_logical::<f32>(window.scale_factor()).width
    }

    fn redraw(&mut self) {
        let (Some(window), Some((ctx, state)), Some(gpu)) =
            (self.window.as_ref(), self.egui.as_mut(), self.gpu.as_mut())
        else {
            return;
        };

        // 1) Acquire frame
        let frame = match gpu.surface.get_current_texture() {
            Ok(x) => x,
            Err(wgpu::SurfaceError::Lost) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(wgpu::SurfaceError::Outdated) => return, // minimized / moved
            Err(e) => {
                log::warn!("surface error: {e:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // 2) Build UI
        let raw_input = state.take_egui_input(window);
        ctx.begin_pass(raw_input);
        self.app.ui(ctx, Instant::now());
        let full_output = ctx.end_pass();
        state.handle_platform_output(window, full_output.platform_output);

        // 3) Tessellate and upload
        let clipped = ctx.tessellate(full_output.shapes, ctx.pixels_per_point());
        for (id, delta) in &full_output.textures_delta.set {
            gpu.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let screen = ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: ctx.pixels_per_point(),
        };
        gpu.renderer
            .update_buffers(&gpu.device, &gpu.queue, &mut encoder, &clipped, &screen);

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            gpu.renderer
                .render(&mut rpass.forget_lifetime(), &clipped, &screen);
        }

        for id in full_output.textures_delta.free {
            gpu.renderer.free_texture(&id);
        }

        // 4) Submit & present
        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match event_loop.create_window(Window::default_attributes().with_title(&self.title)) {
                Ok(w) => self.window = Some(Arc::new(w)),
                Err(e) => {
                    log::error!("could not create window: {e}");
                    event_loop.exit();
                    return;
                }
            }
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        if !self.ticker_started {
            self.ticker_started = true;

            if let Some(proxy) = self.proxy.clone() {
                thread::spawn(move || {
                    let frame = Duration::from_millis(16); // ~60Hz
                    loop {
                        if proxy.send_event(UserEvent::Tick).is_err() {
                            break;
                        }
                        thread::sleep(frame);
                    }
                });
            }
        }

        if self.egui.is_none() {
            let ctx = EguiContext::default();
            let state = EguiWinitState::new(
                ctx.clone(),
                ViewportId::ROOT,
                &*window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            self.egui = Some((ctx, state));
        }

        if self.gpu.is_none() {
            match Self::init_gpu(&window) {
                Ok(gpu) => self.gpu = Some(gpu),
                Err(e) => {
                    log::error!("graphics init failed: {e}");
                    event_loop.exit();
                    return;
                }
            }
        }

        self.app.on_resize(Self::logical_width(&window));
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some((_, state))) = (self.window.as_ref(), self.egui.as_mut()) {
            let _response = state.on_window_event(window, &event);
        }
        match event {
            WindowEvent::CloseRequested => {
                self.app.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                }
                if let Some(window) = self.window.as_ref() {
                    self.app.on_resize(Self::logical_width(window));
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
