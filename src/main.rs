//! Escape Ring entry point
//!
//! Builds the scene, then hands it to a winit event loop that runs one
//! `FrameLoop` tick per frame deadline.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use escape_ring::physics::RapierWorld;
use escape_ring::renderer::RenderState;
use escape_ring::sim::{FrameLoop, LoopState, Simulation};
use escape_ring::{Settings, SimError};

struct App {
    sim: Simulation<RapierWorld>,
    frame_loop: FrameLoop,
    renderer: Option<RenderState>,
    stop_requested: bool,
    failure: Option<SimError>,
}

impl App {
    fn new(sim: Simulation<RapierWorld>) -> Self {
        let frame_loop = FrameLoop::new(sim.settings().target_fps, Instant::now());
        Self {
            sim,
            frame_loop,
            renderer: None,
            stop_requested: false,
            failure: None,
        }
    }

    fn fail(&mut self, el: &ActiveEventLoop, err: SimError) {
        self.failure = Some(err);
        el.exit();
    }

    fn run_tick(&mut self, el: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match self
            .frame_loop
            .tick(&mut self.sim, renderer, self.stop_requested, Instant::now())
        {
            Ok(LoopState::Running) => {}
            Ok(LoopState::Stopped) => el.exit(),
            Err(e) => self.fail(el, e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let settings = self.sim.settings();
        let scene_size = (settings.width, settings.height);
        let attrs = Window::default_attributes()
            .with_title("Escape Ring")
            .with_inner_size(LogicalSize::new(settings.width, settings.height));
        let window = match el.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(el, SimError::EventLoop(format!("window creation: {e}")));
                return;
            }
        };

        match pollster::block_on(RenderState::new(window, scene_size)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => self.fail(el, e.into()),
        }
    }

    fn window_event(&mut self, el: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.stop_requested = true;
                self.run_tick(el);
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, el: &ActiveEventLoop) {
        if Instant::now() >= self.frame_loop.next_deadline() {
            self.run_tick(el);
        }
        el.set_control_flow(ControlFlow::WaitUntil(self.frame_loop.next_deadline()));
    }
}

fn run() -> Result<(), SimError> {
    let settings = Settings::default();
    if let Ok(json) = serde_json::to_string(&settings) {
        log::debug!("Settings: {json}");
    }

    // Bad ring parameters fail here, before any window exists
    let world = RapierWorld::with_gravity(settings.gravity);
    let sim = Simulation::build(world, settings)?;

    let event_loop = EventLoop::new().map_err(|e| SimError::EventLoop(e.to_string()))?;
    let mut app = App::new(sim);
    event_loop
        .run_app(&mut app)
        .map_err(|e| SimError::EventLoop(e.to_string()))?;

    log::info!(
        "Stopped after {} ticks at {:.1} fps",
        app.frame_loop.ticks(),
        app.frame_loop.fps()
    );
    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Escape Ring starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
