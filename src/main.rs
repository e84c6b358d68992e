mod wayland;

use anyhow::{anyhow, Result};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;
use log::{info, warn};
use moving_blocks::app::App;
use moving_blocks::config::{Anchor, Config};
use moving_blocks::features::blocks::STEP_INTERVAL;
use moving_blocks::gfx::{draw::DrawContext, gl::load_blocks_program};
use std::io::ErrorKind;
use std::time::Duration;
use wayland::egl::EglContext;
use wayland::WaylandState;
use wayland_client::backend::WaylandError;
use wayland_client::{Connection, EventQueue, Proxy};
use wayland_protocols_wlr::layer_shell::v1::client::{
    zwlr_layer_shell_v1, zwlr_layer_surface_v1,
};

/// Upper bound on how long input can wait while the widget is idle.
const INPUT_POLL: Duration = Duration::from_millis(10);

struct Host {
    state: WaylandState,
    app: App,
    egl: EglContext,
    draw: DrawContext,
    surface_size: [u32; 2],
}

impl Host {
    fn frame(&mut self) {
        if !self.app.redraw_pending() {
            return;
        }
        if let Err(e) = self.present() {
            warn!("Skipping frame: {:#}", e);
            self.app.request_redraw();
        }
    }

    fn present(&mut self) -> Result<()> {
        let size = self.app.logical_size;
        if size != self.surface_size {
            self.egl.resize(size[0] as i32, size[1] as i32);
            self.surface_size = size;
        }

        self.egl.make_current()?;
        self.draw.begin(size.map(|x| x as f32));
        self.app.render(&mut self.draw);
        self.draw.flush();
        self.egl.swap_buffers()
    }

    fn drain_events(&mut self) {
        for ev in self.state.pending_events.drain(..) {
            self.app.handle_event(ev);
        }
    }
}

fn layer_anchor(anchor: Anchor) -> zwlr_layer_surface_v1::Anchor {
    use zwlr_layer_surface_v1::Anchor as Edge;
    match anchor {
        Anchor::TopLeft => Edge::Top | Edge::Left,
        Anchor::TopRight => Edge::Top | Edge::Right,
        Anchor::BottomLeft => Edge::Bottom | Edge::Left,
        Anchor::BottomRight => Edge::Bottom | Edge::Right,
    }
}

/// Pulls whatever is waiting on the socket into the queue without blocking.
fn read_events(event_queue: &EventQueue<WaylandState>) -> Result<()> {
    event_queue.flush()?;
    if let Some(guard) = event_queue.prepare_read() {
        match guard.read() {
            Ok(_) => {}
            Err(WaylandError::Io(e)) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting moving-blocks...");

    let mut app = App::new(Config::load());

    let conn = Connection::connect_to_env()?;
    let display = conn.display();
    let mut event_queue = conn.new_event_queue();
    let qh = event_queue.handle();
    let _registry = display.get_registry(&qh, ());

    let mut state = WaylandState::new();
    event_queue.roundtrip(&mut state)?;

    let compositor = state
        .compositor
        .clone()
        .ok_or_else(|| anyhow!("Compositor does not advertise wl_compositor"))?;
    let layer_shell = state
        .layer_shell
        .clone()
        .ok_or_else(|| anyhow!("Compositor does not support zwlr_layer_shell_v1"))?;

    let surface = compositor.create_surface(&qh, ());
    let layer_surface = layer_shell.get_layer_surface(
        &surface,
        None,
        zwlr_layer_shell_v1::Layer::Top,
        "moving-blocks".to_string(),
        &qh,
        (),
    );
    let config = &app.config;
    let margins = &config.margins;
    layer_surface.set_anchor(layer_anchor(config.anchor));
    layer_surface.set_exclusive_zone(config.exclusive_zone);
    layer_surface.set_margin(margins.top, margins.right, margins.bottom, margins.left);
    layer_surface.set_size(config.size.width, config.size.height);
    surface.commit();

    state.surface = Some(surface.clone());
    state.layer_surface = Some(layer_surface);

    while !state.configured {
        event_queue.blocking_dispatch(&mut state)?;
    }
    for ev in state.pending_events.drain(..) {
        app.handle_event(ev);
    }

    let display_ptr = display.id().as_ptr() as *mut _;
    let mut egl = EglContext::new(display_ptr)?;
    let size = app.logical_size;
    egl.create_surface(&surface, size[0] as i32, size[1] as i32)?;

    let gl = unsafe { glow::Context::from_loader_function(|s| egl.get_proc_address(s)) };
    let program = load_blocks_program(&gl)?;
    let draw = DrawContext::new(gl, program)?;

    let mut host = Host {
        state,
        app,
        egl,
        draw,
        surface_size: size,
    };

    let mut event_loop: EventLoop<Host> = EventLoop::try_new()?;
    event_loop
        .handle()
        .insert_source(Timer::from_duration(STEP_INTERVAL), |_, _, host| {
            host.frame();
            TimeoutAction::ToDuration(STEP_INTERVAL)
        })
        .map_err(|e| anyhow!("Failed to arm frame timer: {}", e.error))?;

    info!("Surface ready at {}x{}, tap to animate", size[0], size[1]);
    while host.state.running {
        read_events(&event_queue)?;
        event_queue.dispatch_pending(&mut host.state)?;
        host.drain_events();
        event_loop.dispatch(Some(INPUT_POLL), &mut host)?;
    }

    info!("Layer surface closed after {} frames", host.app.frames());
    Ok(())
}
