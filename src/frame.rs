use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wavescope_core::{LineVertex, SceneError, SceneHost, SceneKind};
use web_sys as web;

use crate::audio::WebAudioFeed;
use crate::render;

pub struct FrameContext {
    pub host: Rc<RefCell<SceneHost>>,
    pub feed: Rc<RefCell<WebAudioFeed>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    lines: Vec<LineVertex>,
    frames: u64,
    last_report: Instant,
}

impl FrameContext {
    pub fn new(
        host: Rc<RefCell<SceneHost>>,
        feed: Rc<RefCell<WebAudioFeed>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'static>>,
    ) -> Self {
        Self {
            host,
            feed,
            canvas,
            gpu,
            lines: Vec::new(),
            frames: 0,
            last_report: Instant::now(),
        }
    }

    /// One animation frame: sample audio, advance the live scene, draw it.
    pub fn frame(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        let view_proj = {
            let mut host = self.host.borrow_mut();
            host.set_viewport(width, height);
            if !host.tick(&mut *self.feed.borrow_mut()) {
                return;
            }
            host.build_lines(&mut self.lines);
            host.camera().view_proj()
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            if let Err(e) = g.render(&self.lines, view_proj) {
                log::error!("render error: {:?}", e);
            }
        }

        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 5.0 {
            log::debug!(
                "{:.1} fps, {} line vertices",
                self.frames as f32 / elapsed,
                self.lines.len()
            );
            self.frames = 0;
            self.last_report = Instant::now();
        }
    }
}

/// Owns the `requestAnimationFrame` loop so it can be paused around scene
/// switches.
#[derive(Clone)]
pub struct LoopHandle {
    frame_ctx: Rc<RefCell<FrameContext>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn new(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        let frame_ctx_tick = frame_ctx.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            frame_ctx_tick.borrow_mut().frame();
            schedule(&tick_clone, &pending_tick);
        }) as Box<dyn FnMut()>));

        Self {
            frame_ctx,
            pending,
            tick,
        }
    }

    pub fn start(&self) {
        if self.pending.get().is_none() {
            schedule(&self.tick, &self.pending);
        }
    }

    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }

    /// Stop the loop, replace the scene, then resume.
    pub fn switch_scene(&self, kind: SceneKind) -> Result<(), SceneError> {
        self.cancel();
        let result = {
            let ctx = self.frame_ctx.borrow();
            let mut host = ctx.host.borrow_mut();
            host.switch_to(kind)
        };
        self.start();
        if result.is_ok() {
            log::info!("switched to {kind}");
        }
        result
    }

    pub fn host(&self) -> Rc<RefCell<SceneHost>> {
        self.frame_ctx.borrow().host.clone()
    }
}

fn schedule(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}
