#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use wavescope_core::{SceneHost, SceneKind, VisualizerSettings};
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod ui;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("wavescope-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the canvas backing store at CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let host = Rc::new(RefCell::new(SceneHost::new(VisualizerSettings::default())));
    let feed = Rc::new(RefCell::new(audio::WebAudioFeed::default()));

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        overlay::show_notice(&document, "WebGPU is not available in this browser");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        host.clone(),
        feed.clone(),
        canvas.clone(),
        gpu,
    )));
    let looper = frame::LoopHandle::new(frame_ctx);

    ui::wire_fluid_sliders(&document, &host);
    ui::wire_bar_controls(&document, &host);
    ui::wire_mode_buttons(&document, &looper);
    ui::wire_audio_source(&document, &feed);
    events::wire_pointer_orbit(&canvas, host.clone());
    events::wire_global_keydown(looper.clone());

    looper.switch_scene(SceneKind::Bars)?;
    ui::sync_controls(&document, &host.borrow());
    Ok(())
}
