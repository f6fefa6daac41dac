use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wavescope_core::{scene_for_key, SceneHost};
use web_sys as web;

use crate::dom;
use crate::frame::LoopHandle;
use crate::ui;

fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let sx = canvas.width() as f64 / rect.width().max(1.0);
    let sy = canvas.height() as f64 / rect.height().max(1.0);
    (
        ((ev.client_x() as f64 - rect.left()) * sx) as f32,
        ((ev.client_y() as f64 - rect.top()) * sy) as f32,
    )
}

fn on_canvas(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Drag on the canvas to orbit the camera.
pub fn wire_pointer_orbit(canvas: &web::HtmlCanvasElement, host: Rc<RefCell<SceneHost>>) {
    {
        let host = host.clone();
        let target = canvas.clone();
        on_canvas(canvas, "pointerdown", move |ev| {
            let (x, y) = pointer_canvas_px(&ev, &target);
            host.borrow_mut().orbit_mut().pointer_down(x, y);
            _ = target.set_pointer_capture(ev.pointer_id());
        });
    }
    {
        let host = host.clone();
        let target = canvas.clone();
        on_canvas(canvas, "pointermove", move |ev| {
            let (x, y) = pointer_canvas_px(&ev, &target);
            host.borrow_mut().orbit_mut().pointer_move(x, y);
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let host = host.clone();
        let target = canvas.clone();
        on_canvas(canvas, event, move |ev| {
            host.borrow_mut().orbit_mut().pointer_up();
            _ = target.release_pointer_capture(ev.pointer_id());
        });
    }
}

/// Digits 1-3 pick a scene; `p` toggles psychedelic bars.
pub fn wire_global_keydown(looper: LoopHandle) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        let key = ev.key();
        if let Some(kind) = scene_for_key(&key) {
            if let Err(e) = looper.switch_scene(kind) {
                log::error!("scene switch failed: {e}");
            }
            if let Some(document) = dom::window_document() {
                ui::sync_controls(&document, &looper.host().borrow());
            }
            return;
        }
        if key.eq_ignore_ascii_case("p") {
            let on = looper.host().borrow_mut().toggle_psychedelic();
            if let Some(document) = dom::window_document() {
                ui::set_checkbox(&document, crate::constants::PSYCHEDELIC_TOGGLE_ID, on);
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
