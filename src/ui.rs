use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wavescope_core::{BarColor, ParamError, SceneHost, SceneKind};
use web_sys as web;

use crate::audio::{self, AudioSource, WebAudioFeed};
use crate::constants::*;
use crate::dom;
use crate::frame::LoopHandle;
use crate::overlay;

type Setter = fn(&mut SceneHost, f32) -> Result<(), ParamError>;

/// Sliders for the fluid parameters. Out-of-range input is logged and the
/// previous value stays in effect.
pub fn wire_fluid_sliders(document: &web::Document, host: &Rc<RefCell<SceneHost>>) {
    let sliders: [(&str, Setter); 3] = [
        (IMPULSE_SLIDER_ID, SceneHost::set_impulse_strength),
        (DAMPING_SLIDER_ID, SceneHost::set_damping),
        (EMISSIVE_SLIDER_ID, SceneHost::set_emissive_intensity),
    ];
    for (id, setter) in sliders {
        let host = host.clone();
        let doc = document.clone();
        dom::add_listener(document, id, "input", move |_: web::Event| {
            let Some(value) = dom::input_number(&doc, id) else {
                return;
            };
            if let Err(e) = setter(&mut host.borrow_mut(), value as f32) {
                log::warn!("{e}");
            }
        });
    }
}

pub fn wire_bar_controls(document: &web::Document, host: &Rc<RefCell<SceneHost>>) {
    for id in [RED_SLIDER_ID, GREEN_SLIDER_ID, BLUE_SLIDER_ID] {
        let host = host.clone();
        let doc = document.clone();
        dom::add_listener(document, id, "input", move |_: web::Event| {
            let channel = |id| dom::input_number(&doc, id).unwrap_or(0.0) as i32;
            let color = BarColor::from_sliders(
                channel(RED_SLIDER_ID),
                channel(GREEN_SLIDER_ID),
                channel(BLUE_SLIDER_ID),
            );
            host.borrow_mut().set_bar_color(color);
        });
    }

    let host = host.clone();
    dom::add_listener(document, PSYCHEDELIC_TOGGLE_ID, "input", move |ev: web::Event| {
        let checked = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            .map(|input| input.checked());
        match checked {
            Some(on) => host.borrow_mut().set_psychedelic(on),
            None => {
                host.borrow_mut().toggle_psychedelic();
            }
        }
    });
}

pub fn wire_mode_buttons(document: &web::Document, looper: &LoopHandle) {
    let buttons = [
        (BAR_MODE_BUTTON_ID, SceneKind::Bars),
        (FLUID_MODE_BUTTON_ID, SceneKind::Fluid),
        (PARTICLE_MODE_BUTTON_ID, SceneKind::Ribbons),
    ];
    for (id, kind) in buttons {
        let looper = looper.clone();
        let doc = document.clone();
        dom::add_click_listener(document, id, move || {
            if let Err(e) = looper.switch_scene(kind) {
                log::error!("scene switch failed: {e}");
                overlay::show_notice(&doc, &e.to_string());
                return;
            }
            sync_controls(&doc, &looper.host().borrow());
        });
    }
}

pub fn wire_audio_source(document: &web::Document, feed: &Rc<RefCell<WebAudioFeed>>) {
    {
        let feed = feed.clone();
        let doc = document.clone();
        dom::add_listener(document, AUDIO_SOURCE_SELECT_ID, "change", move |ev: web::Event| {
            let Some(select) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlSelectElement>().ok())
            else {
                return;
            };
            let result = select
                .value()
                .parse::<AudioSource>()
                .and_then(|source| audio::select_source(&feed, &doc, source));
            if let Err(e) = result {
                log::error!("audio source: {e:?}");
                overlay::show_notice(&doc, &e.to_string());
            }
        });
    }

    let feed = feed.clone();
    let doc = document.clone();
    dom::add_listener(document, AUDIO_FILE_INPUT_ID, "change", move |ev: web::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        if let Err(e) = audio::attach_file(&feed, &file) {
            log::error!("audio file: {e:?}");
            overlay::show_notice(&doc, &e.to_string());
        }
    });
}

pub fn set_checkbox(document: &web::Document, element_id: &str, checked: bool) {
    if let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_checked(checked);
    }
}

/// Move the controls to the values the host is actually using.
pub fn sync_controls(document: &web::Document, host: &SceneHost) {
    let settings = host.settings();
    dom::set_input_value(document, IMPULSE_SLIDER_ID, settings.fluid.impulse_strength());
    dom::set_input_value(document, DAMPING_SLIDER_ID, settings.fluid.damping());
    dom::set_input_value(document, EMISSIVE_SLIDER_ID, settings.fluid.emissive_intensity());
    let BarColor { r, g, b } = settings.bar_color;
    dom::set_input_value(document, RED_SLIDER_ID, r as f32);
    dom::set_input_value(document, GREEN_SLIDER_ID, g as f32);
    dom::set_input_value(document, BLUE_SLIDER_ID, b as f32);
    set_checkbox(document, PSYCHEDELIC_TOGGLE_ID, settings.psychedelic);
}
