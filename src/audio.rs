use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use wavescope_core::constants::{
    ANALYSER_MAX_DB, ANALYSER_MIN_DB, ANALYSER_SMOOTHING, FFT_SIZE, FREQUENCY_BIN_COUNT,
};
use wavescope_core::AudioFeed;
use web_sys as web;

use crate::constants::*;
use crate::{dom, overlay};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioSource {
    None,
    Mic,
    File,
    Stream,
}

impl FromStr for AudioSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(AudioSource::None),
            "mic" => Ok(AudioSource::Mic),
            "file" => Ok(AudioSource::File),
            "temp" | "stream" => Ok(AudioSource::Stream),
            other => Err(anyhow::anyhow!("unknown audio source `{other}`")),
        }
    }
}

struct Analysis {
    analyser: web::AnalyserNode,
    freq: Vec<u8>,
    time: Vec<u8>,
}

/// Analyser-backed feed. Absent until a source has been connected.
#[derive(Default)]
pub struct WebAudioFeed {
    context: Option<web::AudioContext>,
    element: Option<web::HtmlAudioElement>,
    object_url: Option<String>,
    analysis: Option<Analysis>,
    // Bumped on every source change so late async results are discarded.
    generation: u64,
}

impl AudioFeed for WebAudioFeed {
    fn frequency_bins(&mut self) -> Option<&[u8]> {
        let a = self.analysis.as_mut()?;
        a.analyser.get_byte_frequency_data(&mut a.freq);
        Some(&a.freq)
    }

    fn time_samples(&mut self) -> Option<&[u8]> {
        let a = self.analysis.as_mut()?;
        a.analyser.get_byte_time_domain_data(&mut a.time);
        Some(&a.time)
    }
}

impl WebAudioFeed {
    fn teardown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.analysis = None;
        if let Some(el) = self.element.take() {
            _ = el.pause();
            el.remove();
        }
        if let Some(url) = self.object_url.take() {
            _ = web::Url::revoke_object_url(&url);
        }
        if let Some(ctx) = self.context.take() {
            _ = ctx.close();
        }
    }

    /// Route `source` through a fresh analyser. Speakers are only connected
    /// for playback sources; the microphone is analysed silently.
    fn attach(&mut self, source: &web::AudioNode, playback: bool) -> anyhow::Result<()> {
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no audio context"))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| anyhow::anyhow!("create_analyser: {e:?}"))?;
        analyser.set_fft_size(FFT_SIZE as u32);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING as f64);
        analyser.set_min_decibels(ANALYSER_MIN_DB as f64);
        analyser.set_max_decibels(ANALYSER_MAX_DB as f64);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| anyhow::anyhow!("connect source: {e:?}"))?;
        if playback {
            analyser
                .connect_with_audio_node(&ctx.destination())
                .map_err(|e| anyhow::anyhow!("connect destination: {e:?}"))?;
        }
        self.analysis = Some(Analysis {
            analyser,
            freq: vec![0; FREQUENCY_BIN_COUNT],
            time: vec![0; FFT_SIZE],
        });
        log::info!("analyser connected (playback: {playback})");
        Ok(())
    }

    fn attach_element(&mut self, el: &web::HtmlAudioElement) -> anyhow::Result<()> {
        let ctx = self
            .context
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no audio context"))?;
        let node = ctx
            .create_media_element_source(el)
            .map_err(|e| anyhow::anyhow!("create_media_element_source: {e:?}"))?;
        self.attach(&node, true)
    }
}

fn player_element(document: &web::Document) -> anyhow::Result<web::HtmlAudioElement> {
    let el = web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!("<audio>: {e:?}"))?;
    el.set_controls(true);
    el.set_autoplay(true);
    if let Some(settings) = document.get_element_by_id(SETTINGS_ID) {
        _ = settings.append_child(&el);
    }
    Ok(el)
}

fn show_file_picker(document: &web::Document, visible: bool) {
    dom::set_hidden(document, AUDIO_FILE_INPUT_ID, !visible);
    for id in AUDIO_FILE_SPACER_IDS {
        dom::set_hidden(document, id, !visible);
    }
}

/// Drop the current source and start `source` in its place.
pub fn select_source(
    feed: &Rc<RefCell<WebAudioFeed>>,
    document: &web::Document,
    source: AudioSource,
) -> anyhow::Result<()> {
    feed.borrow_mut().teardown();
    show_file_picker(document, false);
    overlay::hide_notice(document);
    if source == AudioSource::None {
        return Ok(());
    }

    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {e:?}"))?;
    feed.borrow_mut().context = Some(ctx.clone());

    match source {
        AudioSource::None => {}
        AudioSource::Mic => {
            let generation = feed.borrow().generation;
            let feed = feed.clone();
            let document = document.clone();
            spawn_local(async move {
                match open_microphone(&ctx).await {
                    Ok(node) => {
                        let mut f = feed.borrow_mut();
                        if f.generation != generation {
                            return;
                        }
                        if let Err(e) = f.attach(&node, false) {
                            log::error!("microphone analyser: {e:?}");
                        }
                    }
                    Err(e) => {
                        log::error!("error getting microphone input: {e:?}");
                        overlay::show_notice(&document, "Error getting microphone input");
                    }
                }
            });
        }
        AudioSource::File => {
            show_file_picker(document, true);
            feed.borrow_mut().element = Some(player_element(document)?);
        }
        AudioSource::Stream => {
            let el = player_element(document)?;
            el.set_cross_origin(Some("anonymous"));
            el.set_src(DEMO_STREAM_URL);
            let mut f = feed.borrow_mut();
            f.element = Some(el.clone());
            f.attach_element(&el)?;
        }
    }
    log::info!("audio source: {source:?}");
    Ok(())
}

async fn open_microphone(ctx: &web::AudioContext) -> anyhow::Result<web::AudioNode> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("media devices: {e:?}"))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia: {e:?}"))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("getUserMedia rejected: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a MediaStream: {e:?}"))?;
    let node = ctx
        .create_media_stream_source(&stream)
        .map_err(|e| anyhow::anyhow!("create_media_stream_source: {e:?}"))?;
    Ok(node.into())
}

/// Play a user-picked file through the pending `<audio>` element.
pub fn attach_file(feed: &Rc<RefCell<WebAudioFeed>>, file: &web::File) -> anyhow::Result<()> {
    let mut f = feed.borrow_mut();
    let el = f
        .element
        .clone()
        .ok_or_else(|| anyhow::anyhow!("select the file source first"))?;
    if let Some(url) = f.object_url.take() {
        _ = web::Url::revoke_object_url(&url);
    }
    let url = web::Url::create_object_url_with_blob(file)
        .map_err(|e| anyhow::anyhow!("object url: {e:?}"))?;
    el.set_src(&url);
    f.object_url = Some(url);
    // A media element can feed only one source node; keep the first one.
    if f.analysis.is_none() {
        f.attach_element(&el)?;
    }
    _ = el.play();
    log::info!("playing file `{}`", file.name());
    Ok(())
}
