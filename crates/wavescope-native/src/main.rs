use clap::{Parser, ValueEnum};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use wavescope_core::constants::DEFAULT_RIBBON_CADENCE;
use wavescope_core::{scene_for_key, AudioFeed, BarColor, FeedKind, SceneHost, SceneKind};
use wavescope_core::{ScriptedFeed, VisualizerSettings};

mod analyser;
mod capture;
mod gpu;

const WINDOW_TITLE: &str = "wavescope";
const DEMO_FRAMES: usize = 240;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RibbonSource {
    Time,
    Frequency,
}

impl From<RibbonSource> for FeedKind {
    fn from(source: RibbonSource) -> Self {
        match source {
            RibbonSource::Time => FeedKind::Time,
            RibbonSource::Frequency => FeedKind::Frequency,
        }
    }
}

/// Audio-reactive wireframe scenes driven by the default microphone.
#[derive(Parser, Debug)]
#[command(name = "wavescope", version, about)]
struct Args {
    /// Scene to open with: bars, fluid or ribbons
    #[arg(long, value_name = "SCENE", default_value = "bars")]
    scene: SceneKind,

    /// Push a ribbon line every N frames
    #[arg(long, value_name = "FRAMES", default_value_t = DEFAULT_RIBBON_CADENCE)]
    cadence: u32,

    /// Analyser data the ribbons are drawn from
    #[arg(long, value_enum, default_value_t = RibbonSource::Time)]
    ribbon_source: RibbonSource,

    /// Impulse gain for the fluid scene (0 to 10)
    #[arg(long, value_name = "GAIN")]
    impulse_strength: Option<f32>,

    /// Fluid velocity divisor applied every frame (1 to 2)
    #[arg(long, value_name = "DIVISOR")]
    damping: Option<f32>,

    /// Fluid emissive intensity (0 to 1)
    #[arg(long, value_name = "LEVEL")]
    emissive: Option<f32>,

    /// Bar colour as six hex digits, e.g. 00ff00
    #[arg(long, value_name = "RRGGBB", value_parser = parse_bar_color)]
    bar_color: Option<BarColor>,

    #[arg(long)]
    psychedelic: bool,

    /// Replay a synthetic signal instead of opening the microphone
    #[arg(long)]
    demo: bool,
}

fn parse_bar_color(s: &str) -> Result<BarColor, String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected six hex digits, got `{s}`"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("`{s}`: {e}"))
    };
    Ok(BarColor::new(channel(0)?, channel(2)?, channel(4)?))
}

fn build_host(args: &Args) -> anyhow::Result<SceneHost> {
    let mut host = SceneHost::new(VisualizerSettings::default());
    if let Some(v) = args.impulse_strength {
        host.set_impulse_strength(v)?;
    }
    if let Some(v) = args.damping {
        host.set_damping(v)?;
    }
    if let Some(v) = args.emissive {
        host.set_emissive_intensity(v)?;
    }
    if let Some(color) = args.bar_color {
        host.set_bar_color(color);
    }
    host.set_psychedelic(args.psychedelic);
    host.set_ribbon_cadence(args.cadence);
    host.set_ribbon_source(args.ribbon_source.into());
    host.switch_to(args.scene)?;
    Ok(host)
}

enum KeyAction {
    Exit,
    Switch(SceneKind),
    TogglePsychedelic,
    None,
}

fn key_action(key: &Key) -> KeyAction {
    match key {
        Key::Named(NamedKey::Escape) => KeyAction::Exit,
        Key::Character(c) if c.eq_ignore_ascii_case("p") => KeyAction::TogglePsychedelic,
        Key::Character(c) => scene_for_key(c.as_str()).map_or(KeyAction::None, KeyAction::Switch),
        _ => KeyAction::None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut host = build_host(&args)?;
    let mut feed: Box<dyn AudioFeed> = if args.demo {
        Box::new(ScriptedFeed::demo(DEMO_FRAMES))
    } else {
        Box::new(capture::MicFeed::open_default())
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;
    let mut state = pollster::block_on(gpu::GpuState::new(&window))?;
    let (width, height) = state.size();
    host.set_viewport(width, height);

    let mut lines = Vec::new();
    let mut cursor = (0.0f32, 0.0f32);
    log::info!("{} scene ready; keys 1/2/3 switch, P toggles colours", args.scene);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                host.set_viewport(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_action(&logical_key) {
                KeyAction::Exit => elwt.exit(),
                KeyAction::Switch(kind) => match host.switch_to(kind) {
                    Ok(()) => log::info!("switched to {kind}"),
                    Err(e) => log::error!("could not open {kind}: {e}"),
                },
                KeyAction::TogglePsychedelic => {
                    let on = host.toggle_psychedelic();
                    log::info!("psychedelic colours {}", if on { "on" } else { "off" });
                }
                KeyAction::None => {}
            },
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => host.orbit_mut().pointer_down(cursor.0, cursor.1),
                ElementState::Released => host.orbit_mut().pointer_up(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                cursor = (position.x as f32, position.y as f32);
                if host.orbit_mut().is_dragging() {
                    host.orbit_mut().pointer_move(cursor.0, cursor.1);
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            if host.tick(feed.as_mut()) {
                host.build_lines(&mut lines);
            }
            match state.render(&lines, host.camera().view_proj()) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("frame skipped: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_color_accepts_hex_with_or_without_hash() {
        assert_eq!(parse_bar_color("00ff00"), Ok(BarColor::new(0, 255, 0)));
        assert_eq!(parse_bar_color("#FF8000"), Ok(BarColor::new(255, 128, 0)));
        assert!(parse_bar_color("fff").is_err());
        assert!(parse_bar_color("gg0000").is_err());
    }

    #[test]
    fn cli_settings_reach_the_host() {
        let args = Args::parse_from([
            "wavescope",
            "--scene",
            "particles",
            "--cadence",
            "3",
            "--damping",
            "1.5",
            "--psychedelic",
        ]);
        let host = build_host(&args).unwrap();
        assert_eq!(host.active_kind(), Some(SceneKind::Ribbons));
        assert_eq!(host.settings().ribbon.cadence, 3);
        assert_eq!(host.settings().fluid.damping(), 1.5);
        assert!(host.settings().psychedelic);
    }

    #[test]
    fn out_of_range_slider_values_are_rejected() {
        let args = Args::parse_from(["wavescope", "--damping", "3.0"]);
        assert!(build_host(&args).is_err());
    }

    #[test]
    fn keys_map_to_actions() {
        assert!(matches!(
            key_action(&Key::Character("2".into())),
            KeyAction::Switch(SceneKind::Fluid)
        ));
        assert!(matches!(
            key_action(&Key::Character("P".into())),
            KeyAction::TogglePsychedelic
        ));
        assert!(matches!(
            key_action(&Key::Named(NamedKey::Escape)),
            KeyAction::Exit
        ));
        assert!(matches!(
            key_action(&Key::Character("9".into())),
            KeyAction::None
        ));
    }
}
