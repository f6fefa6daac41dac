// DOM element ids and browser-only settings for the web front-end.

pub const CANVAS_ID: &str = "app-canvas";
pub const SETTINGS_ID: &str = "settings";
pub const NOTICE_ID: &str = "notice";

// Audio source picker
pub const AUDIO_SOURCE_SELECT_ID: &str = "audio-source-select";
pub const AUDIO_FILE_INPUT_ID: &str = "audio-source-file";
pub const AUDIO_FILE_SPACER_IDS: [&str; 2] = ["abr1", "abr2"];

// Fluid sliders
pub const IMPULSE_SLIDER_ID: &str = "impulseStrength";
pub const DAMPING_SLIDER_ID: &str = "damping";
pub const EMISSIVE_SLIDER_ID: &str = "emissiveIntensity";

// Bar colour controls
pub const RED_SLIDER_ID: &str = "red";
pub const GREEN_SLIDER_ID: &str = "green";
pub const BLUE_SLIDER_ID: &str = "blue";
pub const PSYCHEDELIC_TOGGLE_ID: &str = "psychedelic";

// Scene buttons
pub const BAR_MODE_BUTTON_ID: &str = "barMode";
pub const FLUID_MODE_BUTTON_ID: &str = "fluidMode";
pub const PARTICLE_MODE_BUTTON_ID: &str = "particleMode";

// Demo track for the "stream" source; needs CORS so the analyser can read it.
pub const DEMO_STREAM_URL: &str =
    "https://s3-us-west-2.amazonaws.com/s.cdpn.io/858/outfoxing.mp3";

pub use wavescope_core::pipeline::DEPTH_FORMAT;
