// Shared visual/audio tuning constants used by both web and native frontends.

// Analyser (mirrors the WebAudio AnalyserNode configuration)
pub const FFT_SIZE: usize = 64; // must be a power of two
pub const FREQUENCY_BIN_COUNT: usize = FFT_SIZE / 2;
pub const ANALYSER_SMOOTHING: f32 = 0.9;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Byte-range audio samples rest at this value when silent
pub const REFERENCE_MIDPOINT: f32 = 127.0;
pub const BYTE_MAX: f32 = 255.0;

// Fluid heightfield
pub const FLUID_GRID_SIZE: usize = 128; // points along one axis
pub const FLUID_CONTAINER_RADIUS: f32 = 35.0; // world units
pub const WAVE_PROPAGATION: f32 = 0.1; // laplacian gain per tick
pub const IMPULSE_RING_FRACTION: f32 = 0.5; // impulses land on a ring at R * fraction
pub const FLUID_WIRE_STRIDE: usize = 2; // draw every Nth grid line

pub const DEFAULT_IMPULSE_STRENGTH: f32 = 1.2;
pub const DEFAULT_DAMPING: f32 = 1.001;
pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 0.3;

// Bounds enforced by parameter setters
pub const IMPULSE_STRENGTH_RANGE: (f32, f32) = (0.0, 10.0);
pub const DAMPING_RANGE: (f32, f32) = (1.0, 2.0);
pub const EMISSIVE_INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);

pub const FLUID_BASE_COLOR: [f32; 3] = [0.118, 0.565, 1.0]; // 0x1e90ff
pub const FLUID_EMISSIVE_COLOR: [f32; 3] = [0.0, 0.2, 0.4]; // 0x003366

// Ribbons (scrolling oscilloscope lines)
pub const RIBBON_LINE_COUNT: usize = 10;
pub const RIBBON_SLOT_WIDTH: usize = FFT_SIZE;
pub const RIBBON_LEFT_END: f32 = -2.5;
pub const RIBBON_RIGHT_END: f32 = 2.5;
pub const RIBBON_FIRST_LINE_Z: f32 = -1.0;
pub const RIBBON_LINE_SEPARATION: f32 = 0.1;
pub const RIBBON_HEIGHT_SCALE: f32 = 2.0;
pub const RIBBON_LIFT_GROWTH: f32 = 0.2; // older lines float upward exponentially
pub const RIBBON_LIFT_BASE: f32 = 0.1;
pub const RIBBON_UPSAMPLE: usize = 4;
pub const DEFAULT_RIBBON_CADENCE: u32 = 2;
pub const RIBBON_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Circular bars
pub const BAR_COUNT: usize = 32;
pub const BAR_WIDTH: f32 = 1.5;
pub const BAR_HEIGHT: f32 = 15.0;
pub const BAR_DEPTH: f32 = 1.5;
pub const BAR_SPACING: f32 = 0.5;
pub const DEFAULT_BAR_COLOR: [u8; 3] = [0, 255, 0];
pub const PSYCHEDELIC_TIME_STEP: f32 = 0.05;

// Cameras
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const BARS_CAMERA_EYE: [f32; 3] = [0.0, 35.0, 0.0];
pub const FLUID_CAMERA_EYE: [f32; 3] = [0.0, 50.0, 50.0];
pub const RIBBON_CAMERA_EYE: [f32; 3] = [0.0, 0.0, -2.0];
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per dragged pixel

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.067, 0.067, 0.067]; // 0x111111
