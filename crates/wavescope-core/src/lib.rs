pub mod bars;
pub mod camera;
pub mod centering;
pub mod constants;
pub mod curve;
pub mod error;
pub mod feed;
pub mod geometry;
pub mod heightfield;
pub mod params;
#[cfg(feature = "gpu")]
pub mod pipeline;
pub mod ribbon;
pub mod scene;

pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use bars::{BarPlacement, BarRing};
pub use camera::{Camera, OrbitControls};
pub use centering::{average, center_offset, recenter_into};
pub use error::{GridError, ParamError, RibbonError, SceneError};
pub use feed::{AudioFeed, ScriptedFeed, SilentFeed};
pub use geometry::{LineVertex, RibbonLayout};
pub use heightfield::Heightfield;
pub use params::{BarColor, FeedKind, FluidParams, RibbonParams, VisualizerSettings};
pub use ribbon::{Cadence, RibbonHistory};
pub use scene::{scene_for_key, Scene, SceneHost, SceneKind};
