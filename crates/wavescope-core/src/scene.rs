//! The three visualizer scenes and the host that owns whichever is live.
//!
//! Each scene owns all of its mutable state. Switching scenes destroys the
//! old one outright, so a new scene always starts from a clean slate apart
//! from the user settings kept in [`VisualizerSettings`].

use std::fmt;
use std::str::FromStr;

use crate::bars::BarRing;
use crate::camera::{Camera, OrbitControls};
use crate::constants::*;
use crate::error::{ParamError, SceneError};
use crate::feed::AudioFeed;
use crate::geometry::{self, LineVertex, RibbonLayout};
use crate::heightfield::Heightfield;
use crate::params::{BarColor, FeedKind, FluidParams, VisualizerSettings};
use crate::ribbon::{Cadence, RibbonHistory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Bars,
    Fluid,
    Ribbons,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::Bars, SceneKind::Fluid, SceneKind::Ribbons];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Bars => "bars",
            SceneKind::Fluid => "fluid",
            SceneKind::Ribbons => "ribbons",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bars" => Ok(SceneKind::Bars),
            "fluid" => Ok(SceneKind::Fluid),
            "particles" | "ribbons" => Ok(SceneKind::Ribbons),
            _ => Err(SceneError::UnknownScene(s.to_string())),
        }
    }
}

/// Keyboard digit shortcuts: 1 bars, 2 fluid, 3 ribbons.
pub fn scene_for_key(key: &str) -> Option<SceneKind> {
    match key {
        "1" => Some(SceneKind::Bars),
        "2" => Some(SceneKind::Fluid),
        "3" => Some(SceneKind::Ribbons),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct BarsScene {
    pub ring: BarRing,
}

impl BarsScene {
    pub fn new(settings: &VisualizerSettings) -> Self {
        let mut ring = BarRing::default();
        ring.set_color(settings.bar_color);
        ring.set_psychedelic(settings.psychedelic);
        Self { ring }
    }

    pub fn tick(&mut self, feed: &mut dyn AudioFeed) {
        if let Some(bins) = feed.frequency_bins() {
            self.ring.apply_frequencies(bins);
        }
        self.ring.advance_time();
    }

    pub fn build_lines(&self, out: &mut Vec<LineVertex>) {
        geometry::bar_edges(out, &self.ring);
    }
}

#[derive(Clone, Debug)]
pub struct FluidScene {
    pub field: Heightfield,
    params: FluidParams,
    wire_stride: usize,
}

impl FluidScene {
    pub fn new(settings: &VisualizerSettings) -> Result<Self, SceneError> {
        Ok(Self {
            field: Heightfield::new(FLUID_GRID_SIZE, FLUID_CONTAINER_RADIUS)?,
            params: settings.fluid.clone(),
            wire_stride: FLUID_WIRE_STRIDE,
        })
    }

    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    /// Inject this frame's spectrum (if any), then always advance the waves.
    pub fn tick(&mut self, feed: &mut dyn AudioFeed) {
        if let Some(bins) = feed.frequency_bins() {
            self.field.inject_impulses(bins, &self.params);
        }
        self.field.step(&self.params);
    }

    pub fn build_lines(&self, out: &mut Vec<LineVertex>) {
        geometry::heightfield_wireframe(
            out,
            &self.field,
            self.wire_stride,
            self.params.emissive_intensity(),
        );
    }
}

#[derive(Clone, Debug)]
pub struct RibbonScene {
    pub history: RibbonHistory,
    pub layout: RibbonLayout,
    cadence: Cadence,
    source: FeedKind,
}

impl RibbonScene {
    pub fn new(settings: &VisualizerSettings) -> Result<Self, SceneError> {
        Ok(Self {
            history: RibbonHistory::new(RIBBON_LINE_COUNT, RIBBON_SLOT_WIDTH)?,
            layout: RibbonLayout::default(),
            cadence: Cadence::new(settings.ribbon.cadence),
            source: settings.ribbon.source,
        })
    }

    pub fn cadence(&self) -> u32 {
        self.cadence.divisor()
    }

    /// Count the tick; on due ticks push a snapshot when audio is present.
    /// Without audio the lines freeze in place.
    pub fn tick(&mut self, feed: &mut dyn AudioFeed) {
        if !self.cadence.advance() {
            return;
        }
        if let Some(frame) = feed.frame(self.source) {
            self.history.push_snapshot(frame);
        }
    }

    pub fn build_lines(&self, out: &mut Vec<LineVertex>) {
        geometry::ribbon_lines(out, &self.history, &self.layout, RIBBON_COLOR);
    }
}

#[derive(Clone, Debug)]
pub enum Scene {
    Bars(BarsScene),
    Fluid(FluidScene),
    Ribbons(RibbonScene),
}

impl Scene {
    pub fn create(kind: SceneKind, settings: &VisualizerSettings) -> Result<Self, SceneError> {
        Ok(match kind {
            SceneKind::Bars => Scene::Bars(BarsScene::new(settings)),
            SceneKind::Fluid => Scene::Fluid(FluidScene::new(settings)?),
            SceneKind::Ribbons => Scene::Ribbons(RibbonScene::new(settings)?),
        })
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Bars(_) => SceneKind::Bars,
            Scene::Fluid(_) => SceneKind::Fluid,
            Scene::Ribbons(_) => SceneKind::Ribbons,
        }
    }

    pub fn tick(&mut self, feed: &mut dyn AudioFeed) {
        match self {
            Scene::Bars(s) => s.tick(feed),
            Scene::Fluid(s) => s.tick(feed),
            Scene::Ribbons(s) => s.tick(feed),
        }
    }

    /// Append this frame's line-list vertices to `out`.
    pub fn build_lines(&self, out: &mut Vec<LineVertex>) {
        match self {
            Scene::Bars(s) => s.build_lines(out),
            Scene::Fluid(s) => s.build_lines(out),
            Scene::Ribbons(s) => s.build_lines(out),
        }
    }

    /// Push the current UI settings into the scene's own copies.
    pub fn apply_settings(&mut self, settings: &VisualizerSettings) {
        match self {
            Scene::Bars(s) => {
                s.ring.set_color(settings.bar_color);
                s.ring.set_psychedelic(settings.psychedelic);
            }
            Scene::Fluid(s) => s.params = settings.fluid.clone(),
            Scene::Ribbons(s) => {
                s.cadence.set_divisor(settings.ribbon.cadence);
                s.source = settings.ribbon.source;
            }
        }
    }
}

/// Owns the settings, the live scene (if any) and its camera.
#[derive(Debug)]
pub struct SceneHost {
    settings: VisualizerSettings,
    scene: Option<Scene>,
    camera: Camera,
    orbit: OrbitControls,
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new(VisualizerSettings::default())
    }
}

impl SceneHost {
    pub fn new(settings: VisualizerSettings) -> Self {
        Self {
            settings,
            scene: None,
            camera: Camera::for_scene(SceneKind::Bars),
            orbit: OrbitControls::default(),
        }
    }

    pub fn settings(&self) -> &VisualizerSettings {
        &self.settings
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn active_kind(&self) -> Option<SceneKind> {
        self.scene.as_ref().map(Scene::kind)
    }

    /// Build `kind` and make it live, replacing any current scene.
    pub fn create(&mut self, kind: SceneKind) -> Result<(), SceneError> {
        if self.scene.is_some() {
            self.destroy();
        }
        let scene = Scene::create(kind, &self.settings)?;
        let aspect = self.camera.aspect;
        self.camera = Camera::for_scene(kind);
        self.camera.aspect = aspect;
        self.orbit.stop();
        self.scene = Some(scene);
        log::debug!("scene `{kind}` created");
        Ok(())
    }

    /// Drop the live scene and everything it owns. Returns what was live.
    pub fn destroy(&mut self) -> Option<SceneKind> {
        let kind = self.scene.take().map(|s| s.kind());
        if let Some(kind) = kind {
            log::debug!("scene `{kind}` destroyed");
        }
        kind
    }

    pub fn switch_to(&mut self, kind: SceneKind) -> Result<(), SceneError> {
        self.destroy();
        self.create(kind)
    }

    /// Advance the live scene by one frame. Returns false, doing nothing,
    /// when no scene is live.
    pub fn tick(&mut self, feed: &mut dyn AudioFeed) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        scene.tick(feed);
        self.orbit.update(&mut self.camera);
        true
    }

    /// Clears `out` and fills it with the live scene's lines.
    pub fn build_lines(&self, out: &mut Vec<LineVertex>) {
        out.clear();
        if let Some(scene) = &self.scene {
            scene.build_lines(out);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    pub fn set_impulse_strength(&mut self, value: f32) -> Result<(), ParamError> {
        self.settings.fluid.set_impulse_strength(value)?;
        self.sync();
        Ok(())
    }

    pub fn set_damping(&mut self, value: f32) -> Result<(), ParamError> {
        self.settings.fluid.set_damping(value)?;
        self.sync();
        Ok(())
    }

    pub fn set_emissive_intensity(&mut self, value: f32) -> Result<(), ParamError> {
        self.settings.fluid.set_emissive_intensity(value)?;
        self.sync();
        Ok(())
    }

    pub fn set_bar_color(&mut self, color: BarColor) {
        self.settings.bar_color = color;
        self.sync();
    }

    pub fn set_psychedelic(&mut self, on: bool) {
        self.settings.psychedelic = on;
        self.sync();
    }

    pub fn toggle_psychedelic(&mut self) -> bool {
        self.set_psychedelic(!self.settings.psychedelic);
        self.settings.psychedelic
    }

    pub fn set_ribbon_cadence(&mut self, cadence: u32) {
        self.settings.ribbon.cadence = cadence;
        self.sync();
    }

    pub fn set_ribbon_source(&mut self, source: FeedKind) {
        self.settings.ribbon.source = source;
        self.sync();
    }

    fn sync(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.apply_settings(&self.settings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_names() {
        assert_eq!("bars".parse::<SceneKind>().unwrap(), SceneKind::Bars);
        assert_eq!(" Fluid ".parse::<SceneKind>().unwrap(), SceneKind::Fluid);
        assert_eq!("particles".parse::<SceneKind>().unwrap(), SceneKind::Ribbons);
        assert_eq!("ribbons".parse::<SceneKind>().unwrap(), SceneKind::Ribbons);
        assert_eq!(
            "lava".parse::<SceneKind>().unwrap_err(),
            SceneError::UnknownScene("lava".into())
        );
    }

    #[test]
    fn digit_keys_pick_scenes() {
        assert_eq!(scene_for_key("1"), Some(SceneKind::Bars));
        assert_eq!(scene_for_key("2"), Some(SceneKind::Fluid));
        assert_eq!(scene_for_key("3"), Some(SceneKind::Ribbons));
        assert_eq!(scene_for_key("4"), None);
    }

    #[test]
    fn names_round_trip_through_display() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.to_string().parse::<SceneKind>().unwrap(), kind);
        }
    }
}
