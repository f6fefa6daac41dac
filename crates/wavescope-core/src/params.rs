//! Runtime parameters updated by the UI between ticks.
//!
//! Simulations receive these by reference on every tick instead of caching
//! the values, so a slider move is picked up on the very next frame.

use crate::constants::*;
use crate::error::ParamError;

/// Which analyser feed a scene samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedKind {
    Frequency,
    #[default]
    Time,
}

/// Fluid sliders. Values only change through the range-checked setters.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidParams {
    impulse_strength: f32,
    damping: f32,
    emissive_intensity: f32,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            impulse_strength: DEFAULT_IMPULSE_STRENGTH,
            damping: DEFAULT_DAMPING,
            emissive_intensity: DEFAULT_EMISSIVE_INTENSITY,
        }
    }
}

impl FluidParams {
    pub fn new(
        impulse_strength: f32,
        damping: f32,
        emissive_intensity: f32,
    ) -> Result<Self, ParamError> {
        let mut params = Self::default();
        params.set_impulse_strength(impulse_strength)?;
        params.set_damping(damping)?;
        params.set_emissive_intensity(emissive_intensity)?;
        Ok(params)
    }

    /// Multiplier applied to normalized bin magnitudes before injection.
    pub fn impulse_strength(&self) -> f32 {
        self.impulse_strength
    }

    /// Velocity divisor applied each step; 1.0 means no decay.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Passed straight through to the renderer.
    pub fn emissive_intensity(&self) -> f32 {
        self.emissive_intensity
    }

    pub fn set_impulse_strength(&mut self, value: f32) -> Result<(), ParamError> {
        self.impulse_strength = checked("impulse_strength", value, IMPULSE_STRENGTH_RANGE)?;
        Ok(())
    }

    pub fn set_damping(&mut self, value: f32) -> Result<(), ParamError> {
        self.damping = checked("damping", value, DAMPING_RANGE)?;
        Ok(())
    }

    pub fn set_emissive_intensity(&mut self, value: f32) -> Result<(), ParamError> {
        self.emissive_intensity = checked("emissive_intensity", value, EMISSIVE_INTENSITY_RANGE)?;
        Ok(())
    }
}

fn checked(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<f32, ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name, value });
    }
    if value < min || value > max {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

#[derive(Clone, Debug, PartialEq)]
pub struct RibbonParams {
    /// Push a snapshot every `cadence` ticks; 0 and 1 both mean every tick.
    pub cadence: u32,
    pub source: FeedKind,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            cadence: DEFAULT_RIBBON_CADENCE,
            source: FeedKind::Time,
        }
    }
}

/// Slider-driven bar colour, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for BarColor {
    fn default() -> Self {
        let [r, g, b] = DEFAULT_BAR_COLOR;
        Self { r, g, b }
    }
}

impl BarColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from slider values, clamping each channel into 0..=255.
    pub fn from_sliders(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b))
    }

    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / BYTE_MAX,
            self.g as f32 / BYTE_MAX,
            self.b as f32 / BYTE_MAX,
        ]
    }
}

/// Everything the UI can change. Outlives individual scenes so a re-created
/// scene starts from the last values the user picked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualizerSettings {
    pub fluid: FluidParams,
    pub ribbon: RibbonParams,
    pub bar_color: BarColor,
    pub psychedelic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_accept_in_range_values() {
        let mut p = FluidParams::default();
        p.set_impulse_strength(2.5).unwrap();
        p.set_damping(1.05).unwrap();
        p.set_emissive_intensity(0.8).unwrap();
        assert_eq!(p.impulse_strength(), 2.5);
        assert_eq!(p.damping(), 1.05);
        assert_eq!(p.emissive_intensity(), 0.8);
    }

    #[test]
    fn rejected_values_keep_previous_setting() {
        let mut p = FluidParams::default();
        assert!(matches!(
            p.set_damping(0.5),
            Err(ParamError::OutOfRange { name: "damping", .. })
        ));
        assert_eq!(p.damping(), DEFAULT_DAMPING);
        assert!(matches!(
            p.set_impulse_strength(f32::NAN),
            Err(ParamError::NotFinite { .. })
        ));
        assert_eq!(p.impulse_strength(), DEFAULT_IMPULSE_STRENGTH);
    }

    #[test]
    fn constructor_validates_every_value() {
        let p = FluidParams::new(2.0, 1.5, 0.4).unwrap();
        assert_eq!(p.damping(), 1.5);
        assert!(matches!(
            FluidParams::new(1.0, 0.0, 0.3),
            Err(ParamError::OutOfRange { name: "damping", .. })
        ));
        assert!(FluidParams::new(11.0, 1.0, 0.3).is_err());
        assert!(FluidParams::new(1.0, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn damping_of_exactly_one_is_allowed() {
        let mut p = FluidParams::default();
        assert!(p.set_damping(1.0).is_ok());
    }

    #[test]
    fn bar_color_from_sliders_clamps() {
        let c = BarColor::from_sliders(-4, 128, 300);
        assert_eq!(c, BarColor::new(0, 128, 255));
        let rgb = c.to_rgb_f32();
        assert_eq!(rgb[0], 0.0);
        assert_eq!(rgb[2], 1.0);
    }
}
