use thiserror::Error;

/// Heightfield construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("container radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}

/// Ribbon history construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RibbonError {
    #[error("ribbon history needs at least one slot")]
    ZeroCapacity,
    #[error("ribbon slots need at least one sample")]
    ZeroSlotWidth,
}

/// Rejected runtime parameter updates. The previous value stays in effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Scene selection and construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Ribbon(#[from] RibbonError),
}
