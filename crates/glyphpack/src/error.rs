use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid font spec: {0}")]
    InvalidFontSpec(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("advance width of {ch:?} is not an integer ({raw})")]
    MeasurementImprecision { ch: char, raw: f32 },
    #[error("font load error: {0}")]
    FontLoad(String),
    #[error("character {0:?} is outside the 8-bit table range")]
    UnsupportedChar(char),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
