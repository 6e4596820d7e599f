use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to load {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("External optimizer error: {0}")]
    ExternalTool(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CardPackError>;
