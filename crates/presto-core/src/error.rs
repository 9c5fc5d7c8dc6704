/// Core error types for the Presto engine.
use std::path::PathBuf;

/// A specialized Result type for Presto operations.
pub type PrestoResult<T> = Result<T, PrestoError>;

/// Top-level error type shared by every Presto crate.
///
/// Live presentation paths (transition compositing, animator ticks) never
/// surface these; they log and degrade instead. Errors are reserved for
/// setup work such as loading configuration or decoding input images.
#[derive(Debug, thiserror::Error)]
pub enum PrestoError {
    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("image error: {message} ({path:?})")]
    Image { message: String, path: PathBuf },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrestoError {
    /// Create an image error tied to a file path.
    pub fn image(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        PrestoError::Image {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl From<toml::de::Error> for PrestoError {
    fn from(err: toml::de::Error) -> Self {
        PrestoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PrestoError {
    fn from(err: toml::ser::Error) -> Self {
        PrestoError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_error_display() {
        let err = PrestoError::image("unsupported format", "/slides/intro.bmp");
        let text = err.to_string();
        assert!(text.starts_with("image error: unsupported format"));
        assert!(text.contains("intro.bmp"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PrestoError = io.into();
        assert!(matches!(err, PrestoError::Io(_)));
        assert_eq!(err.to_string(), "IO error: missing");
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let err: PrestoError = toml::from_str::<toml::Table>("= nope").unwrap_err().into();
        assert!(matches!(err, PrestoError::Config(_)));
    }
}
