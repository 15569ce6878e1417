use thiserror::Error;

/// Top-level error type for the Spu workspace.
///
/// Subsystem crates define their own error enums for their own failure modes
/// and convert from `SpuError` where they touch configuration or knowledge
/// loading, so `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpuError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("API error: {0}")]
    Api(String),
}

impl From<toml::de::Error> for SpuError {
    fn from(err: toml::de::Error) -> Self {
        SpuError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SpuError {
    fn from(err: toml::ser::Error) -> Self {
        SpuError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SpuError {
    fn from(err: serde_json::Error) -> Self {
        SpuError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Spu operations.
pub type Result<T> = std::result::Result<T, SpuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpuError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = SpuError::Knowledge("no services".to_string());
        assert_eq!(err.to_string(), "Knowledge base error: no services");

        let err = SpuError::Api("Failed to bind".to_string());
        assert_eq!(err.to_string(), "API error: Failed to bind");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let spu_err: SpuError = io_err.into();
        assert!(matches!(spu_err, SpuError::Io(_)));
        assert!(spu_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let spu_err: SpuError = parse_err.into();
        assert!(matches!(spu_err, SpuError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let spu_err: SpuError = parse_err.into();
        assert!(matches!(spu_err, SpuError::Serialization(_)));
        assert!(spu_err.to_string().starts_with("Serialization error:"));
    }
}
