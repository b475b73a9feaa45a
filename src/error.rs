use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadAlongError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ReadAlongError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = ReadAlongError::io(
            "read transcript",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error while read transcript: missing");
    }

    #[test]
    fn invalid_config_message() {
        let err = ReadAlongError::invalid_config("comma unit must be finite");
        assert_eq!(
            err.to_string(),
            "invalid configuration: comma unit must be finite"
        );
    }
}
