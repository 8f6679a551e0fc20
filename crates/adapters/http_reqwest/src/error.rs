//! Transport-specific error type wrapping reqwest errors.

use batlog_app::ports::TransportError;

/// Errors originating from the reqwest transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The base URL or an endpoint path could not be parsed.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        Self(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_url() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = HttpError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid url not a url:"));
    }

    #[test]
    fn should_carry_message_into_transport_error() {
        let source = url::Url::parse("::").unwrap_err();
        let err = HttpError::InvalidUrl {
            url: "::".to_string(),
            source,
        };
        let expected = err.to_string();
        let transport: TransportError = err.into();
        assert_eq!(transport.0, expected);
    }
}
