//! Transport port: the single network boundary of the log views.

use std::future::Future;

use batlog_domain::error::QueryFailure;
use batlog_domain::locale::Locale;
use serde::Deserialize;

/// Request header announcing the active locale to the backend.
pub const LANGUAGE_HEADER: &str = "X-Language";

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A reply carrying `value` serialized as JSON.
    #[must_use]
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Pass 2xx replies through; classify everything else as a server failure.
    ///
    /// The failure message is taken from a JSON `{"error": "..."}` body when
    /// present, otherwise it reads `HTTP <status>`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryFailure::Server`] for non-2xx statuses.
    pub fn into_success(self) -> Result<Self, QueryFailure> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {}", self.status),
        };
        Err(QueryFailure::Server {
            status: self.status,
            message,
        })
    }
}

/// JSON error body returned by the server on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

impl From<TransportError> for QueryFailure {
    fn from(err: TransportError) -> Self {
        QueryFailure::Network(err.0)
    }
}

/// Sends requests to the dashboard backend.
///
/// Futures are not required to be `Send`: the browser adapter runs on a
/// single-threaded executor.
pub trait LogTransport {
    /// `POST` `body` as JSON to `path`, announcing `locale` via `X-Language`.
    fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;

    /// `GET` `path`, announcing `locale` via `X-Language`.
    fn get(
        &self,
        path: &str,
        locale: Locale,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;
}

impl<T: LogTransport> LogTransport for std::rc::Rc<T> {
    fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        (**self).post_json(path, locale, body)
    }

    fn get(
        &self,
        path: &str,
        locale: Locale,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        (**self).get(path, locale)
    }
}

impl<T: LogTransport> LogTransport for std::sync::Arc<T> {
    fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        (**self).post_json(path, locale, body)
    }

    fn get(
        &self,
        path: &str,
        locale: Locale,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        (**self).get(path, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pass_success_through() {
        let reply = HttpReply::new(200, "{}");
        assert_eq!(reply.clone().into_success(), Ok(reply));
    }

    #[test]
    fn should_use_error_body_message() {
        let reply = HttpReply::json(500, &serde_json::json!({"error": "database locked"}));
        assert_eq!(
            reply.into_success(),
            Err(QueryFailure::Server {
                status: 500,
                message: "database locked".to_string(),
            })
        );
    }

    #[test]
    fn should_fall_back_to_status_text() {
        let reply = HttpReply::new(502, "<html>bad gateway</html>");
        assert_eq!(
            reply.into_success(),
            Err(QueryFailure::Server {
                status: 502,
                message: "HTTP 502".to_string(),
            })
        );
    }

    #[test]
    fn should_classify_transport_error_as_network_failure() {
        let failure: QueryFailure = TransportError("connection refused".to_string()).into();
        assert_eq!(failure, QueryFailure::Network("connection refused".to_string()));
    }
}
