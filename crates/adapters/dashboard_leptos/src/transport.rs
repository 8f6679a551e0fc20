//! [`LogTransport`] over the browser `fetch` API via `gloo-net`.

use gloo_net::http::{Request, Response};

use batlog_app::ports::{HttpReply, LANGUAGE_HEADER, LogTransport, TransportError};
use batlog_domain::locale::Locale;

/// Sends requests to the dashboard backend, same-origin by default.
#[derive(Debug, Clone, Default)]
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    /// A transport resolving paths against `base` (e.g. `http://10.0.0.5:5000`).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }
}

fn transport_error(err: gloo_net::Error) -> TransportError {
    TransportError(err.to_string())
}

async fn into_reply(response: Response) -> Result<HttpReply, TransportError> {
    let status = response.status();
    let body = response.binary().await.map_err(transport_error)?;
    Ok(HttpReply::new(status, body))
}

impl LogTransport for GlooTransport {
    async fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        let response = Request::post(&self.url(path))
            .header(LANGUAGE_HEADER, locale.tag())
            .json(body)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        into_reply(response).await
    }

    async fn get(&self, path: &str, locale: Locale) -> Result<HttpReply, TransportError> {
        let response = Request::get(&self.url(path))
            .header(LANGUAGE_HEADER, locale.tag())
            .send()
            .await
            .map_err(transport_error)?;
        into_reply(response).await
    }
}
