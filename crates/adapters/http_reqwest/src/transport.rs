//! [`LogTransport`] over a shared [`reqwest::Client`].

use url::Url;

use batlog_app::ports::{HttpReply, LANGUAGE_HEADER, LogTransport, TransportError};
use batlog_domain::locale::Locale;

use crate::error::HttpError;

/// Sends dashboard requests relative to a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Create a transport for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a transport reusing an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, HttpError> {
        let mut url = Url::parse(base_url).map_err(|source| HttpError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url: url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path (`/api/logs`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| HttpError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<HttpReply, HttpError> {
        let response = request.send().await.map_err(HttpError::Request)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(HttpError::Body)?;
        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpReply::new(status, body.to_vec()))
    }
}

impl LogTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, body))]
    async fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        let url = self.endpoint(path)?;
        let request = self
            .http
            .post(url)
            .header(LANGUAGE_HEADER, locale.tag())
            .json(body);
        Ok(self.execute(request).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, path: &str, locale: Locale) -> Result<HttpReply, TransportError> {
        let url = self.endpoint(path)?;
        let request = self.http.get(url).header(LANGUAGE_HEADER, locale.tag());
        Ok(self.execute(request).await?)
    }
}
