//! Shared HTTP plumbing for the REST clients

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Endpoint;
use crate::error::{Error, Result};

/// Media type sent on every request
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Thin wrapper around a `reqwest::Client` bound to one base URL
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client; `accept` is added as a default `Accept` header when set
    pub(crate) fn new(endpoint: &Endpoint, accept: Option<&'static str>) -> Result<Self> {
        let raw = endpoint.base_url();
        let base_url = Url::parse(&raw)
            .map_err(|e| Error::validation(format!("invalid endpoint '{}': {}", raw, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(accept) = accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        let client = Client::builder()
            .timeout(endpoint.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build a URL from path segments; each segment is percent-encoded.
    ///
    /// A trailing `""` segment produces a trailing slash (`/connectors/`).
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    /// Send a request and return the raw body of a successful response.
    ///
    /// Statuses in `[400, 500]` are errors carrying the body verbatim.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<String> {
        let url = self.url(segments);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if (400..=500).contains(&status) {
            tracing::debug!("{} answered {}", url, status);
            return Err(Error::Http { status, body: text });
        }
        Ok(text)
    }

    /// Send a request and decode the JSON response into `T`
    pub(crate) async fn call<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(method, segments, body).await?;
        serde_json::from_str(&text).map_err(|source| Error::Decode {
            url: self.url(segments).to_string(),
            source,
        })
    }

    /// GET and decode
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.call::<(), T>(Method::GET, segments, None).await
    }

    /// Send a bodiless request whose response body is ignored
    pub(crate) async fn execute(&self, method: Method, segments: &[&str]) -> Result<()> {
        self.send::<()>(method, segments, None).await.map(|_| ())
    }
}
