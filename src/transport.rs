//! Posting `API3G` documents to the gateway.

use http::StatusCode;
use url::Url;

/// Status and body of one gateway round trip, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        RawResponse {
            status,
            body: body.into(),
        }
    }
}

/// Sends one XML document and returns the raw answer.
///
/// Implementations must not retry; the client owns the attempt loop.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn post_xml(
        &self,
        url: &Url,
        body: String,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send;
}

#[cfg(feature = "http-client")]
pub use http_transport::HttpTransport;

#[cfg(feature = "http-client")]
mod http_transport {
    use std::time::Duration;

    use http::{HeaderMap, HeaderValue, header};
    use url::Url;

    use super::{RawResponse, Transport};

    /// [`Transport`] over a `reqwest` client.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        pub client: reqwest::Client,
    }

    impl HttpTransport {
        pub const CONTENT_TYPE: &str = "application/xml";

        /// A client with the gateway's required headers and a per-request timeout.
        pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(Self::CONTENT_TYPE),
            );
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

            let client = reqwest::Client::builder()
                .user_agent(user_agent)
                .default_headers(headers)
                .timeout(timeout)
                .build()?;

            Ok(HttpTransport { client })
        }

        /// Wrap an existing client. Headers are the caller's responsibility.
        pub fn from_client(client: reqwest::Client) -> Self {
            HttpTransport { client }
        }
    }

    impl Transport for HttpTransport {
        type Error = reqwest::Error;

        async fn post_xml(&self, url: &Url, body: String) -> Result<RawResponse, Self::Error> {
            let response = self.client.post(url.clone()).body(body).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}
