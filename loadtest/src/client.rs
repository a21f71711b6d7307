use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_LENGTH, HOST};
use hyper::{Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use lb_test_util::collect::CollectBodyFuture;
use lb_test_util::empty_body;

/// Cloneable handle over one shared connection pool. Concurrent attempts may
/// reuse pooled connections, but each owns its exchange exclusively.
#[derive(Clone)]
pub struct HttpClient {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpClient {
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// One GET exchange. Any `Err` here is a transport-level failure; HTTP
    /// status handling is the caller's concern.
    pub async fn get(
        &self,
        uri: &Uri,
        virtual_host: Option<&HeaderValue>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let mut builder = Request::get(uri.clone());
        if let Some(host) = virtual_host {
            builder = builder.header(HOST, host.clone());
        }
        let request = builder
            .body(empty_body())
            .context("failed to build request")?;
        let resp = self
            .client
            .request(request)
            .await
            .context("failed to send request")?;
        let status = resp.status();
        let content_length: usize = resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|hv| hv.parse().ok())
            .unwrap_or(1024);
        let body: Vec<u8> =
            CollectBodyFuture::with_capacity(resp.into_body(), content_length).await?;
        Ok((status, body))
    }
}
