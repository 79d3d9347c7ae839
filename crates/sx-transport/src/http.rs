//! HTTP transport backed by `ureq`.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};
use ureq::Agent;

use crate::error::TransportError;
use crate::key::ContentKey;
use crate::transport::Transport;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("sx/", env!("CARGO_PKG_VERSION"));

/// Characters `encodeURIComponent` leaves alone: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a form field value.
fn form_encode(value: &str) -> String {
    utf8_percent_encode(value, FORM_ENCODE_SET).to_string()
}

/// Synchronous HTTP transport for a SiteXML server.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Site root URL; trailing slashes are removed
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a transport with a custom global request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tree_url(&self) -> String {
        format!("{}/?sitexml", self.base_url)
    }

    fn post_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    fn get(&self, url: &str) -> Result<String, TransportError> {
        debug!(url, "GET");
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .inspect_err(|e| warn!(url, error = %e, "GET failed"))?;
        read_success_body(response, url)
    }

    fn post_form(&self, url: &str, body: &str) -> Result<(), TransportError> {
        debug!(url, bytes = body.len(), "POST");
        let response = self
            .agent
            .post(url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send(body.as_bytes())
            .inspect_err(|e| warn!(url, error = %e, "POST failed"))?;
        read_success_body(response, url).map(|_| ())
    }
}

/// Return the body of a 2xx response, or the categorized status error.
fn read_success_body(
    response: ureq::http::Response<ureq::Body>,
    url: &str,
) -> Result<String, TransportError> {
    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        warn!(url, status, "Server returned error status");
        return Err(TransportError::from_status(status, url));
    }
    let mut body = response.into_body();
    Ok(body.read_to_string()?)
}

impl Transport for HttpTransport {
    fn fetch_tree(&self) -> Result<String, TransportError> {
        self.get(&self.tree_url())
    }

    fn fetch_content(&self, key: &ContentKey) -> Result<String, TransportError> {
        self.get(&key.url(&self.base_url))
    }

    fn save_content(&self, id: i64, content: &str) -> Result<(), TransportError> {
        let body = format!("cid={id}&content={}", form_encode(content));
        self.post_form(&self.post_url(), &body)
    }

    fn save_tree(&self, xml: &str) -> Result<(), TransportError> {
        let body = format!("sitexml={}", form_encode(xml));
        self.post_form(&self.post_url(), &body)
    }
}
