//! Transport abstraction for SX.
//!
//! This crate provides a [`Transport`] trait for the four requests a SiteXML
//! client issues against its server:
//!
//! - `GET {base}/?sitexml` - the site description document
//! - `GET {base}/?cid={id}` or `GET {base}/{path}` - a content block
//! - `POST {base}/` with `cid` + `content` - save a content block
//! - `POST {base}/` with `sitexml` - save the site description
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Transport`] trait decoupling the site layer from HTTP
//! - [`HttpTransport`] implementation backed by a `ureq` agent
//! - [`MockTransport`] for testing (behind `mock` feature flag)
//! - [`TransportError`] with a coarse [`FailureKind`] callers branch on
//!
//! Requests are never retried here; a failure is reported once and the caller
//! decides what to do.

mod error;
mod http;
mod key;
#[cfg(feature = "mock")]
mod mock;
mod transport;

pub use error::{FailureKind, TransportError};
pub use http::HttpTransport;
pub use key::{ContentKey, parse_id};
#[cfg(feature = "mock")]
pub use mock::MockTransport;
pub use transport::Transport;
