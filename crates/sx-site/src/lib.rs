//! Site model and query layer for SiteXML clients.
//!
//! This crate provides:
//! - [`SiteModel`] and its parts: the typed, immutable tree built from a
//!   SiteXML document by [`build`]
//! - id, name and theme lookups on [`SiteModel`] and [`Page`]
//! - [`Site`]: a shareable handle that loads, caches and saves through a
//!   [`Transport`](sx_transport::Transport) and reports every outcome as a
//!   [`Notification`]
//!
//! # Quick Start
//!
//! ```
//! use sx_site::{XmlDocument, build};
//!
//! let doc = XmlDocument::parse(
//!     r#"<site name="Demo">
//!          <page id="1" theme="2"><content id="10" name="intro">Hi</content></page>
//!          <theme id="1" default="yes"/>
//!          <theme id="2"/>
//!        </site>"#,
//! )
//! .unwrap();
//! let model = build(&doc);
//!
//! assert_eq!(model.content_id_by_page_and_name(1, "intro"), Some(10));
//! assert_eq!(model.resolve_theme_for_page(1).and_then(|t| t.id), Some(2));
//! ```

mod builder;
mod error;
mod model;
mod notification;
mod resolve;
mod site;

pub use builder::{build, is_site_document};
pub use error::LoadError;
pub use model::{Content, Meta, Page, SiteModel, Theme};
pub use notification::{Notification, NotificationReceiver};
pub use resolve::{find_content_by_id, find_page_by_id};
pub use site::Site;

pub use sx_transport::{ContentKey, FailureKind, parse_id};
pub use sx_xml::XmlDocument;
