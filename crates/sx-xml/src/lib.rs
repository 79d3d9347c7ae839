//! SiteXML document parsing for SX.
//!
//! Parses XML text into an owned element tree that exposes exactly what the
//! site model builder needs:
//!
//! - [`XmlElement::attr`]: case-sensitive attribute lookup (`None` when absent)
//! - [`XmlElement::children_by_tag`]: direct children with a given tag
//! - [`XmlElement::descendants_by_tag`]: all descendants with a given tag
//! - [`XmlElement::inner_markup`]: raw source text between start and end tag
//!
//! # Example
//!
//! ```
//! use sx_xml::XmlDocument;
//!
//! let doc = XmlDocument::parse(r#"<site name="Demo"><page id="1"/></site>"#).unwrap();
//! assert_eq!(doc.root().tag(), "site");
//! assert_eq!(doc.root().attr("name"), Some("Demo"));
//! assert_eq!(doc.root().children_by_tag("page").count(), 1);
//! ```

mod element;
mod error;
mod parser;

pub use element::{Descendants, XmlElement};
pub use error::XmlError;
pub use parser::XmlDocument;
