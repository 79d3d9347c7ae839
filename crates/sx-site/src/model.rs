//! Typed site model.
//!
//! A [`SiteModel`] is built once per successful load and never mutated
//! afterwards; a reload produces a new model. Pages own their content blocks,
//! metas and subpages by value, so there are no back-references and every
//! lookup is a root-to-leaf descent.
//!
//! Optional attributes are `Option<String>`: `None` means the attribute was
//! absent, `Some("")` means it was present but empty.

use serde::{Deserialize, Serialize};

/// Root aggregate of a loaded site description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteModel {
    /// `site@name`.
    pub name: Option<String>,
    /// Site-level metas in document order.
    pub metas: Vec<Meta>,
    /// Themes in document order.
    pub themes: Vec<Theme>,
    /// Top-level pages in document order.
    pub pages: Vec<Page>,
}

/// One node of the page tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// `page@id`; `None` when missing or not numeric.
    pub id: Option<i64>,
    /// `page@name`.
    pub name: Option<String>,
    /// `page@alias`.
    pub alias: Option<String>,
    /// `page@theme`, the id of the page's explicit theme.
    pub theme_ref: Option<i64>,
    /// `page@nonavi`, raw.
    pub no_navi: Option<String>,
    /// `page@type`, raw (marks the start page).
    pub start_page: Option<String>,
    /// Content blocks directly owned by this page.
    pub content: Vec<Content>,
    /// Metas directly owned by this page.
    pub metas: Vec<Meta>,
    /// Child pages; `None` when the page has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<Page>>,
}

impl Page {
    /// Child pages, empty when there are none.
    #[must_use]
    pub fn subpages(&self) -> &[Page] {
        self.pages.as_deref().unwrap_or_default()
    }

    /// True if the page has at least one child page.
    #[must_use]
    pub fn has_subpages(&self) -> bool {
        self.pages.is_some()
    }

    /// True if `nonavi` asks to keep the page out of navigation.
    ///
    /// Accepts `yes`, `true` and `1`, case-insensitively.
    #[must_use]
    pub fn hides_navigation(&self) -> bool {
        self.no_navi.as_deref().is_some_and(|flag| {
            let flag = flag.trim();
            ["yes", "true", "1"]
                .iter()
                .any(|accepted| flag.eq_ignore_ascii_case(accepted))
        })
    }
}

/// Content block owned by a page or a theme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// `content@id`; `None` when missing or not numeric.
    pub id: Option<i64>,
    /// `content@name`.
    pub name: Option<String>,
    /// `content@type`.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Raw inner markup of the element.
    pub body: String,
}

/// Metadata record, modelled after HTML `<meta>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// `meta@name`.
    pub name: Option<String>,
    /// `meta@charset`.
    pub charset: Option<String>,
    /// `meta@http-equiv`.
    pub http_equiv: Option<String>,
    /// `meta@scheme`.
    pub scheme: Option<String>,
    /// `meta@content` attribute.
    pub content: Option<String>,
    /// Raw inner markup of the element (distinct from the `content` attribute).
    pub text: String,
}

/// Site-level visual theme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// `theme@id`; `None` when missing or not numeric.
    pub id: Option<i64>,
    /// `theme@dir`.
    pub dir: Option<String>,
    /// `theme@file`.
    pub file: Option<String>,
    /// `theme@name`.
    pub name: Option<String>,
    /// `theme@default` equals "yes", case-insensitively.
    pub is_default: bool,
    /// `theme@ajaxbrowsing`, trimmed.
    pub ajax_browsing: Option<String>,
    /// Content blocks owned by the theme (template fragments).
    pub content: Vec<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_nonavi(flag: Option<&str>) -> Page {
        Page {
            no_navi: flag.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn test_subpages_absent_is_empty_slice() {
        let page = Page::default();

        assert!(page.subpages().is_empty());
        assert!(!page.has_subpages());
    }

    #[test]
    fn test_hides_navigation_flags() {
        assert!(page_with_nonavi(Some("yes")).hides_navigation());
        assert!(page_with_nonavi(Some("TRUE")).hides_navigation());
        assert!(page_with_nonavi(Some(" 1 ")).hides_navigation());
        assert!(!page_with_nonavi(Some("no")).hides_navigation());
        assert!(!page_with_nonavi(Some("")).hides_navigation());
        assert!(!page_with_nonavi(None).hides_navigation());
    }

    #[test]
    fn test_page_without_children_omits_pages_in_json() {
        let page = Page {
            id: Some(1),
            ..Default::default()
        };

        let json = serde_json::to_value(&page).unwrap();

        assert!(json.get("pages").is_none());
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn test_content_type_serialized_as_type() {
        let content = Content {
            id: Some(3),
            content_type: Some("html".to_owned()),
            ..Default::default()
        };

        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["type"], "html");
    }
}
