//! Tree builder: parsed SiteXML document to [`SiteModel`].
//!
//! The same extraction policy applies at every level of the page tree: only
//! elements whose immediate parent is the element being processed are taken.
//! A `content` or `meta` element nested under a child page therefore belongs
//! to that child page and never leaks into its ancestors.

use sx_transport::parse_id;
use sx_xml::{XmlDocument, XmlElement};

use crate::model::{Content, Meta, Page, SiteModel, Theme};

/// Check that the document element is `site` (case-insensitive).
#[must_use]
pub fn is_site_document(doc: &XmlDocument) -> bool {
    doc.root().tag().eq_ignore_ascii_case("site")
}

impl SiteModel {
    /// Check that `doc` is an acceptable site description.
    ///
    /// Same as [`is_site_document`].
    #[must_use]
    pub fn is_valid_root(doc: &XmlDocument) -> bool {
        is_site_document(doc)
    }
}

/// Build a [`SiteModel`] from a parsed document.
///
/// Uses the first `site` element in document order (the document element
/// itself when it is `site`). A document without any `site` element yields an
/// empty model; rejecting such documents is the caller's decision (see
/// [`is_site_document`]).
#[must_use]
pub fn build(doc: &XmlDocument) -> SiteModel {
    let root = doc.root();
    let site = if root.tag().eq_ignore_ascii_case("site") {
        Some(root)
    } else {
        root.descendants_by_tag("site").next()
    };

    let Some(site) = site else {
        tracing::debug!(root = root.tag(), "No site element, building empty model");
        return SiteModel::default();
    };

    let model = SiteModel {
        name: attr(site, "name"),
        metas: build_metas(site),
        themes: build_themes(site),
        pages: build_pages(site).unwrap_or_default(),
    };

    tracing::debug!(
        pages = model.page_count(),
        themes = model.themes.len(),
        "Built site model"
    );

    model
}

/// Read an optional attribute.
fn attr(el: &XmlElement, name: &str) -> Option<String> {
    el.attr(name).map(str::to_owned)
}

/// Read an optional id-valued attribute.
fn id_attr(el: &XmlElement, name: &str) -> Option<i64> {
    el.attr(name).and_then(parse_id)
}

/// Pages directly under `parent`; `None` when there are none.
fn build_pages(parent: &XmlElement) -> Option<Vec<Page>> {
    let pages: Vec<Page> = parent.children_by_tag("page").map(build_page).collect();
    if pages.is_empty() { None } else { Some(pages) }
}

fn build_page(el: &XmlElement) -> Page {
    Page {
        id: id_attr(el, "id"),
        name: attr(el, "name"),
        alias: attr(el, "alias"),
        theme_ref: id_attr(el, "theme"),
        no_navi: attr(el, "nonavi"),
        start_page: attr(el, "type"),
        content: build_content(el),
        metas: build_metas(el),
        pages: build_pages(el),
    }
}

fn build_metas(parent: &XmlElement) -> Vec<Meta> {
    parent
        .children_by_tag("meta")
        .map(|el| Meta {
            name: attr(el, "name"),
            charset: attr(el, "charset"),
            http_equiv: attr(el, "http-equiv"),
            scheme: attr(el, "scheme"),
            content: attr(el, "content"),
            text: el.inner_markup().to_owned(),
        })
        .collect()
}

fn build_content(parent: &XmlElement) -> Vec<Content> {
    parent
        .children_by_tag("content")
        .map(|el| Content {
            id: id_attr(el, "id"),
            name: attr(el, "name"),
            content_type: attr(el, "type"),
            body: el.inner_markup().to_owned(),
        })
        .collect()
}

/// Themes directly under the site element. Not recursive.
fn build_themes(site: &XmlElement) -> Vec<Theme> {
    site.children_by_tag("theme")
        .map(|el| Theme {
            id: id_attr(el, "id"),
            dir: attr(el, "dir"),
            file: attr(el, "file"),
            name: attr(el, "name"),
            is_default: el
                .attr("default")
                .is_some_and(|flag| flag.eq_ignore_ascii_case("yes")),
            ajax_browsing: el.attr("ajaxbrowsing").map(|v| v.trim().to_owned()),
            content: build_content(el),
        })
        .collect()
}
