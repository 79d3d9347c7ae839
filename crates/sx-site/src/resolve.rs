//! Read-only queries over a [`SiteModel`].
//!
//! Every lookup is a root-to-leaf descent that returns the first match in
//! document order. Duplicate ids are not detected: the first declared wins.
//! A miss is `None`, never an error.

use crate::model::{Content, Page, SiteModel, Theme};

/// Find a page by id in `pages` and their descendants.
///
/// Depth-first, pre-order: each page is compared before its subtree is
/// searched, and a page's subtree is exhausted before its next sibling.
#[must_use]
pub fn find_page_by_id(pages: &[Page], id: i64) -> Option<&Page> {
    pages.iter().find_map(|page| {
        if page.id == Some(id) {
            Some(page)
        } else {
            find_page_by_id(page.subpages(), id)
        }
    })
}

/// Find a content block by id among `pages` and their descendants.
///
/// A page's own content wins over anything deeper in its subtree; siblings
/// are tried only after the previous sibling's subtree is exhausted.
#[must_use]
pub fn find_content_by_id(pages: &[Page], id: i64) -> Option<&Content> {
    pages.iter().find_map(|page| {
        page.content
            .iter()
            .find(|content| content.id == Some(id))
            .or_else(|| find_content_by_id(page.subpages(), id))
    })
}

impl Page {
    /// Find a page by id among this page's descendants (not itself).
    #[must_use]
    pub fn find_subpage_by_id(&self, id: i64) -> Option<&Page> {
        find_page_by_id(self.subpages(), id)
    }

    /// Find a content block by id among this page's descendants (not its own
    /// content).
    #[must_use]
    pub fn find_content_in_subpages(&self, id: i64) -> Option<&Content> {
        find_content_by_id(self.subpages(), id)
    }

    /// Id of the first own content block named exactly `name`.
    #[must_use]
    pub fn content_id_by_name(&self, name: &str) -> Option<i64> {
        self.content
            .iter()
            .find(|content| content.name.as_deref() == Some(name))
            .and_then(|content| content.id)
    }
}

impl SiteModel {
    /// Find a page anywhere in the tree.
    #[must_use]
    pub fn find_page_by_id(&self, id: i64) -> Option<&Page> {
        find_page_by_id(&self.pages, id)
    }

    /// Find a page-owned content block anywhere in the tree.
    ///
    /// Theme content is not searched.
    #[must_use]
    pub fn find_content_by_id(&self, id: i64) -> Option<&Content> {
        find_content_by_id(&self.pages, id)
    }

    /// Id of the content named `name` owned directly by page `page_id`.
    ///
    /// Only the page's own content list is scanned, and names compare
    /// case-sensitively. A matching block without a usable id yields `None`.
    #[must_use]
    pub fn content_id_by_page_and_name(&self, page_id: i64, name: &str) -> Option<i64> {
        self.find_page_by_id(page_id)?.content_id_by_name(name)
    }

    /// First theme with the given id.
    #[must_use]
    pub fn find_theme_by_id(&self, id: i64) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == Some(id))
    }

    /// The site's default theme: the first one flagged default, otherwise the
    /// first theme declared.
    #[must_use]
    pub fn default_theme(&self) -> Option<&Theme> {
        self.themes
            .iter()
            .find(|theme| theme.is_default)
            .or_else(|| self.themes.first())
    }

    /// Effective theme for page `page_id`.
    ///
    /// An explicit `theme` reference that resolves wins. Otherwise falls back
    /// to [`default_theme`](Self::default_theme), also when the page does not
    /// exist or references an unknown theme.
    #[must_use]
    pub fn resolve_theme_for_page(&self, page_id: i64) -> Option<&Theme> {
        self.find_page_by_id(page_id)
            .and_then(|page| page.theme_ref)
            .and_then(|theme_id| self.find_theme_by_id(theme_id))
            .or_else(|| self.default_theme())
    }

    /// Total number of pages in the tree.
    #[must_use]
    pub fn page_count(&self) -> usize {
        fn count(pages: &[Page]) -> usize {
            pages.iter().map(|page| 1 + count(page.subpages())).sum()
        }
        count(&self.pages)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn content(id: i64, name: &str) -> Content {
        Content {
            id: Some(id),
            name: Some(name.to_owned()),
            body: format!("body {id}"),
            ..Default::default()
        }
    }

    fn page(id: i64, content: Vec<Content>, children: Vec<Page>) -> Page {
        Page {
            id: Some(id),
            content,
            pages: if children.is_empty() {
                None
            } else {
                Some(children)
            },
            ..Default::default()
        }
    }

    fn theme(id: i64, is_default: bool) -> Theme {
        Theme {
            id: Some(id),
            is_default,
            ..Default::default()
        }
    }

    /// 1 [10 intro, 11 body]
    ///   2 [20]
    ///     3 [30]
    ///   5 [50]
    /// 4 [40]
    fn sample() -> SiteModel {
        SiteModel {
            pages: vec![
                page(
                    1,
                    vec![content(10, "intro"), content(11, "body")],
                    vec![
                        page(
                            2,
                            vec![content(20, "intro")],
                            vec![page(3, vec![content(30, "intro")], vec![])],
                        ),
                        page(5, vec![content(50, "intro")], vec![]),
                    ],
                ),
                page(4, vec![content(40, "intro")], vec![]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_find_page_by_id_reaches_every_page() {
        let model = sample();

        for id in [1, 2, 3, 4, 5] {
            assert_eq!(model.find_page_by_id(id).and_then(|p| p.id), Some(id));
        }
    }

    #[test]
    fn test_find_page_by_id_missing() {
        let model = sample();

        assert!(model.find_page_by_id(99).is_none());
        assert!(SiteModel::default().find_page_by_id(1).is_none());
    }

    #[test]
    fn test_find_page_by_id_first_match_in_preorder() {
        let mut first = page(7, vec![], vec![]);
        first.name = Some("nested".to_owned());
        let mut second = page(7, vec![], vec![]);
        second.name = Some("sibling".to_owned());
        let pages = vec![page(1, vec![], vec![first]), second];

        let found = find_page_by_id(&pages, 7).unwrap();
        assert_eq!(found.name.as_deref(), Some("nested"));
    }

    #[test]
    fn test_page_without_id_never_matches() {
        let pages = vec![Page::default()];

        assert!(find_page_by_id(&pages, 0).is_none());
    }

    #[test]
    fn test_find_subpage_by_id_scopes_to_descendants() {
        let model = sample();
        let home = model.find_page_by_id(1).unwrap();

        assert_eq!(home.find_subpage_by_id(3).and_then(|p| p.id), Some(3));
        assert!(home.find_subpage_by_id(1).is_none());
        assert!(home.find_subpage_by_id(4).is_none());
    }

    #[test]
    fn test_find_content_by_id_reaches_every_block() {
        let model = sample();

        for id in [10, 11, 20, 30, 40, 50] {
            assert_eq!(model.find_content_by_id(id).and_then(|c| c.id), Some(id));
        }
        assert!(model.find_content_by_id(99).is_none());
    }

    #[test]
    fn test_find_content_by_id_own_content_wins() {
        let mut own = content(8, "own");
        own.body = "own".to_owned();
        let mut deep = content(8, "deep");
        deep.body = "deep".to_owned();
        let pages = vec![page(1, vec![own], vec![page(2, vec![deep], vec![])])];

        assert_eq!(find_content_by_id(&pages, 8).unwrap().body, "own");
    }

    #[test]
    fn test_find_content_by_id_first_hit_is_kept() {
        let mut deep = content(8, "deep");
        deep.body = "deep".to_owned();
        let mut later = content(8, "later");
        later.body = "later".to_owned();
        let pages = vec![
            page(1, vec![], vec![page(2, vec![deep], vec![])]),
            page(3, vec![later], vec![]),
        ];

        assert_eq!(find_content_by_id(&pages, 8).unwrap().body, "deep");
    }

    #[test]
    fn test_find_content_in_subpages_skips_own_content() {
        let model = sample();
        let home = model.find_page_by_id(1).unwrap();

        assert!(home.find_content_in_subpages(10).is_none());
        assert_eq!(home.find_content_in_subpages(30).and_then(|c| c.id), Some(30));
    }

    #[test]
    fn test_content_id_by_page_and_name() {
        let model = sample();

        assert_eq!(model.content_id_by_page_and_name(1, "intro"), Some(10));
        assert_eq!(model.content_id_by_page_and_name(1, "body"), Some(11));
        assert_eq!(model.content_id_by_page_and_name(1, "missing"), None);
        assert_eq!(model.content_id_by_page_and_name(99, "intro"), None);
    }

    #[test]
    fn test_content_id_by_page_and_name_ignores_descendants() {
        let model = sample();

        assert_eq!(model.content_id_by_page_and_name(4, "body"), None);
        assert_eq!(model.content_id_by_page_and_name(2, "intro"), Some(20));
    }

    #[test]
    fn test_content_id_by_page_and_name_is_case_sensitive() {
        let model = sample();

        assert_eq!(model.content_id_by_page_and_name(1, "Intro"), None);
    }

    #[test]
    fn test_find_theme_by_id_first_match() {
        let mut first = theme(1, false);
        first.name = Some("first".to_owned());
        let mut dup = theme(1, false);
        dup.name = Some("dup".to_owned());
        let model = SiteModel {
            themes: vec![first, dup],
            ..Default::default()
        };

        assert_eq!(model.find_theme_by_id(1).unwrap().name.as_deref(), Some("first"));
        assert!(model.find_theme_by_id(2).is_none());
    }

    #[test]
    fn test_explicit_theme_beats_default() {
        let mut home = page(1, vec![], vec![]);
        home.theme_ref = Some(2);
        let model = SiteModel {
            pages: vec![home],
            themes: vec![theme(1, true), theme(2, false)],
            ..Default::default()
        };

        assert_eq!(model.resolve_theme_for_page(1).and_then(|t| t.id), Some(2));
    }

    #[test]
    fn test_first_default_wins() {
        let model = SiteModel {
            pages: vec![page(1, vec![], vec![])],
            themes: vec![theme(1, false), theme(2, true), theme(3, true)],
            ..Default::default()
        };

        assert_eq!(model.resolve_theme_for_page(1).and_then(|t| t.id), Some(2));
    }

    #[test]
    fn test_first_theme_fallback() {
        let model = SiteModel {
            pages: vec![page(1, vec![], vec![])],
            themes: vec![theme(5, false), theme(6, false)],
            ..Default::default()
        };

        assert_eq!(model.resolve_theme_for_page(1).and_then(|t| t.id), Some(5));
    }

    #[test]
    fn test_no_themes_resolves_to_none() {
        let model = sample();

        assert!(model.resolve_theme_for_page(1).is_none());
        assert!(model.default_theme().is_none());
    }

    #[test]
    fn test_unknown_theme_ref_falls_back_to_default() {
        let mut home = page(1, vec![], vec![]);
        home.theme_ref = Some(42);
        let model = SiteModel {
            pages: vec![home],
            themes: vec![theme(1, false), theme(2, true)],
            ..Default::default()
        };

        assert_eq!(model.resolve_theme_for_page(1).and_then(|t| t.id), Some(2));
    }

    #[test]
    fn test_missing_page_still_gets_default_theme() {
        let model = SiteModel {
            themes: vec![theme(5, false), theme(6, true)],
            ..Default::default()
        };

        assert_eq!(model.resolve_theme_for_page(99).and_then(|t| t.id), Some(6));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(sample().page_count(), 5);
        assert_eq!(SiteModel::default().page_count(), 0);
    }
}
