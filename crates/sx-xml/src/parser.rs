//! Streaming parser that builds an owned element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::element::XmlElement;
use crate::error::XmlError;

/// Parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

/// Element whose end tag has not been seen yet.
struct OpenElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlElement>,
    /// Byte offset right after the start tag.
    inner_start: usize,
}

impl XmlDocument {
    /// Deepest element nesting accepted by [`parse`](Self::parse).
    ///
    /// Consumers walk the tree recursively, so an unbounded depth from an
    /// untrusted server would exhaust the stack.
    pub const MAX_DEPTH: usize = 256;

    /// Parse XML text.
    ///
    /// Comments, processing instructions, the XML declaration and doctype are
    /// skipped. Text is not materialized as nodes; it stays reachable through
    /// [`XmlElement::inner_markup`].
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the text is not well-formed XML, contains no
    /// (or more than one) document element, or nests elements deeper than
    /// [`MAX_DEPTH`](Self::MAX_DEPTH).
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<OpenElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let before = offset(&reader);
            match reader.read_event()? {
                Event::Start(e) => {
                    let (tag, attrs) = decode_start(&reader, &e)?;
                    ensure_single_root(root.as_ref(), &stack, &tag)?;
                    ensure_depth(&stack)?;
                    stack.push(OpenElement {
                        tag,
                        attrs,
                        children: Vec::new(),
                        inner_start: offset(&reader),
                    });
                }
                Event::Empty(e) => {
                    let (tag, attrs) = decode_start(&reader, &e)?;
                    ensure_single_root(root.as_ref(), &stack, &tag)?;
                    ensure_depth(&stack)?;
                    let element = XmlElement::from_parts(tag, attrs, Vec::new(), String::new());
                    attach(&mut stack, &mut root, element);
                }
                Event::End(e) => {
                    let found = decode_name(&reader, e.name().as_ref())?;
                    let Some(open) = stack.pop() else {
                        return Err(XmlError::MismatchedEnd {
                            expected: String::new(),
                            found,
                        });
                    };
                    if open.tag != found {
                        return Err(XmlError::MismatchedEnd {
                            expected: open.tag,
                            found,
                        });
                    }
                    let inner = text
                        .get(open.inner_start..before)
                        .unwrap_or_default()
                        .to_owned();
                    let element =
                        XmlElement::from_parts(open.tag, open.attrs, open.children, inner);
                    attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                // Text, CDATA, entity references, comments, PIs, declarations
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.tag));
        }

        root.map(|root| Self { root }).ok_or(XmlError::NoRoot)
    }

    /// The document element.
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

/// Current byte offset of the reader in the input text.
fn offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn ensure_single_root(
    root: Option<&XmlElement>,
    stack: &[OpenElement],
    tag: &str,
) -> Result<(), XmlError> {
    if stack.is_empty() && root.is_some() {
        return Err(XmlError::TrailingElement(tag.to_owned()));
    }
    Ok(())
}

/// Reject an element that would sit below [`XmlDocument::MAX_DEPTH`].
fn ensure_depth(stack: &[OpenElement]) -> Result<(), XmlError> {
    if stack.len() >= XmlDocument::MAX_DEPTH {
        return Err(XmlError::TooDeep(XmlDocument::MAX_DEPTH));
    }
    Ok(())
}

/// Attach a completed element to its parent, or make it the document element.
fn attach(stack: &mut [OpenElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> Result<String, XmlError> {
    Ok(reader.decoder().decode(name)?.into_owned())
}

fn decode_start(
    reader: &Reader<&[u8]>,
    e: &BytesStart,
) -> Result<(String, Vec<(String, String)>), XmlError> {
    let tag = decode_name(reader, e.name().as_ref())?;

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref())?;
        // Unknown entities are kept verbatim rather than failing the document
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.push((key, value));
    }

    Ok((tag, attrs))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SITE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- demo site -->
<site name="Demo">
  <meta name="keywords" content="a,b">inner meta</meta>
  <page id="1" name="Home">
    <content id="10" name="intro"><p>Hello <b>world</b></p></content>
    <page id="2" name="Child"/>
  </page>
  <theme id="1" dir="themes" file="main.html" default="yes"/>
</site>"#;

    #[test]
    fn test_parse_builds_tree() {
        let doc = XmlDocument::parse(SITE).unwrap();
        let site = doc.root();

        assert_eq!(site.tag(), "site");
        assert_eq!(site.attr("name"), Some("Demo"));
        let tags: Vec<_> = site.children().iter().map(XmlElement::tag).collect();
        assert_eq!(tags, vec!["meta", "page", "theme"]);
    }

    #[test]
    fn test_inner_markup_is_raw_source() {
        let doc = XmlDocument::parse(SITE).unwrap();
        let content = doc.root().descendants_by_tag("content").next().unwrap();

        assert_eq!(content.inner_markup(), "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn test_inner_markup_keeps_entities_and_cdata() {
        let doc =
            XmlDocument::parse("<content>a &amp; b<![CDATA[<raw>]]><!-- c --></content>").unwrap();

        assert_eq!(
            doc.root().inner_markup(),
            "a &amp; b<![CDATA[<raw>]]><!-- c -->"
        );
    }

    #[test]
    fn test_inner_markup_nested_same_tag() {
        let doc = XmlDocument::parse("<page><page>x</page>y</page>").unwrap();

        assert_eq!(doc.root().inner_markup(), "<page>x</page>y");
        assert_eq!(doc.root().children()[0].inner_markup(), "x");
    }

    #[test]
    fn test_self_closing_has_empty_inner_markup() {
        let doc = XmlDocument::parse(SITE).unwrap();
        let child = doc.root().descendants_by_tag("page").nth(1).unwrap();

        assert_eq!(child.attr("id"), Some("2"));
        assert_eq!(child.inner_markup(), "");
        assert!(child.children().is_empty());
    }

    #[test]
    fn test_attribute_entities_are_unescaped() {
        let doc = XmlDocument::parse(r#"<site name="A &amp; B"/>"#).unwrap();

        assert_eq!(doc.root().attr("name"), Some("A & B"));
    }

    #[test]
    fn test_attributes_keep_document_order() {
        let doc = XmlDocument::parse(r#"<theme id="1" dir="d" file="f"/>"#).unwrap();
        let keys: Vec<_> = doc.root().attrs().iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(keys, vec!["id", "dir", "file"]);
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        assert!(XmlDocument::parse("<site><page></site>").is_err());
    }

    #[test]
    fn test_unclosed_element_is_error() {
        assert!(XmlDocument::parse("<site><page>").is_err());
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let result = XmlDocument::parse("<?xml version=\"1.0\"?>\n<!-- nothing -->");

        assert!(matches!(result, Err(XmlError::NoRoot)));
    }

    #[test]
    fn test_second_top_level_element_is_error() {
        let result = XmlDocument::parse("<site/><site/>");

        assert!(matches!(result, Err(XmlError::TrailingElement(tag)) if tag == "site"));
    }

    fn nested_pages(depth: usize) -> String {
        let mut xml = String::new();
        for i in 0..depth {
            xml.push_str(&format!(r#"<page id="{i}">"#));
        }
        for _ in 0..depth {
            xml.push_str("</page>");
        }
        xml
    }

    #[test]
    fn test_nesting_at_max_depth_parses() {
        let doc = XmlDocument::parse(&nested_pages(XmlDocument::MAX_DEPTH)).unwrap();

        assert_eq!(
            doc.root().descendants().count(),
            XmlDocument::MAX_DEPTH - 1
        );
    }

    #[test]
    fn test_nesting_beyond_max_depth_is_error() {
        let result = XmlDocument::parse(&nested_pages(XmlDocument::MAX_DEPTH + 1));

        assert!(matches!(result, Err(XmlError::TooDeep(256))));
    }

    #[test]
    fn test_very_deep_self_closing_leaf_is_error() {
        let mut xml = nested_pages(XmlDocument::MAX_DEPTH);
        let mid = xml.find("</page>").unwrap();
        xml.insert_str(mid, "<content/>");

        assert!(matches!(
            XmlDocument::parse(&xml),
            Err(XmlError::TooDeep(_))
        ));
    }

    #[test]
    fn test_extremely_deep_document_fails_cleanly() {
        let result = XmlDocument::parse(&nested_pages(100_000));

        assert!(matches!(result, Err(XmlError::TooDeep(_))));
    }

    #[test]
    fn test_syntax_error_message_includes_cause() {
        let err = XmlDocument::parse("<site").unwrap_err();

        assert!(matches!(err, XmlError::Syntax(_)));
        assert!(err.to_string().starts_with("XML parse error: "));
        assert!(err.to_string().len() > "XML parse error: ".len());
    }

    #[test]
    fn test_non_site_root_still_parses() {
        let doc = XmlDocument::parse("<html><site/></html>").unwrap();

        assert_eq!(doc.root().tag(), "html");
        assert_eq!(doc.root().descendants_by_tag("site").count(), 1);
    }
}
