//! Owned element tree.

/// Element node in a parsed document.
///
/// Only element children are kept as nodes. Text, comments and CDATA stay
/// available through [`inner_markup`](Self::inner_markup) in their original
/// source form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlElement>,
    inner: String,
}

impl XmlElement {
    /// Create an element with the given tag and no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set child elements.
    #[must_use]
    pub fn with_children(mut self, children: Vec<XmlElement>) -> Self {
        self.children = children;
        self
    }

    pub(crate) fn from_parts(
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<XmlElement>,
        inner: String,
    ) -> Self {
        Self {
            tag,
            attrs,
            children,
            inner,
        }
    }

    /// Element tag name as written in the source (prefix included).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by exact name.
    ///
    /// Returns `None` when the attribute is absent and `Some("")` when it is
    /// present but empty. The first occurrence wins if the source repeats a name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in document order.
    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Direct child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Direct child elements with the given tag, in document order.
    ///
    /// Elements nested deeper (under another child) are never returned.
    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// All descendant elements in document (pre-order) order.
    ///
    /// The element itself is not included.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// All descendant elements with the given tag, in document order.
    pub fn descendants_by_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> {
        self.descendants().filter(move |el| el.tag == tag)
    }

    /// Raw source text between the start and end tag.
    ///
    /// Empty for self-closing elements. Entities are not decoded.
    #[must_use]
    pub fn inner_markup(&self) -> &str {
        &self.inner
    }
}

/// Pre-order iterator over the descendants of an element.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlElement>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            if let Some(el) = level.next() {
                self.stack.push(el.children.iter());
                return Some(el);
            }
            self.stack.pop();
        }
    }
}
