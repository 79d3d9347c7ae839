//! Content lookup keys and id coercion.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in path-style content keys: A-Z a-z 0-9 - . _ ~ /
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Coerce textual id to a number.
///
/// This is the single place where ids read from attributes, command lines or
/// cache keys become numbers. Surrounding whitespace is ignored, integral
/// floating point text (`"2.0"`, `"1e3"`) is accepted, and anything else
/// (including empty text) yields `None`.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn parse_id(raw: &str) -> Option<i64> {
    /// Largest magnitude at which every integer is exactly representable in f64.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.trunc() == value && value.abs() <= MAX_EXACT {
        Some(value as i64)
    } else {
        None
    }
}

/// Key identifying a content block to fetch and cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContentKey {
    /// Numeric content id, fetched as `?cid={id}`.
    Id(i64),
    /// Textual path, fetched as `/{path}`.
    Path(String),
}

impl ContentKey {
    /// Interpret raw request text.
    ///
    /// Text that coerces to a non-zero id becomes [`ContentKey::Id`]; anything
    /// else is kept verbatim as a [`ContentKey::Path`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match parse_id(raw) {
            Some(id) if id != 0 => Self::Id(id),
            _ => Self::Path(raw.to_owned()),
        }
    }

    /// Key under which the fetched content is cached.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Path(path) => path.clone(),
        }
    }

    /// Request URL for this key relative to a base URL without trailing slash.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        match self {
            Self::Id(id) => format!("{base}/?cid={id}"),
            Self::Path(path) => {
                let path = path.trim_start_matches('/');
                format!("{base}/{}", utf8_percent_encode(path, PATH_ENCODE_SET))
            }
        }
    }
}

impl From<i64> for ContentKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}
