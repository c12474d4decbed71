//! Keys and key paths for addressing inside a [`Value`](crate::Value) tree
//!
//! Provides [`Key`] (a mapping field or a sequence index) and [`KeyPath`]
//! (a route from the root of a document to one of its nodes).

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

/// A single step into a container
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Mapping field name
    Field(String),
    /// Sequence position
    Index(usize),
}

impl Key {
    /// Interpret key as a sequence index
    ///
    /// Numeric field names (`"3"`) are accepted, the same way property names
    /// address array slots in loosely typed documents.
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Field(name) => name.parse().ok(),
        }
    }

    /// Interpret key as a mapping field name
    #[inline]
    #[must_use]
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            Self::Field(name) => Cow::Borrowed(name.as_str()),
            Self::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write_field(f, name),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Self::Field(name.clone())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Path from the document root to a node
///
/// # Examples
/// - `[]` → root (displays as the empty string)
/// - `[Field("user"), Field("contacts"), Index(1)]` → `user.contacts[1]`
/// - `[Field("a.b"), Field("")]` → `"a.b".""`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Create new path from keys
    #[inline]
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// Empty path (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path keys
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Get number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a key, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut new = self.clone();
        new.0.push(key.into());
        new
    }

    /// Iterator over keys from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.0.iter()
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            match key {
                Key::Field(name) => {
                    if i > 0 {
                        f.write_char('.')?;
                    }
                    write_field(f, name)?;
                }
                Key::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Names that would not parse back bare are quoted, with `"` and `\` escaped
fn write_field(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    if !name.is_empty() && !name.contains(['.', '[', ']', '"', '\\']) {
        return f.write_str(name);
    }
    f.write_char('"')?;
    for c in name.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

/// Read a quoted field body; `input` starts after the opening quote
fn parse_quoted(input: &str) -> Result<(String, &str), PathError> {
    let mut name = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((name, &input[i + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped)) => name.push(escaped),
                None => break,
            },
            _ => name.push(c),
        }
    }
    Err(PathError::UnclosedQuote(input.to_string()))
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let mut keys = Vec::new();
        let mut rest = s;
        loop {
            if let Some(quoted) = rest.strip_prefix('"') {
                let (name, after) = parse_quoted(quoted)?;
                keys.push(Key::Field(name));
                rest = after;
            } else {
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                let (name, after) = rest.split_at(end);
                if name.is_empty() && !after.starts_with('[') {
                    return Err(PathError::EmptySegment);
                }
                if !name.is_empty() {
                    keys.push(Key::Field(name.to_string()));
                }
                rest = after;
            }

            while let Some(inner) = rest.strip_prefix('[') {
                let Some(close) = inner.find(']') else {
                    return Err(PathError::UnclosedIndex(rest.to_string()));
                };
                let index = inner[..close]
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidIndex(inner[..close].to_string()))?;
                keys.push(Key::Index(index));
                rest = &inner[close + 1..];
            }

            if rest.is_empty() {
                return Ok(Self(keys));
            }
            let Some(next) = rest.strip_prefix('.') else {
                return Err(PathError::InvalidIndex(rest.to_string()));
            };
            rest = next;
        }
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

/// Errors related to key paths
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Index is not a non-negative integer
    #[error("invalid index: '{0}'")]
    InvalidIndex(String),

    /// Missing closing bracket
    #[error("unclosed index in segment: '{0}'")]
    UnclosedIndex(String),

    /// Missing closing quote
    #[error("unclosed quoted field: '{0}'")]
    UnclosedQuote(String),
}
