use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest key the VICI encoding can carry (8-bit length prefix).
pub const MAX_KEY_LEN: usize = u8::MAX as usize;
/// Longest value or list item the VICI encoding can carry (16-bit length prefix).
pub const MAX_VALUE_LEN: usize = u16::MAX as usize;

/// A single element stored under a key of a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    /// Plain key/value pair.
    Value(String),
    /// Named list of string items.
    List(Vec<String>),
    /// Nested section.
    Section(Message),
}

impl Element {
    /// Short element kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Value(_) => "value",
            Element::List(_) => "list",
            Element::Section(_) => "section",
        }
    }
}

/// A generic VICI message: a section of keyed elements.
///
/// Keys are kept sorted. The daemon does not attach meaning to element
/// order, so sorting only makes output reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message {
    entries: BTreeMap<String, Element>,
}

/// Wire limit violations found by [`Message::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A key was empty.
    #[error("empty key in section '{path}'")]
    EmptyKey { path: String },
    /// A key exceeded [`MAX_KEY_LEN`] bytes.
    #[error("key '{path}' is {len} bytes long (max {MAX_KEY_LEN})")]
    KeyTooLong { path: String, len: usize },
    /// A value or list item exceeded [`MAX_VALUE_LEN`] bytes.
    #[error("value of '{path}' is {len} bytes long (max {MAX_VALUE_LEN})")]
    ValueTooLong { path: String, len: usize },
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any previous element under `key`.
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Element::Value(value.into()));
    }

    /// Insert a list, replacing any previous element under `key`.
    pub fn insert_list<I, T>(&mut self, key: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.entries.insert(key.into(), Element::List(items));
    }

    /// Insert a nested section, replacing any previous element under `key`.
    pub fn insert_section(&mut self, key: impl Into<String>, section: Message) {
        self.entries.insert(key.into(), Element::Section(section));
    }

    /// Insert a value only when one is present.
    pub fn insert_optional<T: ToString>(&mut self, key: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.insert_value(key, value.to_string());
        }
    }

    /// Insert a list only when it has at least one item.
    pub fn insert_nonempty_list(&mut self, key: impl Into<String>, items: &[String]) {
        if !items.is_empty() {
            self.insert_list(key, items.iter().cloned());
        }
    }

    /// Return the element stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.entries.get(key)
    }

    /// Return the value stored under `key` if it is a plain value.
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Element::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Return the items stored under `key` if it is a list.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key)? {
            Element::List(items) => Some(items),
            _ => None,
        }
    }

    /// Return the section stored under `key` if it is a section.
    pub fn section(&self, key: &str) -> Option<&Message> {
        match self.entries.get(key)? {
            Element::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Walk nested sections and return the element at the end of `path`.
    pub fn get_path<'a>(&'a self, path: &[&str]) -> Option<&'a Element> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.section(segment)?;
        }
        current.get(last)
    }

    /// Remove and return the element stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over elements in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Element> {
        self.entries.iter()
    }

    /// Check every key and value against the VICI wire limits.
    pub fn validate(&self) -> Result<(), MessageError> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<(), MessageError> {
        for (key, element) in &self.entries {
            if key.is_empty() {
                return Err(MessageError::EmptyKey {
                    path: display_path(prefix),
                });
            }
            let path = join_path(prefix, key);
            if key.len() > MAX_KEY_LEN {
                return Err(MessageError::KeyTooLong {
                    len: key.len(),
                    path,
                });
            }
            match element {
                Element::Value(value) => check_value_len(&path, value)?,
                Element::List(items) => {
                    for item in items {
                        check_value_len(&path, item)?;
                    }
                }
                Element::Section(section) => section.validate_at(&path)?,
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = (&'a String, &'a Element);
    type IntoIter = btree_map::Iter<'a, String, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Element)> for Message {
    fn from_iter<I: IntoIterator<Item = (String, Element)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, element)) in self.entries.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            match element {
                Element::Value(value) => write!(f, "{key}={value}")?,
                Element::List(items) => write!(f, "{key}=[{}]", items.join(", "))?,
                Element::Section(section) => write!(f, "{key}={section}")?,
            }
        }
        write!(f, "}}")
    }
}

fn check_value_len(path: &str, value: &str) -> Result<(), MessageError> {
    if value.len() > MAX_VALUE_LEN {
        return Err(MessageError::ValueTooLong {
            path: path.to_string(),
            len: value.len(),
        });
    }
    Ok(())
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn display_path(prefix: &str) -> String {
    if prefix.is_empty() {
        "<root>".to_string()
    } else {
        prefix.to_string()
    }
}
