//! Conversion of generic VICI messages back into the typed model.
//!
//! Omitted optional keys decode to `None` or an empty list. Keys the model
//! does not know are ignored.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use vici_message::{Element, Message};

use crate::model::{AuthConfig, ChildSaConfig, ConnectionSet, IkeConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("missing required key '{path}'")]
    MissingKey { path: String },
    #[error("expected {expected} at '{path}', found {found}")]
    WrongKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid value '{value}' at '{path}': {reason}")]
    InvalidValue {
        path: String,
        value: String,
        reason: String,
    },
}

/// Decode a `load-conn` message into connections keyed by name.
pub fn connections_from_message(msg: &Message) -> Result<ConnectionSet, DecodeError> {
    let mut connections = ConnectionSet::new();
    for (name, element) in msg {
        let section = expect_section(name, element)?;
        connections.insert(name.clone(), ike_from_message(section, name)?);
    }
    Ok(connections)
}

/// Decode one connection section; `path` prefixes key paths in errors.
pub fn ike_from_message(msg: &Message, path: &str) -> Result<IkeConfig, DecodeError> {
    let fields = Fields::new(msg, path);
    Ok(IkeConfig {
        local_addrs: fields.list("local_addrs")?,
        remote_addrs: fields.optional_list("remote_addrs")?,
        local_port: fields.optional_parsed("local_port")?,
        remote_port: fields.optional_parsed("remote_port")?,
        proposals: fields.optional_list("proposals")?,
        vips: fields.optional_list("vips")?,
        version: fields.parsed("version")?,
        encap: fields.flag("encap")?,
        keyingtries: fields.parsed("keyingtries")?,
        rekey_time: fields.value("rekey_time")?,
        dpd_delay: fields.optional_value("dpd_delay")?,
        local: auth_from_message(fields.section("local-1")?, &fields.path("local-1"))?,
        remote: auth_from_message(fields.section("remote-1")?, &fields.path("remote-1"))?,
        pools: fields.optional_list("pools")?,
        children: children_from_message(&fields)?,
        mobike: fields.optional_flag("mobike")?,
    })
}

fn children_from_message(
    fields: &Fields<'_>,
) -> Result<BTreeMap<String, ChildSaConfig>, DecodeError> {
    let children_path = fields.path("children");
    let mut children = BTreeMap::new();
    for (name, element) in fields.section("children")? {
        let child_path = format!("{children_path}.{name}");
        let section = expect_section(&child_path, element)?;
        children.insert(name.clone(), child_from_message(section, &child_path)?);
    }
    Ok(children)
}

pub fn auth_from_message(msg: &Message, path: &str) -> Result<AuthConfig, DecodeError> {
    let fields = Fields::new(msg, path);
    Ok(AuthConfig {
        id: fields.value("id")?,
        round: fields.optional_parsed("round")?,
        auth: fields.parsed("auth")?,
        eap_id: fields.optional_value("eap_id")?,
        pubkeys: fields.optional_list("pubkeys")?,
        certs: fields.optional_list("certs")?,
        class: fields.optional_value("class")?,
        cacerts: fields.optional_list("cacerts")?,
    })
}

pub fn child_from_message(msg: &Message, path: &str) -> Result<ChildSaConfig, DecodeError> {
    let fields = Fields::new(msg, path);
    Ok(ChildSaConfig {
        local_ts: fields.list("local-ts")?,
        remote_ts: fields.list("remote-ts")?,
        esp_proposals: fields.optional_list("esp_proposals")?,
        start_action: fields.parsed("start_action")?,
        close_action: fields.parsed("close_action")?,
        reqid: fields.optional_parsed("reqid")?,
        rekey_time: fields.value("rekey_time")?,
        replay_window: fields.optional_parsed("replay_window")?,
        mode: fields.parsed("mode")?,
        policies: fields.flag("policies")?,
        updown: fields.optional_value("updown")?,
        priority: fields.optional_parsed("priority")?,
        mark_in: fields.optional_value("mark_in")?,
        mark_out: fields.optional_value("mark_out")?,
        dpd_action: fields.optional_parsed("dpd_action")?,
        life_time: fields.optional_value("life_time")?,
    })
}

fn expect_section<'a>(path: &str, element: &'a Element) -> Result<&'a Message, DecodeError> {
    match element {
        Element::Section(section) => Ok(section),
        other => Err(DecodeError::WrongKind {
            path: path.to_string(),
            expected: "section",
            found: other.kind(),
        }),
    }
}

/// Typed accessors over one section, tracking the key path for errors.
struct Fields<'a> {
    msg: &'a Message,
    prefix: &'a str,
}

impl<'a> Fields<'a> {
    fn new(msg: &'a Message, prefix: &'a str) -> Self {
        Self { msg, prefix }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn get(&self, key: &str, expected: &'static str) -> Result<Option<&'a Element>, DecodeError> {
        match self.msg.get(key) {
            None => Ok(None),
            Some(element) if element.kind() == expected => Ok(Some(element)),
            Some(element) => Err(DecodeError::WrongKind {
                path: self.path(key),
                expected,
                found: element.kind(),
            }),
        }
    }

    fn missing(&self, key: &str) -> DecodeError {
        DecodeError::MissingKey {
            path: self.path(key),
        }
    }

    fn optional_value(&self, key: &str) -> Result<Option<String>, DecodeError> {
        match self.get(key, "value")? {
            Some(Element::Value(value)) => Ok(Some(value.clone())),
            _ => Ok(None),
        }
    }

    fn value(&self, key: &str) -> Result<String, DecodeError> {
        self.optional_value(key)?.ok_or_else(|| self.missing(key))
    }

    fn optional_list(&self, key: &str) -> Result<Vec<String>, DecodeError> {
        match self.get(key, "list")? {
            Some(Element::List(items)) => Ok(items.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn list(&self, key: &str) -> Result<Vec<String>, DecodeError> {
        match self.get(key, "list")? {
            Some(Element::List(items)) => Ok(items.clone()),
            _ => Err(self.missing(key)),
        }
    }

    fn section(&self, key: &str) -> Result<&'a Message, DecodeError> {
        match self.get(key, "section")? {
            Some(Element::Section(section)) => Ok(section),
            _ => Err(self.missing(key)),
        }
    }

    fn optional_parsed<T>(&self, key: &str) -> Result<Option<T>, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional_value(key)?
            .map(|raw| {
                raw.parse::<T>().map_err(|err| DecodeError::InvalidValue {
                    path: self.path(key),
                    reason: err.to_string(),
                    value: raw,
                })
            })
            .transpose()
    }

    fn parsed<T>(&self, key: &str) -> Result<T, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional_parsed(key)?.ok_or_else(|| self.missing(key))
    }

    fn optional_flag(&self, key: &str) -> Result<Option<bool>, DecodeError> {
        self.optional_value(key)?
            .map(|raw| match raw.as_str() {
                "yes" | "true" => Ok(true),
                "no" | "false" => Ok(false),
                _ => Err(DecodeError::InvalidValue {
                    path: self.path(key),
                    value: raw,
                    reason: "expected yes or no".to_string(),
                }),
            })
            .transpose()
    }

    fn flag(&self, key: &str) -> Result<bool, DecodeError> {
        self.optional_flag(key)?.ok_or_else(|| self.missing(key))
    }
}
