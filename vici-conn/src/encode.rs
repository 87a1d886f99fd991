//! Conversion of the typed model into generic VICI messages.
//!
//! Each builder lists its record's field-to-key table explicitly. Required
//! keys are always written; unset optional fields are skipped.

use thiserror::Error;
use vici_message::{Message, MessageError};

use crate::model::{AuthConfig, ChildSaConfig, ConnectionSet, IkeConfig, SharedSecret};

/// Errors building a request message from typed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("connection name must not be empty")]
    EmptyConnectionName,
    #[error("child SA name in connection '{connection}' must not be empty")]
    EmptyChildName { connection: String },
    #[error("request exceeds VICI limits: {0}")]
    Limits(#[from] MessageError),
}

/// Build the `load-conn` message: one section per connection name.
pub fn connections_message(connections: &ConnectionSet) -> Result<Message, EncodeError> {
    let mut msg = Message::new();
    for (name, conn) in connections {
        if name.is_empty() {
            return Err(EncodeError::EmptyConnectionName);
        }
        if conn.children.keys().any(String::is_empty) {
            return Err(EncodeError::EmptyChildName {
                connection: name.clone(),
            });
        }
        msg.insert_section(name.as_str(), ike_message(conn));
    }
    msg.validate()?;
    Ok(msg)
}

/// Build the section describing one IKE connection.
pub fn ike_message(conn: &IkeConfig) -> Message {
    let mut msg = Message::new();
    msg.insert_list("local_addrs", conn.local_addrs.iter().cloned());
    msg.insert_nonempty_list("remote_addrs", &conn.remote_addrs);
    msg.insert_optional("local_port", conn.local_port);
    msg.insert_optional("remote_port", conn.remote_port);
    msg.insert_nonempty_list("proposals", &conn.proposals);
    msg.insert_nonempty_list("vips", &conn.vips);
    msg.insert_value("version", conn.version.as_str());
    msg.insert_value("encap", yes_no(conn.encap));
    msg.insert_value("keyingtries", conn.keyingtries.to_string());
    msg.insert_value("rekey_time", conn.rekey_time.as_str());
    msg.insert_optional("dpd_delay", conn.dpd_delay.as_deref());
    msg.insert_section("local-1", auth_message(&conn.local));
    msg.insert_section("remote-1", auth_message(&conn.remote));
    msg.insert_nonempty_list("pools", &conn.pools);

    let mut children = Message::new();
    for (name, child) in &conn.children {
        children.insert_section(name.as_str(), child_message(child));
    }
    msg.insert_section("children", children);

    msg.insert_optional("mobike", conn.mobike.map(yes_no));
    msg
}

/// Build the section describing one authentication round.
pub fn auth_message(auth: &AuthConfig) -> Message {
    let mut msg = Message::new();
    msg.insert_value("id", auth.id.as_str());
    msg.insert_optional("round", auth.round);
    msg.insert_value("auth", auth.auth.to_string());
    msg.insert_optional("eap_id", auth.eap_id.as_deref());
    msg.insert_nonempty_list("pubkeys", &auth.pubkeys);
    msg.insert_nonempty_list("certs", &auth.certs);
    msg.insert_optional("class", auth.class.as_deref());
    msg.insert_nonempty_list("cacerts", &auth.cacerts);
    msg
}

/// Build the section describing one child SA.
pub fn child_message(child: &ChildSaConfig) -> Message {
    let mut msg = Message::new();
    msg.insert_list("local-ts", child.local_ts.iter().cloned());
    msg.insert_list("remote-ts", child.remote_ts.iter().cloned());
    msg.insert_nonempty_list("esp_proposals", &child.esp_proposals);
    msg.insert_value("start_action", child.start_action.as_str());
    msg.insert_value("close_action", child.close_action.as_str());
    msg.insert_optional("reqid", child.reqid);
    msg.insert_value("rekey_time", child.rekey_time.as_str());
    msg.insert_optional("replay_window", child.replay_window);
    msg.insert_value("mode", child.mode.as_str());
    msg.insert_value("policies", yes_no(child.policies));
    msg.insert_optional("updown", child.updown.as_deref());
    msg.insert_optional("priority", child.priority);
    msg.insert_optional("mark_in", child.mark_in.as_deref());
    msg.insert_optional("mark_out", child.mark_out.as_deref());
    msg.insert_optional("dpd_action", child.dpd_action.map(|action| action.as_str()));
    msg.insert_optional("life_time", child.life_time.as_deref());
    msg
}

/// Build the `unload-conn` message for the connection loaded as `name`.
pub fn unload_message(name: &str) -> Result<Message, EncodeError> {
    if name.is_empty() {
        return Err(EncodeError::EmptyConnectionName);
    }
    let mut msg = Message::new();
    msg.insert_value("name", name);
    msg.validate()?;
    Ok(msg)
}

/// Build the `load-shared` message for one secret.
pub fn shared_message(secret: &SharedSecret) -> Result<Message, EncodeError> {
    let mut msg = Message::new();
    msg.insert_optional("id", secret.id.as_deref());
    msg.insert_value("type", secret.kind.as_str());
    msg.insert_value("data", secret.data.as_str());
    msg.insert_nonempty_list("owners", &secret.owners);
    msg.validate()?;
    Ok(msg)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
