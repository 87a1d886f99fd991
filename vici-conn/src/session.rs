//! Boundary to the VICI session that carries requests to the daemon.

use thiserror::Error;
use vici_message::Message;

/// Transport failure reported by a [`Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("VICI session I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// An established VICI session able to run one command request and return
/// the daemon's reply.
///
/// Framing, socket handling and timeouts belong to the implementor.
pub trait Session {
    fn request(&mut self, command: &str, message: Message) -> Result<Message, SessionError>;
}

impl<S: Session + ?Sized> Session for &mut S {
    fn request(&mut self, command: &str, message: Message) -> Result<Message, SessionError> {
        (**self).request(command, message)
    }
}

/// Outcome of a command, decoded once from the reply's `success` and
/// `errmsg` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success,
    /// Daemon error message, empty when the reply carried none.
    Failure(String),
}

impl Response {
    /// Only a literal `success = yes` counts as success.
    pub fn from_message(reply: &Message) -> Self {
        if reply.value("success") == Some("yes") {
            Response::Success
        } else {
            Response::Failure(reply.value("errmsg").unwrap_or_default().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use vici_message::Message;

    use super::Response;

    fn reply(pairs: &[(&str, &str)]) -> Message {
        let mut msg = Message::new();
        for (key, value) in pairs {
            msg.insert_value(*key, *value);
        }
        msg
    }

    #[test]
    fn only_literal_yes_is_success() {
        assert_eq!(
            Response::from_message(&reply(&[("success", "yes")])),
            Response::Success
        );
        assert_eq!(
            Response::from_message(&reply(&[("success", "YES")])),
            Response::Failure(String::new())
        );
        assert_eq!(
            Response::from_message(&reply(&[])),
            Response::Failure(String::new())
        );
        assert_eq!(
            Response::from_message(&reply(&[("success", "no"), ("errmsg", "parse error")])),
            Response::Failure("parse error".to_string())
        );
    }

    #[test]
    fn list_shaped_success_is_failure() {
        let mut msg = Message::new();
        msg.insert_list("success", ["yes"]);
        assert_eq!(
            Response::from_message(&msg),
            Response::Failure(String::new())
        );
    }
}
