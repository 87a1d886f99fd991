//! Request adapter submitting typed configuration to a [`Session`].

use thiserror::Error;
use tracing::{debug, info, warn};
use vici_message::Message;

use crate::encode::{connections_message, shared_message, unload_message, EncodeError};
use crate::model::{ConnectionSet, SharedSecret};
use crate::session::{Response, Session, SessionError};

pub const LOAD_CONN: &str = "load-conn";
pub const UNLOAD_CONN: &str = "unload-conn";
pub const LOAD_SHARED: &str = "load-shared";

/// Failure of one command, by stage.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The request could not be built; nothing was sent.
    #[error("error creating {command} request: {source}")]
    Encode {
        command: &'static str,
        source: EncodeError,
    },
    #[error("{command} request failed: {source}")]
    Transport {
        command: &'static str,
        source: SessionError,
    },
    /// The daemon answered without `success = yes`.
    #[error("unsuccessful {command}: {message}")]
    Rejected {
        command: &'static str,
        message: String,
    },
}

/// Issues configuration commands over a session, one request per call.
#[derive(Debug)]
pub struct Client<S> {
    session: S,
}

impl<S: Session> Client<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_inner(self) -> S {
        self.session
    }

    /// Load (or replace) every connection in `connections`.
    ///
    /// An empty set still sends one empty `load-conn` request. The daemon
    /// may have applied part of the set when it reports failure.
    pub fn load_conn(&mut self, connections: &ConnectionSet) -> Result<(), CommandError> {
        let msg = connections_message(connections).map_err(|source| CommandError::Encode {
            command: LOAD_CONN,
            source,
        })?;
        debug!(connections = connections.len(), "built load-conn request");
        self.submit(LOAD_CONN, msg)?;
        info!(connections = connections.len(), "connections loaded");
        Ok(())
    }

    /// Unload the connection loaded under `name`.
    pub fn unload_conn(&mut self, name: &str) -> Result<(), CommandError> {
        let msg = unload_message(name).map_err(|source| CommandError::Encode {
            command: UNLOAD_CONN,
            source,
        })?;
        self.submit(UNLOAD_CONN, msg)?;
        info!(connection = name, "connection unloaded");
        Ok(())
    }

    /// Load one shared secret.
    pub fn load_shared(&mut self, secret: &SharedSecret) -> Result<(), CommandError> {
        let msg = shared_message(secret).map_err(|source| CommandError::Encode {
            command: LOAD_SHARED,
            source,
        })?;
        self.submit(LOAD_SHARED, msg)?;
        info!(kind = %secret.kind, owners = secret.owners.len(), "shared secret loaded");
        Ok(())
    }

    fn submit(&mut self, command: &'static str, msg: Message) -> Result<(), CommandError> {
        debug!(command, "sending request");
        let reply = self
            .session
            .request(command, msg)
            .map_err(|source| CommandError::Transport { command, source })?;

        match Response::from_message(&reply) {
            Response::Success => Ok(()),
            Response::Failure(message) => {
                warn!(command, errmsg = %message, "daemon rejected request");
                Err(CommandError::Rejected { command, message })
            }
        }
    }
}
