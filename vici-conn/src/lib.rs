//! Typed strongSwan VICI connection configuration and the `load-conn`
//! request adapter.
//!
//! # Architecture
//!
//! - [`model`] — IKE connection, authentication round, child SA and shared
//!   secret records
//! - [`encode`] / [`decode`] — explicit field-to-key conversion between the
//!   model and generic [`vici_message::Message`] trees
//! - [`credentials`] — PEM encoding of public keys and certificates
//! - [`session`] — the [`session::Session`] boundary to an established VICI
//!   connection, and reply decoding
//! - [`client`] — submits connections and secrets, one request per call
//! - [`config`] — TOML configuration files
//! - [`verify`] — optional local consistency report
//! - [`report`] — terminal rendering
//!
//! # Examples
//!
//! ```ignore
//! use vici_conn::client::Client;
//! use vici_conn::config::load_config;
//!
//! let config = load_config("swanctl.toml".as_ref())?;
//! let mut client = Client::new(session);
//! client.load_conn(&config.connections)?;
//! ```
//!
//! The socket transport and VICI binary encoding are not part of this
//! crate; callers provide a [`session::Session`].

pub mod client;
pub mod config;
pub mod credentials;
pub mod decode;
pub mod encode;
pub mod model;
pub mod report;
pub mod session;
pub mod verify;
