//! Typed description of IKE connections as the VICI `load-conn` command
//! expects them.
//!
//! Unset optional fields (`None`, empty optional lists) mean "use the
//! daemon default" and are never sent. No field is validated here; see
//! [`crate::verify`] for optional local checks.

use std::collections::BTreeMap;

mod auth;
mod child;
mod ike;
mod keywords;
mod shared;

pub use auth::AuthConfig;
pub use child::ChildSaConfig;
pub use ike::IkeConfig;
pub use keywords::{
    AuthMethod, CloseAction, DpdAction, IkeVersion, Mode, SecretKind, StartAction, UnknownKeyword,
};
pub use shared::SharedSecret;

/// Connections keyed by the name they are loaded under.
pub type ConnectionSet = BTreeMap<String, IkeConfig>;
