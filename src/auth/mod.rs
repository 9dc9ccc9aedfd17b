//! Email/password identity provider and local session keeping.
//!
//! The scan pipeline never needs a session; these are used by the `auth`
//! commands only.

mod client;
mod types;
mod vault;

pub use client::{AuthClient, IdentityToolkitClient, DEFAULT_AUTH_ENDPOINT};
pub use types::{AuthSession, SignUpRequest, StoredSession};
pub use vault::SessionVault;
