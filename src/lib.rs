//! A SASL negotiation state machine for Rust.
//!
//! This crate drives a challenge/response authentication exchange for either side of the
//! connection. A [`Negotiator`] sequences calls into a pluggable [`Mechanism`], tracks which step
//! of the exchange it is at, manages a per-exchange nonce, and base64 encodes and decodes every
//! payload. Delivering challenges and responses over the wire is left to the caller.
//!
//! # Usage
//!
//! Here is a client and a server authenticating each other with `PLAIN`. In a real application,
//! each response would be written to the connection (e.g. as an IMAP continuation line) and each
//! challenge read back from it.
//!
//! ```
//! use std::sync::Arc;
//! use sasl::{Config, Credentials, Negotiator, Plain};
//!
//! # fn main() -> sasl::Result<()> {
//! let plain = Arc::new(Plain);
//!
//! let client_config = Config::builder()
//!     .credentials(Credentials::new("user", "pencil"))
//!     .remote_mechanisms(["SCRAM-SHA-256", "PLAIN"])
//!     .build();
//! let mut client = Negotiator::client(plain.clone(), client_config);
//!
//! let server_config = Config::builder()
//!     .permissions(|creds| creds.username == b"user" && creds.password == b"pencil")
//!     .build();
//! let mut server = Negotiator::server(plain, server_config);
//!
//! let (_, initial_response) = client.step(b"")?;
//! let (more, _) = server.step(&initial_response)?;
//! assert!(!more);
//!
//! // both sides can be reused for another exchange
//! client.reset();
//! server.reset();
//! # Ok(())
//! # }
//! ```
//!
//! Custom mechanisms implement the [`Mechanism`] trait; anything they need to remember between
//! rounds is returned as part of their [`Outcome`] and handed back on the next call.

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod config;
mod negotiator;
mod nonce;
mod state;

pub mod encoding;
pub mod error;
pub mod mechanism;

#[cfg(any(test, feature = "test_helpers"))]
pub mod testing;

pub use crate::config::{Config, ConfigBuilder, Credentials, Permissions};
pub use crate::error::{Error, Result};
pub use crate::mechanism::{Cache, Mechanism, Outcome, Plain, XOAuth2};
pub use crate::negotiator::Negotiator;
pub use crate::nonce::{MAX_NONCE_LEN, NONCE_LEN};
pub use crate::state::{Role, State, Step};
