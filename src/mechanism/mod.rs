//! Pluggable SASL mechanisms.
//!
//! A [`Mechanism`] computes the bytes exchanged on each round; the [`Negotiator`] decides when it
//! gets called and takes care of base64 framing. Mechanisms are stateless and may be shared by any
//! number of negotiators. Whatever they need to remember between rounds of a single exchange goes
//! into the [`Cache`] they hand back, which the negotiator owns and threads into the next call.

use std::any::Any;

use crate::error::Result;
use crate::negotiator::Negotiator;

mod plain;
mod xoauth2;

pub use self::plain::Plain;
pub use self::xoauth2::XOAuth2;

/// Opaque per-exchange state produced by a mechanism.
///
/// Cleared whenever the negotiator is reset.
pub type Cache = Option<Box<dyn Any + Send>>;

/// The result of a successful mechanism call.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Whether the mechanism expects another round.
    pub more: bool,
    /// The raw (not yet encoded) bytes to send to the remote end.
    pub response: Vec<u8>,
    /// State to hand back on the next call.
    pub cache: Cache,
}

impl Outcome {
    /// An outcome with no cache.
    pub fn new(more: bool, response: impl Into<Vec<u8>>) -> Self {
        Outcome {
            more,
            response: response.into(),
            cache: None,
        }
    }

    /// Attach a cache value for the next round.
    pub fn with_cache<T: Any + Send>(mut self, cache: T) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }
}

/// The contract a SASL mechanism fulfils towards a [`Negotiator`].
///
/// The negotiator is passed in so that the mechanism can inspect its [`State`], [`Config`] and
/// nonce. The state seen by the mechanism is the one *before* the negotiator advances.
///
/// [`State`]: crate::State
/// [`Config`]: crate::Config
pub trait Mechanism: Send + Sync {
    /// The registered name of the mechanism, e.g. `PLAIN` or `SCRAM-SHA-256-PLUS`.
    fn name(&self) -> &str;

    /// Produce the initial response. Only ever called once per exchange, on the client.
    fn start(&self, negotiator: &Negotiator) -> Result<Outcome>;

    /// Answer `challenge`, given the cache returned by the previous call.
    fn next(&self, negotiator: &Negotiator, challenge: &[u8], cache: Cache) -> Result<Outcome>;
}
