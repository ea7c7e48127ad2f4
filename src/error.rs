//! Errors that can be returned while stepping a [`Negotiator`](crate::Negotiator).

use std::error::Error as StdError;
use std::result;

use base64::DecodeError;
use thiserror::Error;

/// A convenience wrapper around `Result` for `sasl::Error`.
pub type Result<T> = result::Result<T, Error>;

/// A set of errors that can occur during a SASL exchange.
///
/// Every variant is terminal for the exchange it was produced in: the negotiator latches its
/// errored flag, and it must be [reset](crate::Negotiator::reset) before it can be stepped again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The challenge handed to [`Negotiator::step`](crate::Negotiator::step) was not valid
    /// base64.
    #[error("unable to decode challenge: {0}")]
    Decode(#[from] DecodeError),
    /// The mechanism was called more times than the exchange allows.
    #[error("sasl: too many steps")]
    TooManySteps,
    /// The challenge was well-formed base64, but its contents did not match what the mechanism
    /// expects.
    #[error("sasl: invalid challenge")]
    InvalidChallenge,
    /// The responder rejected the supplied credentials.
    #[error("sasl: authentication failed")]
    AuthenticationFailed,
    /// The mechanism needs credentials but none were configured.
    #[error("sasl: no credentials configured")]
    MissingCredentials,
    /// Any other failure reported by a mechanism.
    #[error("mechanism error: {0}")]
    Mechanism(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary mechanism failure.
    pub fn mechanism<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::Mechanism(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn mechanism_error_keeps_source() {
        let err = Error::mechanism("server said no");
        assert_eq!(err.to_string(), "mechanism error: server said no");
        assert!(err.source().is_some());
    }

    #[test]
    fn decode_error_converts() {
        let decode = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .unwrap_err();
        let err: Error = decode.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
