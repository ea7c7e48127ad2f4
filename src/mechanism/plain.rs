//! The `PLAIN` mechanism from [RFC 4616](https://tools.ietf.org/html/rfc4616).

use super::{Cache, Mechanism, Outcome};
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::negotiator::Negotiator;
use crate::state::Step;

/// Sends `identity NUL username NUL password` in a single message.
///
/// As a server, the client's message is split back into [`Credentials`] and checked against the
/// configured [`Permissions`](crate::Permissions).
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Mechanism for Plain {
    fn name(&self) -> &str {
        "PLAIN"
    }

    fn start(&self, negotiator: &Negotiator) -> Result<Outcome> {
        let creds = negotiator
            .config()
            .credentials()
            .ok_or(Error::MissingCredentials)?;

        let mut payload = Vec::with_capacity(
            creds.identity.len() + creds.username.len() + creds.password.len() + 2,
        );
        payload.extend_from_slice(&creds.identity);
        payload.push(0);
        payload.extend_from_slice(&creds.username);
        payload.push(0);
        payload.extend_from_slice(&creds.password);
        Ok(Outcome::new(false, payload))
    }

    fn next(&self, negotiator: &Negotiator, challenge: &[u8], _: Cache) -> Result<Outcome> {
        // A client never gets a challenge, and a server only ever reads one message.
        let state = negotiator.state();
        if !state.is_receiver() || state.step() != Step::AuthTextSent {
            return Err(Error::TooManySteps);
        }

        let mut parts = challenge.split(|&b| b == 0);
        let (identity, username, password) = match (parts.next(), parts.next(), parts.next()) {
            (Some(i), Some(u), Some(p)) if parts.next().is_none() => (i, u, p),
            _ => return Err(Error::InvalidChallenge),
        };

        let creds = Credentials::new(username, password).with_identity(identity);
        if negotiator.config().permits(&creds) {
            Ok(Outcome::default())
        } else {
            Err(Error::AuthenticationFailed)
        }
    }
}
