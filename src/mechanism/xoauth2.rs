//! Bearer-token authentication as used by Gmail and Outlook.
//!
//! See <https://developers.google.com/gmail/imap/xoauth2-protocol>.

use super::{Cache, Mechanism, Outcome};
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::negotiator::Negotiator;
use crate::state::Step;

/// Sends `user=<username>^Aauth=Bearer <token>^A^A`, taking the token from the configured
/// credentials' password.
///
/// When the server rejects the token it replies with a JSON error challenge, which the client
/// must answer with an empty response before the server fails the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct XOAuth2;

const BEARER: &[u8] = b"auth=Bearer ";

impl Mechanism for XOAuth2 {
    fn name(&self) -> &str {
        "XOAUTH2"
    }

    fn start(&self, negotiator: &Negotiator) -> Result<Outcome> {
        let creds = negotiator
            .config()
            .credentials()
            .ok_or(Error::MissingCredentials)?;

        let mut payload = b"user=".to_vec();
        payload.extend_from_slice(&creds.username);
        payload.push(1);
        payload.extend_from_slice(BEARER);
        payload.extend_from_slice(&creds.password);
        payload.extend_from_slice(b"\x01\x01");
        Ok(Outcome::new(true, payload))
    }

    fn next(&self, negotiator: &Negotiator, challenge: &[u8], _: Cache) -> Result<Outcome> {
        let state = negotiator.state();
        if state.step() != Step::AuthTextSent {
            return Err(Error::TooManySteps);
        }
        if !state.is_receiver() {
            // error challenge; acknowledge it so the server can finish
            return Ok(Outcome::default());
        }

        let creds = parse(challenge).ok_or(Error::InvalidChallenge)?;
        if negotiator.config().permits(&creds) {
            Ok(Outcome::default())
        } else {
            Err(Error::AuthenticationFailed)
        }
    }
}

fn parse(msg: &[u8]) -> Option<Credentials> {
    let body = msg.strip_suffix(b"\x01\x01")?;
    let mut fields = body.split(|&b| b == 1);
    let user = fields.next()?.strip_prefix(b"user=")?;
    let token = fields.next()?.strip_prefix(BEARER)?;
    if fields.next().is_some() {
        return None;
    }
    Some(Credentials::new(user, token))
}
