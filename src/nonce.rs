use rand::distributions::Alphanumeric;
use rand::{CryptoRng, Rng, RngCore};

/// Length of the nonce token generated for each exchange unless the configuration overrides it.
pub const NONCE_LEN: usize = 24;

/// Upper bound on a configured nonce length.
pub const MAX_NONCE_LEN: usize = 1024;

/// Generate a nonce token of exactly `len` characters.
///
/// The token only uses `[A-Za-z0-9]`, so it can be embedded verbatim in mechanism messages
/// (SCRAM forbids `,` in nonces, for instance). Only cryptographically secure generators are
/// accepted.
pub(crate) fn generate<R>(rng: &mut R, len: usize) -> Vec<u8>
where
    R: RngCore + CryptoRng,
{
    rng.sample_iter(&Alphanumeric).take(len).collect()
}
