use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use tracing::{debug, trace};

use crate::config::Config;
use crate::encoding;
use crate::error::Result;
use crate::mechanism::{Cache, Mechanism, Outcome};
use crate::nonce;
use crate::state::{Role, State, Step};

/// Suffix of mechanism names that bind the exchange to the underlying TLS channel.
const CHANNEL_BINDING_SUFFIX: &str = "-PLUS";

/// A SASL client or server state machine driving a single [`Mechanism`].
///
/// Feed each base64 challenge coming off the wire to [`step`](Self::step) and send back what it
/// returns. Once an exchange has finished (successfully or not) the negotiator must be
/// [`reset`](Self::reset) before it is used for another one.
///
/// A `Negotiator` is not meant to be shared between threads; use one per exchange. The mechanism
/// itself is shared and may back any number of negotiators.
///
/// ```
/// # use std::sync::Arc;
/// # use sasl::{Config, Credentials, Negotiator, Plain};
/// # fn main() -> sasl::Result<()> {
/// let config = Config::builder()
///     .credentials(Credentials::new("user", "pencil"))
///     .build();
/// let mut client = Negotiator::client(Arc::new(Plain), config);
///
/// let (more, response) = client.step(b"")?;
/// assert!(!more);
/// assert_eq!(b"AHVzZXIAcGVuY2ls", &response[..]);
/// # Ok(())
/// # }
/// ```
pub struct Negotiator {
    config: Config,
    mechanism: Arc<dyn Mechanism>,
    state: State,
    nonce: Vec<u8>,
    cache: Cache,
}

impl Negotiator {
    /// Create a negotiator playing `role` with the given mechanism.
    ///
    /// If the configured remote mechanisms contain this mechanism's name and that name denotes a
    /// channel-binding variant, the remote end is recorded as supporting channel binding.
    pub fn new(mechanism: Arc<dyn Mechanism>, config: Config, role: Role) -> Self {
        let name = mechanism.name();
        let remote_cb = name.ends_with(CHANNEL_BINDING_SUFFIX)
            && config.remote_mechanisms().iter().any(|remote| remote == name);

        let nonce = nonce::generate(&mut OsRng, config.nonce_len());
        Negotiator {
            state: State::new(role, remote_cb),
            config,
            mechanism,
            nonce,
            cache: None,
        }
    }

    /// Create a client (initiator) negotiator.
    pub fn client(mechanism: Arc<dyn Mechanism>, config: Config) -> Self {
        Self::new(mechanism, config, Role::Initiator)
    }

    /// Create a server (responder) negotiator. It starts at [`Step::AuthTextSent`], since servers
    /// never produce an initial response.
    pub fn server(mechanism: Arc<dyn Mechanism>, config: Config) -> Self {
        Self::new(mechanism, config, Role::Responder)
    }

    /// Advance the state machine with a base64 encoded `challenge`.
    ///
    /// Returns whether the mechanism expects another round, along with the base64 encoded response
    /// to send. Even when `more` is `false` the step still advances; deciding to stop is up to the
    /// caller.
    ///
    /// Any error latches the negotiator into an errored state and no response is produced. The
    /// step is left where the failed call found it.
    ///
    /// # Panics
    ///
    /// Panics if called after a previous call returned an error and the negotiator has not been
    /// [`reset`](Self::reset) since.
    pub fn step(&mut self, challenge: &[u8]) -> Result<(bool, Vec<u8>)> {
        assert!(
            !self.state.errored(),
            "sasl: step called on a negotiator that has errored"
        );

        match self.dispatch(challenge) {
            Ok(outcome) => {
                let from = self.state.step();
                self.state.advance();
                self.cache = outcome.cache;
                debug!(
                    mechanism = self.mechanism.name(),
                    %from,
                    to = %self.state.step(),
                    more = outcome.more,
                    "sasl step"
                );
                Ok((outcome.more, encoding::encode(&outcome.response)))
            }
            Err(e) => {
                self.state.set_errored();
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, challenge: &[u8]) -> Result<Outcome> {
        let challenge = encoding::decode(challenge)?;
        let cache = self.cache.take();
        match self.state.step() {
            Step::Initial => self.mechanism.start(self),
            Step::AuthTextSent | Step::ResponseSent | Step::ValidServerResponse => {
                self.mechanism.next(self, &challenge, cache)
            }
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The configuration this negotiator was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The nonce for the current exchange. A fresh one is generated on every reset.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// The name of the mechanism being negotiated, e.g. for an `AUTHENTICATE` command.
    pub fn mechanism_name(&self) -> &str {
        self.mechanism.name()
    }

    /// Return the negotiator to the start of an exchange so it can be reused.
    ///
    /// Clears the errored flag, the step, and any mechanism cache, and generates a fresh nonce.
    /// The role and channel-binding capability are kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.nonce = nonce::generate(&mut OsRng, self.config.nonce_len());
        self.cache = None;
        trace!(mechanism = self.mechanism.name(), state = %self.state, "sasl reset");
    }
}

impl fmt::Debug for Negotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Negotiator")
            .field("mechanism", &self.mechanism.name())
            .field("state", &self.state)
            .field("config", &self.config)
            .field("nonce", &String::from_utf8_lossy(&self.nonce))
            .field("cache", &self.cache.is_some())
            .finish()
    }
}
