use std::fmt;
use std::sync::Arc;

use crate::nonce::{MAX_NONCE_LEN, NONCE_LEN};

/// The username, password and optional authorization identity used by a mechanism.
///
/// On the client these are what get sent; on the server, mechanisms fill one of these in from the
/// client's payload and hand it to the configured [`Permissions`] callback.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The authentication identity.
    pub username: Vec<u8>,
    /// The password, or bearer token for token-based mechanisms.
    pub password: Vec<u8>,
    /// The identity to act as. Empty means "the same as `username`".
    pub identity: Vec<u8>,
}

impl Credentials {
    /// Credentials without a separate authorization identity.
    pub fn new(username: impl Into<Vec<u8>>, password: impl Into<Vec<u8>>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
            identity: Vec::new(),
        }
    }

    /// Act as `identity` once authenticated.
    pub fn with_identity(mut self, identity: impl Into<Vec<u8>>) -> Self {
        self.identity = identity.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &String::from_utf8_lossy(&self.username))
            .field("password", &"<redacted>")
            .field("identity", &String::from_utf8_lossy(&self.identity))
            .finish()
    }
}

/// Server-side authorization check, consulted by mechanisms once they have extracted the client's
/// credentials. Returning `false` fails the exchange.
#[derive(Clone)]
pub struct Permissions(Arc<dyn Fn(&Credentials) -> bool + Send + Sync>);

impl Permissions {
    /// Wrap an authorization callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Credentials) -> bool + Send + Sync + 'static,
    {
        Permissions(Arc::new(f))
    }

    /// Ask the callback whether `credentials` may log in.
    pub fn allows(&self, credentials: &Credentials) -> bool {
        (self.0)(credentials)
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permissions(..)")
    }
}

/// Immutable negotiation settings handed to a [`Negotiator`](crate::Negotiator) at construction.
///
/// Mechanisms read it back through [`Negotiator::config`](crate::Negotiator::config).
///
/// ```
/// # use sasl::{Config, Credentials};
/// let config = Config::builder()
///     .credentials(Credentials::new("user", "pencil"))
///     .remote_mechanisms(["SCRAM-SHA-1-PLUS", "SCRAM-SHA-1", "PLAIN"])
///     .build();
/// assert_eq!(3, config.remote_mechanisms().len());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    credentials: Option<Credentials>,
    remote_mechanisms: Vec<String>,
    channel_binding: Option<Vec<u8>>,
    permissions: Option<Permissions>,
    nonce_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            credentials: None,
            remote_mechanisms: Vec::new(),
            channel_binding: None,
            permissions: None,
            nonce_len: NONCE_LEN,
        }
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The credentials to authenticate with, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The mechanisms the remote end advertised.
    pub fn remote_mechanisms(&self) -> &[String] {
        &self.remote_mechanisms
    }

    /// Channel-binding data supplied by the transport (e.g. `tls-exporter` output).
    pub fn channel_binding(&self) -> Option<&[u8]> {
        self.channel_binding.as_deref()
    }

    /// The server-side authorization callback, if any.
    pub fn permissions(&self) -> Option<&Permissions> {
        self.permissions.as_ref()
    }

    /// Length of the nonce generated for each exchange.
    pub fn nonce_len(&self) -> usize {
        self.nonce_len
    }

    /// Run the configured permissions check. With no callback configured, nobody is allowed in.
    pub(crate) fn permits(&self, credentials: &Credentials) -> bool {
        self.permissions
            .as_ref()
            .map_or(false, |p| p.allows(credentials))
    }
}

/// A builder for [`Config`] values.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Credentials the mechanism should authenticate with.
    pub fn credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// The mechanism names the remote end advertised, e.g. from an IMAP `CAPABILITY` response.
    pub fn remote_mechanisms<I, S>(&mut self, mechanisms: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.remote_mechanisms = mechanisms.into_iter().map(Into::into).collect();
        self
    }

    /// Channel-binding data for `-PLUS` mechanisms.
    pub fn channel_binding(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.config.channel_binding = Some(data.into());
        self
    }

    /// Authorization callback used when acting as a server.
    pub fn permissions<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Credentials) -> bool + Send + Sync + 'static,
    {
        self.config.permissions = Some(Permissions::new(f));
        self
    }

    /// Override the nonce length. The value is clamped to `1..=MAX_NONCE_LEN`.
    pub fn nonce_len(&mut self, len: usize) -> &mut Self {
        self.config.nonce_len = len.clamp(1, MAX_NONCE_LEN);
        self
    }

    /// Produce the configuration.
    pub fn build(&self) -> Config {
        self.config.clone()
    }
}
