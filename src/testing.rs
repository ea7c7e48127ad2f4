//! Enable the test_helpers feature to expose a scripted [`Mechanism`] for testing code that drives
//! a [`Negotiator`](crate::Negotiator), such as a transport's `AUTHENTICATE` loop.
//!
//! To use add a dev-dependency on sasl with the feature "test_helpers"
//! e.g.
//!
//! ```toml
//! [dependencies]
//! sasl = { version = "0.1" }
//!
//! [dev-dependencies]
//! # mirror the same configuration your dependencies and add test_helpers
//! sasl = { version = "0.1", features = ["test_helpers"] }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::mechanism::{Cache, Mechanism, Outcome};
use crate::negotiator::Negotiator;
use crate::state::Step;

/// One call a [`Scripted`] mechanism received.
#[derive(Debug)]
pub struct Call {
    /// The decoded challenge, or `None` for a call to [`Mechanism::start`].
    pub challenge: Option<Vec<u8>>,
    /// The cache the negotiator handed in.
    pub cache: Cache,
    /// The negotiator's step at the time of the call.
    pub step: Step,
    /// The negotiator's nonce at the time of the call.
    pub nonce: Vec<u8>,
}

/// A mechanism that replays queued results and records every call it gets.
///
/// ```
/// # use std::sync::Arc;
/// # use sasl::{Config, Negotiator, Outcome, encoding};
/// # use sasl::testing::Scripted;
/// let mechanism = Scripted::new("X-TEST").then(Ok(Outcome::new(true, "hello")));
/// let calls = mechanism.calls();
/// let mut client = Negotiator::client(Arc::new(mechanism), Config::default());
///
/// let (more, resp) = client.step(b"").unwrap();
/// assert!(more);
/// assert_eq!(encoding::encode(b"hello"), resp);
/// assert_eq!(1, calls.lock().unwrap().len());
/// ```
#[derive(Debug)]
pub struct Scripted {
    name: String,
    script: Mutex<VecDeque<Result<Outcome>>>,
    always: Option<(bool, Vec<u8>)>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Scripted {
    /// A mechanism called `name` with an empty script. Calls past the end of the script fail with
    /// [`Error::TooManySteps`] unless [`always`](Self::always) is set.
    pub fn new(name: impl Into<String>) -> Self {
        Scripted {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            always: None,
            calls: Arc::default(),
        }
    }

    /// Queue the result of the next call.
    pub fn then(self, result: Result<Outcome>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
        self
    }

    /// Answer every call past the end of the script with `(more, response)`.
    pub fn always(mut self, more: bool, response: impl Into<Vec<u8>>) -> Self {
        self.always = Some((more, response.into()));
        self
    }

    /// A handle on the calls recorded so far.
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn answer(
        &self,
        negotiator: &Negotiator,
        challenge: Option<&[u8]>,
        cache: Cache,
    ) -> Result<Outcome> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                challenge: challenge.map(<[u8]>::to_vec),
                cache,
                step: negotiator.state().step(),
                nonce: negotiator.nonce().to_vec(),
            });

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match (next, &self.always) {
            (Some(result), _) => result,
            (None, Some((more, response))) => Ok(Outcome::new(*more, response.clone())),
            (None, None) => Err(Error::TooManySteps),
        }
    }
}

impl Mechanism for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self, negotiator: &Negotiator) -> Result<Outcome> {
        self.answer(negotiator, None, None)
    }

    fn next(&self, negotiator: &Negotiator, challenge: &[u8], cache: Cache) -> Result<Outcome> {
        self.answer(negotiator, Some(challenge), cache)
    }
}
