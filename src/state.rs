use std::fmt;

/// The current phase of an exchange.
///
/// A negotiator walks these in order, one per successful [`step`](crate::Negotiator::step)
/// call. [`Step::ValidServerResponse`] is re-entrant: mechanisms that need more round trips keep
/// being called from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Nothing has been sent yet.
    Initial,
    /// The initial response has been produced.
    AuthTextSent,
    /// A response to the first challenge has been produced.
    ResponseSent,
    /// At least one further challenge has been answered.
    ValidServerResponse,
}

impl Step {
    /// The step a negotiator moves to after successfully completing this one.
    pub fn next(self) -> Step {
        match self {
            Step::Initial => Step::AuthTextSent,
            Step::AuthTextSent => Step::ResponseSent,
            Step::ResponseSent | Step::ValidServerResponse => Step::ValidServerResponse,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Initial => write!(f, "Initial"),
            Step::AuthTextSent => write!(f, "AuthTextSent"),
            Step::ResponseSent => write!(f, "ResponseSent"),
            Step::ValidServerResponse => write!(f, "ValidServerResponse"),
        }
    }
}

/// Which side of the exchange a negotiator plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The client. Produces the initial response through [`Mechanism::start`].
    ///
    /// [`Mechanism::start`]: crate::Mechanism::start
    Initiator,
    /// The server. Never calls [`Mechanism::start`]; the first payload it sees comes from the
    /// client.
    ///
    /// [`Mechanism::start`]: crate::Mechanism::start
    Responder,
}

/// A snapshot of a negotiator's state: the current [`Step`] plus a handful of flags.
///
/// Changing the step never touches the flags and vice versa. The errored flag is sticky: once
/// set, only a [reset](crate::Negotiator::reset) clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    step: Step,
    role: Role,
    remote_channel_binding: bool,
    errored: bool,
}

impl State {
    pub(crate) fn new(role: Role, remote_channel_binding: bool) -> Self {
        let mut state = State {
            step: Step::Initial,
            role,
            remote_channel_binding,
            errored: false,
        };
        state.reset();
        state
    }

    /// The current step of the exchange.
    pub fn step(&self) -> Step {
        self.step
    }

    /// The role this negotiator was created for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// True if this negotiator is the server side of the exchange.
    pub fn is_receiver(&self) -> bool {
        self.role == Role::Responder
    }

    /// True if the remote end advertised a channel-binding (`-PLUS`) variant of the selected
    /// mechanism.
    pub fn remote_channel_binding(&self) -> bool {
        self.remote_channel_binding
    }

    /// True if a previous step failed.
    pub fn errored(&self) -> bool {
        self.errored
    }

    pub(crate) fn advance(&mut self) {
        self.step = self.step.next();
    }

    pub(crate) fn set_errored(&mut self) {
        self.errored = true;
    }

    /// Responders skip [`Step::Initial`]: their first inbound payload already answers the
    /// "send first" phase.
    pub(crate) fn reset(&mut self) {
        self.errored = false;
        self.step = match self.role {
            Role::Initiator => Step::Initial,
            Role::Responder => Step::AuthTextSent,
        };
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step)?;
        if self.is_receiver() {
            write!(f, "|Receiving")?;
        }
        if self.remote_channel_binding {
            write!(f, "|RemoteCB")?;
        }
        if self.errored {
            write!(f, "|Errored")?;
        }
        Ok(())
    }
}
