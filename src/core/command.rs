//! Commands: immutable tagged intents submitted to a container.
//!
//! Plain intents are [`Action`] values. Intents that carry executable logic
//! are [`Procedure`] values; they never reach the transition function
//! directly but are run by the [`procedures`](crate::interceptors::procedures)
//! interceptor, which lets them dispatch ordinary actions now or later.

use crate::container::StoreHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tagged value describing an intent, with an optional payload.
///
/// Equality is structural. The default payload type is `serde_json::Value`,
/// which accepts any JSON-shaped data.
///
/// # Example
///
/// ```rust
/// use statecell::core::Action;
/// use serde_json::json;
///
/// let add: Action = Action::with_payload("ADD", json!({ "amount": 5 }));
/// assert_eq!(add.tag, "ADD");
///
/// let parsed: Action = serde_json::from_str(r#"{"tag":"ADD","payload":{"amount":5}}"#).unwrap();
/// assert_eq!(parsed, add);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action<P = serde_json::Value> {
    /// Intent discriminator
    pub tag: String,
    /// Optional data accompanying the intent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
}

impl<P> Action<P> {
    /// Create an action without a payload.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            payload: None,
        }
    }

    /// Create an action carrying a payload.
    pub fn with_payload(tag: impl Into<String>, payload: P) -> Self {
        Self {
            tag: tag.into(),
            payload: Some(payload),
        }
    }

    /// Check the tag without allocating.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

type ProcedureBody<S, P> = Box<dyn FnOnce(&StoreHandle<S, P>)>;

/// A command whose payload is executable logic.
///
/// The body receives a [`StoreHandle`] giving it `dispatch` and `get_state`.
/// It may dispatch immediately, keep a clone of the handle to dispatch
/// later (from a timer callback, say), or never dispatch at all.
pub struct Procedure<S, P = serde_json::Value> {
    tag: String,
    body: ProcedureBody<S, P>,
}

impl<S, P> Procedure<S, P> {
    pub fn new<F>(tag: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(&StoreHandle<S, P>) + 'static,
    {
        Self {
            tag: tag.into(),
            body: Box::new(body),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Consume the procedure, running its body once.
    pub fn invoke(self, store: &StoreHandle<S, P>) {
        (self.body)(store)
    }
}

impl<S, P> fmt::Debug for Procedure<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Everything that can be dispatched to a container.
pub enum Command<S, P = serde_json::Value> {
    /// Plain intent, handled by the transition function
    Action(Action<P>),

    /// Executable intent, handled by the `procedures` interceptor
    Procedure(Procedure<S, P>),
}

impl<S, P> Command<S, P> {
    /// Plain command with no payload.
    pub fn action(tag: impl Into<String>) -> Self {
        Self::Action(Action::new(tag))
    }

    /// Plain command with a payload.
    pub fn with_payload(tag: impl Into<String>, payload: P) -> Self {
        Self::Action(Action::with_payload(tag, payload))
    }

    /// Procedure command.
    pub fn procedure<F>(tag: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(&StoreHandle<S, P>) + 'static,
    {
        Self::Procedure(Procedure::new(tag, body))
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Action(action) => &action.tag,
            Self::Procedure(procedure) => procedure.tag(),
        }
    }

    pub fn as_action(&self) -> Option<&Action<P>> {
        match self {
            Self::Action(action) => Some(action),
            Self::Procedure(_) => None,
        }
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Self::Procedure(_))
    }
}

impl<S, P> From<Action<P>> for Command<S, P> {
    fn from(action: Action<P>) -> Self {
        Self::Action(action)
    }
}

impl<S, P: fmt::Debug> fmt::Debug for Command<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::Procedure(procedure) => f.debug_tuple("Procedure").field(procedure).finish(),
        }
    }
}
