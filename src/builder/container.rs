//! Builder for constructing state containers.

use crate::builder::error::{ConfigIssue, ConfigurationError};
use crate::container::{Interceptor, NotifyPolicy, StateContainer};
use crate::core::{State, Transition};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigIssue>>;

/// Builder for constructing state containers with a fluent API.
///
/// # Example
///
/// ```rust
/// use statecell::builder::ContainerBuilder;
/// use statecell::core::{Action, Transition};
/// use statecell::interceptors::{logger, procedures};
/// use statecell::NotifyPolicy;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// let container = ContainerBuilder::new()
///     .initial(Counter { count: 0 })
///     .transition(Transition::new(|state: &Counter, _action: &Action| state.clone()))
///     .interceptor(logger())
///     .interceptor(procedures())
///     .notify(NotifyPolicy::OnChange)
///     .build()
///     .unwrap();
///
/// assert_eq!(container.get_state().count, 0);
/// ```
pub struct ContainerBuilder<S, P = serde_json::Value> {
    initial: Option<S>,
    transition: Option<Transition<S, P>>,
    interceptors: Vec<Box<dyn Interceptor<S, P>>>,
    notify: NotifyPolicy,
}

impl<S: State, P: 'static> ContainerBuilder<S, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transition: None,
            interceptors: Vec::new(),
            notify: NotifyPolicy::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the transition function (required).
    pub fn transition(mut self, transition: Transition<S, P>) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Append an interceptor. Earlier registrations wrap later ones.
    pub fn interceptor<I>(mut self, interceptor: I) -> Self
    where
        I: Interceptor<S, P> + 'static,
    {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Append several interceptors, keeping their order.
    pub fn interceptors(mut self, interceptors: Vec<Box<dyn Interceptor<S, P>>>) -> Self {
        self.interceptors.extend(interceptors);
        self
    }

    /// Choose whether identity commits notify subscribers.
    pub fn notify(mut self, policy: NotifyPolicy) -> Self {
        self.notify = policy;
        self
    }

    /// Validate the configuration, reporting every issue at once.
    pub fn validate(&self) -> Check {
        let mut checks: Vec<Check> = vec![
            present(&self.initial, ConfigIssue::MissingInitialState),
            present(&self.transition, ConfigIssue::MissingTransition),
        ];

        let mut seen = HashSet::new();
        for (position, interceptor) in self.interceptors.iter().enumerate() {
            let name = interceptor.name();
            let check = if name.is_empty() {
                Validation::fail(ConfigIssue::UnnamedInterceptor { position })
            } else if !seen.insert(name.to_string()) {
                Validation::fail(ConfigIssue::DuplicateInterceptor {
                    name: name.to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the container.
    /// Returns an error listing every configuration issue.
    pub fn build(self) -> Result<StateContainer<S, P>, ConfigurationError> {
        if let Validation::Failure(issues) = self.validate() {
            let issues: Vec<ConfigIssue> = issues.iter().cloned().collect();
            tracing::warn!(issues = issues.len(), "rejecting container configuration");
            return Err(ConfigurationError::new(issues));
        }

        let initial = self.initial.ok_or(ConfigIssue::MissingInitialState)?;
        let transition = self.transition.ok_or(ConfigIssue::MissingTransition)?;

        Ok(StateContainer::assemble(
            initial,
            transition,
            &self.interceptors,
            self.notify,
        ))
    }
}

fn present<T>(value: &Option<T>, issue: ConfigIssue) -> Check {
    if value.is_some() {
        Validation::success(())
    } else {
        Validation::fail(issue)
    }
}

impl<S: State, P: 'static> Default for ContainerBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
