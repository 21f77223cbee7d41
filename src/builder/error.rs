//! Configuration errors for container construction.

use thiserror::Error;

/// A single problem found while validating a container configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition function not specified. Call .transition(transition) before .build()")]
    MissingTransition,

    #[error("Interceptor at position {position} has an empty name")]
    UnnamedInterceptor { position: usize },

    #[error("Interceptor name '{name}' is registered more than once")]
    DuplicateInterceptor { name: String },
}

/// Construction failed. Carries every issue found, not just the first.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid container configuration: {}", render(.issues))]
pub struct ConfigurationError {
    issues: Vec<ConfigIssue>,
}

impl ConfigurationError {
    pub(crate) fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    /// Every issue found, in check order.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Whether `issue` was reported.
    pub fn contains(&self, issue: &ConfigIssue) -> bool {
        self.issues.contains(issue)
    }
}

impl From<ConfigIssue> for ConfigurationError {
    fn from(issue: ConfigIssue) -> Self {
        Self::new(vec![issue])
    }
}

fn render(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
