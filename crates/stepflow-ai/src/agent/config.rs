use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};

pub const DEFAULT_MAX_TOKENS: usize = 2000;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Configuration for the ReAct engine and runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReActConfig {
    /// Token budget the scratch pad is sized against.
    pub max_tokens: usize,
    /// Maximum iterations before the runner gives up.
    pub max_iterations: usize,
    /// Minimum wall-clock time per runner iteration, in milliseconds.
    pub min_iteration_time_ms: u64,
    /// Namespaces hidden from the model.
    pub excluded_namespaces: Vec<String>,
    /// Tool names (bare or qualified) hidden from the model.
    pub excluded_names: Vec<String>,
    /// Offer the model a tool that stops the loop and asks the user.
    pub enable_auto_termination: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_iteration_time_ms: 0,
            excluded_namespaces: Vec::new(),
            excluded_names: Vec::new(),
            enable_auto_termination: false,
        }
    }
}

impl ReActConfig {
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_min_iteration_time_ms(mut self, ms: u64) -> Self {
        self.min_iteration_time_ms = ms;
        self
    }

    pub fn with_excluded_namespaces(mut self, namespaces: Vec<String>) -> Self {
        self.excluded_namespaces = namespaces;
        self
    }

    pub fn with_excluded_names(mut self, names: Vec<String>) -> Self {
        self.excluded_names = names;
        self
    }

    pub fn with_auto_termination(mut self, enabled: bool) -> Self {
        self.enable_auto_termination = enabled;
        self
    }

    pub fn min_iteration_time(&self) -> Duration {
        Duration::from_millis(self.min_iteration_time_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(AiError::Config(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
