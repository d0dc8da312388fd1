use serde::{Deserialize, Serialize};
use stepflow_traits::ToolArguments;

/// One reasoning/acting turn of the ReAct loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    /// Qualified tool name (`<namespace>.<name>`) chosen by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_variables: Option<ToolArguments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    /// Unmodified model output this step was derived from.
    #[serde(default)]
    pub raw_response: String,
}

impl Step {
    pub fn from_raw(raw_response: impl Into<String>) -> Self {
        Self {
            raw_response: raw_response.into(),
            ..Self::default()
        }
    }

    /// Build a step that invokes `action` without any model output.
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_thought(mut self, thought: impl Into<String>) -> Self {
        self.thought = Some(thought.into());
        self
    }

    pub fn with_variables(mut self, variables: ToolArguments) -> Self {
        self.action_variables = Some(variables);
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_final_answer(mut self, answer: impl Into<String>) -> Self {
        self.final_answer = Some(answer.into());
        self
    }

    /// True when the step names a tool to invoke.
    pub fn is_actionable(&self) -> bool {
        non_empty(&self.action)
    }

    /// True when the step carries a final answer; the loop must stop.
    pub fn is_terminal(&self) -> bool {
        non_empty(&self.final_answer)
    }

    /// Arguments of the action, empty when none were given.
    pub fn variables(&self) -> ToolArguments {
        self.action_variables.clone().unwrap_or_default()
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// JSON payload the model emits after an `[ACTION]` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    pub action: String,
    #[serde(default)]
    pub action_variables: ToolArguments,
}
