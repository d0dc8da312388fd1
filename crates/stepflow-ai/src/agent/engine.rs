//! ReAct engine: produces one step per call.
//!
//! The engine never loops on its own. Callers append each returned step to
//! their history and call again until a step is terminal or their own
//! iteration cap is reached (see [`super::runner::ReActRunner`]).

use std::future::Future;
use std::sync::Arc;

use stepflow_traits::{ToolArguments, Toolset};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::catalog::{ToolCatalog, describe_tools};
use super::config::ReActConfig;
use super::executor::StepExecutor;
use super::react::ResponseParser;
use super::scratchpad::ScratchpadBuilder;
use super::step::Step;
use crate::error::{AiError, Result};
use crate::llm::{
    CompletionRequest, FUNCTION_DESCRIPTIONS_KEY, LlmClient, QUESTION_KEY, SCRATCH_PAD_KEY,
};

pub const PARSE_FAILURE_OBSERVATION: &str =
    "Failed to parse valid action step, missing action or final answer.";

/// Await `future` unless `cancel` fires first.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AiError::Cancelled),
        result = future => result,
    }
}

pub struct ReActEngine {
    llm: Arc<dyn LlmClient>,
    catalog: ToolCatalog,
    config: ReActConfig,
}

impl ReActEngine {
    pub fn new(llm: Arc<dyn LlmClient>, toolset: Arc<dyn Toolset>, config: ReActConfig) -> Self {
        let catalog = ToolCatalog::new(toolset, &config);
        Self {
            llm,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &ReActConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Ask the model for the next step of the task.
    ///
    /// A step is returned as soon as it has an action or a final answer, and
    /// the first step of a task is always returned as parsed. Any other
    /// response comes back as a thought carrying a parse-failure observation.
    pub async fn get_next_step(
        &self,
        history: &[Step],
        question: &str,
        ambient: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<Step> {
        let tools = self.catalog.list_available();

        if let [only] = tools.as_slice()
            && only.parameters.is_empty()
        {
            let action = only.qualified_name();
            debug!(%action, "Single parameterless tool, skipping model call");
            return Ok(Step::action(action));
        }

        let mut context = ambient.clone();
        context.insert(QUESTION_KEY.to_string(), question.to_string());
        context.insert(
            SCRATCH_PAD_KEY.to_string(),
            ScratchpadBuilder::new(self.config.max_tokens).build(history),
        );
        context.insert(FUNCTION_DESCRIPTIONS_KEY.to_string(), describe_tools(&tools));

        debug!(
            iteration = history.len() + 1,
            tools = tools.len(),
            model = self.llm.model(),
            "Requesting next step"
        );
        let raw = cancellable(cancel, self.llm.complete(CompletionRequest::new(context))).await?;

        let mut step = ResponseParser::parse(&raw)?;

        if step.is_terminal() {
            info!(iteration = history.len() + 1, "Model returned a final answer");
            return Ok(step);
        }
        if step.is_actionable() || history.is_empty() {
            return Ok(step);
        }

        warn!(
            iteration = history.len() + 1,
            "Response carried neither an action nor a final answer"
        );
        let observation = match step.observation.take() {
            Some(detail) => format!("{PARSE_FAILURE_OBSERVATION}\n{detail}"),
            None => PARSE_FAILURE_OBSERVATION.to_string(),
        };
        step.observation = Some(observation);
        step.thought = Some(raw);
        Ok(step)
    }

    /// Execute the step's action and return the observation text.
    ///
    /// `ambient` only changes when the tool call completes; a cancelled call
    /// leaves it untouched.
    pub async fn invoke_action(
        &self,
        step: &Step,
        ambient: &mut ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<String> {
        cancellable(cancel, StepExecutor::new(&self.catalog).execute(step, ambient)).await
    }
}
