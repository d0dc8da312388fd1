//! Caller-side ReAct loop built on [`ReActEngine`].

use serde::{Deserialize, Serialize};
use stepflow_traits::ToolArguments;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::engine::{ReActEngine, cancellable};
use super::react::ReActState;
use super::step::Step;
use crate::error::Result;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The model produced a final answer.
    Completed,
    /// The model stopped to ask the user something.
    AwaitingUser,
    /// The iteration cap was hit first.
    MaxIterations,
}

/// Result of a runner invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub status: AgentStatus,
    pub answer: Option<String>,
    pub iterations: usize,
    pub steps: Vec<Step>,
}

pub struct ReActRunner {
    engine: ReActEngine,
}

impl ReActRunner {
    pub fn new(engine: ReActEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ReActEngine {
        &self.engine
    }

    /// Drive the engine until a final answer, a stop request or the
    /// iteration cap.
    pub async fn run(
        &self,
        question: &str,
        ambient: &mut ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<AgentResult> {
        let config = self.engine.config();
        config.validate()?;

        let mut history: Vec<Step> = Vec::new();

        for iteration in 1..=config.max_iterations {
            let started = Instant::now();
            let mut step = self
                .engine
                .get_next_step(&history, question, ambient, cancel)
                .await?;

            let state = ReActState::from_step(Some(&step));
            debug!(iteration, %state, "Received step");

            match state {
                ReActState::Done { answer } => {
                    info!(iteration, "Task completed");
                    history.push(step);
                    return Ok(AgentResult {
                        status: AgentStatus::Completed,
                        answer: Some(answer),
                        iterations: iteration,
                        steps: history,
                    });
                }
                ReActState::Acting { action } => {
                    let observation = self.engine.invoke_action(&step, ambient, cancel).await?;
                    step.observation = Some(observation.clone());
                    if self.engine.catalog().is_stop_action(&action) {
                        info!(iteration, "Model asked to stop and prompt the user");
                        history.push(step);
                        return Ok(AgentResult {
                            status: AgentStatus::AwaitingUser,
                            answer: Some(observation),
                            iterations: iteration,
                            steps: history,
                        });
                    }
                }
                ReActState::Thinking => {}
            }

            history.push(step);

            let remaining = config.min_iteration_time().saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                cancellable(cancel, async {
                    tokio::time::sleep(remaining).await;
                    Ok(())
                })
                .await?;
            }
        }

        info!(
            iterations = config.max_iterations,
            "Iteration cap reached without a final answer"
        );
        Ok(AgentResult {
            status: AgentStatus::MaxIterations,
            answer: None,
            iterations: config.max_iterations,
            steps: history,
        })
    }
}
