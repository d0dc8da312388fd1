//! Scratch pad rendering for the ReAct prompt.
//!
//! The scratch pad replays prior steps to the model as plain text. Size is
//! estimated with a crude `lines / 4` token heuristic; when the estimate would
//! pass three quarters of the token budget, older steps are dropped. The first
//! thought always survives because it anchors the task.

use serde_json::json;
use stepflow_traits::ToolArguments;

use super::react::{ACTION_TAG, OBSERVATION_TAG, THOUGHT_TAG};
use super::step::Step;
use crate::llm::{CHAT_HISTORY_KEY, FUNCTION_DESCRIPTIONS_KEY, QUESTION_KEY, SCRATCH_PAD_KEY};

pub const SCRATCH_PAD_PREFIX: &str = "This was my previous work (but they haven't seen any of it! They only see what I return as final answer):";

/// Share of `max_tokens` the scratch pad may occupy.
const BUDGET_RATIO: f64 = 0.75;
const LINES_PER_TOKEN: f64 = 4.0;

/// Approximate token count of `lines` rendered lines.
pub fn approximate_tokens(lines: usize) -> f64 {
    lines as f64 / LINES_PER_TOKEN
}

/// Keys written by the engine itself; never echoed back as action variables.
pub fn is_system_key(key: &str) -> bool {
    key.starts_with('_')
        || matches!(
            key,
            QUESTION_KEY | SCRATCH_PAD_KEY | FUNCTION_DESCRIPTIONS_KEY | CHAT_HISTORY_KEY
        )
}

#[derive(Debug, Clone, Copy)]
pub struct ScratchpadBuilder {
    max_tokens: usize,
}

impl ScratchpadBuilder {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    fn budget(&self) -> f64 {
        self.max_tokens as f64 * BUDGET_RATIO
    }

    pub fn build(&self, history: &[Step]) -> String {
        let Some(first) = history.first() else {
            return String::new();
        };

        let mut lines = vec![SCRATCH_PAD_PREFIX.to_string()];
        if let Some(thought) = present(&first.thought) {
            lines.push(format!("{THOUGHT_TAG} {thought}"));
        }

        let budget = self.budget();
        let mut used = count_lines(&lines);
        let mut kept: Vec<Vec<String>> = Vec::new();

        for (index, step) in history.iter().enumerate().rev() {
            let rendered = render_step(step, index == 0);
            let size = count_lines(&rendered);
            if approximate_tokens(used + size) > budget {
                tracing::debug!(
                    dropped = index + 1,
                    kept = kept.len(),
                    "Scratch pad budget reached"
                );
                break;
            }
            used += size;
            kept.push(rendered);
        }

        lines.extend(kept.into_iter().rev().flatten());
        lines.join("\n").trim().to_string()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn count_lines(lines: &[String]) -> usize {
    lines.iter().map(|line| line.lines().count().max(1)).sum()
}

fn render_step(step: &Step, is_first: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if !is_first && let Some(thought) = present(&step.thought) {
        lines.push(format!("{THOUGHT_TAG} {thought}"));
    }

    if let Some(action) = present(&step.action) {
        let variables: ToolArguments = step
            .action_variables
            .iter()
            .flatten()
            .filter(|(key, _)| !is_system_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let payload = json!({
            "action": action,
            "action_variables": variables,
        });
        lines.push(format!("{ACTION_TAG} {payload}"));
    }

    if let Some(observation) = present(&step.observation) {
        lines.push(format!("{OBSERVATION_TAG} {observation}"));
    }

    lines
}
