//! Parser turning free-form model output into a [`Step`].
//!
//! Rules are applied in a fixed order: final answer, thought, action. Each
//! rule is a plain left-to-right scan over the raw text.

use crate::agent::step::{ActionPayload, Step};
use crate::error::{AiError, Result};

use super::{ACTION_TAG, FINAL_TAG_PREFIX, OBSERVATION_TAG, THOUGHT_TAG};

pub const NO_THOUGHT_OR_ACTION: &str = "Action parsing error: No thought or action found";

/// Deepest brace nesting accepted inside an action object.
const MAX_OBJECT_DEPTH: usize = 2;

pub struct ResponseParser;

impl ResponseParser {
    /// Parse raw model output.
    ///
    /// Malformed action JSON is reported through `observation`; only a tag
    /// layout without a usable thought boundary is an error.
    pub fn parse(raw: &str) -> Result<Step> {
        let mut step = Step::from_raw(raw);

        step.final_answer = extract_final_answer(raw);
        step.thought = extract_thought(raw)?;

        if let Some(text) = extract_action(raw) {
            match serde_json::from_str::<ActionPayload>(text) {
                Ok(payload) => {
                    let action = payload.action.trim();
                    if !action.is_empty() {
                        step.action = Some(action.to_string());
                        step.action_variables = Some(payload.action_variables);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to deserialize action payload");
                    step.observation =
                        Some(format!("Action parsing error: {e}\nInvalid action: {text}"));
                }
            }
        }

        if step.thought.is_none() && step.action.is_none() && step.observation.is_none() {
            step.observation = Some(NO_THOUGHT_OR_ACTION.to_string());
        }

        Ok(step)
    }
}

/// Byte ranges `(start, end)` of every `[FINAL...]` tag, `end` past the `]`.
fn final_tags(raw: &str) -> Vec<(usize, usize)> {
    // ASCII uppercasing keeps byte offsets aligned with `raw`.
    let upper = raw.to_ascii_uppercase();
    upper
        .match_indices(FINAL_TAG_PREFIX)
        .filter_map(|(start, _)| {
            raw[start..]
                .find(']')
                .map(|close| (start, start + close + 1))
        })
        .collect()
}

fn extract_final_answer(raw: &str) -> Option<String> {
    let (_, end) = final_tags(raw).into_iter().next()?;
    let answer = raw[end..].trim();
    (!answer.is_empty()).then(|| answer.to_string())
}

fn extract_thought(raw: &str) -> Result<Option<String>> {
    let action_at = raw.find(ACTION_TAG);
    let thought_at = raw.find(THOUGHT_TAG);

    let start = match (thought_at, action_at) {
        (Some(thought), Some(action)) if thought > action => {
            return Err(AiError::InvalidFormat(format!(
                "Unexpected input format: {THOUGHT_TAG} follows {ACTION_TAG}"
            )));
        }
        (Some(thought), _) => thought + THOUGHT_TAG.len(),
        (None, _) => 0,
    };

    let rest = &raw[start..];
    let mut end = rest.find(ACTION_TAG).unwrap_or(rest.len());
    if let Some(&(final_at, _)) = final_tags(rest).first() {
        end = end.min(final_at);
    }

    let thought = rest[..end].replace(THOUGHT_TAG, "");
    let thought = thought.trim();
    Ok((!thought.is_empty()).then(|| thought.to_string()))
}

/// Locate the action object: after an `[ACTION]` tag first, then after any
/// `[FINAL...]` tag.
fn extract_action(raw: &str) -> Option<&str> {
    raw.match_indices(ACTION_TAG)
        .find_map(|(at, tag)| extract_object(raw, at + tag.len()))
        .or_else(|| {
            final_tags(raw)
                .into_iter()
                .find_map(|(_, end)| extract_object(raw, end))
        })
}

/// Byte offset of the first tag at or after `from`, or the end of `raw`.
fn next_tag(raw: &str, from: usize) -> usize {
    let rest = &raw[from..];
    [THOUGHT_TAG, ACTION_TAG, OBSERVATION_TAG]
        .iter()
        .filter_map(|tag| rest.find(tag))
        .chain(final_tags(rest).first().map(|&(start, _)| start))
        .min()
        .map_or(raw.len(), |offset| from + offset)
}

/// Match `{ ... }` starting at the first brace after `from`, allowing one level
/// of nested braces. The object must close before the next tag, and text before
/// the brace may not contain a `}`.
fn extract_object(raw: &str, from: usize) -> Option<&str> {
    let raw = &raw[..next_tag(raw, from)];
    let bytes = raw.as_bytes();
    let offset = bytes[from..].iter().position(|b| matches!(b, b'{' | b'}'))?;
    let start = from + offset;
    if bytes[start] != b'{' {
        return None;
    }

    let mut depth = 0usize;
    for (i, byte) in bytes.iter().enumerate().skip(start) {
        match byte {
            b'{' => {
                depth += 1;
                if depth > MAX_OBJECT_DEPTH {
                    return None;
                }
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
