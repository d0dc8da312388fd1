//! Integration tests for the ReAct engine and runner

use std::sync::Arc;

use async_trait::async_trait;
use stepflow_ai::agent::{PARSE_FAILURE_OBSERVATION, SCRATCH_PAD_PREFIX};
use stepflow_ai::llm::{FUNCTION_DESCRIPTIONS_KEY, QUESTION_KEY, SCRATCH_PAD_KEY};
use stepflow_ai::{
    AgentStatus, AiError, CancellationToken, MockLlmClient, MockStep, ReActConfig, ReActEngine,
    ReActRunner, Step, Tool, ToolArguments, ToolError, ToolOutput, ToolParameter, ToolRegistry,
    Toolset,
};
use stepflow_traits::{ToolResult, required_argument};

struct AddTool;

#[async_trait]
impl Tool for AddTool {
    fn namespace(&self) -> &str {
        "math"
    }

    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two integers"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new("a", "First addend"),
            ToolParameter::new("b", "Second addend").with_default("0"),
        ]
    }

    async fn execute(&self, mut arguments: ToolArguments) -> ToolResult<ToolOutput> {
        let parse = |key: &str| -> ToolResult<i64> {
            required_argument(&arguments, key)?
                .trim()
                .parse()
                .map_err(|_| ToolError::InvalidArguments(format!("'{key}' is not an integer")))
        };
        let sum = parse("a")? + parse("b")?;
        arguments.insert("last_sum".to_string(), sum.to_string());
        Ok(ToolOutput::text(sum.to_string(), arguments))
    }
}

struct PingTool;

#[async_trait]
impl Tool for PingTool {
    fn namespace(&self) -> &str {
        "net"
    }

    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Reply with pong"
    }

    async fn execute(&self, arguments: ToolArguments) -> ToolResult<ToolOutput> {
        Ok(ToolOutput::text("pong", arguments))
    }
}

fn toolset(tools: Vec<Arc<dyn Tool>>) -> Arc<dyn Toolset> {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register_arc(tool);
    }
    Arc::new(registry)
}

fn math_tools() -> Arc<dyn Toolset> {
    toolset(vec![Arc::new(AddTool), Arc::new(PingTool)])
}

fn engine(llm: &MockLlmClient, tools: Arc<dyn Toolset>, config: ReActConfig) -> ReActEngine {
    ReActEngine::new(Arc::new(llm.clone()), tools, config)
}

const ADD_ACTION: &str =
    "[THOUGHT] I need to add\n[ACTION] {\"action\": \"math.add\", \"action_variables\": {\"a\": \"2\", \"b\": \"3\"}}";

#[tokio::test]
async fn test_single_parameterless_tool_skips_model() {
    let llm = MockLlmClient::from_texts("mock", ["should not be used"]);
    let engine = engine(&llm, toolset(vec![Arc::new(PingTool)]), ReActConfig::default());

    let step = engine
        .get_next_step(&[], "ping it", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(step.action.as_deref(), Some("net.ping"));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_stop_tool_disables_single_tool_shortcut() {
    let llm = MockLlmClient::from_texts("mock", ["[FINAL ANSWER] done"]);
    let config = ReActConfig::default().with_auto_termination(true);
    let engine = engine(&llm, toolset(vec![Arc::new(PingTool)]), config);

    let step = engine
        .get_next_step(&[], "q", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(step.is_terminal());
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_first_iteration_thought_is_returned() {
    let llm = MockLlmClient::from_texts("mock", ["Let me think about this."]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());

    let step = engine
        .get_next_step(&[], "q", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(step.thought.as_deref(), Some("Let me think about this."));
    assert_eq!(step.action, None);
    assert_eq!(step.observation, None);
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_later_thought_only_reports_parse_failure() {
    let raw = "[THOUGHT] still thinking";
    let llm = MockLlmClient::from_texts("mock", [raw]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());
    let history = vec![Step::from_raw("earlier").with_thought("earlier")];

    let step = engine
        .get_next_step(&history, "q", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(step.thought.as_deref(), Some(raw));
    assert_eq!(step.observation.as_deref(), Some(PARSE_FAILURE_OBSERVATION));
    assert_eq!(step.raw_response, raw);
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_later_malformed_action_keeps_parse_detail() {
    let llm = MockLlmClient::from_texts("mock", ["[THOUGHT] T\n[ACTION] {not json}"]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());
    let history = vec![Step::from_raw("earlier").with_thought("earlier")];

    let step = engine
        .get_next_step(&history, "q", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    let observation = step.observation.unwrap();
    assert!(observation.starts_with(PARSE_FAILURE_OBSERVATION));
    assert!(observation.contains("Action parsing error"));
    assert_eq!(step.action, None);
}

#[tokio::test]
async fn test_prompt_context_contents() {
    let llm = MockLlmClient::from_texts("mock", [ADD_ACTION]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());

    let mut ambient = ToolArguments::new();
    ambient.insert("user".to_string(), "sam".to_string());
    let history = vec![
        Step::action("net.ping")
            .with_thought("check the network")
            .with_observation("pong"),
    ];

    engine
        .get_next_step(&history, "What is 2 + 3?", &ambient, &CancellationToken::new())
        .await
        .unwrap();

    let requests = llm.requests().await;
    let request = &requests[0];
    assert_eq!(request.get(QUESTION_KEY), Some("What is 2 + 3?"));
    assert_eq!(request.get("user"), Some("sam"));

    let pad = request.get(SCRATCH_PAD_KEY).unwrap();
    assert!(pad.starts_with(SCRATCH_PAD_PREFIX));
    assert!(pad.contains("[THOUGHT] check the network"));
    assert!(pad.contains("[OBSERVATION] pong"));

    let descriptions = request.get(FUNCTION_DESCRIPTIONS_KEY).unwrap();
    let add_at = descriptions.find("math.add").unwrap();
    let ping_at = descriptions.find("net.ping").unwrap();
    assert!(add_at < ping_at);
}

#[tokio::test]
async fn test_unresolved_action_is_observation() {
    let llm = MockLlmClient::new("mock");
    let engine = engine(&llm, math_tools(), ReActConfig::default());

    let observation = engine
        .invoke_action(
            &Step::action("ns.missing"),
            &mut ToolArguments::new(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(observation.contains("was not found"));
}

#[tokio::test]
async fn test_cancelled_model_call() {
    let llm = MockLlmClient::from_steps("mock", vec![MockStep::text(ADD_ACTION).with_delay(50)]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = engine
        .get_next_step(&[], "q", &ToolArguments::new(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Cancelled));
}

#[tokio::test]
async fn test_cancelled_action_leaves_ambient_untouched() {
    let llm = MockLlmClient::new("mock");
    let engine = engine(&llm, math_tools(), ReActConfig::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut ambient = ToolArguments::new();
    let mut variables = ToolArguments::new();
    variables.insert("a".to_string(), "1".to_string());
    let step = Step::action("math.add").with_variables(variables);

    let err = engine
        .invoke_action(&step, &mut ambient, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Cancelled));
    assert!(ambient.is_empty());
}

#[tokio::test]
async fn test_model_error_propagates() {
    let llm = MockLlmClient::from_steps("mock", vec![MockStep::error("503 overloaded")]);
    let engine = engine(&llm, math_tools(), ReActConfig::default());

    let err = engine
        .get_next_step(&[], "q", &ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Llm(_)));
}

#[tokio::test]
async fn test_runner_completes_after_tool_call() {
    let llm = MockLlmClient::from_texts(
        "mock",
        [ADD_ACTION, "[THOUGHT] I have the sum\n[FINAL ANSWER] 5"],
    );
    let runner = ReActRunner::new(engine(&llm, math_tools(), ReActConfig::default()));
    let mut ambient = ToolArguments::new();

    let result = runner
        .run("What is 2 + 3?", &mut ambient, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status, AgentStatus::Completed);
    assert_eq!(result.answer.as_deref(), Some("5"));
    assert_eq!(result.iterations, 2);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].observation.as_deref(), Some("5"));
    assert_eq!(ambient.get("a").map(String::as_str), Some("2"));
    assert!(!ambient.contains_key("last_sum"));

    let requests = llm.requests().await;
    let pad = requests[1].get(SCRATCH_PAD_KEY).unwrap();
    assert!(pad.contains("[OBSERVATION] 5"));
    assert!(pad.contains("\"action\":\"math.add\""));
}

#[tokio::test]
async fn test_runner_propagates_non_retryable_tool_error() {
    let llm = MockLlmClient::from_texts(
        "mock",
        [
            "[ACTION] {\"action\": \"math.add\", \"action_variables\": {\"a\": \"two\"}}",
            "[FINAL ANSWER] could not add",
        ],
    );
    let runner = ReActRunner::new(engine(&llm, math_tools(), ReActConfig::default()));

    let err = runner
        .run("q", &mut ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    // InvalidArguments is not retryable, so the run stops.
    assert!(matches!(err, AiError::Tool(ToolError::InvalidArguments(_))));
}

#[tokio::test]
async fn test_runner_stops_at_iteration_cap() {
    let llm = MockLlmClient::from_texts("mock", ["hmm", "still hmm", "more hmm"]);
    let config = ReActConfig::default().with_max_iterations(3);
    let runner = ReActRunner::new(engine(&llm, math_tools(), config));

    let result = runner
        .run("q", &mut ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status, AgentStatus::MaxIterations);
    assert_eq!(result.answer, None);
    assert_eq!(result.steps.len(), 3);
    assert_eq!(result.steps[0].observation, None);
    assert_eq!(
        result.steps[2].observation.as_deref(),
        Some(PARSE_FAILURE_OBSERVATION)
    );
}

#[tokio::test]
async fn test_runner_awaits_user_on_stop_tool() {
    let llm = MockLlmClient::from_texts(
        "mock",
        ["[THOUGHT] I cannot continue\n[ACTION] {\"action\": \"_REACT_ENGINE_.StopAndPromptUser\", \"action_variables\": {\"prompt\": \"Which currency?\"}}"],
    );
    let config = ReActConfig::default().with_auto_termination(true);
    let runner = ReActRunner::new(engine(&llm, math_tools(), config));

    let result = runner
        .run("convert 10", &mut ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status, AgentStatus::AwaitingUser);
    assert_eq!(result.answer.as_deref(), Some("Which currency?"));
    assert_eq!(result.iterations, 1);
}

#[tokio::test]
async fn test_runner_rejects_zero_iterations() {
    let llm = MockLlmClient::new("mock");
    let config = ReActConfig::default().with_max_iterations(0);
    let runner = ReActRunner::new(engine(&llm, math_tools(), config));

    let err = runner
        .run("q", &mut ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Config(_)));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_runner_respects_min_iteration_time() {
    let llm = MockLlmClient::from_texts("mock", ["hmm", "[FINAL ANSWER] ok"]);
    let config = ReActConfig::default().with_min_iteration_time_ms(1_000);
    let runner = ReActRunner::new(engine(&llm, math_tools(), config));

    let started = tokio::time::Instant::now();
    let result = runner
        .run("q", &mut ToolArguments::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status, AgentStatus::Completed);
    assert!(started.elapsed() >= std::time::Duration::from_millis(1_000));
}
