use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use stepflow_ai::{
    AgentResult, AgentStatus, CancellationToken, MockLlmClient, ReActEngine, ReActRunner, Step,
    ToolArguments,
};
use tracing::info;

use crate::cli::RunArgs;
use crate::config::CliConfig;
use crate::demo_tools::demo_toolset;
use crate::output::{OutputFormat, print_json};

const RESPONSE_SEPARATOR: &str = "---";

pub async fn run(config: CliConfig, args: RunArgs, format: OutputFormat) -> Result<()> {
    let responses = load_responses(&args.responses)?;
    if responses.is_empty() {
        bail!("No responses found in {}", args.responses.display());
    }

    let mut engine_config = config.engine;
    if let Some(max_iterations) = args.max_iterations {
        engine_config.max_iterations = max_iterations;
    }

    info!(responses = responses.len(), "Replaying scripted responses");
    let llm = Arc::new(MockLlmClient::from_texts("scripted", responses));
    let engine = ReActEngine::new(llm, demo_toolset(), engine_config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut ambient: ToolArguments = args.vars.into_iter().collect();
    let result = ReActRunner::new(engine)
        .run(&args.question, &mut ambient, &cancel)
        .await?;

    if format.is_json() {
        return print_json(&serde_json::json!({
            "result": result,
            "ambient": ambient,
        }));
    }

    print_trace(&result);
    Ok(())
}

fn load_responses(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read responses from {}", path.display()))?;
    Ok(split_responses(&content))
}

/// Split a script into responses on lines containing only `---`.
fn split_responses(content: &str) -> Vec<String> {
    let mut responses = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim() == RESPONSE_SEPARATOR {
            responses.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    responses.push(current.join("\n"));

    responses
        .into_iter()
        .map(|response| response.trim().to_string())
        .filter(|response| !response.is_empty())
        .collect()
}

fn print_trace(result: &AgentResult) {
    for (index, step) in result.steps.iter().enumerate() {
        println!("{}", format!("Step {}", index + 1).bold());
        print_step(step);
        println!();
    }

    let status = match result.status {
        AgentStatus::Completed => "completed".green(),
        AgentStatus::AwaitingUser => "awaiting user".yellow(),
        AgentStatus::MaxIterations => "iteration cap reached".red(),
    };
    println!("{} {} ({} iterations)", "Status:".bold(), status, result.iterations);
    if let Some(answer) = &result.answer {
        println!("{} {}", "Answer:".bold(), answer);
    }
}

fn print_step(step: &Step) {
    if let Some(thought) = &step.thought {
        println!("  {} {}", "thought".cyan(), thought);
    }
    if let Some(action) = &step.action {
        let variables = step
            .variables()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} {}({})", "action".magenta(), action, variables);
    }
    if let Some(observation) = step.observation.as_ref().filter(|_| !step.is_terminal()) {
        println!("  {} {}", "observation".dimmed(), observation);
    }
    if let Some(answer) = &step.final_answer {
        println!("  {} {}", "final".green(), answer);
    }
}
