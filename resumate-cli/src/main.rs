use anyhow::{Context, Result};
use clap::Parser;
use resumate::layer::LoggingLayer;
use resumate::provider::ChatClient;
use resumate::{parse_response, ClientConfig, EvaluationResult, Evaluator};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod input;

use cli::Cli;

const INVALID_JSON_HINT: &str =
    "Model returned invalid JSON. Try lowering temperature or another model.";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.apply(ClientConfig::from_env()?);
    tracing::debug!("using {:?}", config);

    let job_description = input::read_job_description(&cli.job)?;
    let resume_text = input::read_resume(&cli.resume)?;
    input::require_inputs(&job_description, &resume_text)?;

    let mut builder = Evaluator::builder(ChatClient::new(config.clone()))
        .layer(LoggingLayer::new())
        .settings(config.generation());
    if let Some(path) = &cli.rubric {
        builder = builder.rubric(input::read_rubric(path)?);
    }
    let evaluator = builder.finish()?;

    let evaluation = evaluator
        .evaluate(&job_description, &resume_text)
        .await
        .with_context(|| format!("evaluation with provider '{}' failed", config.provider))?;

    if cli.show_prompt {
        eprintln!("--- prompt ---\n{}\n--- end prompt ---", evaluation.prompt);
    }

    let Some(value) = parse_response(&evaluation.raw_response) else {
        eprintln!("{}", INVALID_JSON_HINT);
        eprintln!("{}", evaluation.raw_response);
        return Ok(ExitCode::from(2));
    };

    if let Err(e) = EvaluationResult::from_value(value.clone()) {
        tracing::warn!("model output does not match the expected shape: {}", e);
    }

    let rendered = if cli.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{}", rendered);

    match value.pointer("/overall/score").and_then(|s| s.as_i64()) {
        Some(score) => eprintln!("Overall match: {}/100", score),
        None => eprintln!("Overall match: -"),
    }

    Ok(ExitCode::SUCCESS)
}
