//! Offline model evaluation tool
//!
//! Probes each candidate model with a built-in set of test questions,
//! measures latency, output size, and word-overlap similarity against a
//! ground-truth answer, writes the per-invocation results to a CSV report,
//! and prints a per-model summary plus a suggested model selection strategy
//! ready to publish to AppConfig.
//!
//! ```bash
//! evaluate --model amazon.nova-lite-v1:0 --model amazon.titan-text-express-v1
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use tiered_gateway::config::Config;
use tiered_gateway::core::providers::{self, UnknownModelPolicy};
use tiered_gateway::core::types::{GenerationConfig, ModelScore, ModelSelectionStrategy};
use tiered_gateway::services::BedrockRuntimeClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Weighting of answer quality vs speed in the overall score
const SIMILARITY_WEIGHT: f64 = 0.7;
const LATENCY_WEIGHT: f64 = 0.3;

#[derive(Parser, Debug)]
#[command(
    name = "evaluate",
    about = "Evaluate candidate Bedrock models and suggest a selection strategy",
    version
)]
struct Args {
    /// Model to evaluate; repeat for several (defaults to the built-in pair)
    #[arg(long = "model", value_name = "MODEL_ID")]
    models: Vec<String>,

    /// Where to write the CSV report
    #[arg(long, default_value = "config/model_evaluation_results.csv")]
    out: PathBuf,

    /// Token budget per invocation
    #[arg(long, default_value_t = 500)]
    max_tokens: u32,
}

/// A test question with its ground-truth answer
struct TestCase {
    question: &'static str,
    context: &'static str,
    ground_truth: &'static str,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        question: "What is a 401(k) retirement plan?",
        context: "Financial services",
        ground_truth:
            "A 401(k) is a tax-advantaged retirement savings plan offered by employers.",
    },
    TestCase {
        question: "How do I reset my smart thermostat to factory settings?",
        context: "Product support",
        ground_truth:
            "Hold the reset button for ten seconds until the display flashes, then release it.",
    },
    TestCase {
        question: "How can I update the billing address on my account?",
        context: "Account management",
        ground_truth:
            "You can update your billing address from the account settings page or by contacting customer service.",
    },
];

/// One CSV row: a single model invocation against a single test case
#[derive(Debug, Serialize)]
struct EvaluationRecord {
    model_id: String,
    question: String,
    output: Option<String>,
    error: Option<String>,
    latency: f64,
    token_count: Option<usize>,
    similarity_score: Option<f64>,
}

/// Per-model averages over every test case
#[derive(Debug)]
struct ModelSummary {
    model_id: String,
    avg_latency: f64,
    avg_similarity_score: f64,
    avg_token_count: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let models = if args.models.is_empty() {
        vec![
            "amazon.nova-lite-v1:0".to_string(),
            "amazon.titan-text-express-v1".to_string(),
        ]
    } else {
        args.models.clone()
    };

    let config = Config::load().await?;
    let bedrock = BedrockRuntimeClient::new(&config)?;
    let generation = GenerationConfig::with_max_tokens(args.max_tokens);

    let records = evaluate_models(&bedrock, &models, &generation).await;

    write_report(&args.out, &records)
        .with_context(|| format!("Failed to write report to {:?}", args.out))?;
    info!("Wrote {} rows to {:?}", records.len(), args.out);

    let summaries = summarize(&models, &records);
    print_summary_table(&summaries);

    let strategy = suggest_strategy(&summaries);
    println!("\nSuggested model selection strategy:");
    println!("{}", serde_json::to_string_pretty(&strategy)?);

    Ok(())
}

/// Run every (test case, model) pair sequentially
///
/// A failed invocation becomes a row with the error column filled; the run
/// continues with the next pair.
async fn evaluate_models(
    bedrock: &BedrockRuntimeClient,
    models: &[String],
    generation: &GenerationConfig,
) -> Vec<EvaluationRecord> {
    let mut records = Vec::with_capacity(TEST_CASES.len() * models.len());

    for case in TEST_CASES {
        let prompt = format!("Question: {}\nContext: {}", case.question, case.context);

        for model_id in models {
            info!("Evaluating {} on: {}", model_id, case.question);

            let started = Instant::now();
            let outcome = probe_model(bedrock, model_id, &prompt, generation).await;
            let latency = started.elapsed().as_secs_f64();

            let record = match outcome {
                Ok(output) => EvaluationRecord {
                    model_id: model_id.clone(),
                    question: case.question.to_string(),
                    token_count: Some(output.split_whitespace().count()),
                    similarity_score: Some(similarity(&output, case.ground_truth)),
                    output: Some(output),
                    error: None,
                    latency,
                },
                Err(e) => {
                    error!("Model invocation failed: {}", e);
                    EvaluationRecord {
                        model_id: model_id.clone(),
                        question: case.question.to_string(),
                        output: None,
                        error: Some(e.to_string()),
                        latency,
                        token_count: None,
                        similarity_score: None,
                    }
                }
            };
            records.push(record);
        }
    }

    records
}

/// One build/invoke/parse round trip
///
/// Unknown model ids are probed with a generic `{"prompt"}` body instead of
/// being rejected, so new models can be evaluated before they get a family.
async fn probe_model(
    bedrock: &BedrockRuntimeClient,
    model_id: &str,
    prompt: &str,
    generation: &GenerationConfig,
) -> tiered_gateway::Result<String> {
    let body =
        providers::build_request(model_id, prompt, generation, UnknownModelPolicy::GenericPrompt)?;
    let payload = bedrock.invoke_model(model_id, &body).await?;
    providers::parse_response(model_id, &payload, UnknownModelPolicy::GenericPrompt)
}

/// Word-overlap similarity: |output words ∩ truth words| / |truth words|
///
/// Case-insensitive set semantics, so word order and repetition do not
/// count. Crude, but stable enough to rank models on short answers.
fn similarity(output: &str, ground_truth: &str) -> f64 {
    let output_words: HashSet<String> = output
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let truth_words: HashSet<String> = ground_truth
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if truth_words.is_empty() {
        return 0.0;
    }

    let common = output_words.intersection(&truth_words).count();
    common as f64 / truth_words.len() as f64
}

fn write_report(path: &PathBuf, records: &[EvaluationRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Average the per-row metrics per model, in the evaluation order
///
/// Latency averages over every row (failures included, their wasted time
/// counts); similarity and token count average over successful rows only.
fn summarize(models: &[String], records: &[EvaluationRecord]) -> Vec<ModelSummary> {
    models
        .iter()
        .map(|model_id| {
            let rows: Vec<&EvaluationRecord> = records
                .iter()
                .filter(|r| &r.model_id == model_id)
                .collect();

            let avg_latency = if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(|r| r.latency).sum::<f64>() / rows.len() as f64
            };

            let scored: Vec<f64> = rows.iter().filter_map(|r| r.similarity_score).collect();
            let avg_similarity_score = if scored.is_empty() {
                0.0
            } else {
                scored.iter().sum::<f64>() / scored.len() as f64
            };

            let counted: Vec<usize> = rows.iter().filter_map(|r| r.token_count).collect();
            let avg_token_count = if counted.is_empty() {
                0.0
            } else {
                counted.iter().sum::<usize>() as f64 / counted.len() as f64
            };

            ModelSummary {
                model_id: model_id.clone(),
                avg_latency,
                avg_similarity_score,
                avg_token_count,
            }
        })
        .collect()
}

fn print_summary_table(summaries: &[ModelSummary]) {
    println!("\nEvaluation Summary:");
    println!(
        "{:<42} {:>12} {:>16} {:>16}",
        "model_id", "avg_latency", "avg_similarity", "avg_token_count"
    );
    for summary in summaries {
        println!(
            "{:<42} {:>12.3} {:>16.3} {:>16.1}",
            summary.model_id,
            summary.avg_latency,
            summary.avg_similarity_score,
            summary.avg_token_count
        );
    }
}

/// Rank the evaluated models and emit a publishable strategy document
///
/// `latency_score` is the fastest model's average latency divided by this
/// model's (1.0 for the fastest, shrinking toward 0 for slower ones); the
/// overall score blends similarity and speed 70/30. The best model becomes
/// the primary, the rest the fallback chain in score order.
fn suggest_strategy(summaries: &[ModelSummary]) -> ModelSelectionStrategy {
    let fastest = summaries
        .iter()
        .map(|s| s.avg_latency)
        .filter(|l| *l > 0.0)
        .fold(f64::INFINITY, f64::min);

    let mut scores: Vec<ModelScore> = summaries
        .iter()
        .map(|summary| {
            let latency_score = if summary.avg_latency > 0.0 && fastest.is_finite() {
                fastest / summary.avg_latency
            } else {
                0.0
            };
            ModelScore {
                model_id: summary.model_id.clone(),
                latency: summary.avg_latency,
                similarity_score: summary.avg_similarity_score,
                latency_score,
                overall_score: SIMILARITY_WEIGHT * summary.avg_similarity_score
                    + LATENCY_WEIGHT * latency_score,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let primary_model = scores
        .first()
        .map(|s| s.model_id.clone())
        .unwrap_or_default();
    let fallback_models = scores.iter().skip(1).map(|s| s.model_id.clone()).collect();

    ModelSelectionStrategy {
        primary_model,
        fallback_models,
        model_scores: Some(scores),
        ..ModelSelectionStrategy::default()
    }
}
