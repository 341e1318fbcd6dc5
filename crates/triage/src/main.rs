// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage - hybrid classification of citizen complaints.
//!
//! This is the binary entry point. It loads and validates configuration,
//! builds the engine, and runs one subcommand.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod batch;
mod providers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use triage_config::TriageConfig;
use triage_core::{
    ClassificationAudit, ClassificationRequest, ClassificationResult, HealthStatus, TriageError,
};

/// Triage - hybrid classification of citizen complaints.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single complaint and print the result as JSON.
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: Option<String>,
        /// Also print the monitoring record for this classification.
        #[arg(long)]
        audit: bool,
    },
    /// Classify JSON-lines requests from stdin, writing JSON-lines results to stdout.
    Batch {
        /// Maximum requests classified at once.
        #[arg(long, default_value_t = 8)]
        concurrency: usize,
    },
    /// Validate configuration, print the effective settings and provider health.
    Config,
}

/// Output of `classify --audit`.
#[derive(Serialize)]
struct AuditedResult<'a> {
    result: &'a ClassificationResult,
    audit: ClassificationAudit,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let loaded = match &cli.config {
        Some(path) => triage_config::load_and_validate_path(path),
        None => triage_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            triage_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    triage_engine::recording::register_metrics();

    let outcome = match cli.command {
        Some(Commands::Classify {
            title,
            description,
            location,
            audit,
        }) => {
            let mut request = ClassificationRequest::new(title, description);
            if let Some(location) = location {
                request = request.with_location(location);
            }
            run_classify(&config, &request, audit).await
        }
        Some(Commands::Batch { concurrency }) => run_batch(&config, concurrency).await,
        Some(Commands::Config) => print_config(&config).await,
        None => {
            println!("triage: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        error!(error = %e, "command failed");
        eprintln!("triage: {e}");
        std::process::exit(1);
    }
}

async fn run_classify(
    config: &TriageConfig,
    request: &ClassificationRequest,
    audit: bool,
) -> Result<(), TriageError> {
    let engine = providers::build_engine(config);
    let result = engine.classify(request).await;

    let json = if audit {
        let audited = AuditedResult {
            result: &result,
            audit: ClassificationAudit::from_result(&result),
        };
        serde_json::to_string_pretty(&audited)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .map_err(|e| TriageError::Internal(format!("failed to serialize result: {e}")))?;

    println!("{json}");
    Ok(())
}

async fn run_batch(config: &TriageConfig, concurrency: usize) -> Result<(), TriageError> {
    let engine = providers::build_engine(config);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    batch::run_batch(&engine, stdin, tokio::io::stdout(), concurrency)
        .await
        .map_err(|e| TriageError::Internal(format!("batch I/O failed: {e}")))?;
    Ok(())
}

async fn print_config(config: &TriageConfig) -> Result<(), TriageError> {
    let rendered = toml::to_string_pretty(&redacted(config))
        .map_err(|e| TriageError::Internal(format!("failed to render config: {e}")))?;
    println!("{rendered}");
    print!("{}", render_health(&providers::provider_health(config).await));
    Ok(())
}

/// Provider health as TOML comments, so `triage config` output still parses.
fn render_health(report: &[(String, HealthStatus)]) -> String {
    let mut out = String::from("# provider health\n");
    for (name, status) in report {
        out.push_str(&format!("# {name}: {status}\n"));
    }
    out
}

/// Copy of the config with API keys masked for display.
fn redacted(config: &TriageConfig) -> TriageConfig {
    let mask = |key: &Option<String>| key.as_ref().map(|_| "********".to_string());
    let mut shown = config.clone();
    shown.anthropic.api_key = mask(&config.anthropic.api_key);
    shown.openai.api_key = mask(&config.openai.api_key);
    shown
}

/// Install the global subscriber. Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("triage={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = triage_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.engine.high_threshold, 0.8);
        assert_eq!(config.engine.medium_threshold, 0.6);
    }

    #[test]
    fn cli_parses_classify() {
        let cli = Cli::try_parse_from([
            "triage",
            "classify",
            "--title",
            "Pothole",
            "--description",
            "Deep hole",
            "--audit",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Classify { title, audit, location, .. }) => {
                assert_eq!(title, "Pothole");
                assert!(audit);
                assert!(location.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_batch_default_concurrency() {
        let cli = Cli::try_parse_from(["triage", "batch"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Batch { concurrency: 8 })));
    }

    #[test]
    fn classify_requires_description() {
        assert!(Cli::try_parse_from(["triage", "classify", "--title", "x"]).is_err());
    }

    #[test]
    fn api_keys_are_masked() {
        let mut config = TriageConfig::default();
        config.openai.api_key = Some("sk-secret".into());
        let shown = redacted(&config);
        assert_eq!(shown.openai.api_key.as_deref(), Some("********"));
        assert!(shown.anthropic.api_key.is_none());
        let rendered = toml::to_string_pretty(&shown).unwrap();
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn health_renders_as_toml_comments() {
        let report = vec![
            ("anthropic".to_string(), HealthStatus::Healthy),
            ("openai".to_string(), HealthStatus::Unhealthy("no API key".into())),
        ];
        let rendered = render_health(&report);
        assert_eq!(
            rendered,
            "# provider health\n# anthropic: healthy\n# openai: unhealthy (no API key)\n"
        );
        assert!(toml::from_str::<toml::Table>(&rendered).unwrap().is_empty());
    }

    #[tokio::test]
    async fn audited_output_carries_both_records() {
        let result = ClassificationResult::default_classification();
        let audited = AuditedResult {
            result: &result,
            audit: ClassificationAudit::from_result(&result),
        };
        let json = serde_json::to_value(&audited).unwrap();
        assert_eq!(json["result"]["source"], "default");
        assert_eq!(json["audit"]["source"], "default");
        assert!(json["audit"]["audit_id"].is_string());
    }
}
