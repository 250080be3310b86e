use anyhow::{Context, Result};
use clap::Parser;
use code_explainer::app;
use code_explainer::config::{Config, Overrides};
use code_explainer::error::ExplainError;
use code_explainer::explain::Explainer;
use code_explainer::llm::CompletionClient;
use code_explainer::logging::{self, LogTarget};
use code_explainer::report;
use code_explainer::sample::Language;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "explainer",
    about = "Explain, optimize and estimate the complexity of Python and JavaScript snippets",
    version
)]
struct Args {
    /// Explain this file, print the result and exit (no TUI)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Language of the code (defaults to the file extension, then Python)
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Model to request (overrides EXPLAINER_MODEL and config.toml)
    #[arg(short, long)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&Overrides {
        model: args.model.clone(),
        timeout_secs: args.timeout_secs,
    })?;

    let target = if args.file.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::default_file()
    };
    let log_path = logging::init(target, config.log_level.as_deref());

    let client = CompletionClient::new(&config)?;
    let explainer = Explainer::new(client, config.model.clone());

    match args.file {
        Some(path) => explain_file(&explainer, &path, args.language).await,
        None => app::run_tui(explainer, log_path).await,
    }
}

/// One-shot mode: explain a file and print every pane to stdout
async fn explain_file(
    explainer: &Explainer<CompletionClient>,
    path: &Path,
    language: Option<Language>,
) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let language = language
        .or_else(|| Language::from_path(path))
        .unwrap_or_default();

    match explainer.explain_input(&source, language).await {
        Ok(explanation) => {
            print!("{}", report::render_entry(&explanation.entry));
            Ok(())
        }
        Err(ExplainError::Decode { raw }) => {
            eprintln!("AI returned invalid JSON. Raw output:\n{}", raw);
            anyhow::bail!("AI returned invalid JSON")
        }
        Err(e) => Err(e.into()),
    }
}
